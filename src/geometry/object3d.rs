// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Mutable working copy of a solid during one boolean operation

use super::face::{Face, FaceId, FaceStatus};
use super::vertex::{Vertex, VertexGrid, VertexId, VertexStatus};
use super::{BoundingBox, Solid};
use crate::error::{CsgError, Operand, Result};
use crate::utils::TOL;
use nalgebra::Point3;

/// Vertex arena plus face list of one operand.
///
/// Faces refer to vertices by id; a vertex is never removed, so ids stay
/// valid for the lifetime of the object.
#[derive(Debug, Clone)]
pub struct Object3D {
    pub(crate) vertices: Vec<Vertex>,
    pub(crate) faces: Vec<Face>,
    grid: VertexGrid,
    bound: BoundingBox,
}

impl Object3D {
    /// Build the working copy of `solid`, merging coincident vertices and
    /// dropping zero-area triangles.
    ///
    /// Fails with `DegenerateInput` if no triangle survives.
    pub fn from_solid(solid: &Solid, which: Operand) -> Result<Self> {
        solid.validate(which)?;

        let mut object = Self {
            vertices: Vec::with_capacity(solid.vertex_count()),
            faces: Vec::with_capacity(solid.triangle_count()),
            grid: VertexGrid::new(),
            bound: solid.bounding_box(),
        };

        let ids: Vec<VertexId> = solid
            .vertices
            .iter()
            .map(|position| object.add_vertex(position, VertexStatus::Unknown))
            .collect();

        for [a, b, c] in solid.triangles() {
            object.add_face(ids[a], ids[b], ids[c]);
        }

        if object.faces.is_empty() {
            return Err(CsgError::DegenerateInput {
                which,
                reason: "no non-degenerate triangles".to_string(),
            });
        }

        Ok(object)
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn face(&self, id: FaceId) -> &Face {
        &self.faces[id]
    }

    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    pub fn bound(&self) -> &BoundingBox {
        &self.bound
    }

    /// Id of the vertex at `position`, creating it if no vertex lies within
    /// `TOL`. An existing vertex takes on `status`.
    pub fn add_vertex(&mut self, position: &Point3<f64>, status: VertexStatus) -> VertexId {
        let vertices = &self.vertices;
        if let Some(id) = self.grid.find(position, |i| vertices[i].position) {
            self.vertices[id].status = status;
            return id;
        }

        let id = self.vertices.len();
        self.vertices.push(Vertex::new(*position, status));
        self.grid.insert(position, id);
        id
    }

    /// Append a face unless it repeats a vertex or has (near) zero area
    pub fn add_face(&mut self, a: VertexId, b: VertexId, c: VertexId) -> Option<FaceId> {
        if a == b || a == c || b == c {
            return None;
        }

        let points = [
            self.vertices[a].position,
            self.vertices[b].position,
            self.vertices[c].position,
        ];
        let face = Face::new([a, b, c], points);
        // Area is a squared length, so it is compared against TOL squared
        if face.area() <= TOL * TOL {
            return None;
        }

        self.faces.push(face);
        Some(self.faces.len() - 1)
    }

    /// Take a face out of the list, shifting later faces down
    pub(crate) fn remove_face(&mut self, id: FaceId) -> Face {
        self.faces.remove(id)
    }

    /// Reinsert a face at `id`, shifting later faces up
    pub(crate) fn insert_face(&mut self, id: FaceId, face: Face) {
        self.faces.insert(id, face);
    }

    /// Flip the winding of every face classified INSIDE
    pub fn invert_inside_faces(&mut self) {
        for face in &mut self.faces {
            if face.status == FaceStatus::Inside {
                face.invert();
            }
        }
    }

    /// Count of faces carrying `status`
    pub fn count_status(&self, status: FaceStatus) -> usize {
        self.faces.iter().filter(|f| f.status == status).count()
    }

    /// Export the current faces as a solid, keeping referenced vertices in
    /// arena order
    pub fn to_solid(&self) -> Solid {
        let mut remap = vec![None; self.vertices.len()];
        for face in &self.faces {
            for &id in &face.vertices {
                remap[id] = Some(0);
            }
        }

        let mut positions = Vec::new();
        for (id, vertex) in self.vertices.iter().enumerate() {
            if remap[id].is_some() {
                remap[id] = Some(positions.len());
                positions.push(vertex.position);
            }
        }

        let indices = self
            .faces
            .iter()
            .flat_map(|face| face.vertices.iter().filter_map(|&id| remap[id]))
            .collect();
        Solid::new(positions, indices)
    }
}
