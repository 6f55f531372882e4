// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Boundary-representation interchange type of the CSG kernel

use super::mesh::{Mesh, MeshVertex, Triangle};
use super::vertex::PositionMap;
use super::BoundingBox;
use crate::error::{CsgError, Operand, Result};
use nalgebra::{Matrix4, Point3, Rotation3, Unit, Vector3};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Flat vertex list plus three indices per triangle.
///
/// Carries no adjacency or classification data; that exists only inside an
/// [`Object3D`](super::Object3D) for the duration of one operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Solid {
    pub vertices: Vec<Point3<f64>>,
    pub indices: Vec<usize>,
}

impl Solid {
    pub fn new(vertices: Vec<Point3<f64>>, indices: Vec<usize>) -> Self {
        Self { vertices, indices }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.indices.is_empty()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Index triples, one per triangle
    pub fn triangles(&self) -> impl Iterator<Item = [usize; 3]> + '_ {
        self.indices
            .chunks_exact(3)
            .map(|chunk| [chunk[0], chunk[1], chunk[2]])
    }

    /// Positions of each triangle's corners
    pub fn triangle_points(&self) -> impl Iterator<Item = [Point3<f64>; 3]> + '_ {
        self.triangles()
            .map(|[a, b, c]| [self.vertices[a], self.vertices[b], self.vertices[c]])
    }

    /// Check the arrays describe at least one well-indexed triangle
    pub fn validate(&self, which: Operand) -> Result<()> {
        if self.vertices.is_empty() {
            return Err(CsgError::DegenerateInput {
                which,
                reason: "no vertices".to_string(),
            });
        }
        if self.indices.is_empty() {
            return Err(CsgError::DegenerateInput {
                which,
                reason: "no triangles".to_string(),
            });
        }
        if self.indices.len() % 3 != 0 {
            return Err(CsgError::DegenerateInput {
                which,
                reason: format!("{} indices is not a multiple of 3", self.indices.len()),
            });
        }
        if let Some(&index) = self.indices.iter().find(|&&i| i >= self.vertices.len()) {
            return Err(CsgError::InvalidIndex {
                which,
                index,
                vertex_count: self.vertices.len(),
            });
        }
        Ok(())
    }

    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_points(&self.vertices)
    }

    /// Arithmetic mean of the vertex positions
    pub fn mean(&self) -> Point3<f64> {
        if self.vertices.is_empty() {
            return Point3::origin();
        }
        let sum = self
            .vertices
            .iter()
            .fold(Vector3::zeros(), |acc, v| acc + v.coords);
        Point3::from(sum / self.vertices.len() as f64)
    }

    pub fn transform(&mut self, matrix: &Matrix4<f64>) {
        for vertex in &mut self.vertices {
            *vertex = matrix.transform_point(vertex);
        }
        // A mirroring transform would turn every face inside out
        if matrix.fixed_view::<3, 3>(0, 0).into_owned().determinant() < 0.0 {
            for triangle in self.indices.chunks_exact_mut(3) {
                triangle.swap(0, 1);
            }
        }
    }

    pub fn translate(&mut self, offset: &Vector3<f64>) {
        self.transform(&Matrix4::new_translation(offset));
    }

    pub fn scale(&mut self, factors: &Vector3<f64>) {
        self.transform(&Matrix4::new_nonuniform_scaling(factors));
    }

    /// Rotate about `axis` through the origin by `angle` radians
    pub fn rotate(&mut self, axis: &Vector3<f64>, angle: f64) {
        let rotation = Rotation3::from_axis_angle(&Unit::new_normalize(*axis), angle);
        self.transform(&rotation.to_homogeneous());
    }

    /// Build a solid from an engine mesh, welding coincident vertices.
    ///
    /// Triangles referring to a missing vertex are skipped.
    pub fn from_mesh(mesh: &Mesh) -> Self {
        let mut positions = PositionMap::new();
        let mut remap = Vec::with_capacity(mesh.vertices.len());
        for vertex in &mesh.vertices {
            remap.push(positions.get_or_add(&vertex.position));
        }

        let mut indices = Vec::with_capacity(mesh.triangles.len() * 3);
        for triangle in &mesh.triangles {
            let [a, b, c] = triangle.indices;
            match (remap.get(a), remap.get(b), remap.get(c)) {
                (Some(&a), Some(&b), Some(&c)) => indices.extend_from_slice(&[a, b, c]),
                _ => warn!(
                    indices = ?triangle.indices,
                    vertices = mesh.vertices.len(),
                    "skipping mesh triangle with an out-of-range index"
                ),
            }
        }

        Self::new(positions.into_positions(), indices)
    }

    /// Engine mesh with area-weighted vertex normals
    pub fn to_mesh(&self) -> Mesh {
        let mut mesh = Mesh::with_capacity(self.vertices.len(), self.triangle_count());
        for position in &self.vertices {
            mesh.add_vertex(MeshVertex::new(*position, Vector3::zeros()));
        }
        for triangle in self.triangles() {
            mesh.add_triangle(Triangle::new(triangle));
        }
        mesh.recompute_normals();
        mesh
    }
}
