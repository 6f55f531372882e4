// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Face splitting: refine one solid's faces along its intersection with another
//!
//! After [`Object3D::split_faces`] no face of `self` crosses the surface of the
//! other object; every face lies entirely on one side of it, or on it.

use super::face::{Face, FaceId};
use super::line::Line;
use super::object3d::Object3D;
use super::segment::{EndType, Segment};
use super::vertex::{VertexId, VertexStatus};
use crate::utils::math::sign_with_tolerance;
use crate::utils::TOL;
use nalgebra::Point3;
use tracing::{debug, trace, warn};

/// Restart budget per initial face before splitting gives up
const RESTARTS_PER_FACE: usize = 256;

impl Object3D {
    /// Split every face of `self` that crosses a face of `other`.
    ///
    /// Replaced faces are removed in place and their fragments appended, so
    /// the fragment now sitting at the current index is examined again.
    pub fn split_faces(&mut self, other: &Object3D) {
        if !self.bound().overlap(other.bound()) {
            debug!("bounds do not overlap, nothing to split");
            return;
        }

        let faces_before = self.num_faces();
        let budget = (faces_before + other.num_faces()) * RESTARTS_PER_FACE;
        let mut restarts = 0;
        let mut i = 0;

        while i < self.faces.len() {
            let mut revisit = false;

            if self.faces[i].bound().overlap(other.bound()) {
                for face2 in other.faces() {
                    let face1 = self.faces[i].clone();
                    if !face1.bound().overlap(face2.bound()) {
                        continue;
                    }

                    let Some((segment1, segment2)) = intersection_segments(&face1, face2) else {
                        continue;
                    };
                    if !segment1.intersect(&segment2) {
                        continue;
                    }
                    if !self.split_face(i, &segment1, &segment2) {
                        continue;
                    }

                    // A split that only re-created the same face leaves it at the end
                    if self.faces.last().is_some_and(|f| f.same_vertices(&face1)) {
                        let last = self.faces.len() - 1;
                        if i != last {
                            let face = self.remove_face(last);
                            self.insert_face(i, face);
                        }
                        continue;
                    }

                    revisit = true;
                    break;
                }
            }

            if revisit {
                restarts += 1;
                if restarts > budget {
                    warn!(restarts, faces = self.faces.len(), "face splitting hit its restart budget");
                    break;
                }
            } else {
                i += 1;
            }
        }

        debug!(
            faces_before,
            faces_after = self.faces.len(),
            vertices = self.vertices.len(),
            "split faces"
        );
    }

    /// Split the face at `face_pos` along the overlap of the two segments.
    ///
    /// `segment1` lies on this face, `segment2` on the other solid's face.
    /// Returns true if the face was replaced by fragments.
    fn split_face(&mut self, face_pos: FaceId, segment1: &Segment, segment2: &Segment) -> bool {
        use EndType::{Edge, Face as Inner, Vertex};

        let face = self.faces[face_pos].clone();
        let start_vertex = segment1.start_vertex;
        let end_vertex = segment1.end_vertex;

        // The deeper start and the shallower end bound the overlap
        let (start_dist, start_type, start_pos) =
            if segment2.start_dist > segment1.start_dist + TOL {
                (segment2.start_dist, segment1.middle_type, segment2.start_pos)
            } else {
                (segment1.start_dist, segment1.start_type, segment1.start_pos)
            };
        let (end_dist, end_type, end_pos) = if segment2.end_dist < segment1.end_dist - TOL {
            (segment2.end_dist, segment1.middle_type, segment2.end_pos)
        } else {
            (segment1.end_dist, segment1.end_type, segment1.end_pos)
        };
        let middle_type = segment1.middle_type;

        if start_type == Vertex {
            self.vertices[start_vertex].status = VertexStatus::Boundary;
        }
        if end_type == Vertex {
            self.vertices[end_vertex].status = VertexStatus::Boundary;
        }

        trace!(
            face = face_pos,
            ?start_type,
            ?middle_type,
            ?end_type,
            "splitting face"
        );

        match (start_type, middle_type, end_type) {
            (Vertex, _, Vertex) => return false,
            (_, Edge, _) => {
                let edge = edge_index(&face, start_vertex, end_vertex);
                if start_type == Vertex {
                    self.break_in_two(face_pos, &end_pos, edge);
                } else if end_type == Vertex {
                    self.break_in_two(face_pos, &start_pos, edge);
                } else if start_dist == end_dist {
                    self.break_in_two(face_pos, &end_pos, edge);
                } else if follows_winding(&face, start_vertex, end_vertex) {
                    self.break_in_three_on_edge(face_pos, &start_pos, &end_pos, edge);
                } else {
                    self.break_in_three_on_edge(face_pos, &end_pos, &start_pos, edge);
                }
            }
            (Vertex, _, Edge) => {
                let edge = corner_index(&face, end_vertex);
                self.break_in_two(face_pos, &end_pos, edge);
            }
            (Edge, _, Vertex) => {
                let edge = corner_index(&face, start_vertex);
                self.break_in_two(face_pos, &start_pos, edge);
            }
            (Vertex, _, Inner) => {
                let corner = corner_index(&face, start_vertex);
                self.break_in_three_around(face_pos, &end_pos, corner);
            }
            (Inner, _, Vertex) => {
                let corner = corner_index(&face, end_vertex);
                self.break_in_three_around(face_pos, &start_pos, corner);
            }
            (Edge, _, Edge) => {
                self.break_in_three_across(face_pos, &start_pos, &end_pos, start_vertex, end_vertex);
            }
            (Edge, _, Inner) => {
                let corner = corner_index(&face, start_vertex);
                self.break_in_four(face_pos, &start_pos, &end_pos, corner);
            }
            (Inner, _, Edge) => {
                let corner = corner_index(&face, end_vertex);
                self.break_in_four(face_pos, &end_pos, &start_pos, corner);
            }
            (Inner, _, Inner) => {
                let segment = start_pos - end_pos;
                if segment.x.abs() < TOL && segment.y.abs() < TOL && segment.z.abs() < TOL {
                    self.break_in_three_around(face_pos, &start_pos, 0);
                    return true;
                }

                // The corner most aligned with the segment keeps a fan of two faces
                let alignment: Vec<f64> = face
                    .points()
                    .iter()
                    .map(|p| {
                        let to_end = end_pos - p;
                        let norm = to_end.norm();
                        if norm > 0.0 {
                            segment.dot(&(to_end / norm)).abs()
                        } else {
                            0.0
                        }
                    })
                    .collect();
                let lined = if alignment[0] > alignment[1] && alignment[0] > alignment[2] {
                    0
                } else if alignment[1] > alignment[2] && alignment[1] > alignment[0] {
                    1
                } else {
                    2
                };

                let lined_pos = face.points()[lined];
                if (lined_pos - start_pos).norm() > (lined_pos - end_pos).norm() {
                    self.break_in_five(face_pos, &start_pos, &end_pos, lined);
                } else {
                    self.break_in_five(face_pos, &end_pos, &start_pos, lined);
                }
            }
        }

        true
    }

    /// Swap the face for `fragments`; degenerate ones are dropped by `add_face`
    fn replace_face(&mut self, face_pos: FaceId, fragments: &[[VertexId; 3]]) {
        self.remove_face(face_pos);
        for &[x, y, z] in fragments {
            self.add_face(x, y, z);
        }
    }

    fn boundary_vertex(&mut self, position: &Point3<f64>) -> VertexId {
        self.add_vertex(position, VertexStatus::Boundary)
    }

    /// One new vertex on the edge starting at corner `edge`
    fn break_in_two(&mut self, face_pos: FaceId, position: &Point3<f64>, edge: usize) {
        let [a, b, c] = rotated(&self.faces[face_pos], edge);
        let n = self.boundary_vertex(position);
        self.replace_face(face_pos, &[[a, n, c], [n, b, c]]);
    }

    /// Two new vertices on the edge starting at corner `edge`, in winding order
    fn break_in_three_on_edge(
        &mut self,
        face_pos: FaceId,
        position1: &Point3<f64>,
        position2: &Point3<f64>,
        edge: usize,
    ) {
        let [a, b, c] = rotated(&self.faces[face_pos], edge);
        let n1 = self.boundary_vertex(position1);
        let n2 = self.boundary_vertex(position2);
        self.replace_face(face_pos, &[[a, n1, c], [n1, n2, c], [n2, b, c]]);
    }

    /// One new interior vertex fanned to all three corners, starting at `corner`
    fn break_in_three_around(&mut self, face_pos: FaceId, position: &Point3<f64>, corner: usize) {
        let [a, b, c] = rotated(&self.faces[face_pos], corner);
        let n = self.boundary_vertex(position);
        self.replace_face(face_pos, &[[a, b, n], [b, c, n], [c, a, n]]);
    }

    /// New vertices on two different edges, cutting off the corner they share.
    ///
    /// `start_vertex` and `end_vertex` are the first corners of the edges
    /// holding `position1` and `position2`.
    fn break_in_three_across(
        &mut self,
        face_pos: FaceId,
        position1: &Point3<f64>,
        position2: &Point3<f64>,
        start_vertex: VertexId,
        end_vertex: VertexId,
    ) {
        let face = &self.faces[face_pos];
        let v = face.vertices;
        let n1 = self.boundary_vertex(position1);
        let n2 = self.boundary_vertex(position2);

        let forward = (0..3).find(|&k| start_vertex == v[k] && end_vertex == v[(k + 1) % 3]);
        let fragments = if let Some(k) = forward {
            let [a, b, c] = [v[k], v[(k + 1) % 3], v[(k + 2) % 3]];
            [[a, n1, n2], [a, n2, c], [n1, b, n2]]
        } else {
            let k = (0..3)
                .find(|&k| start_vertex == v[(k + 1) % 3] && end_vertex == v[k])
                .unwrap_or(2);
            let [a, b, c] = [v[k], v[(k + 1) % 3], v[(k + 2) % 3]];
            [[a, n2, n1], [a, n1, c], [n2, b, n1]]
        };
        self.replace_face(face_pos, &fragments);
    }

    /// `position1` on the edge starting at `corner`, `position2` inside the face
    fn break_in_four(
        &mut self,
        face_pos: FaceId,
        position1: &Point3<f64>,
        position2: &Point3<f64>,
        corner: usize,
    ) {
        let [a, b, c] = rotated(&self.faces[face_pos], corner);
        let n1 = self.boundary_vertex(position1);
        let n2 = self.boundary_vertex(position2);
        self.replace_face(face_pos, &[[a, n1, n2], [n1, b, n2], [b, c, n2], [c, a, n2]]);
    }

    /// Both new vertices inside the face; `position2` is the one nearer the
    /// corner `lined`
    fn break_in_five(
        &mut self,
        face_pos: FaceId,
        position1: &Point3<f64>,
        position2: &Point3<f64>,
        lined: usize,
    ) {
        let [a, b, c] = rotated(&self.faces[face_pos], lined);
        let n1 = self.boundary_vertex(position1);
        let n2 = self.boundary_vertex(position2);
        self.replace_face(
            face_pos,
            &[[b, c, n1], [b, n1, n2], [c, n2, n1], [b, n2, a], [c, a, n2]],
        );
    }
}

/// Segments of the intersection line on each face, or `None` when the faces
/// do not properly cross (coplanar, separated, or parallel planes)
fn intersection_segments(face1: &Face, face2: &Face) -> Option<(Segment, Segment)> {
    let signs1 = plane_signs(face1, face2);
    if signs1[0] == signs1[1] && signs1[1] == signs1[2] {
        return None;
    }
    let signs2 = plane_signs(face2, face1);
    if signs2[0] == signs2[1] && signs2[1] == signs2[2] {
        return None;
    }

    let line = Line::from_planes(
        &face1.normal(),
        &face1.points()[0],
        &face2.normal(),
        &face2.points()[0],
    )?;

    let segment1 = Segment::new(&line, face1, signs1)?;
    let segment2 = Segment::new(&line, face2, signs2)?;
    Some((segment1, segment2))
}

/// Side of `plane`'s plane each corner of `face` lies on
fn plane_signs(face: &Face, plane: &Face) -> [i8; 3] {
    let [p1, p2, p3] = face.points();
    [
        sign_with_tolerance(plane.plane_distance(p1)),
        sign_with_tolerance(plane.plane_distance(p2)),
        sign_with_tolerance(plane.plane_distance(p3)),
    ]
}

/// Corner ids starting from corner `k`, in winding order
fn rotated(face: &Face, k: usize) -> [VertexId; 3] {
    let v = face.vertices;
    [v[k % 3], v[(k + 1) % 3], v[(k + 2) % 3]]
}

/// Position of `vertex` among the face's corners, defaulting to the last
fn corner_index(face: &Face, vertex: VertexId) -> usize {
    face.vertices.iter().position(|&v| v == vertex).unwrap_or(2)
}

/// Index of the edge joining the two corners, defaulting to the closing edge
fn edge_index(face: &Face, a: VertexId, b: VertexId) -> usize {
    let v = face.vertices;
    (0..2)
        .find(|&k| (a == v[k] && b == v[k + 1]) || (a == v[k + 1] && b == v[k]))
        .unwrap_or(2)
}

/// Whether `a -> b` runs along the face's winding
fn follows_winding(face: &Face, a: VertexId, b: VertexId) -> bool {
    let v = face.vertices;
    (0..3).any(|k| a == v[k] && b == v[(k + 1) % 3])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Operand;
    use crate::geometry::{Primitive, Solid};
    use nalgebra::Vector3;

    fn single_triangle() -> Object3D {
        let solid = Solid::new(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(4.0, 0.0, 0.0),
                Point3::new(0.0, 4.0, 0.0),
            ],
            vec![0, 1, 2],
        );
        Object3D::from_solid(&solid, Operand::A).unwrap()
    }

    fn total_area(object: &Object3D) -> f64 {
        object.faces().iter().map(Face::area).sum()
    }

    fn assert_same_orientation(object: &Object3D) {
        for face in object.faces() {
            assert!(face.normal().z > 0.99, "fragment flipped: {:?}", face.vertices);
        }
    }

    #[test]
    fn test_break_in_two_keeps_area_and_winding() {
        let mut object = single_triangle();
        object.break_in_two(0, &Point3::new(2.0, 0.0, 0.0), 0);

        assert_eq!(object.num_faces(), 2);
        assert!((total_area(&object) - 8.0).abs() < 1e-9);
        assert_same_orientation(&object);
        assert_eq!(object.vertices()[3].status, VertexStatus::Boundary);
    }

    #[test]
    fn test_break_in_three_patterns() {
        let mut object = single_triangle();
        object.break_in_three_on_edge(0, &Point3::new(1.0, 0.0, 0.0), &Point3::new(3.0, 0.0, 0.0), 0);
        assert_eq!(object.num_faces(), 3);
        assert!((total_area(&object) - 8.0).abs() < 1e-9);
        assert_same_orientation(&object);

        let mut object = single_triangle();
        object.break_in_three_around(0, &Point3::new(1.0, 1.0, 0.0), 1);
        assert_eq!(object.num_faces(), 3);
        assert!((total_area(&object) - 8.0).abs() < 1e-9);
        assert_same_orientation(&object);

        // Cut off corner 1 (4, 0, 0) between edges (v1, v2) and (v2, v3)
        let mut object = single_triangle();
        object.break_in_three_across(0, &Point3::new(3.0, 0.0, 0.0), &Point3::new(3.0, 1.0, 0.0), 0, 1);
        assert_eq!(object.num_faces(), 3);
        assert!((total_area(&object) - 8.0).abs() < 1e-9);
        assert_same_orientation(&object);
    }

    #[test]
    fn test_break_in_four_and_five() {
        let mut object = single_triangle();
        object.break_in_four(0, &Point3::new(2.0, 0.0, 0.0), &Point3::new(1.0, 1.0, 0.0), 0);
        assert_eq!(object.num_faces(), 4);
        assert!((total_area(&object) - 8.0).abs() < 1e-9);
        assert_same_orientation(&object);

        let mut object = single_triangle();
        object.break_in_five(0, &Point3::new(2.0, 1.0, 0.0), &Point3::new(1.0, 0.5, 0.0), 0);
        assert_eq!(object.num_faces(), 5);
        assert!((total_area(&object) - 8.0).abs() < 1e-9);
        assert_same_orientation(&object);
    }

    #[test]
    fn test_split_disjoint_objects_is_noop() {
        let a = Primitive::cube(Vector3::new(1.0, 1.0, 1.0), false).to_solid();
        let mut b = a.clone();
        b.translate(&Vector3::new(5.0, 0.0, 0.0));

        let mut object_a = Object3D::from_solid(&a, Operand::A).unwrap();
        let object_b = Object3D::from_solid(&b, Operand::B).unwrap();
        object_a.split_faces(&object_b);
        assert_eq!(object_a.num_faces(), 12);
    }

    #[test]
    fn test_split_overlapping_cubes() {
        let a = Primitive::cube(Vector3::new(2.0, 2.0, 2.0), true).to_solid();
        let mut b = a.clone();
        b.translate(&Vector3::new(1.0, 1.0, 1.0));

        let mut object_a = Object3D::from_solid(&a, Operand::A).unwrap();
        let mut object_b = Object3D::from_solid(&b, Operand::B).unwrap();
        let area = total_area(&object_a);

        object_a.split_faces(&object_b);
        object_b.split_faces(&object_a);

        assert!(object_a.num_faces() > 12);
        assert!(object_b.num_faces() > 12);
        assert!((total_area(&object_a) - area).abs() < 1e-4);
        assert!(object_a
            .vertices()
            .iter()
            .any(|v| v.status == VertexStatus::Boundary));

        // The corner of B inside A becomes a vertex of A's surface
        assert!(object_a
            .vertices()
            .iter()
            .any(|v| v.coincides(&Point3::new(1.0, 1.0, 0.0))));
    }
}
