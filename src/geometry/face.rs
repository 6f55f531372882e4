// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Triangular faces of the CSG working mesh

use super::bbox::BoundingBox;
use super::vertex::{Vertex, VertexId, VertexStatus};
use crate::utils::math::calculate_triangle_normal;
use crate::utils::TOL;
use nalgebra::{Point3, Vector3};

/// Index of a face in its owning [`Object3D`](super::Object3D)
pub type FaceId = usize;

/// Position of a face relative to the other solid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaceStatus {
    Unknown,
    Inside,
    Outside,
    /// Coplanar with a face of the other solid, normals agreeing
    Same,
    /// Coplanar with a face of the other solid, normals opposed
    Opposite,
}

/// Side of a projected point relative to a projected edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EdgeSide {
    Up,
    Down,
    On,
    /// The point is outside the edge's sweep range
    None,
}

/// Triangle over three arena vertices.
///
/// Positions are cached at creation: vertex positions never move once the
/// vertex exists, only statuses and adjacency change.
#[derive(Debug, Clone)]
pub struct Face {
    pub vertices: [VertexId; 3],
    pub status: FaceStatus,
    points: [Point3<f64>; 3],
    normal: Vector3<f64>,
    bound: BoundingBox,
}

impl Face {
    pub fn new(vertices: [VertexId; 3], points: [Point3<f64>; 3]) -> Self {
        Self {
            vertices,
            status: FaceStatus::Unknown,
            normal: calculate_triangle_normal(&points[0], &points[1], &points[2]),
            bound: BoundingBox::from_triangle(&points[0], &points[1], &points[2]),
            points,
        }
    }

    pub fn points(&self) -> &[Point3<f64>; 3] {
        &self.points
    }

    pub fn normal(&self) -> Vector3<f64> {
        self.normal
    }

    pub fn bound(&self) -> &BoundingBox {
        &self.bound
    }

    pub fn area(&self) -> f64 {
        let [p1, p2, p3] = &self.points;
        (p2 - p1).cross(&(p3 - p1)).norm() / 2.0
    }

    pub fn centroid(&self) -> Point3<f64> {
        let [p1, p2, p3] = &self.points;
        Point3::from((p1.coords + p2.coords + p3.coords) / 3.0)
    }

    /// Signed distance of `point` to this face's plane (`ax + by + cz + d`)
    pub fn plane_distance(&self, point: &Point3<f64>) -> f64 {
        self.normal.dot(&(point - self.points[0]))
    }

    /// Same three vertices in the same cyclic order
    pub fn same_vertices(&self, other: &Face) -> bool {
        let [a, b, c] = self.vertices;
        let o = other.vertices;
        [a, b, c] == o || [b, c, a] == o || [c, a, b] == o
    }

    /// Reverse the winding, flipping the normal
    pub fn invert(&mut self) {
        self.vertices.swap(0, 1);
        self.points.swap(0, 1);
        self.normal = -self.normal;
    }

    /// Whether a point on this face's plane lies within the triangle.
    ///
    /// Projects onto the coordinate plane where the normal's dominant axis
    /// vanishes and tests the point against each edge. Points on an edge count
    /// as inside.
    pub fn has_point(&self, point: &Point3<f64>) -> bool {
        let n = self.normal.abs();
        // (sweep axis, compared axis) of the projection
        let (u, v) = if n.x >= n.y && n.x >= n.z {
            (1, 2)
        } else if n.y >= n.z {
            (0, 2)
        } else {
            (0, 1)
        };

        let [p1, p2, p3] = &self.points;
        let sides = [
            edge_side(point, p1, p2, u, v),
            edge_side(point, p2, p3, u, v),
            edge_side(point, p3, p1, u, v),
        ];

        let has_up = sides.contains(&EdgeSide::Up);
        let has_down = sides.contains(&EdgeSide::Down);
        (has_up && has_down) || sides.contains(&EdgeSide::On)
    }

    /// Adopt a definite INSIDE/OUTSIDE status already carried by one of the
    /// vertices. Returns false when none of them has one.
    pub fn simple_classify(&mut self, vertices: &[Vertex]) -> bool {
        for &id in &self.vertices {
            match vertices[id].status {
                VertexStatus::Inside => {
                    self.status = FaceStatus::Inside;
                    return true;
                }
                VertexStatus::Outside => {
                    self.status = FaceStatus::Outside;
                    return true;
                }
                VertexStatus::Unknown | VertexStatus::Boundary => {}
            }
        }
        false
    }
}

/// Side of `point` relative to the edge (p1, p2) in the (u, v) projection.
///
/// The edge is treated as a function v(u); points outside its u-range, and
/// edges perpendicular to the u axis, give `None`.
fn edge_side(point: &Point3<f64>, p1: &Point3<f64>, p2: &Point3<f64>, u: usize, v: usize) -> EdgeSide {
    let (pu, pv) = (point[u], point[v]);
    let (u1, v1, u2, v2) = (p1[u], p1[v], p2[u], p2[v]);

    let in_range = (pu >= u1 && pu <= u2) || (pu <= u1 && pu >= u2);
    if (u1 - u2).abs() <= TOL || !in_range {
        return EdgeSide::None;
    }

    let slope = (v2 - v1) / (u2 - u1);
    let edge_v = slope * pu + (v1 - slope * u1);

    if edge_v > pv + TOL {
        EdgeSide::Up
    } else if edge_v < pv - TOL {
        EdgeSide::Down
    } else {
        EdgeSide::On
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_triangle() -> Face {
        Face::new(
            [0, 1, 2],
            [
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
        )
    }

    #[test]
    fn test_normal_and_area() {
        let face = unit_triangle();
        assert_relative_eq!(face.normal(), Vector3::new(0.0, 0.0, 1.0), epsilon = 1e-12);
        assert_relative_eq!(face.area(), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_has_point_centroid() {
        assert!(unit_triangle().has_point(&Point3::new(0.333, 0.333, 0.0)));
    }

    #[test]
    fn test_has_point_outside() {
        assert!(!unit_triangle().has_point(&Point3::new(2.0, 2.0, 0.0)));
        assert!(!unit_triangle().has_point(&Point3::new(0.6, 0.6, 0.0)));
        assert!(!unit_triangle().has_point(&Point3::new(-0.1, 0.5, 0.0)));
    }

    #[test]
    fn test_has_point_on_edge() {
        assert!(unit_triangle().has_point(&Point3::new(0.5, 0.0, 0.0)));
        assert!(unit_triangle().has_point(&Point3::new(0.5, 0.5, 0.0)));
    }

    #[test]
    fn test_has_point_vertical_face() {
        // Lies in the x = 2 plane, projected onto yz
        let face = Face::new(
            [0, 1, 2],
            [
                Point3::new(2.0, 0.0, 0.0),
                Point3::new(2.0, 1.0, 0.0),
                Point3::new(2.0, 0.0, 1.0),
            ],
        );
        assert!(face.has_point(&Point3::new(2.0, 0.25, 0.25)));
        assert!(!face.has_point(&Point3::new(2.0, 0.9, 0.9)));
    }

    #[test]
    fn test_invert() {
        let mut face = unit_triangle();
        face.invert();
        assert_eq!(face.vertices, [1, 0, 2]);
        assert_relative_eq!(face.normal(), Vector3::new(0.0, 0.0, -1.0), epsilon = 1e-12);
        assert!(face.has_point(&Point3::new(0.25, 0.25, 0.0)));
    }

    #[test]
    fn test_same_vertices_rotation() {
        let a = unit_triangle();
        let b = Face::new([1, 2, 0], *a.points());
        let mut c = unit_triangle();
        c.invert();
        assert!(a.same_vertices(&b));
        assert!(!a.same_vertices(&c));
    }

    #[test]
    fn test_plane_distance() {
        let face = unit_triangle();
        assert_relative_eq!(face.plane_distance(&Point3::new(3.0, 3.0, 2.0)), 2.0);
        assert_relative_eq!(face.plane_distance(&Point3::new(0.0, 0.0, -1.0)), -1.0);
    }

    #[test]
    fn test_simple_classify() {
        let mut vertices = vec![
            Vertex::new(Point3::new(0.0, 0.0, 0.0), VertexStatus::Boundary),
            Vertex::new(Point3::new(1.0, 0.0, 0.0), VertexStatus::Unknown),
            Vertex::new(Point3::new(0.0, 1.0, 0.0), VertexStatus::Unknown),
        ];
        let mut face = unit_triangle();
        assert!(!face.simple_classify(&vertices));
        assert_eq!(face.status, FaceStatus::Unknown);

        vertices[2].status = VertexStatus::Inside;
        assert!(face.simple_classify(&vertices));
        assert_eq!(face.status, FaceStatus::Inside);
    }
}
