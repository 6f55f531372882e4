// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Portion of a plane/plane intersection line lying on one face

use super::face::Face;
use super::line::Line;
use super::vertex::VertexId;
use crate::utils::SEGMENT_TOL;
use nalgebra::Point3;

/// What part of the face a segment end (or its interior) lies on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndType {
    Vertex,
    Face,
    Edge,
}

/// Clip of an intersection line against one triangle.
///
/// Ends are ordered along the line direction: `start_dist <= end_dist`.
/// For an EDGE end, the stored vertex is the first vertex of the cut edge.
#[derive(Debug, Clone)]
pub struct Segment {
    line: Line,
    ends_set: u8,

    pub start_dist: f64,
    pub end_dist: f64,

    pub start_type: EndType,
    pub middle_type: EndType,
    pub end_type: EndType,

    pub start_vertex: VertexId,
    pub end_vertex: VertexId,

    pub start_pos: Point3<f64>,
    pub end_pos: Point3<f64>,
}

impl Segment {
    /// Segment of `line` on `face`, given the sign (-1, 0, 1) of each face
    /// vertex relative to the other face's plane.
    ///
    /// Returns `None` if fewer than two ends could be located, which only
    /// happens when an edge crossing is numerically parallel to the line.
    pub fn new(line: &Line, face: &Face, signs: [i8; 3]) -> Option<Self> {
        let mut segment = Self {
            line: *line,
            ends_set: 0,
            start_dist: 0.0,
            end_dist: 0.0,
            start_type: EndType::Vertex,
            middle_type: EndType::Vertex,
            end_type: EndType::Vertex,
            start_vertex: 0,
            end_vertex: 0,
            start_pos: Point3::origin(),
            end_pos: Point3::origin(),
        };

        let [v1, v2, v3] = face.vertices;
        let [p1, p2, p3] = face.points();
        let [s1, s2, s3] = signs;

        // A vertex on the line is an end; it is both ends if the other two
        // vertices lie on the same side
        if s1 == 0 {
            segment.set_vertex(v1, p1);
            if s2 == s3 {
                segment.set_vertex(v1, p1);
            }
        }
        if s2 == 0 {
            segment.set_vertex(v2, p2);
            if s1 == s3 {
                segment.set_vertex(v2, p2);
            }
        }
        if s3 == 0 {
            segment.set_vertex(v3, p3);
            if s1 == s2 {
                segment.set_vertex(v3, p3);
            }
        }

        if segment.ends_set != 2 {
            if s1 * s2 == -1 {
                segment.set_edge(v1, p1, p2)?;
            }
            if s2 * s3 == -1 {
                segment.set_edge(v2, p2, p3)?;
            }
            if s3 * s1 == -1 {
                segment.set_edge(v3, p3, p1)?;
            }
        }

        (segment.ends_set == 2).then_some(segment)
    }

    /// Whether the two segments share a stretch of the line longer than
    /// `SEGMENT_TOL`
    pub fn intersect(&self, other: &Segment) -> bool {
        !(self.end_dist < other.start_dist + SEGMENT_TOL
            || other.end_dist < self.start_dist + SEGMENT_TOL)
    }

    fn set_vertex(&mut self, vertex: VertexId, position: &Point3<f64>) {
        match self.ends_set {
            0 => {
                self.start_vertex = vertex;
                self.start_type = EndType::Vertex;
                self.start_dist = self.line.point_to_point_distance(position);
                self.start_pos = *position;
                self.ends_set = 1;
            }
            1 => {
                self.end_vertex = vertex;
                self.end_type = EndType::Vertex;
                self.end_dist = self.line.point_to_point_distance(position);
                self.end_pos = *position;
                self.ends_set = 2;

                if self.start_vertex == self.end_vertex {
                    self.middle_type = EndType::Vertex;
                } else if self.start_type == EndType::Vertex {
                    self.middle_type = EndType::Edge;
                }
                if self.start_dist > self.end_dist {
                    self.swap_ends();
                }
            }
            _ => {}
        }
    }

    /// Make the crossing of edge (p1, p2) an end. `vertex` is the id of p1.
    fn set_edge(&mut self, vertex: VertexId, p1: &Point3<f64>, p2: &Point3<f64>) -> Option<()> {
        if self.ends_set >= 2 {
            return Some(());
        }

        let edge = Line::new(p2 - p1, *p1);
        let position = self.line.line_intersection(&edge)?;
        let distance = self.line.point_to_point_distance(&position);

        if self.ends_set == 0 {
            self.start_vertex = vertex;
            self.start_type = EndType::Edge;
            self.start_pos = position;
            self.start_dist = distance;
            self.middle_type = EndType::Face;
            self.ends_set = 1;
        } else {
            self.end_vertex = vertex;
            self.end_type = EndType::Edge;
            self.end_pos = position;
            self.end_dist = distance;
            self.middle_type = EndType::Face;
            self.ends_set = 2;

            if self.start_dist > self.end_dist {
                self.swap_ends();
            }
        }
        Some(())
    }

    fn swap_ends(&mut self) {
        std::mem::swap(&mut self.start_dist, &mut self.end_dist);
        std::mem::swap(&mut self.start_type, &mut self.end_type);
        std::mem::swap(&mut self.start_vertex, &mut self.end_vertex);
        std::mem::swap(&mut self.start_pos, &mut self.end_pos);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Vector3;

    fn triangle(points: [Point3<f64>; 3]) -> Face {
        Face::new([0, 1, 2], points)
    }

    fn x_axis() -> Line {
        Line::new(Vector3::x(), Point3::origin())
    }

    #[test]
    fn test_edge_edge_segment() {
        // Crosses the x axis between x = 0 and x = 2
        let face = triangle([
            Point3::new(0.0, -1.0, 0.0),
            Point3::new(2.0, -1.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
        ]);
        let segment = Segment::new(&x_axis(), &face, [-1, -1, 1]).unwrap();

        assert_eq!(segment.start_type, EndType::Edge);
        assert_eq!(segment.middle_type, EndType::Face);
        assert_eq!(segment.end_type, EndType::Edge);
        assert_relative_eq!(segment.start_pos, Point3::new(0.5, 0.0, 0.0), epsilon = 1e-12);
        assert_relative_eq!(segment.end_pos, Point3::new(1.5, 0.0, 0.0), epsilon = 1e-12);
        assert!(segment.start_dist < segment.end_dist);
        // Start lies on edge (v3, v1), end on edge (v2, v3)
        assert_eq!(segment.start_vertex, 2);
        assert_eq!(segment.end_vertex, 1);
    }

    #[test]
    fn test_vertex_vertex_segment_is_an_edge() {
        let face = triangle([
            Point3::new(3.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 1.0, 0.0),
        ]);
        let segment = Segment::new(&x_axis(), &face, [0, 0, 1]).unwrap();

        assert_eq!(segment.start_type, EndType::Vertex);
        assert_eq!(segment.middle_type, EndType::Edge);
        assert_eq!(segment.end_type, EndType::Vertex);
        // Swapped so the nearer vertex comes first
        assert_eq!(segment.start_vertex, 1);
        assert_eq!(segment.end_vertex, 0);
    }

    #[test]
    fn test_single_vertex_touch() {
        let face = triangle([
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ]);
        let segment = Segment::new(&x_axis(), &face, [0, 1, 1]).unwrap();

        assert_eq!(segment.start_type, EndType::Vertex);
        assert_eq!(segment.middle_type, EndType::Vertex);
        assert_eq!(segment.end_type, EndType::Vertex);
        assert_eq!(segment.start_vertex, segment.end_vertex);
    }

    #[test]
    fn test_vertex_edge_segment() {
        let face = triangle([
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(2.0, -1.0, 0.0),
            Point3::new(2.0, 1.0, 0.0),
        ]);
        let segment = Segment::new(&x_axis(), &face, [0, -1, 1]).unwrap();

        assert_eq!(segment.start_type, EndType::Vertex);
        assert_eq!(segment.middle_type, EndType::Face);
        assert_eq!(segment.end_type, EndType::Edge);
        assert_relative_eq!(segment.end_pos, Point3::new(2.0, 0.0, 0.0), epsilon = 1e-12);
        assert_eq!(segment.end_vertex, 1);
    }

    #[test]
    fn test_intersect() {
        let face = triangle([
            Point3::new(0.0, -1.0, 0.0),
            Point3::new(2.0, -1.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
        ]);
        let a = Segment::new(&x_axis(), &face, [-1, -1, 1]).unwrap();

        let mut b = a.clone();
        b.start_dist = 1.0;
        b.end_dist = 3.0;
        assert!(a.intersect(&b));
        assert!(b.intersect(&a));

        // Touching at a single point does not count
        b.start_dist = a.end_dist;
        assert!(!a.intersect(&b));
    }
}
