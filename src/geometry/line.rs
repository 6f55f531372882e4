// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Lines: plane/plane intersections, triangle edges and classification rays

use crate::utils::{normalize_stable, TOL};
use nalgebra::{Point3, Vector3};
use rand::Rng;

/// Infinite line through `point` along the unit vector `direction`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub point: Point3<f64>,
    pub direction: Vector3<f64>,
}

impl Line {
    /// Line through `point` along `direction` (normalized here)
    pub fn new(direction: Vector3<f64>, point: Point3<f64>) -> Self {
        Self {
            point,
            direction: normalize_stable(&direction),
        }
    }

    /// Intersection of two planes given by unit normal and a point on each.
    ///
    /// Returns `None` when the planes are parallel. The point on the line is
    /// found by zeroing the coordinate along which the direction is largest.
    pub fn from_planes(
        normal1: &Vector3<f64>,
        point1: &Point3<f64>,
        normal2: &Vector3<f64>,
        point2: &Point3<f64>,
    ) -> Option<Self> {
        let direction = normal1.cross(normal2);
        if direction.norm() < TOL {
            return None;
        }

        let d1 = -normal1.dot(&point1.coords);
        let d2 = -normal2.dot(&point2.coords);
        let (n1, n2) = (normal1, normal2);

        let abs = direction.abs();
        let point = if abs.x >= abs.y && abs.x >= abs.z {
            Point3::new(
                0.0,
                (d2 * n1.z - d1 * n2.z) / direction.x,
                (d1 * n2.y - d2 * n1.y) / direction.x,
            )
        } else if abs.y >= abs.z {
            Point3::new(
                (d1 * n2.z - d2 * n1.z) / direction.y,
                0.0,
                (d2 * n1.x - d1 * n2.x) / direction.y,
            )
        } else {
            Point3::new(
                (d2 * n1.y - d1 * n2.y) / direction.z,
                (d1 * n2.x - d2 * n1.x) / direction.z,
                0.0,
            )
        };

        Some(Self::new(direction, point))
    }

    /// Signed distance from the line's reference point to `point`.
    ///
    /// Negative when `point` lies behind the reference point.
    pub fn point_to_point_distance(&self, point: &Point3<f64>) -> f64 {
        let offset = point - self.point;
        let distance = offset.norm();
        if offset.dot(&self.direction) < 0.0 {
            -distance
        } else {
            distance
        }
    }

    /// Intersection point with another (coplanar, non-parallel) line.
    ///
    /// Solves in whichever of the xy, xz and yz projections has the largest
    /// determinant; ties go to that order. `None` if all are degenerate.
    pub fn line_intersection(&self, other: &Line) -> Option<Point3<f64>> {
        let d = &self.direction;
        let e = &other.direction;
        let delta = other.point - self.point;

        // (axis a, axis b, determinant d_a*e_b - d_b*e_a)
        let candidates = [
            (0, 1, d.x * e.y - d.y * e.x),
            (0, 2, d.x * e.z - d.z * e.x),
            (1, 2, d.y * e.z - d.z * e.y),
        ];

        let mut best = candidates[0];
        for candidate in &candidates[1..] {
            if candidate.2.abs() > best.2.abs() {
                best = *candidate;
            }
        }

        let (a, b, det) = best;
        if det.abs() < TOL {
            return None;
        }

        let t = (e[b] * delta[a] - e[a] * delta[b]) / det;
        Some(self.point + d * t)
    }

    /// Intersection with the plane through `plane_point` with `normal`.
    ///
    /// A line lying in the plane intersects it at its own reference point;
    /// a parallel line off the plane does not intersect it.
    pub fn plane_intersection(
        &self,
        normal: &Vector3<f64>,
        plane_point: &Point3<f64>,
    ) -> Option<Point3<f64>> {
        let d = -normal.dot(&plane_point.coords);
        let numerator = normal.dot(&self.point.coords) + d;
        let denominator = normal.dot(&self.direction);

        if denominator.abs() < TOL {
            if numerator.abs() < TOL {
                Some(self.point)
            } else {
                None
            }
        } else {
            let t = -numerator / denominator;
            Some(self.point + self.direction * t)
        }
    }

    /// Nudge the direction by `magnitude * uniform[-1, 1]` per component
    pub fn perturb_direction<R: Rng>(&mut self, rng: &mut R, magnitude: f64) {
        self.direction.x += magnitude * rng.gen_range(-1.0..=1.0);
        self.direction.y += magnitude * rng.gen_range(-1.0..=1.0);
        self.direction.z += magnitude * rng.gen_range(-1.0..=1.0);
        self.direction = normalize_stable(&self.direction);
    }
}
