// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Math utilities and kernel tolerances

use nalgebra::{Point3, Vector3};

/// Kernel-wide tolerance for vertex equality, plane sides and degeneracy tests
pub const TOL: f64 = 1e-5;

/// Tolerance for comparing distances along an intersection line
pub const SEGMENT_TOL: f64 = 1e-10;

/// Normalize a vector in two steps: first by its largest absolute component,
/// then by its true magnitude.
///
/// Dividing by the max component first keeps the squared terms in range for
/// very large coordinates. A zero vector stays zero.
pub fn normalize_stable(v: &Vector3<f64>) -> Vector3<f64> {
    let max = v.amax();
    if max == 0.0 || !max.is_finite() {
        return Vector3::zeros();
    }
    let scaled = v / max;
    scaled / scaled.norm()
}

/// Normal of the triangle (p0, p1, p2), counter-clockwise winding
pub fn calculate_triangle_normal(
    p0: &Point3<f64>,
    p1: &Point3<f64>,
    p2: &Point3<f64>,
) -> Vector3<f64> {
    let v1 = p1 - p0;
    let v2 = p2 - p0;
    normalize_stable(&v1.cross(&v2))
}

/// Check if two floats are approximately equal
pub fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
    (a - b).abs() < epsilon
}

/// Sign of `value` with a dead zone of `TOL` around zero
pub fn sign_with_tolerance(value: f64) -> i8 {
    if value > TOL {
        1
    } else if value < -TOL {
        -1
    } else {
        0
    }
}

/// Per-component equality within `TOL`
pub fn points_coincide(a: &Point3<f64>, b: &Point3<f64>) -> bool {
    (a.x - b.x).abs() < TOL && (a.y - b.y).abs() < TOL && (a.z - b.z).abs() < TOL
}
