// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Polyframe CSG Kernel
//!
//! Boolean operations (union, intersection, difference) on closed triangle
//! meshes. Each operand's faces are split along the intersection with the
//! other, classified by ray casting, and the result is assembled from the
//! faces the operation keeps.

pub mod config;
pub mod error;
pub mod geometry;
pub mod io;
pub mod utils;

pub use config::CsgConfig;
pub use error::{CsgError, Operand, Result};
pub use geometry::{
    analyze, BooleanModeller, BooleanOp, BoundingBox, GeometryStats, Mesh, Primitive, Solid,
};
pub use io::{export_stl, import_stl};

use tracing::instrument;

/// Apply `op` to two solids with the given configuration
#[instrument(skip(a, b, config))]
pub fn boolean_op_with_config(
    a: &Solid,
    b: &Solid,
    op: BooleanOp,
    config: &CsgConfig,
) -> Result<Solid> {
    let mut modeller = BooleanModeller::with_config(a, b, config)?;
    Ok(modeller.apply(op))
}

/// Apply `op` to two solids with the default configuration
pub fn boolean_op(a: &Solid, b: &Solid, op: BooleanOp) -> Result<Solid> {
    boolean_op_with_config(a, b, op, &CsgConfig::default())
}

/// Space covered by either solid
pub fn union(a: &Solid, b: &Solid) -> Result<Solid> {
    boolean_op(a, b, BooleanOp::Union)
}

/// Space covered by both solids
pub fn intersection(a: &Solid, b: &Solid) -> Result<Solid> {
    boolean_op(a, b, BooleanOp::Intersection)
}

/// Space covered by `a` but not by `b`
pub fn difference(a: &Solid, b: &Solid) -> Result<Solid> {
    boolean_op(a, b, BooleanOp::Difference)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;

    #[test]
    fn test_basic_difference() {
        let a = Primitive::cube(Vector3::new(10.0, 10.0, 10.0), true).to_solid();
        let b = Primitive::cube(Vector3::new(4.0, 4.0, 4.0), true).to_solid();
        let result = difference(&a, &b);
        assert!(result.is_ok());
    }

    #[test]
    fn test_empty_operand_is_rejected() {
        let a = Primitive::cube(Vector3::new(1.0, 1.0, 1.0), true).to_solid();
        let result = union(&a, &Solid::empty());
        assert!(matches!(
            result,
            Err(CsgError::DegenerateInput { which: Operand::B, .. })
        ));
    }
}
