// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! STL file round trips

use anyhow::Result;
use approx::assert_relative_eq;
use nalgebra::Vector3;
use polyframe_csg::geometry::{analyze, Primitive};
use polyframe_csg::{difference, io};
use tempfile::TempDir;

#[test]
fn test_export_import_cylinder() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("cylinder.stl");
    let cylinder = Primitive::cylinder(3.0, 1.0, 24).to_solid();

    io::export_stl(&cylinder, &path)?;
    let back = io::import_stl(&path)?;

    let before = analyze(&cylinder);
    let after = analyze(&back);
    assert_eq!(after.vertex_count, before.vertex_count);
    assert_eq!(after.triangle_count, before.triangle_count);
    assert!(after.is_watertight);
    assert_relative_eq!(after.volume, before.volume, epsilon = 1e-4);
    Ok(())
}

#[test]
fn test_boolean_result_survives_export() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("hollow.stl");

    let outer = Primitive::cube(Vector3::new(4.0, 4.0, 4.0), true).to_solid();
    let inner = Primitive::cube(Vector3::new(2.0, 2.0, 2.0), true).to_solid();
    let hollow = difference(&outer, &inner)?;

    io::export_stl(&hollow, &path)?;
    let back = io::import_stl(&path)?;
    assert_relative_eq!(analyze(&back).volume, 56.0, epsilon = 1e-4);
    Ok(())
}

#[test]
fn test_missing_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    assert!(io::import_stl(dir.path().join("missing.stl")).is_err());
}
