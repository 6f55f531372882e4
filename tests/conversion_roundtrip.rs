// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Conversions between solids, working objects and engine meshes

use anyhow::Result;
use nalgebra::Vector3;
use polyframe_csg::geometry::{Object3D, Primitive, Solid};
use polyframe_csg::Operand;

fn assert_round_trip(solid: &Solid) -> Result<()> {
    let object = Object3D::from_solid(solid, Operand::A)?;
    let back = object.to_solid();

    assert_eq!(back.vertices, solid.vertices);
    assert_eq!(back.indices, solid.indices);
    Ok(())
}

#[test]
fn test_object_round_trip_preserves_solids() -> Result<()> {
    assert_round_trip(&Primitive::cube(Vector3::new(3.0, 2.0, 1.0), false).to_solid())?;
    assert_round_trip(&Primitive::sphere(2.0, 16).to_solid())?;
    assert_round_trip(&Primitive::cylinder(4.0, 1.0, 12).to_solid())?;
    assert_round_trip(&Primitive::cone(4.0, 1.0, 0.0, 12).to_solid())?;
    Ok(())
}

#[test]
fn test_mesh_round_trip_preserves_solids() {
    let solid = Primitive::sphere(1.5, 12).to_solid();
    let mesh = solid.to_mesh();
    assert_eq!(mesh.vertex_count(), solid.vertex_count());
    assert_eq!(mesh.triangle_count(), solid.triangle_count());

    let back = Solid::from_mesh(&mesh);
    assert_eq!(back, solid);
}

#[test]
fn test_mesh_normals_point_outward() {
    let solid = Primitive::sphere(1.0, 16).to_solid();
    let mesh = solid.to_mesh();

    for vertex in &mesh.vertices {
        assert!(vertex.normal.dot(&vertex.position.coords) > 0.0);
    }
}
