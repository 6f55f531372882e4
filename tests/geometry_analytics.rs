// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Geometry analytics verification tests

use anyhow::Result;
use approx::assert_relative_eq;
use nalgebra::Vector3;
use polyframe_csg::geometry::{analyze, GeometryStats, Primitive};
use std::f64::consts::PI;

#[test]
fn test_cube_volume_and_surface_area() -> Result<()> {
    let solid = Primitive::cube(Vector3::new(10.0, 10.0, 10.0), true).to_solid();
    let stats = analyze(&solid);

    println!("Cube 10×10×10:");
    println!("  Volume: {:.2} mm³ (expected: 1000)", stats.volume);
    println!("  Surface area: {:.2} mm² (expected: 600)", stats.surface_area);

    assert_relative_eq!(stats.volume, 1000.0, epsilon = 1e-9);
    assert_relative_eq!(stats.surface_area, 600.0, epsilon = 1e-9);
    assert_eq!(stats.vertex_count, 8);
    assert_eq!(stats.triangle_count, 12);
    assert!(stats.is_watertight);

    Ok(())
}

#[test]
fn test_sphere_volume_and_surface_area() -> Result<()> {
    let radius = 5.0;
    let stats = analyze(&Primitive::sphere(radius, 32).to_solid());

    let expected_volume = (4.0 / 3.0) * PI * radius.powi(3);
    let expected_area = 4.0 * PI * radius.powi(2);
    println!(
        "Sphere radius {}: volume {:.2} (expected {:.2}), area {:.2} (expected {:.2})",
        radius, stats.volume, expected_volume, stats.surface_area, expected_area
    );

    // Tessellation undershoots the analytic values
    assert!(stats.volume < expected_volume);
    assert!((stats.volume - expected_volume).abs() / expected_volume < 0.05);
    assert!((stats.surface_area - expected_area).abs() / expected_area < 0.05);
    assert!(stats.is_watertight);

    Ok(())
}

#[test]
fn test_cylinder_volume() -> Result<()> {
    let (height, radius) = (20.0, 5.0);
    let stats = analyze(&Primitive::cylinder(height, radius, 32).to_solid());

    let expected = PI * radius * radius * height;
    assert!((stats.volume - expected).abs() / expected < 0.02);
    assert!(stats.is_watertight);

    Ok(())
}

#[test]
fn test_bounding_box_accuracy() -> Result<()> {
    let solid = Primitive::cube(Vector3::new(10.0, 20.0, 30.0), false).to_solid();
    let stats = analyze(&solid);

    let expected = [0.0, 0.0, 0.0, 10.0, 20.0, 30.0];
    for (actual, expected) in stats.bbox.iter().zip(expected) {
        assert_relative_eq!(*actual, expected, epsilon = 1e-9);
    }

    Ok(())
}

#[test]
fn test_centroid_calculation() -> Result<()> {
    let mut solid = Primitive::cube(Vector3::new(2.0, 2.0, 2.0), true).to_solid();
    solid.translate(&Vector3::new(3.0, -1.0, 4.0));
    let stats = analyze(&solid);

    assert_relative_eq!(stats.centroid[0], 3.0, epsilon = 1e-9);
    assert_relative_eq!(stats.centroid[1], -1.0, epsilon = 1e-9);
    assert_relative_eq!(stats.centroid[2], 4.0, epsilon = 1e-9);

    Ok(())
}

#[test]
fn test_stats_json_serialization() -> Result<()> {
    let stats = analyze(&Primitive::cone(10.0, 5.0, 0.0, 16).to_solid());

    let json = serde_json::to_string_pretty(&stats)?;
    assert!(json.contains("\"volume\""));
    assert!(json.contains("\"is_watertight\""));

    let back: GeometryStats = serde_json::from_str(&json)?;
    assert_eq!(back.triangle_count, stats.triangle_count);
    assert_eq!(back.is_watertight, stats.is_watertight);

    Ok(())
}
