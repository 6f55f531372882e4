// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Geometry analytics and statistics

use super::Solid;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// Geometry statistics and analytics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometryStats {
    /// Enclosed volume in cubic units
    pub volume: f64,
    /// Volume with orientation; negative for an inside-out solid
    pub signed_volume: f64,
    /// Total surface area in square units
    pub surface_area: f64,
    /// Bounding box [min_x, min_y, min_z, max_x, max_y, max_z]
    pub bbox: [f64; 6],
    /// Mean vertex position [x, y, z]
    pub centroid: [f64; 3],
    pub vertex_count: usize,
    pub triangle_count: usize,
    /// Every edge is shared by exactly two triangles
    pub is_watertight: bool,
}

impl GeometryStats {
    pub fn empty() -> Self {
        Self {
            volume: 0.0,
            signed_volume: 0.0,
            surface_area: 0.0,
            bbox: [0.0; 6],
            centroid: [0.0; 3],
            vertex_count: 0,
            triangle_count: 0,
            is_watertight: false,
        }
    }

    /// Pretty print statistics
    pub fn print(&self) {
        println!("╔══════════════════════════════════════════════════════════╗");
        println!("║              GEOMETRY ANALYTICS                          ║");
        println!("╠══════════════════════════════════════════════════════════╣");
        println!("║ Volume:          {:>10.4}                              ║", self.volume);
        println!("║ Surface Area:    {:>10.4}                              ║", self.surface_area);
        println!(
            "║ Centroid:        ({:>7.2}, {:>7.2}, {:>7.2})            ║",
            self.centroid[0], self.centroid[1], self.centroid[2]
        );
        println!("║                                                          ║");
        println!(
            "║   Min: ({:>7.2}, {:>7.2}, {:>7.2})                      ║",
            self.bbox[0], self.bbox[1], self.bbox[2]
        );
        println!(
            "║   Max: ({:>7.2}, {:>7.2}, {:>7.2})                      ║",
            self.bbox[3], self.bbox[4], self.bbox[5]
        );
        println!("║                                                          ║");
        println!("║ Vertices:        {:>10}                              ║", self.vertex_count);
        println!("║ Triangles:       {:>10}                              ║", self.triangle_count);
        println!(
            "║ Watertight:      {:>10}                              ║",
            if self.is_watertight { "Yes" } else { "No" }
        );
        println!("╚══════════════════════════════════════════════════════════╝");
    }
}

/// Analyze solid geometry and compute statistics
pub fn analyze(solid: &Solid) -> GeometryStats {
    if solid.is_empty() {
        return GeometryStats::empty();
    }

    let bbox = solid.bounding_box();
    let centroid = solid.mean();
    let signed_volume = calculate_signed_volume(solid);

    GeometryStats {
        volume: signed_volume.abs(),
        signed_volume,
        surface_area: calculate_surface_area(solid),
        bbox: [
            bbox.min.x, bbox.min.y, bbox.min.z, bbox.max.x, bbox.max.y, bbox.max.z,
        ],
        centroid: [centroid.x, centroid.y, centroid.z],
        vertex_count: solid.vertex_count(),
        triangle_count: solid.triangle_count(),
        is_watertight: check_watertight(solid),
    }
}

/// Sum of signed tetrahedron volumes against the origin
fn calculate_signed_volume(solid: &Solid) -> f64 {
    solid
        .triangle_points()
        .map(|[v0, v1, v2]| v0.coords.dot(&v1.coords.cross(&v2.coords)) / 6.0)
        .sum()
}

fn calculate_surface_area(solid: &Solid) -> f64 {
    solid
        .triangle_points()
        .map(|[v0, v1, v2]| (v1 - v0).cross(&(v2 - v0)).norm() / 2.0)
        .sum()
}

/// A solid is watertight if every edge is shared by exactly 2 triangles
fn check_watertight(solid: &Solid) -> bool {
    let mut edge_count: AHashMap<(usize, usize), usize> = AHashMap::new();

    for triangle in solid.triangles() {
        for i in 0..3 {
            let v1 = triangle[i];
            let v2 = triangle[(i + 1) % 3];
            let edge = if v1 < v2 { (v1, v2) } else { (v2, v1) };
            *edge_count.entry(edge).or_insert(0) += 1;
        }
    }

    edge_count.values().all(|&count| count == 2)
}
