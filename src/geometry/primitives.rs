// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Geometric primitives generator
//!
//! Every primitive is closed, shares its vertices between faces and winds its
//! triangles counter-clockwise seen from outside, so it can be fed straight
//! into a boolean operation.

use super::{Mesh, Solid};
use nalgebra::{Point3, Vector3};
use std::f64::consts::PI;

const DEFAULT_SEGMENTS: u32 = 32;

/// Geometric primitives
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Cube { size: Vector3<f64>, center: bool },
    Sphere { r: f64, segments: u32 },
    Cylinder { h: f64, r: f64, segments: u32 },
    Cone { h: f64, r1: f64, r2: f64, segments: u32 },
}

fn segments_or_default(segments: u32) -> u32 {
    if segments > 0 {
        segments.max(3)
    } else {
        DEFAULT_SEGMENTS
    }
}

impl Primitive {
    pub fn cube(size: Vector3<f64>, center: bool) -> Self {
        Self::Cube { size, center }
    }

    /// UV sphere around the origin; `segments` slices and half as many stacks
    pub fn sphere(r: f64, segments: u32) -> Self {
        Self::Sphere {
            r,
            segments: segments_or_default(segments),
        }
    }

    /// Cylinder along +z from z = 0 to z = h
    pub fn cylinder(h: f64, r: f64, segments: u32) -> Self {
        Self::Cylinder {
            h,
            r,
            segments: segments_or_default(segments),
        }
    }

    /// Truncated cone along +z, radius `r1` at the base and `r2` at the top.
    /// A zero radius collapses that end to an apex.
    pub fn cone(h: f64, r1: f64, r2: f64, segments: u32) -> Self {
        Self::Cone {
            h,
            r1,
            r2,
            segments: segments_or_default(segments),
        }
    }

    pub fn to_solid(&self) -> Solid {
        match self {
            Self::Cube { size, center } => generate_cube(*size, *center),
            Self::Sphere { r, segments } => generate_sphere(*r, *segments),
            Self::Cylinder { h, r, segments } => generate_cone(*h, *r, *r, *segments),
            Self::Cone { h, r1, r2, segments } => generate_cone(*h, *r1, *r2, *segments),
        }
    }

    pub fn to_mesh(&self) -> Mesh {
        self.to_solid().to_mesh()
    }
}

fn generate_cube(size: Vector3<f64>, center: bool) -> Solid {
    let (min, max) = if center {
        (-size / 2.0, size / 2.0)
    } else {
        (Vector3::zeros(), size)
    };

    let vertices = vec![
        Point3::new(min.x, min.y, min.z),
        Point3::new(max.x, min.y, min.z),
        Point3::new(max.x, max.y, min.z),
        Point3::new(min.x, max.y, min.z),
        Point3::new(min.x, min.y, max.z),
        Point3::new(max.x, min.y, max.z),
        Point3::new(max.x, max.y, max.z),
        Point3::new(min.x, max.y, max.z),
    ];

    #[rustfmt::skip]
    let indices = vec![
        4, 5, 6,  4, 6, 7, // z+
        1, 0, 3,  1, 3, 2, // z-
        5, 1, 2,  5, 2, 6, // x+
        0, 4, 7,  0, 7, 3, // x-
        7, 6, 2,  7, 2, 3, // y+
        0, 1, 5,  0, 5, 4, // y-
    ];

    Solid::new(vertices, indices)
}

fn generate_sphere(radius: f64, segments: u32) -> Solid {
    let slices = segments as usize;
    let stacks = (slices / 2).max(2);

    let mut vertices = Vec::with_capacity(2 + (stacks - 1) * slices);
    vertices.push(Point3::new(0.0, 0.0, radius));
    for i in 1..stacks {
        let phi = PI * i as f64 / stacks as f64;
        let (ring_radius, z) = (radius * phi.sin(), radius * phi.cos());
        for j in 0..slices {
            let theta = 2.0 * PI * j as f64 / slices as f64;
            vertices.push(Point3::new(ring_radius * theta.cos(), ring_radius * theta.sin(), z));
        }
    }
    vertices.push(Point3::new(0.0, 0.0, -radius));

    let north = 0;
    let south = vertices.len() - 1;
    let ring = |i: usize, j: usize| 1 + i * slices + j % slices;

    let mut indices = Vec::with_capacity(6 * slices * (stacks - 1));
    for j in 0..slices {
        indices.extend_from_slice(&[north, ring(0, j), ring(0, j + 1)]);
    }
    for i in 0..stacks - 2 {
        for j in 0..slices {
            let (a, b) = (ring(i, j), ring(i, j + 1));
            let (c, d) = (ring(i + 1, j), ring(i + 1, j + 1));
            indices.extend_from_slice(&[a, c, d, a, d, b]);
        }
    }
    let last = stacks - 2;
    for j in 0..slices {
        indices.extend_from_slice(&[south, ring(last, j + 1), ring(last, j)]);
    }

    Solid::new(vertices, indices)
}

fn generate_cone(height: f64, r1: f64, r2: f64, segments: u32) -> Solid {
    let segments = segments as usize;
    let mut vertices = Vec::new();

    // A ring with zero radius is a single apex vertex
    let mut ring = |radius: f64, z: f64| -> Vec<usize> {
        if radius <= 0.0 {
            vertices.push(Point3::new(0.0, 0.0, z));
            return vec![vertices.len() - 1; segments];
        }
        (0..segments)
            .map(|i| {
                let angle = 2.0 * PI * i as f64 / segments as f64;
                vertices.push(Point3::new(radius * angle.cos(), radius * angle.sin(), z));
                vertices.len() - 1
            })
            .collect()
    };
    let bottom = ring(r1, 0.0);
    let top = ring(r2, height);

    let mut indices = Vec::new();
    for i in 0..segments {
        let next = (i + 1) % segments;
        let (bi, bn, ti, tn) = (bottom[i], bottom[next], top[i], top[next]);
        if bi != bn {
            indices.extend_from_slice(&[bi, bn, ti]);
        }
        if ti != tn {
            indices.extend_from_slice(&[ti, bn, tn]);
        }
    }

    if r1 > 0.0 {
        vertices.push(Point3::new(0.0, 0.0, 0.0));
        let center = vertices.len() - 1;
        for i in 0..segments {
            indices.extend_from_slice(&[center, bottom[(i + 1) % segments], bottom[i]]);
        }
    }
    if r2 > 0.0 {
        vertices.push(Point3::new(0.0, 0.0, height));
        let center = vertices.len() - 1;
        for i in 0..segments {
            indices.extend_from_slice(&[center, top[i], top[(i + 1) % segments]]);
        }
    }

    Solid::new(vertices, indices)
}
