// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! STL import and export for solids

use crate::geometry::{PositionMap, Solid};
use crate::utils::math::calculate_triangle_normal;
use anyhow::{Context, Result};
use nalgebra::Point3;
use std::fs::File;
use std::io::{BufWriter, Read, Seek, Write};
use std::path::Path;
use stl_io::{Normal, Triangle as StlTriangle, Vertex as StlVertex};

/// Load an ASCII or binary STL file as a solid, welding coincident vertices
pub fn import_stl(path: impl AsRef<Path>) -> Result<Solid> {
    let path = path.as_ref();
    let mut file =
        File::open(path).with_context(|| format!("Failed to open STL file: {:?}", path))?;
    read_stl(&mut file).with_context(|| format!("Failed to read STL file: {:?}", path))
}

/// Write a solid as binary STL
pub fn export_stl(solid: &Solid, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let file =
        File::create(path).with_context(|| format!("Failed to create STL file: {:?}", path))?;
    let mut writer = BufWriter::new(file);
    write_stl(solid, &mut writer)?;
    writer.flush().context("Failed to flush STL file")?;
    Ok(())
}

/// Parse STL data from a reader
pub fn read_stl<R: Read + Seek>(reader: &mut R) -> Result<Solid> {
    let stl = stl_io::read_stl(reader).context("Invalid STL data")?;

    // stl_io only merges bit-identical vertices
    let mut positions = PositionMap::new();
    let remap: Vec<usize> = stl
        .vertices
        .iter()
        .map(|v| positions.get_or_add(&Point3::new(v[0] as f64, v[1] as f64, v[2] as f64)))
        .collect();

    let indices = stl
        .faces
        .iter()
        .flat_map(|face| face.vertices.iter().map(|&i| remap[i]))
        .collect();

    Ok(Solid::new(positions.into_positions(), indices))
}

/// Encode a solid as binary STL, with face normals computed from the winding
pub fn write_stl<W: Write>(solid: &Solid, writer: &mut W) -> Result<()> {
    let to_vertex = |p: &Point3<f64>| StlVertex::new([p.x as f32, p.y as f32, p.z as f32]);

    let triangles: Vec<StlTriangle> = solid
        .triangle_points()
        .map(|[v0, v1, v2]| {
            let normal = calculate_triangle_normal(&v0, &v1, &v2);
            StlTriangle {
                normal: Normal::new([normal.x as f32, normal.y as f32, normal.z as f32]),
                vertices: [to_vertex(&v0), to_vertex(&v1), to_vertex(&v2)],
            }
        })
        .collect();

    stl_io::write_stl(writer, triangles.iter()).context("Failed to write STL data")?;
    Ok(())
}
