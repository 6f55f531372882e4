// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Vertices of the CSG working mesh

use crate::utils::math::points_coincide;
use crate::utils::TOL;
use ahash::{AHashMap, AHashSet};
use nalgebra::Point3;

/// Index of a vertex in its owning [`Object3D`](super::Object3D)
pub type VertexId = usize;

/// Position of a vertex relative to the other solid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VertexStatus {
    Unknown,
    Inside,
    Outside,
    /// Lies on the intersection curve of the two surfaces
    Boundary,
}

/// Vertex of the working mesh
///
/// Adjacency is stored as neighbor ids into the owning arena, never as
/// references, so the vertex graph may be cyclic without shared ownership.
#[derive(Debug, Clone)]
pub struct Vertex {
    pub position: Point3<f64>,
    pub status: VertexStatus,
    adjacent: AHashSet<VertexId>,
}

impl Vertex {
    pub fn new(position: Point3<f64>, status: VertexStatus) -> Self {
        Self {
            position,
            status,
            adjacent: AHashSet::new(),
        }
    }

    /// Position equality within `TOL` on each axis
    pub fn coincides(&self, position: &Point3<f64>) -> bool {
        points_coincide(&self.position, position)
    }

    pub fn add_adjacent(&mut self, id: VertexId) {
        self.adjacent.insert(id);
    }

    pub fn adjacent(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.adjacent.iter().copied()
    }

    pub fn clear_adjacency(&mut self) {
        self.adjacent.clear();
    }
}

/// Uniform hash grid over vertex positions.
///
/// Cells are `TOL` wide, so any position within `TOL` of a stored one sits in
/// the same cell or one of its 26 neighbours.
#[derive(Debug, Clone, Default)]
pub struct VertexGrid {
    cells: AHashMap<(i64, i64, i64), Vec<usize>>,
}

impl VertexGrid {
    pub fn new() -> Self {
        Self::default()
    }

    fn cell_of(position: &Point3<f64>) -> (i64, i64, i64) {
        (
            (position.x / TOL).floor() as i64,
            (position.y / TOL).floor() as i64,
            (position.z / TOL).floor() as i64,
        )
    }

    /// Smallest stored index whose position coincides with `position`
    pub fn find<F>(&self, position: &Point3<f64>, position_of: F) -> Option<usize>
    where
        F: Fn(usize) -> Point3<f64>,
    {
        let (cx, cy, cz) = Self::cell_of(position);
        let mut best: Option<usize> = None;

        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    let Some(bucket) = self.cells.get(&(cx + dx, cy + dy, cz + dz)) else {
                        continue;
                    };
                    for &index in bucket {
                        if points_coincide(&position_of(index), position)
                            && best.map_or(true, |b| index < b)
                        {
                            best = Some(index);
                        }
                    }
                }
            }
        }

        best
    }

    pub fn insert(&mut self, position: &Point3<f64>, index: usize) {
        self.cells
            .entry(Self::cell_of(position))
            .or_default()
            .push(index);
    }
}

/// Deduplicating list of positions, used when emitting a [`Solid`](super::Solid)
#[derive(Debug, Clone, Default)]
pub struct PositionMap {
    positions: Vec<Point3<f64>>,
    grid: VertexGrid,
}

impl PositionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of an existing position within `TOL`, or of the newly added one
    pub fn get_or_add(&mut self, position: &Point3<f64>) -> usize {
        if let Some(index) = self.grid.find(position, |i| self.positions[i]) {
            return index;
        }

        let index = self.positions.len();
        self.positions.push(*position);
        self.grid.insert(position, index);
        index
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn into_positions(self) -> Vec<Point3<f64>> {
        self.positions
    }
}
