// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Boolean operations on closed triangle meshes
//!
//! Both operands are split against each other, every resulting face is
//! classified relative to the other solid, and the result is assembled from
//! the faces whose status the operation asks for.

use super::face::FaceStatus;
use super::object3d::Object3D;
use super::vertex::PositionMap;
use super::Solid;
use crate::config::CsgConfig;
use crate::error::{Operand, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info, instrument};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BooleanOp {
    Union,
    Intersection,
    Difference,
}

impl BooleanOp {
    /// Face statuses kept from A (two of them) and from B
    pub fn kept_statuses(self) -> (FaceStatus, FaceStatus, FaceStatus) {
        match self {
            Self::Union => (FaceStatus::Outside, FaceStatus::Same, FaceStatus::Outside),
            Self::Intersection => (FaceStatus::Inside, FaceStatus::Same, FaceStatus::Inside),
            Self::Difference => (FaceStatus::Outside, FaceStatus::Opposite, FaceStatus::Inside),
        }
    }
}

impl fmt::Display for BooleanOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Union => "union",
            Self::Intersection => "intersection",
            Self::Difference => "difference",
        };
        f.write_str(name)
    }
}

/// Two solids split and classified against each other, ready to compose.
///
/// The expensive work happens once in the constructor; each operation then
/// only filters faces, so several results can be taken from one modeller.
#[derive(Debug, Clone)]
pub struct BooleanModeller {
    object1: Object3D,
    object2: Object3D,
}

impl BooleanModeller {
    pub fn new(a: &Solid, b: &Solid) -> Result<Self> {
        Self::with_config(a, b, &CsgConfig::default())
    }

    #[instrument(skip_all, fields(faces_a = a.triangle_count(), faces_b = b.triangle_count()))]
    pub fn with_config(a: &Solid, b: &Solid, config: &CsgConfig) -> Result<Self> {
        config.validate()?;

        let mut object1 = Object3D::from_solid(a, Operand::A)?;
        let mut object2 = Object3D::from_solid(b, Operand::B)?;

        object1.split_faces(&object2);
        object2.split_faces(&object1);
        debug!(
            faces_a = object1.num_faces(),
            faces_b = object2.num_faces(),
            "split complete"
        );

        let mut rng = StdRng::seed_from_u64(config.seed);
        object1.classify_faces(&object2, config, &mut rng)?;
        object2.classify_faces(&object1, config, &mut rng)?;

        info!(
            faces_a = object1.num_faces(),
            faces_b = object2.num_faces(),
            "solids split and classified"
        );
        Ok(Self { object1, object2 })
    }

    pub fn union(&self) -> Solid {
        self.compose(BooleanOp::Union)
    }

    pub fn intersection(&self) -> Solid {
        self.compose(BooleanOp::Intersection)
    }

    /// A minus B. B's inside faces are flipped for the duration of the call
    /// so they face out of the result.
    pub fn difference(&mut self) -> Solid {
        self.object2.invert_inside_faces();
        let result = self.compose(BooleanOp::Difference);
        self.object2.invert_inside_faces();
        result
    }

    pub fn apply(&mut self, op: BooleanOp) -> Solid {
        match op {
            BooleanOp::Union => self.union(),
            BooleanOp::Intersection => self.intersection(),
            BooleanOp::Difference => self.difference(),
        }
    }

    /// Faces of A with either of the first two statuses plus faces of B with
    /// the third, vertices merged within tolerance
    fn compose(&self, op: BooleanOp) -> Solid {
        let (status_a1, status_a2, status_b) = op.kept_statuses();

        let mut positions = PositionMap::new();
        let mut indices = Vec::new();
        let selected = self
            .object1
            .faces()
            .iter()
            .filter(|f| f.status == status_a1 || f.status == status_a2)
            .chain(self.object2.faces().iter().filter(|f| f.status == status_b));

        for face in selected {
            for point in face.points() {
                indices.push(positions.get_or_add(point));
            }
        }

        let solid = Solid::new(positions.into_positions(), indices);
        info!(
            %op,
            vertices = solid.vertex_count(),
            triangles = solid.triangle_count(),
            "composed result"
        );
        solid
    }
}
