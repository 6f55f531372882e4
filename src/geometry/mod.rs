// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Geometry module - solids, working meshes and boolean operations

mod analytics;
mod bbox;
mod boolean;
mod classification;
mod face;
mod line;
mod mesh;
mod object3d;
mod primitives;
mod segment;
mod solid;
mod split;
mod vertex;

pub use analytics::{analyze, GeometryStats};
pub use bbox::BoundingBox;
pub use boolean::{BooleanModeller, BooleanOp};
pub use classification::ray_trace_classify;
pub use face::{Face, FaceId, FaceStatus};
pub use line::Line;
pub use mesh::{Mesh, MeshVertex, Triangle};
pub use object3d::Object3D;
pub use primitives::Primitive;
pub use segment::{EndType, Segment};
pub use solid::Solid;
pub use vertex::{PositionMap, Vertex, VertexGrid, VertexId, VertexStatus};
