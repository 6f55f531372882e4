// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! I/O module - importing and exporting solids

mod stl;

pub use stl::{export_stl, import_stl, read_stl, write_stl};
