// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Error types for the CSG kernel

use thiserror::Error;

/// Which operand of a boolean operation an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    A,
    B,
}

impl std::fmt::Display for Operand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operand::A => write!(f, "solid A"),
            Operand::B => write!(f, "solid B"),
        }
    }
}

/// Failures surfaced by the CSG kernel
#[derive(Debug, Error)]
pub enum CsgError {
    #[error("degenerate input in {which}: {reason}")]
    DegenerateInput { which: Operand, reason: String },

    #[error("index {index} in {which} is out of range ({vertex_count} vertices)")]
    InvalidIndex {
        which: Operand,
        index: usize,
        vertex_count: usize,
    },

    #[error("face {face} could not be classified after {attempts} ray perturbations")]
    ClassificationFailed { face: usize, attempts: u32 },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result alias used throughout the kernel
pub type Result<T> = std::result::Result<T, CsgError>;
