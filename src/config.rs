// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Kernel configuration

use crate::error::CsgError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default config file looked up by [`CsgConfig::load`]
pub const CONFIG_FILE: &str = "csg.toml";

/// Tunables for one boolean operation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CsgConfig {
    /// How many times a classification ray may be perturbed before giving up
    pub max_ray_retries: u32,
    /// Magnitude of the random offset added to each ray direction component
    pub perturbation: f64,
    /// Seed for the perturbation generator
    pub seed: u64,
}

impl Default for CsgConfig {
    fn default() -> Self {
        Self {
            max_ray_retries: 16,
            perturbation: 1e-3,
            seed: 0x5eed,
        }
    }
}

impl CsgConfig {
    /// Load configuration from file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        let config: CsgConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with environment variable overrides
    pub fn load() -> Result<Self> {
        let mut config = if PathBuf::from(CONFIG_FILE).exists() {
            Self::from_file(CONFIG_FILE)?
        } else {
            Self::default()
        };

        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(retries) = std::env::var("POLYFRAME_CSG_MAX_RAY_RETRIES") {
            self.max_ray_retries = retries
                .parse()
                .context("POLYFRAME_CSG_MAX_RAY_RETRIES must be an unsigned integer")?;
        }

        if let Ok(perturbation) = std::env::var("POLYFRAME_CSG_PERTURBATION") {
            self.perturbation = perturbation
                .parse()
                .context("POLYFRAME_CSG_PERTURBATION must be a number")?;
        }

        if let Ok(seed) = std::env::var("POLYFRAME_CSG_SEED") {
            self.seed = seed
                .parse()
                .context("POLYFRAME_CSG_SEED must be an unsigned integer")?;
        }

        Ok(())
    }

    /// Reject values the classifier cannot work with
    pub fn validate(&self) -> std::result::Result<(), CsgError> {
        if self.max_ray_retries == 0 {
            return Err(CsgError::Config(
                "max_ray_retries must be at least 1".to_string(),
            ));
        }
        if !(self.perturbation > 0.0 && self.perturbation.is_finite()) {
            return Err(CsgError::Config(format!(
                "perturbation must be a positive finite number, got {}",
                self.perturbation
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_is_valid() {
        assert!(CsgConfig::default().validate().is_ok());
    }

    #[test]
    fn test_from_file_partial() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        writeln!(file, "max_ray_retries = 4")?;

        let config = CsgConfig::from_file(file.path())?;
        assert_eq!(config.max_ray_retries, 4);
        assert_eq!(config.perturbation, CsgConfig::default().perturbation);
        Ok(())
    }

    #[test]
    fn test_from_file_rejects_zero_retries() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        writeln!(file, "max_ray_retries = 0")?;

        assert!(CsgConfig::from_file(file.path()).is_err());
        Ok(())
    }

    #[test]
    fn test_rejects_negative_perturbation() {
        let config = CsgConfig {
            perturbation: -1.0,
            ..CsgConfig::default()
        };
        assert!(matches!(config.validate(), Err(CsgError::Config(_))));
    }
}
