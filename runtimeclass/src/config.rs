//! Validator configuration, stored as TOML.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Validator configuration (TOML).
///
/// Missing fields take their defaults, so an empty document is the default
/// configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ValidationConfig {
    pub update: UpdateConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct UpdateConfig {
    /// How a changed `topology` is treated on update.
    pub topology: TopologyUpdatePolicy,
}

/// Treatment of `topology` when validating an update.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TopologyUpdatePolicy {
    /// Topology is not examined on update.
    #[default]
    Ignore,
    /// Any change to topology is rejected.
    Immutable,
    /// The new topology is validated as it would be on create.
    Revalidate,
}

impl ValidationConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("parse validation config")
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `ValidationConfig::default()`.
pub fn load_config(path: &Path) -> Result<ValidationConfig> {
    if !path.exists() {
        return Ok(ValidationConfig::default());
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    ValidationConfig::from_toml_str(&contents).with_context(|| format!("load {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_missing_returns_default() {
        let temp = tempfile::tempdir().expect("tempdir");
        let cfg = load_config(&temp.path().join("missing.toml")).expect("load");
        assert_eq!(cfg, ValidationConfig::default());
        assert_eq!(cfg.update.topology, TopologyUpdatePolicy::Ignore);
    }

    #[test]
    fn load_reads_topology_policy() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("validation.toml");
        fs::write(&path, "[update]\ntopology = \"revalidate\"\n").expect("write");
        let cfg = load_config(&path).expect("load");
        assert_eq!(cfg.update.topology, TopologyUpdatePolicy::Revalidate);
    }

    #[test]
    fn empty_document_is_default() {
        assert_eq!(
            ValidationConfig::from_toml_str("").expect("parse"),
            ValidationConfig::default()
        );
    }

    #[test]
    fn unknown_policy_is_an_error() {
        let err = ValidationConfig::from_toml_str("[update]\ntopology = \"frozen\"\n")
            .expect_err("should fail");
        assert!(format!("{err:#}").contains("parse validation config"));
    }
}
