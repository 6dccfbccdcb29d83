//! Calculator configuration
//!
//! Loaded from a TOML file (`boletim.toml` in the working directory unless a
//! path is given). Every key is optional.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};

use crate::models::{DEFAULT_PASS_THRESHOLD, MAX_GRADE, MIN_GRADE};
use crate::scheme::{SchoolLevel, FUNDAMENTAL_SUBJECTS, MEDIO_SUBJECTS};

pub const DEFAULT_CONFIG_FILE: &str = "boletim.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_pass_threshold")]
    pub pass_threshold: f64,

    #[serde(default)]
    pub subjects: SubjectsConfig,
}

/// Subject list overrides per school level
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubjectsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fundamental: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medio: Option<Vec<String>>,
}

fn default_pass_threshold() -> f64 {
    DEFAULT_PASS_THRESHOLD
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pass_threshold: DEFAULT_PASS_THRESHOLD,
            subjects: SubjectsConfig::default(),
        }
    }
}

impl Config {
    /// Load `path` if given, otherwise `boletim.toml` when it exists, otherwise
    /// defaults. An explicit path that does not exist is an error.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let (path, explicit) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        };

        if !explicit && !path.exists() {
            tracing::debug!("no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config = Self::from_toml(&content)
            .with_context(|| format!("invalid config {}", path.display()))?;
        tracing::debug!(path = %path.display(), pass_threshold = config.pass_threshold, "loaded config");
        Ok(config)
    }

    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        validate_threshold(self.pass_threshold)?;
        for (name, list) in [
            ("fundamental", &self.subjects.fundamental),
            ("medio", &self.subjects.medio),
        ] {
            if let Some(list) = list {
                if list.is_empty() {
                    bail!("subjects.{name} must list at least one subject");
                }
                if list.iter().any(|subject| subject.trim().is_empty()) {
                    bail!("subjects.{name} contains a blank subject");
                }
            }
        }
        Ok(())
    }

    pub fn subjects_for(&self, level: SchoolLevel) -> Vec<String> {
        let (custom, defaults): (&Option<Vec<String>>, &[&str]) = match level {
            SchoolLevel::Fundamental => (&self.subjects.fundamental, &FUNDAMENTAL_SUBJECTS[..]),
            SchoolLevel::Medio => (&self.subjects.medio, &MEDIO_SUBJECTS[..]),
        };
        match custom {
            Some(list) => list.clone(),
            None => defaults.iter().map(|s| s.to_string()).collect(),
        }
    }
}

pub fn validate_threshold(threshold: f64) -> anyhow::Result<()> {
    if !threshold.is_finite() || !(MIN_GRADE..=MAX_GRADE).contains(&threshold) {
        bail!("pass_threshold must be between {MIN_GRADE} and {MAX_GRADE}, got {threshold}");
    }
    Ok(())
}
