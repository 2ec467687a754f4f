//! Configuration management with layered hierarchy

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::core::reconcile::{DuplicatePolicy, ReconcileOptions};
use crate::core::survey::SurveyColumns;

/// Name of the per-directory config file
pub const LOCAL_CONFIG_FILE: &str = "sbom.yaml";

/// sbom configuration with layered hierarchy
///
/// Every field is optional so that a later layer only overrides what it sets.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Record index of the survey header (0 = first line)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub survey_header_row: Option<usize>,

    /// Record index of the mapping header
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mapping_header_row: Option<usize>,

    /// Accepted survey header names for the model number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_columns: Option<Vec<String>>,

    /// Accepted survey header names for the mount type
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mount_columns: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_camera_lines: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub flatten_to_sku_only: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignore_case: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_duplicate: Option<DuplicatePolicy>,

    /// Default output format for `sbom generate`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_format: Option<String>,
}

impl Config {
    /// Load configuration from all sources, merging in priority order
    pub fn load() -> Self {
        let mut config = Config::default();

        // 1. Global user config (~/.config/sbom/config.yaml)
        if let Some(global_path) = Self::global_config_path() {
            if let Some(global) = Self::read_file(&global_path) {
                config.merge(global);
            }
        }

        // 2. Local config (./sbom.yaml)
        if let Some(local) = Self::read_file(&Self::local_config_path()) {
            config.merge(local);
        }

        config
    }

    /// Parse one config file; unreadable or invalid files are skipped with a warning
    pub fn read_file(path: &Path) -> Option<Self> {
        if !path.exists() {
            return None;
        }

        let contents = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "cannot read config file");
                return None;
            }
        };

        if contents.trim().is_empty() {
            return Some(Config::default());
        }

        match serde_yml::from_str::<Config>(&contents) {
            Ok(config) => Some(config),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring invalid config file");
                None
            }
        }
    }

    /// Get the path to the global config file
    pub fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "sbom")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Get the path to the local config file in the working directory
    pub fn local_config_path() -> PathBuf {
        PathBuf::from(LOCAL_CONFIG_FILE)
    }

    /// Merge another config into this one (other takes precedence)
    pub fn merge(&mut self, other: Config) {
        if other.survey_header_row.is_some() {
            self.survey_header_row = other.survey_header_row;
        }
        if other.mapping_header_row.is_some() {
            self.mapping_header_row = other.mapping_header_row;
        }
        if other.model_columns.is_some() {
            self.model_columns = other.model_columns;
        }
        if other.mount_columns.is_some() {
            self.mount_columns = other.mount_columns;
        }
        if other.include_camera_lines.is_some() {
            self.include_camera_lines = other.include_camera_lines;
        }
        if other.flatten_to_sku_only.is_some() {
            self.flatten_to_sku_only = other.flatten_to_sku_only;
        }
        if other.ignore_case.is_some() {
            self.ignore_case = other.ignore_case;
        }
        if other.on_duplicate.is_some() {
            self.on_duplicate = other.on_duplicate;
        }
        if other.default_format.is_some() {
            self.default_format = other.default_format;
        }
    }

    /// Reconciliation switches, with built-in defaults for anything unset
    pub fn reconcile_options(&self) -> ReconcileOptions {
        let defaults = ReconcileOptions::default();
        ReconcileOptions {
            include_camera_lines: self
                .include_camera_lines
                .unwrap_or(defaults.include_camera_lines),
            flatten_to_sku_only: self
                .flatten_to_sku_only
                .unwrap_or(defaults.flatten_to_sku_only),
            ignore_case: self.ignore_case.unwrap_or(defaults.ignore_case),
            duplicate_policy: self.on_duplicate.unwrap_or(defaults.duplicate_policy),
        }
    }

    /// Survey header aliases, falling back to the built-in lists
    pub fn survey_columns(&self) -> SurveyColumns {
        let defaults = SurveyColumns::default();
        SurveyColumns {
            model: self.model_columns.clone().unwrap_or(defaults.model),
            mount: self.mount_columns.clone().unwrap_or(defaults.mount),
        }
    }

    pub fn survey_header_row(&self) -> usize {
        self.survey_header_row.unwrap_or(0)
    }

    pub fn mapping_header_row(&self) -> usize {
        self.mapping_header_row.unwrap_or(0)
    }
}
