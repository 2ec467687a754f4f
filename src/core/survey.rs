//! Survey export parsing
//!
//! Survey tools have renamed their columns over time, so the model and mount
//! columns are located through alias lists rather than fixed names.

use serde::{Deserialize, Serialize};

use crate::core::error::BomError;
use crate::core::table::Table;

/// Accepted header names for the model-number column, in priority order
pub const MODEL_ALIASES: &[&str] = &["Model_Number", "Component Model #"];

/// Accepted header names for the mount-type column, in priority order
pub const MOUNT_ALIASES: &[&str] = &["Mount_Type", "Mount Bracket", "Installation"];

/// Header aliases used to locate survey columns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurveyColumns {
    pub model: Vec<String>,
    pub mount: Vec<String>,
}

impl Default for SurveyColumns {
    fn default() -> Self {
        Self {
            model: MODEL_ALIASES.iter().map(|s| s.to_string()).collect(),
            mount: MOUNT_ALIASES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// One installed device from the survey
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurveyRecord {
    pub model_number: String,
    pub mount_type: String,
    /// Source line, for diagnostics
    pub line: usize,
}

impl SurveyRecord {
    pub fn new(model_number: &str, mount_type: &str) -> Self {
        Self {
            model_number: model_number.trim().to_string(),
            mount_type: mount_type.trim().to_string(),
            line: 0,
        }
    }
}

/// Extract survey records from a table
///
/// Both columns must be present before any row is read. Blank model cells
/// are kept as-is; the reconciler decides what to do with them.
pub fn parse_survey(table: &Table, columns: &SurveyColumns) -> Result<Vec<SurveyRecord>, BomError> {
    let model_col = table.require_column(&columns.model)?;
    let mount_col = table.require_column(&columns.mount)?;

    Ok(table
        .rows()
        .iter()
        .map(|row| SurveyRecord {
            model_number: table.cell(row, model_col).trim().to_string(),
            mount_type: table.cell(row, mount_col).trim().to_string(),
            line: row.line,
        })
        .collect())
}
