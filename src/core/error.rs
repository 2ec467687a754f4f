//! Error taxonomy for BOM generation
//!
//! Every variant here is a malformed-input condition: the reconciliation is
//! aborted and nothing is written. Unmatched survey combinations are not
//! errors, they are reported as [`crate::core::bom::Warning`]s.

use miette::Diagnostic;
use thiserror::Error;

/// Errors raised while reading or reconciling the input tables
#[derive(Debug, Error, Diagnostic)]
pub enum BomError {
    #[error("IO error: {0}")]
    #[diagnostic(code(sbom::io))]
    Io(#[from] std::io::Error),

    #[error("CSV error in {table} table: {source}")]
    #[diagnostic(code(sbom::input::csv))]
    Csv {
        table: String,
        #[source]
        source: csv::Error,
    },

    #[error("{table} table has no header row (expected one at record {header_row})")]
    #[diagnostic(
        code(sbom::input::empty),
        help("check the file is not empty, or lower the header row offset")
    )]
    EmptyInput { table: String, header_row: usize },

    #[error("{table} table is missing column '{column}'")]
    #[diagnostic(code(sbom::input::missing_column))]
    MissingColumn {
        table: String,
        column: String,
        #[help]
        help: String,
    },

    #[error("{table} table row {row}: invalid quantity '{value}'")]
    #[diagnostic(
        code(sbom::input::quantity),
        help("quantities must be positive whole numbers, or left blank for 1")
    )]
    InvalidQuantity {
        table: String,
        row: usize,
        value: String,
    },

    #[error("{table} table row {row}: '{column}' is blank")]
    #[diagnostic(code(sbom::input::blank))]
    BlankField {
        table: String,
        row: usize,
        column: String,
    },

    #[error(
        "mapping rows {first_row} and {row} both map {model_number} / {mount_type} \
         ('{first_sku}' vs '{sku}')"
    )]
    #[diagnostic(
        code(sbom::mapping::duplicate),
        help("remove one of the rows, or use --on-duplicate first to keep the first match")
    )]
    DuplicateMapping {
        model_number: String,
        mount_type: String,
        first_row: usize,
        first_sku: String,
        row: usize,
        sku: String,
    },
}

impl BomError {
    /// Build a missing-column error listing every header name that would have matched
    pub fn missing_column(table: &str, aliases: &[String]) -> Self {
        let column = aliases.first().cloned().unwrap_or_default();
        let help = if aliases.len() > 1 {
            format!("accepted header names: {}", aliases.join(", "))
        } else {
            format!("add a '{}' column to the {} file", column, table)
        };
        BomError::MissingColumn {
            table: table.to_string(),
            column,
            help,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_column_names_primary_alias() {
        let err = BomError::missing_column(
            "survey",
            &["Model_Number".to_string(), "Component Model #".to_string()],
        );
        assert_eq!(err.to_string(), "survey table is missing column 'Model_Number'");
        match err {
            BomError::MissingColumn { help, .. } => {
                assert!(help.contains("Component Model #"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_column_single_alias_help() {
        let err = BomError::missing_column("mapping", &["Hardware_SKU".to_string()]);
        match err {
            BomError::MissingColumn { column, help, .. } => {
                assert_eq!(column, "Hardware_SKU");
                assert_eq!(help, "add a 'Hardware_SKU' column to the mapping file");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
