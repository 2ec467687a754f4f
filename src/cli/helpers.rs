//! Shared helper functions for CLI commands
//!
//! This module contains utility functions that are used across multiple
//! command modules to avoid code duplication.

use console::style;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::core::Warning;

/// Truncate a string to max_len characters, adding "..." if truncated
///
/// Useful for table columns that need fixed-width output.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Fail early with a readable message when an input file is missing
pub fn require_file(path: &Path, what: &str) -> Result<()> {
    if !path.is_file() {
        return Err(miette::miette!(
            "{} file not found: {}",
            what,
            path.display()
        ));
    }
    Ok(())
}

/// Write rendered output to a file, or stdout when no path is given
///
/// Returns true when a file was written.
pub fn write_output(content: &str, output_path: Option<&PathBuf>) -> Result<bool> {
    if let Some(path) = output_path {
        let file = File::create(path).into_diagnostic()?;
        let mut writer = BufWriter::new(file);
        writer.write_all(content.as_bytes()).into_diagnostic()?;
        writer.flush().into_diagnostic()?;
        Ok(true)
    } else {
        print!("{}", content);
        std::io::stdout().flush().into_diagnostic()?;
        Ok(false)
    }
}

/// Print reconciliation warnings to stderr
pub fn print_warnings(warnings: &[Warning]) {
    for warning in warnings {
        let marker = if warning.is_unmatched() {
            style("!").red().bold()
        } else {
            style("!").yellow()
        };
        eprintln!("{} {}", marker, warning);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("hello", 10), "hello");
        assert_eq!(truncate_str("hello world", 8), "hello...");
        assert_eq!(truncate_str("hi", 2), "hi");
    }

    #[test]
    fn test_truncate_str_multibyte() {
        assert_eq!(truncate_str("Kamera-Halterung-Ä", 10), "Kamera-...");
        assert_eq!(truncate_str("ÄÖÜ", 3), "ÄÖÜ");
    }

    #[test]
    fn test_require_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("survey.csv");
        let err = require_file(&path, "Survey").unwrap_err();
        assert!(err.to_string().starts_with("Survey file not found"));

        fs::write(&path, "Model_Number,Mount_Type\n").unwrap();
        assert!(require_file(&path, "Survey").is_ok());
    }

    #[test]
    fn test_write_output_to_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("bom.csv");
        let written = write_output("Hardware_SKU,Quantity\n", Some(&path)).unwrap();

        assert!(written);
        assert_eq!(fs::read_to_string(&path).unwrap(), "Hardware_SKU,Quantity\n");
    }
}
