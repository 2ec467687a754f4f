//! `sbom preview` command - Show the first rows of an input table
//!
//! Useful for checking which header row a survey export needs and which
//! column names it carries before running `sbom generate`.

use console::{style, Term};
use miette::{IntoDiagnostic, Result};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::cli::helpers::require_file;
use crate::cli::table::render_rows;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::Table;

#[derive(clap::Args, Debug)]
pub struct PreviewArgs {
    /// CSV file to preview
    pub file: PathBuf,

    /// Number of data rows to show
    #[arg(long, short = 'n', default_value_t = 5)]
    pub rows: usize,

    /// Record index of the header row (0 = first line)
    #[arg(long, default_value_t = 0)]
    pub header_row: usize,
}

pub fn run(args: PreviewArgs, global: &GlobalOpts) -> Result<()> {
    require_file(&args.file, "Input")?;

    let name = args
        .file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "input".to_string());
    let table = Table::from_path(&name, &args.file, args.header_row)?;

    let headers = table.headers().to_vec();
    let rows: Vec<Vec<String>> = table
        .rows()
        .iter()
        .take(args.rows)
        .map(|row| {
            (0..headers.len())
                .map(|i| table.cell(row, i).to_string())
                .collect()
        })
        .collect();

    let format = global.format.resolve(None, Term::stdout().is_term());
    let content = match format {
        OutputFormat::Json => {
            let objects: Vec<BTreeMap<&str, &str>> = rows
                .iter()
                .map(|row| {
                    headers
                        .iter()
                        .map(String::as_str)
                        .zip(row.iter().map(String::as_str))
                        .collect()
                })
                .collect();
            let mut json = serde_json::to_string_pretty(&objects).into_diagnostic()?;
            json.push('\n');
            json
        }
        other => render_rows(&headers, &rows, other)?,
    };
    print!("{}", content);

    if !global.quiet {
        eprintln!(
            "{}",
            style(format!(
                "{} of {} row(s), {} column(s)",
                rows.len(),
                table.len(),
                headers.len()
            ))
            .dim()
        );
    }

    Ok(())
}
