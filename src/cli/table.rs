//! Table rendering for CLI output
//!
//! Every command that prints rows goes through [`render_rows`], so CSV, TSV,
//! Markdown and terminal tables look the same across `generate` and
//! `preview`. JSON is handled by the caller since its shape is per command.

use miette::{IntoDiagnostic, Result};
use tabled::{builder::Builder, settings::Style};

use crate::cli::helpers::truncate_str;
use crate::cli::OutputFormat;

/// Widest cell shown in terminal tables before truncation
const MAX_CELL_WIDTH: usize = 40;

/// Render rows in a delimited or tabular format
///
/// `Json` and `Auto` must be resolved by the caller; they fall back to CSV.
pub fn render_rows(headers: &[String], rows: &[Vec<String>], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Tsv => render_delimited(headers, rows, b'\t'),
        OutputFormat::Md => Ok(render_tabled(headers, rows, true)),
        OutputFormat::Table => Ok(render_tabled(headers, rows, false)),
        OutputFormat::Csv | OutputFormat::Json | OutputFormat::Auto => {
            render_delimited(headers, rows, b',')
        }
    }
}

fn render_delimited(headers: &[String], rows: &[Vec<String>], delimiter: u8) -> Result<String> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_writer(Vec::new());
    wtr.write_record(headers).into_diagnostic()?;
    for row in rows {
        wtr.write_record(row).into_diagnostic()?;
    }
    let bytes = wtr
        .into_inner()
        .map_err(|e| miette::miette!("failed to flush output: {}", e))?;
    String::from_utf8(bytes).into_diagnostic()
}

fn render_tabled(headers: &[String], rows: &[Vec<String>], markdown: bool) -> String {
    let cell = |s: &String| {
        if markdown {
            s.replace('|', "\\|")
        } else {
            truncate_str(s, MAX_CELL_WIDTH)
        }
    };

    let mut builder = Builder::default();
    builder.push_record(headers.iter().map(&cell));
    for row in rows {
        builder.push_record(row.iter().map(&cell));
    }

    let mut table = builder.build();
    if markdown {
        table.with(Style::markdown());
    } else {
        table.with(Style::rounded());
    }
    let mut out = table.to_string();
    out.push('\n');
    out
}
