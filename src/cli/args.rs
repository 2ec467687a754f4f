//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};
use std::path::Path;

use crate::cli::commands::{
    completions::CompletionsArgs, config::ConfigCommands, generate::GenerateArgs,
    preview::PreviewArgs, template::TemplateArgs,
};

#[derive(Parser)]
#[command(name = "sbom")]
#[command(author, version, about = "Survey BOM generator")]
#[command(
    long_about = "Reconcile a site-survey export against a hardware mapping table and produce a bill of materials of SKUs and quantities."
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "auto")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose output (debug logging on stderr)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a BOM from a survey export and a mapping table
    Generate(GenerateArgs),

    /// Show the first rows of an input CSV
    Preview(PreviewArgs),

    /// Print a CSV template for the survey or mapping file
    Template(TemplateArgs),

    /// Inspect configuration
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Table on a terminal, CSV when piped or written to a file
    #[default]
    Auto,
    /// Comma-separated values (for spreadsheets)
    Csv,
    /// Tab-separated values (for piping)
    Tsv,
    /// JSON format (for programming)
    Json,
    /// Markdown tables
    Md,
    /// Boxed table for reading on a terminal
    Table,
}

impl OutputFormat {
    /// Resolve `Auto` from the output file extension, or the terminal when writing to stdout
    pub fn resolve(self, output: Option<&Path>, stdout_is_term: bool) -> OutputFormat {
        if self != OutputFormat::Auto {
            return self;
        }

        match output {
            Some(path) => match path
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| e.to_lowercase())
                .as_deref()
            {
                Some("tsv") | Some("tab") => OutputFormat::Tsv,
                Some("json") => OutputFormat::Json,
                Some("md") | Some("markdown") => OutputFormat::Md,
                _ => OutputFormat::Csv,
            },
            None if stdout_is_term => OutputFormat::Table,
            None => OutputFormat::Csv,
        }
    }

    /// Parse a format name from config, ignoring case
    pub fn from_config(value: &str) -> Option<OutputFormat> {
        <OutputFormat as ValueEnum>::from_str(value, true).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_resolve_explicit_format_wins() {
        let path = Path::new("bom.json");
        assert_eq!(OutputFormat::Md.resolve(Some(path), true), OutputFormat::Md);
    }

    #[test]
    fn test_resolve_auto_from_extension() {
        let auto = OutputFormat::Auto;
        assert_eq!(auto.resolve(Some(Path::new("bom.csv")), true), OutputFormat::Csv);
        assert_eq!(auto.resolve(Some(Path::new("bom.TSV")), true), OutputFormat::Tsv);
        assert_eq!(auto.resolve(Some(Path::new("bom.json")), false), OutputFormat::Json);
        assert_eq!(auto.resolve(Some(Path::new("bom")), true), OutputFormat::Csv);
    }

    #[test]
    fn test_resolve_auto_for_stdout() {
        assert_eq!(OutputFormat::Auto.resolve(None, true), OutputFormat::Table);
        assert_eq!(OutputFormat::Auto.resolve(None, false), OutputFormat::Csv);
    }

    #[test]
    fn test_from_config() {
        assert_eq!(OutputFormat::from_config("JSON"), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::from_config("yaml"), None);
    }
}
