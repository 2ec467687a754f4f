//! `sbom generate` command - Build a BOM from a survey export and a mapping table

use console::{style, Term};
use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;

use crate::cli::helpers::{print_warnings, require_file, write_output};
use crate::cli::table::render_rows;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::{reconcile_tables, BomReport, Config, DuplicatePolicy, Table};

#[derive(clap::Args, Debug)]
pub struct GenerateArgs {
    /// Survey export CSV (one row per installed device)
    #[arg(long, short = 's')]
    pub survey: PathBuf,

    /// Mapping CSV (Model_Number, Mount_Type, Hardware_SKU, optional Quantity)
    #[arg(long, short = 'm')]
    pub mapping: PathBuf,

    /// Output to file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Record index of the survey header row (0 = first line)
    #[arg(long)]
    pub survey_header_row: Option<usize>,

    /// Record index of the mapping header row (0 = first line)
    #[arg(long)]
    pub mapping_header_row: Option<usize>,

    /// Leave out the camera units themselves, list mounting hardware only
    #[arg(long)]
    pub no_camera_lines: bool,

    /// Keep Model_Number and Mount_Type columns instead of flattening to SKU
    #[arg(long)]
    pub keep_keys: bool,

    /// Match model and mount names without regard to letter case
    #[arg(long)]
    pub ignore_case: bool,

    /// What to do when the mapping repeats a model/mount pair
    #[arg(long, value_enum)]
    pub on_duplicate: Option<DuplicatePolicy>,

    /// Exit with an error if any survey combination has no mapping entry
    #[arg(long)]
    pub strict: bool,
}

impl GenerateArgs {
    /// Command-line settings as the highest-priority config layer
    fn as_config(&self) -> Config {
        Config {
            survey_header_row: self.survey_header_row,
            mapping_header_row: self.mapping_header_row,
            include_camera_lines: self.no_camera_lines.then_some(false),
            flatten_to_sku_only: self.keep_keys.then_some(false),
            ignore_case: self.ignore_case.then_some(true),
            on_duplicate: self.on_duplicate,
            ..Default::default()
        }
    }
}

pub fn run(args: GenerateArgs, global: &GlobalOpts) -> Result<()> {
    require_file(&args.survey, "Survey")?;
    require_file(&args.mapping, "Mapping")?;

    let mut config = Config::load();
    config.merge(args.as_config());

    let survey = Table::from_path("survey", &args.survey, config.survey_header_row())?;
    let mapping = Table::from_path("mapping", &args.mapping, config.mapping_header_row())?;
    tracing::debug!(
        survey_rows = survey.len(),
        mapping_rows = mapping.len(),
        "loaded input tables"
    );

    let options = config.reconcile_options();
    let report = reconcile_tables(&survey, &mapping, &config.survey_columns(), &options)?;

    let requested = match global.format {
        OutputFormat::Auto => config
            .default_format
            .as_deref()
            .and_then(OutputFormat::from_config)
            .unwrap_or(OutputFormat::Auto),
        other => other,
    };
    let format = requested.resolve(args.output.as_deref(), Term::stdout().is_term());
    let content = render_report(&report, format)?;

    print_warnings(&report.warnings);

    let written = write_output(&content, args.output.as_ref())?;
    if written && !global.quiet {
        eprintln!(
            "{} BOM written to {} ({} line(s), {} unit(s))",
            style("✓").green(),
            style(args.output.as_ref().map(|p| p.display().to_string()).unwrap_or_default()).cyan(),
            report.lines.len(),
            report.total_quantity()
        );
    }

    let unmatched = report.unmatched().count();
    if unmatched > 0 {
        if args.strict {
            return Err(miette::miette!(
                "{} survey combination(s) have no mapping entry",
                unmatched
            ));
        }
        if !global.quiet {
            eprintln!(
                "{} Some combinations were not found in the mapping table; their hardware is not in the BOM",
                style("→").yellow()
            );
        }
    }

    Ok(())
}

/// Render the report in the requested format
pub fn render_report(report: &BomReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(report).into_diagnostic()?;
            json.push('\n');
            Ok(json)
        }
        OutputFormat::Csv | OutputFormat::Auto => Ok(report.to_csv()?),
        other => {
            let headers: Vec<String> = report.headers().iter().map(|h| h.to_string()).collect();
            let rows: Vec<Vec<String>> = report
                .lines
                .iter()
                .map(|line| line.cells(report.keyed))
                .collect();
            render_rows(&headers, &rows, other)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{BomLine, Warning};

    fn report() -> BomReport {
        BomReport {
            keyed: false,
            lines: vec![BomLine::flat("ModelA", 2), BomLine::flat("SKU1", 4)],
            warnings: vec![Warning::Unmatched {
                model_number: "ModelC".to_string(),
                mount_type: "Floor".to_string(),
                cameras: 1,
            }],
        }
    }

    #[test]
    fn test_render_report_csv() {
        assert_eq!(
            render_report(&report(), OutputFormat::Csv).unwrap(),
            "Hardware_SKU,Quantity\nModelA,2\nSKU1,4\n"
        );
    }

    #[test]
    fn test_render_report_json() {
        let json = render_report(&report(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["lines"][1]["Hardware_SKU"], "SKU1");
        assert_eq!(value["lines"][1]["Quantity"], 4);
        assert!(value["lines"][0].get("Model_Number").is_none());
        assert_eq!(value["warnings"][0]["kind"], "unmatched");
        assert_eq!(value["warnings"][0]["model_number"], "ModelC");
    }

    #[test]
    fn test_render_report_tsv_keyed() {
        let report = BomReport {
            keyed: true,
            lines: vec![BomLine::keyed("ModelA", "Wall", "SKU1", 4)],
            warnings: vec![],
        };
        assert_eq!(
            render_report(&report, OutputFormat::Tsv).unwrap(),
            "Model_Number\tMount_Type\tHardware_SKU\tQuantity\nModelA\tWall\tSKU1\t4\n"
        );
    }

    #[test]
    fn test_cli_flags_override_config() {
        let args = GenerateArgs {
            survey: PathBuf::from("s.csv"),
            mapping: PathBuf::from("m.csv"),
            output: None,
            survey_header_row: Some(1),
            mapping_header_row: None,
            no_camera_lines: true,
            keep_keys: false,
            ignore_case: false,
            on_duplicate: Some(DuplicatePolicy::Reject),
            strict: false,
        };

        let mut config = Config {
            include_camera_lines: Some(true),
            flatten_to_sku_only: Some(false),
            ..Default::default()
        };
        config.merge(args.as_config());

        let options = config.reconcile_options();
        assert!(!options.include_camera_lines);
        // Unset flags leave the lower layer alone
        assert!(!options.flatten_to_sku_only);
        assert_eq!(options.duplicate_policy, DuplicatePolicy::Reject);
        assert_eq!(config.survey_header_row(), 1);
    }
}
