//! `sbom template` command - Print CSV templates for the input files

use clap::ValueEnum;
use console::style;
use miette::Result;

use crate::core::mapping::{MODEL_COLUMN, MOUNT_COLUMN, QUANTITY_COLUMN, SKU_COLUMN};
use crate::core::survey::{MODEL_ALIASES, MOUNT_ALIASES};

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum TemplateKind {
    /// Survey export (one row per installed device)
    Survey,
    /// Mapping table from model/mount to hardware SKU
    Mapping,
}

impl TemplateKind {
    fn as_str(&self) -> &'static str {
        match self {
            TemplateKind::Survey => "survey",
            TemplateKind::Mapping => "mapping",
        }
    }
}

#[derive(clap::Args, Debug)]
pub struct TemplateArgs {
    /// Which input file to generate a template for
    #[arg(value_enum)]
    pub kind: TemplateKind,
}

pub fn run(args: TemplateArgs) -> Result<()> {
    // Output to stdout (can be redirected to file)
    print!("{}", template_csv(args.kind));

    // Print usage hint to stderr so it doesn't interfere with redirected output
    eprintln!();
    eprintln!(
        "{} Template generated. Redirect to file: sbom template {} > {}.csv",
        style("→").blue(),
        args.kind.as_str(),
        args.kind.as_str()
    );
    if args.kind == TemplateKind::Survey {
        eprintln!(
            "  Model column may also be named: {}",
            MODEL_ALIASES[1..].join(", ")
        );
        eprintln!(
            "  Mount column may also be named: {}",
            MOUNT_ALIASES[1..].join(", ")
        );
    }

    Ok(())
}

/// Header plus example rows for an input file
pub fn template_csv(kind: TemplateKind) -> String {
    let (headers, examples): (Vec<&str>, Vec<Vec<&str>>) = match kind {
        TemplateKind::Survey => (
            vec![MODEL_ALIASES[0], MOUNT_ALIASES[0], "Location"],
            vec![
                vec!["P3265-LVE", "Wall", "Lobby"],
                vec!["P3265-LVE", "Wall", "Loading Dock"],
                vec!["Q6135-LE", "Pole", "Parking Lot"],
            ],
        ),
        TemplateKind::Mapping => (
            vec![MODEL_COLUMN, MOUNT_COLUMN, SKU_COLUMN, QUANTITY_COLUMN],
            vec![
                vec!["P3265-LVE", "Wall", "T91G61-WALL", "1"],
                vec!["Q6135-LE", "Pole", "T91B57-POLE", "1"],
                vec!["Q6135-LE", "Wall", "T94N01G-WALL", "2"],
            ],
        ),
    };

    let mut out = headers.join(",");
    out.push('\n');
    for row in examples {
        out.push_str(&row.join(","));
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{parse_mapping, parse_survey, SurveyColumns, Table};

    #[test]
    fn test_survey_template_parses() {
        let csv = template_csv(TemplateKind::Survey);
        let table = Table::from_reader("survey", csv.as_bytes(), 0).unwrap();
        let records = parse_survey(&table, &SurveyColumns::default()).unwrap();
        assert_eq!(records.len(), 3);
    }

    #[test]
    fn test_mapping_template_parses() {
        let csv = template_csv(TemplateKind::Mapping);
        assert!(csv.starts_with("Model_Number,Mount_Type,Hardware_SKU,Quantity\n"));

        let table = Table::from_reader("mapping", csv.as_bytes(), 0).unwrap();
        assert_eq!(parse_mapping(&table).unwrap().len(), 3);
    }
}
