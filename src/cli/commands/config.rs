//! `sbom config` command - Configuration inspection
//!
//! Configuration is layered: built-in defaults, then the global user file,
//! then `sbom.yaml` in the working directory, then command-line flags.

use clap::Subcommand;
use console::style;
use miette::Result;

use crate::core::Config;

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective configuration values
    Show(ShowArgs),

    /// Show paths to configuration files
    Path,

    /// List all available configuration keys
    Keys,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Show only this key's value
    pub key: Option<String>,
}

/// Valid configuration keys
const VALID_KEYS: &[(&str, &str)] = &[
    ("survey_header_row", "Record index of the survey header row (default 0)"),
    ("mapping_header_row", "Record index of the mapping header row (default 0)"),
    ("model_columns", "Survey header names accepted for the model number"),
    ("mount_columns", "Survey header names accepted for the mount type"),
    ("include_camera_lines", "Add one BOM line per camera model (default true)"),
    ("flatten_to_sku_only", "Aggregate by SKU only (default true)"),
    ("ignore_case", "Match model/mount names case-insensitively (default false)"),
    ("on_duplicate", "Duplicate mapping keys: first or reject (default first)"),
    ("default_format", "Default output format (csv, tsv, json, md, table)"),
];

/// Run a config subcommand
pub fn run(cmd: ConfigCommands) -> Result<()> {
    match cmd {
        ConfigCommands::Show(args) => run_show(args),
        ConfigCommands::Path => run_path(),
        ConfigCommands::Keys => run_keys(),
    }
}

fn run_show(args: ShowArgs) -> Result<()> {
    let config = Config::load();

    // If a specific key is requested, show just that value
    if let Some(key) = &args.key {
        let value = get_config_value(&config, key)
            .ok_or_else(|| miette::miette!("Unknown configuration key '{}'", key))?;
        println!("{}", value);
        return Ok(());
    }

    println!("{}", style("Effective Configuration").bold().underlined());
    println!();
    for (key, _) in VALID_KEYS {
        let value = get_config_value(&config, key).unwrap_or_default();
        println!("  {}: {}", style(key).cyan(), style(value).yellow());
    }

    println!();
    println!("{}", style("Config Sources (in priority order):").dim());
    println!("  1. Command-line flags");
    println!("  2. Local config (./{})", crate::core::config::LOCAL_CONFIG_FILE);
    println!("  3. Global config (~/.config/sbom/config.yaml)");

    Ok(())
}

fn run_path() -> Result<()> {
    let global_path = Config::global_config_path()
        .ok_or_else(|| miette::miette!("Could not determine global config directory"))?;
    let local_path = Config::local_config_path();

    println!("{}", style("Configuration file paths:").bold());
    println!();
    for (label, path) in [("Global:", global_path), ("Local:", local_path)] {
        let state = if path.exists() {
            style("(exists)").green()
        } else {
            style("(not created)").dim()
        };
        println!("  {:<8} {} {}", style(label).cyan(), path.display(), state);
    }

    Ok(())
}

fn run_keys() -> Result<()> {
    println!("{}", style("Available configuration keys:").bold());
    println!();

    for (key, description) in VALID_KEYS {
        println!("  {:<22} {}", style(key).cyan(), style(description).dim());
    }

    Ok(())
}

/// Effective value of a key, with built-in defaults filled in
fn get_config_value(config: &Config, key: &str) -> Option<String> {
    let options = config.reconcile_options();
    let columns = config.survey_columns();
    match key {
        "survey_header_row" => Some(config.survey_header_row().to_string()),
        "mapping_header_row" => Some(config.mapping_header_row().to_string()),
        "model_columns" => Some(columns.model.join(", ")),
        "mount_columns" => Some(columns.mount.join(", ")),
        "include_camera_lines" => Some(options.include_camera_lines.to_string()),
        "flatten_to_sku_only" => Some(options.flatten_to_sku_only.to_string()),
        "ignore_case" => Some(options.ignore_case.to_string()),
        "on_duplicate" => Some(options.duplicate_policy.to_string()),
        "default_format" => Some(
            config
                .default_format
                .clone()
                .unwrap_or_else(|| "auto".to_string()),
        ),
        _ => None,
    }
}
