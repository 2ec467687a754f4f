//! Survey-to-BOM reconciliation
//!
//! Survey installs are counted per (model, mount) pair, left-joined against
//! the mapping table, scaled by the per-camera hardware quantity, and summed
//! per output key. Every intermediate map is a `BTreeMap`, so the output
//! order depends only on the keys and never on input row order.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

use crate::core::bom::{BomLine, BomReport, Warning};
use crate::core::error::BomError;
use crate::core::mapping::{parse_mapping, MappingRecord};
use crate::core::survey::{parse_survey, SurveyColumns, SurveyRecord};
use crate::core::table::Table;

/// How to treat mapping rows that repeat a (model, mount) key
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Keep the first row in file order, warn about the rest
    #[default]
    First,
    /// Fail the reconciliation
    Reject,
}

impl std::fmt::Display for DuplicatePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DuplicatePolicy::First => write!(f, "first"),
            DuplicatePolicy::Reject => write!(f, "reject"),
        }
    }
}

/// Switches selecting the BOM variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconcileOptions {
    /// Add one line per camera model with the number of cameras installed
    pub include_camera_lines: bool,
    /// Aggregate by SKU alone instead of (model, mount, SKU)
    pub flatten_to_sku_only: bool,
    /// Compare join keys without regard to letter case
    pub ignore_case: bool,
    pub duplicate_policy: DuplicatePolicy,
}

impl Default for ReconcileOptions {
    fn default() -> Self {
        Self {
            include_camera_lines: true,
            flatten_to_sku_only: true,
            ignore_case: false,
            duplicate_policy: DuplicatePolicy::First,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
struct JoinKey {
    model: String,
    mount: String,
}

impl JoinKey {
    fn new(model: &str, mount: &str, ignore_case: bool) -> Self {
        if ignore_case {
            Self {
                model: model.to_uppercase(),
                mount: mount.to_uppercase(),
            }
        } else {
            Self {
                model: model.to_string(),
                mount: mount.to_string(),
            }
        }
    }
}

/// Cameras sharing one join key
#[derive(Debug)]
struct InstallGroup {
    model_number: String,
    mount_type: String,
    cameras: u64,
}

/// Reconcile survey installs against the mapping table
///
/// Fails only on a duplicate mapping key under [`DuplicatePolicy::Reject`];
/// column and cell problems are caught earlier, when the tables are parsed.
pub fn reconcile(
    survey: &[SurveyRecord],
    mapping: &[MappingRecord],
    options: &ReconcileOptions,
) -> Result<BomReport, BomError> {
    let mut warnings = Vec::new();

    let index = index_mapping(mapping, options, &mut warnings)?;
    let groups = count_installs(survey, options.ignore_case, &mut warnings);
    debug!(
        survey_rows = survey.len(),
        mapping_keys = index.len(),
        combinations = groups.len(),
        "counted installs"
    );

    // (model, mount, sku) -> quantity; model and mount stay empty when flattening
    let mut totals: BTreeMap<(String, String, String), u64> = BTreeMap::new();
    let mut add_line = |group: &InstallGroup, sku: &str, quantity: u64| {
        let key = if options.flatten_to_sku_only {
            (String::new(), String::new(), sku.to_string())
        } else {
            (
                group.model_number.clone(),
                group.mount_type.clone(),
                sku.to_string(),
            )
        };
        *totals.entry(key).or_insert(0) += quantity;
    };

    for (key, group) in &groups {
        match index.get(key) {
            Some(entry) => {
                let quantity = group.cameras * u64::from(entry.quantity);
                add_line(group, &entry.hardware_sku, quantity);
            }
            None => {
                debug!(
                    model = %group.model_number,
                    mount = %group.mount_type,
                    cameras = group.cameras,
                    "no mapping entry"
                );
                warnings.push(Warning::Unmatched {
                    model_number: group.model_number.clone(),
                    mount_type: group.mount_type.clone(),
                    cameras: group.cameras,
                });
            }
        }

        if options.include_camera_lines {
            add_line(group, &group.model_number, group.cameras);
        }
    }

    let keyed = !options.flatten_to_sku_only;
    let lines: Vec<BomLine> = totals
        .into_iter()
        .map(|((model, mount, sku), quantity)| {
            if keyed {
                BomLine::keyed(&model, &mount, &sku, quantity)
            } else {
                BomLine::flat(&sku, quantity)
            }
        })
        .collect();

    debug!(lines = lines.len(), warnings = warnings.len(), "reconciled");

    Ok(BomReport {
        keyed,
        lines,
        warnings,
    })
}

/// Parse both tables and reconcile them
///
/// Both tables are fully validated before anything is joined, so a malformed
/// input never yields a partial BOM.
pub fn reconcile_tables(
    survey: &Table,
    mapping: &Table,
    columns: &SurveyColumns,
    options: &ReconcileOptions,
) -> Result<BomReport, BomError> {
    let survey_records = parse_survey(survey, columns)?;
    let mapping_records = parse_mapping(mapping)?;
    reconcile(&survey_records, &mapping_records, options)
}

/// Index mapping rows by join key, applying the duplicate policy
fn index_mapping<'a>(
    mapping: &'a [MappingRecord],
    options: &ReconcileOptions,
    warnings: &mut Vec<Warning>,
) -> Result<HashMap<JoinKey, &'a MappingRecord>, BomError> {
    let mut index: HashMap<JoinKey, &MappingRecord> = HashMap::with_capacity(mapping.len());

    for record in mapping {
        let key = JoinKey::new(&record.model_number, &record.mount_type, options.ignore_case);
        if let Some(first) = index.get(&key) {
            match options.duplicate_policy {
                DuplicatePolicy::Reject => {
                    return Err(BomError::DuplicateMapping {
                        model_number: record.model_number.clone(),
                        mount_type: record.mount_type.clone(),
                        first_row: first.line,
                        first_sku: first.hardware_sku.clone(),
                        row: record.line,
                        sku: record.hardware_sku.clone(),
                    });
                }
                DuplicatePolicy::First => {
                    debug!(row = record.line, sku = %record.hardware_sku, "duplicate mapping key");
                    warnings.push(Warning::DuplicateMapping {
                        model_number: record.model_number.clone(),
                        mount_type: record.mount_type.clone(),
                        row: record.line,
                        kept_sku: first.hardware_sku.clone(),
                        ignored_sku: record.hardware_sku.clone(),
                    });
                }
            }
            continue;
        }
        index.insert(key, record);
    }

    Ok(index)
}

/// Count cameras per join key
///
/// With case folding, every group of one model shows the smallest model
/// spelling seen across all its mounts, and each mount shows the smallest
/// spelling seen for that key. Both keep the result independent of row order.
fn count_installs(
    survey: &[SurveyRecord],
    ignore_case: bool,
    warnings: &mut Vec<Warning>,
) -> BTreeMap<JoinKey, InstallGroup> {
    let mut groups: BTreeMap<JoinKey, InstallGroup> = BTreeMap::new();

    for record in survey {
        if record.model_number.is_empty() {
            warnings.push(Warning::MissingModel { row: record.line });
            continue;
        }

        let key = JoinKey::new(&record.model_number, &record.mount_type, ignore_case);
        let group = groups.entry(key).or_insert_with(|| InstallGroup {
            model_number: record.model_number.clone(),
            mount_type: record.mount_type.clone(),
            cameras: 0,
        });
        group.cameras += 1;
        if record.model_number < group.model_number {
            group.model_number = record.model_number.clone();
        }
        if record.mount_type < group.mount_type {
            group.mount_type = record.mount_type.clone();
        }
    }

    if ignore_case {
        let mut spellings: BTreeMap<String, String> = BTreeMap::new();
        for (key, group) in &groups {
            let spelling = spellings
                .entry(key.model.clone())
                .or_insert_with(|| group.model_number.clone());
            if group.model_number < *spelling {
                *spelling = group.model_number.clone();
            }
        }
        for (key, group) in groups.iter_mut() {
            if let Some(spelling) = spellings.get(&key.model) {
                group.model_number = spelling.clone();
            }
        }
    }

    groups
}
