//! Bill of Materials output model

use serde::Serialize;
use std::fmt;
use std::io::Write;

use crate::core::error::BomError;

pub const FLAT_HEADERS: &[&str] = &["Hardware_SKU", "Quantity"];
pub const KEYED_HEADERS: &[&str] = &["Model_Number", "Mount_Type", "Hardware_SKU", "Quantity"];

/// One aggregated output row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BomLine {
    #[serde(rename = "Model_Number", skip_serializing_if = "Option::is_none")]
    pub model_number: Option<String>,
    #[serde(rename = "Mount_Type", skip_serializing_if = "Option::is_none")]
    pub mount_type: Option<String>,
    #[serde(rename = "Hardware_SKU")]
    pub hardware_sku: String,
    #[serde(rename = "Quantity")]
    pub quantity: u64,
}

impl BomLine {
    pub fn flat(hardware_sku: &str, quantity: u64) -> Self {
        Self {
            model_number: None,
            mount_type: None,
            hardware_sku: hardware_sku.to_string(),
            quantity,
        }
    }

    pub fn keyed(model_number: &str, mount_type: &str, hardware_sku: &str, quantity: u64) -> Self {
        Self {
            model_number: Some(model_number.to_string()),
            mount_type: Some(mount_type.to_string()),
            hardware_sku: hardware_sku.to_string(),
            quantity,
        }
    }

    /// Cell values in header order
    pub fn cells(&self, keyed: bool) -> Vec<String> {
        let mut cells = Vec::with_capacity(4);
        if keyed {
            cells.push(self.model_number.clone().unwrap_or_default());
            cells.push(self.mount_type.clone().unwrap_or_default());
        }
        cells.push(self.hardware_sku.clone());
        cells.push(self.quantity.to_string());
        cells
    }
}

/// Non-fatal conditions found while reconciling
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Warning {
    /// Survey combination with no mapping entry; contributes no hardware
    Unmatched {
        model_number: String,
        mount_type: String,
        cameras: u64,
    },
    /// Mapping row ignored because an earlier row already maps its key
    DuplicateMapping {
        model_number: String,
        mount_type: String,
        row: usize,
        kept_sku: String,
        ignored_sku: String,
    },
    /// Survey row with a blank model cell; it cannot match any mapping entry
    MissingModel { row: usize },
}

impl Warning {
    /// Survey installs left without hardware
    pub fn is_unmatched(&self) -> bool {
        matches!(self, Warning::Unmatched { .. } | Warning::MissingModel { .. })
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::Unmatched {
                model_number,
                mount_type,
                cameras,
            } => write!(
                f,
                "no mapping for {} / {} ({} camera(s), no hardware added)",
                model_number,
                mount_label(mount_type),
                cameras
            ),
            Warning::DuplicateMapping {
                model_number,
                mount_type,
                row,
                kept_sku,
                ignored_sku,
            } => write!(
                f,
                "mapping row {} repeats {} / {}; keeping '{}', ignoring '{}'",
                row,
                model_number,
                mount_label(mount_type),
                kept_sku,
                ignored_sku
            ),
            Warning::MissingModel { row } => {
                write!(f, "survey row {} has no model number (no hardware added)", row)
            }
        }
    }
}

fn mount_label(mount_type: &str) -> &str {
    if mount_type.is_empty() {
        "(no mount)"
    } else {
        mount_type
    }
}

/// Result of one reconciliation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BomReport {
    /// Whether lines carry their model/mount key
    #[serde(skip)]
    pub keyed: bool,
    pub lines: Vec<BomLine>,
    pub warnings: Vec<Warning>,
}

impl BomReport {
    /// True when at least one survey combination had no mapping entry
    pub fn has_unmatched(&self) -> bool {
        self.warnings.iter().any(Warning::is_unmatched)
    }

    pub fn unmatched(&self) -> impl Iterator<Item = &Warning> {
        self.warnings.iter().filter(|w| w.is_unmatched())
    }

    pub fn total_quantity(&self) -> u64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Quantity recorded for `sku`, summed across keys
    pub fn quantity_of(&self, sku: &str) -> u64 {
        self.lines
            .iter()
            .filter(|l| l.hardware_sku == sku)
            .map(|l| l.quantity)
            .sum()
    }

    pub fn headers(&self) -> &'static [&'static str] {
        if self.keyed {
            KEYED_HEADERS
        } else {
            FLAT_HEADERS
        }
    }

    /// Write the BOM as delimited text with a header row
    pub fn write_delimited<W: Write>(&self, writer: W, delimiter: u8) -> Result<(), BomError> {
        let csv_err = |source: csv::Error| BomError::Csv {
            table: "BOM".to_string(),
            source,
        };

        let mut wtr = csv::WriterBuilder::new()
            .delimiter(delimiter)
            .from_writer(writer);
        wtr.write_record(self.headers()).map_err(csv_err)?;
        for line in &self.lines {
            wtr.write_record(line.cells(self.keyed)).map_err(csv_err)?;
        }
        wtr.flush()?;
        Ok(())
    }

    /// Render as CSV into a string
    pub fn to_csv(&self) -> Result<String, BomError> {
        let mut buf = Vec::new();
        self.write_delimited(&mut buf, b',')?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}
