//! Mapping table parsing
//!
//! The mapping table translates a (model, mount) pair into the hardware SKU
//! it needs and how many of that SKU go with each camera.

use crate::core::error::BomError;
use crate::core::table::Table;

pub const MODEL_COLUMN: &str = "Model_Number";
pub const MOUNT_COLUMN: &str = "Mount_Type";
pub const SKU_COLUMN: &str = "Hardware_SKU";
pub const QUANTITY_COLUMN: &str = "Quantity";

/// One row of the mapping table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingRecord {
    pub model_number: String,
    pub mount_type: String,
    pub hardware_sku: String,
    /// Units of `hardware_sku` per camera
    pub quantity: u32,
    /// Source line, for diagnostics
    pub line: usize,
}

impl MappingRecord {
    pub fn new(model_number: &str, mount_type: &str, hardware_sku: &str, quantity: u32) -> Self {
        Self {
            model_number: model_number.trim().to_string(),
            mount_type: mount_type.trim().to_string(),
            hardware_sku: hardware_sku.trim().to_string(),
            quantity,
            line: 0,
        }
    }
}

/// Extract mapping records from a table
///
/// `Quantity` is optional as a column and as a cell; either way it defaults
/// to 1. Any malformed row fails the whole table.
pub fn parse_mapping(table: &Table) -> Result<Vec<MappingRecord>, BomError> {
    let model_col = table.require_column(&[MODEL_COLUMN.to_string()])?;
    let mount_col = table.require_column(&[MOUNT_COLUMN.to_string()])?;
    let sku_col = table.require_column(&[SKU_COLUMN.to_string()])?;
    let qty_col = table.find_column(&[QUANTITY_COLUMN.to_string()]);

    let mut records = Vec::with_capacity(table.len());

    for row in table.rows() {
        let model_number = table.cell(row, model_col).trim();
        if model_number.is_empty() {
            return Err(BomError::BlankField {
                table: table.name().to_string(),
                row: row.line,
                column: MODEL_COLUMN.to_string(),
            });
        }

        let hardware_sku = table.cell(row, sku_col).trim();
        if hardware_sku.is_empty() {
            return Err(BomError::BlankField {
                table: table.name().to_string(),
                row: row.line,
                column: SKU_COLUMN.to_string(),
            });
        }

        let quantity = match qty_col.map(|c| table.cell(row, c).trim()) {
            None | Some("") => 1,
            Some(raw) => parse_quantity(raw).ok_or_else(|| BomError::InvalidQuantity {
                table: table.name().to_string(),
                row: row.line,
                value: raw.to_string(),
            })?,
        };

        records.push(MappingRecord {
            model_number: model_number.to_string(),
            mount_type: table.cell(row, mount_col).trim().to_string(),
            hardware_sku: hardware_sku.to_string(),
            quantity,
            line: row.line,
        });
    }

    Ok(records)
}

/// Parse a per-camera quantity
///
/// Spreadsheet exports often write whole numbers as `2.0`, so integral
/// floats are accepted. Zero, negatives and fractions are not.
pub fn parse_quantity(raw: &str) -> Option<u32> {
    let raw = raw.trim();
    if let Ok(n) = raw.parse::<u32>() {
        return (n > 0).then_some(n);
    }

    let f = raw.parse::<f64>().ok()?;
    if f.is_finite() && f.fract() == 0.0 && f >= 1.0 && f <= f64::from(u32::MAX) {
        Some(f as u32)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(data: &str) -> Table {
        Table::from_reader("mapping", data.as_bytes(), 0).unwrap()
    }

    #[test]
    fn test_parse_with_quantity() {
        let t = table("Model_Number,Mount_Type,Hardware_SKU,Quantity\nCAM-1,Wall,WB-100,2\n");
        let records = parse_mapping(&t).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].hardware_sku, "WB-100");
        assert_eq!(records[0].quantity, 2);
        assert_eq!(records[0].line, 2);
    }

    #[test]
    fn test_quantity_column_optional() {
        let t = table("Model_Number,Mount_Type,Hardware_SKU\nCAM-1,Wall,WB-100\n");
        let records = parse_mapping(&t).unwrap();
        assert_eq!(records[0].quantity, 1);
    }

    #[test]
    fn test_blank_quantity_defaults_to_one() {
        let t = table("Model_Number,Mount_Type,Hardware_SKU,Quantity\nCAM-1,Wall,WB-100,\n");
        let records = parse_mapping(&t).unwrap();
        assert_eq!(records[0].quantity, 1);
    }

    #[test]
    fn test_non_numeric_quantity_rejected() {
        let t = table(
            "Model_Number,Mount_Type,Hardware_SKU,Quantity\nCAM-1,Wall,WB-100,1\nCAM-2,Wall,WB-200,two\n",
        );
        let err = parse_mapping(&t).unwrap_err();
        match err {
            BomError::InvalidQuantity { row, value, .. } => {
                assert_eq!(row, 3);
                assert_eq!(value, "two");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_sku_column() {
        let t = table("Model_Number,Mount_Type,Quantity\nCAM-1,Wall,1\n");
        let err = parse_mapping(&t).unwrap_err();
        assert_eq!(err.to_string(), "mapping table is missing column 'Hardware_SKU'");
    }

    #[test]
    fn test_blank_sku_rejected() {
        let t = table("Model_Number,Mount_Type,Hardware_SKU\nCAM-1,Wall,\n");
        let err = parse_mapping(&t).unwrap_err();
        assert!(matches!(err, BomError::BlankField { row: 2, ref column, .. } if column == "Hardware_SKU"));
    }

    #[test]
    fn test_headers_match_loosely() {
        let t = table("model_number , MOUNT_TYPE,hardware_sku\nCAM-1,Wall,WB-100\n");
        assert_eq!(parse_mapping(&t).unwrap().len(), 1);
    }

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity("3"), Some(3));
        assert_eq!(parse_quantity(" 4 "), Some(4));
        assert_eq!(parse_quantity("2.0"), Some(2));
        assert_eq!(parse_quantity("0"), None);
        assert_eq!(parse_quantity("-1"), None);
        assert_eq!(parse_quantity("1.5"), None);
        assert_eq!(parse_quantity("NaN"), None);
        assert_eq!(parse_quantity("abc"), None);
    }
}
