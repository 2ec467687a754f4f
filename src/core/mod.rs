//! Core module - input tables, reconciliation and the BOM model

pub mod bom;
pub mod config;
pub mod error;
pub mod mapping;
pub mod reconcile;
pub mod survey;
pub mod table;

pub use bom::{BomLine, BomReport, Warning};
pub use config::Config;
pub use error::BomError;
pub use mapping::{parse_mapping, MappingRecord};
pub use reconcile::{reconcile, reconcile_tables, DuplicatePolicy, ReconcileOptions};
pub use survey::{parse_survey, SurveyColumns, SurveyRecord};
pub use table::{Table, TableRow};
