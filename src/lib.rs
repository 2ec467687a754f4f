//! sbom: Survey BOM generator
//!
//! Reconciles a site-survey export of installed cameras against a
//! model/mount-to-hardware mapping table and produces a flat bill of
//! materials of SKUs and quantities.

pub mod cli;
pub mod core;
