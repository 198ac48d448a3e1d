//! Export module for SpendCast
//!
//! - CSV: expenses only, spreadsheet-compatible
//! - JSON: the full ledger with budget limit and metadata

pub mod csv;
pub mod json;

pub use self::csv::export_expenses_csv;
pub use self::json::{export_full_json, FullExport, EXPORT_SCHEMA_VERSION};
