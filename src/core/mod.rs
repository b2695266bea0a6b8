pub mod estate;
pub mod input;
pub mod rules;
pub mod valuation;
pub mod warnings;

// Flat public surface for domain types and functions.
pub use estate::{Asset, AssetType, Liability, LiabilityType, MAX_AMOUNT};
pub use input::{
    read_assets_csv, read_json, read_liabilities_csv, AssetRecord, CsvField, EstateInput,
    LiabilityRecord,
};
pub use rules::Rules;
pub use valuation::ValuationReport;
pub use warnings::{check_estate, Warning};
