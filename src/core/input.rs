use super::estate::{
    Asset, AssetType, Liability, LiabilityType, Supplementary, MAX_AMOUNT, MAX_SHARE,
};
use super::rules::Rules;
use super::valuation::{compute, ValuationReport};
use anyhow::Context;
use ihtc_derive::CsvSchema;
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::io::Read;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum InputError {
    #[error("unknown asset type: {0}")]
    UnknownAssetType(String),
    #[error("unknown liability type: {0}")]
    UnknownLiabilityType(String),
    #[error("invalid value for {field}: {value} (expected true/false, yes/no or 1/0)")]
    InvalidFlag { field: &'static str, value: String },
    #[error("{field} of {alias:?} is {value}, outside the supported range of ±{limit}")]
    OutOfRange {
        alias: String,
        field: &'static str,
        value: Decimal,
        limit: Decimal,
    },
}

/// Unified JSON input format
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct EstateInput {
    #[serde(default)]
    pub assets: Vec<Asset>,
    #[serde(default)]
    pub liabilities: Vec<Liability>,
    /// Reserved for gift taper rules; carried through to the report only
    #[serde(default)]
    #[schemars(with = "f64")]
    pub total_gifts_made_in_last_7_years: Decimal,
    #[serde(default)]
    pub exemption_type_agricultural: bool,
    #[serde(default)]
    pub exemption_type_business: bool,
}

impl EstateInput {
    pub fn supplementary(&self) -> Supplementary {
        Supplementary {
            total_gifts_made_in_last_7_years: self.total_gifts_made_in_last_7_years,
            exemption_type_agricultural: self.exemption_type_agricultural,
            exemption_type_business: self.exemption_type_business,
        }
    }

    pub fn valuation(&self, rules: &Rules) -> ValuationReport {
        compute(&self.assets, &self.liabilities, &self.supplementary(), rules)
    }

    /// Reject amounts and shares too large to value
    pub fn check_bounds(&self) -> Result<(), InputError> {
        for asset in &self.assets {
            within(&asset.alias, "value", asset.value, MAX_AMOUNT)?;
            within(
                &asset.alias,
                "spouse_allocated_share",
                asset.spouse_allocated_share,
                MAX_SHARE,
            )?;
            within(
                &asset.alias,
                "charity_allocated_share",
                asset.charity_allocated_share,
                MAX_SHARE,
            )?;
        }
        for liability in &self.liabilities {
            within(&liability.alias, "value", liability.value, MAX_AMOUNT)?;
        }
        within(
            "estate",
            "total_gifts_made_in_last_7_years",
            self.total_gifts_made_in_last_7_years,
            MAX_AMOUNT,
        )
    }
}

fn within(
    alias: &str,
    field: &'static str,
    value: Decimal,
    limit: Decimal,
) -> Result<(), InputError> {
    if value.abs() > limit {
        return Err(InputError::OutOfRange {
            alias: alias.to_string(),
            field,
            value,
            limit,
        });
    }
    Ok(())
}

/// Describes one CSV column, generated by `#[derive(CsvSchema)]`
#[derive(Debug, Clone, Copy)]
pub struct CsvField {
    pub name: &'static str,
    pub required: bool,
    pub description: &'static str,
}

/// CSV record format for assets
#[derive(Debug, Clone, Serialize, Deserialize, CsvSchema)]
pub struct AssetRecord {
    /// Display name for the asset
    pub alias: String,
    /// Value in pounds
    pub value: Decimal,
    /// bank_account, life_insurance, stock_shares, crypto, business, expected_inheritance, premium_bond, pension, property, other or isa
    pub asset_type: String,
    /// Held in trust (true/false)
    #[serde(default)]
    pub held_in_trust: String,
    /// Allocated to a nest (true/false)
    #[serde(default)]
    pub allocated_to_nest: String,
    /// Nest has beneficiaries (true/false)
    #[serde(default)]
    pub nest_has_beneficiaries: String,
    /// Percentage left to a spouse or civil partner
    pub spouse_allocated_share: Option<Decimal>,
    /// Percentage left to charity
    pub charity_allocated_share: Option<Decimal>,
    /// Qualifies for the residence nil rate band (true/false)
    #[serde(default)]
    pub residence_nil_rate_band_applicable: String,
}

impl TryFrom<AssetRecord> for Asset {
    type Error = InputError;

    fn try_from(record: AssetRecord) -> Result<Self, Self::Error> {
        let asset_type = record.asset_type.parse::<AssetType>()?;
        Ok(Asset {
            held_in_trust: parse_flag("held_in_trust", &record.held_in_trust)?,
            allocated_to_nest: parse_flag("allocated_to_nest", &record.allocated_to_nest)?,
            nest_has_beneficiaries: parse_flag(
                "nest_has_beneficiaries",
                &record.nest_has_beneficiaries,
            )?,
            spouse_allocated_share: record.spouse_allocated_share.unwrap_or_default(),
            charity_allocated_share: record.charity_allocated_share.unwrap_or_default(),
            residence_nil_rate_band_applicable: parse_flag(
                "residence_nil_rate_band_applicable",
                &record.residence_nil_rate_band_applicable,
            )?,
            ..Asset::new(record.alias, asset_type, record.value)
        })
    }
}

/// CSV record format for liabilities
#[derive(Debug, Clone, Serialize, Deserialize, CsvSchema)]
pub struct LiabilityRecord {
    /// Display name for the liability
    pub alias: String,
    /// Amount owed in pounds
    pub value: Decimal,
    /// credit_card, hmrc, loan, mortgage or overdraft
    pub liability_type: String,
}

impl TryFrom<LiabilityRecord> for Liability {
    type Error = InputError;

    fn try_from(record: LiabilityRecord) -> Result<Self, Self::Error> {
        let liability_type = record.liability_type.parse::<LiabilityType>()?;
        Ok(Liability::new(record.alias, liability_type, record.value))
    }
}

/// Blank cells read as false
fn parse_flag(field: &'static str, value: &str) -> Result<bool, InputError> {
    match value.trim().to_lowercase().as_str() {
        "" | "false" | "no" | "n" | "0" => Ok(false),
        "true" | "yes" | "y" | "1" => Ok(true),
        _ => Err(InputError::InvalidFlag {
            field,
            value: value.to_string(),
        }),
    }
}

/// Read the estate from JSON
pub fn read_json<R: Read>(reader: R) -> anyhow::Result<EstateInput> {
    let input: EstateInput = serde_json::from_reader(reader)?;
    log::debug!(
        "Read {} assets and {} liabilities from JSON",
        input.assets.len(),
        input.liabilities.len()
    );
    Ok(input)
}

/// Read assets from CSV
pub fn read_assets_csv<R: Read>(reader: R) -> anyhow::Result<Vec<Asset>> {
    read_csv_records::<AssetRecord, Asset, R>(reader, "asset")
}

/// Read liabilities from CSV
pub fn read_liabilities_csv<R: Read>(reader: R) -> anyhow::Result<Vec<Liability>> {
    read_csv_records::<LiabilityRecord, Liability, R>(reader, "liability")
}

fn read_csv_records<Rec, T, R>(reader: R, kind: &str) -> anyhow::Result<Vec<T>>
where
    Rec: serde::de::DeserializeOwned,
    T: TryFrom<Rec, Error = InputError>,
    R: Read,
{
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut items = Vec::new();
    for (i, record) in rdr.deserialize::<Rec>().enumerate() {
        // Header is line 1
        let line = i + 2;
        let record = record.with_context(|| format!("invalid {kind} record on line {line}"))?;
        let item = T::try_from(record).with_context(|| format!("invalid {kind} on line {line}"))?;
        items.push(item);
    }
    log::debug!("Read {} {kind} rows from CSV", items.len());
    Ok(items)
}
