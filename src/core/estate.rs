use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::input::InputError;

/// Largest magnitude accepted for any sum of money. Far beyond any real
/// estate, and small enough that no total or share of totals can overflow.
pub const MAX_AMOUNT: Decimal = dec!(1000000000000000);
/// Largest magnitude accepted for a spouse or charity percentage
pub const MAX_SHARE: Decimal = dec!(1000000);

/// Kind of estate holding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AssetType {
    #[default]
    BankAccount,
    LifeInsurance,
    StockShares,
    Crypto,
    Business,
    ExpectedInheritance,
    PremiumBond,
    Pension,
    Property,
    Other,
    Isa,
}

impl AssetType {
    pub const ALL: [AssetType; 11] = [
        AssetType::BankAccount,
        AssetType::LifeInsurance,
        AssetType::StockShares,
        AssetType::Crypto,
        AssetType::Business,
        AssetType::ExpectedInheritance,
        AssetType::PremiumBond,
        AssetType::Pension,
        AssetType::Property,
        AssetType::Other,
        AssetType::Isa,
    ];

    /// Machine name, as used in JSON and CSV input
    pub fn key(&self) -> &'static str {
        match self {
            AssetType::BankAccount => "bank_account",
            AssetType::LifeInsurance => "life_insurance",
            AssetType::StockShares => "stock_shares",
            AssetType::Crypto => "crypto",
            AssetType::Business => "business",
            AssetType::ExpectedInheritance => "expected_inheritance",
            AssetType::PremiumBond => "premium_bond",
            AssetType::Pension => "pension",
            AssetType::Property => "property",
            AssetType::Other => "other",
            AssetType::Isa => "isa",
        }
    }
}

impl FromStr for AssetType {
    type Err = InputError;

    /// Accepts the machine name in any case, with spaces or hyphens in place
    /// of underscores (e.g. "Life Insurance", "premium-bond", "ISA").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = normalise_key(s);
        AssetType::ALL
            .into_iter()
            .find(|t| t.key() == key)
            .ok_or_else(|| InputError::UnknownAssetType(s.to_string()))
    }
}

/// Kind of estate debt. Every kind sums the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum LiabilityType {
    #[default]
    CreditCard,
    /// Debt owed to the tax authority
    Hmrc,
    Loan,
    Mortgage,
    Overdraft,
}

impl LiabilityType {
    pub const ALL: [LiabilityType; 5] = [
        LiabilityType::CreditCard,
        LiabilityType::Hmrc,
        LiabilityType::Loan,
        LiabilityType::Mortgage,
        LiabilityType::Overdraft,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            LiabilityType::CreditCard => "credit_card",
            LiabilityType::Hmrc => "hmrc",
            LiabilityType::Loan => "loan",
            LiabilityType::Mortgage => "mortgage",
            LiabilityType::Overdraft => "overdraft",
        }
    }
}

impl FromStr for LiabilityType {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = normalise_key(s);
        LiabilityType::ALL
            .into_iter()
            .find(|t| t.key() == key)
            .ok_or_else(|| InputError::UnknownLiabilityType(s.to_string()))
    }
}

fn normalise_key(s: &str) -> String {
    s.trim().to_lowercase().replace([' ', '-'], "_")
}

/// One estate holding
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Asset {
    /// Display name
    pub alias: String,
    #[schemars(with = "f64")]
    pub value: Decimal,
    pub asset_type: AssetType,
    /// Legal ownership already transferred to a trust
    pub held_in_trust: bool,
    pub allocated_to_nest: bool,
    pub nest_has_beneficiaries: bool,
    /// Percentage of the value left to a spouse or civil partner
    #[schemars(with = "f64")]
    pub spouse_allocated_share: Decimal,
    /// Percentage of the value left to charity
    #[schemars(with = "f64")]
    pub charity_allocated_share: Decimal,
    /// Qualifies for the residence nil rate band (typically the main home)
    pub residence_nil_rate_band_applicable: bool,
}

impl Asset {
    pub fn new(alias: impl Into<String>, asset_type: AssetType, value: Decimal) -> Self {
        Asset {
            alias: alias.into(),
            value,
            asset_type,
            ..Default::default()
        }
    }

    /// Amount of this asset claimed by the spouse share
    pub fn spousal_value(&self) -> Decimal {
        self.value * (self.spouse_allocated_share / dec!(100))
    }

    /// Amount of this asset claimed by the charity share
    pub fn charitable_value(&self) -> Decimal {
        self.value * (self.charity_allocated_share / dec!(100))
    }

    /// Not yet placed in a nest, or placed in one with nobody to receive it
    pub fn is_unallocated(&self) -> bool {
        !self.allocated_to_nest || !self.nest_has_beneficiaries
    }
}

/// One estate debt
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Liability {
    pub alias: String,
    #[schemars(with = "f64")]
    pub value: Decimal,
    pub liability_type: LiabilityType,
}

impl Liability {
    pub fn new(alias: impl Into<String>, liability_type: LiabilityType, value: Decimal) -> Self {
        Liability {
            alias: alias.into(),
            value,
            liability_type,
        }
    }
}

/// Per-calculation inputs that are not derived from the asset list.
///
/// None of these feed a formula yet; they are carried through to the report.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Supplementary {
    pub total_gifts_made_in_last_7_years: Decimal,
    pub exemption_type_agricultural: bool,
    pub exemption_type_business: bool,
}
