use super::estate::{Asset, Liability};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

/// Data-quality findings on estate input.
///
/// The valuation accepts all of these as given; they are surfaced so the
/// person entering the data can decide whether they meant it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum Warning {
    /// Asset value below zero is summed as a reduction.
    NegativeAssetValue {
        alias: String,
        value: Decimal,
    },
    /// Liability value below zero increases the estate.
    NegativeLiabilityValue {
        alias: String,
        value: Decimal,
    },
    /// Spouse or charity percentage outside 0 to 100.
    ShareOutOfRange {
        alias: String,
        share: ShareKind,
        percent: Decimal,
    },
    /// Spouse and charity percentages on one asset add up to more than 100.
    SharesExceedWhole {
        alias: String,
        total_percent: Decimal,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ShareKind {
    Spouse,
    Charity,
}

impl Warning {
    /// Name of the finding, as in the serialised `type` tag
    pub fn name(&self) -> &'static str {
        match self {
            Warning::NegativeAssetValue { .. } => "NegativeAssetValue",
            Warning::NegativeLiabilityValue { .. } => "NegativeLiabilityValue",
            Warning::ShareOutOfRange { .. } => "ShareOutOfRange",
            Warning::SharesExceedWhole { .. } => "SharesExceedWhole",
        }
    }

    /// Asset or liability the finding is about
    pub fn alias(&self) -> &str {
        match self {
            Warning::NegativeAssetValue { alias, .. }
            | Warning::NegativeLiabilityValue { alias, .. }
            | Warning::ShareOutOfRange { alias, .. }
            | Warning::SharesExceedWhole { alias, .. } => alias,
        }
    }
}

impl std::fmt::Display for ShareKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShareKind::Spouse => write!(f, "spouse"),
            ShareKind::Charity => write!(f, "charity"),
        }
    }
}

/// Inspect assets and liabilities, in input order
pub fn check_estate(assets: &[Asset], liabilities: &[Liability]) -> Vec<Warning> {
    let mut warnings = Vec::new();

    for asset in assets {
        if asset.value < Decimal::ZERO {
            warnings.push(Warning::NegativeAssetValue {
                alias: asset.alias.clone(),
                value: asset.value,
            });
        }

        for (share, percent) in [
            (ShareKind::Spouse, asset.spouse_allocated_share),
            (ShareKind::Charity, asset.charity_allocated_share),
        ] {
            if !(Decimal::ZERO..=dec!(100)).contains(&percent) {
                warnings.push(Warning::ShareOutOfRange {
                    alias: asset.alias.clone(),
                    share,
                    percent,
                });
            }
        }

        let total_percent = asset.spouse_allocated_share + asset.charity_allocated_share;
        if total_percent > dec!(100) {
            warnings.push(Warning::SharesExceedWhole {
                alias: asset.alias.clone(),
                total_percent,
            });
        }
    }

    for liability in liabilities {
        if liability.value < Decimal::ZERO {
            warnings.push(Warning::NegativeLiabilityValue {
                alias: liability.alias.clone(),
                value: liability.value,
            });
        }
    }

    log::debug!("Estate check found {} issue(s)", warnings.len());
    warnings
}
