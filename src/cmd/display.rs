//! Presentation helpers shared by the commands

use crate::core::{AssetType, LiabilityType};
use rust_decimal::{Decimal, RoundingStrategy};

pub fn asset_type_label(asset_type: AssetType) -> &'static str {
    match asset_type {
        AssetType::BankAccount => "bank account",
        AssetType::LifeInsurance => "life insurance",
        AssetType::StockShares => "stock shares",
        AssetType::Crypto => "crypto",
        AssetType::Business => "business",
        AssetType::ExpectedInheritance => "expected inheritance",
        AssetType::PremiumBond => "premium bond",
        AssetType::Pension => "pension",
        AssetType::Property => "property",
        AssetType::Other => "other",
        AssetType::Isa => "ISA",
    }
}

pub fn liability_type_label(liability_type: LiabilityType) -> &'static str {
    match liability_type {
        LiabilityType::CreditCard => "credit card",
        LiabilityType::Hmrc => "HMRC",
        LiabilityType::Loan => "loan",
        LiabilityType::Mortgage => "mortgage",
        LiabilityType::Overdraft => "overdraft",
    }
}

/// £ with thousands separators, rounded to the nearest penny, e.g. £1,234,567.89
pub fn format_gbp(amount: Decimal) -> String {
    let pence = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let fixed = format!("{:.2}", pence.abs());
    let (whole, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if pence < Decimal::ZERO { "-" } else { "" };
    format!("{sign}£{grouped}.{frac}")
}

pub fn format_percentage(percent: Decimal) -> String {
    format!("{}%", percent.normalize())
}

pub fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}
