use super::estate::{Asset, AssetType, Liability, Supplementary};
use super::rules::Rules;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

/// Every figure derived from one snapshot of the estate.
///
/// Money is in the single input currency, rates are percentages. Nothing is
/// rounded here; renderers decide on presentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValuationReport {
    pub total_assets_incl_trusts: Decimal,
    pub total_assets_excl_trusts: Decimal,
    pub total_liabilities: Decimal,
    pub life_insurance_value: Decimal,
    pub isa_value: Decimal,

    /// Everything owned, trusts included, less debts
    pub legacy_worth: Decimal,
    /// Legacy worth less life insurance payouts
    pub net_worth: Decimal,
    /// Directly owned assets other than life insurance and ISAs, less debts
    pub estate_value_for_trusts_planning: Decimal,
    /// Directly owned assets less debts
    pub gross_estate_value: Decimal,

    pub nil_rate_band_allowance: Decimal,
    pub residence_nil_rate_band_allowance: Decimal,
    pub total_spousal_value_excl_trusts: Decimal,
    pub total_charitable_value_excl_trusts: Decimal,

    pub is_more_than_10_percent_to_charities: bool,
    pub inheritance_tax_rate: Decimal,
    /// Value left after exemptions and allowances, zero when fully covered
    pub taxable_estate: Decimal,
    pub inheritance_tax_payable: Decimal,

    pub un_allocated_assets: bool,
    pub un_allocated_assets_value: Decimal,

    pub exemption_type_spousal: bool,
    pub exemption_type_charity: bool,
    pub exemption_type_rnrb: bool,
    pub exemption_type_agricultural: bool,
    pub exemption_type_business: bool,
    pub total_gifts_made_in_last_7_years: Decimal,
}

impl ValuationReport {
    /// Nil rate band plus residence nil rate band
    pub fn combined_allowance(&self) -> Decimal {
        self.nil_rate_band_allowance + self.residence_nil_rate_band_allowance
    }
}

/// Value the estate.
///
/// Pure and total: the same snapshot always gives the same report, and no
/// input is rejected. Negative values and shares outside 0..=100 are applied
/// as given. Amounts are expected within [`MAX_AMOUNT`] and shares within
/// [`MAX_SHARE`] (see `EstateInput::check_bounds`); far past those the
/// decimal arithmetic overflows.
///
/// [`MAX_AMOUNT`]: super::estate::MAX_AMOUNT
/// [`MAX_SHARE`]: super::estate::MAX_SHARE
pub fn compute(
    assets: &[Asset],
    liabilities: &[Liability],
    supplementary: &Supplementary,
    rules: &Rules,
) -> ValuationReport {
    let direct = || assets.iter().filter(|a| !a.held_in_trust);

    let total_assets_incl_trusts = sum_values(assets.iter());
    let total_assets_excl_trusts = sum_values(direct());
    let total_liabilities: Decimal = liabilities.iter().map(|l| l.value).sum();
    let life_insurance_value = sum_values(of_type(assets, AssetType::LifeInsurance));
    let isa_value = sum_values(of_type(assets, AssetType::Isa));

    let legacy_worth = total_assets_incl_trusts - total_liabilities;
    let net_worth = total_assets_incl_trusts - total_liabilities - life_insurance_value;
    let estate_value_for_trusts_planning = sum_values(direct().filter(|a| {
        !matches!(a.asset_type, AssetType::LifeInsurance | AssetType::Isa)
    })) - total_liabilities;
    let gross_estate_value = total_assets_excl_trusts - total_liabilities;

    let total_spousal_value_excl_trusts: Decimal = direct()
        .filter(|a| !a.spouse_allocated_share.is_zero())
        .map(Asset::spousal_value)
        .sum();
    let total_charitable_value_excl_trusts: Decimal = direct()
        .filter(|a| !a.charity_allocated_share.is_zero())
        .map(Asset::charitable_value)
        .sum();

    let exemption_type_spousal = total_spousal_value_excl_trusts > Decimal::ZERO;
    let exemption_type_charity = total_charitable_value_excl_trusts > Decimal::ZERO;
    let exemption_type_rnrb = direct().any(|a| a.residence_nil_rate_band_applicable);

    // 0 >= 0 on an estate with nothing in it is not a gift to charity
    let nothing_to_compare =
        total_charitable_value_excl_trusts.is_zero() && gross_estate_value.is_zero();
    let is_more_than_10_percent_to_charities = !nothing_to_compare
        && total_charitable_value_excl_trusts >= gross_estate_value * rules.charity_rate_fraction;
    let inheritance_tax_rate = rules.tax_rate(is_more_than_10_percent_to_charities);

    let nil_rate_band_allowance = rules.nil_rate_band_allowance(total_assets_excl_trusts);
    let residence_nil_rate_band_allowance = if exemption_type_rnrb {
        rules.residence_nil_rate_band
    } else {
        Decimal::ZERO
    };

    log::debug!(
        "Estate excl. trusts {} (band withdrawn at {}): nil rate band {}, residence band {}",
        total_assets_excl_trusts,
        rules.taper_ceiling(),
        nil_rate_band_allowance,
        residence_nil_rate_band_allowance
    );

    let taxable_estate = taxable_estate(
        total_assets_excl_trusts,
        total_spousal_value_excl_trusts,
        total_charitable_value_excl_trusts,
        nil_rate_band_allowance + residence_nil_rate_band_allowance,
    );
    let inheritance_tax_payable = (taxable_estate / dec!(100)) * inheritance_tax_rate;

    log::debug!(
        "Taxable estate {} at {}%: payable {}",
        taxable_estate,
        inheritance_tax_rate,
        inheritance_tax_payable
    );

    let un_allocated_assets = assets.iter().any(Asset::is_unallocated);
    let un_allocated_assets_value = sum_values(assets.iter().filter(|a| a.is_unallocated()));

    ValuationReport {
        total_assets_incl_trusts,
        total_assets_excl_trusts,
        total_liabilities,
        life_insurance_value,
        isa_value,
        legacy_worth,
        net_worth,
        estate_value_for_trusts_planning,
        gross_estate_value,
        nil_rate_band_allowance,
        residence_nil_rate_band_allowance,
        total_spousal_value_excl_trusts,
        total_charitable_value_excl_trusts,
        is_more_than_10_percent_to_charities,
        inheritance_tax_rate,
        taxable_estate,
        inheritance_tax_payable,
        un_allocated_assets,
        un_allocated_assets_value,
        exemption_type_spousal,
        exemption_type_charity,
        exemption_type_rnrb,
        exemption_type_agricultural: supplementary.exemption_type_agricultural,
        exemption_type_business: supplementary.exemption_type_business,
        total_gifts_made_in_last_7_years: supplementary.total_gifts_made_in_last_7_years,
    }
}

/// Directly owned value left after spouse and charity claims, less the
/// combined allowance. Zero when the allowance covers it.
fn taxable_estate(
    total_assets_excl_trusts: Decimal,
    spousal: Decimal,
    charitable: Decimal,
    combined_allowance: Decimal,
) -> Decimal {
    let after_spousal = total_assets_excl_trusts - spousal;
    let after_spousal_and_charity = after_spousal - charitable;

    if after_spousal_and_charity < combined_allowance {
        return Decimal::ZERO;
    }
    after_spousal_and_charity - combined_allowance
}

fn sum_values<'a>(assets: impl Iterator<Item = &'a Asset>) -> Decimal {
    assets.map(|a| a.value).sum()
}

fn of_type(assets: &[Asset], asset_type: AssetType) -> impl Iterator<Item = &Asset> {
    assets.iter().filter(move |a| a.asset_type == asset_type)
}
