use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Tax-free allowance before any taper
pub const BASE_NIL_RATE_BAND: Decimal = dec!(325000);
/// Extra allowance when a qualifying residence is in the estate
pub const BASE_RESIDENCE_NIL_RATE_BAND: Decimal = dec!(175000);
/// Estate value above which the nil rate band is withdrawn
pub const NIL_RATE_BAND_TAPER_THRESHOLD: Decimal = dec!(2000000);

/// Statutory figures the valuation is computed against.
///
/// `Rules::default()` is the current UK set. Every figure can be overridden
/// independently, which is how the command line exposes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rules {
    pub nil_rate_band: Decimal,
    pub residence_nil_rate_band: Decimal,
    pub taper_threshold: Decimal,
    /// Pounds of excess needed to withdraw one pound of allowance
    pub taper_divisor: Decimal,
    /// Percentage rate
    pub standard_rate: Decimal,
    /// Percentage rate when enough of the estate goes to charity
    pub charity_rate: Decimal,
    /// Fraction of the gross estate that must go to charity for the reduced rate
    pub charity_rate_fraction: Decimal,
}

impl Default for Rules {
    fn default() -> Self {
        Rules {
            nil_rate_band: BASE_NIL_RATE_BAND,
            residence_nil_rate_band: BASE_RESIDENCE_NIL_RATE_BAND,
            taper_threshold: NIL_RATE_BAND_TAPER_THRESHOLD,
            taper_divisor: dec!(2),
            standard_rate: dec!(40),
            charity_rate: dec!(36),
            charity_rate_fraction: dec!(0.1),
        }
    }
}

impl Rules {
    /// Nil rate band after taper for the given estate value (excluding trusts).
    ///
    /// The full band applies up to and including the threshold. Above it the
    /// band shrinks by one pound for every `taper_divisor` pounds of excess,
    /// bottoming out at zero.
    pub fn nil_rate_band_allowance(&self, total_assets_excl_trusts: Decimal) -> Decimal {
        if total_assets_excl_trusts <= self.taper_threshold {
            return self.nil_rate_band;
        }

        let excess = total_assets_excl_trusts - self.taper_threshold;
        let reduction = excess / self.taper_divisor;

        if reduction >= self.nil_rate_band {
            return Decimal::ZERO;
        }

        (self.nil_rate_band - reduction).max(Decimal::ZERO)
    }

    /// Estate value at which the nil rate band is fully withdrawn
    pub fn taper_ceiling(&self) -> Decimal {
        self.taper_threshold + self.nil_rate_band * self.taper_divisor
    }

    pub fn tax_rate(&self, more_than_fraction_to_charity: bool) -> Decimal {
        if more_than_fraction_to_charity {
            self.charity_rate
        } else {
            self.standard_rate
        }
    }
}
