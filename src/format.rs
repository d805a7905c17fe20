use rust_decimal::{Decimal, RoundingStrategy};

use crate::config::DisplayConfig;

/// Format an amount for human display.
///
/// - When `currency_decimals` is set, the value is rounded (half away from
///   zero) and padded to exactly that many decimal places.
/// - Otherwise trailing zeros are stripped (`Decimal::normalize()`).
///
/// This never changes stored or exported values; it only affects the
/// `*_display` fields and CLI surfaces.
pub fn format_amount(value: Decimal, display: &DisplayConfig) -> String {
    let rendered = match display.currency_decimals {
        Some(dp) => {
            let mut rounded =
                value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
            rounded.rescale(dp);
            rounded
        }
        None => value.normalize(),
    };

    let negative = rendered.is_sign_negative() && !rendered.is_zero();
    let mut out = String::new();
    if negative {
        out.push('-');
    }
    if let Some(symbol) = &display.currency_symbol {
        out.push_str(symbol);
    }
    out.push_str(&rendered.abs().to_string());
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn display(decimals: Option<u32>, symbol: Option<&str>) -> DisplayConfig {
        DisplayConfig {
            currency_decimals: decimals,
            currency_symbol: symbol.map(str::to_string),
        }
    }

    #[test]
    fn pads_to_fixed_decimal_places() {
        let d = Decimal::from_str("100").unwrap();
        assert_eq!(format_amount(d, &display(Some(2), None)), "100.00");
    }

    #[test]
    fn rounds_half_away_from_zero() {
        let d = Decimal::from_str("10.005").unwrap();
        assert_eq!(format_amount(d, &display(Some(2), None)), "10.01");
    }

    #[test]
    fn strips_trailing_zeros_without_precision() {
        let d = Decimal::from_str("10.500").unwrap();
        assert_eq!(format_amount(d, &display(None, None)), "10.5");
    }

    #[test]
    fn negative_sign_precedes_symbol() {
        let d = Decimal::from_str("-12.5").unwrap();
        assert_eq!(format_amount(d, &display(Some(2), Some("$"))), "-$12.50");
    }
}
