//! Fixed-point USDT amount helpers.
//!
//! All amounts in the system are `rust_decimal::Decimal` values normalized to
//! 8 fractional digits. Deposit attribution relies on exact decimal equality
//! between the allocated payable amount and the observed on-chain amount, so
//! every amount entering the matching path must pass through [`normalize`].

use rust_decimal::Decimal;

/// Fractional digits carried by every USDT amount.
pub const USDT_SCALE: u32 = 8;

/// Normalize an amount to the canonical 8-digit scale.
///
/// Amounts with more than 8 fractional digits are rounded (banker's rounding,
/// the `rust_decimal` default). Amounts with fewer are zero-padded.
pub fn normalize(value: Decimal) -> Decimal {
    let mut value = value;
    value.rescale(USDT_SCALE);
    value
}

/// Convert an amount to integer units of 1e-8 USDT.
///
/// Returns `None` if the value carries sub-unit precision (more than 8
/// fractional digits) or does not fit in an `i64`.
pub fn usdt_to_units(value: Decimal) -> Option<i64> {
    let normalized = normalize(value);
    if normalized != value {
        return None;
    }
    i64::try_from(normalized.mantissa()).ok()
}

/// Convert integer units of 1e-8 USDT back to a decimal amount.
pub fn units_to_usdt(units: i64) -> Decimal {
    Decimal::new(units, USDT_SCALE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_units_round_trip() {
        for raw in ["99.97", "30", "20000", "0.00000001", "123.45678901"] {
            let value = Decimal::from_str(raw).unwrap();
            let units = usdt_to_units(value).unwrap();
            assert_eq!(units_to_usdt(units), value, "round trip failed for {raw}");
        }
    }

    #[test]
    fn test_normalize_pads_scale() {
        let value = Decimal::from_str("99.97").unwrap();
        assert_eq!(normalize(value).scale(), USDT_SCALE);
        assert_eq!(normalize(value), value);
    }

    #[test]
    fn test_sub_unit_precision_rejected() {
        let value = Decimal::from_str("0.000000001").unwrap();
        assert_eq!(usdt_to_units(value), None);
    }

    #[test]
    fn test_unit_values() {
        let value = Decimal::from_str("99.97").unwrap();
        assert_eq!(usdt_to_units(value), Some(9_997_000_000));
    }
}
