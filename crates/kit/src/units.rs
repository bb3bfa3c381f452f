//! Base-unit conversions for 18-decimal tokens.

use alloy_primitives::{
    U256,
    utils::{UnitsError, parse_ether},
};

/// Decimals shared by CELO and the Celo stable tokens.
pub const TOKEN_DECIMALS: u8 = 18;

fn split(value: U256) -> (U256, String) {
    let scale = U256::from(10u64).pow(U256::from(TOKEN_DECIMALS));
    let whole = value / scale;
    let frac = format!("{:0>18}", (value % scale).to_string());
    (whole, frac)
}

/// Converts base units to display units, trimming trailing zeros:
/// `1500000000000000000` becomes `"1.5"`.
pub fn from_wei(value: U256) -> String {
    let (whole, frac) = split(value);
    let frac = frac.trim_end_matches('0');
    if frac.is_empty() { whole.to_string() } else { format!("{whole}.{frac}") }
}

/// Converts base units to display units at exactly two decimal places,
/// rounding half-up: `1500000000000000000` becomes `"1.50"` and
/// `1259000000000000000` becomes `"1.26"`.
pub fn to_fixed2(value: U256) -> String {
    // Half of the second decimal place, so truncation after the add rounds
    // half-up.
    let half = U256::from(5u64) * U256::from(10u64).pow(U256::from(TOKEN_DECIMALS - 3));
    let (whole, frac) = split(value.saturating_add(half));
    format!("{whole}.{}", &frac[..2])
}

/// Parses a display-unit amount such as `"0.1"` into base units.
pub fn to_wei(amount: &str) -> Result<U256, UnitsError> {
    parse_ether(amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("1500000000000000000", "1.50")]
    #[case("1000000000000000000", "1.00")]
    #[case("10000000000000000", "0.01")]
    #[case("123456789000000000000", "123.46")]
    #[case("1259000000000000000", "1.26")]
    #[case("1254999999999999999", "1.25")]
    #[case("1255000000000000000", "1.26")]
    #[case("995000000000000000", "1.00")]
    #[case("0", "0.00")]
    fn formats_two_decimals(#[case] raw: &str, #[case] display: &str) {
        let value: U256 = raw.parse().unwrap();
        assert_eq!(to_fixed2(value), display);
        // unchanged input, unchanged output
        assert_eq!(to_fixed2(value), to_fixed2(value));
    }

    #[rstest]
    #[case("1500000000000000000", "1.5")]
    #[case("1000000000000000000", "1")]
    #[case("100000000000000000", "0.1")]
    #[case("1", "0.000000000000000001")]
    #[case("0", "0")]
    fn formats_full_precision(#[case] raw: &str, #[case] display: &str) {
        let value: U256 = raw.parse().unwrap();
        assert_eq!(from_wei(value), display);
    }

    #[test]
    fn parses_display_units() {
        assert_eq!(to_wei("0.1").unwrap(), U256::from(100_000_000_000_000_000u128));
        assert_eq!(to_wei("1.5").unwrap(), "1500000000000000000".parse::<U256>().unwrap());
        assert!(to_wei("not a number").is_err());
    }
}
