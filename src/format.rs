use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Format an amount as a US-style currency string, e.g. `-$1,234.50`.
///
/// Always two decimal places, thousands grouped with commas, the sign in
/// front of the currency symbol.
pub fn format_currency(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let magnitude = rounded.abs();
    let whole = magnitude.trunc();
    let cents = ((magnitude - whole) * Decimal::ONE_HUNDRED)
        .to_u32()
        .unwrap_or(0);
    format!("{sign}${}.{cents:02}", group_thousands(&whole.to_string()))
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (position, digit) in digits.chars().enumerate() {
        if position > 0 && (digits.len() - position) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("1234.56", "$1,234.56")]
    #[case("-999.99", "-$999.99")]
    #[case("0", "$0.00")]
    #[case("1234567.89", "$1,234,567.89")]
    #[case("100", "$100.00")]
    #[case("1000", "$1,000.00")]
    #[case("5000", "$5,000.00")]
    fn formats_amounts(#[case] amount: &str, #[case] expected: &str) {
        let amount = Decimal::from_str_exact(amount).unwrap();
        assert_eq!(format_currency(amount), expected);
    }

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(
            format_currency(Decimal::from_str_exact("1234.567").unwrap()),
            "$1,234.57"
        );
        assert_eq!(
            format_currency(Decimal::from_str_exact("0.125").unwrap()),
            "$0.13"
        );
        assert_eq!(
            format_currency(Decimal::from_str_exact("-0.125").unwrap()),
            "-$0.13"
        );
    }

    #[test]
    fn negative_amount_rounding_to_zero_drops_the_sign() {
        assert_eq!(
            format_currency(Decimal::from_str_exact("-0.001").unwrap()),
            "$0.00"
        );
    }
}
