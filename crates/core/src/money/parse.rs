//! Legacy amount-string parsing.
//!
//! This is the narrow parser older callers rely on: it always assumes two
//! implied fractional digits, whatever the currency. Use a
//! [`MoneyParser`](crate::format::MoneyParser) for anything else.

use coinage_shared::{MoneyError, MoneyResult};
use num_bigint::BigInt;
use once_cell::sync::Lazy;
use regex::Regex;

static AMOUNT_PATTERN: Lazy<Result<Regex, regex::Error>> = Lazy::new(|| {
    Regex::new(
        r"^(?P<sign>[-+])?(?P<digits>[0-9]*)(?P<separator>[.,])?(?P<decimal1>[0-9])?(?P<decimal2>[0-9])?$",
    )
});

const PARSE_FAILURE: &str = "The value could not be parsed as money";

/// Parses `"12.5"`-style strings into minor units with two implied digits.
///
/// Accepts an optional sign, a digit run, an optional `.` or `,` separator
/// and at most two fractional digits, surrounded by optional whitespace.
/// `"12.5"` is `1250`, `"-3"` is `-300`, `",5"` is `50`.
///
/// # Errors
///
/// `InvalidArgument` for anything else, including strings without a digit.
pub fn parse_to_minor_units(value: &str) -> MoneyResult<BigInt> {
    let pattern = AMOUNT_PATTERN
        .as_ref()
        .map_err(|err| MoneyError::InvalidArgument(err.to_string()))?;
    let invalid = || MoneyError::InvalidArgument(format!("{PARSE_FAILURE}: '{value}'"));

    let captures = pattern.captures(value.trim()).ok_or_else(invalid)?;
    let group = |name: &str| captures.name(name).map_or("", |m| m.as_str());

    let (digits, decimal1, decimal2) = (group("digits"), group("decimal1"), group("decimal2"));
    if digits.is_empty() && decimal1.is_empty() {
        return Err(invalid());
    }

    let sign = if group("sign") == "-" { "-" } else { "" };
    let units = format!(
        "{sign}{digits}{}{}",
        if decimal1.is_empty() { "0" } else { decimal1 },
        if decimal2.is_empty() { "0" } else { decimal2 },
    );
    units.parse().map_err(|_| invalid())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("12.5", 1250)]
    #[case("-3", -300)]
    #[case("1000", 100_000)]
    #[case("0.01", 1)]
    #[case("+7,25", 725)]
    #[case(" 42 ", 4200)]
    #[case("5.", 500)]
    #[case(",5", 50)]
    #[case("-0", 0)]
    fn test_parse_to_minor_units(#[case] input: &str, #[case] expected: i64) {
        assert_eq!(parse_to_minor_units(input).unwrap(), BigInt::from(expected));
    }

    #[rstest]
    #[case("abc")]
    #[case("")]
    #[case("-")]
    #[case(".")]
    #[case("1.234")]
    #[case("1.2.3")]
    #[case("1 000")]
    #[case("١٢")]
    fn test_rejects_unparseable(#[case] input: &str) {
        let err = parse_to_minor_units(input).unwrap_err();
        assert!(matches!(err, MoneyError::InvalidArgument(ref message)
            if message.starts_with("The value could not be parsed as money")));
    }
}
