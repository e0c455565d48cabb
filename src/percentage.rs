use rust_decimal::Decimal;

use crate::decimal::Money;
use crate::errors::{DocumentError, Result};

fn two_places(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp(2);
    rounded.rescale(2);
    rounded
}

/// parse a calculator field
pub fn parse_number(input: &str) -> Result<Decimal> {
    input
        .trim()
        .parse::<Decimal>()
        .map_err(|_| DocumentError::InvalidNumber {
            input: input.to_string(),
        })
}

fn too_large(operation: &str, value: Decimal) -> DocumentError {
    DocumentError::InvalidNumber {
        input: format!("{} of {}", operation, value),
    }
}

/// `percent`% of `value`
pub fn percent_of(percent: Decimal, value: Decimal) -> Result<Money> {
    Money::from_decimal(value)
        .percentage(percent)
        .map(|amount| amount.round_cents())
        .ok_or_else(|| too_large("percent_of", value))
}

/// what percentage `part` is of `whole`
pub fn ratio_percent(part: Decimal, whole: Decimal) -> Result<Decimal> {
    if whole.is_zero() {
        return Err(DocumentError::DivisionByZero {
            operation: "ratio_percent".to_string(),
        });
    }
    part.checked_div(whole)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .map(two_places)
        .ok_or_else(|| too_large("ratio_percent", part))
}

/// relative change from `from` to `to`, in percent
pub fn percent_change(from: Decimal, to: Decimal) -> Result<Decimal> {
    if from.is_zero() {
        return Err(DocumentError::DivisionByZero {
            operation: "percent_change".to_string(),
        });
    }
    to.checked_sub(from)
        .and_then(|delta| delta.checked_div(from))
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .map(two_places)
        .ok_or_else(|| too_large("percent_change", to))
}
