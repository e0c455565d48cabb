pub mod days;
pub mod penalty;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::RateConfig;
use crate::decimal::Money;
use crate::errors::{DocumentError, Result};
use crate::types::{DebtStatus, ItemId};

pub use days::{ceil_days, days_late, days_late_between, is_overdue, parse_optional_date};
pub use penalty::{LateFeeEngine, PenaltyCalculation};

/// one line of a late-fee statement, immutable once computed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtItem {
    pub id: ItemId,
    pub title: String,
    pub original_value: Money,
    pub due_date: Option<NaiveDate>,
    pub paid_date: Option<NaiveDate>,
    pub is_paid: bool,
    pub fine_amount: Money,
    pub interest_amount: Money,
    pub total_before_discount: Money,
    pub discount_percent: Decimal,
    pub discount_amount: Money,
    pub amount_due: Money,
    pub days_late: u32,
    pub status: DebtStatus,
}

impl DebtItem {
    /// fine and interest together, as printed on the statement
    pub fn penalty_total(&self) -> Result<Money> {
        self.fine_amount
            .checked_add(self.interest_amount)
            .ok_or_else(|| DocumentError::overflow("penalty"))
    }
}

/// parsed inputs for one line item
#[derive(Debug, Clone, PartialEq)]
pub struct LineItemRequest {
    pub title: Option<String>,
    pub principal: Money,
    pub due_date: Option<NaiveDate>,
    pub paid_date: Option<NaiveDate>,
    pub is_paid: bool,
    pub discount_percent: Decimal,
}

impl LineItemRequest {
    pub fn new(principal: Money) -> Self {
        Self {
            title: None,
            principal,
            due_date: None,
            paid_date: None,
            is_paid: false,
            discount_percent: Decimal::ZERO,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn due_date(mut self, date: NaiveDate) -> Self {
        self.due_date = Some(date);
        self
    }

    pub fn paid_date(mut self, date: NaiveDate) -> Self {
        self.paid_date = Some(date);
        self
    }

    pub fn paid(mut self, is_paid: bool) -> Self {
        self.is_paid = is_paid;
        self
    }

    pub fn discount_percent(mut self, percent: Decimal) -> Self {
        self.discount_percent = percent;
        self
    }
}

/// raw form fields for one line item, as typed by the user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineItemInput {
    pub title: String,
    pub value: String,
    pub due_date: String,
    pub paid_date: String,
    pub is_paid: bool,
    pub discount: String,
}

impl LineItemInput {
    /// parse the form fields, rejecting an unusable principal or date
    pub fn parse(&self) -> Result<LineItemRequest> {
        let principal = parse_principal(&self.value)?;
        let title = match self.title.trim() {
            "" => None,
            t => Some(t.to_string()),
        };

        Ok(LineItemRequest {
            title,
            principal,
            due_date: parse_optional_date(&self.due_date)?,
            paid_date: parse_optional_date(&self.paid_date)?,
            is_paid: self.is_paid,
            discount_percent: parse_percent_or_zero(&self.discount),
        })
    }
}

/// parse a principal, which must be a positive number
pub fn parse_principal(input: &str) -> Result<Money> {
    match Money::from_str_exact(input) {
        Ok(value) if value.is_positive() => Ok(value),
        _ => {
            warn!(input, "rejected principal");
            Err(DocumentError::InvalidAmount {
                input: input.to_string(),
            })
        }
    }
}

/// parse an optional percentage field from its leading number ("10abc" reads as 10);
/// blank or non-numeric counts as zero
pub fn parse_percent_or_zero(input: &str) -> Decimal {
    leading_number(input.trim()).unwrap_or(Decimal::ZERO)
}

/// optional sign, digits and an optional fraction at the start of `input`
fn leading_number(input: &str) -> Option<Decimal> {
    let (sign, rest) = match input.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", input.strip_prefix('+').unwrap_or(input)),
    };

    let int_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    let (int_part, after) = rest.split_at(int_len);
    let frac_part = match after.strip_prefix('.') {
        Some(frac) => &frac[..frac.bytes().take_while(u8::is_ascii_digit).count()],
        None => "",
    };

    let number = match (int_part, frac_part) {
        ("", "") => return None,
        (int_part, "") => format!("{}{}", sign, int_part),
        ("", frac_part) => format!("{}0.{}", sign, frac_part),
        (int_part, frac_part) => format!("{}{}.{}", sign, int_part, frac_part),
    };
    number.parse().ok()
}

/// placeholder title for the item at a 1-based position
pub fn placeholder_title(position: usize) -> String {
    format!("Item #{}", position)
}

/// late-fee calculator bound to one set of rates
#[derive(Debug, Clone)]
pub struct LateFeeCalculator {
    engine: LateFeeEngine,
}

impl Default for LateFeeCalculator {
    fn default() -> Self {
        Self {
            engine: LateFeeEngine::default(),
        }
    }
}

impl LateFeeCalculator {
    /// create a calculator; negative rates are rejected
    pub fn new(rates: RateConfig) -> Result<Self> {
        Ok(Self {
            engine: LateFeeEngine::new(rates)?,
        })
    }

    pub fn rates(&self) -> &RateConfig {
        self.engine.config()
    }

    /// compute a line item; `position` is the 1-based slot used for the placeholder title
    pub fn compute(&self, request: &LineItemRequest, position: usize) -> Result<DebtItem> {
        let principal = request.principal;
        if !principal.is_positive() {
            warn!(%principal, "rejected non-positive principal");
            return Err(DocumentError::InvalidAmount {
                input: principal.to_string(),
            });
        }

        let discount_percent = request.discount_percent;
        if discount_percent < Decimal::ZERO || discount_percent > Decimal::ONE_HUNDRED {
            warn!(%discount_percent, "rejected discount");
            return Err(DocumentError::InvalidDiscount {
                percent: discount_percent,
            });
        }

        let title = request
            .title
            .clone()
            .unwrap_or_else(|| placeholder_title(position));

        let (status, penalty) = if request.is_paid {
            (DebtStatus::Paid, self.engine.calculate_penalty(principal, 0)?)
        } else if is_overdue(request.due_date, request.paid_date) {
            let days = match (request.due_date, request.paid_date) {
                (Some(due), Some(paid)) => days_late(due, paid),
                _ => 0,
            };
            (DebtStatus::Overdue, self.engine.calculate_penalty(principal, days)?)
        } else {
            // one date alone is not enough to call it late
            (DebtStatus::NotYetDue, self.engine.calculate_penalty(principal, 0)?)
        };

        let total_before_discount = penalty.total_with_principal()?;
        let (discount_amount, amount_due) = match status {
            DebtStatus::Paid => (Money::ZERO, Money::ZERO),
            _ => {
                let discount = total_before_discount
                    .percentage(discount_percent)
                    .ok_or_else(|| DocumentError::overflow("discount"))?;
                let due = total_before_discount
                    .checked_sub(discount)
                    .ok_or_else(|| DocumentError::overflow("amount due"))?;
                (discount, due)
            }
        };

        let item = DebtItem {
            id: Uuid::new_v4(),
            title,
            original_value: principal,
            due_date: request.due_date,
            paid_date: request.paid_date,
            is_paid: request.is_paid,
            fine_amount: penalty.fine_amount,
            interest_amount: penalty.interest_amount,
            total_before_discount,
            discount_percent,
            discount_amount,
            amount_due,
            days_late: penalty.days_charged,
            status,
        };

        debug!(
            title = %item.title,
            status = ?item.status,
            days_late = item.days_late,
            amount_due = %item.amount_due,
            "computed line item"
        );

        Ok(item)
    }

    /// parse raw form fields and compute the line item
    pub fn compute_input(&self, input: &LineItemInput, position: usize) -> Result<DebtItem> {
        let request = input.parse()?;
        self.compute(&request, position)
    }
}

/// compute one line item from explicit inputs and rates
pub fn compute_line_item(
    principal: Money,
    due_date: Option<NaiveDate>,
    paid_date: Option<NaiveDate>,
    is_paid: bool,
    rates: &RateConfig,
    discount_percent: Decimal,
) -> Result<DebtItem> {
    let request = LineItemRequest {
        title: None,
        principal,
        due_date,
        paid_date,
        is_paid,
        discount_percent,
    };
    LateFeeCalculator::new(*rates)?.compute(&request, 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn overdue_request(discount: Decimal) -> LineItemRequest {
        LineItemRequest::new(Money::from_major(1_000))
            .due_date(date(2024, 1, 1))
            .paid_date(date(2024, 1, 11))
            .discount_percent(discount)
    }

    #[test]
    fn test_overdue_item() {
        let calc = LateFeeCalculator::default();
        let item = calc.compute(&overdue_request(dec!(0)), 1).unwrap();

        assert_eq!(item.status, DebtStatus::Overdue);
        assert_eq!(item.days_late, 10);
        assert_eq!(item.fine_amount, Money::from_major(100));
        assert_eq!(item.interest_amount, Money::from_major(3));
        assert_eq!(item.total_before_discount, Money::from_major(1_103));
        assert_eq!(item.amount_due, Money::from_major(1_103));
        assert_eq!(item.penalty_total().unwrap(), Money::from_major(103));
    }

    #[test]
    fn test_overdue_item_with_discount() {
        let calc = LateFeeCalculator::default();
        let item = calc.compute(&overdue_request(dec!(10)), 1).unwrap();

        assert_eq!(item.discount_amount, Money::from_decimal(dec!(110.30)));
        assert_eq!(item.amount_due, Money::from_decimal(dec!(992.70)));
    }

    #[test]
    fn test_paid_flag_wins_over_dates() {
        let calc = LateFeeCalculator::default();
        let request = overdue_request(dec!(50)).paid(true);
        let item = calc.compute(&request, 1).unwrap();

        assert_eq!(item.status, DebtStatus::Paid);
        assert_eq!(item.amount_due, Money::ZERO);
        assert_eq!(item.fine_amount, Money::ZERO);
        assert_eq!(item.interest_amount, Money::ZERO);
        assert_eq!(item.discount_amount, Money::ZERO);
        assert_eq!(item.total_before_discount, Money::from_major(1_000));
        assert_eq!(item.days_late, 0);
    }

    #[test]
    fn test_paid_flag_ignores_rates() {
        let rates = RateConfig::new(dec!(50), dec!(5)).unwrap();
        let item = compute_line_item(
            Money::from_major(80),
            Some(date(2020, 1, 1)),
            Some(date(2024, 1, 1)),
            true,
            &rates,
            dec!(0),
        )
        .unwrap();

        assert_eq!(item.status, DebtStatus::Paid);
        assert!(item.amount_due.is_zero());
    }

    #[test]
    fn test_same_day_payment_not_overdue() {
        let calc = LateFeeCalculator::default();
        let request = LineItemRequest::new(Money::from_major(1_000))
            .due_date(date(2024, 1, 1))
            .paid_date(date(2024, 1, 1));
        let item = calc.compute(&request, 1).unwrap();

        assert_eq!(item.status, DebtStatus::NotYetDue);
        assert_eq!(item.days_late, 0);
        assert_eq!(item.amount_due, Money::from_major(1_000));
    }

    #[test]
    fn test_not_yet_due_applies_discount_to_principal() {
        let calc = LateFeeCalculator::default();
        let request = LineItemRequest::new(Money::from_major(1_000))
            .due_date(date(2024, 1, 11))
            .paid_date(date(2024, 1, 1))
            .discount_percent(dec!(25));
        let item = calc.compute(&request, 1).unwrap();

        assert_eq!(item.status, DebtStatus::NotYetDue);
        assert_eq!(item.fine_amount, Money::ZERO);
        assert_eq!(item.interest_amount, Money::ZERO);
        assert_eq!(item.amount_due, Money::from_major(750));
    }

    #[test]
    fn test_single_date_treated_as_not_overdue() {
        let calc = LateFeeCalculator::default();

        let only_due = LineItemRequest::new(Money::from_major(200)).due_date(date(2020, 1, 1));
        let only_paid = LineItemRequest::new(Money::from_major(200)).paid_date(date(2030, 1, 1));

        for request in [only_due, only_paid] {
            let item = calc.compute(&request, 1).unwrap();
            assert_eq!(item.status, DebtStatus::NotYetDue);
            assert_eq!(item.amount_due, Money::from_major(200));
        }
    }

    #[test]
    fn test_invalid_principal_rejected() {
        let calc = LateFeeCalculator::default();

        for value in ["0", "-10", "abc", ""] {
            let input = LineItemInput {
                value: value.to_string(),
                ..Default::default()
            };
            assert!(matches!(
                calc.compute_input(&input, 1),
                Err(DocumentError::InvalidAmount { .. })
            ));
        }

        let zero = LineItemRequest::new(Money::ZERO);
        assert!(calc.compute(&zero, 1).is_err());
    }

    #[test]
    fn test_discount_out_of_range_rejected() {
        let calc = LateFeeCalculator::default();
        let request = LineItemRequest::new(Money::from_major(10)).discount_percent(dec!(120));

        assert_eq!(
            calc.compute(&request, 1).unwrap_err(),
            DocumentError::InvalidDiscount { percent: dec!(120) }
        );
    }

    #[test]
    fn test_input_parsing() {
        let calc = LateFeeCalculator::default();
        let input = LineItemInput {
            title: "  ".to_string(),
            value: "1000".to_string(),
            due_date: "2024-01-01".to_string(),
            paid_date: "2024-01-11".to_string(),
            is_paid: false,
            discount: "ten".to_string(),
        };
        let item = calc.compute_input(&input, 3).unwrap();

        assert_eq!(item.title, "Item #3");
        assert_eq!(item.discount_percent, Decimal::ZERO);
        assert_eq!(item.amount_due, Money::from_major(1_103));
    }

    #[test]
    fn test_malformed_date_rejected() {
        let input = LineItemInput {
            value: "10".to_string(),
            due_date: "yesterday".to_string(),
            ..Default::default()
        };

        assert!(matches!(input.parse(), Err(DocumentError::InvalidDate { .. })));
    }

    #[test]
    fn test_custom_rates() {
        let rates = RateConfig::new(dec!(2), dec!(0.033)).unwrap();
        let item = compute_line_item(
            Money::from_major(500),
            Some(date(2024, 3, 1)),
            Some(date(2024, 3, 31)),
            false,
            &rates,
            dec!(0),
        )
        .unwrap();

        assert_eq!(item.days_late, 30);
        assert_eq!(item.fine_amount, Money::from_major(10));
        // 500 * 0.00033 * 30
        assert_eq!(item.interest_amount, Money::from_decimal(dec!(4.95)));
        assert_eq!(item.amount_due, Money::from_decimal(dec!(514.95)));
    }

    #[test]
    fn test_discount_reads_leading_number() {
        assert_eq!(parse_percent_or_zero("10abc"), dec!(10));
        assert_eq!(parse_percent_or_zero(" 12.5% "), dec!(12.5));
        assert_eq!(parse_percent_or_zero(".5"), dec!(0.5));
        assert_eq!(parse_percent_or_zero("-3"), dec!(-3));
        assert_eq!(parse_percent_or_zero("abc"), Decimal::ZERO);
        assert_eq!(parse_percent_or_zero(""), Decimal::ZERO);
        assert_eq!(parse_percent_or_zero("-"), Decimal::ZERO);
    }

    #[test]
    fn test_huge_principal_is_rejected() {
        let calc = LateFeeCalculator::default();
        let input = LineItemInput {
            value: "79000000000000000000000000000".to_string(),
            due_date: "2024-01-01".to_string(),
            paid_date: "2024-01-11".to_string(),
            ..Default::default()
        };

        assert!(matches!(
            calc.compute_input(&input, 1),
            Err(DocumentError::AmountOverflow { .. })
        ));

        // not overdue, so the same principal fits
        let on_time = LineItemInput {
            paid_date: String::new(),
            ..input
        };
        assert!(calc.compute_input(&on_time, 1).is_ok());
    }

    #[test]
    fn test_calculator_rejects_negative_rates() {
        let rates = RateConfig {
            fine_rate_percent: dec!(10),
            daily_interest_rate_percent: dec!(-0.03),
        };

        assert_eq!(
            LateFeeCalculator::new(rates).unwrap_err(),
            DocumentError::InvalidRate { rate: dec!(-0.03) }
        );
        assert!(compute_line_item(Money::from_major(10), None, None, false, &rates, dec!(0)).is_err());
    }
}
