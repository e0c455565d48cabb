//! serializable preview views handed to the presentation layer
use chrono::{DateTime, NaiveDate, Utc};
use hourglass_rs::SafeTimeProvider;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::errors::{DocumentError, Result};
use crate::late_fee::DebtItem;
use crate::statement::{Statement, StatementTotals};
use crate::types::{DebtStatus, DocumentId, DocumentKind, Issuer, Language, PaymentMethod};

/// a document that can be rendered for preview
pub trait DocumentPreview {
    type View: Serialize;

    fn kind(&self) -> DocumentKind;

    /// validate required fields and build the view
    fn preview(&mut self, time: &SafeTimeProvider) -> Result<Self::View>;

    /// preview with system time
    fn preview_now(&mut self) -> Result<Self::View> {
        let time = SafeTimeProvider::new(hourglass_rs::TimeSource::System);
        self.preview(&time)
    }

    fn preview_json(&mut self, time: &SafeTimeProvider) -> Result<String> {
        let view = self.preview(time)?;
        to_json_pretty(&view)
    }
}

pub fn to_json_pretty<T: Serialize>(view: &T) -> Result<String> {
    serde_json::to_string_pretty(view).map_err(|e| DocumentError::InvalidConfiguration {
        message: format!("JSON error: {}", e),
    })
}

/// dates on printed documents read day first
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

pub(crate) fn require_issuer(issuer: &Option<Issuer>) -> Result<&Issuer> {
    issuer.as_ref().ok_or(DocumentError::MissingField { field: "issuer" })
}

pub(crate) fn require_text<'a>(value: &'a str, field: &'static str) -> Result<&'a str> {
    match value.trim() {
        "" => Err(DocumentError::MissingField { field }),
        trimmed => Ok(trimmed),
    }
}

pub(crate) fn require_items(len: usize) -> Result<()> {
    if len == 0 {
        return Err(DocumentError::MissingField { field: "items" });
    }
    Ok(())
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatementView {
    pub id: DocumentId,
    pub kind: DocumentKind,
    pub language: Language,
    pub issuer: Issuer,
    pub client: String,
    pub generated_at: DateTime<Utc>,
    pub fine_rate_percent: Decimal,
    pub daily_interest_rate_percent: Decimal,
    pub items: Vec<DebtItemView>,
    pub totals: StatementTotals,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DebtItemView {
    pub title: String,
    pub status: DebtStatus,
    pub status_label: String,
    pub original_value: Money,
    pub due_date: Option<NaiveDate>,
    pub paid_date: Option<NaiveDate>,
    pub days_late: u32,
    pub fine_and_interest: Money,
    pub discount_amount: Money,
    pub amount_due: Money,
}

impl DebtItemView {
    pub fn from_item(item: &DebtItem, language: Language) -> Result<Self> {
        Ok(DebtItemView {
            title: item.title.clone(),
            status: item.status,
            status_label: item.status.label(language).to_string(),
            original_value: item.original_value.round_cents(),
            due_date: item.due_date,
            paid_date: item.paid_date,
            days_late: item.days_late,
            fine_and_interest: item.penalty_total()?.round_cents(),
            discount_amount: item.discount_amount.round_cents(),
            amount_due: item.amount_due.round_cents(),
        })
    }
}

impl StatementView {
    pub fn from_statement(
        statement: &Statement,
        issuer: &Issuer,
        client: &str,
        generated_at: DateTime<Utc>,
    ) -> Result<Self> {
        let totals = statement.totals()?;
        let items = statement
            .items()
            .iter()
            .map(|item| DebtItemView::from_item(item, statement.language))
            .collect::<Result<Vec<_>>>()?;

        Ok(StatementView {
            id: statement.id,
            kind: DocumentKind::LateFeeStatement,
            language: statement.language,
            issuer: issuer.clone(),
            client: client.to_string(),
            generated_at,
            fine_rate_percent: statement.rates().fine_rate_percent,
            daily_interest_rate_percent: statement.rates().daily_interest_rate_percent,
            items,
            totals: StatementTotals {
                principal: totals.principal.round_cents(),
                fines: totals.fines.round_cents(),
                interest: totals.interest.round_cents(),
                discounts: totals.discounts.round_cents(),
                amount_due: totals.amount_due.round_cents(),
                overdue_count: totals.overdue_count,
            },
        })
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NegotiationView {
    pub id: DocumentId,
    pub kind: DocumentKind,
    pub issuer: Issuer,
    pub client: String,
    pub generated_at: DateTime<Utc>,
    pub items: Vec<InvoiceLineView>,
    pub subtotal: Money,
    pub discount_percent: Decimal,
    pub discount_amount: Money,
    pub final_amount: Money,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct InvoiceLineView {
    pub title: String,
    pub value: Money,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReceiptView {
    pub id: DocumentId,
    pub kind: DocumentKind,
    pub issuer: Issuer,
    pub client: String,
    pub generated_at: DateTime<Utc>,
    pub payment_date: Option<String>,
    pub notes: Option<String>,
    pub items: Vec<ReceiptLineView>,
    pub total: Money,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReceiptLineView {
    pub description: String,
    pub plan: String,
    pub method: PaymentMethod,
    pub method_label: String,
    pub value: Money,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CancellationView {
    pub id: DocumentId,
    pub kind: DocumentKind,
    pub issuer: Issuer,
    pub client: String,
    pub generated_at: DateTime<Utc>,
    pub service: String,
    pub cancellation_date: String,
    pub reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::late_fee::LineItemInput;
    use chrono::TimeZone;
    use hourglass_rs::TimeSource;

    #[test]
    fn test_format_date_day_first() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(format_date(date), "09/03/2024");
    }

    #[test]
    fn test_require_text_trims() {
        assert_eq!(require_text("  Acme ", "client").unwrap(), "Acme");
        assert_eq!(
            require_text("   ", "client").unwrap_err(),
            DocumentError::MissingField { field: "client" }
        );
    }

    #[test]
    fn test_statement_json_uses_string_decimals() {
        let time = SafeTimeProvider::new(TimeSource::Test(
            Utc.with_ymd_and_hms(2024, 1, 12, 9, 30, 0).unwrap(),
        ));
        let mut statement = Statement::default()
            .with_issuer(crate::config::default_issuers().remove(1))
            .with_client("Maria");
        let input = LineItemInput {
            value: "1000".to_string(),
            due_date: "2024-01-01".to_string(),
            paid_date: "2024-01-11".to_string(),
            discount: "10".to_string(),
            ..Default::default()
        };
        statement.add_item(&input, &time).unwrap();

        let json = statement.preview_json(&time).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["client"], "Maria");
        assert_eq!(value["issuer"]["name"], "Company Hero");
        assert_eq!(value["items"][0]["status"], "Overdue");
        assert_eq!(value["items"][0]["status_label"], "Vencida");
        assert_eq!(value["items"][0]["amount_due"], "992.70");
        assert_eq!(value["totals"]["amount_due"], "992.70");
        assert_eq!(value["items"][0]["due_date"], "2024-01-01");
    }
}
