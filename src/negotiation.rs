use chrono::{DateTime, Utc};
use hourglass_rs::SafeTimeProvider;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::decimal::Money;
use crate::errors::{DocumentError, Result};
use crate::events::{DocumentEvent, EventStore};
use crate::items::LineItems;
use crate::late_fee::parse_percent_or_zero;
use crate::serialization::{
    require_issuer, require_items, require_text, DocumentPreview, InvoiceLineView, NegotiationView,
};
use crate::types::{DocumentId, DocumentKind, Issuer, ItemId};

/// one open invoice in a negotiation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceItem {
    pub id: ItemId,
    pub title: String,
    pub value: Money,
}

/// discount and final amount for a subtotal
fn discounted(subtotal: Money, percent: Decimal) -> Result<(Money, Money)> {
    let discount = subtotal
        .percentage(percent)
        .ok_or_else(|| DocumentError::overflow("negotiation discount"))?;
    let final_amount = subtotal
        .checked_sub(discount)
        .ok_or_else(|| DocumentError::overflow("negotiation final amount"))?;
    Ok((discount, final_amount))
}

/// negotiation proposal: open invoices with one global discount
#[derive(Debug, Clone)]
pub struct NegotiationProposal {
    pub id: DocumentId,
    pub issuer: Option<Issuer>,
    pub client_name: String,
    discount_percent: Decimal,
    items: LineItems<InvoiceItem>,
    pub events: EventStore,
}

impl Default for NegotiationProposal {
    fn default() -> Self {
        Self::new()
    }
}

impl NegotiationProposal {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            issuer: None,
            client_name: String::new(),
            discount_percent: Decimal::ZERO,
            items: LineItems::new(),
            events: EventStore::new(),
        }
    }

    pub fn with_issuer(mut self, issuer: Issuer) -> Self {
        self.issuer = Some(issuer);
        self
    }

    pub fn with_client(mut self, client_name: impl Into<String>) -> Self {
        self.client_name = client_name.into();
        self
    }

    pub fn discount_percent(&self) -> Decimal {
        self.discount_percent
    }

    pub fn set_discount_percent(&mut self, percent: Decimal) -> Result<()> {
        if percent < Decimal::ZERO || percent > Decimal::ONE_HUNDRED {
            return Err(DocumentError::InvalidDiscount { percent });
        }
        discounted(self.subtotal()?, percent)?;
        self.discount_percent = percent;
        Ok(())
    }

    /// set the discount from a form field; blank or non-numeric means none
    pub fn set_discount_text(&mut self, input: &str) -> Result<()> {
        self.set_discount_percent(parse_percent_or_zero(input))
    }

    /// append an invoice; the title is required and the value must be positive
    pub fn add_item(
        &mut self,
        title: &str,
        value: &str,
        time: &SafeTimeProvider,
    ) -> Result<&InvoiceItem> {
        let parsed = require_text(title, "title").and_then(|title| {
            let amount = Money::from_str_exact(value)
                .ok()
                .filter(Money::is_positive)
                .ok_or_else(|| DocumentError::InvalidAmount {
                    input: value.to_string(),
                })?;
            Ok((title.to_string(), amount))
        });
        // subtotal and discount must stay representable with the new invoice
        let parsed = parsed.and_then(|(title, amount)| {
            let subtotal = self
                .subtotal()?
                .checked_add(amount)
                .ok_or_else(|| DocumentError::overflow("negotiation subtotal"))?;
            discounted(subtotal, self.discount_percent)?;
            Ok((title, amount))
        });

        let (title, value) = match parsed {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!(proposal = %self.id, error = %e, "invoice rejected");
                self.events.reject(self.id, &e, time.now());
                return Err(e);
            }
        };

        let item = InvoiceItem {
            id: Uuid::new_v4(),
            title,
            value,
        };
        let position = self.items.next_position();
        self.events.emit(DocumentEvent::ItemAdded {
            document_id: self.id,
            item_id: item.id,
            position,
            amount: item.value,
            status: None,
            timestamp: time.now(),
        });
        debug!(proposal = %self.id, position, "invoice added");

        Ok(self.items.push(item))
    }

    pub fn remove_item(&mut self, index: usize, time: &SafeTimeProvider) -> Result<InvoiceItem> {
        let item = self.items.remove(index)?;
        self.events.emit(DocumentEvent::ItemRemoved {
            document_id: self.id,
            item_id: item.id,
            position: index + 1,
            timestamp: time.now(),
        });
        Ok(item)
    }

    /// drop the invoices; client, discount and issuer stay
    pub fn clear(&mut self, time: &SafeTimeProvider) {
        let items_removed = self.items.clear();
        self.events.emit(DocumentEvent::DocumentCleared {
            document_id: self.id,
            items_removed,
            timestamp: time.now(),
        });
    }

    pub fn items(&self) -> &[InvoiceItem] {
        self.items.as_slice()
    }

    pub fn subtotal(&self) -> Result<Money> {
        Money::checked_sum(self.items.iter().map(|item| item.value))
            .ok_or_else(|| DocumentError::overflow("negotiation subtotal"))
    }

    pub fn discount_amount(&self) -> Result<Money> {
        Ok(discounted(self.subtotal()?, self.discount_percent)?.0)
    }

    pub fn final_amount(&self) -> Result<Money> {
        Ok(discounted(self.subtotal()?, self.discount_percent)?.1)
    }

    fn build_view(&self, generated_at: DateTime<Utc>) -> Result<NegotiationView> {
        let issuer = require_issuer(&self.issuer)?;
        let client = require_text(&self.client_name, "client")?;
        require_items(self.items.len())?;
        let subtotal = self.subtotal()?;
        let (discount_amount, final_amount) = discounted(subtotal, self.discount_percent)?;

        Ok(NegotiationView {
            id: self.id,
            kind: DocumentKind::NegotiationProposal,
            issuer: issuer.clone(),
            client: client.to_string(),
            generated_at,
            items: self
                .items
                .iter()
                .map(|item| InvoiceLineView {
                    title: item.title.clone(),
                    value: item.value.round_cents(),
                })
                .collect(),
            subtotal: subtotal.round_cents(),
            discount_percent: self.discount_percent,
            discount_amount: discount_amount.round_cents(),
            final_amount: final_amount.round_cents(),
        })
    }
}

impl DocumentPreview for NegotiationProposal {
    type View = NegotiationView;

    fn kind(&self) -> DocumentKind {
        DocumentKind::NegotiationProposal
    }

    fn preview(&mut self, time: &SafeTimeProvider) -> Result<NegotiationView> {
        let generated_at = time.now();
        let view = match self.build_view(generated_at) {
            Ok(view) => view,
            Err(e) => {
                warn!(proposal = %self.id, error = %e, "negotiation preview rejected");
                self.events.reject(self.id, &e, generated_at);
                return Err(e);
            }
        };

        self.events.emit(DocumentEvent::PreviewGenerated {
            document_id: self.id,
            kind: self.kind(),
            total: Some(view.final_amount),
            timestamp: generated_at,
        });
        info!(proposal = %self.id, "negotiation preview generated");

        Ok(view)
    }
}
