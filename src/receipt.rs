use chrono::{DateTime, NaiveDate, Utc};
use hourglass_rs::SafeTimeProvider;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::decimal::Money;
use crate::errors::{DocumentError, Result};
use crate::events::{DocumentEvent, EventStore};
use crate::items::LineItems;
use crate::late_fee::{parse_optional_date, parse_principal};
use crate::serialization::{
    format_date, require_issuer, require_items, require_text, DocumentPreview, ReceiptLineView,
    ReceiptView,
};
use crate::types::{DocumentId, DocumentKind, Issuer, ItemId, Language, PaymentMethod};

/// one payment acknowledged by a receipt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiptItem {
    pub id: ItemId,
    pub description: String,
    pub plan: String,
    pub method: PaymentMethod,
    pub value: Money,
}

/// raw form fields for a receipt line
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReceiptItemInput {
    pub description: String,
    pub plan: String,
    pub method: PaymentMethod,
    pub value: String,
}

impl ReceiptItemInput {
    pub fn parse(&self) -> Result<ReceiptItem> {
        let description = require_text(&self.description, "description")?;
        let value = parse_principal(&self.value)?;

        Ok(ReceiptItem {
            id: Uuid::new_v4(),
            description: description.to_string(),
            plan: self.plan.trim().to_string(),
            method: self.method,
            value,
        })
    }
}

/// payment receipt
#[derive(Debug, Clone)]
pub struct PaymentReceipt {
    pub id: DocumentId,
    pub issuer: Option<Issuer>,
    pub client_name: String,
    pub payment_date: Option<NaiveDate>,
    pub notes: String,
    pub language: Language,
    items: LineItems<ReceiptItem>,
    pub events: EventStore,
}

impl Default for PaymentReceipt {
    fn default() -> Self {
        Self::new()
    }
}

impl PaymentReceipt {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            issuer: None,
            client_name: String::new(),
            payment_date: None,
            notes: String::new(),
            language: Language::default(),
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

    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    /// set the payment date from a form field; blank unsets it
    pub fn set_payment_date(&mut self, input: &str) -> Result<()> {
        self.payment_date = parse_optional_date(input)?;
        Ok(())
    }

    pub fn add_item(&mut self, input: &ReceiptItemInput, time: &SafeTimeProvider) -> Result<&ReceiptItem> {
        // the total must stay representable with the new line included
        let parsed = input.parse().and_then(|item| {
            self.total()?
                .checked_add(item.value)
                .ok_or_else(|| DocumentError::overflow("receipt total"))?;
            Ok(item)
        });
        let item = match parsed {
            Ok(item) => item,
            Err(e) => {
                warn!(receipt = %self.id, error = %e, "receipt line rejected");
                self.events.reject(self.id, &e, time.now());
                return Err(e);
            }
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
        debug!(receipt = %self.id, position, "receipt line added");

        Ok(self.items.push(item))
    }

    pub fn remove_item(&mut self, index: usize, time: &SafeTimeProvider) -> Result<ReceiptItem> {
        let item = self.items.remove(index)?;
        self.events.emit(DocumentEvent::ItemRemoved {
            document_id: self.id,
            item_id: item.id,
            position: index + 1,
            timestamp: time.now(),
        });
        Ok(item)
    }

    /// drop lines, client and notes
    pub fn clear(&mut self, time: &SafeTimeProvider) {
        let items_removed = self.items.clear();
        self.client_name.clear();
        self.notes.clear();
        self.events.emit(DocumentEvent::DocumentCleared {
            document_id: self.id,
            items_removed,
            timestamp: time.now(),
        });
    }

    pub fn items(&self) -> &[ReceiptItem] {
        self.items.as_slice()
    }

    pub fn total(&self) -> Result<Money> {
        Money::checked_sum(self.items.iter().map(|item| item.value))
            .ok_or_else(|| DocumentError::overflow("receipt total"))
    }

    fn build_view(&self, generated_at: DateTime<Utc>) -> Result<ReceiptView> {
        let issuer = require_issuer(&self.issuer)?;
        let client = require_text(&self.client_name, "client")?;
        require_items(self.items.len())?;
        let total = self.total()?;

        let notes = match self.notes.trim() {
            "" => None,
            notes => Some(notes.to_string()),
        };

        Ok(ReceiptView {
            id: self.id,
            kind: DocumentKind::PaymentReceipt,
            issuer: issuer.clone(),
            client: client.to_string(),
            generated_at,
            payment_date: self.payment_date.map(format_date),
            notes,
            items: self
                .items
                .iter()
                .map(|item| ReceiptLineView {
                    description: item.description.clone(),
                    plan: item.plan.clone(),
                    method: item.method,
                    method_label: item.method.label(self.language).to_string(),
                    value: item.value.round_cents(),
                })
                .collect(),
            total: total.round_cents(),
        })
    }
}

impl DocumentPreview for PaymentReceipt {
    type View = ReceiptView;

    fn kind(&self) -> DocumentKind {
        DocumentKind::PaymentReceipt
    }

    fn preview(&mut self, time: &SafeTimeProvider) -> Result<ReceiptView> {
        let generated_at = time.now();
        let view = match self.build_view(generated_at) {
            Ok(view) => view,
            Err(e) => {
                warn!(receipt = %self.id, error = %e, "receipt preview rejected");
                self.events.reject(self.id, &e, generated_at);
                return Err(e);
            }
        };

        self.events.emit(DocumentEvent::PreviewGenerated {
            document_id: self.id,
            kind: self.kind(),
            total: Some(view.total),
            timestamp: generated_at,
        });
        info!(receipt = %self.id, "receipt preview generated");

        Ok(view)
    }
}
