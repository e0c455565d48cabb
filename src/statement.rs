use chrono::{DateTime, Utc};
use hourglass_rs::SafeTimeProvider;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::RateConfig;
use crate::decimal::Money;
use crate::errors::{DocumentError, Result};
use crate::events::{DocumentEvent, EventStore};
use crate::items::LineItems;
use crate::late_fee::{DebtItem, LateFeeCalculator, LineItemInput, LineItemRequest};
use crate::serialization::{require_issuer, require_items, require_text, DocumentPreview, StatementView};
use crate::types::{DocumentId, DocumentKind, Issuer, Language};

/// aggregate figures across a statement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatementTotals {
    pub principal: Money,
    pub fines: Money,
    pub interest: Money,
    pub discounts: Money,
    pub amount_due: Money,
    pub overdue_count: usize,
}

impl StatementTotals {
    /// fold one more item into the totals, failing on overflow
    fn with_item(mut self, item: &DebtItem) -> Result<Self> {
        let overflow = || DocumentError::overflow("statement totals");
        self.principal = self.principal.checked_add(item.original_value).ok_or_else(overflow)?;
        self.fines = self.fines.checked_add(item.fine_amount).ok_or_else(overflow)?;
        self.interest = self.interest.checked_add(item.interest_amount).ok_or_else(overflow)?;
        self.discounts = self.discounts.checked_add(item.discount_amount).ok_or_else(overflow)?;
        self.amount_due = self.amount_due.checked_add(item.amount_due).ok_or_else(overflow)?;
        if item.status.is_overdue() {
            self.overdue_count += 1;
        }
        Ok(self)
    }
}

/// late-fee statement: ordered debt items and their running total
#[derive(Debug, Clone)]
pub struct Statement {
    pub id: DocumentId,
    pub issuer: Option<Issuer>,
    pub client_name: String,
    pub language: Language,
    calculator: LateFeeCalculator,
    items: LineItems<DebtItem>,
    pub events: EventStore,
}

impl Default for Statement {
    fn default() -> Self {
        Self::with_calculator(LateFeeCalculator::default())
    }
}

impl Statement {
    /// create an empty statement; negative rates are rejected
    pub fn new(rates: RateConfig) -> Result<Self> {
        Ok(Self::with_calculator(LateFeeCalculator::new(rates)?))
    }

    fn with_calculator(calculator: LateFeeCalculator) -> Self {
        Self {
            id: Uuid::new_v4(),
            issuer: None,
            client_name: String::new(),
            language: Language::default(),
            calculator,
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

    pub fn rates(&self) -> &RateConfig {
        self.calculator.rates()
    }

    /// override the rates for items added from now on; existing items keep theirs
    pub fn set_rates(&mut self, rates: RateConfig) -> Result<()> {
        self.calculator = LateFeeCalculator::new(rates)?;
        Ok(())
    }

    /// parse form fields and append the computed item
    pub fn add_item(&mut self, input: &LineItemInput, time: &SafeTimeProvider) -> Result<&DebtItem> {
        match input.parse() {
            Ok(request) => self.add_request(&request, time),
            Err(e) => {
                self.reject(&e, time);
                Err(e)
            }
        }
    }

    /// add item with system time
    pub fn add_item_now(&mut self, input: &LineItemInput) -> Result<&DebtItem> {
        let time = SafeTimeProvider::new(hourglass_rs::TimeSource::System);
        self.add_item(input, &time)
    }

    /// append an item computed from already parsed inputs
    pub fn add_request(
        &mut self,
        request: &LineItemRequest,
        time: &SafeTimeProvider,
    ) -> Result<&DebtItem> {
        let position = self.items.next_position();
        // the totals must stay representable with the new item included
        let computed = self.calculator.compute(request, position).and_then(|item| {
            self.totals()?.with_item(&item)?;
            Ok(item)
        });
        let item = match computed {
            Ok(item) => item,
            Err(e) => {
                self.reject(&e, time);
                return Err(e);
            }
        };

        self.events.emit(DocumentEvent::ItemAdded {
            document_id: self.id,
            item_id: item.id,
            position,
            amount: item.amount_due,
            status: Some(item.status),
            timestamp: time.now(),
        });
        debug!(statement = %self.id, position, "item added");

        Ok(self.items.push(item))
    }

    /// remove the item at a 0-based position
    pub fn remove_item(&mut self, index: usize, time: &SafeTimeProvider) -> Result<DebtItem> {
        let item = self.items.remove(index)?;

        self.events.emit(DocumentEvent::ItemRemoved {
            document_id: self.id,
            item_id: item.id,
            position: index + 1,
            timestamp: time.now(),
        });
        debug!(statement = %self.id, position = index + 1, "item removed");

        Ok(item)
    }

    /// drop all items and the client name; issuer, language and rates stay
    pub fn clear(&mut self, time: &SafeTimeProvider) {
        let items_removed = self.items.clear();
        self.client_name.clear();

        self.events.emit(DocumentEvent::DocumentCleared {
            document_id: self.id,
            items_removed,
            timestamp: time.now(),
        });
        debug!(statement = %self.id, items_removed, "statement cleared");
    }

    pub fn items(&self) -> &[DebtItem] {
        self.items.as_slice()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// sum of every item's amount due
    pub fn total_due(&self) -> Result<Money> {
        Money::checked_sum(self.items.iter().map(|item| item.amount_due))
            .ok_or_else(|| DocumentError::overflow("statement total"))
    }

    pub fn totals(&self) -> Result<StatementTotals> {
        self.items
            .iter()
            .try_fold(StatementTotals::default(), |acc, item| acc.with_item(item))
    }

    fn build_view(&self, generated_at: DateTime<Utc>) -> Result<StatementView> {
        let issuer = require_issuer(&self.issuer)?;
        let client = require_text(&self.client_name, "client")?;
        require_items(self.items.len())?;
        StatementView::from_statement(self, issuer, client, generated_at)
    }

    fn reject(&mut self, error: &DocumentError, time: &SafeTimeProvider) {
        warn!(statement = %self.id, %error, "entry rejected");
        self.events.reject(self.id, error, time.now());
    }
}

impl DocumentPreview for Statement {
    type View = StatementView;

    fn kind(&self) -> DocumentKind {
        DocumentKind::LateFeeStatement
    }

    fn preview(&mut self, time: &SafeTimeProvider) -> Result<StatementView> {
        let generated_at = time.now();

        match self.build_view(generated_at) {
            Ok(view) => {
                self.events.emit(DocumentEvent::PreviewGenerated {
                    document_id: self.id,
                    kind: self.kind(),
                    total: Some(view.totals.amount_due),
                    timestamp: generated_at,
                });
                info!(statement = %self.id, items = self.items.len(), "statement preview generated");
                Ok(view)
            }
            Err(e) => {
                self.reject(&e, time);
                Err(e)
            }
        }
    }
}
