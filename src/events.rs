use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::errors::DocumentError;
use crate::types::{DebtStatus, DocumentId, DocumentKind, ItemId};

/// how the presentation layer should surface an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationLevel {
    Success,
    Error,
    Info,
}

/// all events that can be emitted while editing a document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DocumentEvent {
    ItemAdded {
        document_id: DocumentId,
        item_id: ItemId,
        position: usize,
        amount: Money,
        status: Option<DebtStatus>,
        timestamp: DateTime<Utc>,
    },
    ItemRemoved {
        document_id: DocumentId,
        item_id: ItemId,
        position: usize,
        timestamp: DateTime<Utc>,
    },
    EntryRejected {
        document_id: DocumentId,
        reason: String,
        timestamp: DateTime<Utc>,
    },
    DocumentCleared {
        document_id: DocumentId,
        items_removed: usize,
        timestamp: DateTime<Utc>,
    },
    PreviewGenerated {
        document_id: DocumentId,
        kind: DocumentKind,
        total: Option<Money>,
        timestamp: DateTime<Utc>,
    },
}

impl DocumentEvent {
    pub fn level(&self) -> NotificationLevel {
        match self {
            DocumentEvent::ItemAdded { .. } | DocumentEvent::PreviewGenerated { .. } => {
                NotificationLevel::Success
            }
            DocumentEvent::EntryRejected { .. } => NotificationLevel::Error,
            DocumentEvent::ItemRemoved { .. } | DocumentEvent::DocumentCleared { .. } => {
                NotificationLevel::Info
            }
        }
    }

    pub fn document_id(&self) -> DocumentId {
        match self {
            DocumentEvent::ItemAdded { document_id, .. }
            | DocumentEvent::ItemRemoved { document_id, .. }
            | DocumentEvent::EntryRejected { document_id, .. }
            | DocumentEvent::DocumentCleared { document_id, .. }
            | DocumentEvent::PreviewGenerated { document_id, .. } => *document_id,
        }
    }
}

/// event store for collecting events during operations
#[derive(Debug, Default, Clone)]
pub struct EventStore {
    events: Vec<DocumentEvent>,
}

impl EventStore {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
        }
    }

    pub fn emit(&mut self, event: DocumentEvent) {
        self.events.push(event);
    }

    /// record a rejected entry or preview so the caller can show the reason
    pub fn reject(&mut self, document_id: DocumentId, error: &DocumentError, timestamp: DateTime<Utc>) {
        self.emit(DocumentEvent::EntryRejected {
            document_id,
            reason: error.to_string(),
            timestamp,
        });
    }

    pub fn take_events(&mut self) -> Vec<DocumentEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[DocumentEvent] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_levels() {
        let id = Uuid::new_v4();
        let now = Utc::now();

        let rejected = DocumentEvent::EntryRejected {
            document_id: id,
            reason: "invalid amount".to_string(),
            timestamp: now,
        };
        let cleared = DocumentEvent::DocumentCleared {
            document_id: id,
            items_removed: 3,
            timestamp: now,
        };

        assert_eq!(rejected.level(), NotificationLevel::Error);
        assert_eq!(cleared.level(), NotificationLevel::Info);
        assert_eq!(cleared.document_id(), id);
    }

    #[test]
    fn test_take_events_drains() {
        let mut store = EventStore::new();
        store.emit(DocumentEvent::DocumentCleared {
            document_id: Uuid::new_v4(),
            items_removed: 0,
            timestamp: Utc::now(),
        });

        assert_eq!(store.events().len(), 1);
        assert_eq!(store.take_events().len(), 1);
        assert!(store.events().is_empty());
    }

    #[test]
    fn test_reject_records_reason() {
        let mut store = EventStore::new();
        let id = Uuid::new_v4();
        let error = DocumentError::MissingField { field: "client" };

        store.reject(id, &error, Utc::now());

        match store.events() {
            [DocumentEvent::EntryRejected { document_id, reason, .. }] => {
                assert_eq!(*document_id, id);
                assert_eq!(reason, "missing required field: client");
            }
            other => panic!("unexpected events: {:?}", other),
        }
    }
}
