pub mod cancellation;
pub mod config;
pub mod decimal;
pub mod errors;
pub mod events;
pub mod items;
pub mod late_fee;
pub mod negotiation;
pub mod percentage;
pub mod receipt;
pub mod serialization;
pub mod statement;
pub mod types;

// re-export key types
pub use cancellation::CancellationProof;
pub use config::{DocumentConfig, RateConfig};
pub use decimal::{Money, Rate};
pub use errors::{DocumentError, Result};
pub use events::{DocumentEvent, EventStore, NotificationLevel};
pub use items::LineItems;
pub use late_fee::{
    compute_line_item, DebtItem, LateFeeCalculator, LateFeeEngine, LineItemInput,
    LineItemRequest, PenaltyCalculation,
};
pub use negotiation::{InvoiceItem, NegotiationProposal};
pub use receipt::{PaymentReceipt, ReceiptItem, ReceiptItemInput};
pub use serialization::DocumentPreview;
pub use statement::{Statement, StatementTotals};
pub use types::{DebtStatus, DocumentId, DocumentKind, Issuer, ItemId, Language, PaymentMethod};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
