use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// unique identifier for a document
pub type DocumentId = Uuid;

/// unique identifier for a line item
pub type ItemId = Uuid;

/// debt line item status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DebtStatus {
    /// settled, nothing owed
    Paid,
    /// paid after the due date, fine and interest apply
    Overdue,
    /// not past due, or not enough dates to tell
    NotYetDue,
}

impl DebtStatus {
    /// localized label shown on documents
    pub fn label(self, language: Language) -> &'static str {
        match (self, language) {
            (DebtStatus::Paid, Language::Pt) => "Pago",
            (DebtStatus::Paid, Language::En) => "Paid",
            (DebtStatus::Paid, Language::Es) => "Pagado",
            (DebtStatus::Overdue, Language::Pt) => "Vencida",
            (DebtStatus::Overdue, Language::En) => "Overdue",
            (DebtStatus::Overdue, Language::Es) => "Vencida",
            (DebtStatus::NotYetDue, Language::Pt) => "Não Vencida",
            (DebtStatus::NotYetDue, Language::En) => "Not Due",
            (DebtStatus::NotYetDue, Language::Es) => "No Vencida",
        }
    }

    pub fn is_overdue(self) -> bool {
        self == DebtStatus::Overdue
    }
}

/// document language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Pt,
    En,
    Es,
}

/// how a receipt line was paid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[default]
    Pix,
    /// bank slip
    Boleto,
    Card,
    Transfer,
}

impl PaymentMethod {
    pub fn label(self, language: Language) -> &'static str {
        match (self, language) {
            (PaymentMethod::Pix, _) => "Pix",
            (PaymentMethod::Boleto, Language::En) => "Bank slip",
            (PaymentMethod::Boleto, _) => "Boleto",
            (PaymentMethod::Card, Language::Pt) => "Cartão",
            (PaymentMethod::Card, Language::En) => "Card",
            (PaymentMethod::Card, Language::Es) => "Tarjeta",
            (PaymentMethod::Transfer, Language::Pt) => "Transferência",
            (PaymentMethod::Transfer, Language::En) => "Transfer",
            (PaymentMethod::Transfer, Language::Es) => "Transferencia",
        }
    }
}

/// document kinds the library can preview
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentKind {
    LateFeeStatement,
    NegotiationProposal,
    PaymentReceipt,
    CancellationProof,
}

/// company issuing a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issuer {
    pub id: String,
    pub name: String,
    pub logo_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_id: Option<String>,
}

impl Issuer {
    pub fn new(id: impl Into<String>, name: impl Into<String>, logo_url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            logo_url: logo_url.into(),
            tax_id: None,
        }
    }

    pub fn with_tax_id(mut self, tax_id: impl Into<String>) -> Self {
        self.tax_id = Some(tax_id.into());
        self
    }
}
