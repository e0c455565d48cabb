use chrono::{DateTime, NaiveDate, Utc};
use hourglass_rs::SafeTimeProvider;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::{DocumentError, Result};
use crate::events::{DocumentEvent, EventStore};
use crate::late_fee::parse_optional_date;
use crate::serialization::{format_date, require_issuer, require_text, CancellationView, DocumentPreview};
use crate::types::{DocumentId, DocumentKind, Issuer, Language};

/// service name printed when none was given
pub fn default_service_label(language: Language) -> &'static str {
    match language {
        Language::Pt => "Geral",
        Language::En | Language::Es => "General",
    }
}

/// proof that a client's service was cancelled on a given date
#[derive(Debug, Clone)]
pub struct CancellationProof {
    pub id: DocumentId,
    pub issuer: Option<Issuer>,
    pub client_name: String,
    pub service: String,
    pub cancellation_date: Option<NaiveDate>,
    pub reason: String,
    pub language: Language,
    pub events: EventStore,
}

impl Default for CancellationProof {
    fn default() -> Self {
        Self::new()
    }
}

impl CancellationProof {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            issuer: None,
            client_name: String::new(),
            service: String::new(),
            cancellation_date: None,
            reason: String::new(),
            language: Language::default(),
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

    pub fn with_service(mut self, service: impl Into<String>) -> Self {
        self.service = service.into();
        self
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = reason.into();
        self
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    /// set the cancellation date from a form field; blank unsets it
    pub fn set_date(&mut self, input: &str) -> Result<()> {
        self.cancellation_date = parse_optional_date(input)?;
        Ok(())
    }

    /// reset every field except issuer and language
    pub fn clear(&mut self, time: &SafeTimeProvider) {
        self.client_name.clear();
        self.service.clear();
        self.cancellation_date = None;
        self.reason.clear();
        self.events.emit(DocumentEvent::DocumentCleared {
            document_id: self.id,
            items_removed: 0,
            timestamp: time.now(),
        });
    }

    fn build_view(&self, generated_at: DateTime<Utc>) -> Result<CancellationView> {
        let issuer = require_issuer(&self.issuer)?;
        let client = require_text(&self.client_name, "client")?;
        let date = self
            .cancellation_date
            .ok_or(DocumentError::MissingField { field: "date" })?;

        let service = match self.service.trim() {
            "" => default_service_label(self.language).to_string(),
            service => service.to_string(),
        };
        let reason = match self.reason.trim() {
            "" => None,
            reason => Some(reason.to_string()),
        };

        Ok(CancellationView {
            id: self.id,
            kind: DocumentKind::CancellationProof,
            issuer: issuer.clone(),
            client: client.to_string(),
            generated_at,
            service,
            cancellation_date: format_date(date),
            reason,
        })
    }
}

impl DocumentPreview for CancellationProof {
    type View = CancellationView;

    fn kind(&self) -> DocumentKind {
        DocumentKind::CancellationProof
    }

    fn preview(&mut self, time: &SafeTimeProvider) -> Result<CancellationView> {
        let generated_at = time.now();
        let view = match self.build_view(generated_at) {
            Ok(view) => view,
            Err(e) => {
                warn!(cancellation = %self.id, error = %e, "cancellation preview rejected");
                self.events.reject(self.id, &e, generated_at);
                return Err(e);
            }
        };

        self.events.emit(DocumentEvent::PreviewGenerated {
            document_id: self.id,
            kind: self.kind(),
            total: None,
            timestamp: generated_at,
        });
        info!(cancellation = %self.id, "cancellation preview generated");

        Ok(view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_issuers;
    use crate::events::NotificationLevel;
    use chrono::TimeZone;
    use hourglass_rs::TimeSource;

    fn test_time() -> SafeTimeProvider {
        SafeTimeProvider::new(TimeSource::Test(Utc.with_ymd_and_hms(2024, 7, 1, 14, 0, 0).unwrap()))
    }

    #[test]
    fn test_preview_defaults_service() {
        let time = test_time();
        let mut proof = CancellationProof::new()
            .with_issuer(default_issuers().remove(1))
            .with_client("Acme");
        proof.set_date("2024-06-30").unwrap();

        let view = proof.preview(&time).unwrap();
        assert_eq!(view.service, "Geral");
        assert_eq!(view.cancellation_date, "30/06/2024");
        assert_eq!(view.reason, None);
    }

    #[test]
    fn test_preview_keeps_service_and_reason() {
        let time = test_time();
        let mut proof = CancellationProof::new()
            .with_issuer(default_issuers().remove(1))
            .with_client("Acme")
            .with_service("Endereço fiscal")
            .with_reason("  mudança de sede ")
            .with_language(Language::En);
        proof.set_date("2024-06-30").unwrap();

        let view = proof.preview(&time).unwrap();
        assert_eq!(view.service, "Endereço fiscal");
        assert_eq!(view.reason.as_deref(), Some("mudança de sede"));
    }

    #[test]
    fn test_preview_requires_date() {
        let time = test_time();
        let mut proof = CancellationProof::new()
            .with_issuer(default_issuers().remove(0))
            .with_client("Acme");

        assert_eq!(
            proof.preview(&time).unwrap_err(),
            DocumentError::MissingField { field: "date" }
        );
        let last = proof.events.events().last().unwrap();
        assert_eq!(last.level(), NotificationLevel::Error);
        assert!(proof.set_date("30/06/2024").is_err());
    }

    #[test]
    fn test_clear() {
        let time = test_time();
        let mut proof = CancellationProof::new()
            .with_issuer(default_issuers().remove(0))
            .with_client("Acme")
            .with_service("Plano");
        proof.set_date("2024-06-30").unwrap();

        proof.clear(&time);
        assert!(proof.client_name.is_empty());
        assert!(proof.cancellation_date.is_none());
        assert!(proof.issuer.is_some());
    }
}
