use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::decimal::Rate;
use crate::errors::{DocumentError, Result};
use crate::types::{Issuer, Language};

/// default one-time fine, in percent of the principal
pub const DEFAULT_FINE_RATE_PERCENT: Decimal = dec!(10);

/// default simple interest per day late, in percent of the principal
pub const DEFAULT_DAILY_INTEREST_RATE_PERCENT: Decimal = dec!(0.03);

/// late-fee rates, expressed in percent the way they are typed on a form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateConfig {
    pub fine_rate_percent: Decimal,
    pub daily_interest_rate_percent: Decimal,
}

impl Default for RateConfig {
    fn default() -> Self {
        Self {
            fine_rate_percent: DEFAULT_FINE_RATE_PERCENT,
            daily_interest_rate_percent: DEFAULT_DAILY_INTEREST_RATE_PERCENT,
        }
    }
}

impl RateConfig {
    /// create validated rates
    pub fn new(fine_rate_percent: Decimal, daily_interest_rate_percent: Decimal) -> Result<Self> {
        let config = Self {
            fine_rate_percent,
            daily_interest_rate_percent,
        };
        config.validate()?;
        Ok(config)
    }

    /// rates without any penalty
    pub fn no_penalty() -> Self {
        Self {
            fine_rate_percent: Decimal::ZERO,
            daily_interest_rate_percent: Decimal::ZERO,
        }
    }

    pub fn fine_rate(&self) -> Rate {
        Rate::from_percent(self.fine_rate_percent)
    }

    pub fn daily_interest_rate(&self) -> Rate {
        Rate::from_percent(self.daily_interest_rate_percent)
    }

    pub fn validate(&self) -> Result<()> {
        for rate in [self.fine_rate_percent, self.daily_interest_rate_percent] {
            if rate < Decimal::ZERO {
                return Err(DocumentError::InvalidRate { rate });
            }
        }
        Ok(())
    }
}

/// session-wide document configuration, built once at the call site
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentConfig {
    pub rates: RateConfig,
    pub language: Language,
    pub issuers: Vec<Issuer>,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            rates: RateConfig::default(),
            language: Language::default(),
            issuers: default_issuers(),
        }
    }
}

impl DocumentConfig {
    /// load from json, missing sections fall back to defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: DocumentConfig = serde_json::from_str(json).map_err(|e| {
            DocumentError::InvalidConfiguration {
                message: e.to_string(),
            }
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|e| format!("JSON error: {}", e))
    }

    pub fn validate(&self) -> Result<()> {
        self.rates.validate()?;

        for (i, issuer) in self.issuers.iter().enumerate() {
            if issuer.id.trim().is_empty() {
                return Err(DocumentError::InvalidConfiguration {
                    message: format!("issuer at position {} has an empty id", i),
                });
            }
            if self.issuers[..i].iter().any(|other| other.id == issuer.id) {
                return Err(DocumentError::InvalidConfiguration {
                    message: format!("duplicate issuer id {}", issuer.id),
                });
            }
        }

        Ok(())
    }

    /// look up an issuer by id
    pub fn issuer(&self, id: &str) -> Result<&Issuer> {
        self.issuers
            .iter()
            .find(|issuer| issuer.id == id)
            .ok_or_else(|| DocumentError::UnknownIssuer { id: id.to_string() })
    }
}

/// the two companies documents can be issued under out of the box
pub fn default_issuers() -> Vec<Issuer> {
    vec![
        Issuer::new(
            "empresaA",
            "Meu Escritório Virtual",
            "https://meuescritoriovirtual.com.br/wp-content/uploads/2024/04/MEV-logo_Prancheta-1.svg",
        ),
        Issuer::new(
            "empresaB",
            "Company Hero",
            "https://www.companyhero.com/companyhero-logo.svg",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rates() {
        let rates = RateConfig::default();
        assert_eq!(rates.fine_rate(), Rate::from_percent(dec!(10)));
        assert_eq!(rates.daily_interest_rate().as_decimal(), dec!(0.0003));
    }

    #[test]
    fn test_negative_rate_rejected() {
        let err = RateConfig::new(dec!(-1), dec!(0.03)).unwrap_err();
        assert_eq!(err, DocumentError::InvalidRate { rate: dec!(-1) });

        assert!(RateConfig::new(dec!(2), dec!(0.033)).is_ok());
    }

    #[test]
    fn test_from_json_partial() {
        let json = r#"{ "rates": { "fine_rate_percent": "2", "daily_interest_rate_percent": "0.033" }, "language": "en" }"#;
        let config = DocumentConfig::from_json(json).unwrap();

        assert_eq!(config.rates.fine_rate_percent, dec!(2));
        assert_eq!(config.language, Language::En);
        // issuers were not given
        assert_eq!(config.issuers.len(), 2);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(matches!(
            DocumentConfig::from_json("not json"),
            Err(DocumentError::InvalidConfiguration { .. })
        ));

        let json = r#"{ "rates": { "fine_rate_percent": "-5", "daily_interest_rate_percent": "0" } }"#;
        assert!(matches!(
            DocumentConfig::from_json(json),
            Err(DocumentError::InvalidRate { .. })
        ));
    }

    #[test]
    fn test_duplicate_issuers_rejected() {
        let mut config = DocumentConfig::default();
        config.issuers.push(Issuer::new("empresaA", "Copy", "https://example.com/logo.svg"));

        assert!(matches!(
            config.validate(),
            Err(DocumentError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_issuer_lookup() {
        let config = DocumentConfig::default();
        assert_eq!(config.issuer("empresaB").unwrap().name, "Company Hero");
        assert_eq!(
            config.issuer("empresaZ").unwrap_err(),
            DocumentError::UnknownIssuer { id: "empresaZ".to_string() }
        );
    }

    #[test]
    fn test_json_round_trip_keeps_rates() {
        let config = DocumentConfig::default();
        let restored = DocumentConfig::from_json(&config.to_json_pretty()).unwrap();
        assert_eq!(restored, config);
    }
}
