use crate::config::RateConfig;
use crate::decimal::{Money, Rate};
use crate::errors::{DocumentError, Result};

/// engine for the one-time fine and simple daily interest on a late payment
#[derive(Debug, Clone, Default)]
pub struct LateFeeEngine {
    config: RateConfig,
}

impl LateFeeEngine {
    /// create an engine; negative rates are rejected
    pub fn new(config: RateConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &RateConfig {
        &self.config
    }

    /// flat fine, charged once regardless of how late
    pub fn calculate_fine(&self, principal: Money) -> Result<Money> {
        principal
            .apply_rate(self.config.fine_rate())
            .ok_or_else(|| DocumentError::overflow("fine"))
    }

    /// simple daily interest on the principal, never on accrued interest
    pub fn calculate_interest(&self, principal: Money, days_late: u32) -> Result<Money> {
        principal
            .apply_daily_rate(self.config.daily_interest_rate(), days_late)
            .ok_or_else(|| DocumentError::overflow("interest"))
    }

    /// fine plus interest for a payment `days_late` days after its due date
    pub fn calculate_penalty(&self, principal: Money, days_late: u32) -> Result<PenaltyCalculation> {
        let fine_rate = self.config.fine_rate();
        let daily_rate = self.config.daily_interest_rate();

        if days_late == 0 {
            return Ok(PenaltyCalculation {
                fine_amount: Money::ZERO,
                interest_amount: Money::ZERO,
                days_charged: 0,
                principal_base: principal,
                fine_rate,
                daily_rate,
            });
        }

        let calculation = PenaltyCalculation {
            fine_amount: self.calculate_fine(principal)?,
            interest_amount: self.calculate_interest(principal, days_late)?,
            days_charged: days_late,
            principal_base: principal,
            fine_rate,
            daily_rate,
        };
        calculation.total_with_principal()?;
        Ok(calculation)
    }
}

/// penalty calculation result
#[derive(Debug, Clone, PartialEq)]
pub struct PenaltyCalculation {
    pub fine_amount: Money,
    pub interest_amount: Money,
    pub days_charged: u32,
    pub principal_base: Money,
    pub fine_rate: Rate,
    pub daily_rate: Rate,
}

impl PenaltyCalculation {
    pub fn total_penalty(&self) -> Result<Money> {
        self.fine_amount
            .checked_add(self.interest_amount)
            .ok_or_else(|| DocumentError::overflow("penalty"))
    }

    /// principal with fine and interest added
    pub fn total_with_principal(&self) -> Result<Money> {
        self.principal_base
            .checked_add(self.total_penalty()?)
            .ok_or_else(|| DocumentError::overflow("total with penalty"))
    }
}
