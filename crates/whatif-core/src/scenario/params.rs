use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::WhatIfError;
use crate::types::{Money, Rate};
use crate::WhatIfResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Risk posture selecting the nominal annual return of the scenario ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskProfile {
    Conservative,
    Balanced,
    Aggressive,
}

/// User-adjustable inputs for one scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioParameters {
    /// Amount diverted into investments each month.
    pub monthly_investment: Money,
    /// Amount paid toward the loan beyond the minimum payment.
    pub extra_loan_payment: Money,
    /// Share of the discretionary-spend baseline redirected into investing (0-100).
    pub discretionary_reduction_pct: Decimal,
    /// Share of invested capital assumed staked (0-100).
    pub staked_pct: Decimal,
    pub risk_profile: RiskProfile,
    /// Projection length in years.
    pub horizon_years: u32,
}

/// Fixed reference constants of the engine. Not user-adjustable; passed
/// explicitly into every operation so tests can override them.
///
/// The baseline ledger is always computed from `base_monthly_investment`,
/// the loan terms, and the Balanced return, independent of the scenario's
/// risk profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Invested capital that marks financial independence.
    pub fi_target_capital: Money,
    pub loan_principal: Money,
    pub loan_annual_rate: Rate,
    pub loan_min_payment: Money,
    /// Monthly contribution of the fixed reference plan.
    pub base_monthly_investment: Money,
    /// Discretionary-spend baseline the reduction percentage applies to.
    pub base_discretionary_spend: Money,
    /// Return boost at 100% staked, scaled linearly with `staked_pct`.
    pub staking_bonus_rate: Rate,
    pub conservative_return: Rate,
    pub balanced_return: Rate,
    pub aggressive_return: Rate,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            fi_target_capital: dec!(600_000),
            loan_principal: dec!(10_000),
            loan_annual_rate: dec!(0.10),
            loan_min_payment: dec!(250),
            base_monthly_investment: dec!(300),
            base_discretionary_spend: dec!(1_000),
            staking_bonus_rate: dec!(0.01),
            conservative_return: dec!(0.04),
            balanced_return: dec!(0.07),
            aggressive_return: dec!(0.11),
        }
    }
}

impl EngineConfig {
    /// Nominal annual return for a risk profile.
    pub fn annual_return(&self, profile: RiskProfile) -> Rate {
        match profile {
            RiskProfile::Conservative => self.conservative_return,
            RiskProfile::Balanced => self.balanced_return,
            RiskProfile::Aggressive => self.aggressive_return,
        }
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

impl ScenarioParameters {
    /// Bounds-check the raw inputs. Invalid parameters never reach the
    /// simulator; callers re-prompt on failure.
    pub fn validate(&self) -> WhatIfResult<()> {
        if self.monthly_investment < Decimal::ZERO {
            return Err(WhatIfError::InvalidInput {
                field: "monthly_investment".into(),
                reason: "must be >= 0".into(),
            });
        }
        if self.extra_loan_payment < Decimal::ZERO {
            return Err(WhatIfError::InvalidInput {
                field: "extra_loan_payment".into(),
                reason: "must be >= 0".into(),
            });
        }
        if self.discretionary_reduction_pct < Decimal::ZERO
            || self.discretionary_reduction_pct > dec!(100)
        {
            return Err(WhatIfError::InvalidInput {
                field: "discretionary_reduction_pct".into(),
                reason: "must be between 0 and 100".into(),
            });
        }
        if self.staked_pct < Decimal::ZERO || self.staked_pct > dec!(100) {
            return Err(WhatIfError::InvalidInput {
                field: "staked_pct".into(),
                reason: "must be between 0 and 100".into(),
            });
        }
        if self.horizon_years == 0 {
            return Err(WhatIfError::InvalidInput {
                field: "horizon_years".into(),
                reason: "must be > 0".into(),
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
