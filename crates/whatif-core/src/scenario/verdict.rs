use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::scenario::metrics::ComparisonMetrics;
use crate::scenario::params::{EngineConfig, RiskProfile, ScenarioParameters};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerdictLevel {
    Strong,
    Moderate,
    Growth,
    Balanced,
    LeanPositive,
    Caution,
    Neutral,
}

impl VerdictLevel {
    fn title(self) -> &'static str {
        match self {
            VerdictLevel::Strong => "Strong move",
            VerdictLevel::Moderate => "Trade-off",
            VerdictLevel::Growth => "Growth tilt",
            VerdictLevel::Balanced => "Balanced improvement",
            VerdictLevel::LeanPositive => "Lean positive",
            VerdictLevel::Caution => "Caution",
            VerdictLevel::Neutral => "No material change",
        }
    }

    fn description(self) -> &'static str {
        match self {
            VerdictLevel::Strong => {
                "Extra debt payments clear the loan sooner, save significant interest, \
                 and leave net worth ahead of the reference plan."
            }
            VerdictLevel::Moderate => {
                "Paying the loan down faster saves interest, but the diverted cash \
                 leaves projected net worth below the reference plan."
            }
            VerdictLevel::Growth => {
                "Aggressive contributions and compounding push net worth well ahead \
                 of the reference plan."
            }
            VerdictLevel::Balanced => {
                "The loan clears earlier and interest costs drop without hurting the \
                 investment side."
            }
            VerdictLevel::LeanPositive => {
                "Net worth ends slightly ahead of the reference plan."
            }
            VerdictLevel::Caution => {
                "This mix ends below the reference plan; consider contributing more \
                 or dialing back risk."
            }
            VerdictLevel::Neutral => "The scenario tracks the reference plan closely.",
        }
    }
}

/// Qualitative classification of a scenario relative to the baseline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub level: VerdictLevel,
    pub title: String,
    pub description: String,
}

/// First-match-wins rule cascade. Always returns exactly one level; the
/// final rule is unconditional.
pub fn classify_verdict(
    params: &ScenarioParameters,
    metrics: &ComparisonMetrics,
    config: &EngineConfig,
) -> Verdict {
    let is_debt_focused =
        params.extra_loan_payment > Decimal::ZERO && metrics.interest_saved > Decimal::ZERO;
    let is_aggressive_investor = params.monthly_investment
        > config.base_monthly_investment + dec!(150)
        || params.discretionary_reduction_pct >= dec!(15)
        || params.risk_profile == RiskProfile::Aggressive;

    let level = if is_debt_focused
        && metrics.interest_saved > dec!(1_500)
        && metrics.net_worth_delta >= Decimal::ZERO
    {
        VerdictLevel::Strong
    } else if is_debt_focused && metrics.net_worth_delta < Decimal::ZERO {
        VerdictLevel::Moderate
    } else if is_aggressive_investor
        && metrics.net_worth_delta > Decimal::ZERO
        && metrics.compounding_gain > Decimal::ZERO
    {
        VerdictLevel::Growth
    } else if metrics.payoff_shift_months > 0 && metrics.interest_saved > Decimal::ZERO {
        VerdictLevel::Balanced
    } else if metrics.net_worth_delta > Decimal::ZERO {
        VerdictLevel::LeanPositive
    } else if metrics.net_worth_delta < Decimal::ZERO {
        VerdictLevel::Caution
    } else {
        VerdictLevel::Neutral
    };

    Verdict {
        level,
        title: level.title().to_string(),
        description: level.description().to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
