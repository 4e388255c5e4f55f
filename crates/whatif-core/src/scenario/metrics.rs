use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::scenario::simulate::LedgerState;
use crate::types::Money;

/// Comparison of the final scenario ledger against the final baseline ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonMetrics {
    pub net_worth_delta: Money,
    pub interest_saved: Money,
    /// Zero when either ledger never repays within the horizon.
    pub payoff_shift_months: i32,
    /// Absent when either ledger never crosses the FI target: "not
    /// comparable" is different from "no shift".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fi_shift_months: Option<i32>,
    pub contribution_diff: Money,
    /// Share of the net-worth improvement attributable to returns rather
    /// than to contributing more cash. Never negative.
    pub compounding_gain: Money,
}

/// Derive comparison metrics from the two final ledgers.
pub fn aggregate_metrics(baseline: &LedgerState, scenario: &LedgerState) -> ComparisonMetrics {
    let baseline_net = baseline.invest_balance - baseline.loan_balance;
    let scenario_net = scenario.invest_balance - scenario.loan_balance;
    let net_worth_delta = scenario_net - baseline_net;
    let interest_saved = baseline.total_interest_paid - scenario.total_interest_paid;

    let payoff_shift_months = match (baseline.month_loan_repaid, scenario.month_loan_repaid) {
        (Some(b), Some(s)) => b as i32 - s as i32,
        _ => 0,
    };
    let fi_shift_months = match (baseline.month_fi_reached, scenario.month_fi_reached) {
        (Some(b), Some(s)) => Some(b as i32 - s as i32),
        _ => None,
    };

    let contribution_diff = scenario.total_contributions - baseline.total_contributions;
    let compounding_gain = (net_worth_delta - contribution_diff).max(Decimal::ZERO);

    ComparisonMetrics {
        net_worth_delta,
        interest_saved,
        payoff_shift_months,
        fi_shift_months,
        contribution_diff,
        compounding_gain,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
