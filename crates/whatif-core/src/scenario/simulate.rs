use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::scenario::params::{EngineConfig, ScenarioParameters};
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::WhatIfResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// One self-contained monthly projection track (baseline or scenario).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerState {
    pub invest_balance: Money,
    /// Non-increasing; absorbing at zero.
    pub loan_balance: Money,
    pub total_interest_paid: Money,
    pub total_contributions: Money,
    /// First month the loan balance reached zero. Set once, never reset.
    pub month_loan_repaid: Option<u32>,
    /// First month the invested balance crossed the FI target. Set once,
    /// never reset.
    pub month_fi_reached: Option<u32>,
}

impl LedgerState {
    fn new(loan_principal: Money) -> Self {
        LedgerState {
            invest_balance: Decimal::ZERO,
            loan_balance: loan_principal,
            total_interest_paid: Decimal::ZERO,
            total_contributions: Decimal::ZERO,
            month_loan_repaid: None,
            month_fi_reached: None,
        }
    }
}

/// Month-indexed scenario sample for charting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryPoint {
    pub month: u32,
    pub net_worth: Money,
    pub assets: Money,
    pub liabilities: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub baseline: LedgerState,
    pub scenario: LedgerState,
    /// Monthly net-worth path of the scenario ledger.
    pub trajectory: Vec<TrajectoryPoint>,
}

/// What one ledger pays and contributes each month.
struct MonthPlan {
    /// Contribution available for investing before any freed debt service.
    base_inflow: Money,
    /// Total debt service while the loan is outstanding. For the scenario
    /// ledger this includes the extra payment.
    loan_payment: Money,
    monthly_return: Rate,
}

// ---------------------------------------------------------------------------
// Core functions
// ---------------------------------------------------------------------------

/// Advance one ledger by one month.
///
/// Order matters and is part of the contract: the outstanding flag is read
/// before servicing, growth is applied before the loan is serviced, and the
/// FI check runs on the post-growth invested balance.
fn step_month(
    ledger: &mut LedgerState,
    plan: &MonthPlan,
    monthly_loan_rate: Rate,
    fi_target: Money,
    month: u32,
) {
    let loan_outstanding = ledger.loan_balance > Decimal::ZERO;

    // Freed debt service is redirected into investing from the month after
    // the loan clears. One-way: capital never returns to debt service.
    let inflow = if loan_outstanding {
        plan.base_inflow
    } else {
        plan.base_inflow + plan.loan_payment
    };

    ledger.total_contributions += inflow;
    ledger.invest_balance = ledger.invest_balance * (Decimal::ONE + plan.monthly_return) + inflow;

    if loan_outstanding {
        let interest = ledger.loan_balance * monthly_loan_rate;
        // A payment below accrued interest neither grows nor shrinks the
        // balance (accepted simplification, not negative amortization).
        let principal = (plan.loan_payment - interest).max(Decimal::ZERO);
        ledger.loan_balance = (ledger.loan_balance - principal).max(Decimal::ZERO);
        ledger.total_interest_paid += interest;
        if ledger.loan_balance <= Decimal::ZERO && ledger.month_loan_repaid.is_none() {
            ledger.month_loan_repaid = Some(month);
        }
    }

    if ledger.month_fi_reached.is_none() && ledger.invest_balance >= fi_target {
        ledger.month_fi_reached = Some(month);
    }
}

/// Run both ledgers in lockstep over the full horizon. Callers have already
/// validated `params`.
pub(crate) fn run_projection(
    params: &ScenarioParameters,
    config: &EngineConfig,
) -> (SimulationResult, Vec<String>) {
    let months = params.horizon_years * 12;
    let twelve = dec!(12);
    let hundred = dec!(100);

    let baseline_plan = MonthPlan {
        base_inflow: config.base_monthly_investment,
        loan_payment: config.loan_min_payment,
        monthly_return: config.balanced_return / twelve,
    };

    let scenario_annual = config.annual_return(params.risk_profile)
        + params.staked_pct / hundred * config.staking_bonus_rate;
    let disc_savings =
        config.base_discretionary_spend * (params.discretionary_reduction_pct / hundred);
    let scenario_plan = MonthPlan {
        base_inflow: params.monthly_investment + disc_savings,
        loan_payment: config.loan_min_payment + params.extra_loan_payment,
        monthly_return: scenario_annual / twelve,
    };

    let monthly_loan_rate = config.loan_annual_rate / twelve;

    let mut baseline = LedgerState::new(config.loan_principal);
    let mut scenario = LedgerState::new(config.loan_principal);
    let mut trajectory = Vec::with_capacity(months as usize);

    for month in 1..=months {
        step_month(
            &mut baseline,
            &baseline_plan,
            monthly_loan_rate,
            config.fi_target_capital,
            month,
        );
        step_month(
            &mut scenario,
            &scenario_plan,
            monthly_loan_rate,
            config.fi_target_capital,
            month,
        );

        trajectory.push(TrajectoryPoint {
            month,
            net_worth: scenario.invest_balance - scenario.loan_balance,
            assets: scenario.invest_balance,
            liabilities: scenario.loan_balance,
        });
    }

    let mut warnings = Vec::new();
    if config.loan_principal > Decimal::ZERO {
        if baseline.month_loan_repaid.is_none() {
            warnings.push(format!(
                "Baseline loan not repaid within the {months}-month horizon"
            ));
        }
        if scenario.month_loan_repaid.is_none() {
            warnings.push(format!(
                "Scenario loan not repaid within the {months}-month horizon"
            ));
        }
    }

    (
        SimulationResult {
            baseline,
            scenario,
            trajectory,
        },
        warnings,
    )
}

/// Project the fixed baseline plan and the user scenario month by month.
///
/// Deterministic: the same parameters and config always produce the same
/// result. No I/O, no shared state between calls.
pub fn simulate(
    params: &ScenarioParameters,
    config: &EngineConfig,
) -> WhatIfResult<ComputationOutput<SimulationResult>> {
    let start = Instant::now();
    params.validate()?;

    let (result, warnings) = run_projection(params, config);

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Dual-ledger monthly projection (baseline vs scenario)",
        &serde_json::json!({
            "horizon_years": params.horizon_years,
            "risk_profile": params.risk_profile,
            "staked_pct": params.staked_pct.to_string(),
            "fi_target_capital": config.fi_target_capital.to_string(),
            "loan_principal": config.loan_principal.to_string(),
            "loan_annual_rate": config.loan_annual_rate.to_string(),
            "loan_min_payment": config.loan_min_payment.to_string(),
        }),
        warnings,
        elapsed,
        result,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
