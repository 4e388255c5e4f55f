use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::scenario::metrics::{aggregate_metrics, ComparisonMetrics};
use crate::scenario::params::{EngineConfig, ScenarioParameters};
use crate::scenario::risk::{score_risk, RiskAssessment};
use crate::scenario::simulate::{run_projection, LedgerState, SimulationResult};
use crate::scenario::verdict::{classify_verdict, Verdict};
use crate::types::{with_metadata, ComputationOutput, Money};
use crate::WhatIfResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Display-ready figures derived from the final scenario ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioSummary {
    pub net_worth: Money,
    pub assets: Money,
    pub liabilities: Money,
    /// 60% of assets are treated as liquid, the rest as illiquid.
    pub liquid_assets: Money,
    pub illiquid_assets: Money,
    pub liquid_pct: Decimal,
    pub illiquid_pct: Decimal,
    pub avg_monthly_net_worth_growth: Money,
    pub avg_yearly_net_worth_growth: Money,
    /// Net worth per contributed dollar. Absent when nothing was contributed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wealth_growth_multiple: Option<Decimal>,
}

/// Full engine output for one scenario: projection, comparison metrics,
/// risk assessment, verdict, and display summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioReport {
    pub simulation: SimulationResult,
    pub metrics: ComparisonMetrics,
    pub risk: RiskAssessment,
    pub verdict: Verdict,
    pub summary: ScenarioSummary,
}

// ---------------------------------------------------------------------------
// Core functions
// ---------------------------------------------------------------------------

fn summarize(scenario: &LedgerState, horizon_years: u32) -> ScenarioSummary {
    let assets = scenario.invest_balance;
    let liabilities = scenario.loan_balance;
    let net_worth = assets - liabilities;

    let liquid_assets = assets * dec!(0.6);
    let illiquid_assets = assets - liquid_assets;
    let (liquid_pct, illiquid_pct) = if assets > Decimal::ZERO {
        (
            liquid_assets / assets * dec!(100),
            illiquid_assets / assets * dec!(100),
        )
    } else {
        (Decimal::ZERO, Decimal::ZERO)
    };

    let months = Decimal::from(horizon_years * 12);
    let years = Decimal::from(horizon_years);
    let wealth_growth_multiple = if scenario.total_contributions > Decimal::ZERO {
        Some(net_worth / scenario.total_contributions)
    } else {
        None
    };

    ScenarioSummary {
        net_worth,
        assets,
        liabilities,
        liquid_assets,
        illiquid_assets,
        liquid_pct,
        illiquid_pct,
        avg_monthly_net_worth_growth: net_worth / months,
        avg_yearly_net_worth_growth: net_worth / years,
        wealth_growth_multiple,
    }
}

/// Run the full pipeline: validate, simulate, aggregate, score, classify,
/// summarize.
pub fn evaluate_scenario(
    params: &ScenarioParameters,
    config: &EngineConfig,
) -> WhatIfResult<ComputationOutput<ScenarioReport>> {
    let start = Instant::now();
    params.validate()?;

    let (simulation, mut warnings) = run_projection(params, config);
    let metrics = aggregate_metrics(&simulation.baseline, &simulation.scenario);
    let risk = score_risk(params, &metrics, config);
    let verdict = classify_verdict(params, &metrics, config);
    let summary = summarize(&simulation.scenario, params.horizon_years);

    if simulation.scenario.month_fi_reached.is_none() {
        warnings.push(format!(
            "Financial independence target {} not reached within the horizon",
            config.fi_target_capital
        ));
    }

    let report = ScenarioReport {
        simulation,
        metrics,
        risk,
        verdict,
        summary,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "What-if scenario evaluation (projection, metrics, risk, verdict)",
        &serde_json::json!({
            "horizon_years": params.horizon_years,
            "risk_profile": params.risk_profile,
            "monthly_investment": params.monthly_investment.to_string(),
            "extra_loan_payment": params.extra_loan_payment.to_string(),
            "fi_target_capital": config.fi_target_capital.to_string(),
        }),
        warnings,
        elapsed,
        report,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::params::RiskProfile;
    use crate::scenario::risk::RiskBand;
    use crate::scenario::verdict::VerdictLevel;

    fn scenario_a() -> ScenarioParameters {
        ScenarioParameters {
            monthly_investment: dec!(450),
            extra_loan_payment: dec!(200),
            discretionary_reduction_pct: Decimal::ZERO,
            staked_pct: dec!(50),
            risk_profile: RiskProfile::Balanced,
            horizon_years: 10,
        }
    }

    // ---------------------------------------------------------------
    // 1. Extra debt payoff: faster payoff, interest saved (scenario A)
    // ---------------------------------------------------------------
    #[test]
    fn test_debt_payoff_scenario() {
        let output = evaluate_scenario(&scenario_a(), &EngineConfig::default()).unwrap();
        let report = &output.result;

        assert!(report.metrics.payoff_shift_months > 0);
        assert!(report.metrics.interest_saved > Decimal::ZERO);
        assert_eq!(report.verdict.level, VerdictLevel::Balanced);
        // 35 + 6 (staked 50) + 10 (disc 0) - 10 (extra >= 200) = 41
        assert_eq!(report.risk.score, 41);
        assert_eq!(report.risk.band, RiskBand::Medium);
    }

    // ---------------------------------------------------------------
    // 2. Conservative under-contributor falls behind (scenario B)
    // ---------------------------------------------------------------
    #[test]
    fn test_conservative_undercontribution_cautioned() {
        let params = ScenarioParameters {
            monthly_investment: dec!(200),
            extra_loan_payment: Decimal::ZERO,
            discretionary_reduction_pct: Decimal::ZERO,
            staked_pct: Decimal::ZERO,
            risk_profile: RiskProfile::Conservative,
            horizon_years: 10,
        };
        let output = evaluate_scenario(&params, &EngineConfig::default()).unwrap();
        let report = &output.result;

        assert!(report.metrics.net_worth_delta < Decimal::ZERO);
        assert_eq!(report.verdict.level, VerdictLevel::Caution);
    }

    // ---------------------------------------------------------------
    // 3. Aggressive accumulator earns a Growth verdict (scenario C)
    // ---------------------------------------------------------------
    #[test]
    fn test_aggressive_growth_scenario() {
        let params = ScenarioParameters {
            monthly_investment: dec!(600),
            extra_loan_payment: Decimal::ZERO,
            discretionary_reduction_pct: dec!(20),
            staked_pct: Decimal::ZERO,
            risk_profile: RiskProfile::Aggressive,
            horizon_years: 10,
        };
        let output = evaluate_scenario(&params, &EngineConfig::default()).unwrap();
        let report = &output.result;

        assert!(report.metrics.net_worth_delta > Decimal::ZERO);
        assert!(report.metrics.compounding_gain > Decimal::ZERO);
        assert_eq!(report.verdict.level, VerdictLevel::Growth);
    }

    // ---------------------------------------------------------------
    // 4. Summary figures are consistent with the final ledger
    // ---------------------------------------------------------------
    #[test]
    fn test_summary_consistency() {
        let output = evaluate_scenario(&scenario_a(), &EngineConfig::default()).unwrap();
        let report = &output.result;
        let summary = &report.summary;
        let scenario = &report.simulation.scenario;

        assert_eq!(summary.assets, scenario.invest_balance);
        assert_eq!(
            summary.liquid_assets + summary.illiquid_assets,
            summary.assets
        );
        assert_eq!(summary.liquid_pct, dec!(60));
        assert_eq!(
            summary.avg_yearly_net_worth_growth,
            summary.net_worth / dec!(10)
        );
        let multiple = summary.wealth_growth_multiple.unwrap();
        assert!(multiple > Decimal::ONE);
    }

    // ---------------------------------------------------------------
    // 5. Horizon warnings
    // ---------------------------------------------------------------
    #[test]
    fn test_fi_warning_with_default_target() {
        let output = evaluate_scenario(&scenario_a(), &EngineConfig::default()).unwrap();
        assert_eq!(output.warnings.len(), 1);
        assert!(output.warnings[0].contains("independence"));

        let config = EngineConfig {
            fi_target_capital: dec!(5_000),
            ..EngineConfig::default()
        };
        let output = evaluate_scenario(&scenario_a(), &config).unwrap();
        assert!(output.warnings.is_empty());
    }

    // ---------------------------------------------------------------
    // 6. Invalid parameters never reach the simulator
    // ---------------------------------------------------------------
    #[test]
    fn test_invalid_params_rejected() {
        let mut params = scenario_a();
        params.horizon_years = 0;
        assert!(evaluate_scenario(&params, &EngineConfig::default()).is_err());
    }
}
