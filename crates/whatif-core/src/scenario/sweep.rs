use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::WhatIfError;
use crate::scenario::metrics::aggregate_metrics;
use crate::scenario::params::{EngineConfig, ScenarioParameters};
use crate::scenario::risk::{score_risk, RiskBand};
use crate::scenario::simulate::run_projection;
use crate::scenario::verdict::{classify_verdict, VerdictLevel};
use crate::types::{with_metadata, ComputationOutput, Money};
use crate::WhatIfResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Parameter varied by a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SweepField {
    MonthlyInvestment,
    ExtraLoanPayment,
    DiscretionaryReductionPct,
    StakedPct,
    HorizonYears,
}

/// One-variable sweep request: run the full pipeline at each value of
/// `field` from `min` to `max` by `step`, holding the other parameters at
/// their base values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepInput {
    pub base: ScenarioParameters,
    pub field: SweepField,
    pub min: Decimal,
    pub max: Decimal,
    pub step: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepPoint {
    pub value: Decimal,
    pub net_worth_delta: Money,
    pub interest_saved: Money,
    pub risk_score: u8,
    pub risk_band: RiskBand,
    pub verdict: VerdictLevel,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepOutput {
    pub field: SweepField,
    pub points: Vec<SweepPoint>,
}

// ---------------------------------------------------------------------------
// Core functions
// ---------------------------------------------------------------------------

/// Generate the sweep values from min to max with step. The max value is
/// always included even when the step does not land on it.
fn generate_sweep_values(input: &SweepInput) -> WhatIfResult<Vec<Decimal>> {
    if input.step <= Decimal::ZERO {
        return Err(WhatIfError::InvalidInput {
            field: "step".into(),
            reason: "must be positive".into(),
        });
    }
    if input.min > input.max {
        return Err(WhatIfError::InvalidInput {
            field: "min".into(),
            reason: "must be <= max".into(),
        });
    }

    let mut values = Vec::new();
    let mut current = input.min;
    while current <= input.max {
        values.push(current);
        current += input.step;
    }
    if let Some(&last) = values.last() {
        if last < input.max {
            values.push(input.max);
        }
    }
    Ok(values)
}

fn apply_value(
    base: &ScenarioParameters,
    field: SweepField,
    value: Decimal,
) -> WhatIfResult<ScenarioParameters> {
    let mut params = base.clone();
    match field {
        SweepField::MonthlyInvestment => params.monthly_investment = value,
        SweepField::ExtraLoanPayment => params.extra_loan_payment = value,
        SweepField::DiscretionaryReductionPct => params.discretionary_reduction_pct = value,
        SweepField::StakedPct => params.staked_pct = value,
        SweepField::HorizonYears => {
            if !value.fract().is_zero() {
                return Err(WhatIfError::InvalidInput {
                    field: "horizon_years".into(),
                    reason: "sweep values must be whole years".into(),
                });
            }
            params.horizon_years = value.to_u32().ok_or_else(|| WhatIfError::InvalidInput {
                field: "horizon_years".into(),
                reason: "sweep value out of range".into(),
            })?;
        }
    }
    params.validate()?;
    Ok(params)
}

/// Re-run the full pipeline at each sweep value.
pub fn sweep_parameter(
    input: &SweepInput,
    config: &EngineConfig,
) -> WhatIfResult<ComputationOutput<SweepOutput>> {
    let start = Instant::now();
    let warnings: Vec<String> = Vec::new();

    let values = generate_sweep_values(input)?;

    let mut points = Vec::with_capacity(values.len());
    for value in values {
        let params = apply_value(&input.base, input.field, value)?;
        let (simulation, _) = run_projection(&params, config);
        let metrics = aggregate_metrics(&simulation.baseline, &simulation.scenario);
        let risk = score_risk(&params, &metrics, config);
        let verdict = classify_verdict(&params, &metrics, config);

        points.push(SweepPoint {
            value,
            net_worth_delta: metrics.net_worth_delta,
            interest_saved: metrics.interest_saved,
            risk_score: risk.score,
            risk_band: risk.band,
            verdict: verdict.level,
        });
    }

    let output = SweepOutput {
        field: input.field,
        points,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "One-variable scenario sweep",
        &serde_json::json!({
            "field": input.field,
            "min": input.min.to_string(),
            "max": input.max.to_string(),
            "step": input.step.to_string(),
        }),
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::params::RiskProfile;
    use rust_decimal_macros::dec;

    fn base_params() -> ScenarioParameters {
        ScenarioParameters {
            monthly_investment: dec!(300),
            extra_loan_payment: Decimal::ZERO,
            discretionary_reduction_pct: Decimal::ZERO,
            staked_pct: Decimal::ZERO,
            risk_profile: RiskProfile::Balanced,
            horizon_years: 10,
        }
    }

    fn sweep_input(field: SweepField, min: Decimal, max: Decimal, step: Decimal) -> SweepInput {
        SweepInput {
            base: base_params(),
            field,
            min,
            max,
            step,
        }
    }

    #[test]
    fn test_contribution_sweep_is_monotone() {
        let input = sweep_input(SweepField::MonthlyInvestment, dec!(300), dec!(500), dec!(100));
        let output = sweep_parameter(&input, &EngineConfig::default()).unwrap();
        let points = &output.result.points;

        assert_eq!(points.len(), 3);
        assert_eq!(points[0].value, dec!(300));
        assert_eq!(points[0].net_worth_delta, Decimal::ZERO);
        for pair in points.windows(2) {
            assert!(pair[1].net_worth_delta > pair[0].net_worth_delta);
        }
    }

    #[test]
    fn test_max_value_always_included() {
        let input = sweep_input(SweepField::ExtraLoanPayment, dec!(0), dec!(250), dec!(100));
        let output = sweep_parameter(&input, &EngineConfig::default()).unwrap();
        let values: Vec<Decimal> = output.result.points.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![dec!(0), dec!(100), dec!(200), dec!(250)]);
    }

    #[test]
    fn test_extra_payment_sweep_saves_interest() {
        let input = sweep_input(SweepField::ExtraLoanPayment, dec!(0), dec!(200), dec!(200));
        let output = sweep_parameter(&input, &EngineConfig::default()).unwrap();
        let points = &output.result.points;
        assert_eq!(points[0].interest_saved, Decimal::ZERO);
        assert!(points[1].interest_saved > Decimal::ZERO);
    }

    #[test]
    fn test_invalid_step_rejected() {
        let input = sweep_input(SweepField::StakedPct, dec!(0), dec!(100), Decimal::ZERO);
        assert!(sweep_parameter(&input, &EngineConfig::default()).is_err());

        let input = sweep_input(SweepField::StakedPct, dec!(50), dec!(10), dec!(10));
        assert!(sweep_parameter(&input, &EngineConfig::default()).is_err());
    }

    #[test]
    fn test_fractional_horizon_rejected() {
        let input = sweep_input(SweepField::HorizonYears, dec!(1), dec!(2), dec!(0.5));
        assert!(sweep_parameter(&input, &EngineConfig::default()).is_err());
    }

    #[test]
    fn test_out_of_range_sweep_value_rejected() {
        // A staked percentage beyond 100 fails parameter validation.
        let input = sweep_input(SweepField::StakedPct, dec!(80), dec!(120), dec!(20));
        assert!(sweep_parameter(&input, &EngineConfig::default()).is_err());
    }
}
