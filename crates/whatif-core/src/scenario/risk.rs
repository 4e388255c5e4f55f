use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::scenario::metrics::ComparisonMetrics;
use crate::scenario::params::{EngineConfig, RiskProfile, ScenarioParameters};

/// Qualitative risk band derived from the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskBand {
    Low,
    Medium,
    High,
    Unsustainable,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// 0-100
    pub score: u8,
    pub band: RiskBand,
}

/// Additive heuristic risk score. Not a statistical model: each adjustment
/// nudges the profile base score, and the sum is clamped to [0, 100].
pub fn score_risk(
    params: &ScenarioParameters,
    metrics: &ComparisonMetrics,
    config: &EngineConfig,
) -> RiskAssessment {
    let mut score = match params.risk_profile {
        RiskProfile::Conservative => dec!(10),
        RiskProfile::Balanced => dec!(35),
        RiskProfile::Aggressive => dec!(60),
    };

    // Staking concentration
    if params.staked_pct > dec!(40) {
        score += dec!(0.6) * (params.staked_pct - dec!(40));
    } else if params.staked_pct < dec!(20) {
        score -= dec!(5);
    }

    // Discretionary belt-tightening frees buffer; barely cutting adds risk
    if params.discretionary_reduction_pct >= dec!(15) {
        score -= dec!(10);
    } else if params.discretionary_reduction_pct <= dec!(5) {
        score += dec!(10);
    }

    // Contribution level vs the chosen profile
    if params.monthly_investment < config.base_monthly_investment
        && params.risk_profile != RiskProfile::Conservative
    {
        score += dec!(10);
    } else if params.monthly_investment - config.base_monthly_investment >= dec!(200) {
        score -= dec!(5);
    }

    // Debt posture
    if params.extra_loan_payment >= dec!(200) {
        score -= dec!(10);
    } else if params.extra_loan_payment.is_zero()
        && metrics.payoff_shift_months <= 0
        && metrics.interest_saved <= dec!(100)
    {
        score += dec!(5);
    }

    let clamped = score.clamp(Decimal::ZERO, dec!(100));
    let score = clamped.round().to_u8().unwrap_or(0);
    RiskAssessment {
        score,
        band: score_to_band(score),
    }
}

fn score_to_band(score: u8) -> RiskBand {
    if score < 25 {
        RiskBand::Low
    } else if score < 50 {
        RiskBand::Medium
    } else if score < 75 {
        RiskBand::High
    } else {
        RiskBand::Unsustainable
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn zero_metrics() -> ComparisonMetrics {
        ComparisonMetrics {
            net_worth_delta: Decimal::ZERO,
            interest_saved: Decimal::ZERO,
            payoff_shift_months: 0,
            fi_shift_months: None,
            contribution_diff: Decimal::ZERO,
            compounding_gain: Decimal::ZERO,
        }
    }

    fn params(
        profile: RiskProfile,
        monthly: Decimal,
        extra: Decimal,
        staked: Decimal,
        disc: Decimal,
    ) -> ScenarioParameters {
        ScenarioParameters {
            monthly_investment: monthly,
            extra_loan_payment: extra,
            discretionary_reduction_pct: disc,
            staked_pct: staked,
            risk_profile: profile,
            horizon_years: 10,
        }
    }

    // ---------------------------------------------------------------
    // 1. Neutral adjustments leave the profile base score
    // ---------------------------------------------------------------
    #[test]
    fn test_base_score_by_profile() {
        let config = EngineConfig::default();
        // staked 30 and disc 10 fall between every threshold, monthly
        // matches the baseline, extra 100 triggers neither debt branch.
        let p = params(RiskProfile::Conservative, dec!(300), dec!(100), dec!(30), dec!(10));
        let assessment = score_risk(&p, &zero_metrics(), &config);
        assert_eq!(assessment.score, 10);
        assert_eq!(assessment.band, RiskBand::Low);
    }

    // ---------------------------------------------------------------
    // 2. Heavy staking plus idle debt pushes Balanced into Unsustainable
    // ---------------------------------------------------------------
    #[test]
    fn test_heavy_staking_unsustainable() {
        let config = EngineConfig::default();
        // 35 + 36 (staked 100) + 10 (disc 0) + 0 + 5 (idle debt) = 86
        let p = params(RiskProfile::Balanced, dec!(300), Decimal::ZERO, dec!(100), Decimal::ZERO);
        let assessment = score_risk(&p, &zero_metrics(), &config);
        assert_eq!(assessment.score, 86);
        assert_eq!(assessment.band, RiskBand::Unsustainable);
    }

    // ---------------------------------------------------------------
    // 3. Clamping at both ends
    // ---------------------------------------------------------------
    #[test]
    fn test_score_clamped_to_bounds() {
        let config = EngineConfig::default();
        // 60 + 36 + 10 + 10 (under-contributing on Aggressive) + 5 = 121
        let high = params(RiskProfile::Aggressive, dec!(100), Decimal::ZERO, dec!(100), Decimal::ZERO);
        assert_eq!(score_risk(&high, &zero_metrics(), &config).score, 100);

        // 10 - 5 (staked 0) - 10 (disc 20) - 5 (monthly +300) - 10 (extra 250) = -20
        let low = params(RiskProfile::Conservative, dec!(600), dec!(250), Decimal::ZERO, dec!(20));
        let assessment = score_risk(&low, &zero_metrics(), &config);
        assert_eq!(assessment.score, 0);
        assert_eq!(assessment.band, RiskBand::Low);
    }

    // ---------------------------------------------------------------
    // 4. Band boundaries
    // ---------------------------------------------------------------
    #[test]
    fn test_band_boundaries() {
        assert_eq!(score_to_band(0), RiskBand::Low);
        assert_eq!(score_to_band(24), RiskBand::Low);
        assert_eq!(score_to_band(25), RiskBand::Medium);
        assert_eq!(score_to_band(49), RiskBand::Medium);
        assert_eq!(score_to_band(50), RiskBand::High);
        assert_eq!(score_to_band(74), RiskBand::High);
        assert_eq!(score_to_band(75), RiskBand::Unsustainable);
        assert_eq!(score_to_band(100), RiskBand::Unsustainable);
    }

    // ---------------------------------------------------------------
    // 5. Score stays within [0, 100] across a parameter grid
    // ---------------------------------------------------------------
    #[test]
    fn test_score_bounds_over_grid() {
        let config = EngineConfig::default();
        let profiles = [
            RiskProfile::Conservative,
            RiskProfile::Balanced,
            RiskProfile::Aggressive,
        ];
        for profile in profiles {
            for staked in [dec!(0), dec!(19), dec!(20), dec!(40), dec!(41), dec!(100)] {
                for disc in [dec!(0), dec!(5), dec!(6), dec!(15), dec!(100)] {
                    for monthly in [dec!(0), dec!(299), dec!(300), dec!(500), dec!(5_000)] {
                        for extra in [dec!(0), dec!(199), dec!(200), dec!(1_000)] {
                            let p = params(profile, monthly, extra, staked, disc);
                            let assessment = score_risk(&p, &zero_metrics(), &config);
                            assert!(assessment.score <= 100);
                        }
                    }
                }
            }
        }
    }

    // ---------------------------------------------------------------
    // 6. Idle-debt bump requires all three conditions
    // ---------------------------------------------------------------
    #[test]
    fn test_idle_debt_bump_conditions() {
        let config = EngineConfig::default();
        let p = params(RiskProfile::Conservative, dec!(300), Decimal::ZERO, dec!(30), dec!(10));

        let mut metrics = zero_metrics();
        assert_eq!(score_risk(&p, &metrics, &config).score, 15);

        // A positive payoff shift disables the bump.
        metrics.payoff_shift_months = 3;
        assert_eq!(score_risk(&p, &metrics, &config).score, 10);

        // So does meaningful interest saved.
        metrics.payoff_shift_months = 0;
        metrics.interest_saved = dec!(101);
        assert_eq!(score_risk(&p, &metrics, &config).score, 10);
    }
}
