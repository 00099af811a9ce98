//! Marginal cost: the break-even `$/kWh` below which discharging destroys value.

use crate::config::{BatteryConfig, DegradationParams, MarketParams, TuningConstants};
use crate::degradation::degradation_cost_per_kwh;
use crate::units::{Ratio, UsdPerKwh};

/// Composes time-of-use base cost, degradation cost, opportunity cost, and risk premium into a
/// single `$/kWh`, grossed up for round-trip storage losses.
///
/// The daytime/nighttime boundary (reference: hours 6-18) is inclusive on both ends.
#[must_use]
pub fn marginal_cost(
    battery: &BatteryConfig,
    degradation: &DegradationParams,
    market: &MarketParams,
    tuning: &TuningConstants,
    hour_of_day: u8,
    dod: Ratio,
    opportunity_cost: UsdPerKwh,
) -> UsdPerKwh {
    let base =
        if tuning.is_daytime(hour_of_day) { tuning.day_base_cost_usd_per_kwh } else { tuning.night_base_cost_usd_per_kwh };
    let total_pre_eff = base + degradation_cost_per_kwh(battery, degradation, dod) + opportunity_cost + market.risk_factor;
    total_pre_eff / battery.round_trip_efficiency()
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::units::{Kwh, Usd};

    fn battery() -> BatteryConfig {
        BatteryConfig::builder().capacity_kwh(Kwh(6.5)).round_trip_efficiency(Ratio(0.95)).build().unwrap()
    }

    fn degradation() -> DegradationParams {
        DegradationParams::builder().replacement_cost_usd(Usd(5000.0)).build().unwrap()
    }

    #[test]
    fn test_daytime_boundary_is_inclusive() {
        let battery = battery();
        let degradation = degradation();
        let market = MarketParams::default();
        let tuning = TuningConstants::default();
        let at_six = marginal_cost(&battery, &degradation, &market, &tuning, 6, Ratio(0.1), UsdPerKwh::ZERO);
        let at_eighteen = marginal_cost(&battery, &degradation, &market, &tuning, 18, Ratio(0.1), UsdPerKwh::ZERO);
        let at_nineteen = marginal_cost(&battery, &degradation, &market, &tuning, 19, Ratio(0.1), UsdPerKwh::ZERO);
        assert!(at_six > at_nineteen);
        assert!(at_eighteen > at_nineteen);
    }

    #[test]
    fn test_marginal_cost_grossed_up_by_efficiency() {
        let battery = battery();
        let degradation = degradation();
        let market = MarketParams::default();
        let tuning = TuningConstants::default();
        let cost = marginal_cost(&battery, &degradation, &market, &tuning, 12, Ratio(0.0), UsdPerKwh::ZERO);
        let expected = (tuning.day_base_cost_usd_per_kwh.0 + market.risk_factor.0) / battery.round_trip_efficiency().0;
        assert_relative_eq!(cost.0, expected, epsilon = 1e-9);
    }
}
