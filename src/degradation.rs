//! Millner (2010) LFP stress model: maps depth-of-discharge to wear cost.
//!
//! Pure functions, no state. The exponential stress curve captures the superlinear wear of
//! deeper cycles; [`degradation_cost_per_kwh`] amortizes replacement cost over the lifetime
//! cycle count at that depth, scaled by the fraction of capacity actually cycled.

use crate::config::{BatteryConfig, DegradationParams};
use crate::units::{Ratio, UsdPerKwh};

/// `k_delta_e1 * dod * exp(k_delta_e2 * dod)`, defined for `dod` in `(0, 1]`.
#[must_use]
pub fn stress(params: &DegradationParams, dod: Ratio) -> f64 {
    if dod.0 <= 0.0 {
        return 0.0;
    }
    params.k_delta_e1() * dod.0 * (params.k_delta_e2() * dod.0).exp()
}

/// Equivalent full cycles to end-of-life at the given depth of discharge.
#[must_use]
pub fn cycles_at_dod(params: &DegradationParams, dod: Ratio) -> f64 {
    params.cycles_to_eol_ref() / stress(params, dod)
}

/// `$/kWh` amortized wear cost of cycling to the given depth of discharge.
///
/// Returns 0 for `dod <= 0`. No upper clamp: callers supply DoDs in `[0, 1]`.
#[must_use]
pub fn degradation_cost_per_kwh(battery: &BatteryConfig, params: &DegradationParams, dod: Ratio) -> UsdPerKwh {
    if dod.0 <= 0.0 {
        return UsdPerKwh::ZERO;
    }
    let per_cycle = params.replacement_cost_usd().0 / battery.capacity_kwh().0 / cycles_at_dod(params, dod);
    UsdPerKwh(per_cycle * dod.0)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn reference_battery() -> BatteryConfig {
        BatteryConfig::builder().capacity_kwh(crate::units::Kwh(6.5)).round_trip_efficiency(Ratio(0.95)).build().unwrap()
    }

    fn reference_degradation() -> DegradationParams {
        DegradationParams::builder().replacement_cost_usd(crate::units::Usd(5000.0)).build().unwrap()
    }

    #[test]
    fn test_stress_is_zero_at_zero_dod() {
        let params = reference_degradation();
        assert_eq!(stress(&params, Ratio(0.0)), 0.0);
    }

    #[test]
    fn test_stress_monotonicity() {
        let params = reference_degradation();
        let low = stress(&params, Ratio(0.2));
        let high = stress(&params, Ratio(0.8));
        assert!(low < high);
    }

    #[test]
    fn test_degradation_cost_matches_reference_formula() {
        let battery = reference_battery();
        let params = reference_degradation();
        let dod = Ratio(0.5);
        let expected =
            (params.replacement_cost_usd().0 / battery.capacity_kwh().0) * (stress(&params, dod) / params.cycles_to_eol_ref()) * dod.0;
        assert_relative_eq!(degradation_cost_per_kwh(&battery, &params, dod).0, expected, epsilon = 1e-9);
    }

    #[test]
    fn test_degradation_cost_zero_at_zero_dod() {
        let battery = reference_battery();
        let params = reference_degradation();
        assert_eq!(degradation_cost_per_kwh(&battery, &params, Ratio(0.0)), UsdPerKwh::ZERO);
    }

    proptest::proptest! {
        /// Property 6: stress strictly increases with depth of discharge.
        #[test]
        fn prop_stress_is_monotone_in_dod(low in 0.001_f64..0.98, gap in 0.001_f64..0.02) {
            let params = reference_degradation();
            let high = (low + gap).min(1.0);
            proptest::prop_assume!(high > low);
            proptest::prop_assert!(stress(&params, Ratio(low)) < stress(&params, Ratio(high)));
        }
    }
}
