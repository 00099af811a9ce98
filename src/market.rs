//! Nash-style markup pricing, opportunity cost, and soft-max capacity allocation.

use ordered_float::OrderedFloat;

use crate::config::{MarketParams, TuningConstants};
use crate::forecast::{PeakHourMask, PriceForecast};
use crate::units::{Kw, Ratio, UsdPerKwh};

/// The best discounted future price the battery could realize, halved to reflect uncertainty.
///
/// `max_ev = max_i forecast[i] * discount_factor^i`. Returns 0 for an empty forecast.
#[must_use]
pub fn opportunity_cost(tuning: &TuningConstants, forecast: &[UsdPerKwh]) -> UsdPerKwh {
    let max_ev = forecast
        .iter()
        .enumerate()
        .map(|(i, price)| *price * tuning.discount_factor.powi(i32::try_from(i).unwrap_or(i32::MAX)))
        .max_by_key(|ev| OrderedFloat(ev.0))
        .unwrap_or(UsdPerKwh::ZERO);
    max_ev * 0.5
}

/// `market_price * (1 + markup)`, where the markup grows with demand and shrinks with
/// competition, saturating smoothly on both axes.
#[must_use]
pub fn nash_equilibrium_price(market: &MarketParams, market_price: UsdPerKwh, grid_demand: Kw, num_competitors: u32) -> UsdPerKwh {
    let demand_factor = (grid_demand / market.max_grid_demand).min(Ratio(1.5));
    let markup = market.alpha * demand_factor.0 / (f64::from(num_competitors) * market.beta + 1.0);
    market_price * (1.0 + markup)
}

/// Soft-max allocation of hourly capacity weights, concentrated on high-revenue hours by
/// `tuning.softmax_gamma`. Returns a probability distribution summing to 1.
#[must_use]
pub fn capacity_allocation(tuning: &TuningConstants, prices: &PriceForecast, peak_mask: &PeakHourMask) -> [f64; 24] {
    let mut weights = [0.0_f64; 24];
    for h in 0..24 {
        let multiplier = if peak_mask.is_peak(h) { tuning.peak_hour_revenue_multiplier } else { 1.0 };
        let expected_revenue = prices.hour(h).0 * multiplier;
        weights[h] = (tuning.softmax_gamma * expected_revenue).exp();
    }
    let sum: f64 = weights.iter().sum();
    for weight in &mut weights {
        *weight /= sum;
    }
    weights
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn test_opportunity_cost_empty_forecast_is_zero() {
        let tuning = TuningConstants::default();
        assert_eq!(opportunity_cost(&tuning, &[]), UsdPerKwh::ZERO);
    }

    #[test]
    fn test_opportunity_cost_picks_discounted_max() {
        let tuning = TuningConstants::default();
        let forecast = [UsdPerKwh(0.1), UsdPerKwh(0.5), UsdPerKwh(0.2)];
        let expected = 0.5 * f64::max(0.1, f64::max(0.5 * 0.9, 0.2 * 0.9 * 0.9));
        assert_relative_eq!(opportunity_cost(&tuning, &forecast).0, expected, epsilon = 1e-9);
    }

    #[test]
    fn test_nash_equilibrium_price_competition_monotonicity() {
        let market = MarketParams::default();
        let low = nash_equilibrium_price(&market, UsdPerKwh(0.3), Kw(40_000.0), 2);
        let high = nash_equilibrium_price(&market, UsdPerKwh(0.3), Kw(40_000.0), 20);
        assert!(high <= low);
    }

    #[test]
    fn test_nash_equilibrium_price_demand_saturates() {
        let market = MarketParams::default();
        let saturated = nash_equilibrium_price(&market, UsdPerKwh(0.3), Kw(1_000_000.0), 10);
        let at_cap = nash_equilibrium_price(&market, UsdPerKwh(0.3), Kw(75_000.0), 10);
        assert_relative_eq!(saturated.0, at_cap.0, epsilon = 1e-9);
    }

    #[test]
    fn test_capacity_allocation_sums_to_one_and_flat_prices_are_uniform() {
        let tuning = TuningConstants::default();
        let prices = PriceForecast::from_flat(0.10);
        let peak_mask = PeakHourMask::none();
        let weights = capacity_allocation(&tuning, &prices, &peak_mask);
        let sum: f64 = weights.iter().sum();
        assert_relative_eq!(sum, 1.0, epsilon = 1e-9);
        for weight in weights {
            assert_relative_eq!(weight, 1.0 / 24.0, epsilon = 1e-9);
            assert!(weight > 0.0 && weight < 1.0);
        }
    }

    #[test]
    fn test_capacity_allocation_favors_peak_hours() {
        let tuning = TuningConstants::default();
        let mut raw = [0.10_f64; 24];
        for h in 13..=18 {
            raw[h] = 0.40;
        }
        let prices = PriceForecast::try_from_prices(&raw).unwrap();
        let mut peak_flags = [false; 24];
        for h in 13..=18 {
            peak_flags[h] = true;
        }
        let peak_mask = PeakHourMask::from_flags(peak_flags);
        let weights = capacity_allocation(&tuning, &prices, &peak_mask);
        assert!(weights[14] > weights[0] * 2.0);
    }

    proptest::proptest! {
        /// Property 2: capacity allocation weights sum to 1 and each lies strictly in (0, 1).
        #[test]
        fn prop_capacity_allocation_is_a_distribution(
            raw in proptest::collection::vec(0.0_f64..2.0, 24..=24),
            peak_flags in proptest::collection::vec(proptest::prelude::any::<bool>(), 24..=24),
        ) {
            let tuning = TuningConstants::default();
            let prices = PriceForecast::try_from_prices(&raw).unwrap();
            let mut flags = [false; 24];
            flags.copy_from_slice(&peak_flags);
            let peak_mask = PeakHourMask::from_flags(flags);
            let weights = capacity_allocation(&tuning, &prices, &peak_mask);
            let sum: f64 = weights.iter().sum();
            proptest::prop_assert!((sum - 1.0).abs() < 1e-6);
            for weight in weights {
                proptest::prop_assert!(weight > 0.0 && weight < 1.0);
            }
        }

        /// Property 7: more competitors never raises the equilibrium price, all else equal.
        #[test]
        fn prop_nash_price_is_competition_monotone(
            market_price in 0.01_f64..2.0,
            grid_demand in 0.0_f64..100_000.0,
            low_competitors in 1_u32..50,
            extra_competitors in 0_u32..50,
        ) {
            let market = MarketParams::default();
            let high_competitors = low_competitors + extra_competitors;
            let low = nash_equilibrium_price(&market, UsdPerKwh(market_price), Kw(grid_demand), low_competitors);
            let high = nash_equilibrium_price(&market, UsdPerKwh(market_price), Kw(grid_demand), high_competitors);
            proptest::prop_assert!(high.0 <= low.0 + 1e-9);
        }
    }
}
