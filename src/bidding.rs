//! The bidding engine: the two public entry points a caller drives a bidding cycle through.

use chrono::{DateTime, Local};

use crate::battery::{BatteryState, available_energy, dod_of, usable_capacity};
use crate::config::{BatteryConfig, DegradationParams, MarketParams, TuningConstants};
use crate::cost::marginal_cost;
use crate::error::{AllocationError, InputError};
use crate::forecast::{Bid, PeakHourMask, PriceForecast};
use crate::market::{capacity_allocation, nash_equilibrium_price, opportunity_cost};
use crate::prelude::*;
use crate::units::{Hours, Kw, Kwh, Ratio, UsdPerKwh};

/// The owned aggregate a single demand-response participant drives a bidding cycle through.
///
/// One logical owner. If a runtime invokes `fast_dr_bid`, `cbp_strategy`, and `update_soc`
/// concurrently from multiple tasks, the caller must serialize access under a single
/// mutual-exclusion guard; `DrStrategy` is `Send` but intentionally carries no internal lock.
#[derive(Clone, Debug)]
pub struct DrStrategy {
    battery: BatteryConfig,
    degradation: DegradationParams,
    market: MarketParams,
    tuning: TuningConstants,
    state: BatteryState,
}

impl DrStrategy {
    #[must_use]
    pub fn new(battery: BatteryConfig, degradation: DegradationParams, market: MarketParams, tuning: TuningConstants, initial_soc: Ratio) -> Self {
        let state = BatteryState::new(&battery, &tuning, initial_soc);
        Self { battery, degradation, market, tuning, state }
    }

    #[must_use]
    pub const fn state(&self) -> &BatteryState {
        &self.state
    }

    /// Replaces the whole parameter set atomically. Partial field mutation is intentionally not
    /// exposed, so a reader never observes a half-updated `MarketParams`.
    pub fn set_market_params(&mut self, market: MarketParams) {
        self.market = market;
    }

    /// Applies a discharge (positive) or charge (negative) and records a cycle if warranted.
    pub fn update_soc(&mut self, energy_delivered: Kwh, temperature_c: f64, timestamp: DateTime<Local>) -> Result<(), AllocationError> {
        self.state.update_soc(&self.battery, &self.tuning, energy_delivered, temperature_c, timestamp)
    }

    /// Decides a Fast DR Dispatch bid for the current instant.
    ///
    /// `forecast_override` lets a caller pin the forecast used for the opportunity-cost term;
    /// absent one, the synthetic rising forecast from the reference formula is used.
    #[instrument(skip_all, fields(hour_of_day, soc = %self.state.current_soc().0))]
    pub fn fast_dr_bid(
        &self,
        market_price: UsdPerKwh,
        grid_demand: Kw,
        time_window: Hours,
        hour_of_day: u8,
        forecast_override: Option<&PriceForecast>,
    ) -> Result<Bid, InputError> {
        if !market_price.0.is_finite() {
            return Err(InputError::NonFiniteInput { field: "market_price", value: market_price.0 });
        }
        if !grid_demand.0.is_finite() {
            return Err(InputError::NonFiniteInput { field: "grid_demand", value: grid_demand.0 });
        }
        if !time_window.0.is_finite() {
            return Err(InputError::NonFiniteInput { field: "time_window", value: time_window.0 });
        }

        let available = available_energy(&self.battery, &self.state);
        let dod_estimate = dod_of(&self.battery, available);

        let synthetic = PriceForecast::synthetic_rising(market_price, self.tuning.fast_dr_forecast_slope);
        let forecast = forecast_override.unwrap_or(&synthetic);
        let opp_cost = opportunity_cost(&self.tuning, forecast.as_slice());
        let mc = marginal_cost(&self.battery, &self.degradation, &self.market, &self.tuning, hour_of_day, dod_estimate, opp_cost);
        let nash = nash_equilibrium_price(&self.market, market_price, grid_demand, self.tuning.fast_dr_num_competitors);

        debug!(marginal_cost = mc.0, nash_price = nash.0, "fast DR pricing");

        if nash > mc {
            let bid_capacity =
                available.min(self.battery.capacity_kwh() * time_window.0 * self.battery.round_trip_efficiency().0);
            Ok(Bid { capacity_kwh: bid_capacity, price_usd_per_kwh: nash })
        } else {
            Ok(Bid::none())
        }
    }

    /// Allocates 24 hourly Capacity Bidding Program bids from a day-ahead price forecast and
    /// peak-hour mask.
    ///
    /// Unlike Fast DR, every hour receives a non-zero allocation weighted by the soft-max
    /// distribution; the price floor of `marginal_cost * (1 + cost_markup)` guarantees a
    /// cost-plus margin even when market prices are depressed.
    #[instrument(skip_all, fields(soc = %self.state.current_soc().0))]
    pub fn cbp_strategy(&self, day_ahead_prices: &PriceForecast, peak_mask: &PeakHourMask) -> [Bid; 24] {
        let weights = capacity_allocation(&self.tuning, day_ahead_prices, peak_mask);
        let avail_energy = usable_capacity(&self.battery);

        let mut bids = [Bid::none(); 24];
        for h in 0..24 {
            let rotated = day_ahead_prices.rotated_left(h);
            let opp_cost = opportunity_cost(&self.tuning, rotated.as_slice());
            let hour_cap = avail_energy * weights[h];
            let dod = dod_of(&self.battery, hour_cap);
            let hour_of_day = u8::try_from(h).expect("h is in 0..24");
            let mc = marginal_cost(&self.battery, &self.degradation, &self.market, &self.tuning, hour_of_day, dod, opp_cost);

            let (markup, cost_markup) = if peak_mask.is_peak(h) {
                (self.tuning.cbp_peak_markup, self.tuning.cbp_peak_cost_markup)
            } else {
                (self.tuning.cbp_off_peak_markup, self.tuning.cbp_off_peak_cost_markup)
            };
            let price = (day_ahead_prices.hour(h) * (1.0 + markup)).max(mc * (1.0 + cost_markup));

            trace!(hour = h, capacity = hour_cap.0, price = price.0, "CBP hour allocated");
            bids[h] = Bid { capacity_kwh: hour_cap, price_usd_per_kwh: price };
        }
        bids
    }
}
