//! Validated, builder-constructed configuration types.
//!
//! [`BatteryConfig`] and [`DegradationParams`] are immutable once built and reject malformed
//! input at construction time. [`MarketParams`] and [`TuningConstants`] have no cross-field
//! invariant to check, so their builders are infallible.

use crate::error::ConfigurationError;
use crate::units::{Kw, Kwh, Ratio, Usd, UsdPerKwh};

/// Battery capacity, efficiency, and usable state-of-charge band.
#[derive(Clone, Copy, Debug, bon::Builder)]
#[builder(finish_fn = build_unchecked)]
pub struct BatteryConfig {
    capacity_kwh: Kwh,
    round_trip_efficiency: Ratio,
    #[builder(default = Ratio(0.1))]
    min_soc: Ratio,
    #[builder(default = Ratio(0.9))]
    max_soc: Ratio,
}

impl<S: battery_config_builder::State> BatteryConfigBuilder<S> {
    /// Validates every field and builds the config, or reports the first violation found.
    pub fn build(self) -> Result<BatteryConfig, ConfigurationError>
    where
        S: battery_config_builder::IsComplete,
    {
        let config = self.build_unchecked();
        if !config.capacity_kwh.0.is_finite() {
            return Err(ConfigurationError::NonFinite { field: "capacity_kwh", value: config.capacity_kwh.0 });
        }
        if config.capacity_kwh.0 <= 0.0 {
            return Err(ConfigurationError::NonPositiveCapacity(config.capacity_kwh.0));
        }
        if !config.round_trip_efficiency.0.is_finite() {
            return Err(ConfigurationError::NonFinite {
                field: "round_trip_efficiency",
                value: config.round_trip_efficiency.0,
            });
        }
        if config.round_trip_efficiency.0 <= 0.0 || config.round_trip_efficiency.0 > 1.0 {
            return Err(ConfigurationError::EfficiencyOutOfRange(config.round_trip_efficiency.0));
        }
        if !config.min_soc.0.is_finite() || !config.max_soc.0.is_finite() {
            return Err(ConfigurationError::NonFinite {
                field: "min_soc/max_soc",
                value: if config.min_soc.0.is_finite() { config.max_soc.0 } else { config.min_soc.0 },
            });
        }
        if config.min_soc.0 < 0.0 || config.max_soc.0 > 1.0 || config.min_soc.0 >= config.max_soc.0 {
            return Err(ConfigurationError::SocBoundsOutOfRange { min: config.min_soc.0, max: config.max_soc.0 });
        }
        Ok(config)
    }
}

impl BatteryConfig {
    pub const fn capacity_kwh(&self) -> Kwh {
        self.capacity_kwh
    }

    pub const fn round_trip_efficiency(&self) -> Ratio {
        self.round_trip_efficiency
    }

    pub const fn min_soc(&self) -> Ratio {
        self.min_soc
    }

    pub const fn max_soc(&self) -> Ratio {
        self.max_soc
    }
}

/// Millner (2010) LFP stress-model coefficients and replacement economics.
#[derive(Clone, Copy, Debug, bon::Builder)]
#[builder(finish_fn = build_unchecked)]
pub struct DegradationParams {
    replacement_cost_usd: Usd,
    #[builder(default = 0.693)]
    k_delta_e1: f64,
    #[builder(default = 3.31)]
    k_delta_e2: f64,
    #[builder(default = 5000.0)]
    cycles_to_eol_ref: f64,
}

impl<S: degradation_params_builder::State> DegradationParamsBuilder<S> {
    pub fn build(self) -> Result<DegradationParams, ConfigurationError>
    where
        S: degradation_params_builder::IsComplete,
    {
        let params = self.build_unchecked();
        if !params.replacement_cost_usd.0.is_finite() {
            return Err(ConfigurationError::NonFinite {
                field: "replacement_cost_usd",
                value: params.replacement_cost_usd.0,
            });
        }
        if params.replacement_cost_usd.0 <= 0.0 {
            return Err(ConfigurationError::NonPositiveReplacementCost(params.replacement_cost_usd.0));
        }
        if !params.cycles_to_eol_ref.is_finite() {
            return Err(ConfigurationError::NonFinite { field: "cycles_to_eol_ref", value: params.cycles_to_eol_ref });
        }
        if params.cycles_to_eol_ref <= 0.0 {
            return Err(ConfigurationError::NonPositiveCyclesToEol(params.cycles_to_eol_ref));
        }
        if !params.k_delta_e1.is_finite() || !params.k_delta_e2.is_finite() {
            return Err(ConfigurationError::NonFinite {
                field: "k_delta_e1/k_delta_e2",
                value: if params.k_delta_e1.is_finite() { params.k_delta_e2 } else { params.k_delta_e1 },
            });
        }
        Ok(params)
    }
}

impl DegradationParams {
    pub const fn replacement_cost_usd(&self) -> Usd {
        self.replacement_cost_usd
    }

    pub const fn k_delta_e1(&self) -> f64 {
        self.k_delta_e1
    }

    pub const fn k_delta_e2(&self) -> f64 {
        self.k_delta_e2
    }

    pub const fn cycles_to_eol_ref(&self) -> f64 {
        self.cycles_to_eol_ref
    }
}

/// Market-facing parameters, tunable from historical analysis between bidding calls.
#[derive(Clone, Copy, Debug, bon::Builder)]
pub struct MarketParams {
    #[builder(default = UsdPerKwh(0.05))]
    pub risk_factor: UsdPerKwh,
    #[builder(default = 0.3)]
    pub alpha: f64,
    #[builder(default = 0.2)]
    pub beta: f64,
    #[builder(default = Kw(50_000.0))]
    pub max_grid_demand: Kw,
}

impl Default for MarketParams {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// The remaining named constants from the reference model, bundled as data so tests can drive
/// edge cases without patching globals.
#[derive(Clone, Copy, Debug, bon::Builder)]
pub struct TuningConstants {
    #[builder(default = 0.9)]
    pub discount_factor: f64,
    #[builder(default = 2.0)]
    pub softmax_gamma: f64,
    #[builder(default = UsdPerKwh(0.29))]
    pub day_base_cost_usd_per_kwh: UsdPerKwh,
    #[builder(default = UsdPerKwh(0.10))]
    pub night_base_cost_usd_per_kwh: UsdPerKwh,
    /// Inclusive `(start, end)` hour-of-day bounds of the daytime tariff window.
    #[builder(default = (6, 18))]
    pub day_window: (u8, u8),
    #[builder(default = 1.2)]
    pub peak_hour_revenue_multiplier: f64,
    #[builder(default = 0.05)]
    pub fast_dr_forecast_slope: f64,
    #[builder(default = 10)]
    pub fast_dr_num_competitors: u32,
    #[builder(default = 0.15)]
    pub cbp_peak_markup: f64,
    #[builder(default = 0.05)]
    pub cbp_off_peak_markup: f64,
    #[builder(default = 0.20)]
    pub cbp_peak_cost_markup: f64,
    #[builder(default = 0.10)]
    pub cbp_off_peak_cost_markup: f64,
    #[builder(default = Ratio(0.01))]
    pub cycle_depth_threshold: Ratio,
    #[builder(default = 1000)]
    pub cycle_log_initial_capacity: usize,
}

impl Default for TuningConstants {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl TuningConstants {
    /// Whether `hour` falls inside the inclusive daytime tariff window.
    #[must_use]
    pub const fn is_daytime(&self, hour: u8) -> bool {
        hour >= self.day_window.0 && hour <= self.day_window.1
    }
}
