//! Fixed-length, 24-hour forecast and bid types, plus the reference peak-hour policy.
//!
//! `PriceForecast` and `PeakHourMask` are backed by fixed-size arrays so the "must be 24 hours
//! long" invariant from the market-data contract is enforced at the type level rather than with
//! a runtime check on every call; [`PriceForecast::try_from_prices`] remains the fallible entry
//! point for ingesting raw data of unknown length from a collaborator.

use crate::error::InputError;
use crate::units::{Kwh, UsdPerKwh};

pub const HORIZON: usize = 24;

/// An ordered sequence of 24 hourly `$/kWh` prices.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PriceForecast([UsdPerKwh; HORIZON]);

impl PriceForecast {
    #[must_use]
    pub const fn hour(&self, h: usize) -> UsdPerKwh {
        self.0[h]
    }

    #[must_use]
    pub fn as_slice(&self) -> &[UsdPerKwh] {
        &self.0
    }

    #[must_use]
    pub const fn from_flat(price: f64) -> Self {
        Self([UsdPerKwh(price); HORIZON])
    }

    /// Ingests raw, possibly-malformed prices from a collaborator. Rejects wrong-length input
    /// and non-finite values.
    pub fn try_from_prices(prices: &[f64]) -> Result<Self, InputError> {
        if prices.len() != HORIZON {
            return Err(InputError::WrongForecastLength { expected: HORIZON, actual: prices.len() });
        }
        let mut out = [UsdPerKwh::ZERO; HORIZON];
        for (i, price) in prices.iter().enumerate() {
            if !price.is_finite() {
                return Err(InputError::NonFiniteInput { field: "price_forecast", value: *price });
            }
            out[i] = UsdPerKwh(*price);
        }
        Ok(Self(out))
    }

    /// Rotates the forecast left by `offset` hours, wrapping around. Used by the CBP loop to
    /// model the remaining horizon from a given hour.
    #[must_use]
    pub fn rotated_left(&self, offset: usize) -> Self {
        let mut out = [UsdPerKwh::ZERO; HORIZON];
        for i in 0..HORIZON {
            out[i] = self.0[(i + offset) % HORIZON];
        }
        Self(out)
    }

    /// Builds the deliberate synthetic rising forecast Fast DR uses as a placeholder when no
    /// real forecast is supplied: `market_price * (1 + slope * i)` for `i` in `0..24`.
    #[must_use]
    pub fn synthetic_rising(market_price: UsdPerKwh, slope: f64) -> Self {
        let mut out = [UsdPerKwh::ZERO; HORIZON];
        for (i, slot) in out.iter_mut().enumerate() {
            *slot = market_price * (1.0 + slope * i as f64);
        }
        Self(out)
    }
}

/// A 24-element boolean mask of which hours count as peak hours.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PeakHourMask([bool; HORIZON]);

impl PeakHourMask {
    #[must_use]
    pub const fn is_peak(&self, h: usize) -> bool {
        self.0[h]
    }

    #[must_use]
    pub const fn from_flags(flags: [bool; HORIZON]) -> Self {
        Self(flags)
    }

    #[must_use]
    pub const fn none() -> Self {
        Self([false; HORIZON])
    }

    /// The reference peak-hour policy: the top-6 hours by forecast price, ties broken by
    /// earliest hour.
    #[must_use]
    pub fn reference_peak_mask(prices: &PriceForecast) -> Self {
        use itertools::Itertools;
        use ordered_float::OrderedFloat;

        let mut flags = [false; HORIZON];
        for h in (0..HORIZON).sorted_by_key(|&h| (std::cmp::Reverse(OrderedFloat(prices.hour(h).0)), h)).take(6) {
            flags[h] = true;
        }
        Self(flags)
    }
}

/// A single bid: capacity offered and the price at which it is offered.
///
/// `capacity_kwh == 0` means "do not participate this slot".
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bid {
    pub capacity_kwh: Kwh,
    pub price_usd_per_kwh: UsdPerKwh,
}

impl Bid {
    #[must_use]
    pub const fn none() -> Self {
        Self { capacity_kwh: Kwh::ZERO, price_usd_per_kwh: UsdPerKwh::ZERO }
    }

    #[must_use]
    pub fn is_participating(&self) -> bool {
        self.capacity_kwh.0 > 0.0
    }
}

/// A pure convenience wrapper around [`PeakHourMask::reference_peak_mask`], matching the
/// collaborator contract's naming.
#[must_use]
pub fn reference_peak_mask(prices: &PriceForecast) -> PeakHourMask {
    PeakHourMask::reference_peak_mask(prices)
}
