//! Battery state: state of charge and the rainflow cycle-counting accumulator.

use std::collections::VecDeque;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::config::{BatteryConfig, TuningConstants};
use crate::error::AllocationError;
use crate::prelude::*;
use crate::units::{Kwh, Ratio};

/// One recorded discharge episode from the rainflow counter.
///
/// Only appended when `depth` exceeds the configured threshold (reference: 0.01). Temperature is
/// recorded for a future Arrhenius-style extension; the current cost model does not read it.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct RainflowCycle {
    pub depth: Ratio,
    pub mean_soc: Ratio,
    pub temperature_c: f64,
    pub timestamp: DateTime<Local>,
}

/// An append-only, amortized-O(1)-growth log of [`RainflowCycle`] records.
///
/// In bounded mode (`with_capacity_bound`), the oldest record is evicted on overflow instead of
/// growing further; backed by a [`VecDeque`] so eviction is an O(1) `pop_front`, not a shift of
/// every remaining element. `equivalent_full_cycles` lives on [`BatteryState`], not here, so
/// eviction never perturbs it.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct CycleLog {
    cycles: VecDeque<RainflowCycle>,
    bound: Option<usize>,
}

impl CycleLog {
    #[must_use]
    pub fn with_initial_capacity(initial_capacity: usize) -> Self {
        Self { cycles: VecDeque::with_capacity(initial_capacity), bound: None }
    }

    #[must_use]
    pub fn with_capacity_bound(bound: usize) -> Self {
        Self { cycles: VecDeque::with_capacity(bound), bound: Some(bound) }
    }

    pub fn push(&mut self, cycle: RainflowCycle) -> Result<(), AllocationError> {
        if let Some(bound) = self.bound {
            if self.cycles.len() >= bound {
                self.cycles.pop_front();
            }
        } else if self.cycles.len() == self.cycles.capacity() {
            self.cycles
                .try_reserve(self.cycles.capacity().max(1))
                .map_err(|_| AllocationError::CycleLogGrowthFailed { capacity: self.cycles.capacity() })?;
        }
        self.cycles.push_back(cycle);
        Ok(())
    }

    #[must_use]
    pub fn iter(&self) -> impl Iterator<Item = &RainflowCycle> {
        self.cycles.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cycles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cycles.is_empty()
    }
}

/// The battery's live, mutable state: state of charge and cycle history.
///
/// Mutates exclusively via [`BatteryState::update_soc`] and [`BatteryState::add_cycle`].
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct BatteryState {
    current_soc: Ratio,
    equivalent_full_cycles: f64,
    cycle_log: CycleLog,
}

impl BatteryState {
    /// Starts at `initial_soc`, clamped into the configured SOC band.
    #[must_use]
    pub fn new(battery: &BatteryConfig, tuning: &TuningConstants, initial_soc: Ratio) -> Self {
        Self {
            current_soc: initial_soc.clamp(battery.min_soc(), battery.max_soc()),
            equivalent_full_cycles: 0.0,
            cycle_log: CycleLog::with_initial_capacity(tuning.cycle_log_initial_capacity),
        }
    }

    #[must_use]
    pub const fn current_soc(&self) -> Ratio {
        self.current_soc
    }

    #[must_use]
    pub const fn equivalent_full_cycles(&self) -> f64 {
        self.equivalent_full_cycles
    }

    #[must_use]
    pub const fn cycle_log(&self) -> &CycleLog {
        &self.cycle_log
    }

    /// Appends a cycle if `depth` exceeds `tuning.cycle_depth_threshold`; otherwise a no-op.
    ///
    /// `equivalent_full_cycles` is updated before the log append is attempted, so an
    /// [`AllocationError`] from a failed growth never leaves the counter stale.
    #[instrument(skip_all, fields(depth = depth.0, mean_soc = mean_soc.0))]
    pub fn add_cycle(
        &mut self,
        tuning: &TuningConstants,
        depth: Ratio,
        mean_soc: Ratio,
        temperature_c: f64,
        timestamp: DateTime<Local>,
    ) -> Result<(), AllocationError> {
        if depth.0 <= tuning.cycle_depth_threshold.0 {
            trace!("cycle below threshold, ignored");
            return Ok(());
        }
        self.equivalent_full_cycles += depth.0;
        self.cycle_log.push(RainflowCycle { depth, mean_soc, temperature_c, timestamp })?;
        trace!(depth = depth.0, mean_soc = mean_soc.0, "recorded cycle");
        Ok(())
    }

    /// Applies a discharge (positive) or charge (negative) of `energy_delivered`, clamps SOC
    /// into the configured band, and records a cycle if the resulting depth crosses the
    /// threshold.
    pub fn update_soc(
        &mut self,
        battery: &BatteryConfig,
        tuning: &TuningConstants,
        energy_delivered: Kwh,
        temperature_c: f64,
        timestamp: DateTime<Local>,
    ) -> Result<(), AllocationError> {
        let prev = self.current_soc;
        let raw_next = prev - energy_delivered / battery.capacity_kwh();
        self.current_soc = raw_next.clamp(battery.min_soc(), battery.max_soc());
        let depth = Ratio((prev.0 - self.current_soc.0).abs());
        let mean_soc = Ratio((prev.0 + self.current_soc.0) / 2.0);
        self.add_cycle(tuning, depth, mean_soc, temperature_c, timestamp)
    }
}

/// Energy available for discharge above `min_soc`, given the current state of charge.
#[must_use]
pub fn available_energy(battery: &BatteryConfig, state: &BatteryState) -> Kwh {
    Ratio(state.current_soc().0 - battery.min_soc().0) * battery.capacity_kwh()
}

/// Total usable energy swing between `min_soc` and `max_soc`.
#[must_use]
pub fn usable_capacity(battery: &BatteryConfig) -> Kwh {
    Ratio(battery.max_soc().0 - battery.min_soc().0) * battery.capacity_kwh()
}

/// Converts an energy amount into the corresponding depth of discharge fraction of capacity.
#[must_use]
pub fn dod_of(battery: &BatteryConfig, energy: Kwh) -> Ratio {
    energy / battery.capacity_kwh()
}
