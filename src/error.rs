//! The crate's error taxonomy: one `thiserror` enum per failure class, matchable by callers
//! rather than stringly-typed.

/// Invalid constructor arguments. Fatal at construction time – there is no partially valid
/// [`crate::config::BatteryConfig`] or [`crate::config::DegradationParams`].
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigurationError {
    #[error("capacity must be positive, got {0} kWh")]
    NonPositiveCapacity(f64),

    #[error("round-trip efficiency must be in (0, 1], got {0}")]
    EfficiencyOutOfRange(f64),

    #[error("state-of-charge bounds must satisfy 0 <= min_soc < max_soc <= 1, got min={min}, max={max}")]
    SocBoundsOutOfRange { min: f64, max: f64 },

    #[error("replacement cost must be positive, got {0}")]
    NonPositiveReplacementCost(f64),

    #[error("reference cycle count must be positive, got {0}")]
    NonPositiveCyclesToEol(f64),

    #[error("field {field} must be finite, got {value}")]
    NonFinite { field: &'static str, value: f64 },
}

/// Rejected call arguments. No state change occurs; the caller may retry with corrected input.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum InputError {
    #[error("expected a forecast of length {expected}, got {actual}")]
    WrongForecastLength { expected: usize, actual: usize },

    #[error("field {field} must be finite, got {value}")]
    NonFiniteInput { field: &'static str, value: f64 },
}

/// The cycle log failed to grow. `equivalent_full_cycles` is still updated before this is
/// returned to the caller – see [`crate::battery::BatteryState::add_cycle`].
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AllocationError {
    #[error("cycle log failed to grow past {capacity} entries")]
    CycleLogGrowthFailed { capacity: usize },
}
