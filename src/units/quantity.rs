use std::ops::{Div, Mul};

use serde::{Deserialize, Serialize};

/// A dimensioned `f64`, tagged at the type level so that unrelated quantities cannot
/// accidentally be added or compared.
///
/// `POWER`, `TIME`, and `COST` are arbitrary dimension tags, not SI exponents: two
/// [`Quantity`] aliases are only added, subtracted, or ordered against each other when all
/// three tags match. Cross-dimension products (kW · h -> kWh, kWh · $/kWh -> $, …) are
/// written out by hand per pair in [`crate::units`], rather than derived generically.
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    PartialEq,
    PartialOrd,
    Serialize,
    derive_more::Add,
    derive_more::AddAssign,
    derive_more::Neg,
    derive_more::Sub,
    derive_more::SubAssign,
    derive_more::Sum,
)]
pub struct Quantity<const POWER: isize, const TIME: isize, const COST: isize>(pub f64);

impl<const POWER: isize, const TIME: isize, const COST: isize> Quantity<POWER, TIME, COST> {
    pub const ZERO: Self = Self(0.0);
    pub const ONE: Self = Self(1.0);

    #[must_use]
    pub fn min(self, rhs: Self) -> Self {
        if rhs.0 < self.0 { rhs } else { self }
    }

    #[must_use]
    pub fn max(self, rhs: Self) -> Self {
        if rhs.0 > self.0 { rhs } else { self }
    }

    #[must_use]
    pub fn clamp(self, min: Self, max: Self) -> Self {
        let mut this = self;
        if this.0 < min.0 {
            this = min;
        }
        if this.0 > max.0 {
            this = max;
        }
        this
    }

    #[must_use]
    pub fn abs(self) -> Self {
        Self(self.0.abs())
    }

    #[must_use]
    pub const fn is_finite(self) -> bool {
        self.0.is_finite()
    }
}

/// Scale by a raw, unitless number – does not change the dimension.
impl<const POWER: isize, const TIME: isize, const COST: isize> Mul<f64> for Quantity<POWER, TIME, COST> {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self::Output {
        Self(self.0 * rhs)
    }
}

impl<const POWER: isize, const TIME: isize, const COST: isize> Div<f64> for Quantity<POWER, TIME, COST> {
    type Output = Self;

    fn div(self, rhs: f64) -> Self::Output {
        Self(self.0 / rhs)
    }
}
