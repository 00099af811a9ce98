use std::ops::{Div, Mul};

use crate::units::{Quantity, cost::Usd, power::Kw, ratio::Ratio, rate::UsdPerKwh, time::Hours};

/// Stored or dispatched energy, in kilowatt-hours.
pub type Kwh = Quantity<1, 1, 0>;

impl Mul<UsdPerKwh> for Kwh {
    type Output = Usd;

    fn mul(self, rhs: UsdPerKwh) -> Self::Output {
        Usd(self.0 * rhs.0)
    }
}

impl Div<Kw> for Kwh {
    type Output = Hours;

    fn div(self, rhs: Kw) -> Self::Output {
        Hours(self.0 / rhs.0)
    }
}

impl Div<Hours> for Kwh {
    type Output = Kw;

    fn div(self, rhs: Hours) -> Self::Output {
        Kw(self.0 / rhs.0)
    }
}

/// Depth of discharge or state-of-charge ratio, e.g. `available / capacity`.
impl Div<Kwh> for Kwh {
    type Output = Ratio;

    fn div(self, rhs: Kwh) -> Self::Output {
        Ratio(self.0 / rhs.0)
    }
}

impl Mul<Ratio> for Kwh {
    type Output = Kwh;

    fn mul(self, rhs: Ratio) -> Self::Output {
        Kwh(self.0 * rhs.0)
    }
}

impl Mul<Kwh> for Ratio {
    type Output = Kwh;

    fn mul(self, rhs: Kwh) -> Self::Output {
        Kwh(self.0 * rhs.0)
    }
}
