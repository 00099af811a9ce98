use std::ops::{Div, Mul};

use crate::units::{Quantity, energy::Kwh, ratio::Ratio, time::Hours};

/// Grid demand or battery power, in kilowatts.
pub type Kw = Quantity<1, 0, 0>;

impl Mul<Hours> for Kw {
    type Output = Kwh;

    fn mul(self, rhs: Hours) -> Self::Output {
        Kwh(self.0 * rhs.0)
    }
}

/// Demand factor: how close the grid is running to its configured saturation point.
impl Div<Kw> for Kw {
    type Output = Ratio;

    fn div(self, rhs: Kw) -> Self::Output {
        Ratio(self.0 / rhs.0)
    }
}
