use std::fmt::{Display, Formatter};
use std::ops::{Div, Mul};

use crate::units::{Quantity, cost::Usd, energy::Kwh, ratio::Ratio};

/// Dollar per kilowatt-hour, e.g. a marginal cost or a bid price.
pub type UsdPerKwh = Quantity<1, 1, -1>;

impl Display for UsdPerKwh {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "${:.4}/kWh", self.0)
    }
}

impl Mul<Kwh> for UsdPerKwh {
    type Output = Usd;

    fn mul(self, rhs: Kwh) -> Self::Output {
        Usd(self.0 * rhs.0)
    }
}

/// Scale a rate up or down by a markup or efficiency fraction.
impl Div<Ratio> for UsdPerKwh {
    type Output = UsdPerKwh;

    fn div(self, rhs: Ratio) -> Self::Output {
        UsdPerKwh(self.0 / rhs.0)
    }
}

impl Mul<Ratio> for UsdPerKwh {
    type Output = UsdPerKwh;

    fn mul(self, rhs: Ratio) -> Self::Output {
        UsdPerKwh(self.0 * rhs.0)
    }
}
