use std::fmt::{Display, Formatter};

use crate::units::Quantity;

/// A dollar amount.
pub type Usd = Quantity<0, 0, 1>;

impl Display for Usd {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "${:.4}", self.0)
    }
}
