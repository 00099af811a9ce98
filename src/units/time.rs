use crate::units::quantity::Quantity;

pub type Hours = Quantity<0, 1, 0>;
