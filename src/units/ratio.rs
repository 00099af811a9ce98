use crate::units::Quantity;

/// A dimensionless scalar: state of charge, depth of discharge, softmax weight, round-trip
/// efficiency, a markup fraction, or a demand factor.
///
/// Not bounded to `[0, 1]` at the type level – a demand factor can run past 1.0 when the grid is
/// over its configured saturation point, so callers must not assume a strict fraction.
pub type Ratio = Quantity<0, 0, 0>;
