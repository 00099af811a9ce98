mod cost;
mod energy;
mod power;
mod quantity;
mod rate;
mod ratio;
mod time;

pub use self::{
    cost::Usd,
    energy::Kwh,
    power::Kw,
    quantity::Quantity,
    rate::UsdPerKwh,
    ratio::Ratio,
    time::Hours,
};
