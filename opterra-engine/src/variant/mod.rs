//! Fuel-variant engines behind one uniform output contract.

pub mod hybrid;
pub mod tank;
pub mod tankless;
