//! Shared data contract for the Opterra appliance risk engine.
//!
//! This crate defines the immutable input snapshot ([`inputs::ForensicInputs`]),
//! the computed output contract ([`metrics::OpterraMetrics`],
//! [`verdict::Recommendation`], [`metrics::OpterraResult`]), the static
//! quality-tier catalog ([`tier::TierProfile`]), and the versioned tuning
//! constants ([`tuning::Tuning`]) the engine runs on. The computation itself
//! lives in `opterra-engine`.

pub mod inputs;
pub mod metrics;
mod percent;
pub mod tier;
pub mod tuning;
pub mod verdict;

pub use percent::{Percent, PercentError};
