//! Deterministic water-heater risk assessment.
//!
//! The engine is a pure function from a [`ForensicInputs`] snapshot to
//! metrics and a verdict: same snapshot in, same answer out, no clock and no
//! I/O. The pipeline resolves inlet hardness, infers the effective peak
//! pressure, accounts the sacrificial-anode budget, accumulates fouling,
//! composes the stress multipliers, integrates a biological age, maps it
//! through a Weibull failure model, and hands the result to a tiered
//! recommendation engine with an economic post-pass.
//!
//! Fuel families route to variant engines (storage tank, tankless, heat-pump
//! hybrid) behind one output contract; see [`variant`].

pub mod anode;
pub mod bio_age;
pub mod fouling;
pub mod hardness;
pub mod health;
pub mod pressure;
pub mod stress;
pub mod variant;
pub mod weibull;

mod economic;
mod recommend;

#[cfg(test)]
pub(crate) mod test_fixtures;

pub use opterra_core::{
    Percent, PercentError,
    inputs::{ForensicInputs, FuelType, InputError},
    metrics::{OpterraMetrics, OpterraResult},
    tuning::Tuning,
    verdict::{Action, Recommendation, Severity},
};

/// Computes the full metric set for a snapshot.
///
/// # Errors
///
/// Returns an [`InputError`] when the snapshot fails validation; the model
/// itself is total over valid inputs.
pub fn calculate_health(inputs: &ForensicInputs) -> Result<OpterraMetrics, InputError> {
    inputs.validate()?;
    Ok(route(inputs))
}

/// Derives the final recommendation from already-computed metrics.
#[must_use]
pub fn get_recommendation(metrics: &OpterraMetrics, inputs: &ForensicInputs) -> Recommendation {
    let tuning = Tuning::for_fuel(inputs.fuel_type);
    let raw = recommend::raw(metrics, inputs, tuning);
    economic::optimize(raw, metrics, inputs, tuning)
}

/// One-call assessment: metrics plus the verdict derived from them.
///
/// # Errors
///
/// Returns an [`InputError`] when the snapshot fails validation.
pub fn calculate_opterra_risk(inputs: &ForensicInputs) -> Result<OpterraResult, InputError> {
    let metrics = calculate_health(inputs)?;
    let verdict = get_recommendation(&metrics, inputs);
    Ok(OpterraResult { metrics, verdict })
}

fn route(inputs: &ForensicInputs) -> OpterraMetrics {
    if inputs.fuel_type.is_tankless() {
        variant::tankless::metrics(inputs)
    } else if inputs.fuel_type.is_hybrid() {
        variant::hybrid::metrics(inputs)
    } else {
        variant::tank::metrics(inputs)
    }
}
