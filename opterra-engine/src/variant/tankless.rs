//! Tankless engine: parallel physics with no anode concept.
//!
//! The heat exchanger has no sacrificial protection, so aging is
//! single-phase, and the fouling term is scale blockage rather than
//! sediment mass. Everything else follows the shared pipeline.

use opterra_core::{
    inputs::ForensicInputs,
    metrics::{FuelMetrics, OpterraMetrics},
    tuning::Tuning,
};

use crate::{bio_age, fouling, hardness, health, pressure, stress, weibull};

/// Computes metrics for a tankless unit.
#[must_use]
pub fn metrics(inputs: &ForensicInputs) -> OpterraMetrics {
    let tuning = Tuning::for_fuel(inputs.fuel_type);
    let resolved = hardness::resolve(inputs);
    let effective = pressure::effective_pressure(inputs, tuning);
    let scale = fouling::tankless_scale(inputs, resolved.effective_gpg, tuning);
    let stress = stress::compose(inputs, &effective, scale.blockage.get(), tuning);
    let bio_age_years = bio_age::single_phase(inputs.age_years, &stress, tuning);
    let failure_probability = weibull::failure_probability(inputs, bio_age_years, tuning);
    let health_score = health::health_score(failure_probability, tuning);

    OpterraMetrics {
        bio_age_years,
        failure_probability,
        health_score,
        effective_pressure: effective.pressure,
        hidden_spike: effective.hidden_spike,
        hardness: resolved,
        stress: stress.breakdown,
        fuel: FuelMetrics::Tankless {
            scale_buildup: scale.blockage,
            descale_status: scale.status,
        },
    }
}
