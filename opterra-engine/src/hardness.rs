//! Resolves conflicting water-hardness signals into one effective value.
//!
//! Priority: a direct fixture measurement beats softener-state inference,
//! which beats the raw street value. Every resolution carries a confidence
//! tag so downstream consumers know how much to trust it.

use opterra_core::{
    inputs::{ForensicInputs, SaltStatus},
    metrics::{Confidence, HardnessSource, ResolvedHardness},
};

/// Hardness left in fully softened water, in grains per gallon.
const SOFTENED_GPG: f64 = 0.5;

/// Credit granted when the brine tank was not inspected: assume the softener
/// is removing about half the street hardness.
const UNKNOWN_SALT_CREDIT: f64 = 0.5;

/// Resolves the hardness actually reaching the appliance.
#[must_use]
pub fn resolve(inputs: &ForensicInputs) -> ResolvedHardness {
    let street_gpg = inputs.street_hardness_gpg;

    if let Some(measured) = inputs.measured_hardness_gpg {
        return ResolvedHardness {
            street_gpg,
            effective_gpg: measured,
            source: HardnessSource::Measured,
            confidence: Confidence::High,
        };
    }

    if inputs.has_softener {
        let (effective_gpg, confidence) = match inputs.softener_salt {
            // An empty brine tank passes street water through untreated.
            SaltStatus::Empty => (street_gpg, Confidence::Medium),
            SaltStatus::Ok => (SOFTENED_GPG, Confidence::Medium),
            SaltStatus::Unknown => (
                (street_gpg * UNKNOWN_SALT_CREDIT).max(SOFTENED_GPG),
                Confidence::Low,
            ),
        };
        return ResolvedHardness {
            street_gpg,
            effective_gpg,
            source: HardnessSource::SoftenerInference,
            confidence,
        };
    }

    ResolvedHardness {
        street_gpg,
        effective_gpg: street_gpg,
        source: HardnessSource::StreetValue,
        confidence: Confidence::Medium,
    }
}
