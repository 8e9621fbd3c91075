//! Integrates stress over the unit's life into a biological age.
//!
//! Corrosion protection has a hard expiry. Tank and hybrid units age in two
//! phases: a protected phase up to anode depletion, where chemical stress is
//! suppressed, and a naked phase after it, where the full combined stress
//! applies. Tankless units have no anode and age in a single phase. Both
//! results are clamped to an absolute maximum modeled age.

use opterra_core::tuning::Tuning;

use crate::stress::StressProfile;

/// Two-phase wear integral for tank and hybrid units.
///
/// `depletion_age_years` is the calendar age at which the anode budget
/// exhausts; years past it accrue at the naked rate.
#[must_use]
pub fn biphasic(
    age_years: f64,
    depletion_age_years: f64,
    stress: &StressProfile,
    tuning: &Tuning,
) -> f64 {
    let protected = age_years.min(depletion_age_years.max(0.0));
    let naked = age_years - protected;
    (protected * stress.shielded + naked * stress.naked).min(tuning.stress.max_bio_age_years)
}

/// Single-phase wear integral for tankless units.
#[must_use]
pub fn single_phase(age_years: f64, stress: &StressProfile, tuning: &Tuning) -> f64 {
    (age_years * stress.naked).min(tuning.stress.max_bio_age_years)
}
