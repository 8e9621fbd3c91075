//! Weibull failure model with deterministic physical-evidence overrides.
//!
//! The one-year conditional failure probability is
//! `P = 1 − R(t+1)/R(t)` with `R(t) = exp(−(t/η)^β)` and `t` the biological
//! age. The statistical output is capped; confirmed physical evidence (an
//! active leak, visible rust, blocked venting) outranks the model and forces
//! the probability to its maximum.

use opterra_core::{
    Percent,
    inputs::ForensicInputs,
    tuning::{MIN_RATE, Tuning, WeibullParams},
};

/// The Weibull survival function `R(t) = exp(−(t/η)^β)`.
#[must_use]
pub fn survival(t_years: f64, params: &WeibullParams) -> f64 {
    let t = t_years.max(0.0);
    (-(t / params.eta_years.max(MIN_RATE)).powf(params.beta)).exp()
}

/// One-year conditional failure probability from the survival curve alone.
#[must_use]
pub fn one_year_failure_probability(bio_age_years: f64, tuning: &Tuning) -> Percent {
    let r_now = survival(bio_age_years, &tuning.weibull);
    let p = if r_now <= MIN_RATE {
        1.0
    } else {
        1.0 - survival(bio_age_years + 1.0, &tuning.weibull) / r_now
    };
    Percent::clamped((p * 100.0).min(tuning.probability.statistical_cap))
}

/// True when physical evidence of failure outranks the statistics.
#[must_use]
pub fn breach_observed(inputs: &ForensicInputs) -> bool {
    inputs.visual_rust || inputs.is_leaking || inputs.vent_blocked
}

/// Failure probability for a snapshot, with breach overrides applied.
#[must_use]
pub fn failure_probability(inputs: &ForensicInputs, bio_age_years: f64, tuning: &Tuning) -> Percent {
    if breach_observed(inputs) {
        return Percent::clamped(tuning.probability.breach_probability);
    }
    one_year_failure_probability(bio_age_years, tuning)
}
