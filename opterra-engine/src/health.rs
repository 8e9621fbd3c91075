//! Monotonic health-score transform.
//!
//! `score = 100·e^(−k·failProb)`, rounded and clamped to `[0, 100]`. The
//! exponential makes small probability increases near zero cost many points
//! while marginal changes at high risk cost few, matching how early risk
//! signals should read.

use opterra_core::{Percent, tuning::Tuning};

/// Transforms a failure probability into a 0–100 health score.
#[must_use]
pub fn health_score(failure_probability: Percent, tuning: &Tuning) -> Percent {
    Percent::clamped(
        100.0 * (-tuning.probability.health_decay * failure_probability.get()).exp(),
    )
    .rounded()
}
