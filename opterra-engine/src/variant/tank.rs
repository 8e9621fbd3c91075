//! Storage-tank engine: assembles the sub-models into tank metrics.

use opterra_core::{
    inputs::ForensicInputs,
    metrics::{FuelMetrics, OpterraMetrics},
    tuning::Tuning,
};

use crate::{anode, bio_age, fouling, hardness, health, pressure, stress, weibull};

/// Computes tank metrics with the given constant set.
///
/// The hybrid engine reuses this assembly with its own tuning; everything
/// tank-shaped (anode, sediment, biphasic aging) is shared.
#[must_use]
pub(crate) fn metrics_with(inputs: &ForensicInputs, tuning: &Tuning) -> OpterraMetrics {
    let resolved = hardness::resolve(inputs);
    let effective = pressure::effective_pressure(inputs, tuning);
    let shield = anode::shield_assessment(inputs, tuning);
    let sediment = fouling::tank_sediment(inputs, resolved.effective_gpg, tuning);
    let stress = stress::compose(inputs, &effective, sediment.pounds, tuning);
    let bio_age_years = bio_age::biphasic(
        inputs.age_years,
        shield.depletion_age_years,
        &stress,
        tuning,
    );
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
        fuel: FuelMetrics::Tank {
            shield,
            sediment_lbs: sediment.pounds,
            sediment_status: sediment.status,
        },
    }
}

/// Computes metrics for a storage-tank unit.
#[must_use]
pub fn metrics(inputs: &ForensicInputs) -> OpterraMetrics {
    metrics_with(inputs, opterra_core::tuning::Tuning::for_fuel(inputs.fuel_type))
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use opterra_core::inputs::SaltStatus;

    use crate::test_fixtures::tank_baseline;

    #[test]
    fn benign_unit_ages_at_calendar_rate() {
        let m = metrics(&tank_baseline());
        assert_relative_eq!(m.bio_age_years, tank_baseline().age_years);
        assert!(m.failure_probability < opterra_core::Percent::clamped(15.0));
        assert!(m.health_score > opterra_core::Percent::clamped(50.0));
    }

    #[test]
    fn stressors_raise_bio_age_above_calendar_age() {
        let inputs = ForensicInputs {
            has_softener: true,
            softener_salt: SaltStatus::Ok,
            has_recirculation_pump: true,
            backflow_preventer: true,
            ..tank_baseline()
        };
        let m = metrics(&inputs);
        assert!(m.bio_age_years > inputs.age_years);
    }

    #[test]
    fn metrics_are_deterministic() {
        let inputs = tank_baseline();
        assert_eq!(metrics(&inputs), metrics(&inputs));
    }
}
