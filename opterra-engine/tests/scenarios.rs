//! End-to-end assessments over field-realistic snapshots.

use opterra_engine::{
    Action, ForensicInputs, FuelType, Percent, calculate_health, calculate_opterra_risk,
    get_recommendation,
};
use opterra_core::inputs::{Location, SaltStatus, ServiceHistory, TanklessObservations};
use uom::si::{f64::Pressure, pressure::pound_force_per_square_inch};

fn at_psi(psi: f64) -> Pressure {
    Pressure::new::<pound_force_per_square_inch>(psi)
}

fn garage_tank() -> ForensicInputs {
    ForensicInputs {
        fuel_type: FuelType::NaturalGas,
        age_years: 8.0,
        static_pressure: at_psi(65.0),
        street_hardness_gpg: 7.0,
        measured_hardness_gpg: None,
        occupants: 3.0,
        set_temperature_f: None,
        warranty_years: Some(6.0),
        location: Location::UnfinishedGarage,
        has_softener: false,
        softener_salt: SaltStatus::Unknown,
        softener_age_years: None,
        has_recirculation_pump: false,
        has_expansion_tank: false,
        expansion_tank_functional: false,
        has_prv: false,
        backflow_preventer: false,
        dielectric_unions: true,
        chloraminated_supply: false,
        visual_rust: false,
        is_leaking: false,
        vent_blocked: false,
        service: ServiceHistory {
            years_since_flush: Some(1.0),
            years_since_anode_replacement: Some(1.0),
            years_since_descale: None,
        },
        tankless: None,
        hybrid: None,
    }
}

#[test]
fn young_tank_with_trapped_expansion_is_never_condemned() {
    // Two years old, PRV installed, no expansion tank: the loop traps
    // thermal spikes, but young hardware gets the plumbing fixed, not a
    // replacement quote.
    let inputs = ForensicInputs {
        age_years: 2.0,
        static_pressure: at_psi(75.0),
        has_prv: true,
        service: ServiceHistory::default(),
        ..garage_tank()
    };
    let result = calculate_opterra_risk(&inputs).unwrap();
    assert!(result.metrics.hidden_spike);
    assert!(matches!(
        result.verdict.action,
        Action::Repair | Action::Upgrade
    ));
    assert_ne!(result.verdict.action, Action::Replace);
}

#[test]
fn pressure_at_the_relief_valve_rating_is_an_urgent_replacement() {
    let inputs = ForensicInputs {
        static_pressure: at_psi(155.0),
        ..garage_tank()
    };
    let result = calculate_opterra_risk(&inputs).unwrap();
    assert_eq!(result.verdict.action, Action::Replace);
    assert!(result.verdict.urgent);
    assert!(result.verdict.reason.contains("relief valve"));
}

#[test]
fn visible_rust_overrides_a_young_statistical_profile() {
    let inputs = ForensicInputs {
        age_years: 3.0,
        visual_rust: true,
        ..garage_tank()
    };
    let result = calculate_opterra_risk(&inputs).unwrap();
    assert_eq!(result.metrics.failure_probability, Percent::clamped(99.9));
    assert_eq!(result.verdict.action, Action::Replace);
    assert!(result.verdict.urgent);
}

#[test]
fn scale_locked_tankless_is_replaced_despite_isolation_valves() {
    let inputs = ForensicInputs {
        fuel_type: FuelType::TanklessGas,
        age_years: 7.0,
        street_hardness_gpg: 14.0,
        warranty_years: None,
        service: ServiceHistory::default(),
        tankless: Some(TanklessObservations {
            isolation_valves_present: true,
            flow_degradation_pct: None,
            error_code: None,
        }),
        ..garage_tank()
    };
    let result = calculate_opterra_risk(&inputs).unwrap();
    assert_eq!(result.verdict.action, Action::Replace);
    assert!(result.verdict.reason.contains("isolation valves"));
}

#[test]
fn old_garage_unit_runs_to_failure_but_finished_space_does_not() {
    let old_no_regulator = ForensicInputs {
        age_years: 12.0,
        static_pressure: at_psi(95.0),
        service: ServiceHistory::default(),
        ..garage_tank()
    };
    let garage = calculate_opterra_risk(&old_no_regulator).unwrap();
    assert_eq!(garage.verdict.action, Action::Pass);
    assert!(garage.verdict.reason.contains("run to failure"));

    let upstairs = ForensicInputs {
        location: Location::UpperFloor,
        ..old_no_regulator
    };
    let finished = calculate_opterra_risk(&upstairs).unwrap();
    assert_eq!(finished.verdict.action, Action::Replace);
}

#[test]
fn statistical_probability_never_exceeds_the_cap_without_evidence() {
    // Worst case short of a breach: old, hard water, hot, every accelerant.
    let inputs = ForensicInputs {
        age_years: 25.0,
        static_pressure: at_psi(120.0),
        street_hardness_gpg: 20.0,
        occupants: 6.0,
        set_temperature_f: Some(150.0),
        has_recirculation_pump: true,
        backflow_preventer: true,
        dielectric_unions: false,
        chloraminated_supply: true,
        service: ServiceHistory::default(),
        ..garage_tank()
    };
    let metrics = calculate_health(&inputs).unwrap();
    assert!(metrics.failure_probability <= Percent::clamped(85.0));
    assert!(metrics.health_score <= Percent::MAX);
}

#[test]
fn stress_never_lowers_bio_age_below_calendar_age() {
    let stressed = ForensicInputs {
        static_pressure: at_psi(110.0),
        street_hardness_gpg: 15.0,
        has_recirculation_pump: true,
        service: ServiceHistory::default(),
        ..garage_tank()
    };
    let metrics = calculate_health(&stressed).unwrap();
    assert!(metrics.bio_age_years >= stressed.age_years);
}

#[test]
fn recommendation_is_a_pure_function_of_its_inputs() {
    let inputs = ForensicInputs {
        age_years: 11.0,
        street_hardness_gpg: 12.0,
        ..garage_tank()
    };
    let metrics = calculate_health(&inputs).unwrap();
    assert_eq!(
        get_recommendation(&metrics, &inputs),
        get_recommendation(&metrics, &inputs)
    );
}

#[test]
fn assessment_serializes_and_round_trips() {
    let result = calculate_opterra_risk(&garage_tank()).unwrap();
    let json = serde_json::to_string(&result).unwrap();
    let back: opterra_engine::OpterraResult = serde_json::from_str(&json).unwrap();

    assert_eq!(back.verdict, result.verdict);
    assert_eq!(back.metrics.failure_probability, result.metrics.failure_probability);
    assert_eq!(back.metrics.health_score, result.metrics.health_score);
    assert_eq!(back.metrics.fuel, result.metrics.fuel);
    // Pressure passes through a PSI↔pascal conversion, so compare within
    // float tolerance rather than bitwise.
    approx::assert_relative_eq!(
        back.metrics
            .effective_pressure
            .get::<pound_force_per_square_inch>(),
        result
            .metrics
            .effective_pressure
            .get::<pound_force_per_square_inch>(),
        max_relative = 1e-12
    );
}
