//! Baseline snapshots shared across the unit tests.
//!
//! Each baseline is deliberately quiet (soft water, open loop, moderate
//! pressure, nominal occupancy) so a test asserts on exactly the stressor it
//! introduces.

use opterra_core::inputs::{
    ForensicInputs, FuelType, Location, SaltStatus, ServiceHistory, TanklessObservations,
};
use uom::si::{f64::Pressure, pressure::pound_force_per_square_inch};

pub(crate) fn tank_baseline() -> ForensicInputs {
    ForensicInputs {
        fuel_type: FuelType::NaturalGas,
        age_years: 8.0,
        static_pressure: Pressure::new::<pound_force_per_square_inch>(65.0),
        street_hardness_gpg: 0.0,
        measured_hardness_gpg: None,
        occupants: 2.5,
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
        service: ServiceHistory::default(),
        tankless: None,
        hybrid: None,
    }
}

pub(crate) fn tankless_baseline() -> ForensicInputs {
    ForensicInputs {
        fuel_type: FuelType::TanklessGas,
        age_years: 6.0,
        street_hardness_gpg: 8.0,
        warranty_years: None,
        tankless: Some(TanklessObservations {
            isolation_valves_present: true,
            flow_degradation_pct: None,
            error_code: None,
        }),
        ..tank_baseline()
    }
}

pub(crate) fn hybrid_baseline() -> ForensicInputs {
    ForensicInputs {
        fuel_type: FuelType::HeatPumpHybrid,
        age_years: 5.0,
        ..tank_baseline()
    }
}
