//! Fouling accumulation: tank sediment and tankless scale.
//!
//! Both share the same shape (accumulate with hardness and time, partially
//! reset on service) with different physics. Tank sediment is linear in
//! hardness; tankless scale grows nonlinearly and leaves permanent scarring
//! behind neglected intervals. Both define advisory/due/lockout thresholds;
//! past lockout, servicing itself becomes dangerous and the unit routes to
//! replacement.

use opterra_core::{
    Percent,
    inputs::ForensicInputs,
    metrics::ServiceStatus,
    tuning::{FoulingTuning, Tuning},
};

/// Household size treated as nominal draw volume.
const NOMINAL_OCCUPANCY: f64 = 2.5;

/// Extra scale accrual per 10 °F above the setpoint baseline.
const SCALE_TEMP_PER_10_F: f64 = 0.05;

/// Draw-volume multiplier derived from occupancy, clamped to `[0.5, 2.0]`.
#[must_use]
pub fn usage_intensity(occupants: f64) -> f64 {
    (occupants / NOMINAL_OCCUPANCY).clamp(0.5, 2.0)
}

fn classify(value: f64, tuning: &FoulingTuning) -> ServiceStatus {
    if value >= tuning.lockout {
        ServiceStatus::Lockout
    } else if value >= tuning.due {
        ServiceStatus::Due
    } else if value >= tuning.advisory {
        ServiceStatus::Advisory
    } else {
        ServiceStatus::Ok
    }
}

/// Sediment load at the bottom of a storage tank.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SedimentAssessment {
    pub pounds: f64,
    pub status: ServiceStatus,
}

/// Computes the accumulated sediment for a tank or hybrid unit.
///
/// Linear in effective hardness × years since the last flush × draw
/// intensity × fuel factor (immersed electric elements precipitate scale
/// directly on the heating surface). The flush interval is clamped to the
/// unit's age; a service record cannot predate the unit.
#[must_use]
pub fn tank_sediment(
    inputs: &ForensicInputs,
    effective_gpg: f64,
    tuning: &Tuning,
) -> SedimentAssessment {
    let f = &tuning.fouling;
    let years = inputs
        .service
        .years_since_flush
        .unwrap_or(inputs.age_years)
        .min(inputs.age_years);
    let fuel_factor = if inputs.fuel_type.uses_electric_elements() {
        f.electric_element_factor
    } else {
        1.0
    };
    let pounds = effective_gpg
        * years
        * usage_intensity(inputs.occupants)
        * fuel_factor
        * f.rate_per_gpg_year;

    SedimentAssessment {
        pounds,
        status: classify(pounds, f),
    }
}

/// Scale blockage of a tankless heat exchanger.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleAssessment {
    pub blockage: Percent,
    pub status: ServiceStatus,
}

/// Computes heat-exchanger blockage for a tankless unit.
///
/// Nonlinear in hardness, scaled by cycle intensity (recirculation roughly
/// doubles cycling) and setpoint temperature. Intervals that ran before the
/// last descale leave half their scale behind as irreversible deposit, so a
/// neglected unit never descales back to clean.
#[must_use]
pub fn tankless_scale(
    inputs: &ForensicInputs,
    effective_gpg: f64,
    tuning: &Tuning,
) -> ScaleAssessment {
    let f = &tuning.fouling;
    let age = inputs.age_years;
    let interval = inputs
        .service
        .years_since_descale
        .unwrap_or(age)
        .min(age);
    let prior = age - interval;

    let cycle = usage_intensity(inputs.occupants)
        * if inputs.has_recirculation_pump { 2.0 } else { 1.0 };
    let fuel_factor = if inputs.fuel_type.uses_electric_elements() {
        f.electric_element_factor
    } else {
        1.0
    };
    let setpoint = inputs
        .set_temperature_f
        .unwrap_or(tuning.stress.temp_baseline_f);
    let temp_factor =
        1.0 + ((setpoint - tuning.stress.temp_baseline_f) / 10.0).max(0.0) * SCALE_TEMP_PER_10_F;

    let accrue = |years: f64| {
        effective_gpg.powf(f.hardness_exponent)
            * years
            * cycle
            * fuel_factor
            * temp_factor
            * f.rate_per_gpg_year
    };

    let blockage = Percent::clamped(accrue(interval) + f.residual_fraction * accrue(prior));
    ScaleAssessment {
        blockage,
        status: classify(blockage.get(), f),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use opterra_core::{
        inputs::{FuelType, ServiceHistory},
        tuning::{TANK, TANKLESS},
    };

    use crate::test_fixtures::{tank_baseline, tankless_baseline};

    #[test]
    fn usage_is_clamped_both_ways() {
        assert_relative_eq!(usage_intensity(0.0), 0.5);
        assert_relative_eq!(usage_intensity(2.5), 1.0);
        assert_relative_eq!(usage_intensity(12.0), 2.0);
    }

    #[test]
    fn flush_interval_cannot_predate_the_unit() {
        let inputs = ForensicInputs {
            age_years: 3.0,
            occupants: 2.5,
            service: ServiceHistory {
                years_since_flush: Some(30.0),
                ..ServiceHistory::default()
            },
            ..tank_baseline()
        };
        let a = tank_sediment(&inputs, 10.0, &TANK);
        // 10 GPG × 3 yr × 1.0 × 1.0 × 0.125 lbs.
        assert_relative_eq!(a.pounds, 3.75);
        assert_eq!(a.status, ServiceStatus::Ok);
    }

    #[test]
    fn electric_elements_foul_faster() {
        let gas = tank_sediment(&tank_baseline(), 10.0, &TANK);
        let electric = tank_sediment(
            &ForensicInputs {
                fuel_type: FuelType::Electric,
                ..tank_baseline()
            },
            10.0,
            &TANK,
        );
        assert!(electric.pounds > gas.pounds);
    }

    #[test]
    fn neglected_tank_reaches_lockout() {
        let inputs = ForensicInputs {
            age_years: 14.0,
            occupants: 5.0,
            ..tank_baseline()
        };
        let a = tank_sediment(&inputs, 15.0, &TANK);
        assert!(a.pounds > TANK.fouling.lockout);
        assert_eq!(a.status, ServiceStatus::Lockout);
    }

    #[test]
    fn recirculation_roughly_doubles_scale() {
        let base = tankless_scale(&tankless_baseline(), 8.0, &TANKLESS);
        let recirc = tankless_scale(
            &ForensicInputs {
                has_recirculation_pump: true,
                ..tankless_baseline()
            },
            8.0,
            &TANKLESS,
        );
        assert_relative_eq!(
            recirc.blockage.get(),
            (base.blockage.get() * 2.0).min(100.0),
            max_relative = 1e-9
        );
    }

    #[test]
    fn descale_leaves_residual_scarring() {
        // Eight neglected years, then a descale two years ago: the two fresh
        // years accrue in full and the prior six keep half their deposit.
        let serviced = ForensicInputs {
            age_years: 8.0,
            service: ServiceHistory {
                years_since_descale: Some(2.0),
                ..ServiceHistory::default()
            },
            ..tankless_baseline()
        };
        let never = ForensicInputs {
            age_years: 8.0,
            ..tankless_baseline()
        };
        let s = tankless_scale(&serviced, 6.0, &TANKLESS);
        let n = tankless_scale(&never, 6.0, &TANKLESS);
        assert!(s.blockage < n.blockage);
        // Residual: serviced = accrue(2) + 0.5·accrue(6) = 0.625·accrue(8).
        assert_relative_eq!(
            s.blockage.get(),
            0.625 * n.blockage.get(),
            max_relative = 1e-9
        );
    }

    #[test]
    fn hard_water_neglect_passes_the_lockout_threshold() {
        let inputs = ForensicInputs {
            age_years: 6.0,
            ..tankless_baseline()
        };
        let a = tankless_scale(&inputs, 15.0, &TANKLESS);
        assert_eq!(a.status, ServiceStatus::Lockout);
    }
}
