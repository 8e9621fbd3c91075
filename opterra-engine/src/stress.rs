//! Composes physical stressors into aging-rate multipliers.
//!
//! Stressors split into two classes because the anode interacts with them
//! differently. Mechanical stress (pressure, fouling hot-spots, half of the
//! temperature effect) damages the vessel from day one. Chemical stress
//! (the other temperature half, erosion-corrosion, closed-loop oxygen
//! cycling) is ~90% suppressed while the anode is intact and fully active
//! once it is spent. Factors compound by multiplication and the totals are
//! clamped at the stress cap.

use opterra_core::{inputs::ForensicInputs, metrics::StressBreakdown, tuning::Tuning};

use crate::pressure::EffectivePressure;

/// Floor on the thermostat factors; a cold setpoint helps, but not without
/// bound.
const TEMP_FACTOR_FLOOR: f64 = 0.8;

/// Composed stress with the aging rates for both anode phases.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StressProfile {
    pub breakdown: StressBreakdown,
    /// Aging rate while the anode is intact.
    pub shielded: f64,
    /// Aging rate once the anode is spent (equals `breakdown.combined`).
    pub naked: f64,
}

/// Composes the stress profile for a snapshot.
///
/// `fouling_units` is the load driving thermal hot-spots: sediment pounds
/// for tanks, percent blockage for tankless.
#[must_use]
pub fn compose(
    inputs: &ForensicInputs,
    effective: &EffectivePressure,
    fouling_units: f64,
    tuning: &Tuning,
) -> StressProfile {
    let s = &tuning.stress;

    let pressure =
        1.0 + ((effective.psi() - s.pressure_baseline_psi) / 10.0).max(0.0) * s.pressure_per_10_psi;

    let fouling_hot_spot = (1.0 + fouling_units * s.hot_spot_per_unit).min(s.hot_spot_cap);

    let setpoint = inputs.set_temperature_f.unwrap_or(s.temp_baseline_f);
    let temp_half = (setpoint - s.temp_baseline_f) / 10.0 * s.temp_per_10_f / 2.0;
    let temperature_mechanical = (1.0 + temp_half).max(TEMP_FACTOR_FLOOR);
    let temperature_chemical = (1.0 + temp_half).max(TEMP_FACTOR_FLOOR);

    let circulation_erosion = if inputs.has_recirculation_pump {
        s.circulation_erosion
    } else {
        1.0
    };
    let closed_loop_oxygen = if inputs.is_closed_loop() {
        s.closed_loop_oxygen
    } else {
        1.0
    };

    let mechanical_total = pressure * fouling_hot_spot * temperature_mechanical;
    let chemical_total = temperature_chemical * circulation_erosion * closed_loop_oxygen;
    let combined = (mechanical_total * chemical_total).min(s.cap);

    // While shielded, only (1 − suppression) of the chemical excess applies.
    let suppressed_chemical = 1.0 + (chemical_total - 1.0) * (1.0 - s.chemical_suppression);
    let shielded = (mechanical_total * suppressed_chemical).min(s.cap);

    StressProfile {
        breakdown: StressBreakdown {
            pressure,
            fouling_hot_spot,
            temperature_mechanical,
            temperature_chemical,
            circulation_erosion,
            closed_loop_oxygen,
            mechanical_total,
            chemical_total,
            combined,
        },
        shielded,
        naked: combined,
    }
}
