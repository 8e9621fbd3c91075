//! Infers the peak pressure the vessel actually experiences.
//!
//! A static gauge reading cannot see transient spikes. On a closed loop
//! (check valve or PRV) with no working expansion tank, every heating cycle
//! traps thermal expansion and hammers the vessel well above the gauge
//! value. A unit can read a "safe" 60 PSI statically while cycling at
//! 120–140 PSI.

use opterra_core::{inputs::ForensicInputs, tuning::Tuning};
use uom::si::{f64::Pressure, pressure::pound_force_per_square_inch};

/// Modeled peak pressure, with provenance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectivePressure {
    pub pressure: Pressure,
    /// The modeled peak exceeds the gauge reading.
    pub hidden_spike: bool,
}

impl EffectivePressure {
    /// The modeled peak in PSI, for threshold comparisons.
    #[must_use]
    pub fn psi(&self) -> f64 {
        self.pressure.get::<pound_force_per_square_inch>()
    }
}

/// Returns the effective pressure for a snapshot.
///
/// The static reading is used as-is unless the system is closed-loop and
/// lacks a functioning expansion tank, in which case the thermal-spike
/// baseline applies (or the static reading, if it is already higher).
#[must_use]
pub fn effective_pressure(inputs: &ForensicInputs, tuning: &Tuning) -> EffectivePressure {
    if inputs.is_closed_loop() && !inputs.expansion_control_ok() {
        let spike =
            Pressure::new::<pound_force_per_square_inch>(tuning.decision.thermal_spike_psi);
        if spike > inputs.static_pressure {
            return EffectivePressure {
                pressure: spike,
                hidden_spike: true,
            };
        }
    }
    EffectivePressure {
        pressure: inputs.static_pressure,
        hidden_spike: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use opterra_core::tuning::TANK;

    use crate::test_fixtures::tank_baseline;

    fn at_psi(psi: f64) -> Pressure {
        Pressure::new::<pound_force_per_square_inch>(psi)
    }

    #[test]
    fn open_loop_uses_the_gauge_reading() {
        let inputs = ForensicInputs {
            static_pressure: at_psi(60.0),
            ..tank_baseline()
        };
        let eff = effective_pressure(&inputs, &TANK);
        assert_relative_eq!(eff.psi(), 60.0, max_relative = 1e-12);
        assert!(!eff.hidden_spike);
    }

    #[test]
    fn closed_loop_without_expansion_tank_spikes() {
        let inputs = ForensicInputs {
            static_pressure: at_psi(60.0),
            has_prv: true,
            ..tank_baseline()
        };
        let eff = effective_pressure(&inputs, &TANK);
        assert_relative_eq!(
            eff.psi(),
            TANK.decision.thermal_spike_psi,
            max_relative = 1e-12
        );
        assert!(eff.hidden_spike);
    }

    #[test]
    fn working_expansion_tank_absorbs_the_spike() {
        let inputs = ForensicInputs {
            static_pressure: at_psi(60.0),
            backflow_preventer: true,
            has_expansion_tank: true,
            expansion_tank_functional: true,
            ..tank_baseline()
        };
        let eff = effective_pressure(&inputs, &TANK);
        assert_relative_eq!(eff.psi(), 60.0, max_relative = 1e-12);
        assert!(!eff.hidden_spike);
    }

    #[test]
    fn waterlogged_expansion_tank_does_not_count() {
        let inputs = ForensicInputs {
            static_pressure: at_psi(60.0),
            backflow_preventer: true,
            has_expansion_tank: true,
            expansion_tank_functional: false,
            ..tank_baseline()
        };
        assert!(effective_pressure(&inputs, &TANK).hidden_spike);
    }

    #[test]
    fn static_reading_above_the_spike_is_kept() {
        let inputs = ForensicInputs {
            static_pressure: at_psi(150.0),
            has_prv: true,
            ..tank_baseline()
        };
        let eff = effective_pressure(&inputs, &TANK);
        assert_relative_eq!(eff.psi(), 150.0, max_relative = 1e-12);
        assert!(!eff.hidden_spike);
    }
}
