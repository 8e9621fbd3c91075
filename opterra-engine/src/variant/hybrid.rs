//! Heat-pump hybrid engine.
//!
//! Shares the tank engine's physics (anode, sediment, biphasic aging) with
//! hybrid tuning, and screens for heat-pump-specific failure modes before
//! handing off to the shared tiered logic.

use opterra_core::{
    inputs::{ForensicInputs, HybridObservations},
    metrics::OpterraMetrics,
    tuning::{HYBRID, Tuning},
    verdict::{Action, Severity},
};

use crate::recommend::{Finding, RawVerdict};

use super::tank;

/// Minimum free air volume around an unducted unit, in cubic feet.
/// Below this the heat pump starves its own intake and short-cycles.
const MIN_ENCLOSURE_CU_FT: f64 = 700.0;

/// Computes metrics for a hybrid unit.
#[must_use]
pub fn metrics(inputs: &ForensicInputs) -> OpterraMetrics {
    tank::metrics_with(inputs, &HYBRID)
}

/// Heat-pump failure modes checked before the shared tiers.
///
/// Ordered by consequence: a dead compressor first (the unit is limping on
/// resistance elements), then water-damage and airflow findings.
pub(crate) fn special_finding(inputs: &ForensicInputs, tuning: &Tuning) -> Option<RawVerdict> {
    let obs: &HybridObservations = inputs.hybrid.as_ref()?;

    if obs.compressor_failed {
        return Some(if inputs.age_years < tuning.decision.young_age_years {
            RawVerdict::new(
                Finding::HybridCompressor,
                Action::Repair,
                Severity::High,
                false,
                "Repair the heat-pump compressor",
                "The compressor is dead and the unit is running on resistance \
                 elements alone, at several times the operating cost. At this \
                 age the compressor is worth repairing, and is likely still \
                 under parts warranty.",
            )
        } else {
            RawVerdict::new(
                Finding::HybridCompressor,
                Action::Replace,
                Severity::High,
                false,
                "Replace this hybrid unit",
                "The compressor is dead and the unit is running on resistance \
                 elements alone. A compressor swap on a unit this age costs a \
                 large share of a new hybrid and inherits a worn tank.",
            )
        });
    }

    if obs.condensate_drain_blocked {
        return Some(RawVerdict::new(
            Finding::HybridCondensate,
            Action::Repair,
            Severity::High,
            true,
            "Clear the condensate drain",
            "The condensate drain is blocked. The heat pump sheds water \
             continuously while running; a blocked drain overflows into the \
             surrounding space every cycle.",
        ));
    }

    if obs.air_filter_clogged {
        return Some(RawVerdict::new(
            Finding::HybridAirFilter,
            Action::Maintain,
            Severity::Low,
            false,
            "Clean the air intake filter",
            "The intake filter is clogged, starving the heat pump and pushing \
             the unit onto its resistance elements.",
        ));
    }

    if let Some(volume) = obs.enclosure_volume_cu_ft {
        if volume < MIN_ENCLOSURE_CU_FT && !obs.ducted_intake {
            return Some(RawVerdict::new(
                Finding::HybridEnclosure,
                Action::Upgrade,
                Severity::Medium,
                false,
                "Duct the intake or open the enclosure",
                "The enclosure is too small for an unducted heat pump; the \
                 unit recirculates its own chilled exhaust and falls back to \
                 resistance heating.",
            ));
        }
    }

    None
}
