//! Tiered recommendation engine: a priority state machine where the first
//! matching tier wins.
//!
//! Tier 0 is an explosion hazard, Tier 1 a physical lockout, Tier 2 economic
//! replacement, Tier 3 salvageable service work, Tier 3B routine
//! maintenance, Tier 4 a healthy pass. Hybrid units insert their heat-pump
//! findings between the safety tiers and the economic ones. A young unit is
//! presumed serviceable: nothing below Tier 2 may surface a replacement.

use opterra_core::{
    inputs::{ForensicInputs, TanklessErrorCode},
    metrics::{FuelMetrics, OpterraMetrics, ServiceStatus},
    tuning::Tuning,
    verdict::{Action, Recommendation, Severity},
};
use uom::si::pressure::pound_force_per_square_inch;

use crate::variant::hybrid;

/// Flow degradation worth a service visit, in percent of rated output.
const FLOW_DEGRADATION_PCT: f64 = 20.0;

/// What the state machine actually found; consumed by the economic
/// optimizer, which needs more than the printable verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Finding {
    ReliefValveExceeded,
    Breach,
    VentBlocked,
    FoulingLockout,
    CriticalPressure,
    EconomicProbability,
    EconomicAge,
    LocationLiability,
    HybridCompressor,
    HybridCondensate,
    HybridAirFilter,
    HybridEnclosure,
    RegulatorFailed,
    RegulatorMissing,
    ExpansionTankMissing,
    TanklessError,
    TanklessValves,
    FoulingService,
    FoulingDeferred,
    FlowRestriction,
    AnodeRefresh,
    Healthy,
}

impl Finding {
    /// Costly plumbing-infrastructure work, subject to economic re-weighing.
    pub(crate) fn is_infrastructure(self) -> bool {
        matches!(
            self,
            Self::RegulatorFailed | Self::RegulatorMissing | Self::ExpansionTankMissing
        )
    }
}

/// A recommendation tagged with the finding that produced it.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RawVerdict {
    pub finding: Finding,
    pub recommendation: Recommendation,
}

impl RawVerdict {
    pub(crate) fn new(
        finding: Finding,
        action: Action,
        severity: Severity,
        urgent: bool,
        title: &str,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            finding,
            recommendation: Recommendation {
                action,
                title: title.to_string(),
                reason: reason.into(),
                urgent,
                severity,
            },
        }
    }
}

/// Runs the state machine and returns the first matching tier's verdict.
pub(crate) fn raw(
    metrics: &OpterraMetrics,
    inputs: &ForensicInputs,
    tuning: &Tuning,
) -> RawVerdict {
    if let Some(v) = tier0_explosion_hazard(inputs, tuning) {
        return v;
    }
    if let Some(v) = tier1_physical_lockout(metrics, inputs, tuning) {
        return v;
    }
    if inputs.fuel_type.is_hybrid() {
        if let Some(v) = hybrid::special_finding(inputs, tuning) {
            return v;
        }
    }
    if let Some(v) = tier2_economic_replacement(metrics, inputs, tuning) {
        return v;
    }
    let v = tier3_service(metrics, inputs, tuning)
        .or_else(|| tier3b_maintenance(metrics, inputs, tuning))
        .unwrap_or_else(|| tier4_pass(metrics));
    young_unit_guard(v, inputs, tuning)
}

/// Tier 0: measured static pressure at or above the safety-valve rating.
fn tier0_explosion_hazard(inputs: &ForensicInputs, tuning: &Tuning) -> Option<RawVerdict> {
    let static_psi = inputs
        .static_pressure
        .get::<pound_force_per_square_inch>();
    let rating = tuning.decision.relief_valve_rating_psi;
    if static_psi < rating {
        return None;
    }
    Some(RawVerdict::new(
        Finding::ReliefValveExceeded,
        Action::Replace,
        Severity::Critical,
        true,
        "Replace immediately and correct supply pressure",
        format!(
            "Static pressure reads {static_psi:.0} PSI, at or above the \
             {rating:.0} PSI temperature-and-pressure safety relief valve \
             rating. The relief valve is the last defense against tank \
             explosion and this unit is operating past it."
        ),
    ))
}

/// Tier 1: confirmed breach, blocked venting, fouling past lockout, or
/// sustained critical effective pressure on an aged vessel.
fn tier1_physical_lockout(
    metrics: &OpterraMetrics,
    inputs: &ForensicInputs,
    tuning: &Tuning,
) -> Option<RawVerdict> {
    if inputs.is_leaking || inputs.visual_rust {
        let evidence = if inputs.is_leaking {
            "An active leak was confirmed"
        } else {
            "Rust is visible at the tank seams or fittings"
        };
        return Some(RawVerdict::new(
            Finding::Breach,
            Action::Replace,
            Severity::Critical,
            true,
            "Replace this unit",
            format!(
                "{evidence}. The vessel is breached; no repair restores a \
                 corroded pressure boundary."
            ),
        ));
    }

    if inputs.vent_blocked {
        return Some(RawVerdict::new(
            Finding::VentBlocked,
            Action::Repair,
            Severity::Critical,
            true,
            "Restore safe venting before the next firing",
            "The flue is blocked or disconnected. Combustion exhaust is \
             spilling into the living space; the unit must not run until \
             venting is restored.",
        ));
    }

    match metrics.fuel {
        FuelMetrics::Tank {
            sediment_status: ServiceStatus::Lockout,
            sediment_lbs,
            ..
        } => {
            return Some(RawVerdict::new(
                Finding::FoulingLockout,
                Action::Replace,
                Severity::High,
                false,
                "Replace rather than flush",
                format!(
                    "Roughly {sediment_lbs:.0} lbs of sediment is packed \
                     against the base. The deposit is load-bearing on \
                     thinned steel; disturbing it now risks perforating the \
                     tank, so flushing is off the table."
                ),
            ));
        }
        FuelMetrics::Tankless {
            descale_status: ServiceStatus::Lockout,
            scale_buildup,
        } => {
            return Some(RawVerdict::new(
                Finding::FoulingLockout,
                Action::Replace,
                Severity::High,
                false,
                "Replace rather than descale",
                format!(
                    "The heat exchanger is roughly {:.0}% blocked with \
                     scale. Past this point the acid flush needed to clear \
                     it would eat through the thinned passages; even with \
                     isolation valves installed, servicing is no longer \
                     safe.",
                    scale_buildup.get()
                ),
            ));
        }
        _ => {}
    }

    let effective_psi = metrics
        .effective_pressure
        .get::<pound_force_per_square_inch>();
    let d = &tuning.decision;
    if effective_psi >= d.critical_effective_psi && inputs.age_years >= d.critical_pressure_min_age
    {
        let reason = if metrics.hidden_spike {
            format!(
                "The gauge reads a safe {:.0} PSI, but the closed loop has \
                 no working expansion tank: every heating cycle traps \
                 thermal expansion and hammers the vessel at roughly \
                 {effective_psi:.0} PSI. After {:.0} years of that cycling \
                 the steel is fatigued beyond salvage.",
                inputs
                    .static_pressure
                    .get::<pound_force_per_square_inch>(),
                inputs.age_years
            )
        } else {
            format!(
                "The unit has spent years at {effective_psi:.0} PSI of \
                 sustained pressure, far past design loading for a vessel \
                 this age."
            )
        };
        return Some(RawVerdict::new(
            Finding::CriticalPressure,
            Action::Replace,
            Severity::Critical,
            true,
            "Replace this pressure-fatigued unit",
            reason,
        ));
    }

    None
}

/// Tier 2: replacement is the economic answer even with no acute hazard.
fn tier2_economic_replacement(
    metrics: &OpterraMetrics,
    inputs: &ForensicInputs,
    tuning: &Tuning,
) -> Option<RawVerdict> {
    let d = &tuning.decision;
    let fail = metrics.failure_probability.get();

    if fail >= d.replace_fail_prob {
        return Some(RawVerdict::new(
            Finding::EconomicProbability,
            Action::Replace,
            Severity::High,
            false,
            "Replace on risk",
            format!(
                "One-year failure probability is {fail:.0}%. Money spent \
                 servicing a unit this far into wear-out is money spent on \
                 the replacement's down payment."
            ),
        ));
    }

    if inputs.age_years >= d.replace_age_years {
        return Some(RawVerdict::new(
            Finding::EconomicAge,
            Action::Replace,
            Severity::High,
            false,
            "Replace on age",
            format!(
                "At {:.0} years this unit is past the {:.0}-year planning \
                 horizon for its class; remaining life does not justify \
                 further investment.",
                inputs.age_years, d.replace_age_years
            ),
        ));
    }

    if inputs.location.is_high_consequence() && fail >= d.location_fail_prob {
        return Some(RawVerdict::new(
            Finding::LocationLiability,
            Action::Replace,
            Severity::High,
            false,
            "Replace before it leaks over finished space",
            format!(
                "One-year failure probability is {fail:.0}% and the unit \
                 sits above finished living space. A tolerable risk in a \
                 garage is a liability here; replace on your schedule, not \
                 the tank's."
            ),
        ));
    }

    None
}

/// Tier 3: the unit is salvageable but its plumbing infrastructure is not.
fn tier3_service(
    metrics: &OpterraMetrics,
    inputs: &ForensicInputs,
    tuning: &Tuning,
) -> Option<RawVerdict> {
    let static_psi = inputs
        .static_pressure
        .get::<pound_force_per_square_inch>();
    let d = &tuning.decision;
    // A PRV closes the loop, so a regulator recommendation must carry
    // expansion control with it: a PRV alone on a loop with no expansion
    // tank traps thermal spikes and is worse than doing nothing.
    let needs_expansion = !inputs.expansion_control_ok();

    if static_psi > d.high_static_psi {
        if inputs.has_prv {
            let bundle = if needs_expansion {
                " While in there, add an expansion tank; the new valve \
                 closes the loop."
            } else {
                ""
            };
            return Some(RawVerdict::new(
                Finding::RegulatorFailed,
                Action::Repair,
                Severity::High,
                false,
                "Replace the failed pressure-reducing valve",
                format!(
                    "A PRV is installed but the system still reads \
                     {static_psi:.0} PSI; the valve has failed open.{bundle}"
                ),
            ));
        }
        let (title, bundle) = if needs_expansion {
            (
                "Install a PRV together with an expansion tank",
                " Fit both in one visit: a PRV alone would close the loop \
                 with nowhere for thermal expansion to go, trapping worse \
                 spikes than the ones it prevents.",
            )
        } else {
            ("Install a pressure-reducing valve", "")
        };
        return Some(RawVerdict::new(
            Finding::RegulatorMissing,
            Action::Upgrade,
            Severity::High,
            false,
            title,
            format!(
                "Static pressure is {static_psi:.0} PSI with no regulation \
                 on the supply.{bundle}"
            ),
        ));
    }

    if inputs.is_closed_loop() && needs_expansion {
        let wording = if inputs.has_expansion_tank {
            "The expansion tank has lost its air charge and no longer \
             absorbs anything"
        } else {
            "The loop has no expansion tank at all"
        };
        return Some(RawVerdict::new(
            Finding::ExpansionTankMissing,
            Action::Upgrade,
            Severity::High,
            false,
            "Add working thermal-expansion control",
            format!(
                "{wording}. Every heating cycle spikes the closed loop to \
                 roughly {:.0} PSI while the gauge shows {static_psi:.0}.",
                metrics
                    .effective_pressure
                    .get::<pound_force_per_square_inch>()
            ),
        ));
    }

    if let Some(obs) = &inputs.tankless {
        if let Some(code) = obs.error_code {
            let (urgent, severity, title, reason) = match code {
                TanklessErrorCode::ExhaustBlockage => (
                    true,
                    Severity::Critical,
                    "Clear the exhaust before the next firing",
                    "The unit is flagging an exhaust blockage; combustion \
                     gasses are backing up.",
                ),
                TanklessErrorCode::IgnitionFailure | TanklessErrorCode::FlameLoss => (
                    false,
                    Severity::Medium,
                    "Service the burner assembly",
                    "The unit is logging ignition faults; a failing flame \
                     rod or gas valve, not a worn-out unit.",
                ),
                TanklessErrorCode::ScaleWarning => (
                    false,
                    Severity::Medium,
                    "Descale the heat exchanger",
                    "The unit itself is flagging scale buildup on the \
                     exchanger.",
                ),
            };
            return Some(RawVerdict::new(
                Finding::TanklessError,
                Action::Repair,
                severity,
                urgent,
                title,
                reason,
            ));
        }
    }

    None
}

/// Tier 3B: routine maintenance, gated on whether the unit can take it.
fn tier3b_maintenance(
    metrics: &OpterraMetrics,
    inputs: &ForensicInputs,
    tuning: &Tuning,
) -> Option<RawVerdict> {
    let d = &tuning.decision;
    // Too aged or too risky to disturb: a flush on a unit like this is how
    // leaks get induced.
    let fragile = inputs.age_years >= d.fragile_age_years
        || metrics.failure_probability.get() >= d.fragile_fail_prob;

    let serviceable = |status: ServiceStatus| {
        matches!(status, ServiceStatus::Advisory | ServiceStatus::Due)
    };

    match metrics.fuel {
        FuelMetrics::Tank {
            sediment_status,
            sediment_lbs,
            shield,
        } => {
            if serviceable(sediment_status) {
                if fragile {
                    return Some(RawVerdict::new(
                        Finding::FoulingDeferred,
                        Action::Pass,
                        Severity::Medium,
                        false,
                        "Leave this unit alone",
                        format!(
                            "There is a serviceable {sediment_lbs:.0} lbs of \
                             sediment, but the unit is too far along to \
                             disturb; a flush now is likelier to start a \
                             leak than to buy life. Let it run as-is."
                        ),
                    ));
                }
                let severity = if sediment_status == ServiceStatus::Due {
                    Severity::Medium
                } else {
                    Severity::Low
                };
                return Some(RawVerdict::new(
                    Finding::FoulingService,
                    Action::Maintain,
                    severity,
                    false,
                    "Flush the tank",
                    format!(
                        "Roughly {sediment_lbs:.0} lbs of sediment has \
                         settled. The tank is young enough to take a flush \
                         safely."
                    ),
                ));
            }

            if shield.remaining_years < tuning.anode.refresh_below_years
                && inputs.age_years <= d.anode_refresh_max_age
            {
                return Some(RawVerdict::new(
                    Finding::AnodeRefresh,
                    Action::Repair,
                    Severity::Medium,
                    false,
                    "Replace the sacrificial anode",
                    format!(
                        "The anode is effectively spent (about {:.1} years \
                         of protection left). On a {:.0}-year-old tank a new \
                         rod is the cheapest life extension available.",
                        shield.remaining_years.max(0.0),
                        inputs.age_years
                    ),
                ));
            }
        }
        FuelMetrics::Tankless {
            descale_status,
            scale_buildup,
        } => {
            if serviceable(descale_status) {
                if fragile {
                    return Some(RawVerdict::new(
                        Finding::FoulingDeferred,
                        Action::Pass,
                        Severity::Medium,
                        false,
                        "Leave this unit alone",
                        format!(
                            "The exchanger is about {:.0}% scaled, but at \
                             this age an acid flush risks opening a pinhole. \
                             Let it run as-is.",
                            scale_buildup.get()
                        ),
                    ));
                }
                let valves_present = inputs
                    .tankless
                    .map(|t| t.isolation_valves_present)
                    .unwrap_or(false);
                if !valves_present {
                    return Some(RawVerdict::new(
                        Finding::TanklessValves,
                        Action::Upgrade,
                        Severity::Medium,
                        false,
                        "Install isolation valves and descale",
                        format!(
                            "The exchanger is about {:.0}% scaled and the \
                             unit has no service valves, so it cannot be \
                             flushed in place. Fit valves and descale in the \
                             same visit.",
                            scale_buildup.get()
                        ),
                    ));
                }
                let severity = if descale_status == ServiceStatus::Due {
                    Severity::Medium
                } else {
                    Severity::Low
                };
                return Some(RawVerdict::new(
                    Finding::FoulingService,
                    Action::Maintain,
                    severity,
                    false,
                    "Descale the heat exchanger",
                    format!(
                        "The exchanger is about {:.0}% scaled; a routine \
                         flush through the isolation valves clears it.",
                        scale_buildup.get()
                    ),
                ));
            }

            if let Some(obs) = &inputs.tankless {
                if obs.flow_degradation_pct.unwrap_or(0.0) >= FLOW_DEGRADATION_PCT {
                    return Some(RawVerdict::new(
                        Finding::FlowRestriction,
                        Action::Maintain,
                        Severity::Low,
                        false,
                        "Clear the inlet restriction",
                        "Hot-water output is well below rated flow with the \
                         exchanger still serviceable; clean the inlet screen \
                         and check the flow sensor.",
                    ));
                }
            }
        }
    }

    None
}

/// Tier 4: nothing to do.
fn tier4_pass(metrics: &OpterraMetrics) -> RawVerdict {
    RawVerdict::new(
        Finding::Healthy,
        Action::Pass,
        Severity::Info,
        false,
        "No action needed",
        format!(
            "No actionable findings. Health score {:.0}/100, one-year \
             failure probability {:.1}%.",
            metrics.health_score.get(),
            metrics.failure_probability.get()
        ),
    )
}

/// Young hardware is presumed serviceable. The service tiers never emit a
/// replacement by construction; this guard states that invariant and
/// downgrades anything that would violate it.
fn young_unit_guard(v: RawVerdict, inputs: &ForensicInputs, tuning: &Tuning) -> RawVerdict {
    if inputs.age_years < tuning.decision.young_age_years
        && v.recommendation.action == Action::Replace
    {
        return RawVerdict {
            finding: v.finding,
            recommendation: Recommendation {
                action: Action::Repair,
                ..v.recommendation
            },
        };
    }
    v
}
