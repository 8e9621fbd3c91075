//! Versioned tuning constants, separated from decision-tree logic.
//!
//! Each fuel family gets one immutable constant set. Control flow in the
//! engine never embeds a threshold directly; retuning the model means
//! editing this module and nothing else. The `version` field names the
//! constant era in effect (superseded eras are design history, not parallel
//! requirements).

use crate::inputs::FuelType;

/// Floor applied to rate denominators before division.
pub const MIN_RATE: f64 = 1e-6;

/// Weibull survival parameters for a fuel family.
///
/// `beta > 2` places every family in the wear-out regime; tankless uses a
/// steeper shape, reflecting the faster terminal decline of a neglected
/// heat exchanger.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeibullParams {
    /// Characteristic life η, in bio-years.
    pub eta_years: f64,
    /// Shape β.
    pub beta: f64,
}

/// Anode burn model constants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnodeTuning {
    /// Protection budget per warranty year at a 1.0 burn rate.
    pub capacity_per_warranty_year: f64,
    /// Burn multiplier while softened water is flowing.
    pub softener_rate: f64,
    /// Burn multiplier for direct copper (non-dielectric) connections.
    pub copper_rate: f64,
    /// Burn multiplier under continuous recirculation.
    pub recirculation_rate: f64,
    /// Burn multiplier on a chloraminated supply.
    pub chloramine_rate: f64,
    /// Cap on the combined burn rate.
    pub rate_cap: f64,
    /// Recommend an anode swap once remaining life drops below this.
    pub refresh_below_years: f64,
}

/// Fouling accumulation constants (tank sediment or tankless scale).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FoulingTuning {
    /// Accumulation per GPG-year at nominal usage (lbs for tanks, % blockage
    /// for tankless).
    pub rate_per_gpg_year: f64,
    /// Exponent applied to hardness; tankless scaling is nonlinear.
    pub hardness_exponent: f64,
    /// Share of pre-service scale left behind as permanent scarring.
    pub residual_fraction: f64,
    /// Extra fouling factor for immersed electric elements.
    pub electric_element_factor: f64,
    /// Worth mentioning at the next visit.
    pub advisory: f64,
    /// Service is due now.
    pub due: f64,
    /// Servicing is itself unsafe; route to replacement.
    pub lockout: f64,
}

/// Stress-factor slopes and caps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StressTuning {
    /// Clamp on the combined multiplier.
    pub cap: f64,
    /// Share of chemical stress suppressed while the anode is intact.
    pub chemical_suppression: f64,
    /// Absolute ceiling on modeled age, in bio-years.
    pub max_bio_age_years: f64,
    /// Pressure above this contributes mechanical stress.
    pub pressure_baseline_psi: f64,
    /// Stress added per 10 PSI above baseline.
    pub pressure_per_10_psi: f64,
    /// Hot-spot stress per unit of fouling (per lb or per % blockage).
    pub hot_spot_per_unit: f64,
    /// Cap on the hot-spot factor alone.
    pub hot_spot_cap: f64,
    /// Thermostat setting treated as neutral, in °F.
    pub temp_baseline_f: f64,
    /// Total temperature effect per 10 °F away from baseline, split evenly
    /// between the mechanical and chemical classes.
    pub temp_per_10_f: f64,
    /// Erosion-corrosion factor under continuous recirculation.
    pub circulation_erosion: f64,
    /// Dissolved-oxygen cycling factor on a closed loop.
    pub closed_loop_oxygen: f64,
}

/// Failure-probability and health-score constants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbabilityTuning {
    /// Ceiling on the statistical output, in percent.
    pub statistical_cap: f64,
    /// Probability forced by confirmed physical evidence (leak, rust,
    /// blocked venting), in percent.
    pub breach_probability: f64,
    /// Decay constant k in `score = 100·e^(−k·failProb)`.
    pub health_decay: f64,
}

/// Thresholds consumed by the tiered recommendation engine and the
/// economic optimizer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecisionThresholds {
    /// T&P safety-valve rating; static pressure at or above this is an
    /// explosion hazard.
    pub relief_valve_rating_psi: f64,
    /// Peak pressure assumed for trapped thermal expansion.
    pub thermal_spike_psi: f64,
    /// Effective pressure considered vessel-critical.
    pub critical_effective_psi: f64,
    /// Age below which critical effective pressure is a service finding,
    /// not a replacement one.
    pub critical_pressure_min_age: f64,
    /// Static pressure above which regulation is required.
    pub high_static_psi: f64,
    /// Failure probability forcing economic replacement, in percent.
    pub replace_fail_prob: f64,
    /// Absolute age cap forcing economic replacement.
    pub replace_age_years: f64,
    /// Lower probability threshold in high-consequence locations.
    pub location_fail_prob: f64,
    /// Below this age a unit is presumed serviceable (young-unit override).
    pub young_age_years: f64,
    /// At or past this age a unit is too fragile to disturb.
    pub fragile_age_years: f64,
    /// At or past this probability a unit is too fragile to disturb.
    pub fragile_fail_prob: f64,
    /// Anode refresh is only worthwhile below this age.
    pub anode_refresh_max_age: f64,
    /// Past this age, costly infrastructure repairs are re-weighed against
    /// remaining expected life.
    pub run_to_failure_age: f64,
}

/// One canonical constant set for a fuel family.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tuning {
    /// Constant era in effect.
    pub version: &'static str,
    pub weibull: WeibullParams,
    pub anode: AnodeTuning,
    pub fouling: FoulingTuning,
    pub stress: StressTuning,
    pub probability: ProbabilityTuning,
    pub decision: DecisionThresholds,
}

const TANK_ANODE: AnodeTuning = AnodeTuning {
    capacity_per_warranty_year: 1.0,
    softener_rate: 2.5,
    copper_rate: 1.3,
    recirculation_rate: 1.5,
    chloramine_rate: 1.4,
    rate_cap: 6.0,
    refresh_below_years: 1.0,
};

const TANK_PROBABILITY: ProbabilityTuning = ProbabilityTuning {
    statistical_cap: 85.0,
    breach_probability: 99.9,
    health_decay: 0.045,
};

/// Storage-tank constants.
pub const TANK: Tuning = Tuning {
    version: "v3",
    weibull: WeibullParams {
        eta_years: 12.0,
        beta: 2.6,
    },
    anode: TANK_ANODE,
    fouling: FoulingTuning {
        rate_per_gpg_year: 0.125,
        hardness_exponent: 1.0,
        residual_fraction: 0.0,
        electric_element_factor: 1.3,
        advisory: 5.0,
        due: 10.0,
        lockout: 20.0,
    },
    stress: StressTuning {
        cap: 3.5,
        chemical_suppression: 0.9,
        max_bio_age_years: 40.0,
        pressure_baseline_psi: 80.0,
        pressure_per_10_psi: 0.10,
        hot_spot_per_unit: 0.02,
        hot_spot_cap: 1.5,
        temp_baseline_f: 125.0,
        temp_per_10_f: 0.12,
        circulation_erosion: 1.25,
        closed_loop_oxygen: 1.15,
    },
    probability: TANK_PROBABILITY,
    decision: DecisionThresholds {
        relief_valve_rating_psi: 150.0,
        thermal_spike_psi: 135.0,
        critical_effective_psi: 135.0,
        critical_pressure_min_age: 8.0,
        high_static_psi: 80.0,
        replace_fail_prob: 60.0,
        replace_age_years: 15.0,
        location_fail_prob: 30.0,
        young_age_years: 6.0,
        fragile_age_years: 12.0,
        fragile_fail_prob: 40.0,
        anode_refresh_max_age: 8.0,
        run_to_failure_age: 10.0,
    },
};

/// Tankless constants. No anode exists on these units; the anode block is
/// carried only so the `Tuning` shape stays uniform and is never read by the
/// tankless engine.
pub const TANKLESS: Tuning = Tuning {
    version: "v3",
    weibull: WeibullParams {
        eta_years: 15.0,
        beta: 3.4,
    },
    anode: TANK_ANODE,
    fouling: FoulingTuning {
        rate_per_gpg_year: 0.9,
        hardness_exponent: 1.15,
        residual_fraction: 0.5,
        electric_element_factor: 1.2,
        advisory: 25.0,
        due: 40.0,
        lockout: 60.0,
    },
    stress: StressTuning {
        cap: 3.5,
        chemical_suppression: 0.9,
        max_bio_age_years: 40.0,
        pressure_baseline_psi: 80.0,
        pressure_per_10_psi: 0.08,
        hot_spot_per_unit: 0.004,
        hot_spot_cap: 1.4,
        temp_baseline_f: 120.0,
        temp_per_10_f: 0.12,
        circulation_erosion: 1.25,
        closed_loop_oxygen: 1.1,
    },
    probability: TANK_PROBABILITY,
    decision: DecisionThresholds {
        relief_valve_rating_psi: 150.0,
        thermal_spike_psi: 135.0,
        critical_effective_psi: 140.0,
        critical_pressure_min_age: 10.0,
        high_static_psi: 80.0,
        replace_fail_prob: 60.0,
        replace_age_years: 20.0,
        location_fail_prob: 30.0,
        young_age_years: 8.0,
        fragile_age_years: 15.0,
        fragile_fail_prob: 40.0,
        anode_refresh_max_age: 0.0,
        run_to_failure_age: 14.0,
    },
};

/// Heat-pump hybrid constants. Shares the tank's physics with a slightly
/// shorter characteristic life (more plumbing, condensate handling, and a
/// compressor on top of the tank).
pub const HYBRID: Tuning = Tuning {
    version: "v3",
    weibull: WeibullParams {
        eta_years: 11.0,
        beta: 2.8,
    },
    decision: DecisionThresholds {
        replace_age_years: 13.0,
        ..TANK.decision
    },
    ..TANK
};

impl Tuning {
    /// Returns the canonical constant set for a fuel family.
    #[must_use]
    pub fn for_fuel(fuel: FuelType) -> &'static Tuning {
        if fuel.is_hybrid() {
            &HYBRID
        } else if fuel.is_tankless() {
            &TANKLESS
        } else {
            &TANK
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn router_picks_family_constants() {
        assert_eq!(Tuning::for_fuel(FuelType::NaturalGas), &TANK);
        assert_eq!(Tuning::for_fuel(FuelType::Electric), &TANK);
        assert_eq!(Tuning::for_fuel(FuelType::TanklessGas), &TANKLESS);
        assert_eq!(Tuning::for_fuel(FuelType::HeatPumpHybrid), &HYBRID);
    }

    #[test]
    fn all_families_are_in_the_wear_out_regime() {
        for t in [&TANK, &TANKLESS, &HYBRID] {
            assert!(t.weibull.beta > 2.0);
        }
        assert!(TANKLESS.weibull.beta > TANK.weibull.beta);
    }

    #[test]
    fn thresholds_are_ordered() {
        for t in [&TANK, &TANKLESS, &HYBRID] {
            assert!(t.fouling.advisory < t.fouling.due);
            assert!(t.fouling.due < t.fouling.lockout);
            assert!(t.decision.location_fail_prob < t.decision.replace_fail_prob);
            assert!(t.probability.statistical_cap < t.probability.breach_probability);
        }
    }
}
