use serde::{Deserialize, Serialize};
use uom::si::f64::Pressure;

use crate::{Percent, inputs::psi_serde, verdict::Recommendation};

/// Where a resolved hardness value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HardnessSource {
    /// Measured at a fixture with a test strip.
    Measured,
    /// Inferred from softener presence and brine-tank state.
    SoftenerInference,
    /// Street or regional value, used as-is.
    StreetValue,
}

/// Confidence tag attached to a resolved hardness value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

/// The hardness actually reaching the appliance, after resolving
/// conflicting signals (measurement, softener state, street value).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolvedHardness {
    /// Untreated street hardness, in grains per gallon.
    pub street_gpg: f64,
    /// Hardness at the appliance inlet, in grains per gallon.
    pub effective_gpg: f64,
    pub source: HardnessSource,
    pub confidence: Confidence,
}

/// Named stress multipliers and their composed totals.
///
/// Every factor is ≥ 1.0 except protective configurations (a low thermostat
/// setting can dip below 1.0). Factors compound multiplicatively and the
/// combined total is clamped at the stress cap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StressBreakdown {
    /// Effective-pressure loading on the vessel.
    pub pressure: f64,
    /// Thermal hot-spotting under sediment or scale.
    pub fouling_hot_spot: f64,
    /// Mechanical half of the thermostat-setting effect.
    pub temperature_mechanical: f64,
    /// Chemical half of the thermostat-setting effect.
    pub temperature_chemical: f64,
    /// Erosion-corrosion from continuous recirculation.
    pub circulation_erosion: f64,
    /// Dissolved-oxygen cycling on a closed loop.
    pub closed_loop_oxygen: f64,
    /// Product of the mechanical factors.
    pub mechanical_total: f64,
    /// Product of the chemical factors, before anode suppression.
    pub chemical_total: f64,
    /// Capped product of both classes; the naked-phase aging rate.
    pub combined: f64,
}

/// Advisory ladder for an accumulating service burden.
///
/// Beyond `Lockout`, servicing is itself unsafe (the deposit is load-bearing
/// on weakened material) and the unit routes to replacement instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceStatus {
    Ok,
    Advisory,
    Due,
    Lockout,
}

/// Anode budget accounting for tank and hybrid units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShieldMetrics {
    /// Protection budget of a fresh anode at a 1.0 burn rate, in years.
    pub capacity_years: f64,
    /// Budget consumed so far, in equivalent years.
    pub consumed_years: f64,
    /// Current burn-rate multiplier (product of active accelerants).
    pub current_rate: f64,
    /// Remaining protected years at the current rate; never negative.
    pub remaining_years: f64,
    /// Calendar age at which the budget exhausts. May exceed the current
    /// age (still protected) or precede it (running naked).
    pub depletion_age_years: f64,
}

impl ShieldMetrics {
    /// True once the anode mass is spent.
    #[must_use]
    pub fn depleted(&self) -> bool {
        self.remaining_years <= 0.0
    }
}

/// Metric extensions that only exist for some fuel families.
///
/// Hybrid units carry the `Tank` variant; they share the tank's anode and
/// sediment physics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FuelMetrics {
    Tank {
        shield: ShieldMetrics,
        sediment_lbs: f64,
        sediment_status: ServiceStatus,
    },
    Tankless {
        /// Heat-exchanger blockage.
        scale_buildup: Percent,
        descale_status: ServiceStatus,
    },
}

/// Everything the engine computed about one unit, derived purely from a
/// [`ForensicInputs`](crate::inputs::ForensicInputs) snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpterraMetrics {
    /// Wear-adjusted effective age, in years.
    pub bio_age_years: f64,
    /// One-year conditional failure probability.
    pub failure_probability: Percent,
    /// Exponential health score; 100 is factory-fresh.
    pub health_score: Percent,
    /// Modeled peak pressure, including invisible thermal spikes.
    #[serde(with = "psi_serde")]
    pub effective_pressure: Pressure,
    /// The effective pressure exceeds the gauge reading (trapped thermal
    /// expansion on a closed loop).
    pub hidden_spike: bool,
    /// Resolved inlet hardness with provenance.
    pub hardness: ResolvedHardness,
    /// Named stress multipliers.
    pub stress: StressBreakdown,
    /// Fuel-specific extensions.
    pub fuel: FuelMetrics,
}

/// The engine's complete answer: metrics plus the verdict derived from them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpterraResult {
    pub metrics: OpterraMetrics,
    pub verdict: Recommendation,
}
