use serde::{Deserialize, Serialize};
use thiserror::Error;
use uom::si::f64::Pressure;

/// Fuel families recognized by the router.
///
/// The discriminator determines which variant engine runs and which optional
/// observation blocks on [`ForensicInputs`] are meaningful. That pairing is a
/// documented contract, not an enforced one: a tank assessment simply ignores
/// a populated `tankless` block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FuelType {
    NaturalGas,
    Propane,
    Electric,
    TanklessGas,
    TanklessElectric,
    HeatPumpHybrid,
}

impl FuelType {
    /// True for the on-demand variants with a heat exchanger instead of a tank.
    #[must_use]
    pub fn is_tankless(self) -> bool {
        matches!(self, Self::TanklessGas | Self::TanklessElectric)
    }

    /// True for the heat-pump hybrid variant.
    #[must_use]
    pub fn is_hybrid(self) -> bool {
        matches!(self, Self::HeatPumpHybrid)
    }

    /// True where heat enters the water through immersed electric elements.
    ///
    /// Elements foul faster per unit hardness than gas burners because scale
    /// precipitates directly on the heating surface.
    #[must_use]
    pub fn uses_electric_elements(self) -> bool {
        matches!(
            self,
            Self::Electric | Self::TanklessElectric | Self::HeatPumpHybrid
        )
    }
}

/// Observed salt level in a water softener's brine tank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaltStatus {
    /// Brine tank stocked; the softener is presumed to be working.
    Ok,
    /// Brine tank empty; the softener passes street water through untreated.
    Empty,
    /// Brine tank not inspected.
    Unknown,
}

/// Where the appliance is installed.
///
/// Location drives the consequence side of the risk equation: a slow leak in
/// an unfinished garage is a mop-up, the same leak above a finished ceiling
/// is a claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Location {
    UnfinishedGarage,
    UnfinishedBasement,
    Exterior,
    UtilityCloset,
    Attic,
    UpperFloor,
    FinishedInterior,
}

impl Location {
    /// True where a leak damages finished space below or around the unit.
    #[must_use]
    pub fn is_high_consequence(self) -> bool {
        matches!(self, Self::Attic | Self::UpperFloor | Self::FinishedInterior)
    }
}

/// Service-history intervals, in years before the assessment.
///
/// A `None` interval means "no record"; the engine assumes the service never
/// happened and uses the unit's age instead.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ServiceHistory {
    /// Years since the tank was last flushed.
    pub years_since_flush: Option<f64>,
    /// Years since the sacrificial anode was last replaced.
    pub years_since_anode_replacement: Option<f64>,
    /// Years since a tankless heat exchanger was last descaled.
    pub years_since_descale: Option<f64>,
}

/// Manufacturer fault codes observed on a tankless unit's display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TanklessErrorCode {
    IgnitionFailure,
    FlameLoss,
    ScaleWarning,
    ExhaustBlockage,
}

/// Field observations specific to tankless units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TanklessObservations {
    /// Isolation/service valves installed, allowing an in-place descale.
    pub isolation_valves_present: bool,
    /// Observed hot-water output drop versus rated flow, in percent.
    pub flow_degradation_pct: Option<f64>,
    /// Active fault code, if any.
    pub error_code: Option<TanklessErrorCode>,
}

/// Field observations specific to heat-pump hybrid units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HybridObservations {
    /// Air intake filter visibly clogged.
    pub air_filter_clogged: bool,
    /// Condensate drain line blocked or overflowing.
    pub condensate_drain_blocked: bool,
    /// Free air volume of the enclosure around the unit, in cubic feet.
    pub enclosure_volume_cu_ft: Option<f64>,
    /// Intake/exhaust ducted to outside the enclosure.
    pub ducted_intake: bool,
    /// Compressor confirmed dead (unit running on resistance elements only).
    pub compressor_failed: bool,
}

/// Serializes pressure fields in PSI so fixtures stay readable.
pub mod psi_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use uom::si::{f64::Pressure, pressure::pound_force_per_square_inch};

    pub fn serialize<S: Serializer>(p: &Pressure, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(p.get::<pound_force_per_square_inch>())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Pressure, D::Error> {
        f64::deserialize(deserializer).map(Pressure::new::<pound_force_per_square_inch>)
    }
}

/// One immutable snapshot of everything the engine knows about a unit.
///
/// Built by upstream collaborators (intake form, hardness geolocation,
/// persisted service records) with every async lookup already resolved to a
/// plain value. The engine is a pure function of this snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForensicInputs {
    /// Fuel family; selects the variant engine.
    pub fuel_type: FuelType,

    /// Calendar age of the unit, in years. Must be ≥ 0.
    pub age_years: f64,

    /// Static pressure read at a hose bib or drain valve.
    #[serde(with = "psi_serde")]
    pub static_pressure: Pressure,

    /// Street or regional hardness, in grains per gallon.
    pub street_hardness_gpg: f64,

    /// Hardness measured at a fixture, if a test strip was used.
    pub measured_hardness_gpg: Option<f64>,

    /// Number of occupants, as a proxy for draw volume.
    pub occupants: f64,

    /// Thermostat setting in °F; defaults to 125 when unrecorded.
    pub set_temperature_f: Option<f64>,

    /// Manufacturer warranty length, in years; selects the quality tier.
    pub warranty_years: Option<f64>,

    /// Installed location.
    pub location: Location,

    /// A water softener is plumbed in upstream.
    pub has_softener: bool,

    /// Brine-tank state; only meaningful when `has_softener`.
    pub softener_salt: SaltStatus,

    /// Years the softener has been installed, if added after the heater.
    /// `None` means the softener predates the unit.
    pub softener_age_years: Option<f64>,

    /// Continuous recirculation pump installed.
    pub has_recirculation_pump: bool,

    /// Thermal expansion tank installed.
    pub has_expansion_tank: bool,

    /// Expansion tank holds its air charge; only meaningful when present.
    pub expansion_tank_functional: bool,

    /// Pressure-reducing valve installed on the supply.
    pub has_prv: bool,

    /// Check valve or backflow preventer observed on the supply main.
    ///
    /// A PRV also closes the loop; use [`ForensicInputs::is_closed_loop`]
    /// rather than reading this flag directly.
    pub backflow_preventer: bool,

    /// Dielectric unions at the water connections. `false` means direct
    /// copper-to-steel contact, a galvanic accelerant on the anode.
    pub dielectric_unions: bool,

    /// Utility disinfects with chloramine rather than free chlorine.
    pub chloraminated_supply: bool,

    /// Rust visible at the tank seams, fittings, or burner area.
    pub visual_rust: bool,

    /// Active leak confirmed.
    pub is_leaking: bool,

    /// Flue or exhaust venting blocked or disconnected.
    pub vent_blocked: bool,

    /// Service-history intervals.
    pub service: ServiceHistory,

    /// Tankless-only observations; meaningful when `fuel_type.is_tankless()`.
    pub tankless: Option<TanklessObservations>,

    /// Hybrid-only observations; meaningful when `fuel_type.is_hybrid()`.
    pub hybrid: Option<HybridObservations>,
}

impl ForensicInputs {
    /// True when the plumbing cannot relieve thermal expansion back into the
    /// supply main. A PRV closes the loop just as a check valve does.
    #[must_use]
    pub fn is_closed_loop(&self) -> bool {
        self.backflow_preventer || self.has_prv
    }

    /// True when an expansion tank is present and holding its charge.
    #[must_use]
    pub fn expansion_control_ok(&self) -> bool {
        self.has_expansion_tank && self.expansion_tank_functional
    }

    /// Checks that every numeric field is finite and every age or interval
    /// is non-negative.
    ///
    /// # Errors
    ///
    /// Returns an [`InputError`] naming the first offending field.
    pub fn validate(&self) -> Result<(), InputError> {
        check_measure("age_years", self.age_years)?;
        check_measure("static_pressure", self.static_pressure.value)?;
        check_measure("street_hardness_gpg", self.street_hardness_gpg)?;
        check_measure("occupants", self.occupants)?;
        check_opt_measure("measured_hardness_gpg", self.measured_hardness_gpg)?;
        check_opt_finite("set_temperature_f", self.set_temperature_f)?;
        check_opt_measure("warranty_years", self.warranty_years)?;
        check_opt_measure("softener_age_years", self.softener_age_years)?;
        check_opt_measure("years_since_flush", self.service.years_since_flush)?;
        check_opt_measure(
            "years_since_anode_replacement",
            self.service.years_since_anode_replacement,
        )?;
        check_opt_measure("years_since_descale", self.service.years_since_descale)?;
        if let Some(t) = &self.tankless {
            check_opt_measure("flow_degradation_pct", t.flow_degradation_pct)?;
        }
        if let Some(h) = &self.hybrid {
            check_opt_measure("enclosure_volume_cu_ft", h.enclosure_volume_cu_ft)?;
        }
        Ok(())
    }
}

fn check_measure(field: &'static str, value: f64) -> Result<(), InputError> {
    if !value.is_finite() {
        return Err(InputError::NotFinite { field });
    }
    if value < 0.0 {
        return Err(InputError::Negative { field });
    }
    Ok(())
}

fn check_opt_measure(field: &'static str, value: Option<f64>) -> Result<(), InputError> {
    match value {
        Some(v) => check_measure(field, v),
        None => Ok(()),
    }
}

fn check_opt_finite(field: &'static str, value: Option<f64>) -> Result<(), InputError> {
    match value {
        Some(v) if !v.is_finite() => Err(InputError::NotFinite { field }),
        _ => Ok(()),
    }
}

/// An error returned when a [`ForensicInputs`] snapshot fails validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum InputError {
    #[error("`{field}` is not finite")]
    NotFinite { field: &'static str },
    #[error("`{field}` must not be negative")]
    Negative { field: &'static str },
}

#[cfg(test)]
mod tests {
    use super::*;

    use uom::si::pressure::pound_force_per_square_inch;

    fn snapshot() -> ForensicInputs {
        ForensicInputs {
            fuel_type: FuelType::NaturalGas,
            age_years: 8.0,
            static_pressure: Pressure::new::<pound_force_per_square_inch>(65.0),
            street_hardness_gpg: 10.0,
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
            service: ServiceHistory::default(),
            tankless: None,
            hybrid: None,
        }
    }

    #[test]
    fn valid_snapshot_passes() {
        assert!(snapshot().validate().is_ok());
    }

    #[test]
    fn negative_age_is_rejected() {
        let inputs = ForensicInputs {
            age_years: -1.0,
            ..snapshot()
        };
        assert_eq!(
            inputs.validate(),
            Err(InputError::Negative { field: "age_years" })
        );
    }

    #[test]
    fn non_finite_interval_is_rejected() {
        let inputs = ForensicInputs {
            service: ServiceHistory {
                years_since_flush: Some(f64::NAN),
                ..ServiceHistory::default()
            },
            ..snapshot()
        };
        assert_eq!(
            inputs.validate(),
            Err(InputError::NotFinite {
                field: "years_since_flush"
            })
        );
    }

    #[test]
    fn prv_closes_the_loop() {
        let inputs = ForensicInputs {
            has_prv: true,
            ..snapshot()
        };
        assert!(inputs.is_closed_loop());
        assert!(!snapshot().is_closed_loop());
    }

    #[test]
    fn pressure_round_trips_in_psi() {
        use approx::assert_relative_eq;

        let json = serde_json::to_value(snapshot()).unwrap();
        assert_relative_eq!(
            json["static_pressure"].as_f64().unwrap(),
            65.0,
            max_relative = 1e-12
        );
        let back: ForensicInputs = serde_json::from_value(json).unwrap();
        assert_relative_eq!(
            back.static_pressure.get::<pound_force_per_square_inch>(),
            65.0,
            max_relative = 1e-12
        );
    }
}
