//! Sacrificial-anode budget accounting for tank and hybrid units.
//!
//! The anode is a finite consumable mass. Capacity scales with the quality
//! tier (longer-warranty tanks ship with more sacrificial metal); the burn
//! rate is the product of independent accelerants. Consumption is
//! history-aware: an accelerant added partway through the unit's life only
//! burns from its onset, decomposed as an ordered list of
//! `{duration, rate}` intervals.

use opterra_core::{
    inputs::{ForensicInputs, SaltStatus},
    metrics::ShieldMetrics,
    tier::{DEFAULT_WARRANTY_YEARS, TierProfile},
    tuning::{MIN_RATE, Tuning},
};

/// One span of the consumption window burning at a constant rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BurnInterval {
    pub duration_years: f64,
    /// Burn-rate multiplier over the span; 1.0 is benign water.
    pub rate: f64,
}

/// True when softened water is actually flowing through the unit.
///
/// An empty brine tank passes street water through untreated, so it does
/// not accelerate the anode. An uninspected tank is assumed active, the
/// conservative reading for shield life.
fn softener_active(inputs: &ForensicInputs) -> bool {
    inputs.has_softener && inputs.softener_salt != SaltStatus::Empty
}

/// The combined burn-rate multiplier, capped.
fn burn_rate(inputs: &ForensicInputs, tuning: &Tuning, softened: bool) -> f64 {
    let a = &tuning.anode;
    let mut rate = 1.0;
    if softened {
        rate *= a.softener_rate;
    }
    if !inputs.dielectric_unions {
        rate *= a.copper_rate;
    }
    if inputs.has_recirculation_pump {
        rate *= a.recirculation_rate;
    }
    if inputs.chloraminated_supply {
        rate *= a.chloramine_rate;
    }
    rate.min(a.rate_cap)
}

/// Decomposes the consumption window into constant-rate intervals.
///
/// The window starts at the last anode replacement (or at install, absent a
/// record) and splits at the softener onset so today's rate is never applied
/// retroactively. Zero-length spans are dropped.
#[must_use]
pub fn burn_intervals(inputs: &ForensicInputs, tuning: &Tuning) -> Vec<BurnInterval> {
    let age = inputs.age_years;
    let window = inputs
        .service
        .years_since_anode_replacement
        .unwrap_or(age)
        .min(age);
    let window_start_age = age - window;

    // Age at which the softener accelerant switched on. A softener that
    // predates the unit (no onset record) has been active the whole life;
    // an inactive softener never switches on.
    let onset_age = if softener_active(inputs) {
        (age - inputs.softener_age_years.unwrap_or(age)).max(0.0)
    } else {
        age
    };

    let before = (onset_age - window_start_age).clamp(0.0, window);
    let after = window - before;

    let mut intervals = Vec::with_capacity(2);
    if before > 0.0 {
        intervals.push(BurnInterval {
            duration_years: before,
            rate: burn_rate(inputs, tuning, false),
        });
    }
    if after > 0.0 {
        intervals.push(BurnInterval {
            duration_years: after,
            rate: burn_rate(inputs, tuning, true),
        });
    }
    intervals
}

/// Computes the full shield assessment for a snapshot.
#[must_use]
pub fn shield_assessment(inputs: &ForensicInputs, tuning: &Tuning) -> ShieldMetrics {
    let profile = TierProfile::for_warranty(
        inputs.warranty_years.unwrap_or(DEFAULT_WARRANTY_YEARS),
    );
    let capacity_years = profile.warranty_years
        * tuning.anode.capacity_per_warranty_year
        * profile.anode_mass_factor;

    let age = inputs.age_years;
    let window = inputs
        .service
        .years_since_anode_replacement
        .unwrap_or(age)
        .min(age);
    let window_start_age = age - window;

    let intervals = burn_intervals(inputs, tuning);
    let consumed_years: f64 = intervals
        .iter()
        .map(|iv| iv.duration_years * iv.rate)
        .sum();

    let current_rate = burn_rate(inputs, tuning, softener_active(inputs));
    let remaining_years =
        ((capacity_years - consumed_years) / current_rate.max(MIN_RATE)).max(0.0);

    // Walk the intervals to locate the exhaustion point; if the budget
    // survives the window, project forward at the current rate.
    let mut depletion_age_years = age + remaining_years;
    let mut cumulative = 0.0;
    let mut at_age = window_start_age;
    for iv in &intervals {
        let after = cumulative + iv.duration_years * iv.rate;
        if after >= capacity_years {
            depletion_age_years = at_age + (capacity_years - cumulative) / iv.rate.max(MIN_RATE);
            break;
        }
        cumulative = after;
        at_age += iv.duration_years;
    }

    ShieldMetrics {
        capacity_years,
        consumed_years,
        current_rate,
        remaining_years,
        depletion_age_years,
    }
}
