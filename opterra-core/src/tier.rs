use serde::{Deserialize, Serialize};

/// Quality tier of the installed unit, detected from its warranty length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityTier {
    Standard,
    Professional,
    Premium,
}

/// Venting arrangement typical of a tier's product line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VentType {
    Atmospheric,
    PowerVent,
    DirectVent,
}

/// Static catalog record for a quality tier.
///
/// Looked up, never computed, so the record serializes but is never read
/// back. The anode capacity model reads `anode_mass_factor` (longer-warranty
/// tanks ship with more sacrificial mass); the downstream pricing module
/// reads the rest.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TierProfile {
    pub tier: QualityTier,
    pub warranty_years: f64,
    pub vent_type: VentType,
    pub features: &'static [&'static str],
    /// Typical installed cost, used as a quote baseline.
    pub baseline_cost_usd: f64,
    /// Sacrificial anode mass relative to the standard tier.
    pub anode_mass_factor: f64,
}

/// Warranty length assumed when the label is unreadable.
pub const DEFAULT_WARRANTY_YEARS: f64 = 6.0;

const CATALOG: [TierProfile; 3] = [
    TierProfile {
        tier: QualityTier::Standard,
        warranty_years: 6.0,
        vent_type: VentType::Atmospheric,
        features: &["glass-lined tank", "single anode"],
        baseline_cost_usd: 1_850.0,
        anode_mass_factor: 1.0,
    },
    TierProfile {
        tier: QualityTier::Professional,
        warranty_years: 9.0,
        vent_type: VentType::PowerVent,
        features: &["glass-lined tank", "oversized anode", "brass drain valve"],
        baseline_cost_usd: 2_600.0,
        anode_mass_factor: 1.35,
    },
    TierProfile {
        tier: QualityTier::Premium,
        warranty_years: 12.0,
        vent_type: VentType::DirectVent,
        features: &[
            "glass-lined tank",
            "dual anodes",
            "brass drain valve",
            "leak-detection pan fitting",
        ],
        baseline_cost_usd: 3_400.0,
        anode_mass_factor: 1.7,
    },
];

impl TierProfile {
    /// Returns the catalog tier whose warranty class covers `warranty_years`.
    ///
    /// Labels round down: an 8-year warranty is a Standard-class build with
    /// marketing on top, not a Professional one.
    #[must_use]
    pub fn for_warranty(warranty_years: f64) -> &'static TierProfile {
        if warranty_years >= CATALOG[2].warranty_years {
            &CATALOG[2]
        } else if warranty_years >= CATALOG[1].warranty_years {
            &CATALOG[1]
        } else {
            &CATALOG[0]
        }
    }

    /// The full catalog, ordered by ascending warranty.
    #[must_use]
    pub fn catalog() -> &'static [TierProfile] {
        &CATALOG
    }
}
