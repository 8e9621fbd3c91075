use serde::{Deserialize, Serialize};

/// The action a recommendation asks for, from most to least invasive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Take the unit out; repair is unsafe or uneconomic.
    Replace,
    /// Fix a failed part on otherwise sound hardware.
    Repair,
    /// Add missing infrastructure (PRV, expansion tank, service valves).
    Upgrade,
    /// Routine service (flush, descale, anode swap).
    Maintain,
    /// Leave the unit alone.
    Pass,
}

impl Action {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Replace => "replace",
            Self::Repair => "repair",
            Self::Upgrade => "upgrade",
            Self::Maintain => "maintain",
            Self::Pass => "pass",
        }
    }
}

/// Severity badge shown alongside a recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

/// One ranked action recommendation with its justification.
///
/// Never persisted independently of the metrics that produced it; see
/// [`OpterraResult`](crate::metrics::OpterraResult).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub action: Action,
    /// Short imperative headline.
    pub title: String,
    /// Human-readable justification.
    pub reason: String,
    /// Act now rather than at the next planned visit.
    pub urgent: bool,
    pub severity: Severity,
}
