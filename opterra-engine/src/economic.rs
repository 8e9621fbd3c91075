//! Economic optimizer: a post-pass over the raw verdict.
//!
//! The tiers answer "what is wrong"; this pass answers "is fixing it worth
//! it". Costly infrastructure work on a unit near end of life is re-weighed
//! against remaining expected value, and a healthy pass past warranty picks
//! up a budgeting note without changing the verdict.

use opterra_core::{
    inputs::ForensicInputs,
    metrics::OpterraMetrics,
    tier,
    tuning::Tuning,
    verdict::{Action, Recommendation, Severity},
};

use crate::recommend::{Finding, RawVerdict};

/// Applies economic re-weighing and returns the final recommendation.
pub(crate) fn optimize(
    raw: RawVerdict,
    metrics: &OpterraMetrics,
    inputs: &ForensicInputs,
    tuning: &Tuning,
) -> Recommendation {
    let d = &tuning.decision;

    if raw.finding.is_infrastructure() && inputs.age_years > d.run_to_failure_age {
        // The repair outlives the appliance. Spend the money on the next
        // unit, or on nothing.
        if inputs.location.is_high_consequence() {
            return Recommendation {
                action: Action::Replace,
                title: "Replace instead of re-plumbing".to_string(),
                reason: format!(
                    "{} But at {:.0} years the infrastructure work costs a \
                     large share of a new unit, and a failure here lands on \
                     finished space. Strategic replacement buys the fix and \
                     a fresh vessel in one spend.",
                    raw.recommendation.reason, inputs.age_years
                ),
                urgent: false,
                severity: Severity::High,
            };
        }
        return Recommendation {
            action: Action::Pass,
            title: "Run to failure".to_string(),
            reason: format!(
                "{} But at {:.0} years with a {:.0}% one-year failure \
                 probability, the repair would outlast the appliance it \
                 protects, and a leak here drains harmlessly. Let the unit \
                 run to failure and put the money toward its replacement.",
                raw.recommendation.reason,
                inputs.age_years,
                metrics.failure_probability.get()
            ),
            urgent: false,
            severity: Severity::Medium,
        };
    }

    let mut rec = raw.recommendation;
    if raw.finding == Finding::Healthy {
        let warranty = inputs
            .warranty_years
            .unwrap_or(tier::DEFAULT_WARRANTY_YEARS);
        if inputs.age_years > warranty {
            rec.reason.push_str(&format!(
                " The unit is {:.0} years past its {warranty:.0}-year \
                 warranty; worth starting a replacement budget even though \
                 nothing needs doing today.",
                inputs.age_years - warranty
            ));
        }
    }
    rec
}
