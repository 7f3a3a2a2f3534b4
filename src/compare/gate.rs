//! CI gating rules over a set of comparisons.

use super::diff::Comparison;
use super::thresholds::{Direction, Severity};
use serde::Serialize;

/// Verdict of the CI gate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GateOutcome {
    pub failed: bool,
    pub reasons: Vec<String>,
    pub worst_regression: Option<Comparison>,
}

/// Fails when a regression reaches `fail_on`, or when the worst regression
/// magnitude reaches `max_top_regression_pct`.
pub fn evaluate_ci_gate(
    comparisons: &[Comparison],
    fail_on: Severity,
    max_top_regression_pct: Option<f64>,
) -> GateOutcome {
    let mut reasons = Vec::new();
    let mut worst: Option<&Comparison> = None;
    let mut worst_magnitude = 0.0f64;

    for comparison in comparisons
        .iter()
        .filter(|c| c.direction == Direction::Regression)
    {
        let magnitude = comparison.regression_magnitude_pct();
        if magnitude >= worst_magnitude {
            worst_magnitude = magnitude;
            worst = Some(comparison);
        }
        if comparison.severity >= fail_on {
            reasons.push(format!(
                "severity>={}: {} ({}) {:+.2}%",
                fail_on,
                comparison.name,
                comparison.metric,
                comparison.pct_change.unwrap_or_default()
            ));
        }
    }

    if let Some(limit) = max_top_regression_pct {
        if worst_magnitude >= limit {
            reasons.push(match worst {
                Some(c) => format!(
                    "top_regression {} ({}) magnitude {:.2}% >= {:.2}%",
                    c.name, c.metric, worst_magnitude, limit
                ),
                None => format!(
                    "top_regression magnitude {:.2}% >= {:.2}%",
                    worst_magnitude, limit
                ),
            });
        }
    }

    GateOutcome {
        failed: !reasons.is_empty(),
        reasons,
        worst_regression: worst.cloned(),
    }
}
