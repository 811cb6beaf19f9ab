#![forbid(unsafe_code)]

//! Scenario impact calculation and its interpretation table.
//!
//! The predicted deviation is `coefficient * shock_pct`, nothing else. The
//! only other logic is choosing which narrative describes the result, and
//! that is a fixed 2x3 table indexed by [`CoefficientSign`] and [`Sign`].
//!
//! A negative coefficient is read as a *resilient response*: a supply loss
//! is followed by utilization above the baseline because counter-measures
//! (stock release, market adaptation) overshoot the shock. A non-negative
//! coefficient is read in the expected direction.

use serde::Serialize;

use crate::format;

/// Sign of a predicted deviation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sign {
    Positive,
    Negative,
    Zero,
}

impl Sign {
    /// Classify a value. Zero is an exact comparison, so `-0.0` is `Zero`.
    #[must_use]
    pub fn of(value: f64) -> Self {
        if value == 0.0 {
            Self::Zero
        } else if value > 0.0 {
            Self::Positive
        } else {
            Self::Negative
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::Zero => "zero",
        }
    }

    const fn column(self) -> usize {
        match self {
            Self::Positive => 0,
            Self::Negative => 1,
            Self::Zero => 2,
        }
    }
}

/// Row key of the narrative table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CoefficientSign {
    Negative,
    /// Zero and positive coefficients share a row; a zero coefficient can only
    /// produce [`Sign::Zero`].
    NonNegative,
}

impl CoefficientSign {
    #[must_use]
    pub fn of(coefficient: f64) -> Self {
        if coefficient < 0.0 {
            Self::Negative
        } else {
            Self::NonNegative
        }
    }

    const fn row(self) -> usize {
        match self {
            Self::Negative => 0,
            Self::NonNegative => 1,
        }
    }
}

/// Visual emphasis of the headline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Success,
    Error,
    Warning,
}

/// One cell of the interpretation table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Narrative {
    /// Title of the quantified headline. `None` means the headline is the
    /// caption itself (no deviation to quantify).
    pub label: Option<&'static str>,
    /// Trailing qualifier after the quantity, e.g. `Higher than Baseline`.
    pub qualifier: Option<&'static str>,
    pub caption: &'static str,
    pub tone: Tone,
}

const NO_DEVIATION: Narrative = Narrative {
    label: None,
    qualifier: None,
    caption: "No predicted deviation from the baseline.",
    tone: Tone::Warning,
};

static NARRATIVES: [[Narrative; 3]; 2] = [
    // Negative coefficient.
    [
        Narrative {
            label: Some("Predicted Utilization Effect"),
            qualifier: Some("Higher than Baseline"),
            caption: "The model suggests a resilient response: a negative supply shock is \
                      predicted to lead to a higher reported utilization relative to the \
                      baseline. This implies that strong government counter-measures (like \
                      stock release) or market adaptations successfully overshot the negative \
                      shock in the historical data.",
            tone: Tone::Success,
        },
        Narrative {
            label: Some("Predicted Utilization Effect"),
            qualifier: Some("Lower than Baseline"),
            caption: "The model predicts a lower utilization relative to the baseline for a \
                      positive shock. This is often interpreted as market saturation or storage \
                      limits preventing the full utilization of the surplus in that year.",
            tone: Tone::Error,
        },
        NO_DEVIATION,
    ],
    // Zero or positive coefficient.
    [
        Narrative {
            label: Some("Predicted Utilization Increase"),
            qualifier: None,
            caption: "The model predicts an increase in utilization, which is the expected \
                      result of a supply surplus.",
            tone: Tone::Success,
        },
        Narrative {
            label: Some("Predicted Utilization Decrease"),
            qualifier: None,
            caption: "The model predicts a decrease in utilization, which is the expected \
                      result of a supply loss.",
            tone: Tone::Error,
        },
        NO_DEVIATION,
    ],
];

/// Look up the narrative for a coefficient sign and a deviation sign.
#[must_use]
pub fn narrative_for(coefficient: CoefficientSign, deviation: Sign) -> &'static Narrative {
    &NARRATIVES[coefficient.row()][deviation.column()]
}

/// Result of one scenario evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Impact {
    pub coefficient: f64,
    pub shock_pct: f64,
    /// Predicted change in kcal/capita/day relative to the baseline.
    pub deviation: f64,
    pub sign: Sign,
    pub narrative: &'static Narrative,
}

impl Impact {
    /// The interpretation caption.
    #[must_use]
    pub fn message(&self) -> &'static str {
        self.narrative.caption
    }

    /// Metric headline, e.g.
    /// `Predicted Utilization Effect: +0.99 kcal/capita/day (Higher than Baseline)`.
    #[must_use]
    pub fn headline(&self) -> String {
        let Some(label) = self.narrative.label else {
            return self.narrative.caption.to_string();
        };
        let amount = format::signed_2(self.deviation);
        match self.narrative.qualifier {
            Some(qualifier) => format!("{label}: {amount} kcal/capita/day ({qualifier})"),
            None => format!("{label}: {amount} kcal/capita/day"),
        }
    }
}

/// Evaluate a scenario: `deviation = coefficient * shock_pct`.
///
/// No rounding happens here; see [`crate::format`] for display.
#[must_use]
pub fn compute_impact(coefficient: f64, shock_pct: f64) -> Impact {
    let deviation = coefficient * shock_pct;
    let sign = Sign::of(deviation);
    Impact {
        coefficient,
        shock_pct,
        deviation,
        sign,
        narrative: narrative_for(CoefficientSign::of(coefficient), sign),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COEF: f64 = -0.0987;

    #[test]
    fn negative_shock_with_negative_coefficient_is_resilient() {
        let impact = compute_impact(COEF, -10.0);
        assert!((impact.deviation - 0.987).abs() < 1e-12);
        assert_eq!(impact.sign, Sign::Positive);
        assert!(impact.message().contains("resilient response"));
        assert_eq!(impact.narrative.tone, Tone::Success);
        assert_eq!(
            impact.headline(),
            "Predicted Utilization Effect: +0.99 kcal/capita/day (Higher than Baseline)"
        );
    }

    #[test]
    fn positive_shock_with_negative_coefficient_is_saturation() {
        let impact = compute_impact(COEF, 10.0);
        assert!((impact.deviation + 0.987).abs() < 1e-12);
        assert_eq!(impact.sign, Sign::Negative);
        assert!(impact.message().contains("market saturation"));
        assert_eq!(
            impact.headline(),
            "Predicted Utilization Effect: -0.99 kcal/capita/day (Lower than Baseline)"
        );
    }

    #[test]
    fn zero_shock_has_no_deviation() {
        let impact = compute_impact(COEF, 0.0);
        assert_eq!(impact.deviation, 0.0);
        assert_eq!(impact.sign, Sign::Zero);
        assert_eq!(impact.message(), "No predicted deviation from the baseline.");
        assert_eq!(impact.headline(), impact.message());
        assert_eq!(impact.narrative.tone, Tone::Warning);
    }

    #[test]
    fn negative_zero_counts_as_zero() {
        assert_eq!(Sign::of(-0.0), Sign::Zero);
        assert_eq!(compute_impact(COEF, -0.0).sign, Sign::Zero);
    }

    #[test]
    fn positive_coefficient_uses_expected_direction_row() {
        let up = compute_impact(0.25, 4.0);
        assert_eq!(up.sign, Sign::Positive);
        assert_eq!(up.headline(), "Predicted Utilization Increase: +1.00 kcal/capita/day");

        let down = compute_impact(0.25, -4.0);
        assert_eq!(down.sign, Sign::Negative);
        assert_eq!(down.headline(), "Predicted Utilization Decrease: -1.00 kcal/capita/day");
        assert!(down.message().contains("supply loss"));
    }

    #[test]
    fn zero_coefficient_only_yields_zero() {
        for shock in [-20.0, -0.5, 0.0, 0.5, 20.0] {
            let impact = compute_impact(0.0, shock);
            assert_eq!(impact.sign, Sign::Zero, "shock={shock}");
        }
        assert_eq!(CoefficientSign::of(0.0), CoefficientSign::NonNegative);
    }

    #[test]
    fn slider_extremes_stay_finite() {
        let low = compute_impact(COEF, -20.0);
        let high = compute_impact(COEF, 20.0);
        assert!(low.deviation.is_finite() && high.deviation.is_finite());
        assert_eq!(low.sign, Sign::Positive);
        assert_eq!(high.sign, Sign::Negative);
    }

    #[test]
    fn table_is_total_and_non_empty() {
        for coefficient in [CoefficientSign::Negative, CoefficientSign::NonNegative] {
            for sign in [Sign::Positive, Sign::Negative, Sign::Zero] {
                let narrative = narrative_for(coefficient, sign);
                assert!(!narrative.caption.is_empty());
                assert_eq!(narrative.label.is_none(), sign == Sign::Zero);
            }
        }
    }

    #[test]
    fn sign_serializes_lowercase() {
        let json = serde_json::to_string(&Sign::Positive).unwrap();
        assert_eq!(json, "\"positive\"");
    }
}
