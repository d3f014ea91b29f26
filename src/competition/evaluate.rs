//! Scoring of generated analyses against the business-case rubric.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The rubric criteria, as (payload key, display name) pairs. Carried as
/// data rather than struct fields so older rubric revisions (which named
/// and counted the criteria differently) stay representable.
pub const EVALUATION_CRITERIA: &[(&str, &str)] = &[
    ("strategic_fit_objectives", "Strategic Fit & Objectives"),
    ("audience_relationships", "Audience & Relationships"),
    ("commercials_resourcing", "Commercials & Resourcing"),
    (
        "outcomes_measurement_activation",
        "Outcomes, Measurement & Activation",
    ),
];

/// A structured score record for one submission: the overall mark plus
/// per-criterion sub-scores and an optional feedback paragraph.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Evaluation {
    pub overall: f64,
    #[serde(default)]
    pub sub_scores: BTreeMap<String, f64>,
    #[serde(default)]
    pub feedback: String,
}

impl Evaluation {
    /// The fixed record substituted for malformed upstream output. Marks
    /// everything at 10.0 so it never displaces a genuine score already on
    /// the board.
    pub fn fallback() -> Self {
        Self {
            overall: 10.0,
            sub_scores: EVALUATION_CRITERIA
                .iter()
                .map(|(key, _)| (key.to_string(), 10.0))
                .collect(),
            feedback: "The evaluator could not make sense of the model \
                       output, so no real marks were awarded. Try again."
                .to_string(),
        }
    }

    /// Parses an upstream completion payload. Malformed output yields the
    /// fallback record instead of an error: the caller always gets a score
    /// to display and record.
    pub fn from_llm_json(raw: &str) -> Self {
        match serde_json::from_str(raw) {
            Ok(evaluation) => evaluation,
            Err(err) => {
                tracing::warn!(%err, "malformed evaluation payload");
                Self::fallback()
            }
        }
    }
}

/// The interpretation line shown next to the overall score. The marker is
/// extremely harsh: only near-perfect scores pass.
pub fn interpret_score(score: f64) -> &'static str {
    if score >= 95.0 {
        "Excellent - barely acceptable. You are not completely useless."
    } else {
        "Needs work - this will not win any budget. Do better or go home."
    }
}

/// Scores a generated analysis for a team. Implementations substitute
/// [`Evaluation::fallback`] for output they cannot parse; they never fail
/// the caller.
pub trait Evaluator {
    fn evaluate(&self, text: &str, context_label: &str) -> Evaluation;
}
