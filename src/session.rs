//! Session-scoped state for one team's run through the competition.
//!
//! Created when the team registers, passed into handlers, discarded when
//! the session ends. The leaderboard store carries none of this: it is
//! shared between sessions and outlives all of them.

use crate::{competition::evaluate::Evaluation, validation};

/// Industry groups offered at team registration.
pub const INDUSTRIES: &[&str] = &[
    "Health",
    "Technology",
    "Gas",
    "Finance",
    "Retail",
    "Manufacturing",
    "Energy",
];

/// Attempts each team gets per competition run.
pub const SUBMISSION_LIMIT: u32 = 3;

#[derive(Clone, Debug)]
pub struct SessionContext {
    team_name: String,
    industry: String,
    submissions_left: u32,
    last_response: Option<String>,
    last_evaluation: Option<Evaluation>,
}

impl SessionContext {
    pub fn new(team_name: &str, industry: &str) -> Result<Self, String> {
        validation::non_blank_team(team_name)?;

        Ok(Self {
            team_name: team_name.trim().to_string(),
            industry: industry.to_string(),
            submissions_left: SUBMISSION_LIMIT,
            last_response: None,
            last_evaluation: None,
        })
    }

    pub fn team_name(&self) -> &str {
        &self.team_name
    }

    pub fn industry(&self) -> &str {
        &self.industry
    }

    /// The identifier written to the leaderboard: chosen name plus selected
    /// category, e.g. `"Alpha Consultants (Finance)"`.
    pub fn team_label(&self) -> String {
        format!("{} ({})", self.team_name, self.industry)
    }

    pub fn submissions_left(&self) -> u32 {
        self.submissions_left
    }

    pub fn can_submit(&self) -> bool {
        self.submissions_left > 0
    }

    /// Consumes one attempt from the budget. Returns false once the budget
    /// is exhausted, in which case nothing is consumed.
    pub fn begin_submission(&mut self) -> bool {
        if self.submissions_left == 0 {
            return false;
        }
        self.submissions_left -= 1;
        true
    }

    /// Caches the most recent narrative and evaluation for re-display.
    pub fn record_outcome(&mut self, response: String, evaluation: Evaluation) {
        self.last_response = Some(response);
        self.last_evaluation = Some(evaluation);
    }

    pub fn last_response(&self) -> Option<&str> {
        self.last_response.as_deref()
    }

    pub fn last_evaluation(&self) -> Option<&Evaluation> {
        self.last_evaluation.as_ref()
    }
}
