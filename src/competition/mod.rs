//! The submission pipeline: one team attempt from prompt to leaderboard.

use crate::{
    error::Error, leaderboard::LeaderboardStore, session::SessionContext,
};

pub mod commentary;
pub mod evaluate;
pub mod respond;
pub mod social;

use commentary::CommentaryGenerator;
use evaluate::{Evaluation, Evaluator};
use respond::ResponseGenerator;

/// Everything produced by one submission attempt, for display to the team.
#[derive(Clone, Debug)]
pub struct SubmissionOutcome {
    pub response: String,
    pub evaluation: Evaluation,
    pub commentary: String,
}

/// Runs one submission: generate the narrative, score it, generate the
/// commentary, and record the result on the leaderboard under the
/// session's team label.
///
/// Blank prompts and exhausted sessions are rejected up front. The
/// collaborators are infallible by contract (they fall back rather than
/// fail), so the only error past validation is a storage fault — which
/// propagates, so the caller can tell the team the submission was not
/// recorded instead of showing a rank.
#[tracing::instrument(skip_all, fields(team = %session.team_label()))]
pub fn run_submission(
    session: &mut SessionContext,
    prompt: &str,
    generator: &dyn ResponseGenerator,
    evaluator: &dyn Evaluator,
    commentator: &dyn CommentaryGenerator,
    store: &LeaderboardStore,
) -> Result<SubmissionOutcome, Error> {
    if prompt.trim().is_empty() {
        return Err(Error::Validation("prompt must not be empty".to_string()));
    }
    if !session.begin_submission() {
        return Err(Error::Validation(
            "no submissions left for this session".to_string(),
        ));
    }

    let label = session.team_label();

    let response = generator.generate_response(prompt, &label);
    let evaluation = evaluator.evaluate(&response, &label);
    let commentary = commentator.generate_commentary(
        evaluation.overall,
        &response,
        session.team_name(),
    );

    store.record_score(&label, evaluation.overall, Some(&commentary))?;

    session.record_outcome(response.clone(), evaluation.clone());

    Ok(SubmissionOutcome {
        response,
        evaluation,
        commentary,
    })
}
