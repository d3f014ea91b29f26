/// Errors surfaced by the leaderboard store and the submission pipeline.
///
/// Validation failures are rejected before any storage is touched. Storage
/// faults are never downgraded to a no-op: a caller that cannot record a
/// score must be able to tell the user so, rather than display a rank that
/// was never persisted.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid submission: {0}")]
    Validation(String),

    #[error("leaderboard storage unavailable: {0}")]
    Storage(#[from] diesel::result::Error),

    #[error("leaderboard storage unavailable: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),
}
