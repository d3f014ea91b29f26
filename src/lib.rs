//! Core of the Prompt-Off competition tool: teams submit business-case
//! prompts, an upstream model produces an analysis and a score, and teams
//! compete on a shared leaderboard backed by a local SQLite table.
//!
//! The web front end and the actual LLM calls live elsewhere; this crate
//! owns the leaderboard store, the session context, and the contracts the
//! front end uses to talk to the model-facing collaborators.

pub mod competition;
pub mod error;
pub mod leaderboard;
pub mod schema;
pub mod session;
pub mod validation;

#[cfg(test)]
mod test;
