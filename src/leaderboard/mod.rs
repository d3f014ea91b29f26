//! The leaderboard store: a file-backed SQLite table mapping each team to
//! the best score it has ever achieved, with keep-the-higher conflict
//! resolution on write and a ranked query for display.

use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::NaiveDateTime;
use diesel::{
    SqliteConnection,
    prelude::*,
    r2d2::{ConnectionManager, CustomizeConnection, Pool},
};
use serde::{Deserialize, Serialize};

use crate::{error::Error, schema::leaderboard, validation};

mod migrations;

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;

/// One leaderboard row: a team's best score, when it was achieved, and the
/// commentary attached to the score-setting submission. Rows created before
/// commentary existed carry `None`.
#[derive(Serialize, Deserialize, Queryable, Clone, Debug, PartialEq)]
pub struct LeaderboardEntry {
    pub team: String,
    pub score: f64,
    pub last_submission: NaiveDateTime,
    pub comment: Option<String>,
}

#[derive(Debug)]
struct BusyTimeout;

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error>
    for BusyTimeout
{
    fn on_acquire(
        &self,
        conn: &mut SqliteConnection,
    ) -> Result<(), diesel::r2d2::Error> {
        // Readers run concurrently with the (serialized) writers; without a
        // busy timeout they would surface SQLITE_BUSY instead of waiting.
        diesel::sql_query("PRAGMA busy_timeout = 5000")
            .execute(conn)
            .map_err(diesel::r2d2::Error::QueryError)?;

        Ok(())
    }
}

/// Durable record of each team's best score.
///
/// Constructed once at process start and passed by reference to every
/// caller; it holds no per-session state. The internal mutex serializes the
/// read-compare-write in [`record_score`](Self::record_score) and the bulk
/// [`clear_all`](Self::clear_all), so two concurrent submissions for the
/// same team cannot both observe the old score as current and both write.
pub struct LeaderboardStore {
    pool: DbPool,
    write_guard: Mutex<()>,
}

impl LeaderboardStore {
    /// Opens (or creates) the backing database. `":memory:"` is accepted
    /// for tests; a memory database gets a single-connection pool since
    /// every connection would otherwise see its own empty database.
    pub fn open(database_url: &str) -> Result<Self, Error> {
        let pool: DbPool = Pool::builder()
            .max_size(if database_url == ":memory:" { 1 } else { 10 })
            .connection_customizer(Box::new(BusyTimeout))
            .build(ConnectionManager::<SqliteConnection>::new(database_url))?;

        Ok(Self {
            pool,
            write_guard: Mutex::new(()),
        })
    }

    /// Brings the schema up to date. Idempotent: safe to call at every
    /// process start, whether the table is missing, current, or was created
    /// by an older revision without the `comment` column.
    #[tracing::instrument(skip(self))]
    pub fn initialize(&self) -> Result<(), Error> {
        let _guard = self.lock_writes();
        let mut conn = self.pool.get()?;

        for migration in migrations::MIGRATIONS {
            if migration.run(&mut conn)? {
                tracing::info!(migration = migration.name, "applied");
            } else {
                tracing::trace!(migration = migration.name, "already applied");
            }
        }

        Ok(())
    }

    /// Records a submission's score for `team`, keeping the higher of the
    /// stored and submitted scores.
    ///
    /// First write for a team inserts a row. A strictly greater score
    /// updates score, timestamp and comment in place. A losing submission
    /// changes nothing at all; its commentary is discarded, not merged.
    #[tracing::instrument(skip(self, comment))]
    pub fn record_score(
        &self,
        team: &str,
        score: f64,
        comment: Option<&str>,
    ) -> Result<(), Error> {
        validation::non_blank_team(team).map_err(Error::Validation)?;
        validation::finite_score(score).map_err(Error::Validation)?;

        let _guard = self.lock_writes();
        let mut conn = self.pool.get()?;

        let current = leaderboard::table
            .filter(leaderboard::team.eq(team))
            .select(leaderboard::score)
            .first::<f64>(&mut conn)
            .optional()?;

        match current {
            None => {
                let n = diesel::insert_into(leaderboard::table)
                    .values((
                        leaderboard::team.eq(team),
                        leaderboard::score.eq(score),
                        leaderboard::last_submission.eq(now()),
                        leaderboard::comment.eq(comment),
                    ))
                    .execute(&mut conn)?;
                debug_assert_eq!(n, 1);

                tracing::debug!("first score for team");
            }
            Some(best) if score > best => {
                diesel::update(
                    leaderboard::table.filter(leaderboard::team.eq(team)),
                )
                .set((
                    leaderboard::score.eq(score),
                    leaderboard::last_submission.eq(now()),
                    leaderboard::comment.eq(comment),
                ))
                .execute(&mut conn)?;

                tracing::debug!(previous = best, "new best score");
            }
            Some(best) => {
                tracing::trace!(best, "did not beat stored score, no-op");
            }
        }

        Ok(())
    }

    /// All rows, best score first; ties go to the team that reached the
    /// score earlier. An empty store yields an empty vec.
    #[tracing::instrument(skip(self))]
    pub fn get_ranked_entries(&self) -> Result<Vec<LeaderboardEntry>, Error> {
        let mut conn = self.pool.get()?;

        let entries = leaderboard::table
            .order((
                leaderboard::score.desc(),
                leaderboard::last_submission.asc(),
            ))
            .load::<LeaderboardEntry>(&mut conn)?;

        Ok(entries)
    }

    /// Deletes every row. Administrative reset between competition runs;
    /// clearing an empty board succeeds.
    #[tracing::instrument(skip(self))]
    pub fn clear_all(&self) -> Result<(), Error> {
        let _guard = self.lock_writes();
        let mut conn = self.pool.get()?;

        diesel::delete(leaderboard::table).execute(&mut conn)?;

        Ok(())
    }

    fn lock_writes(&self) -> MutexGuard<'_, ()> {
        // A poisoned guard only means another writer panicked; the data it
        // protects lives in SQLite, so the lock itself is still usable.
        self.write_guard
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

fn now() -> NaiveDateTime {
    chrono::Utc::now().naive_utc()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use diesel::prelude::*;

    use super::*;
    use crate::error::Error;

    fn memory_store() -> LeaderboardStore {
        let store = LeaderboardStore::open(":memory:").unwrap();
        store.initialize().unwrap();
        store
    }

    fn ts(hour: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 8, 23)
            .unwrap()
            .and_hms_opt(hour, min, 0)
            .unwrap()
    }

    /// Inserts a row with a chosen timestamp, bypassing `record_score`, for
    /// deterministic ordering tests.
    fn insert_at(
        store: &LeaderboardStore,
        team: &str,
        score: f64,
        at: NaiveDateTime,
    ) {
        let mut conn = store.pool.get().unwrap();
        diesel::insert_into(leaderboard::table)
            .values((
                leaderboard::team.eq(team),
                leaderboard::score.eq(score),
                leaderboard::last_submission.eq(at),
            ))
            .execute(&mut conn)
            .unwrap();
    }

    #[test]
    fn first_write_inserts_exactly_one_row() {
        let store = memory_store();

        store.record_score("Beta", 72.5, Some("nice try")).unwrap();

        let entries = store.get_ranked_entries().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].team, "Beta");
        assert_eq!(entries[0].score, 72.5);
        assert_eq!(entries[0].comment.as_deref(), Some("nice try"));
    }

    #[test]
    fn losing_write_changes_nothing() {
        let store = memory_store();

        store.record_score("Alpha", 50.0, Some("opener")).unwrap();
        let before = store.get_ranked_entries().unwrap();

        store.record_score("Alpha", 30.0, Some("worse")).unwrap();
        store.record_score("Alpha", 50.0, Some("equal")).unwrap();

        // Score, timestamp and comment are all untouched.
        assert_eq!(store.get_ranked_entries().unwrap(), before);
    }

    #[test]
    fn improving_write_replaces_score_timestamp_and_comment() {
        let store = memory_store();

        store.record_score("Alpha", 50.0, Some("opener")).unwrap();
        let first = store.get_ranked_entries().unwrap()[0].clone();

        store.record_score("Alpha", 80.0, Some("closer")).unwrap();
        let second = store.get_ranked_entries().unwrap()[0].clone();

        assert_eq!(second.score, 80.0);
        assert_eq!(second.comment.as_deref(), Some("closer"));
        assert!(second.last_submission >= first.last_submission);

        let entries = store.get_ranked_entries().unwrap();
        assert_eq!(entries.len(), 1, "update in place, never a new row");
    }

    #[test]
    fn stored_score_is_the_running_max() {
        let store = memory_store();

        let submissions = [50.0, 30.0, 80.0, 80.0, 79.9, 81.25, 12.0];
        let mut best = f64::NEG_INFINITY;

        for score in submissions {
            store.record_score("Alpha", score, None).unwrap();
            best = best.max(score);

            let entries = store.get_ranked_entries().unwrap();
            assert_eq!(entries[0].score, best);
        }
    }

    #[test]
    fn ranking_is_score_desc_then_earlier_submission_first() {
        let store = memory_store();

        insert_at(&store, "A", 80.0, ts(10, 0));
        insert_at(&store, "B", 95.0, ts(10, 5));
        insert_at(&store, "C", 80.0, ts(9, 50));

        let order: Vec<String> = store
            .get_ranked_entries()
            .unwrap()
            .into_iter()
            .map(|e| e.team)
            .collect();

        // C reached 80 before A did, so it outranks A on the tie.
        assert_eq!(order, vec!["B", "C", "A"]);
    }

    #[test]
    fn empty_store_ranks_to_an_empty_vec() {
        let store = memory_store();
        assert!(store.get_ranked_entries().unwrap().is_empty());
    }

    #[test]
    fn clear_all_empties_the_board_and_resets_history() {
        let store = memory_store();

        store.record_score("Alpha", 90.0, None).unwrap();
        store.record_score("Beta", 70.0, None).unwrap();

        store.clear_all().unwrap();
        assert!(store.get_ranked_entries().unwrap().is_empty());

        // Clearing an empty board is a no-op success.
        store.clear_all().unwrap();

        // A later write behaves exactly like a first-ever write: the old
        // 90 no longer shadows it.
        store.record_score("Alpha", 40.0, Some("fresh")).unwrap();
        let entries = store.get_ranked_entries().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].score, 40.0);
        assert_eq!(entries[0].comment.as_deref(), Some("fresh"));
    }

    #[test]
    fn initialize_is_idempotent_and_preserves_rows() {
        let store = memory_store();
        store.record_score("Alpha", 66.0, Some("kept")).unwrap();

        store.initialize().unwrap();
        store.initialize().unwrap();

        let entries = store.get_ranked_entries().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].comment.as_deref(), Some("kept"));
    }

    #[test]
    fn initialize_upgrades_a_legacy_table_in_place() {
        let store = LeaderboardStore::open(":memory:").unwrap();

        // A database created by the pre-comment revision of the schema.
        {
            let mut conn = store.pool.get().unwrap();
            diesel::sql_query(
                "CREATE TABLE leaderboard (
                    team TEXT PRIMARY KEY,
                    score REAL,
                    last_submission TIMESTAMP DEFAULT CURRENT_TIMESTAMP
                )",
            )
            .execute(&mut conn)
            .unwrap();
            diesel::sql_query(
                "INSERT INTO leaderboard (team, score, last_submission) \
                 VALUES ('Old Guard', 88.0, '2025-01-01 12:00:00')",
            )
            .execute(&mut conn)
            .unwrap();
        }

        store.initialize().unwrap();

        let entries = store.get_ranked_entries().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].team, "Old Guard");
        assert_eq!(entries[0].score, 88.0);
        assert_eq!(entries[0].comment, None);

        // The upgraded row participates in normal writes.
        store.record_score("Old Guard", 92.0, Some("upgraded")).unwrap();
        let entries = store.get_ranked_entries().unwrap();
        assert_eq!(entries[0].comment.as_deref(), Some("upgraded"));
    }

    #[test]
    fn blank_team_is_rejected_before_storage() {
        let store = memory_store();

        let err = store.record_score("", 50.0, None).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));

        let err = store.record_score("   ", 50.0, None).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));

        assert!(store.get_ranked_entries().unwrap().is_empty());
    }

    #[test]
    fn non_finite_score_is_rejected_before_storage() {
        let store = memory_store();

        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = store.record_score("Alpha", bad, None).unwrap_err();
            assert!(matches!(err, Error::Validation(_)));
        }

        assert!(store.get_ranked_entries().unwrap().is_empty());
    }

    #[test]
    fn storage_fault_surfaces_as_an_error() {
        // No initialize(): the table does not exist, so the write must
        // report a storage error rather than silently dropping the score.
        let store = LeaderboardStore::open(":memory:").unwrap();

        let err = store.record_score("Alpha", 50.0, None).unwrap_err();
        assert!(matches!(err, Error::Storage(_)));
    }
}
