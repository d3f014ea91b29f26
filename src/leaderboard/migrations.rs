//! Additive schema migrations for the leaderboard table.
//!
//! Each migration carries its own check for prior application, performed
//! against the live schema rather than a bookkeeping table, so
//! `initialize` is safe against databases created by any earlier revision
//! of the table (including ones that predate this list entirely).
//! Migrations only ever add; columns are never dropped or renamed.

use diesel::{SqliteConnection, prelude::*, sql_types::BigInt};

use crate::error::Error;

pub(super) struct Migration {
    pub name: &'static str,
    applied: fn(&mut SqliteConnection) -> Result<bool, Error>,
    apply: fn(&mut SqliteConnection) -> Result<(), Error>,
}

impl Migration {
    /// Applies the migration if the schema does not already carry it.
    /// Returns whether anything was done.
    pub fn run(&self, conn: &mut SqliteConnection) -> Result<bool, Error> {
        if (self.applied)(conn)? {
            return Ok(false);
        }
        (self.apply)(conn)?;
        Ok(true)
    }
}

pub(super) const MIGRATIONS: &[Migration] = &[
    Migration {
        name: "create_leaderboard",
        applied: leaderboard_table_exists,
        apply: create_leaderboard,
    },
    Migration {
        name: "add_comment_column",
        applied: comment_column_exists,
        apply: add_comment_column,
    },
];

#[derive(QueryableByName)]
struct Count {
    #[diesel(sql_type = BigInt)]
    n: i64,
}

fn leaderboard_table_exists(
    conn: &mut SqliteConnection,
) -> Result<bool, Error> {
    let row = diesel::sql_query(
        "SELECT COUNT(*) AS n FROM sqlite_master \
         WHERE type = 'table' AND name = 'leaderboard'",
    )
    .get_result::<Count>(conn)?;

    Ok(row.n > 0)
}

fn comment_column_exists(conn: &mut SqliteConnection) -> Result<bool, Error> {
    let row = diesel::sql_query(
        "SELECT COUNT(*) AS n FROM pragma_table_info('leaderboard') \
         WHERE name = 'comment'",
    )
    .get_result::<Count>(conn)?;

    Ok(row.n > 0)
}

fn create_leaderboard(conn: &mut SqliteConnection) -> Result<(), Error> {
    // The original table shape; `comment` arrives via the next migration
    // so that fresh databases and upgraded ones take the same path.
    diesel::sql_query(
        "CREATE TABLE leaderboard (
            team TEXT PRIMARY KEY,
            score REAL,
            last_submission TIMESTAMP DEFAULT CURRENT_TIMESTAMP
        )",
    )
    .execute(conn)?;

    Ok(())
}

fn add_comment_column(conn: &mut SqliteConnection) -> Result<(), Error> {
    diesel::sql_query("ALTER TABLE leaderboard ADD COLUMN comment TEXT")
        .execute(conn)?;

    Ok(())
}
