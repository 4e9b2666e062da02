//! [`SqliteStore`] — the SQLite implementation of [`TrackerStore`].

use std::{
  path::{Path, PathBuf},
  time::Duration,
};

use rusqlite::OptionalExtension as _;

use lockin_core::{
  event::{FailEvent, NewFailEvent},
  profile::{PROFILE_ID, UserProfile},
  stats::DailyFails,
  store::{TrackerSession, TrackerStore},
};

use crate::{
  Error, Result,
  encode::{RawDailyFails, RawFailEvent, encode_timestamp, profile_from_row},
  schema::SCHEMA,
};

/// How long a session waits on another connection's write lock.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

// ─── Store ───────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub(crate) enum Source {
  /// A database file; every session opens its own connection.
  File(PathBuf),
  /// One connection shared by all sessions (in-memory databases).
  Shared(tokio_rusqlite::Connection),
}

/// A tracker store backed by a single SQLite database.
///
/// Cloning is cheap. The store itself holds no open connection for file-backed
/// databases; connections live only as long as the [`SqliteSession`] that owns
/// them.
#[derive(Clone)]
pub struct SqliteStore {
  pub(crate) source: Source,
}

impl SqliteStore {
  /// Open (or create) the database at `path` and apply the schema.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref().to_path_buf();
    let conn = tokio_rusqlite::Connection::open(&path).await?;
    init_schema(&conn).await?;
    conn.close().await?;

    tracing::debug!(path = %path.display(), "sqlite schema applied");
    Ok(Self { source: Source::File(path) })
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    init_schema(&conn).await?;
    Ok(Self { source: Source::Shared(conn) })
  }

  /// Path of the backing file, if any.
  pub fn path(&self) -> Option<&Path> {
    match &self.source {
      Source::File(path) => Some(path),
      Source::Shared(_) => None,
    }
  }
}

async fn init_schema(conn: &tokio_rusqlite::Connection) -> Result<()> {
  conn
    .call(|conn| {
      conn.execute_batch(SCHEMA)?;
      Ok(())
    })
    .await?;
  Ok(())
}

impl TrackerStore for SqliteStore {
  type Error = Error;
  type Session = SqliteSession;

  async fn session(&self) -> Result<SqliteSession> {
    let conn = match &self.source {
      Source::File(path) => {
        let conn = tokio_rusqlite::Connection::open(path).await?;
        conn
          .call(|conn| {
            conn.busy_timeout(BUSY_TIMEOUT)?;
            Ok(())
          })
          .await?;
        conn
      }
      Source::Shared(conn) => conn.clone(),
    };
    Ok(SqliteSession { conn })
  }
}

// ─── Session ─────────────────────────────────────────────────────────────────

/// A request-scoped connection.
///
/// For file-backed stores the connection is closed when the session is
/// dropped, whether or not the request succeeded.
pub struct SqliteSession {
  conn: tokio_rusqlite::Connection,
}

impl TrackerSession for SqliteSession {
  type Error = Error;

  async fn profile(&self) -> Result<Option<UserProfile>> {
    let profile = self
      .conn
      .call(|conn| {
        Ok(
          conn
            .query_row(
              "SELECT streak_days, fail_count FROM user_profile WHERE id = ?1",
              rusqlite::params![PROFILE_ID],
              profile_from_row,
            )
            .optional()?,
        )
      })
      .await?;
    Ok(profile)
  }

  async fn daily_fails(&self, window_days: u32) -> Result<Vec<DailyFails>> {
    let modifier = format!("-{window_days} days");

    let raws: Vec<RawDailyFails> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT DATE(timestamp) AS day, COUNT(*) AS fails
           FROM fail_events
           WHERE timestamp >= DATE('now', ?1)
           GROUP BY day
           ORDER BY day",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![modifier], |row| {
            Ok(RawDailyFails {
              date:  row.get(0)?,
              fails: row.get(1)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawDailyFails::into_daily).collect()
  }

  async fn record_fail(&self, input: NewFailEvent) -> Result<(FailEvent, UserProfile)> {
    let NewFailEvent { reason, video_url, timestamp } = input;
    let timestamp_str = timestamp.map(encode_timestamp);

    let written: Option<(RawFailEvent, UserProfile)> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        tx.execute(
          "INSERT INTO fail_events (reason, video_url, timestamp)
           VALUES (?1, ?2, COALESCE(?3, CURRENT_TIMESTAMP))",
          rusqlite::params![reason, video_url, timestamp_str],
        )?;
        let event_id = tx.last_insert_rowid();

        let profile = tx
          .query_row(
            "UPDATE user_profile
             SET streak_days = 0, fail_count = fail_count + 1
             WHERE id = ?1
             RETURNING streak_days, fail_count",
            rusqlite::params![PROFILE_ID],
            profile_from_row,
          )
          .optional()?;

        // Dropping `tx` without committing rolls the insert back.
        let Some(profile) = profile else {
          return Ok(None);
        };

        let event = tx.query_row(
          "SELECT id, reason, video_url, timestamp FROM fail_events WHERE id = ?1",
          rusqlite::params![event_id],
          RawFailEvent::from_row,
        )?;

        tx.commit()?;
        Ok(Some((event, profile)))
      })
      .await?;

    let (raw, profile) = written.ok_or(Error::ProfileMissing)?;
    Ok((raw.into_event()?, profile))
  }

  async fn record_success(&self) -> Result<UserProfile> {
    let profile: Option<UserProfile> = self
      .conn
      .call(|conn| {
        let tx = conn.transaction()?;
        let profile = tx
          .query_row(
            "UPDATE user_profile
             SET streak_days = streak_days + 1
             WHERE id = ?1
             RETURNING streak_days, fail_count",
            rusqlite::params![PROFILE_ID],
            profile_from_row,
          )
          .optional()?;
        if profile.is_some() {
          tx.commit()?;
        }
        Ok(profile)
      })
      .await?;

    profile.ok_or(Error::ProfileMissing)
  }

  async fn recent_fail_events(&self, limit: usize) -> Result<Vec<FailEvent>> {
    let limit_val = i64::try_from(limit).unwrap_or(i64::MAX);

    let raws: Vec<RawFailEvent> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT id, reason, video_url, timestamp
           FROM fail_events
           ORDER BY id DESC
           LIMIT ?1",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![limit_val], RawFailEvent::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawFailEvent::into_event).collect()
  }
}
