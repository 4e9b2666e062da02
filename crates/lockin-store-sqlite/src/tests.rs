//! Integration tests for `SqliteStore`.

use chrono::{Duration, Utc};
use lockin_core::{
  event::{MANUAL_FAIL_REASON, NewFailEvent},
  profile::UserProfile,
  stats::CHART_WINDOW_DAYS,
  store::{TrackerSession, TrackerStore},
};

use crate::{SqliteSession, SqliteStore, store::Source};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

async fn session(store: &SqliteStore) -> SqliteSession {
  store.session().await.expect("session")
}

/// Run raw SQL against an in-memory store's shared connection.
async fn exec(store: &SqliteStore, sql: &'static str) {
  let Source::Shared(conn) = &store.source else {
    panic!("expected an in-memory store");
  };
  conn
    .call(move |conn| {
      conn.execute_batch(sql)?;
      Ok(())
    })
    .await
    .unwrap();
}

fn temp_db_path(name: &str) -> std::path::PathBuf {
  let nanos = Utc::now().timestamp_nanos_opt().unwrap_or_default();
  std::env::temp_dir().join(format!(
    "lockin-{name}-{}-{nanos}.db",
    std::process::id()
  ))
}

// ─── Profile ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn new_store_has_zeroed_profile() {
  let s = store().await;
  let profile = session(&s).await.profile().await.unwrap();
  assert_eq!(profile, Some(UserProfile { streak_days: 0, fail_count: 0 }));
}

#[tokio::test]
async fn missing_profile_reads_as_none() {
  let s = store().await;
  exec(&s, "DELETE FROM user_profile").await;
  assert!(session(&s).await.profile().await.unwrap().is_none());
}

#[tokio::test]
async fn success_extends_streak() {
  let s = store().await;
  let sess = session(&s).await;

  sess.record_success().await.unwrap();
  let profile = sess.record_success().await.unwrap();
  assert_eq!(profile, UserProfile { streak_days: 2, fail_count: 0 });
  assert_eq!(sess.profile().await.unwrap(), Some(profile));
}

#[tokio::test]
async fn success_without_profile_errors() {
  let s = store().await;
  exec(&s, "DELETE FROM user_profile").await;

  let err = session(&s).await.record_success().await.unwrap_err();
  assert!(matches!(err, crate::Error::ProfileMissing));
}

// ─── Fail events ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn fail_resets_streak_and_counts() {
  let s = store().await;
  let sess = session(&s).await;

  sess.record_success().await.unwrap();
  sess.record_success().await.unwrap();
  let (event, profile) = sess
    .record_fail(NewFailEvent::manual("http://x/1.mp4"))
    .await
    .unwrap();

  assert_eq!(profile, UserProfile { streak_days: 0, fail_count: 1 });
  assert_eq!(event.reason, MANUAL_FAIL_REASON);
  assert_eq!(event.video_url.as_deref(), Some("http://x/1.mp4"));
  assert!(Utc::now() - event.timestamp < Duration::minutes(1));
}

#[tokio::test]
async fn counters_follow_any_sequence() {
  let s = store().await;
  let sess = session(&s).await;

  // true = success, false = fail
  let script = [true, true, false, true, false, false, true, true, true];
  for &success in &script {
    if success {
      sess.record_success().await.unwrap();
    } else {
      sess.record_fail(NewFailEvent::manual("")).await.unwrap();
    }
  }

  let fails = script.iter().filter(|s| !**s).count() as u32;
  let streak = script.iter().rev().take_while(|s| **s).count() as u32;
  let profile = sess.profile().await.unwrap().unwrap();
  assert_eq!(profile, UserProfile { streak_days: streak, fail_count: fails });
  assert_eq!(
    sess.recent_fail_events(100).await.unwrap().len(),
    fails as usize
  );
}

#[tokio::test]
async fn fail_without_profile_rolls_back_insert() {
  let s = store().await;
  exec(&s, "DELETE FROM user_profile").await;
  let sess = session(&s).await;

  let err = sess
    .record_fail(NewFailEvent::manual("http://x/1.mp4"))
    .await
    .unwrap_err();
  assert!(matches!(err, crate::Error::ProfileMissing));
  assert!(sess.recent_fail_events(10).await.unwrap().is_empty());
}

#[tokio::test]
async fn fail_rolls_back_when_update_errors() {
  let s = store().await;
  exec(&s, "DROP TABLE user_profile").await;
  let sess = session(&s).await;

  let err = sess
    .record_fail(NewFailEvent::manual(""))
    .await
    .unwrap_err();
  assert!(matches!(err, crate::Error::Database(_)));
  assert!(sess.recent_fail_events(10).await.unwrap().is_empty());
}

#[tokio::test]
async fn recent_events_are_newest_first() {
  let s = store().await;
  let sess = session(&s).await;

  let (first, _) = sess.record_fail(NewFailEvent::manual("a")).await.unwrap();
  let (second, _) = sess.record_fail(NewFailEvent::manual("b")).await.unwrap();

  let events = sess.recent_fail_events(10).await.unwrap();
  assert_eq!(events, vec![second.clone(), first]);
  assert_eq!(sess.recent_fail_events(1).await.unwrap(), vec![second]);
}

// ─── Chart ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn daily_fails_are_sparse_and_ascending() {
  let s = store().await;
  let sess = session(&s).await;
  let now = Utc::now();

  for offset in [0, 0, 2, 7, 8, 30] {
    sess
      .record_fail(NewFailEvent::manual("").at(now - Duration::days(offset)))
      .await
      .unwrap();
  }

  let days = sess.daily_fails(CHART_WINDOW_DAYS).await.unwrap();
  let got: Vec<_> = days.iter().map(|d| (d.date, d.fails)).collect();
  let date = |offset: i64| (now - Duration::days(offset)).date_naive();
  assert_eq!(got, vec![(date(7), 1), (date(2), 1), (date(0), 2)]);
}

#[tokio::test]
async fn daily_fails_empty_store() {
  let s = store().await;
  let days = session(&s).await.daily_fails(CHART_WINDOW_DAYS).await.unwrap();
  assert!(days.is_empty());
}

// ─── File-backed store ───────────────────────────────────────────────────────

#[tokio::test]
async fn file_store_persists_across_sessions_and_reopens() {
  let path = temp_db_path("persist");

  let s = SqliteStore::open(&path).await.unwrap();
  assert_eq!(s.path(), Some(path.as_path()));
  {
    let sess = session(&s).await;
    sess.record_success().await.unwrap();
    sess.record_fail(NewFailEvent::manual("")).await.unwrap();
    sess.record_success().await.unwrap();
  }

  // Re-applying the schema must not reset the profile row.
  let reopened = SqliteStore::open(&path).await.unwrap();
  let profile = session(&reopened).await.profile().await.unwrap();
  assert_eq!(profile, Some(UserProfile { streak_days: 1, fail_count: 1 }));

  drop((s, reopened));
  for suffix in ["", "-wal", "-shm"] {
    let _ = std::fs::remove_file(format!("{}{suffix}", path.display()));
  }
}
