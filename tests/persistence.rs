#[cfg(test)]
mod tests {
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use readlog::libs::session::{ActiveSession, BookId};
    use readlog::libs::store::{decode, encode, FileStore, KeyValueStore, MemoryStore, SessionStore, ACTIVE_SESSION_KEY};
    use readlog::libs::tracker::SessionManager;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    /// Temporary directory backing a file store.
    struct StoreTestContext {
        temp_dir: TempDir,
    }

    impl TestContext for StoreTestContext {
        fn setup() -> Self {
            StoreTestContext {
                temp_dir: tempfile::tempdir().unwrap(),
            }
        }
    }

    impl StoreTestContext {
        fn file_store(&self) -> FileStore {
            FileStore::at(self.temp_dir.path())
        }
    }

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 20, 0, 0).unwrap()
    }

    fn paused_session() -> ActiveSession {
        let mut session = ActiveSession::new(BookId::new("dune"), "Dune", t0());
        session.pause(t0() + Duration::seconds(90));
        session
    }

    #[test]
    fn test_encoded_shape_uses_stored_field_names() {
        let bytes = encode(&paused_session()).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(value["bookID"], "dune");
        assert_eq!(value["bookTitle"], "Dune");
        assert_eq!(value["accumulatedSeconds"], 90);
        assert_eq!(value["isPaused"], true);
        assert!(value.get("startedAt").is_some());
        assert!(value.get("lastResumedAt").is_some());
        assert!(value.get("pausedAt").is_some());
    }

    #[test]
    fn test_running_session_omits_paused_at() {
        let session = ActiveSession::new(BookId::new("dune"), "Dune", t0());
        let value: serde_json::Value = serde_json::from_slice(&encode(&session).unwrap()).unwrap();

        assert!(value.get("pausedAt").is_none());
        assert_eq!(value["isPaused"], false);
    }

    #[test]
    fn test_decode_restores_encoded_session() {
        let session = paused_session();
        assert_eq!(decode(&encode(&session).unwrap()).unwrap(), session);
    }

    #[test]
    fn test_legacy_record_runs_since_start() {
        let legacy = r#"{"bookID":"dune","bookTitle":"Dune","startedAt":"2025-03-01T20:00:00Z"}"#;
        let session = decode(legacy.as_bytes()).unwrap();

        assert_eq!(session.book_id, BookId::new("dune"));
        assert_eq!(session.started_at, t0());
        assert_eq!(session.last_resumed_at, t0());
        assert_eq!(session.accumulated_seconds, 0);
        assert!(!session.is_paused);
        assert_eq!(session.paused_at, None);
        assert_eq!(session.elapsed_seconds(t0() + Duration::minutes(3)), 180);
    }

    #[test]
    fn test_paused_record_without_pause_instant() {
        let record = r#"{"bookID":"dune","bookTitle":"Dune","startedAt":"2025-03-01T20:00:00Z",
            "lastResumedAt":"2025-03-01T20:10:00Z","accumulatedSeconds":120,"isPaused":true}"#;
        let session = decode(record.as_bytes()).unwrap();

        assert!(session.is_paused);
        assert_eq!(session.paused_at, Some(t0() + Duration::minutes(10)));
        assert_eq!(session.elapsed_seconds(t0() + Duration::hours(5)), 120);
    }

    #[test]
    fn test_negative_accumulated_seconds_is_clamped() {
        let record = r#"{"bookID":"dune","bookTitle":"Dune","startedAt":"2025-03-01T20:00:00Z","accumulatedSeconds":-40}"#;
        assert_eq!(decode(record.as_bytes()).unwrap().accumulated_seconds, 0);
    }

    #[test]
    fn test_missing_required_field_fails_decode() {
        let record = r#"{"bookTitle":"Dune","startedAt":"2025-03-01T20:00:00Z"}"#;
        assert!(decode(record.as_bytes()).is_err());
    }

    #[test]
    fn test_corrupt_entry_is_dropped() {
        let store = MemoryStore::new();
        store.set(ACTIVE_SESSION_KEY, b"\x00not json").unwrap();

        let manager = SessionManager::restore(SessionStore::new(store.clone()));

        assert!(manager.active().is_none());
        assert!(!store.contains(ACTIVE_SESSION_KEY));
    }

    #[test]
    fn test_load_without_entry_is_idle() {
        let store = SessionStore::new(MemoryStore::new());
        assert!(store.load().is_none());
    }

    #[test]
    fn test_failed_clear_is_swallowed() {
        let memory = MemoryStore::new();
        let store = SessionStore::new(memory.clone());
        store.save(&paused_session());
        memory.set_fail_writes(true);

        store.clear();

        assert!(memory.contains(ACTIVE_SESSION_KEY));
    }

    #[test_context(StoreTestContext)]
    #[test]
    fn test_file_store_round_trip(ctx: &mut StoreTestContext) {
        let store = ctx.file_store();

        assert_eq!(store.get("missing").unwrap(), None);
        store.set("answer", b"42").unwrap();
        assert_eq!(store.get("answer").unwrap(), Some(b"42".to_vec()));
        store.remove("answer").unwrap();
        assert_eq!(store.get("answer").unwrap(), None);
        store.remove("answer").unwrap();
    }

    #[test_context(StoreTestContext)]
    #[test]
    fn test_session_survives_process_restart(ctx: &mut StoreTestContext) {
        {
            let mut manager = SessionManager::restore(SessionStore::new(ctx.file_store()));
            manager.start(BookId::new("dune"), "Dune", t0()).unwrap();
        }

        let mut manager = SessionManager::restore(SessionStore::new(ctx.file_store()));
        assert_eq!(manager.active().unwrap().book_title, "Dune");
        assert_eq!(manager.elapsed_seconds(t0() + Duration::seconds(75)), 75);

        manager.stop(t0() + Duration::seconds(75), false, None).unwrap();
        let restarted = SessionManager::restore(SessionStore::new(ctx.file_store()));
        assert!(restarted.active().is_none());
    }
}
