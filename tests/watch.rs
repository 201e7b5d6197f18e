#[cfg(test)]
mod tests {
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use readlog::commands::watch::{run, WatchCommand};
    use readlog::db::db::Db;
    use readlog::db::readings::ReadingLog;
    use readlog::libs::lifecycle::{AutoStopSettings, LifecyclePhase};
    use readlog::libs::session::{BookId, SessionState};
    use readlog::libs::store::{MemoryStore, SessionStore};
    use readlog::libs::tracker::SessionManager;
    use std::io::Cursor;
    use test_context::{test_context, TestContext};

    struct WatchTestContext {
        manager: SessionManager,
        log: ReadingLog,
        settings: AutoStopSettings,
        t0: DateTime<Utc>,
    }

    impl TestContext for WatchTestContext {
        fn setup() -> Self {
            WatchTestContext {
                manager: SessionManager::restore(SessionStore::new(MemoryStore::new())),
                log: ReadingLog::with_db(Db::in_memory().unwrap()).unwrap(),
                settings: AutoStopSettings::default(),
                t0: Utc.with_ymd_and_hms(2025, 3, 1, 20, 0, 0).unwrap(),
            }
        }
    }

    impl WatchTestContext {
        /// Feeds `script` to the host; each command is stamped with the next offset in seconds.
        fn play(&mut self, script: &str, offsets: &[i64]) {
            let t0 = self.t0;
            let mut instants = offsets.iter().map(move |s| t0 + Duration::seconds(*s));
            let clock = move || instants.next().unwrap();
            run(&mut self.manager, &self.log, Cursor::new(script.to_string()), &self.settings, clock).unwrap();
        }
    }

    #[test]
    fn test_parse_session_commands() {
        assert_eq!(
            "start dune The Dune Saga".parse::<WatchCommand>(),
            Ok(WatchCommand::Start {
                book_id: BookId::new("dune"),
                title: "The Dune Saga".to_string(),
            })
        );
        assert_eq!("PAUSE".parse::<WatchCommand>(), Ok(WatchCommand::Pause));
        assert_eq!("resume".parse::<WatchCommand>(), Ok(WatchCommand::Resume));
        assert_eq!("stop".parse::<WatchCommand>(), Ok(WatchCommand::Stop));
        assert_eq!("confirm".parse::<WatchCommand>(), Ok(WatchCommand::Confirm));
        assert_eq!("discard".parse::<WatchCommand>(), Ok(WatchCommand::Discard));
        assert_eq!("status".parse::<WatchCommand>(), Ok(WatchCommand::Status));
        assert_eq!("exit".parse::<WatchCommand>(), Ok(WatchCommand::Quit));
    }

    #[test]
    fn test_parse_lifecycle_phases() {
        assert_eq!(
            "background".parse::<WatchCommand>(),
            Ok(WatchCommand::Phase(LifecyclePhase::Background))
        );
        assert_eq!("active".parse::<WatchCommand>(), Ok(WatchCommand::Phase(LifecyclePhase::Active)));
    }

    #[test]
    fn test_parse_rejects_incomplete_or_unknown() {
        assert_eq!("start dune".parse::<WatchCommand>(), Err("start dune".to_string()));
        assert_eq!("start".parse::<WatchCommand>(), Err("start".to_string()));
        assert_eq!("rewind".parse::<WatchCommand>(), Err("rewind".to_string()));
    }

    #[test_context(WatchTestContext)]
    #[test]
    fn test_session_confirmed_into_log(ctx: &mut WatchTestContext) {
        ctx.play("start dune Dune\npause\nresume\nstop\nconfirm\n", &[0, 600, 900, 1500, 1510]);

        assert!(ctx.manager.state(ctx.t0).is_idle());
        let records = ctx.log.fetch_by_book(&BookId::new("dune")).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].duration_seconds, 1200);
    }

    #[test_context(WatchTestContext)]
    #[test]
    fn test_background_past_threshold_leaves_pending(ctx: &mut WatchTestContext) {
        ctx.play("start dune Dune\nbackground\nactive\n", &[0, 5, 5 + 50 * 60]);

        let pending = ctx.manager.pending().unwrap();
        assert!(pending.was_auto_stopped);
        assert_eq!(pending.duration_seconds, 5 + 45 * 60);
        assert!(ctx.log.fetch_recent(10).unwrap().is_empty());
    }

    #[test_context(WatchTestContext)]
    #[test]
    fn test_pending_blocks_next_start_until_discarded(ctx: &mut WatchTestContext) {
        ctx.play("start dune Dune\nstop\nstart emma Emma\n", &[0, 60, 70]);
        assert!(matches!(ctx.manager.state(ctx.t0), SessionState::PendingResolution(_)));

        ctx.play("discard\nstart emma Emma\n", &[80, 90]);
        assert_eq!(ctx.manager.active().unwrap().book_title, "Emma");
        assert!(ctx.log.fetch_recent(10).unwrap().is_empty());
    }

    #[test_context(WatchTestContext)]
    #[test]
    fn test_unknown_lines_are_skipped_and_quit_stops(ctx: &mut WatchTestContext) {
        ctx.play("\nnonsense\nstart dune Dune\nquit\nstop\n", &[0]);

        assert!(ctx.manager.is_running());
    }
}
