#[cfg(test)]
mod tests {
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use readlog::libs::lifecycle::{AutoStopController, AutoStopDecision, AutoStopSettings, LifecyclePhase};
    use readlog::libs::session::BookId;
    use readlog::libs::store::{MemoryStore, SessionStore};
    use readlog::libs::tracker::SessionManager;
    use test_context::{test_context, TestContext};

    struct AutoStopTestContext {
        manager: SessionManager,
        settings: AutoStopSettings,
        t0: DateTime<Utc>,
    }

    impl TestContext for AutoStopTestContext {
        fn setup() -> Self {
            let t0 = Utc.with_ymd_and_hms(2025, 3, 1, 20, 0, 0).unwrap();
            let mut manager = SessionManager::restore(SessionStore::new(MemoryStore::new()));
            manager.start(BookId::new("dune"), "Dune", t0).unwrap();
            AutoStopTestContext {
                manager,
                settings: AutoStopSettings { enabled: true, minutes: 45 },
                t0,
            }
        }
    }

    impl AutoStopTestContext {
        fn at(&self, seconds: i64) -> DateTime<Utc> {
            self.t0 + Duration::seconds(seconds)
        }

        fn phase(&mut self, phase: LifecyclePhase, seconds: i64) -> Option<readlog::libs::session::PendingCompletion> {
            let now = self.at(seconds);
            let settings = self.settings;
            self.manager.handle_lifecycle_phase(phase, now, &settings)
        }
    }

    #[test_context(AutoStopTestContext)]
    #[test]
    fn test_auto_stop_caps_the_gap(ctx: &mut AutoStopTestContext) {
        assert!(ctx.phase(LifecyclePhase::Background, 5).is_none());
        let pending = ctx.phase(LifecyclePhase::Active, 5 + 50 * 60).unwrap();

        assert_eq!(pending.duration_seconds, 5 + 45 * 60);
        assert_eq!(pending.ended_at, ctx.at(5 + 45 * 60));
        assert!(pending.was_auto_stopped);
        assert_eq!(pending.auto_stop_minutes, Some(45));
        assert!(ctx.manager.active().is_none());
        assert_eq!(ctx.manager.pending(), Some(&pending));
    }

    #[test_context(AutoStopTestContext)]
    #[test]
    fn test_long_absence_logs_only_threshold(ctx: &mut AutoStopTestContext) {
        ctx.phase(LifecyclePhase::Background, 600);
        let pending = ctx.phase(LifecyclePhase::Active, 600 + 6 * 3600).unwrap();

        assert_eq!(pending.duration_seconds, 600 + 45 * 60);
    }

    #[test_context(AutoStopTestContext)]
    #[test]
    fn test_exact_threshold_stops(ctx: &mut AutoStopTestContext) {
        ctx.phase(LifecyclePhase::Background, 5);
        let pending = ctx.phase(LifecyclePhase::Active, 5 + 45 * 60).unwrap();

        assert_eq!(pending.duration_seconds, 5 + 45 * 60);
    }

    #[test_context(AutoStopTestContext)]
    #[test]
    fn test_sub_threshold_background_is_reading_time(ctx: &mut AutoStopTestContext) {
        ctx.phase(LifecyclePhase::Background, 5);
        assert!(ctx.phase(LifecyclePhase::Active, 5 + 600).is_none());

        assert!(ctx.manager.is_running());
        assert_eq!(ctx.manager.elapsed_seconds(ctx.at(5 + 600)), 5 + 600);
        assert_eq!(ctx.manager.background_entered_at(), None);
    }

    #[test_context(AutoStopTestContext)]
    #[test]
    fn test_inactive_counts_as_background(ctx: &mut AutoStopTestContext) {
        ctx.phase(LifecyclePhase::Inactive, 5);
        let pending = ctx.phase(LifecyclePhase::Active, 5 + 50 * 60).unwrap();

        assert!(pending.was_auto_stopped);
    }

    #[test_context(AutoStopTestContext)]
    #[test]
    fn test_repeated_background_keeps_first_instant(ctx: &mut AutoStopTestContext) {
        ctx.phase(LifecyclePhase::Inactive, 5);
        ctx.phase(LifecyclePhase::Background, 60);
        ctx.phase(LifecyclePhase::Background, 120);
        assert_eq!(ctx.manager.background_entered_at(), Some(ctx.at(5)));

        let pending = ctx.phase(LifecyclePhase::Active, 5 + 45 * 60).unwrap();
        assert_eq!(pending.duration_seconds, 5 + 45 * 60);
    }

    #[test_context(AutoStopTestContext)]
    #[test]
    fn test_repeated_active_is_harmless(ctx: &mut AutoStopTestContext) {
        ctx.phase(LifecyclePhase::Background, 5);
        ctx.phase(LifecyclePhase::Active, 5 + 50 * 60).unwrap();

        assert!(ctx.phase(LifecyclePhase::Active, 5 + 51 * 60).is_none());
        assert!(ctx.manager.pending().is_some());
    }

    #[test_context(AutoStopTestContext)]
    #[test]
    fn test_paused_session_is_never_auto_stopped(ctx: &mut AutoStopTestContext) {
        let paused_at = ctx.at(30);
        ctx.manager.pause(paused_at);

        ctx.phase(LifecyclePhase::Background, 40);
        assert_eq!(ctx.manager.background_entered_at(), None);
        assert!(ctx.phase(LifecyclePhase::Active, 40 + 10 * 3600).is_none());

        assert!(ctx.manager.active().unwrap().is_paused);
        assert_eq!(ctx.manager.elapsed_seconds(ctx.at(40 + 10 * 3600)), 30);
    }

    #[test_context(AutoStopTestContext)]
    #[test]
    fn test_paused_while_backgrounded_suppresses_stop(ctx: &mut AutoStopTestContext) {
        ctx.phase(LifecyclePhase::Background, 5);
        let paused_at = ctx.at(10);
        ctx.manager.pause(paused_at);

        assert!(ctx.phase(LifecyclePhase::Active, 5 + 50 * 60).is_none());
        assert!(ctx.manager.active().is_some());
        assert_eq!(ctx.manager.background_entered_at(), None);
    }

    #[test_context(AutoStopTestContext)]
    #[test]
    fn test_pause_and_resume_while_backgrounded_keeps_reading(ctx: &mut AutoStopTestContext) {
        ctx.phase(LifecyclePhase::Background, 5);
        let paused_at = ctx.at(10);
        ctx.manager.pause(paused_at);
        assert_eq!(ctx.manager.background_entered_at(), None);
        let resumed_at = ctx.at(60 * 60);
        ctx.manager.resume(resumed_at);

        assert!(ctx.phase(LifecyclePhase::Active, 61 * 60).is_none());
        assert!(ctx.manager.is_running());
        assert_eq!(ctx.manager.elapsed_seconds(ctx.at(61 * 60)), 10 + 60);
    }

    #[test_context(AutoStopTestContext)]
    #[test]
    fn test_huge_threshold_is_never_reached(ctx: &mut AutoStopTestContext) {
        ctx.settings = AutoStopSettings {
            enabled: true,
            minutes: i64::MAX / 2,
        };
        ctx.phase(LifecyclePhase::Background, 5);

        assert!(ctx.phase(LifecyclePhase::Active, 5 + 30 * 24 * 3600).is_none());
        assert!(ctx.manager.is_running());
        assert_eq!(ctx.manager.background_entered_at(), None);
    }

    #[test_context(AutoStopTestContext)]
    #[test]
    fn test_threshold_past_representable_time_is_never_reached(ctx: &mut AutoStopTestContext) {
        ctx.settings = AutoStopSettings {
            enabled: true,
            minutes: 1_000_000_000_000,
        };
        ctx.phase(LifecyclePhase::Background, 5);

        assert!(ctx.phase(LifecyclePhase::Active, 5 + 3600).is_none());
        assert!(ctx.manager.is_running());
    }

    #[test_context(AutoStopTestContext)]
    #[test]
    fn test_disabled_auto_stop_counts_whole_absence(ctx: &mut AutoStopTestContext) {
        ctx.settings = AutoStopSettings { enabled: false, minutes: 45 };
        ctx.phase(LifecyclePhase::Background, 5);

        assert!(ctx.phase(LifecyclePhase::Active, 5 + 3 * 3600).is_none());
        assert_eq!(ctx.manager.elapsed_seconds(ctx.at(5 + 3 * 3600)), 5 + 3 * 3600);
        assert_eq!(ctx.manager.background_entered_at(), None);
    }

    #[test_context(AutoStopTestContext)]
    #[test]
    fn test_non_positive_threshold_disables(ctx: &mut AutoStopTestContext) {
        ctx.settings = AutoStopSettings { enabled: true, minutes: 0 };
        ctx.phase(LifecyclePhase::Background, 5);

        assert!(ctx.phase(LifecyclePhase::Active, 5 + 3 * 3600).is_none());
        assert!(ctx.manager.is_running());
    }

    #[test_context(AutoStopTestContext)]
    #[test]
    fn test_active_without_background_does_nothing(ctx: &mut AutoStopTestContext) {
        assert!(ctx.phase(LifecyclePhase::Active, 10 * 3600).is_none());
        assert!(ctx.manager.is_running());
    }

    #[test_context(AutoStopTestContext)]
    #[test]
    fn test_manual_stop_clears_background_marker(ctx: &mut AutoStopTestContext) {
        ctx.phase(LifecyclePhase::Background, 5);
        let stop_at = ctx.at(10);
        ctx.manager.stop(stop_at, false, None).unwrap();
        ctx.manager.discard();
        let restart_at = ctx.at(20);
        ctx.manager.start(BookId::new("emma"), "Emma", restart_at).unwrap();

        assert!(ctx.phase(LifecyclePhase::Active, 5 + 50 * 60).is_none());
        assert!(ctx.manager.is_running());
    }

    #[test]
    fn test_controller_ignores_idle() {
        let mut controller = AutoStopController::new();
        let now = Utc.with_ymd_and_hms(2025, 3, 1, 20, 0, 0).unwrap();
        let settings = AutoStopSettings::default();

        assert_eq!(controller.on_phase(LifecyclePhase::Background, false, now, &settings), AutoStopDecision::Continue);
        assert_eq!(controller.background_entered_at(), None);
    }

    #[test]
    fn test_default_settings() {
        let settings = AutoStopSettings::default();
        assert!(settings.enabled);
        assert_eq!(settings.minutes, 45);
        assert_eq!(settings.threshold_minutes(), Some(45));
    }

    #[test]
    fn test_parse_lifecycle_phase() {
        assert_eq!("active".parse::<LifecyclePhase>(), Ok(LifecyclePhase::Active));
        assert_eq!(" Background ".parse::<LifecyclePhase>(), Ok(LifecyclePhase::Background));
        assert_eq!("INACTIVE".parse::<LifecyclePhase>(), Ok(LifecyclePhase::Inactive));
        assert!("suspended".parse::<LifecyclePhase>().is_err());
    }
}
