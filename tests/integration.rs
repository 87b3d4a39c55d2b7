// Headless integration tests for the game session.
// These drive the full tick loop through the in-memory collaborators, no browser needed.

use letter_rain::game::{ClickOutcome, GameSession, InputEvent, ItemId, Phase, Ports, SettingsAction, Spawner};
use letter_rain::headless::{CountingSound, ManualScheduler, RecordingSurface};
use letter_rain::{Category, Settings, SettingsStore, Symbol};
use rand::SeedableRng;
use rand::rngs::StdRng;

struct Harness {
    session: GameSession<StdRng>,
    surface: RecordingSurface,
    scheduler: ManualScheduler,
    sound: CountingSound,
}

impl Harness {
    fn new(settings: Settings, height: f64) -> Self {
        let surface = RecordingSurface::new(800.0, height);
        let scheduler = ManualScheduler::new();
        let sound = CountingSound::new();
        let mut store = SettingsStore::in_memory();
        store.save(&settings).unwrap();
        let spawner = Spawner::new(StdRng::seed_from_u64(42)).with_probability(0.0);
        let session = GameSession::new(
            Ports {
                surface: Box::new(surface.clone()),
                scheduler: Box::new(scheduler.clone()),
                sound: Box::new(sound.clone()),
            },
            store,
            spawner,
        );
        Self {
            session,
            surface,
            scheduler,
            sound,
        }
    }

    fn letters(target: u32) -> Self {
        Self::new(
            Settings {
                target_score: target,
                category: Category::Letters,
                sound_enabled: true,
            },
            600.0,
        )
    }

    fn started(mut self) -> Self {
        assert!(self.session.start());
        self
    }

    /// Fires the pending frame, as the browser would.
    fn frame(&mut self) {
        self.scheduler.take_frame().expect("a tick should be pending");
        self.session.tick();
    }

    /// Runs one frame that is guaranteed to spawn `c`, and returns the new item's id.
    fn spawn(&mut self, c: char) -> ItemId {
        let spawner = self.session.spawner_mut();
        spawner.set_probability(1.0);
        spawner.set_alphabet([c]);
        self.frame();
        self.session.spawner_mut().set_probability(0.0);
        self.session.active_items().last().expect("spawned").id()
    }

    fn item_y(&self, id: ItemId) -> Option<f64> {
        self.session.active_items().find(|i| i.id() == id).map(|i| i.y())
    }
}

#[test]
fn session_waits_in_menu_until_started() {
    let mut h = Harness::letters(10);
    assert_eq!(h.session.phase(), Phase::Menu);
    assert_eq!(h.scheduler.pending(), 0);
    h.session.tick();
    assert_eq!(h.session.active_items().count(), 0);

    assert!(h.session.start());
    assert_eq!(h.session.phase(), Phase::Running);
    assert_eq!(h.scheduler.pending(), 1);
    assert!(!h.session.start());
    assert_eq!(h.scheduler.pending(), 1);
}

#[test]
fn three_hits_win_on_the_following_tick() {
    let mut h = Harness::letters(3).started();
    let ids = [h.spawn('A'), h.spawn('B'), h.spawn('C')];

    for (n, id) in ids.into_iter().enumerate() {
        assert_eq!(h.session.handle_click(id), Some(ClickOutcome::Hit));
        assert_eq!(h.session.score(), n as u32 + 1);
    }
    assert_eq!(h.sound.plays(), 3);
    assert_eq!(h.session.phase(), Phase::Running);

    h.frame();
    assert_eq!(h.session.phase(), Phase::Won);
    assert_eq!(h.session.active_items().count(), 0);
    assert!(h.surface.log().visuals.is_empty());
    assert_eq!(h.surface.log().win_animations_played, 1);
    assert_eq!(h.scheduler.pending(), 0);
    assert!(!h.session.tick_pending());
    assert_eq!(h.surface.log().gauge.as_ref().unwrap().ratio, 1.0);

    // A late callback must not celebrate again.
    h.session.tick();
    assert_eq!(h.surface.log().win_animations_played, 1);
}

#[test]
fn clicks_past_the_goal_are_ignored_until_the_win_tick() {
    let mut h = Harness::letters(1).started();
    let a = h.spawn('A');
    let b = h.spawn('B');
    assert_eq!(h.session.handle_click(a), Some(ClickOutcome::Hit));
    assert_eq!(h.session.handle_click(b), None);
    assert_eq!(h.session.score(), 1);
}

#[test]
fn removed_item_cannot_score_twice() {
    let mut h = Harness::letters(5).started();
    let a = h.spawn('A');
    assert_eq!(h.session.handle_click(a), Some(ClickOutcome::Hit));
    assert_eq!(h.session.handle_click(a), None);
    h.frame();
    assert_eq!(h.session.handle_click(a), None);
    assert_eq!(h.session.score(), 1);
}

#[test]
fn expired_target_is_recorded_once_even_when_repeated() {
    let mut h = Harness::new(Settings::default(), 5.0).started();
    h.spawn('Q');
    h.spawn('Q');
    for _ in 0..10 {
        h.frame();
    }
    assert_eq!(h.session.active_items().count(), 0);
    assert_eq!(h.session.missed().symbols(), &[Symbol::new('Q')]);
    assert_eq!(h.surface.log().missed, vec![Symbol::new('Q')]);
    assert!(h.surface.log().visuals.is_empty());
}

#[test]
fn expired_decoys_are_not_missed() {
    let mut h = Harness::new(Settings::default(), 5.0).started();
    h.spawn('!');
    h.spawn('5');
    for _ in 0..10 {
        h.frame();
    }
    assert_eq!(h.session.active_items().count(), 0);
    assert!(h.session.missed().symbols().is_empty());
}

#[test]
fn punctuation_click_is_a_harmless_miss() {
    for category in [Category::Letters, Category::Numbers] {
        let mut h = Harness::new(
            Settings {
                category,
                ..Settings::default()
            },
            600.0,
        )
        .started();
        let star = h.spawn('*');
        assert_eq!(h.session.handle_click(star), Some(ClickOutcome::Miss));
        assert_eq!(h.session.handle_click(star), Some(ClickOutcome::Miss));
        assert_eq!(h.session.score(), 0);
        assert_eq!(h.sound.plays(), 0);

        let visual = h.surface.visual_for(star).expect("still on screen");
        assert!(h.surface.log().visuals[&visual].wrong);

        let before = h.item_y(star).unwrap();
        h.frame();
        assert_eq!(h.item_y(star), Some(before + 1.0));
    }
}

#[test]
fn numbers_category_scores_digits_only() {
    let mut h = Harness::new(
        Settings {
            category: Category::Numbers,
            ..Settings::default()
        },
        600.0,
    )
    .started();
    let seven = h.spawn('7');
    let a = h.spawn('A');
    assert_eq!(h.session.handle_click(a), Some(ClickOutcome::Miss));
    assert_eq!(h.session.handle_click(seven), Some(ClickOutcome::Hit));
    assert_eq!(h.session.score(), 1);
}

#[test]
fn click_before_expiry_wins_over_expiry() {
    let mut h = Harness::new(Settings::default(), 5.0).started();
    let a = h.spawn('A');
    while h.item_y(a).unwrap() < 5.0 {
        h.frame();
    }
    assert_eq!(h.session.handle_click(a), Some(ClickOutcome::Hit));
    h.frame();
    assert_eq!(h.session.score(), 1);
    assert!(h.session.missed().symbols().is_empty());
}

#[test]
fn items_fall_one_unit_per_tick() {
    let mut h = Harness::letters(10).started();
    let a = h.spawn('A');
    assert_eq!(h.item_y(a), Some(1.0));
    for _ in 0..9 {
        h.frame();
    }
    assert_eq!(h.item_y(a), Some(10.0));
    let visual = h.surface.visual_for(a).unwrap();
    assert_eq!(h.surface.log().visuals[&visual].y, 10.0);
}

#[test]
fn pause_toggles_alternate_and_never_stack_ticks() {
    let mut h = Harness::letters(10).started();
    for i in 0..10 {
        let phase = h.session.toggle_pause();
        let expected = if i % 2 == 0 { Phase::Paused } else { Phase::Running };
        assert_eq!(phase, expected);
        assert!(h.scheduler.pending() <= 1);
        assert_eq!(h.scheduler.pending(), usize::from(phase == Phase::Running));
    }
    assert_eq!(h.scheduler.cancelled(), 5);
}

#[test]
fn paused_session_ignores_clicks_and_stale_ticks() {
    let mut h = Harness::letters(10).started();
    let a = h.spawn('A');
    h.session.dispatch(InputEvent::TogglePause);
    assert_eq!(h.session.phase(), Phase::Paused);
    assert_eq!(h.session.handle_click(a), None);

    let y = h.item_y(a);
    h.session.tick();
    assert_eq!(h.item_y(a), y);

    h.session.dispatch(InputEvent::TogglePause);
    h.frame();
    assert_eq!(h.item_y(a), y.map(|y| y + 1.0));
}

#[test]
fn pause_is_ignored_after_winning() {
    let mut h = Harness::letters(1).started();
    let a = h.spawn('A');
    h.session.handle_click(a);
    h.frame();
    assert_eq!(h.session.toggle_pause(), Phase::Won);
    assert_eq!(h.scheduler.pending(), 0);
}

#[test]
fn restart_after_win_resets_everything() {
    let mut h = Harness::new(
        Settings {
            target_score: 1,
            ..Settings::default()
        },
        5.0,
    )
    .started();
    h.spawn('Z');
    for _ in 0..6 {
        h.frame();
    }
    assert_eq!(h.session.missed().symbols().len(), 1);
    let a = h.spawn('A');
    h.session.handle_click(a);
    h.frame();
    assert_eq!(h.session.phase(), Phase::Won);

    h.session.dispatch(InputEvent::Restart);
    assert_eq!(h.session.phase(), Phase::Running);
    assert_eq!(h.session.score(), 0);
    assert_eq!(h.session.active_items().count(), 0);
    assert!(h.session.missed().symbols().is_empty());
    assert!(h.surface.log().missed.is_empty());
    assert!(!h.surface.log().win_animation_visible);
    assert_eq!(h.scheduler.pending(), 1);
    assert_eq!(h.surface.log().gauge.as_ref().unwrap().label, "0/1");
}

#[test]
fn restart_while_running_keeps_a_single_pending_tick() {
    let mut h = Harness::letters(10).started();
    h.spawn('A');
    h.spawn('B');
    h.session.restart();
    h.session.restart();
    assert_eq!(h.scheduler.pending(), 1);
    assert_eq!(h.session.active_items().count(), 0);
    assert!(h.surface.log().visuals.is_empty());
}

#[test]
fn restart_from_paused_resumes_running() {
    let mut h = Harness::letters(10).started();
    h.session.toggle_pause();
    h.session.restart();
    assert!(h.session.is_running());
    assert_eq!(h.scheduler.pending(), 1);
}

#[test]
fn restart_from_menu_starts_the_game() {
    let mut h = Harness::letters(10);
    h.session.dispatch(InputEvent::Restart);
    assert_eq!(h.session.phase(), Phase::Running);
    assert_eq!(h.scheduler.pending(), 1);
}

#[test]
fn cancelled_settings_resume_without_reset() {
    let mut h = Harness::letters(10).started();
    let a = h.spawn('A');
    h.spawn('B');
    h.session.handle_click(a);

    assert!(h.session.open_settings());
    assert_eq!(h.session.phase(), Phase::Settings);
    assert_eq!(h.scheduler.pending(), 0);
    h.session.handle_click(ItemId(1));
    assert_eq!(h.session.score(), 1);

    h.session.close_settings(SettingsAction::Cancel).unwrap();
    assert_eq!(h.session.phase(), Phase::Running);
    assert_eq!(h.scheduler.pending(), 1);
    assert_eq!(h.session.score(), 1);
    assert_eq!(h.session.active_items().count(), 1);
}

#[test]
fn saving_settings_clamps_persists_and_resets() {
    let mut h = Harness::letters(10).started();
    let a = h.spawn('A');
    h.session.handle_click(a);
    h.spawn('B');

    assert!(h.session.open_settings());
    h.session
        .close_settings(SettingsAction::Save(Settings {
            target_score: 0,
            category: Category::Numbers,
            sound_enabled: false,
        }))
        .unwrap();

    assert_eq!(h.session.phase(), Phase::Running);
    assert_eq!(h.session.score(), 0);
    assert_eq!(h.session.active_items().count(), 0);
    assert_eq!(h.session.target_score(), 1);
    assert_eq!(h.session.category(), Category::Numbers);
    let stored = h.session.settings_store().load();
    assert_eq!(stored.target_score, 1);
    assert_eq!(stored.category, Category::Numbers);
    assert!(!stored.sound_enabled);
    assert_eq!(h.scheduler.pending(), 1);
}

#[test]
fn reset_settings_restores_defaults() {
    let mut h = Harness::new(
        Settings {
            target_score: 3,
            category: Category::Numbers,
            sound_enabled: false,
        },
        600.0,
    )
    .started();
    h.session.toggle_pause();
    assert!(h.session.open_settings());
    h.session.close_settings(SettingsAction::Reset).unwrap();
    assert_eq!(*h.session.settings(), Settings::default());
    assert_eq!(h.session.settings_store().load(), Settings::default());
    assert!(h.session.is_running());
}

#[test]
fn settings_cannot_open_outside_play() {
    let mut h = Harness::letters(1);
    assert!(!h.session.open_settings());
    h.session.start();
    let a = h.spawn('A');
    h.session.handle_click(a);
    h.frame();
    assert_eq!(h.session.phase(), Phase::Won);
    assert!(!h.session.open_settings());
    h.session.close_settings(SettingsAction::Cancel).unwrap();
    assert_eq!(h.session.phase(), Phase::Won);
}

#[test]
fn muted_session_plays_no_sound() {
    let mut h = Harness::new(
        Settings {
            sound_enabled: false,
            ..Settings::default()
        },
        600.0,
    )
    .started();
    let a = h.spawn('A');
    assert_eq!(h.session.handle_click(a), Some(ClickOutcome::Hit));
    assert_eq!(h.sound.plays(), 0);
}

#[test]
fn long_random_play_keeps_score_bounded_and_monotonic() {
    let mut h = Harness::new(
        Settings {
            target_score: 8,
            ..Settings::default()
        },
        120.0,
    )
    .started();
    h.session.spawner_mut().set_probability(0.3);

    let mut last = 0;
    let mut won_at = None;
    for frame in 0..2_000 {
        if h.session.phase() == Phase::Won {
            won_at = Some(frame);
            break;
        }
        h.frame();
        let ids: Vec<ItemId> = h.session.active_items().map(|i| i.id()).collect();
        for id in ids.into_iter().step_by(3) {
            h.session.handle_click(id);
            assert!(h.session.score() >= last);
            assert!(h.session.score() <= h.session.target_score());
            last = h.session.score();
        }
        assert!(h.scheduler.pending() <= 1);
    }
    assert!(won_at.is_some(), "goal of 8 should be reachable");
    assert_eq!(h.surface.log().win_animations_played, 1);
}
