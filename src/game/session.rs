//! The game state machine: owns score, active items and the pending tick, and drives the
//! render surface through one tick at a time.

use std::fmt;

use rand::Rng;

use super::input::InputEvent;
use super::item::{ClickOutcome, FallingItem, ItemId};
use super::missed::MissedTracker;
use super::presenter::Gauge;
use super::scheduler::{Scheduler, TickSlot};
use super::spawner::Spawner;
use super::surface::{RenderSurface, SoundPlayer, VisualHandle};
use crate::error::GameResult;
use crate::settings::{Settings, SettingsStore};
use crate::symbol::Category;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for assets and the start signal.
    Menu,
    Running,
    Paused,
    /// Settings panel open; the loop is halted.
    Settings,
    /// Goal reached; the celebration is showing until restart.
    Won,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// How the settings panel was closed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SettingsAction {
    Save(Settings),
    Cancel,
    /// Restore and persist the defaults.
    Reset,
}

/// Collaborators the session drives.
pub struct Ports {
    pub surface: Box<dyn RenderSurface>,
    pub scheduler: Box<dyn Scheduler>,
    pub sound: Box<dyn SoundPlayer>,
}

struct ActiveItem {
    item: FallingItem,
    visual: VisualHandle,
}

pub struct GameSession<R: Rng> {
    phase: Phase,
    score: u32,
    settings: Settings,
    store: SettingsStore,
    items: Vec<ActiveItem>,
    missed: MissedTracker,
    spawner: Spawner<R>,
    tick: TickSlot,
    surface: Box<dyn RenderSurface>,
    scheduler: Box<dyn Scheduler>,
    sound: Box<dyn SoundPlayer>,
}

impl<R: Rng> GameSession<R> {
    pub fn new(ports: Ports, store: SettingsStore, spawner: Spawner<R>) -> Self {
        let settings = store.load();
        tracing::info!(?settings, "session created");
        Self {
            phase: Phase::Menu,
            score: 0,
            settings,
            store,
            items: Vec::new(),
            missed: MissedTracker::new(),
            spawner,
            tick: TickSlot::default(),
            surface: ports.surface,
            scheduler: ports.scheduler,
            sound: ports.sound,
        }
    }

    // --- Accessors -----------------------------------------------------------

    pub fn phase(&self) -> Phase {
        self.phase
    }
    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }
    pub fn score(&self) -> u32 {
        self.score
    }
    pub fn settings(&self) -> &Settings {
        &self.settings
    }
    pub fn target_score(&self) -> u32 {
        self.settings.target_score
    }
    pub fn category(&self) -> Category {
        self.settings.category
    }
    pub fn missed(&self) -> &MissedTracker {
        &self.missed
    }
    /// Items still on screen. Hits leave the list on the next tick but are hidden here at once.
    pub fn active_items(&self) -> impl Iterator<Item = &FallingItem> {
        self.items.iter().map(|a| &a.item).filter(|i| !i.is_removed())
    }
    pub fn gauge(&self) -> Gauge {
        Gauge::new(self.score.into(), self.settings.target_score)
    }
    pub fn tick_pending(&self) -> bool {
        self.tick.is_armed()
    }
    pub fn settings_store(&self) -> &SettingsStore {
        &self.store
    }
    pub fn spawner_mut(&mut self) -> &mut Spawner<R> {
        &mut self.spawner
    }

    // --- Transitions ---------------------------------------------------------

    /// Leaves the menu. Only valid once, after the host has finished loading assets.
    pub fn start(&mut self) -> bool {
        if self.phase != Phase::Menu {
            return false;
        }
        self.set_phase(Phase::Running);
        self.render_hud();
        true
    }

    pub fn dispatch(&mut self, event: InputEvent) {
        match event {
            InputEvent::Click(id) => {
                self.handle_click(id);
            }
            InputEvent::Restart => self.restart(),
            InputEvent::TogglePause => {
                self.toggle_pause();
            }
        }
    }

    /// RUNNING <-> PAUSED. Any other phase ignores the signal.
    pub fn toggle_pause(&mut self) -> Phase {
        match self.phase {
            Phase::Running => self.set_phase(Phase::Paused),
            Phase::Paused => self.set_phase(Phase::Running),
            other => tracing::debug!(phase = %other, "pause toggle ignored"),
        }
        self.phase
    }

    /// Full reset into RUNNING from any phase; from the menu this is a plain start.
    pub fn restart(&mut self) {
        if self.phase == Phase::Menu {
            self.start();
            return;
        }
        tracing::info!(score = self.score, "restart");
        self.reset_game();
    }

    pub fn open_settings(&mut self) -> bool {
        match self.phase {
            Phase::Running | Phase::Paused => {
                self.set_phase(Phase::Settings);
                true
            }
            _ => false,
        }
    }

    /// Closes the panel back into RUNNING. Save and reset persist and restart the game;
    /// cancel resumes where the player left off. A failed save still applies the new
    /// settings in memory before the error is returned.
    pub fn close_settings(&mut self, action: SettingsAction) -> GameResult<()> {
        if self.phase != Phase::Settings {
            tracing::debug!(phase = %self.phase, "settings not open");
            return Ok(());
        }
        let requested = match action {
            SettingsAction::Cancel => {
                self.set_phase(Phase::Running);
                return Ok(());
            }
            SettingsAction::Save(settings) => settings,
            SettingsAction::Reset => Settings::default(),
        };
        let saved = self.store.save(&requested);
        self.settings = match &saved {
            Ok(written) => *written,
            Err(_) => requested.sanitized(),
        };
        self.reset_game();
        saved.map(|_| ())
    }

    // --- Loop ----------------------------------------------------------------

    /// One frame of the game. Consumes the pending tick handle and schedules the next one
    /// while still running.
    pub fn tick(&mut self) {
        if !self.tick.fire() {
            tracing::debug!("stale tick ignored");
            return;
        }
        if self.phase != Phase::Running {
            return;
        }

        if self.score >= self.settings.target_score {
            self.win();
            return;
        }

        let (width, height) = (self.surface.width(), self.surface.height());

        if let Some(item) = self.spawner.maybe_spawn(width) {
            let visual = self.surface.spawn_visual(&item);
            self.items.push(ActiveItem { item, visual });
        }

        for active in self.items.iter_mut().filter(|a| !a.item.is_removed()) {
            active.item.update(1);
            self.surface
                .update_visual_position(active.visual, active.item.x(), active.item.y());
        }

        let category = self.settings.category;
        for active in self.items.iter_mut() {
            if active.item.is_removed() || !active.item.has_expired(height) {
                continue;
            }
            active.item.mark_removed();
            self.surface.remove_visual(active.visual);
            if active.item.matches_category(category) {
                let symbol = active.item.symbol();
                if self.missed.record_missed(symbol) {
                    self.surface.append_missed(symbol);
                }
                tracing::debug!(%symbol, "target missed");
            }
        }

        self.items.retain(|a| !a.item.is_removed());
        self.render_hud();

        if self.phase == Phase::Running {
            self.tick.arm(self.scheduler.as_mut());
        }
    }

    /// Applies a click on a live item. Returns `None` when the click is ignored: the game
    /// is not running, the item is gone, or the goal is already reached and the win is
    /// waiting for the next tick.
    pub fn handle_click(&mut self, id: ItemId) -> Option<ClickOutcome> {
        if self.phase != Phase::Running || self.score >= self.settings.target_score {
            return None;
        }
        let category = self.settings.category;
        let active = self
            .items
            .iter_mut()
            .find(|a| a.item.id() == id && !a.item.is_removed())?;
        let outcome = active.item.on_clicked(category);
        match outcome {
            ClickOutcome::Hit => {
                self.score += 1;
                self.surface.remove_visual(active.visual);
                if self.settings.sound_enabled {
                    self.sound.play();
                }
                tracing::debug!(id = id.0, score = self.score, "hit");
            }
            ClickOutcome::Miss => {
                self.surface.flag_visual_as_wrong(active.visual);
                tracing::debug!(id = id.0, symbol = %active.item.symbol(), "wrong click");
            }
        }
        Some(outcome)
    }

    // --- Internals -----------------------------------------------------------

    /// Moves to `next`, keeping exactly one pending tick while RUNNING and none otherwise.
    fn set_phase(&mut self, next: Phase) {
        let prev = self.phase;
        if prev == next {
            return;
        }
        self.phase = next;
        if next == Phase::Running {
            self.tick.arm(self.scheduler.as_mut());
        } else if prev == Phase::Running {
            self.tick.disarm(self.scheduler.as_mut());
        }
        tracing::info!(from = %prev, to = %next, "phase change");
    }

    fn win(&mut self) {
        tracing::info!(score = self.score, target = self.settings.target_score, "goal reached");
        self.clear_items();
        self.set_phase(Phase::Won);
        self.surface.play_win_animation();
        self.render_hud();
    }

    fn reset_game(&mut self) {
        self.clear_items();
        self.missed.clear();
        self.surface.clear_missed();
        self.surface.remove_win_animation();
        self.score = 0;
        self.set_phase(Phase::Running);
        self.render_hud();
    }

    fn clear_items(&mut self) {
        for active in self.items.drain(..) {
            if !active.item.is_removed() {
                self.surface.remove_visual(active.visual);
            }
        }
    }

    fn render_hud(&mut self) {
        let gauge = self.gauge();
        self.surface.clear();
        self.surface.draw_gauge(&gauge);
    }
}
