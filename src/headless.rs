//! In-memory collaborators for running a session without a browser.
//!
//! Each type is a cheap handle over shared state, so a test can keep a clone for
//! inspection after boxing the original into [`Ports`](crate::game::Ports).

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;

use crate::game::{FallingItem, Gauge, ItemId, RenderSurface, Scheduler, SoundPlayer, TickHandle, VisualHandle};
use crate::symbol::Symbol;

#[derive(Clone, Debug, PartialEq)]
pub struct VisualRecord {
    pub item: ItemId,
    pub symbol: Symbol,
    pub x: f64,
    pub y: f64,
    pub wrong: bool,
}

#[derive(Debug, Default)]
pub struct SurfaceLog {
    pub visuals: BTreeMap<VisualHandle, VisualRecord>,
    pub missed: Vec<Symbol>,
    pub gauge: Option<Gauge>,
    pub clears: u32,
    pub win_animations_played: u32,
    pub win_animation_visible: bool,
}

#[derive(Clone)]
pub struct RecordingSurface {
    width: f64,
    height: f64,
    next_handle: Rc<Cell<u32>>,
    log: Rc<RefCell<SurfaceLog>>,
}

impl RecordingSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            next_handle: Rc::new(Cell::new(0)),
            log: Rc::default(),
        }
    }

    pub fn log(&self) -> std::cell::Ref<'_, SurfaceLog> {
        self.log.borrow()
    }

    /// Handle of the visual currently showing `item`, if any.
    pub fn visual_for(&self, item: ItemId) -> Option<VisualHandle> {
        self.log
            .borrow()
            .visuals
            .iter()
            .find(|(_, v)| v.item == item)
            .map(|(h, _)| *h)
    }
}

impl RenderSurface for RecordingSurface {
    fn width(&self) -> f64 {
        self.width
    }
    fn height(&self) -> f64 {
        self.height
    }
    fn clear(&mut self) {
        self.log.borrow_mut().clears += 1;
    }
    fn draw_gauge(&mut self, gauge: &Gauge) {
        self.log.borrow_mut().gauge = Some(gauge.clone());
    }
    fn spawn_visual(&mut self, item: &FallingItem) -> VisualHandle {
        let handle = VisualHandle(self.next_handle.get());
        self.next_handle.set(handle.0 + 1);
        self.log.borrow_mut().visuals.insert(
            handle,
            VisualRecord {
                item: item.id(),
                symbol: item.symbol(),
                x: item.x(),
                y: item.y(),
                wrong: false,
            },
        );
        handle
    }
    fn update_visual_position(&mut self, handle: VisualHandle, x: f64, y: f64) {
        if let Some(v) = self.log.borrow_mut().visuals.get_mut(&handle) {
            v.x = x;
            v.y = y;
        }
    }
    fn remove_visual(&mut self, handle: VisualHandle) {
        self.log.borrow_mut().visuals.remove(&handle);
    }
    fn flag_visual_as_wrong(&mut self, handle: VisualHandle) {
        if let Some(v) = self.log.borrow_mut().visuals.get_mut(&handle) {
            v.wrong = true;
        }
    }
    fn append_missed(&mut self, symbol: Symbol) {
        self.log.borrow_mut().missed.push(symbol);
    }
    fn clear_missed(&mut self) {
        self.log.borrow_mut().missed.clear();
    }
    fn play_win_animation(&mut self) {
        let mut log = self.log.borrow_mut();
        log.win_animations_played += 1;
        log.win_animation_visible = true;
    }
    fn remove_win_animation(&mut self) {
        self.log.borrow_mut().win_animation_visible = false;
    }
}

#[derive(Debug, Default)]
struct ManualState {
    next: i64,
    pending: BTreeSet<TickHandle>,
    requested: u32,
    cancelled: u32,
}

/// Scheduler whose frames only fire when the test says so.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    state: Rc<RefCell<ManualState>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> usize {
        self.state.borrow().pending.len()
    }

    pub fn requested(&self) -> u32 {
        self.state.borrow().requested
    }

    pub fn cancelled(&self) -> u32 {
        self.state.borrow().cancelled
    }

    /// Pops the oldest pending frame. The caller then runs the session's tick.
    pub fn take_frame(&self) -> Option<TickHandle> {
        self.state.borrow_mut().pending.pop_first()
    }
}

impl Scheduler for ManualScheduler {
    fn request_tick(&mut self) -> TickHandle {
        let mut state = self.state.borrow_mut();
        state.next += 1;
        state.requested += 1;
        let handle = TickHandle(state.next);
        state.pending.insert(handle);
        handle
    }

    fn cancel_tick(&mut self, handle: TickHandle) {
        let mut state = self.state.borrow_mut();
        if state.pending.remove(&handle) {
            state.cancelled += 1;
        }
    }
}

/// Counts plays instead of making noise.
#[derive(Clone, Default)]
pub struct CountingSound {
    plays: Rc<Cell<u32>>,
}

impl CountingSound {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn plays(&self) -> u32 {
        self.plays.get()
    }
}

impl SoundPlayer for CountingSound {
    fn play(&mut self) {
        self.plays.set(self.plays.get() + 1);
    }
}
