//! Output ports of the session: where things are drawn and heard.

use super::item::FallingItem;
use super::presenter::Gauge;
use crate::symbol::Symbol;

/// Surface-side handle to an item's visual.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VisualHandle(pub u32);

/// Everything the session needs from a display. Implementations log and swallow their own
/// failures: a missing sprite must never stop the loop.
pub trait RenderSurface {
    fn width(&self) -> f64;
    fn height(&self) -> f64;
    /// Wipes the frame and redraws the static backdrop.
    fn clear(&mut self);
    fn draw_gauge(&mut self, gauge: &Gauge);
    fn spawn_visual(&mut self, item: &FallingItem) -> VisualHandle;
    fn update_visual_position(&mut self, handle: VisualHandle, x: f64, y: f64);
    fn remove_visual(&mut self, handle: VisualHandle);
    fn flag_visual_as_wrong(&mut self, handle: VisualHandle);
    fn append_missed(&mut self, symbol: Symbol);
    fn clear_missed(&mut self);
    fn play_win_animation(&mut self);
    fn remove_win_animation(&mut self);
}

/// Fire-and-forget hit sound.
pub trait SoundPlayer {
    fn play(&mut self);
}
