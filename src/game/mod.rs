//! Falling-symbol gameplay, independent of any browser API.
//!
//! The session is driven from outside: the host calls [`GameSession::tick`] whenever the
//! scheduled frame fires and forwards input through [`GameSession::dispatch`]. Drawing,
//! sound and frame scheduling go through the traits in [`surface`] and [`scheduler`], so
//! the whole loop runs headless in tests.

pub mod input;
pub mod item;
pub mod missed;
pub mod presenter;
pub mod scheduler;
pub mod session;
pub mod spawner;
pub mod surface;

pub use input::{InputEvent, key_binding};
pub use item::{ClickOutcome, FallingItem, ItemId};
pub use missed::MissedTracker;
pub use presenter::{Gauge, GaugeBar};
pub use scheduler::{Scheduler, TickHandle, TickSlot};
pub use session::{GameSession, Phase, Ports, SettingsAction};
pub use spawner::Spawner;
pub use surface::{RenderSurface, SoundPlayer, VisualHandle};
