//! Letter Rain core crate.
//!
//! Symbols fall down the screen; the player clicks the ones in the active category
//! (letters or digits) before they reach the bottom. The gameplay loop in [`game`] is
//! browser-agnostic and runs headless in tests; [`web`] hosts it on a page through
//! `requestAnimationFrame`, DOM spans and `localStorage`.

use wasm_bindgen::prelude::*;

pub mod constants;
pub mod error;
pub mod game;
pub mod headless;
pub mod logging;
pub mod settings;
pub mod symbol;
pub mod web;

pub use error::{ConfigError, GameError, GameResult};
pub use settings::{Settings, SettingsStore};
pub use symbol::{Category, Symbol};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    if let Err(err) = logging::init() {
        web_sys::console::error_1(&JsValue::from_str(&err.to_string()));
    }
}
