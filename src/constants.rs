//! Gameplay tuning and asset constants.

/// Chance per tick that a new item starts falling.
pub const SPAWN_PROBABILITY: f64 = 0.02;

/// Vertical distance an item falls per tick, in pixels.
pub const FALL_SPEED: f64 = 1.0;

/// Horizontal footprint reserved for one falling item, in pixels.
pub const ITEM_WIDTH: f64 = 60.0;

/// Every symbol the spawner may drop: targets for both categories plus decoys.
pub const ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789!@#$%^&*";

// --- Gauge geometry ----------------------------------------------------------

/// Bar width as a fraction of the surface width.
pub const GAUGE_WIDTH_FRACTION: f64 = 0.04;
/// Distance of the bar's left edge from the right border of the surface.
pub const GAUGE_RIGHT_OFFSET: f64 = 40.0;
/// Track height as a fraction of the surface height.
pub const GAUGE_HEIGHT_FRACTION: f64 = 1.0;

// --- Settings ----------------------------------------------------------------

pub const DEFAULT_TARGET_SCORE: u32 = 10;
pub const MIN_TARGET_SCORE: u32 = 1;

pub const KEY_TARGET_SCORE: &str = "targetScore";
pub const KEY_CATEGORY: &str = "category";
pub const KEY_SOUND_ENABLED: &str = "soundEnabled";

// --- Assets ------------------------------------------------------------------

pub const BACKGROUND_IMAGE: &str = "images/fond_ciel.png";
pub const MOON_IMAGE: &str = "images/lune.png";
pub const SMILEY_IMAGE: &str = "images/smiley.gif";
pub const HIT_SOUND: &str = "sounds/rire.mp3";
pub const WIN_ANIMATION_SRC: &str =
    "https://lottie.host/6c6200c9-d6e8-4817-8196-6ca8af222bfc/Js8Vok8v6f.json";

/// Size of the moon drawn in the top-left corner.
pub const MOON_SIZE: f64 = 200.0;
