//! Error types for the game.
//!
//! The tick loop itself never fails, so the only surfaced errors come from settings input,
//! persistence and browser bootstrap.

use wasm_bindgen::JsValue;

/// Main error type for game operations.
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("DOM error: {0}")]
    Dom(String),

    #[error("Logging initialization failed: {0}")]
    LoggingInit(String),
}

/// Rejected settings values.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Target score must be at least 1, got {0}")]
    TargetScoreTooLow(i64),

    #[error("Target score is not a number: {0:?}")]
    InvalidTargetScore(String),

    #[error("Unknown category: {0:?}")]
    UnknownCategory(String),
}

impl GameError {
    /// Wraps a value thrown by a browser API.
    pub fn dom(value: JsValue) -> Self {
        GameError::Dom(describe_js(&value))
    }

    pub fn storage(value: JsValue) -> Self {
        GameError::Storage(describe_js(&value))
    }
}

impl From<GameError> for JsValue {
    fn from(err: GameError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

pub(crate) fn describe_js(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

/// Result type for game operations.
pub type GameResult<T> = Result<T, GameError>;
