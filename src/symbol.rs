//! Falling symbols and the category filter that decides which ones score.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::ALPHABET;
use crate::error::ConfigError;

/// Character class of a symbol.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SymbolClass {
    Letter,
    Digit,
    Punctuation,
}

/// One character drawn from [`ALPHABET`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(char);

impl Symbol {
    pub fn new(c: char) -> Self {
        Self(c)
    }

    pub fn as_char(self) -> char {
        self.0
    }

    pub fn class(self) -> SymbolClass {
        match self.0 {
            'A'..='Z' => SymbolClass::Letter,
            '0'..='9' => SymbolClass::Digit,
            _ => SymbolClass::Punctuation,
        }
    }

    /// The full spawn alphabet, in declaration order.
    pub fn alphabet() -> Vec<Symbol> {
        ALPHABET.chars().map(Symbol).collect()
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which symbol class counts toward the score and the missed panel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    Letters,
    Numbers,
}

impl Category {
    /// Punctuation never matches either category.
    pub fn matches(self, symbol: Symbol) -> bool {
        matches!(
            (self, symbol.class()),
            (Category::Letters, SymbolClass::Letter) | (Category::Numbers, SymbolClass::Digit)
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Letters => "letters",
            Category::Numbers => "numbers",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "letters" => Ok(Category::Letters),
            "numbers" => Ok(Category::Numbers),
            other => Err(ConfigError::UnknownCategory(other.to_string())),
        }
    }
}
