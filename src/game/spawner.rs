use rand::Rng;

use super::item::{FallingItem, ItemId};
use crate::constants::{ITEM_WIDTH, SPAWN_PROBABILITY};
use crate::symbol::Symbol;

/// Decides each tick whether a new symbol starts falling. Symbols are drawn from the whole
/// alphabet regardless of category, so decoys fall alongside targets.
pub struct Spawner<R: Rng> {
    rng: R,
    probability: f64,
    alphabet: Vec<Symbol>,
    next_id: u64,
}

impl<R: Rng> Spawner<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            probability: SPAWN_PROBABILITY,
            alphabet: Symbol::alphabet(),
            next_id: 0,
        }
    }

    pub fn with_probability(mut self, probability: f64) -> Self {
        self.probability = probability;
        self
    }

    /// Restricts the drawable symbols. An empty alphabet disables spawning.
    pub fn with_alphabet(mut self, symbols: impl IntoIterator<Item = char>) -> Self {
        self.set_alphabet(symbols);
        self
    }

    pub fn set_probability(&mut self, probability: f64) {
        self.probability = probability;
    }

    pub fn set_alphabet(&mut self, symbols: impl IntoIterator<Item = char>) {
        self.alphabet = symbols.into_iter().map(Symbol::new).collect();
    }

    pub fn maybe_spawn(&mut self, canvas_width: f64) -> Option<FallingItem> {
        if self.alphabet.is_empty() || self.rng.r#gen::<f64>() >= self.probability {
            return None;
        }
        let symbol = self.alphabet[self.rng.gen_range(0..self.alphabet.len())];
        // Narrow surfaces pin items to the left edge instead of going negative.
        let span = canvas_width - ITEM_WIDTH;
        let x = if span > 0.0 {
            self.rng.gen_range(0.0..span).floor()
        } else {
            0.0
        };
        let id = ItemId(self.next_id);
        self.next_id += 1;
        tracing::debug!(id = id.0, %symbol, x, "spawned item");
        Some(FallingItem::new(id, symbol, x))
    }
}
