use crate::constants::FALL_SPEED;
use crate::symbol::{Category, Symbol};

/// Identity carried by click events from the input layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    Hit,
    Miss,
}

/// Simulation state of one falling symbol. Its on-screen counterpart lives in the
/// render surface and is referenced by handle from the session.
#[derive(Clone, Debug, PartialEq)]
pub struct FallingItem {
    id: ItemId,
    symbol: Symbol,
    x: f64,
    y: f64,
    speed: f64,
    removed: bool,
    // Set after a wrong click; purely visual, the item keeps falling.
    flagged: bool,
}

impl FallingItem {
    pub fn new(id: ItemId, symbol: Symbol, x: f64) -> Self {
        Self {
            id,
            symbol,
            x,
            y: 0.0,
            speed: FALL_SPEED,
            removed: false,
            flagged: false,
        }
    }

    pub fn id(&self) -> ItemId {
        self.id
    }
    pub fn symbol(&self) -> Symbol {
        self.symbol
    }
    pub fn x(&self) -> f64 {
        self.x
    }
    pub fn y(&self) -> f64 {
        self.y
    }
    pub fn speed(&self) -> f64 {
        self.speed
    }
    pub fn is_removed(&self) -> bool {
        self.removed
    }
    pub fn is_flagged(&self) -> bool {
        self.flagged
    }

    /// Advances the item by `frames` ticks. Removed items never move again.
    pub fn update(&mut self, frames: u32) {
        if self.removed {
            return;
        }
        self.y += self.speed * f64::from(frames);
    }

    pub fn has_expired(&self, surface_height: f64) -> bool {
        self.y > surface_height
    }

    pub fn matches_category(&self, category: Category) -> bool {
        category.matches(self.symbol)
    }

    /// A hit removes the item; a miss only flags it, so it can be clicked again for nothing.
    pub fn on_clicked(&mut self, category: Category) -> ClickOutcome {
        if self.matches_category(category) {
            self.removed = true;
            ClickOutcome::Hit
        } else {
            self.flagged = true;
            ClickOutcome::Miss
        }
    }

    pub(crate) fn mark_removed(&mut self) {
        self.removed = true;
    }
}
