use crate::symbol::Symbol;

/// Distinct target symbols that reached the bottom unclicked, in first-miss order.
#[derive(Debug, Default, Clone)]
pub struct MissedTracker {
    symbols: Vec<Symbol>,
}

impl MissedTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` when the symbol was not already recorded.
    pub fn record_missed(&mut self, symbol: Symbol) -> bool {
        if self.symbols.contains(&symbol) {
            return false;
        }
        self.symbols.push(symbol);
        true
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn clear(&mut self) {
        self.symbols.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_first_miss_order_without_duplicates() {
        let mut missed = MissedTracker::new();
        assert!(missed.record_missed(Symbol::new('B')));
        assert!(missed.record_missed(Symbol::new('A')));
        assert!(!missed.record_missed(Symbol::new('B')));
        assert_eq!(missed.symbols(), &[Symbol::new('B'), Symbol::new('A')]);
        missed.clear();
        assert!(missed.symbols().is_empty());
    }
}
