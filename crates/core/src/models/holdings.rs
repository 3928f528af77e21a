use std::collections::HashMap;

/// Per-asset net quantities plus cash-flow totals, as of a cutoff date.
///
/// Derived data — recomputed from the full transaction list on every
/// request, never persisted or cached across reloads.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HoldingsSnapshot {
    /// Net quantity per symbol. Every symbol that appears in any included
    /// transaction is present, including zero and negative nets (an
    /// oversold asset stays negative here; valuation clamps it to zero).
    pub positions: HashMap<String, f64>,

    /// Gross USD value of all included buys (`amount * price` summed)
    pub total_invested: f64,

    /// Gross USD value of all included sells
    pub total_sold: f64,
}

impl HoldingsSnapshot {
    /// Net quantity for a symbol, zero when the symbol never traded.
    #[must_use]
    pub fn net(&self, symbol: &str) -> f64 {
        self.positions
            .get(&symbol.to_uppercase())
            .copied()
            .unwrap_or(0.0)
    }

    /// Symbols with a strictly positive net quantity, sorted for
    /// deterministic iteration.
    #[must_use]
    pub fn held_symbols(&self) -> Vec<String> {
        let mut symbols: Vec<String> = self
            .positions
            .iter()
            .filter(|(_, qty)| **qty > f64::EPSILON)
            .map(|(sym, _)| sym.clone())
            .collect();
        symbols.sort();
        symbols
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
