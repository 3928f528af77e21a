use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One asset's share of the current portfolio value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationSlice {
    /// Asset ticker, uppercased
    pub symbol: String,

    /// Current USD value of the position (`net quantity * current price`)
    pub value: f64,
}

/// Mark-to-market snapshot of the whole portfolio.
///
/// Recomputed on every request; never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationSnapshot {
    /// What the held coins are worth right now, in USD
    pub current_balance: f64,

    /// Gross USD value of all buys
    pub total_invested: f64,

    /// Gross USD value of all sells
    pub total_sold: f64,

    /// `(current_balance + total_sold) - total_invested`, exactly
    pub profit: f64,

    /// Per-asset current values, filtered to value > 0, sorted descending
    pub allocation: Vec<AllocationSlice>,

    /// Held symbols whose current price could not be resolved; they
    /// contributed zero to `current_balance` rather than aborting the
    /// computation.
    pub missing_prices: Vec<String>,
}

/// One day of the reconstructed portfolio value series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryPoint {
    pub date: NaiveDate,

    /// Total USD value of everything held at end of this day
    pub total_value: f64,
}
