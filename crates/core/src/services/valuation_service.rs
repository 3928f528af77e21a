use std::collections::HashMap;

use crate::models::transaction::Transaction;
use crate::models::valuation::{AllocationSlice, ValuationSnapshot};
use crate::services::holdings_service::HoldingsAggregator;

/// Computes the current mark-to-market snapshot: balance, invested
/// capital, profit, and the allocation breakdown.
///
/// Pure function over the transaction list and a map of current USD
/// prices — fetching those prices is the caller's job.
pub struct ValuationEngine {
    aggregator: HoldingsAggregator,
}

impl ValuationEngine {
    pub fn new() -> Self {
        Self {
            aggregator: HoldingsAggregator::new(),
        }
    }

    /// Produce the current snapshot valuation.
    ///
    /// - `total_invested` / `total_sold` come from the transaction-recorded
    ///   prices, not current ones.
    /// - Each symbol with net holdings > 0 is marked at its current price;
    ///   a missing price means the symbol contributes zero and is listed
    ///   in `missing_prices` — partial data beats total failure.
    /// - Net holdings <= 0 contribute zero to the balance (closed and
    ///   oversold positions are clamped, never marked negative).
    /// - `profit = (current_balance + total_sold) - total_invested`.
    ///
    /// The allocation list is the same per-asset marking, filtered to
    /// value > 0 and sorted descending by value.
    #[must_use]
    pub fn snapshot(
        &self,
        transactions: &[Transaction],
        current_prices: &HashMap<String, f64>,
    ) -> ValuationSnapshot {
        let holdings = self.aggregator.aggregate(transactions, None);

        let mut current_balance = 0.0;
        let mut allocation: Vec<AllocationSlice> = Vec::new();
        let mut missing_prices: Vec<String> = Vec::new();

        for symbol in holdings.held_symbols() {
            let qty = holdings.net(&symbol);
            match current_prices.get(&symbol) {
                Some(price) => {
                    let value = qty * price;
                    current_balance += value;
                    if value > 0.0 {
                        allocation.push(AllocationSlice { symbol, value });
                    }
                }
                None => missing_prices.push(symbol),
            }
        }

        allocation.sort_by(|a, b| {
            b.value
                .partial_cmp(&a.value)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let profit = (current_balance + holdings.total_sold) - holdings.total_invested;

        ValuationSnapshot {
            current_balance,
            total_invested: holdings.total_invested,
            total_sold: holdings.total_sold,
            profit,
            allocation,
            missing_prices,
        }
    }
}

impl Default for ValuationEngine {
    fn default() -> Self {
        Self::new()
    }
}
