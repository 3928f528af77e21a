use chrono::NaiveDate;
use std::collections::HashMap;

use crate::models::holdings::HoldingsSnapshot;
use crate::models::transaction::{Transaction, TxKind};

/// Folds transaction lists into net per-asset quantities and cash-flow
/// totals.
///
/// Pure business logic — no I/O, no hidden state. Input order does not
/// matter; the fold is commutative.
pub struct HoldingsAggregator;

impl HoldingsAggregator {
    pub fn new() -> Self {
        Self
    }

    /// Aggregate transactions into a holdings snapshot.
    ///
    /// With a cutoff, only transactions with `date <= cutoff` are
    /// included; without one, everything counts ("as of now"). Buys add
    /// to the net quantity and to `total_invested`; sells subtract from
    /// the net and add to `total_sold`.
    ///
    /// Every symbol appearing in an included transaction is present in
    /// the result, even when its net is zero or negative. Over-selling is
    /// not validated here — that is the insertion boundary's concern.
    #[must_use]
    pub fn aggregate(
        &self,
        transactions: &[Transaction],
        cutoff: Option<NaiveDate>,
    ) -> HoldingsSnapshot {
        let mut positions: HashMap<String, f64> = HashMap::new();
        let mut total_invested = 0.0;
        let mut total_sold = 0.0;

        for tx in transactions {
            if let Some(cutoff) = cutoff {
                if tx.date > cutoff {
                    continue;
                }
            }

            let net = positions.entry(tx.symbol.to_uppercase()).or_insert(0.0);
            match tx.kind {
                TxKind::Buy => {
                    *net += tx.amount;
                    total_invested += tx.value();
                }
                TxKind::Sell => {
                    *net -= tx.amount;
                    total_sold += tx.value();
                }
            }
        }

        HoldingsSnapshot {
            positions,
            total_invested,
            total_sold,
        }
    }
}

impl Default for HoldingsAggregator {
    fn default() -> Self {
        Self::new()
    }
}
