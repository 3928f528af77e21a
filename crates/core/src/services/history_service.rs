use chrono::NaiveDate;
use std::collections::HashMap;

use crate::errors::CoreError;
use crate::models::price::{price_on_or_before, PricePoint};
use crate::models::transaction::{Transaction, TxKind};
use crate::models::valuation::HistoryPoint;

/// Reconstructs the day-by-day historical portfolio value series.
///
/// Pure function over the transaction list and per-symbol historical
/// price series (sorted ascending, as providers return them). Walks one
/// calendar day at a time from the earliest transaction through `today`,
/// maintaining incremental holdings — O(days + transactions) rather than
/// O(days × transactions).
pub struct HistoryBuilder;

impl HistoryBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Build one `{date, total_value}` point per calendar day from the
    /// first transaction's date through `today`, inclusive.
    ///
    /// Price resolution per symbol per day, in fallback order:
    /// 1. the historical sample on that exact day;
    /// 2. the most recent sample on or before that day;
    /// 3. the price recorded on that symbol's most recent transaction on
    ///    or before that day;
    /// 4. zero — the asset contributes nothing that day.
    ///
    /// Only symbols with positive running holdings contribute. An empty
    /// transaction list yields an empty series ("nothing invested yet");
    /// a non-empty list with no price data for any traded symbol yields
    /// `CoreError::HistoryUnavailable` so callers can tell a failed
    /// provider apart from an empty portfolio.
    pub fn reconstruct(
        &self,
        transactions: &[Transaction],
        series: &HashMap<String, Vec<PricePoint>>,
        today: NaiveDate,
    ) -> Result<Vec<HistoryPoint>, CoreError> {
        if transactions.is_empty() {
            return Ok(Vec::new());
        }

        let traded: Vec<String> = {
            let mut symbols: Vec<String> =
                transactions.iter().map(|t| t.symbol.to_uppercase()).collect();
            symbols.sort();
            symbols.dedup();
            symbols
        };

        // Total provider failure is an explicit degraded state, never an
        // all-zero series.
        let any_price_data = traded
            .iter()
            .any(|sym| series.get(sym).is_some_and(|s| !s.is_empty()));
        if !any_price_data {
            return Err(CoreError::HistoryUnavailable);
        }

        let start = transactions
            .iter()
            .map(|t| t.date)
            .min()
            .unwrap_or(today);
        if today < start {
            return Ok(Vec::new());
        }

        // Index transactions by date for O(1) lookup per day, and by
        // symbol (date-sorted) for the transaction-price fallback.
        let mut by_date: HashMap<NaiveDate, Vec<&Transaction>> = HashMap::new();
        let mut prices_by_symbol: HashMap<String, Vec<(NaiveDate, f64)>> = HashMap::new();
        for tx in transactions {
            by_date.entry(tx.date).or_default().push(tx);
            prices_by_symbol
                .entry(tx.symbol.to_uppercase())
                .or_default()
                .push((tx.date, tx.price));
        }
        for tx_prices in prices_by_symbol.values_mut() {
            tx_prices.sort_by_key(|(date, _)| *date);
        }

        let mut points = Vec::new();
        let mut holdings: HashMap<String, f64> = HashMap::new();
        let mut day = start;

        while day <= today {
            if let Some(day_txs) = by_date.get(&day) {
                for tx in day_txs {
                    let net = holdings.entry(tx.symbol.to_uppercase()).or_insert(0.0);
                    match tx.kind {
                        TxKind::Buy => *net += tx.amount,
                        TxKind::Sell => *net -= tx.amount,
                    }
                }
            }

            let mut total_value = 0.0;
            for (symbol, qty) in &holdings {
                if *qty <= f64::EPSILON {
                    continue;
                }
                let price = resolve_price(symbol, day, series, &prices_by_symbol);
                total_value += qty * price;
            }

            points.push(HistoryPoint {
                date: day,
                total_value,
            });

            day = match day.succ_opt() {
                Some(next) => next,
                None => break,
            };
        }

        Ok(points)
    }
}

impl Default for HistoryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// The fallback chain for one symbol on one day. The nearest prior
/// historical sample always beats the transaction-price fallback, even
/// when the transaction is more recent than nothing at all.
fn resolve_price(
    symbol: &str,
    day: NaiveDate,
    series: &HashMap<String, Vec<PricePoint>>,
    tx_prices: &HashMap<String, Vec<(NaiveDate, f64)>>,
) -> f64 {
    if let Some(points) = series.get(symbol) {
        if let Some(price) = price_on_or_before(points, day) {
            return price;
        }
    }

    if let Some(prices) = tx_prices.get(symbol) {
        let idx = prices.partition_point(|(date, _)| *date <= day);
        if idx > 0 {
            return prices[idx - 1].1;
        }
    }

    0.0
}
