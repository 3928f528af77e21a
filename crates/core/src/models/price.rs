use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single price data point (date → USD price).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub price: f64,
}

/// Look up the price for `date` in a series sorted ascending by date.
/// Exact match only. O(log n).
#[must_use]
pub fn price_on(series: &[PricePoint], date: NaiveDate) -> Option<f64> {
    series
        .binary_search_by_key(&date, |p| p.date)
        .ok()
        .map(|idx| series[idx].price)
}

/// The most recent price on or before `date` in a series sorted ascending
/// by date. Returns `None` when every sample is later than `date`.
#[must_use]
pub fn price_on_or_before(series: &[PricePoint], date: NaiveDate) -> Option<f64> {
    match series.binary_search_by_key(&date, |p| p.date) {
        Ok(idx) => Some(series[idx].price),
        Err(0) => None,
        Err(idx) => Some(series[idx - 1].price),
    }
}
