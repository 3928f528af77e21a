use async_trait::async_trait;
use chrono::NaiveDate;

use crate::errors::CoreError;
use crate::models::price::PricePoint;

/// Trait abstraction for price data providers.
///
/// Each API (CoinGecko, CoinCap) implements this trait. If a provider goes
/// down or changes its API, only that one implementation is touched — the
/// rest of the codebase is untouched. All prices are USD.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait PriceProvider: Send + Sync {
    /// Human-readable name of this provider (for logs/errors).
    fn name(&self) -> &str;

    /// Current (latest) USD price of an asset.
    async fn current_price(&self, symbol: &str) -> Result<f64, CoreError>;

    /// Daily USD price series for an asset over a date range (inclusive).
    /// Returns points sorted ascending by date; days the provider has no
    /// sample for are simply absent.
    async fn historical_series(
        &self,
        symbol: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<PricePoint>, CoreError>;
}
