use chrono::NaiveDate;
use log::warn;
use std::collections::HashMap;
use std::time::Duration;

use crate::errors::CoreError;
use crate::models::price::PricePoint;
use crate::providers::registry::ProviderRegistry;

/// Default pause between consecutive provider requests. The free price
/// APIs rate-limit bursts hard; pacing a batch of symbols sequentially is
/// what keeps multi-asset portfolios loadable at all.
const DEFAULT_PACING: Duration = Duration::from_millis(1500);

/// Fetches USD prices from the registered providers with fallback.
///
/// Providers are tried in registry order; the first one that returns a
/// usable price wins. Batch operations tolerate individual symbols
/// failing — a missing symbol is skipped (and logged), never fatal, so
/// one rate-limited coin cannot blank the whole dashboard.
pub struct PriceService {
    registry: ProviderRegistry,
    pacing: Duration,
}

impl PriceService {
    pub fn new(registry: ProviderRegistry) -> Self {
        Self {
            registry,
            pacing: DEFAULT_PACING,
        }
    }

    /// Override the inter-request pause (zero disables pacing, e.g. for
    /// tests or self-hosted providers without rate limits).
    pub fn with_pacing(registry: ProviderRegistry, pacing: Duration) -> Self {
        Self { registry, pacing }
    }

    /// Names of the configured providers, in fallback order.
    #[must_use]
    pub fn provider_names(&self) -> Vec<String> {
        self.registry.provider_names()
    }

    /// Current USD price of one asset, trying each provider in turn.
    pub async fn current_price(&self, symbol: &str) -> Result<f64, CoreError> {
        if self.registry.is_empty() {
            return Err(CoreError::NoProvider);
        }

        let mut last_error = None;
        for provider in self.registry.providers() {
            match provider.current_price(symbol).await {
                Ok(price) => {
                    if !price.is_finite() || price < 0.0 {
                        last_error = Some(CoreError::Api {
                            provider: provider.name().to_string(),
                            message: format!(
                                "Invalid price returned for {symbol}: {price} (must be finite and non-negative)"
                            ),
                        });
                        continue;
                    }
                    return Ok(price);
                }
                Err(e) => {
                    warn!(
                        "{} failed for current {symbol}: {e}; trying next provider",
                        provider.name()
                    );
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or(CoreError::NoProvider))
    }

    /// Historical daily USD series for one asset, trying each provider in
    /// turn.
    pub async fn historical_series(
        &self,
        symbol: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<PricePoint>, CoreError> {
        if self.registry.is_empty() {
            return Err(CoreError::NoProvider);
        }

        let mut last_error = None;
        for provider in self.registry.providers() {
            match provider.historical_series(symbol, from, to).await {
                Ok(points) if !points.is_empty() => return Ok(points),
                Ok(_) => {
                    last_error = Some(CoreError::PriceNotAvailable {
                        symbol: symbol.to_string(),
                        date: from.to_string(),
                    });
                }
                Err(e) => {
                    warn!(
                        "{} failed for {symbol} history: {e}; trying next provider",
                        provider.name()
                    );
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or(CoreError::NoProvider))
    }

    /// Current USD prices for a batch of symbols.
    ///
    /// Sequential with pacing; symbols that fail on every provider are
    /// absent from the result rather than failing the batch.
    pub async fn current_prices(&self, symbols: &[String]) -> HashMap<String, f64> {
        let mut prices = HashMap::new();

        for (i, symbol) in symbols.iter().enumerate() {
            if i > 0 {
                self.pace().await;
            }
            match self.current_price(symbol).await {
                Ok(price) => {
                    prices.insert(symbol.to_uppercase(), price);
                }
                Err(e) => {
                    warn!("No current price for {symbol}: {e}; it will contribute zero");
                }
            }
        }

        prices
    }

    /// Historical daily USD series for a batch of symbols.
    ///
    /// Sequential with pacing; failed symbols are simply absent, and the
    /// caller decides whether losing all of them is fatal.
    pub async fn historical_series_batch(
        &self,
        symbols: &[String],
        from: NaiveDate,
        to: NaiveDate,
    ) -> HashMap<String, Vec<PricePoint>> {
        let mut series = HashMap::new();

        for (i, symbol) in symbols.iter().enumerate() {
            if i > 0 {
                self.pace().await;
            }
            match self.historical_series(symbol, from, to).await {
                Ok(points) => {
                    series.insert(symbol.to_uppercase(), points);
                }
                Err(e) => {
                    warn!("No history for {symbol}: {e}; skipping");
                }
            }
        }

        series
    }

    #[cfg(not(target_arch = "wasm32"))]
    async fn pace(&self) {
        if !self.pacing.is_zero() {
            tokio::time::sleep(self.pacing).await;
        }
    }

    // Browser targets have no timer runtime here; the fetch layer itself
    // is throttled by the event loop.
    #[cfg(target_arch = "wasm32")]
    async fn pace(&self) {}
}
