use async_trait::async_trait;
use chrono::NaiveDate;
use log::debug;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

use super::traits::PriceProvider;
use crate::errors::CoreError;
use crate::models::price::PricePoint;

const BASE_URL: &str = "https://api.coingecko.com/api/v3";

/// CoinGecko API provider for cryptocurrency prices. Primary provider.
///
/// - **Free**: no API key required, but aggressively rate-limited.
/// - **Endpoints**: `/simple/price`, `/coins/{id}/market_chart/range`
///
/// CoinGecko uses lowercase ids like "bitcoin", "matic-network". Common
/// tickers are mapped through a static table; anything unmapped falls back
/// to the lowercase symbol itself, which then either resolves or fails as
/// a per-symbol provider error.
pub struct CoinGeckoProvider {
    client: Client,
    /// Map from uppercase ticker (BTC) to CoinGecko asset id (bitcoin).
    symbol_map: HashMap<String, String>,
}

impl CoinGeckoProvider {
    pub fn new() -> Self {
        let mut symbol_map = HashMap::new();
        let common = vec![
            ("BTC", "bitcoin"),
            ("ETH", "ethereum"),
            ("SOL", "solana"),
            ("ADA", "cardano"),
            ("DOGE", "dogecoin"),
            ("DOT", "polkadot"),
            ("MATIC", "matic-network"),
            ("LINK", "chainlink"),
            ("USDT", "tether"),
            ("XRP", "ripple"),
            ("BNB", "binancecoin"),
            ("USDC", "usd-coin"),
            ("LTC", "litecoin"),
            ("AVAX", "avalanche-2"),
            ("ATOM", "cosmos"),
            ("XLM", "stellar"),
            ("UNI", "uniswap"),
            ("SHIB", "shiba-inu"),
            ("TRX", "tron"),
            ("NEAR", "near"),
        ];
        for (sym, id) in common {
            symbol_map.insert(sym.to_string(), id.to_string());
        }

        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(Duration::from_secs(30));
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
            symbol_map,
        }
    }

    /// Resolve a ticker like "BTC" to a CoinGecko id like "bitcoin".
    /// Unmapped tickers fall back to the lowercase symbol.
    #[must_use]
    pub fn resolve_id(&self, symbol: &str) -> String {
        let upper = symbol.to_uppercase();
        self.symbol_map
            .get(&upper)
            .cloned()
            .unwrap_or_else(|| symbol.to_lowercase())
    }
}

impl Default for CoinGeckoProvider {
    fn default() -> Self {
        Self::new()
    }
}

// ── CoinGecko API response types ────────────────────────────────────

#[derive(Deserialize)]
struct SimplePriceEntry {
    usd: Option<f64>,
}

#[derive(Deserialize)]
struct MarketChartResponse {
    /// Pairs of (unix timestamp in milliseconds, USD price)
    prices: Vec<(f64, f64)>,
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl PriceProvider for CoinGeckoProvider {
    fn name(&self) -> &str {
        "CoinGecko"
    }

    async fn current_price(&self, symbol: &str) -> Result<f64, CoreError> {
        let id = self.resolve_id(symbol);
        let url = format!("{BASE_URL}/simple/price?ids={id}&vs_currencies=usd");
        debug!("Fetching current price for {symbol} ({id}) from CoinGecko");

        let resp: HashMap<String, SimplePriceEntry> = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
            .map_err(|e| CoreError::Api {
                provider: "CoinGecko".into(),
                message: format!("Failed to parse response for {symbol}: {e}"),
            })?;

        resp.get(&id)
            .and_then(|entry| entry.usd)
            .ok_or_else(|| CoreError::Api {
                provider: "CoinGecko".into(),
                message: format!("No price data for {symbol} (id {id})"),
            })
    }

    async fn historical_series(
        &self,
        symbol: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<PricePoint>, CoreError> {
        let id = self.resolve_id(symbol);
        let start = from
            .and_hms_opt(0, 0, 0)
            .unwrap_or_default()
            .and_utc()
            .timestamp();
        let end = to
            .and_hms_opt(23, 59, 59)
            .unwrap_or_default()
            .and_utc()
            .timestamp();

        let url = format!(
            "{BASE_URL}/coins/{id}/market_chart/range?vs_currency=usd&from={start}&to={end}"
        );
        debug!("Fetching history for {symbol} ({id}) from CoinGecko");

        let resp: MarketChartResponse = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
            .map_err(|e| CoreError::Api {
                provider: "CoinGecko".into(),
                message: format!("Failed to parse history for {symbol}: {e}"),
            })?;

        // The API returns sub-daily samples for short ranges; collapse to
        // one point per calendar day, keeping the last sample of each day.
        let mut points: Vec<PricePoint> = Vec::with_capacity(resp.prices.len());
        for (ts_millis, price) in resp.prices {
            let Some(dt) = chrono::DateTime::from_timestamp_millis(ts_millis as i64) else {
                continue;
            };
            let date = dt.date_naive();
            match points.last_mut() {
                Some(last) if last.date == date => last.price = price,
                _ => points.push(PricePoint { date, price }),
            }
        }

        Ok(points)
    }
}
