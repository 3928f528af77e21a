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

const BASE_URL: &str = "https://api.coincap.io/v2";

/// CoinCap API provider. Registered behind CoinGecko as a fallback, so a
/// CoinGecko rate-limit window doesn't take the whole dashboard down.
///
/// - **Endpoints**: `/assets/{id}`, `/assets/{id}/history`
///
/// CoinCap also keys assets by lowercase ids ("bitcoin"), though a few
/// differ from CoinGecko's (e.g. MATIC → polygon).
pub struct CoinCapProvider {
    client: Client,
    symbol_map: HashMap<String, String>,
}

impl CoinCapProvider {
    pub fn new() -> Self {
        let mut symbol_map = HashMap::new();
        let common = vec![
            ("BTC", "bitcoin"),
            ("ETH", "ethereum"),
            ("SOL", "solana"),
            ("ADA", "cardano"),
            ("DOGE", "dogecoin"),
            ("DOT", "polkadot"),
            ("MATIC", "polygon"),
            ("LINK", "chainlink"),
            ("USDT", "tether"),
            ("XRP", "xrp"),
            ("BNB", "binance-coin"),
            ("USDC", "usd-coin"),
            ("LTC", "litecoin"),
            ("AVAX", "avalanche"),
            ("ATOM", "cosmos"),
            ("XLM", "stellar"),
            ("UNI", "uniswap"),
            ("SHIB", "shiba-inu"),
            ("TRX", "tron"),
            ("NEAR", "near-protocol"),
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

    /// Resolve a ticker like "BTC" to a CoinCap id like "bitcoin".
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

impl Default for CoinCapProvider {
    fn default() -> Self {
        Self::new()
    }
}

// ── CoinCap API response types ──────────────────────────────────────

#[derive(Deserialize)]
struct AssetResponse {
    data: AssetData,
}

#[derive(Deserialize)]
struct AssetData {
    #[serde(rename = "priceUsd")]
    price_usd: Option<String>,
}

#[derive(Deserialize)]
struct HistoryResponse {
    data: Vec<HistoryEntry>,
}

#[derive(Deserialize)]
struct HistoryEntry {
    #[serde(rename = "priceUsd")]
    price_usd: String,
    time: i64, // unix timestamp in milliseconds
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl PriceProvider for CoinCapProvider {
    fn name(&self) -> &str {
        "CoinCap"
    }

    async fn current_price(&self, symbol: &str) -> Result<f64, CoreError> {
        let id = self.resolve_id(symbol);
        let url = format!("{BASE_URL}/assets/{id}");
        debug!("Fetching current price for {symbol} ({id}) from CoinCap");

        let resp: AssetResponse = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
            .map_err(|e| CoreError::Api {
                provider: "CoinCap".into(),
                message: format!("Failed to parse response for {symbol}: {e}"),
            })?;

        resp.data
            .price_usd
            .ok_or_else(|| CoreError::Api {
                provider: "CoinCap".into(),
                message: format!("No price data for {symbol} (id {id})"),
            })?
            .parse()
            .map_err(|e| CoreError::Api {
                provider: "CoinCap".into(),
                message: format!("Invalid price format for {symbol}: {e}"),
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
            .timestamp_millis();
        let end = to
            .and_hms_opt(23, 59, 59)
            .unwrap_or_default()
            .and_utc()
            .timestamp_millis();

        let url = format!("{BASE_URL}/assets/{id}/history?interval=d1&start={start}&end={end}");
        debug!("Fetching history for {symbol} ({id}) from CoinCap");

        let resp: HistoryResponse = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
            .map_err(|e| CoreError::Api {
                provider: "CoinCap".into(),
                message: format!("Failed to parse history for {symbol}: {e}"),
            })?;

        let points: Vec<PricePoint> = resp
            .data
            .iter()
            .filter_map(|p| {
                let price: f64 = p.price_usd.parse().ok()?;
                let dt = chrono::DateTime::from_timestamp_millis(p.time)?;
                Some(PricePoint {
                    date: dt.date_naive(),
                    price,
                })
            })
            .collect();

        Ok(points)
    }
}
