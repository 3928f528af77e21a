// ═══════════════════════════════════════════════════════════════════
// Facade Tests — WalletPro wired to MemoryStore and mock providers
// ═══════════════════════════════════════════════════════════════════

use async_trait::async_trait;
use chrono::{Days, NaiveDate, Utc};
use std::collections::HashMap;
use std::time::Duration;
use uuid::Uuid;

use wallet_pro_core::errors::CoreError;
use wallet_pro_core::models::price::PricePoint;
use wallet_pro_core::models::transaction::{NewTransaction, TxKind};
use wallet_pro_core::providers::registry::ProviderRegistry;
use wallet_pro_core::providers::traits::PriceProvider;
use wallet_pro_core::services::price_service::PriceService;
use wallet_pro_core::store::memory::MemoryStore;
use wallet_pro_core::WalletPro;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn days_ago(n: u64) -> NaiveDate {
    Utc::now()
        .date_naive()
        .checked_sub_days(Days::new(n))
        .unwrap()
}

// ═══════════════════════════════════════════════════════════════════
// Mock Provider
// ═══════════════════════════════════════════════════════════════════

/// Serves a fixed current price per symbol and a flat daily historical
/// series at that same price for any requested range.
struct MockPriceProvider {
    prices: HashMap<String, f64>,
}

impl MockPriceProvider {
    fn new(entries: &[(&str, f64)]) -> Self {
        Self {
            prices: entries.iter().map(|(s, p)| (s.to_string(), *p)).collect(),
        }
    }
}

#[async_trait]
impl PriceProvider for MockPriceProvider {
    fn name(&self) -> &str {
        "MockProvider"
    }

    async fn current_price(&self, symbol: &str) -> Result<f64, CoreError> {
        self.prices
            .get(&symbol.to_uppercase())
            .copied()
            .ok_or_else(|| CoreError::PriceNotAvailable {
                symbol: symbol.to_string(),
                date: "now".to_string(),
            })
    }

    async fn historical_series(
        &self,
        symbol: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<PricePoint>, CoreError> {
        let price = self.current_price(symbol).await?;
        let mut points = Vec::new();
        let mut day = from;
        while day <= to {
            points.push(PricePoint { date: day, price });
            day = day.succ_opt().unwrap();
        }
        Ok(points)
    }
}

struct DownProvider;

#[async_trait]
impl PriceProvider for DownProvider {
    fn name(&self) -> &str {
        "DownProvider"
    }

    async fn current_price(&self, _symbol: &str) -> Result<f64, CoreError> {
        Err(CoreError::Network("connection refused".into()))
    }

    async fn historical_series(
        &self,
        _symbol: &str,
        _from: NaiveDate,
        _to: NaiveDate,
    ) -> Result<Vec<PricePoint>, CoreError> {
        Err(CoreError::Network("connection refused".into()))
    }
}

fn tracker_with(provider: Box<dyn PriceProvider>) -> WalletPro {
    let mut registry = ProviderRegistry::new();
    registry.register(provider);
    WalletPro::with_price_service(
        Box::new(MemoryStore::new()),
        PriceService::with_pacing(registry, Duration::ZERO),
    )
}

// ═══════════════════════════════════════════════════════════════════
//  Transaction management
// ═══════════════════════════════════════════════════════════════════

mod transactions {
    use super::*;

    #[tokio::test]
    async fn add_and_list() {
        let tracker = tracker_with(Box::new(MockPriceProvider::new(&[])));

        tracker
            .add_transaction(NewTransaction::new("btc", 1.0, 30000.0, TxKind::Buy, d(2024, 1, 1)))
            .await
            .unwrap();

        let all = tracker.transactions().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].symbol, "BTC");
    }

    #[tokio::test]
    async fn invalid_transaction_is_rejected_at_the_boundary() {
        let tracker = tracker_with(Box::new(MockPriceProvider::new(&[])));

        let result = tracker
            .add_transaction(NewTransaction::new("BTC", 0.0, 100.0, TxKind::Buy, d(2024, 1, 1)))
            .await;
        assert!(matches!(result, Err(CoreError::ValidationError(_))));
        assert!(tracker.transactions().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn add_at_market_uses_provider_price() {
        let tracker = tracker_with(Box::new(MockPriceProvider::new(&[("BTC", 61234.0)])));

        let stored = tracker
            .add_transaction_at_market("BTC", 0.5, TxKind::Buy, d(2024, 5, 1))
            .await
            .unwrap();
        assert_eq!(stored.price, 61234.0);
    }

    #[tokio::test]
    async fn add_at_market_fails_when_no_price_is_available() {
        let tracker = tracker_with(Box::new(DownProvider));

        let result = tracker
            .add_transaction_at_market("BTC", 0.5, TxKind::Buy, d(2024, 5, 1))
            .await;
        assert!(result.is_err());
        assert!(tracker.transactions().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn remove_transaction() {
        let tracker = tracker_with(Box::new(MockPriceProvider::new(&[])));
        let stored = tracker
            .add_transaction(NewTransaction::new("BTC", 1.0, 100.0, TxKind::Buy, d(2024, 1, 1)))
            .await
            .unwrap();

        tracker.remove_transaction(stored.id).await.unwrap();
        assert!(tracker.transactions().await.unwrap().is_empty());

        let result = tracker.remove_transaction(Uuid::new_v4()).await;
        assert!(matches!(result, Err(CoreError::TransactionNotFound(_))));
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Holdings & valuation
// ═══════════════════════════════════════════════════════════════════

mod valuation {
    use super::*;

    #[tokio::test]
    async fn holdings_respect_cutoff() {
        let tracker = tracker_with(Box::new(MockPriceProvider::new(&[])));
        tracker
            .add_transaction(NewTransaction::new("BTC", 1.0, 100.0, TxKind::Buy, d(2024, 1, 1)))
            .await
            .unwrap();
        tracker
            .add_transaction(NewTransaction::new("BTC", 1.0, 100.0, TxKind::Buy, d(2024, 6, 1)))
            .await
            .unwrap();

        let early = tracker.holdings(Some(d(2024, 3, 1))).await.unwrap();
        assert_eq!(early.net("BTC"), 1.0);

        let all = tracker.holdings(None).await.unwrap();
        assert_eq!(all.net("BTC"), 2.0);
    }

    #[tokio::test]
    async fn end_to_end_snapshot() {
        let tracker = tracker_with(Box::new(MockPriceProvider::new(&[("BTC", 60000.0)])));
        tracker
            .add_transaction(NewTransaction::new("BTC", 1.0, 20000.0, TxKind::Buy, d(2024, 1, 1)))
            .await
            .unwrap();
        tracker
            .add_transaction(NewTransaction::new("BTC", 0.4, 50000.0, TxKind::Sell, d(2024, 6, 1)))
            .await
            .unwrap();

        let snap = tracker.valuation().await.unwrap();
        assert_eq!(snap.total_invested, 20000.0);
        assert_eq!(snap.total_sold, 20000.0);
        assert!((snap.current_balance - 36000.0).abs() < 1e-6);
        assert!((snap.profit - 36000.0).abs() < 1e-6);
        assert_eq!(snap.allocation.len(), 1);
        assert!(snap.missing_prices.is_empty());
    }

    #[tokio::test]
    async fn provider_outage_degrades_to_missing_prices() {
        let tracker = tracker_with(Box::new(DownProvider));
        tracker
            .add_transaction(NewTransaction::new("BTC", 1.0, 20000.0, TxKind::Buy, d(2024, 1, 1)))
            .await
            .unwrap();

        let snap = tracker.valuation().await.unwrap();
        assert_eq!(snap.current_balance, 0.0);
        assert_eq!(snap.missing_prices, vec!["BTC".to_string()]);
        assert_eq!(snap.profit, -20000.0);
    }

    #[tokio::test]
    async fn empty_portfolio_valuation() {
        let tracker = tracker_with(Box::new(MockPriceProvider::new(&[])));
        let snap = tracker.valuation().await.unwrap();
        assert_eq!(snap.current_balance, 0.0);
        assert!(snap.allocation.is_empty());
    }
}

// ═══════════════════════════════════════════════════════════════════
//  History
// ═══════════════════════════════════════════════════════════════════

mod history {
    use super::*;

    #[tokio::test]
    async fn empty_portfolio_yields_empty_series() {
        let tracker = tracker_with(Box::new(MockPriceProvider::new(&[("BTC", 60000.0)])));
        assert!(tracker.history().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn series_spans_first_transaction_through_today() {
        let tracker = tracker_with(Box::new(MockPriceProvider::new(&[("BTC", 50000.0)])));
        tracker
            .add_transaction(NewTransaction::new("BTC", 1.0, 48000.0, TxKind::Buy, days_ago(4)))
            .await
            .unwrap();

        let points = tracker.history().await.unwrap();
        assert_eq!(points.len(), 5);
        assert_eq!(points.first().unwrap().date, days_ago(4));
        assert_eq!(points.last().unwrap().date, days_ago(0));
        for point in &points {
            assert_eq!(point.total_value, 50000.0);
        }
    }

    #[tokio::test]
    async fn provider_outage_is_history_unavailable() {
        let tracker = tracker_with(Box::new(DownProvider));
        tracker
            .add_transaction(NewTransaction::new("BTC", 1.0, 48000.0, TxKind::Buy, days_ago(2)))
            .await
            .unwrap();

        let result = tracker.history().await;
        assert!(matches!(result, Err(CoreError::HistoryUnavailable)));
    }

    #[tokio::test]
    async fn partial_provider_coverage_still_builds_a_series() {
        // Provider knows BTC but not MYSTERY; MYSTERY rides on its
        // transaction price.
        let tracker = tracker_with(Box::new(MockPriceProvider::new(&[("BTC", 50000.0)])));
        tracker
            .add_transaction(NewTransaction::new("BTC", 1.0, 48000.0, TxKind::Buy, days_ago(2)))
            .await
            .unwrap();
        tracker
            .add_transaction(NewTransaction::new("MYSTERY", 10.0, 3.0, TxKind::Buy, days_ago(2)))
            .await
            .unwrap();

        let points = tracker.history().await.unwrap();
        assert_eq!(points.len(), 3);
        for point in &points {
            assert_eq!(point.total_value, 50000.0 + 30.0);
        }
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Configuration
// ═══════════════════════════════════════════════════════════════════

mod configuration {
    use super::*;

    #[test]
    fn default_tracker_has_both_providers() {
        let tracker = WalletPro::new(Box::new(MemoryStore::new()));
        assert_eq!(tracker.provider_names(), vec!["CoinGecko", "CoinCap"]);
    }

    #[test]
    fn custom_registry_is_reported() {
        let tracker = tracker_with(Box::new(MockPriceProvider::new(&[])));
        assert_eq!(tracker.provider_names(), vec!["MockProvider"]);
    }
}
