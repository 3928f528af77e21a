pub mod errors;
pub mod models;
pub mod providers;
pub mod services;
pub mod store;

use chrono::NaiveDate;
use uuid::Uuid;

use errors::CoreError;
use models::holdings::HoldingsSnapshot;
use models::transaction::{NewTransaction, Transaction, TxKind};
use models::valuation::{HistoryPoint, ValuationSnapshot};
use providers::registry::ProviderRegistry;
use services::history_service::HistoryBuilder;
use services::holdings_service::HoldingsAggregator;
use services::price_service::PriceService;
use services::valuation_service::ValuationEngine;
use store::traits::TransactionStore;

/// Main entry point for the Wallet Pro core library.
///
/// Owns the transaction store and the price service, and wires them into
/// the pure computations (aggregation, valuation, history). Holds no
/// portfolio state of its own: every computation re-fetches the full
/// transaction list, so after a successful mutation callers simply call
/// the query methods again — there is no implicit global refresh.
#[must_use]
pub struct WalletPro {
    store: Box<dyn TransactionStore>,
    price_service: PriceService,
    aggregator: HoldingsAggregator,
    valuation_engine: ValuationEngine,
    history_builder: HistoryBuilder,
}

impl std::fmt::Debug for WalletPro {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletPro")
            .field("providers", &self.price_service.provider_names())
            .finish()
    }
}

impl WalletPro {
    /// Create a tracker over the given store, with the default provider
    /// stack (CoinGecko, then CoinCap).
    pub fn new(store: Box<dyn TransactionStore>) -> Self {
        Self::with_price_service(store, PriceService::new(ProviderRegistry::with_defaults()))
    }

    /// Create a tracker with a custom price service (different providers,
    /// different pacing).
    pub fn with_price_service(store: Box<dyn TransactionStore>, price_service: PriceService) -> Self {
        Self {
            store,
            price_service,
            aggregator: HoldingsAggregator::new(),
            valuation_engine: ValuationEngine::new(),
            history_builder: HistoryBuilder::new(),
        }
    }

    // ── Transactions ────────────────────────────────────────────────

    /// Record a transaction with a user-supplied price.
    /// Validation happens at this boundary; the stored row is returned.
    pub async fn add_transaction(&self, tx: NewTransaction) -> Result<Transaction, CoreError> {
        tx.validate()?;
        self.store.insert(&tx).await
    }

    /// Record a transaction at the current market price, fetched from the
    /// providers at entry time.
    pub async fn add_transaction_at_market(
        &self,
        symbol: &str,
        amount: f64,
        kind: TxKind,
        date: NaiveDate,
    ) -> Result<Transaction, CoreError> {
        let price = self.price_service.current_price(symbol).await?;
        self.add_transaction(NewTransaction::new(symbol, amount, price, kind, date))
            .await
    }

    /// Delete a transaction by id.
    pub async fn remove_transaction(&self, id: Uuid) -> Result<(), CoreError> {
        self.store.delete_by_id(id).await
    }

    /// All transactions, newest first (as the store orders them).
    pub async fn transactions(&self) -> Result<Vec<Transaction>, CoreError> {
        self.store.select_all().await
    }

    // ── Holdings & Valuation ────────────────────────────────────────

    /// Net holdings and cash-flow totals as of `cutoff` (or all time when
    /// `None`).
    pub async fn holdings(&self, cutoff: Option<NaiveDate>) -> Result<HoldingsSnapshot, CoreError> {
        let transactions = self.store.select_all().await?;
        Ok(self.aggregator.aggregate(&transactions, cutoff))
    }

    /// Current mark-to-market snapshot: balance, invested, sold, profit,
    /// and the allocation breakdown.
    ///
    /// Prices are fetched only for symbols with positive net holdings;
    /// symbols whose price cannot be resolved contribute zero and are
    /// listed in `missing_prices`.
    pub async fn valuation(&self) -> Result<ValuationSnapshot, CoreError> {
        let transactions = self.store.select_all().await?;
        let held = self.aggregator.aggregate(&transactions, None).held_symbols();
        let prices = self.price_service.current_prices(&held).await;
        Ok(self.valuation_engine.snapshot(&transactions, &prices))
    }

    /// Day-by-day portfolio value from the first transaction through
    /// today.
    ///
    /// Historical series are fetched for every traded symbol (a coin that
    /// was fully sold still needs prices for the days it was held).
    /// Returns `CoreError::HistoryUnavailable` when the providers could
    /// not supply data for any symbol at all; an empty portfolio yields
    /// an empty series.
    pub async fn history(&self) -> Result<Vec<HistoryPoint>, CoreError> {
        let transactions = self.store.select_all().await?;
        if transactions.is_empty() {
            return Ok(Vec::new());
        }

        let today = chrono::Utc::now().date_naive();
        let from = transactions
            .iter()
            .map(|t| t.date)
            .min()
            .unwrap_or(today);

        let mut symbols: Vec<String> =
            transactions.iter().map(|t| t.symbol.to_uppercase()).collect();
        symbols.sort();
        symbols.dedup();

        let series = self
            .price_service
            .historical_series_batch(&symbols, from, today)
            .await;

        self.history_builder.reconstruct(&transactions, &series, today)
    }

    // ── Providers ───────────────────────────────────────────────────

    /// Names of the configured price providers, in fallback order.
    #[must_use]
    pub fn provider_names(&self) -> Vec<String> {
        self.price_service.provider_names()
    }
}
