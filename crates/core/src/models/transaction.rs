use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::CoreError;

/// Direction of a transaction.
///
/// Serialized as lowercase `"buy"` / `"sell"` — the column values used by
/// the backing `transactions` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxKind {
    /// Acquiring an asset (cash out, coins in)
    Buy,
    /// Disposing of an asset (coins out, cash in)
    Sell,
}

impl std::fmt::Display for TxKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TxKind::Buy => write!(f, "buy"),
            TxKind::Sell => write!(f, "sell"),
        }
    }
}

/// A single buy/sell record in the portfolio.
///
/// Immutable once created: rows are only ever inserted and deleted, never
/// updated. The `id` is assigned by the store. Prices are unit prices in
/// USD at the time of the transaction (user-supplied or fetched at entry).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier, assigned by the store
    pub id: Uuid,

    /// Asset ticker, uppercased (e.g., "BTC")
    pub symbol: String,

    /// Quantity of the asset moved (always positive)
    pub amount: f64,

    /// USD unit price at transaction time
    pub price: f64,

    /// Buy or sell
    #[serde(rename = "type")]
    pub kind: TxKind,

    /// Calendar date of the transaction (daily granularity)
    pub date: NaiveDate,
}

impl Transaction {
    /// Gross USD value of this transaction (`amount * price`).
    #[must_use]
    pub fn value(&self) -> f64 {
        self.amount * self.price
    }
}

/// Insert payload for a new transaction — everything except the
/// store-assigned `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTransaction {
    pub symbol: String,
    pub amount: f64,
    pub price: f64,
    #[serde(rename = "type")]
    pub kind: TxKind,
    pub date: NaiveDate,
}

impl NewTransaction {
    pub fn new(
        symbol: impl Into<String>,
        amount: f64,
        price: f64,
        kind: TxKind,
        date: NaiveDate,
    ) -> Self {
        Self {
            symbol: symbol.into().trim().to_uppercase(),
            amount,
            price,
            kind,
            date,
        }
    }

    /// Validate the payload before it reaches the store.
    ///
    /// This is the only place malformed input is rejected — the pure
    /// computations downstream assume well-formed records.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.symbol.is_empty() {
            return Err(CoreError::ValidationError(
                "Symbol must not be empty".into(),
            ));
        }
        if !self.amount.is_finite() || self.amount <= 0.0 {
            return Err(CoreError::ValidationError(format!(
                "Amount must be a positive number, got {}",
                self.amount
            )));
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(CoreError::ValidationError(format!(
                "Price must be a non-negative number, got {}",
                self.price
            )));
        }
        Ok(())
    }
}
