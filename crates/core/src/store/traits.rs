use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::CoreError;
use crate::models::transaction::{NewTransaction, Transaction};

/// Trait abstraction for the transaction store.
///
/// The backing store is an external managed service reached through a
/// simple query interface; this crate only ever inserts, selects, and
/// deletes rows in one table. There is no update operation — transactions
/// are immutable once created.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait TransactionStore: Send + Sync {
    /// Insert a validated transaction; returns the stored row with its
    /// store-assigned id.
    async fn insert(&self, tx: &NewTransaction) -> Result<Transaction, CoreError>;

    /// All transactions, ordered by date descending (newest first).
    async fn select_all(&self) -> Result<Vec<Transaction>, CoreError>;

    /// Delete one transaction by id. Fails with `TransactionNotFound`
    /// when no row matches.
    async fn delete_by_id(&self, id: Uuid) -> Result<(), CoreError>;
}
