use async_trait::async_trait;
use std::sync::Mutex;
use uuid::Uuid;

use super::traits::TransactionStore;
use crate::errors::CoreError;
use crate::models::transaction::{NewTransaction, Transaction};

/// In-memory transaction store.
///
/// Same contract as [`super::supabase::SupabaseStore`] — ids assigned on
/// insert, newest-first ordering on select — without any I/O. Used in
/// tests and for offline/demo operation.
#[derive(Default)]
pub struct MemoryStore {
    rows: Mutex<Vec<Transaction>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored transactions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl TransactionStore for MemoryStore {
    async fn insert(&self, tx: &NewTransaction) -> Result<Transaction, CoreError> {
        tx.validate()?;

        let stored = Transaction {
            id: Uuid::new_v4(),
            symbol: tx.symbol.to_uppercase(),
            amount: tx.amount,
            price: tx.price,
            kind: tx.kind,
            date: tx.date,
        };

        let mut rows = self.rows.lock().unwrap_or_else(|e| e.into_inner());
        rows.push(stored.clone());
        Ok(stored)
    }

    async fn select_all(&self) -> Result<Vec<Transaction>, CoreError> {
        let rows = self.rows.lock().unwrap_or_else(|e| e.into_inner());
        let mut all = rows.clone();
        all.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(all)
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<(), CoreError> {
        let mut rows = self.rows.lock().unwrap_or_else(|e| e.into_inner());
        let before = rows.len();
        rows.retain(|t| t.id != id);
        if rows.len() == before {
            return Err(CoreError::TransactionNotFound(id.to_string()));
        }
        Ok(())
    }
}
