// ═══════════════════════════════════════════════════════════════════
// Store Tests — MemoryStore contract (shared with SupabaseStore)
// ═══════════════════════════════════════════════════════════════════

use chrono::NaiveDate;
use uuid::Uuid;

use wallet_pro_core::errors::CoreError;
use wallet_pro_core::models::transaction::{NewTransaction, TxKind};
use wallet_pro_core::store::memory::MemoryStore;
use wallet_pro_core::store::traits::TransactionStore;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn buy(symbol: &str, amount: f64, price: f64, date: NaiveDate) -> NewTransaction {
    NewTransaction::new(symbol, amount, price, TxKind::Buy, date)
}

mod insert {
    use super::*;

    #[tokio::test]
    async fn assigns_unique_ids() {
        let store = MemoryStore::new();
        let a = store.insert(&buy("BTC", 1.0, 100.0, d(2024, 1, 1))).await.unwrap();
        let b = store.insert(&buy("BTC", 1.0, 100.0, d(2024, 1, 1))).await.unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn preserves_payload_fields() {
        let store = MemoryStore::new();
        let stored = store
            .insert(&NewTransaction::new("eth", 2.5, 2400.0, TxKind::Sell, d(2024, 3, 1)))
            .await
            .unwrap();

        assert_eq!(stored.symbol, "ETH");
        assert_eq!(stored.amount, 2.5);
        assert_eq!(stored.price, 2400.0);
        assert_eq!(stored.kind, TxKind::Sell);
        assert_eq!(stored.date, d(2024, 3, 1));
    }

    #[tokio::test]
    async fn rejects_invalid_payload() {
        let store = MemoryStore::new();
        let result = store.insert(&buy("BTC", -1.0, 100.0, d(2024, 1, 1))).await;
        assert!(matches!(result, Err(CoreError::ValidationError(_))));
        assert!(store.is_empty());
    }
}

mod select {
    use super::*;

    #[tokio::test]
    async fn empty_store_yields_empty_list() {
        let store = MemoryStore::new();
        assert!(store.select_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn orders_newest_first() {
        let store = MemoryStore::new();
        store.insert(&buy("BTC", 1.0, 100.0, d(2024, 1, 15))).await.unwrap();
        store.insert(&buy("ETH", 1.0, 100.0, d(2024, 3, 1))).await.unwrap();
        store.insert(&buy("SOL", 1.0, 100.0, d(2024, 2, 10))).await.unwrap();

        let all = store.select_all().await.unwrap();
        let dates: Vec<NaiveDate> = all.iter().map(|t| t.date).collect();
        assert_eq!(dates, vec![d(2024, 3, 1), d(2024, 2, 10), d(2024, 1, 15)]);
    }
}

mod delete {
    use super::*;

    #[tokio::test]
    async fn removes_the_row() {
        let store = MemoryStore::new();
        let stored = store.insert(&buy("BTC", 1.0, 100.0, d(2024, 1, 1))).await.unwrap();

        store.delete_by_id(stored.id).await.unwrap();
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn only_removes_the_matching_row() {
        let store = MemoryStore::new();
        let first = store.insert(&buy("BTC", 1.0, 100.0, d(2024, 1, 1))).await.unwrap();
        let second = store.insert(&buy("ETH", 1.0, 100.0, d(2024, 1, 2))).await.unwrap();

        store.delete_by_id(first.id).await.unwrap();
        let remaining = store.select_all().await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, second.id);
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let store = MemoryStore::new();
        store.insert(&buy("BTC", 1.0, 100.0, d(2024, 1, 1))).await.unwrap();

        let result = store.delete_by_id(Uuid::new_v4()).await;
        assert!(matches!(result, Err(CoreError::TransactionNotFound(_))));
        assert_eq!(store.len(), 1);
    }
}
