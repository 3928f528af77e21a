use async_trait::async_trait;
use log::debug;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;
use uuid::Uuid;

use super::traits::TransactionStore;
use crate::errors::CoreError;
use crate::models::transaction::{NewTransaction, Transaction};

const TABLE: &str = "transactions";

/// Transaction store backed by a Supabase project (PostgREST interface).
///
/// One table, three operations. Rows are shaped exactly like
/// [`Transaction`] (`id uuid`, `symbol text`, `amount float8`,
/// `price float8`, `type text`, `date date`); ids are assigned by the
/// database default.
pub struct SupabaseStore {
    client: Client,
    base_url: String,
}

impl SupabaseStore {
    /// `base_url` is the project URL (e.g. `https://xyz.supabase.co`);
    /// `api_key` is the anon/service key, sent as both `apikey` and
    /// bearer token per PostgREST convention.
    pub fn new(base_url: impl Into<String>, api_key: &str) -> Result<Self, CoreError> {
        let mut headers = HeaderMap::new();
        let key_value = HeaderValue::from_str(api_key)
            .map_err(|_| CoreError::Store("API key contains invalid header characters".into()))?;
        let bearer = HeaderValue::from_str(&format!("Bearer {api_key}"))
            .map_err(|_| CoreError::Store("API key contains invalid header characters".into()))?;
        headers.insert("apikey", key_value);
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let builder = Client::builder().default_headers(headers);
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(Duration::from_secs(30));
        let client = builder
            .build()
            .map_err(|e| CoreError::Store(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{TABLE}", self.base_url)
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl TransactionStore for SupabaseStore {
    async fn insert(&self, tx: &NewTransaction) -> Result<Transaction, CoreError> {
        tx.validate()?;
        debug!("Inserting {} {} {}", tx.kind, tx.amount, tx.symbol);

        // PostgREST returns the inserted rows when asked to.
        let rows: Vec<Transaction> = self
            .client
            .post(self.table_url())
            .header("Prefer", "return=representation")
            .json(&[tx])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
            .map_err(|e| CoreError::Store(format!("Failed to parse insert response: {e}")))?;

        rows.into_iter()
            .next()
            .ok_or_else(|| CoreError::Store("Insert returned no rows".into()))
    }

    async fn select_all(&self) -> Result<Vec<Transaction>, CoreError> {
        let url = format!("{}?select=*&order=date.desc", self.table_url());

        let rows: Vec<Transaction> = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
            .map_err(|e| CoreError::Store(format!("Failed to parse select response: {e}")))?;

        Ok(rows)
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<(), CoreError> {
        let url = format!("{}?id=eq.{id}", self.table_url());

        // Ask for the deleted rows back so a miss is detectable: deleting
        // a non-existent id is still HTTP 200 with an empty array.
        let deleted: Vec<Transaction> = self
            .client
            .delete(&url)
            .header("Prefer", "return=representation")
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
            .map_err(|e| CoreError::Store(format!("Failed to parse delete response: {e}")))?;

        if deleted.is_empty() {
            return Err(CoreError::TransactionNotFound(id.to_string()));
        }
        Ok(())
    }
}
