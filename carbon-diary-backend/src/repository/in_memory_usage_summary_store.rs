// src/repository/in_memory_usage_summary_store.rs
use super::{StoreError, UsageSummaryStore};
use crate::domain::usage_summary_model::{Model as UsageSummary, NewUsageSummary};
use async_trait::async_trait;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// プロセス内に保持するストア。DBの一意インデックスと同じ競合判定を行う
#[derive(Default)]
pub struct InMemoryUsageSummaryStore {
    records: RwLock<HashMap<(String, String), UsageSummary>>,
}

impl InMemoryUsageSummaryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    pub async fn get(&self, user_id: &str, date: &str) -> Option<UsageSummary> {
        self.records
            .read()
            .await
            .get(&(user_id.to_string(), date.to_string()))
            .cloned()
    }
}

#[async_trait]
impl UsageSummaryStore for InMemoryUsageSummaryStore {
    async fn insert(&self, summary: NewUsageSummary) -> Result<UsageSummary, StoreError> {
        let key = (summary.user_id.clone(), summary.date.clone());
        let mut records = self.records.write().await;

        match records.entry(key) {
            Entry::Occupied(entry) => {
                let (user_id, date) = entry.key().clone();
                Err(StoreError::Conflict { user_id, date })
            }
            Entry::Vacant(entry) => {
                let model = summary.into_model();
                entry.insert(model.clone());
                Ok(model)
            }
        }
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
