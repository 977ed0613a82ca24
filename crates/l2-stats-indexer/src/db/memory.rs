// Copyright 2026 Boundless Foundation, Inc.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! In-process store, used by tests and dry runs.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{DbError, IndexerDb};
use crate::facts::{FactId, FactRecord};
use crate::rollup::{BucketId, RollupNamespace, RollupRecord};

#[derive(Default)]
pub struct MemoryDb {
    rollups: RwLock<HashMap<(RollupNamespace, BucketId), RollupRecord>>,
    facts: RwLock<HashMap<FactId, FactRecord>>,
    last_block: RwLock<Option<u64>>,
    blocks: RwLock<HashMap<u64, u64>>,
}

impl MemoryDb {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of buckets stored in `namespace`.
    pub async fn rollup_count(&self, namespace: RollupNamespace) -> usize {
        self.rollups.read().await.keys().filter(|(ns, _)| *ns == namespace).count()
    }

    pub async fn fact_count(&self) -> usize {
        self.facts.read().await.len()
    }
}

#[async_trait]
impl IndexerDb for MemoryDb {
    async fn load_rollup(
        &self,
        namespace: RollupNamespace,
        bucket_id: BucketId,
    ) -> Result<Option<RollupRecord>, DbError> {
        Ok(self.rollups.read().await.get(&(namespace, bucket_id)).cloned())
    }

    async fn store_rollup(
        &self,
        namespace: RollupNamespace,
        bucket_id: BucketId,
        record: &RollupRecord,
    ) -> Result<(), DbError> {
        self.rollups.write().await.insert((namespace, bucket_id), record.clone());
        Ok(())
    }

    async fn insert_fact(&self, fact: &FactRecord) -> Result<bool, DbError> {
        let mut facts = self.facts.write().await;
        if facts.contains_key(&fact.id) {
            return Ok(false);
        }
        facts.insert(fact.id, fact.clone());
        Ok(true)
    }

    async fn get_fact(&self, id: &FactId) -> Result<Option<FactRecord>, DbError> {
        Ok(self.facts.read().await.get(id).cloned())
    }

    async fn get_last_block(&self) -> Result<Option<u64>, DbError> {
        Ok(*self.last_block.read().await)
    }

    async fn set_last_block(&self, block_numb: u64) -> Result<(), DbError> {
        *self.last_block.write().await = Some(block_numb);
        Ok(())
    }

    async fn add_block(&self, block_numb: u64, block_timestamp: u64) -> Result<(), DbError> {
        self.blocks.write().await.entry(block_numb).or_insert(block_timestamp);
        Ok(())
    }

    async fn get_block_timestamp(&self, block_numb: u64) -> Result<Option<u64>, DbError> {
        Ok(self.blocks.read().await.get(&block_numb).copied())
    }
}
