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

mod memory;
mod sql;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::facts::{FactId, FactRecord};
use crate::rollup::{BucketId, RollupNamespace, RollupRecord};

pub use memory::MemoryDb;
pub use sql::AnyDb;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("SQL error {0:?}")]
    SqlErr(#[from] sqlx::Error),

    #[error("SQL Migration error {0:?}")]
    MigrateErr(#[from] sqlx::migrate::MigrateError),

    #[error("Invalid block number: {0}")]
    BadBlockNumb(String),

    #[error("Failed to set last block")]
    SetBlockFail,

    #[error("Corrupt {0} record: {1}")]
    BadRecord(&'static str, String),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Error: {0}")]
    Error(#[from] anyhow::Error),
}

/// Durable state of the indexer. Every call is atomic on its own.
#[async_trait]
pub trait IndexerDb {
    async fn load_rollup(
        &self,
        namespace: RollupNamespace,
        bucket_id: BucketId,
    ) -> Result<Option<RollupRecord>, DbError>;

    /// Replaces the record stored under `bucket_id`.
    async fn store_rollup(
        &self,
        namespace: RollupNamespace,
        bucket_id: BucketId,
        record: &RollupRecord,
    ) -> Result<(), DbError>;

    /// Inserts a fact unless one with the same id exists. Returns whether it was inserted.
    async fn insert_fact(&self, fact: &FactRecord) -> Result<bool, DbError>;
    async fn get_fact(&self, id: &FactId) -> Result<Option<FactRecord>, DbError>;

    async fn get_last_block(&self) -> Result<Option<u64>, DbError>;
    async fn set_last_block(&self, block_numb: u64) -> Result<(), DbError>;

    async fn add_block(&self, block_numb: u64, block_timestamp: u64) -> Result<(), DbError>;
    async fn get_block_timestamp(&self, block_numb: u64) -> Result<Option<u64>, DbError>;
}

pub type DbObj = Arc<dyn IndexerDb + Send + Sync>;
