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

use std::sync::Arc;

use alloy::{
    primitives::{keccak256, Address, B256},
    rpc::types::Log,
    sol_types::SolEvent,
};
use sqlx::any::install_default_drivers;
use sqlx::AnyPool;
use tempfile::NamedTempFile;

use crate::db::{AnyDb, DbError, DbObj};
use crate::events::EventMeta;

pub struct TestDb {
    pub db: Arc<AnyDb>,
    pub db_url: String,
    pub pool: AnyPool,
    pub _temp_file: Option<NamedTempFile>,
}

impl TestDb {
    pub async fn new() -> Result<Self, DbError> {
        install_default_drivers();

        // Point INDEXER_DATABASE_URL at a postgres instance to sanity check the queries there.
        // Only supported with --test-threads=1.
        if let Ok(db_url) = std::env::var("INDEXER_DATABASE_URL") {
            if db_url.starts_with("postgres") {
                let pool = AnyPool::connect(&db_url).await?;
                let db = Arc::new(AnyDb::new(&db_url).await?);
                let test_db = Self { db, db_url, pool, _temp_file: None };
                test_db.cleanup().await?;
                tracing::info!("Testing with Postgres. Must only run with --test-threads=1");
                return Ok(test_db);
            }
        }

        let temp_file = NamedTempFile::new()
            .map_err(|e| DbError::Error(anyhow::anyhow!("failed to create temp db: {e}")))?;
        let db_url = format!("sqlite:{}", temp_file.path().display());
        let pool = AnyPool::connect(&db_url).await?;
        let db = Arc::new(AnyDb::new(&db_url).await?);

        Ok(Self { db, db_url, pool, _temp_file: Some(temp_file) })
    }

    pub fn get_db(&self) -> DbObj {
        self.db.clone()
    }

    pub async fn cleanup(&self) -> Result<(), DbError> {
        if self.db_url.starts_with("postgres") {
            for table in ["rollups", "facts", "blocks", "last_block"] {
                // Tables may not exist before the first migration.
                let _ = sqlx::query(&format!("TRUNCATE TABLE {table}")).execute(&self.pool).await;
            }
        }
        Ok(())
    }
}

/// Metadata for an event at `log_index` in a block, with a transaction hash derived from both.
pub fn test_meta(block_number: u64, timestamp: u64, log_index: u64) -> EventMeta {
    let mut seed = [0u8; 16];
    seed[..8].copy_from_slice(&block_number.to_be_bytes());
    seed[8..].copy_from_slice(&log_index.to_be_bytes());
    EventMeta::new(block_number, timestamp, keccak256(seed), log_index, log_index)
}

/// An RPC log carrying `event` as emitted by `contract`.
pub fn test_log<E: SolEvent>(contract: Address, event: &E, meta: EventMeta) -> Log {
    Log {
        inner: alloy::primitives::Log { address: contract, data: event.encode_log_data() },
        block_hash: Some(B256::repeat_byte(0x42)),
        block_number: Some(meta.block_number),
        block_timestamp: Some(meta.block_timestamp),
        transaction_hash: Some(meta.tx_hash),
        transaction_index: Some(meta.transaction_index),
        log_index: Some(meta.log_index),
        removed: false,
    }
}
