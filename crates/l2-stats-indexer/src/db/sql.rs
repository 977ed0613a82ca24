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

use std::{collections::BTreeMap, str::FromStr};

use alloy::primitives::{Address, B256, U256};
use async_trait::async_trait;
use sqlx::{
    any::{install_default_drivers, AnyConnectOptions, AnyPoolOptions},
    AnyPool, Row,
};

use super::{DbError, IndexerDb};
use crate::facts::{FactId, FactPayload, FactRecord};
use crate::rollup::{BucketId, RollupNamespace, RollupRecord};

const SQL_BLOCK_KEY: i64 = 0;

/// SQL backed store, SQLite or Postgres depending on the connection string.
pub struct AnyDb {
    pool: AnyPool,
}

impl AnyDb {
    pub async fn new(conn_str: &str) -> Result<Self, DbError> {
        install_default_drivers();
        let opts = AnyConnectOptions::from_str(conn_str)?;

        let pool = AnyPoolOptions::new().max_connections(7).connect_with(opts).await?;

        // apply any migrations
        sqlx::migrate!().run(&pool).await?;

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &AnyPool {
        &self.pool
    }
}

fn encode_accumulators(record: &RollupRecord) -> Result<String, DbError> {
    let values: BTreeMap<&str, String> = record
        .accumulators
        .iter()
        .map(|(name, value)| (name.as_str(), value.to_string()))
        .collect();
    Ok(serde_json::to_string(&values)?)
}

fn decode_accumulators(raw: &str) -> Result<BTreeMap<String, U256>, DbError> {
    let values: BTreeMap<String, String> = serde_json::from_str(raw)?;
    values
        .into_iter()
        .map(|(name, value)| {
            let parsed = U256::from_str(&value)
                .map_err(|_| DbError::BadRecord("rollup", format!("{name} = {value}")))?;
            Ok((name, parsed))
        })
        .collect()
}

#[async_trait]
impl IndexerDb for AnyDb {
    async fn load_rollup(
        &self,
        namespace: RollupNamespace,
        bucket_id: BucketId,
    ) -> Result<Option<RollupRecord>, DbError> {
        let res = sqlx::query(
            "SELECT bucket_start, accumulators FROM rollups
         WHERE namespace = $1 AND bucket_id = $2",
        )
        .bind(namespace.name())
        .bind(bucket_id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = res else {
            return Ok(None);
        };

        let bucket_start: i64 = row.try_get("bucket_start")?;
        let accumulators: String = row.try_get("accumulators")?;

        Ok(Some(RollupRecord {
            bucket_start: bucket_start as u64,
            accumulators: decode_accumulators(&accumulators)?,
        }))
    }

    async fn store_rollup(
        &self,
        namespace: RollupNamespace,
        bucket_id: BucketId,
        record: &RollupRecord,
    ) -> Result<(), DbError> {
        sqlx::query(
            "INSERT INTO rollups (namespace, bucket_id, bucket_start, accumulators)
         VALUES ($1, $2, $3, $4)
         ON CONFLICT (namespace, bucket_id) DO UPDATE SET
         bucket_start = EXCLUDED.bucket_start,
         accumulators = EXCLUDED.accumulators",
        )
        .bind(namespace.name())
        .bind(bucket_id.to_string())
        .bind(record.bucket_start as i64)
        .bind(encode_accumulators(record)?)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn insert_fact(&self, fact: &FactRecord) -> Result<bool, DbError> {
        let res = sqlx::query(
            "INSERT INTO facts (id, kind, contract, block_number, block_timestamp, tx_hash, payload)
         VALUES ($1, $2, $3, $4, $5, $6, $7)
         ON CONFLICT (id) DO NOTHING",
        )
        .bind(fact.id.to_string())
        .bind(fact.payload.kind())
        .bind(format!("{:x}", fact.contract))
        .bind(fact.block_number as i64)
        .bind(fact.timestamp as i64)
        .bind(format!("{:x}", fact.transaction_hash))
        .bind(serde_json::to_string(&fact.payload)?)
        .execute(&self.pool)
        .await?;

        Ok(res.rows_affected() > 0)
    }

    async fn get_fact(&self, id: &FactId) -> Result<Option<FactRecord>, DbError> {
        let res = sqlx::query(
            "SELECT contract, block_number, block_timestamp, tx_hash, payload
         FROM facts WHERE id = $1",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = res else {
            return Ok(None);
        };

        let contract: String = row.try_get("contract")?;
        let block_number: i64 = row.try_get("block_number")?;
        let block_timestamp: i64 = row.try_get("block_timestamp")?;
        let tx_hash: String = row.try_get("tx_hash")?;
        let payload: String = row.try_get("payload")?;

        Ok(Some(FactRecord {
            id: *id,
            contract: Address::from_str(&contract)
                .map_err(|_| DbError::BadRecord("fact", format!("contract {contract}")))?,
            block_number: block_number as u64,
            timestamp: block_timestamp as u64,
            transaction_hash: B256::from_str(&tx_hash)
                .map_err(|_| DbError::BadRecord("fact", format!("tx hash {tx_hash}")))?,
            payload: serde_json::from_str::<FactPayload>(&payload)?,
        }))
    }

    async fn get_last_block(&self) -> Result<Option<u64>, DbError> {
        let res = sqlx::query("SELECT block FROM last_block WHERE id = $1")
            .bind(SQL_BLOCK_KEY)
            .fetch_optional(&self.pool)
            .await?;

        let Some(row) = res else {
            return Ok(None);
        };

        let block_str: String = row.try_get("block")?;

        Ok(Some(block_str.parse().map_err(|_err| DbError::BadBlockNumb(block_str))?))
    }

    async fn set_last_block(&self, block_numb: u64) -> Result<(), DbError> {
        let res = sqlx::query(
            "INSERT INTO last_block (id, block) VALUES ($1, $2)
         ON CONFLICT (id) DO UPDATE SET block = EXCLUDED.block",
        )
        .bind(SQL_BLOCK_KEY)
        .bind(block_numb.to_string())
        .execute(&self.pool)
        .await?;

        if res.rows_affected() == 0 {
            return Err(DbError::SetBlockFail);
        }

        Ok(())
    }

    async fn add_block(&self, block_numb: u64, block_timestamp: u64) -> Result<(), DbError> {
        sqlx::query(
            "INSERT INTO blocks (block_number, block_timestamp) VALUES ($1, $2)
         ON CONFLICT (block_number) DO NOTHING",
        )
        .bind(block_numb as i64)
        .bind(block_timestamp as i64)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get_block_timestamp(&self, block_numb: u64) -> Result<Option<u64>, DbError> {
        let result = sqlx::query("SELECT block_timestamp FROM blocks WHERE block_number = $1")
            .bind(block_numb as i64)
            .fetch_optional(&self.pool)
            .await?;

        Ok(result.map(|row| row.get::<i64, _>(0) as u64))
    }
}
