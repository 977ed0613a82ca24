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

//! Applies decoded events to the fact table and the day and hour rollups.

use alloy::rpc::types::Log;
use thiserror::Error;

use crate::db::{DbError, DbObj};
use crate::events::{decode_log, DecodeError, IndexedEvent};
use crate::facts::FactId;
use crate::handlers::handle_event;
use crate::rollup::{
    upsert_and_accumulate, BucketId, BucketWidth, RollupError, RollupNamespace, RollupRecord,
};

#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("Rollup error: {0}")]
    Rollup(#[from] RollupError),
}

impl From<DbError> for ProcessError {
    fn from(err: DbError) -> Self {
        ProcessError::Rollup(RollupError::DatabaseError(err))
    }
}

/// Outcome of applying one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedEvent {
    pub fact_id: FactId,
    /// False when a fact with the same id was already stored.
    pub fact_inserted: bool,
    /// Updated records, day bucket first.
    pub rollups: Vec<(RollupNamespace, BucketId, RollupRecord)>,
}

/// Applies events one at a time to the store.
#[derive(Clone)]
pub struct EventProcessor {
    db: DbObj,
}

impl EventProcessor {
    pub fn new(db: DbObj) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &DbObj {
        &self.db
    }

    pub async fn process_log(&self, log: &Log) -> Result<ProcessedEvent, ProcessError> {
        let event = decode_log(log)?;
        self.process(&event).await
    }

    /// Writes the fact for `event`, then accumulates its deltas into the day and hour buckets
    /// that contain its timestamp.
    pub async fn process(&self, event: &IndexedEvent) -> Result<ProcessedEvent, ProcessError> {
        let handled = handle_event(event);
        if let Some(update) = &handled.rollup {
            update.schema.validate(&update.deltas)?;
        }

        let fact_id = handled.fact.id;
        let fact_inserted = self.db.insert_fact(&handled.fact).await?;
        if !fact_inserted {
            tracing::warn!(
                "Fact {} for {} already stored, applying rollups again",
                fact_id,
                handled.fact.payload.kind()
            );
        }

        let mut rollups = Vec::new();
        if let Some(update) = &handled.rollup {
            let timestamp = event.timestamp();
            for width in BucketWidth::ALL {
                let bucket_id = width.bucket_id(timestamp);
                let record = upsert_and_accumulate(
                    self.db.as_ref(),
                    update.schema,
                    width,
                    bucket_id,
                    width.bucket_start(timestamp),
                    &update.deltas,
                )
                .await?;
                rollups.push((update.schema.namespace(width), bucket_id, record));
            }
        }

        tracing::debug!(
            "Processed {} at block {} log {} (ts {})",
            handled.fact.payload.kind(),
            event.meta.block_number,
            event.meta.log_index,
            event.timestamp()
        );

        Ok(ProcessedEvent { fact_id, fact_inserted, rollups })
    }
}
