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

//! Create-or-accumulate update of one rollup bucket.

use std::collections::BTreeMap;

use alloy::primitives::U256;
use thiserror::Error;

use super::schema::{FamilySchema, MetricFamily, RollupNamespace};
use super::time_boundaries::{BucketId, BucketWidth};
use crate::db::{DbError, IndexerDb};

#[derive(Error, Debug)]
pub enum RollupError {
    #[error("Accumulator {name} is not part of the {family} schema")]
    UnknownAccumulator { family: MetricFamily, name: &'static str },

    #[error("Accumulator {name} overflowed in {namespace} bucket {bucket_id}")]
    Overflow { namespace: RollupNamespace, bucket_id: BucketId, name: &'static str },

    #[error("Database error: {0}")]
    DatabaseError(#[from] DbError),
}

/// Aggregate state of one bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollupRecord {
    /// Start of the bucket in seconds since epoch. Set on creation and never changed.
    pub bucket_start: u64,
    pub accumulators: BTreeMap<String, U256>,
}

impl RollupRecord {
    /// A record with every accumulator of `schema` at zero.
    pub fn empty(schema: &FamilySchema, bucket_start: u64) -> Self {
        let accumulators =
            schema.accumulators.iter().map(|spec| (spec.name.to_string(), U256::ZERO)).collect();
        Self { bucket_start, accumulators }
    }

    /// Current value of an accumulator, zero when absent.
    pub fn get(&self, name: &str) -> U256 {
        self.accumulators.get(name).copied().unwrap_or(U256::ZERO)
    }
}

/// Per-accumulator contributions of one event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Deltas(Vec<(&'static str, U256)>);

impl Deltas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &'static str, value: U256) -> Self {
        self.0.push((name, value));
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, U256)> + '_ {
        self.0.iter().copied()
    }

    pub fn get(&self, name: &str) -> U256 {
        self.0
            .iter()
            .filter(|(n, _)| *n == name)
            .fold(U256::ZERO, |acc, (_, v)| acc.saturating_add(*v))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FamilySchema {
    /// Checks that every delta targets an accumulator of this schema.
    pub fn validate(&self, deltas: &Deltas) -> Result<(), RollupError> {
        match deltas.iter().find(|(name, _)| !self.contains(name)) {
            Some((name, _)) => Err(RollupError::UnknownAccumulator { family: self.family, name }),
            None => Ok(()),
        }
    }
}

/// Loads the bucket `bucket_id` of `schema` at `width`, creating it at `bucket_start` with
/// zeroed accumulators when absent, adds `deltas` and stores the full record back.
///
/// Performs exactly one load and one store. Nothing is written when a delta names an
/// unknown accumulator or an addition overflows.
pub async fn upsert_and_accumulate(
    db: &(dyn IndexerDb + Send + Sync),
    schema: &FamilySchema,
    width: BucketWidth,
    bucket_id: BucketId,
    bucket_start: u64,
    deltas: &Deltas,
) -> Result<RollupRecord, RollupError> {
    schema.validate(deltas)?;
    let namespace = schema.namespace(width);

    let mut record = match db.load_rollup(namespace, bucket_id).await? {
        Some(mut record) => {
            if record.bucket_start != bucket_start {
                tracing::warn!(
                    "Bucket {} in {} starts at {}, ignoring caller start {}",
                    bucket_id,
                    namespace,
                    record.bucket_start,
                    bucket_start
                );
            }
            // Records written before an accumulator joined the schema start it at zero.
            for spec in schema.accumulators {
                record.accumulators.entry(spec.name.to_string()).or_insert(U256::ZERO);
            }
            record
        }
        None => {
            tracing::debug!("Creating bucket {} in {} at {}", bucket_id, namespace, bucket_start);
            RollupRecord::empty(schema, bucket_start)
        }
    };

    for (name, delta) in deltas.iter() {
        let total = record.accumulators.entry(name.to_string()).or_insert(U256::ZERO);
        *total = total.checked_add(delta).ok_or(RollupError::Overflow {
            namespace,
            bucket_id,
            name,
        })?;
    }

    db.store_rollup(namespace, bucket_id, &record).await?;
    Ok(record)
}
