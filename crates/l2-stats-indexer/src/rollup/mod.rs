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

mod accumulator;
pub mod schema;
pub mod time_boundaries;

pub use accumulator::{upsert_and_accumulate, Deltas, RollupError, RollupRecord};
pub use schema::{
    AccumulatorKind, AccumulatorSpec, FamilySchema, MetricFamily, RollupNamespace,
    BRIDGING_SCHEMA, FAUCET_SCHEMA, MESSAGING_SCHEMA,
};
pub use time_boundaries::{
    day_bucket_id, hour_bucket_id, BucketId, BucketWidth, SECONDS_PER_DAY, SECONDS_PER_HOUR,
};
