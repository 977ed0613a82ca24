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

//! Indexer maintaining day and hour rollups of L2 faucet, messaging and bridging activity.
//!
//! Logs are decoded into [events::IndexedEvent]s, mapped to a write-once fact and a set of
//! accumulator deltas by [handlers::handle_event], and applied to both bucket widths by
//! [processor::EventProcessor].

pub mod contracts;
pub mod db;
pub mod events;
pub mod facts;
pub mod handlers;
pub mod processor;
pub mod rollup;
pub mod service;

pub mod test_utils;

pub use db::{AnyDb, DbError, DbObj, IndexerDb, MemoryDb};
pub use events::{decode_log, ChainEvent, DecodeError, EventMeta, IndexedEvent};
pub use processor::{EventProcessor, ProcessError, ProcessedEvent};
pub use service::{IndexerService, IndexerServiceConfig, ServiceError};
