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

use alloy::primitives::U256;
use l2_stats_indexer::{
    rollup::{schema::faucet, BucketWidth, FAUCET_SCHEMA},
    test_utils::TestDb,
    EventProcessor,
};

use crate::common::*;

#[tokio::test]
async fn rollups_survive_reconnect() {
    let test_db = TestDb::new().await.unwrap();
    let processor = EventProcessor::new(test_db.get_db());

    processor.process_log(&token_distribution(100, 10, 0)).await.unwrap();
    processor.process_log(&token_distribution(250, 3700, 0)).await.unwrap();

    let reopened = l2_stats_indexer::AnyDb::new(&test_db.db_url).await.unwrap();
    let daily = load(&reopened, &FAUCET_SCHEMA, BucketWidth::Day, 10).await.unwrap();
    assert_eq!(daily.get(faucet::TOTAL_TOKENS_DISTRIBUTED), U256::from(350));
    assert_eq!(daily.get(faucet::TOKENS_DISTRIBUTED_COUNT), U256::from(2));

    let hourly = load(&reopened, &FAUCET_SCHEMA, BucketWidth::Hour, 3700).await.unwrap();
    assert_eq!(hourly.bucket_start, 3600);
    assert_eq!(hourly.get(faucet::TOTAL_TOKENS_DISTRIBUTED), U256::from(250));
}

#[tokio::test]
async fn replayed_log_keeps_first_fact() {
    let test_db = TestDb::new().await.unwrap();
    let processor = EventProcessor::new(test_db.get_db());
    let log = inbox_batch(3, 5000, 1);

    let first = processor.process_log(&log).await.unwrap();
    let second = processor.process_log(&log).await.unwrap();

    assert!(first.fact_inserted);
    assert!(!second.fact_inserted);
    assert_eq!(first.fact_id, second.fact_id);
}
