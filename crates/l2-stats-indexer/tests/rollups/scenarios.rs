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

use alloy::primitives::{Address, U256};
use l2_stats_indexer::{
    facts::FactPayload,
    rollup::{
        schema::{bridging, faucet, messaging},
        BucketId, BucketWidth, BRIDGING_SCHEMA, FAUCET_SCHEMA, MESSAGING_SCHEMA,
    },
    IndexerDb,
};

use crate::common::*;

#[tokio::test]
async fn faucet_day_and_hour_buckets() {
    let (db, processor) = memory_processor();

    processor.process_log(&token_distribution(100, 10, 0)).await.unwrap();
    processor.process_log(&token_distribution(250, 3700, 0)).await.unwrap();

    let daily = load(db.as_ref(), &FAUCET_SCHEMA, BucketWidth::Day, 10).await.unwrap();
    assert_eq!(daily.bucket_start, 0);
    assert_eq!(daily.get(faucet::TOTAL_TOKENS_DISTRIBUTED), U256::from(350));
    assert_eq!(daily.get(faucet::TOKENS_DISTRIBUTED_COUNT), U256::from(2));
    assert_eq!(daily.get(faucet::TOTAL_NATIVE_TOKENS_DISTRIBUTED), U256::ZERO);
    assert_eq!(daily.get(faucet::NATIVE_TOKENS_DISTRIBUTED_COUNT), U256::ZERO);

    let first_hour = load(db.as_ref(), &FAUCET_SCHEMA, BucketWidth::Hour, 10).await.unwrap();
    assert_eq!(first_hour.bucket_start, 0);
    assert_eq!(first_hour.get(faucet::TOTAL_TOKENS_DISTRIBUTED), U256::from(100));
    assert_eq!(first_hour.get(faucet::TOKENS_DISTRIBUTED_COUNT), U256::from(1));

    let second_hour = load(db.as_ref(), &FAUCET_SCHEMA, BucketWidth::Hour, 3700).await.unwrap();
    assert_eq!(second_hour.bucket_start, 3600);
    assert_eq!(second_hour.get(faucet::TOTAL_TOKENS_DISTRIBUTED), U256::from(250));
    assert_eq!(second_hour.get(faucet::TOKENS_DISTRIBUTED_COUNT), U256::from(1));

    assert_eq!(db.rollup_count(FAUCET_SCHEMA.namespace(BucketWidth::Day)).await, 1);
    assert_eq!(db.rollup_count(FAUCET_SCHEMA.namespace(BucketWidth::Hour)).await, 2);
    assert_eq!(db.fact_count().await, 2);
}

#[tokio::test]
async fn zero_amount_bridge_finalize() {
    let (db, processor) = memory_processor();

    let processed = processor.process_log(&bridging_finalized(0, 7200, 4)).await.unwrap();

    for width in BucketWidth::ALL {
        let record = load(db.as_ref(), &BRIDGING_SCHEMA, width, 7200).await.unwrap();
        assert_eq!(record.get(bridging::TOTAL_BRIDGING_FINALIZED), U256::ZERO);
        assert_eq!(record.get(bridging::BRIDGING_FINALIZED_COUNT), U256::ZERO);
        assert_eq!(record.get(bridging::BRIDGING_INITIATED_COUNT), U256::ZERO);
    }

    let fact = db.get_fact(&processed.fact_id).await.unwrap().unwrap();
    assert_eq!(fact.contract, TOKEN_BRIDGE);
    assert!(matches!(
        fact.payload,
        FactPayload::BridgingFinalized { amount, .. } if amount.is_zero()
    ));

    processor.process_log(&bridging_finalized(7, 7300, 0)).await.unwrap();
    let hour = load(db.as_ref(), &BRIDGING_SCHEMA, BucketWidth::Hour, 7300).await.unwrap();
    assert_eq!(hour.get(bridging::TOTAL_BRIDGING_FINALIZED), U256::from(7));
    assert_eq!(hour.get(bridging::BRIDGING_FINALIZED_COUNT), U256::from(1));
}

#[tokio::test]
async fn inbox_batch_counts_every_hash() {
    let (db, processor) = memory_processor();

    processor.process_log(&inbox_batch(5, 5000, 0)).await.unwrap();

    let daily = load(db.as_ref(), &MESSAGING_SCHEMA, BucketWidth::Day, 5000).await.unwrap();
    let hourly = load(db.as_ref(), &MESSAGING_SCHEMA, BucketWidth::Hour, 5000).await.unwrap();
    assert_eq!(hourly.bucket_start, 3600);
    for record in [&daily, &hourly] {
        assert_eq!(record.get(messaging::L1L2_MESSAGE_HASHES_ADDED_TO_INBOX_COUNT), U256::from(5));
        assert_eq!(
            record.get(messaging::TOTAL_L1L2_MESSAGE_HASHES_ADDED_TO_INBOX),
            U256::from(5)
        );
        assert_eq!(record.get(messaging::MESSAGES_SENT_COUNT), U256::ZERO);
    }
}

#[tokio::test]
async fn day_boundary() {
    let (db, processor) = memory_processor();

    processor.process_log(&native_distribution(1, 172_799, 0)).await.unwrap();
    processor.process_log(&native_distribution(2, 172_800, 0)).await.unwrap();

    assert_eq!(day(172_799), BucketId::from_index(1));
    assert_eq!(day(172_800), BucketId::from_index(2));

    let before = load(db.as_ref(), &FAUCET_SCHEMA, BucketWidth::Day, 172_799).await.unwrap();
    assert_eq!(before.bucket_start, 86_400);
    assert_eq!(before.get(faucet::TOTAL_NATIVE_TOKENS_DISTRIBUTED), U256::from(1));

    let after = load(db.as_ref(), &FAUCET_SCHEMA, BucketWidth::Day, 172_800).await.unwrap();
    assert_eq!(after.bucket_start, 172_800);
    assert_eq!(after.get(faucet::TOTAL_NATIVE_TOKENS_DISTRIBUTED), U256::from(2));
    assert_eq!(after.get(faucet::NATIVE_TOKENS_DISTRIBUTED_COUNT), U256::from(1));
}

#[tokio::test]
async fn second_event_accumulates() {
    let (db, processor) = memory_processor();

    processor.process_log(&native_distribution(10, 600, 0)).await.unwrap();
    let first = load(db.as_ref(), &FAUCET_SCHEMA, BucketWidth::Hour, 600).await.unwrap();
    processor.process_log(&native_distribution(15, 1200, 1)).await.unwrap();
    let second = load(db.as_ref(), &FAUCET_SCHEMA, BucketWidth::Hour, 1200).await.unwrap();

    assert_eq!(first.bucket_start, second.bucket_start);
    assert_eq!(second.get(faucet::TOTAL_NATIVE_TOKENS_DISTRIBUTED), U256::from(25));
    assert_eq!(second.get(faucet::NATIVE_TOKENS_DISTRIBUTED_COUNT), U256::from(2));
}

#[tokio::test]
async fn widths_never_share_records() {
    let (db, processor) = memory_processor();

    // Day 0 and hour 0 share the same encoded id.
    assert_eq!(BucketWidth::Day.bucket_id(10), BucketWidth::Hour.bucket_id(10));

    processor.process_log(&token_distribution(1, 10, 0)).await.unwrap();
    processor.process_log(&token_distribution(1, 3700, 0)).await.unwrap();

    let daily = load(db.as_ref(), &FAUCET_SCHEMA, BucketWidth::Day, 10).await.unwrap();
    let hourly = load(db.as_ref(), &FAUCET_SCHEMA, BucketWidth::Hour, 10).await.unwrap();
    assert_eq!(daily.get(faucet::TOKENS_DISTRIBUTED_COUNT), U256::from(2));
    assert_eq!(hourly.get(faucet::TOKENS_DISTRIBUTED_COUNT), U256::from(1));

    // Families never share records either.
    assert!(load(db.as_ref(), &BRIDGING_SCHEMA, BucketWidth::Day, 10).await.is_none());
}

#[tokio::test]
async fn malformed_log_leaves_state_untouched() {
    let (db, processor) = memory_processor();
    processor.process_log(&native_distribution(3, 100, 0)).await.unwrap();
    let before = load(db.as_ref(), &FAUCET_SCHEMA, BucketWidth::Day, 100).await;

    let mut log = native_distribution(3, 100, 1);
    log.inner.data.data = Default::default();
    assert!(processor.process_log(&log).await.is_err());

    let mut log = native_distribution(3, 100, 2);
    log.transaction_hash = None;
    assert!(processor.process_log(&log).await.is_err());

    assert_eq!(load(db.as_ref(), &FAUCET_SCHEMA, BucketWidth::Day, 100).await, before);
    assert_eq!(db.fact_count().await, 1);
}

#[tokio::test]
async fn fact_ids_follow_log_position() {
    let (db, processor) = memory_processor();
    let log = token_distribution(5, 50, 9);
    let processed = processor.process_log(&log).await.unwrap();

    let tx_hash = log.transaction_hash.unwrap();
    let bytes = processed.fact_id.as_bytes();
    assert_eq!(&bytes[..32], tx_hash.as_slice());
    assert_eq!(&bytes[32..], &9i32.to_le_bytes());

    let fact = db.get_fact(&processed.fact_id).await.unwrap().unwrap();
    assert_eq!(fact.timestamp, 50);
    assert_eq!(
        fact.payload,
        FactPayload::TokensDistributed {
            recipient: Address::repeat_byte(0x01),
            token: Address::repeat_byte(0x02),
            amount: U256::from(5),
        }
    );
}
