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
    primitives::{address, Address, B256, U256},
    rpc::types::Log,
};
use l2_stats_indexer::{
    contracts::{IL2Faucet, IL2MessageService, IL2TokenBridge},
    rollup::{BucketId, BucketWidth, FamilySchema, RollupRecord},
    test_utils::{test_log, test_meta},
    EventProcessor, IndexerDb, MemoryDb,
};

pub const FAUCET: Address = address!("0x0000000000000000000000000000000000000fac");
pub const MESSAGE_SERVICE: Address = address!("0x508ca82df566dcd1b0de8296e70a96332cd644ec");
pub const TOKEN_BRIDGE: Address = address!("0x353012dc4a9a6cf55c941badc267f82004a8ceb9");

pub fn memory_processor() -> (Arc<MemoryDb>, EventProcessor) {
    let db = Arc::new(MemoryDb::new());
    let processor = EventProcessor::new(db.clone());
    (db, processor)
}

pub fn token_distribution(amount: u64, timestamp: u64, log_index: u64) -> Log {
    test_log(
        FAUCET,
        &IL2Faucet::TokensDistributed {
            recipient: Address::repeat_byte(0x01),
            token: Address::repeat_byte(0x02),
            amount: U256::from(amount),
        },
        test_meta(timestamp / 2 + 1, timestamp, log_index),
    )
}

pub fn native_distribution(amount: u64, timestamp: u64, log_index: u64) -> Log {
    test_log(
        FAUCET,
        &IL2Faucet::NativeTokensDistributed {
            recipient: Address::repeat_byte(0x01),
            amount: U256::from(amount),
        },
        test_meta(timestamp / 2 + 1, timestamp, log_index),
    )
}

pub fn bridging_finalized(amount: u64, timestamp: u64, log_index: u64) -> Log {
    test_log(
        TOKEN_BRIDGE,
        &IL2TokenBridge::BridgingFinalized {
            nativeToken: Address::repeat_byte(0x03),
            bridgedToken: Address::repeat_byte(0x04),
            amount: U256::from(amount),
            recipient: Address::repeat_byte(0x05),
        },
        test_meta(timestamp / 2 + 1, timestamp, log_index),
    )
}

pub fn inbox_batch(count: u8, timestamp: u64, log_index: u64) -> Log {
    test_log(
        MESSAGE_SERVICE,
        &IL2MessageService::L1L2MessageHashesAddedToInbox {
            messageHashes: (1..=count).map(B256::repeat_byte).collect(),
        },
        test_meta(timestamp / 2 + 1, timestamp, log_index),
    )
}

pub async fn load(
    db: &dyn IndexerDb,
    schema: &FamilySchema,
    width: BucketWidth,
    timestamp: u64,
) -> Option<RollupRecord> {
    db.load_rollup(schema.namespace(width), width.bucket_id(timestamp)).await.unwrap()
}

pub fn day(timestamp: u64) -> BucketId {
    BucketWidth::Day.bucket_id(timestamp)
}
