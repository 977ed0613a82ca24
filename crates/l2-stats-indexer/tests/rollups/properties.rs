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
use l2_stats_indexer::rollup::{schema::faucet, BucketWidth, RollupRecord, FAUCET_SCHEMA};
use proptest::prelude::*;
use tokio::runtime::Runtime;

use crate::common::*;

/// Applies native distributions of `(amount, second of day)` in order and returns the day
/// bucket plus every hour bucket touched.
fn apply(events: &[(u64, u64)]) -> (RollupRecord, Vec<RollupRecord>) {
    let rt = Runtime::new().unwrap();
    rt.block_on(async {
        let (db, processor) = memory_processor();
        for (log_index, (amount, ts)) in events.iter().enumerate() {
            let log = native_distribution(*amount, *ts, log_index as u64);
            processor.process_log(&log).await.unwrap();
        }

        let daily = load(db.as_ref(), &FAUCET_SCHEMA, BucketWidth::Day, 0).await.unwrap();
        let mut hourly = Vec::new();
        for hour in 0..24 {
            if let Some(record) =
                load(db.as_ref(), &FAUCET_SCHEMA, BucketWidth::Hour, hour * 3600).await
            {
                hourly.push(record);
            }
        }
        (daily, hourly)
    })
}

fn events() -> impl Strategy<Value = Vec<(u64, u64)>> {
    prop::collection::vec((0u64..1_000_000_000, 0u64..86_400), 1..16)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn order_does_not_matter(events in events(), seed in any::<u64>()) {
        let mut shuffled = events.clone();
        // Deterministic rotation plus reversal derived from the seed.
        let len = shuffled.len();
        shuffled.rotate_left((seed as usize) % len);
        if seed % 2 == 0 {
            shuffled.reverse();
        }

        prop_assert_eq!(apply(&events), apply(&shuffled));
    }

    #[test]
    fn totals_and_counts_are_additive(events in events()) {
        let (daily, hourly) = apply(&events);

        let total: u64 = events.iter().map(|(amount, _)| amount).sum();
        prop_assert_eq!(daily.get(faucet::TOTAL_NATIVE_TOKENS_DISTRIBUTED), U256::from(total));
        prop_assert_eq!(
            daily.get(faucet::NATIVE_TOKENS_DISTRIBUTED_COUNT),
            U256::from(events.len())
        );

        let hourly_total = hourly
            .iter()
            .fold(U256::ZERO, |acc, r| acc + r.get(faucet::TOTAL_NATIVE_TOKENS_DISTRIBUTED));
        let hourly_count = hourly
            .iter()
            .fold(U256::ZERO, |acc, r| acc + r.get(faucet::NATIVE_TOKENS_DISTRIBUTED_COUNT));
        prop_assert_eq!(hourly_total, U256::from(total));
        prop_assert_eq!(hourly_count, U256::from(events.len()));

        for record in &hourly {
            prop_assert_eq!(record.bucket_start % 3600, 0);
        }
    }
}
