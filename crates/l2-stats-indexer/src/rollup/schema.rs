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

//! Accumulator schemas of the metric families.

use std::fmt;

use super::time_boundaries::BucketWidth;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MetricFamily {
    Faucet,
    Messaging,
    Bridging,
}

impl MetricFamily {
    pub const fn as_str(self) -> &'static str {
        match self {
            MetricFamily::Faucet => "faucet",
            MetricFamily::Messaging => "message",
            MetricFamily::Bridging => "bridge",
        }
    }
}

impl fmt::Display for MetricFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How an accumulator grows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccumulatorKind {
    /// Sum of an amount field.
    Sum,
    /// Number of contributing events.
    Count,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccumulatorSpec {
    pub name: &'static str,
    pub kind: AccumulatorKind,
}

const fn sum(name: &'static str) -> AccumulatorSpec {
    AccumulatorSpec { name, kind: AccumulatorKind::Sum }
}

const fn count(name: &'static str) -> AccumulatorSpec {
    AccumulatorSpec { name, kind: AccumulatorKind::Count }
}

/// Ordered accumulator set shared by every bucket of one metric family.
#[derive(Debug, PartialEq, Eq)]
pub struct FamilySchema {
    pub family: MetricFamily,
    pub accumulators: &'static [AccumulatorSpec],
}

impl FamilySchema {
    pub fn contains(&self, name: &str) -> bool {
        self.accumulators.iter().any(|spec| spec.name == name)
    }

    pub fn spec(&self, name: &str) -> Option<&AccumulatorSpec> {
        self.accumulators.iter().find(|spec| spec.name == name)
    }

    pub fn namespace(&self, width: BucketWidth) -> RollupNamespace {
        RollupNamespace { family: self.family, width }
    }
}

/// One independent bucket space: a metric family at one bucket width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RollupNamespace {
    pub family: MetricFamily,
    pub width: BucketWidth,
}

impl RollupNamespace {
    pub fn new(family: MetricFamily, width: BucketWidth) -> Self {
        Self { family, width }
    }

    /// Stable name of the namespace, e.g. `daily_faucet_stats`.
    pub fn name(&self) -> String {
        format!("{}_{}_stats", self.width.prefix(), self.family.as_str())
    }
}

impl fmt::Display for RollupNamespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

pub mod faucet {
    pub const TOTAL_TOKENS_DISTRIBUTED: &str = "totalTokensDistributed";
    pub const TOTAL_NATIVE_TOKENS_DISTRIBUTED: &str = "totalNativeTokensDistributed";
    pub const TOKENS_DISTRIBUTED_COUNT: &str = "tokensDistributedCount";
    pub const NATIVE_TOKENS_DISTRIBUTED_COUNT: &str = "nativeTokensDistributedCount";
}

pub mod messaging {
    pub const TOTAL_MESSAGES_SENT: &str = "totalMessagesSent";
    pub const TOTAL_MESSAGES_RECEIVED: &str = "totalMessagesReceived";
    pub const TOTAL_MESSAGES_CLAIMED: &str = "totalMessagesClaimed";
    pub const TOTAL_ROLLING_HASH_UPDATES: &str = "totalRollingHashUpdates";
    pub const TOTAL_L1L2_MESSAGE_HASHES_ADDED_TO_INBOX: &str = "totalL1L2MessageHashesAddedToInbox";
    pub const MESSAGES_SENT_COUNT: &str = "messagesSentCount";
    pub const MESSAGES_RECEIVED_COUNT: &str = "messagesReceivedCount";
    pub const MESSAGES_CLAIMED_COUNT: &str = "messagesClaimedCount";
    pub const ROLLING_HASH_UPDATES_COUNT: &str = "rollingHashUpdatesCount";
    pub const L1L2_MESSAGE_HASHES_ADDED_TO_INBOX_COUNT: &str = "l1L2MessageHashesAddedToInboxCount";
}

pub mod bridging {
    pub const TOTAL_BRIDGING_INITIATED: &str = "totalBridgingInitiated";
    pub const TOTAL_BRIDGING_FINALIZED: &str = "totalBridgingFinalized";
    pub const BRIDGING_INITIATED_COUNT: &str = "bridgingInitiatedCount";
    pub const BRIDGING_FINALIZED_COUNT: &str = "bridgingFinalizedCount";
}

pub static FAUCET_SCHEMA: FamilySchema = FamilySchema {
    family: MetricFamily::Faucet,
    accumulators: &[
        sum(faucet::TOTAL_TOKENS_DISTRIBUTED),
        sum(faucet::TOTAL_NATIVE_TOKENS_DISTRIBUTED),
        count(faucet::TOKENS_DISTRIBUTED_COUNT),
        count(faucet::NATIVE_TOKENS_DISTRIBUTED_COUNT),
    ],
};

// The "total" members count events as well; the inbox pair grows by the batch size.
pub static MESSAGING_SCHEMA: FamilySchema = FamilySchema {
    family: MetricFamily::Messaging,
    accumulators: &[
        sum(messaging::TOTAL_MESSAGES_SENT),
        sum(messaging::TOTAL_MESSAGES_RECEIVED),
        sum(messaging::TOTAL_MESSAGES_CLAIMED),
        sum(messaging::TOTAL_ROLLING_HASH_UPDATES),
        sum(messaging::TOTAL_L1L2_MESSAGE_HASHES_ADDED_TO_INBOX),
        count(messaging::MESSAGES_SENT_COUNT),
        count(messaging::MESSAGES_RECEIVED_COUNT),
        count(messaging::MESSAGES_CLAIMED_COUNT),
        count(messaging::ROLLING_HASH_UPDATES_COUNT),
        count(messaging::L1L2_MESSAGE_HASHES_ADDED_TO_INBOX_COUNT),
    ],
};

pub static BRIDGING_SCHEMA: FamilySchema = FamilySchema {
    family: MetricFamily::Bridging,
    accumulators: &[
        sum(bridging::TOTAL_BRIDGING_INITIATED),
        sum(bridging::TOTAL_BRIDGING_FINALIZED),
        count(bridging::BRIDGING_INITIATED_COUNT),
        count(bridging::BRIDGING_FINALIZED_COUNT),
    ],
};
