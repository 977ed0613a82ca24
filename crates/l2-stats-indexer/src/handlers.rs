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

//! Per-family mapping of decoded events to a fact record and rollup deltas.

use alloy::primitives::{Address, U256};

use crate::events::{ChainEvent, IndexedEvent};
use crate::facts::{FactPayload, FactRecord};
use crate::rollup::{
    schema::{bridging, faucet, messaging},
    Deltas, FamilySchema, BRIDGING_SCHEMA, FAUCET_SCHEMA, MESSAGING_SCHEMA,
};

/// Deltas to apply to the day and hour buckets of one family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollupUpdate {
    pub schema: &'static FamilySchema,
    pub deltas: Deltas,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandledEvent {
    pub fact: FactRecord,
    /// `None` for events that only produce a fact.
    pub rollup: Option<RollupUpdate>,
}

pub fn handle_event(event: &IndexedEvent) -> HandledEvent {
    let (payload, rollup) = match &event.event {
        ChainEvent::TokensDistributed(e) => (
            FactPayload::TokensDistributed {
                recipient: e.recipient,
                token: e.token,
                amount: e.amount,
            },
            Some(faucet_update(
                faucet::TOTAL_TOKENS_DISTRIBUTED,
                faucet::TOKENS_DISTRIBUTED_COUNT,
                e.amount,
            )),
        ),
        ChainEvent::NativeTokensDistributed(e) => (
            FactPayload::NativeTokensDistributed { recipient: e.recipient, amount: e.amount },
            Some(faucet_update(
                faucet::TOTAL_NATIVE_TOKENS_DISTRIBUTED,
                faucet::NATIVE_TOKENS_DISTRIBUTED_COUNT,
                e.amount,
            )),
        ),
        ChainEvent::MessageSent(e) => (
            FactPayload::MessageSent {
                from: e._from,
                to: e._to,
                fee: e._fee,
                value: e._value,
                nonce: e._nonce,
                calldata: e._calldata.clone(),
                message_hash: e._messageHash,
            },
            Some(message_update(
                messaging::TOTAL_MESSAGES_SENT,
                messaging::MESSAGES_SENT_COUNT,
                U256::from(1),
            )),
        ),
        ChainEvent::MessageReceived { message_hash } => (
            FactPayload::MessageReceived { message_hash: *message_hash },
            Some(message_update(
                messaging::TOTAL_MESSAGES_RECEIVED,
                messaging::MESSAGES_RECEIVED_COUNT,
                U256::from(1),
            )),
        ),
        ChainEvent::MessageClaimed(e) => (
            FactPayload::MessageClaimed { message_hash: e._messageHash },
            Some(message_update(
                messaging::TOTAL_MESSAGES_CLAIMED,
                messaging::MESSAGES_CLAIMED_COUNT,
                U256::from(1),
            )),
        ),
        ChainEvent::RollingHashUpdated(e) => (
            FactPayload::RollingHashUpdated {
                message_number: e.messageNumber,
                rolling_hash: e.rollingHash,
            },
            Some(message_update(
                messaging::TOTAL_ROLLING_HASH_UPDATES,
                messaging::ROLLING_HASH_UPDATES_COUNT,
                U256::from(1),
            )),
        ),
        ChainEvent::L1L2MessageHashesAddedToInbox(e) => (
            FactPayload::L1L2MessageHashesAddedToInbox { message_hashes: e.messageHashes.clone() },
            Some(message_update(
                messaging::TOTAL_L1L2_MESSAGE_HASHES_ADDED_TO_INBOX,
                messaging::L1L2_MESSAGE_HASHES_ADDED_TO_INBOX_COUNT,
                U256::from(e.messageHashes.len()),
            )),
        ),
        ChainEvent::BridgingInitiated(e) => (
            FactPayload::BridgingInitiatedV2 {
                sender: e.sender,
                recipient: e.recipient,
                token: e.token,
                amount: e.amount,
            },
            Some(bridge_update(e.amount, U256::ZERO)),
        ),
        ChainEvent::BridgingFinalized(e) => (
            FactPayload::BridgingFinalized {
                native_token: e.nativeToken,
                bridged_token: e.bridgedToken,
                amount: e.amount,
                recipient: e.recipient,
            },
            Some(bridge_update(U256::ZERO, e.amount)),
        ),
        ChainEvent::NewTokenDeployed(e) => (
            FactPayload::NewTokenDeployed {
                bridged_token: e.bridgedToken,
                native_token: e.nativeToken,
            },
            None,
        ),
        ChainEvent::ProxyUpgraded(e) => (
            FactPayload::ProxyUpgraded {
                proxy_address: event.contract,
                // The previous implementation is not part of the event.
                old_implementation: Address::ZERO,
                new_implementation: e.implementation,
            },
            None,
        ),
        ChainEvent::ProxyAdminChanged(e) => (
            FactPayload::AdminChanged {
                proxy_address: event.contract,
                previous_admin: e.previousAdmin,
                new_admin: e.newAdmin,
            },
            None,
        ),
    };

    let fact = FactRecord {
        id: event.meta.fact_id(),
        contract: event.contract,
        block_number: event.meta.block_number,
        timestamp: event.meta.block_timestamp,
        transaction_hash: event.meta.tx_hash,
        payload,
    };

    HandledEvent { fact, rollup }
}

fn faucet_update(total: &'static str, count: &'static str, amount: U256) -> RollupUpdate {
    RollupUpdate {
        schema: &FAUCET_SCHEMA,
        deltas: Deltas::new().with(total, amount).with(count, U256::from(1)),
    }
}

/// Both members of a messaging pair grow by `n`.
fn message_update(total: &'static str, count: &'static str, n: U256) -> RollupUpdate {
    RollupUpdate { schema: &MESSAGING_SCHEMA, deltas: Deltas::new().with(total, n).with(count, n) }
}

// Counts only move for strictly positive amounts, in both directions.
fn bridge_update(initiated: U256, finalized: U256) -> RollupUpdate {
    let count_if_positive =
        |amount: U256| if amount > U256::ZERO { U256::from(1) } else { U256::ZERO };
    RollupUpdate {
        schema: &BRIDGING_SCHEMA,
        deltas: Deltas::new()
            .with(bridging::TOTAL_BRIDGING_INITIATED, initiated)
            .with(bridging::TOTAL_BRIDGING_FINALIZED, finalized)
            .with(bridging::BRIDGING_INITIATED_COUNT, count_if_positive(initiated))
            .with(bridging::BRIDGING_FINALIZED_COUNT, count_if_positive(finalized)),
    }
}
