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

//! Typed contract events and their decoding from RPC logs.

use alloy::{
    primitives::{Address, B256},
    rpc::types::Log,
    sol_types::SolEvent,
};
use thiserror::Error;

use crate::contracts::{IL2Faucet, IL2MessageService, IL2TokenBridge, ITransparentUpgradeableProxy};
use crate::facts::FactId;

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Log has no event signature")]
    MissingSignature,

    #[error("Unknown event signature 0x{0:x}")]
    UnknownEvent(B256),

    #[error("Failed to decode {event} log: {source}")]
    Abi {
        event: &'static str,
        #[source]
        source: alloy::sol_types::Error,
    },

    #[error("Log is missing {0}")]
    MissingField(&'static str),
}

/// Position of an event in the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventMeta {
    pub block_number: u64,
    pub block_timestamp: u64,
    pub tx_hash: B256,
    pub transaction_index: u64,
    pub log_index: u64,
}

impl EventMeta {
    pub fn new(
        block_number: u64,
        block_timestamp: u64,
        tx_hash: B256,
        transaction_index: u64,
        log_index: u64,
    ) -> Self {
        Self { block_number, block_timestamp, tx_hash, transaction_index, log_index }
    }

    pub fn fact_id(&self) -> FactId {
        FactId::new(self.tx_hash, self.log_index)
    }

    pub fn from_log(log: &Log) -> Result<Self, DecodeError> {
        Ok(Self {
            block_number: log.block_number.ok_or(DecodeError::MissingField("block number"))?,
            block_timestamp: log
                .block_timestamp
                .ok_or(DecodeError::MissingField("block timestamp"))?,
            tx_hash: log.transaction_hash.ok_or(DecodeError::MissingField("transaction hash"))?,
            transaction_index: log
                .transaction_index
                .ok_or(DecodeError::MissingField("transaction index"))?,
            log_index: log.log_index.ok_or(DecodeError::MissingField("log index"))?,
        })
    }
}

/// Every event kind handled by the indexer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainEvent {
    TokensDistributed(IL2Faucet::TokensDistributed),
    NativeTokensDistributed(IL2Faucet::NativeTokensDistributed),
    MessageSent(IL2MessageService::MessageSent),
    /// Delivery of an L1 message on L2. The message service ABI has no log for it, so it is
    /// only produced by callers that observe deliveries through other means.
    MessageReceived { message_hash: B256 },
    MessageClaimed(IL2MessageService::MessageClaimed),
    RollingHashUpdated(IL2MessageService::RollingHashUpdated),
    L1L2MessageHashesAddedToInbox(IL2MessageService::L1L2MessageHashesAddedToInbox),
    BridgingInitiated(IL2TokenBridge::BridgingInitiatedV2),
    BridgingFinalized(IL2TokenBridge::BridgingFinalized),
    NewTokenDeployed(IL2TokenBridge::NewTokenDeployed),
    ProxyUpgraded(ITransparentUpgradeableProxy::Upgraded),
    ProxyAdminChanged(ITransparentUpgradeableProxy::AdminChanged),
}

/// A decoded event together with where it was emitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedEvent {
    pub contract: Address,
    pub meta: EventMeta,
    pub event: ChainEvent,
}

impl IndexedEvent {
    pub fn timestamp(&self) -> u64 {
        self.meta.block_timestamp
    }
}

fn decode<E: SolEvent>(log: &Log) -> Result<E, DecodeError> {
    let decoded =
        log.log_decode::<E>().map_err(|source| DecodeError::Abi { event: E::SIGNATURE, source })?;
    Ok(decoded.inner.data)
}

/// Decodes a log of one of the indexed contracts.
pub fn decode_log(log: &Log) -> Result<IndexedEvent, DecodeError> {
    let signature = *log.topic0().ok_or(DecodeError::MissingSignature)?;

    let event = if signature == IL2Faucet::TokensDistributed::SIGNATURE_HASH {
        ChainEvent::TokensDistributed(decode(log)?)
    } else if signature == IL2Faucet::NativeTokensDistributed::SIGNATURE_HASH {
        ChainEvent::NativeTokensDistributed(decode(log)?)
    } else if signature == IL2MessageService::MessageSent::SIGNATURE_HASH {
        ChainEvent::MessageSent(decode(log)?)
    } else if signature == IL2MessageService::MessageClaimed::SIGNATURE_HASH {
        ChainEvent::MessageClaimed(decode(log)?)
    } else if signature == IL2MessageService::RollingHashUpdated::SIGNATURE_HASH {
        ChainEvent::RollingHashUpdated(decode(log)?)
    } else if signature == IL2MessageService::L1L2MessageHashesAddedToInbox::SIGNATURE_HASH {
        ChainEvent::L1L2MessageHashesAddedToInbox(decode(log)?)
    } else if signature == IL2TokenBridge::BridgingInitiatedV2::SIGNATURE_HASH {
        ChainEvent::BridgingInitiated(decode(log)?)
    } else if signature == IL2TokenBridge::BridgingFinalized::SIGNATURE_HASH {
        ChainEvent::BridgingFinalized(decode(log)?)
    } else if signature == IL2TokenBridge::NewTokenDeployed::SIGNATURE_HASH {
        ChainEvent::NewTokenDeployed(decode(log)?)
    } else if signature == ITransparentUpgradeableProxy::Upgraded::SIGNATURE_HASH {
        ChainEvent::ProxyUpgraded(decode(log)?)
    } else if signature == ITransparentUpgradeableProxy::AdminChanged::SIGNATURE_HASH {
        ChainEvent::ProxyAdminChanged(decode(log)?)
    } else {
        return Err(DecodeError::UnknownEvent(signature));
    };

    Ok(IndexedEvent { contract: log.inner.address, meta: EventMeta::from_log(log)?, event })
}
