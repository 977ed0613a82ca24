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

//! Write-once records of individual contract events.

use std::{fmt, str::FromStr};

use alloy::primitives::{Address, Bytes, B256, U256};
use serde::{Deserialize, Serialize};

/// Identity of a fact: the transaction hash followed by the log index as little-endian `i32`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct FactId([u8; 36]);

impl FactId {
    pub fn new(tx_hash: B256, log_index: u64) -> Self {
        let mut bytes = [0u8; 36];
        bytes[..32].copy_from_slice(tx_hash.as_slice());
        bytes[32..].copy_from_slice(&(log_index as i32).to_le_bytes());
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 36] {
        &self.0
    }
}

impl fmt::Display for FactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for FactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FactId({self})")
    }
}

impl FromStr for FactId {
    type Err = hex::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bytes = [0u8; 36];
        hex::decode_to_slice(s.strip_prefix("0x").unwrap_or(s), &mut bytes)?;
        Ok(Self(bytes))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactRecord {
    pub id: FactId,
    /// Address of the contract that emitted the event.
    pub contract: Address,
    pub block_number: u64,
    pub timestamp: u64,
    pub transaction_hash: B256,
    pub payload: FactPayload,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all_fields = "camelCase")]
pub enum FactPayload {
    TokensDistributed {
        recipient: Address,
        token: Address,
        amount: U256,
    },
    NativeTokensDistributed {
        recipient: Address,
        amount: U256,
    },
    MessageSent {
        from: Address,
        to: Address,
        fee: U256,
        value: U256,
        nonce: U256,
        calldata: Bytes,
        message_hash: B256,
    },
    MessageReceived {
        message_hash: B256,
    },
    MessageClaimed {
        message_hash: B256,
    },
    RollingHashUpdated {
        message_number: U256,
        rolling_hash: B256,
    },
    L1L2MessageHashesAddedToInbox {
        message_hashes: Vec<B256>,
    },
    BridgingInitiatedV2 {
        sender: Address,
        recipient: Address,
        token: Address,
        amount: U256,
    },
    BridgingFinalized {
        native_token: Address,
        bridged_token: Address,
        amount: U256,
        recipient: Address,
    },
    NewTokenDeployed {
        bridged_token: Address,
        native_token: Address,
    },
    ProxyUpgraded {
        proxy_address: Address,
        /// Not emitted by the `Upgraded` event; always [Address::ZERO].
        old_implementation: Address,
        new_implementation: Address,
    },
    AdminChanged {
        proxy_address: Address,
        previous_admin: Address,
        new_admin: Address,
    },
}

impl FactPayload {
    pub fn kind(&self) -> &'static str {
        match self {
            FactPayload::TokensDistributed { .. } => "TokensDistributed",
            FactPayload::NativeTokensDistributed { .. } => "NativeTokensDistributed",
            FactPayload::MessageSent { .. } => "MessageSent",
            FactPayload::MessageReceived { .. } => "MessageReceived",
            FactPayload::MessageClaimed { .. } => "MessageClaimed",
            FactPayload::RollingHashUpdated { .. } => "RollingHashUpdated",
            FactPayload::L1L2MessageHashesAddedToInbox { .. } => "L1L2MessageHashesAddedToInbox",
            FactPayload::BridgingInitiatedV2 { .. } => "BridgingInitiatedV2",
            FactPayload::BridgingFinalized { .. } => "BridgingFinalized",
            FactPayload::NewTokenDeployed { .. } => "NewTokenDeployed",
            FactPayload::ProxyUpgraded { .. } => "ProxyUpgraded",
            FactPayload::AdminChanged { .. } => "AdminChanged",
        }
    }
}
