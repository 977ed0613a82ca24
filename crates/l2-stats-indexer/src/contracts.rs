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

//! ABI definitions of the L2 contracts whose events are indexed.

use alloy::{primitives::B256, sol_types::SolEvent};

alloy::sol! {
    #[sol(all_derives)]
    interface IL2Faucet {
        event TokensDistributed(address indexed recipient, address indexed token, uint256 amount);
        event NativeTokensDistributed(address indexed recipient, uint256 amount);
    }

    #[sol(all_derives)]
    interface IL2MessageService {
        event MessageSent(
            address indexed _from,
            address indexed _to,
            uint256 _fee,
            uint256 _value,
            uint256 _nonce,
            bytes _calldata,
            bytes32 indexed _messageHash
        );
        event MessageClaimed(bytes32 indexed _messageHash);
        event RollingHashUpdated(uint256 indexed messageNumber, bytes32 indexed rollingHash);
        event L1L2MessageHashesAddedToInbox(bytes32[] messageHashes);
    }

    #[sol(all_derives)]
    interface IL2TokenBridge {
        event BridgingInitiatedV2(
            address indexed sender,
            address indexed recipient,
            address indexed token,
            uint256 amount
        );
        event BridgingFinalized(
            address indexed nativeToken,
            address indexed bridgedToken,
            uint256 amount,
            address indexed recipient
        );
        event NewTokenDeployed(address bridgedToken, address nativeToken);
    }

    #[sol(all_derives)]
    interface ITransparentUpgradeableProxy {
        event Upgraded(address indexed implementation);
        event AdminChanged(address previousAdmin, address newAdmin);
    }
}

/// Event signatures that are fetched from the chain and decoded.
pub const INDEXED_EVENT_SIGNATURES: &[B256] = &[
    IL2Faucet::TokensDistributed::SIGNATURE_HASH,
    IL2Faucet::NativeTokensDistributed::SIGNATURE_HASH,
    IL2MessageService::MessageSent::SIGNATURE_HASH,
    IL2MessageService::MessageClaimed::SIGNATURE_HASH,
    IL2MessageService::RollingHashUpdated::SIGNATURE_HASH,
    IL2MessageService::L1L2MessageHashesAddedToInbox::SIGNATURE_HASH,
    IL2TokenBridge::BridgingInitiatedV2::SIGNATURE_HASH,
    IL2TokenBridge::BridgingFinalized::SIGNATURE_HASH,
    IL2TokenBridge::NewTokenDeployed::SIGNATURE_HASH,
    ITransparentUpgradeableProxy::Upgraded::SIGNATURE_HASH,
    ITransparentUpgradeableProxy::AdminChanged::SIGNATURE_HASH,
];
