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

mod chain_data;
mod core;

use std::{collections::HashMap, sync::Arc};

use alloy::{
    primitives::Address,
    providers::{
        fillers::{ChainIdFiller, FillProvider, JoinFill},
        Identity, ProviderBuilder, RootProvider,
    },
    transports::{RpcError, TransportErrorKind},
};
use thiserror::Error;
use tokio::time::Duration;
use url::Url;

use crate::db::{AnyDb, DbError, DbObj};
use crate::processor::{EventProcessor, ProcessError};
use crate::rollup::RollupError;

type ProviderWallet = FillProvider<JoinFill<Identity, ChainIdFiller>, RootProvider>;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] DbError),

    #[error("Rollup error: {0}")]
    RollupError(#[from] RollupError),

    #[error("RPC error: {0}")]
    RpcError(#[from] RpcError<TransportErrorKind>),

    #[error("Error: {0}")]
    Error(#[from] anyhow::Error),

    #[error("Maximum retries reached")]
    MaxRetries,
}

/// Contracts whose logs are indexed. Unset entries are not queried.
#[derive(Clone, Debug, Default)]
pub struct ContractAddresses {
    pub faucet: Option<Address>,
    pub message_service: Option<Address>,
    pub token_bridge: Option<Address>,
}

impl ContractAddresses {
    pub fn to_vec(&self) -> Vec<Address> {
        [self.faucet, self.message_service, self.token_bridge].into_iter().flatten().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.to_vec().is_empty()
    }
}

#[derive(Clone)]
pub struct IndexerServiceConfig {
    pub interval: Duration,
    pub retries: u32,
    pub batch_size: u64,
    pub contracts: ContractAddresses,
}

pub struct IndexerService<P> {
    pub provider: P,
    pub db: DbObj,
    pub processor: EventProcessor,
    pub config: IndexerServiceConfig,
    // Mapping from block number to timestamp
    pub block_num_to_timestamp: HashMap<u64, u64>,
}

impl IndexerService<ProviderWallet> {
    pub async fn new(
        rpc_url: Url,
        db_conn: &str,
        config: IndexerServiceConfig,
    ) -> Result<Self, ServiceError> {
        let provider = ProviderBuilder::new()
            .disable_recommended_fillers()
            .filler(ChainIdFiller::default())
            .connect_http(rpc_url);
        let db: DbObj = Arc::new(AnyDb::new(db_conn).await?);

        Ok(Self::from_parts(provider, db, config))
    }
}

impl<P> IndexerService<P> {
    pub fn from_parts(provider: P, db: DbObj, config: IndexerServiceConfig) -> Self {
        Self {
            provider,
            processor: EventProcessor::new(db.clone()),
            db,
            config,
            block_num_to_timestamp: HashMap::new(),
        }
    }
}

impl From<ProcessError> for ServiceError {
    fn from(err: ProcessError) -> Self {
        match err {
            ProcessError::Rollup(RollupError::DatabaseError(e)) => ServiceError::DatabaseError(e),
            ProcessError::Rollup(e) => ServiceError::RollupError(e),
            ProcessError::Decode(e) => ServiceError::Error(e.into()),
        }
    }
}
