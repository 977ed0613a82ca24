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

use alloy::eips::BlockNumberOrTag;
use alloy::providers::Provider;
use alloy::rpc::types::{Filter, Log};
use anyhow::{anyhow, Context};

use super::{IndexerService, ServiceError};
use crate::contracts::INDEXED_EVENT_SIGNATURES;

impl<P> IndexerService<P>
where
    P: Provider + 'static + Clone,
{
    pub(super) async fn fetch_logs(&self, from: u64, to: u64) -> Result<Vec<Log>, ServiceError> {
        let start = std::time::Instant::now();

        let filter = Filter::new()
            .address(self.config.contracts.to_vec())
            .from_block(from)
            .to_block(to)
            .event_signature(INDEXED_EVENT_SIGNATURES.to_vec());

        tracing::debug!("Fetching logs from RPC: block {} to block {}", from, to);

        let logs = self.provider.get_logs(&filter).await?;

        tracing::debug!(
            "Fetched {} logs from block {} to {} in {:?}",
            logs.len(),
            from,
            to,
            start.elapsed()
        );
        Ok(logs)
    }

    pub async fn block_timestamp(&mut self, block_number: u64) -> Result<u64, ServiceError> {
        if let Some(ts) = self.block_num_to_timestamp.get(&block_number) {
            return Ok(*ts);
        }

        let ts = match self.db.get_block_timestamp(block_number).await? {
            Some(ts) => ts,
            None => {
                tracing::debug!("Block timestamp not found in DB for block {}", block_number);
                let ts = self
                    .provider
                    .get_block_by_number(BlockNumberOrTag::Number(block_number))
                    .await?
                    .context(anyhow!("Failed to get block by number: {}", block_number))?
                    .header
                    .timestamp;
                self.db.add_block(block_number, ts).await?;
                ts
            }
        };
        self.block_num_to_timestamp.insert(block_number, ts);
        Ok(ts)
    }

    /// Fills in `block_timestamp` for logs whose RPC response omitted it.
    pub(super) async fn backfill_timestamps(
        &mut self,
        logs: &mut [Log],
    ) -> Result<(), ServiceError> {
        for log in logs.iter_mut().filter(|log| log.block_timestamp.is_none()) {
            let Some(block_number) = log.block_number else {
                continue;
            };
            log.block_timestamp = Some(self.block_timestamp(block_number).await?);
        }
        Ok(())
    }

    pub(super) async fn current_block(&self) -> Result<u64, ServiceError> {
        Ok(self.provider.get_block_number().await?)
    }
}
