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

use std::cmp::min;

use alloy::{providers::Provider, rpc::types::Log};

use super::{IndexerService, ServiceError};
use crate::events::{decode_log, DecodeError};

impl<P> IndexerService<P>
where
    P: Provider + 'static + Clone,
{
    pub async fn run(
        &mut self,
        starting_block: Option<u64>,
        end_block: Option<u64>,
    ) -> Result<(), ServiceError> {
        let mut interval = tokio::time::interval(self.config.interval);
        let mut from_block: u64 = self.starting_block(starting_block).await?;

        if let Some(end) = end_block {
            if end < from_block {
                if self.get_last_processed_block().await?.is_some_and(|last| last >= end) {
                    tracing::info!("Already processed up to end block {}, exiting", end);
                    return Ok(());
                }
                return Err(ServiceError::Error(anyhow::anyhow!(
                    "End block {} is less than starting block {}",
                    end,
                    from_block
                )));
            }
            tracing::info!("Starting indexer at block {} (will stop at block {})", from_block, end);
        } else {
            tracing::info!("Starting indexer at block {}", from_block);
        }

        let mut attempt = 0;
        loop {
            interval.tick().await;

            let max_block = match self.current_block().await {
                Ok(to_block) => match end_block {
                    Some(end) => min(to_block, end),
                    None => to_block,
                },
                Err(e) => {
                    attempt += 1;
                    tracing::warn!(
                        "Failed to fetch current block: {:?}, attempt number {}",
                        e,
                        attempt
                    );
                    if attempt > self.config.retries {
                        tracing::error!("Aborting after {} consecutive attempts", attempt);
                        return Err(ServiceError::MaxRetries);
                    }
                    continue;
                }
            };

            if max_block < from_block {
                if end_block.is_some_and(|end| from_block > end) {
                    tracing::info!("Reached end block, exiting");
                    return Ok(());
                }
                continue;
            }

            // cap to at most batch_size blocks per batch
            let batch_end = min(max_block, from_block.saturating_add(self.config.batch_size));

            let start = std::time::Instant::now();
            match self.process_blocks(from_block, batch_end).await {
                Ok(processed) => {
                    tracing::info!(
                        "process_blocks completed in {:?} [num_blocks={}, num_events={}]",
                        start.elapsed(),
                        batch_end - from_block + 1,
                        processed
                    );
                    attempt = 0;
                    from_block = batch_end + 1;
                    if let Some(end) = end_block {
                        if from_block > end {
                            tracing::info!("Reached end block {}, exiting", end);
                            return Ok(());
                        }
                    }
                }
                Err(e) => match e {
                    // Irrecoverable errors
                    ServiceError::DatabaseError(_)
                    | ServiceError::RollupError(_)
                    | ServiceError::MaxRetries
                    | ServiceError::Error(_) => {
                        tracing::error!(
                            "Failed to process blocks from {} to {}: {:?}",
                            from_block,
                            batch_end,
                            e
                        );
                        return Err(e);
                    }
                    // Recoverable errors
                    ServiceError::RpcError(_) => {
                        attempt += 1;
                        // exponential backoff with a maximum delay of 120 seconds
                        let delay = std::time::Duration::from_secs(2u64.pow(attempt - 1).min(120));
                        tracing::warn!(
                            "Failed to process blocks from {} to {}: {:?}, attempt number {}, \
                             retrying in {}s",
                            from_block,
                            batch_end,
                            e,
                            attempt,
                            delay.as_secs()
                        );
                        tokio::time::sleep(delay).await;
                    }
                },
            }
            if attempt > self.config.retries {
                tracing::error!("Aborting after {} consecutive attempts", attempt);
                return Err(ServiceError::MaxRetries);
            }
        }
    }

    /// Applies every indexed event between `from` and `to` (inclusive) in chain order and
    /// advances the cursor to `to`. Returns the number of events applied.
    pub async fn process_blocks(&mut self, from: u64, to: u64) -> Result<usize, ServiceError> {
        tracing::info!("=== Processing blocks from {} to {} ===", from, to);

        let mut logs = self.fetch_logs(from, to).await?;
        sort_logs(&mut logs);
        for log in &logs {
            if let (Some(number), Some(ts)) = (log.block_number, log.block_timestamp) {
                self.block_num_to_timestamp.entry(number).or_insert(ts);
            }
        }
        self.backfill_timestamps(&mut logs).await?;

        let mut processed = 0;
        for log in &logs {
            let event = match decode_log(log) {
                Ok(event) => event,
                Err(e) => {
                    log_skipped(log, &e);
                    continue;
                }
            };
            self.processor.process(&event).await?;
            processed += 1;
        }

        self.update_last_processed_block(to).await?;
        self.block_num_to_timestamp.clear();
        Ok(processed)
    }

    async fn get_last_processed_block(&self) -> Result<Option<u64>, ServiceError> {
        Ok(self.db.get_last_block().await?)
    }

    async fn update_last_processed_block(&self, block_number: u64) -> Result<(), ServiceError> {
        self.db.set_last_block(block_number).await?;
        tracing::debug!("Updated last processed block to {}", block_number);
        Ok(())
    }

    async fn starting_block(&self, starting_block: Option<u64>) -> Result<u64, ServiceError> {
        let last_processed = self.get_last_processed_block().await?;
        let current_block = self.current_block().await?;
        Ok(find_starting_block(starting_block, last_processed, current_block))
    }
}

/// Chain order: block number, then transaction index, then log index.
fn sort_logs(logs: &mut [Log]) {
    logs.sort_by_key(|log| (log.block_number, log.transaction_index, log.log_index));
}

fn log_skipped(log: &Log, err: &DecodeError) {
    tracing::warn!(
        "Skipping log at block {:?} tx {:?} index {:?}: {}",
        log.block_number,
        log.transaction_hash,
        log.log_index,
        err
    );
}

fn find_starting_block(
    starting_block: Option<u64>,
    last_processed: Option<u64>,
    current_block: u64,
) -> u64 {
    if let Some(last) = last_processed.filter(|&b| b > 0) {
        // Blocks up to the cursor are already applied. `run` waits for the head to reach `start`.
        let start = last + 1;
        tracing::info!("Using last processed block {} as starting block (next: {})", last, start);
        return start;
    }

    let from = starting_block.unwrap_or(current_block);
    if from > current_block {
        tracing::warn!(
            "Starting block {} is greater than current block {}, defaulting to current block",
            from,
            current_block
        );
        current_block
    } else {
        tracing::info!("Using {} as starting block", from);
        from
    }
}
