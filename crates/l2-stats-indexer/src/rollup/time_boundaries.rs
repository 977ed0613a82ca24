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

//! Bucket key derivation for the day and hour rollups.
//!
//! A bucket index is `timestamp / width` using truncating integer division. The index is
//! persisted as a 4-byte little-endian `i32`, which is the identity of the bucket inside one
//! rollup namespace. Day and hour identities live in separate namespaces and are never
//! compared with each other.

use std::{fmt, str::FromStr};

pub const SECONDS_PER_HOUR: u64 = 3600;
pub const SECONDS_PER_DAY: u64 = 86400;

/// Width of a rollup bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BucketWidth {
    Day,
    Hour,
}

impl BucketWidth {
    /// Both widths, in the order rollups are applied for an event.
    pub const ALL: [BucketWidth; 2] = [BucketWidth::Day, BucketWidth::Hour];

    pub const fn seconds(self) -> u64 {
        match self {
            BucketWidth::Day => SECONDS_PER_DAY,
            BucketWidth::Hour => SECONDS_PER_HOUR,
        }
    }

    /// Prefix of the rollup namespaces using this width.
    pub const fn prefix(self) -> &'static str {
        match self {
            BucketWidth::Day => "daily",
            BucketWidth::Hour => "hourly",
        }
    }

    /// Bucket index of `timestamp`.
    ///
    /// Indexes past `i32::MAX` cannot be represented in the stored encoding and are out of
    /// range for real chain timestamps.
    pub fn index(self, timestamp: u64) -> i32 {
        (timestamp / self.seconds()) as i32
    }

    pub fn bucket_id(self, timestamp: u64) -> BucketId {
        BucketId::from_index(self.index(timestamp))
    }

    /// Start of the bucket containing `timestamp`, i.e. `index * width`.
    pub fn bucket_start(self, timestamp: u64) -> u64 {
        (timestamp / self.seconds()) * self.seconds()
    }
}

impl fmt::Display for BucketWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BucketWidth::Day => write!(f, "day"),
            BucketWidth::Hour => write!(f, "hour"),
        }
    }
}

/// Persisted identity of a bucket: the bucket index as little-endian `i32` bytes.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BucketId([u8; 4]);

impl BucketId {
    pub fn from_index(index: i32) -> Self {
        Self(index.to_le_bytes())
    }

    pub fn index(&self) -> i32 {
        i32::from_le_bytes(self.0)
    }

    pub fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }
}

impl From<[u8; 4]> for BucketId {
    fn from(bytes: [u8; 4]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for BucketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for BucketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BucketId({}, index={})", self, self.index())
    }
}

impl FromStr for BucketId {
    type Err = hex::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bytes = [0u8; 4];
        hex::decode_to_slice(s.strip_prefix("0x").unwrap_or(s), &mut bytes)?;
        Ok(Self(bytes))
    }
}

pub fn day_bucket_id(timestamp: u64) -> BucketId {
    BucketWidth::Day.bucket_id(timestamp)
}

pub fn hour_bucket_id(timestamp: u64) -> BucketId {
    BucketWidth::Hour.bucket_id(timestamp)
}
