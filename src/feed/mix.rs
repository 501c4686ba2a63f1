// src/feed/mix.rs
//! The repeating interleave pattern: which provider owns which feed position.

use anyhow::{bail, Result};

use crate::feed::types::ProviderId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedMix {
    entries: Vec<ProviderId>,
}

impl FeedMix {
    pub fn new(entries: Vec<ProviderId>) -> Result<Self> {
        if entries.is_empty() {
            bail!("feed mix must contain at least one provider");
        }
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // Never true: construction rejects empty mixes.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[ProviderId] {
        &self.entries
    }

    /// Provider governing absolute feed `position`.
    pub fn provider_at(&self, position: usize) -> &ProviderId {
        &self.entries[position % self.entries.len()]
    }

    /// Provider for the `i`-th slot of a window starting at `offset`.
    /// Reduces `offset` first so huge offsets cannot overflow.
    pub fn provider_for(&self, offset: usize, i: usize) -> &ProviderId {
        let len = self.entries.len();
        &self.entries[(offset % len + i % len) % len]
    }
}

impl Default for FeedMix {
    fn default() -> Self {
        let entries = [
            "provider1",
            "provider1",
            "provider2",
            "provider3",
            "provider1",
            "provider1",
            "provider2",
            "provider3",
        ]
        .into_iter()
        .map(ProviderId::from)
        .collect();
        Self { entries }
    }
}
