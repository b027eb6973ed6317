// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Concurrent cache of entity descriptors.
//!
//! Descriptors are built at most once per `(class id, kind)` in the steady
//! state. The build itself runs without any lock held; when two threads race
//! on the same key, the first insert wins and the other result is dropped.
//! Failed builds are not cached.

use super::class::ClassId;
use super::descriptor::EntityDescriptor;
use super::markers::MappingKind;
use crate::error::Result;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Instant;

/// Identifies a descriptor: class identity and requested mapping kind.
pub type DescriptorKey = (ClassId, MappingKind);

/// Cache hit/miss statistics.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    /// Builds that lost the race against a concurrent build of the same key.
    pub discarded: u64,
    pub last_build_ns: u64,
}

/// Process-lifetime store of published descriptors.
#[derive(Default)]
pub struct DescriptorCache {
    entries: DashMap<DescriptorKey, Arc<EntityDescriptor>>,
    stats: RwLock<CacheStats>,
}

impl DescriptorCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Published descriptor for `key`, if any.
    pub fn get(&self, key: &DescriptorKey) -> Option<Arc<EntityDescriptor>> {
        self.entries.get(key).map(|entry| Arc::clone(entry.value()))
    }

    pub fn get_or_try_build<F>(&self, key: DescriptorKey, build: F) -> Result<Arc<EntityDescriptor>>
    where
        F: FnOnce() -> Result<EntityDescriptor>,
    {
        if let Some(hit) = self.get(&key) {
            self.record_hit();
            return Ok(hit);
        }

        let start = Instant::now();
        let built = Arc::new(build()?);

        match self.entries.entry(key) {
            Entry::Occupied(published) => {
                log::debug!(
                    "[mapping] discarding duplicate {} descriptor for {}",
                    published.key().1,
                    built.class_name()
                );
                self.record_discard();
                Ok(Arc::clone(published.get()))
            }
            Entry::Vacant(slot) => {
                log::debug!(
                    "[mapping] publishing {} descriptor for {}",
                    slot.key().1,
                    built.class_name()
                );
                slot.insert(Arc::clone(&built));
                self.record_miss(start);
                Ok(built)
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn stats(&self) -> CacheStats {
        *self.stats.read()
    }

    fn record_hit(&self) {
        let mut stats = self.stats.write();
        stats.hits = stats.hits.saturating_add(1);
    }

    fn record_miss(&self, start: Instant) {
        let mut stats = self.stats.write();
        stats.misses = stats.misses.saturating_add(1);
        stats.last_build_ns = start.elapsed().as_nanos() as u64;
    }

    fn record_discard(&self) {
        let mut stats = self.stats.write();
        stats.discarded = stats.discarded.saturating_add(1);
    }
}
