// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Entry point of the mapping layer.

use super::cache::{CacheStats, DescriptorCache};
use super::class::{ClassDecl, ClassId, Mapped};
use super::descriptor::EntityDescriptor;
use super::markers::MappingKind;
use super::resolver::build_entity_descriptor;
use crate::codec::CodecRegistry;
use crate::config::MappingConfig;
use crate::error::Result;
use crate::mapper::{Mapper, Session, SessionError};
use std::any::TypeId;
use std::sync::Arc;

/// Owns the codec registry, the mapping configuration and the descriptor
/// cache. Share it behind an `Arc`; every method takes `&self`.
pub struct MappingManager {
    registry: Arc<CodecRegistry>,
    config: MappingConfig,
    cache: DescriptorCache,
    session: Option<Arc<dyn Session>>,
}

impl MappingManager {
    pub fn new(registry: Arc<CodecRegistry>) -> Self {
        Self {
            registry,
            config: MappingConfig::default(),
            cache: DescriptorCache::new(),
            session: None,
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: MappingConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn with_session(mut self, session: Arc<dyn Session>) -> Self {
        self.session = Some(session);
        self
    }

    pub fn registry(&self) -> &Arc<CodecRegistry> {
        &self.registry
    }

    pub fn config(&self) -> &MappingConfig {
        &self.config
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Descriptor of `decl` mapped as `kind`, built on first request.
    /// Cached under the declaration's [`ClassId`].
    pub fn descriptor(&self, decl: &ClassDecl, kind: MappingKind) -> Result<Arc<EntityDescriptor>> {
        self.cache.get_or_try_build((decl.id(), kind), || {
            build_entity_descriptor(decl, kind, &self.config)
        })
    }

    /// Descriptor of `T` mapped as `kind`, cached under `TypeId::of::<T>()`.
    pub fn descriptor_for<T: Mapped>(&self, kind: MappingKind) -> Result<Arc<EntityDescriptor>> {
        let key = (ClassId::Type(TypeId::of::<T>()), kind);
        self.cache.get_or_try_build(key, || {
            build_entity_descriptor(&T::class_decl(), kind, &self.config)
        })
    }

    pub fn table_descriptor<T: Mapped>(&self) -> Result<Arc<EntityDescriptor>> {
        self.descriptor_for::<T>(MappingKind::Table)
    }

    pub fn udt_descriptor<T: Mapped>(&self) -> Result<Arc<EntityDescriptor>> {
        self.descriptor_for::<T>(MappingKind::Udt)
    }

    /// Accessor interfaces have no Rust type of their own; pass the declaration.
    pub fn accessor_descriptor(&self, decl: &ClassDecl) -> Result<Arc<EntityDescriptor>> {
        self.descriptor(decl, MappingKind::Accessor)
    }

    /// Save/get/delete mapper over the table mapping of `T`.
    pub fn mapper<T: Mapped + Default>(&self) -> Result<Mapper<T>> {
        let session = self
            .session
            .as_ref()
            .map(Arc::clone)
            .ok_or(SessionError::NotConfigured)?;
        let descriptor = self.table_descriptor::<T>()?;
        Ok(Mapper::new(descriptor, Arc::clone(&self.registry), session))
    }
}
