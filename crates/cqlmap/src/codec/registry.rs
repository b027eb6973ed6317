// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! WireType to codec resolution.
//!
//! The registry is built once (see [`CodecRegistry::builder`]) and is
//! read-only afterwards, so it can be shared across threads behind an `Arc`.
//! Composite codecs are assembled on every call from the shared scalar codecs.

use super::collection::{list_of, map_of, set_of};
use super::{ScalarCodec, SharedCodec};
use crate::error::{Error, Result};
use crate::types::{HostType, MarshalType, ScalarKind, WireType, LIST_TYPE, MAP_TYPE, SET_TYPE};
use std::collections::HashMap;
use std::sync::Arc;

/// Legacy marshal class still reported for `timestamp` columns.
const LEGACY_TIMESTAMP_CLASS: &str = "DateType";

/// Immutable table of default codecs.
#[derive(Debug, Clone)]
pub struct CodecRegistry {
    scalars: HashMap<ScalarKind, SharedCodec>,
    internal: HashMap<Arc<str>, ScalarKind>,
}

impl Default for CodecRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CodecRegistry {
    /// Registry with the default codec of every scalar kind.
    pub fn new() -> Self {
        CodecRegistryBuilder::with_defaults().build()
    }

    /// Builder starting from the default codecs.
    pub fn builder() -> CodecRegistryBuilder {
        CodecRegistryBuilder::with_defaults()
    }

    /// Codec of a scalar kind, if one is registered.
    pub fn scalar(&self, kind: ScalarKind) -> Option<&SharedCodec> {
        self.scalars.get(&kind)
    }

    /// Codec for a column type; collections resolve recursively.
    pub fn resolve(&self, wire_type: &WireType) -> Result<SharedCodec> {
        let codec = match wire_type {
            WireType::Scalar(kind) => self.scalars.get(kind).cloned().ok_or_else(|| {
                Error::UnknownWireType {
                    type_name: kind.name().to_string(),
                }
            })?,
            WireType::List(elem) => list_of(self.resolve(elem)?),
            WireType::Set(elem) => set_of(self.resolve(elem)?),
            WireType::Map(key, value) => map_of(self.resolve(key)?, self.resolve(value)?),
        };
        log::trace!("[codec] resolved {} -> {}", wire_type, codec.host_type());
        Ok(codec)
    }

    /// Column type of a server-side marshal type.
    ///
    /// `ReversedType` and `FrozenType` wrappers are transparent. `UTF8Type`
    /// maps to `text`, so a `varchar` column comes back as the equivalent `text`.
    pub fn to_wire_type(&self, internal: &MarshalType) -> Result<WireType> {
        let internal = internal.unwrap_modifiers();
        self.convert_internal(&internal)
    }

    /// Parse a marshal type string, then convert it like [`to_wire_type`](Self::to_wire_type).
    pub fn parse_internal_type(&self, internal: &str) -> Result<WireType> {
        self.to_wire_type(&MarshalType::parse(internal)?)
    }

    fn convert_internal(&self, internal: &MarshalType) -> Result<WireType> {
        let params = internal.params();
        match internal.class_name() {
            LIST_TYPE => {
                let [elem] = params else {
                    return Err(arity(internal, 1));
                };
                Ok(WireType::list(self.convert_internal(elem)?))
            }
            SET_TYPE => {
                let [elem] = params else {
                    return Err(arity(internal, 1));
                };
                Ok(WireType::set(self.convert_internal(elem)?))
            }
            MAP_TYPE => {
                let [key, value] = params else {
                    return Err(arity(internal, 2));
                };
                Ok(WireType::map(
                    self.convert_internal(key)?,
                    self.convert_internal(value)?,
                ))
            }
            class => self
                .internal
                .get(class)
                .map(|kind| WireType::Scalar(*kind))
                .ok_or_else(|| Error::UnknownInternalType {
                    type_name: internal.qualified_name(),
                }),
        }
    }

    /// `true` when values of `host` can be handed to the codec of `kind`
    /// (`host` equals or is a subtype of the codec's host type).
    pub fn is_assignable_from(&self, kind: ScalarKind, host: &HostType) -> bool {
        host.is_subtype_of(&self.host_type_of(kind))
    }

    /// `true` when values produced by the codec of `kind` fit into `host`
    /// (the codec's host type equals or is a subtype of `host`).
    pub fn is_assignable_to(&self, kind: ScalarKind, host: &HostType) -> bool {
        self.host_type_of(kind).is_subtype_of(host)
    }

    fn host_type_of(&self, kind: ScalarKind) -> HostType {
        self.scalars
            .get(&kind)
            .map_or_else(|| kind.canonical_host_type(), |codec| codec.host_type().clone())
    }

    /// Canonical column type for a host type, used when no schema is at hand.
    pub fn wire_type_for(&self, host: &HostType) -> Result<WireType> {
        let kind = match host {
            HostType::String => ScalarKind::Text,
            HostType::Bool => ScalarKind::Boolean,
            HostType::I32 => ScalarKind::Int,
            HostType::I64 => ScalarKind::BigInt,
            HostType::F32 => ScalarKind::Float,
            HostType::F64 => ScalarKind::Double,
            HostType::Decimal => ScalarKind::Decimal,
            HostType::Varint => ScalarKind::Varint,
            HostType::Bytes => ScalarKind::Blob,
            HostType::Inet => ScalarKind::Inet,
            HostType::Timestamp => ScalarKind::Timestamp,
            HostType::Uuid => ScalarKind::Uuid,
            HostType::List(elem) => return Ok(WireType::list(self.wire_type_for(elem)?)),
            HostType::Set(elem) => return Ok(WireType::set(self.wire_type_for(elem)?)),
            HostType::Map(key, value) => {
                return Ok(WireType::map(
                    self.wire_type_for(key)?,
                    self.wire_type_for(value)?,
                ))
            }
            HostType::Any | HostType::Number | HostType::Udt(_) | HostType::Opaque(_) => {
                return Err(Error::NoCodecForHostType {
                    host_type: host.clone(),
                })
            }
        };
        Ok(WireType::Scalar(kind))
    }

    /// Default codec for a host type.
    pub fn codec_for_host(&self, host: &HostType) -> Result<SharedCodec> {
        self.resolve(&self.wire_type_for(host)?)
    }
}

fn arity(internal: &MarshalType, expected: usize) -> Error {
    Error::MalformedType {
        input: internal.to_string(),
        reason: format!(
            "{} takes {expected} type parameter(s), got {}",
            internal.class_name(),
            internal.params().len()
        ),
    }
}

/// Builder of an immutable [`CodecRegistry`].
#[derive(Debug, Clone, Default)]
pub struct CodecRegistryBuilder {
    scalars: HashMap<ScalarKind, SharedCodec>,
}

impl CodecRegistryBuilder {
    /// Start with no codecs at all.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Start with the default codec of every scalar kind.
    pub fn with_defaults() -> Self {
        let scalars = ScalarKind::ALL
            .into_iter()
            .map(|kind| (kind, Arc::new(ScalarCodec::new(kind)) as SharedCodec))
            .collect();
        Self { scalars }
    }

    /// Register (or replace) the codec used for `kind`.
    #[must_use]
    pub fn codec(mut self, kind: ScalarKind, codec: SharedCodec) -> Self {
        self.scalars.insert(kind, codec);
        self
    }

    /// Remove the codec of `kind`; resolving it then fails with `UnknownWireType`.
    #[must_use]
    pub fn without(mut self, kind: ScalarKind) -> Self {
        self.scalars.remove(&kind);
        self
    }

    pub fn build(self) -> CodecRegistry {
        let mut internal: HashMap<Arc<str>, ScalarKind> = HashMap::new();
        // ALL lists `text` before `varchar`, so UTF8Type maps back to text.
        for kind in ScalarKind::ALL {
            if self.scalars.contains_key(&kind) {
                internal
                    .entry(Arc::from(kind.marshal_class()))
                    .or_insert(kind);
            }
        }
        if self.scalars.contains_key(&ScalarKind::Timestamp) {
            internal.insert(Arc::from(LEGACY_TIMESTAMP_CLASS), ScalarKind::Timestamp);
        }
        log::debug!(
            "[codec] registry built with {} scalar codecs",
            self.scalars.len()
        );
        CodecRegistry {
            scalars: self.scalars,
            internal,
        }
    }
}
