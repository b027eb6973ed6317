// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Property descriptors: one mapped property of an entity.

use super::accessor::{AccessError, AccessOp, SharedReader, SharedWriter};
use super::markers::{ColumnName, MappingKind, MarkerKind, PropertyMarker};
use crate::codec::SharedCodec;
use crate::config::{NO_POSITION, QUOTE};
use crate::error::{Error, Result};
use crate::types::{HostType, Value};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Part a property plays in its entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyRole {
    Regular,
    Computed(Arc<str>),
    Transient,
    PartitionKey(i32),
    ClusteringColumn(i32),
}

/// Frozen markers present on a property.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Frozenness {
    pub whole: bool,
    pub key: bool,
    pub value: bool,
}

/// Quote an identifier, doubling embedded quotes.
pub fn quote_identifier(name: &str) -> String {
    let doubled = format!("{QUOTE}{QUOTE}");
    format!("{QUOTE}{}{QUOTE}", name.replace(QUOTE, &doubled))
}

/// Case rule shared by columns, fields, tables and keyspaces: case-sensitive
/// names are quoted, all others are lower-cased and left unquoted.
pub fn normalize_identifier(name: &str, case_sensitive: bool) -> String {
    if case_sensitive {
        quote_identifier(name)
    } else {
        name.to_lowercase()
    }
}

/// Immutable description of one mapped property.
#[derive(Clone)]
pub struct PropertyDescriptor {
    name: Arc<str>,
    column_name: Arc<str>,
    position: i32,
    host_type: HostType,
    role: PropertyRole,
    custom_codec: Option<SharedCodec>,
    frozen: Frozenness,
    reader: Option<SharedReader>,
    writer: Option<SharedWriter>,
    class: Arc<str>,
}

impl PropertyDescriptor {
    /// Property identifier, unique within the entity.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Column or UDT field name; a computed expression for computed properties.
    pub fn column_name(&self) -> &str {
        &self.column_name
    }

    /// Key order for partition/clustering keys, [`NO_POSITION`] otherwise.
    pub fn position(&self) -> i32 {
        self.position
    }

    pub fn host_type(&self) -> &HostType {
        &self.host_type
    }

    pub fn role(&self) -> &PropertyRole {
        &self.role
    }

    pub fn is_partition_key(&self) -> bool {
        matches!(self.role, PropertyRole::PartitionKey(_))
    }

    pub fn is_clustering_column(&self) -> bool {
        matches!(self.role, PropertyRole::ClusteringColumn(_))
    }

    pub fn is_computed(&self) -> bool {
        matches!(self.role, PropertyRole::Computed(_))
    }

    pub fn is_transient(&self) -> bool {
        matches!(self.role, PropertyRole::Transient)
    }

    /// Codec bound by a `@Column`/`@Field` marker, if any.
    pub fn custom_codec(&self) -> Option<&SharedCodec> {
        self.custom_codec.as_ref()
    }

    pub fn frozen(&self) -> Frozenness {
        self.frozen
    }

    /// Read the property from `entity` (getter first, field otherwise).
    pub fn get_value(&self, entity: &dyn Any) -> Result<Value> {
        let reader = self
            .reader
            .as_ref()
            .ok_or_else(|| self.access_error(AccessOp::Read, AccessError::Unsupported))?;
        reader
            .read(entity)
            .map_err(|e| self.access_error(AccessOp::Read, e))
    }

    /// Write the property into `entity` (setter first, field otherwise).
    pub fn set_value(&self, entity: &mut dyn Any, value: Value) -> Result<()> {
        let writer = self
            .writer
            .as_ref()
            .ok_or_else(|| self.access_error(AccessOp::Write, AccessError::Unsupported))?;
        writer
            .write(entity, value)
            .map_err(|e| self.access_error(AccessOp::Write, e))
    }

    fn access_error(&self, op: AccessOp, source: AccessError) -> Error {
        Error::PropertyAccess {
            op,
            property: self.name.to_string(),
            class: self.class.to_string(),
            source,
        }
    }
}

impl fmt::Debug for PropertyDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyDescriptor")
            .field("name", &self.name)
            .field("column_name", &self.column_name)
            .field("position", &self.position)
            .field("host_type", &self.host_type)
            .field("role", &self.role)
            .field("custom_codec", &self.custom_codec)
            .field("frozen", &self.frozen)
            .finish()
    }
}

/// Merged view of one property, ready to be validated.
pub(crate) struct PropertyDraft {
    pub name: Arc<str>,
    pub host_type: HostType,
    pub markers: Vec<PropertyMarker>,
    pub reader: Option<SharedReader>,
    pub writer: Option<SharedWriter>,
}

/// Entity-level inputs of a property build.
pub(crate) struct PropertyContext<'a> {
    pub kind: MappingKind,
    pub class: &'a Arc<str>,
    pub validate_custom_codecs: bool,
}

impl PropertyDraft {
    fn marker(&self, kind: MarkerKind) -> Option<&PropertyMarker> {
        self.markers.iter().find(|m| m.kind() == kind)
    }

    fn has(&self, kind: MarkerKind) -> bool {
        self.marker(kind).is_some()
    }

    fn column(&self) -> Option<&ColumnName> {
        match self.marker(MarkerKind::Column) {
            Some(PropertyMarker::Column(column)) => Some(column),
            _ => None,
        }
    }

    fn udt_field(&self) -> Option<&ColumnName> {
        match self.marker(MarkerKind::Field) {
            Some(PropertyMarker::Field(field)) => Some(field),
            _ => None,
        }
    }

    fn computed(&self) -> Option<&Arc<str>> {
        match self.marker(MarkerKind::Computed) {
            Some(PropertyMarker::Computed(expr)) => Some(expr),
            _ => None,
        }
    }

    fn key_position(&self, kind: MarkerKind) -> Option<i32> {
        match self.marker(kind) {
            Some(PropertyMarker::PartitionKey(n) | PropertyMarker::ClusteringColumn(n)) => Some(*n),
            _ => None,
        }
    }

    fn validate(&self, kind: MappingKind) -> Result<()> {
        if let Some(illegal) = self.markers.iter().find(|m| !m.allowed_in(kind)) {
            return Err(Error::MarkerNotAllowed {
                marker: illegal.kind(),
                property: self.name.to_string(),
            });
        }
        if self.has(MarkerKind::PartitionKey) && self.has(MarkerKind::ClusteringColumn) {
            return Err(Error::ConflictingMarkers {
                property: self.name.to_string(),
                first: MarkerKind::PartitionKey,
                second: MarkerKind::ClusteringColumn,
            });
        }
        for first in [
            MarkerKind::Column,
            MarkerKind::PartitionKey,
            MarkerKind::ClusteringColumn,
        ] {
            if self.has(first) && self.has(MarkerKind::Computed) {
                return Err(Error::ConflictingMarkers {
                    property: self.name.to_string(),
                    first,
                    second: MarkerKind::Computed,
                });
            }
        }
        if self.computed().is_some_and(|expr| expr.is_empty()) {
            return Err(Error::MissingComputedExpression {
                property: self.name.to_string(),
            });
        }
        Ok(())
    }

    fn column_name(&self) -> String {
        let named = |marker: Option<&ColumnName>| {
            marker.and_then(|m| {
                m.name
                    .as_deref()
                    .filter(|name| !name.is_empty())
                    .map(|name| normalize_identifier(name, m.case_sensitive))
            })
        };
        named(self.column())
            .or_else(|| named(self.udt_field()))
            .or_else(|| self.computed().map(|expr| expr.to_string()))
            .unwrap_or_else(|| self.name.to_lowercase())
    }

    /// Transient takes precedence over every other role marker.
    fn role(&self) -> PropertyRole {
        if self.has(MarkerKind::Transient) {
            PropertyRole::Transient
        } else if let Some(n) = self.key_position(MarkerKind::PartitionKey) {
            PropertyRole::PartitionKey(n)
        } else if let Some(n) = self.key_position(MarkerKind::ClusteringColumn) {
            PropertyRole::ClusteringColumn(n)
        } else if let Some(expr) = self.computed() {
            PropertyRole::Computed(Arc::clone(expr))
        } else {
            PropertyRole::Regular
        }
    }

    fn custom_codec(&self, ctx: &PropertyContext<'_>) -> Result<Option<SharedCodec>> {
        let Some(factory) = self
            .column()
            .and_then(|c| c.codec)
            .or_else(|| self.udt_field().and_then(|f| f.codec))
        else {
            return Ok(None);
        };
        let codec = factory();
        if ctx.validate_custom_codecs && !codec.host_type().is_related_to(&self.host_type) {
            return Err(Error::IncompatibleCodec {
                property: self.name.to_string(),
                codec_type: codec.host_type().clone(),
                property_type: self.host_type.clone(),
            });
        }
        log::debug!(
            "[mapping] {}.{} bound to custom codec for {}",
            ctx.class,
            self.name,
            codec.wire_type()
        );
        Ok(Some(codec))
    }

    /// Validate markers and produce the descriptor.
    pub(crate) fn build(self, ctx: &PropertyContext<'_>) -> Result<PropertyDescriptor> {
        self.validate(ctx.kind)?;
        let column_name = self.column_name();
        let role = self.role();
        let position = match role {
            PropertyRole::PartitionKey(n) | PropertyRole::ClusteringColumn(n) => n,
            _ => NO_POSITION,
        };
        let custom_codec = self.custom_codec(ctx)?;
        let frozen = Frozenness {
            whole: self.has(MarkerKind::Frozen),
            key: self.has(MarkerKind::FrozenKey),
            value: self.has(MarkerKind::FrozenValue),
        };
        Ok(PropertyDescriptor {
            name: self.name,
            column_name: Arc::from(column_name),
            position,
            host_type: self.host_type,
            role,
            custom_codec,
            frozen,
            reader: self.reader,
            writer: self.writer,
            class: Arc::clone(ctx.class),
        })
    }
}
