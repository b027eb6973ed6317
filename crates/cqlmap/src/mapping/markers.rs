// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Mapping markers attached to classes and properties.

use crate::codec::CodecFactory;
use std::fmt;
use std::sync::Arc;

/// What an entity descriptor maps a class to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MappingKind {
    Table,
    Udt,
    Accessor,
}

impl MappingKind {
    pub const ALL: [Self; 3] = [Self::Table, Self::Udt, Self::Accessor];

    /// Marker that requests this kind.
    pub const fn marker(self) -> MarkerKind {
        match self {
            Self::Table => MarkerKind::Table,
            Self::Udt => MarkerKind::Udt,
            Self::Accessor => MarkerKind::Accessor,
        }
    }
}

impl fmt::Display for MappingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Table => "table",
            Self::Udt => "udt",
            Self::Accessor => "accessor",
        })
    }
}

/// Marker names, used in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerKind {
    Table,
    Udt,
    Accessor,
    Column,
    Field,
    PartitionKey,
    ClusteringColumn,
    Computed,
    Transient,
    Frozen,
    FrozenKey,
    FrozenValue,
    Query,
    Param,
}

impl fmt::Display for MarkerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Table => "@Table",
            Self::Udt => "@UDT",
            Self::Accessor => "@Accessor",
            Self::Column => "@Column",
            Self::Field => "@Field",
            Self::PartitionKey => "@PartitionKey",
            Self::ClusteringColumn => "@ClusteringColumn",
            Self::Computed => "@Computed",
            Self::Transient => "@Transient",
            Self::Frozen => "@Frozen",
            Self::FrozenKey => "@FrozenKey",
            Self::FrozenValue => "@FrozenValue",
            Self::Query => "@Query",
            Self::Param => "@Param",
        })
    }
}

/// Keyspace and name attributes of `@Table` / `@UDT`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityName {
    pub keyspace: Option<Arc<str>>,
    pub name: Option<Arc<str>>,
    pub case_sensitive_keyspace: bool,
    pub case_sensitive_name: bool,
}

impl EntityName {
    pub fn named(name: impl Into<Arc<str>>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn in_keyspace(mut self, keyspace: impl Into<Arc<str>>) -> Self {
        self.keyspace = Some(keyspace.into());
        self
    }

    #[must_use]
    pub fn case_sensitive_keyspace(mut self) -> Self {
        self.case_sensitive_keyspace = true;
        self
    }

    #[must_use]
    pub fn case_sensitive_name(mut self) -> Self {
        self.case_sensitive_name = true;
        self
    }
}

/// Class-level mapping marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MappingMarker {
    Table(EntityName),
    Udt(EntityName),
    Accessor,
}

impl MappingMarker {
    pub fn kind(&self) -> MappingKind {
        match self {
            Self::Table(_) => MappingKind::Table,
            Self::Udt(_) => MappingKind::Udt,
            Self::Accessor => MappingKind::Accessor,
        }
    }
}

/// Name attributes of `@Column` / `@Field`.
#[derive(Clone, Default)]
pub struct ColumnName {
    pub name: Option<Arc<str>>,
    pub case_sensitive: bool,
    pub codec: Option<CodecFactory>,
}

impl ColumnName {
    pub fn named(name: impl Into<Arc<str>>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn case_sensitive(mut self) -> Self {
        self.case_sensitive = true;
        self
    }

    #[must_use]
    pub fn with_codec(mut self, codec: CodecFactory) -> Self {
        self.codec = Some(codec);
        self
    }
}

impl fmt::Debug for ColumnName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnName")
            .field("name", &self.name)
            .field("case_sensitive", &self.case_sensitive)
            .field("codec", &self.codec.is_some())
            .finish()
    }
}

/// Property-level marker.
#[derive(Debug, Clone)]
pub enum PropertyMarker {
    Column(ColumnName),
    Field(ColumnName),
    PartitionKey(i32),
    ClusteringColumn(i32),
    Computed(Arc<str>),
    Transient,
    Frozen,
    FrozenKey,
    FrozenValue,
}

impl PropertyMarker {
    pub fn kind(&self) -> MarkerKind {
        match self {
            Self::Column(_) => MarkerKind::Column,
            Self::Field(_) => MarkerKind::Field,
            Self::PartitionKey(_) => MarkerKind::PartitionKey,
            Self::ClusteringColumn(_) => MarkerKind::ClusteringColumn,
            Self::Computed(_) => MarkerKind::Computed,
            Self::Transient => MarkerKind::Transient,
            Self::Frozen => MarkerKind::Frozen,
            Self::FrozenKey => MarkerKind::FrozenKey,
            Self::FrozenValue => MarkerKind::FrozenValue,
        }
    }

    /// Whether the marker may appear on a property of an entity of `kind`.
    pub(crate) fn allowed_in(&self, kind: MappingKind) -> bool {
        match kind {
            MappingKind::Table => !matches!(self, Self::Field(_)),
            MappingKind::Udt => matches!(
                self,
                Self::Field(_) | Self::Transient | Self::Frozen | Self::FrozenKey | Self::FrozenValue
            ),
            MappingKind::Accessor => false,
        }
    }
}
