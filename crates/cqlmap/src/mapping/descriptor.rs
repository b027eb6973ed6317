// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Entity descriptors: the flat, immutable result of resolving a class.

use super::class::ParamDecl;
use super::markers::MappingKind;
use super::property::PropertyDescriptor;
use std::collections::HashMap;
use std::sync::Arc;

/// A resolved accessor query method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryDescriptor {
    pub method: Arc<str>,
    pub query: Arc<str>,
    pub params: Vec<ParamDecl>,
}

impl QueryDescriptor {
    /// Whether parameters are bound by name rather than by position.
    pub fn has_named_params(&self) -> bool {
        self.params.first().is_some_and(|p| p.name.is_some())
    }
}

/// How one concrete class maps to a table, a UDT or an accessor.
#[derive(Debug)]
pub struct EntityDescriptor {
    pub(crate) class: Arc<str>,
    pub(crate) kind: MappingKind,
    pub(crate) keyspace: Option<Arc<str>>,
    pub(crate) name: Option<Arc<str>>,
    pub(crate) properties: Vec<PropertyDescriptor>,
    pub(crate) index: HashMap<Arc<str>, usize>,
    pub(crate) partition_key: Vec<usize>,
    pub(crate) clustering_columns: Vec<usize>,
    pub(crate) queries: Vec<QueryDescriptor>,
}

impl EntityDescriptor {
    /// Name of the class this descriptor was built from.
    pub fn class_name(&self) -> &str {
        &self.class
    }

    pub fn kind(&self) -> MappingKind {
        self.kind
    }

    /// Normalized keyspace; `None` for accessors.
    pub fn keyspace(&self) -> Option<&str> {
        self.keyspace.as_deref()
    }

    /// Normalized table or UDT name; `None` for accessors.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Every property, transient ones included, in declaration order.
    pub fn properties(&self) -> impl Iterator<Item = &PropertyDescriptor> {
        self.properties.iter()
    }

    pub fn property(&self, name: &str) -> Option<&PropertyDescriptor> {
        self.index.get(name).map(|&i| &self.properties[i])
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Partition key properties ordered by position.
    pub fn partition_key(&self) -> impl Iterator<Item = &PropertyDescriptor> {
        self.partition_key.iter().map(|&i| &self.properties[i])
    }

    /// Clustering column properties ordered by position.
    pub fn clustering_columns(&self) -> impl Iterator<Item = &PropertyDescriptor> {
        self.clustering_columns.iter().map(|&i| &self.properties[i])
    }

    /// Partition key followed by clustering columns.
    pub fn primary_key(&self) -> impl Iterator<Item = &PropertyDescriptor> {
        self.partition_key().chain(self.clustering_columns())
    }

    pub fn primary_key_len(&self) -> usize {
        self.partition_key.len() + self.clustering_columns.len()
    }

    /// Mapped properties that are neither keys nor transient.
    pub fn regular_columns(&self) -> impl Iterator<Item = &PropertyDescriptor> {
        self.properties.iter().filter(|p| {
            !(p.is_partition_key() || p.is_clustering_column() || p.is_transient())
        })
    }

    /// Every property that maps to a column or field.
    pub fn mapped_columns(&self) -> impl Iterator<Item = &PropertyDescriptor> {
        self.properties.iter().filter(|p| !p.is_transient())
    }

    /// Query methods of an accessor descriptor.
    pub fn queries(&self) -> &[QueryDescriptor] {
        &self.queries
    }
}
