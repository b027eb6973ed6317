// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Entity mapping
//!
//! Turns a declared class hierarchy into flat, immutable descriptors of how
//! properties map to table columns, UDT fields or accessor queries.
//!
//! # Features
//!
//! - **ClassDecl**: declared classes, interfaces and members with their markers
//! - **PropertyDescriptor**: column name, key position, role, custom codec
//! - **EntityDescriptor**: ordered partition and clustering keys plus every property
//! - **MappingManager**: descriptor cache shared across threads
//!
//! # Example
//!
//! ```rust
//! use cqlmap::codec::CodecRegistry;
//! use cqlmap::mapping::{
//!     ClassDecl, ClassShape, ColumnName, EntityName, MappingKind, MappingManager, MemberDecl,
//!     PropertyMarker,
//! };
//! use std::sync::Arc;
//!
//! #[derive(Default)]
//! struct User {
//!     id: i32,
//!     name: String,
//! }
//!
//! let decl = ClassDecl::builder("User", ClassShape::Class)
//!     .table(EntityName::named("users").in_keyspace("ks"))
//!     .member(
//!         MemberDecl::field("id", |u: &User| &u.id, |u: &mut User| &mut u.id)
//!             .with_marker(PropertyMarker::PartitionKey(0)),
//!     )
//!     .member(
//!         MemberDecl::field("name", |u: &User| &u.name, |u: &mut User| &mut u.name)
//!             .with_marker(PropertyMarker::Column(ColumnName::named("Full_Name").case_sensitive())),
//!     )
//!     .build();
//!
//! let manager = MappingManager::new(Arc::new(CodecRegistry::new()));
//! let users = manager.descriptor(&decl, MappingKind::Table).unwrap();
//! assert_eq!(users.name(), Some("users"));
//! assert_eq!(users.property("name").unwrap().column_name(), "\"Full_Name\"");
//! ```

mod accessor;
mod cache;
mod class;
mod descriptor;
mod manager;
mod markers;
mod property;
mod resolver;

pub use accessor::{
    AccessError, AccessOp, Embedded, FieldAccessor, GetterAccessor, PropertyReader,
    PropertyWriter, SetterAccessor, SharedReader, SharedUpcast, SharedWriter, Upcast,
};
pub use cache::{CacheStats, DescriptorCache, DescriptorKey};
pub use class::{
    ClassDecl, ClassDeclBuilder, ClassId, ClassShape, Mapped, MemberDecl, MemberOrigin, ParamDecl,
    QueryDecl, Superclass,
};
pub use descriptor::{EntityDescriptor, QueryDescriptor};
pub use manager::MappingManager;
pub use markers::{ColumnName, EntityName, MappingKind, MappingMarker, MarkerKind, PropertyMarker};
pub use property::{
    normalize_identifier, quote_identifier, Frozenness, PropertyDescriptor, PropertyRole,
};
pub use resolver::build_entity_descriptor;
