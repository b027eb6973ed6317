// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # cqlmap - CQL type registry and entity mapping
//!
//! Resolves codecs between CQL wire types and Rust host values, and turns
//! annotated entity types into flat descriptors of how their properties map
//! to table columns, user-defined type fields or accessor queries.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cqlmap::codec::CodecRegistry;
//! use cqlmap::mapping::MappingManager;
//! use cqlmap::{Mapped, Result};
//! use std::sync::Arc;
//!
//! #[derive(Default, Mapped)]
//! #[cql(table = "users", keyspace = "app")]
//! struct User {
//!     #[cql(partition_key)]
//!     id: i32,
//!     #[cql(column = "display_name")]
//!     name: String,
//! }
//!
//! fn main() -> Result<()> {
//!     let manager = MappingManager::new(Arc::new(CodecRegistry::new()));
//!     let users = manager.table_descriptor::<User>()?;
//!     for key in users.partition_key() {
//!         println!("{} -> {}", key.name(), key.column_name());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`codec::CodecRegistry`] | Immutable wire type to codec registry |
//! | [`mapping::EntityDescriptor`] | Resolved mapping of one class |
//! | [`mapping::MappingManager`] | Descriptor cache and mapper factory |
//! | [`mapper::Mapper`] | Save / get / delete over a [`mapper::Session`] |
//!
//! ## Modules Overview
//!
//! - [`types`] - Wire types, host types, runtime values
//! - [`codec`] - Codecs and the registry
//! - [`mapping`] - Class declarations and descriptor resolution
//! - [`mapper`] - Entity persistence atop descriptors

// Allow the derive macro to work inside this crate's tests
extern crate self as cqlmap;

/// Codecs and the codec registry.
pub mod codec;
/// Protocol constants and mapping configuration.
pub mod config;
/// Crate-wide error type.
pub mod error;
/// Save / get / delete of mapped entities.
pub mod mapper;
/// Class declarations and entity descriptor resolution.
pub mod mapping;
/// CQL wire types, host types and runtime values.
pub mod types;

pub use config::MappingConfig;
pub use error::{Error, Result};

// Re-export Mapped trait and derive macro
pub use cqlmap_codegen::Mapped; // Derive macro (for #[derive(cqlmap::Mapped)])
pub use mapping::Mapped; // Trait (for type bounds)
