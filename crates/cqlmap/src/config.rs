// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! cqlmap configuration
//!
//! - **Level 1 (Static)**: native protocol and naming constants
//! - **Level 2 (Dynamic)**: [`MappingConfig`], handed to the mapping manager
//!
//! # Example
//!
//! ```rust
//! use cqlmap::config::MappingConfig;
//!
//! let config = MappingConfig::new()
//!     .with_default_keyspace("shop")
//!     .with_custom_codec_validation(false);
//! assert_eq!(config.default_keyspace(), Some("shop"));
//! ```

use std::sync::Arc;

// =======================================================================
// Native protocol (v3+)
// =======================================================================

/// Width in bytes of collection element counts and element lengths.
pub const COLLECTION_LENGTH_WIDTH: usize = 4;

/// Length prefix marking a null element or value.
pub const NULL_LENGTH: i32 = -1;

// =======================================================================
// Naming
// =======================================================================

/// Package prefix of server-side marshal classes.
pub const MARSHAL_PACKAGE: &str = "org.apache.cassandra.db.marshal.";

/// Quote character of case-sensitive identifiers.
pub const QUOTE: char = '"';

/// Ordinal position of properties that are not part of the primary key.
pub const NO_POSITION: i32 = -1;

// =======================================================================
// Type Syntax
// =======================================================================

/// Deepest collection nesting accepted when parsing a CQL type string or a
/// marshal class string. `frozen<..>` and `ReversedType(..)` wrappers count.
pub const MAX_TYPE_DEPTH: usize = 64;

// =======================================================================
// Mapping Configuration
// =======================================================================

/// Settings consulted while building entity descriptors.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MappingConfig {
    /// Keyspace used when a `@Table`/`@UDT` marker declares none.
    default_keyspace: Option<Arc<str>>,

    /// Reject custom codecs whose host type does not fit the property.
    validate_custom_codecs: bool,
}

impl Default for MappingConfig {
    fn default() -> Self {
        Self {
            default_keyspace: None,
            validate_custom_codecs: true,
        }
    }
}

impl MappingConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_default_keyspace(mut self, keyspace: impl Into<Arc<str>>) -> Self {
        self.default_keyspace = Some(keyspace.into());
        self
    }

    #[must_use]
    pub fn with_custom_codec_validation(mut self, enabled: bool) -> Self {
        self.validate_custom_codecs = enabled;
        self
    }

    pub fn default_keyspace(&self) -> Option<&str> {
        self.default_keyspace.as_deref()
    }

    pub fn validate_custom_codecs(&self) -> bool {
        self.validate_custom_codecs
    }
}
