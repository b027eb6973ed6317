// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Codecs between column values and host values.
//!
//! A [`Codec`] is bound to exactly one `(WireType, HostType)` pair. The
//! [`CodecRegistry`] holds one default codec per scalar kind and derives
//! list, set and map codecs recursively from them.
//!
//! # Example
//!
//! ```rust
//! use cqlmap::codec::CodecRegistry;
//! use cqlmap::types::{ScalarKind, Value, WireType};
//!
//! let registry = CodecRegistry::new();
//! let codec = registry
//!     .resolve(&WireType::list(WireType::scalar(ScalarKind::Int)))
//!     .unwrap();
//! let bytes = codec.encode(&Value::List(vec![Value::Int(1), Value::Int(2)])).unwrap();
//! assert_eq!(codec.decode(&bytes).unwrap(), Value::List(vec![Value::Int(1), Value::Int(2)]));
//! ```

mod collection;
mod registry;
mod scalar;

#[cfg(test)]
mod tests;

pub use collection::{ListCodec, MapCodec, SetCodec};
pub use registry::{CodecRegistry, CodecRegistryBuilder};
pub use scalar::ScalarCodec;

use crate::types::{CollectionKind, HostType, MarshalType, ScalarKind, Value, WireType};
use std::fmt;
use std::sync::Arc;

/// Encode/decode capability for one column type.
pub trait Codec: Send + Sync + fmt::Debug {
    /// Column type this codec reads and writes.
    fn wire_type(&self) -> &WireType;

    /// Host type of the values this codec produces and accepts.
    fn host_type(&self) -> &HostType;

    /// Server-side representation of [`wire_type`](Self::wire_type).
    fn marshal_type(&self) -> MarshalType {
        self.wire_type().marshal_type()
    }

    /// Serialize a non-null value.
    fn encode(&self, value: &Value) -> Result<Vec<u8>, CodecError>;

    /// Deserialize a value; an empty buffer may decode to `Value::Null`.
    fn decode(&self, bytes: &[u8]) -> Result<Value, CodecError>;
}

/// Codecs are immutable and shared.
pub type SharedCodec = Arc<dyn Codec>;

/// Constructor of a custom codec, referenced from property markers.
pub type CodecFactory = fn() -> SharedCodec;

/// Encode/decode failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    #[error("Type mismatch: codec for {expected} cannot handle a {found} value")]
    TypeMismatch {
        expected: WireType,
        found: &'static str,
    },

    #[error("Invalid {kind} value: expected {expected} bytes, got {found}")]
    InvalidLength {
        kind: ScalarKind,
        expected: usize,
        found: usize,
    },

    #[error("Buffer too small: need {need} bytes, have {have}")]
    BufferTooSmall { need: usize, have: usize },

    #[error("Invalid UTF-8 in text value: {0}")]
    InvalidUtf8(String),

    #[error("Non-ASCII character in ascii value")]
    NonAscii,

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("{} elements cannot be null", .collection.name())]
    NullElement { collection: CollectionKind },

    #[error("Null values are represented by an absent column value, not encoded")]
    NullValue,

    #[error("{remaining} unexpected bytes after the last {} element", .collection.name())]
    TrailingBytes {
        collection: CollectionKind,
        remaining: usize,
    },
}
