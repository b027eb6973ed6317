// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Host-side (application) type descriptions.
//!
//! `HostType` is a small lattice: every type is a subtype of [`HostType::Any`],
//! numeric types are subtypes of [`HostType::Number`], and collection types
//! are covariant in their element types.

use super::wire_type::ScalarKind;
use std::fmt;
use std::sync::Arc;

/// Application type of a property or codec.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HostType {
    /// Top of the lattice.
    Any,
    /// Supertype of every numeric type.
    Number,
    String,
    Bool,
    I32,
    I64,
    F32,
    F64,
    Decimal,
    Varint,
    Bytes,
    Inet,
    Timestamp,
    Uuid,
    List(Box<HostType>),
    Set(Box<HostType>),
    Map(Box<HostType>, Box<HostType>),
    /// A user-defined-type mapped class.
    Udt(Arc<str>),
    /// Any other application type, identified by name.
    Opaque(Arc<str>),
}

impl HostType {
    pub fn list(element: HostType) -> Self {
        Self::List(Box::new(element))
    }

    pub fn set(element: HostType) -> Self {
        Self::Set(Box::new(element))
    }

    pub fn map(key: HostType, value: HostType) -> Self {
        Self::Map(Box::new(key), Box::new(value))
    }

    pub fn udt(name: impl Into<Arc<str>>) -> Self {
        Self::Udt(name.into())
    }

    pub fn opaque(name: impl Into<Arc<str>>) -> Self {
        Self::Opaque(name.into())
    }

    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            Self::Number
                | Self::I32
                | Self::I64
                | Self::F32
                | Self::F64
                | Self::Decimal
                | Self::Varint
        )
    }

    pub fn is_collection(&self) -> bool {
        matches!(self, Self::List(_) | Self::Set(_) | Self::Map(..))
    }

    /// `true` when a value of `self` can be used where `other` is expected.
    pub fn is_subtype_of(&self, other: &HostType) -> bool {
        if self == other {
            return true;
        }
        match (self, other) {
            (_, Self::Any) => true,
            (_, Self::Number) => self.is_numeric(),
            (Self::List(a), Self::List(b)) | (Self::Set(a), Self::Set(b)) => a.is_subtype_of(b),
            (Self::Map(ka, va), Self::Map(kb, vb)) => ka.is_subtype_of(kb) && va.is_subtype_of(vb),
            _ => false,
        }
    }

    /// Either direction of [`is_subtype_of`](Self::is_subtype_of) holds.
    pub fn is_related_to(&self, other: &HostType) -> bool {
        self.is_subtype_of(other) || other.is_subtype_of(self)
    }
}

impl ScalarKind {
    /// Host type produced and accepted by the default codec of this kind.
    pub fn canonical_host_type(self) -> HostType {
        match self {
            Self::Ascii | Self::Text | Self::Varchar => HostType::String,
            Self::BigInt | Self::Counter => HostType::I64,
            Self::Blob => HostType::Bytes,
            Self::Boolean => HostType::Bool,
            Self::Decimal => HostType::Decimal,
            Self::Double => HostType::F64,
            Self::Float => HostType::F32,
            Self::Inet => HostType::Inet,
            Self::Int => HostType::I32,
            Self::Timestamp => HostType::Timestamp,
            Self::Uuid | Self::TimeUuid => HostType::Uuid,
            Self::Varint => HostType::Varint,
        }
    }
}

impl fmt::Display for HostType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("Any"),
            Self::Number => f.write_str("Number"),
            Self::String => f.write_str("String"),
            Self::Bool => f.write_str("bool"),
            Self::I32 => f.write_str("i32"),
            Self::I64 => f.write_str("i64"),
            Self::F32 => f.write_str("f32"),
            Self::F64 => f.write_str("f64"),
            Self::Decimal => f.write_str("CqlDecimal"),
            Self::Varint => f.write_str("BigInt"),
            Self::Bytes => f.write_str("Blob"),
            Self::Inet => f.write_str("IpAddr"),
            Self::Timestamp => f.write_str("DateTime<Utc>"),
            Self::Uuid => f.write_str("Uuid"),
            Self::List(elem) => write!(f, "List<{elem}>"),
            Self::Set(elem) => write!(f, "Set<{elem}>"),
            Self::Map(key, value) => write!(f, "Map<{key}, {value}>"),
            Self::Udt(name) | Self::Opaque(name) => f.write_str(name),
        }
    }
}
