// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Runtime host values and the Rust types that map onto them.

use super::host::HostType;
use chrono::{DateTime, Utc};
use num_bigint::BigInt;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::fmt;
use std::hash::Hash;
use std::net::{IpAddr, Ipv4Addr};
use uuid::Uuid;

/// A host value that a codec can encode or produce.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Boolean(bool),
    Int(i32),
    BigInt(i64),
    Float(f32),
    Double(f64),
    Text(String),
    Blob(Vec<u8>),
    Decimal(CqlDecimal),
    Varint(BigInt),
    Inet(IpAddr),
    Timestamp(DateTime<Utc>),
    Uuid(Uuid),

    // Collections
    List(Vec<Value>),
    Set(Vec<Value>),
    Map(Vec<(Value, Value)>),
}

impl Value {
    /// Short variant name, used in mismatch diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean(_) => "boolean",
            Self::Int(_) => "int",
            Self::BigInt(_) => "bigint",
            Self::Float(_) => "float",
            Self::Double(_) => "double",
            Self::Text(_) => "text",
            Self::Blob(_) => "blob",
            Self::Decimal(_) => "decimal",
            Self::Varint(_) => "varint",
            Self::Inet(_) => "inet",
            Self::Timestamp(_) => "timestamp",
            Self::Uuid(_) => "uuid",
            Self::List(_) => "list",
            Self::Set(_) => "set",
            Self::Map(_) => "map",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::BigInt(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Double(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Blob(v) => Some(v),
            _ => None,
        }
    }

    /// Elements of a list or set.
    pub fn as_elements(&self) -> Option<&[Value]> {
        match self {
            Self::List(v) | Self::Set(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_entries(&self) -> Option<&[(Value, Value)]> {
        match self {
            Self::Map(v) => Some(v),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::BigInt(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Double(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<Uuid> for Value {
    fn from(v: Uuid) -> Self {
        Self::Uuid(v)
    }
}

/// Raw bytes (`blob`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Blob(pub Vec<u8>);

impl From<Vec<u8>> for Blob {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

/// Arbitrary-precision decimal: `unscaled * 10^-scale`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct CqlDecimal {
    pub unscaled: BigInt,
    pub scale: i32,
}

impl CqlDecimal {
    pub fn new(unscaled: impl Into<BigInt>, scale: i32) -> Self {
        Self {
            unscaled: unscaled.into(),
            scale,
        }
    }
}

/// Plain notation while the adjusted exponent stays at or above -6 and the
/// scale is non-negative, `E` notation otherwise.
impl fmt::Display for CqlDecimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.unscaled.magnitude().to_string();
        if self.unscaled.sign() == num_bigint::Sign::Minus {
            f.write_str("-")?;
        }
        let adjusted = digits.len() as i64 - 1 - i64::from(self.scale);

        if self.scale == 0 {
            return f.write_str(&digits);
        }
        if self.scale > 0 && adjusted >= -6 {
            let scale = self.scale as usize;
            return if digits.len() > scale {
                let (int_part, frac_part) = digits.split_at(digits.len() - scale);
                write!(f, "{int_part}.{frac_part}")
            } else {
                // At most five zeros: adjusted >= -6.
                let pad = "0".repeat(scale - digits.len());
                write!(f, "0.{pad}{digits}")
            };
        }

        let (first, rest) = digits.split_at(1);
        f.write_str(first)?;
        if !rest.is_empty() {
            write!(f, ".{rest}")?;
        }
        write!(f, "E{}{adjusted}", if adjusted > 0 { "+" } else { "" })
    }
}

/// A host value did not have the shape the target Rust type needs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("expected a value of type {expected}, found {found}")]
pub struct ConversionError {
    pub expected: HostType,
    pub found: &'static str,
}

impl ConversionError {
    fn new<T: HostRepr>(found: &Value) -> Self {
        Self {
            expected: T::host_type(),
            found: found.type_name(),
        }
    }
}

/// A Rust type that maps onto a [`HostType`] and converts to and from [`Value`].
///
/// `Value::Null` converts to the type's zero value; use `Option<T>` to keep
/// the distinction.
pub trait HostRepr: Sized {
    fn host_type() -> HostType;

    fn into_value(self) -> Value;

    fn from_value(value: Value) -> Result<Self, ConversionError>;
}

macro_rules! scalar_repr {
    ($ty:ty, $host:expr, $variant:ident, $zero:expr) => {
        impl HostRepr for $ty {
            fn host_type() -> HostType {
                $host
            }

            fn into_value(self) -> Value {
                Value::$variant(self.into())
            }

            fn from_value(value: Value) -> Result<Self, ConversionError> {
                match value {
                    Value::$variant(v) => Ok(v.into()),
                    Value::Null => Ok($zero),
                    other => Err(ConversionError::new::<Self>(&other)),
                }
            }
        }
    };
}

scalar_repr!(String, HostType::String, Text, String::new());
scalar_repr!(bool, HostType::Bool, Boolean, false);
scalar_repr!(i32, HostType::I32, Int, 0);
scalar_repr!(i64, HostType::I64, BigInt, 0);
scalar_repr!(f32, HostType::F32, Float, 0.0);
scalar_repr!(f64, HostType::F64, Double, 0.0);
scalar_repr!(CqlDecimal, HostType::Decimal, Decimal, CqlDecimal::default());
scalar_repr!(BigInt, HostType::Varint, Varint, BigInt::default());
scalar_repr!(IpAddr, HostType::Inet, Inet, IpAddr::V4(Ipv4Addr::UNSPECIFIED));
scalar_repr!(DateTime<Utc>, HostType::Timestamp, Timestamp, DateTime::<Utc>::default());
scalar_repr!(Uuid, HostType::Uuid, Uuid, Uuid::nil());

impl HostRepr for Blob {
    fn host_type() -> HostType {
        HostType::Bytes
    }

    fn into_value(self) -> Value {
        Value::Blob(self.0)
    }

    fn from_value(value: Value) -> Result<Self, ConversionError> {
        match value {
            Value::Blob(v) => Ok(Blob(v)),
            Value::Null => Ok(Blob::default()),
            other => Err(ConversionError::new::<Self>(&other)),
        }
    }
}

impl<T: HostRepr> HostRepr for Option<T> {
    fn host_type() -> HostType {
        T::host_type()
    }

    fn into_value(self) -> Value {
        self.map_or(Value::Null, HostRepr::into_value)
    }

    fn from_value(value: Value) -> Result<Self, ConversionError> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

fn elements<C: HostRepr>(value: Value) -> Result<Option<Vec<Value>>, ConversionError> {
    match value {
        Value::List(v) | Value::Set(v) => Ok(Some(v)),
        Value::Null => Ok(None),
        other => Err(ConversionError::new::<C>(&other)),
    }
}

impl<T: HostRepr> HostRepr for Vec<T> {
    fn host_type() -> HostType {
        HostType::list(T::host_type())
    }

    fn into_value(self) -> Value {
        Value::List(self.into_iter().map(HostRepr::into_value).collect())
    }

    fn from_value(value: Value) -> Result<Self, ConversionError> {
        elements::<Self>(value)?
            .unwrap_or_default()
            .into_iter()
            .map(T::from_value)
            .collect()
    }
}

impl<T: HostRepr + Eq + Hash> HostRepr for HashSet<T> {
    fn host_type() -> HostType {
        HostType::set(T::host_type())
    }

    fn into_value(self) -> Value {
        Value::Set(self.into_iter().map(HostRepr::into_value).collect())
    }

    fn from_value(value: Value) -> Result<Self, ConversionError> {
        elements::<Self>(value)?
            .unwrap_or_default()
            .into_iter()
            .map(T::from_value)
            .collect()
    }
}

impl<T: HostRepr + Ord> HostRepr for BTreeSet<T> {
    fn host_type() -> HostType {
        HostType::set(T::host_type())
    }

    fn into_value(self) -> Value {
        Value::Set(self.into_iter().map(HostRepr::into_value).collect())
    }

    fn from_value(value: Value) -> Result<Self, ConversionError> {
        elements::<Self>(value)?
            .unwrap_or_default()
            .into_iter()
            .map(T::from_value)
            .collect()
    }
}

fn entries<C: HostRepr>(value: Value) -> Result<Vec<(Value, Value)>, ConversionError> {
    match value {
        Value::Map(v) => Ok(v),
        Value::Null => Ok(Vec::new()),
        other => Err(ConversionError::new::<C>(&other)),
    }
}

impl<K: HostRepr + Eq + Hash, V: HostRepr> HostRepr for HashMap<K, V> {
    fn host_type() -> HostType {
        HostType::map(K::host_type(), V::host_type())
    }

    fn into_value(self) -> Value {
        Value::Map(
            self.into_iter()
                .map(|(k, v)| (k.into_value(), v.into_value()))
                .collect(),
        )
    }

    fn from_value(value: Value) -> Result<Self, ConversionError> {
        entries::<Self>(value)?
            .into_iter()
            .map(|(k, v)| Ok((K::from_value(k)?, V::from_value(v)?)))
            .collect()
    }
}

impl<K: HostRepr + Ord, V: HostRepr> HostRepr for BTreeMap<K, V> {
    fn host_type() -> HostType {
        HostType::map(K::host_type(), V::host_type())
    }

    fn into_value(self) -> Value {
        Value::Map(
            self.into_iter()
                .map(|(k, v)| (k.into_value(), v.into_value()))
                .collect(),
        )
    }

    fn from_value(value: Value) -> Result<Self, ConversionError> {
        entries::<Self>(value)?
            .into_iter()
            .map(|(k, v)| Ok((K::from_value(k)?, V::from_value(v)?)))
            .collect()
    }
}
