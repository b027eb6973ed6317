// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Server-side marshal class names (the internal type representation).
//!
//! A marshal type is a class name with optional parenthesized parameters,
//! e.g. `org.apache.cassandra.db.marshal.MapType(...UTF8Type,...Int32Type)`.
//! Class names are stored without the package prefix.

use super::wire_type::{ScalarKind, WireType};
use crate::config::{MARSHAL_PACKAGE, MAX_TYPE_DEPTH};
use crate::error::{Error, Result};
use std::fmt;
use std::sync::Arc;

/// Marshal class of a list column.
pub const LIST_TYPE: &str = "ListType";
/// Marshal class of a set column.
pub const SET_TYPE: &str = "SetType";
/// Marshal class of a map column.
pub const MAP_TYPE: &str = "MapType";

/// Wrappers that carry no type information of their own.
const TRANSPARENT_WRAPPERS: [&str; 2] = ["ReversedType", "FrozenType"];

/// Parsed marshal class with its type parameters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MarshalType {
    class: Arc<str>,
    params: Vec<MarshalType>,
}

impl MarshalType {
    /// A parameterless marshal type. A package prefix, if present, is dropped.
    pub fn new(class: &str) -> Self {
        Self {
            class: Arc::from(short_name(class)),
            params: Vec::new(),
        }
    }

    pub fn with_params(class: &str, params: Vec<MarshalType>) -> Self {
        Self {
            class: Arc::from(short_name(class)),
            params,
        }
    }

    /// Class name without the package prefix.
    pub fn class_name(&self) -> &str {
        &self.class
    }

    pub fn qualified_name(&self) -> String {
        format!("{MARSHAL_PACKAGE}{}", self.class)
    }

    pub fn params(&self) -> &[MarshalType] {
        &self.params
    }

    /// Strip `ReversedType(..)` and `FrozenType(..)` wrappers at every level.
    pub fn unwrap_modifiers(&self) -> MarshalType {
        if TRANSPARENT_WRAPPERS.contains(&&*self.class) && self.params.len() == 1 {
            return self.params[0].unwrap_modifiers();
        }
        MarshalType {
            class: Arc::clone(&self.class),
            params: self.params.iter().map(MarshalType::unwrap_modifiers).collect(),
        }
    }

    /// Parse the textual form produced by [`Display`](fmt::Display).
    pub fn parse(input: &str) -> Result<Self> {
        let mut pos = 0;
        let parsed = parse_at(input, &mut pos, 0)?;
        if !input[pos..].trim().is_empty() {
            return Err(malformed(input, "trailing characters", pos));
        }
        Ok(parsed)
    }
}

impl fmt::Display for MarshalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{MARSHAL_PACKAGE}{}", self.class)?;
        if self.params.is_empty() {
            return Ok(());
        }
        f.write_str("(")?;
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{param}")?;
        }
        f.write_str(")")
    }
}

impl ScalarKind {
    /// Marshal class the server uses for this kind.
    pub const fn marshal_class(self) -> &'static str {
        match self {
            Self::Ascii => "AsciiType",
            Self::BigInt => "LongType",
            Self::Blob => "BytesType",
            Self::Boolean => "BooleanType",
            Self::Counter => "CounterColumnType",
            Self::Decimal => "DecimalType",
            Self::Double => "DoubleType",
            Self::Float => "FloatType",
            Self::Inet => "InetAddressType",
            Self::Int => "Int32Type",
            Self::Text | Self::Varchar => "UTF8Type",
            Self::Timestamp => "TimestampType",
            Self::Uuid => "UUIDType",
            Self::Varint => "IntegerType",
            Self::TimeUuid => "TimeUUIDType",
        }
    }
}

impl WireType {
    /// Internal representation of this column type.
    pub fn marshal_type(&self) -> MarshalType {
        match self {
            Self::Scalar(kind) => MarshalType::new(kind.marshal_class()),
            Self::List(elem) => MarshalType::with_params(LIST_TYPE, vec![elem.marshal_type()]),
            Self::Set(elem) => MarshalType::with_params(SET_TYPE, vec![elem.marshal_type()]),
            Self::Map(key, value) => {
                MarshalType::with_params(MAP_TYPE, vec![key.marshal_type(), value.marshal_type()])
            }
        }
    }
}

fn short_name(class: &str) -> &str {
    let class = class.trim();
    class.rsplit('.').next().unwrap_or(class)
}

fn malformed(input: &str, reason: &str, pos: usize) -> Error {
    Error::MalformedType {
        input: input.to_string(),
        reason: format!("{reason} at offset {pos}"),
    }
}

fn parse_at(input: &str, pos: &mut usize, depth: usize) -> Result<MarshalType> {
    if depth > MAX_TYPE_DEPTH {
        return Err(malformed(
            input,
            &format!("nesting deeper than {MAX_TYPE_DEPTH}"),
            *pos,
        ));
    }
    let rest = &input[*pos..];
    let len = rest.find(['(', ')', ',']).unwrap_or(rest.len());
    let name = rest[..len].trim();
    if name.is_empty() {
        return Err(malformed(input, "expected a marshal class", *pos));
    }
    *pos += len;

    let mut params = Vec::new();
    if input[*pos..].starts_with('(') {
        *pos += 1;
        loop {
            params.push(parse_at(input, pos, depth + 1)?);
            match input[*pos..].chars().next() {
                Some(',') => *pos += 1,
                Some(')') => {
                    *pos += 1;
                    break;
                }
                _ => return Err(malformed(input, "unterminated parameter list", *pos)),
            }
        }
    }
    Ok(MarshalType::with_params(name, params))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nested() {
        let text = "org.apache.cassandra.db.marshal.MapType(\
                    org.apache.cassandra.db.marshal.UTF8Type,\
                    org.apache.cassandra.db.marshal.ListType(org.apache.cassandra.db.marshal.Int32Type))";
        let parsed = MarshalType::parse(text).expect("parse");
        assert_eq!(parsed.class_name(), MAP_TYPE);
        assert_eq!(parsed.params().len(), 2);
        assert_eq!(parsed.params()[1].params()[0].class_name(), "Int32Type");
        assert_eq!(parsed.to_string(), text);
    }

    #[test]
    fn test_unwrap_reversed_and_frozen() {
        let parsed = MarshalType::parse(
            "ReversedType(FrozenType(ListType(org.apache.cassandra.db.marshal.LongType)))",
        )
        .expect("parse");
        let unwrapped = parsed.unwrap_modifiers();
        assert_eq!(unwrapped.class_name(), LIST_TYPE);
        assert_eq!(unwrapped.params()[0].class_name(), "LongType");
    }

    #[test]
    fn test_parse_rejects_unbalanced() {
        assert!(MarshalType::parse("ListType(Int32Type").is_err());
        assert!(MarshalType::parse("").is_err());
    }

    #[test]
    fn test_parse_rejects_excessive_nesting() {
        let nested = |depth: usize| {
            format!("{}Int32Type{}", "ListType(".repeat(depth), ")".repeat(depth))
        };
        assert!(MarshalType::parse(&nested(MAX_TYPE_DEPTH)).is_ok());

        let err = MarshalType::parse(&nested(200_000)).expect_err("too deep");
        assert!(matches!(err, Error::MalformedType { .. }));
    }
}
