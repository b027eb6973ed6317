// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Column type model.
//!
//! A [`WireType`] is either a scalar kind or a collection whose element,
//! key and value types are themselves wire types. Values are finite trees
//! and compare structurally.

use crate::config::MAX_TYPE_DEPTH;
use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Scalar (non-collection) column type kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ScalarKind {
    Ascii,
    BigInt,
    Blob,
    Boolean,
    Counter,
    Decimal,
    Double,
    Float,
    Inet,
    Int,
    Text,
    Timestamp,
    Uuid,
    Varchar,
    Varint,
    TimeUuid,
}

impl ScalarKind {
    /// Every scalar kind, in protocol id order.
    pub const ALL: [Self; 16] = [
        Self::Ascii,
        Self::BigInt,
        Self::Blob,
        Self::Boolean,
        Self::Counter,
        Self::Decimal,
        Self::Double,
        Self::Float,
        Self::Int,
        Self::Text,
        Self::Timestamp,
        Self::Uuid,
        Self::Varchar,
        Self::Varint,
        Self::TimeUuid,
        Self::Inet,
    ];

    /// Native protocol `[option]` id of this kind.
    // @audit-ok: Simple pattern matching (cyclo 16, cogni 1) - protocol id table
    pub const fn protocol_id(self) -> u16 {
        match self {
            Self::Ascii => 0x0001,
            Self::BigInt => 0x0002,
            Self::Blob => 0x0003,
            Self::Boolean => 0x0004,
            Self::Counter => 0x0005,
            Self::Decimal => 0x0006,
            Self::Double => 0x0007,
            Self::Float => 0x0008,
            Self::Int => 0x0009,
            Self::Text => 0x000A,
            Self::Timestamp => 0x000B,
            Self::Uuid => 0x000C,
            Self::Varchar => 0x000D,
            Self::Varint => 0x000E,
            Self::TimeUuid => 0x000F,
            Self::Inet => 0x0010,
        }
    }

    /// Look up a kind by its native protocol id.
    pub fn from_protocol_id(id: u16) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.protocol_id() == id)
            .ok_or_else(|| Error::UnknownScalarKind {
                kind: format!("0x{id:04x}"),
            })
    }

    /// CQL name of this kind.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ascii => "ascii",
            Self::BigInt => "bigint",
            Self::Blob => "blob",
            Self::Boolean => "boolean",
            Self::Counter => "counter",
            Self::Decimal => "decimal",
            Self::Double => "double",
            Self::Float => "float",
            Self::Inet => "inet",
            Self::Int => "int",
            Self::Text => "text",
            Self::Timestamp => "timestamp",
            Self::Uuid => "uuid",
            Self::Varchar => "varchar",
            Self::Varint => "varint",
            Self::TimeUuid => "timeuuid",
        }
    }

    /// Look up a kind by CQL name (case-insensitive).
    pub fn from_name(name: &str) -> Result<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| Error::UnknownScalarKind {
                kind: name.to_string(),
            })
    }

    /// Encoded size for fixed-width kinds, `None` for variable-width ones.
    pub const fn fixed_width(self) -> Option<usize> {
        match self {
            Self::Boolean => Some(1),
            Self::Int | Self::Float => Some(4),
            Self::BigInt | Self::Counter | Self::Double | Self::Timestamp => Some(8),
            Self::Uuid | Self::TimeUuid => Some(16),
            Self::Ascii
            | Self::Blob
            | Self::Decimal
            | Self::Inet
            | Self::Text
            | Self::Varchar
            | Self::Varint => None,
        }
    }

    /// `varchar` is an alias of `text`; every other kind is its own canonical form.
    pub const fn canonical(self) -> Self {
        match self {
            Self::Varchar => Self::Text,
            other => other,
        }
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Shape of a collection type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKind {
    List,
    Set,
    Map,
}

impl CollectionKind {
    pub const fn name(self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Set => "set",
            Self::Map => "map",
        }
    }
}

/// A column type: scalar, or a collection of column types.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum WireType {
    Scalar(ScalarKind),
    List(Box<WireType>),
    Set(Box<WireType>),
    Map(Box<WireType>, Box<WireType>),
}

impl WireType {
    pub const fn scalar(kind: ScalarKind) -> Self {
        Self::Scalar(kind)
    }

    pub fn list(element: WireType) -> Self {
        Self::List(Box::new(element))
    }

    pub fn set(element: WireType) -> Self {
        Self::Set(Box::new(element))
    }

    pub fn map(key: WireType, value: WireType) -> Self {
        Self::Map(Box::new(key), Box::new(value))
    }

    pub fn is_collection(&self) -> bool {
        !matches!(self, Self::Scalar(_))
    }

    pub fn as_scalar(&self) -> Option<ScalarKind> {
        match self {
            Self::Scalar(kind) => Some(*kind),
            _ => None,
        }
    }

    pub fn collection_kind(&self) -> Option<CollectionKind> {
        match self {
            Self::Scalar(_) => None,
            Self::List(_) => Some(CollectionKind::List),
            Self::Set(_) => Some(CollectionKind::Set),
            Self::Map(..) => Some(CollectionKind::Map),
        }
    }

    /// Same tree with every `varchar` replaced by `text`.
    pub fn normalized(&self) -> WireType {
        match self {
            Self::Scalar(kind) => Self::Scalar(kind.canonical()),
            Self::List(elem) => Self::list(elem.normalized()),
            Self::Set(elem) => Self::set(elem.normalized()),
            Self::Map(key, value) => Self::map(key.normalized(), value.normalized()),
        }
    }

    /// Structural equality modulo the `text`/`varchar` alias.
    pub fn is_equivalent(&self, other: &WireType) -> bool {
        self.normalized() == other.normalized()
    }
}

impl From<ScalarKind> for WireType {
    fn from(kind: ScalarKind) -> Self {
        Self::Scalar(kind)
    }
}

impl fmt::Display for WireType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(kind) => write!(f, "{kind}"),
            Self::List(elem) => write!(f, "list<{elem}>"),
            Self::Set(elem) => write!(f, "set<{elem}>"),
            Self::Map(key, value) => write!(f, "map<{key}, {value}>"),
        }
    }
}

impl FromStr for WireType {
    type Err = Error;

    /// Parse CQL type syntax such as `map<text, frozen<list<int>>>`.
    fn from_str(input: &str) -> Result<Self> {
        let mut parser = TypeParser::new(input);
        let parsed = parser.parse_type(0)?;
        parser.skip_whitespace();
        if parser.pos < parser.input.len() {
            return Err(parser.malformed("trailing characters"));
        }
        Ok(parsed)
    }
}

/// Recursive-descent parser over CQL type syntax.
struct TypeParser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> TypeParser<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn malformed(&self, reason: &str) -> Error {
        Error::MalformedType {
            input: self.input.to_string(),
            reason: format!("{reason} at offset {}", self.pos),
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.input[self.pos..].chars().next() {
            if !c.is_whitespace() {
                break;
            }
            self.pos += c.len_utf8();
        }
    }

    fn ident(&mut self) -> Result<&'a str> {
        self.skip_whitespace();
        let rest = &self.input[self.pos..];
        let len = rest
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .unwrap_or(rest.len());
        if len == 0 {
            return Err(self.malformed("expected a type name"));
        }
        self.pos += len;
        Ok(&rest[..len])
    }

    fn expect(&mut self, token: char) -> Result<()> {
        self.skip_whitespace();
        if self.input[self.pos..].starts_with(token) {
            self.pos += token.len_utf8();
            Ok(())
        } else {
            Err(self.malformed(&format!("expected '{token}'")))
        }
    }

    fn parse_type(&mut self, depth: usize) -> Result<WireType> {
        if depth > MAX_TYPE_DEPTH {
            return Err(self.malformed(&format!("nesting deeper than {MAX_TYPE_DEPTH}")));
        }
        let name = self.ident()?;
        match name.to_ascii_lowercase().as_str() {
            "frozen" => {
                self.expect('<')?;
                let inner = self.parse_type(depth + 1)?;
                self.expect('>')?;
                Ok(inner)
            }
            "list" => {
                self.expect('<')?;
                let elem = self.parse_type(depth + 1)?;
                self.expect('>')?;
                Ok(WireType::list(elem))
            }
            "set" => {
                self.expect('<')?;
                let elem = self.parse_type(depth + 1)?;
                self.expect('>')?;
                Ok(WireType::set(elem))
            }
            "map" => {
                self.expect('<')?;
                let key = self.parse_type(depth + 1)?;
                self.expect(',')?;
                let value = self.parse_type(depth + 1)?;
                self.expect('>')?;
                Ok(WireType::map(key, value))
            }
            _ => ScalarKind::from_name(name).map(WireType::Scalar),
        }
    }
}
