// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! List, set and map codecs (native protocol v3+ collection format).
//!
//! Layout: `[i32 count]` followed by `count` elements (maps: key then value),
//! each written as `[i32 length][bytes]`. Null elements are rejected.

use super::{Codec, CodecError, SharedCodec};
use crate::config::{COLLECTION_LENGTH_WIDTH, NULL_LENGTH};
use crate::types::{CollectionKind, HostType, Value, WireType};
use std::sync::Arc;

/// Collection writer.
struct Encoder {
    buffer: Vec<u8>,
    collection: CollectionKind,
}

impl Encoder {
    fn new(collection: CollectionKind, count: usize) -> Result<Self, CodecError> {
        let mut encoder = Self {
            buffer: Vec::new(),
            collection,
        };
        encoder.write_length(count)?;
        Ok(encoder)
    }

    fn into_bytes(self) -> Vec<u8> {
        self.buffer
    }

    fn write_length(&mut self, len: usize) -> Result<(), CodecError> {
        let len = i32::try_from(len)
            .map_err(|_| CodecError::InvalidData(format!("collection part too large: {len}")))?;
        self.buffer.extend_from_slice(&len.to_be_bytes());
        Ok(())
    }

    fn write_element(&mut self, codec: &dyn Codec, value: &Value) -> Result<(), CodecError> {
        if value.is_null() {
            return Err(CodecError::NullElement {
                collection: self.collection,
            });
        }
        let bytes = codec.encode(value)?;
        self.write_length(bytes.len())?;
        self.buffer.extend_from_slice(&bytes);
        Ok(())
    }
}

/// Collection reader.
struct Decoder<'a> {
    buffer: &'a [u8],
    offset: usize,
    collection: CollectionKind,
}

impl<'a> Decoder<'a> {
    fn new(buffer: &'a [u8], collection: CollectionKind) -> Self {
        Self {
            buffer,
            offset: 0,
            collection,
        }
    }

    fn remaining(&self) -> usize {
        self.buffer.len().saturating_sub(self.offset)
    }

    fn read_bytes(&mut self, count: usize) -> Result<&'a [u8], CodecError> {
        if count > self.remaining() {
            return Err(CodecError::BufferTooSmall {
                need: count,
                have: self.remaining(),
            });
        }
        let slice = &self.buffer[self.offset..self.offset + count];
        self.offset += count;
        Ok(slice)
    }

    fn read_i32(&mut self) -> Result<i32, CodecError> {
        let bytes = self.read_bytes(COLLECTION_LENGTH_WIDTH)?;
        Ok(i32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    fn read_count(&mut self) -> Result<usize, CodecError> {
        let count = self.read_i32()?;
        usize::try_from(count)
            .map_err(|_| CodecError::InvalidData(format!("negative element count {count}")))
    }

    fn read_element(&mut self, codec: &dyn Codec) -> Result<Value, CodecError> {
        let len = self.read_i32()?;
        if len <= NULL_LENGTH {
            return Err(CodecError::NullElement {
                collection: self.collection,
            });
        }
        let bytes = self.read_bytes(len as usize)?;
        codec.decode(bytes)
    }

    fn finish(self) -> Result<(), CodecError> {
        match self.remaining() {
            0 => Ok(()),
            remaining => Err(CodecError::TrailingBytes {
                collection: self.collection,
                remaining,
            }),
        }
    }
}

/// Codec of `list<T>` built from the codec of `T`.
#[derive(Debug)]
pub struct ListCodec {
    element: SharedCodec,
    wire: WireType,
    host: HostType,
}

impl ListCodec {
    pub fn new(element: SharedCodec) -> Self {
        Self {
            wire: WireType::list(element.wire_type().clone()),
            host: HostType::list(element.host_type().clone()),
            element,
        }
    }

    pub fn element(&self) -> &SharedCodec {
        &self.element
    }
}

impl Codec for ListCodec {
    fn wire_type(&self) -> &WireType {
        &self.wire
    }

    fn host_type(&self) -> &HostType {
        &self.host
    }

    fn encode(&self, value: &Value) -> Result<Vec<u8>, CodecError> {
        let Value::List(items) = value else {
            return Err(mismatch(&self.wire, value));
        };
        encode_elements(CollectionKind::List, self.element.as_ref(), items)
    }

    fn decode(&self, bytes: &[u8]) -> Result<Value, CodecError> {
        decode_elements(CollectionKind::List, self.element.as_ref(), bytes).map(Value::List)
    }
}

/// Codec of `set<T>` built from the codec of `T`.
///
/// Element order is preserved as read; duplicates are not collapsed.
#[derive(Debug)]
pub struct SetCodec {
    element: SharedCodec,
    wire: WireType,
    host: HostType,
}

impl SetCodec {
    pub fn new(element: SharedCodec) -> Self {
        Self {
            wire: WireType::set(element.wire_type().clone()),
            host: HostType::set(element.host_type().clone()),
            element,
        }
    }

    pub fn element(&self) -> &SharedCodec {
        &self.element
    }
}

impl Codec for SetCodec {
    fn wire_type(&self) -> &WireType {
        &self.wire
    }

    fn host_type(&self) -> &HostType {
        &self.host
    }

    fn encode(&self, value: &Value) -> Result<Vec<u8>, CodecError> {
        match value {
            Value::Set(items) | Value::List(items) => {
                encode_elements(CollectionKind::Set, self.element.as_ref(), items)
            }
            other => Err(mismatch(&self.wire, other)),
        }
    }

    fn decode(&self, bytes: &[u8]) -> Result<Value, CodecError> {
        decode_elements(CollectionKind::Set, self.element.as_ref(), bytes).map(Value::Set)
    }
}

/// Codec of `map<K, V>` built from the codecs of `K` and `V`.
#[derive(Debug)]
pub struct MapCodec {
    key: SharedCodec,
    value: SharedCodec,
    wire: WireType,
    host: HostType,
}

impl MapCodec {
    pub fn new(key: SharedCodec, value: SharedCodec) -> Self {
        Self {
            wire: WireType::map(key.wire_type().clone(), value.wire_type().clone()),
            host: HostType::map(key.host_type().clone(), value.host_type().clone()),
            key,
            value,
        }
    }

    pub fn key(&self) -> &SharedCodec {
        &self.key
    }

    pub fn value(&self) -> &SharedCodec {
        &self.value
    }
}

impl Codec for MapCodec {
    fn wire_type(&self) -> &WireType {
        &self.wire
    }

    fn host_type(&self) -> &HostType {
        &self.host
    }

    fn encode(&self, value: &Value) -> Result<Vec<u8>, CodecError> {
        let Value::Map(entries) = value else {
            return Err(mismatch(&self.wire, value));
        };
        let mut encoder = Encoder::new(CollectionKind::Map, entries.len())?;
        for (k, v) in entries {
            encoder.write_element(self.key.as_ref(), k)?;
            encoder.write_element(self.value.as_ref(), v)?;
        }
        Ok(encoder.into_bytes())
    }

    fn decode(&self, bytes: &[u8]) -> Result<Value, CodecError> {
        if bytes.is_empty() {
            return Ok(Value::Map(Vec::new()));
        }
        let mut decoder = Decoder::new(bytes, CollectionKind::Map);
        let count = decoder.read_count()?;
        let mut entries = Vec::with_capacity(count.min(decoder.remaining()));
        for _ in 0..count {
            let k = decoder.read_element(self.key.as_ref())?;
            let v = decoder.read_element(self.value.as_ref())?;
            entries.push((k, v));
        }
        decoder.finish()?;
        Ok(Value::Map(entries))
    }
}

fn mismatch(wire: &WireType, value: &Value) -> CodecError {
    CodecError::TypeMismatch {
        expected: wire.clone(),
        found: value.type_name(),
    }
}

fn encode_elements(
    collection: CollectionKind,
    element: &dyn Codec,
    items: &[Value],
) -> Result<Vec<u8>, CodecError> {
    let mut encoder = Encoder::new(collection, items.len())?;
    for item in items {
        encoder.write_element(element, item)?;
    }
    Ok(encoder.into_bytes())
}

fn decode_elements(
    collection: CollectionKind,
    element: &dyn Codec,
    bytes: &[u8],
) -> Result<Vec<Value>, CodecError> {
    // An empty buffer is how servers send an empty collection.
    if bytes.is_empty() {
        return Ok(Vec::new());
    }
    let mut decoder = Decoder::new(bytes, collection);
    let count = decoder.read_count()?;
    let mut items = Vec::with_capacity(count.min(decoder.remaining()));
    for _ in 0..count {
        items.push(decoder.read_element(element)?);
    }
    decoder.finish()?;
    Ok(items)
}

/// Composite codecs share their element codecs.
pub(crate) fn list_of(element: SharedCodec) -> SharedCodec {
    Arc::new(ListCodec::new(element))
}

pub(crate) fn set_of(element: SharedCodec) -> SharedCodec {
    Arc::new(SetCodec::new(element))
}

pub(crate) fn map_of(key: SharedCodec, value: SharedCodec) -> SharedCodec {
    Arc::new(MapCodec::new(key, value))
}
