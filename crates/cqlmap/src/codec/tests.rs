// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use super::*;
use crate::error::Error;
use crate::types::{CqlDecimal, Value};
use chrono::{TimeZone, Utc};
use num_bigint::BigInt;
use std::net::{IpAddr, Ipv6Addr};
use uuid::Uuid;

fn text() -> WireType {
    WireType::scalar(ScalarKind::Text)
}

fn int() -> WireType {
    WireType::scalar(ScalarKind::Int)
}

#[test]
fn test_every_scalar_kind_resolves_and_maps_back() {
    let registry = CodecRegistry::new();
    for kind in ScalarKind::ALL {
        let wire = WireType::scalar(kind);
        let codec = registry.resolve(&wire).expect("default codec");
        assert_eq!(codec.wire_type(), &wire);

        let back = registry
            .to_wire_type(&codec.marshal_type())
            .expect("inverse lookup");
        assert!(back.is_equivalent(&wire), "{kind} came back as {back}");
    }
}

#[test]
fn test_varchar_maps_back_to_text() {
    let registry = CodecRegistry::new();
    let codec = registry
        .resolve(&WireType::scalar(ScalarKind::Varchar))
        .expect("varchar codec");
    assert_eq!(
        registry.to_wire_type(&codec.marshal_type()).expect("inverse"),
        text()
    );
}

#[test]
fn test_int_encoding_is_big_endian() {
    let codec = ScalarCodec::new(ScalarKind::Int);
    assert_eq!(
        codec.encode(&Value::Int(0x0102_0304)).expect("encode"),
        vec![1, 2, 3, 4]
    );
    assert_eq!(codec.decode(&[0xff, 0xff, 0xff, 0xfe]).expect("decode"), Value::Int(-2));
}

#[test]
fn test_fixed_width_length_is_checked() {
    let codec = ScalarCodec::new(ScalarKind::BigInt);
    let err = codec.decode(&[0, 1, 2]).expect_err("short bigint");
    assert_eq!(
        err,
        CodecError::InvalidLength {
            kind: ScalarKind::BigInt,
            expected: 8,
            found: 3
        }
    );
    assert_eq!(codec.decode(&[]).expect("empty"), Value::Null);
}

#[test]
fn test_ascii_rejects_non_ascii() {
    let codec = ScalarCodec::new(ScalarKind::Ascii);
    assert_eq!(
        codec.encode(&Value::Text("caf\u{e9}".into())),
        Err(CodecError::NonAscii)
    );
    assert_eq!(codec.decode(&[0xc3, 0xa9]), Err(CodecError::NonAscii));
}

#[test]
fn test_decimal_and_varint_encoding() {
    let decimal = ScalarCodec::new(ScalarKind::Decimal);
    let value = Value::Decimal(CqlDecimal::new(-12345, 2));
    let bytes = decimal.encode(&value).expect("encode decimal");
    assert_eq!(&bytes[..4], &[0, 0, 0, 2]);
    assert_eq!(decimal.decode(&bytes).expect("decode decimal"), value);

    let varint = ScalarCodec::new(ScalarKind::Varint);
    assert_eq!(
        varint.encode(&Value::Varint(BigInt::from(128))).expect("encode"),
        vec![0x00, 0x80]
    );
    assert_eq!(
        varint.decode(&[0xff]).expect("decode"),
        Value::Varint(BigInt::from(-1))
    );
}

#[test]
fn test_timestamp_is_milliseconds() {
    let codec = ScalarCodec::new(ScalarKind::Timestamp);
    let ts = Utc
        .timestamp_millis_opt(1_700_000_000_123)
        .single()
        .expect("valid timestamp");
    let bytes = codec.encode(&Value::Timestamp(ts)).expect("encode");
    assert_eq!(bytes, 1_700_000_000_123i64.to_be_bytes().to_vec());
    assert_eq!(codec.decode(&bytes).expect("decode"), Value::Timestamp(ts));
}

#[test]
fn test_inet_v6() {
    let codec = ScalarCodec::new(ScalarKind::Inet);
    let addr = Value::Inet(IpAddr::V6(Ipv6Addr::LOCALHOST));
    let bytes = codec.encode(&addr).expect("encode");
    assert_eq!(bytes.len(), 16);
    assert_eq!(codec.decode(&bytes).expect("decode"), addr);
    assert!(matches!(
        codec.decode(&[1, 2, 3]),
        Err(CodecError::InvalidData(_))
    ));
}

#[test]
fn test_timeuuid_requires_version_1() {
    let codec = ScalarCodec::new(ScalarKind::TimeUuid);
    assert!(matches!(
        codec.encode(&Value::Uuid(Uuid::new_v4())),
        Err(CodecError::InvalidData(_))
    ));
    let random = Uuid::new_v4();
    assert!(matches!(
        codec.decode(random.as_bytes()),
        Err(CodecError::InvalidData(_))
    ));
    let uuid = ScalarCodec::new(ScalarKind::Uuid);
    assert!(uuid.encode(&Value::Uuid(random)).is_ok());
    assert_eq!(
        uuid.decode(random.as_bytes()).expect("any uuid"),
        Value::Uuid(random)
    );
}

#[test]
fn test_type_mismatch() {
    let codec = ScalarCodec::new(ScalarKind::Int);
    assert_eq!(
        codec.encode(&Value::Text("1".into())),
        Err(CodecError::TypeMismatch {
            expected: int(),
            found: "text"
        })
    );
    assert_eq!(codec.encode(&Value::Null), Err(CodecError::NullValue));
}

#[test]
fn test_nested_collection_roundtrip() {
    let registry = CodecRegistry::new();
    let wire = WireType::list(WireType::set(WireType::map(text(), int())));
    let codec = registry.resolve(&wire).expect("composite codec");
    assert_eq!(codec.wire_type(), &wire);
    assert_eq!(
        codec.host_type(),
        &HostType::list(HostType::set(HostType::map(HostType::String, HostType::I32)))
    );

    let empty = Value::List(Vec::new());
    let bytes = codec.encode(&empty).expect("encode empty");
    assert_eq!(bytes, vec![0, 0, 0, 0]);
    assert_eq!(codec.decode(&bytes).expect("decode empty"), empty);

    let value = Value::List(vec![
        Value::Set(vec![Value::Map(vec![
            (Value::from("a"), Value::Int(1)),
            (Value::from("b"), Value::Int(2)),
        ])]),
        Value::Set(Vec::new()),
    ]);
    let bytes = codec.encode(&value).expect("encode");
    assert_eq!(codec.decode(&bytes).expect("decode"), value);
}

#[test]
fn test_collection_rejects_null_elements() {
    let registry = CodecRegistry::new();
    let codec = registry.resolve(&WireType::list(int())).expect("list codec");
    assert_eq!(
        codec.encode(&Value::List(vec![Value::Int(1), Value::Null])),
        Err(CodecError::NullElement {
            collection: CollectionKind::List
        })
    );

    let mut bytes = 1i32.to_be_bytes().to_vec();
    bytes.extend_from_slice(&(-1i32).to_be_bytes());
    assert_eq!(
        codec.decode(&bytes),
        Err(CodecError::NullElement {
            collection: CollectionKind::List
        })
    );
}

#[test]
fn test_collection_detects_truncation_and_trailing_bytes() {
    let registry = CodecRegistry::new();
    let codec = registry.resolve(&WireType::set(int())).expect("set codec");
    let mut bytes = codec
        .encode(&Value::Set(vec![Value::Int(7)]))
        .expect("encode");

    assert!(matches!(
        codec.decode(&bytes[..bytes.len() - 1]),
        Err(CodecError::BufferTooSmall { .. })
    ));

    bytes.push(0);
    assert_eq!(
        codec.decode(&bytes),
        Err(CodecError::TrailingBytes {
            collection: CollectionKind::Set,
            remaining: 1
        })
    );
}

#[test]
fn test_unknown_wire_type_when_codec_removed() {
    let registry = CodecRegistry::builder().without(ScalarKind::Inet).build();
    let err = registry
        .resolve(&WireType::map(text(), WireType::scalar(ScalarKind::Inet)))
        .expect_err("inet removed");
    assert!(matches!(err, Error::UnknownWireType { ref type_name } if type_name == "inet"));
}

#[test]
fn test_unknown_internal_type() {
    let registry = CodecRegistry::new();
    let err = registry
        .parse_internal_type("org.apache.cassandra.db.marshal.DurationType")
        .expect_err("duration unsupported");
    assert!(matches!(
        err,
        Error::UnknownInternalType { ref type_name }
            if type_name == "org.apache.cassandra.db.marshal.DurationType"
    ));
}

#[test]
fn test_internal_collection_and_wrappers() {
    let registry = CodecRegistry::new();
    let wire = registry
        .parse_internal_type(
            "org.apache.cassandra.db.marshal.ReversedType(\
             org.apache.cassandra.db.marshal.MapType(\
             org.apache.cassandra.db.marshal.UTF8Type,\
             org.apache.cassandra.db.marshal.FrozenType(\
             org.apache.cassandra.db.marshal.ListType(\
             org.apache.cassandra.db.marshal.DateType))))",
        )
        .expect("convert");
    assert_eq!(
        wire,
        WireType::map(
            text(),
            WireType::list(WireType::scalar(ScalarKind::Timestamp))
        )
    );
}

#[test]
fn test_assignability_is_directional() {
    let registry = CodecRegistry::new();

    assert!(registry.is_assignable_from(ScalarKind::Int, &HostType::I32));
    assert!(!registry.is_assignable_from(ScalarKind::Int, &HostType::Number));
    assert!(registry.is_assignable_to(ScalarKind::Int, &HostType::Number));
    assert!(registry.is_assignable_to(ScalarKind::Int, &HostType::Any));
    assert!(!registry.is_assignable_to(ScalarKind::Int, &HostType::I64));

    assert!(registry.is_assignable_from(ScalarKind::Varchar, &HostType::String));
    assert!(registry.is_assignable_to(ScalarKind::TimeUuid, &HostType::Uuid));
    assert!(!registry.is_assignable_from(ScalarKind::Blob, &HostType::String));
}

#[test]
fn test_codec_for_host() {
    let registry = CodecRegistry::new();
    let codec = registry
        .codec_for_host(&HostType::map(HostType::String, HostType::list(HostType::Uuid)))
        .expect("codec");
    assert_eq!(
        codec.wire_type(),
        &WireType::map(text(), WireType::list(WireType::scalar(ScalarKind::Uuid)))
    );

    assert!(matches!(
        registry.codec_for_host(&HostType::udt("Address")),
        Err(Error::NoCodecForHostType { .. })
    ));
}

#[test]
fn test_builder_overrides_codec() {
    #[derive(Debug)]
    struct Upper {
        wire: WireType,
        host: HostType,
    }

    impl Codec for Upper {
        fn wire_type(&self) -> &WireType {
            &self.wire
        }

        fn host_type(&self) -> &HostType {
            &self.host
        }

        fn encode(&self, value: &Value) -> Result<Vec<u8>, CodecError> {
            let s = value.as_str().ok_or(CodecError::NullValue)?;
            Ok(s.to_uppercase().into_bytes())
        }

        fn decode(&self, bytes: &[u8]) -> Result<Value, CodecError> {
            Ok(Value::Text(String::from_utf8_lossy(bytes).into_owned()))
        }
    }

    let registry = CodecRegistry::builder()
        .codec(
            ScalarKind::Text,
            Arc::new(Upper {
                wire: text(),
                host: HostType::String,
            }),
        )
        .build();
    let codec = registry.resolve(&WireType::list(text())).expect("list<text>");
    let bytes = codec
        .encode(&Value::List(vec![Value::from("ab")]))
        .expect("encode");
    assert_eq!(&bytes[8..], b"AB");
}
