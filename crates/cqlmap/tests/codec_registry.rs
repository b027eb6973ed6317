// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Codec registry properties
//!
//! Values survive encode/decode through the codec the registry resolves, and
//! every wire type maps to its internal representation and back.

mod common;

use cqlmap::codec::CodecRegistry;
use cqlmap::types::{HostType, MarshalType, ScalarKind, Value, WireType};
use cqlmap::Error;
use proptest::prelude::*;

fn arb_scalar_kind() -> impl Strategy<Value = ScalarKind> {
    prop::sample::select(ScalarKind::ALL.to_vec())
}

fn arb_wire_type() -> impl Strategy<Value = WireType> {
    arb_scalar_kind()
        .prop_map(WireType::Scalar)
        .prop_recursive(3, 16, 2, |inner| {
            prop_oneof![
                inner.clone().prop_map(WireType::list),
                inner.clone().prop_map(WireType::set),
                (inner.clone(), inner).prop_map(|(k, v)| WireType::map(k, v)),
            ]
        })
}

fn round_trip(registry: &CodecRegistry, wire: &WireType, value: &Value) -> Value {
    let codec = registry.resolve(wire).expect("codec");
    let bytes = codec.encode(value).expect("encode");
    codec.decode(&bytes).expect("decode")
}

proptest! {
    #[test]
    fn int_values_survive(n in any::<i32>()) {
        let registry = CodecRegistry::new();
        let wire = WireType::scalar(ScalarKind::Int);
        prop_assert_eq!(round_trip(&registry, &wire, &Value::Int(n)), Value::Int(n));
    }

    #[test]
    fn bigint_values_survive(n in any::<i64>()) {
        let registry = CodecRegistry::new();
        let wire = WireType::scalar(ScalarKind::BigInt);
        prop_assert_eq!(round_trip(&registry, &wire, &Value::BigInt(n)), Value::BigInt(n));
    }

    #[test]
    fn finite_doubles_survive(x in any::<f64>().prop_filter("finite", |x| x.is_finite())) {
        let registry = CodecRegistry::new();
        let wire = WireType::scalar(ScalarKind::Double);
        prop_assert_eq!(round_trip(&registry, &wire, &Value::Double(x)), Value::Double(x));
    }

    #[test]
    fn text_values_survive(s in "\\PC{0,24}") {
        let registry = CodecRegistry::new();
        let wire = WireType::scalar(ScalarKind::Text);
        prop_assert_eq!(
            round_trip(&registry, &wire, &Value::Text(s.clone())),
            Value::Text(s)
        );
    }

    #[test]
    fn int_lists_survive(items in prop::collection::vec(any::<i32>(), 0..16)) {
        let registry = CodecRegistry::new();
        let wire = WireType::list(WireType::scalar(ScalarKind::Int));
        let value = Value::List(items.into_iter().map(Value::Int).collect());
        prop_assert_eq!(round_trip(&registry, &wire, &value), value);
    }

    #[test]
    fn text_int_maps_survive(entries in prop::collection::vec(("[a-z]{0,6}", any::<i32>()), 0..8)) {
        let registry = CodecRegistry::new();
        let wire = WireType::map(
            WireType::scalar(ScalarKind::Text),
            WireType::scalar(ScalarKind::Int),
        );
        let value = Value::Map(
            entries
                .into_iter()
                .map(|(k, v)| (Value::Text(k), Value::Int(v)))
                .collect(),
        );
        prop_assert_eq!(round_trip(&registry, &wire, &value), value);
    }

    #[test]
    fn wire_type_syntax_parses_back(wire in arb_wire_type()) {
        let parsed: WireType = wire.to_string().parse().expect("parse");
        prop_assert_eq!(parsed, wire);
    }

    #[test]
    fn internal_type_maps_back(wire in arb_wire_type()) {
        let registry = CodecRegistry::new();
        let codec = registry.resolve(&wire).expect("codec");
        let internal = codec.marshal_type();
        let back = registry.to_wire_type(&internal).expect("to_wire_type");
        prop_assert!(back.is_equivalent(&wire), "{} -> {} -> {}", wire, internal, back);

        let reparsed = registry
            .parse_internal_type(&internal.to_string())
            .expect("parse_internal_type");
        prop_assert_eq!(reparsed, back);
    }
}

#[test]
fn protocol_ids_and_names_resolve() {
    common::init_logging();
    for kind in ScalarKind::ALL {
        assert_eq!(ScalarKind::from_protocol_id(kind.protocol_id()).ok(), Some(kind));
        assert_eq!(ScalarKind::from_name(kind.name()).ok(), Some(kind));
    }
    assert_eq!(ScalarKind::Ascii.protocol_id(), 0x0001);
    assert_eq!(ScalarKind::Inet.protocol_id(), 0x0010);
    assert!(matches!(
        ScalarKind::from_protocol_id(0x0011),
        Err(Error::UnknownScalarKind { .. })
    ));
}

#[test]
fn reversed_and_frozen_wrappers_are_ignored() {
    let registry = CodecRegistry::new();
    let internal = MarshalType::parse(
        "org.apache.cassandra.db.marshal.ReversedType(org.apache.cassandra.db.marshal.FrozenType(org.apache.cassandra.db.marshal.SetType(org.apache.cassandra.db.marshal.UTF8Type)))",
    )
    .expect("marshal parse");
    assert_eq!(
        registry.to_wire_type(&internal).expect("wire type"),
        WireType::set(WireType::scalar(ScalarKind::Text))
    );
}

#[test]
fn deeply_nested_type_strings_are_rejected() {
    use cqlmap::config::MAX_TYPE_DEPTH;

    let nested = |depth: usize| format!("{}int{}", "list<".repeat(depth), ">".repeat(depth));
    let deepest: WireType = nested(MAX_TYPE_DEPTH).parse().expect("at the limit");
    assert!(deepest.to_string().starts_with("list<list<"));

    let err = nested(200_000).parse::<WireType>().expect_err("too deep");
    assert!(matches!(err, Error::MalformedType { .. }));
    let frozen = format!("{}int{}", "frozen<".repeat(MAX_TYPE_DEPTH + 1), ">".repeat(MAX_TYPE_DEPTH + 1));
    assert!(frozen.parse::<WireType>().is_err());
}

#[test]
fn assignability_is_directional() {
    let registry = CodecRegistry::new();
    assert!(registry.is_assignable_from(ScalarKind::Int, &HostType::I32));
    assert!(registry.is_assignable_to(ScalarKind::Int, &HostType::Number));
    assert!(!registry.is_assignable_from(ScalarKind::Int, &HostType::Number));
    assert!(!registry.is_assignable_to(ScalarKind::Int, &HostType::I64));
}

#[test]
fn host_types_pick_canonical_codecs() {
    let registry = CodecRegistry::new();
    let host = HostType::map(HostType::String, HostType::list(HostType::Uuid));
    assert_eq!(
        registry.wire_type_for(&host).expect("wire type").to_string(),
        "map<text, list<uuid>>"
    );
    assert!(matches!(
        registry.codec_for_host(&HostType::udt("address")),
        Err(Error::NoCodecForHostType { .. })
    ));
}
