// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! `#[derive(Mapped)]` end to end
//!
//! Derived declarations resolve to the same descriptors a hand-written
//! `ClassDecl` would produce.

mod common;

use cqlmap::codec::{ScalarCodec, SharedCodec};
use cqlmap::mapping::{
    ClassDecl, ClassShape, ColumnName, MemberDecl, MemberOrigin, PropertyMarker, PropertyRole,
};
use cqlmap::types::{HostType, ScalarKind, Value};
use cqlmap::{Error, Mapped};
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

fn text_codec() -> SharedCodec {
    Arc::new(ScalarCodec::new(ScalarKind::Ascii))
}

/// Interface declared by hand; the derive only generates classes.
struct Labelled;

impl Mapped for Labelled {
    fn class_decl() -> Arc<ClassDecl> {
        ClassDecl::builder("Labelled", ClassShape::Interface)
            .member(
                MemberDecl::declared(
                    "labels",
                    MemberOrigin::Getter,
                    HostType::set(HostType::String),
                )
                .with_marker(PropertyMarker::Column(ColumnName::named("tag_set"))),
            )
            .build()
    }
}

#[derive(Debug, Default, Mapped)]
#[cql(table = "Readings", keyspace = "Telemetry", case_sensitive_name)]
struct Reading {
    #[cql(partition_key)]
    sensor: Uuid,
    #[cql(partition_key = 1)]
    day: i32,
    #[cql(clustering_column)]
    ts: i64,
    #[cql(column = "Value", case_sensitive)]
    value: f64,
    #[cql(computed = "ttl(value)")]
    ttl: i32,
    #[cql(frozen_value)]
    history: Vec<Vec<f64>>,
    #[cql(transient)]
    poll_interval: Duration,
    #[cql(codec = text_codec)]
    unit: String,
}

#[derive(Debug, Default, Clone, Mapped)]
struct Audited {
    #[cql(column = "created_at")]
    created: i64,
    #[cql(transient)]
    dirty: bool,
}

#[derive(Debug, Default, Mapped)]
#[cql(table, keyspace = "notes_ks", implements(Labelled))]
struct Note {
    #[cql(extends)]
    audit: Audited,
    #[cql(partition_key)]
    id: Uuid,
    body: String,
    labels: BTreeSet<String>,
}

#[derive(Debug, Default, Mapped)]
#[cql(udt = "address", keyspace = "ks")]
struct Address {
    #[cql(field = "Street", case_sensitive)]
    street: String,
    #[cql(field)]
    zip: i32,
}

#[derive(Debug, Default, Mapped)]
#[cql(table = "bad", keyspace = "ks")]
struct BadCodec {
    #[cql(partition_key, codec = text_codec)]
    id: i32,
}

#[test]
fn table_attributes_resolve() {
    let readings = common::manager()
        .table_descriptor::<Reading>()
        .expect("readings");

    assert_eq!(readings.keyspace(), Some("telemetry"));
    assert_eq!(readings.name(), Some("\"Readings\""));

    let pk: Vec<_> = readings.partition_key().map(|p| p.name()).collect();
    assert_eq!(pk, ["sensor", "day"]);
    let cc: Vec<_> = readings.clustering_columns().map(|p| p.name()).collect();
    assert_eq!(cc, ["ts"]);

    let property = |name: &str| readings.property(name).expect(name);
    assert_eq!(property("value").column_name(), "\"Value\"");
    assert_eq!(
        property("ttl").role(),
        &PropertyRole::Computed(Arc::from("ttl(value)"))
    );
    assert!(property("history").frozen().value);
    assert!(property("poll_interval").is_transient());
    assert_eq!(property("poll_interval").host_type(), &HostType::Any);
    assert_eq!(
        property("history").host_type(),
        &HostType::list(HostType::list(HostType::F64))
    );
    assert!(property("unit").custom_codec().is_some());
    assert!(property("value").custom_codec().is_none());
}

#[test]
fn derived_accessors_read_and_write_fields() {
    let readings = common::manager()
        .table_descriptor::<Reading>()
        .expect("readings");

    let mut reading = Reading::default();
    readings
        .property("value")
        .expect("value")
        .set_value(&mut reading, Value::Double(21.5))
        .expect("write");
    assert_eq!(reading.value, 21.5);
    assert_eq!(
        readings.property("day").expect("day").get_value(&reading).expect("read"),
        Value::Int(0)
    );
    // Transient fields carry no accessor.
    assert!(readings
        .property("poll_interval")
        .expect("poll_interval")
        .get_value(&reading)
        .is_err());
}

#[test]
fn embedded_superclass_and_interface() {
    let notes = common::manager().table_descriptor::<Note>().expect("notes");

    assert_eq!(notes.name(), Some("note"));
    // Superclass properties first.
    let names: Vec<_> = notes.properties().map(|p| p.name()).collect();
    assert_eq!(&names[..2], ["created", "dirty"]);
    assert_eq!(names.len(), 5);
    assert_eq!(
        notes.property("labels").map(|p| p.column_name()),
        Some("tag_set")
    );
    assert!(notes.property("dirty").is_some_and(|p| p.is_transient()));

    let mut note = Note::default();
    let created = notes.property("created").expect("created");
    assert_eq!(created.column_name(), "created_at");
    created
        .set_value(&mut note, Value::BigInt(1_700_000_000_000))
        .expect("write through embedded base");
    assert_eq!(note.audit.created, 1_700_000_000_000);
    assert_eq!(
        created.get_value(&note).expect("read"),
        Value::BigInt(1_700_000_000_000)
    );
}

#[test]
fn udt_fields_resolve() {
    let address = common::manager()
        .udt_descriptor::<Address>()
        .expect("address");
    assert_eq!(
        address.mapped_columns().map(|p| p.column_name()).collect::<Vec<_>>(),
        ["\"Street\"", "zip"]
    );
}

#[test]
fn class_decl_is_built_once() {
    assert!(Arc::ptr_eq(&Note::class_decl(), &Note::class_decl()));
    let decl = Note::class_decl();
    assert_eq!(decl.name(), "Note");
    assert_eq!(
        decl.superclass().map(|s| s.decl.name()),
        Some("Audited")
    );
    assert_eq!(decl.interfaces().len(), 1);
}

#[test]
fn incompatible_custom_codec_is_rejected() {
    let err = common::manager()
        .table_descriptor::<BadCodec>()
        .expect_err("ascii codec on i32");
    assert!(matches!(
        err,
        Error::IncompatibleCodec { property_type: HostType::I32, .. }
    ));
}
