// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![allow(clippy::items_after_statements)] // Test fixtures next to their test

//! Diagnostics for invalid mapping markers
//!
//! Each case declares one misconfigured entity and checks the exact message
//! reported when its descriptor is requested.

mod common;

use cqlmap::mapping::{ClassDecl, ClassShape, MappingKind};
use cqlmap::{Error, Mapped};

fn table_error<T: Mapped>() -> Error {
    common::manager()
        .table_descriptor::<T>()
        .expect_err("descriptor should be rejected")
}

#[test]
fn missing_table_marker() {
    #[derive(Default, Mapped)]
    struct Plain {
        id: i32,
    }

    let err = table_error::<Plain>();
    assert!(matches!(err, Error::MissingMapping { .. }));
    assert_eq!(err.to_string(), "@Table annotation was not found on class Plain");
}

#[test]
fn missing_udt_marker() {
    #[derive(Default, Mapped)]
    #[cql(table = "things", keyspace = "ks")]
    struct Thing {
        id: i32,
    }

    let err = common::manager()
        .udt_descriptor::<Thing>()
        .expect_err("not a udt");
    assert_eq!(err.to_string(), "@UDT annotation was not found on class Thing");
}

#[test]
fn table_and_udt_conflict() {
    #[derive(Default, Mapped)]
    #[cql(table = "both", udt = "both", keyspace = "ks")]
    struct Both {
        id: i32,
    }

    assert_eq!(
        table_error::<Both>().to_string(),
        "Cannot have both @Table and @UDT on class Both"
    );
    let err = common::manager()
        .udt_descriptor::<Both>()
        .expect_err("udt conflict");
    assert_eq!(
        err.to_string(),
        "Cannot have both @UDT and @Table on class Both"
    );
}

#[test]
fn udt_and_accessor_conflict() {
    #[derive(Default, Mapped)]
    #[cql(udt = "both", keyspace = "ks", accessor)]
    struct Both {
        id: i32,
    }

    let err = common::manager()
        .udt_descriptor::<Both>()
        .expect_err("udt conflict");
    assert_eq!(
        err.to_string(),
        "Cannot have both @UDT and @Accessor on class Both"
    );

    let iface = ClassDecl::builder("Lookup", ClassShape::Interface)
        .accessor()
        .udt(Default::default())
        .build();
    let err = common::manager()
        .accessor_descriptor(&iface)
        .expect_err("accessor conflict");
    assert_eq!(
        err.to_string(),
        "Cannot have both @Accessor and @UDT on interface Lookup"
    );
}

#[test]
fn accessor_requires_interface() {
    #[derive(Default, Mapped)]
    #[cql(accessor)]
    struct NotAnInterface {
        id: i32,
    }

    let err = common::manager()
        .accessor_descriptor(&NotAnInterface::class_decl())
        .expect_err("class accessor");
    assert_eq!(
        err.to_string(),
        "@Accessor annotation is only allowed on interfaces, got class NotAnInterface"
    );

    let iface = ClassDecl::builder("Finder", ClassShape::Interface)
        .accessor()
        .table(Default::default())
        .build();
    let err = common::manager()
        .accessor_descriptor(&iface)
        .expect_err("accessor conflict");
    assert_eq!(
        err.to_string(),
        "Cannot have both @Accessor and @Table on interface Finder"
    );
}

#[test]
fn udt_field_marker_in_table() {
    #[derive(Default, Mapped)]
    #[cql(table = "t", keyspace = "ks")]
    struct WithField {
        #[cql(partition_key)]
        id: i32,
        #[cql(field = "v")]
        value: String,
    }

    assert_eq!(
        table_error::<WithField>().to_string(),
        "Annotation @Field is not allowed on property 'value'"
    );
}

#[test]
fn column_marker_in_udt() {
    #[derive(Default, Mapped)]
    #[cql(udt = "u", keyspace = "ks")]
    struct WithColumn {
        #[cql(column = "v")]
        value: String,
    }

    let err = common::manager()
        .udt_descriptor::<WithColumn>()
        .expect_err("column in udt");
    assert!(matches!(err, Error::MarkerNotAllowed { .. }));
    assert_eq!(
        err.to_string(),
        "Annotation @Column is not allowed on property 'value'"
    );
}

#[test]
fn partition_key_and_clustering_column() {
    #[derive(Default, Mapped)]
    #[cql(table = "t", keyspace = "ks")]
    struct TwoKeys {
        #[cql(partition_key, clustering_column)]
        id: i32,
    }

    assert_eq!(
        table_error::<TwoKeys>().to_string(),
        "Property 'id' cannot be annotated with both @PartitionKey and @ClusteringColumn"
    );
}

#[test]
fn column_and_computed() {
    #[derive(Default, Mapped)]
    #[cql(table = "t", keyspace = "ks")]
    struct ColumnComputed {
        #[cql(partition_key)]
        id: i32,
        #[cql(column = "w", computed = "writetime(v)")]
        written: i64,
    }

    assert_eq!(
        table_error::<ColumnComputed>().to_string(),
        "Property 'written' cannot be annotated with both @Column and @Computed"
    );
}

#[test]
fn empty_computed_expression() {
    #[derive(Default, Mapped)]
    #[cql(table = "t", keyspace = "ks")]
    struct EmptyComputed {
        #[cql(partition_key)]
        id: i32,
        #[cql(computed = "")]
        ttl: i32,
    }

    assert_eq!(
        table_error::<EmptyComputed>().to_string(),
        "Property 'ttl': attribute 'value' of annotation @Computed is mandatory for computed properties"
    );
}

#[test]
fn negative_partition_key_position() {
    #[derive(Default, Mapped)]
    #[cql(table = "t", keyspace = "ks")]
    struct NegativeKey {
        #[cql(partition_key = -1)]
        id: i32,
    }

    let err = table_error::<NegativeKey>();
    assert!(matches!(
        err,
        Error::InvalidKeyOrdering { found: -1, expected: 0, .. }
    ));
    assert_eq!(
        err.to_string(),
        "Invalid ordering value -1 for annotation @PartitionKey of property 'id', was expecting 0"
    );
}

#[test]
fn duplicate_clustering_position() {
    #[derive(Default, Mapped)]
    #[cql(table = "t", keyspace = "ks")]
    struct DuplicateClustering {
        #[cql(partition_key)]
        id: i32,
        #[cql(clustering_column)]
        a: i32,
        #[cql(clustering_column)]
        b: i32,
    }

    let err = table_error::<DuplicateClustering>();
    assert!(matches!(
        err,
        Error::InvalidKeyOrdering { found: 0, expected: 1, .. }
    ));
}

#[test]
fn missing_keyspace_without_default() {
    #[derive(Default, Mapped)]
    #[cql(table = "t")]
    struct Homeless {
        #[cql(partition_key)]
        id: i32,
    }

    assert!(matches!(
        table_error::<Homeless>(),
        Error::MissingKeyspace { .. }
    ));

    let manager = common::manager()
        .with_config(cqlmap::MappingConfig::new().with_default_keyspace("home"));
    let descriptor = manager
        .descriptor(&Homeless::class_decl(), MappingKind::Table)
        .expect("default keyspace applies");
    assert_eq!(descriptor.keyspace(), Some("home"));
}
