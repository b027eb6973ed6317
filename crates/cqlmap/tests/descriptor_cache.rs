// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Descriptor caching through the mapping manager
//!
//! Concurrent first requests converge on one published descriptor, and
//! failed builds are retried rather than cached.

mod common;

use cqlmap::mapping::MappingKind;
use cqlmap::Mapped;
use std::sync::{Arc, Barrier};
use std::thread;

#[derive(Default, Mapped)]
#[cql(table = "orders", keyspace = "shop")]
struct Order {
    #[cql(partition_key)]
    id: i64,
    #[cql(clustering_column)]
    line: i32,
    sku: String,
}

#[derive(Default, Mapped)]
#[cql(table = "broken", keyspace = "shop")]
struct Broken {
    #[cql(partition_key = 1)]
    id: i64,
}

mod billing {
    use cqlmap::Mapped;

    #[derive(Default, Mapped)]
    #[cql(table = "invoices", keyspace = "billing")]
    pub struct Record {
        #[cql(partition_key)]
        pub invoice_id: i64,
        pub amount: i64,
    }
}

mod audit {
    use cqlmap::Mapped;

    #[derive(Default, Mapped)]
    #[cql(table = "events", keyspace = "audit")]
    pub struct Record {
        #[cql(partition_key)]
        pub event_id: i64,
        pub actor: String,
    }
}

#[test]
fn concurrent_requests_share_one_descriptor() {
    const THREADS: usize = 8;
    let manager = Arc::new(common::manager());
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let manager = Arc::clone(&manager);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                manager.table_descriptor::<Order>().expect("descriptor")
            })
        })
        .collect();
    let descriptors: Vec<_> = handles
        .into_iter()
        .map(|h| h.join().expect("thread panicked"))
        .collect();

    assert!(descriptors
        .iter()
        .all(|d| Arc::ptr_eq(d, &descriptors[0])));
    let stats = manager.cache_stats();
    assert_eq!(stats.misses, 1);
    assert_eq!(
        (stats.hits + stats.misses + stats.discarded) as usize,
        THREADS
    );

    let again = manager.table_descriptor::<Order>().expect("cached");
    assert!(Arc::ptr_eq(&again, &descriptors[0]));
}

#[test]
fn kinds_are_cached_independently() {
    let manager = common::manager();
    let decl = Order::class_decl();

    let table = manager
        .descriptor(&decl, MappingKind::Table)
        .expect("table");
    assert!(manager.descriptor(&decl, MappingKind::Udt).is_err());
    assert!(manager.descriptor(&decl, MappingKind::Udt).is_err());

    let stats = manager.cache_stats();
    assert_eq!(stats.misses, 1);
    assert_eq!(stats.hits, 0);
    assert_eq!(table.kind(), MappingKind::Table);
}

#[test]
fn failed_builds_are_not_cached() {
    let manager = common::manager();
    for _ in 0..2 {
        assert!(manager.table_descriptor::<Broken>().is_err());
    }
    let stats = manager.cache_stats();
    assert_eq!(stats.hits + stats.misses, 0);
}

#[test]
fn same_named_types_are_cached_separately() {
    let manager = common::manager();

    let invoices = manager
        .table_descriptor::<billing::Record>()
        .expect("billing record");
    let events = manager
        .table_descriptor::<audit::Record>()
        .expect("audit record");

    assert_eq!(invoices.keyspace(), Some("billing"));
    assert_eq!(invoices.name(), Some("invoices"));
    assert_eq!(events.keyspace(), Some("audit"));
    assert_eq!(events.name(), Some("events"));
    let columns: Vec<_> = events.properties().map(|p| p.column_name()).collect();
    assert_eq!(columns, ["event_id", "actor"]);

    let stats = manager.cache_stats();
    assert_eq!(stats.misses, 2);
    assert_eq!(stats.hits, 0);
}
