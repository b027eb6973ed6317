// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Shared helpers for cqlmap integration tests.

#![allow(dead_code)]

use cqlmap::codec::CodecRegistry;
use cqlmap::mapping::MappingManager;
use std::sync::Arc;

/// Route `log` output through the test harness (`RUST_LOG=debug` to see it).
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Manager over the default registry and configuration.
pub fn manager() -> MappingManager {
    init_logging();
    MappingManager::new(Arc::new(CodecRegistry::new()))
}
