// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type model shared by the codec registry and the mapping layer.
//!
//! # Features
//!
//! - **WireType**: column types (scalars, `list`, `set`, `map`), with CQL
//!   syntax parsing and printing
//! - **MarshalType**: the server's internal class-name representation
//! - **HostType**: application-side type lattice used for assignability checks
//! - **Value / HostRepr**: runtime values and the Rust types that convert to them
//!
//! # Example
//!
//! ```rust
//! use cqlmap::types::{ScalarKind, WireType};
//!
//! let column: WireType = "map<varchar, frozen<list<int>>>".parse().unwrap();
//! assert_eq!(column.to_string(), "map<varchar, list<int>>");
//! assert!(column.is_equivalent(&WireType::map(
//!     WireType::scalar(ScalarKind::Text),
//!     WireType::list(WireType::scalar(ScalarKind::Int)),
//! )));
//! ```

mod host;
mod marshal;
mod value;
mod wire_type;

pub use host::HostType;
pub use marshal::{MarshalType, LIST_TYPE, MAP_TYPE, SET_TYPE};
pub use value::{Blob, ConversionError, CqlDecimal, HostRepr, Value};
pub use wire_type::{CollectionKind, ScalarKind, WireType};
