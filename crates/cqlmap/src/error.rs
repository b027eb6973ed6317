// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Crate-wide error type.
//!
//! Every failure carries structured fields; the `Display` messages are for
//! diagnostics only and callers should match on the variants.

use crate::codec::CodecError;
use crate::mapper::SessionError;
use crate::mapping::{AccessError, AccessOp, ClassShape, MarkerKind};
use crate::types::HostType;

/// Result alias used throughout cqlmap.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    // ========================================================================
    // Type Resolution Errors
    // ========================================================================
    /// No codec is registered for a scalar kind.
    #[error("No codec registered for CQL type {type_name}")]
    UnknownWireType { type_name: String },

    /// A marshal class has no wire type counterpart.
    #[error("Unknown internal type {type_name}")]
    UnknownInternalType { type_name: String },

    /// A name or protocol id outside the fixed scalar enumeration.
    #[error("Unknown CQL type kind {kind}")]
    UnknownScalarKind { kind: String },

    /// A CQL type string or marshal class string could not be parsed.
    #[error("Malformed type '{input}': {reason}")]
    MalformedType { input: String, reason: String },

    /// No default codec can represent the given host type.
    #[error("No codec can handle values of type {host_type}")]
    NoCodecForHostType { host_type: HostType },

    /// Encoding or decoding a value failed.
    #[error(transparent)]
    Codec(#[from] CodecError),

    // ========================================================================
    // Mapping Kind Errors
    // ========================================================================
    /// The requested mapping-kind marker is absent.
    #[error("{wanted} annotation was not found on {shape} {class}")]
    MissingMapping {
        wanted: MarkerKind,
        shape: ClassShape,
        class: String,
    },

    /// The class carries a second, conflicting mapping-kind marker.
    #[error("Cannot have both {wanted} and {found} on {shape} {class}")]
    ConflictingMapping {
        wanted: MarkerKind,
        found: MarkerKind,
        shape: ClassShape,
        class: String,
    },

    /// An accessor was requested for something other than an interface.
    #[error("@Accessor annotation is only allowed on interfaces, got {shape} {class}")]
    AccessorOnConcreteClass { shape: ClassShape, class: String },

    /// Neither the marker nor the configuration names a keyspace.
    #[error("Missing keyspace for {marker} class {class}: none declared and no default keyspace configured")]
    MissingKeyspace { marker: MarkerKind, class: String },

    // ========================================================================
    // Property Errors
    // ========================================================================
    /// Two mutually exclusive markers on one property.
    #[error("Property '{property}' cannot be annotated with both {first} and {second}")]
    ConflictingMarkers {
        property: String,
        first: MarkerKind,
        second: MarkerKind,
    },

    /// A computed property with an empty expression.
    #[error("Property '{property}': attribute 'value' of annotation @Computed is mandatory for computed properties")]
    MissingComputedExpression { property: String },

    /// A marker used in a mapping context that does not allow it.
    #[error("Annotation {marker} is not allowed on property '{property}'")]
    MarkerNotAllowed { marker: MarkerKind, property: String },

    /// Key positions are not exactly `0..n`.
    #[error("Invalid ordering value {found} for annotation {marker} of property '{property}', was expecting {expected}")]
    InvalidKeyOrdering {
        marker: MarkerKind,
        property: String,
        found: i32,
        expected: i32,
    },

    /// A custom codec whose host type does not fit the property.
    #[error("Custom codec for property '{property}' handles {codec_type}, which is incompatible with the property type {property_type}")]
    IncompatibleCodec {
        property: String,
        codec_type: HostType,
        property_type: HostType,
    },

    /// Reading or writing a property through its accessor failed.
    #[error("Unable to {op} property '{property}' in {class}: {source}")]
    PropertyAccess {
        op: AccessOp,
        property: String,
        class: String,
        #[source]
        source: AccessError,
    },

    // ========================================================================
    // Accessor Errors
    // ========================================================================
    /// An accessor method without a query.
    #[error("Cannot create accessor for method {class}.{method}: missing @Query annotation")]
    MissingQuery { class: String, method: String },

    /// Some but not all parameters of an accessor method are named.
    #[error("For method {class}.{method}, either all or none of the parameters must be named")]
    InconsistentParamNames { class: String, method: String },

    // ========================================================================
    // Mapper Errors
    // ========================================================================
    /// Primary key arity does not match the entity.
    #[error("Invalid number of PRIMARY KEY columns provided, {expected} expected but got {got}")]
    InvalidPrimaryKey { expected: usize, got: usize },

    /// The statement execution capability failed.
    #[error(transparent)]
    Session(#[from] SessionError),
}

