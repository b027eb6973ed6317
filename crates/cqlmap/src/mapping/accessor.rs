// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Property accessor capabilities.
//!
//! Accessors are plain function pointers captured at declaration time (by
//! `#[derive(Mapped)]` or by hand), type-erased behind [`PropertyReader`] and
//! [`PropertyWriter`]. Entities are passed as `&dyn Any` and downcast to the
//! declaring type; [`Upcast`] lets a subclass reuse the accessors declared on
//! an embedded superclass value.

use crate::types::{ConversionError, HostRepr, Value};
use std::any::{type_name, Any};
use std::fmt;
use std::sync::Arc;

/// Direction of a failed property access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessOp {
    Read,
    Write,
}

impl fmt::Display for AccessOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Read => "read",
            Self::Write => "write",
        })
    }
}

/// Failure of a single accessor call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccessError {
    #[error("entity is not a {expected}")]
    WrongInstance { expected: &'static str },

    #[error(transparent)]
    Conversion(#[from] ConversionError),

    #[error("property has no accessor for this direction")]
    Unsupported,
}

/// Reads one property of an entity.
pub trait PropertyReader: Send + Sync {
    fn read(&self, entity: &dyn Any) -> Result<Value, AccessError>;
}

/// Writes one property of an entity.
pub trait PropertyWriter: Send + Sync {
    fn write(&self, entity: &mut dyn Any, value: Value) -> Result<(), AccessError>;
}

pub type SharedReader = Arc<dyn PropertyReader>;
pub type SharedWriter = Arc<dyn PropertyWriter>;

fn downcast<T: Any>(entity: &dyn Any) -> Result<&T, AccessError> {
    entity.downcast_ref::<T>().ok_or(AccessError::WrongInstance {
        expected: type_name::<T>(),
    })
}

fn downcast_mut<T: Any>(entity: &mut dyn Any) -> Result<&mut T, AccessError> {
    entity.downcast_mut::<T>().ok_or(AccessError::WrongInstance {
        expected: type_name::<T>(),
    })
}

/// Direct access to a struct field.
pub struct FieldAccessor<T, V> {
    get: fn(&T) -> &V,
    get_mut: fn(&mut T) -> &mut V,
}

impl<T, V> FieldAccessor<T, V> {
    pub fn new(get: fn(&T) -> &V, get_mut: fn(&mut T) -> &mut V) -> Self {
        Self { get, get_mut }
    }
}

impl<T: Any, V: HostRepr + Clone> PropertyReader for FieldAccessor<T, V> {
    fn read(&self, entity: &dyn Any) -> Result<Value, AccessError> {
        let entity = downcast::<T>(entity)?;
        Ok((self.get)(entity).clone().into_value())
    }
}

impl<T: Any, V: HostRepr> PropertyWriter for FieldAccessor<T, V> {
    fn write(&self, entity: &mut dyn Any, value: Value) -> Result<(), AccessError> {
        let entity = downcast_mut::<T>(entity)?;
        *(self.get_mut)(entity) = V::from_value(value)?;
        Ok(())
    }
}

/// Access through a getter method.
pub struct GetterAccessor<T, V> {
    getter: fn(&T) -> V,
}

impl<T, V> GetterAccessor<T, V> {
    pub fn new(getter: fn(&T) -> V) -> Self {
        Self { getter }
    }
}

impl<T: Any, V: HostRepr> PropertyReader for GetterAccessor<T, V> {
    fn read(&self, entity: &dyn Any) -> Result<Value, AccessError> {
        let entity = downcast::<T>(entity)?;
        Ok((self.getter)(entity).into_value())
    }
}

/// Access through a setter method.
pub struct SetterAccessor<T, V> {
    setter: fn(&mut T, V),
}

impl<T, V> SetterAccessor<T, V> {
    pub fn new(setter: fn(&mut T, V)) -> Self {
        Self { setter }
    }
}

impl<T: Any, V: HostRepr> PropertyWriter for SetterAccessor<T, V> {
    fn write(&self, entity: &mut dyn Any, value: Value) -> Result<(), AccessError> {
        let entity = downcast_mut::<T>(entity)?;
        (self.setter)(entity, V::from_value(value)?);
        Ok(())
    }
}

/// Projection from a subclass value to its embedded superclass value.
pub trait Upcast: Send + Sync {
    fn upcast<'a>(&self, entity: &'a dyn Any) -> Option<&'a dyn Any>;

    fn upcast_mut<'a>(&self, entity: &'a mut dyn Any) -> Option<&'a mut dyn Any>;
}

pub type SharedUpcast = Arc<dyn Upcast>;

/// [`Upcast`] through a field holding the superclass value.
pub struct Embedded<S, B> {
    get: fn(&S) -> &B,
    get_mut: fn(&mut S) -> &mut B,
}

impl<S, B> Embedded<S, B> {
    pub fn new(get: fn(&S) -> &B, get_mut: fn(&mut S) -> &mut B) -> Self {
        Self { get, get_mut }
    }
}

impl<S: Any, B: Any> Upcast for Embedded<S, B> {
    fn upcast<'a>(&self, entity: &'a dyn Any) -> Option<&'a dyn Any> {
        entity
            .downcast_ref::<S>()
            .map(|sub| (self.get)(sub) as &dyn Any)
    }

    fn upcast_mut<'a>(&self, entity: &'a mut dyn Any) -> Option<&'a mut dyn Any> {
        entity
            .downcast_mut::<S>()
            .map(|sub| (self.get_mut)(sub) as &mut dyn Any)
    }
}

/// Reader declared on a superclass, applied to a subclass instance.
pub(crate) struct UpcastReader {
    pub(crate) upcast: SharedUpcast,
    pub(crate) inner: SharedReader,
}

impl PropertyReader for UpcastReader {
    fn read(&self, entity: &dyn Any) -> Result<Value, AccessError> {
        match self.upcast.upcast(entity) {
            Some(base) => self.inner.read(base),
            // Already an instance of the declaring class.
            None => self.inner.read(entity),
        }
    }
}

/// Writer declared on a superclass, applied to a subclass instance.
pub(crate) struct UpcastWriter {
    pub(crate) upcast: SharedUpcast,
    pub(crate) inner: SharedWriter,
}

impl PropertyWriter for UpcastWriter {
    fn write(&self, entity: &mut dyn Any, value: Value) -> Result<(), AccessError> {
        match self.upcast.upcast_mut(entity) {
            Some(base) => self.inner.write(base, value),
            None => self.inner.write(entity, value),
        }
    }
}
