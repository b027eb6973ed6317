// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Declared class hierarchy: the marker introspection capability.
//!
//! A [`ClassDecl`] describes one class or interface as written: its own
//! markers, its own members, and links to its superclass and implemented
//! interfaces. Nothing is merged here; the resolver linearizes and merges.

use super::accessor::{
    FieldAccessor, GetterAccessor, SetterAccessor, SharedReader, SharedUpcast, SharedWriter,
};
use super::markers::{EntityName, MappingMarker, PropertyMarker};
use crate::types::{HostRepr, HostType};
use std::any::{Any, TypeId};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

static NEXT_DECL_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a declaration. Two declarations that share a name are still
/// distinct classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassId {
    /// Declaration of a Rust type.
    Type(TypeId),
    /// Hand-built declaration; unique per [`ClassDecl::builder`] call.
    Decl(u64),
}

/// Kind of declaration a [`ClassDecl`] stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassShape {
    Class,
    AbstractClass,
    Interface,
}

impl fmt::Display for ClassShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Class | Self::AbstractClass => "class",
            Self::Interface => "interface",
        })
    }
}

/// Where a member was declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberOrigin {
    Field,
    Getter,
    Setter,
}

/// One field, getter or setter of a class, with the markers written on it.
#[derive(Clone)]
pub struct MemberDecl {
    property: Arc<str>,
    origin: MemberOrigin,
    host_type: HostType,
    markers: Vec<PropertyMarker>,
    reader: Option<SharedReader>,
    writer: Option<SharedWriter>,
}

impl MemberDecl {
    /// A member without an accessor (abstract getter, interface method).
    pub fn declared(property: impl Into<Arc<str>>, origin: MemberOrigin, host_type: HostType) -> Self {
        Self {
            property: property.into(),
            origin,
            host_type,
            markers: Vec::new(),
            reader: None,
            writer: None,
        }
    }

    /// A struct field, readable and writable.
    pub fn field<T: Any, V: HostRepr + Clone + 'static>(
        property: impl Into<Arc<str>>,
        get: fn(&T) -> &V,
        get_mut: fn(&mut T) -> &mut V,
    ) -> Self {
        let accessor = Arc::new(FieldAccessor::new(get, get_mut));
        let reader: SharedReader = accessor.clone();
        let writer: SharedWriter = accessor;
        Self {
            reader: Some(reader),
            writer: Some(writer),
            ..Self::declared(property, MemberOrigin::Field, V::host_type())
        }
    }

    /// A getter method.
    pub fn getter<T: Any, V: HostRepr + 'static>(
        property: impl Into<Arc<str>>,
        getter: fn(&T) -> V,
    ) -> Self {
        let reader: SharedReader = Arc::new(GetterAccessor::new(getter));
        Self {
            reader: Some(reader),
            ..Self::declared(property, MemberOrigin::Getter, V::host_type())
        }
    }

    /// A setter method.
    pub fn setter<T: Any, V: HostRepr + 'static>(
        property: impl Into<Arc<str>>,
        setter: fn(&mut T, V),
    ) -> Self {
        let writer: SharedWriter = Arc::new(SetterAccessor::new(setter));
        Self {
            writer: Some(writer),
            ..Self::declared(property, MemberOrigin::Setter, V::host_type())
        }
    }

    #[must_use]
    pub fn with_marker(mut self, marker: PropertyMarker) -> Self {
        self.markers.push(marker);
        self
    }

    pub fn property(&self) -> &str {
        &self.property
    }

    pub fn origin(&self) -> MemberOrigin {
        self.origin
    }

    pub fn host_type(&self) -> &HostType {
        &self.host_type
    }

    pub fn markers(&self) -> &[PropertyMarker] {
        &self.markers
    }

    pub fn reader(&self) -> Option<&SharedReader> {
        self.reader.as_ref()
    }

    pub fn writer(&self) -> Option<&SharedWriter> {
        self.writer.as_ref()
    }
}

impl fmt::Debug for MemberDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemberDecl")
            .field("property", &self.property)
            .field("origin", &self.origin)
            .field("host_type", &self.host_type)
            .field("markers", &self.markers)
            .field("reader", &self.reader.is_some())
            .field("writer", &self.writer.is_some())
            .finish()
    }
}

/// A parameter of an accessor query method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamDecl {
    pub name: Option<Arc<str>>,
    pub host_type: HostType,
}

impl ParamDecl {
    pub fn positional(host_type: HostType) -> Self {
        Self {
            name: None,
            host_type,
        }
    }

    pub fn named(name: impl Into<Arc<str>>, host_type: HostType) -> Self {
        Self {
            name: Some(name.into()),
            host_type,
        }
    }
}

/// A method of an accessor interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryDecl {
    pub method: Arc<str>,
    pub query: Option<Arc<str>>,
    pub params: Vec<ParamDecl>,
}

impl QueryDecl {
    pub fn new(method: impl Into<Arc<str>>) -> Self {
        Self {
            method: method.into(),
            query: None,
            params: Vec::new(),
        }
    }

    #[must_use]
    pub fn query(mut self, cql: impl Into<Arc<str>>) -> Self {
        self.query = Some(cql.into());
        self
    }

    #[must_use]
    pub fn param(mut self, param: ParamDecl) -> Self {
        self.params.push(param);
        self
    }
}

/// Link to a superclass. `upcast` reaches the superclass value embedded
/// in an instance of the subclass; without it, superclass accessors are
/// applied to the instance itself.
#[derive(Clone)]
pub struct Superclass {
    pub decl: Arc<ClassDecl>,
    pub upcast: Option<SharedUpcast>,
}

/// A class or interface as declared.
#[derive(Clone)]
pub struct ClassDecl {
    id: ClassId,
    name: Arc<str>,
    shape: ClassShape,
    markers: Vec<MappingMarker>,
    superclass: Option<Superclass>,
    interfaces: Vec<Arc<ClassDecl>>,
    members: Vec<MemberDecl>,
    queries: Vec<QueryDecl>,
}

impl ClassDecl {
    pub fn builder(name: impl Into<Arc<str>>, shape: ClassShape) -> ClassDeclBuilder {
        let id = ClassId::Decl(NEXT_DECL_ID.fetch_add(1, Ordering::Relaxed));
        Self::builder_with_id(id, name, shape)
    }

    /// Builder of the declaration of `T`, identified by its `TypeId`.
    pub fn builder_for<T: Any>(name: impl Into<Arc<str>>, shape: ClassShape) -> ClassDeclBuilder {
        Self::builder_with_id(ClassId::Type(TypeId::of::<T>()), name, shape)
    }

    fn builder_with_id(id: ClassId, name: impl Into<Arc<str>>, shape: ClassShape) -> ClassDeclBuilder {
        ClassDeclBuilder {
            decl: ClassDecl {
                id,
                name: name.into(),
                shape,
                markers: Vec::new(),
                superclass: None,
                interfaces: Vec::new(),
                members: Vec::new(),
                queries: Vec::new(),
            },
        }
    }

    pub fn id(&self) -> ClassId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn name_arc(&self) -> &Arc<str> {
        &self.name
    }

    pub fn shape(&self) -> ClassShape {
        self.shape
    }

    pub fn markers(&self) -> &[MappingMarker] {
        &self.markers
    }

    pub fn superclass(&self) -> Option<&Superclass> {
        self.superclass.as_ref()
    }

    pub fn interfaces(&self) -> &[Arc<ClassDecl>] {
        &self.interfaces
    }

    pub fn members(&self) -> &[MemberDecl] {
        &self.members
    }

    pub fn queries(&self) -> &[QueryDecl] {
        &self.queries
    }
}

impl fmt::Debug for ClassDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassDecl")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("shape", &self.shape)
            .field("markers", &self.markers)
            .field(
                "superclass",
                &self.superclass.as_ref().map(|s| s.decl.name()),
            )
            .field(
                "interfaces",
                &self.interfaces.iter().map(|i| i.name()).collect::<Vec<_>>(),
            )
            .field("members", &self.members)
            .field("queries", &self.queries)
            .finish()
    }
}

/// Fluent builder of a [`ClassDecl`].
pub struct ClassDeclBuilder {
    decl: ClassDecl,
}

impl ClassDeclBuilder {
    #[must_use]
    pub fn marker(mut self, marker: MappingMarker) -> Self {
        self.decl.markers.push(marker);
        self
    }

    #[must_use]
    pub fn table(self, name: EntityName) -> Self {
        self.marker(MappingMarker::Table(name))
    }

    #[must_use]
    pub fn udt(self, name: EntityName) -> Self {
        self.marker(MappingMarker::Udt(name))
    }

    #[must_use]
    pub fn accessor(self) -> Self {
        self.marker(MappingMarker::Accessor)
    }

    /// Superclass whose accessors apply to instances of this class directly.
    #[must_use]
    pub fn extends(mut self, decl: Arc<ClassDecl>) -> Self {
        self.decl.superclass = Some(Superclass { decl, upcast: None });
        self
    }

    /// Superclass held as a value inside instances of this class.
    #[must_use]
    pub fn extends_embedded(mut self, decl: Arc<ClassDecl>, upcast: SharedUpcast) -> Self {
        self.decl.superclass = Some(Superclass {
            decl,
            upcast: Some(upcast),
        });
        self
    }

    #[must_use]
    pub fn implements(mut self, decl: Arc<ClassDecl>) -> Self {
        self.decl.interfaces.push(decl);
        self
    }

    #[must_use]
    pub fn member(mut self, member: MemberDecl) -> Self {
        self.decl.members.push(member);
        self
    }

    #[must_use]
    pub fn query(mut self, query: QueryDecl) -> Self {
        self.decl.queries.push(query);
        self
    }

    pub fn build(self) -> Arc<ClassDecl> {
        Arc::new(self.decl)
    }
}

/// A Rust type with a declared mapping, usually via `#[derive(Mapped)]`.
pub trait Mapped: Any {
    fn class_decl() -> Arc<ClassDecl>;
}
