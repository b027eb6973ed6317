// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Entity descriptor resolution.
//!
//! Steps, in order:
//! 1. mapping-kind validation against the class's own markers
//! 2. hierarchy linearization (class, superclasses upward, then interfaces)
//! 3. per-property marker merge, closest declaration first
//! 4. per-property validation and build
//! 5. key ordering checks, keyspace and name resolution

use super::accessor::{SharedReader, SharedUpcast, SharedWriter, UpcastReader, UpcastWriter};
use super::class::{ClassDecl, ClassShape, MemberDecl, MemberOrigin};
use super::descriptor::{EntityDescriptor, QueryDescriptor};
use super::markers::{EntityName, MappingKind, MappingMarker, MarkerKind, PropertyMarker};
use super::property::{normalize_identifier, PropertyContext, PropertyDescriptor, PropertyDraft};
use crate::config::MappingConfig;
use crate::error::{Error, Result};
use crate::types::HostType;
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;

/// One declaration in the linearized hierarchy.
struct Level<'a> {
    decl: &'a ClassDecl,
    /// Projections from the concrete class down to this declaration.
    upcasts: Vec<SharedUpcast>,
}

impl Level<'_> {
    fn reader(&self, reader: &SharedReader) -> SharedReader {
        self.upcasts
            .iter()
            .rev()
            .fold(Arc::clone(reader), |inner, upcast| {
                Arc::new(UpcastReader {
                    upcast: Arc::clone(upcast),
                    inner,
                }) as SharedReader
            })
    }

    fn writer(&self, writer: &SharedWriter) -> SharedWriter {
        self.upcasts
            .iter()
            .rev()
            .fold(Arc::clone(writer), |inner, upcast| {
                Arc::new(UpcastWriter {
                    upcast: Arc::clone(upcast),
                    inner,
                }) as SharedWriter
            })
    }
}

/// Build the descriptor of `decl` mapped as `kind`.
pub fn build_entity_descriptor(
    decl: &ClassDecl,
    kind: MappingKind,
    config: &MappingConfig,
) -> Result<EntityDescriptor> {
    let entity_name = validate_kind(decl, kind)?;
    let levels = linearize(decl);

    let mut descriptor = EntityDescriptor {
        class: Arc::clone(decl.name_arc()),
        kind,
        keyspace: None,
        name: None,
        properties: Vec::new(),
        index: HashMap::new(),
        partition_key: Vec::new(),
        clustering_columns: Vec::new(),
        queries: Vec::new(),
    };

    if kind == MappingKind::Accessor {
        descriptor.queries = resolve_queries(decl, &levels)?;
        log::debug!(
            "[mapping] built accessor descriptor for {} ({} queries)",
            decl.name(),
            descriptor.queries.len()
        );
        return Ok(descriptor);
    }

    let ctx = PropertyContext {
        kind,
        class: decl.name_arc(),
        validate_custom_codecs: config.validate_custom_codecs(),
    };
    for draft in merge_properties(&levels) {
        let property = draft.build(&ctx)?;
        descriptor
            .index
            .insert(Arc::from(property.name()), descriptor.properties.len());
        descriptor.properties.push(property);
    }

    descriptor.partition_key = ordered_keys(&descriptor.properties, MarkerKind::PartitionKey)?;
    descriptor.clustering_columns =
        ordered_keys(&descriptor.properties, MarkerKind::ClusteringColumn)?;

    if let Some(entity_name) = entity_name {
        let (keyspace, name) = resolve_names(decl, kind, entity_name, config)?;
        descriptor.keyspace = Some(keyspace);
        descriptor.name = Some(name);
    }

    log::debug!(
        "[mapping] built {} descriptor for {} ({} properties, {} partition key, {} clustering)",
        kind,
        decl.name(),
        descriptor.properties.len(),
        descriptor.partition_key.len(),
        descriptor.clustering_columns.len()
    );
    Ok(descriptor)
}

fn has_marker(decl: &ClassDecl, kind: MappingKind) -> bool {
    decl.markers().iter().any(|m| m.kind() == kind)
}

/// Check the class's own mapping markers and return the entity name, if any.
fn validate_kind(decl: &ClassDecl, kind: MappingKind) -> Result<Option<&EntityName>> {
    let class = || decl.name().to_string();
    let shape = decl.shape();

    if kind == MappingKind::Accessor && shape != ClassShape::Interface {
        return Err(Error::AccessorOnConcreteClass {
            shape,
            class: class(),
        });
    }
    if !has_marker(decl, kind) {
        return Err(Error::MissingMapping {
            wanted: kind.marker(),
            shape,
            class: class(),
        });
    }
    // Rivals are reported in a fixed order: table, udt, accessor.
    if let Some(rival) = MappingKind::ALL
        .into_iter()
        .find(|&other| other != kind && has_marker(decl, other))
    {
        return Err(Error::ConflictingMapping {
            wanted: kind.marker(),
            found: rival.marker(),
            shape,
            class: class(),
        });
    }

    Ok(decl.markers().iter().find_map(|m| match m {
        MappingMarker::Table(name) if kind == MappingKind::Table => Some(name),
        MappingMarker::Udt(name) if kind == MappingKind::Udt => Some(name),
        _ => None,
    }))
}

/// Most specific class, its superclasses upward, then every implemented
/// interface (breadth first, super-interfaces included), without duplicates.
fn linearize(decl: &ClassDecl) -> Vec<Level<'_>> {
    let mut levels = Vec::new();
    let mut upcasts: Vec<SharedUpcast> = Vec::new();
    let mut current = Some(decl);
    while let Some(class) = current {
        levels.push(Level {
            decl: class,
            upcasts: upcasts.clone(),
        });
        current = class.superclass().map(|sup| {
            if let Some(upcast) = &sup.upcast {
                upcasts.push(Arc::clone(upcast));
            }
            &*sup.decl
        });
    }

    let mut seen: HashSet<*const ClassDecl> = levels.iter().map(|l| l.decl as *const _).collect();
    let mut queue: VecDeque<&ClassDecl> = levels
        .iter()
        .flat_map(|l| l.decl.interfaces().iter().map(|i| &**i))
        .collect();
    while let Some(interface) = queue.pop_front() {
        if !seen.insert(interface as *const _) {
            continue;
        }
        levels.push(Level {
            decl: interface,
            upcasts: Vec::new(),
        });
        queue.extend(interface.interfaces().iter().map(|i| &**i));
    }
    levels
}

/// Accumulates the declarations of one property across the hierarchy.
#[derive(Default)]
struct Merge {
    markers: Vec<PropertyMarker>,
    getter_type: Option<HostType>,
    setter_type: Option<HostType>,
    field_type: Option<HostType>,
    getter: Option<SharedReader>,
    setter: Option<SharedWriter>,
    field_reader: Option<SharedReader>,
    field_writer: Option<SharedWriter>,
}

impl Merge {
    /// Closest declaration wins per marker kind.
    fn absorb_markers(&mut self, member: &MemberDecl) {
        let present: HashSet<MarkerKind> = self.markers.iter().map(PropertyMarker::kind).collect();
        self.markers.extend(
            member
                .markers()
                .iter()
                .filter(|m| !present.contains(&m.kind()))
                .cloned(),
        );
    }

    fn into_draft(self, name: Arc<str>) -> PropertyDraft {
        PropertyDraft {
            name,
            host_type: self
                .getter_type
                .or(self.field_type)
                .or(self.setter_type)
                .unwrap_or(HostType::Any),
            markers: self.markers,
            reader: self.getter.or(self.field_reader),
            writer: self.setter.or(self.field_writer),
        }
    }
}

fn merge_properties(levels: &[Level<'_>]) -> Vec<PropertyDraft> {
    let mut order: Vec<Arc<str>> = Vec::new();
    let mut merged: HashMap<Arc<str>, Merge> = HashMap::new();

    // Getters (then setters) over the whole hierarchy, fields last.
    for origin in [MemberOrigin::Getter, MemberOrigin::Setter, MemberOrigin::Field] {
        for level in levels {
            for member in level.decl.members().iter().filter(|m| m.origin() == origin) {
                let merge = merged
                    .entry(Arc::from(member.property()))
                    .or_insert_with_key(|name| {
                        order.push(Arc::clone(name));
                        Merge::default()
                    });
                merge.absorb_markers(member);
                match origin {
                    MemberOrigin::Getter => {
                        merge.getter_type.get_or_insert_with(|| member.host_type().clone());
                        if merge.getter.is_none() {
                            merge.getter = member.reader().map(|r| level.reader(r));
                        }
                    }
                    MemberOrigin::Setter => {
                        merge.setter_type.get_or_insert_with(|| member.host_type().clone());
                        if merge.setter.is_none() {
                            merge.setter = member.writer().map(|w| level.writer(w));
                        }
                    }
                    MemberOrigin::Field => {
                        merge.field_type.get_or_insert_with(|| member.host_type().clone());
                        if merge.field_reader.is_none() {
                            merge.field_reader = member.reader().map(|r| level.reader(r));
                        }
                        if merge.field_writer.is_none() {
                            merge.field_writer = member.writer().map(|w| level.writer(w));
                        }
                    }
                }
            }
        }
    }

    // Root class members first; ties keep discovery order.
    order.sort_by_key(|name| std::cmp::Reverse(declaring_depth(levels, name)));
    order
        .into_iter()
        .filter_map(|name| merged.remove(&name).map(|merge| merge.into_draft(name)))
        .collect()
}

/// Deepest superclass level declaring `name`; interfaces are not counted.
fn declaring_depth(levels: &[Level<'_>], name: &str) -> usize {
    levels
        .iter()
        .enumerate()
        .filter(|(_, l)| l.decl.shape() != ClassShape::Interface)
        .filter(|(_, l)| l.decl.members().iter().any(|m| m.property() == name))
        .map(|(i, _)| i)
        .max()
        .unwrap_or(0)
}

/// Positions of keys of one kind, sorted; they must be exactly `0..n`.
fn ordered_keys(properties: &[PropertyDescriptor], marker: MarkerKind) -> Result<Vec<usize>> {
    let is_key = |p: &PropertyDescriptor| match marker {
        MarkerKind::PartitionKey => p.is_partition_key(),
        _ => p.is_clustering_column(),
    };
    let mut keys: Vec<usize> = (0..properties.len())
        .filter(|&i| is_key(&properties[i]))
        .collect();
    keys.sort_by_key(|&i| properties[i].position());

    for (expected, &i) in keys.iter().enumerate() {
        let property = &properties[i];
        let expected = expected as i32;
        if property.position() != expected {
            return Err(Error::InvalidKeyOrdering {
                marker,
                property: property.name().to_string(),
                found: property.position(),
                expected,
            });
        }
    }
    Ok(keys)
}

fn resolve_names(
    decl: &ClassDecl,
    kind: MappingKind,
    entity_name: &EntityName,
    config: &MappingConfig,
) -> Result<(Arc<str>, Arc<str>)> {
    let keyspace = match entity_name.keyspace.as_deref().filter(|k| !k.is_empty()) {
        Some(keyspace) => normalize_identifier(keyspace, entity_name.case_sensitive_keyspace),
        None => config
            .default_keyspace()
            .map(str::to_string)
            .ok_or_else(|| Error::MissingKeyspace {
                marker: kind.marker(),
                class: decl.name().to_string(),
            })?,
    };
    let name = match entity_name.name.as_deref().filter(|n| !n.is_empty()) {
        Some(name) => normalize_identifier(name, entity_name.case_sensitive_name),
        None => decl.name().to_lowercase(),
    };
    Ok((Arc::from(keyspace), Arc::from(name)))
}

fn resolve_queries(decl: &ClassDecl, levels: &[Level<'_>]) -> Result<Vec<QueryDescriptor>> {
    let mut seen = HashSet::new();
    let mut queries = Vec::new();
    for query in levels.iter().flat_map(|l| l.decl.queries()) {
        if !seen.insert(Arc::clone(&query.method)) {
            continue;
        }
        let cql = query.query.clone().ok_or_else(|| Error::MissingQuery {
            class: decl.name().to_string(),
            method: query.method.to_string(),
        })?;
        let named = query.params.iter().filter(|p| p.name.is_some()).count();
        if named != 0 && named != query.params.len() {
            return Err(Error::InconsistentParamNames {
                class: decl.name().to_string(),
                method: query.method.to_string(),
            });
        }
        queries.push(QueryDescriptor {
            method: Arc::clone(&query.method),
            query: cql,
            params: query.params.clone(),
        });
    }
    Ok(queries)
}
