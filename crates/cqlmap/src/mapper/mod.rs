// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Save / get / delete of mapped entities.
//!
//! A [`Mapper`] pairs a table descriptor with the codec registry and a
//! [`Session`]. Every non-transient property is encoded with its custom
//! codec when one is bound, otherwise with the registry's default codec for
//! the property's host type.

mod session;

pub use session::{BoundColumn, Row, Session, SessionError, Statement};

use crate::codec::{CodecRegistry, SharedCodec};
use crate::error::{Error, Result};
use crate::mapping::{EntityDescriptor, Mapped, PropertyDescriptor};
use crate::types::Value;
use std::marker::PhantomData;
use std::sync::Arc;

/// Table mapper for entities of type `T`.
pub struct Mapper<T> {
    descriptor: Arc<EntityDescriptor>,
    registry: Arc<CodecRegistry>,
    session: Arc<dyn Session>,
    keyspace: Arc<str>,
    table: Arc<str>,
    _entity: PhantomData<fn() -> T>,
}

impl<T: Mapped + Default> Mapper<T> {
    pub(crate) fn new(
        descriptor: Arc<EntityDescriptor>,
        registry: Arc<CodecRegistry>,
        session: Arc<dyn Session>,
    ) -> Self {
        let keyspace = Arc::from(descriptor.keyspace().unwrap_or_default());
        let table = Arc::from(descriptor.name().unwrap_or_default());
        Self {
            descriptor,
            registry,
            session,
            keyspace,
            table,
            _entity: PhantomData,
        }
    }

    pub fn descriptor(&self) -> &Arc<EntityDescriptor> {
        &self.descriptor
    }

    /// Insert every mapped, non-computed property of `entity`.
    pub fn save(&self, entity: &T) -> Result<()> {
        let columns = self
            .descriptor
            .mapped_columns()
            .filter(|p| !p.is_computed())
            .map(|p| {
                let value = p.get_value(entity)?;
                Ok(BoundColumn::new(p.column_name(), self.encode(p, &value)?))
            })
            .collect::<Result<Vec<_>>>()?;

        log::debug!(
            "[mapper] save {}.{} ({} columns)",
            self.keyspace,
            self.table,
            columns.len()
        );
        self.session.execute(&Statement::Insert {
            keyspace: Arc::clone(&self.keyspace),
            table: Arc::clone(&self.table),
            columns,
        })?;
        Ok(())
    }

    /// Fetch the entity with primary key `key`; `Ok(None)` when no row matches.
    pub fn get(&self, key: &[Value]) -> Result<Option<T>> {
        let restrictions = self.bind_key(key)?;
        let selected: Vec<&PropertyDescriptor> = self.descriptor.mapped_columns().collect();
        let statement = Statement::Select {
            keyspace: Arc::clone(&self.keyspace),
            table: Arc::clone(&self.table),
            columns: selected.iter().map(|p| Arc::from(p.column_name())).collect(),
            restrictions,
        };

        let rows = self.session.execute(&statement)?;
        let Some(row) = rows.into_iter().next() else {
            log::debug!("[mapper] get {}.{}: no row", self.keyspace, self.table);
            return Ok(None);
        };
        if row.len() != selected.len() {
            return Err(SessionError::RowShape {
                expected: selected.len(),
                found: row.len(),
            }
            .into());
        }

        let mut entity = T::default();
        for (index, property) in selected.into_iter().enumerate() {
            let value = match row.get(index) {
                Some(bytes) => self.codec(property)?.decode(bytes)?,
                None => Value::Null,
            };
            property.set_value(&mut entity, value)?;
        }
        Ok(Some(entity))
    }

    /// Delete the entity with primary key `key`.
    pub fn delete(&self, key: &[Value]) -> Result<()> {
        let restrictions = self.bind_key(key)?;
        log::debug!("[mapper] delete from {}.{}", self.keyspace, self.table);
        self.session.execute(&Statement::Delete {
            keyspace: Arc::clone(&self.keyspace),
            table: Arc::clone(&self.table),
            restrictions,
        })?;
        Ok(())
    }

    fn bind_key(&self, key: &[Value]) -> Result<Vec<BoundColumn>> {
        let expected = self.descriptor.primary_key_len();
        if key.len() != expected {
            return Err(Error::InvalidPrimaryKey {
                expected,
                got: key.len(),
            });
        }
        self.descriptor
            .primary_key()
            .zip(key)
            .map(|(p, value)| Ok(BoundColumn::new(p.column_name(), self.encode(p, value)?)))
            .collect()
    }

    fn encode(&self, property: &PropertyDescriptor, value: &Value) -> Result<Option<Vec<u8>>> {
        if value.is_null() {
            return Ok(None);
        }
        Ok(Some(self.codec(property)?.encode(value)?))
    }

    fn codec(&self, property: &PropertyDescriptor) -> Result<SharedCodec> {
        match property.custom_codec() {
            Some(codec) => Ok(Arc::clone(codec)),
            None => self.registry.codec_for_host(property.host_type()),
        }
    }
}
