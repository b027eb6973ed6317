// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Statement execution capability consumed by [`Mapper`](super::Mapper).
//!
//! Statements are structured; turning them into CQL text is left to the
//! session implementation.

use std::sync::Arc;

/// One column bound to an encoded value; `None` binds CQL `null`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundColumn {
    pub name: Arc<str>,
    pub value: Option<Vec<u8>>,
}

impl BoundColumn {
    pub fn new(name: impl Into<Arc<str>>, value: Option<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// A statement issued by the mapper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// `INSERT INTO keyspace.table (columns) VALUES (..)`
    Insert {
        keyspace: Arc<str>,
        table: Arc<str>,
        columns: Vec<BoundColumn>,
    },
    /// `SELECT columns FROM keyspace.table WHERE restrictions`; column names
    /// of computed properties are their expressions.
    Select {
        keyspace: Arc<str>,
        table: Arc<str>,
        columns: Vec<Arc<str>>,
        restrictions: Vec<BoundColumn>,
    },
    /// `DELETE FROM keyspace.table WHERE restrictions`
    Delete {
        keyspace: Arc<str>,
        table: Arc<str>,
        restrictions: Vec<BoundColumn>,
    },
}

impl Statement {
    pub fn keyspace(&self) -> &str {
        match self {
            Self::Insert { keyspace, .. }
            | Self::Select { keyspace, .. }
            | Self::Delete { keyspace, .. } => keyspace,
        }
    }

    pub fn table(&self) -> &str {
        match self {
            Self::Insert { table, .. } | Self::Select { table, .. } | Self::Delete { table, .. } => {
                table
            }
        }
    }
}

/// A result row: encoded column values in the order they were selected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    values: Vec<Option<Vec<u8>>>,
}

impl Row {
    pub fn new(values: Vec<Option<Vec<u8>>>) -> Self {
        Self { values }
    }

    /// Encoded value at `index`; `None` for CQL `null` or out of range.
    pub fn get(&self, index: usize) -> Option<&[u8]> {
        self.values.get(index).and_then(|v| v.as_deref())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("No session configured")]
    NotConfigured,

    #[error("Statement execution failed: {0}")]
    Execution(String),

    #[error("Result row has {found} columns, expected {expected}")]
    RowShape { expected: usize, found: usize },
}

/// Executes mapper statements against a cluster.
pub trait Session: Send + Sync {
    fn execute(&self, statement: &Statement) -> Result<Vec<Row>, SessionError>;
}
