//! Computed columns and the store that holds them.

use indexmap::IndexMap;

use ua_core::ZoneId;
use ua_zones::AssignStats;

use crate::key::{AttrKey, TableKind};
use crate::{AttrError, AttrResult};

/// Zone membership of every row of a table.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneColumn {
    /// `None` for rows whose parent row is missing.
    pub zones: Vec<Option<ZoneId>>,
    /// Present when the column came straight from the assignment engine.
    pub stats: Option<AssignStats>,
}

impl ZoneColumn {
    pub fn unassigned(&self) -> usize {
        self.zones.iter().filter(|z| z.is_none()).count()
    }
}

/// One computed attribute, one value per table row.
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    Float(Vec<f64>),
    Int(Vec<i64>),
    Zone(ZoneColumn),
}

impl Column {
    pub fn len(&self) -> usize {
        match self {
            Column::Float(v) => v.len(),
            Column::Int(v) => v.len(),
            Column::Zone(z) => z.zones.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Column::Float(_) => "float",
            Column::Int(_) => "int",
            Column::Zone(_) => "zone",
        }
    }
}

/// Columns keyed by attribute, in evaluation order.
#[derive(Debug, Clone, Default)]
pub struct ColumnStore {
    columns: IndexMap<AttrKey, Column>,
}

impl ColumnStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: AttrKey, column: Column) {
        self.columns.insert(key, column);
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn get(&self, key: &AttrKey) -> Option<&Column> {
        self.columns.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&AttrKey, &Column)> + '_ {
        self.columns.iter()
    }

    /// Columns of one table, in evaluation order.
    pub fn table(&self, table: TableKind) -> impl Iterator<Item = (&AttrKey, &Column)> + '_ {
        self.columns.iter().filter(move |(k, _)| k.table == table)
    }

    fn require(&self, key: &AttrKey) -> AttrResult<&Column> {
        self.columns.get(key).ok_or_else(|| AttrError::Missing(key.clone()))
    }

    pub fn float(&self, key: &AttrKey) -> AttrResult<&[f64]> {
        match self.require(key)? {
            Column::Float(v) => Ok(v),
            other => Err(wrong_kind(key, "float", other)),
        }
    }

    pub fn int(&self, key: &AttrKey) -> AttrResult<&[i64]> {
        match self.require(key)? {
            Column::Int(v) => Ok(v),
            other => Err(wrong_kind(key, "int", other)),
        }
    }

    pub fn zone(&self, key: &AttrKey) -> AttrResult<&ZoneColumn> {
        match self.require(key)? {
            Column::Zone(z) => Ok(z),
            other => Err(wrong_kind(key, "zone", other)),
        }
    }

    /// A float or int column widened to `f64`.
    pub fn numeric(&self, key: &AttrKey) -> AttrResult<Vec<f64>> {
        match self.require(key)? {
            Column::Float(v) => Ok(v.clone()),
            Column::Int(v) => Ok(v.iter().map(|&x| x as f64).collect()),
            other => Err(wrong_kind(key, "numeric", other)),
        }
    }
}

fn wrong_kind(key: &AttrKey, expected: &'static str, found: &Column) -> AttrError {
    AttrError::WrongKind {
        key: key.clone(),
        expected,
        found: found.kind(),
    }
}
