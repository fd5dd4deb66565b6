//! Table-scoped attribute names.

use std::fmt;
use std::str::FromStr;

use crate::{AttrError, AttrResult};

/// The tables attributes can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TableKind {
    Households,
    Persons,
    Blocks,
    Jobs,
    Schools,
    Colleges,
    Zones,
}

impl TableKind {
    pub const ALL: [TableKind; 7] = [
        TableKind::Households,
        TableKind::Persons,
        TableKind::Blocks,
        TableKind::Jobs,
        TableKind::Schools,
        TableKind::Colleges,
        TableKind::Zones,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TableKind::Households => "households",
            TableKind::Persons => "persons",
            TableKind::Blocks => "blocks",
            TableKind::Jobs => "jobs",
            TableKind::Schools => "schools",
            TableKind::Colleges => "colleges",
            TableKind::Zones => "zones",
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TableKind {
    type Err = AttrError;

    fn from_str(s: &str) -> AttrResult<Self> {
        TableKind::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| AttrError::Config(format!("unknown table {s:?}")))
    }
}

/// `table.NAME`, e.g. `zones.RESACRE`.  Same-named attributes of different
/// tables are different keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AttrKey {
    pub table: TableKind,
    pub name:  String,
}

impl AttrKey {
    pub fn new(table: TableKind, name: impl Into<String>) -> Self {
        Self { table, name: name.into() }
    }
}

impl fmt::Display for AttrKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.table, self.name)
    }
}

impl FromStr for AttrKey {
    type Err = AttrError;

    fn from_str(s: &str) -> AttrResult<Self> {
        let (table, name) = s
            .split_once('.')
            .ok_or_else(|| AttrError::Config(format!("attribute {s:?} is not of the form table.NAME")))?;
        Ok(AttrKey::new(table.parse()?, name))
    }
}
