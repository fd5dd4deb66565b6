//! The attribute DAG.
//!
//! Each [`Attribute`] names the attributes it reads and a pure function
//! from the input tables plus already-computed columns to its own column.
//! [`AttributeGraph::evaluate`] orders the nodes topologically and runs each
//! exactly once.  There is no global registry: callers build the graph they
//! need (see [`standard_graph`](crate::standard_graph)).

use std::fmt;

use indexmap::IndexMap;
use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};

use ua_tables::{Block, College, Household, Job, Person, School};
use ua_zones::{ZoneAssigner, ZoneTable};

use crate::column::{Column, ColumnStore};
use crate::key::{AttrKey, TableKind};
use crate::{AttrError, AttrResult};

/// Immutable inputs every compute function may read.
pub struct Inputs<'a> {
    pub households: &'a [Household],
    pub persons:    &'a [Person],
    pub blocks:     &'a [Block],
    pub jobs:       &'a [Job],
    pub schools:    &'a [School],
    pub colleges:   &'a [College],
    pub zones:      &'a ZoneTable,
    pub assigner:   &'a ZoneAssigner,
}

impl Inputs<'_> {
    /// Row count of `table`; for zones, the zone count.
    pub fn rows(&self, table: TableKind) -> usize {
        match table {
            TableKind::Households => self.households.len(),
            TableKind::Persons => self.persons.len(),
            TableKind::Blocks => self.blocks.len(),
            TableKind::Jobs => self.jobs.len(),
            TableKind::Schools => self.schools.len(),
            TableKind::Colleges => self.colleges.len(),
            TableKind::Zones => self.zones.len(),
        }
    }
}

type ComputeFn = Box<dyn Fn(&Inputs<'_>, &ColumnStore) -> AttrResult<Column>>;

/// One node of the graph.
pub struct Attribute {
    pub key:  AttrKey,
    pub deps: Vec<AttrKey>,
    compute:  ComputeFn,
}

impl Attribute {
    pub fn new<F>(key: AttrKey, deps: Vec<AttrKey>, compute: F) -> Self
    where
        F: Fn(&Inputs<'_>, &ColumnStore) -> AttrResult<Column> + 'static,
    {
        Self { key, deps, compute: Box::new(compute) }
    }
}

impl fmt::Debug for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Attribute")
            .field("key", &self.key)
            .field("deps", &self.deps)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Default)]
pub struct AttributeGraph {
    attrs: IndexMap<AttrKey, Attribute>,
}

impl AttributeGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, attr: Attribute) -> AttrResult<()> {
        if self.attrs.contains_key(&attr.key) {
            return Err(AttrError::Duplicate(attr.key));
        }
        self.attrs.insert(attr.key.clone(), attr);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.attrs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }

    pub fn contains(&self, key: &AttrKey) -> bool {
        self.attrs.contains_key(key)
    }

    /// Keys in registration order.
    pub fn keys(&self) -> impl Iterator<Item = &AttrKey> + '_ {
        self.attrs.keys()
    }

    /// Keys of one table in registration order.
    pub fn table_keys(&self, table: TableKind) -> impl Iterator<Item = &AttrKey> + '_ {
        self.attrs.keys().filter(move |k| k.table == table)
    }

    /// A dependency-respecting evaluation order.
    pub fn order(&self) -> AttrResult<Vec<&AttrKey>> {
        let mut graph: DiGraph<&AttrKey, ()> = DiGraph::with_capacity(self.attrs.len(), 0);
        let nodes: IndexMap<&AttrKey, NodeIndex> =
            self.attrs.keys().map(|k| (k, graph.add_node(k))).collect();

        for attr in self.attrs.values() {
            let to = nodes[&attr.key];
            for dep in &attr.deps {
                let from = *nodes.get(dep).ok_or_else(|| AttrError::UnknownDependency {
                    attr: attr.key.clone(),
                    dep:  dep.clone(),
                })?;
                graph.add_edge(from, to, ());
            }
        }

        let order = toposort(&graph, None)
            .map_err(|cycle| AttrError::Cycle(graph[cycle.node_id()].clone()))?;
        Ok(order.into_iter().map(|ix| graph[ix]).collect())
    }

    /// Compute every attribute once, dependencies first.
    ///
    /// Each column must have one value per row of its table.
    pub fn evaluate(&self, inputs: &Inputs<'_>) -> AttrResult<ColumnStore> {
        let order = self.order()?;
        let mut store = ColumnStore::new();
        for key in order {
            let attr = &self.attrs[key];
            let column = (attr.compute)(inputs, &store)?;
            let expected = inputs.rows(key.table);
            if column.len() != expected {
                return Err(AttrError::Length {
                    key: key.clone(),
                    expected,
                    found: column.len(),
                });
            }
            log::debug!("computed {key}");
            store.insert(key.clone(), column);
        }
        log::info!("computed {} attributes", store.len());
        Ok(store)
    }
}
