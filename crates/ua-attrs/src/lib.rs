//! `ua-attrs`: the Derived-Attribute Computation Graph.
//!
//! Every derived column (zone membership, person and household codes, block
//! acreage, land-use aggregates) is a node of an explicit DAG keyed by
//! `table.NAME`.  Nodes declare their dependencies and compute from
//! immutable inputs; the graph evaluates them in topological order.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                    |
//! |--------------|-------------------------------------------------------------|
//! | [`key`]      | `TableKind`, `AttrKey`                                      |
//! | [`column`]   | `Column`, `ZoneColumn`, `ColumnStore`                       |
//! | [`graph`]    | `Attribute`, `AttributeGraph`, `Inputs`                     |
//! | [`config`]   | `AttributeConfig`: thresholds, sectors, coefficients       |
//! | [`entity`]   | per-row codes, parent-zone joins, block acreage             |
//! | [`zonal`]    | per-zone count/sum/ratio helpers                            |
//! | [`standard`] | `standard_graph`: the ActivitySim column set               |
//! | [`error`]    | `AttrError`, `AttrResult<T>`                                |

pub mod column;
pub mod config;
pub mod entity;
pub mod error;
pub mod graph;
pub mod key;
pub mod standard;
pub mod zonal;


pub use column::{Column, ColumnStore, ZoneColumn};
pub use config::{AgeBucket, AttributeConfig, DensityRegression, EmploymentCategory, ParkingConfig, ZoneConstants};
pub use error::{AttrError, AttrResult};
pub use graph::{Attribute, AttributeGraph, Inputs};
pub use key::{AttrKey, TableKind};
pub use standard::{standard_graph, TAZ};
