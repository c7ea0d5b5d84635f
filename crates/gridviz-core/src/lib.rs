//! Editable grid graph and node model.
//!
//! This crate provides the foundational types used across the *gridviz*
//! workspace: the [`Point`] geometry primitive, the six-valued [`NodeType`]
//! node model, the editable [`GridGraph`] arena with its singleton
//! Start/Target/Diversion roles, and the host-facing configuration enums
//! ([`Algorithm`], [`Speed`]).

pub mod config;
pub mod geom;
pub mod graph;
pub mod node;

pub use config::{Algorithm, Speed};
pub use geom::Point;
pub use graph::GridGraph;
pub use node::{DENSE_COST, Node, NodeType};
