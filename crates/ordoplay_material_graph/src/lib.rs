// SPDX-License-Identifier: MIT OR Apache-2.0
//! Material block graph for `OrdoPlay` Editor.
//!
//! This crate holds the semantic side of a material:
//! - Typed blocks with input/output connection points
//! - Literal values held by unconnected inputs
//! - Output roots ("final merger" blocks)
//! - Build validation of everything reachable from the roots
//!
//! ## Architecture
//!
//! Blocks and connection points live in a single arena keyed by UUID
//! newtypes. Blocks are instantiated from a [`BlockCatalog`] of kinds, and
//! the graph is a DAG running from the output roots back to leaf inputs.

pub mod value;
pub mod point;
pub mod block;
pub mod catalog;
pub mod graph;
pub mod build;

pub use value::{LiteralValue, ValueType};
pub use point::{ConnectionPoint, PointDirection, PointId};
pub use block::{Block, BlockClass, BlockId};
pub use catalog::{BlockCatalog, BlockKind, PointSpec};
pub use graph::{Dependency, GraphError, MaterialGraph};
pub use build::{BuildError, BuildSummary};
