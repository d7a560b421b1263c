// SPDX-License-Identifier: MIT OR Apache-2.0
//! Material graph editor for `OrdoPlay` Editor.
//!
//! This crate keeps a visual node graph consistent with the material block
//! graph it presents:
//! - Recursive node construction from the output roots
//! - Column/row layout bookkeeping
//! - Link orientation and connect/disconnect propagation
//! - Literal value injection for unconnected inputs
//! - Output root registration and rebuild reporting
//!
//! ## Architecture
//!
//! The block graph is reached only through the [`SemanticGraph`] trait.
//! Construction accumulates nodes and links into a pending change-set that
//! is committed once the host signals it is ready. User edits to links are
//! delivered as [`LinkEvent`]s to [`GraphEditor::dispatch`].

pub mod config;
pub mod semantic;
pub mod port;
pub mod node;
pub mod link;
pub mod layout;
pub mod factory;
pub mod model;
pub mod construct;
pub mod orientation;
pub mod registrar;
pub mod log;
pub mod signal;
pub mod selection;
pub mod persist;
pub mod editor;
mod sync;

#[cfg(test)]
mod testing;

pub use config::{ConfigError, EditorConfig, LayoutConfig};
pub use semantic::{BlockView, PointView, SemanticGraph};
pub use port::{PortBinding, PortDirection, PortId, PortRef, VisualPort};
pub use node::{NodeId, NodeVariant, VisualNode};
pub use link::{Link, LinkEvent, LinkId, LinkState};
pub use layout::LayoutState;
pub use factory::NodeFactory;
pub use model::{PendingChanges, VisualModel};
pub use construct::NodeSource;
pub use orientation::{resolve, Orientation};
pub use log::{EditorLog, LogEntry, Severity};
pub use signal::EditorSignal;
pub use selection::Selection;
pub use persist::{LayoutSnapshot, NodeLocation};
pub use editor::{EditorError, EditorKey, GraphEditor};
