// SPDX-License-Identifier: MIT OR Apache-2.0
//! Links between ports and the events that drive them.

use crate::node::NodeId;
use crate::port::{PortId, PortRef};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LinkId(pub Uuid);

impl LinkId {
    /// Create a new random link ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for LinkId {
    fn default() -> Self {
        Self::new()
    }
}

/// Lifecycle of a link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LinkState {
    /// Exists, no endpoint yet
    Unbound,
    /// Source endpoint set; also where a link whose endpoints were
    /// rejected stays
    SourceSet,
    /// Both endpoints set and applied to the block graph
    FullyBound,
    /// Gone
    Removed,
}

/// A link between two ports.
///
/// `source` is whichever endpoint the user started from, which is not
/// necessarily the output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Unique link ID
    pub id: LinkId,
    /// First endpoint
    pub source: Option<PortRef>,
    /// Second endpoint
    pub target: Option<PortRef>,
    /// Lifecycle state
    pub state: LinkState,
}

impl Link {
    /// A fresh link with no endpoints
    pub fn new(id: LinkId) -> Self {
        Self {
            id,
            source: None,
            target: None,
            state: LinkState::Unbound,
        }
    }

    /// A link mirroring an edge that already exists in the block graph
    pub fn bound(output: PortRef, input: PortRef) -> Self {
        Self {
            id: LinkId::new(),
            source: Some(output),
            target: Some(input),
            state: LinkState::FullyBound,
        }
    }

    /// Check if this link touches a node
    pub fn involves_node(&self, node_id: NodeId) -> bool {
        self.endpoints().any(|p| p.node == node_id)
    }

    /// Check if this link touches a port
    pub fn involves_port(&self, port_id: PortId) -> bool {
        self.endpoints().any(|p| p.port == port_id)
    }

    fn endpoints(&self) -> impl Iterator<Item = &PortRef> {
        self.source.iter().chain(self.target.iter())
    }
}

/// Structural event on a link, delivered to [`GraphEditor::dispatch`].
///
/// [`GraphEditor::dispatch`]: crate::GraphEditor::dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkEvent {
    /// The link object exists
    Created(LinkId),
    /// The first endpoint was attached or moved
    SourceBound(LinkId, PortRef),
    /// The second endpoint was attached or moved
    TargetBound(LinkId, PortRef),
    /// The link is being deleted
    Removed(LinkId),
}

impl LinkEvent {
    /// Link the event is about
    pub fn link(&self) -> LinkId {
        match self {
            Self::Created(id)
            | Self::SourceBound(id, _)
            | Self::TargetBound(id, _)
            | Self::Removed(id) => *id,
        }
    }
}
