// SPDX-License-Identifier: MIT OR Apache-2.0
//! Visual nodes.

use crate::port::{PortId, VisualPort};
use crate::semantic::BlockView;
use ordoplay_material_graph::{BlockId, PointId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub Uuid);

impl NodeId {
    /// Create a new random node ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

/// Presentation variant of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeVariant {
    /// Any block without a dedicated presentation
    Generic,
    /// Texture sampling block, shown with a preview
    Texture,
    /// Light block
    Light,
    /// Literal value with no block of its own
    Input,
}

/// A node in the visual model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualNode {
    /// Unique node ID
    pub id: NodeId,
    /// Presentation variant
    pub variant: NodeVariant,
    /// Title
    pub title: String,
    /// Presented block; `None` for literal input nodes
    pub block: Option<BlockId>,
    /// Input point a literal node currently feeds
    pub connection: Option<PointId>,
    /// Layout column assigned at construction
    pub column: usize,
    /// Layout row assigned at construction
    pub row: usize,
    /// Position in graph space
    pub position: [f32; 2],
    /// Input ports
    pub inputs: Vec<VisualPort>,
    /// Output ports
    pub outputs: Vec<VisualPort>,
    /// Custom header color (optional)
    pub color: Option<[u8; 3]>,
}

impl VisualNode {
    /// Node presenting a block, one port per connection point
    pub fn from_block(block: &BlockView, variant: NodeVariant) -> Self {
        let id = NodeId::new();
        Self {
            id,
            variant,
            title: block.name.clone(),
            block: Some(block.id),
            connection: None,
            column: 0,
            row: 0,
            position: [0.0, 0.0],
            inputs: block.inputs.iter().map(|p| VisualPort::bound(id, p)).collect(),
            outputs: block.outputs.iter().map(|p| VisualPort::bound(id, p)).collect(),
            color: None,
        }
    }

    /// Literal node with a single unbound output
    pub fn literal(title: impl Into<String>, output: impl FnOnce(NodeId) -> VisualPort) -> Self {
        let id = NodeId::new();
        Self {
            id,
            variant: NodeVariant::Input,
            title: title.into(),
            block: None,
            connection: None,
            column: 0,
            row: 0,
            position: [0.0, 0.0],
            inputs: Vec::new(),
            outputs: vec![output(id)],
            color: None,
        }
    }

    /// Set the header color
    pub fn with_color(mut self, color: [u8; 3]) -> Self {
        self.color = Some(color);
        self
    }

    /// Get a port by ID
    pub fn port(&self, port_id: PortId) -> Option<&VisualPort> {
        self.ports().find(|p| p.id == port_id)
    }

    /// Get a mutable port by ID
    pub fn port_mut(&mut self, port_id: PortId) -> Option<&mut VisualPort> {
        self.inputs
            .iter_mut()
            .chain(self.outputs.iter_mut())
            .find(|p| p.id == port_id)
    }

    /// Get all ports
    pub fn ports(&self) -> impl Iterator<Item = &VisualPort> {
        self.inputs.iter().chain(self.outputs.iter())
    }

    /// Input port presenting a point
    pub fn input_for(&self, point: PointId) -> Option<&VisualPort> {
        self.inputs.iter().find(|p| p.point() == Some(point))
    }

    /// Output port presenting a point
    pub fn output_for(&self, point: PointId) -> Option<&VisualPort> {
        self.outputs.iter().find(|p| p.point() == Some(point))
    }
}
