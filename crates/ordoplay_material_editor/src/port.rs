// SPDX-License-Identifier: MIT OR Apache-2.0
//! Ports on visual nodes.

use crate::node::NodeId;
use crate::semantic::PointView;
use ordoplay_material_graph::{LiteralValue, PointDirection, PointId, ValueType};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a port
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PortId(pub Uuid);

impl PortId {
    /// Create a new random port ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PortId {
    fn default() -> Self {
        Self::new()
    }
}

/// Port direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PortDirection {
    /// Input port
    Input,
    /// Output port
    Output,
}

impl From<PointDirection> for PortDirection {
    fn from(direction: PointDirection) -> Self {
        match direction {
            PointDirection::Input => Self::Input,
            PointDirection::Output => Self::Output,
        }
    }
}

/// What a port stands for in the block graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PortBinding {
    /// Literal output of an input node, not yet linked
    #[default]
    Unbound,
    /// Presents a connection point of its node's block
    Point(PointId),
    /// Literal output that feeds its value into another block's input
    Adopted(PointId),
}

/// Address of a port in the visual model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PortRef {
    /// Owning node
    pub node: NodeId,
    /// Port on that node
    pub port: PortId,
}

/// A port on a visual node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualPort {
    /// Unique port ID
    pub id: PortId,
    /// Owning node
    pub node: NodeId,
    /// Caption
    pub name: String,
    /// Port direction
    pub direction: PortDirection,
    /// Bound connection point, if any
    pub binding: PortBinding,
    /// Displayed data type
    pub value_type: Option<ValueType>,
    /// Literal offered by an unbound output
    pub literal: Option<LiteralValue>,
}

impl VisualPort {
    /// Port presenting a connection point
    pub fn bound(node: NodeId, point: &PointView) -> Self {
        Self {
            id: PortId::new(),
            node,
            name: point.name.clone(),
            direction: point.direction.into(),
            binding: PortBinding::Point(point.id),
            value_type: Some(point.value_type),
            literal: None,
        }
    }

    /// Unbound output offering a literal
    pub fn literal(node: NodeId, name: impl Into<String>, value: LiteralValue) -> Self {
        Self {
            id: PortId::new(),
            node,
            name: name.into(),
            direction: PortDirection::Output,
            binding: PortBinding::Unbound,
            value_type: Some(value.value_type()),
            literal: Some(value),
        }
    }

    /// Address of this port
    pub fn port_ref(&self) -> PortRef {
        PortRef {
            node: self.node,
            port: self.id,
        }
    }

    /// Connection point this port presents, when bound to its own block
    pub fn point(&self) -> Option<PointId> {
        match self.binding {
            PortBinding::Point(point) => Some(point),
            _ => None,
        }
    }

    /// Connection point this port refers to, adopted or not
    pub fn referenced_point(&self) -> Option<PointId> {
        match self.binding {
            PortBinding::Point(point) | PortBinding::Adopted(point) => Some(point),
            PortBinding::Unbound => None,
        }
    }

    /// Whether the port presents a connection point of its own block
    pub fn is_bound(&self) -> bool {
        self.point().is_some()
    }

    /// Refer to another block's input, keeping the caption
    pub fn adopt(&mut self, point: &PointView) {
        self.binding = PortBinding::Adopted(point.id);
        self.value_type = Some(point.value_type);
    }

    /// Drop an adopted reference
    pub fn release(&mut self) {
        if let PortBinding::Adopted(_) = self.binding {
            self.binding = PortBinding::Unbound;
        }
    }

    /// Refresh caption and type from the point
    pub fn sync_with_point(&mut self, point: &PointView) {
        self.name = point.name.clone();
        self.value_type = Some(point.value_type);
    }
}
