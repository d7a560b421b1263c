// SPDX-License-Identifier: MIT OR Apache-2.0
//! Connection points: the typed terminals of a block.

use crate::block::BlockId;
use crate::value::{LiteralValue, ValueType};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a connection point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PointId(pub Uuid);

impl PointId {
    /// Create a new random point ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PointId {
    fn default() -> Self {
        Self::new()
    }
}

/// Point direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointDirection {
    /// Consumes a value
    Input,
    /// Produces a value
    Output,
}

/// A typed terminal on a block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionPoint {
    /// Unique point ID
    pub id: PointId,
    /// Owning block
    pub owner: BlockId,
    /// Point name
    pub name: String,
    /// Point direction
    pub direction: PointDirection,
    /// Data type
    pub value_type: ValueType,
    /// Whether an input may stay unconnected and empty
    pub optional: bool,
    /// Default literal offered when a value is injected
    pub default_value: Option<LiteralValue>,
    /// Held literal, used while no edge feeds the input
    pub value: Option<LiteralValue>,
    /// Output feeding this input
    pub(crate) source: Option<PointId>,
    /// Inputs fed by this output
    pub(crate) targets: Vec<PointId>,
}

impl ConnectionPoint {
    /// Output currently feeding this point (inputs only)
    pub fn source(&self) -> Option<PointId> {
        self.source
    }

    /// Inputs currently fed by this point (outputs only)
    pub fn targets(&self) -> &[PointId] {
        &self.targets
    }

    /// Whether an edge touches this point
    pub fn is_connected(&self) -> bool {
        self.source.is_some() || !self.targets.is_empty()
    }

    /// Whether this point is connected directly to another point
    pub fn is_connected_to(&self, other: PointId) -> bool {
        self.source == Some(other) || self.targets.contains(&other)
    }
}
