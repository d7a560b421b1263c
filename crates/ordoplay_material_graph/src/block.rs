// SPDX-License-Identifier: MIT OR Apache-2.0
//! Block instances in a material graph.

use crate::point::PointId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockId(pub Uuid);

impl BlockId {
    /// Create a new random block ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for BlockId {
    fn default() -> Self {
        Self::new()
    }
}

/// Classification tag used by editors to pick a presentation for a block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockClass {
    /// Samples a texture
    Texture,
    /// Reads scene lighting
    Light,
    /// Anything else
    Other,
}

/// A block instance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    /// Unique instance ID
    pub id: BlockId,
    /// Catalog kind ID
    pub kind: String,
    /// Display name
    pub name: String,
    /// Classification tag
    pub class: BlockClass,
    /// Whether this block terminates the graph as an output root
    pub is_final_merger: bool,
    /// Input points, in declaration order
    pub inputs: Vec<PointId>,
    /// Output points, in declaration order
    pub outputs: Vec<PointId>,
}

impl Block {
    /// All points owned by this block
    pub fn points(&self) -> impl Iterator<Item = &PointId> {
        self.inputs.iter().chain(self.outputs.iter())
    }
}
