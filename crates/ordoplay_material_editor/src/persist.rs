// SPDX-License-Identifier: MIT OR Apache-2.0
//! Saving and restoring node positions alongside a material.

use crate::model::VisualModel;
use ordoplay_material_graph::BlockId;
use serde::{Deserialize, Serialize};

/// Where the node for a block was placed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeLocation {
    /// Presented block
    pub block: BlockId,
    /// Position in graph space
    pub position: [f32; 2],
}

/// Node positions keyed by block.
///
/// Literal nodes have no block and are not saved.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutSnapshot {
    /// Saved locations
    pub locations: Vec<NodeLocation>,
}

impl LayoutSnapshot {
    /// Record the position of every block node in the model
    pub fn capture(model: &VisualModel) -> Self {
        Self {
            locations: model
                .nodes()
                .filter_map(|node| {
                    Some(NodeLocation {
                        block: node.block?,
                        position: node.position,
                    })
                })
                .collect(),
        }
    }

    /// Move nodes to their saved positions; returns how many moved
    pub fn apply(&self, model: &mut VisualModel) -> usize {
        let mut moved = 0;
        for location in &self.locations {
            let Some(node_id) = model.node_for_block(location.block).map(|n| n.id) else {
                continue;
            };
            if let Some(node) = model.node_mut(node_id) {
                node.position = location.position;
                moved += 1;
            }
        }
        moved
    }

    /// Serialize to a RON string
    pub fn to_ron(&self) -> Result<String, ron::Error> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
    }

    /// Deserialize from a RON string
    pub fn from_ron(s: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(s)
    }
}
