// SPDX-License-Identifier: MIT OR Apache-2.0
//! Node factory: block classification to node constructor.

use crate::node::{NodeVariant, VisualNode};
use crate::port::VisualPort;
use crate::semantic::BlockView;
use indexmap::IndexMap;
use ordoplay_material_graph::{BlockClass, LiteralValue, ValueType};

/// Builds the node presenting a block
pub type NodeConstructor = fn(&BlockView) -> VisualNode;

/// Registry of node constructors keyed by block classification
pub struct NodeFactory {
    constructors: IndexMap<BlockClass, NodeConstructor>,
}

impl NodeFactory {
    /// Create a factory with no constructors; every block becomes a
    /// generic node
    pub fn new() -> Self {
        Self {
            constructors: IndexMap::new(),
        }
    }

    /// Register the constructor for a classification
    pub fn register(&mut self, class: BlockClass, constructor: NodeConstructor) {
        self.constructors.insert(class, constructor);
    }

    /// Build the node presenting a block
    pub fn create(&self, block: &BlockView) -> VisualNode {
        let constructor = self
            .constructors
            .get(&block.class)
            .copied()
            .unwrap_or(generic_node);
        constructor(block)
    }

    /// Build a literal input node for a value type
    pub fn literal(&self, value_type: ValueType) -> Option<VisualNode> {
        let value = value_type.default_value()?;
        let name = value_type.name();
        Some(
            VisualNode::literal(name, |node| VisualPort::literal(node, name, value))
                .with_color([80, 200, 80]),
        )
    }

    /// Default literal for a palette type name
    pub fn default_value(type_name: &str) -> Option<LiteralValue> {
        ValueType::from_name(type_name)?.default_value()
    }
}

impl Default for NodeFactory {
    fn default() -> Self {
        let mut factory = Self::new();
        factory.register(BlockClass::Texture, texture_node);
        factory.register(BlockClass::Light, light_node);
        factory.register(BlockClass::Other, generic_node);
        factory
    }
}

fn generic_node(block: &BlockView) -> VisualNode {
    VisualNode::from_block(block, NodeVariant::Generic)
}

fn texture_node(block: &BlockView) -> VisualNode {
    VisualNode::from_block(block, NodeVariant::Texture).with_color([100, 150, 200])
}

fn light_node(block: &BlockView) -> VisualNode {
    VisualNode::from_block(block, NodeVariant::Light).with_color([255, 200, 100])
}
