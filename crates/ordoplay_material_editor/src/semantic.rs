// SPDX-License-Identifier: MIT OR Apache-2.0
//! Boundary between the editor and the block graph it presents.

use ordoplay_material_graph::{
    BlockClass, BlockId, BuildError, BuildSummary, Dependency, GraphError, LiteralValue,
    MaterialGraph, PointDirection, PointId, ValueType,
};

/// Snapshot of a connection point, as the editor sees it
#[derive(Debug, Clone, PartialEq)]
pub struct PointView {
    /// Point ID
    pub id: PointId,
    /// Point name
    pub name: String,
    /// Point direction
    pub direction: PointDirection,
    /// Data type
    pub value_type: ValueType,
    /// Default literal offered on value injection
    pub default_value: Option<LiteralValue>,
    /// Currently held literal
    pub value: Option<LiteralValue>,
}

/// Snapshot of a block, as the editor sees it
#[derive(Debug, Clone, PartialEq)]
pub struct BlockView {
    /// Block ID
    pub id: BlockId,
    /// Display name
    pub name: String,
    /// Classification tag
    pub class: BlockClass,
    /// Whether the block is an output root
    pub is_final_merger: bool,
    /// Input points
    pub inputs: Vec<PointView>,
    /// Output points
    pub outputs: Vec<PointView>,
}

/// Operations the editor needs from a block graph.
///
/// The editor is the only writer of the graph while it is open; everything
/// else should treat it as read-only.
pub trait SemanticGraph {
    /// Look up a block
    fn block_view(&self, block: BlockId) -> Option<BlockView>;

    /// Look up a connection point
    fn point_view(&self, point: PointId) -> Option<PointView>;

    /// Edges feeding a block's inputs
    fn input_dependencies(&self, block: BlockId) -> Vec<Dependency>;

    /// Instantiate a block of a catalog kind
    fn create_block(&mut self, kind: &str) -> Result<BlockId, GraphError>;

    /// Connect an output point to an input point
    fn connect_to(&mut self, output: PointId, input: PointId) -> Result<(), GraphError>;

    /// Remove the edge between an output point and an input point
    fn disconnect_from(&mut self, output: PointId, input: PointId) -> Result<(), GraphError>;

    /// Set or clear the literal held by a point
    fn set_value(&mut self, point: PointId, value: Option<LiteralValue>) -> Result<(), GraphError>;

    /// Registered output roots
    fn output_roots(&self) -> Vec<BlockId>;

    /// Register an output root
    fn add_output_root(&mut self, block: BlockId) -> bool;

    /// Unregister an output root
    fn remove_output_root(&mut self, block: BlockId) -> bool;

    /// Build everything reachable from the output roots
    fn build(&mut self) -> Result<BuildSummary, BuildError>;
}

impl SemanticGraph for MaterialGraph {
    fn block_view(&self, block: BlockId) -> Option<BlockView> {
        let block = self.block(block)?;
        let views = |ids: &[PointId]| -> Vec<PointView> {
            ids.iter().filter_map(|id| self.point_view(*id)).collect()
        };
        Some(BlockView {
            id: block.id,
            name: block.name.clone(),
            class: block.class,
            is_final_merger: block.is_final_merger,
            inputs: views(&block.inputs),
            outputs: views(&block.outputs),
        })
    }

    fn point_view(&self, point: PointId) -> Option<PointView> {
        let point = self.point(point)?;
        Some(PointView {
            id: point.id,
            name: point.name.clone(),
            direction: point.direction,
            value_type: point.value_type,
            default_value: point.default_value.clone(),
            value: point.value.clone(),
        })
    }

    fn input_dependencies(&self, block: BlockId) -> Vec<Dependency> {
        MaterialGraph::input_dependencies(self, block)
    }

    fn create_block(&mut self, kind: &str) -> Result<BlockId, GraphError> {
        self.add_block(kind)
    }

    fn connect_to(&mut self, output: PointId, input: PointId) -> Result<(), GraphError> {
        self.connect(output, input)
    }

    fn disconnect_from(&mut self, output: PointId, input: PointId) -> Result<(), GraphError> {
        self.disconnect(output, input)
    }

    fn set_value(&mut self, point: PointId, value: Option<LiteralValue>) -> Result<(), GraphError> {
        MaterialGraph::set_value(self, point, value)
    }

    fn output_roots(&self) -> Vec<BlockId> {
        MaterialGraph::output_roots(self).to_vec()
    }

    fn add_output_root(&mut self, block: BlockId) -> bool {
        MaterialGraph::add_output_root(self, block)
    }

    fn remove_output_root(&mut self, block: BlockId) -> bool {
        MaterialGraph::remove_output_root(self, block)
    }

    fn build(&mut self) -> Result<BuildSummary, BuildError> {
        MaterialGraph::build(self)
    }
}
