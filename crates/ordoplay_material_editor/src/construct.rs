// SPDX-License-Identifier: MIT OR Apache-2.0
//! Building visual nodes from the block graph.
//!
//! Construction starts at a block (usually an output root) in some column,
//! places its node at the next free row of that column, and recurses into
//! the blocks feeding its inputs one column further left. Blocks reachable
//! along several paths get a single node. Everything produced goes into the
//! pass's [`PendingChanges`] rather than the live model.

use crate::config::LayoutConfig;
use crate::editor::EditorError;
use crate::factory::NodeFactory;
use crate::layout::LayoutState;
use crate::link::Link;
use crate::model::{PendingChanges, VisualModel};
use crate::node::{NodeId, VisualNode};
use crate::port::PortRef;
use crate::registrar;
use crate::semantic::SemanticGraph;
use ordoplay_material_graph::{BlockId, PointId, ValueType};
use std::collections::HashMap;

/// What a constructed node presents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeSource {
    /// A block of the graph
    Block(BlockId),
    /// A literal value with no block
    Literal(ValueType),
}

/// State threaded through one construction pass
#[derive(Debug, Default)]
pub(crate) struct ConstructPass {
    pub(crate) layout: LayoutState,
    seen: HashMap<BlockId, NodeId>,
    pub(crate) pending: PendingChanges,
}

impl ConstructPass {
    /// Start a pass; blocks already shown in `live` are not rebuilt
    pub(crate) fn new(live: &VisualModel) -> Self {
        Self {
            layout: LayoutState::new(),
            seen: live
                .nodes()
                .filter_map(|node| Some((node.block?, node.id)))
                .collect(),
            pending: PendingChanges::default(),
        }
    }

    fn node<'a>(&'a self, live: &'a VisualModel, id: NodeId) -> Option<&'a VisualNode> {
        self.pending.node(id).or_else(|| live.node(id))
    }
}

/// Read-only collaborators of a pass, plus the graph for root registration
pub(crate) struct ConstructContext<'a, G> {
    pub(crate) graph: &'a mut G,
    pub(crate) factory: &'a NodeFactory,
    pub(crate) layout: &'a LayoutConfig,
    pub(crate) live: &'a VisualModel,
}

/// Construct the node for `source` in `column`, then its dependencies.
pub(crate) fn construct<G: SemanticGraph>(
    cx: &mut ConstructContext<'_, G>,
    pass: &mut ConstructPass,
    source: NodeSource,
    column: usize,
) -> Result<NodeId, EditorError> {
    let block_id = match source {
        NodeSource::Literal(value_type) => {
            let mut node = cx
                .factory
                .literal(value_type)
                .ok_or_else(|| EditorError::UnknownValueType(value_type.name().to_string()))?;
            place(cx, pass, &mut node, column);
            let id = node.id;
            pass.pending.nodes.push(node);
            return Ok(id);
        }
        NodeSource::Block(block_id) => block_id,
    };

    if let Some(existing) = pass.seen.get(&block_id) {
        return Ok(*existing);
    }

    let view = cx
        .graph
        .block_view(block_id)
        .ok_or(EditorError::BlockNotFound(block_id))?;
    let mut node = cx.factory.create(&view);
    place(cx, pass, &mut node, column);
    let node_id = node.id;

    if view.is_final_merger {
        registrar::register_output(&mut *cx.graph, block_id);
    }

    tracing::debug!(
        "Constructed node {} at column {} row {}",
        view.name,
        node.column,
        node.row
    );
    pass.seen.insert(block_id, node_id);
    pass.pending.nodes.push(node);

    for dependency in cx.graph.input_dependencies(block_id) {
        let upstream = construct(cx, pass, NodeSource::Block(dependency.source_block), column + 1)?;

        let output = find_port(pass, cx.live, upstream, dependency.source, true);
        let input = find_port(pass, cx.live, node_id, dependency.input, false);
        match (output, input) {
            (Some(output), Some(input)) => pass.pending.links.push(Link::bound(output, input)),
            _ => tracing::warn!(
                "No ports for edge {:?} -> {:?}, skipping link",
                dependency.source,
                dependency.input
            ),
        }
    }

    Ok(node_id)
}

fn place<G>(
    cx: &ConstructContext<'_, G>,
    pass: &mut ConstructPass,
    node: &mut VisualNode,
    column: usize,
) {
    let row = pass.layout.next_row(column);
    node.column = column;
    node.row = row;
    node.position = cx.layout.position(column, row);
}

fn find_port(
    pass: &ConstructPass,
    live: &VisualModel,
    node_id: NodeId,
    point: PointId,
    output: bool,
) -> Option<PortRef> {
    let node = pass.node(live, node_id)?;
    let port = if output {
        node.output_for(point)
    } else {
        node.input_for(point)
    }?;
    Some(port.port_ref())
}
