// SPDX-License-Identifier: MIT OR Apache-2.0
//! Test support: a graph that records the edits made to it.

use crate::editor::GraphEditor;
use crate::link::LinkId;
use crate::node::NodeId;
use crate::port::PortRef;
use crate::semantic::{BlockView, PointView, SemanticGraph};
use ordoplay_material_graph::{
    BlockId, BuildError, BuildSummary, Dependency, GraphError, LiteralValue, MaterialGraph,
    PointId,
};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    Connect(PointId, PointId),
    Disconnect(PointId, PointId),
    SetValue(PointId, Option<LiteralValue>),
    Build,
}

/// A [`MaterialGraph`] that logs every mutating call
#[derive(Debug, Default)]
pub(crate) struct RecordingGraph {
    pub(crate) inner: MaterialGraph,
    pub(crate) calls: Vec<Call>,
}

impl SemanticGraph for RecordingGraph {
    fn block_view(&self, block: BlockId) -> Option<BlockView> {
        self.inner.block_view(block)
    }

    fn point_view(&self, point: PointId) -> Option<PointView> {
        self.inner.point_view(point)
    }

    fn input_dependencies(&self, block: BlockId) -> Vec<Dependency> {
        self.inner.input_dependencies(block)
    }

    fn create_block(&mut self, kind: &str) -> Result<BlockId, GraphError> {
        self.inner.create_block(kind)
    }

    fn connect_to(&mut self, output: PointId, input: PointId) -> Result<(), GraphError> {
        self.calls.push(Call::Connect(output, input));
        self.inner.connect_to(output, input)
    }

    fn disconnect_from(&mut self, output: PointId, input: PointId) -> Result<(), GraphError> {
        self.calls.push(Call::Disconnect(output, input));
        self.inner.disconnect_from(output, input)
    }

    fn set_value(&mut self, point: PointId, value: Option<LiteralValue>) -> Result<(), GraphError> {
        self.calls.push(Call::SetValue(point, value.clone()));
        SemanticGraph::set_value(&mut self.inner, point, value)
    }

    fn output_roots(&self) -> Vec<BlockId> {
        SemanticGraph::output_roots(&self.inner)
    }

    fn add_output_root(&mut self, block: BlockId) -> bool {
        SemanticGraph::add_output_root(&mut self.inner, block)
    }

    fn remove_output_root(&mut self, block: BlockId) -> bool {
        SemanticGraph::remove_output_root(&mut self.inner, block)
    }

    fn build(&mut self) -> Result<BuildSummary, BuildError> {
        self.calls.push(Call::Build);
        SemanticGraph::build(&mut self.inner)
    }
}

/// A ready editor with one committed node per block kind, in order
pub(crate) fn editor_with(kinds: &[&str]) -> (GraphEditor<RecordingGraph>, Vec<NodeId>) {
    let mut graph = RecordingGraph::default();
    let blocks: Vec<BlockId> = kinds
        .iter()
        .map(|kind| graph.inner.add_block(kind).unwrap())
        .collect();

    let mut editor = GraphEditor::new(graph);
    editor.host_ready();
    let nodes = blocks
        .into_iter()
        .map(|block| editor.construct_from_block(block, 0).unwrap())
        .collect();
    (editor, nodes)
}

/// The port called `name` on a live node
pub(crate) fn port(editor: &GraphEditor<RecordingGraph>, node: NodeId, name: &str) -> PortRef {
    editor
        .model()
        .node(node)
        .unwrap()
        .ports()
        .find(|p| p.name == name)
        .unwrap()
        .port_ref()
}

/// Link `from.output` to `to.input`
pub(crate) fn link(
    editor: &mut GraphEditor<RecordingGraph>,
    from: NodeId,
    output: &str,
    to: NodeId,
    input: &str,
) -> LinkId {
    let source = port(editor, from, output);
    let target = port(editor, to, input);
    editor.link_ports(source, target).unwrap()
}
