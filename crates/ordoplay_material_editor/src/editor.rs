// SPDX-License-Identifier: MIT OR Apache-2.0
//! The graph editor: owns the visual model and drives the block graph.
//!
//! All mutation of either graph goes through [`GraphEditor`]. Construction
//! passes produce a pending change-set that reaches the visual model once
//! the host has signalled it is ready; link edits arrive as
//! [`LinkEvent`](crate::LinkEvent)s (see [`GraphEditor::dispatch`]).

use crate::config::EditorConfig;
use crate::construct::{self, ConstructContext, ConstructPass, NodeSource};
use crate::factory::NodeFactory;
use crate::link::LinkId;
use crate::log::{EditorLog, LogEntry};
use crate::model::{PendingChanges, VisualModel};
use crate::node::NodeId;
use crate::persist::LayoutSnapshot;
use crate::port::PortRef;
use crate::registrar;
use crate::selection::Selection;
use crate::semantic::SemanticGraph;
use crate::signal::{EditorSignal, SignalHub};
use ordoplay_material_graph::{BlockId, GraphError, PointId, ValueType};
use std::sync::mpsc;

/// Editor errors
#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    /// Block not in the graph
    #[error("Block not found: {0:?}")]
    BlockNotFound(BlockId),

    /// Node not in the visual model
    #[error("Node not found: {0:?}")]
    NodeNotFound(NodeId),

    /// Port not in the visual model
    #[error("Port not found: {0:?}")]
    PortNotFound(PortRef),

    /// Connection point not in the graph
    #[error("Connection point not found: {0:?}")]
    PointNotFound(PointId),

    /// Link not in the visual model
    #[error("Link not found: {0:?}")]
    LinkNotFound(LinkId),

    /// Link created twice
    #[error("Link already exists: {0:?}")]
    DuplicateLink(LinkId),

    /// Target bound before source
    #[error("Link {0:?} has no source yet")]
    EndpointOrder(LinkId),

    /// Literal type name not supported
    #[error("Unknown value type: {0}")]
    UnknownValueType(String),

    /// Graph rejected an edit
    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    /// Layout could not be written
    #[error("Layout serialization error: {0}")]
    LayoutSerialize(#[from] ron::Error),

    /// Layout could not be read
    #[error("Layout parse error: {0}")]
    LayoutParse(#[from] ron::error::SpannedError),
}

/// Keys the editor reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorKey {
    /// Delete selection
    Delete,
    /// Delete selection
    Backspace,
    /// Clear selection
    Escape,
    /// Anything else
    Other,
}

/// Keeps a visual node graph in step with a block graph
pub struct GraphEditor<G: SemanticGraph> {
    pub(crate) graph: G,
    pub(crate) model: VisualModel,
    pending: Option<PendingChanges>,
    factory: NodeFactory,
    config: EditorConfig,
    pub(crate) log: EditorLog,
    pub(crate) signals: SignalHub,
    pub(crate) selection: Selection,
    host_ready: bool,
}

impl<G: SemanticGraph> GraphEditor<G> {
    /// Create an editor with the default configuration
    pub fn new(graph: G) -> Self {
        Self::with_config(graph, EditorConfig::default())
    }

    /// Create an editor with the given configuration
    pub fn with_config(graph: G, config: EditorConfig) -> Self {
        Self {
            graph,
            model: VisualModel::new(),
            pending: None,
            factory: NodeFactory::default(),
            log: EditorLog::new(config.log_capacity),
            config,
            signals: SignalHub::default(),
            selection: Selection::new(),
            host_ready: false,
        }
    }

    /// Replace the node factory
    pub fn with_factory(mut self, factory: NodeFactory) -> Self {
        self.factory = factory;
        self
    }

    /// The block graph
    pub fn graph(&self) -> &G {
        &self.graph
    }

    /// The live visual model
    pub fn model(&self) -> &VisualModel {
        &self.model
    }

    /// Changes waiting for the host
    pub fn pending(&self) -> Option<&PendingChanges> {
        self.pending.as_ref()
    }

    /// The editor log
    pub fn log(&self) -> &EditorLog {
        &self.log
    }

    /// Take every log entry, e.g. to hand to a log display
    pub fn drain_log(&mut self) -> Vec<LogEntry> {
        self.log.drain()
    }

    /// Current selection
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Active configuration
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Receive editor signals
    pub fn subscribe(&mut self) -> mpsc::Receiver<EditorSignal> {
        self.signals.subscribe()
    }

    /// Whether the host has signalled readiness
    pub fn is_host_ready(&self) -> bool {
        self.host_ready
    }

    /// Give back the block graph
    pub fn into_graph(self) -> G {
        self.graph
    }

    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// Construct the node for `block` in `column`, with everything feeding it
    pub fn construct_from_block(
        &mut self,
        block: BlockId,
        column: usize,
    ) -> Result<NodeId, EditorError> {
        let mut pass = self.begin_pass();
        let node = self.run(&mut pass, NodeSource::Block(block), column)?;
        self.finish_pass(pass);
        Ok(node)
    }

    /// Construct a literal input node.
    ///
    /// Accepts `Float`, `Vector2`, `Vector3`, `Vector4`, `Matrix`, `Color3`
    /// and `Color4`.
    pub fn construct_literal(
        &mut self,
        type_name: &str,
        column: usize,
    ) -> Result<NodeId, EditorError> {
        let value_type = ValueType::from_name(type_name)
            .ok_or_else(|| EditorError::UnknownValueType(type_name.to_string()))?;
        let mut pass = self.begin_pass();
        let node = self.run(&mut pass, NodeSource::Literal(value_type), column)?;
        self.finish_pass(pass);
        Ok(node)
    }

    /// Throw away the visual model, rebuild it from the output roots and
    /// rebuild the material. Returns whether the material built.
    pub fn reset_and_rebuild(&mut self) -> Result<bool, EditorError> {
        // Every root gets a new node; the old model goes only once the pass succeeded
        let mut pass = ConstructPass::default();
        for root in self.graph.output_roots() {
            self.run(&mut pass, NodeSource::Block(root), 0)?;
        }

        self.selection.clear();
        self.signals.emit(EditorSignal::SelectionCleared);
        self.model.clear();

        tracing::info!(
            "Reconstructed {} nodes in {} columns",
            pass.pending.nodes.len(),
            pass.layout.column_count()
        );
        self.finish_pass(pass);

        Ok(self.rebuild())
    }

    /// The host finished its layout; pending and future passes commit
    pub fn host_ready(&mut self) {
        self.host_ready = true;
        self.commit();
    }

    /// Move the pending change-set into the visual model.
    ///
    /// Returns `false` when nothing was pending.
    pub fn commit(&mut self) -> bool {
        let Some(pending) = self.pending.take() else {
            return false;
        };
        let nodes = pending.nodes.len();
        let links = pending.links.len();
        self.model.apply(pending);
        tracing::debug!("Committed {} nodes and {} links", nodes, links);
        self.signals.emit(EditorSignal::Committed { nodes, links });
        true
    }

    fn begin_pass(&self) -> ConstructPass {
        ConstructPass::new(&self.model)
    }

    fn run(
        &mut self,
        pass: &mut ConstructPass,
        source: NodeSource,
        column: usize,
    ) -> Result<NodeId, EditorError> {
        let mut cx = ConstructContext {
            graph: &mut self.graph,
            factory: &self.factory,
            layout: &self.config.layout,
            live: &self.model,
        };
        construct::construct(&mut cx, pass, source, column)
    }

    fn finish_pass(&mut self, pass: ConstructPass) {
        if let Some(stale) = self.pending.take() {
            let nodes = stale.nodes.len();
            let links = stale.links.len();
            tracing::debug!("Discarding uncommitted pass ({} nodes, {} links)", nodes, links);
            self.signals
                .emit(EditorSignal::PendingDiscarded { nodes, links });
        }
        self.pending = Some(pass.pending);
        if self.host_ready {
            self.commit();
        }
    }

    // ------------------------------------------------------------------
    // Rebuild
    // ------------------------------------------------------------------

    /// Build the material once and log the outcome. Never fails.
    pub fn rebuild(&mut self) -> bool {
        match self.graph.build() {
            Ok(summary) => {
                self.log.info(format!(
                    "Material built: {} blocks, {} outputs, {} literal inputs",
                    summary.order.len(),
                    summary.roots,
                    summary.literal_inputs
                ));
                true
            }
            Err(err) => {
                self.log.error(err.to_string());
                false
            }
        }
    }

    // ------------------------------------------------------------------
    // Node edits
    // ------------------------------------------------------------------

    /// Create a block of `kind` and place its node at `position`
    pub fn add_block(&mut self, kind: &str, position: [f32; 2]) -> Result<NodeId, EditorError> {
        let block = self.graph.create_block(kind)?;
        let node = self.construct_from_block(block, 0)?;
        self.move_node(node, position)?;
        tracing::info!("Added {} block", kind);
        Ok(node)
    }

    /// Move a live or pending node
    pub fn move_node(&mut self, node_id: NodeId, position: [f32; 2]) -> Result<(), EditorError> {
        let node = match self.model.node_mut(node_id) {
            Some(node) => node,
            None => self
                .pending
                .as_mut()
                .and_then(|p| p.node_mut(node_id))
                .ok_or(EditorError::NodeNotFound(node_id))?,
        };
        node.position = position;
        Ok(())
    }

    /// Delete a node and every link touching it
    pub fn delete_node(&mut self, node_id: NodeId) -> Result<(), EditorError> {
        let node = self
            .model
            .node(node_id)
            .ok_or(EditorError::NodeNotFound(node_id))?;
        let block = node.block;

        self.signals.emit(EditorSignal::NodeDeleted(node_id));

        let unregistered = block.filter(|block| {
            let is_final_merger = self
                .graph
                .block_view(*block)
                .is_some_and(|view| view.is_final_merger);
            is_final_merger && registrar::unregister_output(&mut self.graph, *block)
        });

        for link in self.model.links_for_node(node_id) {
            if let Err(err) = self.remove_link(link) {
                // The node stays, so it stays an output
                if let Some(block) = unregistered {
                    registrar::register_output(&mut self.graph, block);
                }
                return Err(err);
            }
        }

        self.selection.remove_node(node_id);
        self.model.remove_node(node_id);
        tracing::debug!("Deleted node {:?}", node_id);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------

    /// Select a node
    pub fn select_node(&mut self, node_id: NodeId, add_to_selection: bool) {
        self.selection.select_node(node_id, add_to_selection);
    }

    /// Select a link
    pub fn select_link(&mut self, link_id: LinkId, add_to_selection: bool) {
        self.selection.select_link(link_id, add_to_selection);
    }

    /// Clear selection
    pub fn clear_selection(&mut self) {
        self.selection.clear();
        self.signals.emit(EditorSignal::SelectionCleared);
    }

    /// Delete selected links, then selected nodes. Returns how many went.
    pub fn delete_selected(&mut self) -> Result<usize, EditorError> {
        let selection = std::mem::take(&mut self.selection);
        let mut deleted = 0;

        for link in selection.links() {
            // Already gone with an earlier node
            if self.model.link(link).is_some() {
                self.remove_link(link)?;
                deleted += 1;
            }
        }
        for node in selection.nodes() {
            if self.model.node(node).is_some() {
                self.delete_node(node)?;
                deleted += 1;
            }
        }

        Ok(deleted)
    }

    /// React to a key press. Returns whether the key was consumed.
    pub fn handle_key(&mut self, key: EditorKey) -> Result<bool, EditorError> {
        match key {
            EditorKey::Delete | EditorKey::Backspace => {
                if self.selection.is_empty() {
                    return Ok(false);
                }
                self.delete_selected()?;
                Ok(true)
            }
            EditorKey::Escape => {
                self.clear_selection();
                Ok(true)
            }
            EditorKey::Other => Ok(false),
        }
    }

    // ------------------------------------------------------------------
    // Layout persistence
    // ------------------------------------------------------------------

    /// Node positions as RON
    pub fn save_layout(&self) -> Result<String, EditorError> {
        Ok(LayoutSnapshot::capture(&self.model).to_ron()?)
    }

    /// Apply positions saved by [`save_layout`](Self::save_layout).
    /// Returns how many nodes moved.
    pub fn restore_layout(&mut self, ron: &str) -> Result<usize, EditorError> {
        let snapshot = LayoutSnapshot::from_ron(ron)?;
        Ok(snapshot.apply(&mut self.model))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::link::{Link, LinkState};
    use crate::port::PortId;
    use crate::log::Severity;
    use crate::testing::{self, Call, RecordingGraph};
    use ordoplay_material_graph::MaterialGraph;

    #[test]
    fn test_pending_until_host_ready() {
        let mut graph = MaterialGraph::default();
        let fragment = graph.add_block("fragment_output").unwrap();
        let mut editor = GraphEditor::new(graph);
        let signals = editor.subscribe();

        editor.construct_from_block(fragment, 0).unwrap();
        assert_eq!(editor.model().node_count(), 0);
        assert_eq!(editor.pending().map(|p| p.nodes.len()), Some(1));

        editor.host_ready();
        assert_eq!(editor.model().node_count(), 1);
        assert!(editor.pending().is_none());
        assert_eq!(
            signals.try_recv(),
            Ok(EditorSignal::Committed { nodes: 1, links: 0 })
        );

        // Later passes commit at once
        editor.construct_literal("Float", 1).unwrap();
        assert_eq!(editor.model().node_count(), 2);
        assert!(!editor.commit());
    }

    #[test]
    fn test_new_pass_discards_pending() {
        let mut graph = MaterialGraph::default();
        let fragment = graph.add_block("fragment_output").unwrap();
        let vertex = graph.add_block("vertex_output").unwrap();
        let mut editor = GraphEditor::new(graph);
        let signals = editor.subscribe();

        editor.construct_from_block(fragment, 0).unwrap();
        let second = editor.construct_from_block(vertex, 0).unwrap();
        assert_eq!(
            signals.try_recv(),
            Ok(EditorSignal::PendingDiscarded { nodes: 1, links: 0 })
        );

        editor.host_ready();
        let ids: Vec<NodeId> = editor.model().nodes().map(|n| n.id).collect();
        assert_eq!(ids, vec![second]);
        // Fresh pass, so the row restarts
        assert_eq!(editor.model().node(second).unwrap().row, 0);
    }

    #[test]
    fn test_reset_and_rebuild() {
        let mut graph = MaterialGraph::default();
        let vertex = graph.add_block("vertex_output").unwrap();
        let fragment = graph.add_block("fragment_output").unwrap();
        let position = graph.add_block("mesh_position").unwrap();
        let texture = graph.add_block("texture").unwrap();
        let uv = graph.add_block("mesh_uv").unwrap();
        graph
            .connect(
                graph.output_named(position, "output").unwrap(),
                graph.input_named(vertex, "vector").unwrap(),
            )
            .unwrap();
        graph
            .connect(
                graph.output_named(uv, "output").unwrap(),
                graph.input_named(texture, "uv").unwrap(),
            )
            .unwrap();
        graph
            .connect(
                graph.output_named(texture, "rgba").unwrap(),
                graph.input_named(fragment, "rgba").unwrap(),
            )
            .unwrap();
        graph.add_output_root(vertex);
        graph.add_output_root(fragment);

        let mut editor = GraphEditor::new(graph);
        editor.host_ready();
        assert!(editor.reset_and_rebuild().unwrap());

        let placed: Vec<(usize, usize)> = editor.model().nodes().map(|n| (n.column, n.row)).collect();
        assert_eq!(placed, vec![(0, 0), (1, 0), (0, 1), (1, 1), (2, 0)]);
        assert_eq!(editor.model().link_count(), 3);
        assert!(editor
            .model()
            .links()
            .all(|l| l.state == LinkState::FullyBound));
        assert_eq!(editor.log().last().unwrap().severity, Severity::Info);

        // Resetting twice gives the same shape
        assert!(editor.reset_and_rebuild().unwrap());
        assert_eq!(editor.model().node_count(), 5);
        assert_eq!(editor.model().link_count(), 3);
    }

    #[test]
    fn test_reset_keeps_model_when_a_root_is_missing() {
        let (mut editor, nodes) = testing::editor_with(&["fragment_output", "texture"]);
        testing::link(&mut editor, nodes[1], "rgba", nodes[0], "rgba");
        editor.selection.select_node(nodes[0], false);
        editor.graph.inner.add_output_root(BlockId::new());

        assert!(matches!(
            editor.reset_and_rebuild(),
            Err(EditorError::BlockNotFound(_))
        ));
        assert_eq!(editor.model().node_count(), 2);
        assert_eq!(editor.model().link_count(), 1);
        assert!(editor.model().node(nodes[0]).is_some());
        assert!(editor.selection().contains_node(nodes[0]));
        assert!(editor.pending().is_none());
    }

    #[test]
    fn test_rebuild_failure_is_logged() {
        let mut editor = GraphEditor::new(MaterialGraph::default());
        assert!(!editor.rebuild());
        let entry = editor.log().last().unwrap();
        assert_eq!(entry.severity, Severity::Error);
        assert_eq!(entry.message, "Material has no output blocks");

        // Missing required input
        let (mut editor, _) = testing::editor_with(&["vertex_output"]);
        assert!(!editor.rebuild());
        assert!(editor.log().last().unwrap().message.contains("vector"));
        assert_eq!(
            editor
                .graph()
                .calls
                .iter()
                .filter(|c| **c == Call::Build)
                .count(),
            1
        );
        assert_eq!(editor.drain_log().len(), 1);
        assert!(editor.log().is_empty());
    }

    #[test]
    fn test_add_and_move_block() {
        let mut editor = GraphEditor::new(RecordingGraph::default());
        editor.host_ready();

        let node = editor.add_block("fragment_output", [10.0, 20.0]).unwrap();
        let block = editor.model().node(node).unwrap().block.unwrap();
        assert_eq!(editor.model().node(node).unwrap().position, [10.0, 20.0]);
        assert_eq!(editor.graph().output_roots(), vec![block]);

        editor.move_node(node, [5.0, 5.0]).unwrap();
        assert_eq!(editor.model().node(node).unwrap().position, [5.0, 5.0]);

        assert!(matches!(
            editor.add_block("teapot", [0.0, 0.0]),
            Err(EditorError::Graph(GraphError::UnknownKind(_)))
        ));
        assert!(matches!(
            editor.move_node(NodeId::new(), [0.0, 0.0]),
            Err(EditorError::NodeNotFound(_))
        ));
    }

    #[test]
    fn test_delete_final_merger_unregisters() {
        let (mut editor, nodes) = testing::editor_with(&["fragment_output", "texture"]);
        let fragment_block = editor.model().node(nodes[0]).unwrap().block.unwrap();
        let texture_block = editor.model().node(nodes[1]).unwrap().block.unwrap();
        let output = editor.graph().inner.output_named(texture_block, "rgba").unwrap();
        let input = editor.graph().inner.input_named(fragment_block, "rgba").unwrap();
        let link = testing::link(&mut editor, nodes[1], "rgba", nodes[0], "rgba");
        let signals = editor.subscribe();

        editor.delete_node(nodes[0]).unwrap();

        assert!(editor.graph().output_roots().is_empty());
        assert!(editor.model().link(link).is_none());
        assert!(editor.model().node(nodes[0]).is_none());

        let received: Vec<EditorSignal> = signals.try_iter().collect();
        assert_eq!(received[0], EditorSignal::NodeDeleted(nodes[0]));
        assert_eq!(received.last(), Some(&EditorSignal::LinkRemoved(link)));
        assert!(editor.graph().calls.contains(&Call::Disconnect(output, input)));
        assert!(editor.graph().inner.point(input).unwrap().source().is_none());
    }

    #[test]
    fn test_failed_delete_keeps_output_registered() {
        let (mut editor, nodes) = testing::editor_with(&["fragment_output", "texture"]);
        let fragment_block = editor.model().node(nodes[0]).unwrap().block.unwrap();
        let source = testing::port(&editor, nodes[1], "rgba");
        let dangling = PortRef {
            node: nodes[0],
            port: PortId::new(),
        };
        editor.model.add_link(Link::bound(source, dangling));

        assert!(matches!(
            editor.delete_node(nodes[0]),
            Err(EditorError::PortNotFound(port)) if port == dangling
        ));
        assert_eq!(editor.graph().output_roots(), vec![fragment_block]);
        assert!(editor.model().node(nodes[0]).is_some());
    }

    #[test]
    fn test_delete_key_removes_selection() {
        let (mut editor, nodes) = testing::editor_with(&["fragment_output", "texture", "mesh_uv"]);
        let rgba = testing::link(&mut editor, nodes[1], "rgba", nodes[0], "rgba");
        let uv = testing::link(&mut editor, nodes[2], "output", nodes[1], "uv");

        assert!(!editor.handle_key(EditorKey::Delete).unwrap());

        editor.select_link(rgba, false);
        editor.select_node(nodes[2], true);
        assert!(editor.handle_key(EditorKey::Backspace).unwrap());

        assert!(editor.model().link(rgba).is_none());
        assert!(editor.model().link(uv).is_none());
        assert!(editor.model().node(nodes[2]).is_none());
        assert_eq!(editor.model().node_count(), 2);
        assert!(editor.selection().is_empty());

        editor.select_node(nodes[0], false);
        assert!(editor.handle_key(EditorKey::Escape).unwrap());
        assert!(editor.selection().is_empty());
        assert!(!editor.handle_key(EditorKey::Other).unwrap());
    }

    #[test]
    fn test_layout_round_trip() {
        let (mut editor, nodes) = testing::editor_with(&["fragment_output", "texture"]);
        editor.move_node(nodes[1], [42.0, -7.0]).unwrap();
        let saved = editor.save_layout().unwrap();

        editor.move_node(nodes[1], [0.0, 0.0]).unwrap();
        assert_eq!(editor.restore_layout(&saved).unwrap(), 2);
        assert_eq!(editor.model().node(nodes[1]).unwrap().position, [42.0, -7.0]);

        assert!(matches!(
            editor.restore_layout("not ron"),
            Err(EditorError::LayoutParse(_))
        ));
    }

    #[test]
    fn test_unknown_literal_type() {
        let mut editor = GraphEditor::new(MaterialGraph::default());
        assert!(matches!(
            editor.construct_literal("Quaternion", 0),
            Err(EditorError::UnknownValueType(name)) if name == "Quaternion"
        ));
        assert!(matches!(
            editor.construct_from_block(BlockId::new(), 0),
            Err(EditorError::BlockNotFound(_))
        ));
    }
}
