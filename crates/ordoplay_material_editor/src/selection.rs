// SPDX-License-Identifier: MIT OR Apache-2.0
//! Node and link selection.

use crate::link::LinkId;
use crate::node::NodeId;
use indexmap::IndexSet;

/// Selected nodes and links, in selection order
#[derive(Debug, Clone, Default)]
pub struct Selection {
    nodes: IndexSet<NodeId>,
    links: IndexSet<LinkId>,
}

impl Selection {
    /// Create an empty selection
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a node (optionally add to selection)
    pub fn select_node(&mut self, node_id: NodeId, add_to_selection: bool) {
        if !add_to_selection {
            self.clear();
        }
        self.nodes.insert(node_id);
    }

    /// Select a link (optionally add to selection)
    pub fn select_link(&mut self, link_id: LinkId, add_to_selection: bool) {
        if !add_to_selection {
            self.clear();
        }
        self.links.insert(link_id);
    }

    /// Forget a node
    pub fn remove_node(&mut self, node_id: NodeId) {
        self.nodes.shift_remove(&node_id);
    }

    /// Forget a link
    pub fn remove_link(&mut self, link_id: LinkId) {
        self.links.shift_remove(&link_id);
    }

    /// Check if a node is selected
    pub fn contains_node(&self, node_id: NodeId) -> bool {
        self.nodes.contains(&node_id)
    }

    /// Check if a link is selected
    pub fn contains_link(&self, link_id: LinkId) -> bool {
        self.links.contains(&link_id)
    }

    /// Selected nodes
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().copied()
    }

    /// Selected links
    pub fn links(&self) -> impl Iterator<Item = LinkId> + '_ {
        self.links.iter().copied()
    }

    /// Clear selection
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.links.clear();
    }

    /// Check if nothing is selected
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.links.is_empty()
    }
}
