// SPDX-License-Identifier: MIT OR Apache-2.0
//! The visual model: positioned nodes and the links between their ports.

use crate::link::{Link, LinkId};
use crate::node::{NodeId, VisualNode};
use crate::port::{PortRef, VisualPort};
use indexmap::IndexMap;
use ordoplay_material_graph::BlockId;

/// Nodes and links shown by the graph view
#[derive(Debug, Clone, Default)]
pub struct VisualModel {
    nodes: IndexMap<NodeId, VisualNode>,
    links: IndexMap<LinkId, Link>,
}

impl VisualModel {
    /// Create an empty model
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node
    pub fn add_node(&mut self, node: VisualNode) -> NodeId {
        let id = node.id;
        self.nodes.insert(id, node);
        id
    }

    /// Remove a node; links touching it are left to the caller
    pub fn remove_node(&mut self, node_id: NodeId) -> Option<VisualNode> {
        self.nodes.shift_remove(&node_id)
    }

    /// Get a node by ID
    pub fn node(&self, node_id: NodeId) -> Option<&VisualNode> {
        self.nodes.get(&node_id)
    }

    /// Get a mutable node by ID
    pub fn node_mut(&mut self, node_id: NodeId) -> Option<&mut VisualNode> {
        self.nodes.get_mut(&node_id)
    }

    /// Get all nodes, in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &VisualNode> {
        self.nodes.values()
    }

    /// Get the number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Node presenting a block
    pub fn node_for_block(&self, block: BlockId) -> Option<&VisualNode> {
        self.nodes.values().find(|n| n.block == Some(block))
    }

    /// Resolve a port address
    pub fn port(&self, port: PortRef) -> Option<&VisualPort> {
        self.nodes.get(&port.node)?.port(port.port)
    }

    /// Resolve a port address mutably
    pub fn port_mut(&mut self, port: PortRef) -> Option<&mut VisualPort> {
        self.nodes.get_mut(&port.node)?.port_mut(port.port)
    }

    /// Add a link
    pub fn add_link(&mut self, link: Link) -> LinkId {
        let id = link.id;
        self.links.insert(id, link);
        id
    }

    /// Remove a link
    pub fn remove_link(&mut self, link_id: LinkId) -> Option<Link> {
        self.links.shift_remove(&link_id)
    }

    /// Get a link by ID
    pub fn link(&self, link_id: LinkId) -> Option<&Link> {
        self.links.get(&link_id)
    }

    /// Get a mutable link by ID
    pub fn link_mut(&mut self, link_id: LinkId) -> Option<&mut Link> {
        self.links.get_mut(&link_id)
    }

    /// Get all links, in insertion order
    pub fn links(&self) -> impl Iterator<Item = &Link> {
        self.links.values()
    }

    /// Get the number of links
    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    /// Links touching a node
    pub fn links_for_node(&self, node_id: NodeId) -> Vec<LinkId> {
        self.links
            .values()
            .filter(|l| l.involves_node(node_id))
            .map(|l| l.id)
            .collect()
    }

    /// Remove every node and link
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.links.clear();
    }

    /// Move a committed change-set into the model
    pub fn apply(&mut self, changes: PendingChanges) {
        for node in changes.nodes {
            self.add_node(node);
        }
        for link in changes.links {
            self.add_link(link);
        }
    }
}

/// Nodes and links built by a construction pass, not yet shown
#[derive(Debug, Clone, Default)]
pub struct PendingChanges {
    /// Nodes, in creation order
    pub nodes: Vec<VisualNode>,
    /// Links, in creation order
    pub links: Vec<Link>,
}

impl PendingChanges {
    /// Check if nothing is pending
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.links.is_empty()
    }

    /// Get a pending node by ID
    pub fn node(&self, node_id: NodeId) -> Option<&VisualNode> {
        self.nodes.iter().find(|n| n.id == node_id)
    }

    /// Get a mutable pending node by ID
    pub fn node_mut(&mut self, node_id: NodeId) -> Option<&mut VisualNode> {
        self.nodes.iter_mut().find(|n| n.id == node_id)
    }
}
