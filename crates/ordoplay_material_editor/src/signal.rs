// SPDX-License-Identifier: MIT OR Apache-2.0
//! Notifications sent to collaborators that track the editor.

use crate::link::LinkId;
use crate::node::NodeId;
use std::sync::mpsc;

/// Something observers of the editor may care about
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorSignal {
    /// Selection was cleared; property panels should reset
    SelectionCleared,
    /// A node is being deleted; its links follow
    NodeDeleted(NodeId),
    /// A link was removed
    LinkRemoved(LinkId),
    /// A pending change-set reached the visual model
    Committed {
        /// Nodes added
        nodes: usize,
        /// Links added
        links: usize,
    },
    /// A pending change-set was dropped by a newer construction pass
    PendingDiscarded {
        /// Nodes dropped
        nodes: usize,
        /// Links dropped
        links: usize,
    },
}

/// Fan-out of signals over `mpsc` channels
#[derive(Debug, Default)]
pub(crate) struct SignalHub {
    subscribers: Vec<mpsc::Sender<EditorSignal>>,
}

impl SignalHub {
    /// Add a subscriber
    pub(crate) fn subscribe(&mut self) -> mpsc::Receiver<EditorSignal> {
        let (sender, receiver) = mpsc::channel();
        self.subscribers.push(sender);
        receiver
    }

    /// Send to every live subscriber, forgetting the ones that hung up
    pub(crate) fn emit(&mut self, signal: EditorSignal) {
        self.subscribers
            .retain(|subscriber| subscriber.send(signal.clone()).is_ok());
    }
}
