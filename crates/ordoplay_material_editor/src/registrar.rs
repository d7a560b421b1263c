// SPDX-License-Identifier: MIT OR Apache-2.0
//! Output root registration.
//!
//! Both operations are idempotent: registering a registered block or
//! unregistering an absent one does nothing.

use crate::semantic::SemanticGraph;
use ordoplay_material_graph::BlockId;

/// Register a block as an output root; returns whether anything changed
pub fn register_output<G: SemanticGraph>(graph: &mut G, block: BlockId) -> bool {
    if graph.output_roots().contains(&block) {
        return false;
    }
    tracing::debug!("Registering output block {:?}", block);
    graph.add_output_root(block)
}

/// Unregister an output root; returns whether anything changed
pub fn unregister_output<G: SemanticGraph>(graph: &mut G, block: BlockId) -> bool {
    if !graph.output_roots().contains(&block) {
        return false;
    }
    tracing::debug!("Unregistering output block {:?}", block);
    graph.remove_output_root(block)
}
