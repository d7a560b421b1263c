// SPDX-License-Identifier: MIT OR Apache-2.0
//! Deciding which end of a link is the input and which is the output.

use crate::port::{PortBinding, PortDirection, PortRef, VisualPort};

/// Result of resolving a pair of link endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// One input and one output
    Resolved {
        /// The input endpoint
        input: PortRef,
        /// The output endpoint
        output: PortRef,
    },
    /// Same direction, same node, or a malformed port
    Invalid,
}

/// Resolve two endpoints given in any order.
///
/// `resolve(a, b) == resolve(b, a)` for every pair. An `Invalid` result is
/// routine while the user drags links around and is not an error.
pub fn resolve(a: &VisualPort, b: &VisualPort) -> Orientation {
    if a.node == b.node || is_malformed(a) || is_malformed(b) {
        return Orientation::Invalid;
    }

    match (a.direction, b.direction) {
        (PortDirection::Input, PortDirection::Output) => Orientation::Resolved {
            input: a.port_ref(),
            output: b.port_ref(),
        },
        (PortDirection::Output, PortDirection::Input) => Orientation::Resolved {
            input: b.port_ref(),
            output: a.port_ref(),
        },
        _ => Orientation::Invalid,
    }
}

// Only literal outputs adopt points.
fn is_malformed(port: &VisualPort) -> bool {
    port.direction == PortDirection::Input
        && matches!(port.binding, PortBinding::Adopted(_) | PortBinding::Unbound)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeId;
    use crate::port::PortId;
    use ordoplay_material_graph::PointId;

    fn port(node: NodeId, direction: PortDirection, binding: PortBinding) -> VisualPort {
        VisualPort {
            id: PortId::new(),
            node,
            name: "port".to_string(),
            direction,
            binding,
            value_type: None,
            literal: None,
        }
    }

    fn all_ports() -> Vec<VisualPort> {
        let mut ports = Vec::new();
        for direction in [PortDirection::Input, PortDirection::Output] {
            for binding in [
                PortBinding::Unbound,
                PortBinding::Point(PointId::new()),
                PortBinding::Adopted(PointId::new()),
            ] {
                ports.push(port(NodeId::new(), direction, binding));
            }
        }
        ports
    }

    #[test]
    fn test_resolve_is_commutative() {
        let ports = all_ports();
        for a in &ports {
            for b in &ports {
                assert_eq!(resolve(a, b), resolve(b, a));
            }
        }
    }

    #[test]
    fn test_resolve_labels_input_and_output() {
        let input = port(NodeId::new(), PortDirection::Input, PortBinding::Point(PointId::new()));
        let output = port(NodeId::new(), PortDirection::Output, PortBinding::Unbound);

        let expected = Orientation::Resolved {
            input: input.port_ref(),
            output: output.port_ref(),
        };
        assert_eq!(resolve(&input, &output), expected);
        assert_eq!(resolve(&output, &input), expected);
    }

    #[test]
    fn test_same_direction_is_invalid() {
        let bound = PortBinding::Point(PointId::new());
        let a = port(NodeId::new(), PortDirection::Output, bound);
        let b = port(NodeId::new(), PortDirection::Output, PortBinding::Unbound);
        assert_eq!(resolve(&a, &b), Orientation::Invalid);

        let c = port(NodeId::new(), PortDirection::Input, bound);
        let d = port(NodeId::new(), PortDirection::Input, bound);
        assert_eq!(resolve(&c, &d), Orientation::Invalid);
    }

    #[test]
    fn test_same_node_is_invalid() {
        let node = NodeId::new();
        let input = port(node, PortDirection::Input, PortBinding::Point(PointId::new()));
        let output = port(node, PortDirection::Output, PortBinding::Point(PointId::new()));
        assert_eq!(resolve(&input, &output), Orientation::Invalid);
    }

    #[test]
    fn test_unbound_input_is_invalid() {
        let input = port(NodeId::new(), PortDirection::Input, PortBinding::Unbound);
        let output = port(NodeId::new(), PortDirection::Output, PortBinding::Point(PointId::new()));
        assert_eq!(resolve(&input, &output), Orientation::Invalid);
    }
}
