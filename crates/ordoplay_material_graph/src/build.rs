// SPDX-License-Identifier: MIT OR Apache-2.0
//! Build validation of the blocks reachable from the output roots.

use crate::block::BlockId;
use crate::graph::MaterialGraph;
use std::collections::HashSet;

/// Result of a successful build
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildSummary {
    /// Reachable blocks, dependencies before their consumers
    pub order: Vec<BlockId>,
    /// Number of output roots built
    pub roots: usize,
    /// Inputs fed by a held literal instead of an edge
    pub literal_inputs: usize,
}

impl MaterialGraph {
    /// Validate everything reachable from the output roots.
    pub fn build(&self) -> Result<BuildSummary, BuildError> {
        if self.output_roots().is_empty() {
            return Err(BuildError::NoOutputs);
        }

        let mut visited = HashSet::new();
        let mut temp_mark = HashSet::new();
        let mut order = Vec::new();

        for root in self.output_roots() {
            self.visit(*root, &mut visited, &mut temp_mark, &mut order)?;
        }

        let mut literal_inputs = 0;
        for block_id in &order {
            let Some(block) = self.block(*block_id) else {
                continue;
            };
            for input in &block.inputs {
                let Some(point) = self.point(*input) else {
                    continue;
                };
                if point.source().is_some() {
                    continue;
                }
                match &point.value {
                    Some(value) => {
                        if !value.value_type().can_connect_to(&point.value_type) {
                            return Err(BuildError::TypeMismatch {
                                block: block.name.clone(),
                                input: point.name.clone(),
                                expected: point.value_type.name(),
                                found: value.value_type().name(),
                            });
                        }
                        literal_inputs += 1;
                    }
                    None if point.optional || point.default_value.is_some() => {}
                    None => {
                        return Err(BuildError::MissingInput {
                            block: block.name.clone(),
                            input: point.name.clone(),
                        });
                    }
                }
            }
        }

        tracing::debug!(
            "Built material {}: {} blocks from {} roots",
            self.name,
            order.len(),
            self.output_roots().len()
        );

        Ok(BuildSummary {
            order,
            roots: self.output_roots().len(),
            literal_inputs,
        })
    }

    fn visit(
        &self,
        block_id: BlockId,
        visited: &mut HashSet<BlockId>,
        temp_mark: &mut HashSet<BlockId>,
        order: &mut Vec<BlockId>,
    ) -> Result<(), BuildError> {
        if temp_mark.contains(&block_id) {
            return Err(BuildError::Cycle);
        }
        if visited.contains(&block_id) {
            return Ok(());
        }
        if self.block(block_id).is_none() {
            return Err(BuildError::MissingBlock(block_id));
        }

        temp_mark.insert(block_id);
        for dependency in self.input_dependencies(block_id) {
            self.visit(dependency.source_block, visited, temp_mark, order)?;
        }
        temp_mark.remove(&block_id);

        visited.insert(block_id);
        order.push(block_id);
        Ok(())
    }
}

/// Error raised by [`MaterialGraph::build`]
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BuildError {
    /// No output root is registered
    #[error("Material has no output blocks")]
    NoOutputs,

    /// An output root no longer exists
    #[error("Output block not found: {0:?}")]
    MissingBlock(BlockId),

    /// Dependencies form a cycle
    #[error("Material graph contains a cycle")]
    Cycle,

    /// A required input has neither an edge nor a value
    #[error("{block}: input {input} is not connected")]
    MissingInput {
        /// Block name
        block: String,
        /// Input name
        input: String,
    },

    /// A held value cannot feed its input
    #[error("{block}: input {input} expects {expected}, got {found}")]
    TypeMismatch {
        /// Block name
        block: String,
        /// Input name
        input: String,
        /// Declared type
        expected: &'static str,
        /// Held value type
        found: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::LiteralValue;

    #[test]
    fn test_build_without_outputs_fails() {
        let graph = MaterialGraph::default();
        assert_eq!(graph.build(), Err(BuildError::NoOutputs));
    }

    #[test]
    fn test_build_orders_dependencies_first() {
        let mut graph = MaterialGraph::default();
        let uv = graph.add_block("mesh_uv").unwrap();
        let texture = graph.add_block("texture").unwrap();
        let fragment = graph.add_block("fragment_output").unwrap();
        graph.add_output_root(fragment);

        let uv_out = graph.output_named(uv, "output").unwrap();
        let tex_uv = graph.input_named(texture, "uv").unwrap();
        let tex_rgba = graph.output_named(texture, "rgba").unwrap();
        let frag_rgba = graph.input_named(fragment, "rgba").unwrap();
        graph.connect(uv_out, tex_uv).unwrap();
        graph.connect(tex_rgba, frag_rgba).unwrap();

        let summary = graph.build().unwrap();
        assert_eq!(summary.order, vec![uv, texture, fragment]);
        assert_eq!(summary.roots, 1);
        assert_eq!(summary.literal_inputs, 0);
    }

    #[test]
    fn test_build_reports_missing_input() {
        let mut graph = MaterialGraph::default();
        let vertex = graph.add_block("vertex_output").unwrap();
        graph.add_output_root(vertex);

        let err = graph.build().unwrap_err();
        assert_eq!(
            err,
            BuildError::MissingInput {
                block: "Vertex Output".to_string(),
                input: "vector".to_string(),
            }
        );

        let vector = graph.input_named(vertex, "vector").unwrap();
        graph
            .set_value(vector, Some(LiteralValue::Vector3([0.0; 3])))
            .unwrap();
        let summary = graph.build().unwrap();
        assert_eq!(summary.literal_inputs, 1);
    }

    #[test]
    fn test_build_reports_type_mismatch() {
        let mut graph = MaterialGraph::default();
        let vertex = graph.add_block("vertex_output").unwrap();
        graph.add_output_root(vertex);
        let vector = graph.input_named(vertex, "vector").unwrap();
        graph
            .set_value(vector, Some(LiteralValue::Matrix([0.0; 16])))
            .unwrap();

        assert!(matches!(
            graph.build(),
            Err(BuildError::TypeMismatch { expected: "Vector4", found: "Matrix", .. })
        ));
    }

    #[test]
    fn test_build_detects_cycles() {
        let mut graph = MaterialGraph::default();
        let add = graph.add_block("add").unwrap();
        let multiply = graph.add_block("multiply").unwrap();
        let vertex = graph.add_block("vertex_output").unwrap();
        graph.add_output_root(vertex);

        let add_out = graph.output_named(add, "output").unwrap();
        let mul_out = graph.output_named(multiply, "output").unwrap();
        graph
            .connect(add_out, graph.input_named(multiply, "left").unwrap())
            .unwrap();
        graph
            .connect(mul_out, graph.input_named(add, "left").unwrap())
            .unwrap();
        graph
            .connect(add_out, graph.input_named(vertex, "vector").unwrap())
            .unwrap();

        assert_eq!(graph.build(), Err(BuildError::Cycle));
    }
}
