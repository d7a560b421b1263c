// SPDX-License-Identifier: MIT OR Apache-2.0
//! Material graph: an arena of blocks and their connection points.

use crate::block::{Block, BlockId};
use crate::catalog::BlockCatalog;
use crate::point::{ConnectionPoint, PointDirection, PointId};
use crate::value::LiteralValue;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// An edge feeding one of a block's inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dependency {
    /// The consuming input point
    pub input: PointId,
    /// The output point feeding it
    pub source: PointId,
    /// Block owning the source point
    pub source_block: BlockId,
}

/// A material graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialGraph {
    /// Material name
    pub name: String,
    /// Blocks in the graph
    blocks: IndexMap<BlockId, Block>,
    /// Points of every block
    points: IndexMap<PointId, ConnectionPoint>,
    /// Registered output roots, in registration order
    output_roots: Vec<BlockId>,
    /// Kinds available to `add_block`
    #[serde(skip)]
    catalog: BlockCatalog,
}

impl MaterialGraph {
    /// Create a new empty graph using the standard material catalog
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_catalog(name, BlockCatalog::material())
    }

    /// Create a new empty graph using a custom catalog
    pub fn with_catalog(name: impl Into<String>, catalog: BlockCatalog) -> Self {
        Self {
            name: name.into(),
            blocks: IndexMap::new(),
            points: IndexMap::new(),
            output_roots: Vec::new(),
            catalog,
        }
    }

    /// Catalog used to instantiate blocks
    pub fn catalog(&self) -> &BlockCatalog {
        &self.catalog
    }

    /// Instantiate a block of the given kind.
    ///
    /// Final-merger blocks are not registered as output roots here; that is
    /// up to whoever presents the block.
    pub fn add_block(&mut self, kind_id: &str) -> Result<BlockId, GraphError> {
        let kind = self
            .catalog
            .get(kind_id)
            .ok_or_else(|| GraphError::UnknownKind(kind_id.to_string()))?
            .clone();

        let id = BlockId::new();
        let mut block = Block {
            id,
            kind: kind.id.clone(),
            name: kind.name.clone(),
            class: kind.class,
            is_final_merger: kind.is_final_merger,
            inputs: Vec::with_capacity(kind.inputs.len()),
            outputs: Vec::with_capacity(kind.outputs.len()),
        };

        for (specs, direction) in [
            (&kind.inputs, PointDirection::Input),
            (&kind.outputs, PointDirection::Output),
        ] {
            for spec in specs {
                let point = ConnectionPoint {
                    id: PointId::new(),
                    owner: id,
                    name: spec.name.clone(),
                    direction,
                    value_type: spec.value_type,
                    optional: spec.optional,
                    default_value: spec.default_value.clone(),
                    value: None,
                    source: None,
                    targets: Vec::new(),
                };
                match direction {
                    PointDirection::Input => block.inputs.push(point.id),
                    PointDirection::Output => block.outputs.push(point.id),
                }
                self.points.insert(point.id, point);
            }
        }

        tracing::debug!("Added block {} ({:?})", block.name, id);
        self.blocks.insert(id, block);
        Ok(id)
    }

    /// Remove a block, its edges, and its output-root registration
    pub fn remove_block(&mut self, block_id: BlockId) -> Option<Block> {
        let block = self.blocks.swap_remove(&block_id)?;

        for point_id in block.points() {
            let Some(point) = self.points.swap_remove(point_id) else {
                continue;
            };
            if let Some(source) = point.source {
                if let Some(src) = self.points.get_mut(&source) {
                    src.targets.retain(|t| t != point_id);
                }
            }
            for target in &point.targets {
                if let Some(dst) = self.points.get_mut(target) {
                    dst.source = None;
                }
            }
        }

        self.output_roots.retain(|r| *r != block_id);
        Some(block)
    }

    /// Get a block by ID
    pub fn block(&self, block_id: BlockId) -> Option<&Block> {
        self.blocks.get(&block_id)
    }

    /// Get all blocks
    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.blocks.values()
    }

    /// Get the number of blocks
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Get a point by ID
    pub fn point(&self, point_id: PointId) -> Option<&ConnectionPoint> {
        self.points.get(&point_id)
    }

    /// Find an input point of a block by name
    pub fn input_named(&self, block_id: BlockId, name: &str) -> Option<PointId> {
        let block = self.blocks.get(&block_id)?;
        block
            .inputs
            .iter()
            .copied()
            .find(|id| self.points.get(id).is_some_and(|p| p.name == name))
    }

    /// Find an output point of a block by name
    pub fn output_named(&self, block_id: BlockId, name: &str) -> Option<PointId> {
        let block = self.blocks.get(&block_id)?;
        block
            .outputs
            .iter()
            .copied()
            .find(|id| self.points.get(id).is_some_and(|p| p.name == name))
    }

    /// Connect an output point to an input point.
    ///
    /// An input already fed by another output is detached from it first.
    pub fn connect(&mut self, output: PointId, input: PointId) -> Result<(), GraphError> {
        let out = self.points.get(&output).ok_or(GraphError::PointNotFound(output))?;
        let inp = self.points.get(&input).ok_or(GraphError::PointNotFound(input))?;

        if out.direction != PointDirection::Output || inp.direction != PointDirection::Input {
            return Err(GraphError::WrongDirection);
        }
        if out.owner == inp.owner {
            return Err(GraphError::SelfLoop);
        }
        if !out.value_type.can_connect_to(&inp.value_type) {
            return Err(GraphError::IncompatibleTypes {
                from: out.value_type.name(),
                to: inp.value_type.name(),
            });
        }

        let previous = inp.source;
        if previous == Some(output) {
            return Ok(());
        }
        if let Some(previous) = previous {
            if let Some(prev) = self.points.get_mut(&previous) {
                prev.targets.retain(|t| *t != input);
            }
        }

        if let Some(out) = self.points.get_mut(&output) {
            out.targets.push(input);
        }
        if let Some(inp) = self.points.get_mut(&input) {
            inp.source = Some(output);
        }
        Ok(())
    }

    /// Remove the edge between an output point and an input point
    pub fn disconnect(&mut self, output: PointId, input: PointId) -> Result<(), GraphError> {
        let inp = self.points.get(&input).ok_or(GraphError::PointNotFound(input))?;
        if !self.points.contains_key(&output) {
            return Err(GraphError::PointNotFound(output));
        }
        if inp.source != Some(output) {
            return Err(GraphError::NotConnected);
        }

        if let Some(out) = self.points.get_mut(&output) {
            out.targets.retain(|t| *t != input);
        }
        if let Some(inp) = self.points.get_mut(&input) {
            inp.source = None;
        }
        Ok(())
    }

    /// Set or clear the literal held by a point
    pub fn set_value(
        &mut self,
        point_id: PointId,
        value: Option<LiteralValue>,
    ) -> Result<(), GraphError> {
        let point = self
            .points
            .get_mut(&point_id)
            .ok_or(GraphError::PointNotFound(point_id))?;
        point.value = value;
        Ok(())
    }

    /// Get the literal held by a point
    pub fn value(&self, point_id: PointId) -> Option<&LiteralValue> {
        self.points.get(&point_id)?.value.as_ref()
    }

    /// Edges feeding a block's inputs, in input declaration order
    pub fn input_dependencies(&self, block_id: BlockId) -> Vec<Dependency> {
        let Some(block) = self.blocks.get(&block_id) else {
            return Vec::new();
        };

        block
            .inputs
            .iter()
            .filter_map(|input| {
                let source = self.points.get(input)?.source?;
                let source_block = self.points.get(&source)?.owner;
                Some(Dependency {
                    input: *input,
                    source,
                    source_block,
                })
            })
            .collect()
    }

    /// Registered output roots
    pub fn output_roots(&self) -> &[BlockId] {
        &self.output_roots
    }

    /// Check if a block is a registered output root
    pub fn is_output_root(&self, block_id: BlockId) -> bool {
        self.output_roots.contains(&block_id)
    }

    /// Register an output root; returns false if it already was one
    pub fn add_output_root(&mut self, block_id: BlockId) -> bool {
        if self.is_output_root(block_id) {
            return false;
        }
        self.output_roots.push(block_id);
        true
    }

    /// Unregister an output root; returns false if it was not one
    pub fn remove_output_root(&mut self, block_id: BlockId) -> bool {
        let before = self.output_roots.len();
        self.output_roots.retain(|r| *r != block_id);
        self.output_roots.len() != before
    }

    /// Serialize to a RON string
    pub fn to_ron(&self) -> Result<String, GraphError> {
        Ok(ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?)
    }

    /// Deserialize from a RON string
    pub fn from_ron(s: &str) -> Result<Self, GraphError> {
        Ok(ron::from_str(s)?)
    }
}

impl Default for MaterialGraph {
    fn default() -> Self {
        Self::new("Untitled")
    }
}

/// Error when editing a material graph
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// Block kind not in the catalog
    #[error("Unknown block kind: {0}")]
    UnknownKind(String),

    /// Point not found
    #[error("Point not found: {0:?}")]
    PointNotFound(PointId),

    /// Connection must run from an output to an input
    #[error("Connections must run from an output to an input")]
    WrongDirection,

    /// Both points belong to the same block
    #[error("Self-loop not allowed")]
    SelfLoop,

    /// Incompatible point types
    #[error("Cannot connect {from} to {to}")]
    IncompatibleTypes {
        /// Source type
        from: &'static str,
        /// Target type
        to: &'static str,
    },

    /// The points are not connected to each other
    #[error("Points are not connected")]
    NotConnected,

    /// RON serialization failed
    #[error("Serialization error: {0}")]
    Serialize(#[from] ron::Error),

    /// RON parsing failed
    #[error("Parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),
}
