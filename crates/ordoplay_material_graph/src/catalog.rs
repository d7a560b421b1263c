// SPDX-License-Identifier: MIT OR Apache-2.0
//! Catalog of block kinds that can be instantiated in a material graph.

use crate::block::BlockClass;
use crate::value::{LiteralValue, ValueType, IDENTITY_MATRIX};
use indexmap::IndexMap;

/// Declaration of a point on a block kind
#[derive(Debug, Clone)]
pub struct PointSpec {
    /// Point name
    pub name: String,
    /// Data type
    pub value_type: ValueType,
    /// Whether an input may stay empty
    pub optional: bool,
    /// Default literal
    pub default_value: Option<LiteralValue>,
}

impl PointSpec {
    /// A required point
    pub fn new(name: impl Into<String>, value_type: ValueType) -> Self {
        Self {
            name: name.into(),
            value_type,
            optional: false,
            default_value: None,
        }
    }

    /// Mark as optional
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Set the default literal
    pub fn with_default(mut self, value: LiteralValue) -> Self {
        self.default_value = Some(value);
        self
    }
}

/// Block kind definition
#[derive(Debug, Clone)]
pub struct BlockKind {
    /// Unique kind identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Classification tag
    pub class: BlockClass,
    /// Whether instances are output roots
    pub is_final_merger: bool,
    /// Input points
    pub inputs: Vec<PointSpec>,
    /// Output points
    pub outputs: Vec<PointSpec>,
}

/// Registry of available block kinds
#[derive(Debug, Clone)]
pub struct BlockCatalog {
    kinds: IndexMap<String, BlockKind>,
}

impl BlockCatalog {
    /// Create a new empty catalog
    pub fn new() -> Self {
        Self {
            kinds: IndexMap::new(),
        }
    }

    /// Register a block kind
    pub fn register(&mut self, kind: BlockKind) {
        self.kinds.insert(kind.id.clone(), kind);
    }

    /// Get a block kind by ID
    pub fn get(&self, id: &str) -> Option<&BlockKind> {
        self.kinds.get(id)
    }

    /// Get all registered kinds
    pub fn kinds(&self) -> impl Iterator<Item = &BlockKind> {
        self.kinds.values()
    }

    /// Catalog with the standard material blocks
    pub fn material() -> Self {
        let mut catalog = Self::new();

        // Output roots
        catalog.register(BlockKind {
            id: "vertex_output".to_string(),
            name: "Vertex Output".to_string(),
            class: BlockClass::Other,
            is_final_merger: true,
            inputs: vec![PointSpec::new("vector", ValueType::Vector4)],
            outputs: vec![],
        });

        catalog.register(BlockKind {
            id: "fragment_output".to_string(),
            name: "Fragment Output".to_string(),
            class: BlockClass::Other,
            is_final_merger: true,
            inputs: vec![
                PointSpec::new("rgba", ValueType::Color4).optional(),
                PointSpec::new("rgb", ValueType::Color3).optional(),
                PointSpec::new("a", ValueType::Float).optional(),
            ],
            outputs: vec![],
        });

        // Mesh attributes
        catalog.register(BlockKind {
            id: "mesh_position".to_string(),
            name: "Position".to_string(),
            class: BlockClass::Other,
            is_final_merger: false,
            inputs: vec![],
            outputs: vec![PointSpec::new("output", ValueType::Vector3)],
        });

        catalog.register(BlockKind {
            id: "mesh_uv".to_string(),
            name: "UV".to_string(),
            class: BlockClass::Other,
            is_final_merger: false,
            inputs: vec![],
            outputs: vec![PointSpec::new("output", ValueType::Vector2)],
        });

        // Texture and lighting
        catalog.register(BlockKind {
            id: "texture".to_string(),
            name: "Texture".to_string(),
            class: BlockClass::Texture,
            is_final_merger: false,
            inputs: vec![PointSpec::new("uv", ValueType::Vector2)],
            outputs: vec![
                PointSpec::new("rgba", ValueType::Color4),
                PointSpec::new("rgb", ValueType::Color3),
                PointSpec::new("r", ValueType::Float),
                PointSpec::new("g", ValueType::Float),
                PointSpec::new("b", ValueType::Float),
                PointSpec::new("a", ValueType::Float),
            ],
        });

        catalog.register(BlockKind {
            id: "light_information".to_string(),
            name: "Light Information".to_string(),
            class: BlockClass::Light,
            is_final_merger: false,
            inputs: vec![PointSpec::new("worldPosition", ValueType::Vector4)],
            outputs: vec![
                PointSpec::new("direction", ValueType::Vector3),
                PointSpec::new("color", ValueType::Color3),
                PointSpec::new("intensity", ValueType::Float),
            ],
        });

        // Math
        catalog.register(BlockKind {
            id: "transform".to_string(),
            name: "Transform".to_string(),
            class: BlockClass::Other,
            is_final_merger: false,
            inputs: vec![
                PointSpec::new("vector", ValueType::Vector4),
                PointSpec::new("transform", ValueType::Matrix)
                    .with_default(LiteralValue::Matrix(IDENTITY_MATRIX)),
            ],
            outputs: vec![PointSpec::new("output", ValueType::Vector4)],
        });

        catalog.register(BlockKind {
            id: "vector_merger".to_string(),
            name: "Vector Merger".to_string(),
            class: BlockClass::Other,
            is_final_merger: false,
            inputs: ["x", "y", "z", "w"]
                .into_iter()
                .map(|name| {
                    PointSpec::new(name, ValueType::Float)
                        .optional()
                        .with_default(LiteralValue::Float(0.0))
                })
                .collect(),
            outputs: vec![
                PointSpec::new("xyzw", ValueType::Vector4),
                PointSpec::new("xyz", ValueType::Vector3),
                PointSpec::new("xy", ValueType::Vector2),
            ],
        });

        catalog.register(BlockKind {
            id: "normalize".to_string(),
            name: "Normalize".to_string(),
            class: BlockClass::Other,
            is_final_merger: false,
            inputs: vec![PointSpec::new("input", ValueType::Vector3)],
            outputs: vec![PointSpec::new("output", ValueType::Vector3)],
        });

        for (id, name) in [("multiply", "Multiply"), ("add", "Add")] {
            catalog.register(BlockKind {
                id: id.to_string(),
                name: name.to_string(),
                class: BlockClass::Other,
                is_final_merger: false,
                inputs: vec![
                    PointSpec::new("left", ValueType::Vector4),
                    PointSpec::new("right", ValueType::Vector4),
                ],
                outputs: vec![PointSpec::new("output", ValueType::Vector4)],
            });
        }

        catalog.register(BlockKind {
            id: "lerp".to_string(),
            name: "Lerp".to_string(),
            class: BlockClass::Other,
            is_final_merger: false,
            inputs: vec![
                PointSpec::new("left", ValueType::Color4),
                PointSpec::new("right", ValueType::Color4),
                PointSpec::new("gradient", ValueType::Float).with_default(LiteralValue::Float(0.5)),
            ],
            outputs: vec![PointSpec::new("output", ValueType::Color4)],
        });

        catalog
    }
}

impl Default for BlockCatalog {
    fn default() -> Self {
        Self::material()
    }
}
