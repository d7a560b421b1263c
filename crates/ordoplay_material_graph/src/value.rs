// SPDX-License-Identifier: MIT OR Apache-2.0
//! Value types carried by connection points and the literals they hold.

use serde::{Deserialize, Serialize};

/// Data type that can flow through a connection point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueType {
    /// Scalar float
    Float,
    /// 2D vector
    Vector2,
    /// 3D vector
    Vector3,
    /// 4D vector
    Vector4,
    /// 4x4 matrix
    Matrix,
    /// RGB color
    Color3,
    /// RGBA color
    Color4,
    /// Texture sampler
    Texture,
}

impl ValueType {
    /// Look up a value type by the name used in the literal palette.
    ///
    /// Only types that can be expressed as a literal are accepted, so
    /// `Texture` has no name here.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Float" => Some(Self::Float),
            "Vector2" => Some(Self::Vector2),
            "Vector3" => Some(Self::Vector3),
            "Vector4" => Some(Self::Vector4),
            "Matrix" => Some(Self::Matrix),
            "Color3" => Some(Self::Color3),
            "Color4" => Some(Self::Color4),
            _ => None,
        }
    }

    /// Display name of the type
    pub fn name(&self) -> &'static str {
        match self {
            Self::Float => "Float",
            Self::Vector2 => "Vector2",
            Self::Vector3 => "Vector3",
            Self::Vector4 => "Vector4",
            Self::Matrix => "Matrix",
            Self::Color3 => "Color3",
            Self::Color4 => "Color4",
            Self::Texture => "Texture",
        }
    }

    /// Zero, identity or white literal for this type
    pub fn default_value(&self) -> Option<LiteralValue> {
        match self {
            Self::Float => Some(LiteralValue::Float(0.0)),
            Self::Vector2 => Some(LiteralValue::Vector2([0.0; 2])),
            Self::Vector3 => Some(LiteralValue::Vector3([0.0; 3])),
            Self::Vector4 => Some(LiteralValue::Vector4([0.0; 4])),
            Self::Matrix => Some(LiteralValue::Matrix(IDENTITY_MATRIX)),
            Self::Color3 => Some(LiteralValue::Color3([1.0; 3])),
            Self::Color4 => Some(LiteralValue::Color4([1.0; 4])),
            Self::Texture => None,
        }
    }

    /// Check if a value of this type can feed a point of another type
    pub fn can_connect_to(&self, other: &ValueType) -> bool {
        if self == other {
            return true;
        }

        match (self, other) {
            (Self::Float, Self::Vector2 | Self::Vector3 | Self::Vector4) => true,
            (Self::Float, Self::Color3 | Self::Color4) => true,
            (Self::Vector2, Self::Vector3 | Self::Vector4) => true,
            (Self::Vector3, Self::Vector4) => true,
            (Self::Color3, Self::Vector3) | (Self::Vector3, Self::Color3) => true,
            (Self::Color4, Self::Vector4) | (Self::Vector4, Self::Color4) => true,
            (Self::Color3, Self::Color4) => true,
            _ => false,
        }
    }
}

/// Column-major 4x4 identity
pub const IDENTITY_MATRIX: [f32; 16] = [
    1.0, 0.0, 0.0, 0.0, //
    0.0, 1.0, 0.0, 0.0, //
    0.0, 0.0, 1.0, 0.0, //
    0.0, 0.0, 0.0, 1.0,
];

/// Literal value held by an unconnected point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LiteralValue {
    /// Scalar float
    Float(f32),
    /// 2D vector
    Vector2([f32; 2]),
    /// 3D vector
    Vector3([f32; 3]),
    /// 4D vector
    Vector4([f32; 4]),
    /// Column-major 4x4 matrix
    Matrix([f32; 16]),
    /// RGB color
    Color3([f32; 3]),
    /// RGBA color
    Color4([f32; 4]),
}

impl LiteralValue {
    /// Get the value type for this literal
    pub fn value_type(&self) -> ValueType {
        match self {
            Self::Float(_) => ValueType::Float,
            Self::Vector2(_) => ValueType::Vector2,
            Self::Vector3(_) => ValueType::Vector3,
            Self::Vector4(_) => ValueType::Vector4,
            Self::Matrix(_) => ValueType::Matrix,
            Self::Color3(_) => ValueType::Color3,
            Self::Color4(_) => ValueType::Color4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_defaults() {
        assert_eq!(
            ValueType::from_name("Vector3").and_then(|t| t.default_value()),
            Some(LiteralValue::Vector3([0.0, 0.0, 0.0]))
        );
        assert_eq!(
            ValueType::Color4.default_value(),
            Some(LiteralValue::Color4([1.0, 1.0, 1.0, 1.0]))
        );
        let Some(LiteralValue::Matrix(m)) = ValueType::Matrix.default_value() else {
            panic!("matrix default should be a matrix");
        };
        assert_eq!(m[0], 1.0);
        assert_eq!(m[5], 1.0);
        assert_eq!(m[1], 0.0);
        assert_eq!(m[15], 1.0);
    }

    #[test]
    fn test_unknown_names() {
        assert_eq!(ValueType::from_name("Texture"), None);
        assert_eq!(ValueType::from_name("vector3"), None);
    }

    #[test]
    fn test_implicit_conversions() {
        assert!(ValueType::Float.can_connect_to(&ValueType::Vector4));
        assert!(ValueType::Color3.can_connect_to(&ValueType::Vector3));
        assert!(!ValueType::Vector4.can_connect_to(&ValueType::Vector2));
        assert!(!ValueType::Texture.can_connect_to(&ValueType::Color4));
    }
}
