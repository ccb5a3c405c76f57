//! The fixed set of demo assets.

use crate::geometry::Mesh;
use crate::shapes;

/// A buildable asset shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Hexagon { radius: f64, height: f64 },
    Tree,
    Rock,
}

impl Shape {
    pub fn build(&self) -> Mesh {
        match *self {
            Shape::Hexagon { radius, height } => shapes::hexagon_prism(radius, height),
            Shape::Tree => shapes::tree(),
            Shape::Rock => shapes::rock(),
        }
    }
}

/// One output file and the shape written to it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelSpec {
    pub file_name: &'static str,
    pub shape: Shape,
}

const fn hex(file_name: &'static str, height: f64) -> ModelSpec {
    ModelSpec {
        file_name,
        shape: Shape::Hexagon {
            radius: shapes::HEX_RADIUS,
            height,
        },
    }
}

/// Every asset the demo loads, in generation order.
pub const MODELS: [ModelSpec; 7] = [
    hex("grass_hex.stl", 0.05),
    hex("water_hex.stl", 0.02),
    hex("sand_hex.stl", 0.03),
    hex("shore_hex.stl", 0.04),
    hex("road_hex.stl", 0.05),
    ModelSpec {
        file_name: "simple_tree.stl",
        shape: Shape::Tree,
    },
    ModelSpec {
        file_name: "small_rock.stl",
        shape: Shape::Rock,
    },
];
