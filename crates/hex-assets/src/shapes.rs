//! Hand-authored asset shapes.
//!
//! Every builder is pure: fixed coordinates in, triangles out. Sizes are
//! not validated; a zero or negative size yields degenerate or inverted
//! geometry.

use std::f64::consts::PI;

use crate::geometry::{Mesh, Point3, Triangle};

/// Default hex tile circumradius.
pub const HEX_RADIUS: f64 = 1.0;
/// Default hex tile thickness.
pub const HEX_HEIGHT: f64 = 0.05;

const TRUNK_WIDTH: f64 = 0.1;
const TRUNK_HEIGHT: f64 = 0.3;
const CANOPY_RADIUS: f64 = 0.3;
const CANOPY_PEAK: f64 = 0.4;
/// sin(60°) as baked into the canopy asset.
const CANOPY_SIN_60: f64 = 0.866;

/// Ring vertex `i` of a pointy-top hexagon at height `z`.
///
/// Vertex 0 sits at 30° and indices step clockwise by 60°, so edge 0
/// (vertex 0 to 1) is parallel to +X. Tile placement in the demo depends
/// on this ordering.
pub fn hex_corner(radius: f64, i: usize, z: f64) -> Point3 {
    let angle = PI / 6.0 - i as f64 * PI / 3.0;
    Point3::new(radius * angle.cos(), radius * angle.sin(), z)
}

/// Hexagonal prism from `z = 0` to `z = height`: two fanned caps plus six
/// side quads, 24 triangles.
pub fn hexagon_prism(radius: f64, height: f64) -> Mesh {
    let bottom: [Point3; 6] = std::array::from_fn(|i| hex_corner(radius, i, 0.0));
    let top: [Point3; 6] = std::array::from_fn(|i| hex_corner(radius, i, height));
    let center_bottom = Point3::ORIGIN;
    let center_top = Point3::new(0.0, 0.0, height);

    let mut tris = Vec::with_capacity(24);

    for i in 0..6 {
        let next = (i + 1) % 6;
        tris.push(Triangle::new(center_bottom, bottom[next], bottom[i]));
    }

    for i in 0..6 {
        let next = (i + 1) % 6;
        tris.push(Triangle::new(center_top, top[i], top[next]));
    }

    for i in 0..6 {
        let next = (i + 1) % 6;
        tris.push(Triangle::new(bottom[i], top[i], bottom[next]));
        tris.push(Triangle::new(bottom[next], top[i], top[next]));
    }

    tris
}

/// Box trunk with a tetrahedral canopy resting on its top, 16 triangles.
pub fn tree() -> Mesh {
    let h = TRUNK_WIDTH / 2.0;
    let trunk = [
        Point3::new(-h, -h, 0.0),
        Point3::new(h, -h, 0.0),
        Point3::new(h, h, 0.0),
        Point3::new(-h, h, 0.0),
        Point3::new(-h, -h, TRUNK_HEIGHT),
        Point3::new(h, -h, TRUNK_HEIGHT),
        Point3::new(h, h, TRUNK_HEIGHT),
        Point3::new(-h, h, TRUNK_HEIGHT),
    ];
    let trunk_faces: [[usize; 3]; 12] = [
        // bottom
        [0, 1, 2],
        [0, 2, 3],
        // top
        [4, 6, 5],
        [4, 7, 6],
        // front
        [0, 4, 1],
        [1, 4, 5],
        // back
        [2, 6, 3],
        [3, 6, 7],
        // left
        [0, 3, 4],
        [3, 7, 4],
        // right
        [1, 5, 2],
        [2, 5, 6],
    ];

    let r = CANOPY_RADIUS;
    let canopy = [
        Point3::new(r, 0.0, TRUNK_HEIGHT),
        Point3::new(-r / 2.0, r * CANOPY_SIN_60, TRUNK_HEIGHT),
        Point3::new(-r / 2.0, -r * CANOPY_SIN_60, TRUNK_HEIGHT),
        Point3::new(0.0, 0.0, TRUNK_HEIGHT + CANOPY_PEAK),
    ];
    let canopy_faces: [[usize; 3]; 4] = [[0, 1, 2], [0, 3, 1], [1, 3, 2], [2, 3, 0]];

    let mut tris = Vec::with_capacity(16);
    tris.extend(indexed(&trunk, &trunk_faces));
    tris.extend(indexed(&canopy, &canopy_faces));
    tris
}

/// Irregular four-sided pyramid, 6 triangles.
pub fn rock() -> Mesh {
    let base = [
        Point3::new(0.15, 0.1, 0.0),
        Point3::new(-0.1, 0.12, 0.0),
        Point3::new(-0.12, -0.08, 0.0),
        Point3::new(0.1, -0.1, 0.0),
    ];
    let apex = Point3::new(0.02, 0.01, 0.12);

    let mut tris = vec![
        Triangle::new(base[0], base[2], base[1]),
        Triangle::new(base[0], base[3], base[2]),
    ];
    for i in 0..4 {
        tris.push(Triangle::new(base[i], apex, base[(i + 1) % 4]));
    }
    tris
}

fn indexed<'a>(
    verts: &'a [Point3],
    faces: &'a [[usize; 3]],
) -> impl Iterator<Item = Triangle> + 'a {
    faces
        .iter()
        .map(move |&[a, b, c]| Triangle::new(verts[a], verts[b], verts[c]))
}
