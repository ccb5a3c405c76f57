use std::ops::{Div, Sub};

/// A point in 3D space. Asset coordinates are Z-up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    pub const ORIGIN: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

impl Sub for Point3 {
    type Output = Vec3;
    fn sub(self, rhs: Self) -> Self::Output {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

/// A vector in 3D space (edge directions and facet normals).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };
    pub const Z: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 1.0,
    };

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn dot(&self, other: &Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(&self, other: &Self) -> Self {
        Self {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    pub fn length(&self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Unit vector in the same direction, or `None` for the zero vector.
    pub fn normalized(&self) -> Option<Self> {
        let len = self.length();
        if len > 0.0 {
            Some(*self / len)
        } else {
            None
        }
    }
}

impl Div<f64> for Vec3 {
    type Output = Self;
    fn div(self, rhs: f64) -> Self::Output {
        Self::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

/// One triangular facet. Vertex order is the winding; the outward normal
/// follows the right-hand rule over `[0] -> [1] -> [2]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle(pub [Point3; 3]);

impl Triangle {
    pub const fn new(a: Point3, b: Point3, c: Point3) -> Self {
        Self([a, b, c])
    }

    pub fn vertices(&self) -> &[Point3; 3] {
        &self.0
    }

    /// Unit face normal from `(p1 - p0) x (p2 - p0)`. Zero-area triangles
    /// get `+Z` instead of NaN.
    pub fn normal(&self) -> Vec3 {
        let [p0, p1, p2] = self.0;
        let n = (p1 - p0).cross(&(p2 - p0));
        n.normalized().unwrap_or(Vec3::Z)
    }
}

/// An ordered triangle soup.
pub type Mesh = Vec<Triangle>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_sub_gives_vector() {
        let a = Point3::new(3.0, 4.0, 5.0);
        let b = Point3::new(1.0, 1.0, 1.0);
        assert_eq!(a - b, Vec3::new(2.0, 3.0, 4.0));
    }

    #[test]
    fn test_cross_product() {
        let x = Vec3::new(1.0, 0.0, 0.0);
        let y = Vec3::new(0.0, 1.0, 0.0);
        assert_eq!(x.cross(&y), Vec3::Z);
    }

    #[test]
    fn test_zero_vector_does_not_normalize() {
        assert!(Vec3::ZERO.normalized().is_none());
    }

    #[test]
    fn test_normal_follows_winding() {
        let a = Point3::ORIGIN;
        let b = Point3::new(1.0, 0.0, 0.0);
        let c = Point3::new(0.0, 1.0, 0.0);
        assert_eq!(Triangle::new(a, b, c).normal(), Vec3::Z);
        assert_eq!(Triangle::new(a, c, b).normal(), Vec3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn test_degenerate_normal_defaults_to_z() {
        let p = Point3::new(1.0, 2.0, 3.0);
        assert_eq!(Triangle::new(p, p, p).normal(), Vec3::Z);

        // collinear
        let t = Triangle::new(
            Point3::ORIGIN,
            Point3::new(1.0, 1.0, 1.0),
            Point3::new(2.0, 2.0, 2.0),
        );
        assert_eq!(t.normal(), Vec3::Z);
    }
}
