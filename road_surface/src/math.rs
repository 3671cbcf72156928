//! Fixed-size vector and matrix types used throughout the crate.

use nalgebra::{Matrix3, Vector2, Vector3};

pub type Vec2D = Vector2<f64>;
pub type Vec3D = Vector3<f64>;
/// Affine frame of a road cross-section; columns are `e_t`, `e_h` and the origin.
pub type Mat3D = Matrix3<f64>;

/// Returns `v` scaled to unit length, or the zero vector when `v` has no length.
pub fn normalize(v: Vec3D) -> Vec3D {
    let len = v.norm();
    if len == 0.0 {
        Vec3D::zeros()
    } else {
        v / len
    }
}

/// Rotates `v` counter-clockwise by `angle` radians.
pub fn rotate_2d(v: Vec2D, angle: f64) -> Vec2D {
    let (sin, cos) = angle.sin_cos();
    Vec2D::new(cos * v.x - sin * v.y, sin * v.x + cos * v.y)
}

/// Unit vector pointing along `heading`.
pub fn heading_vec(heading: f64) -> Vec2D {
    Vec2D::new(heading.cos(), heading.sin())
}

/// Axis-aligned bounding box in the plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Box2D {
    pub min: Vec2D,
    pub max: Vec2D,
}

impl Box2D {
    /// Degenerate box around a single point.
    pub fn from_point(p: Vec2D) -> Self {
        Self { min: p, max: p }
    }

    /// Smallest box containing all `points`, or `None` for an empty slice.
    pub fn from_points(points: &[Vec2D]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut bbox = Self::from_point(*first);
        for p in rest {
            bbox.extend(*p);
        }
        Some(bbox)
    }

    /// Grows the box so that it contains `p`.
    pub fn extend(&mut self, p: Vec2D) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
    }

    /// Grows the box so that it contains `other`.
    pub fn union(&mut self, other: &Box2D) {
        self.extend(other.min);
        self.extend(other.max);
    }

    /// Checks whether `p` lies inside the box, allowing a slack of `eps`.
    pub fn contains(&self, p: Vec2D, eps: f64) -> bool {
        p.x >= self.min.x - eps
            && p.x <= self.max.x + eps
            && p.y >= self.min.y - eps
            && p.y <= self.max.y + eps
    }
}
