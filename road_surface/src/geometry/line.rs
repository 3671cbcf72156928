//! Straight reference line piece.

use super::check_header;
use crate::error::GeometryError;
use crate::math::{heading_vec, Box2D, Vec2D};

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Line {
    pub s0: f64,
    pub x0: f64,
    pub y0: f64,
    pub hdg0: f64,
    pub length: f64,
}

impl Line {
    /// Creates a new line piece.
    pub fn new(s0: f64, x0: f64, y0: f64, hdg0: f64, length: f64) -> Result<Self, GeometryError> {
        check_header(s0, x0, y0, hdg0, length)?;
        Ok(Self {
            s0,
            x0,
            y0,
            hdg0,
            length,
        })
    }

    pub fn get_point(&self, s: f64, t: f64) -> Vec2D {
        let (sin, cos) = self.hdg0.sin_cos();
        let ds = s - self.s0;
        Vec2D::new(
            self.x0 + cos * ds - sin * t,
            self.y0 + sin * ds + cos * t,
        )
    }

    pub fn get_grad(&self, _s: f64) -> Vec2D {
        heading_vec(self.hdg0)
    }

    pub fn get_bbox(&self) -> Box2D {
        let mut bbox = Box2D::from_point(self.get_point(self.s0, 0.0));
        bbox.extend(self.get_point(self.s0 + self.length, 0.0));
        bbox
    }

    /// Orthogonal foot of `(x, y)` clamped to the segment.
    pub fn project(&self, x: f64, y: f64) -> f64 {
        let dir = heading_vec(self.hdg0);
        let ds = (Vec2D::new(x - self.x0, y - self.y0)).dot(&dir);
        self.s0 + ds.clamp(0.0, self.length)
    }
}
