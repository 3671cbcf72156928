//! Constant-curvature reference line piece.

use std::f64::consts::{FRAC_PI_2, TAU};

use super::check_header;
use crate::error::GeometryError;
use crate::math::{heading_vec, Box2D, Vec2D};

/// Circular arc; positive curvature turns left.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Arc {
    pub s0: f64,
    pub x0: f64,
    pub y0: f64,
    pub hdg0: f64,
    pub length: f64,
    pub curvature: f64,
}

impl Arc {
    /// Creates a new arc piece. Zero curvature is rejected.
    pub fn new(
        s0: f64,
        x0: f64,
        y0: f64,
        hdg0: f64,
        length: f64,
        curvature: f64,
    ) -> Result<Self, GeometryError> {
        check_header(s0, x0, y0, hdg0, length)?;
        if !curvature.is_finite() {
            return Err(GeometryError::NonFinite { s0 });
        }
        if curvature == 0.0 {
            return Err(GeometryError::ZeroCurvature { s0 });
        }
        Ok(Self {
            s0,
            x0,
            y0,
            hdg0,
            length,
            curvature,
        })
    }

    /// Signed radius, negative for right turns.
    pub fn radius(&self) -> f64 {
        1.0 / self.curvature
    }

    pub fn center(&self) -> Vec2D {
        let r = self.radius();
        let (sin, cos) = self.hdg0.sin_cos();
        Vec2D::new(self.x0 - r * sin, self.y0 + r * cos)
    }

    pub fn get_heading(&self, s: f64) -> f64 {
        self.hdg0 + self.curvature * (s - self.s0)
    }

    pub fn get_point(&self, s: f64, t: f64) -> Vec2D {
        let (sin, cos) = self.get_heading(s).sin_cos();
        let r = self.radius();
        self.center() + Vec2D::new(sin, -cos) * (r - t)
    }

    pub fn get_grad(&self, s: f64) -> Vec2D {
        heading_vec(self.get_heading(s))
    }

    /// Polar angle of the start point around the center. It advances by
    /// `curvature` per meter of arc length for both turning directions.
    fn start_angle(&self) -> f64 {
        if self.curvature > 0.0 {
            self.hdg0 - FRAC_PI_2
        } else {
            self.hdg0 + FRAC_PI_2
        }
    }

    /// Tight box: end points plus every axis extremum swept by the arc.
    pub fn get_bbox(&self) -> Box2D {
        let center = self.center();
        let r = self.radius().abs();
        let mut bbox = Box2D::from_point(self.get_point(self.s0, 0.0));
        bbox.extend(self.get_point(self.s0 + self.length, 0.0));

        let a0 = self.start_angle();
        let a1 = a0 + self.curvature * self.length;
        let (lo, hi) = if a0 <= a1 { (a0, a1) } else { (a1, a0) };
        if hi - lo >= TAU {
            bbox.extend(center - Vec2D::new(r, r));
            bbox.extend(center + Vec2D::new(r, r));
            return bbox;
        }
        let first = (lo / FRAC_PI_2).ceil() as i64;
        let last = (hi / FRAC_PI_2).floor() as i64;
        for k in first..=last {
            let angle = k as f64 * FRAC_PI_2;
            bbox.extend(center + Vec2D::new(angle.cos(), angle.sin()) * r);
        }
        bbox
    }

    /// Nearest station, from the angle of `(x, y)` around the center.
    pub fn project(&self, x: f64, y: f64) -> f64 {
        let center = self.center();
        let q = Vec2D::new(x, y) - center;
        if q.norm() == 0.0 {
            return self.s0;
        }
        let swept = (self.curvature.signum() * (q.y.atan2(q.x) - self.start_angle())).rem_euclid(TAU);
        let ds = swept * self.radius().abs();
        if ds <= self.length {
            return self.s0 + ds;
        }
        let p = Vec2D::new(x, y);
        let d_start = (self.get_point(self.s0, 0.0) - p).norm();
        let d_end = (self.get_point(self.s0 + self.length, 0.0) - p).norm();
        if d_end < d_start {
            self.s0 + self.length
        } else {
            self.s0
        }
    }
}
