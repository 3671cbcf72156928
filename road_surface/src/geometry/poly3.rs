//! Cubic reference line piece `v = poly(u)` in the start tangent frame.

use crate::config::Tolerances;
use crate::error::GeometryError;
use crate::math::{Box2D, Vec2D};
use crate::poly3::Poly3;

use super::ParamPoly3;

/// The local coordinate `u` runs along the start tangent and is taken equal
/// to `s - s0`.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Poly3Geometry {
    pub s0: f64,
    pub x0: f64,
    pub y0: f64,
    pub hdg0: f64,
    pub length: f64,
    pub poly: Poly3,
}

impl Poly3Geometry {
    pub fn new(
        s0: f64,
        x0: f64,
        y0: f64,
        hdg0: f64,
        length: f64,
        poly: Poly3,
    ) -> Result<Self, GeometryError> {
        let geom = Self {
            s0,
            x0,
            y0,
            hdg0,
            length,
            poly: poly.shifted(0.0),
        };
        geom.to_param_poly3().validate()?;
        Ok(geom)
    }

    /// Same curve as a parametric cubic with `u(p) = p`.
    pub fn to_param_poly3(&self) -> ParamPoly3 {
        ParamPoly3 {
            s0: self.s0,
            x0: self.x0,
            y0: self.y0,
            hdg0: self.hdg0,
            length: self.length,
            poly_u: Poly3::new(0.0, 0.0, 1.0, 0.0, 0.0),
            poly_v: self.poly.shifted(0.0),
            p_range_normalized: false,
        }
    }

    pub fn get_point(&self, s: f64, t: f64) -> Vec2D {
        self.to_param_poly3().get_point(s, t)
    }

    pub fn get_grad(&self, s: f64) -> Vec2D {
        self.to_param_poly3().get_grad(s)
    }

    pub fn get_bbox(&self) -> Box2D {
        self.to_param_poly3().get_bbox()
    }

    pub fn project_with(&self, x: f64, y: f64, tol: &Tolerances) -> f64 {
        self.to_param_poly3().project_with(x, y, tol)
    }
}
