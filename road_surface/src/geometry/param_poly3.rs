//! Parametric cubic reference line piece.

use super::check_header;
use crate::config::Tolerances;
use crate::error::GeometryError;
use crate::math::{heading_vec, rotate_2d, Box2D, Vec2D};
use crate::numeric::minimize_bounded;
use crate::poly3::Poly3;

/// Local coordinates `(u(p), v(p))` as cubics in `p`, rotated by `hdg0` and
/// translated to `(x0, y0)`. With `p_range_normalized` the parameter runs over
/// `[0, 1]`, otherwise over `[0, length]`.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ParamPoly3 {
    pub s0: f64,
    pub x0: f64,
    pub y0: f64,
    pub hdg0: f64,
    pub length: f64,
    pub poly_u: Poly3,
    pub poly_v: Poly3,
    pub p_range_normalized: bool,
}

impl ParamPoly3 {
    /// Creates a new parametric cubic piece. Both polynomials are taken
    /// relative to `p = 0`.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        s0: f64,
        x0: f64,
        y0: f64,
        hdg0: f64,
        length: f64,
        poly_u: Poly3,
        poly_v: Poly3,
        p_range_normalized: bool,
    ) -> Result<Self, GeometryError> {
        let geom = Self {
            s0,
            x0,
            y0,
            hdg0,
            length,
            poly_u: poly_u.shifted(0.0),
            poly_v: poly_v.shifted(0.0),
            p_range_normalized,
        };
        geom.validate()?;
        Ok(geom)
    }

    pub fn validate(&self) -> Result<(), GeometryError> {
        check_header(self.s0, self.x0, self.y0, self.hdg0, self.length)?;
        let coefficients = [self.poly_u, self.poly_v]
            .into_iter()
            .flat_map(|p| [p.a, p.b, p.c, p.d]);
        if coefficients.into_iter().all(f64::is_finite) {
            Ok(())
        } else {
            Err(GeometryError::NonFinite { s0: self.s0 })
        }
    }

    fn p_max(&self) -> f64 {
        if self.p_range_normalized {
            1.0
        } else {
            self.length
        }
    }

    /// Curve parameter at station `s`.
    pub fn get_p(&self, s: f64) -> f64 {
        let ds = s - self.s0;
        if self.p_range_normalized {
            ds / self.length
        } else {
            ds
        }
    }

    fn local_point(&self, p: f64) -> Vec2D {
        Vec2D::new(self.poly_u.get(p), self.poly_v.get(p))
    }

    fn world_point(&self, p: f64) -> Vec2D {
        Vec2D::new(self.x0, self.y0) + rotate_2d(self.local_point(p), self.hdg0)
    }

    pub fn get_grad(&self, s: f64) -> Vec2D {
        let p = self.get_p(s);
        let d = rotate_2d(
            Vec2D::new(self.poly_u.get_grad(p), self.poly_v.get_grad(p)),
            self.hdg0,
        );
        let len = d.norm();
        if len == 0.0 {
            heading_vec(self.hdg0)
        } else {
            d / len
        }
    }

    pub fn get_point(&self, s: f64, t: f64) -> Vec2D {
        let grad = self.get_grad(s);
        self.world_point(self.get_p(s)) + Vec2D::new(-grad.y, grad.x) * t
    }

    /// World coordinates as cubics in `p`; their derivative roots give the
    /// axis extrema in closed form.
    fn world_polys(&self) -> (Poly3, Poly3) {
        let (sin, cos) = self.hdg0.sin_cos();
        let (u, v) = (self.poly_u, self.poly_v);
        let x = Poly3::new(
            0.0,
            self.x0 + cos * u.a - sin * v.a,
            cos * u.b - sin * v.b,
            cos * u.c - sin * v.c,
            cos * u.d - sin * v.d,
        );
        let y = Poly3::new(
            0.0,
            self.y0 + sin * u.a + cos * v.a,
            sin * u.b + cos * v.b,
            sin * u.c + cos * v.c,
            sin * u.d + cos * v.d,
        );
        (x, y)
    }

    pub fn get_bbox(&self) -> Box2D {
        let p_max = self.p_max();
        let (x, y) = self.world_polys();
        let mut bbox = Box2D::from_point(self.world_point(0.0));
        bbox.extend(self.world_point(p_max));
        for p in x
            .derivative_roots(0.0, p_max)
            .into_iter()
            .chain(y.derivative_roots(0.0, p_max))
        {
            bbox.extend(Vec2D::new(x.get(p), y.get(p)));
        }
        bbox
    }

    pub fn project(&self, x: f64, y: f64) -> f64 {
        self.project_with(x, y, &Tolerances::default())
    }

    pub fn project_with(&self, x: f64, y: f64, tol: &Tolerances) -> f64 {
        let target = Vec2D::new(x, y);
        minimize_bounded(
            |s| (self.world_point(self.get_p(s)) - target).norm_squared(),
            self.s0,
            self.s0 + self.length,
            tol,
        )
    }
}
