//! Euler spiral (clothoid) reference line piece.

use std::f64::consts::FRAC_PI_2;

use super::check_header;
use crate::clothoid::unit_clothoid;
use crate::config::Tolerances;
use crate::error::GeometryError;
use crate::math::{heading_vec, rotate_2d, Box2D, Vec2D};
use crate::numeric::{minimize_bounded, quadratic_roots};

/// Curvature changes linearly from `curv_start` to `curv_end` over `length`.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Spiral {
    pub s0: f64,
    pub x0: f64,
    pub y0: f64,
    pub hdg0: f64,
    pub length: f64,
    pub curv_start: f64,
    pub curv_end: f64,
}

impl Spiral {
    /// Creates a new spiral piece.
    pub fn new(
        s0: f64,
        x0: f64,
        y0: f64,
        hdg0: f64,
        length: f64,
        curv_start: f64,
        curv_end: f64,
    ) -> Result<Self, GeometryError> {
        check_header(s0, x0, y0, hdg0, length)?;
        if !curv_start.is_finite() || !curv_end.is_finite() {
            return Err(GeometryError::NonFinite { s0 });
        }
        Ok(Self {
            s0,
            x0,
            y0,
            hdg0,
            length,
            curv_start,
            curv_end,
        })
    }

    /// Rate of change of curvature per meter.
    pub fn c_dot(&self) -> f64 {
        (self.curv_end - self.curv_start) / self.length
    }

    pub fn get_curvature(&self, s: f64) -> f64 {
        self.curv_start + self.c_dot() * (s - self.s0)
    }

    /// `hdg0 + curv_start·u + ½·c_dot·u²` with `u = s - s0`.
    pub fn get_heading(&self, s: f64) -> f64 {
        let u = s - self.s0;
        self.hdg0 + u * (self.curv_start + 0.5 * self.c_dot() * u)
    }

    pub fn get_point(&self, s: f64, t: f64) -> Vec2D {
        let u = s - self.s0;
        let c_dot = self.c_dot();
        let origin = Vec2D::new(self.x0, self.y0);

        if self.is_near_arc() {
            // line or arc closed form
            let k = self.curv_start;
            let hdg = self.hdg0 + k * u;
            let normal = Vec2D::new(-hdg.sin(), hdg.cos());
            if k == 0.0 {
                return origin + heading_vec(self.hdg0) * u + normal * t;
            }
            let r = 1.0 / k;
            let (sin0, cos0) = self.hdg0.sin_cos();
            let center = origin + Vec2D::new(-r * sin0, r * cos0);
            return center + Vec2D::new(hdg.sin(), -hdg.cos()) * r + normal * t;
        }

        // Shift along the unit clothoid to where its curvature equals
        // curv_start, then rotate that point onto (x0, y0, hdg0).
        let s_spiral = self.curv_start / c_dot;
        let (xs0, ys0, hs0) = unit_clothoid(s_spiral, c_dot);
        let (xs, ys, hs) = unit_clothoid(s_spiral + u, c_dot);
        let rotation = self.hdg0 - hs0;
        let hdg = hs + rotation;
        origin + rotate_2d(Vec2D::new(xs - xs0, ys - ys0), rotation)
            + Vec2D::new(-hdg.sin(), hdg.cos()) * t
    }

    pub fn get_grad(&self, s: f64) -> Vec2D {
        heading_vec(self.get_heading(s))
    }

    /// Whether the arc through the start pose is closer to the spiral than
    /// the shifted clothoid can resolve. The arc misses by `|c_dot|·L³/6`;
    /// the clothoid shift `curv_start / c_dot` costs about
    /// `ε·|curvature| / |c_dot|` in rounding.
    fn is_near_arc(&self) -> bool {
        let c_dot = self.c_dot().abs();
        if c_dot == 0.0 {
            return true;
        }
        let arc_error = c_dot * self.length.powi(3) / 6.0;
        let clothoid_error =
            f64::EPSILON * self.curv_start.abs().max(self.curv_end.abs()) / c_dot;
        arc_error <= clothoid_error
    }

    /// Exact box: axis extrema sit where the heading is a multiple of π/2,
    /// and the heading is quadratic in `u`, so they are found in closed form.
    pub fn get_bbox(&self) -> Box2D {
        let c_dot = self.c_dot();
        let mut offsets = vec![0.0, self.length];

        let mut headings = vec![self.get_heading(self.s0), self.get_heading(self.s0 + self.length)];
        if c_dot != 0.0 {
            let u_vertex = -self.curv_start / c_dot;
            if u_vertex > 0.0 && u_vertex < self.length {
                headings.push(self.get_heading(self.s0 + u_vertex));
            }
        }
        let lo = headings.iter().copied().fold(f64::INFINITY, f64::min);
        let hi = headings.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        let first = (lo / FRAC_PI_2).ceil() as i64;
        let last = (hi / FRAC_PI_2).floor() as i64;
        for k in first..=last {
            let target = k as f64 * FRAC_PI_2;
            let roots = quadratic_roots(0.5 * c_dot, self.curv_start, self.hdg0 - target);
            offsets.extend(roots.into_iter().filter(|u| *u >= 0.0 && *u <= self.length));
        }

        let points: Vec<Vec2D> = offsets
            .into_iter()
            .map(|u| self.get_point(self.s0 + u, 0.0))
            .collect();
        Box2D::from_points(&points).unwrap_or_else(|| Box2D::from_point(Vec2D::new(self.x0, self.y0)))
    }

    pub fn project(&self, x: f64, y: f64) -> f64 {
        self.project_with(x, y, &Tolerances::default())
    }

    /// Nearest station by bounded minimization of the squared distance.
    pub fn project_with(&self, x: f64, y: f64, tol: &Tolerances) -> f64 {
        let target = Vec2D::new(x, y);
        minimize_bounded(
            |s| (self.get_point(s, 0.0) - target).norm_squared(),
            self.s0,
            self.s0 + self.length,
            tol,
        )
    }
}
