//! Planar reference line geometries.
//!
//! Every variant covers `[s0, s0 + length]` and starts at `(x0, y0)` with
//! heading `hdg0`. Lateral offsets `t` are measured to the left of the
//! tangent.

pub mod arc;
pub mod line;
pub mod param_poly3;
pub mod poly3;
pub mod spiral;

pub use arc::Arc;
pub use line::Line;
pub use param_poly3::ParamPoly3;
pub use poly3::Poly3Geometry;
pub use spiral::Spiral;

use crate::config::Tolerances;
use crate::error::GeometryError;
use crate::math::{Box2D, Vec2D};

const MIN_SUBDIVISION_DEPTH: u32 = 2;
const MAX_SUBDIVISION_DEPTH: u32 = 16;

/// One piece of a reference line.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RoadGeometry {
    Line(Line),
    Arc(Arc),
    Spiral(Spiral),
    ParamPoly3(ParamPoly3),
    Poly3(Poly3Geometry),
}

impl RoadGeometry {
    pub fn s_start(&self) -> f64 {
        match self {
            RoadGeometry::Line(g) => g.s0,
            RoadGeometry::Arc(g) => g.s0,
            RoadGeometry::Spiral(g) => g.s0,
            RoadGeometry::ParamPoly3(g) => g.s0,
            RoadGeometry::Poly3(g) => g.s0,
        }
    }

    pub fn length(&self) -> f64 {
        match self {
            RoadGeometry::Line(g) => g.length,
            RoadGeometry::Arc(g) => g.length,
            RoadGeometry::Spiral(g) => g.length,
            RoadGeometry::ParamPoly3(g) => g.length,
            RoadGeometry::Poly3(g) => g.length,
        }
    }

    pub fn s_end(&self) -> f64 {
        self.s_start() + self.length()
    }

    /// Point at station `s`, offset laterally by `t`.
    pub fn get_point(&self, s: f64, t: f64) -> Vec2D {
        match self {
            RoadGeometry::Line(g) => g.get_point(s, t),
            RoadGeometry::Arc(g) => g.get_point(s, t),
            RoadGeometry::Spiral(g) => g.get_point(s, t),
            RoadGeometry::ParamPoly3(g) => g.get_point(s, t),
            RoadGeometry::Poly3(g) => g.get_point(s, t),
        }
    }

    /// Unit tangent at station `s`.
    pub fn get_grad(&self, s: f64) -> Vec2D {
        match self {
            RoadGeometry::Line(g) => g.get_grad(s),
            RoadGeometry::Arc(g) => g.get_grad(s),
            RoadGeometry::Spiral(g) => g.get_grad(s),
            RoadGeometry::ParamPoly3(g) => g.get_grad(s),
            RoadGeometry::Poly3(g) => g.get_grad(s),
        }
    }

    /// Tangent angle at station `s`.
    pub fn get_heading(&self, s: f64) -> f64 {
        match self {
            RoadGeometry::Line(g) => g.hdg0,
            RoadGeometry::Arc(g) => g.get_heading(s),
            RoadGeometry::Spiral(g) => g.get_heading(s),
            _ => {
                let grad = self.get_grad(s);
                grad.y.atan2(grad.x)
            }
        }
    }

    pub fn get_end_point(&self) -> Vec2D {
        self.get_point(self.s_end(), 0.0)
    }

    /// Axis-aligned bounding box of the piece.
    pub fn get_bbox(&self) -> Box2D {
        match self {
            RoadGeometry::Line(g) => g.get_bbox(),
            RoadGeometry::Arc(g) => g.get_bbox(),
            RoadGeometry::Spiral(g) => g.get_bbox(),
            RoadGeometry::ParamPoly3(g) => g.get_bbox(),
            RoadGeometry::Poly3(g) => g.get_bbox(),
        }
    }

    /// Station of the point on the piece nearest to `(x, y)`.
    pub fn project(&self, x: f64, y: f64) -> f64 {
        self.project_with(x, y, &Tolerances::default())
    }

    pub fn project_with(&self, x: f64, y: f64, tol: &Tolerances) -> f64 {
        match self {
            RoadGeometry::Line(g) => g.project(x, y),
            RoadGeometry::Arc(g) => g.project(x, y),
            RoadGeometry::Spiral(g) => g.project_with(x, y, tol),
            RoadGeometry::ParamPoly3(g) => g.project_with(x, y, tol),
            RoadGeometry::Poly3(g) => g.project_with(x, y, tol),
        }
    }

    /// Checks the parameters a loader handed over.
    pub fn validate(&self) -> Result<(), GeometryError> {
        match self {
            RoadGeometry::Line(g) => check_header(g.s0, g.x0, g.y0, g.hdg0, g.length),
            RoadGeometry::Arc(g) => Arc::new(g.s0, g.x0, g.y0, g.hdg0, g.length, g.curvature).map(|_| ()),
            RoadGeometry::Spiral(g) => {
                Spiral::new(g.s0, g.x0, g.y0, g.hdg0, g.length, g.curv_start, g.curv_end).map(|_| ())
            }
            RoadGeometry::ParamPoly3(g) => g.validate(),
            RoadGeometry::Poly3(g) => g.to_param_poly3().validate(),
        }
    }

    /// Stations of a polyline that stays within `eps` of the curve.
    pub fn approximate_linear(&self, eps: f64) -> Vec<f64> {
        let (s_start, s_end) = (self.s_start(), self.s_end());
        let mut stations = vec![s_start];
        if let RoadGeometry::Line(_) = self {
            stations.push(s_end);
            return stations;
        }
        self.subdivide(s_start, s_end, eps, 0, &mut stations);
        stations
    }

    fn subdivide(&self, a: f64, b: f64, eps: f64, depth: u32, out: &mut Vec<f64>) {
        let mid = 0.5 * (a + b);
        let pa = self.get_point(a, 0.0);
        let pb = self.get_point(b, 0.0);
        let pm = self.get_point(mid, 0.0);
        let deviation = distance_to_segment(pm, pa, pb);
        if depth < MAX_SUBDIVISION_DEPTH && (depth < MIN_SUBDIVISION_DEPTH || deviation > eps) {
            self.subdivide(a, mid, eps, depth + 1, out);
            self.subdivide(mid, b, eps, depth + 1, out);
        } else {
            out.push(b);
        }
    }
}

impl From<Line> for RoadGeometry {
    fn from(g: Line) -> Self {
        RoadGeometry::Line(g)
    }
}

impl From<Arc> for RoadGeometry {
    fn from(g: Arc) -> Self {
        RoadGeometry::Arc(g)
    }
}

impl From<Spiral> for RoadGeometry {
    fn from(g: Spiral) -> Self {
        RoadGeometry::Spiral(g)
    }
}

impl From<ParamPoly3> for RoadGeometry {
    fn from(g: ParamPoly3) -> Self {
        RoadGeometry::ParamPoly3(g)
    }
}

impl From<Poly3Geometry> for RoadGeometry {
    fn from(g: Poly3Geometry) -> Self {
        RoadGeometry::Poly3(g)
    }
}

/// Validation shared by all variants.
pub(crate) fn check_header(
    s0: f64,
    x0: f64,
    y0: f64,
    hdg0: f64,
    length: f64,
) -> Result<(), GeometryError> {
    if ![s0, x0, y0, hdg0, length].iter().all(|v| v.is_finite()) {
        return Err(GeometryError::NonFinite { s0 });
    }
    if length <= 0.0 {
        return Err(GeometryError::NonPositiveLength { s0, length });
    }
    Ok(())
}

fn distance_to_segment(p: Vec2D, a: Vec2D, b: Vec2D) -> f64 {
    let ab = b - a;
    let len2 = ab.norm_squared();
    if len2 == 0.0 {
        return (p - a).norm();
    }
    let k = ((p - a).dot(&ab) / len2).clamp(0.0, 1.0);
    (p - (a + ab * k)).norm()
}
