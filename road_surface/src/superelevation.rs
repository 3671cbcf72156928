use crate::cubic_spline::CubicSpline;
use crate::poly3::Poly3;
use crate::station_map::StationMap;

/// Roll angle of the cross-section about the reference line tangent, in radians.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Superelevation {
    pub spline: CubicSpline,
}

impl Superelevation {
    pub fn new(spline: CubicSpline) -> Self {
        Self { spline }
    }

    pub fn get(&self, s: f64) -> f64 {
        self.spline.get(s)
    }

    pub fn get_grad(&self, s: f64) -> f64 {
        self.spline.get_grad(s)
    }
}

/// Side of the road a crossfall piece applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Left,
    Right,
    #[default]
    Both,
}

/// Lateral slope of the surface. Pieces may be restricted to one side.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Crossfall {
    #[serde(default)]
    pub spline: CubicSpline,
    /// Side tags keyed by the start station of the piece they belong to.
    #[serde(default)]
    pub sides: StationMap<Side>,
}

impl Crossfall {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a piece starting at `s0` for the given side.
    pub fn add_poly(&mut self, s0: f64, poly: Poly3, side: Side) {
        self.spline.add_poly(s0, poly);
        self.sides.insert(s0, side);
    }

    /// Crossfall angle at `s` on the requested side of the reference line.
    /// A piece tagged for the other side contributes nothing.
    pub fn get_crossfall(&self, s: f64, on_left_side: bool) -> f64 {
        let Some((s0, poly)) = self.spline.s0_to_poly.floor(s) else {
            return 0.0;
        };
        let side = self.sides.get(s0).copied().unwrap_or_default();
        match (side, on_left_side) {
            (Side::Right, true) | (Side::Left, false) => 0.0,
            _ => poly.get(s),
        }
    }
}
