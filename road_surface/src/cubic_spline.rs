//! Piecewise cubic functions of the station.

use crate::poly3::Poly3;
use crate::station_map::StationMap;

/// Ordered pieces of [`Poly3`] keyed by their start station.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CubicSpline {
    pub s0_to_poly: StationMap<Poly3>,
}

impl CubicSpline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spline with a single constant piece starting at zero.
    pub fn constant(value: f64) -> Self {
        let mut spline = Self::new();
        spline.add_poly(0.0, Poly3::constant(value));
        spline
    }

    /// Adds a piece starting at `s0`. The polynomial is re-expanded about `s0`
    /// if it was given relative to another origin.
    pub fn add_poly(&mut self, s0: f64, poly: Poly3) {
        let poly = if poly.s0 == s0 { poly } else { poly.shifted(s0) };
        self.s0_to_poly.insert(s0, poly);
    }

    /// Adds a piece from OpenDRIVE-style coefficients measured from `s0`.
    pub fn add_coefficients(&mut self, s0: f64, a: f64, b: f64, c: f64, d: f64) {
        self.s0_to_poly.insert(s0, Poly3::new(s0, a, b, c, d));
    }

    pub fn len(&self) -> usize {
        self.s0_to_poly.len()
    }

    pub fn is_empty(&self) -> bool {
        self.s0_to_poly.is_empty()
    }

    /// Piece active at `s`; a zero polynomial for an empty spline.
    pub fn get_poly(&self, s: f64) -> Poly3 {
        self.s0_to_poly
            .floor(s)
            .map(|(_, poly)| *poly)
            .unwrap_or_default()
    }

    pub fn get(&self, s: f64) -> f64 {
        match self.s0_to_poly.floor(s) {
            Some((_, poly)) => poly.get(s),
            None => 0.0,
        }
    }

    pub fn get_grad(&self, s: f64) -> f64 {
        match self.s0_to_poly.floor(s) {
            Some((_, poly)) => poly.get_grad(s),
            None => 0.0,
        }
    }

    /// Largest value on `[s_start, s_end]`.
    pub fn get_max(&self, s_start: f64, s_end: f64) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        let first = self.s0_to_poly.floor_index(s_start).unwrap_or(0);
        let mut max = f64::NEG_INFINITY;
        for idx in first..self.s0_to_poly.len() {
            let Some((key, poly)) = self.s0_to_poly.entry(idx) else {
                break;
            };
            if key > s_end {
                break;
            }
            let lo = if idx == first { s_start } else { key.max(s_start) };
            let hi = self
                .s0_to_poly
                .next(idx)
                .map(|(next, _)| next.min(s_end))
                .unwrap_or(s_end);
            if hi >= lo {
                max = max.max(poly.get_max(lo, hi));
            }
        }
        max
    }

    pub fn negate(&self) -> Self {
        Self {
            s0_to_poly: self
                .s0_to_poly
                .iter()
                .map(|(s0, poly)| (s0, poly.negate()))
                .collect(),
        }
    }

    /// Pointwise sum. Breakpoints of both splines are kept.
    pub fn add(&self, other: &CubicSpline) -> Self {
        let mut keys: Vec<f64> = self.s0_to_poly.keys().chain(other.s0_to_poly.keys()).collect();
        keys.sort_by(|a, b| a.total_cmp(b));
        keys.dedup();
        let mut sum = Self::new();
        for s0 in keys {
            let a = self.get_poly(s0).shifted(s0);
            let b = other.get_poly(s0).shifted(s0);
            sum.s0_to_poly.insert(s0, a.add(&b));
        }
        sum
    }

    pub fn is_zero(&self) -> bool {
        self.s0_to_poly.values().all(Poly3::is_zero)
    }
}
