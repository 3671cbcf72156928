//! Cubic polynomials in the station `s`.

use crate::numeric::quadratic_roots;

/// `a + b·u + c·u² + d·u³` with `u = s - s0`.
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct Poly3 {
    pub s0: f64,
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
}

impl Poly3 {
    pub fn new(s0: f64, a: f64, b: f64, c: f64, d: f64) -> Self {
        Self { s0, a, b, c, d }
    }

    /// Constant polynomial.
    pub fn constant(value: f64) -> Self {
        Self::new(0.0, value, 0.0, 0.0, 0.0)
    }

    pub fn get(&self, s: f64) -> f64 {
        let u = s - self.s0;
        self.a + u * (self.b + u * (self.c + u * self.d))
    }

    /// First derivative with respect to `s`.
    pub fn get_grad(&self, s: f64) -> f64 {
        let u = s - self.s0;
        self.b + u * (2.0 * self.c + u * 3.0 * self.d)
    }

    /// Stations inside `[s_start, s_end]` where the derivative vanishes.
    pub fn derivative_roots(&self, s_start: f64, s_end: f64) -> Vec<f64> {
        quadratic_roots(3.0 * self.d, 2.0 * self.c, self.b)
            .into_iter()
            .map(|u| u + self.s0)
            .filter(|s| *s >= s_start && *s <= s_end)
            .collect()
    }

    /// Largest value taken on `[s_start, s_end]`.
    pub fn get_max(&self, s_start: f64, s_end: f64) -> f64 {
        self.derivative_roots(s_start, s_end)
            .into_iter()
            .chain([s_start, s_end])
            .map(|s| self.get(s))
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// The same polynomial re-expanded about `new_s0`.
    pub fn shifted(&self, new_s0: f64) -> Self {
        let delta = new_s0 - self.s0;
        Self {
            s0: new_s0,
            a: self.a + delta * (self.b + delta * (self.c + delta * self.d)),
            b: self.b + delta * (2.0 * self.c + 3.0 * self.d * delta),
            c: self.c + 3.0 * self.d * delta,
            d: self.d,
        }
    }

    pub fn negate(&self) -> Self {
        Self::new(self.s0, -self.a, -self.b, -self.c, -self.d)
    }

    /// Sum of both polynomials, expressed about `self.s0`.
    pub fn add(&self, other: &Poly3) -> Self {
        let o = other.shifted(self.s0);
        Self::new(
            self.s0,
            self.a + o.a,
            self.b + o.b,
            self.c + o.c,
            self.d + o.d,
        )
    }

    pub fn is_zero(&self) -> bool {
        self.a == 0.0 && self.b == 0.0 && self.c == 0.0 && self.d == 0.0
    }
}
