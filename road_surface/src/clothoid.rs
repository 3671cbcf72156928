//! Fresnel integrals and the normalized Euler spiral.
//!
//! The integrals come from `fresnel::fresnl`, the Cephes rational and
//! asymptotic approximations of
//! `C(x) = ∫₀ˣ cos(π u²/2) du` and `S(x) = ∫₀ˣ sin(π u²/2) du`.
//! Their absolute error stays below `1e-15` on the whole real line.

use std::f64::consts::PI;

/// Returns `(C(x), S(x))`. Both integrals are odd in `x`.
pub fn fresnel_integrals(x: f64) -> (f64, f64) {
    let (s, c) = fresnel::fresnl(x.abs());
    (x.signum() * c, x.signum() * s)
}

/// Point and heading at arc length `s` on the clothoid that starts at the
/// origin with heading 0 and curvature 0, and whose curvature grows by
/// `c_dot` per meter.
pub fn unit_clothoid(s: f64, c_dot: f64) -> (f64, f64, f64) {
    let heading = 0.5 * c_dot * s * s;
    if c_dot == 0.0 {
        return (s, 0.0, heading);
    }
    let a = (PI / c_dot.abs()).sqrt();
    let (c, sn) = fresnel_integrals(s / a);
    (a * c, c_dot.signum() * a * sn, heading)
}
