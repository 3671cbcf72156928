//! Small numerical routines: bounded minimization and polynomial roots.

use crate::config::Tolerances;

const INV_PHI: f64 = 0.618_033_988_749_894_9;

/// Minimizes `f` over `[lo, hi]`.
///
/// The interval is sampled `coarse_samples` times to bracket the global
/// minimum, then refined with golden-section search until the bracket is
/// narrower than `relative_tolerance * (hi - lo)` or `max_iterations` is hit.
/// The result always lies in `[lo, hi]`; on ties the smallest argument wins.
pub fn minimize_bounded<F>(f: F, lo: f64, hi: f64, tol: &Tolerances) -> f64
where
    F: Fn(f64) -> f64,
{
    if !(hi > lo) {
        return lo;
    }
    let n = tol.coarse_samples.max(2);
    let step = (hi - lo) / n as f64;
    let sample_at = |i: usize| if i == n { hi } else { lo + i as f64 * step };

    let mut best_i = 0;
    let mut best_v = f(lo);
    for i in 1..=n {
        let v = f(sample_at(i));
        if v < best_v {
            best_i = i;
            best_v = v;
        }
    }

    let mut a = sample_at(best_i.saturating_sub(1));
    let mut b = sample_at((best_i + 1).min(n));
    let width = tol.relative_tolerance * (hi - lo);

    let mut c = b - INV_PHI * (b - a);
    let mut d = a + INV_PHI * (b - a);
    let mut fc = f(c);
    let mut fd = f(d);
    let mut iterations = 0;
    while b - a > width && iterations < tol.max_iterations {
        if fc <= fd {
            b = d;
            d = c;
            fd = fc;
            c = b - INV_PHI * (b - a);
            fc = f(c);
        } else {
            a = c;
            c = d;
            fc = fd;
            d = a + INV_PHI * (b - a);
            fd = f(d);
        }
        iterations += 1;
    }
    if b - a > width {
        log::debug!(
            "minimization on [{lo}, {hi}] stopped after {iterations} iterations with bracket {}",
            b - a
        );
    }

    let x = (0.5 * (a + b)).clamp(lo, hi);
    if f(x) < best_v {
        x
    } else {
        sample_at(best_i)
    }
}

/// Real roots of `a·x² + b·x + c`, ascending. A vanishing leading
/// coefficient degrades to the linear case.
pub fn quadratic_roots(a: f64, b: f64, c: f64) -> Vec<f64> {
    let scale = a.abs().max(b.abs()).max(c.abs());
    if scale == 0.0 {
        return Vec::new();
    }
    if a.abs() <= 1e-14 * scale {
        if b.abs() <= 1e-14 * scale {
            return Vec::new();
        }
        return vec![-c / b];
    }
    let disc = b * b - 4.0 * a * c;
    if disc < 0.0 {
        return Vec::new();
    }
    if disc == 0.0 {
        return vec![-b / (2.0 * a)];
    }
    // numerically stable form
    let q = -0.5 * (b + b.signum() * disc.sqrt());
    let mut roots = if q == 0.0 {
        vec![0.0, -b / a]
    } else {
        vec![q / a, c / q]
    };
    roots.sort_by(|x, y| x.total_cmp(y));
    roots
}
