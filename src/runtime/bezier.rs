use std::collections::HashMap;

use parking_lot::RwLock;

/// Cubic bezier easing from `(0, 0)` to `(1, 1)` with control points `(x1, y1)` and `(x2, y2)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UnitBezier {
    cx: f64,
    bx: f64,
    ax: f64,
    cy: f64,
    by: f64,
    ay: f64,
}

impl UnitBezier {
    const NEWTON_ITERATIONS: usize = 8;
    const EPSILON: f64 = 1e-6;

    /// Build an easing from `[x1, y1, x2, y2]`.
    pub fn new([x1, y1, x2, y2]: [f64; 4]) -> Self {
        let cx = 3.0 * x1;
        let bx = 3.0 * (x2 - x1) - cx;
        let cy = 3.0 * y1;
        let by = 3.0 * (y2 - y1) - cy;
        Self {
            cx,
            bx,
            ax: 1.0 - cx - bx,
            cy,
            by,
            ay: 1.0 - cy - by,
        }
    }

    fn sample_x(&self, t: f64) -> f64 {
        ((self.ax * t + self.bx) * t + self.cx) * t
    }

    fn sample_y(&self, t: f64) -> f64 {
        ((self.ay * t + self.by) * t + self.cy) * t
    }

    fn sample_dx(&self, t: f64) -> f64 {
        (3.0 * self.ax * t + 2.0 * self.bx) * t + self.cx
    }

    fn solve_x(&self, x: f64) -> f64 {
        let mut t = x;
        for _ in 0..Self::NEWTON_ITERATIONS {
            let err = self.sample_x(t) - x;
            if err.abs() < Self::EPSILON {
                return t;
            }
            let d = self.sample_dx(t);
            if d.abs() < 1e-6 {
                break;
            }
            t -= err / d;
        }

        // Newton did not converge; fall back to bisection.
        let (mut lo, mut hi) = (0.0, 1.0);
        t = x;
        if t < lo {
            return lo;
        }
        if t > hi {
            return hi;
        }
        while lo < hi {
            let v = self.sample_x(t);
            if (v - x).abs() < Self::EPSILON {
                return t;
            }
            if x > v {
                lo = t;
            } else {
                hi = t;
            }
            t = (hi - lo) * 0.5 + lo;
            if hi - lo < f64::EPSILON {
                break;
            }
        }
        t
    }

    /// Map progress `t` in `[0, 1]` through the easing curve.
    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        self.sample_y(self.solve_x(t))
    }
}

/// Append-only memo of [`UnitBezier`] easings keyed by control points.
///
/// Styles use a handful of distinct control-point tuples, so entries are never evicted.
#[derive(Debug, Default)]
pub struct BezierCache {
    easings: RwLock<HashMap<[u64; 4], UnitBezier>>,
}

impl BezierCache {
    /// Easing for `points`, built on first use.
    pub fn easing(&self, points: [f64; 4]) -> UnitBezier {
        let key = points.map(f64::to_bits);
        if let Some(easing) = self.easings.read().get(&key) {
            return *easing;
        }
        *self
            .easings
            .write()
            .entry(key)
            .or_insert_with(|| UnitBezier::new(points))
    }

    /// Number of distinct easings built so far.
    pub fn len(&self) -> usize {
        self.easings.read().len()
    }

    /// True when no easing has been built yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/bezier.rs"]
mod tests;
