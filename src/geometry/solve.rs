//! Closed-form real root finders for polynomials up to degree four.
//!
//! Coefficients are given lowest order first: `c[0] + c[1]·x + c[2]·x² …`.
//! The classical formulas are used (normal form, Cardano, Ferrari with the
//! resolvent cubic) with the legacy `EQN_EPS` classification of near-zero
//! discriminants. Inputs are scaled so the largest coefficient is 1 before
//! classification, and a vanishing leading coefficient falls through to the
//! next lower degree. Having no real roots is a normal outcome, not an error.

use std::f64::consts::PI;

use crate::defaults::{EQN_EPS, POLISH_STEPS};

#[inline]
fn is_zero(x: f64) -> bool {
    x > -EQN_EPS && x < EQN_EPS
}

/// Up to `N` real roots in a fixed-size buffer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Roots<const N: usize> {
    vals: [f64; N],
    len: usize,
}

impl<const N: usize> Default for Roots<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> Roots<N> {
    pub const fn new() -> Self {
        Roots {
            vals: [0.0; N],
            len: 0,
        }
    }

    fn push(&mut self, v: f64) {
        if self.len < N {
            self.vals[self.len] = v;
            self.len += 1;
        }
    }

    fn extend<const M: usize>(&mut self, other: &Roots<M>) {
        for &v in other.as_slice() {
            self.push(v);
        }
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.vals[..self.len]
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.as_slice().iter().copied()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Divide every coefficient by the largest magnitude. `None` if all are zero.
fn normalized<const K: usize>(c: [f64; K]) -> Option<[f64; K]> {
    let scale = c.iter().fold(0.0_f64, |m, v| m.max(v.abs()));
    if scale == 0.0 || !scale.is_finite() {
        return None;
    }
    Some(c.map(|v| v / scale))
}

/// Evaluate a polynomial and its derivative at `x`.
fn eval(c: &[f64], x: f64) -> (f64, f64) {
    let mut f = 0.0;
    let mut df = 0.0;
    for &coef in c.iter().rev() {
        df = df * x + f;
        f = f * x + coef;
    }
    (f, df)
}

/// Refine a root with a few Newton steps, keeping only steps that improve it.
pub fn polish(c: &[f64], mut x: f64) -> f64 {
    for _ in 0..POLISH_STEPS {
        let (f, df) = eval(c, x);
        if f == 0.0 || df == 0.0 {
            break;
        }
        let next = x - f / df;
        if !next.is_finite() || eval(c, next).0.abs() >= f.abs() {
            break;
        }
        x = next;
    }
    x
}

/// Real roots of `c[0] + c[1]·x + c[2]·x²`; a double root is reported once.
pub fn solve_quadratic(c: [f64; 3]) -> Roots<2> {
    let mut out = Roots::new();
    let Some(c) = normalized(c) else {
        return out;
    };
    if is_zero(c[2]) {
        if !is_zero(c[1]) {
            out.push(-c[0] / c[1]);
        }
        return out;
    }
    // x² + 2px + q = 0
    let p = c[1] / (2.0 * c[2]);
    let q = c[0] / c[2];
    let d = p * p - q;
    if is_zero(d) {
        out.push(-p);
    } else if d > 0.0 {
        let sqrt_d = d.sqrt();
        out.push(sqrt_d - p);
        out.push(-sqrt_d - p);
    }
    out
}

/// Real roots of `c[0] + c[1]·x + c[2]·x² + c[3]·x³`.
pub fn solve_cubic(c: [f64; 4]) -> Roots<3> {
    let mut out = Roots::new();
    let Some(c) = normalized(c) else {
        return out;
    };
    if is_zero(c[3]) {
        out.extend(&solve_quadratic([c[0], c[1], c[2]]));
        return out;
    }
    // x³ + Ax² + Bx + C = 0
    let a = c[2] / c[3];
    let b = c[1] / c[3];
    let cc = c[0] / c[3];
    // substitute x = y - A/3: y³ + 3py + 2q = 0
    let sq_a = a * a;
    let p = (-sq_a / 3.0 + b) / 3.0;
    let q = (2.0 / 27.0 * a * sq_a - a * b / 3.0 + cc) / 2.0;
    let cb_p = p * p * p;
    let d = q * q + cb_p;

    let mut ys = Roots::<3>::new();
    if is_zero(d) {
        if is_zero(q) {
            // one triple root
            ys.push(0.0);
        } else {
            // one single and one double root
            let u = (-q).cbrt();
            ys.push(2.0 * u);
            ys.push(-u);
        }
    } else if d < 0.0 {
        // casus irreducibilis: three real roots
        let phi = (-q / (-cb_p).sqrt()).clamp(-1.0, 1.0).acos() / 3.0;
        let t = 2.0 * (-p).sqrt();
        ys.push(t * phi.cos());
        ys.push(-t * (phi + PI / 3.0).cos());
        ys.push(-t * (phi - PI / 3.0).cos());
    } else {
        let sqrt_d = d.sqrt();
        let u = (sqrt_d - q).cbrt();
        let v = -(sqrt_d + q).cbrt();
        ys.push(u + v);
    }

    let sub = a / 3.0;
    for y in ys.iter() {
        out.push(polish(&c, y - sub));
    }
    out
}

/// Real roots of `c[0] + c[1]·x + … + c[4]·x⁴`.
pub fn solve_quartic(c: [f64; 5]) -> Roots<4> {
    let mut out = Roots::new();
    let Some(c) = normalized(c) else {
        return out;
    };
    if is_zero(c[4]) {
        out.extend(&solve_cubic([c[0], c[1], c[2], c[3]]));
        return out;
    }
    // x⁴ + Ax³ + Bx² + Cx + D = 0
    let a = c[3] / c[4];
    let b = c[2] / c[4];
    let cc = c[1] / c[4];
    let d = c[0] / c[4];
    // substitute x = y - A/4: y⁴ + py² + qy + r = 0
    let sq_a = a * a;
    let p = -3.0 / 8.0 * sq_a + b;
    let q = sq_a * a / 8.0 - a * b / 2.0 + cc;
    let r = -3.0 / 256.0 * sq_a * sq_a + sq_a * b / 16.0 - a * cc / 4.0 + d;

    let mut ys = Roots::<4>::new();
    if is_zero(r) {
        // y(y³ + py + q) = 0
        ys.extend(&solve_cubic([q, p, 0.0, 1.0]));
        ys.push(0.0);
    } else {
        // one real root of the resolvent cubic...
        let resolvent = solve_cubic([r * p / 2.0 - q * q / 8.0, -r, -p / 2.0, 1.0]);
        let Some(z) = resolvent.iter().next() else {
            return out;
        };
        // ...splits the quartic into two quadratics
        let mut u = z * z - r;
        let mut v = 2.0 * z - p;
        if is_zero(u) {
            u = 0.0;
        } else if u > 0.0 {
            u = u.sqrt();
        } else {
            return out;
        }
        if is_zero(v) {
            v = 0.0;
        } else if v > 0.0 {
            v = v.sqrt();
        } else {
            return out;
        }
        let first = solve_quadratic([z - u, if q < 0.0 { -v } else { v }, 1.0]);
        let second = solve_quadratic([z + u, if q < 0.0 { v } else { -v }, 1.0]);
        ys.extend(&first);
        ys.extend(&second);
    }

    let sub = a / 4.0;
    for y in ys.iter() {
        out.push(polish(&c, y - sub));
    }
    out
}
