//! Numeric building blocks: log-gamma, the regularized incomplete beta
//! function, log-binomials, bisection, and series summation.

use crate::error::TestError;

/// Lanczos coefficients, g = 7.
const LANCZOS: [f64; 9] = [
    0.999_999_999_999_809_93,
    676.520_368_121_885_1,
    -1_259.139_216_722_402_8,
    771.323_428_777_653_13,
    -176.615_029_162_140_59,
    12.507_343_278_686_905,
    -0.138_571_095_265_720_12,
    9.984_369_578_019_571_6e-6,
    1.505_632_735_149_311_6e-7,
];

/// Returns ln |Γ(x)| via the Lanczos approximation.
pub fn ln_gamma(x: f64) -> f64 {
    if x < 0.5 {
        // Reflection formula.
        let pi = std::f64::consts::PI;
        return (pi / (pi * x).sin()).ln() - ln_gamma(1.0 - x);
    }

    let x = x - 1.0;
    let mut acc = LANCZOS[0];
    let t = x + 7.5; // g + 0.5
    for (i, &c) in LANCZOS.iter().enumerate().skip(1) {
        acc += c / (x + i as f64);
    }
    0.5 * (2.0 * std::f64::consts::PI).ln() + (x + 0.5) * t.ln() - t + acc.ln()
}

/// Returns the complete beta function B(a, b).
pub fn beta(a: f64, b: f64) -> f64 {
    // B(a,b) = Γ(a)Γ(b) / Γ(a+b)
    (ln_gamma(a) + ln_gamma(b) - ln_gamma(a + b)).exp()
}

/// Returns the regularized incomplete beta function Iₓ(a, b).
///
/// The "incomplete beta function" itself is `betainc(x, a, b) * beta(a, b)`.
pub fn betainc(x: f64, a: f64, b: f64) -> f64 {
    // Continued fraction expansion of I:
    //
    //  (xᵃ(1-x)ᵇ)/(a·B(a,b)) · (1/(1+(d₁/(1+(d₂/(1+…))))))
    //
    // with
    //
    //  d_{2m+1} = -(a+m)(a+b+m)x/((a+2m)(a+2m+1))
    //  d_{2m}   = m(b-m)x/((a+2m-1)(a+2m))
    assert!((0.0..=1.0).contains(&x), "betainc: x must be in [0, 1]");
    let mut bt = 0.0;
    if 0.0 < x && x < 1.0 {
        // Prefactor of the continued fraction.
        bt = (ln_gamma(a + b) - ln_gamma(a) - ln_gamma(b) + a * x.ln() + b * (1.0 - x).ln()).exp();
    }
    if x < (a + 1.0) / (a + b + 2.0) {
        bt * betacf(x, a, b) / a
    } else {
        // Symmetry transform converges faster on the other side.
        1.0 - bt * betacf(1.0 - x, b, a) / b
    }
}

/// Continued fraction component of the regularized incomplete beta
/// function, evaluated by the modified Lentz method.
fn betacf(x: f64, a: f64, b: f64) -> f64 {
    const MAX_ITERATIONS: usize = 200;
    const EPSILON: f64 = 3e-14;

    fn raise_zero(z: f64) -> f64 {
        if z.abs() < f64::MIN_POSITIVE {
            f64::MIN_POSITIVE
        } else {
            z
        }
    }

    let mut c = 1.0;
    let mut d = 1.0 / raise_zero(1.0 - (a + b) * x / (a + 1.0));
    let mut h = d;
    for m in 1..=MAX_ITERATIONS {
        let mf = m as f64;

        // Even step of the recurrence.
        let mut numer = mf * (b - mf) * x / ((a + 2.0 * mf - 1.0) * (a + 2.0 * mf));
        d = 1.0 / raise_zero(1.0 + numer * d);
        c = raise_zero(1.0 + numer / c);
        h *= d * c;

        // Odd step of the recurrence.
        numer = -(a + mf) * (a + b + mf) * x / ((a + 2.0 * mf) * (a + 2.0 * mf + 1.0));
        d = 1.0 / raise_zero(1.0 + numer * d);
        c = raise_zero(1.0 + numer / c);
        let hfac = d * c;
        h *= hfac;

        if (hfac - 1.0).abs() < EPSILON {
            return h;
        }
    }
    panic!("betainc: a or b too big; failed to converge");
}

/// Returns ln C(n, k), the log of the binomial coefficient, or -∞ when
/// `k` lies outside `[0, n]`.
pub fn lchoose(n: i64, k: i64) -> f64 {
    if k < 0 || k > n {
        return f64::NEG_INFINITY;
    }
    ln_gamma((n + 1) as f64) - ln_gamma((k + 1) as f64) - ln_gamma((n - k + 1) as f64)
}

fn sign(x: f64) -> i32 {
    if x == 0.0 {
        0
    } else if x < 0.0 {
        -1
    } else {
        1
    }
}

/// Finds an x in `[low, high]` such that |f(x)| ≤ `tolerance` using the
/// bisection method.
///
/// `f(low)` and `f(high)` must have opposite signs; otherwise a
/// [`TestError::Bracketing`] is returned.
///
/// If f has no root in the interval (e.g. it is discontiguous), this
/// returns the x of the apparent discontinuity and `false`.
pub fn bisect<F: Fn(f64) -> f64>(
    f: F,
    low: f64,
    high: f64,
    tolerance: f64,
) -> Result<(f64, bool), TestError> {
    let (mut low, mut high) = (low, high);
    let (mut flow, fhigh) = (f(low), f(high));
    if -tolerance <= flow && flow <= tolerance {
        return Ok((low, true));
    }
    if -tolerance <= fhigh && fhigh <= tolerance {
        return Ok((high, true));
    }
    if sign(flow) == sign(fhigh) {
        return Err(TestError::Bracketing { low, high });
    }
    loop {
        let mid = (high + low) / 2.0;
        let fmid = f(mid);
        if -tolerance <= fmid && fmid <= tolerance {
            return Ok((mid, true));
        }
        if mid == high || mid == low {
            return Ok((mid, false));
        }
        if sign(fmid) == sign(flow) {
            low = mid;
            flow = fmid;
        } else {
            high = mid;
        }
    }
}

/// Returns the sum of the series f(0) + f(1) + …, accumulated until the
/// partial sum no longer changes at double precision.
pub fn series<F: Fn(f64) -> f64>(f: F) -> f64 {
    let (mut y, mut yp) = (0.0, 1.0);
    let mut n = 0.0;
    while y != yp {
        yp = y;
        y += f(n);
        n += 1.0;
    }
    y
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::aeq;

    #[test]
    fn ln_gamma_known_values() {
        assert!(aeq(ln_gamma(1.0).exp(), 1.0));
        assert!(aeq(ln_gamma(2.0).exp(), 1.0));
        assert!(aeq(ln_gamma(5.0), 24.0f64.ln()));
        // Γ(1/2) = √π
        assert!(aeq(ln_gamma(0.5), std::f64::consts::PI.sqrt().ln()));
        // Γ(-3/2) = 4√π/3
        assert!(aeq(
            ln_gamma(-1.5),
            (4.0 * std::f64::consts::PI.sqrt() / 3.0).ln()
        ));
    }

    #[test]
    fn beta_known_values() {
        // B(a, b) = (a-1)!(b-1)!/(a+b-1)! for integers
        assert!(aeq(beta(1.0, 1.0), 1.0));
        assert!(aeq(beta(2.0, 3.0), 1.0 / 12.0));
        assert!(aeq(beta(0.5, 0.5), std::f64::consts::PI));
    }

    #[test]
    fn betainc_endpoints_and_symmetry() {
        assert_eq!(betainc(0.0, 2.0, 3.0), 0.0);
        assert_eq!(betainc(1.0, 2.0, 3.0), 1.0);
        assert!(aeq(betainc(0.5, 0.5, 0.5), 0.5));
        for &(x, a, b) in &[(0.25, 2.0, 3.0), (0.75, 1.5, 0.5), (0.1, 4.0, 2.0)] {
            let lhs = betainc(x, a, b);
            let rhs = 1.0 - betainc(1.0 - x, b, a);
            assert!(aeq(lhs, rhs), "I_x({a},{b}) asymmetric: {lhs} vs {rhs}");
        }
        // I_x(1, b) has the closed form 1 - (1-x)^b.
        assert!(aeq(betainc(0.3, 1.0, 4.0), 1.0 - 0.7f64.powi(4)));
    }

    #[test]
    fn lchoose_matches_binomials() {
        assert!(aeq(lchoose(5, 2).exp(), 10.0));
        assert!(aeq(lchoose(10, 5).exp(), 252.0));
        assert!(aeq(lchoose(4, 0).exp(), 1.0));
        assert_eq!(lchoose(4, 5), f64::NEG_INFINITY);
        assert_eq!(lchoose(4, -1), f64::NEG_INFINITY);
    }

    #[test]
    fn bisect_finds_roots() {
        let (x, ok) = bisect(|x| x * x - 2.0, 0.0, 2.0, 1e-12).unwrap();
        assert!(ok);
        assert!((x - std::f64::consts::SQRT_2).abs() < 1e-6);

        // Endpoint already within tolerance.
        let (x, ok) = bisect(|x| x, 0.0, 1.0, 1e-12).unwrap();
        assert!(ok);
        assert_eq!(x, 0.0);

        // Discontinuity: sign change with no root.
        let (x, ok) = bisect(|x| if x < 0.5 { -1.0 } else { 1.0 }, 0.0, 1.0, 1e-12).unwrap();
        assert!(!ok);
        assert!((x - 0.5).abs() < 1e-9);
    }

    #[test]
    fn bisect_rejects_unbracketed_roots() {
        let err = bisect(|x| x * x + 1.0, -1.0, 1.0, 1e-12).unwrap_err();
        assert!(matches!(err, TestError::Bracketing { .. }));
    }

    #[test]
    fn series_sums_to_roundoff() {
        // Σ 2⁻ⁿ = 2
        assert_eq!(series(|n| 0.5f64.powf(n)), 2.0);
        // Σ 1/n! = e
        let fact = |n: f64| (1..=(n as u64)).map(|i| i as f64).product::<f64>();
        assert!(aeq(series(|n| 1.0 / fact(n)), std::f64::consts::E));
    }
}
