//! Student's t-tests.

use crate::dist::Continuous;
use crate::error::TestError;
use crate::sample::{mean, std_dev, Sample};
use crate::tdist::TDist;

/// The alternative hypothesis of a location test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alternative {
    /// The location of the first sample is less than the second's.
    Less,
    /// The locations differ.
    #[default]
    TwoSided,
    /// The location of the first sample is greater than the second's.
    Greater,
}

/// The outcome of a t-test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TTestResult {
    /// First sample size.
    pub n1: usize,
    /// Second sample size; equals `n1` for one-sample tests.
    pub n2: usize,
    /// The test statistic.
    pub t: f64,
    /// Degrees of freedom. Not necessarily an integer (Welch).
    pub dof: f64,
    /// The alternative hypothesis the p-value answers.
    pub alt: Alternative,
    /// The p-value, in [0, 1].
    pub p: f64,
}

fn make_result(n1: usize, n2: usize, t: f64, dof: f64, alt: Alternative) -> TTestResult {
    let dist = TDist { v: dof };
    let p = match alt {
        Alternative::TwoSided => {
            let c = dist.cdf(t);
            2.0 * c.min(1.0 - c)
        }
        Alternative::Less => dist.cdf(t),
        Alternative::Greater => 1.0 - dist.cdf(t),
    };
    TTestResult {
        n1,
        n2,
        t,
        dof,
        alt,
        p,
    }
}

/// Performs a one-sample t-test of the hypothesis that `x` is drawn
/// from a distribution with mean `mu0`.
pub fn one_sample_t_test(x: &Sample, mu0: f64, alt: Alternative) -> Result<TTestResult, TestError> {
    let n = x.weight();
    if n < 2.0 {
        return Err(TestError::SampleSize);
    }
    let v = x.variance();
    if v == 0.0 {
        return Err(TestError::ZeroVariance);
    }
    let dof = n - 1.0;
    let t = (x.mean() - mu0) * n.sqrt() / v.sqrt();
    Ok(make_result(
        x.xs.len(),
        x.xs.len(),
        t,
        dof,
        alt,
    ))
}

/// Performs a paired t-test on the per-pair differences of `x` and `y`
/// against the hypothesized mean shift `delta`.
pub fn paired_t_test(
    x: &[f64],
    y: &[f64],
    delta: f64,
    alt: Alternative,
) -> Result<TTestResult, TestError> {
    if x.len() != y.len() {
        return Err(TestError::MismatchedLength);
    }
    if x.len() <= 1 {
        return Err(TestError::SampleSize);
    }
    let dof = (x.len() - 1) as f64;

    let diff: Vec<f64> = x.iter().zip(y).map(|(a, b)| b - a - delta).collect();
    let sd = std_dev(&diff);
    if sd == 0.0 {
        return Err(TestError::ZeroVariance);
    }
    let t = mean(&diff) * (x.len() as f64).sqrt() / sd;
    Ok(make_result(x.len(), y.len(), t, dof, alt))
}

/// Performs a two-sample t-test assuming equal variances, pooling the
/// two sample variances.
pub fn two_sample_t_test(
    x: &Sample,
    y: &Sample,
    alt: Alternative,
) -> Result<TTestResult, TestError> {
    let (n1, n2) = (x.weight(), y.weight());
    if n1 < 2.0 || n2 < 2.0 {
        return Err(TestError::SampleSize);
    }
    let (v1, v2) = (x.variance(), y.variance());
    if v1 == 0.0 && v2 == 0.0 {
        return Err(TestError::ZeroVariance);
    }

    let dof = n1 + n2 - 2.0;
    let v12 = ((n1 - 1.0) * v1 + (n2 - 1.0) * v2) / dof;
    let t = (x.mean() - y.mean()) / (v12 * (1.0 / n1 + 1.0 / n2)).sqrt();
    Ok(make_result(x.xs.len(), y.xs.len(), t, dof, alt))
}

/// Performs a two-sample Welch t-test, which does not assume the
/// samples share a variance. Degrees of freedom follow the
/// Welch-Satterthwaite approximation.
pub fn two_sample_welch_t_test(
    x: &Sample,
    y: &Sample,
    alt: Alternative,
) -> Result<TTestResult, TestError> {
    let (n1, n2) = (x.weight(), y.weight());
    if n1 < 2.0 || n2 < 2.0 {
        return Err(TestError::SampleSize);
    }
    let (v1, v2) = (x.variance(), y.variance());
    if v1 == 0.0 && v2 == 0.0 {
        return Err(TestError::ZeroVariance);
    }

    let dof = (v1 / n1 + v2 / n2) * (v1 / n1 + v2 / n2)
        / ((v1 / n1) * (v1 / n1) / (n1 - 1.0) + (v2 / n2) * (v2 / n2) / (n2 - 1.0));
    let s = (v1 / n1 + v2 / n2).sqrt();
    let t = (x.mean() - y.mean()) / s;
    Ok(make_result(x.xs.len(), y.xs.len(), t, dof, alt))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::aeq;

    fn check(want: (f64, f64, f64), got: &TTestResult) {
        assert!(
            aeq(want.0, got.t) && aeq(want.1, got.p) && aeq(want.2, got.dof),
            "want T={} P={} DoF={}, got T={} P={} DoF={}",
            want.0,
            want.1,
            want.2,
            got.t,
            got.p,
            got.dof
        );
    }

    #[test]
    fn reference_values() {
        let s1 = Sample::from_values(vec![2.0, 1.0, 3.0, 4.0]);
        let s2 = Sample::from_values(vec![6.0, 5.0, 7.0, 9.0]);
        let alt = Alternative::TwoSided;

        let r = two_sample_t_test(&s1, &s1, alt).unwrap();
        check((0.0, 1.0, 6.0), &r);
        let r = two_sample_welch_t_test(&s1, &s1, alt).unwrap();
        check((0.0, 1.0, 6.0), &r);

        let r = two_sample_t_test(&s1, &s2, alt).unwrap();
        check((-3.9703446152237674, 0.0073640592242113214, 6.0), &r);
        let r = two_sample_welch_t_test(&s1, &s2, alt).unwrap();
        check(
            (-3.9703446152237674, 0.0085128631313781695, 5.584615384615385),
            &r,
        );

        let r = paired_t_test(&s1.xs, &s2.xs, 0.0, alt).unwrap();
        check((17.0, 0.00044334353831207749, 3.0), &r);

        let r = one_sample_t_test(&s1, 0.0, alt).unwrap();
        check((3.872983346207417, 0.030466291662170977, 3.0), &r);
        let r = one_sample_t_test(&s1, 2.5, alt).unwrap();
        check((0.0, 1.0, 3.0), &r);
    }

    #[test]
    fn p_is_symmetric_in_sample_order() {
        let s1 = Sample::from_values(vec![2.0, 1.0, 3.0, 4.0]);
        let s2 = Sample::from_values(vec![6.0, 5.0, 7.0, 9.0]);
        let fwd = two_sample_welch_t_test(&s1, &s2, Alternative::TwoSided).unwrap();
        let rev = two_sample_welch_t_test(&s2, &s1, Alternative::TwoSided).unwrap();
        assert!(aeq(fwd.p, rev.p));
        assert!(aeq(fwd.t, -rev.t));
    }

    #[test]
    fn one_sided_alternatives() {
        let s1 = Sample::from_values(vec![2.0, 1.0, 3.0, 4.0]);
        let s2 = Sample::from_values(vec![6.0, 5.0, 7.0, 9.0]);

        let less = two_sample_welch_t_test(&s1, &s2, Alternative::Less).unwrap();
        let greater = two_sample_welch_t_test(&s1, &s2, Alternative::Greater).unwrap();
        let two = two_sample_welch_t_test(&s1, &s2, Alternative::TwoSided).unwrap();
        assert!(aeq(less.p + greater.p, 1.0));
        assert!(aeq(two.p, 2.0 * less.p.min(greater.p)));
        // s1 sits below s2, so "less" should be the convincing side.
        assert!(less.p < 0.05 && greater.p > 0.95);
    }

    #[test]
    fn error_conditions() {
        let tiny = Sample::from_values(vec![1.0]);
        let ok = Sample::from_values(vec![1.0, 2.0, 3.0]);
        let flat = Sample::from_values(vec![5.0, 5.0, 5.0]);
        let alt = Alternative::TwoSided;

        assert_eq!(
            two_sample_welch_t_test(&tiny, &ok, alt).unwrap_err(),
            TestError::SampleSize
        );
        assert_eq!(
            two_sample_t_test(&ok, &tiny, alt).unwrap_err(),
            TestError::SampleSize
        );
        assert_eq!(
            two_sample_welch_t_test(&flat, &flat, alt).unwrap_err(),
            TestError::ZeroVariance
        );
        assert_eq!(
            one_sample_t_test(&flat, 5.0, alt).unwrap_err(),
            TestError::ZeroVariance
        );
        assert_eq!(
            paired_t_test(&[1.0, 2.0], &[1.0], 0.0, alt).unwrap_err(),
            TestError::MismatchedLength
        );
        assert_eq!(
            paired_t_test(&[1.0, 2.0], &[2.0, 3.0], 0.0, alt).unwrap_err(),
            TestError::ZeroVariance
        );
    }

    #[test]
    fn welch_dof_for_identical_samples() {
        // Equal sizes and variances collapse Welch-Satterthwaite to
        // 2(n-1) exactly.
        for n in 2..8 {
            let xs: Vec<f64> = (0..n).map(|i| i as f64).collect();
            let s = Sample::from_values(xs);
            let r = two_sample_welch_t_test(&s, &s, Alternative::TwoSided).unwrap();
            assert!(aeq(r.dof, 2.0 * (n as f64 - 1.0)));
            assert_eq!(r.t, 0.0);
            assert!(aeq(r.p, 1.0));
        }
    }
}
