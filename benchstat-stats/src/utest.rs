//! The Mann-Whitney U-test.

use std::cmp::Ordering;

use crate::dist::{Continuous, Discrete};
use crate::error::TestError;
use crate::normal::Normal;
use crate::ttest::Alternative;
use crate::udist::UDist;

/// Largest n1·n2 for which the exact null distribution is computed by
/// default; beyond it the normal approximation takes over.
const EXACT_LIMIT: usize = 100_000;

/// Selects how the U statistic is converted into a p-value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UTestMethod {
    /// Exact while n1·n2 stays tractable, normal approximation beyond.
    #[default]
    Auto,
    /// Always the exact null distribution.
    Exact,
    /// Always the tie-corrected normal approximation.
    NormalApprox,
}

/// The outcome of a Mann-Whitney U-test.
#[derive(Debug, Clone, PartialEq)]
pub struct UTestResult {
    /// First sample size.
    pub n1: usize,
    /// Second sample size.
    pub n2: usize,
    /// The smaller of the two U statistics. Half-integral when the
    /// pooled sample has ties.
    pub u: f64,
    /// The alternative hypothesis the p-value answers.
    pub alt: Alternative,
    /// The p-value, in [0, 1].
    pub p: f64,
}

/// Performs a Mann-Whitney U-test (Wilcoxon rank-sum test) of the null
/// hypothesis that the two samples come from the same population
/// against the given alternative.
pub fn mann_whitney_u_test(
    x: &[f64],
    y: &[f64],
    alt: Alternative,
) -> Result<UTestResult, TestError> {
    mann_whitney_u_test_with(x, y, alt, UTestMethod::Auto)
}

/// Like [`mann_whitney_u_test`], with explicit control over the exact
/// versus normal-approximation trade-off.
pub fn mann_whitney_u_test_with(
    x: &[f64],
    y: &[f64],
    alt: Alternative,
    method: UTestMethod,
) -> Result<UTestResult, TestError> {
    let (n1, n2) = (x.len(), y.len());
    if n1 == 0 || n2 == 0 {
        return Err(TestError::SampleSize);
    }

    let mut x1 = x.to_vec();
    let mut x2 = y.to_vec();
    x1.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    x2.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    let (merged, labels) = labeled_merge(&x1, &x2);

    // Rank the pooled sample, assigning every member of a tie group the
    // arithmetic mean of the group's 1-based positions, and collect the
    // tie group sizes.
    let mut r1 = 0.0;
    let mut ties = Vec::new();
    let mut i = 0;
    while i < merged.len() {
        let rank1 = i + 1;
        let v = merged[i];
        let mut nx1 = 0usize;
        while i < merged.len() && merged[i] == v {
            if labels[i] {
                nx1 += 1;
            }
            i += 1;
        }
        if nx1 != 0 {
            let rank = (i + rank1) as f64 / 2.0;
            r1 += rank * nx1 as f64;
        }
        ties.push(i - rank1 + 1);
    }
    if ties.len() == 1 {
        return Err(TestError::SamplesEqual);
    }

    let u1 = r1 - (n1 * (n1 + 1)) as f64 / 2.0;
    let u2 = (n1 * n2) as f64 - u1;
    let u = u1.min(u2);

    let exact = match method {
        UTestMethod::Exact => true,
        UTestMethod::NormalApprox => false,
        UTestMethod::Auto => n1 * n2 <= EXACT_LIMIT,
    };

    let p = if exact {
        let has_ties = ties.iter().any(|&t| t > 1);
        let dist = UDist {
            n1,
            n2,
            ties: if has_ties { ties } else { Vec::new() },
        };
        let step = dist.step();
        match alt {
            Alternative::TwoSided => {
                let low = dist.cdf(u);
                let high = 1.0 - dist.cdf(u - step);
                (2.0 * low.min(high)).clamp(0.0, 1.0)
            }
            Alternative::Less => dist.cdf(u1),
            Alternative::Greater => 1.0 - dist.cdf(u1 - step),
        }
    } else {
        // Normal approximation with the tie correction on the variance.
        let (n1f, n2f) = (n1 as f64, n2 as f64);
        let n = n1f + n2f;
        let tie_sum: f64 = ties
            .iter()
            .map(|&t| {
                let t = t as f64;
                t * t * t - t
            })
            .sum();
        let mu = n1f * n2f / 2.0;
        let sigma2 =
            n1f * n2f * (n + 1.0) / 12.0 - n1f * n2f * tie_sum / (12.0 * n * (n - 1.0));
        let dist = Normal {
            mu,
            sigma: sigma2.sqrt(),
        };
        match alt {
            Alternative::TwoSided => {
                let c = dist.cdf(u);
                (2.0 * c.min(1.0 - c)).clamp(0.0, 1.0)
            }
            Alternative::Less => dist.cdf(u1),
            Alternative::Greater => 1.0 - dist.cdf(u1),
        }
    };

    Ok(UTestResult { n1, n2, u, alt, p })
}

/// Merges two ascending slices, labeling which elements came from the
/// first.
fn labeled_merge(x1: &[f64], x2: &[f64]) -> (Vec<f64>, Vec<bool>) {
    let mut merged = Vec::with_capacity(x1.len() + x2.len());
    let mut labels = Vec::with_capacity(x1.len() + x2.len());
    let (mut i, mut j) = (0, 0);
    while i < x1.len() || j < x2.len() {
        let take_first = j >= x2.len() || (i < x1.len() && x1[i] <= x2[j]);
        if take_first {
            merged.push(x1[i]);
            labels.push(true);
            i += 1;
        } else {
            merged.push(x2[j]);
            labels.push(false);
            j += 1;
        }
    }
    (merged, labels)
}
