#![warn(missing_docs)]
//! Statistics engine for benchmark comparison.
//!
//! Provides the machinery `benchstat` needs to decide whether two sets
//! of benchmark runs actually differ:
//! - Weighted samples with quantiles, IQR outlier filtering, and the
//!   usual moment statistics
//! - Student's t-tests: one-sample, paired, pooled two-sample, and
//!   Welch unequal-variance two-sample
//! - The Mann-Whitney U-test, with the exact null distribution of U
//!   even in the presence of ties
//! - The hypergeometric and normal distributions backing the above
//!
//! Everything here is pure computation over caller-owned data: no
//! global state, no I/O, and no randomness.

mod dist;
mod error;
mod hyperdist;
mod mathx;
mod normal;
mod sample;
mod tdist;
mod ttest;
mod udist;
mod utest;

pub use dist::{Continuous, Discrete};
pub use error::TestError;
pub use hyperdist::Hypergeometric;
pub use mathx::{beta, betainc, bisect, lchoose, ln_gamma, series};
pub use normal::Normal;
pub use sample::{bounds, geo_mean, mean, std_dev, variance, Sample};
pub use tdist::TDist;
pub use ttest::{
    one_sample_t_test, paired_t_test, two_sample_t_test, two_sample_welch_t_test, Alternative,
    TTestResult,
};
pub use udist::UDist;
pub use utest::{mann_whitney_u_test, mann_whitney_u_test_with, UTestMethod, UTestResult};

#[cfg(test)]
pub(crate) mod testutil {
    /// Reports whether expect and got agree to 8 significant figures.
    pub fn aeq(expect: f64, got: f64) -> bool {
        let (expect, got) = if expect < 0.0 && got < 0.0 {
            (-expect, -got)
        } else {
            (expect, got)
        };
        expect * 0.99999999 <= got && got * 0.99999999 <= expect
    }
}
