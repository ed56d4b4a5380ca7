//! Student's t-distribution.

use crate::dist::Continuous;
use crate::mathx::{betainc, ln_gamma};

/// A Student's t-distribution with `v` degrees of freedom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TDist {
    /// Degrees of freedom; need not be integral.
    pub v: f64,
}

impl Continuous for TDist {
    fn pdf(&self, x: f64) -> f64 {
        let v = self.v;
        (ln_gamma((v + 1.0) / 2.0) - ln_gamma(v / 2.0)).exp() / (v * std::f64::consts::PI).sqrt()
            * (1.0 + x * x / v).powf(-(v + 1.0) / 2.0)
    }

    fn cdf(&self, x: f64) -> f64 {
        let v = self.v;
        if x > 0.0 {
            1.0 - 0.5 * betainc(v / (v + x * x), v / 2.0, 0.5)
        } else if x < 0.0 {
            1.0 - self.cdf(-x)
        } else if x == 0.0 {
            0.5
        } else {
            f64::NAN
        }
    }

    fn bounds(&self) -> (f64, f64) {
        (-4.0, 4.0)
    }
}
