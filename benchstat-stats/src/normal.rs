//! The normal (Gaussian) distribution.

use crate::dist::Continuous;
use crate::mathx::bisect;

/// 1/√(2π)
const INV_SQRT_2PI: f64 = 0.398_942_280_401_432_7;

/// A normal distribution with mean `mu` and standard deviation `sigma`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normal {
    /// Mean.
    pub mu: f64,
    /// Standard deviation.
    pub sigma: f64,
}

impl Normal {
    /// Returns the standard normal distribution (mu = 0, sigma = 1).
    pub fn standard() -> Normal {
        Normal {
            mu: 0.0,
            sigma: 1.0,
        }
    }

    /// Returns the x with Pr[X ≤ x] = `y`, for `y` ∈ [0, 1].
    ///
    /// Computed by bisection on the CDF over an expanding bracket, so
    /// its accuracy is bounded by the CDF's.
    pub fn inv_cdf(&self, y: f64) -> f64 {
        if !(0.0..=1.0).contains(&y) {
            return f64::NAN;
        }
        if y == 0.0 {
            return f64::NEG_INFINITY;
        }
        if y == 1.0 {
            return f64::INFINITY;
        }
        let f = |x: f64| self.cdf(x) - y;
        let mut radius = self.sigma;
        while f(self.mu - radius) > 0.0 || f(self.mu + radius) < 0.0 {
            radius *= 2.0;
        }
        let (x, _) = bisect(f, self.mu - radius, self.mu + radius, 1e-12)
            .expect("expanded bracket straddles the target probability");
        x
    }
}

/// Error function approximation (Abramowitz and Stegun 7.1.26,
/// |error| ≤ 1.5e-7).
fn erf(x: f64) -> f64 {
    const A1: f64 = 0.254829592;
    const A2: f64 = -0.284496736;
    const A3: f64 = 1.421413741;
    const A4: f64 = -1.453152027;
    const A5: f64 = 1.061405429;
    const P: f64 = 0.3275911;

    let sign = if x < 0.0 { -1.0 } else { 1.0 };
    let x = x.abs();

    let t = 1.0 / (1.0 + P * x);
    let y = 1.0 - (((((A5 * t + A4) * t) + A3) * t + A2) * t + A1) * t * (-x * x).exp();

    sign * y
}

impl Continuous for Normal {
    fn pdf(&self, x: f64) -> f64 {
        let z = x - self.mu;
        (-z * z / (2.0 * self.sigma * self.sigma)).exp() * INV_SQRT_2PI / self.sigma
    }

    fn cdf(&self, x: f64) -> f64 {
        (1.0 + erf((x - self.mu) / (self.sigma * std::f64::consts::SQRT_2))) / 2.0
    }

    fn bounds(&self) -> (f64, f64) {
        const STDDEVS: f64 = 3.0;
        (
            self.mu - STDDEVS * self.sigma,
            self.mu + STDDEVS * self.sigma,
        )
    }
}
