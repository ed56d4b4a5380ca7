//! The hypergeometric distribution.

use crate::dist::Discrete;
use crate::mathx::lchoose;

/// A hypergeometric distribution: the number of successes among `draws`
/// draws, without replacement, from a population of `n` items of which
/// `k` are successes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hypergeometric {
    /// Population size.
    pub n: i64,
    /// Successes in the population.
    pub k: i64,
    /// Number of draws.
    pub draws: i64,
}

impl Hypergeometric {
    fn support(&self) -> (i64, i64) {
        ((self.draws + self.k - self.n).max(0), self.draws.min(self.k))
    }

    fn pmf_at(&self, x: i64) -> f64 {
        // C(k,x)·C(n-k,draws-x)/C(n,draws), in log space.
        (lchoose(self.k, x) + lchoose(self.n - self.k, self.draws - x)
            - lchoose(self.n, self.draws))
        .exp()
    }
}

impl Discrete for Hypergeometric {
    fn pmf(&self, x: f64) -> f64 {
        let xi = x.floor() as i64;
        let (l, h) = self.support();
        if xi < l || xi > h {
            return 0.0;
        }
        self.pmf_at(xi)
    }

    fn cdf(&self, x: f64) -> f64 {
        let xi = x.floor() as i64;
        let (l, h) = self.support();
        if xi < l {
            return 0.0;
        }
        if xi >= h {
            return 1.0;
        }
        // Sum whichever tail requires less computation.
        if xi - l <= h - xi {
            let mut p = 0.0;
            for i in l..=xi {
                p += self.pmf_at(i);
            }
            p
        } else {
            let mut p = 1.0;
            for i in (xi + 1)..=h {
                p -= self.pmf_at(i);
            }
            p
        }
    }

    fn step(&self) -> f64 {
        1.0
    }

    fn bounds(&self) -> (f64, f64) {
        let (l, h) = self.support();
        (l as f64, h as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::aeq;

    #[test]
    fn pmf_matches_binomial_ratios() {
        // C(10,4) = 210 draws of 4 from {3 successes, 7 failures}.
        let d = Hypergeometric { n: 10, k: 3, draws: 4 };
        assert!(aeq(d.pmf(0.0), 35.0 / 210.0));
        assert!(aeq(d.pmf(1.0), 105.0 / 210.0));
        assert!(aeq(d.pmf(2.0), 63.0 / 210.0));
        assert!(aeq(d.pmf(3.0), 7.0 / 210.0));
        assert_eq!(d.pmf(4.0), 0.0);
        assert_eq!(d.pmf(-1.0), 0.0);
        // Rounds down to the nearest defined point.
        assert!(aeq(d.pmf(1.9), d.pmf(1.0)));
    }

    #[test]
    fn cdf_accumulates_pmf() {
        let d = Hypergeometric { n: 10, k: 3, draws: 4 };
        assert_eq!(d.cdf(-0.5), 0.0);
        assert!(aeq(d.cdf(0.0), 35.0 / 210.0));
        assert!(aeq(d.cdf(1.0), 140.0 / 210.0));
        assert!(aeq(d.cdf(2.0), 203.0 / 210.0));
        assert_eq!(d.cdf(3.0), 1.0);
        assert_eq!(d.cdf(100.0), 1.0);
    }

    #[test]
    fn truncated_support() {
        // Drawing 4 from {4 successes, 2 failures} forces at least 2
        // successes.
        let d = Hypergeometric { n: 6, k: 4, draws: 4 };
        assert_eq!(d.bounds(), (2.0, 4.0));
        assert_eq!(d.cdf(1.0), 0.0);
        assert!(aeq(d.pmf(2.0), 6.0 / 15.0));
        assert!(aeq(d.pmf(3.0), 8.0 / 15.0));
        assert!(aeq(d.pmf(4.0), 1.0 / 15.0));
        let total: f64 = (2..=4).map(|x| d.pmf(x as f64)).sum();
        assert!(aeq(total, 1.0));
    }

    #[test]
    fn large_population_mass_sums_to_one() {
        let d = Hypergeometric { n: 1000, k: 130, draws: 60 };
        let (l, h) = d.support();
        let total: f64 = (l..=h).map(|x| d.pmf_at(x)).sum();
        assert!((total - 1.0).abs() < 1e-12);
        assert!((d.cdf(h as f64) - 1.0).abs() < 1e-12);
    }
}
