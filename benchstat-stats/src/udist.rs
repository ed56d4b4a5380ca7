//! The exact null distribution of the Mann-Whitney U statistic.

use fxhash::FxHashMap;

use crate::dist::Discrete;
use crate::hyperdist::Hypergeometric;

/// The discrete probability distribution of the Mann-Whitney U
/// statistic for a pair of samples of sizes `n1` and `n2`.
///
/// Without ties the distribution follows Mann, Henry B.; Whitney,
/// Donald R. (1947), "On a Test of Whether one of Two Random Variables
/// is Stochastically Larger than the Other", Annals of Mathematical
/// Statistics 18 (1): 50-60. With ties it follows Cheung, Ying Kuen;
/// Klotz, Jerome H. (1997), "The Mann Whitney Wilcoxon Distribution
/// Using Linked Lists", Statistica Sinica 7: 805-813, with the details
/// that paper glosses over taken from Klotz (1966), "The Wilcoxon,
/// Ties, and the Computer".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UDist {
    /// Size of the first sample.
    pub n1: usize,
    /// Size of the second sample.
    pub n2: usize,
    /// Size of each tie group in the pooled ranking, in rank order.
    /// Empty means no ties, which is equivalent to n1+n2 groups of one.
    /// Otherwise the sizes must sum to n1+n2.
    pub ties: Vec<usize>,
}

/// Memoization key: (size of the first sample, 2·U).
type UKey = (i64, i64);

impl UDist {
    fn has_ties(&self) -> bool {
        self.ties.iter().any(|&t| t > 1)
    }

    /// Computes the tie-free p_{n1,n2} table for U from 0 through `u`
    /// inclusive, by dynamic programming over the Mann-Whitney
    /// recurrence
    ///
    ///   p_{n,m}(U) = (n·p_{n-1,m}(U-m) + m·p_{n,m-1}(U)) / (n+m)
    ///   p_{n,m}(U) = 0                             if U < 0
    ///   p_{0,m}(U) = p_{n,0}(U) = 1/C(n+m, n)      if U = 0
    ///                           = 0                if U > 0
    ///
    /// p_{n,m} only depends on p_{n-1,m} and p_{n,m-1}, so one row per
    /// n suffices, rewritten in place from the largest U downward.
    /// p_{n,m} = p_{m,n}, so rows are kept for n ≤ m only and the
    /// mirrored row is read back off the current column when n = m.
    ///
    /// Runs in Θ(n1·n2·u) time, which is plenty fast for the sample
    /// sizes a benchmark comparison sees.
    fn tie_free_table(&self, u: usize) -> Vec<f64> {
        let (n, m) = if self.n1 <= self.n2 {
            (self.n1, self.n2)
        } else {
            (self.n2, self.n1)
        };

        let mut memo = vec![vec![0.0f64; u + 1]; n + 1];

        for mm in 0..=m {
            // p_{0,m} is zero except at U = 0.
            memo[0][0] = 1.0;

            for nn in 1..=n.min(mm) {
                // p_{n,m-1}; when n = m this is p_{m-1,n} by symmetry,
                // already rewritten for the current mm.
                let rp_row = if nn < mm { nn } else { mm - 1 };

                // For a given n and m, U is at most n·m.
                let ulim = (nn * mm).min(u);
                let nplusm = (nn + mm) as f64;
                for u1 in (0..=ulim).rev() {
                    let l = if u1 >= mm {
                        nn as f64 * memo[nn - 1][u1 - mm]
                    } else {
                        0.0
                    };
                    let r = mm as f64 * memo[rp_row][u1];
                    memo[nn][u1] = (l + r) / nplusm;
                }
            }
        }
        memo.swap_remove(n)
    }

    fn tied_cdf(&self, u: f64) -> f64 {
        if self.ties.len() < 2 {
            // One tie group covering the pool: every labeling yields
            // U = n1·n2/2.
            return if 2.0 * u >= (self.n1 * self.n2) as f64 {
                1.0
            } else {
                0.0
            };
        }
        let two_u = (2.0 * u).floor() as i64;
        let ties: Vec<i64> = self.ties.iter().map(|&t| t as i64).collect();
        let pr = cumulative_tables(two_u, self.n1 as i64, &ties);
        pr[ties.len()][&(self.n1 as i64, two_u)]
    }
}

/// Builds the memoization tables for Pr[2U ≤ `two_u`] over tie vector
/// `ties`, for a first sample of size `n1`.
///
/// The result is indexed by prefix length k; `table[k][(m1, v)]` is the
/// probability that a size-m1 sample ranked against the first k tie
/// groups has 2U ≤ v. The needed (m1, v) points are propagated downward
/// from the single query point at k = K, then probabilities are filled
/// back up: prefix length 2 reduces to a hypergeometric CDF, and each
/// longer prefix sums over how many observations land in its last tie
/// group, weighting the shorter-prefix probability by a hypergeometric
/// PMF. Points above the largest reachable 2U for their prefix
/// contribute certainty and need no table entry.
fn cumulative_tables(two_u: i64, n1: i64, ties: &[i64]) -> Vec<FxHashMap<UKey, f64>> {
    let cap_k = ties.len();

    // Rank-sum coefficients. a[0] is unused.
    let mut a = vec![0i64; cap_k + 1];
    a[1] = ties[0];
    for k in 2..=cap_k {
        a[k] = a[k - 1] + ties[k - 2] + ties[k - 1];
    }

    let mut pr: Vec<FxHashMap<UKey, f64>> = vec![FxHashMap::default(); cap_k + 1];
    pr[cap_k].insert((n1, two_u), 0.0);

    // Drive the recurrence downward from k = K to k = 2 to find every
    // argument pair it will need.
    let mut tsum: i64 = ties.iter().sum();
    for k in (2..cap_k).rev() {
        tsum -= ties[k];
        let mut level: FxHashMap<UKey, f64> = FxHashMap::default();
        for &(kn1, ktwo_u) in pr[k + 1].keys() {
            let rk_low = 0.max(kn1 - tsum);
            let rk_high = kn1.min(ties[k]);
            for rk in rk_low..=rk_high {
                let two_u_k = ktwo_u - rk * (a[k + 1] - 2 * kn1 + rk);
                let n1_k = kn1 - rk;
                if two_u_min(k, n1_k, ties, &a) <= two_u_k
                    && two_u_k <= two_u_max(k, n1_k, ties, &a)
                {
                    level.insert((n1_k, two_u_k), 0.0);
                }
            }
        }
        pr[k] = level;
    }

    // Fill probabilities bottom-up, unwinding the recurrence.

    // k = 2 base case: a two-group ranking is hypergeometric.
    let n_2 = ties[0] + ties[1];
    let keys: Vec<UKey> = pr[2].keys().copied().collect();
    for (kn1, ktwo_u) in keys {
        let x = (ktwo_u - kn1 * (ties[0] - kn1)) as f64 / n_2 as f64;
        let dist = Hypergeometric {
            n: n_2,
            k: ties[1],
            draws: kn1,
        };
        pr[2].insert((kn1, ktwo_u), dist.cdf(x));
    }

    let mut tsum = ties[0]; // always Σ ties[0..k-1]
    for k in 3..=cap_k {
        tsum += ties[k - 2];
        let n_k = tsum + ties[k - 1];

        let (head, tail) = pr.split_at_mut(k);
        let prev = &head[k - 1];
        let cur = &mut tail[0];

        let keys: Vec<UKey> = cur.keys().copied().collect();
        for (kn1, ktwo_u) in keys {
            let dist = Hypergeometric {
                n: n_k,
                k: ties[k - 1],
                draws: kn1,
            };
            let rk_low = 0.max(kn1 - tsum);
            let rk_high = kn1.min(ties[k - 1]);
            let mut prsum = 0.0;
            for rk in rk_low..=rk_high {
                let two_u_k = ktwo_u - rk * (a[k] - 2 * kn1 + rk);
                let n1_k = kn1 - rk;
                let lo = two_u_min(k - 1, n1_k, ties, &a);
                let hi = two_u_max(k - 1, n1_k, ties, &a);
                if lo <= two_u_k && two_u_k <= hi {
                    let sub = prev.get(&(n1_k, two_u_k)).copied().unwrap_or(0.0);
                    prsum += sub * dist.pmf(rk as f64);
                } else if hi < two_u_k {
                    prsum += dist.pmf(rk as f64);
                }
            }
            cur.insert((kn1, ktwo_u), prsum);
        }
    }

    pr
}

/// Smallest 2U reachable when `n1` observations are ranked against the
/// first `k` tie groups: fill groups greedily from the lowest ranks.
fn two_u_min(k: usize, n1: i64, ties: &[i64], a: &[i64]) -> i64 {
    let mut two_u = -n1 * n1;
    let mut rem = n1;
    for i in 1..=k {
        let take = rem.min(ties[i - 1]);
        two_u += take * a[i];
        rem -= take;
    }
    two_u
}

/// Largest reachable 2U: fill groups greedily from the highest ranks.
fn two_u_max(k: usize, n1: i64, ties: &[i64], a: &[i64]) -> i64 {
    let mut two_u = -n1 * n1;
    let mut rem = n1;
    for i in (1..=k).rev() {
        let take = rem.min(ties[i - 1]);
        two_u += take * a[i];
        rem -= take;
    }
    two_u
}

impl Discrete for UDist {
    fn pmf(&self, u: f64) -> f64 {
        let max = (self.n1 * self.n2) as f64;
        if u < 0.0 || u >= 0.5 + max {
            return 0.0;
        }

        if self.has_ties() {
            // The tied computation produces the CDF directly; take its
            // difference over one half-integer step.
            return self.cdf(u) - self.cdf(u - 0.5);
        }

        // Without ties U is integral.
        let ui = u.floor() as usize;
        self.tie_free_table(ui)[ui]
    }

    fn cdf(&self, u: f64) -> f64 {
        if u < 0.0 {
            return 0.0;
        }
        if u >= (self.n1 * self.n2) as f64 {
            return 1.0;
        }

        if self.has_ties() {
            return self.tied_cdf(u);
        }

        // Without ties the distribution is symmetric around
        // n1·n2/2; sum up whichever tail is smaller.
        let mut ui = u.floor() as usize;
        let flip = ui >= (self.n1 * self.n2 + 1) / 2;
        if flip {
            ui = self.n1 * self.n2 - ui - 1;
        }
        let table = self.tie_free_table(ui);
        let mut p: f64 = table[..=ui].iter().sum();
        if flip {
            p = 1.0 - p;
        }
        p
    }

    fn step(&self) -> f64 {
        if self.has_ties() {
            0.5
        } else {
            1.0
        }
    }

    fn bounds(&self) -> (f64, f64) {
        (0.0, (self.n1 * self.n2) as f64)
    }
}
