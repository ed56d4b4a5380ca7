//! Grouping of parsed measurements into per-benchmark samples.

use std::collections::HashMap;

use benchstat_stats::{bounds, mean, Sample};

use crate::parse::parse;

/// Identifies one metric (e.g. `ns/op`) from one benchmark in one
/// configuration (input file).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BenchKey {
    /// Configuration name; the input file path.
    pub config: String,
    /// Benchmark name, without the `Benchmark` prefix.
    pub benchmark: String,
    /// Metric unit.
    pub unit: String,
}

/// The measurements along one axis (e.g. ns/op or MB/s) for all runs
/// of a specific benchmark, with derived statistics of the values that
/// survive outlier filtering.
#[derive(Debug, Clone, Default)]
pub struct BenchStat {
    /// Metric unit.
    pub unit: String,
    /// Raw measured values, in input order.
    pub values: Vec<f64>,
    /// Values with Tukey outliers removed.
    pub r_values: Vec<f64>,
    /// Minimum of `r_values`.
    pub min: f64,
    /// Mean of `r_values`.
    pub mean: f64,
    /// Maximum of `r_values`.
    pub max: f64,
}

impl BenchStat {
    /// Updates the derived statistics from the raw values.
    pub fn compute(&mut self) {
        let filtered = Sample::from_values(self.values.clone()).filter_outliers();
        self.r_values = filtered.xs;
        let (min, max) = bounds(&self.r_values);
        self.min = min;
        self.max = max;
        self.mean = mean(&self.r_values);
    }
}

/// All benchmark statistics read from a set of input files.
///
/// `configs`, `benchmarks`, and `units` record first-seen order so the
/// output tables match the order benchmarks were run in.
#[derive(Debug, Default)]
pub struct Collection {
    /// Per-(config, benchmark, unit) statistics.
    pub stats: HashMap<BenchKey, BenchStat>,
    /// Configuration (file) names, in input order.
    pub configs: Vec<String>,
    /// Benchmark names, in first-seen order.
    pub benchmarks: Vec<String>,
    /// Units, in first-seen order.
    pub units: Vec<String>,
}

fn add_string(list: &mut Vec<String>, s: &str) {
    if !list.iter().any(|x| x == s) {
        list.push(s.to_string());
    }
}

impl Collection {
    /// Creates an empty collection.
    pub fn new() -> Collection {
        Collection::default()
    }

    /// Returns the statistics slot for `key`, creating it (and
    /// registering the key's components) if absent.
    pub fn add_stat(&mut self, key: BenchKey) -> &mut BenchStat {
        if !self.stats.contains_key(&key) {
            add_string(&mut self.configs, &key.config);
            add_string(&mut self.benchmarks, &key.benchmark);
            add_string(&mut self.units, &key.unit);
        }
        self.stats.entry(key).or_insert_with_key(|k| BenchStat {
            unit: k.unit.clone(),
            ..BenchStat::default()
        })
    }

    /// Parses `text` as the benchmark output of configuration `config`
    /// and folds its measurements in.
    pub fn add_file(&mut self, config: &str, text: &str) {
        add_string(&mut self.configs, config);
        for m in parse(text) {
            let key = BenchKey {
                config: config.to_string(),
                benchmark: m.benchmark,
                unit: m.unit,
            };
            self.add_stat(key).values.push(m.value);
        }
    }

    /// Recomputes the derived statistics of every entry.
    pub fn compute_stats(&mut self) {
        for stat in self.stats.values_mut() {
            stat.compute();
        }
    }

    /// Looks up the statistics for one (config, benchmark, unit)
    /// triple.
    pub fn get(&self, config: &str, benchmark: &str, unit: &str) -> Option<&BenchStat> {
        self.stats.get(&BenchKey {
            config: config.to_string(),
            benchmark: benchmark.to_string(),
            unit: unit.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(files: &[(&str, &str)]) -> Collection {
        let mut c = Collection::new();
        for (config, text) in files {
            c.add_file(config, text);
        }
        c.compute_stats();
        c
    }

    #[test]
    fn groups_by_key_in_seen_order() {
        let c = collect(&[
            (
                "old.txt",
                "BenchmarkB 10 100 ns/op\nBenchmarkA 10 50 ns/op 4 B/op\nBenchmarkB 10 102 ns/op\n",
            ),
            ("new.txt", "BenchmarkB 10 90 ns/op\n"),
        ]);

        assert_eq!(c.configs, vec!["old.txt", "new.txt"]);
        assert_eq!(c.benchmarks, vec!["B", "A"]);
        assert_eq!(c.units, vec!["ns/op", "B/op"]);

        let b = c.get("old.txt", "B", "ns/op").unwrap();
        assert_eq!(b.values, vec![100.0, 102.0]);
        assert_eq!(b.mean, 101.0);
        assert_eq!((b.min, b.max), (100.0, 102.0));

        let a = c.get("old.txt", "A", "B/op").unwrap();
        assert_eq!(a.values, vec![4.0]);
    }

    #[test]
    fn outliers_leave_r_values() {
        let text = "BenchmarkX 10 100 ns/op\nBenchmarkX 10 101 ns/op\nBenchmarkX 10 102 ns/op\nBenchmarkX 10 103 ns/op\nBenchmarkX 10 104 ns/op\nBenchmarkX 10 5000 ns/op\n";
        let c = collect(&[("f.txt", text)]);
        let x = c.get("f.txt", "X", "ns/op").unwrap();
        assert_eq!(x.values.len(), 6);
        assert_eq!(x.r_values.len(), 5);
        assert_eq!(x.max, 104.0);
        assert!((x.mean - 102.0).abs() < 1e-12);
    }

    #[test]
    fn empty_file_still_registers_config() {
        let c = collect(&[("empty.txt", "PASS\n")]);
        assert_eq!(c.configs, vec!["empty.txt"]);
        assert!(c.stats.is_empty());
    }
}
