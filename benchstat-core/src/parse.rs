//! Parsing of benchmark run output.
//!
//! The input is a stream of lines of the form
//!
//! ```text
//! BenchmarkName  <iterations>  <value> <unit> [<value> <unit> ...]
//! ```
//!
//! Anything else (build output, log lines, PASS/FAIL trailers) is
//! ignored.

use std::sync::OnceLock;

use regex::Regex;

/// One (value, unit) pair read from a benchmark line.
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    /// Benchmark name with the `Benchmark` prefix stripped.
    pub benchmark: String,
    /// Iteration count of the run.
    pub iterations: u64,
    /// Measured value.
    pub value: f64,
    /// Unit string as written, e.g. `ns/op`.
    pub unit: String,
}

fn bench_name() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^Benchmark(\S*)$").expect("benchmark name pattern"))
}

/// Extracts every measurement from `text`. Lines that do not look like
/// benchmark results are skipped.
pub fn parse(text: &str) -> Vec<Measurement> {
    let re = bench_name();
    let mut out = Vec::new();
    for line in text.lines() {
        let f: Vec<&str> = line.split_whitespace().collect();
        if f.len() < 4 {
            continue;
        }
        let name = match re.captures(f[0]) {
            Some(caps) => caps.get(1).map_or("", |m| m.as_str()).to_string(),
            None => continue,
        };
        let iterations: u64 = match f[1].parse() {
            Ok(n) if n > 0 => n,
            _ => {
                tracing::debug!(line, "skipping line with bad iteration count");
                continue;
            }
        };

        let mut i = 2;
        while i + 2 <= f.len() {
            match f[i].parse::<f64>() {
                Ok(value) => out.push(Measurement {
                    benchmark: name.clone(),
                    iterations,
                    value,
                    unit: f[i + 1].to_string(),
                }),
                Err(_) => {
                    tracing::debug!(field = f[i], "skipping unparsable value");
                }
            }
            i += 2;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const INPUT: &str = "\
goos: linux
BenchmarkEncode  \t 1000  210 ns/op  16 B/op
BenchmarkEncode   1000   212 ns/op
BenchmarkDecode   500    404 ns/op
garbage line that is ignored
BenchmarkBroken   0      99 ns/op
BenchmarkShort    100
PASS
";

    #[test]
    fn extracts_measurements() {
        let ms = parse(INPUT);
        assert_eq!(ms.len(), 4);
        assert_eq!(
            ms[0],
            Measurement {
                benchmark: "Encode".to_string(),
                iterations: 1000,
                value: 210.0,
                unit: "ns/op".to_string(),
            }
        );
        assert_eq!(ms[1].unit, "B/op");
        assert_eq!(ms[1].value, 16.0);
        assert_eq!(ms[2].value, 212.0);
        assert_eq!(ms[3].benchmark, "Decode");
        assert_eq!(ms[3].iterations, 500);
    }

    #[test]
    fn zero_iterations_are_dropped() {
        assert!(parse("BenchmarkX 0 5 ns/op\n").is_empty());
        assert!(parse("BenchmarkX notanumber 5 ns/op\n").is_empty());
    }

    #[test]
    fn prefix_is_required() {
        assert!(parse("benchmarkX 10 5 ns/op\n").is_empty());
        assert!(parse("XBenchmark 10 5 ns/op\n").is_empty());
    }

    #[test]
    fn unparsable_values_are_skipped_pairwise() {
        let ms = parse("BenchmarkX 10 oops ns/op 7 B/op\n");
        assert_eq!(ms.len(), 1);
        assert_eq!(ms[0].unit, "B/op");
        assert_eq!(ms[0].value, 7.0);
    }

    #[test]
    fn trailing_odd_field_is_ignored() {
        let ms = parse("BenchmarkX 10 5 ns/op 7\n");
        assert_eq!(ms.len(), 1);
        assert_eq!(ms[0].unit, "ns/op");
    }
}
