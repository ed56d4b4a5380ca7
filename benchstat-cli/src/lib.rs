#![warn(missing_docs)]
//! The `benchstat` command line tool.
//!
//! Reads one or more files of benchmark output, groups repeated runs
//! into samples, and prints per-benchmark summary tables. With exactly
//! two input files it also reports the change of each benchmark's mean
//! together with the p-value of a significance test.
//!
//! # Example
//!
//! ```text
//! $ benchstat old.txt new.txt
//! name    old time/op  new time/op  delta
//! Encode  102ns ± 2%   204ns ± 1%   +100.26%  (p=0.008 n=5+5)
//! ```

use anyhow::Context;
use benchstat_core::{BenchStat, Collection};
use benchstat_report::{
    format_stat, metric_of, new_scaler, render_html, render_text, Row, Scaler,
};
use benchstat_stats::{
    geo_mean, mann_whitney_u_test, two_sample_welch_t_test, Alternative, Sample, TestError,
};
use clap::{Parser, ValueEnum};
use std::fs;
use std::path::PathBuf;

/// Command line arguments.
#[derive(Parser, Debug)]
#[command(
    name = "benchstat",
    about = "Compute and compare statistics about benchmarks",
    version
)]
pub struct Cli {
    /// Benchmark result files: old.txt [new.txt] [more.txt ...]
    #[arg(required = true, value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Significance test to apply to the delta: utest, ttest, or none
    #[arg(
        long = "delta-test",
        value_enum,
        default_value_t = DeltaTest::UTest,
        ignore_case = true
    )]
    pub delta_test: DeltaTest,

    /// Consider a change significant if p < alpha
    #[arg(long, value_name = "α", default_value_t = 0.05)]
    pub alpha: f64,

    /// Print the geometric mean of each file
    #[arg(long)]
    pub geomean: bool,

    /// Print the results as an HTML table
    #[arg(long)]
    pub html: bool,
}

/// Significance test applied to the old/new delta.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeltaTest {
    /// Mann-Whitney U-test.
    #[value(name = "utest", alias = "u", alias = "u-test")]
    UTest,
    /// Welch two-sample t-test.
    #[value(name = "ttest", alias = "t", alias = "t-test")]
    TTest,
    /// No test; deltas are never marked significant.
    #[value(name = "none")]
    None,
}

/// Parses the process arguments and runs the tool.
pub fn run() -> anyhow::Result<()> {
    run_with_cli(Cli::parse())
}

/// Runs the tool with pre-parsed arguments, writing tables to stdout.
pub fn run_with_cli(cli: Cli) -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("benchstat=warn")
        .with_writer(std::io::stderr)
        .init();

    let mut c = Collection::new();
    for file in &cli.files {
        let name = file.display().to_string();
        let text =
            fs::read_to_string(file).with_context(|| format!("reading {name}"))?;
        c.add_file(&name, &text);
    }
    c.compute_stats();

    let tables = if c.configs.len() == 2 {
        build_delta_tables(&c, &cli)
    } else {
        build_value_tables(&c, &cli)
    };

    let out = if cli.html {
        render_html(&tables)
    } else {
        render_text(&tables)
    };
    print!("{out}");
    Ok(())
}

/// Runs the chosen significance test over the outlier-filtered values.
/// Returns `None` when testing is disabled.
fn delta_test(test: DeltaTest, old: &BenchStat, new: &BenchStat) -> Option<Result<f64, TestError>> {
    match test {
        DeltaTest::None => None,
        DeltaTest::TTest => Some(
            two_sample_welch_t_test(
                &Sample::from_values(old.r_values.clone()),
                &Sample::from_values(new.r_values.clone()),
                Alternative::TwoSided,
            )
            .map(|r| r.p),
        ),
        DeltaTest::UTest => Some(
            mann_whitney_u_test(&old.r_values, &new.r_values, Alternative::TwoSided).map(|r| r.p),
        ),
    }
}

/// Builds the two-configuration comparison tables: one table per unit
/// with old, new, and delta columns.
fn build_delta_tables(c: &Collection, cli: &Cli) -> Vec<Vec<Row>> {
    let (before, after) = (c.configs[0].clone(), c.configs[1].clone());
    let mut tables = Vec::new();
    for unit in &c.units {
        let metric = metric_of(unit);
        let mut table: Vec<Row> = Vec::new();
        for bench in &c.benchmarks {
            let (Some(old), Some(new)) = (
                c.get(&before, bench, unit),
                c.get(&after, bench, unit),
            ) else {
                continue;
            };
            if table.is_empty() {
                table.push(Row::new([
                    "name".to_string(),
                    format!("old {metric}"),
                    format!("new {metric}"),
                    "delta".to_string(),
                ]));
            }

            let pval = delta_test(cli.delta_test, old, new);

            let scaler = new_scaler(old.mean, unit);
            let mut row = Row::new([
                bench.clone(),
                format_stat(old.mean, old.min, old.max, &scaler),
                format_stat(new.mean, new.min, new.max, &scaler),
                "~   ".to_string(),
            ]);
            match &pval {
                Some(Err(TestError::ZeroVariance)) => row.add("(zero variance)"),
                Some(Err(TestError::SampleSize)) => row.add("(too few samples)"),
                Some(Err(TestError::SamplesEqual)) => row.add("(all equal)"),
                Some(Err(err)) => row.add(format!("({err})")),
                Some(Ok(p)) if *p < cli.alpha => {
                    row.cols[3] = format!("{:+.2}%", (new.mean / old.mean - 1.0) * 100.0);
                }
                _ => {}
            }
            if row.cols.len() == 4 {
                if let Some(Ok(p)) = pval {
                    row.add(format!(
                        "(p={p:.3} n={}+{})",
                        old.r_values.len(),
                        new.r_values.len()
                    ));
                }
            }
            table.push(row);
        }
        if !table.is_empty() {
            add_geomean(&mut table, c, unit, true, cli);
            tables.push(table);
        }
    }
    tables
}

/// Builds the per-unit value tables used for one file or for three or
/// more: one column per configuration.
fn build_value_tables(c: &Collection, cli: &Cli) -> Vec<Vec<Row>> {
    let mut tables = Vec::new();
    for unit in &c.units {
        let metric = metric_of(unit);
        let mut table: Vec<Row> = Vec::new();

        if c.configs.len() > 1 {
            let mut hdr = Row::new([format!("name \\ {metric}")]);
            for config in &c.configs {
                hdr.add(config.clone());
            }
            table.push(hdr);
        } else {
            table.push(Row::new(["name", metric]));
        }

        for bench in &c.benchmarks {
            let mut row = Row::new([bench.clone()]);
            let mut scaler: Option<Scaler> = None;
            for config in &c.configs {
                match c.get(config, bench, unit) {
                    None => row.add(""),
                    Some(stat) => {
                        let s = scaler.get_or_insert_with(|| new_scaler(stat.mean, &stat.unit));
                        row.add(format_stat(stat.mean, stat.min, stat.max, s));
                    }
                }
            }
            row.trim();
            if row.cols.len() > 1 {
                table.push(row);
            }
        }
        add_geomean(&mut table, c, unit, false, cli);
        tables.push(table);
    }
    tables
}

/// Appends a `[Geo mean]` row summarizing every configuration's means,
/// when requested.
fn add_geomean(table: &mut Vec<Row>, c: &Collection, unit: &str, delta: bool, cli: &Cli) {
    if !cli.geomean {
        return;
    }

    let mut delta = delta;
    let mut row = Row::new(["[Geo mean]"]);
    let mut geomeans = Vec::new();
    for config in &c.configs {
        let means: Vec<f64> = c
            .benchmarks
            .iter()
            .filter_map(|b| c.get(config, b, unit).map(|s| s.mean))
            .collect();
        if means.is_empty() {
            row.add("");
            delta = false;
        } else {
            let gm = geo_mean(&means);
            geomeans.push(gm);
            row.add(format!("{}     ", new_scaler(gm, unit).format(gm)));
        }
    }
    if delta {
        row.add(format!(
            "{:+.2}%",
            (geomeans[1] / geomeans[0] - 1.0) * 100.0
        ));
    }
    table.push(row);
}
