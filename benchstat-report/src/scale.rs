//! Human-readable scaling of measured values.
//!
//! A scaler is chosen once per table column from a representative value
//! so that every cell in the column shares a unit and precision.

/// Formats values that share one scale.
#[derive(Debug, Clone)]
pub struct Scaler {
    divisor: f64,
    precision: usize,
    suffix: String,
}

impl Scaler {
    /// Formats `val` at this scale.
    pub fn format(&self, val: f64) -> String {
        format!("{:.*}{}", self.precision, val / self.divisor, self.suffix)
    }
}

/// Returns a scaler for durations measured in nanoseconds.
pub fn time_scaler(ns: f64) -> Scaler {
    let (precision, divisor, suffix) = match ns / 1e9 {
        x if x >= 99.5 => (0, 1e9, "s"),
        x if x >= 9.95 => (1, 1e9, "s"),
        x if x >= 0.995 => (2, 1e9, "s"),
        x if x >= 0.0995 => (0, 1e6, "ms"),
        x if x >= 0.00995 => (1, 1e6, "ms"),
        x if x >= 0.000995 => (2, 1e6, "ms"),
        x if x >= 0.0000995 => (0, 1e3, "µs"),
        x if x >= 0.00000995 => (1, 1e3, "µs"),
        x if x >= 0.000000995 => (2, 1e3, "µs"),
        x if x >= 0.0000000995 => (0, 1.0, "ns"),
        x if x >= 0.00000000995 => (1, 1.0, "ns"),
        _ => (2, 1.0, "ns"),
    };
    Scaler {
        divisor,
        precision,
        suffix: suffix.to_string(),
    }
}

/// Returns a scaler appropriate for values around `val` in `unit`.
/// Durations get the time ladder; everything else gets SI prefixes,
/// with byte and throughput units spelled out.
pub fn new_scaler(val: f64, unit: &str) -> Scaler {
    if unit == "ns/op" {
        return time_scaler(val);
    }

    let prescale = if unit == "MB/s" { 1e6 } else { 1.0 };

    let (precision, scale, si) = match val * prescale {
        x if x >= 99_500_000_000_000.0 => (0, 1e12, "T"),
        x if x >= 9_950_000_000_000.0 => (1, 1e12, "T"),
        x if x >= 995_000_000_000.0 => (2, 1e12, "T"),
        x if x >= 99_500_000_000.0 => (0, 1e9, "G"),
        x if x >= 9_950_000_000.0 => (1, 1e9, "G"),
        x if x >= 995_000_000.0 => (2, 1e9, "G"),
        x if x >= 99_500_000.0 => (0, 1e6, "M"),
        x if x >= 9_950_000.0 => (1, 1e6, "M"),
        x if x >= 995_000.0 => (2, 1e6, "M"),
        x if x >= 99_500.0 => (0, 1e3, "k"),
        x if x >= 9_950.0 => (1, 1e3, "k"),
        x if x >= 995.0 => (2, 1e3, "k"),
        x if x >= 99.5 => (0, 1.0, ""),
        x if x >= 9.95 => (1, 1.0, ""),
        _ => (2, 1.0, ""),
    };

    let mut suffix = si.to_string();
    if unit == "B/op" {
        suffix.push('B');
    }
    if unit == "MB/s" {
        suffix.push_str("B/s");
    }

    Scaler {
        divisor: scale / prescale,
        precision,
        suffix,
    }
}

/// Maps a benchmark unit to the metric name shown in table headers.
pub fn metric_of(unit: &str) -> &str {
    match unit {
        "ns/op" => "time/op",
        "B/op" => "alloc/op",
        "MB/s" => "speed",
        _ => unit,
    }
}
