//! Shared error taxonomy for the statistical tests.

/// Errors reported by significance tests and the numeric utilities.
///
/// The `Display` strings are user-facing; the CLI prints them verbatim
/// next to the affected benchmark.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TestError {
    /// Every sample that feeds the test statistic has zero variance, so
    /// the statistic is undefined.
    #[error("zero variance")]
    ZeroVariance,

    /// A sample is too small for the requested test.
    #[error("too few samples")]
    SampleSize,

    /// The pooled sample collapses into a single tie group, leaving no
    /// rank information to test.
    #[error("all samples are equal")]
    SamplesEqual,

    /// A paired test was given samples of different lengths.
    #[error("mismatched sample length")]
    MismatchedLength,

    /// A root finder was called on an interval whose endpoints do not
    /// bracket a sign change. Indicates a bug in the caller rather than
    /// bad user data.
    #[error("root is not bracketed by [{low}, {high}]")]
    Bracketing {
        /// Lower end of the offending interval.
        low: f64,
        /// Upper end of the offending interval.
        high: f64,
    },
}
