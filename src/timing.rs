//! Wall-clock timing harness for the statistic computations.

use std::{
    fmt,
    time::{Duration, Instant},
};

/// A computed value together with the label and wall-clock duration of the
/// computation that produced it.
///
/// Displays as `"<label>: <elapsed_seconds>"`, the line printed before each
/// statistic's result.
#[derive(Debug, Clone)]
pub struct Timed<T> {
    /// Human-readable label identifying the statistic and strategy.
    pub label: String,
    /// The computed value.
    pub value: T,
    /// Wall-clock duration of the computation.
    pub elapsed: Duration,
}

impl<T> Timed<T> {
    /// Elapsed wall-clock time in seconds.
    pub fn seconds(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }

    /// Consumes the measurement and returns the computed value.
    #[must_use]
    pub fn into_value(self) -> T {
        self.value
    }
}

impl<T> fmt::Display for Timed<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.label, self.seconds())
    }
}

/// Runs `f`, measuring the wall-clock time until its result is fully
/// materialized.
///
/// The clock starts immediately before `f` is called and stops immediately
/// after it returns; both evaluation strategies are eager, so nothing lazy
/// escapes the measurement.
///
/// # Example
///
/// ```
/// use resenha::timing::time;
///
/// let timed = time("sum", || (1..=10).sum::<u32>());
/// assert_eq!(timed.value, 55);
/// println!("{timed}");
/// ```
pub fn time<T>(label: impl Into<String>, f: impl FnOnce() -> T) -> Timed<T> {
    let start = Instant::now();
    let value = f();
    let elapsed = start.elapsed();

    Timed {
        label: label.into(),
        value,
        elapsed,
    }
}
