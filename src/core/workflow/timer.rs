//! Stage timing

use std::time::{Duration, Instant};

/// Runs `f` and returns its output with the elapsed wall-clock time
pub fn timed<T>(f: impl FnOnce() -> T) -> (T, Duration) {
    let start = Instant::now();
    let output = f();
    (output, start.elapsed())
}
