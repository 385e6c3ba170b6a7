use std::time::Instant;

use tracing::debug;

/// Runs `f` inline on the UI thread and logs how long it took.
pub fn run_blocking<F, T>(task: &'static str, f: F) -> T
where
    F: FnOnce() -> T,
{
    let started = Instant::now();
    let result = f();
    debug!(
        task,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "blocking task finished"
    );
    result
}
