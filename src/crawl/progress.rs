// src/crawl/progress.rs
// =============================================================================
// Progress reporting for a running crawl.
//
// The scheduler calls `report(current, total, description)` once per page,
// right after the page is marked visited and before it is fetched. The
// result is ignored; a sink that panics is contained and logged.
//
// Any closure `Fn(usize, usize, &str)` works as a sink:
//
//   let sink = |current: usize, total: usize, msg: &str| {
//       eprintln!("[{}/{}] {}", current, total, msg);
//   };
// =============================================================================

use std::panic::{self, AssertUnwindSafe};

/// Receives one update per dequeued page
pub trait ProgressSink: Send + Sync {
    fn report(&self, current: usize, total: usize, description: &str);
}

/// Sink that ignores every update
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn report(&self, _current: usize, _total: usize, _description: &str) {}
}

impl<F> ProgressSink for F
where
    F: Fn(usize, usize, &str) + Send + Sync,
{
    fn report(&self, current: usize, total: usize, description: &str) {
        self(current, total, description)
    }
}

/// Calls the sink, swallowing a panic so the crawl carries on
pub(crate) fn notify(sink: &dyn ProgressSink, current: usize, total: usize, description: &str) {
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        sink.report(current, total, description)
    }));

    if outcome.is_err() {
        tracing::warn!(current, total, "progress sink panicked; ignoring");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_closure_sink_receives_updates() {
        let seen = Mutex::new(Vec::new());
        let sink = |current: usize, total: usize, msg: &str| {
            seen.lock().unwrap().push((current, total, msg.to_string()));
        };

        notify(&sink, 1, 10, "Scraping: /docs");
        notify(&sink, 2, 10, "Scraping: /docs/intro");

        let seen = seen.into_inner().unwrap();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[1], (2, 10, "Scraping: /docs/intro".to_string()));
    }

    #[test]
    fn test_panicking_sink_is_contained() {
        let sink = |_: usize, _: usize, _: &str| panic!("ui went away");
        // Must not propagate
        notify(&sink, 1, 1, "Scraping: /");
    }

    #[test]
    fn test_no_progress() {
        notify(&NoProgress, 3, 5, "anything");
    }
}
