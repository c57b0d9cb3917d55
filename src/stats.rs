use std::sync::{Mutex, PoisonError};

/// The counters behind the statistics lock.
#[derive(Debug, Default)]
struct Counters {
    ok_responses: u64,
    total_time:   f64,
    max_time:     f64,
}

/// Running statistics over successful responses.
///
/// This is the only shared mutable state in the server. All access goes
/// through one mutex; the computation core never touches it, only the
/// connection boundary does. Elapsed times are recorded in seconds, as
/// rendered on the wire (already truncated to 3 decimals), so the
/// reported average and maximum agree with what clients saw.
#[derive(Debug, Default)]
pub struct ServerStats {
    counters: Mutex<Counters>,
}

impl ServerStats {
    /// Creates an empty statistics collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one successful response's elapsed time.
    pub fn record_response(&self, elapsed: f64) {
        let mut counters = self.lock();
        counters.ok_responses += 1;
        counters.total_time += elapsed;
        if elapsed > counters.max_time {
            counters.max_time = elapsed;
        }
    }

    /// Total number of OK responses served so far.
    #[must_use]
    pub fn total_responses(&self) -> u64 {
        self.lock().ok_responses
    }

    /// Average elapsed time across OK responses, 0 when none were served.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn average_time(&self) -> f64 {
        let counters = self.lock();
        if counters.ok_responses == 0 {
            return 0.0;
        }
        counters.total_time / counters.ok_responses as f64
    }

    /// Maximum elapsed time across OK responses, 0 when none were served.
    #[must_use]
    pub fn max_time(&self) -> f64 {
        self.lock().max_time
    }

    /// Takes the lock, recovering the data if a writer panicked.
    fn lock(&self) -> std::sync::MutexGuard<'_, Counters> {
        self.counters.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
