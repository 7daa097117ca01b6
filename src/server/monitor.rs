//! Request counters and live status display for the HTTP endpoint

use crate::shutdown::CancellationToken;
use colored::*;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Time without requests before the endpoint is shown as idle (milliseconds).
const IDLE_THRESHOLD_MS: u64 = 2_000;

/// Monitor for tracking served requests with minimal overhead.
///
/// Connection threads update atomic counters; an optional background
/// thread redraws a single status line at a fixed interval.
pub struct ServerMonitor {
    counters: ServerCounters,
    start_time: Instant,
    update_interval: Duration,
}

impl ServerMonitor {
    /// Create a new server monitor with the specified update interval.
    pub fn new(update_interval_ms: u64) -> Self {
        Self {
            counters: ServerCounters::default(),
            start_time: Instant::now(),
            update_interval: Duration::from_millis(update_interval_ms),
        }
    }

    /// Get counters for use in connection threads.
    pub fn counters(&self) -> ServerCounters {
        self.counters.clone()
    }

    /// Start the background display thread. It exits once `shutdown` is cancelled.
    pub fn start_display(&self, shutdown: CancellationToken) -> thread::JoinHandle<()> {
        let counters = self.counters.clone();
        let update_interval = self.update_interval;

        thread::spawn(move || {
            let mut last_total = 0u64;
            let mut last_request_time = Instant::now();

            while !shutdown.wait_timeout(update_interval) {
                let served = counters.served.load(Ordering::Relaxed);
                let not_found = counters.not_found.load(Ordering::Relaxed);
                let errors = counters.errors.load(Ordering::Relaxed);
                let now = Instant::now();

                let total = served + not_found;
                if total > last_total {
                    last_request_time = now;
                }
                let is_idle = now.duration_since(last_request_time)
                    >= Duration::from_millis(IDLE_THRESHOLD_MS);

                Self::display_status_line(is_idle, served, not_found, errors);
                last_total = total;
            }
            println!();
        })
    }

    fn render_indicator(is_idle: bool) -> String {
        if is_idle {
            "○".normal().to_string()
        } else {
            "●".green().bold().to_string()
        }
    }

    fn display_status_line(is_idle: bool, served: u64, not_found: u64, errors: u64) {
        let status = if is_idle { "IDLE" } else { "SERVING" };
        print!(
            "\r{} [{}] Served: {} | Not Found: {} | Errors: {}",
            Self::render_indicator(is_idle),
            status,
            served,
            not_found,
            errors
        );
        std::io::Write::flush(&mut std::io::stdout()).ok();
    }

    /// Get running totals.
    pub fn stats(&self) -> ServerStats {
        ServerStats {
            served: self.counters.served.load(Ordering::Relaxed),
            not_found: self.counters.not_found.load(Ordering::Relaxed),
            errors: self.counters.errors.load(Ordering::Relaxed),
            elapsed: self.start_time.elapsed(),
        }
    }
}

/// Lightweight shared counters, cheap to clone into each connection thread.
#[derive(Clone, Default)]
pub struct ServerCounters {
    served: Arc<AtomicU64>,
    not_found: Arc<AtomicU64>,
    errors: Arc<AtomicU64>,
}

impl ServerCounters {
    /// Record a response with a 2xx status.
    #[inline]
    pub fn increment_served(&self) {
        self.served.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn increment_not_found(&self) {
        self.not_found.fetch_add(1, Ordering::Relaxed);
    }

    /// Classify a response by status: 404s and 5xx are not counted as served.
    pub fn record_status(&self, status: u16) {
        match status {
            404 => self.increment_not_found(),
            s if s >= 500 => self.increment_error(),
            _ => self.increment_served(),
        }
    }

    /// Record an accept, read or write failure, or a 5xx response.
    #[inline]
    pub fn increment_error(&self) {
        self.errors.fetch_add(1, Ordering::Relaxed);
    }
}

/// Server statistics snapshot.
#[derive(Debug, Clone, Copy)]
pub struct ServerStats {
    pub served: u64,
    pub not_found: u64,
    pub errors: u64,
    pub elapsed: Duration,
}
