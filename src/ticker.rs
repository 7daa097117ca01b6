//! Periodic console feed

use crate::render::ConsoleRenderer;
use crate::sampler::{LinkMetrics, MetricsSource};
use crate::shutdown::CancellationToken;
use std::time::Duration;
use tracing::{debug, info};

/// Render a fresh sample every `interval` until cancelled.
///
/// Stops early after `max_samples` samples when a limit is given. Returns the
/// number of samples rendered.
pub fn run_console<S, F>(
    source: &mut S,
    interval: Duration,
    max_samples: Option<usize>,
    shutdown: &CancellationToken,
    mut emit: F,
) -> usize
where
    S: MetricsSource + ?Sized,
    F: FnMut(&LinkMetrics),
{
    info!(
        interval_secs = interval.as_secs(),
        max_samples = ?max_samples,
        "Starting microwave link simulation"
    );

    let mut rendered = 0usize;
    while !shutdown.is_cancelled() {
        let metrics = source.next_sample();
        emit(&metrics);
        rendered += 1;

        if max_samples.is_some_and(|max| rendered >= max) {
            debug!(rendered = rendered, "Sample limit reached");
            break;
        }
        if shutdown.wait_timeout(interval) {
            break;
        }
    }

    info!(rendered = rendered, "Console feed stopped");
    rendered
}

/// Console feed printing each sample through `renderer`.
pub fn run_console_printer<S: MetricsSource + ?Sized>(
    source: &mut S,
    renderer: &ConsoleRenderer,
    interval: Duration,
    max_samples: Option<usize>,
    shutdown: &CancellationToken,
) -> usize {
    run_console(source, interval, max_samples, shutdown, |metrics| {
        renderer.print(metrics);
        println!();
    })
}
