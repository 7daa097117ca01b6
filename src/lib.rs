//! link-sim - Microwave radio link telemetry simulator
//!
//! This library synthesizes plausible, internally consistent link metrics
//! (latency, jitter, signal strength, packet loss, bandwidth, SNR) and exposes
//! them as a console feed, a one-shot JSON export, or an HTTP endpoint.

pub mod config;
pub mod error;
pub mod logging;
pub mod render;
pub mod sampler;
pub mod server;
pub mod shutdown;
pub mod ticker;

pub use error::{LinkSimError, Result};
pub use sampler::{LinkBounds, LinkMetrics, MetricsSampler, MetricsSource};
