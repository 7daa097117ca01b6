//! Metrics sampler: bound parameters, the sample type, and the generator

pub mod bounds;
pub mod constants;
pub mod generator;
pub mod metrics;

pub use bounds::LinkBounds;
pub use constants::*;
pub use generator::{MetricsSampler, MetricsSource};
pub use metrics::{unix_timestamp, LinkMetrics};
