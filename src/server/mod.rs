//! HTTP endpoint for polling consumers

pub mod http;
pub mod listener;
pub mod monitor;

pub use http::{dispatch, HttpResponse, Route};
pub use listener::{handle_connection, MetricsServer, REQUEST_BUFFER_SIZE};
pub use monitor::{ServerCounters, ServerMonitor, ServerStats};
