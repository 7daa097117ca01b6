use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// One synthesized reading of the radio link.
///
/// Field order matches the JSON key order consumers rely on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LinkMetrics {
    /// Round-trip latency in milliseconds
    pub latency_ms: f64,
    /// Variation in latency in milliseconds
    pub jitter_ms: f64,
    /// Received signal strength in dBm
    pub signal_strength_db: f64,
    /// Packet loss as a percentage
    pub packet_loss_rate: f64,
    /// Available bandwidth in Mbps
    pub bandwidth_mbps: f64,
    /// Signal-to-noise ratio in dB
    pub snr_db: f64,
    /// Unix timestamp in seconds
    pub timestamp: i64,
}

/// Current wall-clock time as whole seconds since the Unix epoch.
///
/// A clock set before 1970 reads as zero.
pub fn unix_timestamp() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
