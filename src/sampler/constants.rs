//! Constants shaping the sampling algorithm

/// Default nominal round-trip latency in milliseconds
pub const DEFAULT_BASE_LATENCY_MS: f64 = 15.0;

/// Default upper bound of the jitter draw in milliseconds
pub const DEFAULT_JITTER_RANGE_MS: f64 = 5.0;

/// Default weakest received signal strength in dBm
pub const DEFAULT_SIGNAL_STRENGTH_MIN_DB: f64 = -85.0;

/// Default strongest received signal strength in dBm
pub const DEFAULT_SIGNAL_STRENGTH_MAX_DB: f64 = -45.0;

/// Default packet loss ceiling, as a percentage
pub const DEFAULT_PACKET_LOSS_MAX_PERCENT: f64 = 2.0;

/// Default bandwidth at the weakest signal in Mbps
pub const DEFAULT_BANDWIDTH_MIN_MBPS: f64 = 50.0;

/// Default bandwidth at the strongest signal in Mbps
pub const DEFAULT_BANDWIDTH_MAX_MBPS: f64 = 1000.0;

/// Latency deviates from the base by at most this much in either direction
pub const LATENCY_VARIATION_MS: f64 = 2.0;

/// Smallest jitter a sample can report
pub const JITTER_FLOOR_MS: f64 = 0.1;

/// Lower bound of the SNR offset added to signal strength
pub const SNR_OFFSET_MIN_DB: f64 = 10.0;

/// Upper bound of the SNR offset added to signal strength
pub const SNR_OFFSET_MAX_DB: f64 = 20.0;

/// Bandwidth factor never drops below this, even at the weakest signal
pub const BANDWIDTH_FACTOR_MIN: f64 = 0.1;

/// Bandwidth factor ceiling
pub const BANDWIDTH_FACTOR_MAX: f64 = 1.0;
