//! Bound parameters constraining each sampled field
//!
//! Defaults mirror a typical licensed microwave hop; every value can be
//! overridden from the command line.

use crate::error::{LinkSimError, Result};
use crate::sampler::constants::*;
use clap::Args;
use tracing::debug;

#[derive(Args, Debug, Clone, Copy, PartialEq)]
pub struct LinkBounds {
    /// Nominal latency in milliseconds (samples vary by +/- 2 ms)
    #[arg(long, default_value_t = DEFAULT_BASE_LATENCY_MS)]
    pub base_latency_ms: f64,

    /// Upper bound of the jitter draw in milliseconds
    #[arg(long, default_value_t = DEFAULT_JITTER_RANGE_MS)]
    pub jitter_range_ms: f64,

    /// Weakest signal strength in dBm
    #[arg(
        long = "signal-min-db",
        default_value_t = DEFAULT_SIGNAL_STRENGTH_MIN_DB,
        allow_negative_numbers = true
    )]
    pub signal_strength_min_db: f64,

    /// Strongest signal strength in dBm
    #[arg(
        long = "signal-max-db",
        default_value_t = DEFAULT_SIGNAL_STRENGTH_MAX_DB,
        allow_negative_numbers = true
    )]
    pub signal_strength_max_db: f64,

    /// Packet loss ceiling as a percentage
    #[arg(long = "packet-loss-max", default_value_t = DEFAULT_PACKET_LOSS_MAX_PERCENT)]
    pub packet_loss_max_percent: f64,

    /// Bandwidth at the weakest signal in Mbps
    #[arg(long, default_value_t = DEFAULT_BANDWIDTH_MIN_MBPS)]
    pub bandwidth_min_mbps: f64,

    /// Bandwidth at the strongest signal in Mbps
    #[arg(long, default_value_t = DEFAULT_BANDWIDTH_MAX_MBPS)]
    pub bandwidth_max_mbps: f64,
}

impl Default for LinkBounds {
    fn default() -> Self {
        Self {
            base_latency_ms: DEFAULT_BASE_LATENCY_MS,
            jitter_range_ms: DEFAULT_JITTER_RANGE_MS,
            signal_strength_min_db: DEFAULT_SIGNAL_STRENGTH_MIN_DB,
            signal_strength_max_db: DEFAULT_SIGNAL_STRENGTH_MAX_DB,
            packet_loss_max_percent: DEFAULT_PACKET_LOSS_MAX_PERCENT,
            bandwidth_min_mbps: DEFAULT_BANDWIDTH_MIN_MBPS,
            bandwidth_max_mbps: DEFAULT_BANDWIDTH_MAX_MBPS,
        }
    }
}

impl LinkBounds {
    /// Validates the bound parameters.
    ///
    /// The sampler itself never checks its bounds; callers that accept
    /// user-supplied values run this first.
    pub fn validate(&self) -> Result<()> {
        debug!("Validating link bounds");

        let values = [
            ("base_latency_ms", self.base_latency_ms),
            ("jitter_range_ms", self.jitter_range_ms),
            ("signal_strength_min_db", self.signal_strength_min_db),
            ("signal_strength_max_db", self.signal_strength_max_db),
            ("packet_loss_max_percent", self.packet_loss_max_percent),
            ("bandwidth_min_mbps", self.bandwidth_min_mbps),
            ("bandwidth_max_mbps", self.bandwidth_max_mbps),
        ];
        if let Some((name, _)) = values.iter().find(|(_, v)| !v.is_finite()) {
            return Err(LinkSimError::Config(format!("{} must be a finite number", name)));
        }

        if self.jitter_range_ms < JITTER_FLOOR_MS {
            return Err(LinkSimError::Config(format!(
                "jitter_range_ms must be >= {}",
                JITTER_FLOOR_MS
            )));
        }
        if self.signal_strength_min_db > self.signal_strength_max_db {
            return Err(LinkSimError::Config(
                "signal_strength_min_db must be <= signal_strength_max_db".into(),
            ));
        }
        if self.packet_loss_max_percent < 0.0 {
            return Err(LinkSimError::Config(
                "packet_loss_max_percent must be >= 0".into(),
            ));
        }
        if self.bandwidth_min_mbps > self.bandwidth_max_mbps {
            return Err(LinkSimError::Config(
                "bandwidth_min_mbps must be <= bandwidth_max_mbps".into(),
            ));
        }

        debug!("Link bounds validated successfully");
        Ok(())
    }

    /// Normalized position of `signal_db` within the signal range, clamped
    /// to [0.1, 1.0].
    ///
    /// A zero-width signal range has no meaningful position and maps to the
    /// ceiling.
    pub fn bandwidth_factor(&self, signal_db: f64) -> f64 {
        let span = self.signal_strength_max_db - self.signal_strength_min_db;
        if span <= 0.0 {
            return BANDWIDTH_FACTOR_MAX;
        }
        ((signal_db - self.signal_strength_min_db) / span)
            .clamp(BANDWIDTH_FACTOR_MIN, BANDWIDTH_FACTOR_MAX)
    }

    /// Bandwidth available at `signal_db`, interpolated linearly between the
    /// bandwidth bounds.
    pub fn bandwidth_for(&self, signal_db: f64) -> f64 {
        let bandwidth = self.bandwidth_min_mbps
            + (self.bandwidth_max_mbps - self.bandwidth_min_mbps) * self.bandwidth_factor(signal_db);
        // Rounding in `min + (max - min)` can land one ulp past the ceiling
        bandwidth.min(self.bandwidth_max_mbps)
    }
}
