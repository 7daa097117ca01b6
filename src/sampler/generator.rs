//! Correlated, bounded sampling of link metrics
//!
//! Every sample draws latency, jitter, signal strength, packet loss and an SNR
//! offset from the generator, in that order. Bandwidth is not drawn: it is
//! interpolated from signal strength so a weak link never reports a fat pipe.

use crate::sampler::bounds::LinkBounds;
use crate::sampler::constants::*;
use crate::sampler::metrics::{unix_timestamp, LinkMetrics};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

/// Anything that can hand out fresh link samples.
///
/// The HTTP dispatcher and console ticker only depend on this trait.
pub trait MetricsSource: Send {
    /// Produce one new, independent sample
    fn next_sample(&mut self) -> LinkMetrics;
}

/// Sampler owning the bound parameters and the random stream.
///
/// The generator is created lazily: a sampler built with [`MetricsSampler::new`]
/// seeds itself from the wall clock on first use.
#[derive(Debug)]
pub struct MetricsSampler<R = StdRng> {
    bounds: LinkBounds,
    rng: Option<R>,
    seed: Option<u64>,
}

impl<R> MetricsSampler<R> {
    /// Build a sampler around an already constructed generator.
    pub fn with_rng(bounds: LinkBounds, rng: R) -> Self {
        Self {
            bounds,
            rng: Some(rng),
            seed: None,
        }
    }

    pub fn bounds(&self) -> &LinkBounds {
        &self.bounds
    }

    pub fn is_initialized(&self) -> bool {
        self.rng.is_some()
    }

    /// Seed the generator was created from, if it was seeded here.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}

impl<R: Rng + SeedableRng> MetricsSampler<R> {
    /// Create a sampler that seeds itself from the wall clock on first use.
    pub fn new(bounds: LinkBounds) -> Self {
        Self {
            bounds,
            rng: None,
            seed: None,
        }
    }

    /// Create a sampler with a fixed seed for reproducible sequences.
    pub fn with_seed(bounds: LinkBounds, seed: u64) -> Self {
        info!(seed = seed, "Link simulator initialized with fixed seed");
        Self {
            bounds,
            rng: Some(R::seed_from_u64(seed)),
            seed: Some(seed),
        }
    }

    /// Seed the generator if that has not happened yet. Later calls are no-ops.
    pub fn ensure_initialized(&mut self) {
        self.rng();
    }

    fn rng(&mut self) -> &mut R {
        let seed_slot = &mut self.seed;
        self.rng.get_or_insert_with(|| {
            let seed = unix_timestamp() as u64;
            *seed_slot = Some(seed);
            info!(seed = seed, "Link simulator initialized");
            R::seed_from_u64(seed)
        })
    }

    /// Uniform draw in `[min, max)` by linear interpolation of a unit draw.
    pub fn random_double(&mut self, min: f64, max: f64) -> f64 {
        let unit: f64 = self.rng().random();
        min + unit * (max - min)
    }

    /// Generate one link sample.
    ///
    /// Latency is deliberately left unclamped, so it can land anywhere in
    /// `base +/- 2 ms`. Every other field stays inside its bounds.
    pub fn generate_metrics(&mut self) -> LinkMetrics {
        let bounds = self.bounds;

        let latency_variation = self.random_double(-LATENCY_VARIATION_MS, LATENCY_VARIATION_MS);
        let latency_ms = bounds.base_latency_ms + latency_variation;

        let jitter_ms = self.random_double(JITTER_FLOOR_MS, bounds.jitter_range_ms);

        let signal_strength_db =
            self.random_double(bounds.signal_strength_min_db, bounds.signal_strength_max_db);

        let packet_loss_rate = self.random_double(0.0, bounds.packet_loss_max_percent);

        let bandwidth_mbps = bounds.bandwidth_for(signal_strength_db);

        let snr_db = signal_strength_db + self.random_double(SNR_OFFSET_MIN_DB, SNR_OFFSET_MAX_DB);

        let metrics = LinkMetrics {
            latency_ms,
            jitter_ms,
            signal_strength_db,
            packet_loss_rate,
            bandwidth_mbps,
            snr_db,
            timestamp: unix_timestamp(),
        };

        debug!(
            latency_ms = metrics.latency_ms,
            signal_strength_db = metrics.signal_strength_db,
            bandwidth_mbps = metrics.bandwidth_mbps,
            "Generated link sample"
        );

        metrics
    }
}

impl<R: Rng + SeedableRng + Send> MetricsSource for MetricsSampler<R> {
    fn next_sample(&mut self) -> LinkMetrics {
        self.generate_metrics()
    }
}
