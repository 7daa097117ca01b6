use crate::error::Result;
use crate::sampler::LinkMetrics;
use serde::ser::Error as _;
use serde::{Serialize, Serializer};
use serde_json::value::RawValue;
use std::io::Write;
use tracing::debug;

/// Wire shape of a sample: same keys and order as `LinkMetrics`, with the
/// readings written with a fixed number of decimals.
#[derive(Debug, Serialize)]
struct MetricsDocument {
    #[serde(serialize_with = "two_decimals")]
    latency_ms: f64,
    #[serde(serialize_with = "two_decimals")]
    jitter_ms: f64,
    #[serde(serialize_with = "two_decimals")]
    signal_strength_db: f64,
    #[serde(serialize_with = "three_decimals")]
    packet_loss_rate: f64,
    #[serde(serialize_with = "two_decimals")]
    bandwidth_mbps: f64,
    #[serde(serialize_with = "two_decimals")]
    snr_db: f64,
    timestamp: i64,
}

/// Emits `value` as a bare JSON number with exactly `decimals` digits after
/// the point. Non-finite values have no JSON form and fail serialization.
fn fixed_decimals<S: Serializer>(
    value: f64,
    decimals: usize,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    if !value.is_finite() {
        return Err(S::Error::custom(format!("non-finite reading: {}", value)));
    }
    let raw =
        RawValue::from_string(format!("{:.*}", decimals, value)).map_err(S::Error::custom)?;
    raw.serialize(serializer)
}

fn two_decimals<S: Serializer>(
    value: &f64,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    fixed_decimals(*value, 2, serializer)
}

fn three_decimals<S: Serializer>(
    value: &f64,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    fixed_decimals(*value, 3, serializer)
}

impl From<&LinkMetrics> for MetricsDocument {
    fn from(metrics: &LinkMetrics) -> Self {
        Self {
            latency_ms: metrics.latency_ms,
            jitter_ms: metrics.jitter_ms,
            signal_strength_db: metrics.signal_strength_db,
            packet_loss_rate: metrics.packet_loss_rate,
            bandwidth_mbps: metrics.bandwidth_mbps,
            snr_db: metrics.snr_db,
            timestamp: metrics.timestamp,
        }
    }
}

/// Renders a sample as a pretty-printed JSON object.
pub fn to_json(metrics: &LinkMetrics) -> Result<String> {
    let json = serde_json::to_string_pretty(&MetricsDocument::from(metrics))?;
    debug!(bytes = json.len(), "Rendered sample as JSON");
    Ok(json)
}

/// Writes the JSON rendering of a sample to standard output.
pub fn print_json(metrics: &LinkMetrics) -> Result<()> {
    let json = to_json(metrics)?;
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", json)?;
    stdout.flush()?;
    Ok(())
}
