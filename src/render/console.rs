use crate::sampler::LinkMetrics;
use colored::*;

const HEADER: &str = "=== Microwave Link Metrics ===";
const FOOTER: &str = "=============================";

/// Human-readable multi-line rendering for the console feed
#[derive(Debug, Clone, Copy)]
pub struct ConsoleRenderer {
    color: bool,
}

impl ConsoleRenderer {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn banner(&self, text: &str) -> String {
        if self.color {
            text.cyan().bold().to_string()
        } else {
            text.to_string()
        }
    }

    /// Formats a sample as a fixed block, one field per line.
    pub fn render(&self, metrics: &LinkMetrics) -> String {
        let mut lines = Vec::with_capacity(9);
        lines.push(self.banner(HEADER));
        lines.push(format!("Latency: {:.2} ms", metrics.latency_ms));
        lines.push(format!("Jitter: {:.2} ms", metrics.jitter_ms));
        lines.push(format!("Signal Strength: {:.2} dBm", metrics.signal_strength_db));
        lines.push(format!("Packet Loss Rate: {:.3}%", metrics.packet_loss_rate));
        lines.push(format!("Bandwidth: {:.2} Mbps", metrics.bandwidth_mbps));
        lines.push(format!("SNR: {:.2} dB", metrics.snr_db));
        lines.push(format!("Timestamp: {}", metrics.timestamp));
        lines.push(self.banner(FOOTER));
        lines.join("\n")
    }

    pub fn print(&self, metrics: &LinkMetrics) {
        println!("{}", self.render(metrics));
    }
}
