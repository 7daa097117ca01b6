//! Minimal HTTP/1.1 routing for the metrics endpoint
//!
//! Only the request line is examined. Headers and bodies are ignored, every
//! response closes the connection.

use crate::render::to_json;
use crate::sampler::MetricsSource;
use std::sync::Mutex;
use tracing::{debug, warn};

pub const CONTENT_TYPE_JSON: &str = "application/json";
pub const CONTENT_TYPE_TEXT: &str = "text/plain";

/// Fixed routes served by the endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Metrics,
    Health,
    NotFound,
}

impl Route {
    /// Resolve a route from the first line of a request.
    ///
    /// Query strings are ignored, so `GET /metrics?x=1` still hits `Metrics`.
    pub fn from_request_line(line: &str) -> Self {
        let mut parts = line.split_whitespace();
        let (Some(method), Some(target)) = (parts.next(), parts.next()) else {
            return Route::NotFound;
        };
        if method != "GET" {
            return Route::NotFound;
        }

        let path = target.split('?').next().unwrap_or(target);
        match path {
            "/metrics" => Route::Metrics,
            "/health" => Route::Health,
            _ => Route::NotFound,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
}

impl HttpResponse {
    pub fn ok_json(body: String) -> Self {
        Self {
            status: 200,
            content_type: CONTENT_TYPE_JSON,
            body,
        }
    }

    pub fn ok_text(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            content_type: CONTENT_TYPE_TEXT,
            body: body.into(),
        }
    }

    pub fn not_found() -> Self {
        Self {
            status: 404,
            content_type: CONTENT_TYPE_TEXT,
            body: "Not Found".to_string(),
        }
    }

    pub fn internal_error() -> Self {
        Self {
            status: 500,
            content_type: CONTENT_TYPE_TEXT,
            body: "Internal Server Error".to_string(),
        }
    }

    pub fn reason(&self) -> &'static str {
        match self.status {
            200 => "OK",
            404 => "Not Found",
            _ => "Internal Server Error",
        }
    }

    /// Serialize status line, headers and body for the wire.
    pub fn to_bytes(&self) -> Vec<u8> {
        format!(
            "HTTP/1.1 {} {}\r\n\
             Content-Type: {}\r\n\
             Content-Length: {}\r\n\
             Access-Control-Allow-Origin: *\r\n\
             Connection: close\r\n\
             \r\n\
             {}",
            self.status,
            self.reason(),
            self.content_type,
            self.body.len(),
            self.body
        )
        .into_bytes()
    }
}

/// Build the response for a raw request.
///
/// The sampler lock is only taken for `/metrics`, so health checks never
/// contend with sample generation.
pub fn dispatch<S: MetricsSource + ?Sized>(request: &str, source: &Mutex<S>) -> HttpResponse {
    let request_line = request.lines().next().unwrap_or_default();
    let route = Route::from_request_line(request_line);
    debug!(request_line = request_line, route = ?route, "Dispatching request");

    match route {
        Route::Metrics => {
            let metrics = {
                let mut source = source.lock().unwrap_or_else(|e| e.into_inner());
                source.next_sample()
            };
            match to_json(&metrics) {
                Ok(body) => HttpResponse::ok_json(body),
                Err(e) => {
                    warn!(error = %e, "Failed to render sample");
                    HttpResponse::internal_error()
                }
            }
        }
        Route::Health => HttpResponse::ok_text("OK"),
        Route::NotFound => HttpResponse::not_found(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampler::LinkMetrics;
    use mockall::mock;

    mock! {
        pub Source {}

        impl MetricsSource for Source {
            fn next_sample(&mut self) -> LinkMetrics;
        }
    }

    fn fixed_sample() -> LinkMetrics {
        LinkMetrics {
            latency_ms: 15.5,
            jitter_ms: 1.25,
            signal_strength_db: -65.0,
            packet_loss_rate: 0.75,
            bandwidth_mbps: 525.0,
            snr_db: -50.0,
            timestamp: 1_700_000_000,
        }
    }

    #[test]
    fn test_route_matching() {
        assert_eq!(Route::from_request_line("GET /metrics HTTP/1.1"), Route::Metrics);
        assert_eq!(Route::from_request_line("GET /health HTTP/1.1"), Route::Health);
        assert_eq!(Route::from_request_line("GET /metrics?fmt=x HTTP/1.1"), Route::Metrics);
        assert_eq!(Route::from_request_line("GET /metrics"), Route::Metrics);
        assert_eq!(Route::from_request_line("GET /nonexistent HTTP/1.1"), Route::NotFound);
        assert_eq!(Route::from_request_line("POST /metrics HTTP/1.1"), Route::NotFound);
        assert_eq!(Route::from_request_line("GET /metricsfoo HTTP/1.1"), Route::NotFound);
        assert_eq!(Route::from_request_line("GET"), Route::NotFound);
        assert_eq!(Route::from_request_line(""), Route::NotFound);
    }

    #[test]
    fn test_metrics_draws_one_sample() {
        let mut source = MockSource::new();
        source.expect_next_sample().times(1).returning(fixed_sample);
        let source = Mutex::new(source);

        let response = dispatch("GET /metrics HTTP/1.1\r\nHost: x\r\n\r\n", &source);
        assert_eq!(response.status, 200);
        assert_eq!(response.content_type, CONTENT_TYPE_JSON);

        let parsed: LinkMetrics = serde_json::from_str(&response.body).unwrap();
        assert_eq!(parsed, fixed_sample());
    }

    #[test]
    fn test_health_does_not_sample() {
        let mut source = MockSource::new();
        source.expect_next_sample().times(0);
        let source = Mutex::new(source);

        let response = dispatch("GET /health HTTP/1.1\r\n\r\n", &source);
        assert_eq!(response.status, 200);
        assert_eq!(response.content_type, CONTENT_TYPE_TEXT);
        assert_eq!(response.body, "OK");
    }

    #[test]
    fn test_unknown_route() {
        let mut source = MockSource::new();
        source.expect_next_sample().times(0);
        let source = Mutex::new(source);

        let response = dispatch("GET /nonexistent HTTP/1.1\r\n\r\n", &source);
        assert_eq!(response.status, 404);
        assert_eq!(response.body, "Not Found");
    }

    #[test]
    fn test_unrenderable_sample_is_internal_error() {
        let mut source = MockSource::new();
        source.expect_next_sample().times(1).returning(|| LinkMetrics {
            snr_db: f64::NAN,
            ..fixed_sample()
        });
        let source = Mutex::new(source);

        let response = dispatch("GET /metrics HTTP/1.1\r\n\r\n", &source);
        assert_eq!(response.status, 500);
        assert_eq!(response.content_type, CONTENT_TYPE_TEXT);
    }

    #[test]
    fn test_response_wire_format() {
        let bytes = HttpResponse::ok_text("OK").to_bytes();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(
            text,
            "HTTP/1.1 200 OK\r\n\
             Content-Type: text/plain\r\n\
             Content-Length: 2\r\n\
             Access-Control-Allow-Origin: *\r\n\
             Connection: close\r\n\
             \r\n\
             OK"
        );
    }

    #[test]
    fn test_not_found_wire_format() {
        let text = String::from_utf8(HttpResponse::not_found().to_bytes()).unwrap();
        assert!(text.starts_with("HTTP/1.1 404 Not Found\r\n"));
        assert!(text.contains("Content-Length: 9\r\n"));
        assert!(text.ends_with("\r\n\r\nNot Found"));
    }
}
