use link_sim::sampler::{LinkBounds, LinkMetrics, MetricsSampler};
use link_sim::server::{MetricsServer, ServerMonitor};
use link_sim::shutdown::CancellationToken;
use link_sim::Result;
use std::io::{Read, Write};
use std::net::{SocketAddr, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

/// Test helper: start a server on an ephemeral port in a background thread
fn start_test_server() -> Result<(SocketAddr, ServerMonitor)> {
    let server = MetricsServer::bind("127.0.0.1:0")?;
    let addr = server.local_addr()?;
    let monitor = ServerMonitor::new(100);
    let counters = monitor.counters();
    let sampler: MetricsSampler = MetricsSampler::with_seed(LinkBounds::default(), 2024);

    thread::spawn(move || {
        let _ = server.serve(
            Arc::new(Mutex::new(sampler)),
            counters,
            CancellationToken::new(),
        );
    });

    Ok((addr, monitor))
}

/// Test helper: send a raw request and read the whole response
fn send_request(addr: SocketAddr, request: &str) -> Result<String> {
    let mut stream = TcpStream::connect(addr)?;
    stream.set_read_timeout(Some(Duration::from_secs(5)))?;
    stream.write_all(request.as_bytes())?;

    let mut response = String::new();
    stream.read_to_string(&mut response)?;
    Ok(response)
}

/// Split a response into status line, headers and body
fn parse_response(response: &str) -> (String, Vec<String>, String) {
    let (head, body) = response
        .split_once("\r\n\r\n")
        .expect("response has a header terminator");
    let mut lines = head.split("\r\n");
    let status = lines.next().unwrap_or_default().to_string();
    let headers = lines.map(str::to_string).collect();
    (status, headers, body.to_string())
}

fn assert_common_headers(headers: &[String], body: &str) {
    assert!(headers.contains(&"Access-Control-Allow-Origin: *".to_string()));
    assert!(headers.contains(&"Connection: close".to_string()));
    assert!(headers.contains(&format!("Content-Length: {}", body.len())));
}

#[test]
fn test_metrics_endpoint() -> Result<()> {
    let (addr, _monitor) = start_test_server()?;

    let response = send_request(addr, "GET /metrics HTTP/1.1\r\nHost: localhost\r\n\r\n")?;
    let (status, headers, body) = parse_response(&response);

    assert_eq!(status, "HTTP/1.1 200 OK");
    assert!(headers.contains(&"Content-Type: application/json".to_string()));
    assert_common_headers(&headers, &body);

    let bounds = LinkBounds::default();
    let metrics: LinkMetrics = serde_json::from_str(&body)?;
    assert!(metrics.signal_strength_db >= bounds.signal_strength_min_db);
    assert!(metrics.signal_strength_db <= bounds.signal_strength_max_db);
    assert!(metrics.packet_loss_rate >= 0.0);
    assert!(metrics.packet_loss_rate <= bounds.packet_loss_max_percent);
    assert!(metrics.bandwidth_mbps >= bounds.bandwidth_min_mbps);
    assert!(metrics.bandwidth_mbps <= bounds.bandwidth_max_mbps);
    assert!(metrics.jitter_ms >= 0.1 && metrics.jitter_ms <= bounds.jitter_range_ms);
    // Rounding to two decimals moves each field by at most 0.005
    assert!(metrics.snr_db >= metrics.signal_strength_db + 10.0 - 0.02);
    assert!(metrics.snr_db <= metrics.signal_strength_db + 20.0 + 0.02);
    assert!(metrics.timestamp > 0);
    Ok(())
}

#[test]
fn test_health_endpoint() -> Result<()> {
    let (addr, _monitor) = start_test_server()?;

    let response = send_request(addr, "GET /health HTTP/1.1\r\n\r\n")?;
    let (status, headers, body) = parse_response(&response);

    assert_eq!(status, "HTTP/1.1 200 OK");
    assert!(headers.contains(&"Content-Type: text/plain".to_string()));
    assert_common_headers(&headers, &body);
    assert_eq!(body, "OK");
    Ok(())
}

#[test]
fn test_unknown_endpoint() -> Result<()> {
    let (addr, _monitor) = start_test_server()?;

    let response = send_request(addr, "GET /nonexistent HTTP/1.1\r\n\r\n")?;
    let (status, headers, body) = parse_response(&response);

    assert_eq!(status, "HTTP/1.1 404 Not Found");
    assert_common_headers(&headers, &body);
    assert_eq!(body, "Not Found");
    Ok(())
}

#[test]
fn test_consecutive_samples_both_valid() -> Result<()> {
    let (addr, monitor) = start_test_server()?;
    let bounds = LinkBounds::default();

    let mut samples = Vec::new();
    for _ in 0..2 {
        let response = send_request(addr, "GET /metrics HTTP/1.1\r\n\r\n")?;
        let (_, _, body) = parse_response(&response);
        let metrics: LinkMetrics = serde_json::from_str(&body)?;
        assert!(metrics.bandwidth_mbps >= bounds.bandwidth_min_mbps);
        assert!(metrics.bandwidth_mbps <= bounds.bandwidth_max_mbps);
        samples.push(metrics);
    }
    assert_eq!(samples.len(), 2);

    // Counters are bumped before the response is written
    assert_eq!(monitor.stats().served, 2);
    Ok(())
}

#[test]
fn test_concurrent_clients() -> Result<()> {
    let (addr, _monitor) = start_test_server()?;

    let handles: Vec<_> = (0..8)
        .map(|_| thread::spawn(move || send_request(addr, "GET /metrics HTTP/1.1\r\n\r\n")))
        .collect();

    for handle in handles {
        let response = handle.join().expect("client thread")?;
        assert!(response.starts_with("HTTP/1.1 200 OK\r\n"));
    }
    Ok(())
}

#[test]
fn test_silent_client_gets_no_response() -> Result<()> {
    let (addr, _monitor) = start_test_server()?;

    let mut stream = TcpStream::connect(addr)?;
    stream.set_read_timeout(Some(Duration::from_secs(5)))?;
    stream.shutdown(std::net::Shutdown::Write)?;

    let mut response = String::new();
    stream.read_to_string(&mut response)?;
    assert!(response.is_empty());

    // Server still answers the next client
    let response = send_request(addr, "GET /health HTTP/1.1\r\n\r\n")?;
    assert!(response.ends_with("OK"));
    Ok(())
}
