//! TCP accept loop serving one response per connection

use crate::error::{LinkSimError, Result};
use crate::sampler::MetricsSource;
use crate::server::http::dispatch;
use crate::server::monitor::ServerCounters;
use crate::shutdown::CancellationToken;
use std::io::{ErrorKind, Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Requests longer than this are truncated; only the request line matters.
pub const REQUEST_BUFFER_SIZE: usize = 1024;

/// How long an idle accept loop sleeps before polling again
pub const ACCEPT_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Bound listener for the metrics endpoint
#[derive(Debug)]
pub struct MetricsServer {
    listener: TcpListener,
}

impl MetricsServer {
    /// Bind the listening socket. Failure here is fatal for server mode.
    pub fn bind(addr: &str) -> Result<Self> {
        let listener = TcpListener::bind(addr).map_err(|e| {
            let reason = if e.kind() == ErrorKind::AddrInUse {
                "Address already in use. Try a different port or ensure no other process is using it."
                    .to_string()
            } else {
                e.to_string()
            };
            LinkSimError::Bind {
                addr: addr.to_string(),
                reason,
            }
        })?;
        debug!(address = addr, "Listener bound");
        Ok(Self { listener })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Accept connections until `shutdown` is cancelled.
    ///
    /// Each connection is handled on its own thread; all of them share the
    /// sampler so the random stream stays single. Accept errors are logged
    /// and the loop keeps going. The listener is polled in non-blocking mode
    /// so an idle server notices cancellation within `ACCEPT_POLL_INTERVAL`.
    pub fn serve<S>(
        self,
        sampler: Arc<Mutex<S>>,
        counters: ServerCounters,
        shutdown: CancellationToken,
    ) -> Result<()>
    where
        S: MetricsSource + 'static,
    {
        self.listener.set_nonblocking(true)?;
        info!(address = %self.local_addr()?, "Metrics endpoint listening");

        while !shutdown.is_cancelled() {
            match self.listener.accept() {
                Ok((stream, _)) => {
                    // Some platforms hand out accepted sockets in the listener's mode
                    if let Err(e) = stream.set_nonblocking(false) {
                        counters.increment_error();
                        warn!(error = %e, "Failed to configure accepted connection");
                        continue;
                    }
                    let sampler = Arc::clone(&sampler);
                    let counters = counters.clone();
                    thread::spawn(move || handle_connection(stream, sampler.as_ref(), &counters));
                }
                Err(e) if e.kind() == ErrorKind::WouldBlock => {
                    shutdown.wait_timeout(ACCEPT_POLL_INTERVAL);
                }
                Err(e) => {
                    counters.increment_error();
                    error!(error = %e, "Failed to accept connection");
                }
            }
        }

        info!("Shutdown requested, no longer accepting connections");
        Ok(())
    }
}

/// Read one request, answer it, and close the connection.
pub fn handle_connection<S: MetricsSource + ?Sized>(
    mut stream: TcpStream,
    sampler: &Mutex<S>,
    counters: &ServerCounters,
) {
    let peer_addr = stream.peer_addr().ok();
    let mut buf = [0u8; REQUEST_BUFFER_SIZE];

    let len = match stream.read(&mut buf) {
        Ok(0) => {
            debug!(peer = ?peer_addr, "Client closed without sending a request");
            return;
        }
        Ok(len) => len,
        Err(e) => {
            counters.increment_error();
            warn!(error = %e, peer = ?peer_addr, "Failed to read request");
            return;
        }
    };

    let request = String::from_utf8_lossy(&buf[..len]);
    let response = dispatch(&request, sampler);

    counters.record_status(response.status);

    if let Err(e) = stream.write_all(&response.to_bytes()).and_then(|_| stream.flush()) {
        counters.increment_error();
        warn!(error = %e, peer = ?peer_addr, "Failed to send response");
        return;
    }

    info!(peer = ?peer_addr, status = response.status, "Request served");
}
