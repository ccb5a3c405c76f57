//! Free-port discovery.

use std::net::TcpListener;

use tracing::debug;

use crate::errors::ServeError;

pub const DEFAULT_BASE_PORT: u16 = 8000;
pub const DEFAULT_ATTEMPTS: u16 = 100;

/// Whether `port` can currently be bound on all interfaces. The probe
/// socket is closed again before returning.
pub fn port_is_free(port: u16) -> bool {
    TcpListener::bind(("0.0.0.0", port)).is_ok()
}

/// Scan `start`, `start + 1`, ... for up to `attempts` ports and return
/// the first one `probe` accepts. The scan stops early at `u16::MAX`.
pub fn find_free_port_with(
    start: u16,
    attempts: u16,
    mut probe: impl FnMut(u16) -> bool,
) -> Result<u16, ServeError> {
    for port in (start..=u16::MAX).take(attempts as usize) {
        if probe(port) {
            return Ok(port);
        }
        debug!(port, "port in use");
    }
    Err(ServeError::NoFreePort { start, attempts })
}

/// [`find_free_port_with`] probing real sockets.
pub fn find_free_port(start: u16, attempts: u16) -> Result<u16, ServeError> {
    find_free_port_with(start, attempts, port_is_free)
}
