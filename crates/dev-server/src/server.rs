//! Blocking, one-connection-at-a-time server loop.

use std::io::{BufReader, BufWriter};
use std::net::{SocketAddr, TcpListener, TcpStream, ToSocketAddrs};
use std::thread;
use std::time::Duration;

use tracing::{info, warn};

use crate::errors::{RequestError, ServeError};
use crate::handler::Dispatcher;
use crate::http::{Method, Request, StatusCode};

/// Pause after a failed accept so a persistent error (e.g. EMFILE) does
/// not spin the loop.
const ACCEPT_BACKOFF: Duration = Duration::from_millis(10);

/// A bound listener plus the dispatcher answering its requests.
pub struct DevServer {
    listener: TcpListener,
    dispatcher: Dispatcher,
}

impl DevServer {
    pub fn bind(addr: impl ToSocketAddrs, dispatcher: Dispatcher) -> Result<Self, ServeError> {
        let listener = TcpListener::bind(addr)?;
        Ok(Self {
            listener,
            dispatcher,
        })
    }

    /// Bind all interfaces on `port`.
    pub fn bind_port(port: u16, dispatcher: Dispatcher) -> Result<Self, ServeError> {
        let listener = TcpListener::bind(("0.0.0.0", port))
            .map_err(|source| ServeError::Bind { port, source })?;
        Ok(Self {
            listener,
            dispatcher,
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr, ServeError> {
        Ok(self.listener.local_addr()?)
    }

    /// Accept one connection and answer its request. Failures on the
    /// connection itself are logged; only a failed accept is returned.
    pub fn handle_next(&self) -> Result<(), ServeError> {
        let (stream, peer) = self.listener.accept()?;
        if let Err(e) = self.handle_connection(&stream, peer) {
            warn!(%peer, error = %e, "connection failed");
        }
        Ok(())
    }

    /// Run `count` accept steps. A failed accept uses up its step and is
    /// logged; the remaining steps still run.
    pub fn serve_connections(&self, count: usize) {
        drive(count, || self.handle_next());
    }

    /// Serve until the process is interrupted.
    pub fn serve_forever(&self) -> ! {
        info!(addr = ?self.listener.local_addr().ok(), "serving");
        loop {
            drive(usize::MAX, || self.handle_next());
        }
    }

    fn handle_connection(&self, stream: &TcpStream, peer: SocketAddr) -> std::io::Result<()> {
        let mut reader = BufReader::new(stream);
        let (response, head_only, line) = match Request::read_from(&mut reader) {
            Ok(req) => {
                let line = format!("{} {} {}", req.method.as_str(), req.target, req.version);
                (self.dispatcher.dispatch(&req), req.method == Method::Head, line)
            }
            Err(RequestError::ConnectionClosed) => return Ok(()),
            Err(RequestError::Io(e)) => return Err(e),
            Err(e) => {
                warn!(%peer, error = %e, "rejecting request");
                (self.dispatcher.reject(&e), false, String::from("-"))
            }
        };

        response.write_to(BufWriter::new(stream), head_only)?;
        log_request(peer, &line, response.status);
        Ok(())
    }
}

/// Run `rounds` steps of the accept loop. A failed step is logged and the
/// loop carries on.
fn drive(rounds: usize, mut step: impl FnMut() -> Result<(), ServeError>) {
    for _ in 0..rounds {
        if let Err(e) = step() {
            warn!(error = %e, "accept failed");
            thread::sleep(ACCEPT_BACKOFF);
        }
    }
}

fn log_request(peer: SocketAddr, request_line: &str, status: StatusCode) {
    info!(
        %peer,
        request = request_line,
        status = status.as_u16(),
        "request"
    );
}
