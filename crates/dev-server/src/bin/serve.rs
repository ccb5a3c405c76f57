//! Serve the Hex3World demo from the current directory.

use std::process::{self, ExitCode};

use dev_server::{find_free_port, DevServer, Dispatcher, ServeError, ServerConfig};
use tracing_subscriber::EnvFilter;

fn run() -> Result<(), ServeError> {
    let config = ServerConfig::from_env()?;

    let port = match find_free_port(config.base_port, config.max_attempts) {
        Ok(port) => port,
        Err(e) => {
            println!("Could not find a free port");
            return Err(e);
        }
    };

    let root = std::fs::canonicalize(&config.root)?;
    let server = DevServer::bind_port(port, Dispatcher::new(&root, &config.binary_extension))?;

    ctrlc::set_handler(|| {
        println!("\nServer stopped");
        process::exit(0);
    })
    .map_err(|e| ServeError::Io(std::io::Error::other(e)))?;

    println!("Serving Hex3World demo at http://localhost:{port}");
    println!("Serving from: {}", root.display());
    println!("Open http://localhost:{port}/demo.html in your browser");
    println!("Press Ctrl+C to stop the server");

    server.serve_forever()
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
