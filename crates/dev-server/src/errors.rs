/// Errors that stop the server (or keep it from starting).
#[derive(Debug, thiserror::Error)]
pub enum ServeError {
    #[error("no free port among {attempts} ports starting at {start}")]
    NoFreePort { start: u16, attempts: u16 },

    #[error("failed to bind port {port}: {source}")]
    Bind {
        port: u16,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors while reading one HTTP request off a connection.
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("connection closed before a request was received")]
    ConnectionClosed,

    #[error("malformed request: {0}")]
    Malformed(String),

    #[error("request line or header exceeds {limit} bytes")]
    LineTooLong { limit: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors while reading server configuration from the environment.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("{var}={value:?} is not a valid {expected}")]
    Invalid {
        var: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("{var} is not valid unicode")]
    NotUnicode { var: &'static str },
}
