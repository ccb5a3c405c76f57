use std::path::PathBuf;

/// Errors while writing an STL file.
#[derive(Debug, thiserror::Error)]
pub enum StlError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors while generating the asset set.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("failed to create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to generate {file_name}: {source}")]
    Write {
        file_name: String,
        #[source]
        source: StlError,
    },
}

/// Errors while reading configuration from the environment.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} is set but empty")]
    Empty { var: &'static str },

    #[error("{var} is not valid unicode")]
    NotUnicode { var: &'static str },
}
