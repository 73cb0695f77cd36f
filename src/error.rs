use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Config directory not found at {0}. Run 'supplytrack init' to create it.")]
    ConfigNotFound(PathBuf),

    #[error("Config file not found: {0}")]
    ConfigFileNotFound(PathBuf),

    #[error("Failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config directory already exists at {0}")]
    AlreadyInitialized(PathBuf),

    #[error("Missing {0}. Select a school and fetch its requests first.")]
    MissingContext(&'static str),

    #[error("No requests selected. Select at least one request before generating.")]
    EmptySelection,

    #[error("Sharing is not available: {0}")]
    CapabilityUnavailable(String),

    #[error("Failed to fetch from the supply API: {0}")]
    UpstreamFetch(String),

    #[error("School '{0}' not found. Run 'supplytrack schools' to list them.")]
    SchoolNotFound(String),

    #[error("Request '{0}' is not part of the fetched result")]
    UnknownRequestId(String),

    #[error("A {0} build is already in progress")]
    Busy(&'static str),

    #[error("Typst not found. Install it from https://typst.app/ or run: cargo install typst-cli")]
    TypstNotFound,

    #[error("Failed to generate PDF: {0}")]
    PdfGeneration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ReportError>;
