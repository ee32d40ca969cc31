//! Error types emitted by the Ramble CLI.
//!
//! Keep this error type reasonably small, as CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use ramble_core::{NetworkError, SolveError};
use thiserror::Error;

/// Errors emitted by the Ramble CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        field: &'static str,
        env: &'static str,
    },
    /// The logger could not be installed.
    #[error("failed to initialise logging: {0}")]
    Logging(#[from] log::SetLoggerError),
    /// Opening the city snapshot failed.
    #[error("failed to open snapshot at {path:?}: {source}")]
    OpenSnapshot {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Snapshot JSON could not be decoded.
    #[error("failed to parse snapshot JSON at {path:?}: {source}")]
    ParseSnapshot {
        path: Utf8PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// The snapshot's street network is inconsistent.
    #[error("snapshot at {path:?} holds an invalid network: {source}")]
    InvalidNetwork {
        path: Utf8PathBuf,
        #[source]
        source: NetworkError,
    },
    /// The solver rejected the request.
    #[error("planning failed: {source}")]
    Solve { source: SolveError },
    /// Serialising the plan failed.
    #[error("failed to serialise plan: {0}")]
    SerialisePlan(#[source] serde_json::Error),
    /// Creating the output file failed.
    #[error("failed to create output file {path:?}: {source}")]
    CreateOutput {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Writing the plan failed.
    #[error("failed to write plan output: {0}")]
    WritePlanOutput(#[source] std::io::Error),
}
