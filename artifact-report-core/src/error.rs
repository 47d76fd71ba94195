//! Error types for the reporting pipeline.
//!
//! A failed fetch is always an explicit `Err`; nothing in the pipeline turns an
//! error into an empty or partial listing on its own. The aggregator decides what
//! to do with an artifact failure according to [`crate::config::FailurePolicy`].

use thiserror::Error;

/// Failure while fetching a single page from the remote listing endpoints.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request could not be sent or the connection failed.
    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },

    /// The endpoint answered with a non-success HTTP status.
    #[error("{url} returned HTTP {status}: {body}")]
    Status { url: String, status: u16, body: String },

    /// The body could not be decoded into the expected shape.
    #[error("failed to decode response from {url}: {message}")]
    Decode { url: String, message: String },
}

/// Error type for the [`crate::contract::ReportSink`] seam (boxed, sink implementations vary).
pub type SinkError = Box<dyn std::error::Error + Send + Sync>;

/// Failure of a whole report run.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to list repositories: {0}")]
    Repositories(#[source] FetchError),

    #[error("failed to list artifacts for {repository}: {source}")]
    Artifacts {
        repository: String,
        source: FetchError,
    },

    #[error("failed to publish report: {0}")]
    Sink(SinkError),
}
