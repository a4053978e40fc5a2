//! Error types shared by the extraction and transcript pipelines.
//!
//! Every variant renders to the message that ends up in the `error` field of
//! a response body, so the `Display` strings are part of the wire contract.

use thiserror::Error;

/// Broad failure category, used for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidReference,
    TranscriptsDisabled,
    NoTranscriptAvailable,
    Transport,
    Parse,
    Unknown,
}

#[derive(Error, Debug)]
pub enum Error {
    /// Input could not be mapped to a video identifier.
    #[error("Could not extract video ID from: {0}")]
    InvalidReference(String),

    #[error("Transcripts are disabled for this video")]
    TranscriptsDisabled,

    /// The provider refused to serve the video at all.
    #[error("Video unavailable: {0}")]
    VideoUnavailable(String),

    #[error("No transcript available")]
    NoTranscriptAvailable,

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Non-success HTTP status from an upstream server.
    #[error("HTTP error {status}")]
    Http { status: u16 },

    #[error("Request timed out after {secs} seconds")]
    Timeout { secs: u64 },

    #[error("{0}")]
    Transport(String),

    /// Markup, selector or caption payload could not be understood.
    #[error("{0}")]
    Parse(String),

    #[error("{0}")]
    Unknown(String),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidReference(_) => ErrorKind::InvalidReference,
            Error::TranscriptsDisabled => ErrorKind::TranscriptsDisabled,
            Error::NoTranscriptAvailable => ErrorKind::NoTranscriptAvailable,
            Error::VideoUnavailable(_)
            | Error::InvalidUrl(_)
            | Error::Http { .. }
            | Error::Timeout { .. }
            | Error::Transport(_) => ErrorKind::Transport,
            Error::Parse(_) => ErrorKind::Parse,
            Error::Unknown(_) => ErrorKind::Unknown,
        }
    }

    /// Classify a reqwest failure. `timeout_secs` is the bound the client was built with.
    pub fn from_reqwest(err: reqwest::Error, timeout_secs: u64) -> Self {
        if err.is_timeout() {
            Error::Timeout { secs: timeout_secs }
        } else if let Some(status) = err.status() {
            Error::Http { status: status.as_u16() }
        } else if err.is_decode() {
            Error::Parse(err.to_string())
        } else {
            Error::Transport(err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
