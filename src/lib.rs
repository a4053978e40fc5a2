pub mod batch;
pub mod config;
pub mod error;
pub mod scrape;
pub mod server;
pub mod transcript;
pub mod youtube;

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

pub use error::{Error, ErrorKind, Result};

/// A single timed caption entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cue {
    pub text: String,
    pub start: f64,
    pub duration: f64,
}

/// Whether a track was written by a person or generated by speech recognition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TrackKind {
    Manual,
    Generated,
}

/// One language-specific transcript stream for a video
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Track {
    pub language_code: String,
    pub name: String,
    pub kind: TrackKind,
    /// Provider-specific locator used to fetch the cues
    pub base_url: String,
}

impl Track {
    pub fn is_generated(&self) -> bool {
        self.kind == TrackKind::Generated
    }
}

/// Tracks available for a video, in the provider's enumeration order
#[derive(Debug, Clone, Default)]
pub struct TrackList {
    pub video_id: String,
    pub title: Option<String>,
    pub tracks: Vec<Track>,
}

impl TrackList {
    /// First track matching one of `codes`, trying codes in order.
    /// For each code a manual track beats a generated one.
    pub fn find<S: AsRef<str>>(&self, codes: &[S]) -> Option<&Track> {
        codes.iter().find_map(|code| {
            let code: &str = code.as_ref();
            self.find_kind(code, TrackKind::Manual)
                .or_else(|| self.find_kind(code, TrackKind::Generated))
        })
    }

    /// First generated track matching one of `codes`, trying codes in order
    pub fn find_generated<S: AsRef<str>>(&self, codes: &[S]) -> Option<&Track> {
        codes
            .iter()
            .find_map(|code| self.find_kind(code.as_ref(), TrackKind::Generated))
    }

    pub fn first(&self) -> Option<&Track> {
        self.tracks.first()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    fn find_kind(&self, code: &str, kind: TrackKind) -> Option<&Track> {
        self.tracks.iter().find(|t| t.kind == kind && t.language_code == code)
    }
}

static EMBEDDED_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:v=|/v/|youtu\.be/|/embed/)([a-zA-Z0-9_-]{11})").expect("valid regex"));

static BARE_ID: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^([a-zA-Z0-9_-]{11})$").expect("valid regex"));

/// Extract the 11-character video ID from a YouTube URL or a bare ID.
///
/// Marker-embedded IDs (`v=`, `/v/`, `youtu.be/`, `/embed/`) are tried first,
/// then the whole input as a bare ID.
pub fn extract_video_id(input: &str) -> Result<String> {
    for re in [&*EMBEDDED_ID, &*BARE_ID] {
        if let Some(caps) = re.captures(input) {
            return Ok(caps[1].to_string());
        }
    }

    Err(Error::InvalidReference(input.to_string()))
}
