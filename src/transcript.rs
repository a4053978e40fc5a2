//! Transcript resolution: pick a track by language preference, then fetch it.
//!
//! The search runs in three stages. Each preferred language is tried in the
//! caller's order, then any generated track for the preferred set, then
//! whatever the provider listed first. Language order always wins over track
//! quality.

use async_trait::async_trait;
use log::{debug, info, warn};
use serde::Serialize;

use crate::{Cue, Error, Result, Track, TrackList, extract_video_id};

pub const DEFAULT_LANGUAGES: [&str; 3] = ["en", "es", "ca"];

/// Language reported when a generated track was picked by the group fallback
pub const AUTO_LANGUAGE: &str = "auto";

/// Source of transcript tracks and cues
#[async_trait]
pub trait TranscriptProvider: Send + Sync {
    /// List every track available for a video
    async fn list_tracks(&self, video_id: &str) -> Result<TrackList>;

    /// Fetch the cues of a single track, in order
    async fn fetch_cues(&self, track: &Track) -> Result<Vec<Cue>>;
}

/// How a track was chosen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Matched the preferred language at this code
    Preferred(String),
    /// Generated track matching the preferred set as a group
    GeneratedFallback,
    /// First track the provider listed
    AnyAvailable(String),
}

impl Selection {
    pub fn language(&self) -> &str {
        match self {
            Selection::Preferred(code) | Selection::AnyAvailable(code) => code,
            Selection::GeneratedFallback => AUTO_LANGUAGE,
        }
    }
}

/// Choose a track from `list` following the language preference order
pub fn select_track<'a, S: AsRef<str>>(list: &'a TrackList, languages: &[S]) -> Option<(&'a Track, Selection)> {
    for code in languages {
        let code: &str = code.as_ref();
        if let Some(track) = list.find(&[code]) {
            return Some((track, Selection::Preferred(code.to_string())));
        }
    }

    if let Some(track) = list.find_generated(languages) {
        return Some((track, Selection::GeneratedFallback));
    }

    list.first()
        .map(|track| (track, Selection::AnyAvailable(track.language_code.clone())))
}

/// Successfully resolved transcript
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved {
    pub video_id: String,
    pub title: Option<String>,
    pub language: String,
    pub text: String,
}

/// Resolve `video_id` to transcript text using `provider`
pub async fn resolve<S: AsRef<str>>(
    provider: &dyn TranscriptProvider,
    video_id: &str,
    languages: &[S],
) -> Result<Resolved> {
    let list = provider.list_tracks(video_id).await?;
    debug!("{} tracks listed for {video_id}", list.tracks.len());

    let (track, selection) = select_track(&list, languages).ok_or(Error::NoTranscriptAvailable)?;
    debug!(
        "Selected track lang={} kind={:?} via {selection:?}",
        track.language_code, track.kind
    );

    let cues = provider.fetch_cues(track).await?;
    let text = cues.iter().map(|c| c.text.as_str()).collect::<Vec<_>>().join(" ");

    Ok(Resolved {
        video_id: video_id.to_string(),
        title: list.title.clone(),
        language: selection.language().to_string(),
        text,
    })
}

/// Response body for a single transcript request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TranscriptResult {
    pub video_id: String,
    pub title: Option<String>,
    pub transcript: String,
    pub language: String,
    pub success: bool,
    pub error: Option<String>,
}

impl TranscriptResult {
    pub fn failure(video_id: &str, err: &Error) -> Self {
        Self {
            video_id: video_id.to_string(),
            title: None,
            transcript: String::new(),
            language: String::new(),
            success: false,
            error: Some(err.to_string()),
        }
    }
}

impl From<Resolved> for TranscriptResult {
    fn from(r: Resolved) -> Self {
        Self {
            video_id: r.video_id,
            title: r.title,
            transcript: r.text,
            language: r.language,
            success: true,
            error: None,
        }
    }
}

/// Parse `url`, resolve its transcript and fold any failure into the result.
///
/// Failures carry the raw input as `video_id`, except an empty track list,
/// which carries the parsed ID.
pub async fn transcript_for_url<S: AsRef<str>>(
    provider: &dyn TranscriptProvider,
    url: &str,
    languages: &[S],
) -> TranscriptResult {
    let video_id = match extract_video_id(url) {
        Ok(id) => id,
        Err(e) => {
            warn!("{e}");
            return TranscriptResult::failure(url, &e);
        }
    };

    match resolve(provider, &video_id, languages).await {
        Ok(resolved) => {
            info!(
                "Resolved transcript for {video_id}: lang={} chars={}",
                resolved.language,
                resolved.text.chars().count()
            );
            resolved.into()
        }
        Err(e @ Error::NoTranscriptAvailable) => {
            warn!("No transcript for {video_id}");
            TranscriptResult::failure(&video_id, &e)
        }
        Err(e) => {
            warn!("Transcript for {video_id} failed ({:?}): {e}", e.kind());
            TranscriptResult::failure(url, &e)
        }
    }
}
