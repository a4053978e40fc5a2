use futures::FutureExt;
use futures::stream::{self, StreamExt};
use log::info;
use serde::Serialize;

use crate::transcript::{TranscriptProvider, TranscriptResult, transcript_for_url};

/// Response body for a batch transcript request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchResult {
    pub results: Vec<TranscriptResult>,
    pub total: usize,
}

/// Resolve every URL with the shared language list.
///
/// Up to `concurrency` lookups run at once; results come back in input order
/// and a failing URL only affects its own entry.
pub async fn transcripts_for_urls(
    provider: &dyn TranscriptProvider,
    urls: &[String],
    languages: &[String],
    concurrency: usize,
) -> BatchResult {
    // Boxed so the handler future stays provably Send
    let lookups: Vec<_> = urls
        .iter()
        .map(|url| transcript_for_url(provider, url, languages).boxed())
        .collect();

    let results: Vec<TranscriptResult> = stream::iter(lookups)
        .buffered(concurrency.max(1))
        .collect()
        .await;

    let ok = results.iter().filter(|r| r.success).count();
    info!("Batch finished: {ok}/{} transcripts resolved", results.len());

    BatchResult {
        total: results.len(),
        results,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TrackKind;
    use crate::transcript::fake::FakeProvider;

    fn langs() -> Vec<String> {
        vec!["en".to_string(), "es".to_string()]
    }

    #[tokio::test]
    async fn test_batch_isolates_failures_and_keeps_order() {
        let provider = FakeProvider::default()
            .with_video("aaaaaaaaaaa", vec![("en", TrackKind::Manual, vec!["first"])])
            .with_video("ccccccccccc", vec![("es", TrackKind::Generated, vec!["tercero"])])
            .with_disabled("ddddddddddd");

        let urls = vec![
            "https://www.youtube.com/watch?v=aaaaaaaaaaa".to_string(),
            "https://example.com/not-a-video".to_string(),
            "https://youtu.be/ccccccccccc".to_string(),
            "ddddddddddd".to_string(),
        ];

        for concurrency in [1, 3] {
            let batch = transcripts_for_urls(&provider, &urls, &langs(), concurrency).await;
            assert_eq!(batch.total, 4);
            assert_eq!(batch.results.len(), 4);

            assert!(batch.results[0].success);
            assert_eq!(batch.results[0].transcript, "first");

            assert!(!batch.results[1].success);
            assert_eq!(batch.results[1].video_id, "https://example.com/not-a-video");

            assert!(batch.results[2].success);
            assert_eq!(batch.results[2].language, "es");

            assert!(!batch.results[3].success);
            assert_eq!(
                batch.results[3].error.as_deref(),
                Some("Transcripts are disabled for this video")
            );
        }
    }

    #[tokio::test]
    async fn test_batch_keeps_duplicates() {
        let provider = FakeProvider::default().with_video("aaaaaaaaaaa", vec![("en", TrackKind::Manual, vec!["x"])]);
        let urls = vec!["aaaaaaaaaaa".to_string(), "aaaaaaaaaaa".to_string()];
        let batch = transcripts_for_urls(&provider, &urls, &langs(), 4).await;
        assert_eq!(batch.total, 2);
        assert_eq!(batch.results[0], batch.results[1]);
    }

    #[test]
    fn test_batch_future_is_send() {
        fn assert_send<T: Send>(_: &T) {}
        let provider = FakeProvider::default();
        let urls = vec!["aaaaaaaaaaa".to_string()];
        let languages = langs();
        let fut = transcripts_for_urls(&provider, &urls, &languages, 2);
        assert_send(&fut);
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let provider = FakeProvider::default();
        let batch = transcripts_for_urls(&provider, &[], &langs(), 0).await;
        assert_eq!(batch.total, 0);
        assert!(batch.results.is_empty());
    }
}
