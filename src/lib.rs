pub mod batch;
pub mod config;
pub mod error;
pub mod logging;
pub mod metadata;
pub mod output;
pub mod registry;
pub mod resolve;
pub mod transcript;
pub mod youtube;

pub use error::ExtractError;
pub use resolve::{VideoId, VideoReference, resolve};

/// Placeholder for metadata the oEmbed endpoint could not supply
pub const UNKNOWN: &str = "Unknown";

/// A single captioned segment
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub text: String,
    pub start: f64,
    pub duration: f64,
}

/// A caption track offered by the captioning service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptionTrack {
    pub language_code: String,
    pub language: String,
    pub is_generated: bool,
}

impl CaptionTrack {
    pub fn kind(&self) -> &'static str {
        if self.is_generated { "auto-generated" } else { "manual" }
    }
}

/// Segments retrieved from one caption track, plus the track actually served
#[derive(Debug, Clone)]
pub struct FetchedTranscript {
    pub track: CaptionTrack,
    pub segments: Vec<Segment>,
}

/// Display metadata for a video
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoMetadata {
    pub title: String,
    pub channel: String,
}

impl VideoMetadata {
    pub fn unknown() -> Self {
        Self {
            title: UNKNOWN.to_string(),
            channel: UNKNOWN.to_string(),
        }
    }
}

impl Default for VideoMetadata {
    fn default() -> Self {
        Self::unknown()
    }
}

/// Complete transcript for a video
#[derive(Debug, Clone)]
pub struct TranscriptDocument {
    pub video_id: String,
    pub title: String,
    pub channel: String,
    pub language: String,
    pub language_code: String,
    pub is_generated: bool,
    pub segments: Vec<Segment>,
}

impl TranscriptDocument {
    pub fn new(video_id: &VideoId, metadata: VideoMetadata, fetched: FetchedTranscript) -> Self {
        Self {
            video_id: video_id.to_string(),
            title: metadata.title,
            channel: metadata.channel,
            language: fetched.track.language,
            language_code: fetched.track.language_code,
            is_generated: fetched.track.is_generated,
            segments: fetched.segments,
        }
    }

    pub fn watch_url(&self) -> String {
        watch_url(&self.video_id)
    }

    pub fn kind(&self) -> &'static str {
        if self.is_generated { "auto-generated" } else { "manual" }
    }
}

/// Canonical watch URL for a video ID
pub fn watch_url(video_id: &str) -> String {
    format!("https://www.youtube.com/watch?v={video_id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_watch_url() {
        assert_eq!(watch_url("dQw4w9WgXcQ"), "https://www.youtube.com/watch?v=dQw4w9WgXcQ");
    }

    #[test]
    fn test_document_takes_served_language() {
        let id = resolve("dQw4w9WgXcQ").unwrap();
        let fetched = FetchedTranscript {
            track: CaptionTrack {
                language_code: "fr".to_string(),
                language: "French".to_string(),
                is_generated: true,
            },
            segments: vec![Segment {
                text: "Bonjour".to_string(),
                start: 0.0,
                duration: 1.0,
            }],
        };
        let doc = TranscriptDocument::new(&id, VideoMetadata::unknown(), fetched);
        assert_eq!(doc.video_id, "dQw4w9WgXcQ");
        assert_eq!(doc.title, UNKNOWN);
        assert_eq!(doc.channel, UNKNOWN);
        assert_eq!(doc.language_code, "fr");
        assert_eq!(doc.kind(), "auto-generated");
        assert_eq!(doc.segments.len(), 1);
    }

    #[test]
    fn test_track_kind() {
        let track = CaptionTrack {
            language_code: "en".to_string(),
            language: "English".to_string(),
            is_generated: false,
        };
        assert_eq!(track.kind(), "manual");
    }
}
