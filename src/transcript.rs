use std::fmt;

use eyre::Result;
use log::{debug, info};

use crate::{CaptionTrack, ExtractError, FetchedTranscript, VideoId};

/// Which caption tracks a fetch may use
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LanguageRequest {
    /// Only tracks in these languages, earlier codes preferred
    Preferred(Vec<String>),
    /// Whatever the service offers first
    Any,
}

impl LanguageRequest {
    /// Pick a track index for this request.
    ///
    /// Within a preferred language, a manual track beats an auto-generated one.
    pub fn select(&self, tracks: &[CaptionTrack]) -> Option<usize> {
        match self {
            LanguageRequest::Any => (!tracks.is_empty()).then_some(0),
            LanguageRequest::Preferred(codes) => codes.iter().find_map(|code| {
                let matching = || tracks.iter().enumerate().filter(|(_, t)| &t.language_code == code);
                matching()
                    .find(|(_, t)| !t.is_generated)
                    .or_else(|| matching().next())
                    .map(|(i, _)| i)
            }),
        }
    }
}

impl fmt::Display for LanguageRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LanguageRequest::Preferred(codes) => write!(f, "[{}]", codes.join(", ")),
            LanguageRequest::Any => write!(f, "any language"),
        }
    }
}

/// A captioning service
#[allow(async_fn_in_trait)]
pub trait CaptionSource {
    /// All caption tracks available for a video
    async fn list_tracks(&self, id: &VideoId) -> Result<Vec<CaptionTrack>>;

    /// Fetch the segments of the track selected by `request`
    async fn fetch(&self, id: &VideoId, request: &LanguageRequest) -> Result<FetchedTranscript>;
}

/// Fetches transcripts with a preferred-language then any-language fallback
#[derive(Debug, Clone)]
pub struct TranscriptFetcher<S> {
    source: S,
}

impl<S: CaptionSource> TranscriptFetcher<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Attempts in the order they are tried
    pub fn attempts(preferred: &[String]) -> [LanguageRequest; 2] {
        [LanguageRequest::Preferred(preferred.to_vec()), LanguageRequest::Any]
    }

    /// Fetch a transcript, surfacing only the last attempt's failure
    pub async fn fetch_transcript(
        &self,
        id: &VideoId,
        preferred: &[String],
    ) -> Result<FetchedTranscript, ExtractError> {
        let mut last_err = None;

        for request in Self::attempts(preferred) {
            match self.source.fetch(id, &request).await {
                Ok(fetched) => {
                    info!(
                        "Fetched {} segments for {id} in {} ({}) using {request}",
                        fetched.segments.len(),
                        fetched.track.language,
                        fetched.track.language_code,
                    );
                    return Ok(fetched);
                }
                Err(e) => {
                    debug!("Transcript attempt {request} failed for {id}: {e:#}");
                    last_err = Some(e);
                }
            }
        }

        Err(ExtractError::TranscriptUnavailable {
            video_id: id.to_string(),
            reason: last_err.map(|e| format!("{e:#}")).unwrap_or_default(),
        })
    }
}

#[cfg(test)]
pub(crate) mod fake {
    use std::cell::RefCell;
    use std::collections::HashMap;

    use eyre::{Result, bail, eyre};

    use super::{CaptionSource, LanguageRequest};
    use crate::{CaptionTrack, FetchedTranscript, Segment, VideoId};

    /// In-memory captioning service keyed by video ID
    #[derive(Default)]
    pub struct FakeCaptions {
        pub videos: HashMap<String, Vec<(CaptionTrack, Vec<Segment>)>>,
        pub requests: RefCell<Vec<(String, LanguageRequest)>>,
    }

    pub fn track(code: &str, name: &str, generated: bool) -> CaptionTrack {
        CaptionTrack {
            language_code: code.to_string(),
            language: name.to_string(),
            is_generated: generated,
        }
    }

    pub fn segment(start: f64, text: &str) -> Segment {
        Segment {
            text: text.to_string(),
            start,
            duration: 1.0,
        }
    }

    impl FakeCaptions {
        pub fn with_video(mut self, id: &str, tracks: Vec<(CaptionTrack, Vec<Segment>)>) -> Self {
            self.videos.insert(id.to_string(), tracks);
            self
        }

        pub fn request_count(&self) -> usize {
            self.requests.borrow().len()
        }
    }

    impl CaptionSource for FakeCaptions {
        async fn list_tracks(&self, id: &VideoId) -> Result<Vec<CaptionTrack>> {
            let tracks = self
                .videos
                .get(id.as_str())
                .ok_or_else(|| eyre!("video {id} is unavailable"))?;
            Ok(tracks.iter().map(|(t, _)| t.clone()).collect())
        }

        async fn fetch(&self, id: &VideoId, request: &LanguageRequest) -> Result<FetchedTranscript> {
            self.requests.borrow_mut().push((id.to_string(), request.clone()));
            let tracks = self.list_tracks(id).await?;
            if tracks.is_empty() {
                bail!("no captions available for video {id}");
            }
            let Some(index) = request.select(&tracks) else {
                bail!("no transcript found for {request}");
            };
            let (track, segments) = &self.videos[id.as_str()][index];
            Ok(FetchedTranscript {
                track: track.clone(),
                segments: segments.clone(),
            })
        }
    }
}
