use std::path::PathBuf;

/// Failures surfaced by the extraction pipeline
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// Input matched none of the supported ID or URL shapes
    #[error("Could not extract video ID from \"{0}\"")]
    IdentifierNotFound(String),

    /// Both the preferred-language and any-language attempts failed
    #[error("no transcript available for {video_id}: {reason}")]
    TranscriptUnavailable { video_id: String, reason: String },

    /// No input in the batch produced a transcript
    #[error("No transcripts extracted.")]
    EmptyBatchResult { failures: usize },

    /// Malformed command line
    #[error("{0}")]
    Usage(String),

    #[error("failed to write {}: {source}", .path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
