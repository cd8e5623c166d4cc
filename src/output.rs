use crate::{CaptionTrack, TranscriptDocument};

/// Width of the line separating the header from the body
const SEPARATOR_WIDTH: usize = 80;

/// Render a start offset as `M:SS`, or `H:MM:SS` from one hour on
pub fn format_timestamp(seconds: f64) -> String {
    let total = seconds.max(0.0) as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;
    if hours > 0 {
        format!("{hours}:{minutes:02}:{secs:02}")
    } else {
        format!("{minutes}:{secs:02}")
    }
}

/// Render a transcript as a header block followed by one line per segment
pub fn format_transcript(doc: &TranscriptDocument, include_timestamps: bool) -> String {
    let header = format!(
        "Video: {}\nChannel: {}\nURL: {}\nLanguage: {} ({})\nSegments: {}\n{}\n\n",
        doc.title,
        doc.channel,
        doc.watch_url(),
        doc.language,
        doc.kind(),
        doc.segments.len(),
        "=".repeat(SEPARATOR_WIDTH),
    );

    let body = doc
        .segments
        .iter()
        .map(|s| {
            if include_timestamps {
                format!("{} {}", format_timestamp(s.start), s.text)
            } else {
                s.text.clone()
            }
        })
        .collect::<Vec<_>>()
        .join("\n");

    header + &body
}

/// Render the caption tracks available for a video
pub fn render_language_list(video_id: &str, tracks: &[CaptionTrack]) -> String {
    let mut out = format!("Available transcripts for {video_id}:");
    for t in tracks {
        out.push_str(&format!("\n  {:<5}  {:<30}  ({})", t.language_code, t.language, t.kind()));
    }
    out
}
