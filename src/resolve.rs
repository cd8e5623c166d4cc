use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::ExtractError;

/// Input shapes recognized as a video reference, in match priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputShape {
    /// Bare 11-character video ID
    BareId,
    /// `?v=ID` or `&v=ID` query parameter
    QueryParam,
    /// youtu.be/ID
    ShortLink,
    /// embed/ID
    Embed,
}

static BARE_ID: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9_-]{11}$").unwrap());
static QUERY_PARAM: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[?&]v=([a-zA-Z0-9_-]{11})").unwrap());
static SHORT_LINK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"youtu\.be/([a-zA-Z0-9_-]{11})").unwrap());
static EMBED: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"embed/([a-zA-Z0-9_-]{11})").unwrap());

impl InputShape {
    pub const PRIORITY: [InputShape; 4] = [
        InputShape::BareId,
        InputShape::QueryParam,
        InputShape::ShortLink,
        InputShape::Embed,
    ];

    fn pattern(self) -> &'static Regex {
        match self {
            InputShape::BareId => &BARE_ID,
            InputShape::QueryParam => &QUERY_PARAM,
            InputShape::ShortLink => &SHORT_LINK,
            InputShape::Embed => &EMBED,
        }
    }

    /// Extract the ID if the input has this shape
    pub fn capture(self, input: &str) -> Option<&str> {
        match self {
            InputShape::BareId => BARE_ID.find(input).map(|m| m.as_str()),
            _ => self.pattern().captures(input).and_then(|c| c.get(1)).map(|m| m.as_str()),
        }
    }
}

/// An 11-character video ID; only constructed by [`resolve`]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VideoId(String);

impl VideoId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn watch_url(&self) -> String {
        crate::watch_url(&self.0)
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Resolve a raw ID or URL into a video ID.
///
/// Shapes are tried in [`InputShape::PRIORITY`] order and the first match wins.
/// The input is not trimmed or case-folded.
pub fn resolve(input: &str) -> Option<VideoId> {
    resolve_with_shape(input).map(|(_, id)| id)
}

pub fn resolve_with_shape(input: &str) -> Option<(InputShape, VideoId)> {
    InputShape::PRIORITY
        .iter()
        .find_map(|shape| shape.capture(input).map(|id| (*shape, VideoId(id.to_string()))))
}

/// A batch item: the raw user input and the ID it resolved to, if any
#[derive(Debug, Clone)]
pub struct VideoReference {
    pub raw_input: String,
    pub resolved_id: Option<VideoId>,
}

impl VideoReference {
    pub fn new(raw_input: &str) -> Self {
        Self {
            raw_input: raw_input.to_string(),
            resolved_id: resolve(raw_input),
        }
    }

    pub fn id(&self) -> Result<&VideoId, ExtractError> {
        self.resolved_id
            .as_ref()
            .ok_or_else(|| ExtractError::IdentifierNotFound(self.raw_input.clone()))
    }
}
