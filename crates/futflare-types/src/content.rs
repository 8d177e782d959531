use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of a content item. Doubles as the `content_type` sent when asking
/// for an upload ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Message,
    Image,
    Video,
}

impl ContentKind {
    pub const ALL: [ContentKind; 3] = [ContentKind::Message, ContentKind::Image, ContentKind::Video];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::Message => "message",
            ContentKind::Image => "image",
            ContentKind::Video => "video",
        }
    }

    /// Media kinds go through the upload gateway before they can be committed.
    pub fn is_media(&self) -> bool {
        matches!(self, ContentKind::Image | ContentKind::Video)
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseContentKindError(pub String);

impl fmt::Display for ParseContentKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown content kind '{}' (expected message, image or video)",
            self.0
        )
    }
}

impl std::error::Error for ParseContentKindError {}

impl FromStr for ContentKind {
    type Err = ParseContentKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "message" => Ok(ContentKind::Message),
            "image" => Ok(ContentKind::Image),
            "video" => Ok(ContentKind::Video),
            other => Err(ParseContentKindError(other.to_string())),
        }
    }
}

/// One unit of capsule content.
///
/// Serialized with an internal `type` tag so the tag and the payload shape
/// can never disagree:
///
/// ```json
/// { "type": "image", "url": "https://…", "caption": "…", "alt_text": "…" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentItem {
    Message {
        text: String,
    },
    Image {
        url: String,
        #[serde(default)]
        caption: String,
        #[serde(default)]
        alt_text: String,
    },
    Video {
        url: String,
        #[serde(default)]
        caption: String,
    },
}

impl ContentItem {
    pub fn message(text: impl Into<String>) -> Self {
        ContentItem::Message { text: text.into() }
    }

    pub fn kind(&self) -> ContentKind {
        match self {
            ContentItem::Message { .. } => ContentKind::Message,
            ContentItem::Image { .. } => ContentKind::Image,
            ContentItem::Video { .. } => ContentKind::Video,
        }
    }

    /// Resolved retrieval address for media items.
    pub fn url(&self) -> Option<&str> {
        match self {
            ContentItem::Message { .. } => None,
            ContentItem::Image { url, .. } | ContentItem::Video { url, .. } => Some(url),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_item_wire_shape() {
        let item = ContentItem::message("hello");
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json, serde_json::json!({ "type": "message", "text": "hello" }));
    }

    #[test]
    fn test_video_item_has_no_alt_text() {
        let item = ContentItem::Video {
            url: "https://cdn/v.mp4".to_string(),
            caption: "beach".to_string(),
        };
        let json = serde_json::to_value(&item).unwrap();
        assert!(json.get("alt_text").is_none());
        assert_eq!(json["type"], "video");
    }

    #[test]
    fn test_image_item_defaults_missing_caption() {
        let item: ContentItem =
            serde_json::from_str(r#"{"type":"image","url":"https://cdn/a.png"}"#).unwrap();
        assert_eq!(
            item,
            ContentItem::Image {
                url: "https://cdn/a.png".to_string(),
                caption: String::new(),
                alt_text: String::new(),
            }
        );
        assert_eq!(item.kind(), ContentKind::Image);
        assert_eq!(item.url(), Some("https://cdn/a.png"));
    }

    #[test]
    fn test_unknown_tag_is_rejected() {
        let result: Result<ContentItem, _> = serde_json::from_str(r#"{"type":"audio","url":"x"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_kind_parsing() {
        assert_eq!("Image".parse::<ContentKind>(), Ok(ContentKind::Image));
        assert!("gif".parse::<ContentKind>().is_err());
        assert!(ContentKind::Video.is_media());
        assert!(!ContentKind::Message.is_media());
    }
}
