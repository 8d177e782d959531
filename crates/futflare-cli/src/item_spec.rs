//! `--item` values.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use futflare_types::ContentKind;

/// One content item as given on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemSpec {
    Message(String),
    Image {
        path: PathBuf,
        caption: String,
        alt_text: String,
    },
    Video {
        path: PathBuf,
        caption: String,
    },
}

impl ItemSpec {
    pub fn kind(&self) -> ContentKind {
        match self {
            ItemSpec::Message(_) => ContentKind::Message,
            ItemSpec::Image { .. } => ContentKind::Image,
            ItemSpec::Video { .. } => ContentKind::Video,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseItemSpecError(String);

impl fmt::Display for ParseItemSpecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ParseItemSpecError {}

impl FromStr for ItemSpec {
    type Err = ParseItemSpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, rest) = s.split_once(':').ok_or_else(|| {
            ParseItemSpecError(format!("'{s}' is not KIND:VALUE (e.g. message:hello)"))
        })?;
        let kind: ContentKind = kind
            .parse()
            .map_err(|e: futflare_types::ParseContentKindError| ParseItemSpecError(e.to_string()))?;

        if rest.trim().is_empty() {
            return Err(ParseItemSpecError(format!("{kind} item needs a value")));
        }

        match kind {
            ContentKind::Message => Ok(ItemSpec::Message(rest.to_string())),
            ContentKind::Image => {
                let mut parts = rest.splitn(3, '|');
                let path = parts.next().unwrap_or_default();
                Ok(ItemSpec::Image {
                    path: PathBuf::from(path),
                    caption: parts.next().unwrap_or_default().to_string(),
                    alt_text: parts.next().unwrap_or_default().to_string(),
                })
            }
            ContentKind::Video => {
                let mut parts = rest.splitn(2, '|');
                let path = parts.next().unwrap_or_default();
                Ok(ItemSpec::Video {
                    path: PathBuf::from(path),
                    caption: parts.next().unwrap_or_default().to_string(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_keeps_colons_and_pipes() {
        let spec: ItemSpec = "message:meet at 10:30 | bring cake".parse().unwrap();
        assert_eq!(spec, ItemSpec::Message("meet at 10:30 | bring cake".to_string()));
    }

    #[test]
    fn test_image_with_caption_and_alt() {
        let spec: ItemSpec = "image:photos/cat.png|Our cat|a grey cat asleep".parse().unwrap();
        assert_eq!(
            spec,
            ItemSpec::Image {
                path: PathBuf::from("photos/cat.png"),
                caption: "Our cat".to_string(),
                alt_text: "a grey cat asleep".to_string(),
            }
        );
    }

    #[test]
    fn test_video_caption_is_optional() {
        let spec: ItemSpec = "Video:trip.mp4".parse().unwrap();
        assert_eq!(
            spec,
            ItemSpec::Video {
                path: PathBuf::from("trip.mp4"),
                caption: String::new(),
            }
        );
        assert_eq!(spec.kind(), ContentKind::Video);
    }

    #[test]
    fn test_rejects_unknown_kind_and_empty_value() {
        assert!("audio:song.mp3".parse::<ItemSpec>().is_err());
        assert!("message:".parse::<ItemSpec>().is_err());
        assert!("hello".parse::<ItemSpec>().is_err());
    }
}
