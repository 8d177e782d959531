use serde::{Deserialize, Serialize};
use std::fmt;

use crate::content::ContentKind;

/// Body of `POST /api/uploader/presigned-url`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresignRequest {
    pub content_type: ContentKind,
    pub file_name: String,
}

/// Single-use authorization to write one object straight to storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadTicket {
    pub presigned_url: String,
    pub object_key: String,
    pub content_type: String,
    pub final_url: String,
}

/// A file picked for upload. `content_type` is the file's own MIME type and
/// is what the storage transfer advertises.
#[derive(Clone, PartialEq, Eq)]
pub struct MediaFile {
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl MediaFile {
    pub fn new(name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

// Keep file contents out of debug output.
impl fmt::Debug for MediaFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MediaFile")
            .field("name", &self.name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presign_request_uses_kind_as_content_type() {
        let request = PresignRequest {
            content_type: ContentKind::Video,
            file_name: "clip.mp4".to_string(),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "content_type": "video", "file_name": "clip.mp4" })
        );
    }

    #[test]
    fn test_media_file_debug_hides_bytes() {
        let file = MediaFile::new("a.png", "image/png", vec![1, 2, 3]);
        let debug = format!("{:?}", file);
        assert!(debug.contains("len: 3"));
        assert!(!debug.contains("[1, 2, 3]"));
    }
}
