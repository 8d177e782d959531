use std::sync::Arc;

use futflare_types::{ContentKind, MediaFile, PresignRequest};

use crate::api::{CapsuleApi, ObjectStore};
use crate::error::UploadError;

/// Two-phase media upload: ask the API for a presigned ticket, then send the
/// bytes straight to storage.
///
/// One ticket per attempt, never cached or reused, and no automatic retry.
#[derive(Clone)]
pub struct UploadGateway {
    api: Arc<dyn CapsuleApi>,
    store: Arc<dyn ObjectStore>,
}

impl UploadGateway {
    pub fn new(api: Arc<dyn CapsuleApi>, store: Arc<dyn ObjectStore>) -> Self {
        Self { api, store }
    }

    /// Upload `file` as `kind` and return the address to store in the item.
    pub async fn upload(&self, file: &MediaFile, kind: ContentKind) -> Result<String, UploadError> {
        let request = PresignRequest {
            content_type: kind,
            file_name: file.name.clone(),
        };
        let ticket = self
            .api
            .request_upload_ticket(&request)
            .await
            .map_err(UploadError::Ticket)?;

        tracing::debug!(
            object_key = %ticket.object_key,
            file = %file.name,
            bytes = file.len(),
            "uploading to storage"
        );

        self.store
            .put_object(&ticket.presigned_url, &file.content_type, file.bytes.clone())
            .await?;

        Ok(ticket.final_url)
    }
}
