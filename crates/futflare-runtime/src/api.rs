use async_trait::async_trait;
use futflare_engine::QueryState;
use futflare_types::{Capsule, CapsulePage, NewCapsule, PresignRequest, UploadTicket};

use crate::error::{ApiError, UploadError};

/// The authenticated capsule endpoints.
#[async_trait]
pub trait CapsuleApi: Send + Sync {
    /// `GET /api/capsule`
    async fn list_capsules(&self, query: &QueryState) -> Result<CapsulePage, ApiError>;

    /// `GET /api/capsule/:id`
    async fn get_capsule(&self, id: &str) -> Result<Capsule, ApiError>;

    /// `POST /api/capsule`
    async fn create_capsule(&self, capsule: &NewCapsule) -> Result<Capsule, ApiError>;

    /// `POST /api/uploader/presigned-url`
    async fn request_upload_ticket(&self, request: &PresignRequest)
    -> Result<UploadTicket, ApiError>;
}

/// Direct writes to object storage through a presigned URL.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// `PUT` `body` to `url` with `content_type`. Anything but a 2xx is an
    /// error.
    async fn put_object(
        &self,
        url: &str,
        content_type: &str,
        body: Vec<u8>,
    ) -> Result<(), UploadError>;
}
