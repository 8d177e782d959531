use std::sync::Arc;

use async_trait::async_trait;
use futflare_engine::QueryState;
use futflare_types::{
    ApiMessage, ApiResponse, Capsule, CapsulePage, NewCapsule, PresignRequest, UploadTicket,
};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use url::Url;

use crate::api::{CapsuleApi, ObjectStore};
use crate::auth::{CredentialProvider, with_auth};
use crate::error::{ApiError, UploadError};

pub const CAPSULE_PATH: &str = "api/capsule";
pub const PRESIGN_PATH: &str = "api/uploader/presigned-url";

/// reqwest-backed implementation of [`CapsuleApi`] and [`ObjectStore`].
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: Url,
    credentials: Option<Arc<dyn CredentialProvider>>,
}

impl HttpTransport {
    pub fn new(base_url: Url, credentials: Option<Arc<dyn CredentialProvider>>) -> Result<Self, ApiError> {
        let client = Client::builder().use_rustls_tls().build()?;
        Ok(Self::with_client(client, base_url, credentials))
    }

    pub fn with_client(
        client: Client,
        base_url: Url,
        credentials: Option<Arc<dyn CredentialProvider>>,
    ) -> Self {
        Self {
            client,
            base_url: normalize_base(base_url),
            credentials,
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.base_url.join(path)?)
    }

    /// Listing URL. Every parameter is sent, defaults included.
    pub fn list_url(&self, query: &QueryState) -> Result<Url, ApiError> {
        let mut url = self.endpoint(CAPSULE_PATH)?;
        url.query_pairs_mut()
            .append_pair("sortBy", query.sort_by.as_str())
            .append_pair("searchQuery", &query.search)
            .append_pair("page", &query.page.to_string())
            .append_pair("limit", &query.limit.to_string());
        Ok(url)
    }

    pub fn capsule_url(&self, id: &str) -> Result<Url, ApiError> {
        let mut url = self.endpoint(CAPSULE_PATH)?;
        url.path_segments_mut()
            .map_err(|_| ApiError::Url(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .push(id);
        Ok(url)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let request = with_auth(request, self.credentials.as_deref()).await;
        let response = request.send().await?;
        decode_envelope(response).await
    }
}

// Url::join drops the last path segment unless the base ends with '/'.
fn normalize_base(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

async fn decode_envelope<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    let body = response.bytes().await?;

    if !status.is_success() {
        let message = serde_json::from_slice::<ApiMessage>(&body)
            .ok()
            .and_then(|m| m.message);
        return Err(ApiError::Status {
            status: status.as_u16(),
            message,
        });
    }

    let envelope: ApiResponse<T> = serde_json::from_slice(&body)?;
    Ok(envelope.data)
}

#[async_trait]
impl CapsuleApi for HttpTransport {
    async fn list_capsules(&self, query: &QueryState) -> Result<CapsulePage, ApiError> {
        let url = self.list_url(query)?;
        tracing::debug!(%url, "fetching capsule page");
        self.send(self.client.get(url)).await
    }

    async fn get_capsule(&self, id: &str) -> Result<Capsule, ApiError> {
        let url = self.capsule_url(id)?;
        tracing::debug!(%url, "fetching capsule");
        self.send(self.client.get(url)).await
    }

    async fn create_capsule(&self, capsule: &NewCapsule) -> Result<Capsule, ApiError> {
        let url = self.endpoint(CAPSULE_PATH)?;
        tracing::debug!(%url, items = capsule.content_items.len(), "creating capsule");
        self.send(self.client.post(url).json(capsule)).await
    }

    async fn request_upload_ticket(
        &self,
        request: &PresignRequest,
    ) -> Result<UploadTicket, ApiError> {
        let url = self.endpoint(PRESIGN_PATH)?;
        tracing::debug!(%url, file = %request.file_name, kind = %request.content_type, "requesting upload ticket");
        self.send(self.client.post(url).json(request)).await
    }
}

#[async_trait]
impl ObjectStore for HttpTransport {
    // The presigned URL is the authorization; no bearer token here.
    async fn put_object(
        &self,
        url: &str,
        content_type: &str,
        body: Vec<u8>,
    ) -> Result<(), UploadError> {
        let response = self
            .client
            .put(url)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(body)
            .send()
            .await
            .map_err(|e| UploadError::Transfer(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(UploadError::Rejected(status.as_u16()));
        }
        Ok(())
    }
}
