//! Scripted stand-ins for the capsule API and object storage.
//!
//! Responses are queued per endpoint and consumed in order. When a queue is
//! empty a plausible default is returned, so tests only script what they
//! assert on. Every call is recorded.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use futflare_engine::QueryState;
use futflare_runtime::{ApiError, CapsuleApi, ObjectStore, UploadError};
use futflare_types::{Capsule, CapsulePage, NewCapsule, PresignRequest, UploadTicket};
use tokio::sync::Notify;

use crate::fixtures;

/// A failure to script: HTTP status plus the server's message, if any.
type Failure = (u16, Option<String>);
type Scripted<T> = VecDeque<Result<T, Failure>>;

#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall {
    List(QueryState),
    Get(String),
    Create(NewCapsule),
    Presign(PresignRequest),
}

#[derive(Default)]
struct Script {
    pages: Scripted<CapsulePage>,
    capsules: Scripted<Capsule>,
    creates: Scripted<Capsule>,
    tickets: Scripted<UploadTicket>,
}

#[derive(Default)]
pub struct MockApi {
    script: Mutex<Script>,
    calls: Mutex<Vec<ApiCall>>,
    gate: Mutex<Option<Arc<Notify>>>,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_page(&self, page: CapsulePage) -> &Self {
        self.script.lock().unwrap().pages.push_back(Ok(page));
        self
    }

    pub fn push_list_failure(&self, status: u16) -> &Self {
        self.script.lock().unwrap().pages.push_back(Err((status, None)));
        self
    }

    pub fn push_capsule(&self, capsule: Capsule) -> &Self {
        self.script.lock().unwrap().capsules.push_back(Ok(capsule));
        self
    }

    pub fn push_get_failure(&self, status: u16) -> &Self {
        self.script.lock().unwrap().capsules.push_back(Err((status, None)));
        self
    }

    pub fn push_created(&self, capsule: Capsule) -> &Self {
        self.script.lock().unwrap().creates.push_back(Ok(capsule));
        self
    }

    pub fn push_create_failure(&self, status: u16, message: Option<&str>) -> &Self {
        self.script
            .lock()
            .unwrap()
            .creates
            .push_back(Err((status, message.map(str::to_string))));
        self
    }

    pub fn push_ticket(&self, ticket: UploadTicket) -> &Self {
        self.script.lock().unwrap().tickets.push_back(Ok(ticket));
        self
    }

    pub fn push_ticket_failure(&self, status: u16) -> &Self {
        self.script.lock().unwrap().tickets.push_back(Err((status, None)));
        self
    }

    /// Make every subsequent call wait until the returned handle is
    /// notified, once per call.
    pub fn hold(&self) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        *self.gate.lock().unwrap() = Some(Arc::clone(&notify));
        notify
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn created(&self) -> Vec<NewCapsule> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                ApiCall::Create(payload) => Some(payload),
                _ => None,
            })
            .collect()
    }

    pub fn presign_requests(&self) -> Vec<PresignRequest> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                ApiCall::Presign(request) => Some(request),
                _ => None,
            })
            .collect()
    }

    async fn enter(&self, call: ApiCall) {
        self.calls.lock().unwrap().push(call);
        let gate = self.gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
    }
}

fn status((status, message): Failure) -> ApiError {
    ApiError::Status { status, message }
}

/// A ticket whose URLs are derived from the file name.
pub fn ticket_for(request: &PresignRequest) -> UploadTicket {
    UploadTicket {
        presigned_url: format!("https://storage.test/upload/{}?sig=abc", request.file_name),
        object_key: format!("{}/{}", request.content_type, request.file_name),
        content_type: request.content_type.to_string(),
        final_url: format!("https://cdn.test/{}/{}", request.content_type, request.file_name),
    }
}

#[async_trait]
impl CapsuleApi for MockApi {
    async fn list_capsules(&self, query: &QueryState) -> Result<CapsulePage, ApiError> {
        self.enter(ApiCall::List(query.clone())).await;
        let next = self.script.lock().unwrap().pages.pop_front();
        match next {
            Some(scripted) => scripted.map_err(status),
            None => Ok(CapsulePage::default()),
        }
    }

    async fn get_capsule(&self, id: &str) -> Result<Capsule, ApiError> {
        self.enter(ApiCall::Get(id.to_string())).await;
        let next = self.script.lock().unwrap().capsules.pop_front();
        match next {
            Some(scripted) => scripted.map_err(status),
            None => Err(status((404, Some("Capsule not found".to_string())))),
        }
    }

    async fn create_capsule(&self, capsule: &NewCapsule) -> Result<Capsule, ApiError> {
        self.enter(ApiCall::Create(capsule.clone())).await;
        let next = self.script.lock().unwrap().creates.pop_front();
        match next {
            Some(scripted) => scripted.map_err(status),
            None => Ok(fixtures::created_from("created-1", capsule)),
        }
    }

    async fn request_upload_ticket(
        &self,
        request: &PresignRequest,
    ) -> Result<UploadTicket, ApiError> {
        self.enter(ApiCall::Presign(request.clone())).await;
        let next = self.script.lock().unwrap().tickets.pop_front();
        match next {
            Some(scripted) => scripted.map_err(status),
            None => Ok(ticket_for(request)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PutRecord {
    pub url: String,
    pub content_type: String,
    pub len: usize,
}

/// Object storage that records every PUT and answers with scripted statuses
/// (200 once the script runs out).
#[derive(Default)]
pub struct MockStore {
    statuses: Mutex<VecDeque<u16>>,
    puts: Mutex<Vec<PutRecord>>,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_status(&self, status: u16) -> &Self {
        self.statuses.lock().unwrap().push_back(status);
        self
    }

    pub fn puts(&self) -> Vec<PutRecord> {
        self.puts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ObjectStore for MockStore {
    async fn put_object(
        &self,
        url: &str,
        content_type: &str,
        body: Vec<u8>,
    ) -> Result<(), UploadError> {
        self.puts.lock().unwrap().push(PutRecord {
            url: url.to_string(),
            content_type: content_type.to_string(),
            len: body.len(),
        });
        let status = self.statuses.lock().unwrap().pop_front().unwrap_or(200);
        if (200..300).contains(&status) {
            Ok(())
        } else {
            Err(UploadError::Rejected(status))
        }
    }
}
