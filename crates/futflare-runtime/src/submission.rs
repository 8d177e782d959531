use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::Utc;
use futflare_engine::CapsuleDraft;
use futflare_types::Capsule;

use crate::api::CapsuleApi;
use crate::error::SubmissionError;
use crate::ports::{Navigator, Notifier};

pub const SUBMISSION_SUCCESS_MESSAGE: &str = "Capsule created successfully";

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Created(Capsule),
    /// Another submission through this controller is still outstanding.
    AlreadyInFlight,
    /// The draft is missing required fields; nothing was sent.
    NotSubmittable(Vec<&'static str>),
}

/// Turns a ready draft into one create call.
///
/// The controller is the mutation identity: while one submission through it
/// is outstanding, further calls return [`SubmitOutcome::AlreadyInFlight`]
/// instead of queueing.
pub struct SubmissionController {
    api: Arc<dyn CapsuleApi>,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
    in_flight: AtomicBool,
}

struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl SubmissionController {
    pub fn new(
        api: Arc<dyn CapsuleApi>,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            api,
            notifier,
            navigator,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Submit `draft`.
    ///
    /// On success the draft is reset, a success notification is emitted and
    /// the listing is opened. On failure the draft is left exactly as it was
    /// and the error notification carries the server's message when there is
    /// one.
    pub async fn submit(&self, draft: &mut CapsuleDraft) -> Result<SubmitOutcome, SubmissionError> {
        let payload = match draft.to_payload() {
            Ok(payload) => payload,
            Err(_) => return Ok(SubmitOutcome::NotSubmittable(draft.missing_fields())),
        };

        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::debug!("submission already in flight, ignoring");
            return Ok(SubmitOutcome::AlreadyInFlight);
        }
        let _guard = InFlight(&self.in_flight);

        match self.api.create_capsule(&payload).await {
            Ok(capsule) => {
                tracing::info!(id = %capsule.id, title = %capsule.title, "capsule created");
                self.notifier.success(SUBMISSION_SUCCESS_MESSAGE);
                draft.reset(Utc::now());
                self.navigator.open_listing();
                Ok(SubmitOutcome::Created(capsule))
            }
            Err(err) => {
                let err = SubmissionError::from(err);
                tracing::warn!(error = %err.source, "capsule creation failed");
                self.notifier.error(&err.message);
                Err(err)
            }
        }
    }
}
