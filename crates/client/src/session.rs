//! Single-query request lifecycle.
//!
//! ## State machine
//!
//! ```text
//! Idle ──submit──▶ Pending ──ok──▶ Success
//!                     │
//!                     └──err──▶ Failure
//! Success / Failure ──submit──▶ Pending
//! ```
//!
//! `Idle` only exists at construction; there is no reset.
//!
//! ## Overlapping submissions
//!
//! While a call is outstanding, `submit()` is rejected: the in-flight call is
//! neither cancelled nor superseded, and nothing is queued. Query text can
//! still be edited. Every issued call carries a monotonically increasing
//! request id, and a completion is only committed if its id matches the
//! pending one; anything else is discarded.
//!
//! If the `submit()` future is dropped before its call resolves (a timeout
//! wrapper, `select!`, an aborted task), the pending call is committed as
//! `Failure`, so `Pending` is never left behind.
//!
//! ## Observing state
//!
//! State lives in a `tokio::sync::watch` channel. `current_view()` returns a
//! snapshot of the last committed transition and `subscribe()` lets a
//! presentation layer await the next one.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;

use countryguide_core::{Query, RecommendationRequest};
use countryguide_transform::RecommendationView;

use crate::error::ServiceError;
use crate::service::RecommendationService;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Idle,
    Pending,
    Success,
    Failure,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Idle => "Idle",
            SessionStatus::Pending => "Pending",
            SessionStatus::Success => "Success",
            SessionStatus::Failure => "Failure",
        }
    }
}

/// Status together with the data that is only valid in that status.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionPhase {
    Idle,
    Pending { request_id: u64 },
    Success(Arc<RecommendationView>),
    Failure { message: String },
}

impl SessionPhase {
    pub fn status(&self) -> SessionStatus {
        match self {
            SessionPhase::Idle => SessionStatus::Idle,
            SessionPhase::Pending { .. } => SessionStatus::Pending,
            SessionPhase::Success(_) => SessionStatus::Success,
            SessionPhase::Failure { .. } => SessionStatus::Failure,
        }
    }
}

/// Read-only snapshot handed to the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    query: Query,
    phase: SessionPhase,
}

impl SessionState {
    fn new() -> Self {
        Self {
            query: Query::default(),
            phase: SessionPhase::Idle,
        }
    }

    pub fn status(&self) -> SessionStatus {
        self.phase.status()
    }

    pub fn query(&self) -> &Query {
        &self.query
    }

    pub fn phase(&self) -> &SessionPhase {
        &self.phase
    }

    pub fn result(&self) -> Option<&RecommendationView> {
        match &self.phase {
            SessionPhase::Success(view) => Some(view.as_ref()),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.phase {
            SessionPhase::Failure { message } => Some(message.as_str()),
            _ => None,
        }
    }

    /// Whether `submit()` would issue a call right now.
    pub fn can_submit(&self) -> bool {
        !self.query.is_blank() && self.status() != SessionStatus::Pending
    }
}

/// Why a `submit()` was a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitRejection {
    /// Query empty or whitespace only. Not surfaced to the user.
    EmptyQuery,
    /// A call is already outstanding.
    AlreadyPending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// State unchanged, no call issued.
    Rejected(SubmitRejection),
    /// A call was issued and resolved; carries the status after completion.
    Completed(SessionStatus),
}

/// One user interaction's query lifecycle. Construct one per view; not a
/// process-wide singleton.
pub struct RecommendationSession<S> {
    service: Arc<S>,
    state: watch::Sender<SessionState>,
    last_request_id: AtomicU64,
}

impl<S: RecommendationService> RecommendationSession<S> {
    pub fn new(service: S) -> Self {
        Self::with_service(Arc::new(service))
    }

    pub fn with_service(service: Arc<S>) -> Self {
        let (state, _) = watch::channel(SessionState::new());
        Self {
            service,
            state,
            last_request_id: AtomicU64::new(0),
        }
    }

    /// Store the text verbatim. Always allowed, including while pending.
    pub fn update_query(&self, text: impl Into<String>) {
        let query = Query::new(text);
        self.state.send_modify(|state| state.query = query);
    }

    pub fn current_view(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// Issue one call for the current query and commit its outcome.
    ///
    /// Rejected (state untouched, no call) when the trimmed query is empty or a
    /// call is already pending. Every failure is converted into `Failure`.
    pub async fn submit(&self) -> SubmitOutcome {
        let (request_id, request) = match self.begin() {
            Ok(ticket) => ticket,
            Err(rejection) => {
                tracing::warn!(?rejection, "submit ignored");
                return SubmitOutcome::Rejected(rejection);
            }
        };

        tracing::info!(request_id, "recommendation request issued");
        let guard = PendingGuard {
            session: self,
            request_id,
            armed: true,
        };

        let outcome = match self.service.recommend(&request).await {
            Ok(body) => RecommendationView::from_json(&body).map_err(ServiceError::from),
            Err(err) => Err(err),
        };

        let status = self.complete(request_id, outcome);
        guard.disarm();
        SubmitOutcome::Completed(status)
    }

    /// `Pending` transition. Returns the stamped request to send.
    fn begin(&self) -> Result<(u64, RecommendationRequest), SubmitRejection> {
        let mut ticket = Err(SubmitRejection::EmptyQuery);

        self.state.send_if_modified(|state| {
            if state.status() == SessionStatus::Pending {
                ticket = Err(SubmitRejection::AlreadyPending);
                return false;
            }
            if state.query.is_blank() {
                ticket = Err(SubmitRejection::EmptyQuery);
                return false;
            }

            let request_id = self.last_request_id.fetch_add(1, Ordering::Relaxed) + 1;
            ticket = Ok((request_id, RecommendationRequest::new(&state.query)));
            state.phase = SessionPhase::Pending { request_id };
            true
        });

        ticket
    }

    /// Commit the outcome of `request_id` if it is still the pending call.
    fn complete(
        &self,
        request_id: u64,
        outcome: Result<RecommendationView, ServiceError>,
    ) -> SessionStatus {
        let phase = match outcome {
            Ok(view) => {
                tracing::info!(
                    request_id,
                    recommendations = view.cards.len(),
                    "recommendation request succeeded"
                );
                SessionPhase::Success(Arc::new(view))
            }
            Err(err) => {
                tracing::warn!(
                    request_id,
                    error = %err,
                    retryable = err.is_retryable(),
                    "recommendation request failed"
                );
                SessionPhase::Failure {
                    message: err.to_string(),
                }
            }
        };

        let committed = self.state.send_if_modified(|state| match state.phase {
            SessionPhase::Pending { request_id: pending } if pending == request_id => {
                state.phase = phase;
                true
            }
            _ => false,
        });

        if !committed {
            tracing::warn!(
                request_id,
                "discarded completion for a request that is no longer pending"
            );
        }

        self.state.borrow().status()
    }
}

/// Commits `Failure` for `request_id` if dropped before `disarm()`.
struct PendingGuard<'a, S: RecommendationService> {
    session: &'a RecommendationSession<S>,
    request_id: u64,
    armed: bool,
}

impl<S: RecommendationService> PendingGuard<'_, S> {
    fn disarm(mut self) {
        self.armed = false;
    }
}

impl<S: RecommendationService> Drop for PendingGuard<'_, S> {
    fn drop(&mut self) {
        if self.armed {
            self.session
                .complete(self.request_id, Err(ServiceError::Abandoned));
        }
    }
}
