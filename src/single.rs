//! Single-item orchestrator: drives one generation and exposes its state.

use crate::generation::EmailGenerator;
use crate::mailto::mailto_uri;
use crate::types::{non_blank, GeneratedEmail, PitchRequest};
use std::sync::Arc;
use tracing::{debug, warn};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SingleState {
    #[default]
    Idle,
    Loading,
    Success(GeneratedEmail),
    Failed(String),
}

pub struct SingleOrchestrator {
    generator: Arc<dyn EmailGenerator>,
    state: SingleState,
    recipient_email: Option<String>,
}

/// Puts the state back to `Idle` if a submit is abandoned before it settles.
struct LoadingGuard<'a> {
    state: &'a mut SingleState,
    settled: bool,
}

impl LoadingGuard<'_> {
    fn settle(mut self, next: SingleState) {
        *self.state = next;
        self.settled = true;
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        if !self.settled {
            *self.state = SingleState::Idle;
        }
    }
}

impl SingleOrchestrator {
    pub fn new(generator: Arc<dyn EmailGenerator>) -> Self {
        Self {
            generator,
            state: SingleState::Idle,
            recipient_email: None,
        }
    }

    pub fn state(&self) -> &SingleState {
        &self.state
    }

    pub fn recipient_email(&self) -> Option<&str> {
        self.recipient_email.as_deref()
    }

    /// Run one generation. Taking `&mut self` keeps a single call in flight.
    pub async fn submit(&mut self, request: PitchRequest) -> &SingleState {
        self.recipient_email = non_blank(request.recipient_email.as_deref());

        if let Err(err) = request.validate() {
            warn!(error = %err, "Rejected pitch request");
            self.state = SingleState::Failed(err.to_string());
            return &self.state;
        }

        self.state = SingleState::Loading;
        let generator = Arc::clone(&self.generator);
        let guard = LoadingGuard {
            state: &mut self.state,
            settled: false,
        };

        debug!(company = %request.recipient_company, "Generating single draft");
        let next = match generator.generate(&request).await {
            Ok(email) => SingleState::Success(email),
            Err(err) => SingleState::Failed(err.message().to_string()),
        };
        guard.settle(next);

        &self.state
    }

    pub fn reset(&mut self) {
        self.state = SingleState::Idle;
        self.recipient_email = None;
    }

    /// Handoff link for the current draft, if there is one.
    pub fn mail_uri(&self) -> Option<String> {
        match &self.state {
            SingleState::Success(email) => Some(mailto_uri(self.recipient_email(), email)),
            _ => None,
        }
    }
}
