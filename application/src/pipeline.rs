//! Message pipeline
//!
//! The state machine coordinating submission, the completion call, and
//! transcript mutation. One machine serves whichever session is active;
//! activating a different session resets the transcript and state, and a
//! completion still in flight for the previous session is discarded when
//! it eventually resolves (fire-and-forget with a post-hoc staleness
//! check; no cancellation signal is sent to the provider).
//!
//! Single-flight discipline lives here, not in any input surface: while a
//! call is outstanding for the active session, further submissions are
//! ignored. Surfaces may additionally disable their input via [`busy`],
//! but the guard inside [`submit`] is the authoritative invariant.
//!
//! [`busy`]: MessagePipeline::busy
//! [`submit`]: MessagePipeline::submit

use crate::ports::completion_provider::CompletionProvider;
use crate::ports::transcript_logger::{NoTranscriptLogger, TranscriptEvent, TranscriptLogger};
use parley_domain::util::truncate_str;
use parley_domain::{ConversationStore, DEFAULT_GREETING, Message, SessionId};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};

/// Pipeline state, scoped to the active session id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    /// Ready to accept a submission.
    Idle,
    /// Exactly one completion call is outstanding for the active session.
    Awaiting,
}

/// Why a submission was ignored. Never an error: these are UX no-ops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Empty or whitespace-only input.
    Blank,
    /// A completion call is already outstanding.
    Busy,
    /// No session is active; the pipeline is inert.
    NoSession,
}

/// Outcome of a [`MessagePipeline::submit`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The provider replied and the assistant message was appended.
    Replied,
    /// The provider failed; an error-role message was appended and the
    /// pipeline is idle again so the user may retry.
    Errored,
    /// The active session changed while the call was in flight; the
    /// result was discarded with no transcript mutation anywhere.
    Stale,
    /// The submission had no effect.
    Ignored(IgnoreReason),
}

struct PipelineInner {
    state: PipelineState,
    store: ConversationStore,
}

/// State machine over `{Idle, Awaiting}` owning the active transcript.
///
/// All mutation happens under one lock, which is never held across the
/// provider await point. The correctness burden across that suspension
/// is carried entirely by the staleness check on re-acquisition, not by
/// mutual exclusion.
pub struct MessagePipeline {
    provider: Arc<dyn CompletionProvider>,
    logger: Arc<dyn TranscriptLogger>,
    greeting: String,
    inner: Mutex<PipelineInner>,
}

impl MessagePipeline {
    /// Create a pipeline over the given completion provider. No session is
    /// active until [`activate`](Self::activate) is called.
    pub fn new(provider: Arc<dyn CompletionProvider>) -> Self {
        Self {
            provider,
            logger: Arc::new(NoTranscriptLogger),
            greeting: DEFAULT_GREETING.to_string(),
            inner: Mutex::new(PipelineInner {
                state: PipelineState::Idle,
                store: ConversationStore::new(),
            }),
        }
    }

    /// Set a transcript logger for structured event logging.
    pub fn with_transcript_logger(mut self, logger: Arc<dyn TranscriptLogger>) -> Self {
        self.logger = logger;
        self
    }

    /// Override the greeting seeded into fresh transcripts.
    pub fn with_greeting(mut self, greeting: impl Into<String>) -> Self {
        self.greeting = greeting.into();
        self
    }

    fn lock(&self) -> MutexGuard<'_, PipelineInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Make `id` the active session.
    ///
    /// Re-activating the current session is a complete no-op, preserving
    /// any in-flight call. Activating a different id resets the transcript
    /// to its greeting and the state machine to `Idle`; a call still
    /// outstanding for the previous id is not awaited; its resolution
    /// will fail the staleness check and be discarded.
    pub fn activate(&self, id: SessionId) {
        let mut inner = self.lock();
        if !inner.store.initialize(id.clone(), &self.greeting) {
            debug!("session {} already active", id);
            return;
        }
        inner.state = PipelineState::Idle;
        drop(inner);

        info!("session {} activated", id);
        self.logger.log(TranscriptEvent::new(
            "session_activated",
            serde_json::json!({ "session": id.as_str() }),
        ));
    }

    /// Tear down the active session. Subsequent submissions are inert
    /// until another [`activate`](Self::activate).
    pub fn deactivate(&self) {
        let mut inner = self.lock();
        inner.store.clear();
        inner.state = PipelineState::Idle;
    }

    /// Submit user input to the active session.
    ///
    /// Blank input, a busy pipeline, or a missing session make this a
    /// silent no-op. Otherwise the user message is appended, exactly one
    /// provider call is issued, and its resolution is applied, unless the
    /// active session changed in the meantime, in which case the result is
    /// discarded without touching any transcript.
    pub async fn submit(&self, text: &str) -> SubmitOutcome {
        let trimmed = text.trim();

        let (origin, prior) = {
            let mut inner = self.lock();

            if trimmed.is_empty() {
                return SubmitOutcome::Ignored(IgnoreReason::Blank);
            }
            if inner.state == PipelineState::Awaiting {
                debug!("submission ignored: completion already in flight");
                return SubmitOutcome::Ignored(IgnoreReason::Busy);
            }
            let Some(origin) = inner.store.active_session().cloned() else {
                debug!("submission ignored: no active session");
                return SubmitOutcome::Ignored(IgnoreReason::NoSession);
            };

            let prior = inner.store.snapshot().to_vec();
            inner.store.append(&origin, Message::user(trimmed));
            inner.state = PipelineState::Awaiting;
            (origin, prior)
        };

        info!(
            "session {}: submitting {:?}",
            origin,
            truncate_str(trimmed, 80)
        );
        self.logger.log(TranscriptEvent::new(
            "user_message",
            serde_json::json!({ "session": origin.as_str(), "bytes": trimmed.len() }),
        ));

        // The only suspension point. The lock is not held here.
        let result = self.provider.respond(&origin, &prior, trimmed).await;

        let mut inner = self.lock();
        if inner.store.active_session() != Some(&origin) {
            // The user switched sessions while we were waiting. The store
            // and state now belong to the new session's machine; leave
            // both untouched.
            debug!("session {}: discarding stale completion", origin);
            self.logger.log(TranscriptEvent::new(
                "stale_discarded",
                serde_json::json!({ "session": origin.as_str(), "failed": result.is_err() }),
            ));
            return SubmitOutcome::Stale;
        }

        match result {
            Ok(reply) => {
                self.logger.log(TranscriptEvent::new(
                    "assistant_reply",
                    serde_json::json!({ "session": origin.as_str(), "bytes": reply.len() }),
                ));
                inner.store.append(&origin, Message::assistant(reply));
                inner.state = PipelineState::Idle;
                SubmitOutcome::Replied
            }
            Err(e) => {
                warn!("session {}: completion failed: {}", origin, e);
                self.logger.log(TranscriptEvent::new(
                    "provider_error",
                    serde_json::json!({ "session": origin.as_str(), "error": e.to_string() }),
                ));
                inner
                    .store
                    .append(&origin, Message::error(format!("The assistant could not reply: {e}")));
                inner.state = PipelineState::Idle;
                SubmitOutcome::Errored
            }
        }
    }

    /// Whether a completion call is outstanding. Advisory, for input
    /// surfaces that want to disable resubmission.
    pub fn busy(&self) -> bool {
        self.lock().state == PipelineState::Awaiting
    }

    /// Ordered copy of the active transcript for rendering.
    pub fn snapshot(&self) -> Vec<Message> {
        self.lock().store.snapshot().to_vec()
    }

    /// The currently active session id, if any.
    pub fn active_session(&self) -> Option<SessionId> {
        self.lock().store.active_session().cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::completion_provider::ProviderError;
    use async_trait::async_trait;
    use parley_domain::Role;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use tokio::sync::Notify;

    // ==================== Test Doubles ====================

    /// Replies immediately, quoting the submitted text.
    struct EchoProvider;

    #[async_trait]
    impl CompletionProvider for EchoProvider {
        async fn respond(
            &self,
            _session: &SessionId,
            _transcript: &[Message],
            text: &str,
        ) -> Result<String, ProviderError> {
            Ok(format!("You said: \"{text}\""))
        }
    }

    /// Pops scripted results in order; errors when exhausted.
    struct ScriptedProvider {
        responses: Mutex<VecDeque<Result<String, ProviderError>>>,
    }

    impl ScriptedProvider {
        fn new(responses: Vec<Result<String, ProviderError>>) -> Self {
            Self {
                responses: Mutex::new(VecDeque::from(responses)),
            }
        }
    }

    #[async_trait]
    impl CompletionProvider for ScriptedProvider {
        async fn respond(
            &self,
            _session: &SessionId,
            _transcript: &[Message],
            _text: &str,
        ) -> Result<String, ProviderError> {
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(ProviderError::Backend("no more responses".to_string())))
        }
    }

    /// Holds every call until the gate is released.
    struct GatedProvider {
        gate: Arc<Notify>,
    }

    #[async_trait]
    impl CompletionProvider for GatedProvider {
        async fn respond(
            &self,
            _session: &SessionId,
            _transcript: &[Message],
            text: &str,
        ) -> Result<String, ProviderError> {
            self.gate.notified().await;
            Ok(format!("reply to {text}"))
        }
    }

    fn echo_pipeline() -> Arc<MessagePipeline> {
        Arc::new(MessagePipeline::new(Arc::new(EchoProvider)))
    }

    fn gated_pipeline() -> (Arc<MessagePipeline>, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        let provider = GatedProvider { gate: gate.clone() };
        (Arc::new(MessagePipeline::new(Arc::new(provider))), gate)
    }

    async fn wait_until_busy(pipeline: &MessagePipeline) {
        while !pipeline.busy() {
            tokio::task::yield_now().await;
        }
    }

    fn roles(pipeline: &MessagePipeline) -> Vec<Role> {
        pipeline.snapshot().iter().map(|m| m.role).collect()
    }

    // ==================== Tests ====================

    #[tokio::test]
    async fn successful_submit_grows_transcript_by_two() {
        let pipeline = echo_pipeline();
        pipeline.activate(SessionId::generate());
        assert_eq!(pipeline.snapshot().len(), 1);

        let outcome = pipeline.submit("Hello").await;

        assert_eq!(outcome, SubmitOutcome::Replied);
        let snapshot = pipeline.snapshot();
        assert_eq!(snapshot.len(), 3);
        assert_eq!(snapshot[1].role, Role::User);
        assert_eq!(snapshot[1].content, "Hello");
        assert_eq!(snapshot[2].role, Role::Assistant);
        // The reply references the submitted text.
        assert!(snapshot[2].content.contains("Hello"));
        assert!(!pipeline.busy());
    }

    #[tokio::test]
    async fn blank_submissions_are_noops() {
        let pipeline = echo_pipeline();
        pipeline.activate(SessionId::generate());
        let before = pipeline.snapshot();

        assert_eq!(
            pipeline.submit("").await,
            SubmitOutcome::Ignored(IgnoreReason::Blank)
        );
        assert_eq!(
            pipeline.submit("   ").await,
            SubmitOutcome::Ignored(IgnoreReason::Blank)
        );

        assert_eq!(pipeline.snapshot(), before);
        assert!(!pipeline.busy());
    }

    #[tokio::test]
    async fn submit_without_active_session_is_inert() {
        let pipeline = echo_pipeline();

        assert_eq!(
            pipeline.submit("anyone there?").await,
            SubmitOutcome::Ignored(IgnoreReason::NoSession)
        );
        assert!(pipeline.snapshot().is_empty());
        assert!(pipeline.active_session().is_none());
    }

    #[tokio::test]
    async fn second_submit_while_awaiting_is_ignored() {
        let (pipeline, gate) = gated_pipeline();
        pipeline.activate(SessionId::generate());

        let first = {
            let pipeline = pipeline.clone();
            tokio::spawn(async move { pipeline.submit("A").await })
        };
        wait_until_busy(&pipeline).await;

        // Single-flight: "B" is rejected while "A" is outstanding.
        assert_eq!(
            pipeline.submit("B").await,
            SubmitOutcome::Ignored(IgnoreReason::Busy)
        );

        gate.notify_one();
        assert_eq!(first.await.unwrap(), SubmitOutcome::Replied);

        let snapshot = pipeline.snapshot();
        let user_messages: Vec<&str> = snapshot
            .iter()
            .filter(|m| m.role == Role::User)
            .map(|m| m.content.as_str())
            .collect();
        assert_eq!(user_messages, ["A"]);
        assert!(snapshot.iter().all(|m| !m.content.contains('B')));
        assert_eq!(snapshot.last().unwrap().content, "reply to A");
    }

    #[tokio::test]
    async fn reactivating_same_session_preserves_in_flight_call() {
        let (pipeline, gate) = gated_pipeline();
        let id = SessionId::generate();
        pipeline.activate(id.clone());

        let pending = {
            let pipeline = pipeline.clone();
            tokio::spawn(async move { pipeline.submit("still here").await })
        };
        wait_until_busy(&pipeline).await;

        // Same id: no reset, the machine stays Awaiting.
        pipeline.activate(id);
        assert!(pipeline.busy());

        gate.notify_one();
        assert_eq!(pending.await.unwrap(), SubmitOutcome::Replied);
        assert_eq!(pipeline.snapshot().len(), 3);
    }

    #[tokio::test]
    async fn switching_sessions_discards_pending_result() {
        let (pipeline, gate) = gated_pipeline();
        let first = SessionId::generate();
        pipeline.activate(first);

        let pending = {
            let pipeline = pipeline.clone();
            tokio::spawn(async move { pipeline.submit("Hello").await })
        };
        wait_until_busy(&pipeline).await;

        // Switch away while the call is outstanding.
        let second = SessionId::generate();
        pipeline.activate(second.clone());
        assert!(!pipeline.busy());

        gate.notify_one();
        assert_eq!(pending.await.unwrap(), SubmitOutcome::Stale);

        // The new session starts fresh from its greeting; the stale reply
        // never lands anywhere.
        let snapshot = pipeline.snapshot();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].role, Role::Assistant);
        assert_eq!(pipeline.active_session(), Some(second));

        // The new session accepts input normally afterwards.
        let pipeline2 = pipeline.clone();
        let next = tokio::spawn(async move { pipeline2.submit("fresh start").await });
        wait_until_busy(&pipeline).await;
        gate.notify_one();
        assert_eq!(next.await.unwrap(), SubmitOutcome::Replied);
        assert_eq!(pipeline.snapshot().len(), 3);
    }

    #[tokio::test]
    async fn provider_failure_surfaces_error_and_allows_retry() {
        let provider = ScriptedProvider::new(vec![
            Err(ProviderError::Timeout),
            Ok("second time lucky".to_string()),
        ]);
        let pipeline = MessagePipeline::new(Arc::new(provider));
        pipeline.activate(SessionId::generate());

        assert_eq!(pipeline.submit("first try").await, SubmitOutcome::Errored);
        assert_eq!(
            roles(&pipeline),
            [Role::Assistant, Role::User, Role::Error]
        );
        assert!(!pipeline.busy());

        // Back to Idle: a retry goes through normally.
        assert_eq!(pipeline.submit("second try").await, SubmitOutcome::Replied);
        assert_eq!(
            roles(&pipeline),
            [
                Role::Assistant,
                Role::User,
                Role::Error,
                Role::User,
                Role::Assistant
            ]
        );
        assert_eq!(pipeline.snapshot().last().unwrap().content, "second time lucky");
    }

    #[tokio::test]
    async fn activate_is_idempotent_for_transcript_content() {
        let pipeline = echo_pipeline();
        let id = SessionId::generate();

        pipeline.activate(id.clone());
        let first = pipeline.snapshot();
        pipeline.activate(id);
        let second = pipeline.snapshot();

        assert_eq!(first, second);
        assert_eq!(first.len(), 1);
    }

    #[tokio::test]
    async fn custom_greeting_seeds_transcript() {
        let pipeline = MessagePipeline::new(Arc::new(EchoProvider)).with_greeting("Welcome back!");
        pipeline.activate(SessionId::generate());

        assert_eq!(pipeline.snapshot()[0].content, "Welcome back!");
    }

    #[tokio::test]
    async fn deactivate_makes_pipeline_inert() {
        let pipeline = echo_pipeline();
        pipeline.activate(SessionId::generate());
        pipeline.deactivate();

        assert!(pipeline.active_session().is_none());
        assert_eq!(
            pipeline.submit("hello?").await,
            SubmitOutcome::Ignored(IgnoreReason::NoSession)
        );
    }

    #[tokio::test]
    async fn busy_reflects_outstanding_call() {
        let (pipeline, gate) = gated_pipeline();
        pipeline.activate(SessionId::generate());
        assert!(!pipeline.busy());

        let pending = {
            let pipeline = pipeline.clone();
            tokio::spawn(async move { pipeline.submit("working...").await })
        };
        wait_until_busy(&pipeline).await;
        assert!(pipeline.busy());

        gate.notify_one();
        pending.await.unwrap();
        assert!(!pipeline.busy());
    }

    #[tokio::test]
    async fn provider_receives_prior_transcript_and_text() {
        struct AssertingProvider;

        #[async_trait]
        impl CompletionProvider for AssertingProvider {
            async fn respond(
                &self,
                _session: &SessionId,
                transcript: &[Message],
                text: &str,
            ) -> Result<String, ProviderError> {
                // Prior transcript: greeting only, not the new user message.
                assert_eq!(transcript.len(), 1);
                assert_eq!(transcript[0].role, Role::Assistant);
                assert_eq!(text, "question");
                Ok("answer".to_string())
            }
        }

        let pipeline = MessagePipeline::new(Arc::new(AssertingProvider));
        pipeline.activate(SessionId::generate());
        assert_eq!(pipeline.submit("  question  ").await, SubmitOutcome::Replied);
    }
}
