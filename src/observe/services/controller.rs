//! The observation controller: session lifecycle, initial scan, and
//! mutation-driven turn classification.

use crate::capture::services::CaptureHandoff;
use crate::navigation::ports::ObservationControl;
use crate::observe::ports::{DiagnosticEvent, DiagnosticsSink};
use crate::observe::services::classify::{classify_role, completion_met};
use crate::observe::services::config::ObservationConfig;
use crate::observe::services::extract::extract_text;
use crate::observe::services::session::{ObservationPhase, ObservationSession, SessionId};
use crate::page::domain::{MutationBatch, NodeId, ObserveOptions};
use crate::page::ports::PageDom;
use crate::profile::domain::PlatformProfile;
use crate::profile::services::ProfileResolver;
use crate::turn::domain::{TurnDomainError, TurnRecord, TurnState};
use crate::turn::registry::TurnRegistry;
use async_trait::async_trait;
use mockable::Clock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

struct Inner {
    phase: ObservationPhase,
    session: Option<ObservationSession>,
    registry: TurnRegistry,
    container: Option<NodeId>,
}

/// Drives the observation lifecycle for one page.
///
/// All turn state lives behind one mutex touched only between awaits, so
/// a mutation callback, a settle timer, and a navigation reset can
/// interleave without tearing. Every timed wait is stamped with the
/// generation current when it was scheduled; a reset bumps the
/// generation, turning stale continuations into no-ops.
pub struct ObservationController<C: Clock> {
    dom: Arc<dyn PageDom>,
    resolver: ProfileResolver,
    handoff: Arc<CaptureHandoff<C>>,
    diagnostics: Arc<dyn DiagnosticsSink>,
    clock: Arc<C>,
    config: ObservationConfig,
    generation: AtomicU64,
    inner: Mutex<Inner>,
}

impl<C: Clock + Send + Sync> ObservationController<C> {
    /// Wires the controller to its collaborators.
    #[must_use]
    pub fn new(
        dom: Arc<dyn PageDom>,
        resolver: ProfileResolver,
        handoff: Arc<CaptureHandoff<C>>,
        diagnostics: Arc<dyn DiagnosticsSink>,
        clock: Arc<C>,
        config: ObservationConfig,
    ) -> Self {
        Self {
            dom,
            resolver,
            handoff,
            diagnostics,
            clock,
            config,
            generation: AtomicU64::new(0),
            inner: Mutex::new(Inner {
                phase: ObservationPhase::Idle,
                session: None,
                registry: TurnRegistry::new(),
                container: None,
            }),
        }
    }

    /// Starts a fresh session against `url`: resolves the profile, waits
    /// out the platform's render-settle delay, acquires the conversation
    /// container within the retry budget, and feeds every pre-existing
    /// turn through the same classification path live mutations use.
    ///
    /// Exhausting the retry budget reports `ContainerNotFound` and
    /// leaves the controller awaiting a container; it never fails the
    /// host.
    pub async fn start(&self, url: &str) {
        let generation = self.next_generation();
        let resolution = self.resolver.resolve(url);
        if resolution.is_fallback() {
            self.diagnostics.emit(DiagnosticEvent::UnknownPlatform {
                url: url.to_owned(),
            });
        }
        let session = ObservationSession::new(generation, url, &resolution);
        let profile = session.profile();
        {
            let mut inner = self.lock_inner();
            inner.phase = ObservationPhase::AwaitingContainer;
            inner.session = Some(session);
            inner.registry.clear();
            inner.container = None;
        }

        tokio::time::sleep(profile.settle_delay()).await;
        if self.is_stale(generation) {
            return;
        }

        let mut attempts = 0u32;
        let search = loop {
            attempts += 1;
            if let Some(found) = self.dom.query(None, profile.container_selector()) {
                break Some(found);
            }
            if attempts >= self.config.container_retry_limit {
                break None;
            }
            tokio::time::sleep(self.config.container_retry_interval).await;
            if self.is_stale(generation) {
                return;
            }
        };
        let Some(container) = search else {
            self.diagnostics.emit(DiagnosticEvent::ContainerNotFound {
                platform: profile.platform(),
                attempts,
            });
            return;
        };

        let promoted = {
            let mut inner = self.lock_inner();
            if self.is_stale(generation) {
                return;
            }
            inner.container = Some(container);
            inner.phase = ObservationPhase::Observing;
            let existing = self.dom.query_all(Some(container), profile.message_selector());
            let mut promoted = Vec::new();
            for node in existing {
                self.evaluate_turn(&mut inner.registry, &profile, node, &mut promoted);
            }
            promoted
        };
        self.offer_all(generation, &profile, promoted).await;
    }

    /// Consumes one mutation batch. Events arriving outside the
    /// `Observing` phase, including any queued against a torn-down
    /// container, are discarded.
    pub async fn handle_mutations(&self, batch: &MutationBatch) {
        let (generation, profile, promoted) = {
            let mut inner = self.lock_inner();
            if inner.phase != ObservationPhase::Observing {
                return;
            }
            let Some(session) = inner.session.as_ref() else {
                return;
            };
            let generation = session.generation();
            let profile = session.profile();
            let Some(container) = inner.container else {
                return;
            };
            let candidates = self.collect_candidates(container, &profile, batch);
            let mut promoted = Vec::new();
            for node in candidates {
                self.evaluate_turn(&mut inner.registry, &profile, node, &mut promoted);
            }
            (generation, profile, promoted)
        };
        self.offer_all(generation, &profile, promoted).await;
    }

    /// Tears down the session: bumps the generation so in-flight waits
    /// become no-ops, clears the turn registry, and discards the capture
    /// hand-off's session state. Idempotent.
    pub fn reset(&self) {
        self.next_generation();
        let mut inner = self.lock_inner();
        inner.phase = ObservationPhase::Resetting;
        inner.registry.clear();
        inner.container = None;
        inner.session = None;
        self.handoff.reset();
        inner.phase = ObservationPhase::AwaitingContainer;
    }

    /// Watchdog hook: when the active profile flags container
    /// replacement, checks that the container is still attached and
    /// restarts the session against the same URL when it is not.
    pub async fn watchdog_check(&self) {
        let replaced_url = {
            let inner = self.lock_inner();
            if inner.phase != ObservationPhase::Observing {
                return;
            }
            let Some(session) = inner.session.as_ref() else {
                return;
            };
            if !session.profile().watch_container_replacement() {
                return;
            }
            match inner.container {
                Some(container) if !self.dom.is_connected(container) => {
                    Some(session.url().to_owned())
                }
                _ => None,
            }
        };
        if let Some(url) = replaced_url {
            self.reset();
            self.start(&url).await;
        }
    }

    /// Returns the observer options the host should attach the primary
    /// observer with: child-list, subtree, character data, and the
    /// configured attribute whitelist.
    #[must_use]
    pub fn observe_options(&self) -> ObserveOptions {
        ObserveOptions::conversation(self.config.observed_attributes.iter().cloned())
    }

    /// Returns the current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> ObservationPhase {
        self.lock_inner().phase
    }

    /// Returns the active session's identifier, when a session exists.
    #[must_use]
    pub fn session_id(&self) -> Option<SessionId> {
        self.lock_inner().session.as_ref().map(ObservationSession::id)
    }

    /// Returns whether the active session runs on the generic fallback
    /// profile.
    #[must_use]
    pub fn is_fallback_session(&self) -> Option<bool> {
        self.lock_inner()
            .session
            .as_ref()
            .map(ObservationSession::is_fallback)
    }

    /// Returns the lifecycle state of a tracked turn.
    #[must_use]
    pub fn turn_state(&self, node: NodeId) -> Option<TurnState> {
        self.lock_inner()
            .registry
            .get(node)
            .map(TurnRecord::state)
    }

    /// Returns how many turns the session tracks.
    #[must_use]
    pub fn tracked_turns(&self) -> usize {
        self.lock_inner().registry.len()
    }

    fn collect_candidates(
        &self,
        container: NodeId,
        profile: &PlatformProfile,
        batch: &MutationBatch,
    ) -> Vec<NodeId> {
        let mut candidates = Vec::new();
        for record in batch.records() {
            let mut roots = vec![record.target()];
            roots.extend_from_slice(record.added());
            for root in roots {
                if !self.dom.is_connected(root) {
                    continue;
                }
                let Some(turn) = self.dom.closest(root, profile.message_selector()) else {
                    continue;
                };
                if !self.dom.contains(container, turn) {
                    continue;
                }
                if !candidates.contains(&turn) {
                    candidates.push(turn);
                }
            }
        }
        candidates
    }

    fn evaluate_turn(
        &self,
        registry: &mut TurnRegistry,
        profile: &PlatformProfile,
        node: NodeId,
        promoted: &mut Vec<TurnRecord>,
    ) {
        if registry.is_capture_ready(node) {
            return;
        }
        let role = classify_role(self.dom.as_ref(), node, profile);
        let text = extract_text(self.dom.as_ref(), node, profile.content_rule());
        let complete =
            !profile.streaming() || completion_met(self.dom.as_ref(), node, profile.completion_rule());
        let long_enough = text
            .as_deref()
            .is_some_and(|body| body.chars().count() >= self.config.capture_threshold);

        let record = registry.sight(node, role);
        record.refine_role(role);
        if let Some(body) = text.as_deref() {
            record.set_text(body);
        }

        let outcome = if complete {
            advance_complete(record, long_enough, self.clock.as_ref(), promoted)
        } else if record.state() == TurnState::Discovered {
            record.transition(TurnState::Incomplete, self.clock.as_ref())
        } else {
            Ok(())
        };
        if let Err(err) = outcome {
            self.diagnostics.emit(DiagnosticEvent::TurnSkipped {
                node,
                reason: err.to_string(),
            });
        }
    }

    async fn offer_all(
        &self,
        generation: u64,
        profile: &PlatformProfile,
        promoted: Vec<TurnRecord>,
    ) {
        for record in promoted {
            if self.is_stale(generation) {
                return;
            }
            self.handoff.offer(&record, profile.platform()).await;
        }
    }

    fn next_generation(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_stale(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) != generation
    }

    fn lock_inner(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Moves a complete turn forward: parks it at `Complete` until its text
/// clears the capture threshold, then promotes it to `CaptureReady` and
/// queues it for hand-off.
fn advance_complete(
    record: &mut TurnRecord,
    long_enough: bool,
    clock: &impl Clock,
    promoted: &mut Vec<TurnRecord>,
) -> Result<(), TurnDomainError> {
    if matches!(record.state(), TurnState::Discovered | TurnState::Incomplete) {
        record.transition(TurnState::Complete, clock)?;
    }
    if long_enough && record.state() == TurnState::Complete {
        record.transition(TurnState::CaptureReady, clock)?;
        promoted.push(record.clone());
    }
    Ok(())
}

#[async_trait]
impl<C: Clock + Send + Sync> ObservationControl for ObservationController<C> {
    async fn restart(&self, url: &str) {
        self.reset();
        self.start(url).await;
    }
}
