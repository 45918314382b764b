//! The activity panel: gate, fetch, retry, present.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use super::retry::{RetryDecision, RetryPolicy};
use super::state::{PanelState, NOT_AUTHENTICATED_ERROR, NOT_CONFIGURED_ERROR};
use super::view::PanelView;
use crate::auth::{authenticated, AuthContext};
use crate::client::{ActivityClient, ActivityRequest};
use crate::messaging::{ActionCallback, ActionEvent, ErrorSource};

/// Inputs the host hands to the panel on every render.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PanelProps {
    pub tenant_id: String,
    pub auth_context: Option<AuthContext>,
    pub bff_base_url: String,
}

/// A precondition that stops a load before any request is made.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadBlocked {
    NotAuthenticated,
    NotConfigured,
}

impl LoadBlocked {
    pub fn source(&self) -> ErrorSource {
        match self {
            Self::NotAuthenticated => ErrorSource::Auth,
            Self::NotConfigured => ErrorSource::Config,
        }
    }

    /// Text shown in the panel.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::NotAuthenticated => NOT_AUTHENTICATED_ERROR,
            Self::NotConfigured => NOT_CONFIGURED_ERROR,
        }
    }

    /// Text carried by the `apiError` action.
    pub fn action_message(&self) -> &'static str {
        match self {
            Self::NotAuthenticated => "Missing authContext",
            Self::NotConfigured => "Missing bffBaseUrl",
        }
    }
}

impl PanelProps {
    /// Check preconditions in order and build the request.
    pub fn request(&self) -> Result<ActivityRequest, LoadBlocked> {
        let auth = authenticated(self.auth_context.as_ref()).ok_or(LoadBlocked::NotAuthenticated)?;
        if self.bff_base_url.is_empty() {
            return Err(LoadBlocked::NotConfigured);
        }
        Ok(ActivityRequest::new(&self.bff_base_url, auth))
    }
}

/// How a load ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Items replaced; `count` came back.
    Loaded { count: usize },
    /// Stopped before any request.
    Blocked(LoadBlocked),
    /// Every attempt failed.
    Failed { attempts: u32 },
    /// The panel was unmounted before the load could finish.
    Abandoned,
}

struct PanelInner {
    props: Mutex<PanelProps>,
    state: Mutex<PanelState>,
    client: Arc<dyn ActivityClient>,
    on_action: ActionCallback,
    retry: RetryPolicy,
    alive: AtomicBool,
}

/// Owns the fetch-and-retry logic and the visible panel state.
///
/// Cloning is cheap and every clone shares the same state, so a load can be
/// moved into a spawned task while the element keeps rendering.
#[derive(Clone)]
pub struct ActivityPanel {
    inner: Arc<PanelInner>,
}

impl ActivityPanel {
    pub fn new(client: Arc<dyn ActivityClient>, on_action: ActionCallback) -> Self {
        Self::with_retry_policy(client, on_action, RetryPolicy::default())
    }

    pub fn with_retry_policy(
        client: Arc<dyn ActivityClient>,
        on_action: ActionCallback,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            inner: Arc::new(PanelInner {
                props: Mutex::new(PanelProps::default()),
                state: Mutex::new(PanelState::new()),
                client,
                on_action,
                retry,
                alive: AtomicBool::new(true),
            }),
        }
    }

    /// Replace the inputs. Never starts a fetch on its own.
    pub fn set_props(&self, props: PanelProps) {
        *self.inner.props.lock() = props;
    }

    pub fn props(&self) -> PanelProps {
        self.inner.props.lock().clone()
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> PanelState {
        self.inner.state.lock().clone()
    }

    pub fn view(&self) -> PanelView {
        let props = self.props();
        let state = self.state();
        PanelView::build(&props, &state)
    }

    pub fn is_loading(&self) -> bool {
        self.inner.state.lock().loading
    }

    pub fn is_alive(&self) -> bool {
        self.inner.alive.load(Ordering::Acquire)
    }

    /// Detach from the host. Pending loads issue no further request, and a
    /// request already in flight is dropped when it settles.
    pub fn unmount(&self) {
        self.inner.alive.store(false, Ordering::Release);
    }

    /// Load with a fresh attempt counter.
    pub async fn load_activity(&self) -> LoadOutcome {
        self.load_activity_at(1).await
    }

    /// Load starting at `attempt`. Attempts are numbered from 1; a value of 0
    /// is treated as 1.
    ///
    /// Not guarded against re-entrant calls; [`ActivityPanel::refresh`] is
    /// the guarded entry point.
    pub async fn load_activity_at(&self, attempt: u32) -> LoadOutcome {
        let attempt = attempt.max(1);
        match self.begin(attempt) {
            Ok(request) => self.run_attempts(request, attempt).await,
            Err(outcome) => outcome,
        }
    }

    /// The refresh button. Disabled while loading, so it returns `None`
    /// instead of starting a second chain.
    ///
    /// Preconditions and the `loading` flag are applied before this returns;
    /// only the network part runs in the spawned task.
    pub fn refresh(&self) -> Option<JoinHandle<LoadOutcome>> {
        if self.is_loading() {
            debug!("refresh ignored while loading");
            return None;
        }
        let started = self.begin(1);
        let panel = self.clone();
        Some(tokio::spawn(async move {
            match started {
                Ok(request) => panel.run_attempts(request, 1).await,
                Err(outcome) => outcome,
            }
        }))
    }

    /// Synchronous prefix of a load: preconditions, then `loading = true`.
    fn begin(&self, attempt: u32) -> Result<ActivityRequest, LoadOutcome> {
        if !self.is_alive() {
            return Err(LoadOutcome::Abandoned);
        }
        let props = self.props();
        match props.request() {
            Ok(request) => {
                self.inner.state.lock().begin_load();
                debug!(tenant_id = %props.tenant_id, attempt, "activity load started");
                Ok(request)
            }
            Err(blocked) => {
                info!(
                    tenant_id = %props.tenant_id,
                    source = blocked.source().as_str(),
                    "activity load blocked"
                );
                self.inner.state.lock().block(blocked.user_message());
                self.emit(ActionEvent::api_error(blocked.source(), blocked.action_message()));
                Err(LoadOutcome::Blocked(blocked))
            }
        }
    }

    /// Issue attempts one after another until one succeeds or the policy
    /// gives up, then clear `loading` once. An unmount stops the chain before
    /// the next request and drops the result of the one in flight.
    async fn run_attempts(&self, request: ActivityRequest, first_attempt: u32) -> LoadOutcome {
        let mut attempt = first_attempt;
        let outcome = loop {
            if !self.is_alive() {
                debug!(attempt, "panel unmounted before request, stopping");
                break LoadOutcome::Abandoned;
            }
            let result = self.inner.client.fetch_activity(&request).await;
            if !self.is_alive() {
                debug!(attempt, "panel unmounted mid-load, dropping result");
                break LoadOutcome::Abandoned;
            }

            match result {
                Ok(response) => {
                    let items = response.into_items();
                    let count = items.len();
                    self.inner.state.lock().load_succeeded(items);
                    info!(count, attempt, "activity loaded");
                    self.emit(ActionEvent::activity_loaded(count));
                    break LoadOutcome::Loaded { count };
                }
                Err(err) => match self.inner.retry.decide(attempt, &err) {
                    RetryDecision::Retry { next_attempt } => {
                        self.emit(ActionEvent::api_retry(attempt));
                        attempt = next_attempt;
                    }
                    RetryDecision::GiveUp => {
                        self.inner.state.lock().load_failed();
                        self.emit(ActionEvent::api_error(
                            ErrorSource::Bff,
                            "Activity API failed after retries",
                        ));
                        break LoadOutcome::Failed { attempts: attempt };
                    }
                },
            }
        };
        self.inner.state.lock().end_load();
        outcome
    }

    fn emit(&self, event: ActionEvent) {
        if self.is_alive() {
            (self.inner.on_action)(event);
        }
    }
}
