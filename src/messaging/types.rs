//! Action events and host signals.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;

/// Action type emitted after a successful load.
pub const ACTIVITY_LOADED: &str = "activityLoaded";
/// Action type emitted before each immediate re-attempt.
pub const API_RETRY: &str = "apiRetry";
/// Action type emitted for every terminal failure.
pub const API_ERROR: &str = "apiError";

/// Machine-readable origin of a terminal failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorSource {
    Auth,
    Config,
    Bff,
}

impl ErrorSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Auth => "auth",
            Self::Config => "config",
            Self::Bff => "bff",
        }
    }
}

/// A named notification for host-side telemetry.
///
/// Fire-and-forget: nothing keeps a copy once it has been delivered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionEvent {
    #[serde(rename = "type")]
    pub action_type: String,
    #[serde(default)]
    pub payload: Map<String, Value>,
}

impl ActionEvent {
    pub fn new(action_type: impl Into<String>, payload: Map<String, Value>) -> Self {
        Self {
            action_type: action_type.into(),
            payload,
        }
    }

    /// `apiError` with `{source, message}`.
    pub fn api_error(source: ErrorSource, message: impl Into<String>) -> Self {
        let mut payload = Map::new();
        payload.insert("source".into(), Value::from(source.as_str()));
        payload.insert("message".into(), Value::from(message.into()));
        Self::new(API_ERROR, payload)
    }

    /// `apiRetry` with `{attempt}` (the attempt that just failed).
    pub fn api_retry(attempt: u32) -> Self {
        let mut payload = Map::new();
        payload.insert("attempt".into(), Value::from(attempt));
        Self::new(API_RETRY, payload)
    }

    /// `activityLoaded` with `{count}`.
    pub fn activity_loaded(count: usize) -> Self {
        let mut payload = Map::new();
        payload.insert("count".into(), Value::from(count));
        Self::new(ACTIVITY_LOADED, payload)
    }

    /// The `{type, payload}` object carried as a signal detail.
    pub fn detail(&self) -> Value {
        serde_json::json!({
            "type": self.action_type,
            "payload": Value::Object(self.payload.clone()),
        })
    }
}

/// Output channel handed to the panel.
pub type ActionCallback = Arc<dyn Fn(ActionEvent) + Send + Sync>;

/// Signal name fired once the element has a render root.
pub const READY_SIGNAL: &str = "mfe:ready";
/// Signal name carrying a bridged action event.
pub const ACTION_SIGNAL: &str = "mfe:action";

/// What the element dispatches on itself for the host to observe.
#[derive(Debug, Clone, PartialEq)]
pub enum HostSignal {
    Ready,
    Action(ActionEvent),
}

impl HostSignal {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Ready => READY_SIGNAL,
            Self::Action(_) => ACTION_SIGNAL,
        }
    }

    /// Propagates to ancestor listeners.
    pub fn bubbles(&self) -> bool {
        true
    }

    /// Crosses nested embedding boundaries.
    pub fn composed(&self) -> bool {
        true
    }

    pub fn detail(&self) -> Option<Value> {
        match self {
            Self::Ready => None,
            Self::Action(action) => Some(action.detail()),
        }
    }
}
