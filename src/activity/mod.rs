//! Activity panel.
//!
//! This module provides:
//! - [`ActivityPanel`]: precondition gating, the retrying fetch, state transitions
//! - [`PanelState`] and the [`PanelView`] derived from it
//! - [`RetryPolicy`]: three immediate attempts per load

mod panel;
mod retry;
mod state;
mod types;
mod view;

pub use panel::{ActivityPanel, LoadBlocked, LoadOutcome, PanelProps};
pub use retry::{RetryDecision, RetryPolicy, DEFAULT_MAX_ATTEMPTS};
pub use state::{PanelState, LOAD_FAILED_ERROR, NOT_AUTHENTICATED_ERROR, NOT_CONFIGURED_ERROR};
pub use types::{ActivityItem, ActivityResponse};
pub use view::*;
