//! Panel state management
//!
//! The panel owns one `PanelState` per mount. Only the transitions below
//! mutate it.

use super::ActivityItem;

/// Shown when there is no signed-in user.
pub const NOT_AUTHENTICATED_ERROR: &str = "User not authenticated";
/// Shown when the BFF base URL is empty.
pub const NOT_CONFIGURED_ERROR: &str = "BFF base URL not configured";
/// Shown once every attempt has failed.
pub const LOAD_FAILED_ERROR: &str = "Failed to load activity";

/// Visible state of the activity panel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PanelState {
    pub items: Vec<ActivityItem>,
    pub loading: bool,
    pub error: Option<String>,
}

impl PanelState {
    pub fn new() -> Self {
        Self::default()
    }

    /// A precondition failed: record the message without touching `loading`.
    pub fn block(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    /// A request chain is starting.
    pub fn begin_load(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Replace the feed with a fresh response.
    pub fn load_succeeded(&mut self, items: Vec<ActivityItem>) {
        self.items = items;
    }

    /// Every attempt failed. Existing items are kept.
    pub fn load_failed(&mut self) {
        self.error = Some(LOAD_FAILED_ERROR.to_string());
    }

    /// The request chain has settled.
    pub fn end_load(&mut self) {
        self.loading = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str) -> ActivityItem {
        ActivityItem {
            id: id.to_string(),
            item_type: "note".to_string(),
            message: format!("message {id}"),
        }
    }

    #[test]
    fn test_new_state_is_idle_and_empty() {
        let state = PanelState::new();
        assert!(state.items.is_empty());
        assert!(!state.loading);
        assert!(state.error.is_none());
    }

    #[test]
    fn test_block_does_not_start_loading() {
        let mut state = PanelState::new();
        state.block(NOT_AUTHENTICATED_ERROR);
        assert_eq!(state.error.as_deref(), Some("User not authenticated"));
        assert!(!state.loading);
    }

    #[test]
    fn test_begin_load_clears_stale_error() {
        let mut state = PanelState::new();
        state.load_failed();
        state.begin_load();
        assert!(state.loading);
        assert!(state.error.is_none());
    }

    #[test]
    fn test_success_replaces_items() {
        let mut state = PanelState::new();
        state.begin_load();
        state.load_succeeded(vec![item("1"), item("2")]);
        state.end_load();
        state.begin_load();
        state.load_succeeded(vec![item("3")]);
        state.end_load();
        assert_eq!(state.items, vec![item("3")]);
        assert!(!state.loading);
    }

    #[test]
    fn test_failure_keeps_previous_items() {
        let mut state = PanelState::new();
        state.load_succeeded(vec![item("1")]);
        state.begin_load();
        state.load_failed();
        state.end_load();
        assert_eq!(state.items, vec![item("1")]);
        assert_eq!(state.error.as_deref(), Some("Failed to load activity"));
        assert!(!state.loading);
    }
}
