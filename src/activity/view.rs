//! What the panel shows for a given state.
//!
//! This is the presentation contract, not markup. Renderers (the terminal
//! renderer, a DOM binding) draw a [`PanelView`] however they like.

use std::fmt;

use super::panel::PanelProps;
use super::state::PanelState;
use crate::auth::authenticated;

pub const PANEL_TITLE: &str = "User Activity";
pub const NO_TENANT: &str = "no-tenant";
pub const NOT_AUTHENTICATED: &str = "not authenticated";
pub const NO_ROLES: &str = "none";
pub const NOT_CONFIGURED: &str = "not configured";
pub const EMPTY_FEED: &str = "No activity to show";
pub const REFRESH_LABEL: &str = "Refresh Activity";
pub const LOADING_LABEL: &str = "Loading…";

/// The manual refresh trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshButton {
    pub label: &'static str,
    pub enabled: bool,
}

/// One rendered feed row, keyed by item id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedEntry {
    pub key: String,
    pub text: String,
}

/// Exactly one of these is shown below the status block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentRegion {
    Error(String),
    Empty,
    List(Vec<FeedEntry>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelView {
    pub title: &'static str,
    pub tenant: String,
    pub user: String,
    pub roles: String,
    pub bff: String,
    pub refresh: RefreshButton,
    pub content: ContentRegion,
}

fn or_sentinel(value: &str, sentinel: &str) -> String {
    if value.is_empty() {
        sentinel.to_string()
    } else {
        value.to_string()
    }
}

impl PanelView {
    pub fn build(props: &PanelProps, state: &PanelState) -> Self {
        let auth = props.auth_context.as_ref();

        let user = authenticated(auth)
            .map(|a| a.user_id.clone())
            .unwrap_or_else(|| NOT_AUTHENTICATED.to_string());
        let roles = match auth {
            Some(a) if !a.roles.is_empty() => a.roles.join(", "),
            _ => NO_ROLES.to_string(),
        };

        // An error wins over a stale list.
        let content = match &state.error {
            Some(message) => ContentRegion::Error(message.clone()),
            None if state.items.is_empty() => ContentRegion::Empty,
            None => ContentRegion::List(
                state
                    .items
                    .iter()
                    .map(|item| FeedEntry {
                        key: item.id.clone(),
                        text: item.message.clone(),
                    })
                    .collect(),
            ),
        };

        Self {
            title: PANEL_TITLE,
            tenant: or_sentinel(&props.tenant_id, NO_TENANT),
            user,
            roles,
            bff: or_sentinel(&props.bff_base_url, NOT_CONFIGURED),
            refresh: RefreshButton {
                label: if state.loading { LOADING_LABEL } else { REFRESH_LABEL },
                enabled: !state.loading,
            },
            content,
        }
    }
}

impl fmt::Display for PanelView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} [{}]", self.title, self.tenant)?;
        writeln!(f, "User: {}", self.user)?;
        writeln!(f, "Roles: {}", self.roles)?;
        writeln!(f, "BFF: {}", self.bff)?;
        let marker = if self.refresh.enabled { "" } else { " (disabled)" };
        writeln!(f, "[{}]{}", self.refresh.label, marker)?;
        match &self.content {
            ContentRegion::Error(message) => writeln!(f, "{message}"),
            ContentRegion::Empty => writeln!(f, "{EMPTY_FEED}"),
            ContentRegion::List(entries) => {
                for entry in entries {
                    writeln!(f, "- {}", entry.text)?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activity::ActivityItem;
    use crate::auth::AuthContext;

    fn item(id: &str, message: &str) -> ActivityItem {
        ActivityItem {
            id: id.into(),
            item_type: "note".into(),
            message: message.into(),
        }
    }

    #[test]
    fn test_defaults_show_sentinels() {
        let view = PanelView::build(&PanelProps::default(), &PanelState::default());
        assert_eq!(view.title, "User Activity");
        assert_eq!(view.tenant, "no-tenant");
        assert_eq!(view.user, "not authenticated");
        assert_eq!(view.roles, "none");
        assert_eq!(view.bff, "not configured");
        assert_eq!(view.content, ContentRegion::Empty);
        assert_eq!(
            view.refresh,
            RefreshButton {
                label: "Refresh Activity",
                enabled: true
            }
        );
    }

    #[test]
    fn test_configured_status_block() {
        let props = PanelProps {
            tenant_id: "acme".into(),
            auth_context: Some(AuthContext::new("u-1", ["admin", "viewer"])),
            bff_base_url: "http://bff".into(),
        };
        let view = PanelView::build(&props, &PanelState::default());
        assert_eq!(view.tenant, "acme");
        assert_eq!(view.user, "u-1");
        assert_eq!(view.roles, "admin, viewer");
        assert_eq!(view.bff, "http://bff");
    }

    #[test]
    fn test_loading_disables_refresh() {
        let state = PanelState {
            loading: true,
            ..Default::default()
        };
        let view = PanelView::build(&PanelProps::default(), &state);
        assert_eq!(view.refresh.label, "Loading…");
        assert!(!view.refresh.enabled);
    }

    #[test]
    fn test_list_region_keeps_order() {
        let state = PanelState {
            items: vec![item("1", "User logged in"), item("2", "User clicked a button")],
            ..Default::default()
        };
        let view = PanelView::build(&PanelProps::default(), &state);
        assert_eq!(
            view.content,
            ContentRegion::List(vec![
                FeedEntry {
                    key: "1".into(),
                    text: "User logged in".into()
                },
                FeedEntry {
                    key: "2".into(),
                    text: "User clicked a button".into()
                },
            ])
        );
    }

    #[test]
    fn test_error_region_wins_over_items() {
        let state = PanelState {
            items: vec![item("1", "old")],
            error: Some("Failed to load activity".into()),
            loading: false,
        };
        let view = PanelView::build(&PanelProps::default(), &state);
        assert_eq!(
            view.content,
            ContentRegion::Error("Failed to load activity".into())
        );
    }

    #[test]
    fn test_display_text() {
        let state = PanelState {
            items: vec![item("1", "hi")],
            ..Default::default()
        };
        let text = PanelView::build(&PanelProps::default(), &state).to_string();
        assert!(text.starts_with("User Activity [no-tenant]\n"));
        assert!(text.contains("User: not authenticated\n"));
        assert!(text.contains("[Refresh Activity]\n"));
        assert!(text.ends_with("- hi\n"));
    }
}
