//! Activity data as returned by the BFF.

use serde::{Deserialize, Serialize};

/// One entry in the activity feed. Only ever produced by a BFF response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityItem {
    pub id: String,
    #[serde(rename = "type")]
    pub item_type: String,
    pub message: String,
}

/// Body of `GET /mfe/activity`.
///
/// The BFF also echoes `userId` and `roles`; those are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ActivityResponse {
    #[serde(default)]
    pub items: Option<Vec<ActivityItem>>,
}

impl ActivityResponse {
    /// Items, or an empty feed when the field is absent or null.
    pub fn into_items(self) -> Vec<ActivityItem> {
        self.items.unwrap_or_default()
    }
}
