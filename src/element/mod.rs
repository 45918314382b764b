//! Host adapter: the embeddable `<user-activity-mfe>` element.
//!
//! The host talks to the element through the same surface it would use for
//! a custom element: an observed `tenant-id` attribute, `authContext` and
//! `bffBaseUrl` properties, and attach/detach lifecycle callbacks. The
//! element forwards everything into one [`ElementConfig`], re-renders the
//! [`ActivityPanel`] from it, and re-dispatches the panel's action events as
//! [`HostSignal`](crate::messaging::HostSignal)s.

use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{debug, info};
use uuid::Uuid;

use crate::activity::{ActivityPanel, LoadOutcome, PanelProps, PanelView, RetryPolicy};
use crate::auth::{AuthContext, AuthContextError};
use crate::client::ActivityClient;
use crate::messaging::SignalSender;

/// Tag the element is registered under.
pub const TAG_NAME: &str = "user-activity-mfe";
pub const TENANT_ID_ATTRIBUTE: &str = "tenant-id";

#[derive(Debug, Error)]
pub enum ElementError {
    #[error("Invalid authContext: {0}")]
    InvalidAuthContext(#[from] AuthContextError),
}

/// Canonical configuration. Attribute and property setters both write here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementConfig {
    pub tenant_id: String,
    pub auth_context: Option<AuthContext>,
    pub bff_base_url: String,
}

impl ElementConfig {
    pub fn to_props(&self) -> PanelProps {
        PanelProps {
            tenant_id: self.tenant_id.clone(),
            auth_context: self.auth_context.clone(),
            bff_base_url: self.bff_base_url.clone(),
        }
    }
}

/// Established on first attachment; holds the mounted panel.
struct RenderRoot {
    mount_id: Uuid,
    panel: ActivityPanel,
    renders: u64,
}

pub struct ActivityElement {
    config: ElementConfig,
    root: Option<RenderRoot>,
    client: Arc<dyn ActivityClient>,
    retry: RetryPolicy,
    signals: SignalSender,
    connected: bool,
}

impl ActivityElement {
    /// Attributes whose changes reach [`ActivityElement::attribute_changed_callback`].
    pub const OBSERVED_ATTRIBUTES: &'static [&'static str] = &[TENANT_ID_ATTRIBUTE];

    pub fn new(client: Arc<dyn ActivityClient>, signals: SignalSender) -> Self {
        Self {
            config: ElementConfig::default(),
            root: None,
            client,
            retry: RetryPolicy::default(),
            signals,
            connected: false,
        }
    }

    /// Retry policy for panels mounted from now on.
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    // ---------------------------------------------------------------------
    // Attributes and properties
    // ---------------------------------------------------------------------

    pub fn attribute_changed_callback(
        &mut self,
        name: &str,
        _old: Option<&str>,
        new: Option<&str>,
    ) {
        if name == TENANT_ID_ATTRIBUTE {
            self.config.tenant_id = new.unwrap_or_default().to_string();
            self.render();
        }
    }

    pub fn tenant_id(&self) -> &str {
        &self.config.tenant_id
    }

    pub fn set_auth_context(&mut self, auth_context: Option<AuthContext>) {
        self.config.auth_context = auth_context;
        self.render();
    }

    /// Property setter for untyped host values. A value of the wrong shape
    /// is rejected and leaves the element untouched.
    pub fn set_auth_context_value(&mut self, value: &Value) -> Result<(), ElementError> {
        let auth_context = AuthContext::from_value(value)?;
        self.set_auth_context(auth_context);
        Ok(())
    }

    pub fn auth_context(&self) -> Option<&AuthContext> {
        self.config.auth_context.as_ref()
    }

    pub fn set_bff_base_url(&mut self, url: impl Into<String>) {
        self.config.bff_base_url = url.into();
        self.render();
    }

    pub fn bff_base_url(&self) -> &str {
        &self.config.bff_base_url
    }

    // ---------------------------------------------------------------------
    // Lifecycle
    // ---------------------------------------------------------------------

    /// Attached to the host tree. The render root is created only once;
    /// `mfe:ready` fires when it is.
    pub fn connected_callback(&mut self) {
        self.connected = true;
        if self.root.is_none() {
            let panel = ActivityPanel::with_retry_policy(
                self.client.clone(),
                self.signals.action_callback(),
                self.retry,
            );
            let mount_id = Uuid::new_v4();
            info!(%mount_id, tag = TAG_NAME, "render root established");
            self.root = Some(RenderRoot {
                mount_id,
                panel,
                renders: 0,
            });
            self.signals.ready();
        }
        self.render();
    }

    /// Detached from the host tree. The root survives so a re-attach keeps
    /// the panel state.
    pub fn disconnected_callback(&mut self) {
        self.connected = false;
        debug!(tag = TAG_NAME, "element detached");
    }

    /// Tear down the render root. Pending loads issue no further request; a
    /// request already in flight settles without writing state or emitting.
    pub fn unmount(&mut self) {
        if let Some(root) = self.root.take() {
            info!(mount_id = %root.mount_id, "render root unmounted");
            root.panel.unmount();
        }
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn is_mounted(&self) -> bool {
        self.root.is_some()
    }

    // ---------------------------------------------------------------------
    // Rendering
    // ---------------------------------------------------------------------

    /// Push the current config into the panel. No-op before the first attach.
    fn render(&mut self) {
        let Some(root) = self.root.as_mut() else {
            return;
        };
        root.panel.set_props(self.config.to_props());
        root.renders += 1;
        debug!(
            mount_id = %root.mount_id,
            renders = root.renders,
            tenant_id = %self.config.tenant_id,
            "rendered"
        );
    }

    /// Render passes since the root was established.
    pub fn render_count(&self) -> u64 {
        self.root.as_ref().map_or(0, |root| root.renders)
    }

    /// What the panel currently shows, if mounted.
    pub fn view(&self) -> Option<PanelView> {
        self.root.as_ref().map(|root| root.panel.view())
    }

    pub fn panel(&self) -> Option<&ActivityPanel> {
        self.root.as_ref().map(|root| &root.panel)
    }

    /// Press the panel's refresh button.
    ///
    /// `None` when nothing is mounted or the button is disabled.
    pub fn click_refresh(&self) -> Option<JoinHandle<LoadOutcome>> {
        self.panel()?.refresh()
    }
}
