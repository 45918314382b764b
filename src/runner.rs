//! Host Runner Module
//!
//! A terminal stand-in for the host application shell: it configures the
//! element the way a page would, optionally presses refresh, and prints the
//! resulting panel and every signal the element dispatched.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::client::HttpActivityClient;
use crate::config::Settings;
use crate::element::{ActivityElement, TENANT_ID_ATTRIBUTE};
use crate::messaging::SignalBus;
use crate::render::TerminalRenderer;

/// Runtime options collected by the binary.
///
/// Anything set here overrides the settings file.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// Enable debug logging
    pub debug: bool,
    /// Enable verbose (trace-level) logging
    pub verbose: bool,
    /// Press the refresh button after configuring the element
    pub refresh: bool,
    /// Settings file to read instead of the XDG default
    pub settings_path: Option<PathBuf>,
    pub tenant_id: Option<String>,
    pub bff_base_url: Option<String>,
    pub user_id: Option<String>,
    pub roles: Option<Vec<String>>,
}

impl AppConfig {
    /// Layer command-line overrides on top of file settings.
    pub fn apply(&self, mut settings: Settings) -> Settings {
        if let Some(tenant_id) = &self.tenant_id {
            settings.tenant_id = tenant_id.clone();
        }
        if let Some(url) = &self.bff_base_url {
            settings.bff_base_url = url.clone();
        }
        if let Some(user_id) = &self.user_id {
            settings.user_id = Some(user_id.clone());
        }
        if let Some(roles) = &self.roles {
            settings.roles = roles.clone();
        }
        settings
    }

    fn load_settings(&self) -> anyhow::Result<Settings> {
        let settings = match &self.settings_path {
            Some(path) => Settings::load_from(path)?,
            None => Settings::load()?,
        };
        Ok(self.apply(settings))
    }
}

fn init_tracing(config: &AppConfig) {
    let default_filter = if config.verbose {
        "trace"
    } else if config.debug {
        "debug"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .init();
}

/// Run the terminal host.
///
/// # Errors
///
/// Returns an error if the settings file is unreadable, the runtime cannot
/// start, or stdout cannot be written.
pub fn run_host(config: AppConfig) -> anyhow::Result<()> {
    init_tracing(&config);
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(host_session(config))
}

async fn host_session(config: AppConfig) -> anyhow::Result<()> {
    let settings = config.load_settings()?;
    debug!(?settings, "host settings");

    let bus = SignalBus::new();
    let mut signals = bus.subscribe();
    let mut element = ActivityElement::new(Arc::new(HttpActivityClient::new()), bus.sender());

    element.connected_callback();
    element.attribute_changed_callback(TENANT_ID_ATTRIBUTE, None, Some(&settings.tenant_id));
    element.set_auth_context(settings.auth_context());
    element.set_bff_base_url(settings.bff_base_url.clone());

    if config.refresh {
        if let Some(load) = element.click_refresh() {
            let outcome = load.await?;
            info!(?outcome, "refresh settled");
        }
    }

    let renderer = TerminalRenderer::new();
    let mut stdout = std::io::stdout();
    for signal in signals.drain() {
        renderer.render_signal(&mut stdout, &signal)?;
    }
    if let Some(view) = element.view() {
        renderer.render_view(&mut stdout, &view)?;
    }

    element.unmount();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_win_over_settings() {
        let settings = Settings {
            tenant_id: "from-file".into(),
            bff_base_url: "http://file".into(),
            user_id: Some("file-user".into()),
            roles: vec!["viewer".into()],
        };
        let config = AppConfig {
            tenant_id: Some("acme".into()),
            roles: Some(vec!["admin".into(), "ops".into()]),
            ..Default::default()
        };

        let merged = config.apply(settings);

        assert_eq!(merged.tenant_id, "acme");
        assert_eq!(merged.bff_base_url, "http://file");
        assert_eq!(merged.user_id.as_deref(), Some("file-user"));
        assert_eq!(merged.roles, vec!["admin", "ops"]);
    }

    #[test]
    fn test_no_overrides_keeps_settings() {
        let settings = Settings {
            tenant_id: "t".into(),
            ..Default::default()
        };
        assert_eq!(AppConfig::default().apply(settings.clone()), settings);
    }
}
