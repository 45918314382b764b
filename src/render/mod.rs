//! Terminal renderer for the panel view and host signals.
//!
//! The host binary uses this to draw what a browser host would show in the
//! element's box, plus a log line per signal the element dispatched.

mod style;

pub use style::RenderStyle;

use std::io::Write;

use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    ExecutableCommand,
};

use crate::activity::{
    ContentRegion, PanelView, EMPTY_FEED, NOT_AUTHENTICATED, NOT_CONFIGURED, NO_ROLES, NO_TENANT,
};
use crate::messaging::HostSignal;

/// Terminal renderer for panel views.
#[derive(Debug, Clone, Default)]
pub struct TerminalRenderer {
    style: RenderStyle,
}

impl TerminalRenderer {
    /// Create a new renderer with default style.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a renderer with custom style.
    pub fn with_style(style: RenderStyle) -> Self {
        Self { style }
    }

    fn colored<W: Write>(&self, out: &mut W, color: Color, text: &str) -> std::io::Result<()> {
        out.execute(SetForegroundColor(color))?
            .execute(Print(text))?
            .execute(ResetColor)?;
        Ok(())
    }

    fn value_color(&self, value: &str, sentinel: &str) -> Color {
        if value == sentinel {
            self.style.sentinel_color
        } else {
            self.style.label_color
        }
    }

    fn row<W: Write>(
        &self,
        out: &mut W,
        label: &str,
        value: &str,
        sentinel: &str,
    ) -> std::io::Result<()> {
        out.execute(Print(format!("{label}: ")))?;
        self.colored(out, self.value_color(value, sentinel), value)?;
        out.execute(Print("\n"))?;
        Ok(())
    }

    /// Draw the whole panel.
    pub fn render_view<W: Write>(&self, out: &mut W, view: &PanelView) -> std::io::Result<()> {
        self.colored(out, self.style.title_color, view.title)?;
        out.execute(Print(" "))?;
        self.colored(
            out,
            self.value_color(&view.tenant, NO_TENANT),
            &format!("[{}]", view.tenant),
        )?;
        out.execute(Print("\n"))?;

        self.row(out, "User", &view.user, NOT_AUTHENTICATED)?;
        self.row(out, "Roles", &view.roles, NO_ROLES)?;
        self.row(out, "BFF", &view.bff, NOT_CONFIGURED)?;

        let button = if view.refresh.enabled {
            format!("[ {} ]\n", view.refresh.label)
        } else {
            format!("[ {} ] (disabled)\n", view.refresh.label)
        };
        out.execute(Print(button))?;

        match &view.content {
            ContentRegion::Error(message) => {
                self.colored(out, self.style.error_color, &format!("✗ {message}"))?;
                out.execute(Print("\n"))?;
            }
            ContentRegion::Empty => {
                self.colored(out, self.style.sentinel_color, EMPTY_FEED)?;
                out.execute(Print("\n"))?;
            }
            ContentRegion::List(entries) => {
                for entry in entries {
                    self.colored(out, self.style.item_color, "• ")?;
                    out.execute(Print(&entry.text))?.execute(Print("\n"))?;
                }
            }
        }
        out.flush()
    }

    /// One line per dispatched signal.
    pub fn render_signal<W: Write>(&self, out: &mut W, signal: &HostSignal) -> std::io::Result<()> {
        self.colored(out, self.style.signal_color, signal.name())?;
        if let Some(detail) = signal.detail() {
            out.execute(Print(format!(" {detail}")))?;
        }
        out.execute(Print("\n"))?;
        out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activity::{ActivityItem, PanelProps, PanelState};
    use crate::messaging::ActionEvent;

    fn render(view: &PanelView) -> String {
        let mut out = Vec::new();
        TerminalRenderer::new().render_view(&mut out, view).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_render_defaults() {
        let text = render(&PanelView::build(&PanelProps::default(), &PanelState::default()));
        assert!(text.contains("User Activity"));
        assert!(text.contains("[no-tenant]"));
        assert!(text.contains("not authenticated"));
        assert!(text.contains("[ Refresh Activity ]"));
        assert!(text.contains("No activity to show"));
    }

    #[test]
    fn test_render_list_and_disabled_button() {
        let state = PanelState {
            items: vec![ActivityItem {
                id: "1".into(),
                item_type: "login".into(),
                message: "User logged in".into(),
            }],
            loading: true,
            error: None,
        };
        let text = render(&PanelView::build(&PanelProps::default(), &state));
        assert!(text.contains("User logged in"));
        assert!(text.contains("(disabled)"));
        assert!(!text.contains("No activity to show"));
    }

    #[test]
    fn test_render_error() {
        let state = PanelState {
            error: Some("Failed to load activity".into()),
            ..Default::default()
        };
        let text = render(&PanelView::build(&PanelProps::default(), &state));
        assert!(text.contains("Failed to load activity"));
    }

    #[test]
    fn test_render_signal_with_detail() {
        let mut out = Vec::new();
        let renderer = TerminalRenderer::new();
        renderer
            .render_signal(&mut out, &HostSignal::Action(ActionEvent::api_retry(1)))
            .unwrap();
        renderer.render_signal(&mut out, &HostSignal::Ready).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("mfe:action"));
        assert!(text.contains(r#""attempt":1"#));
        assert!(text.contains("mfe:ready"));
    }
}
