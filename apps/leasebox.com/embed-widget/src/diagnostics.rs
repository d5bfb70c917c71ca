use serde::Serialize;

/// Boot and render progress snapshot, exposed to the host page through
/// `widget_diagnostics_json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WidgetDiagnostics {
    pub phase: String,
    pub detail: String,
    pub renders: u64,
    pub last_rendered_panel: Option<String>,
    pub started_at_unix_ms: Option<u64>,
    pub last_error: Option<String>,
}

impl Default for WidgetDiagnostics {
    fn default() -> Self {
        Self {
            phase: "idle".to_string(),
            detail: "widget not started".to_string(),
            renders: 0,
            last_rendered_panel: None,
            started_at_unix_ms: None,
            last_error: None,
        }
    }
}

impl WidgetDiagnostics {
    pub fn set_phase(&mut self, phase: &str, detail: &str) {
        self.phase = phase.to_string();
        self.detail = detail.to_string();
        if phase != "error" {
            self.last_error = None;
        }
    }

    pub fn record_error(&mut self, message: &str) {
        self.phase = "error".to_string();
        self.detail = "startup failed".to_string();
        self.last_error = Some(message.to_string());
    }

    pub fn record_render(&mut self, panel: &str) {
        self.renders += 1;
        self.last_rendered_panel = Some(panel.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phases_advance_and_clear_stale_errors() {
        let mut diagnostics = WidgetDiagnostics::default();
        assert_eq!(diagnostics.phase, "idle");

        diagnostics.record_error("document is unavailable");
        assert_eq!(diagnostics.phase, "error");
        assert_eq!(
            diagnostics.last_error.as_deref(),
            Some("document is unavailable")
        );

        diagnostics.set_phase("ready", "widget mounted");
        assert_eq!(diagnostics.phase, "ready");
        assert_eq!(diagnostics.detail, "widget mounted");
        assert_eq!(diagnostics.last_error, None);
    }

    #[test]
    fn renders_count_up_and_remember_the_panel() {
        let mut diagnostics = WidgetDiagnostics::default();
        diagnostics.record_render("login");
        diagnostics.record_render("quota");
        assert_eq!(diagnostics.renders, 2);
        assert_eq!(diagnostics.last_rendered_panel.as_deref(), Some("quota"));
    }

    #[test]
    fn snapshot_serializes_every_field() {
        let mut diagnostics = WidgetDiagnostics::default();
        diagnostics.started_at_unix_ms = Some(1_715_000_000_000);
        diagnostics.set_phase("ready", "widget mounted");
        diagnostics.record_render("login");

        let snapshot =
            serde_json::to_value(&diagnostics).expect("diagnostics serialize to json");
        assert_eq!(snapshot["phase"], "ready");
        assert_eq!(snapshot["renders"], 1);
        assert_eq!(snapshot["last_rendered_panel"], "login");
        assert_eq!(snapshot["started_at_unix_ms"], 1_715_000_000_000_u64);
    }
}
