use serde::Serialize;

/// Identifier of one widget panel. The set is fixed; the widget never grows
/// or reorders panels at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PanelId {
    Login,
    Upload,
    Quota,
    Upgrade,
}

impl PanelId {
    /// Render order of the tab strip.
    pub const ALL: [PanelId; 4] = [
        PanelId::Login,
        PanelId::Upload,
        PanelId::Quota,
        PanelId::Upgrade,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Upload => "upload",
            Self::Quota => "quota",
            Self::Upgrade => "upgrade",
        }
    }

    /// Tab label shown in the widget header strip.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Login => "Login/Register",
            Self::Upload => "Upload",
            Self::Quota => "Quota",
            Self::Upgrade => "Upgrade",
        }
    }
}

#[must_use]
pub fn parse_panel_id(raw: &str) -> Option<PanelId> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "login" => Some(PanelId::Login),
        "upload" => Some(PanelId::Upload),
        "quota" => Some(PanelId::Quota),
        "upgrade" => Some(PanelId::Upgrade),
        _ => None,
    }
}

/// Visibility and panel selection for the page-wide widget singleton.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WidgetState {
    pub visible: bool,
    pub active_panel: PanelId,
}

impl WidgetState {
    /// State at module start: closed, landing on quota when a session
    /// already exists and on login otherwise.
    #[must_use]
    pub fn at_startup(signed_in: bool) -> Self {
        Self {
            visible: false,
            active_panel: if signed_in {
                PanelId::Quota
            } else {
                PanelId::Login
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetAction {
    Open { panel: Option<PanelId> },
    Close,
    SelectPanel { panel: PanelId },
}

/// Applies one action and reports whether the active panel must re-render.
///
/// Closing never renders and keeps the selection; opening always renders;
/// selecting a panel renders only while the widget is visible.
#[must_use]
pub fn apply_action(state: &mut WidgetState, action: WidgetAction) -> bool {
    match action {
        WidgetAction::Open { panel } => {
            if let Some(panel) = panel {
                state.active_panel = panel;
            }
            state.visible = true;
            true
        }
        WidgetAction::Close => {
            state.visible = false;
            false
        }
        WidgetAction::SelectPanel { panel } => {
            state.active_panel = panel;
            state.visible
        }
    }
}
