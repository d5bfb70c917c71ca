pub(crate) const SESSION_STORAGE_KEY: &str = "leasebox.widget.session.v1";
pub(crate) const OPEN_TRIGGER_ATTR: &str = "data-leasebox-open";
pub(crate) const PANEL_HINT_ATTR: &str = "data-leasebox-panel";
pub(crate) const WIDGET_LAUNCHER_ID: &str = "leasebox-widget-launcher";
pub(crate) const WIDGET_BACKDROP_ID: &str = "leasebox-widget-backdrop";
pub(crate) const WIDGET_MODAL_ID: &str = "leasebox-widget-modal";
pub(crate) const WIDGET_STATUS_ID: &str = "leasebox-widget-status";
pub(crate) const WIDGET_TABS_ID: &str = "leasebox-widget-tabs";
pub(crate) const WIDGET_BODY_ID: &str = "leasebox-widget-body";
pub(crate) const WIDGET_TAB_ID_PREFIX: &str = "leasebox-widget-tab-";
pub(crate) const WIDGET_TITLE: &str = "Leasebox";
pub(crate) const LAUNCHER_LABEL: &str = "Leasebox";
pub(crate) const UPLOAD_PANEL_INTRO: &str = "Upload a file (respects your plan quotas).";
pub(crate) const UPGRADE_PANEL_INTRO: &str = "Start a checkout session to upgrade to Pro.";
pub(crate) const MSG_REGISTERED: &str = "Registered. You can now log in.";
pub(crate) const MSG_LOGGED_IN: &str = "Logged in.";
pub(crate) const MSG_SIGNED_OUT: &str = "Signed out.";
pub(crate) const MSG_CHOOSE_FILE: &str = "Choose a file first.";
pub(crate) const MSG_UPLOADING: &str = "Uploading...";
pub(crate) const MSG_LOADING: &str = "Loading...";
pub(crate) const MSG_CREATING_CHECKOUT: &str = "Creating checkout session...";
pub(crate) const MSG_NO_CHECKOUT_URL: &str = "No checkout URL returned.";
pub(crate) const COLOR_SUCCESS: &str = "#065f46";
pub(crate) const COLOR_ERROR: &str = "#991b1b";
pub(crate) const COLOR_MUTED: &str = "#6b7280";
pub(crate) const COLOR_HEADER_BG: &str = "#111827";
pub(crate) const COLOR_TAB_IDLE_BG: &str = "#f3f4f6";
