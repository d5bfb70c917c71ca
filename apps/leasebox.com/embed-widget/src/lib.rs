#![cfg_attr(test, allow(clippy::expect_used))]

#[cfg(any(target_arch = "wasm32", test))]
mod diagnostics;
#[cfg(target_arch = "wasm32")]
mod wasm_constants;

#[cfg(target_arch = "wasm32")]
mod wasm {
    use std::cell::RefCell;

    use gloo_net::http::Request;
    use leasebox_client_core::api::{
        ApiCall, ApiError, ApiPayload, CheckoutResponse, HttpMethod, LoginResponse,
        PlannedRequest, QuotaResponse, UPLOAD_FIELD_NAME, UploadResponse, decode_json_payload,
        decode_response_payload, json_request_headers, plan_api_call, plan_upload_request,
        resolve_checkout_url, upload_request_headers,
    };
    use leasebox_client_core::format::{
        quota_summary_lines, session_status_label, upload_success_lines,
    };
    use leasebox_client_core::panel::{
        PanelId, WidgetAction, WidgetState, apply_action, parse_panel_id,
    };
    use leasebox_client_core::session::SessionTokenStore;
    use serde::Deserialize;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::spawn_local;
    use web_sys::{HtmlElement, HtmlInputElement};

    use crate::diagnostics::WidgetDiagnostics;
    use crate::wasm_constants::*;

    mod dom;
    mod embed;
    mod network;
    mod panels;

    use dom::*;
    use embed::*;
    use network::*;
    use panels::*;

    thread_local! {
        static WIDGET_STATE: RefCell<WidgetState> = RefCell::new(WidgetState::at_startup(false));
        static DIAGNOSTICS: RefCell<WidgetDiagnostics> = RefCell::new(WidgetDiagnostics::default());
        static LAUNCHER_CLICK_HANDLER: RefCell<Option<Closure<dyn FnMut(web_sys::Event)>>> = const { RefCell::new(None) };
        static BACKDROP_CLICK_HANDLER: RefCell<Option<Closure<dyn FnMut(web_sys::Event)>>> = const { RefCell::new(None) };
        static TAB_CLICK_HANDLERS: RefCell<Vec<Closure<dyn FnMut(web_sys::Event)>>> = RefCell::new(Vec::new());
        static OPEN_TRIGGER_CLICK_HANDLER: RefCell<Option<Closure<dyn FnMut(web_sys::Event)>>> = const { RefCell::new(None) };
        // Closures owned by the currently mounted panel body. Panel actions
        // never trigger a render themselves, so clearing this at render time
        // never drops a closure that is still on the stack.
        static PANEL_EVENT_HANDLERS: RefCell<Vec<Closure<dyn FnMut(web_sys::Event)>>> = RefCell::new(Vec::new());
    }

    /// Token storage backed by `window.localStorage`. Missing or erroring
    /// storage reads as the empty token and swallows writes.
    struct BrowserSessionStore;

    impl BrowserSessionStore {
        fn read_stored_token() -> Option<String> {
            let window = web_sys::window()?;
            let storage = window.local_storage().ok()??;
            storage.get_item(SESSION_STORAGE_KEY).ok()?
        }

        fn write_stored_token(token: &str) {
            let Some(window) = web_sys::window() else {
                return;
            };
            let Ok(Some(storage)) = window.local_storage() else {
                return;
            };
            let _ = storage.set_item(SESSION_STORAGE_KEY, token);
        }
    }

    impl SessionTokenStore for BrowserSessionStore {
        fn token(&self) -> String {
            Self::read_stored_token().unwrap_or_default()
        }

        fn set_token(&self, token: &str) {
            Self::write_stored_token(token);
        }
    }

    fn dispatch(action: WidgetAction) {
        let should_render =
            WIDGET_STATE.with(|state| apply_action(&mut state.borrow_mut(), action));
        sync_visibility_dom();
        if should_render {
            render_active_panel();
        }
    }

    fn epoch_millis_now() -> u64 {
        let now = js_sys::Date::now();
        if !now.is_finite() || now.is_sign_negative() {
            return 0;
        }
        now.floor().min(u64::MAX as f64) as u64
    }

    fn set_widget_phase(phase: &str, detail: &str) {
        DIAGNOSTICS.with(|state| state.borrow_mut().set_phase(phase, detail));
    }

    fn record_widget_error(message: &str) {
        DIAGNOSTICS.with(|state| state.borrow_mut().record_error(message));
    }

    fn record_widget_render(panel: PanelId) {
        DIAGNOSTICS.with(|state| state.borrow_mut().record_render(panel.as_str()));
    }

    #[wasm_bindgen(start)]
    pub fn start() {
        console_error_panic_hook::set_once();
        set_widget_phase("booting", "mounting leasebox widget");
        if let Err(error) = boot() {
            record_widget_error(&error);
        }
    }

    fn boot() -> Result<(), String> {
        DIAGNOSTICS.with(|state| {
            state.borrow_mut().started_at_unix_ms = Some(epoch_millis_now());
        });
        WIDGET_STATE.with(|state| {
            *state.borrow_mut() = WidgetState::at_startup(BrowserSessionStore.is_signed_in());
        });
        ensure_widget_dom()?;
        install_open_trigger_listener();
        sync_visibility_dom();
        set_widget_phase("ready", "widget mounted");
        Ok(())
    }

    #[wasm_bindgen]
    pub fn widget_open(panel: Option<String>) {
        let panel = panel.as_deref().and_then(parse_panel_id);
        dispatch(WidgetAction::Open { panel });
    }

    #[wasm_bindgen]
    pub fn widget_close() {
        dispatch(WidgetAction::Close);
    }

    #[wasm_bindgen]
    pub fn widget_select_panel(panel: String) {
        let Some(panel) = parse_panel_id(&panel) else {
            return;
        };
        dispatch(WidgetAction::SelectPanel { panel });
    }

    #[wasm_bindgen]
    pub fn widget_state_json() -> String {
        WIDGET_STATE.with(|state| {
            serde_json::to_string(&*state.borrow()).unwrap_or_else(|_| "{}".to_string())
        })
    }

    #[wasm_bindgen]
    pub fn widget_diagnostics_json() -> String {
        DIAGNOSTICS.with(|state| {
            serde_json::to_string(&*state.borrow()).unwrap_or_else(|_| {
                "{\"phase\":\"error\",\"detail\":\"diagnostics serialization failed\"}".to_string()
            })
        })
    }
}

#[cfg(target_arch = "wasm32")]
pub use wasm::widget_diagnostics_json;

#[cfg(not(target_arch = "wasm32"))]
pub fn widget_diagnostics_json() -> String {
    "{\"phase\":\"native\",\"detail\":\"widget diagnostics only available on wasm\"}".to_string()
}
