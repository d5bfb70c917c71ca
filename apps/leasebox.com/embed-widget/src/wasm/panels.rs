use super::*;

const INPUT_STYLES: [(&str, &str); 5] = [
    ("width", "100%"),
    ("padding", "10px 12px"),
    ("border", "1px solid #ddd"),
    ("border-radius", "10px"),
    ("margin", "6px 0 10px"),
];
const FILE_INPUT_STYLES: [(&str, &str); 1] = [("margin", "8px 0")];
const BUTTON_STYLES: [(&str, &str); 7] = [
    ("background", COLOR_HEADER_BG),
    ("color", "#fff"),
    ("padding", "10px 12px"),
    ("border", "none"),
    ("border-radius", "10px"),
    ("cursor", "pointer"),
    ("font-weight", "600"),
];
const ROW_STYLES: [(&str, &str); 3] = [
    ("display", "flex"),
    ("gap", "8px"),
    ("align-items", "center"),
];
const OUTPUT_STYLES: [(&str, &str); 2] = [("color", COLOR_MUTED), ("font-size", "12px")];

pub(super) fn render_active_panel() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };
    let state = WIDGET_STATE.with(|state| *state.borrow());

    update_status_badge();
    highlight_active_tab(&document, state.active_panel);

    let Some(panel_body) = document
        .get_element_by_id(WIDGET_BODY_ID)
        .and_then(|element| element.dyn_into::<HtmlElement>().ok())
    else {
        return;
    };
    // Replace, never append: the previous panel's nodes and closures are
    // discarded together, so no stale handler can fire against fresh content.
    panel_body.set_inner_html("");
    PANEL_EVENT_HANDLERS.with(|slot| slot.borrow_mut().clear());

    match state.active_panel {
        PanelId::Login => render_login_panel(&document, &panel_body),
        PanelId::Upload => render_upload_panel(&document, &panel_body),
        PanelId::Quota => render_quota_panel(&document, &panel_body),
        PanelId::Upgrade => render_upgrade_panel(&document, &panel_body),
    }
    record_widget_render(state.active_panel);
}

fn render_login_panel(document: &web_sys::Document, panel_body: &HtmlElement) {
    let Some(email_input) = append_panel_element(document, panel_body, "input", &INPUT_STYLES)
        .and_then(|element| element.dyn_into::<HtmlInputElement>().ok())
    else {
        return;
    };
    let _ = email_input.set_attribute("type", "email");
    let _ = email_input.set_attribute("placeholder", "Email");

    let Some(password_input) = append_panel_element(document, panel_body, "input", &INPUT_STYLES)
        .and_then(|element| element.dyn_into::<HtmlInputElement>().ok())
    else {
        return;
    };
    let _ = password_input.set_attribute("type", "password");
    let _ = password_input.set_attribute("placeholder", "Password");

    let Some(row) = append_panel_element(document, panel_body, "div", &ROW_STYLES) else {
        return;
    };
    let Some(register_button) = append_panel_element(document, &row, "button", &BUTTON_STYLES)
    else {
        return;
    };
    register_button.set_text_content(Some("Register"));
    let Some(login_button) = append_panel_element(document, &row, "button", &BUTTON_STYLES) else {
        return;
    };
    login_button.set_text_content(Some("Login"));
    let Some(logout_button) = append_panel_element(document, &row, "button", &BUTTON_STYLES) else {
        return;
    };
    logout_button.set_text_content(Some("Logout"));

    let Some(output) = append_panel_element(document, panel_body, "div", &OUTPUT_STYLES) else {
        return;
    };

    {
        let email_input = email_input.clone();
        let password_input = password_input.clone();
        let output = output.clone();
        let callback = Closure::<dyn FnMut(web_sys::Event)>::wrap(Box::new(move |_event| {
            let call = ApiCall::Register {
                email: email_input.value().trim().to_string(),
                password: password_input.value(),
            };
            let output = output.clone();
            spawn_local(async move {
                match send_opaque_api_call(&call).await {
                    Ok(_) => set_output_text(&output, MSG_REGISTERED, COLOR_SUCCESS),
                    Err(error) => set_output_text(&output, &error.to_string(), COLOR_ERROR),
                }
            });
        }));
        bind_panel_click(&register_button, callback);
    }

    {
        let email_input = email_input.clone();
        let password_input = password_input.clone();
        let output = output.clone();
        let callback = Closure::<dyn FnMut(web_sys::Event)>::wrap(Box::new(move |_event| {
            let call = ApiCall::Login {
                email: email_input.value().trim().to_string(),
                password: password_input.value(),
            };
            let output = output.clone();
            spawn_local(async move {
                match send_api_call::<LoginResponse>(&call).await {
                    Ok(login) => {
                        BrowserSessionStore.set_token(&login.access_token);
                        set_output_text(&output, MSG_LOGGED_IN, COLOR_SUCCESS);
                        update_status_badge();
                    }
                    Err(error) => set_output_text(&output, &error.to_string(), COLOR_ERROR),
                }
            });
        }));
        bind_panel_click(&login_button, callback);
    }

    let callback = Closure::<dyn FnMut(web_sys::Event)>::wrap(Box::new(move |_event| {
        BrowserSessionStore.set_token("");
        update_status_badge();
        set_output_text(&output, MSG_SIGNED_OUT, COLOR_MUTED);
    }));
    bind_panel_click(&logout_button, callback);
}

fn render_upload_panel(document: &web_sys::Document, panel_body: &HtmlElement) {
    let Some(intro) = append_panel_element(document, panel_body, "div", &OUTPUT_STYLES) else {
        return;
    };
    intro.set_text_content(Some(UPLOAD_PANEL_INTRO));

    let Some(file_input) = append_panel_element(document, panel_body, "input", &FILE_INPUT_STYLES)
        .and_then(|element| element.dyn_into::<HtmlInputElement>().ok())
    else {
        return;
    };
    let _ = file_input.set_attribute("type", "file");

    let Some(upload_button) = append_panel_element(document, panel_body, "button", &BUTTON_STYLES)
    else {
        return;
    };
    upload_button.set_text_content(Some("Upload"));

    let Some(output) = append_panel_element(document, panel_body, "div", &OUTPUT_STYLES) else {
        return;
    };

    let document = document.clone();
    let callback = Closure::<dyn FnMut(web_sys::Event)>::wrap(Box::new(move |_event| {
        let Some(file) = file_input.files().and_then(|files| files.get(0)) else {
            set_output_text(&output, MSG_CHOOSE_FILE, COLOR_MUTED);
            return;
        };
        set_output_text(&output, MSG_UPLOADING, COLOR_MUTED);
        let document = document.clone();
        let output = output.clone();
        spawn_local(async move {
            match send_upload_request(file).await {
                Ok(upload) => {
                    output.set_text_content(None);
                    let _ = output.style().set_property("color", COLOR_MUTED);
                    let [uploaded_line, month_line] = upload_success_lines(&upload);
                    if let Some(line) = append_output_line(&document, &output, &uploaded_line) {
                        let _ = line.style().set_property("color", COLOR_SUCCESS);
                    }
                    append_output_line(&document, &output, &month_line);
                }
                Err(error) => set_output_text(&output, &error.to_string(), COLOR_ERROR),
            }
        });
    }));
    bind_panel_click(&upload_button, callback);
}

fn render_quota_panel(document: &web_sys::Document, panel_body: &HtmlElement) {
    let Some(output) = append_panel_element(document, panel_body, "div", &OUTPUT_STYLES) else {
        return;
    };
    output.set_text_content(Some(MSG_LOADING));

    // This panel fetches eagerly on activation rather than behind a button.
    let document = document.clone();
    spawn_local(async move {
        match send_api_call::<QuotaResponse>(&ApiCall::FetchQuota).await {
            Ok(quota) => {
                output.set_text_content(None);
                let _ = output.style().set_property("color", COLOR_MUTED);
                for line in quota_summary_lines(&quota) {
                    append_output_line(&document, &output, &line);
                }
            }
            Err(error) => set_output_text(&output, &error.to_string(), COLOR_ERROR),
        }
    });
}

fn render_upgrade_panel(document: &web_sys::Document, panel_body: &HtmlElement) {
    let Some(intro) = append_panel_element(document, panel_body, "div", &OUTPUT_STYLES) else {
        return;
    };
    intro.set_text_content(Some(UPGRADE_PANEL_INTRO));

    let Some(upgrade_button) = append_panel_element(document, panel_body, "button", &BUTTON_STYLES)
    else {
        return;
    };
    upgrade_button.set_text_content(Some("Upgrade to Pro"));

    let Some(output) = append_panel_element(document, panel_body, "div", &OUTPUT_STYLES) else {
        return;
    };

    let callback = Closure::<dyn FnMut(web_sys::Event)>::wrap(Box::new(move |_event| {
        set_output_text(&output, MSG_CREATING_CHECKOUT, COLOR_MUTED);
        let output = output.clone();
        spawn_local(async move {
            match send_api_call::<CheckoutResponse>(&ApiCall::CreateCheckoutSession).await {
                Ok(checkout) => match resolve_checkout_url(&checkout) {
                    Some(url) => navigate_to(url),
                    None => set_output_text(&output, MSG_NO_CHECKOUT_URL, COLOR_ERROR),
                },
                Err(error) => set_output_text(&output, &error.to_string(), COLOR_ERROR),
            }
        });
    }));
    bind_panel_click(&upgrade_button, callback);
}

fn update_status_badge() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };
    let Some(status) = document
        .get_element_by_id(WIDGET_STATUS_ID)
        .and_then(|element| element.dyn_into::<HtmlElement>().ok())
    else {
        return;
    };
    status.set_text_content(Some(session_status_label(
        BrowserSessionStore.is_signed_in(),
    )));
}

fn highlight_active_tab(document: &web_sys::Document, active: PanelId) {
    for panel in PanelId::ALL {
        let tab_id = format!("{WIDGET_TAB_ID_PREFIX}{}", panel.as_str());
        let Some(tab) = document
            .get_element_by_id(&tab_id)
            .and_then(|element| element.dyn_into::<HtmlElement>().ok())
        else {
            continue;
        };
        let (background, color) = if panel == active {
            (COLOR_HEADER_BG, "#fff")
        } else {
            (COLOR_TAB_IDLE_BG, "#111")
        };
        let _ = tab.style().set_property("background", background);
        let _ = tab.style().set_property("color", color);
    }
}

fn bind_panel_click(target: &HtmlElement, callback: Closure<dyn FnMut(web_sys::Event)>) {
    let _ = target.add_event_listener_with_callback("click", callback.as_ref().unchecked_ref());
    PANEL_EVENT_HANDLERS.with(|slot| slot.borrow_mut().push(callback));
}

fn append_panel_element(
    document: &web_sys::Document,
    parent: &HtmlElement,
    tag: &str,
    styles: &[(&str, &str)],
) -> Option<HtmlElement> {
    let element = document
        .create_element(tag)
        .ok()?
        .dyn_into::<HtmlElement>()
        .ok()?;
    for (name, value) in styles {
        let _ = element.style().set_property(name, value);
    }
    let _ = parent.append_child(&element);
    Some(element)
}

fn append_output_line(
    document: &web_sys::Document,
    output: &HtmlElement,
    text: &str,
) -> Option<HtmlElement> {
    let line = document
        .create_element("div")
        .ok()?
        .dyn_into::<HtmlElement>()
        .ok()?;
    line.set_text_content(Some(text));
    let _ = output.append_child(&line);
    Some(line)
}

fn set_output_text(output: &HtmlElement, text: &str, color: &str) {
    output.set_text_content(Some(text));
    let _ = output.style().set_property("color", color);
}

fn navigate_to(url: &str) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let _ = window.location().set_href(url);
}
