use super::*;

pub(super) fn ensure_widget_dom() -> Result<(), String> {
    let window = web_sys::window().ok_or_else(|| "window is unavailable".to_string())?;
    let document = window
        .document()
        .ok_or_else(|| "document is unavailable".to_string())?;
    let body = document
        .body()
        .ok_or_else(|| "document body is unavailable".to_string())?;

    if document.get_element_by_id(WIDGET_LAUNCHER_ID).is_none() {
        let launcher = create_styled_element(
            &document,
            "button",
            "widget launcher",
            &[
                ("position", "fixed"),
                ("right", "20px"),
                ("bottom", "20px"),
                ("z-index", "99999"),
                ("border", "none"),
                ("border-radius", "9999px"),
                ("padding", "12px 16px"),
                ("box-shadow", "0 10px 30px rgba(0,0,0,.25)"),
                ("background", COLOR_HEADER_BG),
                ("color", "#fff"),
                ("font-weight", "600"),
                ("cursor", "pointer"),
            ],
        )?;
        launcher.set_id(WIDGET_LAUNCHER_ID);
        launcher.set_text_content(Some(LAUNCHER_LABEL));
        body.append_child(&launcher)
            .map_err(|_| "failed to append widget launcher".to_string())?;
    }

    if document.get_element_by_id(WIDGET_BACKDROP_ID).is_none() {
        let backdrop = create_styled_element(
            &document,
            "div",
            "widget backdrop",
            &[
                ("position", "fixed"),
                ("inset", "0"),
                ("background", "rgba(0,0,0,.4)"),
                ("z-index", "99998"),
                ("display", "none"),
            ],
        )?;
        backdrop.set_id(WIDGET_BACKDROP_ID);
        body.append_child(&backdrop)
            .map_err(|_| "failed to append widget backdrop".to_string())?;
    }

    if document.get_element_by_id(WIDGET_MODAL_ID).is_none() {
        let modal = create_styled_element(
            &document,
            "div",
            "widget modal",
            &[
                ("position", "fixed"),
                ("right", "20px"),
                ("bottom", "80px"),
                ("width", "360px"),
                ("max-width", "96vw"),
                ("background", "#fff"),
                ("color", "#111"),
                ("border-radius", "16px"),
                ("box-shadow", "0 20px 60px rgba(0,0,0,.35)"),
                ("z-index", "99999"),
                ("display", "none"),
                ("overflow", "hidden"),
            ],
        )?;
        modal.set_id(WIDGET_MODAL_ID);

        let header = create_styled_element(
            &document,
            "div",
            "widget header",
            &[
                ("padding", "14px 16px"),
                ("background", COLOR_HEADER_BG),
                ("color", "#fff"),
                ("display", "flex"),
                ("justify-content", "space-between"),
                ("align-items", "center"),
            ],
        )?;

        let title = create_styled_element(&document, "div", "widget title", &[])?;
        title.set_text_content(Some(WIDGET_TITLE));
        let _ = header.append_child(&title);

        let status = create_styled_element(
            &document,
            "span",
            "widget status badge",
            &[
                ("display", "inline-block"),
                ("padding", "2px 8px"),
                ("border-radius", "9999px"),
                ("background", "#e5e7eb"),
                ("color", "#111"),
                ("font-size", "12px"),
            ],
        )?;
        status.set_id(WIDGET_STATUS_ID);
        status.set_text_content(Some(session_status_label(
            BrowserSessionStore.is_signed_in(),
        )));
        let _ = header.append_child(&status);
        let _ = modal.append_child(&header);

        let tabs = create_styled_element(
            &document,
            "div",
            "widget tab bar",
            &[
                ("display", "flex"),
                ("gap", "8px"),
                ("padding", "8px 12px"),
                ("border-bottom", "1px solid #eee"),
                ("flex-wrap", "wrap"),
            ],
        )?;
        tabs.set_id(WIDGET_TABS_ID);
        for panel in PanelId::ALL {
            let tab = create_styled_element(
                &document,
                "div",
                "widget tab",
                &[
                    ("padding", "6px 10px"),
                    ("border-radius", "10px"),
                    ("cursor", "pointer"),
                    ("background", COLOR_TAB_IDLE_BG),
                    ("font-size", "12px"),
                ],
            )?;
            tab.set_id(&format!("{WIDGET_TAB_ID_PREFIX}{}", panel.as_str()));
            tab.set_text_content(Some(panel.label()));
            let _ = tabs.append_child(&tab);
        }
        let _ = modal.append_child(&tabs);

        let panel_body = create_styled_element(
            &document,
            "div",
            "widget body",
            &[
                ("padding", "14px 16px"),
                ("max-height", "60vh"),
                ("overflow", "auto"),
            ],
        )?;
        panel_body.set_id(WIDGET_BODY_ID);
        let _ = modal.append_child(&panel_body);

        body.append_child(&modal)
            .map_err(|_| "failed to append widget modal".to_string())?;
    }

    let launcher = document
        .get_element_by_id(WIDGET_LAUNCHER_ID)
        .ok_or_else(|| "missing widget launcher".to_string())?;
    let backdrop = document
        .get_element_by_id(WIDGET_BACKDROP_ID)
        .ok_or_else(|| "missing widget backdrop".to_string())?;

    LAUNCHER_CLICK_HANDLER.with(|slot| {
        if slot.borrow().is_some() {
            return;
        }
        let callback = Closure::<dyn FnMut(web_sys::Event)>::wrap(Box::new(move |_event| {
            dispatch(WidgetAction::Open { panel: None });
        }));
        let _ =
            launcher.add_event_listener_with_callback("click", callback.as_ref().unchecked_ref());
        *slot.borrow_mut() = Some(callback);
    });

    BACKDROP_CLICK_HANDLER.with(|slot| {
        if slot.borrow().is_some() {
            return;
        }
        let callback = Closure::<dyn FnMut(web_sys::Event)>::wrap(Box::new(move |_event| {
            dispatch(WidgetAction::Close);
        }));
        let _ =
            backdrop.add_event_listener_with_callback("click", callback.as_ref().unchecked_ref());
        *slot.borrow_mut() = Some(callback);
    });

    TAB_CLICK_HANDLERS.with(|slot| {
        let mut handlers = slot.borrow_mut();
        if !handlers.is_empty() {
            return;
        }
        for panel in PanelId::ALL {
            let tab_id = format!("{WIDGET_TAB_ID_PREFIX}{}", panel.as_str());
            let Some(tab) = document.get_element_by_id(&tab_id) else {
                continue;
            };
            let callback = Closure::<dyn FnMut(web_sys::Event)>::wrap(Box::new(move |_event| {
                dispatch(WidgetAction::SelectPanel { panel });
            }));
            let _ = tab.add_event_listener_with_callback("click", callback.as_ref().unchecked_ref());
            handlers.push(callback);
        }
    });

    Ok(())
}

pub(super) fn sync_visibility_dom() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };
    let visible = WIDGET_STATE.with(|state| state.borrow().visible);
    let display = if visible { "block" } else { "none" };
    for id in [WIDGET_BACKDROP_ID, WIDGET_MODAL_ID] {
        let Some(element) = document
            .get_element_by_id(id)
            .and_then(|element| element.dyn_into::<HtmlElement>().ok())
        else {
            continue;
        };
        let _ = element.style().set_property("display", display);
    }
}

fn create_styled_element(
    document: &web_sys::Document,
    tag: &str,
    context: &str,
    styles: &[(&str, &str)],
) -> Result<HtmlElement, String> {
    let element = document
        .create_element(tag)
        .map_err(|_| format!("failed to create {context}"))?
        .dyn_into::<HtmlElement>()
        .map_err(|_| format!("{context} is not HtmlElement"))?;
    for (name, value) in styles {
        element
            .style()
            .set_property(name, value)
            .map_err(|_| format!("failed to style {context}"))?;
    }
    Ok(element)
}
