use super::*;

pub(super) fn install_open_trigger_listener() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };

    OPEN_TRIGGER_CLICK_HANDLER.with(|slot| {
        if slot.borrow().is_some() {
            return;
        }
        let callback = Closure::<dyn FnMut(web_sys::Event)>::wrap(Box::new(move |event| {
            handle_open_trigger_click(event);
        }));
        // Capture phase, so host pages cannot swallow the click first.
        let _ = document.add_event_listener_with_callback_and_bool(
            "click",
            callback.as_ref().unchecked_ref(),
            true,
        );
        *slot.borrow_mut() = Some(callback);
    });
}

pub(super) fn handle_open_trigger_click(event: web_sys::Event) {
    let Some(trigger) = open_trigger_from_event(&event) else {
        return;
    };
    event.prevent_default();
    let panel = trigger
        .get_attribute(PANEL_HINT_ATTR)
        .as_deref()
        .and_then(parse_panel_id);
    dispatch(WidgetAction::Open { panel });
}

pub(super) fn open_trigger_from_event(event: &web_sys::Event) -> Option<web_sys::Element> {
    let composed_path = event.composed_path();
    for index in 0..composed_path.length() {
        let value = composed_path.get(index);
        let Ok(element) = value.dyn_into::<web_sys::Element>() else {
            continue;
        };
        if element.has_attribute(OPEN_TRIGGER_ATTR) {
            return Some(element);
        }
    }
    None
}
