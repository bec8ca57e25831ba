//! Thin helpers over `web_sys` for wiring server-rendered markup.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, EventTarget, HtmlElement};

use super::error::{js_error, FrontendError};

/// Look up an element by id and cast it to the expected type.
///
/// `Ok(None)` means the page simply does not carry this control; a present
/// element of the wrong type is a markup contract violation.
pub fn element_by_id<T: JsCast>(document: &Document, id: &str) -> Result<Option<T>, FrontendError> {
    match document.get_element_by_id(id) {
        None => Ok(None),
        Some(element) => element.dyn_into::<T>().map(Some).map_err(|_| {
            FrontendError::BrowserApi(format!("element #{} has an unexpected type", id))
        }),
    }
}

/// All elements matching `selector` that are `HtmlElement`s, in document order
pub fn query_all(document: &Document, selector: &str) -> Result<Vec<HtmlElement>, FrontendError> {
    let nodes = document
        .query_selector_all(selector)
        .map_err(|e| js_error(&format!("querySelectorAll({})", selector), e))?;

    Ok((0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .collect())
}

pub fn set_shown(element: &HtmlElement, shown: bool) {
    let style = element.style();
    let result = if shown {
        style.remove_property("display").map(|_| ())
    } else {
        style.set_property("display", "none")
    };
    if let Err(e) = result {
        log::error!("failed to toggle visibility: {:?}", e);
    }
}

/// Register a listener that lives as long as the page
pub fn listen<F>(target: &EventTarget, event: &str, handler: F) -> Result<(), FrontendError>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target
        .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        .map_err(|e| js_error(&format!("addEventListener({})", event), e))?;
    closure.forget();
    Ok(())
}

/// Nearest ancestor-or-self of the event target matching `selector`
pub fn closest_target(event: &Event, selector: &str) -> Option<Element> {
    event
        .target()?
        .dyn_into::<Element>()
        .ok()?
        .closest(selector)
        .ok()
        .flatten()
}

pub fn reload_page() {
    if let Some(window) = web_sys::window() {
        if let Err(e) = window.location().reload() {
            log::error!("page reload failed: {:?}", e);
        }
    }
}
