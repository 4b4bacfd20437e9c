// Accessibility helpers
use wasm_bindgen::JsCast;

const FOCUSABLE_QUERY: &str =
    "button, [href], input, textarea, select, [tabindex]:not([tabindex='-1'])";

/// Id of the polite live region announcing dashboard changes.
pub const STATUS_REGION_ID: &str = "dashboard-status";

/// Get CSS for visible focus indicators and screen reader utilities
///
/// Returns critical accessibility CSS that should be injected early in the page load.
#[must_use]
pub const fn visible_focus_css() -> &'static str {
    ":focus{outline:3px solid #2563eb;outline-offset:2px} .sr-only{position:absolute;width:1px;height:1px;margin:-1px;overflow:hidden;clip:rect(0 0 0 0);white-space:nowrap;}"
}

/// Update the live region status for screen readers
pub fn set_status(msg: &str) {
    if let Some(node) = crate::dom::document().and_then(|doc| doc.get_element_by_id(STATUS_REGION_ID))
    {
        node.set_text_content(Some(msg));
    }
}

/// Move focus to the element with `id`, if it exists and is focusable.
pub fn restore_focus(id: &str) {
    if let Some(el) = crate::dom::document()
        .and_then(|doc| doc.get_element_by_id(id))
        .and_then(|node| node.dyn_into::<web_sys::HtmlElement>().ok())
    {
        let _ = el.focus();
    }
}

/// Focus the first focusable descendant of the element with `container_id`.
pub fn trap_focus_in(container_id: &str) {
    let first = crate::dom::document()
        .and_then(|doc| doc.get_element_by_id(container_id))
        .and_then(|container| container.query_selector(FOCUSABLE_QUERY).ok().flatten())
        .and_then(|node| node.dyn_into::<web_sys::HtmlElement>().ok());
    if let Some(el) = first {
        let _ = el.focus();
    }
}
