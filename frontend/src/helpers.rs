//! Browser-side utilities shared by the pages and components.
//!
//! - **User feedback**: transient toast notifications for saves, deletes and failures.
//! - **Dirty tracking**: MD5 digests of form payloads and the `window.app_dirty` flag
//!   that `index.html` consults before the tab is closed.

use js_sys::Reflect;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::HtmlElement;

use common::crud::NoticeLevel;

/// Displays a temporary notification at the bottom of the screen.
///
/// The toast is a plain `div` appended to `<body>` and removed again after three
/// seconds. Errors get a red background, everything else the neutral dark one.
pub fn show_toast(message: &str, level: NoticeLevel) {
    if let Some(window) = web_sys::window() {
        if let Some(document) = window.document() {
            if let (Ok(toast), Some(body)) = (document.create_element("div"), document.body()) {
                toast.set_text_content(Some(message));
                toast.set_class_name("toast");
                let html_toast: HtmlElement = toast.unchecked_into();
                let background = match level {
                    NoticeLevel::Success => "rgba(0, 0, 0, 0.8)",
                    NoticeLevel::Error => "rgba(183, 28, 28, 0.92)",
                };
                let style = html_toast.style();
                style.set_property("position", "fixed").ok();
                style.set_property("bottom", "20px").ok();
                style.set_property("left", "50%").ok();
                style.set_property("transform", "translateX(-50%)").ok();
                style.set_property("background", background).ok();
                style.set_property("color", "#fff").ok();
                style.set_property("padding", "10px 20px").ok();
                style.set_property("border-radius", "4px").ok();
                style.set_property("z-index", "10000").ok();

                if body.append_child(&html_toast).is_ok() {
                    wasm_bindgen_futures::spawn_local(async move {
                        gloo_timers::future::TimeoutFuture::new(3000).await;
                        if let Some(parent) = html_toast.parent_node() {
                            parent.remove_child(&html_toast).ok();
                        }
                    });
                }
            }
        }
    }
}

/// Hex MD5 digest of a string, used to compare a form against its pristine state.
pub fn compute_md5(input: &str) -> String {
    format!("{:x}", md5::compute(input))
}

/// Mirrors the unsaved-changes state onto `window.app_dirty`.
pub fn set_window_dirty_flag(dirty: bool) {
    if let Some(window) = web_sys::window() {
        let _ = Reflect::set(
            &window,
            &JsValue::from_str("app_dirty"),
            &JsValue::from_bool(dirty),
        );
    }
}
