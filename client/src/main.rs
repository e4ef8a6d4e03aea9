mod app;
mod discovery;
mod fog;
mod labels;
mod map;
mod state;
mod storage;

use std::any::Any;
use std::cell::RefCell;

use leptos::mount::mount_to;
use wasm_bindgen::JsCast;

thread_local! {
    // Keeps the mount alive for the page lifetime. A re-entered main()
    // (hot-reload runtimes) swaps the handle, unmounting the stale app first.
    static MOUNT: RefCell<Option<Box<dyn Any>>> = RefCell::new(None);
}

fn main() {
    console_error_panic_hook::set_once();

    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        return;
    };
    // The legend mounts into #app when the host page provides one; otherwise
    // straight into the body next to the inline SVG.
    let Some(target) = document
        .get_element_by_id("app")
        .and_then(|node| node.dyn_into::<web_sys::HtmlElement>().ok())
        .or_else(|| document.body())
    else {
        return;
    };

    MOUNT.with(move |slot| {
        slot.borrow_mut().take();
        let handle = mount_to(target, app::App);
        slot.borrow_mut().replace(Box::new(handle));
    });
}
