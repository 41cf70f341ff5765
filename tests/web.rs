#![cfg(target_arch = "wasm32")]

use backdrop_wasm::config::RevealConfig;
use backdrop_wasm::{Backdrop, BackdropConfig, VisibilityTrigger};
use gloo_timers::future::TimeoutFuture;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn container(width: &str, height: &str) -> web_sys::HtmlElement {
    let document = web_sys::window().unwrap().document().unwrap();
    let root = document
        .create_element("section")
        .unwrap()
        .dyn_into::<web_sys::HtmlElement>()
        .unwrap();
    let style = root.style();
    style.set_property("width", width).unwrap();
    style.set_property("height", height).unwrap();
    document.body().unwrap().append_child(&root).unwrap();
    root
}

/// Polls `done` every 20 ms for up to a second.
async fn wait_for(mut done: impl FnMut() -> bool) -> bool {
    for _ in 0..50 {
        if done() {
            return true;
        }
        TimeoutFuture::new(20).await;
    }
    done()
}

fn pinned(root: &web_sys::HtmlElement, top: &str) {
    let style = root.style();
    style.set_property("position", "fixed").unwrap();
    style.set_property("left", "0px").unwrap();
    style.set_property("top", top).unwrap();
}

fn child(root: &web_sys::HtmlElement, marked: bool) -> web_sys::HtmlElement {
    let document = web_sys::window().unwrap().document().unwrap();
    let el = document
        .create_element("div")
        .unwrap()
        .dyn_into::<web_sys::HtmlElement>()
        .unwrap();
    if marked {
        el.set_attribute("data-reveal", "").unwrap();
    }
    el.set_text_content(Some("card"));
    root.append_child(&el).unwrap();
    el
}

fn layer(root: &web_sys::HtmlElement, name: &str) -> Option<web_sys::HtmlCanvasElement> {
    root.query_selector(&format!("canvas[data-layer=\"{name}\"]"))
        .unwrap()
        .map(|el| el.dyn_into::<web_sys::HtmlCanvasElement>().unwrap())
}

#[wasm_bindgen_test]
fn mount_sizes_both_canvases() {
    let root = container("320px", "240px");
    let backdrop = Backdrop::mount(root.clone(), BackdropConfig::default()).unwrap();

    let window = web_sys::window().unwrap();
    let flow = layer(&root, "flow").expect("flow canvas created");
    assert_eq!(flow.width(), window.inner_width().unwrap().as_f64().unwrap() as u32);

    let particles = layer(&root, "particles").expect("particle canvas created");
    assert_eq!((particles.width(), particles.height()), (320, 240));

    let style = root.style();
    assert_eq!(style.get_property_value("--glow-x").unwrap(), "50%");
    drop(backdrop);
    root.remove();
}

#[wasm_bindgen_test]
fn disabled_particles_create_no_layer() {
    let root = container("200px", "100px");
    root.set_attribute("data-particles", "false").unwrap();
    let backdrop = Backdrop::mount_js(root.clone()).unwrap();
    assert!(layer(&root, "flow").is_some());
    assert!(layer(&root, "particles").is_none());
    backdrop.unmount();
    root.remove();
}

#[wasm_bindgen_test]
fn unmount_removes_created_layers_and_parallax() {
    let root = container("200px", "100px");
    let backdrop = Backdrop::mount(root.clone(), BackdropConfig::default()).unwrap();
    assert!(layer(&root, "flow").is_some());
    assert!(layer(&root, "particles").is_some());
    assert_eq!(root.style().get_property_value("--move-x").unwrap(), "0px");

    backdrop.unmount();
    assert!(layer(&root, "flow").is_none());
    assert!(layer(&root, "particles").is_none());
    for name in ["--move-x", "--move-y", "--glow-x", "--glow-y"] {
        assert_eq!(root.style().get_property_value(name).unwrap(), "", "{name}");
    }
    root.remove();
}

#[wasm_bindgen_test]
fn existing_canvas_is_reused_and_kept_on_unmount() {
    let root = container("200px", "100px");
    let document = web_sys::window().unwrap().document().unwrap();
    let canvas = document.create_element("canvas").unwrap();
    canvas.set_attribute("data-layer", "flow").unwrap();
    root.append_child(&canvas).unwrap();

    let backdrop = Backdrop::mount(root.clone(), BackdropConfig::default()).unwrap();
    assert_eq!(root.query_selector_all("canvas[data-layer=\"flow\"]").unwrap().length(), 1);

    drop(backdrop);
    assert!(canvas.is_connected(), "page-owned canvas stays");
    assert!(layer(&root, "particles").is_none());
    root.remove();
}

#[wasm_bindgen_test]
fn set_colors_rejects_malformed_input() {
    let root = container("200px", "100px");
    let mut backdrop = Backdrop::mount(root.clone(), BackdropConfig::default()).unwrap();
    assert!(backdrop.set_colors_js("#FF7F50", "#123").is_ok());
    assert!(backdrop.set_colors_js("coral", "#123").is_err());
    drop(backdrop);
    root.remove();
}

#[wasm_bindgen_test]
async fn reveal_staggers_marked_children_once() {
    let root = container("200px", "200px");
    pinned(&root, "0px");
    let marked: Vec<_> = (0..3).map(|_| child(&root, true)).collect();
    let plain = child(&root, false);

    let trigger = VisibilityTrigger::observe(&root, RevealConfig::default()).unwrap();
    let fired = wait_for(|| root.query_selector("[data-reveal]").unwrap().is_none()).await;
    assert!(fired, "observer callback never revealed the children");

    for (el, delay) in marked.iter().zip(["0ms", "150ms", "300ms"]) {
        assert!(el.class_list().contains("revealed"));
        assert_eq!(el.style().get_property_value("transition-delay").unwrap(), delay);
    }
    assert!(!plain.class_list().contains("revealed"));

    // Leave and come back with a fresh marked child: nothing fires again.
    let late = child(&root, true);
    pinned(&root, "-10000px");
    TimeoutFuture::new(100).await;
    pinned(&root, "0px");
    TimeoutFuture::new(200).await;
    assert!(late.has_attribute("data-reveal"));
    assert!(!late.class_list().contains("revealed"));

    drop(trigger);
    root.remove();
}

#[wasm_bindgen_test]
fn reveal_observer_can_be_disconnected_before_firing() {
    let root = container("100px", "100px");
    let pending = child(&root, true);
    let trigger = VisibilityTrigger::observe(&root, RevealConfig::default()).unwrap();
    trigger.disconnect();
    drop(trigger);
    assert!(pending.has_attribute("data-reveal"));
    root.remove();
}
