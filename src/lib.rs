//! Ambient page backdrop: an animated flow field, a drifting particle
//! overlay, pointer parallax and a one-shot staggered reveal.
//!
//! Everything outside `wasm` is host independent and drives a [`Surface`]
//! through a [`FrameHost`]; the browser bindings only supply those two plus
//! DOM listeners.

pub mod color;
pub mod config;
pub mod engine;
pub mod error;
pub mod flow_field;
pub mod parallax;
pub mod particles;
pub mod reveal;
pub mod scheduler;
pub mod surface;
pub mod viewport;

pub use config::{BackdropConfig, RevealConfig};
pub use error::BackdropError;
pub use scheduler::{AnimationHandle, AnimationScheduler, AnimationSlot, FrameHost};
pub use surface::Surface;

// Only compile wasm-specific code when targeting wasm32.

#[cfg(target_arch = "wasm32")]
mod wasm {
    use std::cell::RefCell;

    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;

    mod canvas;
    mod frames;
    mod pointer;
    mod render;
    mod reveal;

    pub use render::Backdrop;
    pub use reveal::VisibilityTrigger;

    use crate::config::{RevealConfig, STAGGER_ATTR};

    pub const BACKDROP_ATTR: &str = "data-backdrop";

    thread_local! {
        static MOUNTED: RefCell<Vec<Backdrop>> = const { RefCell::new(Vec::new()) };
        static REVEALS: RefCell<Vec<VisibilityTrigger>> = const { RefCell::new(Vec::new()) };
    }

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).ok();

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let roots = document.query_selector_all(&format!("[{BACKDROP_ATTR}]"))?;
        for i in 0..roots.length() {
            let Some(root) = roots
                .get(i)
                .and_then(|node| node.dyn_into::<web_sys::HtmlElement>().ok())
            else {
                continue;
            };
            match Backdrop::mount_js(root) {
                Ok(backdrop) => MOUNTED.with(|m| m.borrow_mut().push(backdrop)),
                Err(err) => log::warn!("backdrop not mounted: {err:?}"),
            }
        }

        let containers = document.query_selector_all(&format!("[{STAGGER_ATTR}]"))?;
        for i in 0..containers.length() {
            let Some(container) = containers
                .get(i)
                .and_then(|node| node.dyn_into::<web_sys::Element>().ok())
            else {
                continue;
            };
            match VisibilityTrigger::observe(&container, RevealConfig::default()) {
                Ok(trigger) => REVEALS.with(|r| r.borrow_mut().push(trigger)),
                Err(err) => log::warn!("stagger reveal inactive: {err}"),
            }
        }

        log::info!(
            "{} backdrop(s), {} reveal group(s)",
            MOUNTED.with(|m| m.borrow().len()),
            REVEALS.with(|r| r.borrow().len())
        );
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
pub use wasm::{Backdrop, VisibilityTrigger};
