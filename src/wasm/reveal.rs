use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Element, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, NodeList,
};

use crate::config::RevealConfig;
use crate::error::BackdropError;
use crate::reveal::{RevealPlan, RevealState, RevealTrigger};

type ObserverCallback = Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>;

/// Staggered one-shot reveal of a container's `[data-reveal]` descendants.
/// Disconnects after firing, and on drop whether or not it fired.
#[wasm_bindgen]
pub struct VisibilityTrigger {
    observer: IntersectionObserver,
    _callback: ObserverCallback,
}

#[wasm_bindgen]
impl VisibilityTrigger {
    /// Observe `container` with the default threshold and interval.
    #[wasm_bindgen(js_name = observe)]
    pub fn observe_default(container: &Element) -> Result<VisibilityTrigger, JsValue> {
        Ok(Self::observe(container, RevealConfig::default())?)
    }

    pub fn disconnect(&self) {
        self.observer.disconnect();
    }
}

impl VisibilityTrigger {
    pub fn observe(container: &Element, config: RevealConfig) -> Result<Self, BackdropError> {
        let trigger = Rc::new(RefCell::new(RevealTrigger::new(
            config.threshold,
            config.interval,
        )));
        let threshold = config.threshold;
        let root = container.clone();

        let callback: ObserverCallback = Closure::wrap(Box::new(
            move |entries: js_sys::Array, observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                        continue;
                    };
                    let Ok(pending) = root.query_selector_all(&config.pending_selector()) else {
                        continue;
                    };
                    let plan = trigger.borrow_mut().observe(
                        entry.is_intersecting(),
                        entry.intersection_ratio(),
                        pending.length() as usize,
                    );
                    if let Some(plan) = plan {
                        apply(&pending, &plan, &config);
                        observer.disconnect();
                        log::debug!("revealed {} nodes", plan.delays.len());
                        return;
                    }
                }
            },
        ) as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

        let options = IntersectionObserverInit::new();
        options.set_threshold(&JsValue::from_f64(threshold));
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)
                .map_err(|_| BackdropError::Unsupported("IntersectionObserver"))?;
        observer.observe(container);

        Ok(Self {
            observer,
            _callback: callback,
        })
    }
}

impl Drop for VisibilityTrigger {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

fn apply(pending: &NodeList, plan: &RevealPlan, config: &RevealConfig) {
    for (index, delay) in plan.delays.iter().enumerate() {
        let Some(node) = pending.get(index as u32) else {
            continue;
        };
        let Ok(element) = node.dyn_into::<HtmlElement>() else {
            continue;
        };
        let classes = element.class_list();
        let mut state = RevealState::new(classes.contains(&config.revealed_class));
        if !state.reveal() {
            continue;
        }
        let delay = format!("{}ms", delay.as_millis());
        let _ = element.style().set_property("transition-delay", &delay);
        let _ = classes.add_1(&config.revealed_class);
        let _ = element.remove_attribute(&config.pending_attribute);
    }
}
