use gloo::events::EventListener;
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, MouseEvent};

use crate::parallax::{Bounds, ParallaxState, GLOW_X, GLOW_Y, MOVE_X, MOVE_Y};

/// Writes pointer-derived custom properties onto a container's style.
/// On drop both listeners are removed and so are the properties.
pub struct PointerParallax {
    target: HtmlElement,
    _on_move: EventListener,
    _on_leave: EventListener,
}

impl PointerParallax {
    pub fn attach(container: &HtmlElement) -> Self {
        write_state(container, &ParallaxState::centered());

        let target = container.clone();
        let on_move = EventListener::new(container, "pointermove", move |event| {
            let Some(event) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            let rect = target.get_bounding_client_rect();
            let bounds = Bounds {
                left: rect.left(),
                top: rect.top(),
                width: rect.width(),
                height: rect.height(),
            };
            let pointer = (f64::from(event.client_x()), f64::from(event.client_y()));
            if let Some(state) = ParallaxState::from_pointer(pointer.0, pointer.1, bounds) {
                write_state(&target, &state);
            }
        });

        let target = container.clone();
        let on_leave = EventListener::new(container, "pointerleave", move |_| {
            write_state(&target, &ParallaxState::centered());
        });

        Self {
            target: container.clone(),
            _on_move: on_move,
            _on_leave: on_leave,
        }
    }
}

impl Drop for PointerParallax {
    fn drop(&mut self) {
        let style = self.target.style();
        for name in [MOVE_X, MOVE_Y, GLOW_X, GLOW_Y] {
            let _ = style.remove_property(name);
        }
    }
}

fn write_state(element: &HtmlElement, state: &ParallaxState) {
    let style = element.style();
    for (name, value) in state.css_properties() {
        if style.set_property(name, &value).is_err() {
            return;
        }
    }
}
