use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{window, Document, HtmlCanvasElement, HtmlElement, VisibilityState, Window};

use super::canvas::Canvas2d;
use super::frames::BrowserFrames;
use super::pointer::PointerParallax;
use crate::color::Rgb;
use crate::config::BackdropConfig;
use crate::engine::{Engine, FlowLayer, ParticleLayer};
use crate::error::{BackdropError, Result};
use crate::flow_field::FlowField;
use crate::particles::ParticleField;
use crate::scheduler::AnimationScheduler;
use crate::viewport::{Viewport, ViewportTracker};

const LAYER_ATTR: &str = "data-layer";

type BrowserEngine = Engine<BrowserFrames, Canvas2d>;

/// A mounted backdrop: a flow-field canvas, an optional particle canvas and
/// the pointer parallax, all torn down on drop or [`Backdrop::unmount`].
/// Canvases the mount created are removed again; reused ones are cleared.
#[wasm_bindgen]
pub struct Backdrop {
    engine: Rc<RefCell<BrowserEngine>>,
    created: Vec<HtmlCanvasElement>,
    _tracker: Rc<RefCell<ViewportTracker>>,
    _parallax: PointerParallax,
    _listeners: Vec<EventListener>,
}

#[wasm_bindgen]
impl Backdrop {
    /// Mount into `root`, configured from its data attributes.
    #[wasm_bindgen(js_name = mount)]
    pub fn mount_js(root: HtmlElement) -> std::result::Result<Backdrop, JsValue> {
        let config = BackdropConfig::from_attributes(|name| root.get_attribute(name));
        Ok(Self::mount(root, config)?)
    }

    /// Swap the flow colors; the flow loop restarts with them.
    #[wasm_bindgen(js_name = setColors)]
    pub fn set_colors_js(
        &mut self,
        primary: &str,
        secondary: &str,
    ) -> std::result::Result<(), JsValue> {
        let primary: Rgb = primary.parse()?;
        let secondary: Rgb = secondary.parse()?;
        self.set_colors(primary, secondary);
        Ok(())
    }

    pub fn unmount(self) {}
}

impl Backdrop {
    pub fn mount(root: HtmlElement, config: BackdropConfig) -> Result<Self> {
        let window = window().ok_or(BackdropError::NoWindow)?;
        let document = window.document().ok_or(BackdropError::NoDocument)?;

        let mut created = Vec::new();
        let flow = match layer_canvas(&document, &root, "flow", &mut created)
            .map(Canvas2d::from_canvas)
        {
            Ok(Some(surface)) => Some(FlowLayer {
                surface,
                field: FlowField::new(config.primary, config.secondary),
                rng: SmallRng::from_entropy(),
            }),
            Ok(None) => {
                log::warn!("flow field disabled: {}", BackdropError::ContextUnavailable);
                None
            }
            Err(err) => {
                log::warn!("flow field disabled: {err}");
                None
            }
        };

        let particles = if config.particles_enabled {
            match layer_canvas(&document, &root, "particles", &mut created)
                .map(Canvas2d::from_canvas)
            {
                Ok(Some(surface)) => {
                    let mut rng = SmallRng::from_entropy();
                    let field = ParticleField::new(
                        element_viewport(&root),
                        config.particle_count,
                        &mut rng,
                    );
                    Some(ParticleLayer { surface, field, rng })
                }
                Ok(None) => {
                    log::warn!("particles disabled: {}", BackdropError::ContextUnavailable);
                    None
                }
                Err(err) => {
                    log::warn!("particles disabled: {err}");
                    None
                }
            }
        } else {
            None
        };

        let engine = Rc::new(RefCell::new(Engine::new(
            AnimationScheduler::new(BrowserFrames),
            flow,
            particles,
        )));

        let tracker = Rc::new(RefCell::new(ViewportTracker::new(window_viewport(&window))));
        {
            let engine = engine.clone();
            let container = root.clone();
            tracker.borrow_mut().subscribe(move |viewport| {
                engine
                    .borrow_mut()
                    .on_viewport(viewport, element_viewport(&container))
            });
        }

        let mut listeners = Vec::new();
        {
            let tracker = tracker.clone();
            let win = window.clone();
            listeners.push(EventListener::new(&window, "resize", move |_| {
                tracker.borrow_mut().update(window_viewport(&win));
            }));
        }
        {
            let engine = engine.clone();
            let doc = document.clone();
            listeners.push(EventListener::new(&document, "visibilitychange", move |_| {
                let visible = doc.visibility_state() != VisibilityState::Hidden;
                engine.borrow_mut().set_visible(visible);
            }));
        }

        engine.borrow_mut().resume();
        log::info!(
            "backdrop mounted ({} x {}, particles: {})",
            tracker.borrow().current().width,
            tracker.borrow().current().height,
            config.particles_enabled
        );

        Ok(Self {
            engine,
            created,
            _tracker: tracker,
            _parallax: PointerParallax::attach(&root),
            _listeners: listeners,
        })
    }

    pub fn set_colors(&mut self, primary: Rgb, secondary: Rgb) {
        self.engine.borrow_mut().set_colors(primary, secondary);
    }
}

impl Drop for Backdrop {
    fn drop(&mut self) {
        self.engine.borrow_mut().shutdown();
        for canvas in self.created.drain(..) {
            canvas.remove();
        }
        log::info!("backdrop unmounted");
    }
}

/// The `canvas[data-layer=name]` child of `root`. A missing one is created
/// and recorded in `created`.
fn layer_canvas(
    document: &Document,
    root: &HtmlElement,
    name: &str,
    created: &mut Vec<HtmlCanvasElement>,
) -> Result<HtmlCanvasElement> {
    let selector = format!("canvas[{LAYER_ATTR}=\"{name}\"]");
    if let Some(existing) = root.query_selector(&selector)? {
        return existing
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| BackdropError::Js(format!("{selector} is not a canvas")));
    }
    let canvas = document
        .create_element("canvas")?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| BackdropError::Unsupported("canvas"))?;
    canvas.set_attribute(LAYER_ATTR, name)?;
    canvas.set_attribute("aria-hidden", "true")?;
    root.append_child(&canvas)?;
    created.push(canvas.clone());
    Ok(canvas)
}

fn window_viewport(window: &Window) -> Viewport {
    let dimension = |value: std::result::Result<JsValue, JsValue>| {
        value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
    };
    Viewport::new(dimension(window.inner_width()), dimension(window.inner_height()))
}

fn element_viewport(element: &HtmlElement) -> Viewport {
    let rect = element.get_bounding_client_rect();
    Viewport::new(rect.width(), rect.height())
}
