//! The two render loops of one backdrop and what resizes, colour changes,
//! visibility flips and teardown do to them.

use std::cell::RefCell;
use std::rc::Rc;

use rand::rngs::SmallRng;

use crate::color::Rgb;
use crate::flow_field::FlowField;
use crate::particles::ParticleField;
use crate::scheduler::{AnimationScheduler, AnimationSlot, FrameHost};
use crate::surface::Surface;
use crate::viewport::Viewport;

pub struct FlowLayer<S> {
    pub surface: S,
    pub field: FlowField,
    pub rng: SmallRng,
}

pub struct ParticleLayer<S> {
    pub surface: S,
    pub field: ParticleField,
    pub rng: SmallRng,
}

/// Either layer may be missing when its surface could not be created.
pub struct Engine<H, S> {
    scheduler: AnimationScheduler<H>,
    flow: Option<Rc<RefCell<FlowLayer<S>>>>,
    particles: Option<Rc<RefCell<ParticleLayer<S>>>>,
    flow_loop: AnimationSlot,
    particle_loop: AnimationSlot,
}

impl<H: FrameHost + 'static, S: Surface + 'static> Engine<H, S> {
    pub fn new(
        scheduler: AnimationScheduler<H>,
        flow: Option<FlowLayer<S>>,
        particles: Option<ParticleLayer<S>>,
    ) -> Self {
        Self {
            scheduler,
            flow: flow.map(|layer| Rc::new(RefCell::new(layer))),
            particles: particles.map(|layer| Rc::new(RefCell::new(layer))),
            flow_loop: AnimationSlot::default(),
            particle_loop: AnimationSlot::default(),
        }
    }

    fn restart_flow(&mut self) {
        let Some(layer) = self.flow.clone() else {
            return;
        };
        self.flow_loop.restart(&self.scheduler, move |time| {
            let mut layer = layer.borrow_mut();
            let FlowLayer { surface, field, rng } = &mut *layer;
            field.draw(surface, time, rng);
        });
    }

    fn restart_particles(&mut self) {
        let Some(layer) = self.particles.clone() else {
            return;
        };
        self.particle_loop.restart(&self.scheduler, move |_| {
            let mut layer = layer.borrow_mut();
            let ParticleLayer { surface, field, .. } = &mut *layer;
            field.step(surface);
        });
    }

    /// Start every present layer, replacing loops that already run.
    pub fn resume(&mut self) {
        self.restart_flow();
        self.restart_particles();
    }

    pub fn pause(&mut self) {
        self.flow_loop.stop();
        self.particle_loop.stop();
    }

    pub fn is_running(&self) -> bool {
        self.flow_loop.is_running() || self.particle_loop.is_running()
    }

    /// A hidden page draws nothing; becoming visible restarts both loops.
    pub fn set_visible(&mut self, visible: bool) {
        if visible {
            self.resume();
        } else {
            self.pause();
        }
    }

    /// New flow colours. A running flow loop is replaced by one that draws
    /// with them; a paused engine stays paused.
    pub fn set_colors(&mut self, primary: Rgb, secondary: Rgb) {
        if let Some(layer) = &self.flow {
            layer.borrow_mut().field.set_colors(primary, secondary);
        }
        if self.flow_loop.is_running() {
            self.restart_flow();
        }
    }

    /// The flow layer follows the window and the particle layer follows its
    /// container. Particles are only regenerated when the container size
    /// changed or the set is still empty.
    pub fn on_viewport(&mut self, window: Viewport, container: Viewport) {
        if let Some(layer) = &self.flow {
            let mut layer = layer.borrow_mut();
            layer.surface.resize(window);
            layer.field.resize(window);
        }
        if let Some(layer) = &self.particles {
            let mut layer = layer.borrow_mut();
            let ParticleLayer { surface, field, rng } = &mut *layer;
            surface.resize(container);
            if field.bounds() != container || field.particles().is_empty() {
                field.resize(container, rng);
            }
        }
        if self.is_running() {
            self.resume();
        }
    }

    /// Stop both loops and erase whatever the last frames painted.
    pub fn shutdown(&mut self) {
        self.pause();
        if let Some(layer) = &self.flow {
            let mut layer = layer.borrow_mut();
            let Viewport { width, height } = layer.field.viewport();
            layer.surface.clear(width, height);
        }
        if let Some(layer) = &self.particles {
            let mut layer = layer.borrow_mut();
            let Viewport { width, height } = layer.field.bounds();
            layer.surface.clear(width, height);
        }
    }
}
