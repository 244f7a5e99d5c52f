//! Canvas host for the hero [`ParticleField`]: sizes the backing store,
//! drives frames from `requestAnimationFrame` and rebuilds on resize.

use std::cell::RefCell;
use std::f64::consts::TAU;
use std::rc::Rc;

use braced_core::{ParticleField, Surface};
use gloo::events::EventListener;
use gloo::render::{request_animation_frame, AnimationFrame};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, Document, Element, HtmlCanvasElement};

use crate::dom::{js_err, query_in, set_style, viewport_size};

pub(crate) const MAX_PIXEL_RATIO: f64 = 2.0;
const PARTICLE_COLOR: &str = "#8fd3ff";
const LINE_COLOR: &str = "#8fd3ff";

/// Backing-store pixel ratio, capped at [`MAX_PIXEL_RATIO`].
pub(crate) fn capped_pixel_ratio(ratio: f64) -> f64 {
    if ratio.is_finite() && ratio > 0.0 {
        ratio.min(MAX_PIXEL_RATIO)
    } else {
        1.0
    }
}

struct CanvasSurface<'a> {
    context: &'a CanvasRenderingContext2d,
}

impl Surface for CanvasSurface<'_> {
    fn clear(&mut self, width: f32, height: f32) {
        self.context.set_global_alpha(1.0);
        self.context
            .clear_rect(0.0, 0.0, f64::from(width), f64::from(height));
    }

    fn line(&mut self, from: (f32, f32), to: (f32, f32), alpha: f32) {
        self.context.set_global_alpha(f64::from(alpha));
        self.context.begin_path();
        self.context.move_to(f64::from(from.0), f64::from(from.1));
        self.context.line_to(f64::from(to.0), f64::from(to.1));
        self.context.stroke();
    }

    fn dot(&mut self, center: (f32, f32), radius: f32, alpha: f32) {
        self.context.set_global_alpha(f64::from(alpha));
        self.context.begin_path();
        self.context
            .arc(
                f64::from(center.0),
                f64::from(center.1),
                f64::from(radius),
                0.0,
                TAU,
            )
            .ok();
        self.context.fill();
    }
}

pub(crate) struct ParticleCanvas {
    container: Element,
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
    field: RefCell<ParticleField>,
    frame: RefCell<Option<AnimationFrame>>,
    listeners: RefCell<Vec<EventListener>>,
}

impl ParticleCanvas {
    pub(crate) fn install(document: &Document) -> Option<Rc<Self>> {
        let container = document.get_element_by_id("particles-hero")?;
        match Self::build(document, container) {
            Ok(particles) => {
                particles.install_listeners();
                particles.schedule_frame();
                Some(particles)
            }
            Err(err) => {
                gloo::console::warn!("particles: canvas unavailable", js_err(err));
                None
            }
        }
    }

    fn build(document: &Document, container: Element) -> Result<Rc<Self>, JsValue> {
        let canvas = match query_in(&container, "canvas") {
            Some(existing) => existing.dyn_into::<HtmlCanvasElement>()?,
            None => {
                let canvas = document
                    .create_element("canvas")?
                    .dyn_into::<HtmlCanvasElement>()?;
                canvas.set_class_name("particles-canvas");
                canvas.set_attribute("aria-hidden", "true")?;
                container.append_child(&canvas)?;
                canvas
            }
        };
        let context = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        let (width, height) = surface_size(&container);
        let particles = Rc::new(Self {
            container,
            canvas,
            context,
            field: RefCell::new(ParticleField::new(width, height, random_seed())),
            frame: RefCell::new(None),
            listeners: RefCell::new(Vec::new()),
        });
        particles.resize_surface(width, height);
        Ok(particles)
    }

    /// Sizes the backing store in device pixels while drawing stays in CSS
    /// pixels.
    fn resize_surface(&self, width: f32, height: f32) {
        let ratio = capped_pixel_ratio(
            web_sys::window()
                .map(|window| window.device_pixel_ratio())
                .unwrap_or(1.0),
        );
        self.canvas
            .set_width((f64::from(width) * ratio).round().max(1.0) as u32);
        self.canvas
            .set_height((f64::from(height) * ratio).round().max(1.0) as u32);
        set_style(&self.canvas, "width", &format!("{width}px"));
        set_style(&self.canvas, "height", &format!("{height}px"));
        if let Err(err) = self.context.set_transform(ratio, 0.0, 0.0, ratio, 0.0, 0.0) {
            gloo::console::warn!("particles: set_transform failed", js_err(err));
        }
        self.context.set_fill_style_str(PARTICLE_COLOR);
        self.context.set_stroke_style_str(LINE_COLOR);
        self.context.set_line_width(1.0);
    }

    fn rebuild(&self) {
        let (width, height) = surface_size(&self.container);
        self.resize_surface(width, height);
        let mut field = self.field.borrow_mut();
        let seed = field.next_seed();
        *field = ParticleField::new(width, height, seed);
    }

    fn schedule_frame(self: &Rc<Self>) {
        let particles = Rc::clone(self);
        let handle = request_animation_frame(move |timestamp| {
            particles.render(timestamp);
            particles.schedule_frame();
        });
        *self.frame.borrow_mut() = Some(handle);
    }

    fn render(&self, now_ms: f64) {
        let mut surface = CanvasSurface {
            context: &self.context,
        };
        self.field.borrow_mut().frame(now_ms, &mut surface);
    }

    fn install_listeners(self: &Rc<Self>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let particles = Rc::clone(self);
        let listener = EventListener::new(&window, "resize", move |_event| {
            particles.rebuild();
        });
        self.listeners.borrow_mut().push(listener);
    }
}

fn surface_size(container: &Element) -> (f32, f32) {
    let width = container.client_width() as f32;
    let height = container.client_height() as f32;
    if width > 0.0 && height > 0.0 {
        (width, height)
    } else {
        viewport_size()
    }
}

fn random_seed() -> u64 {
    (js_sys::Math::random() * u64::MAX as f64) as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_ratio_is_capped_and_sane() {
        assert_eq!(capped_pixel_ratio(1.0), 1.0);
        assert_eq!(capped_pixel_ratio(1.5), 1.5);
        assert_eq!(capped_pixel_ratio(3.0), MAX_PIXEL_RATIO);
        assert_eq!(capped_pixel_ratio(0.0), 1.0);
        assert_eq!(capped_pixel_ratio(f64::NAN), 1.0);
    }
}
