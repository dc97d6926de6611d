use std::cell::RefCell;
use std::f64::consts::TAU;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, Window};

use super::dom;
use crate::config::MotionConfig;
use crate::error::MotionError;
use crate::frame::Teardown;
use crate::particles::ParticleField;
use crate::surface::{Rgba, Surface};

const CANVAS_ID: &str = "particles";

/// 2D canvas context seen through the engine's [`Surface`] trait.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Option<Self>, MotionError> {
        let ctx = match canvas.get_context("2d")? {
            Some(ctx) => ctx
                .dyn_into::<CanvasRenderingContext2d>()
                .map_err(|_| MotionError::SurfaceUnavailable)?,
            None => return Ok(None),
        };
        Ok(Some(Self { canvas, ctx }))
    }

    /// Match the backing store to the viewport.
    fn fit(&self, window: &Window) -> (f64, f64) {
        let w = viewport_dim(window.inner_width());
        let h = viewport_dim(window.inner_height());
        self.canvas.set_width(w as u32);
        self.canvas.set_height(h as u32);
        self.size()
    }
}

impl Surface for CanvasSurface {
    fn size(&self) -> (f64, f64) {
        (self.canvas.width() as f64, self.canvas.height() as f64)
    }

    fn clear(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.ctx.clear_rect(x, y, width, height);
    }

    fn fill_glow_circle(&mut self, x: f64, y: f64, radius: f64, color: Rgba, blur: f64) {
        let css = color.to_string();
        self.ctx.begin_path();
        if self.ctx.arc(x, y, radius, 0.0, TAU).is_err() {
            return;
        }
        self.ctx.set_shadow_blur(blur);
        self.ctx.set_shadow_color(&css);
        self.ctx.set_fill_style_str(&css);
        self.ctx.fill();
    }
}

fn viewport_dim(value: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>) -> f64 {
    value
        .ok()
        .and_then(|v| v.as_f64())
        .filter(|v| v.is_finite() && *v > 0.0)
        .unwrap_or(0.0)
}

/// Start the particle backdrop on `<canvas id="particles">`.
///
/// A page without the canvas, or a browser without a 2D context, leaves the
/// effect dormant.
pub fn mount(
    window: &Window,
    document: &Document,
    config: &MotionConfig,
) -> Result<Option<Teardown>, MotionError> {
    let canvas = match document.get_element_by_id(CANVAS_ID) {
        Some(el) => el
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| MotionError::MissingElement(CANVAS_ID.into()))?,
        None => {
            log::warn!("no #{CANVAS_ID} canvas on this page");
            return Ok(None);
        }
    };
    let surface = match CanvasSurface::new(canvas)? {
        Some(surface) => surface,
        None => return Ok(None),
    };

    let seed = (js_sys::Math::random() * u64::MAX as f64) as u64;
    let mut field = ParticleField::new(config.particles.clone(), seed);
    let (w, h) = surface.fit(window);
    field.resize(w, h);

    let surface = Rc::new(RefCell::new(surface));
    let field = Rc::new(RefCell::new(field));
    let mut teardown = Teardown::new();

    // Resize canvas to fit window and regenerate the field
    {
        let surface = surface.clone();
        let field = field.clone();
        let win = window.clone();
        dom::listen(window, "resize", &mut teardown, move |_: web_sys::Event| {
            let (w, h) = surface.borrow().fit(&win);
            field.borrow_mut().resize(w, h);
        })?;
    }

    dom::frame_loop(&mut teardown, move |_now| {
        field.borrow_mut().step(&mut *surface.borrow_mut());
    })?;

    Ok(Some(teardown))
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use wasm_bindgen::JsCast;
    use wasm_bindgen_test::*;
    use web_sys::HtmlCanvasElement;

    use super::CanvasSurface;
    use crate::config::ParticleConfig;
    use crate::particles::ParticleField;
    use crate::surface::{Rgba, Surface};

    wasm_bindgen_test_configure!(run_in_browser);

    fn surface(width: u32, height: u32) -> CanvasSurface {
        let document = web_sys::window().unwrap().document().unwrap();
        let canvas = document
            .create_element("canvas")
            .unwrap()
            .dyn_into::<HtmlCanvasElement>()
            .unwrap();
        canvas.set_width(width);
        canvas.set_height(height);
        CanvasSurface::new(canvas).unwrap().expect("2d context")
    }

    fn alpha_at(surface: &CanvasSurface, x: f64, y: f64) -> u8 {
        surface.ctx.get_image_data(x, y, 1.0, 1.0).unwrap().data()[3]
    }

    #[wasm_bindgen_test]
    fn glow_circle_paints_and_sets_glow_colour() {
        let mut surface = surface(100, 100);
        let color = Rgba::new(255, 255, 255, 0.7);
        surface.fill_glow_circle(50.0, 50.0, 3.0, color, 10.0);

        assert!(alpha_at(&surface, 50.0, 50.0) > 0);
        assert_eq!(surface.ctx.shadow_blur(), 10.0);
        // Canvas normalises the colour string; the alpha survives.
        assert!(surface.ctx.shadow_color().contains("0.7"));

        surface.clear(0.0, 0.0, 100.0, 100.0);
        assert_eq!(alpha_at(&surface, 50.0, 50.0), 0);
    }

    #[wasm_bindgen_test]
    fn particles_paint_onto_a_real_canvas() {
        let mut surface = surface(200, 100);
        assert_eq!(surface.size(), (200.0, 100.0));
        let mut field = ParticleField::new(ParticleConfig::default(), 11);
        field.resize(200.0, 100.0);

        for _ in 0..10 {
            field.step(&mut surface);
        }

        let pixels = surface.ctx.get_image_data(0.0, 0.0, 200.0, 100.0).unwrap().data();
        assert!(pixels.chunks(4).any(|px| px[3] > 0), "nothing was drawn");
    }
}
