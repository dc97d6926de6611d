use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, Window};

use super::dom;
use crate::config::MotionConfig;
use crate::error::MotionError;
use crate::frame::Teardown;
use crate::timeline::{Layout, ScrollRegion, Timeline};

const SCENE_ID: &str = "experience-scene";
const LINE_ID: &str = "timeline-line";
const ITEM_SELECTOR: &str = "[data-timeline-item]";

struct Scene {
    timeline: Timeline,
    root: HtmlElement,
    line: Option<HtmlElement>,
    items: Vec<HtmlElement>,
}

impl Scene {
    fn layout_changed(&mut self) -> Result<(), MotionError> {
        let layout = match self.timeline.layout() {
            Layout::Compact => "compact",
            Layout::Expanded => "expanded",
        };
        self.root.set_attribute("data-layout", layout)?;
        self.root
            .style()
            .set_property("height", &format!("{}vh", self.timeline.scene_height_vh()))?;
        if let Some(line) = &self.line {
            // The fill runs along whichever axis the other layout no longer uses.
            let style = line.style();
            style.remove_property("width")?;
            style.remove_property("height")?;
        }
        Ok(())
    }

    fn sample(&mut self, window: &Window) -> Result<(), MotionError> {
        let scroll_y = window.scroll_y()?;
        let viewport_h = window
            .inner_height()?
            .as_f64()
            .unwrap_or_default();
        let rect = self.root.get_bounding_client_rect();
        let region = ScrollRegion::from_scene(rect.top() + scroll_y, rect.height(), viewport_h);
        self.timeline.scroll_to(scroll_y, region);
        self.paint()
    }

    fn paint(&self) -> Result<(), MotionError> {
        if let Some(line) = &self.line {
            let axis = match self.timeline.layout() {
                Layout::Expanded => "width",
                Layout::Compact => "height",
            };
            line.style()
                .set_property(axis, &format!("{:.3}%", self.timeline.line_fill() * 100.0))?;
        }
        for (item, style) in self.items.iter().zip(self.timeline.item_styles()) {
            let css = item.style();
            css.set_property("opacity", &format!("{:.4}", style.opacity))?;
            css.set_property("transform", &style.transform())?;
        }
        Ok(())
    }
}

/// Drive the experience timeline from window scroll and resize events.
pub fn mount(
    window: &Window,
    document: &Document,
    config: &MotionConfig,
) -> Result<Option<Teardown>, MotionError> {
    let root = match document.get_element_by_id(SCENE_ID) {
        Some(el) => el
            .dyn_into::<HtmlElement>()
            .map_err(|_| MotionError::MissingElement(SCENE_ID.into()))?,
        None => {
            log::warn!("no #{SCENE_ID} on this page");
            return Ok(None);
        }
    };
    let line = document
        .get_element_by_id(LINE_ID)
        .and_then(|el| el.dyn_into::<HtmlElement>().ok());

    let nodes = root.query_selector_all(ITEM_SELECTOR)?;
    let items: Vec<HtmlElement> = (0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .collect();

    let viewport_w = window.inner_width()?.as_f64().unwrap_or_default();
    let mut scene = Scene {
        timeline: Timeline::new(items.len(), viewport_w, config.timeline.clone()),
        root,
        line,
        items,
    };
    scene.layout_changed()?;
    scene.sample(window)?;
    log::debug!(
        "timeline scene with {} items, layout {:?}",
        scene.timeline.item_count(),
        scene.timeline.layout()
    );

    let scene = Rc::new(RefCell::new(scene));
    let mut teardown = Teardown::new();

    {
        let scene = scene.clone();
        let win = window.clone();
        dom::listen(window, "scroll", &mut teardown, move |_: web_sys::Event| {
            if let Err(err) = scene.borrow_mut().sample(&win) {
                log::trace!("timeline sample skipped: {err}");
            }
        })?;
    }
    {
        let win = window.clone();
        dom::listen(window, "resize", &mut teardown, move |_: web_sys::Event| {
            let mut scene = scene.borrow_mut();
            let width = win.inner_width().ok().and_then(|w| w.as_f64()).unwrap_or_default();
            let result = if scene.timeline.observe_viewport(width) {
                scene.layout_changed()
            } else {
                Ok(())
            };
            if let Err(err) = result.and_then(|()| scene.sample(&win)) {
                log::trace!("timeline resize skipped: {err}");
            }
        })?;
    }

    Ok(Some(teardown))
}
