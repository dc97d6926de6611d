use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, TouchEvent, WheelEvent, Window};

use super::dom;
use crate::config::MotionConfig;
use crate::error::MotionError;
use crate::frame::Teardown;
use crate::track::{LoopTrack, TrackEvent};

const SECTION_ID: &str = "skills";
const TRACK_ID: &str = "skills-track";

fn first_touch_y(event: &TouchEvent) -> Option<f64> {
    event.touches().get(0).map(|t| t.client_y() as f64)
}

/// Run the skills marquee inside `#skills`, sliding `#skills-track`.
pub fn mount(
    window: &Window,
    document: &Document,
    config: &MotionConfig,
) -> Result<Option<Teardown>, MotionError> {
    let (section, strip) = match (
        document.get_element_by_id(SECTION_ID),
        document.get_element_by_id(TRACK_ID),
    ) {
        (Some(section), Some(strip)) => (section, strip),
        _ => {
            log::warn!("no #{SECTION_ID} / #{TRACK_ID} on this page");
            return Ok(None);
        }
    };
    let strip = strip
        .dyn_into::<HtmlElement>()
        .map_err(|_| MotionError::MissingElement(TRACK_ID.into()))?;

    let track = Rc::new(RefCell::new(LoopTrack::new(&config.track)));
    let mut teardown = Teardown::new();

    {
        let track = track.clone();
        dom::observe_visibility(
            &section,
            config.track.visibility_threshold,
            &mut teardown,
            move |intersecting, ratio| {
                track
                    .borrow_mut()
                    .send(TrackEvent::Visibility { intersecting, ratio });
            },
        )?;
    }
    {
        let track = track.clone();
        dom::listen(window, "wheel", &mut teardown, move |e: WheelEvent| {
            track.borrow_mut().send(TrackEvent::Wheel { delta_y: e.delta_y() });
        })?;
    }
    {
        let track = track.clone();
        dom::listen(window, "touchstart", &mut teardown, move |e: TouchEvent| {
            if let Some(y) = first_touch_y(&e) {
                track.borrow_mut().send(TrackEvent::TouchStart { y });
            }
        })?;
    }
    {
        let track = track.clone();
        dom::listen(window, "touchmove", &mut teardown, move |e: TouchEvent| {
            if let Some(y) = first_touch_y(&e) {
                track.borrow_mut().send(TrackEvent::TouchMove { y });
            }
        })?;
    }

    dom::frame_loop(&mut teardown, move |now| {
        let mut track = track.borrow_mut();
        track.send(TrackEvent::Measured {
            track_width: strip.scroll_width() as f64,
        });
        let offset = track.frame(now);
        if let Err(err) = strip
            .style()
            .set_property("transform", &format!("translateX({offset:.3}px)"))
        {
            log::trace!("skills track paint skipped: {err:?}");
        }
    })?;

    Ok(Some(teardown))
}
