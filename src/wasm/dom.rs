//! Browser acquisitions that must be released: event listeners, animation
//! frames and intersection observers. Each helper registers its release on the
//! caller's [`Teardown`] as soon as the resource exists.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::convert::FromWasmAbi;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    window, AddEventListenerOptions, Element, EventTarget, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit,
};

use crate::error::MotionError;
use crate::frame::Teardown;

/// Attach a passive listener to `target`; it is removed when `teardown` runs.
pub fn listen<E, F>(
    target: &EventTarget,
    kind: &'static str,
    teardown: &mut Teardown,
    handler: F,
) -> Result<(), MotionError>
where
    E: FromWasmAbi + 'static,
    F: FnMut(E) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(E)>);
    let options = AddEventListenerOptions::new();
    options.set_passive(true);
    target.add_event_listener_with_callback_and_add_event_listener_options(
        kind,
        closure.as_ref().unchecked_ref(),
        &options,
    )?;

    let target = target.clone();
    teardown.defer(move || {
        // Dropping `closure` afterwards invalidates the JS function, so detach first.
        if let Err(err) =
            target.remove_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())
        {
            log::trace!("removing {kind} listener failed: {err:?}");
        }
        drop(closure);
    });
    Ok(())
}

/// Call `step` with the frame timestamp (ms) before every repaint until
/// `teardown` runs, which cancels the pending request.
pub fn frame_loop<F>(teardown: &mut Teardown, mut step: F) -> Result<(), MotionError>
where
    F: FnMut(f64) + 'static,
{
    let window = window().ok_or(MotionError::NoWindow)?;

    // `f` holds the animation-frame closure so that it can keep calling
    // `request_animation_frame` recursively. Storing it inside an `Option`
    // allows us to create the `Closure` first and then obtain a reference to
    // it from within itself.
    let f: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
    let pending: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));

    let g = f.clone();
    let scheduled = pending.clone();
    let win = window.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |now: f64| {
        scheduled.set(None);
        step(now);

        // schedule next
        if let Some(cb) = f.borrow().as_ref() {
            match win.request_animation_frame(cb.as_ref().unchecked_ref()) {
                Ok(id) => scheduled.set(Some(id)),
                Err(err) => log::error!("request_animation_frame failed: {err:?}"),
            }
        }
    }) as Box<dyn FnMut(f64)>));

    let first = g
        .borrow()
        .as_ref()
        .map(|cb| window.request_animation_frame(cb.as_ref().unchecked_ref()));
    match first {
        Some(Ok(id)) => pending.set(Some(id)),
        Some(Err(err)) => {
            g.borrow_mut().take();
            return Err(err.into());
        }
        None => return Ok(()),
    }

    teardown.defer(move || {
        if let Some(id) = pending.take() {
            if let Err(err) = window.cancel_animation_frame(id) {
                log::trace!("cancel_animation_frame({id}) failed: {err:?}");
            }
        }
        // Breaks the closure's reference to itself so it can be freed.
        g.borrow_mut().take();
    });
    Ok(())
}

/// Report `(is_intersecting, intersection_ratio)` for `element` whenever it
/// crosses `threshold`. The observer disconnects when `teardown` runs.
pub fn observe_visibility<F>(
    element: &Element,
    threshold: f64,
    teardown: &mut Teardown,
    mut on_change: F,
) -> Result<(), MotionError>
where
    F: FnMut(bool, f64) + 'static,
{
    let callback = Closure::wrap(Box::new(move |entries: js_sys::Array| {
        for entry in entries.iter() {
            if let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() {
                on_change(entry.is_intersecting(), entry.intersection_ratio());
            }
        }
    }) as Box<dyn FnMut(js_sys::Array)>);

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(threshold));
    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
    observer.observe(element);
    teardown.defer(move || {
        observer.disconnect();
        drop(callback);
    });
    Ok(())
}
