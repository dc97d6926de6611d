//! Motion effects for the portfolio page: a drifting particle backdrop, a
//! scroll-driven timeline reveal and an infinite skills marquee.
//!
//! The simulation and mapping code is target independent; the browser bindings
//! are only compiled for wasm32.
#![cfg_attr(target_arch = "wasm32", allow(dead_code))]

pub mod config;
pub mod error;
pub mod frame;
pub mod particles;
pub mod surface;
pub mod timeline;
pub mod track;

pub use config::MotionConfig;
pub use error::MotionError;

// Only compile wasm-specific code when targeting wasm32.

#[cfg(target_arch = "wasm32")]
mod wasm {
    use std::cell::RefCell;

    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;
    use web_sys::PageTransitionEvent;

    use crate::config::MotionConfig;
    use crate::error::MotionError;
    use crate::frame::Teardown;

    mod dom;
    mod render;
    mod scene;
    mod skills;

    thread_local! {
        static MOUNTED: RefCell<Vec<Teardown>> = RefCell::new(Vec::new());
    }

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).ok();

        let window = web_sys::window().ok_or(MotionError::NoWindow)?;
        let document = window.document().ok_or(MotionError::NoDocument)?;
        let config = load_config(&document)?;

        mount_all(&window, &document, &config);
        watch_page(&window, document, config)?;
        Ok(())
    }

    /// Mount every effect, replacing whatever is currently mounted.
    fn mount_all(window: &web_sys::Window, document: &web_sys::Document, config: &MotionConfig) {
        unmount();
        // Each effect is independent: one failing to mount leaves the others running.
        mount("particles", render::mount(window, document, config));
        mount("timeline", scene::mount(window, document, config));
        mount("skills track", skills::mount(window, document, config));
    }

    /// Page-lifetime listeners: `pagehide` tears everything down, and a
    /// `pageshow` restoring the page from the back/forward cache mounts it again.
    fn watch_page(
        window: &web_sys::Window,
        document: web_sys::Document,
        config: MotionConfig,
    ) -> Result<(), JsValue> {
        let on_pagehide = Closure::wrap(Box::new(unmount) as Box<dyn FnMut()>);
        window.add_event_listener_with_callback("pagehide", on_pagehide.as_ref().unchecked_ref())?;
        on_pagehide.forget();

        let win = window.clone();
        let on_pageshow = Closure::wrap(Box::new(move |event: PageTransitionEvent| {
            if event.persisted() {
                log::info!("page restored from cache, remounting motion components");
                mount_all(&win, &document, &config);
            }
        }) as Box<dyn FnMut(PageTransitionEvent)>);
        window.add_event_listener_with_callback("pageshow", on_pageshow.as_ref().unchecked_ref())?;
        on_pageshow.forget();
        Ok(())
    }

    /// Stop every effect: cancel pending frames and detach all listeners.
    #[wasm_bindgen]
    pub fn unmount() {
        let mounted = MOUNTED.with(|m| std::mem::take(&mut *m.borrow_mut()));
        if !mounted.is_empty() {
            log::info!("unmounting {} motion components", mounted.len());
        }
        drop(mounted);
    }

    #[cfg(test)]
    fn mounted_count() -> usize {
        MOUNTED.with(|m| m.borrow().len())
    }

    fn mount(name: &str, result: Result<Option<Teardown>, MotionError>) {
        match result {
            Ok(Some(teardown)) => {
                log::info!("{name} mounted");
                keep(teardown);
            }
            Ok(None) => log::warn!("{name} left dormant"),
            Err(err) => log::error!("{name} failed to mount: {err}"),
        }
    }

    fn keep(teardown: Teardown) {
        MOUNTED.with(|m| m.borrow_mut().push(teardown));
    }

    fn load_config(document: &web_sys::Document) -> Result<MotionConfig, MotionError> {
        let raw = document
            .body()
            .and_then(|body| body.get_attribute("data-motion-config"));
        match raw {
            Some(json) => MotionConfig::from_json(&json),
            None => Ok(MotionConfig::default()),
        }
    }

    #[cfg(test)]
    mod tests {
        use wasm_bindgen_test::*;
        use web_sys::PageTransitionEventInit;

        use super::*;

        wasm_bindgen_test_configure!(run_in_browser);

        fn transition(kind: &str, persisted: bool) -> PageTransitionEvent {
            let init = PageTransitionEventInit::new();
            init.set_persisted(persisted);
            PageTransitionEvent::new_with_event_init_dict(kind, &init).unwrap()
        }

        #[wasm_bindgen_test]
        fn back_forward_cache_round_trip_remounts() {
            let window = web_sys::window().unwrap();
            let document = window.document().unwrap();
            let canvas = document.create_element("canvas").unwrap();
            canvas.set_id("particles");
            document.body().unwrap().append_child(&canvas).unwrap();

            let config = MotionConfig::default();
            mount_all(&window, &document, &config);
            assert_eq!(mounted_count(), 1, "only the particle canvas exists");
            watch_page(&window, document.clone(), config).unwrap();

            window.dispatch_event(&transition("pagehide", true)).unwrap();
            assert_eq!(mounted_count(), 0);

            // A fresh load (not from cache) leaves nothing to restore.
            window.dispatch_event(&transition("pageshow", false)).unwrap();
            assert_eq!(mounted_count(), 0);

            window.dispatch_event(&transition("pageshow", true)).unwrap();
            assert_eq!(mounted_count(), 1);

            unmount();
            canvas.remove();
        }
    }
}
