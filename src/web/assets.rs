//! Image preloading. The game may only leave the menu once every image has settled.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::HtmlImageElement;

use crate::constants::{BACKGROUND_IMAGE, MOON_IMAGE, SMILEY_IMAGE};
use crate::error::{GameError, GameResult};

#[derive(Clone)]
pub struct Images {
    pub background: HtmlImageElement,
    pub moon: HtmlImageElement,
    pub smiley: HtmlImageElement,
}

/// Starts loading all images and calls `on_ready` once each has either loaded or failed.
/// Failed images are logged and simply not drawn.
pub fn preload(on_ready: impl FnOnce() + 'static) -> GameResult<Images> {
    let sources = [BACKGROUND_IMAGE, MOON_IMAGE, SMILEY_IMAGE];
    let remaining = Rc::new(Cell::new(sources.len()));
    let on_ready: Rc<RefCell<Option<Box<dyn FnOnce()>>>> = Rc::new(RefCell::new(Some(Box::new(on_ready))));

    let settle = |src: &'static str, ok: bool| {
        let remaining = remaining.clone();
        let on_ready = on_ready.clone();
        Closure::wrap(Box::new(move || {
            if !ok {
                tracing::warn!(src, "image failed to load");
            }
            let left = remaining.get().saturating_sub(1);
            remaining.set(left);
            if left == 0 {
                if let Some(ready) = on_ready.borrow_mut().take() {
                    tracing::info!("assets ready");
                    ready();
                }
            }
        }) as Box<dyn FnMut()>)
    };

    let mut images = Vec::with_capacity(sources.len());
    for src in sources {
        let img = HtmlImageElement::new().map_err(GameError::dom)?;
        let loaded = settle(src, true);
        let failed = settle(src, false);
        img.set_onload(Some(loaded.as_ref().unchecked_ref()));
        img.set_onerror(Some(failed.as_ref().unchecked_ref()));
        // Each image fires exactly one of these; both stay alive for the page lifetime.
        loaded.forget();
        failed.forget();
        img.set_src(src);
        images.push(img);
    }

    let [background, moon, smiley]: [HtmlImageElement; 3] = images
        .try_into()
        .map_err(|_| GameError::Dom("image count mismatch".into()))?;
    Ok(Images {
        background,
        moon,
        smiley,
    })
}
