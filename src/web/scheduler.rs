use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::Window;

use crate::error::describe_js;
use crate::game::{Scheduler, TickHandle};

pub(crate) type FrameCallback = Closure<dyn FnMut(f64)>;

/// `requestAnimationFrame` scheduler. Owns the frame callback so it lives as long as the
/// session does.
pub struct RafScheduler {
    window: Window,
    callback: FrameCallback,
}

impl RafScheduler {
    pub fn new(window: Window, callback: FrameCallback) -> Self {
        Self { window, callback }
    }
}

impl Scheduler for RafScheduler {
    fn request_tick(&mut self) -> TickHandle {
        let f = self.callback.as_ref().unchecked_ref();
        match self.window.request_animation_frame(f) {
            Ok(id) => TickHandle(id.into()),
            Err(err) => {
                tracing::error!(err = %describe_js(&err), "requestAnimationFrame failed");
                TickHandle(-1)
            }
        }
    }

    fn cancel_tick(&mut self, handle: TickHandle) {
        let Ok(id) = i32::try_from(handle.0) else {
            return;
        };
        if id < 0 {
            return;
        }
        if let Err(err) = self.window.cancel_animation_frame(id) {
            tracing::warn!(err = %describe_js(&err), "cancelAnimationFrame failed");
        }
    }
}
