//! Browser host: builds the session on top of the DOM and wires input into it.

mod assets;
mod panel;
mod scheduler;
mod sound;
mod storage;
mod surface;

pub use scheduler::RafScheduler;
pub use sound::HtmlSound;
pub use storage::LocalStorage;
pub use surface::DomSurface;

use std::cell::RefCell;

use rand::SeedableRng;
use rand::rngs::SmallRng;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Event, HtmlCanvasElement, KeyboardEvent, Window, window};

use crate::constants::{HIT_SOUND, SMILEY_IMAGE};
use crate::game::{GameSession, InputEvent, ItemId, Phase, Ports, SettingsAction, Spawner, key_binding};
use crate::settings::SettingsStore;

type WebSession = GameSession<SmallRng>;

thread_local! {
    static SESSION: RefCell<Option<WebSession>> = RefCell::new(None);
}

/// Runs `f` against the live session. Returns `None` before `start_game` or if the session
/// is already borrowed further up the stack.
fn with_session<T>(f: impl FnOnce(&mut WebSession) -> T) -> Option<T> {
    SESSION.with(|cell| match cell.try_borrow_mut() {
        Ok(mut guard) => guard.as_mut().map(f),
        Err(_) => {
            tracing::warn!("session busy, event dropped");
            None
        }
    })
}

#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    if SESSION.with(|cell| cell.borrow().is_some()) {
        tracing::warn!("start_game called twice");
        return Ok(());
    }

    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let canvas = ensure_canvas(&win, &doc)?;

    panel::ensure_controls(&doc, SMILEY_IMAGE)?;

    let ready_doc = doc.clone();
    let images = assets::preload(move || {
        if let Err(err) = install_listeners(&ready_doc) {
            tracing::error!(err = %crate::error::describe_js(&err), "could not install listeners");
            return;
        }
        panel::set_visible(&ready_doc, panel::START_MENU, true);
    })?;

    let surface = DomSurface::new(doc.clone(), canvas, images)?;
    let frame = Closure::wrap(Box::new(|_ts: f64| {
        with_session(|session| session.tick());
    }) as Box<dyn FnMut(f64)>);
    let scheduler = RafScheduler::new(win.clone(), frame);
    let sound = HtmlSound::new(HIT_SOUND)?;

    let store = match LocalStorage::open(&win) {
        Ok(local) => SettingsStore::new(local),
        Err(err) => {
            tracing::warn!(%err, "settings will not persist");
            SettingsStore::in_memory()
        }
    };

    let session = GameSession::new(
        Ports {
            surface: Box::new(surface),
            scheduler: Box::new(scheduler),
            sound: Box::new(sound),
        },
        store,
        Spawner::new(SmallRng::from_entropy()),
    );
    SESSION.with(|cell| cell.replace(Some(session)));
    Ok(())
}

fn ensure_canvas(win: &Window, doc: &Document) -> Result<HtmlCanvasElement, JsValue> {
    let canvas: HtmlCanvasElement = if let Some(el) = doc.get_element_by_id("gameCanvas") {
        el.dyn_into()?
    } else {
        let c: HtmlCanvasElement = doc.create_element("canvas")?.dyn_into()?;
        c.set_id("gameCanvas");
        doc.body()
            .ok_or_else(|| JsValue::from_str("no body"))?
            .append_child(&c)?;
        c
    };
    let width = win.inner_width()?.as_f64().unwrap_or(800.0);
    let height = win.inner_height()?.as_f64().unwrap_or(600.0);
    canvas.set_width(width as u32);
    canvas.set_height(height as u32);
    Ok(canvas)
}

fn on_click(doc: &Document, id: &str, mut handler: impl FnMut(&Document) + 'static) -> Result<(), JsValue> {
    let Some(target) = doc.get_element_by_id(id) else {
        return Err(JsValue::from_str(&format!("missing #{id}")));
    };
    let doc = doc.clone();
    let closure = Closure::wrap(Box::new(move |_evt: Event| handler(&doc)) as Box<dyn FnMut(_)>);
    target.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn install_listeners(doc: &Document) -> Result<(), JsValue> {
    // Keyboard: Enter restarts, Escape pauses. While the settings panel is open Escape
    // cancels it and Enter is left to the form.
    {
        let key_doc = doc.clone();
        let closure = Closure::wrap(Box::new(move |evt: KeyboardEvent| {
            let key = evt.key();
            let in_settings = with_session(|s| s.phase() == Phase::Settings).unwrap_or(false);
            if in_settings {
                if key == "Escape" {
                    close_settings(&key_doc, SettingsAction::Cancel);
                }
                return;
            }
            let Some(event) = key_binding(&key) else {
                return;
            };
            let left_menu = with_session(|s| {
                s.dispatch(event);
                s.phase() != Phase::Menu
            });
            if left_menu == Some(true) {
                panel::set_visible(&key_doc, panel::START_MENU, false);
            }
        }) as Box<dyn FnMut(_)>);
        doc.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Falling items: one delegated listener resolves the clicked span to its item id.
    {
        let closure = Closure::wrap(Box::new(move |evt: Event| {
            let Some(id) = clicked_item(&evt) else {
                return;
            };
            with_session(|s| s.dispatch(InputEvent::Click(id)));
        }) as Box<dyn FnMut(_)>);
        doc.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    on_click(doc, panel::START_BUTTON, |doc| {
        if with_session(|s| s.start()).unwrap_or(false) {
            panel::set_visible(doc, panel::START_MENU, false);
        }
    })?;
    on_click(doc, panel::SETTINGS_BUTTON, |doc| {
        let opened = with_session(|s| s.open_settings().then(|| *s.settings())).flatten();
        if let Some(settings) = opened {
            panel::show_settings(doc, &settings);
        }
    })?;
    on_click(doc, panel::SAVE_BUTTON, |doc| match panel::read_form(doc) {
        Ok(settings) => close_settings(doc, SettingsAction::Save(settings)),
        Err(err) => {
            tracing::debug!(%err, "settings form rejected");
            panel::show_error(doc, &err.to_string());
        }
    })?;
    on_click(doc, panel::CANCEL_BUTTON, |doc| close_settings(doc, SettingsAction::Cancel))?;
    on_click(doc, panel::RESET_BUTTON, |doc| close_settings(doc, SettingsAction::Reset))?;
    Ok(())
}

fn close_settings(doc: &Document, action: SettingsAction) {
    if let Some(Err(err)) = with_session(|s| s.close_settings(action)) {
        tracing::warn!(%err, "settings were applied but not saved");
    }
    panel::hide_settings(doc);
}

fn clicked_item(evt: &Event) -> Option<ItemId> {
    let target = evt.target()?.dyn_into::<web_sys::Element>().ok()?;
    let span = target.closest(&format!("[{}]", surface::ITEM_ID_ATTR)).ok()??;
    let raw = span.get_attribute(surface::ITEM_ID_ATTR)?;
    raw.parse().ok().map(ItemId)
}
