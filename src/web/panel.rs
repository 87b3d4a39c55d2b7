//! Start menu and settings panel markup.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlElement, HtmlInputElement, HtmlSelectElement};

use crate::error::{GameError, GameResult};
use crate::settings::Settings;

pub const START_MENU: &str = "start-menu";
pub const START_BUTTON: &str = "start-button";
pub const SETTINGS_BUTTON: &str = "settings-button";
pub const SETTINGS_PANEL: &str = "settings-panel";
pub const SAVE_BUTTON: &str = "settings-save";
pub const CANCEL_BUTTON: &str = "settings-cancel";
pub const RESET_BUTTON: &str = "settings-reset";
const TARGET_INPUT: &str = "settings-target";
const CATEGORY_SELECT: &str = "settings-category";
const SOUND_CHECKBOX: &str = "settings-sound";
const ERROR_TEXT: &str = "settings-error";

const OVERLAY_STYLE: &str = "position:fixed; left:50%; top:50%; transform:translate(-50%,-50%); padding:18px 24px; background:rgba(0,0,0,0.72); border:1px solid #333; border-radius:10px; color:#ffd166; font-family:'Fira Code', monospace; z-index:1100; text-align:center;";

/// Creates the menu and settings markup if the page does not already provide it.
pub fn ensure_controls(doc: &Document, smiley_src: &str) -> Result<(), JsValue> {
    let body = doc.body().ok_or_else(|| JsValue::from_str("no body"))?;

    if doc.get_element_by_id(START_MENU).is_none() {
        let menu = doc.create_element("div")?;
        menu.set_id(START_MENU);
        menu.set_attribute("style", OVERLAY_STYLE)?;
        menu.set_attribute("hidden", "")?;
        menu.set_inner_html(&format!(
            "<img src='{smiley_src}' width='64' height='64' alt=''><br>\
             <button id='{START_BUTTON}'>Jouer</button>\
             <p>Entrée : recommencer &middot; Échap : pause</p>"
        ));
        body.append_child(&menu)?;
    }

    if doc.get_element_by_id(SETTINGS_BUTTON).is_none() {
        let button = doc.create_element("button")?;
        button.set_id(SETTINGS_BUTTON);
        button.set_text_content(Some("⚙"));
        button.set_attribute(
            "style",
            "position:fixed; top:10px; left:210px; font-size:20px; z-index:1050;",
        )?;
        body.append_child(&button)?;
    }

    if doc.get_element_by_id(SETTINGS_PANEL).is_none() {
        let panel = doc.create_element("div")?;
        panel.set_id(SETTINGS_PANEL);
        panel.set_attribute("style", OVERLAY_STYLE)?;
        panel.set_attribute("hidden", "")?;
        panel.set_inner_html(&format!(
            "<label>Score à atteindre <input id='{TARGET_INPUT}' type='number' min='1' step='1'></label><br>\
             <label>Catégorie <select id='{CATEGORY_SELECT}'>\
               <option value='letters'>Lettres</option>\
               <option value='numbers'>Chiffres</option>\
             </select></label><br>\
             <label>Son <input id='{SOUND_CHECKBOX}' type='checkbox'></label><br>\
             <p id='{ERROR_TEXT}' style='color:#ff6b6b;'></p>\
             <button id='{SAVE_BUTTON}'>Enregistrer</button> \
             <button id='{CANCEL_BUTTON}'>Annuler</button> \
             <button id='{RESET_BUTTON}'>Réinitialiser</button>"
        ));
        body.append_child(&panel)?;
    }
    Ok(())
}

pub fn set_visible(doc: &Document, id: &str, visible: bool) {
    if let Some(el) = element::<HtmlElement>(doc, id) {
        el.set_hidden(!visible);
    }
}

/// Fills the form from `settings` and shows the panel.
pub fn show_settings(doc: &Document, settings: &Settings) {
    if let Some(input) = element::<HtmlInputElement>(doc, TARGET_INPUT) {
        input.set_value(&settings.target_score.to_string());
    }
    if let Some(select) = element::<HtmlSelectElement>(doc, CATEGORY_SELECT) {
        select.set_value(settings.category.as_str());
    }
    if let Some(checkbox) = element::<HtmlInputElement>(doc, SOUND_CHECKBOX) {
        checkbox.set_checked(settings.sound_enabled);
    }
    show_error(doc, "");
    set_visible(doc, SETTINGS_PANEL, true);
}

pub fn hide_settings(doc: &Document) {
    set_visible(doc, SETTINGS_PANEL, false);
}

pub fn read_form(doc: &Document) -> GameResult<Settings> {
    let missing = |id: &str| GameError::Dom(format!("missing form field #{id}"));
    let target = element::<HtmlInputElement>(doc, TARGET_INPUT).ok_or_else(|| missing(TARGET_INPUT))?;
    let category =
        element::<HtmlSelectElement>(doc, CATEGORY_SELECT).ok_or_else(|| missing(CATEGORY_SELECT))?;
    let sound = element::<HtmlInputElement>(doc, SOUND_CHECKBOX).ok_or_else(|| missing(SOUND_CHECKBOX))?;
    Ok(Settings::from_form(&target.value(), &category.value(), sound.checked())?)
}

pub fn show_error(doc: &Document, message: &str) {
    if let Some(el) = doc.get_element_by_id(ERROR_TEXT) {
        el.set_text_content(Some(message));
    }
}

fn element<T: JsCast>(doc: &Document, id: &str) -> Option<T> {
    doc.get_element_by_id(id)?.dyn_into::<T>().ok()
}
