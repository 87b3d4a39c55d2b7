// Browser-only checks for the localStorage-backed settings.
// Run with `wasm-pack test --headless --firefox`.
#![cfg(target_arch = "wasm32")]

use letter_rain::web::LocalStorage;
use letter_rain::{Category, Settings, SettingsStore};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn local_store() -> SettingsStore {
    let window = web_sys::window().expect("window");
    window.local_storage().unwrap().unwrap().clear().unwrap();
    SettingsStore::new(LocalStorage::open(&window).expect("localStorage"))
}

#[wasm_bindgen_test]
fn empty_storage_loads_defaults() {
    assert_eq!(local_store().load(), Settings::default());
}

#[wasm_bindgen_test]
fn saved_settings_survive_a_new_store() {
    let mut store = local_store();
    let settings = Settings {
        target_score: 4,
        category: Category::Numbers,
        sound_enabled: false,
    };
    store.save(&settings).unwrap();

    let window = web_sys::window().unwrap();
    let reopened = SettingsStore::new(LocalStorage::open(&window).unwrap());
    assert_eq!(reopened.load(), settings);

    let raw = window.local_storage().unwrap().unwrap();
    assert_eq!(raw.get_item("targetScore").unwrap().as_deref(), Some("4"));
    assert_eq!(raw.get_item("category").unwrap().as_deref(), Some("\"numbers\""));
}

#[wasm_bindgen_test]
fn garbage_value_falls_back_per_key() {
    let mut store = local_store();
    store.save(&Settings { sound_enabled: false, ..Settings::default() }).unwrap();
    let window = web_sys::window().unwrap();
    window
        .local_storage()
        .unwrap()
        .unwrap()
        .set_item("targetScore", "not json")
        .unwrap();

    let loaded = store.load();
    assert_eq!(loaded.target_score, 10);
    assert!(!loaded.sound_enabled);
}
