#![cfg(target_arch = "wasm32")]

use mistake_core::{Dashboard, Preset, RecordField, SnapshotStorage};
use mistake_web::storage::BrowserStorage;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn records_survive_a_reload() {
    let storage = BrowserStorage::new("mistake_dashboard_test.reload");
    storage.clear().expect("clear storage");

    let mut dashboard = Dashboard::open(storage.clone(), Preset::Standard.config());
    let id = dashboard.create();
    dashboard.update(id, RecordField::Name, "Ayu");
    dashboard.update(id, RecordField::MistakeCount, "8");

    let reopened = Dashboard::open(storage.clone(), Preset::Standard.config());
    assert_eq!(reopened.records(), dashboard.records());
    storage.clear().expect("clear storage");
}

#[wasm_bindgen_test]
fn corrupt_value_loads_as_absent() {
    let storage = BrowserStorage::new("mistake_dashboard_test.corrupt");
    mistake_web::dom::local_storage()
        .expect("localStorage")
        .set_item(storage.key(), "{broken")
        .expect("seed corrupt value");
    assert!(storage.load().expect("load").is_none());
    storage.clear().expect("clear storage");
}
