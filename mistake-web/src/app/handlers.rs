use std::collections::BTreeMap;

use mistake_core::{ExportReport, Preset, export_file_name};
use yew::prelude::*;

use crate::app::state::AppState;
use crate::components::ui::{FieldEdit, name_input_id};
use crate::i18n::{t, tr};

const NEW_ROW_FOCUS_DELAY_MS: i32 = 100;
const WORKBOOK_MIME: &str = "application/vnd.ms-excel";
const JSON_MIME: &str = "application/json";

#[derive(Clone)]
pub struct AppHandlers {
    pub add: Callback<()>,
    pub edit: Callback<FieldEdit>,
    pub name_enter: Callback<(u64, String)>,
    pub delete: Callback<u64>,
    pub request_reset: Callback<()>,
    pub cancel_reset: Callback<()>,
    pub confirm_reset: Callback<()>,
    pub export_workbook: Callback<()>,
    pub export_json: Callback<()>,
    pub lang_change: Callback<String>,
    pub preset_change: Callback<Preset>,
}

impl AppHandlers {
    #[must_use]
    pub fn new(state: &AppState) -> Self {
        Self {
            add: build_add(state),
            edit: build_edit(state),
            name_enter: build_name_enter(state),
            delete: build_delete(state),
            request_reset: build_request_reset(state),
            cancel_reset: build_cancel_reset(state),
            confirm_reset: build_confirm_reset(state),
            export_workbook: build_export_workbook(state),
            export_json: build_export_json(state),
            lang_change: build_lang_change(state),
            preset_change: build_preset_change(state),
        }
    }
}

/// Focus a freshly added row's name input once it has been rendered.
fn focus_new_row(id: u64) {
    #[cfg(target_arch = "wasm32")]
    wasm_bindgen_futures::spawn_local(async move {
        if crate::dom::sleep_ms(NEW_ROW_FOCUS_DELAY_MS).await.is_ok() {
            crate::a11y::restore_focus(&name_input_id(id));
        }
    });
    #[cfg(not(target_arch = "wasm32"))]
    let _ = (id, NEW_ROW_FOCUS_DELAY_MS, name_input_id);
}

pub fn build_add(state: &AppState) -> Callback<()> {
    let session = state.session.clone();
    Callback::from(move |()| {
        let mut next = (*session).clone();
        let id = next.create();
        session.set(next);
        crate::a11y::set_status(&t("status.added"));
        focus_new_row(id);
    })
}

pub fn build_edit(state: &AppState) -> Callback<FieldEdit> {
    let session = state.session.clone();
    Callback::from(move |(id, field, raw): FieldEdit| {
        let mut next = (*session).clone();
        if next.update(id, field, &raw) {
            session.set(next);
        }
    })
}

pub fn build_name_enter(state: &AppState) -> Callback<(u64, String)> {
    let session = state.session.clone();
    Callback::from(move |(id, name): (u64, String)| {
        let mut next = (*session).clone();
        let Some(new_id) = next.commit_name_and_add(id, &name) else {
            return;
        };
        session.set(next);
        crate::a11y::set_status(&t("status.added"));
        focus_new_row(new_id);
    })
}

pub fn build_delete(state: &AppState) -> Callback<u64> {
    let session = state.session.clone();
    Callback::from(move |id: u64| {
        let mut next = (*session).clone();
        if next.delete(id) {
            session.set(next);
            crate::a11y::set_status(&t("status.deleted"));
        }
    })
}

pub fn build_request_reset(state: &AppState) -> Callback<()> {
    let show_reset = state.show_reset.clone();
    Callback::from(move |()| show_reset.set(true))
}

pub fn build_cancel_reset(state: &AppState) -> Callback<()> {
    let show_reset = state.show_reset.clone();
    Callback::from(move |()| show_reset.set(false))
}

pub fn build_confirm_reset(state: &AppState) -> Callback<()> {
    let session = state.session.clone();
    let show_reset = state.show_reset.clone();
    Callback::from(move |()| {
        let mut next = (*session).clone();
        next.reset();
        session.set(next);
        show_reset.set(false);
        crate::a11y::set_status(&t("status.reset"));
    })
}

fn announce_download(file_name: &str, result: Result<(), wasm_bindgen::JsValue>) {
    match result {
        Ok(()) => {
            let mut vars = BTreeMap::new();
            vars.insert("file", file_name);
            crate::a11y::set_status(&tr("status.exported", Some(&vars)));
        }
        Err(err) => {
            let message = crate::dom::js_error_message(&err);
            log::error!("export of {file_name} failed: {message}");
            crate::dom::console_error(&message);
            crate::a11y::set_status(&t("status.export_failed"));
        }
    }
}

pub fn build_export_workbook(state: &AppState) -> Callback<()> {
    let session = state.session.clone();
    Callback::from(move |()| {
        let xml = session.workbook().to_spreadsheet_xml();
        let file_name = export_file_name(&crate::dom::today_iso(), "xls");
        let result = crate::dom::trigger_download(&file_name, WORKBOOK_MIME, &xml);
        announce_download(&file_name, result);
    })
}

pub fn build_export_json(state: &AppState) -> Callback<()> {
    let session = state.session.clone();
    Callback::from(move |()| {
        let report = ExportReport::new(crate::dom::now_iso(), session.records());
        let json = match report.to_json_pretty() {
            Ok(json) => json,
            Err(err) => {
                log::error!("failed to serialize export report: {err}");
                crate::a11y::set_status(&t("status.export_failed"));
                return;
            }
        };
        let file_name = export_file_name(&crate::dom::today_iso(), "json");
        let result = crate::dom::trigger_download(&file_name, JSON_MIME, &json);
        announce_download(&file_name, result);
    })
}

pub fn build_lang_change(state: &AppState) -> Callback<String> {
    let current_language = state.current_language.clone();
    Callback::from(move |code: String| {
        crate::i18n::set_lang(&code);
        current_language.set(crate::i18n::current_lang());
    })
}

pub fn build_preset_change(state: &AppState) -> Callback<Preset> {
    let session = state.session.clone();
    let preset = state.preset.clone();
    Callback::from(move |next_preset: Preset| {
        if next_preset == *preset {
            return;
        }
        crate::storage::save_preset(next_preset);
        let mut next = (*session).clone();
        next.reconfigure(next_preset.config());
        session.set(next);
        preset.set(next_preset);
    })
}
