use mistake_core::{Dashboard, Preset};
use yew::prelude::*;

use crate::storage::{BrowserStorage, saved_preset};

/// The dashboard session as held by the app.
pub type Session = Dashboard<BrowserStorage>;

#[derive(Clone)]
pub struct AppState {
    pub session: UseStateHandle<Session>,
    pub preset: UseStateHandle<Preset>,
    pub current_language: UseStateHandle<String>,
    pub show_reset: UseStateHandle<bool>,
}

/// Open the session from `localStorage` under the remembered preset.
#[must_use]
pub fn open_session(preset: Preset) -> Session {
    Dashboard::open(BrowserStorage::default(), preset.config())
}

#[hook]
pub fn use_app_state() -> AppState {
    let preset = use_state(saved_preset);
    let initial = *preset;
    AppState {
        session: use_state(move || open_session(initial)),
        preset,
        current_language: use_state(crate::i18n::current_lang),
        show_reset: use_state(|| false),
    }
}

impl AppState {
    #[must_use]
    pub fn has_records(&self) -> bool {
        !self.session.store().is_empty()
    }
}
