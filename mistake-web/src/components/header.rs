use crate::i18n::{locales, t};
use mistake_core::Preset;
use wasm_bindgen::JsCast;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub on_lang_change: Callback<String>,
    pub current_lang: String,
    pub on_preset_change: Callback<Preset>,
    pub preset: Preset,
}

fn select_value(e: &web_sys::Event) -> Option<String> {
    e.target()
        .and_then(|t| t.dyn_into::<web_sys::HtmlSelectElement>().ok())
        .map(|sel| sel.value())
}

#[function_component(Header)]
pub fn header(p: &Props) -> Html {
    let on_lang = {
        let cb = p.on_lang_change.clone();
        Callback::from(move |e: web_sys::Event| {
            if let Some(code) = select_value(&e) {
                cb.emit(code);
            }
        })
    };
    let on_preset = {
        let cb = p.on_preset_change.clone();
        Callback::from(move |e: web_sys::Event| {
            if let Some(preset) = select_value(&e).and_then(|v| Preset::parse(&v)) {
                cb.emit(preset);
            }
        })
    };
    html! {
        <header role="banner">
            <a href="#main" class="sr-only">{ t("ui.skip_to_content") }</a>
            <div class="header-content">
                <div class="header-left">
                    <h1>{ t("app.title") }</h1>
                    <p class="subtitle">{ t("app.subtitle") }</p>
                </div>
                <nav class="header-right" aria-label={t("nav.language")}>
                    <label for="lang-select" class="sr-only">{ t("nav.language") }</label>
                    <select id="lang-select" onchange={on_lang} aria-label={t("nav.language")}>
                        { for locales().iter().map(|meta| html! {
                            <option value={meta.code} selected={meta.code == p.current_lang}>{ meta.name }</option>
                        }) }
                    </select>
                    <label for="preset-select" class="sr-only">{ t("nav.preset") }</label>
                    <select id="preset-select" onchange={on_preset} aria-label={t("nav.preset")}>
                        { for Preset::ALL.iter().map(|preset| html! {
                            <option value={preset.key()} selected={*preset == p.preset}>{ t(preset.i18n_key()) }</option>
                        }) }
                    </select>
                </nav>
            </div>
        </header>
    }
}
