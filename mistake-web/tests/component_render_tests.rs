use futures::executor::block_on;
use mistake_core::Preset;
use mistake_web::components::footer::Footer;
use mistake_web::components::header::Header;
use mistake_web::components::modal::Modal;
use yew::html::ChildrenRenderer;
use yew::{AttrValue, Callback, LocalServerRenderer};

#[test]
fn header_renders_language_and_preset_selectors() {
    mistake_web::i18n::set_lang("en");
    let props = mistake_web::components::header::Props {
        on_lang_change: Callback::noop(),
        current_lang: "en".to_string(),
        on_preset_change: Callback::noop(),
        preset: Preset::AmountFocused,
    };
    let html = block_on(LocalServerRenderer::<Header>::with_props(props).render());
    assert!(html.contains("lang-select"));
    assert!(html.contains("preset-select"));
    assert!(html.contains("Bahasa Indonesia"));
    assert!(html.contains("amount-focused"));
}

#[test]
fn header_follows_active_language() {
    mistake_web::i18n::set_lang("id");
    let props = mistake_web::components::header::Props {
        on_lang_change: Callback::noop(),
        current_lang: "id".to_string(),
        on_preset_change: Callback::noop(),
        preset: Preset::Standard,
    };
    let html = block_on(LocalServerRenderer::<Header>::with_props(props).render());
    assert!(html.contains("Dasbor Potongan Kesalahan"));
    mistake_web::i18n::set_lang("en");
}

#[test]
fn footer_renders_copy() {
    mistake_web::i18n::set_lang("en");
    let html = block_on(LocalServerRenderer::<Footer>::new().render());
    assert!(html.contains("<footer>"));
}

#[test]
fn modal_renders_when_open_and_skips_when_closed() {
    mistake_web::i18n::set_lang("en");
    let open_props = mistake_web::components::modal::Props {
        id: AttrValue::from("confirm"),
        open: true,
        title: AttrValue::from("Reset?"),
        description: Some(AttrValue::from("Everything goes")),
        on_close: Callback::noop(),
        return_focus_id: None,
        children: ChildrenRenderer::default(),
    };
    let html = block_on(LocalServerRenderer::<Modal>::with_props(open_props).render());
    assert!(html.contains("confirm-dialog"));
    assert!(html.contains("confirm-desc"));
    assert!(html.contains("Everything goes"));

    let closed_props = mistake_web::components::modal::Props {
        id: AttrValue::from("confirm"),
        open: false,
        title: AttrValue::from("Reset?"),
        description: None,
        on_close: Callback::noop(),
        return_focus_id: None,
        children: ChildrenRenderer::default(),
    };
    let html = block_on(LocalServerRenderer::<Modal>::with_props(closed_props).render());
    assert!(!html.contains("modal-backdrop"));
}
