use yew::prelude::*;

use crate::components::button::Button;
use crate::i18n::t;

pub const ADD_BUTTON_ID: &str = "add-staff-btn";
pub const RESET_BUTTON_ID: &str = "reset-btn";

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub on_add: Callback<()>,
    pub on_reset: Callback<()>,
    pub on_export: Callback<()>,
    pub on_export_json: Callback<()>,
    /// Exports are disabled while there is nothing to export.
    #[prop_or_default]
    pub has_records: bool,
}

fn relay(cb: &Callback<()>) -> Callback<MouseEvent> {
    let cb = cb.clone();
    Callback::from(move |_| cb.emit(()))
}

#[function_component(Toolbar)]
pub fn toolbar(p: &Props) -> Html {
    html! {
        <div class="toolbar" role="toolbar" aria-label={t("toolbar.label")}>
            <Button id={AttrValue::Static(ADD_BUTTON_ID)} class="btn btn-primary" label={t("toolbar.add")} onclick={relay(&p.on_add)} />
            <Button id={AttrValue::Static(RESET_BUTTON_ID)} class="btn btn-danger" label={t("toolbar.reset")} onclick={relay(&p.on_reset)} />
            <Button class="btn btn-secondary" label={t("toolbar.export")} disabled={!p.has_records} onclick={relay(&p.on_export)} />
            <Button class="btn btn-secondary" label={t("toolbar.export_json")} disabled={!p.has_records} onclick={relay(&p.on_export_json)} />
        </div>
    }
}
