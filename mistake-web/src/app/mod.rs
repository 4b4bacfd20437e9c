mod handlers;
mod state;

pub use handlers::AppHandlers;
pub use state::{AppState, Session, open_session, use_app_state};

use crate::a11y::STATUS_REGION_ID;
use crate::components::button::Button;
use crate::components::footer::Footer;
use crate::components::header::Header;
use crate::components::modal::Modal;
use crate::components::ui::decision_table::DecisionTable;
use crate::components::ui::staff_table::StaffTable;
use crate::components::ui::summary_panel::SummaryPanel;
use crate::components::ui::toolbar::{RESET_BUTTON_ID, Toolbar};
use crate::i18n::t;
use yew::prelude::*;

/// Main application component: the whole single-page dashboard.
#[function_component(App)]
pub fn app() -> Html {
    let state = use_app_state();
    render_app(&state)
}

fn relay(cb: &Callback<()>) -> Callback<MouseEvent> {
    let cb = cb.clone();
    Callback::from(move |_| cb.emit(()))
}

pub fn render_app(state: &AppState) -> Html {
    let handlers = AppHandlers::new(state);
    let records = state.session.records().to_vec();
    let summary = state.session.summary();

    html! {
        <>
            <Header
                on_lang_change={handlers.lang_change.clone()}
                current_lang={(*state.current_language).clone()}
                on_preset_change={handlers.preset_change.clone()}
                preset={*state.preset}
            />
            <main id="main" role="main">
                <style>{ crate::a11y::visible_focus_css() }</style>
                <div id={STATUS_REGION_ID} class="sr-only" role="status" aria-live="polite"></div>
                <Toolbar
                    on_add={handlers.add.clone()}
                    on_reset={handlers.request_reset.clone()}
                    on_export={handlers.export_workbook.clone()}
                    on_export_json={handlers.export_json.clone()}
                    has_records={state.has_records()}
                />
                <StaffTable
                    records={records.clone()}
                    on_edit={handlers.edit.clone()}
                    on_delete={handlers.delete.clone()}
                    on_name_enter={handlers.name_enter.clone()}
                />
                <DecisionTable records={records} on_edit={handlers.edit.clone()} />
                <SummaryPanel {summary} />
                <Modal
                    id="reset-confirm"
                    open={*state.show_reset}
                    title={t("reset.title")}
                    description={Some(AttrValue::from(t("reset.description")))}
                    on_close={handlers.cancel_reset.clone()}
                    return_focus_id={Some(AttrValue::Static(RESET_BUTTON_ID))}
                >
                    <div class="modal__actions">
                        <Button class="btn btn-secondary" label={t("reset.cancel")} onclick={relay(&handlers.cancel_reset)} />
                        <Button id={AttrValue::Static("reset-confirm-btn")} class="btn btn-danger" label={t("reset.confirm")} onclick={relay(&handlers.confirm_reset)} />
                    </div>
                </Modal>
            </main>
            <Footer />
        </>
    }
}
