use std::collections::BTreeMap;

use mistake_core::numbers::coerce_non_negative;
use mistake_core::{RecordField, ScoreTone, StaffRecord, format_thousands, parse_currency};
use yew::prelude::*;

use super::{FieldEdit, name_input_id};
use crate::i18n::{fmt_currency, fmt_score, t, tr};

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub records: Vec<StaffRecord>,
    pub on_edit: Callback<FieldEdit>,
    pub on_delete: Callback<u64>,
    /// Enter in a non-empty name field: commit the name, then add a row.
    pub on_name_enter: Callback<(u64, String)>,
}

/// What a numeric input should show once `raw` has been coerced.
///
/// A controlled input keeps the typed text when the coerced value equals the
/// stored one, so the edit handler writes this back itself.
fn normalized_input(field: RecordField, raw: &str) -> Option<String> {
    match field {
        RecordField::MistakeCount => Some(coerce_non_negative(raw).to_string()),
        RecordField::MistakeAmount => Some(format_thousands(parse_currency(raw))),
        RecordField::Name | RecordField::DecisionPolicy => None,
    }
}

fn edit_callback(on_edit: &Callback<FieldEdit>, id: u64, field: RecordField) -> Callback<Event> {
    let on_edit = on_edit.clone();
    Callback::from(move |e: Event| {
        let Some(input) = e.target_dyn_into::<web_sys::HtmlInputElement>() else {
            return;
        };
        let value = input.value();
        if let Some(shown) = normalized_input(field, &value) {
            input.set_value(&shown);
        }
        on_edit.emit((id, field, value));
    })
}

fn score_cell(score: f64) -> Html {
    let class = classes!("score", ScoreTone::from_score(score).css_class());
    html! { <td><span {class}>{ fmt_score(score) }</span></td> }
}

fn render_row(record: &StaffRecord, p: &Props) -> Html {
    let id = record.id;
    let on_name_keydown = {
        let on_name_enter = p.on_name_enter.clone();
        Callback::from(move |e: KeyboardEvent| {
            if e.key() != "Enter" {
                return;
            }
            let Some(input) = e.target_dyn_into::<web_sys::HtmlInputElement>() else {
                return;
            };
            let name = input.value();
            if name.trim().is_empty() {
                return;
            }
            e.prevent_default();
            on_name_enter.emit((id, name));
        })
    };
    let on_delete = {
        let cb = p.on_delete.clone();
        Callback::from(move |_| cb.emit(id))
    };
    let mut vars = BTreeMap::new();
    vars.insert("name", record.display_name());
    let delete_label = tr("staff.delete_label", Some(&vars));

    html! {
        <tr key={id} data-record-id={id.to_string()}>
            <td>
                <input
                    id={name_input_id(id)}
                    type="text"
                    class="input-name"
                    data-field={RecordField::Name.key()}
                    placeholder={t("staff.name_placeholder")}
                    aria-label={t("staff.name")}
                    value={record.name.clone()}
                    onchange={edit_callback(&p.on_edit, id, RecordField::Name)}
                    onkeydown={on_name_keydown}
                />
            </td>
            <td>
                <input
                    type="number"
                    min="0"
                    step="1"
                    class="input-count"
                    data-field={RecordField::MistakeCount.key()}
                    aria-label={t("staff.count")}
                    value={record.mistake_count.to_string()}
                    onchange={edit_callback(&p.on_edit, id, RecordField::MistakeCount)}
                />
            </td>
            <td>
                <input
                    type="text"
                    inputmode="numeric"
                    class="input-amount"
                    data-field={RecordField::MistakeAmount.key()}
                    aria-label={t("staff.amount")}
                    value={format_thousands(record.mistake_amount)}
                    onchange={edit_callback(&p.on_edit, id, RecordField::MistakeAmount)}
                />
            </td>
            { score_cell(record.count_score) }
            { score_cell(record.amount_score) }
            { score_cell(record.average_score) }
            { score_cell(record.weighted_score) }
            <td class="amount">{ fmt_currency(record.deductions.weighted) }</td>
            <td>
                <button type="button" class="btn btn-danger btn-sm" aria-label={delete_label} onclick={on_delete}>
                    { t("staff.delete") }
                </button>
            </td>
        </tr>
    }
}

#[function_component(StaffTable)]
pub fn staff_table(p: &Props) -> Html {
    html! {
        <section class="panel staff-panel" aria-labelledby="staff-title">
            <h2 id="staff-title">{ t("staff.title") }</h2>
            <table class="table staff-table">
                <thead>
                    <tr>
                        <th scope="col">{ t("staff.name") }</th>
                        <th scope="col">{ t("staff.count") }</th>
                        <th scope="col">{ t("staff.amount") }</th>
                        <th scope="col">{ t("staff.count_score") }</th>
                        <th scope="col">{ t("staff.amount_score") }</th>
                        <th scope="col">{ t("staff.average_score") }</th>
                        <th scope="col">{ t("staff.weighted_score") }</th>
                        <th scope="col">{ t("staff.weighted_deduction") }</th>
                        <th scope="col">{ t("staff.actions") }</th>
                    </tr>
                </thead>
                <tbody>
                    if p.records.is_empty() {
                        <tr class="empty-row"><td colspan="9">{ t("staff.empty") }</td></tr>
                    } else {
                        { for p.records.iter().map(|record| render_row(record, p)) }
                    }
                </tbody>
            </table>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use mistake_core::{Preset, RecordStore};
    use yew::LocalServerRenderer;

    fn props(records: Vec<StaffRecord>) -> Props {
        Props {
            records,
            on_edit: Callback::noop(),
            on_delete: Callback::noop(),
            on_name_enter: Callback::noop(),
        }
    }

    #[test]
    fn empty_table_shows_placeholder_row() {
        crate::i18n::set_lang("en");
        let html = block_on(LocalServerRenderer::<StaffTable>::with_props(props(vec![])).render());
        assert!(html.contains("empty-row"));
        assert!(html.contains("No staff yet"));
    }

    #[test]
    fn rows_render_inputs_scores_and_weighted_deduction() {
        crate::i18n::set_lang("en");
        let mut store = RecordStore::new(Preset::Standard.config());
        let id = store.create();
        store.update(id, RecordField::Name, "Ayu");
        store.update(id, RecordField::MistakeCount, "3");
        store.update(id, RecordField::MistakeAmount, "600000");
        let html = block_on(
            LocalServerRenderer::<StaffTable>::with_props(props(store.records().to_vec())).render(),
        );
        assert!(html.contains("name-input-1"));
        assert!(html.contains("data-field=\"mistakeAmount\""));
        assert!(html.contains("value=\"600.000\""));
        assert!(html.contains("score-fair"));
        assert!(html.contains("score-good"));
        assert!(html.contains("Average score"));
        assert!(html.contains("Weighted score"));
        assert!(html.contains(">0.65<"));
        assert!(html.contains(">0.62<"));
        assert!(html.contains("Rp 3.100.000"));
        assert!(html.contains("Delete Ayu"));
    }

    #[test]
    fn numeric_inputs_show_the_coerced_value() {
        assert_eq!(
            normalized_input(RecordField::MistakeCount, "-3").as_deref(),
            Some("0")
        );
        assert_eq!(
            normalized_input(RecordField::MistakeCount, " 4.7").as_deref(),
            Some("4")
        );
        assert_eq!(
            normalized_input(RecordField::MistakeAmount, "Rp 1250000").as_deref(),
            Some("1.250.000")
        );
        assert_eq!(
            normalized_input(RecordField::MistakeAmount, "abc").as_deref(),
            Some("0")
        );
        assert_eq!(normalized_input(RecordField::Name, " Ayu "), None);
    }
}
