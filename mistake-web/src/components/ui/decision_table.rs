use std::collections::BTreeMap;

use mistake_core::{DecisionPolicy, RecordField, ScoreTone, StaffRecord};
use yew::prelude::*;

use super::FieldEdit;
use crate::i18n::{fmt_currency, fmt_score, t, tr};

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub records: Vec<StaffRecord>,
    pub on_edit: Callback<FieldEdit>,
}

fn score_cell(score: f64) -> Html {
    html! {
        <td><span class={classes!("score", ScoreTone::from_score(score).css_class())}>{ fmt_score(score) }</span></td>
    }
}

fn render_row(record: &StaffRecord, on_edit: &Callback<FieldEdit>) -> Html {
    let id = record.id;
    let on_policy = {
        let on_edit = on_edit.clone();
        Callback::from(move |e: Event| {
            if let Some(select) = e.target_dyn_into::<web_sys::HtmlSelectElement>() {
                on_edit.emit((id, RecordField::DecisionPolicy, select.value()));
            }
        })
    };
    let mut vars = BTreeMap::new();
    vars.insert("name", record.display_name());
    let policy_label = tr("decision.policy_label", Some(&vars));
    let candidates = &record.deductions;

    html! {
        <tr key={id} data-record-id={id.to_string()}>
            <th scope="row">{ record.display_name() }</th>
            { score_cell(record.count_score) }
            { score_cell(record.amount_score) }
            { score_cell(record.average_score) }
            { score_cell(record.weighted_score) }
            <td class="amount">{ fmt_currency(candidates.by_count) }</td>
            <td class="amount">{ fmt_currency(candidates.by_amount) }</td>
            <td class="amount">{ fmt_currency(candidates.average) }</td>
            <td class="amount">{ fmt_currency(candidates.weighted) }</td>
            <td>
                <select
                    class="policy-select"
                    data-field={RecordField::DecisionPolicy.key()}
                    aria-label={policy_label}
                    onchange={on_policy}
                >
                    { for DecisionPolicy::ALL.iter().map(|policy| html! {
                        <option value={policy.key()} selected={*policy == record.decision_policy}>
                            { t(policy.i18n_key()) }
                        </option>
                    }) }
                </select>
            </td>
            <td class="amount final-amount"><strong>{ fmt_currency(record.final_amount) }</strong></td>
        </tr>
    }
}

#[function_component(DecisionTable)]
pub fn decision_table(p: &Props) -> Html {
    if p.records.is_empty() {
        return Html::default();
    }
    html! {
        <section class="panel decision-panel" aria-labelledby="decision-title">
            <h2 id="decision-title">{ t("decision.title") }</h2>
            <table class="table decision-table">
                <thead>
                    <tr>
                        <th scope="col">{ t("decision.name") }</th>
                        <th scope="col">{ t("decision.count_score") }</th>
                        <th scope="col">{ t("decision.amount_score") }</th>
                        <th scope="col">{ t("decision.average_score") }</th>
                        <th scope="col">{ t("decision.weighted_score") }</th>
                        <th scope="col">{ t("decision.by_count") }</th>
                        <th scope="col">{ t("decision.by_amount") }</th>
                        <th scope="col">{ t("decision.by_average") }</th>
                        <th scope="col">{ t("decision.by_weighted") }</th>
                        <th scope="col">{ t("decision.policy") }</th>
                        <th scope="col">{ t("decision.final") }</th>
                    </tr>
                </thead>
                <tbody>
                    { for p.records.iter().map(|record| render_row(record, &p.on_edit)) }
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

    #[test]
    fn hidden_without_records() {
        let props = Props {
            records: Vec::new(),
            on_edit: Callback::noop(),
        };
        let html = block_on(LocalServerRenderer::<DecisionTable>::with_props(props).render());
        assert!(!html.contains("decision-table"));
    }

    #[test]
    fn renders_candidates_policy_and_final() {
        crate::i18n::set_lang("en");
        let mut store = RecordStore::new(Preset::AmountFocused.config());
        let id = store.create();
        store.update(id, RecordField::MistakeCount, "3");
        store.update(id, RecordField::MistakeAmount, "600000");
        store.update(id, RecordField::DecisionPolicy, "median");
        let props = Props {
            records: store.records().to_vec(),
            on_edit: Callback::noop(),
        };
        let html = block_on(LocalServerRenderer::<DecisionTable>::with_props(props).render());
        assert!(html.contains("Unnamed Staff"));
        assert!(html.contains("Rp 500.000"));
        assert!(html.contains("Rp 800.000"));
        assert!(html.contains("Rp 650.000"));
        assert!(html.contains("Rp 710.000"));
        assert!(html.contains("0.65"));
        assert_eq!(html.matches("selected").count(), 1);
    }
}
