use mistake_core::Summary;
use yew::prelude::*;

use crate::i18n::{fmt_currency, t};

#[derive(Properties, PartialEq, Clone, Copy)]
pub struct Props {
    pub summary: Summary,
}

#[function_component(SummaryPanel)]
pub fn summary_panel(p: &Props) -> Html {
    let Summary {
        count,
        total,
        average,
    } = p.summary;
    html! {
        <section class="panel summary-panel" aria-labelledby="summary-title">
            <h2 id="summary-title">{ t("summary.title") }</h2>
            <dl class="stats">
                <div class="stat" id="summary-count">
                    <dt>{ t("summary.count") }</dt>
                    <dd>{ count }</dd>
                </div>
                <div class="stat" id="summary-total">
                    <dt>{ t("summary.total") }</dt>
                    <dd>{ fmt_currency(total) }</dd>
                </div>
                <div class="stat" id="summary-average">
                    <dt>{ t("summary.average") }</dt>
                    <dd>{ fmt_currency(average) }</dd>
                </div>
            </dl>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use yew::LocalServerRenderer;

    #[test]
    fn renders_totals_as_rupiah() {
        crate::i18n::set_lang("en");
        let props = Props {
            summary: Summary {
                count: 2,
                total: 500_000,
                average: 250_000,
            },
        };
        let html = block_on(LocalServerRenderer::<SummaryPanel>::with_props(props).render());
        assert!(html.contains("Rp 500.000"));
        assert!(html.contains("Rp 250.000"));
        assert!(html.contains("Staff evaluated"));
    }
}
