use anyhow::{Context, Result, ensure};

use super::{LogicScenario, ScenarioCtx};
use mistake_core::score::SCORE_SCALE;
use mistake_core::{
    Dashboard, DecisionPolicy, DeductionCandidates, MemoryStorage, RecordField, RecordStore,
    StaffRecord, Workbook, average_score, resolve_final_amount, sheet_to_csv, summarize,
    weighted_score,
};

const SCORE_EPSILON: f64 = 1e-9;

pub fn catalog_scenarios() -> Vec<LogicScenario> {
    vec![
        LogicScenario::new(
            "smoke",
            "Smoke",
            "Create, edit and summarize a single record",
            smoke_expectation,
        ),
        LogicScenario::new(
            "worked-example",
            "Worked Example",
            "3 mistakes worth 600,000 score 0.5 / 0.8 / 0.65 with preset weighting",
            worked_example_expectation,
        ),
        LogicScenario::new(
            "score-bands",
            "Score Band Monotonicity",
            "Base scores stay on the discrete scale and never decrease with input",
            score_bands_expectation,
        ),
        LogicScenario::new(
            "aggregate-bounds",
            "Aggregate Score Bounds",
            "Average and weighted scores stay within [0, 1]",
            aggregate_bounds_expectation,
        ),
        LogicScenario::new(
            "resolver-reference",
            "Decision Resolver Reference",
            "Candidates {100, 400, 250, 300} resolve per policy; unknown labels pick the minimum",
            resolver_reference_expectation,
        ),
        LogicScenario::new(
            "final-is-candidate",
            "Final Amount Is A Candidate",
            "Every policy picks one of the record's four candidates",
            final_is_candidate_expectation,
        ),
        LogicScenario::new(
            "persistence-roundtrip",
            "Persistence Round Trip",
            "Records reload from storage with identical derived fields",
            persistence_expectation,
        ),
        LogicScenario::new(
            "deletion-totals",
            "Deletion Totals",
            "Deleting records removes them from the totals down to zero",
            deletion_totals_expectation,
        ),
        LogicScenario::new(
            "summary-reference",
            "Summary Reference",
            "Finals 200,000 and 300,000 total 500,000 with average 250,000",
            summary_reference_expectation,
        ),
        LogicScenario::new(
            "export-projection",
            "Export Projection",
            "Workbook sheets and CSV output carry one row per record",
            export_projection_expectation,
        ),
    ]
}

/// Store filled with one record per sweep input.
fn populated_store(ctx: &ScenarioCtx) -> RecordStore {
    let mut store = RecordStore::new(ctx.config.clone());
    for (index, (count, amount)) in ctx.sweep_inputs().into_iter().enumerate() {
        let id = store.create();
        store.update(id, RecordField::Name, &format!("Staff {}", index + 1));
        store.update(id, RecordField::MistakeCount, &count.to_string());
        store.update(id, RecordField::MistakeAmount, &amount.to_string());
        let policy = DecisionPolicy::ALL[index % DecisionPolicy::ALL.len()];
        store.update(id, RecordField::DecisionPolicy, policy.key());
    }
    store
}

fn on_scale(score: f64) -> bool {
    SCORE_SCALE
        .iter()
        .any(|step| (step - score).abs() < SCORE_EPSILON)
}

fn smoke_expectation(ctx: &ScenarioCtx) -> Result<()> {
    let mut dashboard = Dashboard::open(MemoryStorage::default(), ctx.config.clone());
    let id = dashboard.create();
    ensure!(id == 1, "first record id should be 1, got {id}");
    ensure!(
        dashboard.update(id, RecordField::Name, "Smoke Test"),
        "name edit should apply"
    );
    dashboard.update(id, RecordField::MistakeCount, "4");
    dashboard.update(id, RecordField::MistakeAmount, "250000");

    let summary = dashboard.summary();
    ensure!(summary.count == 1, "summary should count one record");
    let record = dashboard
        .records()
        .first()
        .context("record should exist after create")?;
    ensure!(
        summary.total == record.final_amount,
        "total {} should equal the only final {}",
        summary.total,
        record.final_amount
    );
    Ok(())
}

fn worked_example_expectation(ctx: &ScenarioCtx) -> Result<()> {
    let mut store = RecordStore::new(ctx.config.clone());
    let id = store.create();
    store.update(id, RecordField::MistakeCount, "3");
    store.update(id, RecordField::MistakeAmount, "600000");
    let record = store.get(id).context("worked example record missing")?;

    ensure!((record.count_score - 0.5).abs() < SCORE_EPSILON, "count score {}", record.count_score);
    ensure!((record.amount_score - 0.8).abs() < SCORE_EPSILON, "amount score {}", record.amount_score);
    ensure!(
        (record.average_score - 0.65).abs() < SCORE_EPSILON,
        "average score {}",
        record.average_score
    );
    let weighting = ctx.config.weighting;
    let expected = 0.5f64.mul_add(weighting.count, 0.8 * weighting.amount);
    ensure!(
        (record.weighted_score - expected).abs() < 0.005 + SCORE_EPSILON,
        "weighted score {} expected {expected:.2}",
        record.weighted_score
    );
    Ok(())
}

fn score_bands_expectation(ctx: &ScenarioCtx) -> Result<()> {
    let mut inputs = ctx.sweep_inputs();
    inputs.sort_unstable();
    let count_scores: Vec<f64> = inputs
        .iter()
        .map(|(count, _)| ctx.config.count_bands.score(*count))
        .collect();
    ensure!(
        count_scores.iter().copied().all(on_scale),
        "count scores left the scale: {count_scores:?}"
    );
    ensure!(
        count_scores.windows(2).all(|w| w[0] <= w[1]),
        "count scores decreased: {count_scores:?}"
    );

    let mut amounts: Vec<u64> = inputs.iter().map(|(_, amount)| *amount).collect();
    amounts.sort_unstable();
    let amount_scores: Vec<f64> = amounts
        .iter()
        .map(|amount| ctx.config.amount_bands.score(*amount))
        .collect();
    ensure!(
        amount_scores.iter().copied().all(on_scale),
        "amount scores left the scale: {amount_scores:?}"
    );
    ensure!(
        amount_scores.windows(2).all(|w| w[0] <= w[1]),
        "amount scores decreased over {amounts:?}: {amount_scores:?}"
    );
    Ok(())
}

fn aggregate_bounds_expectation(ctx: &ScenarioCtx) -> Result<()> {
    for (count, amount) in ctx.sweep_inputs() {
        let count_score = ctx.config.count_bands.score(count);
        let amount_score = ctx.config.amount_bands.score(amount);
        let average = average_score(count_score, amount_score);
        let weighted = weighted_score(count_score, amount_score, ctx.config.weighting);
        ensure!(
            (0.0..=1.0).contains(&average),
            "average {average} out of range for ({count}, {amount})"
        );
        ensure!(
            (0.0..=1.0).contains(&weighted),
            "weighted {weighted} out of range for ({count}, {amount})"
        );
    }
    Ok(())
}

fn resolver_reference_expectation(_ctx: &ScenarioCtx) -> Result<()> {
    let candidates = DeductionCandidates {
        by_count: 100,
        by_amount: 400,
        average: 250,
        weighted: 300,
    };
    let expected = [
        ("minimum", 100),
        ("maximum", 400),
        ("median", 300),
        ("average", 250),
        ("weighted", 300),
        ("count", 100),
        ("amount", 400),
        ("no-such-policy", 100),
        ("", 100),
    ];
    for (label, want) in expected {
        let got = resolve_final_amount(&candidates, label);
        ensure!(got == want, "policy '{label}' resolved {got}, expected {want}");
        ensure!(
            resolve_final_amount(&candidates, label) == got,
            "policy '{label}' is not deterministic"
        );
    }
    Ok(())
}

fn final_is_candidate_expectation(ctx: &ScenarioCtx) -> Result<()> {
    let store = populated_store(ctx);
    for record in store.records() {
        let candidates = record.deductions.as_array();
        for policy in DecisionPolicy::ALL {
            let resolved = policy.resolve(&record.deductions);
            ensure!(
                candidates.contains(&resolved),
                "{policy} picked {resolved} outside {candidates:?} for record {}",
                record.id
            );
        }
        ensure!(
            record.final_amount == record.decision_policy.resolve(&record.deductions),
            "record {} final {} disagrees with its policy {}",
            record.id,
            record.final_amount,
            record.decision_policy
        );
    }
    Ok(())
}

fn persistence_expectation(ctx: &ScenarioCtx) -> Result<()> {
    let storage = MemoryStorage::default();
    let mut dashboard = Dashboard::open(storage.clone(), ctx.config.clone());
    for (count, amount) in ctx.sweep_inputs() {
        let id = dashboard.create();
        dashboard.update(id, RecordField::MistakeCount, &count.to_string());
        dashboard.update(id, RecordField::MistakeAmount, &amount.to_string());
        dashboard.update(id, RecordField::DecisionPolicy, "median");
    }

    let reopened = Dashboard::open(storage, ctx.config.clone());
    ensure!(
        reopened.records() == dashboard.records(),
        "reloaded records differ from the saved ones"
    );
    ensure!(
        reopened.store().next_id() == dashboard.store().next_id(),
        "next id drifted across reload"
    );
    ensure!(reopened.summary() == dashboard.summary(), "summary drifted across reload");
    Ok(())
}

fn deletion_totals_expectation(ctx: &ScenarioCtx) -> Result<()> {
    let mut store = populated_store(ctx);
    let ids: Vec<u64> = store.records().iter().map(|record| record.id).collect();
    let mut previous = summarize(store.records());
    for id in ids {
        let removed = store.get(id).map_or(0, |record| record.final_amount);
        ensure!(store.delete(id), "record {id} should delete");
        let current = summarize(store.records());
        ensure!(
            current.count + 1 == previous.count,
            "count did not drop after deleting {id}"
        );
        ensure!(
            current.total + removed == previous.total,
            "total did not drop by {removed} after deleting {id}"
        );
        previous = current;
    }
    ensure!(
        previous.count == 0 && previous.total == 0 && previous.average == 0,
        "empty store should summarize to zero, got {previous:?}"
    );
    Ok(())
}

fn summary_reference_expectation(ctx: &ScenarioCtx) -> Result<()> {
    let records: Vec<StaffRecord> = [200_000, 300_000]
        .into_iter()
        .zip(1..)
        .map(|(final_amount, id)| {
            let mut record = StaffRecord::new(id, &ctx.config);
            record.final_amount = final_amount;
            record
        })
        .collect();
    let summary = summarize(&records);
    ensure!(summary.count == 2, "count {}", summary.count);
    ensure!(summary.total == 500_000, "total {}", summary.total);
    ensure!(summary.average == 250_000, "average {}", summary.average);

    let empty = summarize(&[]);
    ensure!(
        empty.count == 0 && empty.total == 0 && empty.average == 0,
        "empty summary should be zero, got {empty:?}"
    );
    Ok(())
}

fn export_projection_expectation(ctx: &ScenarioCtx) -> Result<()> {
    let store = populated_store(ctx);
    let workbook = Workbook::from_records(store.records());
    ensure!(workbook.sheets.len() == 2, "expected two sheets");
    for sheet in &workbook.sheets {
        ensure!(
            sheet.rows.len() == store.len(),
            "sheet {} has {} rows for {} records",
            sheet.name,
            sheet.rows.len(),
            store.len()
        );
        let csv = sheet_to_csv(sheet).with_context(|| format!("csv for sheet {}", sheet.name))?;
        ensure!(
            csv.lines().count() == store.len() + 1,
            "csv for sheet {} should have a header plus one line per record",
            sheet.name
        );
    }
    let xml = workbook.to_spreadsheet_xml();
    ensure!(
        xml.contains("ss:Name=\"Scores\"") && xml.contains("ss:Name=\"Decisions\""),
        "spreadsheet xml is missing a worksheet"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mistake_core::Preset;

    #[test]
    fn every_scenario_passes_for_every_preset() {
        for scenario in catalog_scenarios() {
            for preset in Preset::ALL {
                for seed in [1, 42, 1337] {
                    let ctx = ScenarioCtx::new(preset, seed);
                    if let Err(err) = scenario.check(&ctx) {
                        panic!("{} failed for {preset} seed {seed}: {err:#}", scenario.key());
                    }
                }
            }
        }
    }

    #[test]
    fn scenario_keys_are_unique() {
        let mut keys: Vec<_> = catalog_scenarios().iter().map(LogicScenario::key).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), catalog_scenarios().len());
    }
}
