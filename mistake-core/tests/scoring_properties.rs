use mistake_core::score::SCORE_SCALE;
use mistake_core::{
    DecisionPolicy, DeductionCandidates, Preset, RecordField, RecordStore, ScoringConfig,
    average_score, resolve_final_amount, score_from_mistake_amount, score_from_mistake_count,
    weighted_score,
};

fn on_scale(score: f64) -> bool {
    SCORE_SCALE
        .iter()
        .any(|step| (step - score).abs() < f64::EPSILON)
}

#[test]
fn count_score_is_on_scale_and_non_decreasing() {
    let mut previous = 0.0;
    for count in 0..=50 {
        let score = score_from_mistake_count(count);
        assert!(on_scale(score), "count {count} -> {score}");
        assert!(score >= previous, "count {count} dropped to {score}");
        previous = score;
    }
}

#[test]
fn amount_score_is_non_decreasing_across_band_edges() {
    let probes = [
        0, 1, 99_999, 100_000, 100_001, 199_999, 200_000, 200_001, 499_999, 500_000, 500_001,
        1_999_999, 2_000_000, 2_000_001, 50_000_000, u64::MAX,
    ];
    let mut previous = 0.0;
    for amount in probes {
        let score = score_from_mistake_amount(amount);
        assert!(on_scale(score));
        assert!(score >= previous, "amount {amount} dropped to {score}");
        previous = score;
    }
}

#[test]
fn combined_scores_stay_in_unit_interval_for_every_preset() {
    for preset in Preset::ALL {
        let weighting = preset.config().weighting;
        for count in SCORE_SCALE {
            for amount in SCORE_SCALE {
                assert!((0.0..=1.0).contains(&average_score(count, amount)));
                assert!((0.0..=1.0).contains(&weighted_score(count, amount, weighting)));
            }
        }
    }
}

#[test]
fn resolver_handles_reference_candidates() {
    let candidates = DeductionCandidates {
        by_count: 100,
        by_amount: 400,
        average: 250,
        weighted: 300,
    };
    assert_eq!(DecisionPolicy::Maximum.resolve(&candidates), 400);
    assert_eq!(DecisionPolicy::Median.resolve(&candidates), 300);
    assert_eq!(DecisionPolicy::Minimum.resolve(&candidates), 100);
    assert_eq!(resolve_final_amount(&candidates, "no-such-policy"), 100);
    assert_eq!(
        resolve_final_amount(&candidates, "Maximum"),
        resolve_final_amount(&candidates, "maximum")
    );
}

#[test]
fn final_amount_is_one_of_the_candidates() {
    for preset in Preset::ALL {
        let mut store = RecordStore::new(preset.config());
        for (count, amount) in [(0, 0), (3, 600_000), (9, 150_000), (1, 3_000_000)] {
            let id = store.create();
            store.update(id, RecordField::MistakeCount, &count.to_string());
            store.update(id, RecordField::MistakeAmount, &amount.to_string());
            for policy in DecisionPolicy::ALL {
                store.update(id, RecordField::DecisionPolicy, policy.key());
                let record = store.get(id).unwrap();
                assert!(
                    record.deductions.as_array().contains(&record.final_amount),
                    "{preset} {policy}: {} not in {:?}",
                    record.final_amount,
                    record.deductions
                );
            }
        }
    }
}

#[test]
fn amount_focused_reference_scenario() {
    let mut store = RecordStore::new(Preset::AmountFocused.config());
    let id = store.create();
    store.update(id, RecordField::MistakeCount, "3");
    store.update(id, RecordField::MistakeAmount, "600000");
    let record = store.get(id).unwrap();
    assert!((record.count_score - 0.5).abs() < f64::EPSILON);
    assert!((record.amount_score - 0.8).abs() < f64::EPSILON);
    assert!((record.average_score - 0.65).abs() < f64::EPSILON);
    assert!((record.weighted_score - 0.71).abs() < f64::EPSILON);
}

#[test]
fn custom_config_from_json_drives_scoring() {
    let config = ScoringConfig::from_json(
        r#"{
            "countBands": {"min": 1, "lowMax": 1, "mediumMax": 3, "highMax": 4},
            "weighting": {"count": 0.5, "amount": 0.5},
            "defaultPolicy": "maximum"
        }"#,
    )
    .unwrap();
    let mut store = RecordStore::new(config);
    let id = store.create();
    store.update(id, RecordField::MistakeCount, "4");
    let record = store.get(id).unwrap();
    assert!((record.count_score - 0.8).abs() < f64::EPSILON);
    assert_eq!(record.decision_policy, DecisionPolicy::Maximum);
    assert_eq!(record.final_amount, 4_000_000);
}
