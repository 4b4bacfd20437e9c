use mistake_core::{
    Dashboard, MemoryStorage, Preset, RecordCollection, RecordField, RecordStore, ScoringConfig,
    SnapshotStorage, Summary, decode_snapshot, encode_snapshot, summarize,
};

fn staffed_store(config: ScoringConfig) -> RecordStore {
    let mut store = RecordStore::new(config);
    for (name, count, amount, policy) in [
        ("Ayu", "2", "150000", "maximum"),
        ("Budi", "6", "450000", "median"),
        ("Citra", "0", "0", "minimum"),
    ] {
        let id = store.create();
        store.update(id, RecordField::Name, name);
        store.update(id, RecordField::MistakeCount, count);
        store.update(id, RecordField::MistakeAmount, amount);
        store.update(id, RecordField::DecisionPolicy, policy);
    }
    store
}

#[test]
fn save_then_load_reproduces_derived_fields() {
    for preset in Preset::ALL {
        let store = staffed_store(preset.config());
        let text = encode_snapshot(store.snapshot()).unwrap();

        let mut reloaded = RecordStore::new(preset.config());
        reloaded.load_snapshot(decode_snapshot(&text).unwrap());
        assert_eq!(reloaded.records(), store.records(), "{preset}");
        assert_eq!(reloaded.next_id(), store.next_id());
    }
}

#[test]
fn deleting_records_shrinks_totals_down_to_zero() {
    let mut store = staffed_store(ScoringConfig::default());
    let before = summarize(store.records());
    assert_eq!(before.count, 3);

    let ayu = store.records()[0].clone();
    assert!(store.delete(ayu.id));
    let after = summarize(store.records());
    assert_eq!(after.count, 2);
    assert_eq!(after.total, before.total - ayu.final_amount);

    let ids: Vec<_> = store.records().iter().map(|r| r.id).collect();
    for id in ids {
        store.delete(id);
    }
    assert_eq!(
        summarize(store.records()),
        Summary {
            count: 0,
            total: 0,
            average: 0
        }
    );
}

#[test]
fn legacy_browser_array_loads_and_is_rescored() {
    let legacy = r#"[
        {"id":1,"name":"Dedi","mistakeTxn":3,"mistakeAmount":600000,
         "txnScore":0.5,"amountScore":0.8,"averageScore":"0.65","weightedScore":"0.71",
         "deduction":999,"decision":"Maximum"},
        {"id":4,"name":"","mistakeTxn":0,"mistakeAmount":0,
         "txnScore":0,"amountScore":0,"averageScore":"0.00","weightedScore":"0.00",
         "deduction":0,"decision":"Minimum"}
    ]"#;
    let storage = MemoryStorage::with_raw(legacy);
    let mut dashboard = Dashboard::open(storage.clone(), Preset::AmountFocused.config());
    assert_eq!(dashboard.records().len(), 2);
    assert_eq!(dashboard.records()[0].final_amount, 800_000);
    assert_eq!(dashboard.create(), 5);

    let upgraded: RecordCollection = storage.load().unwrap().unwrap();
    assert_eq!(upgraded.next_id, 6);
    assert!(storage.raw().unwrap().contains("\"checksum\""));
}

#[test]
fn negative_legacy_inputs_do_not_discard_stored_records() {
    let legacy = r#"[
        {"id":1,"name":"Dedi","mistakeTxn":3,"mistakeAmount":600000},
        {"id":2,"name":"Eka","mistakeTxn":-3,"mistakeAmount":-150000}
    ]"#;
    let storage = MemoryStorage::with_raw(legacy);
    let mut dashboard = Dashboard::open(storage.clone(), Preset::AmountFocused.config());
    assert_eq!(dashboard.records().len(), 2);
    assert_eq!(dashboard.records()[1].mistake_count, 0);
    assert_eq!(dashboard.records()[1].mistake_amount, 0);
    assert_eq!(dashboard.records()[1].final_amount, 0);

    assert_eq!(dashboard.create(), 3);
    let stored: RecordCollection = storage.load().unwrap().unwrap();
    assert_eq!(stored.records.len(), 3);
    assert_eq!(stored.records[0].name, "Dedi");
    assert_eq!(stored.records[0].mistake_amount, 600_000);
}

#[test]
fn reconfigure_persists_rescored_records() {
    let storage = MemoryStorage::default();
    let mut dashboard = Dashboard::open(storage.clone(), Preset::Standard.config());
    let id = dashboard.create();
    dashboard.update(id, RecordField::MistakeAmount, "600000");
    dashboard.update(id, RecordField::DecisionPolicy, "amount");
    assert_eq!(dashboard.summary().total, 4_000_000);

    dashboard.reconfigure(Preset::Proportional.config());
    assert_eq!(dashboard.summary().total, 480_000);

    let reopened = Dashboard::open(storage, Preset::Proportional.config());
    assert_eq!(reopened.summary().total, 480_000);
}
