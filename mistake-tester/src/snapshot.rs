use anyhow::{Context, Result};
use mistake_core::{
    ExportReport, Preset, RecordStore, StaffRecord, Summary, Workbook, decode_snapshot,
    export_file_name, sheet_to_csv, summarize,
};
use std::fs;
use std::path::{Path, PathBuf};

/// A saved collection rescored under one preset.
#[derive(Debug, Clone)]
pub struct ScoredSnapshot {
    pub source: PathBuf,
    pub preset: Preset,
    pub records: Vec<StaffRecord>,
    pub summary: Summary,
}

impl ScoredSnapshot {
    #[must_use]
    pub fn workbook(&self) -> Workbook {
        Workbook::from_records(&self.records)
    }
}

/// Read a stored snapshot (sealed envelope or legacy record array) and score it.
///
/// # Errors
/// Fails when the file cannot be read or does not hold a record collection.
pub fn score_snapshot(path: &Path, preset: Preset) -> Result<ScoredSnapshot> {
    let text =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let collection = decode_snapshot(&text)
        .with_context(|| format!("{} is not a record snapshot", path.display()))?;

    let mut store = RecordStore::new(preset.config());
    store.load_snapshot(collection);
    log::info!(
        "scored {} records from {} with preset {preset}",
        store.len(),
        path.display()
    );

    let records = store.records().to_vec();
    let summary = summarize(&records);
    Ok(ScoredSnapshot {
        source: path.to_path_buf(),
        preset,
        records,
        summary,
    })
}

/// Write the workbook, one CSV per sheet, and the JSON report into `dir`.
///
/// # Errors
/// Fails when the directory or any file cannot be written.
pub fn write_exports(
    dir: &Path,
    scored: &ScoredSnapshot,
    date: &str,
    timestamp: &str,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    let workbook = scored.workbook();
    let mut written = Vec::new();

    let xls = dir.join(export_file_name(date, "xls"));
    fs::write(&xls, workbook.to_spreadsheet_xml())
        .with_context(|| format!("writing {}", xls.display()))?;
    written.push(xls);

    for sheet in &workbook.sheets {
        let stem = format!("{date}_{}", sheet.name.to_lowercase());
        let path = dir.join(export_file_name(&stem, "csv"));
        let csv = sheet_to_csv(sheet).with_context(|| format!("rendering sheet {}", sheet.name))?;
        fs::write(&path, csv).with_context(|| format!("writing {}", path.display()))?;
        written.push(path);
    }

    let json = ExportReport::new(timestamp, &scored.records)
        .to_json_pretty()
        .context("serializing export report")?;
    let json_path = dir.join(export_file_name(date, "json"));
    fs::write(&json_path, json).with_context(|| format!("writing {}", json_path.display()))?;
    written.push(json_path);

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir(label: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "mistake-tester-{label}-{}",
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap_or_default()
                .as_nanos()
        ))
    }

    const LEGACY: &str = r#"[
        {"id": 2, "name": "Ayu", "mistakeTxn": 3, "mistakeAmount": 600000, "decision": "median"},
        {"id": 4, "name": "Budi", "mistakeCount": 12, "mistakeAmount": 0, "decisionPolicy": "maximum"}
    ]"#;

    #[test]
    fn scores_legacy_snapshot_under_requested_preset() {
        let dir = temp_dir("score");
        fs::create_dir_all(&dir).expect("create dir");
        let path = dir.join("legacy.json");
        fs::write(&path, LEGACY).expect("write snapshot");

        let scored = score_snapshot(&path, Preset::AmountFocused).expect("score");
        assert_eq!(scored.records.len(), 2);
        assert_eq!(scored.records[0].final_amount, 710_000);
        assert_eq!(scored.records[1].final_amount, 1_000_000);
        assert_eq!(scored.summary.total, 1_710_000);
    }

    #[test]
    fn missing_or_garbled_files_are_errors() {
        let dir = temp_dir("bad");
        assert!(score_snapshot(&dir.join("absent.json"), Preset::Standard).is_err());

        fs::create_dir_all(&dir).expect("create dir");
        let path = dir.join("garbled.json");
        fs::write(&path, "{oops").expect("write");
        let err = score_snapshot(&path, Preset::Standard).expect_err("garbled");
        assert!(format!("{err:#}").contains("is not a record snapshot"));
    }

    #[test]
    fn exports_land_in_directory() {
        let dir = temp_dir("export");
        fs::create_dir_all(&dir).expect("create dir");
        let path = dir.join("legacy.json");
        fs::write(&path, LEGACY).expect("write snapshot");
        let scored = score_snapshot(&path, Preset::Standard).expect("score");

        let out = dir.join("out");
        let written =
            write_exports(&out, &scored, "2026-01-31", "2026-01-31T08:00:00Z").expect("export");
        assert_eq!(written.len(), 4);
        assert!(out.join("mistake_dashboard_export_2026-01-31.xls").exists());
        let decisions =
            fs::read_to_string(out.join("mistake_dashboard_export_2026-01-31_decisions.csv"))
                .expect("decisions csv");
        assert!(decisions.starts_with("Name,By Count"));
        assert_eq!(decisions.lines().count(), 3);
        let json = fs::read_to_string(out.join("mistake_dashboard_export_2026-01-31.json"))
            .expect("json");
        assert!(json.contains("\"exportDate\": \"2026-01-31T08:00:00Z\""));
    }
}
