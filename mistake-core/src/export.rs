//! Read-only tabular projections of the record collection.
//!
//! A [`Workbook`] holds two sheets: per-record inputs and scores, then the
//! deduction candidates with the chosen policy and final amount. Renderers
//! turn it into a SpreadsheetML workbook, CSV text, or a JSON report.
use serde::Serialize;
use std::fmt::Write as _;
use thiserror::Error;

use crate::constants::EXPORT_FILE_STEM;
use crate::record::StaffRecord;
use crate::summary::{Summary, summarize};

pub const SCORES_SHEET: &str = "Scores";
pub const DECISIONS_SHEET: &str = "Decisions";

const SCORES_HEADERS: [&str; 7] = [
    "Name",
    "Mistake Count",
    "Mistake Amount",
    "Count Score",
    "Amount Score",
    "Average Score",
    "Weighted Score",
];

const DECISIONS_HEADERS: [&str; 7] = [
    "Name",
    "By Count",
    "By Amount",
    "Average",
    "Weighted",
    "Policy",
    "Final",
];

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("CSV buffer error: {0}")]
    Buffer(String),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Text(String),
    Amount(u64),
    Score(f64),
}

impl Cell {
    fn display(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Amount(value) => value.to_string(),
            Self::Score(value) => format!("{value:.2}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sheet {
    pub name: &'static str,
    pub headers: Vec<&'static str>,
    pub rows: Vec<Vec<Cell>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Workbook {
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    #[must_use]
    pub fn from_records(records: &[StaffRecord]) -> Self {
        let scores = Sheet {
            name: SCORES_SHEET,
            headers: SCORES_HEADERS.to_vec(),
            rows: records
                .iter()
                .map(|record| {
                    vec![
                        Cell::Text(record.display_name().to_string()),
                        Cell::Amount(record.mistake_count),
                        Cell::Amount(record.mistake_amount),
                        Cell::Score(record.count_score),
                        Cell::Score(record.amount_score),
                        Cell::Score(record.average_score),
                        Cell::Score(record.weighted_score),
                    ]
                })
                .collect(),
        };
        let decisions = Sheet {
            name: DECISIONS_SHEET,
            headers: DECISIONS_HEADERS.to_vec(),
            rows: records
                .iter()
                .map(|record| {
                    vec![
                        Cell::Text(record.display_name().to_string()),
                        Cell::Amount(record.deductions.by_count),
                        Cell::Amount(record.deductions.by_amount),
                        Cell::Amount(record.deductions.average),
                        Cell::Amount(record.deductions.weighted),
                        Cell::Text(record.decision_policy.key().to_string()),
                        Cell::Amount(record.final_amount),
                    ]
                })
                .collect(),
        };
        Self {
            sheets: vec![scores, decisions],
        }
    }

    #[must_use]
    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|sheet| sheet.name == name)
    }

    /// Render as a SpreadsheetML 2003 document, one worksheet per sheet.
    #[must_use]
    pub fn to_spreadsheet_xml(&self) -> String {
        let mut out = String::from(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <?mso-application progid=\"Excel.Sheet\"?>\n\
             <Workbook xmlns=\"urn:schemas-microsoft-com:office:spreadsheet\" \
             xmlns:ss=\"urn:schemas-microsoft-com:office:spreadsheet\">\n",
        );
        for sheet in &self.sheets {
            let _ = writeln!(out, " <Worksheet ss:Name=\"{}\">", xml_escape(sheet.name));
            out.push_str("  <Table>\n");
            out.push_str("   <Row>");
            for header in &sheet.headers {
                let _ = write!(
                    out,
                    "<Cell><Data ss:Type=\"String\">{}</Data></Cell>",
                    xml_escape(header)
                );
            }
            out.push_str("</Row>\n");
            for row in &sheet.rows {
                out.push_str("   <Row>");
                for cell in row {
                    let kind = match cell {
                        Cell::Text(_) => "String",
                        Cell::Amount(_) | Cell::Score(_) => "Number",
                    };
                    let _ = write!(
                        out,
                        "<Cell><Data ss:Type=\"{kind}\">{}</Data></Cell>",
                        xml_escape(&cell.display())
                    );
                }
                out.push_str("</Row>\n");
            }
            out.push_str("  </Table>\n </Worksheet>\n");
        }
        out.push_str("</Workbook>\n");
        out
    }
}

/// Render one sheet as CSV, header row first.
///
/// # Errors
///
/// Returns an error if the CSV writer fails.
pub fn sheet_to_csv(sheet: &Sheet) -> Result<String, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(&sheet.headers)?;
    for row in &sheet.rows {
        writer.write_record(row.iter().map(Cell::display))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|err| ExportError::Buffer(err.to_string()))?;
    String::from_utf8(bytes).map_err(|err| ExportError::Buffer(err.to_string()))
}

/// Full JSON export: every record plus the summary at export time.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportReport<'a> {
    pub export_date: String,
    pub records: &'a [StaffRecord],
    pub summary: Summary,
}

impl<'a> ExportReport<'a> {
    #[must_use]
    pub fn new(export_date: impl Into<String>, records: &'a [StaffRecord]) -> Self {
        Self {
            export_date: export_date.into(),
            records,
            summary: summarize(records),
        }
    }

    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String, ExportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// `mistake_dashboard_export_<date>.<extension>`, where `date` is `YYYY-MM-DD`.
#[must_use]
pub fn export_file_name(date: &str, extension: &str) -> String {
    format!("{EXPORT_FILE_STEM}_{date}.{extension}")
}

fn xml_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Preset;
    use crate::record::RecordField;
    use crate::store::RecordStore;

    fn sample_store() -> RecordStore {
        let mut store = RecordStore::new(Preset::AmountFocused.config());
        let id = store.create();
        store.update(id, RecordField::Name, "Dewi & Co <QA>");
        store.update(id, RecordField::MistakeCount, "3");
        store.update(id, RecordField::MistakeAmount, "600000");
        store.update(id, RecordField::DecisionPolicy, "median");
        store.create();
        store
    }

    #[test]
    fn workbook_has_two_sheets_in_order() {
        let store = sample_store();
        let workbook = Workbook::from_records(store.records());
        let names: Vec<_> = workbook.sheets.iter().map(|s| s.name).collect();
        assert_eq!(names, vec![SCORES_SHEET, DECISIONS_SHEET]);
        let decisions = workbook.sheet(DECISIONS_SHEET).unwrap();
        assert_eq!(decisions.rows.len(), 2);
        assert_eq!(decisions.rows[0][5], Cell::Text("median".to_string()));
        assert_eq!(decisions.rows[0][6], Cell::Amount(710_000));
        assert_eq!(decisions.rows[1][0], Cell::Text("Unnamed Staff".to_string()));
    }

    #[test]
    fn spreadsheet_xml_escapes_text() {
        let xml = Workbook::from_records(sample_store().records()).to_spreadsheet_xml();
        assert!(xml.contains("<Worksheet ss:Name=\"Scores\">"));
        assert!(xml.contains("<Worksheet ss:Name=\"Decisions\">"));
        assert!(xml.contains("Dewi &amp; Co &lt;QA&gt;"));
        assert!(!xml.contains("Dewi & Co"));
    }

    #[test]
    fn csv_sheet_has_header_and_rows() {
        let workbook = Workbook::from_records(sample_store().records());
        let csv = sheet_to_csv(workbook.sheet(SCORES_SHEET).unwrap()).unwrap();
        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Name,Mistake Count"));
        assert!(lines[1].ends_with("0.50,0.80,0.65,0.71"));
    }

    #[test]
    fn json_report_carries_summary() {
        let store = sample_store();
        let report = ExportReport::new("2026-10-18T00:00:00Z", store.records());
        let json = report.to_json_pretty().unwrap();
        assert!(json.contains("\"exportDate\""));
        assert_eq!(report.summary.count, 2);
        assert_eq!(report.summary.total, 710_000);
        assert_eq!(
            export_file_name("2026-10-18", "xls"),
            "mistake_dashboard_export_2026-10-18.xls"
        );
    }
}
