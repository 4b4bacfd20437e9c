use chrono::Utc;

pub fn split_csv(s: &str) -> Vec<String> {
    s.split(',')
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
        .collect()
}

/// Export date stamp used in generated file names.
pub fn export_date() -> String {
    Utc::now().format("%Y-%m-%d").to_string()
}

/// Full timestamp recorded inside JSON exports.
pub fn export_timestamp() -> String {
    Utc::now().to_rfc3339()
}
