use serde_json::Value;

/// Where the chosen language is remembered between sessions.
pub const LOCALE_STORAGE_KEY: &str = "mistake_dashboard.locale";

#[derive(Clone, Copy, PartialEq, Eq)]
pub struct LocaleMeta {
    pub code: &'static str,
    pub name: &'static str,
    /// BCP 47 tag handed to `Intl` formatters.
    pub intl: &'static str,
}

const LOCALE_META: &[LocaleMeta] = &[
    LocaleMeta {
        code: "en",
        name: "English",
        intl: "en-US",
    },
    LocaleMeta {
        code: "id",
        name: "Bahasa Indonesia",
        intl: "id-ID",
    },
];

const LOCALE_TABLE: &[(&str, &str)] = &[
    ("en", include_str!("../../i18n/en.json")),
    ("id", include_str!("../../i18n/id.json")),
];

/// Supported locales with their native names.
#[must_use]
pub const fn locales() -> &'static [LocaleMeta] {
    LOCALE_META
}

#[must_use]
pub fn is_supported(lang: &str) -> bool {
    LOCALE_META.iter().any(|meta| meta.code == lang)
}

#[must_use]
pub fn intl_tag(lang: &str) -> &'static str {
    LOCALE_META
        .iter()
        .find(|meta| meta.code == lang)
        .map_or("en-US", |meta| meta.intl)
}

pub fn load_translations(lang: &str) -> Option<Value> {
    let bundle = LOCALE_TABLE
        .iter()
        .find_map(|(code, data)| (*code == lang).then_some(*data))
        .unwrap_or(LOCALE_TABLE[0].1);

    serde_json::from_str(bundle).ok()
}
