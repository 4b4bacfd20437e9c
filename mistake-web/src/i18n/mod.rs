mod bundle;
mod format;
mod locales;
mod render;

pub use bundle::{I18nBundle, current_lang, set_lang};
pub use format::{fmt_currency, fmt_score};
pub use locales::{LOCALE_STORAGE_KEY, LocaleMeta, locales};
pub use render::{t, tr};
