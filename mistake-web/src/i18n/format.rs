#[cfg(target_arch = "wasm32")]
use crate::i18n::bundle::with_bundle;
#[cfg(target_arch = "wasm32")]
use crate::i18n::locales::intl_tag;
#[cfg(target_arch = "wasm32")]
use js_sys::{Function, Intl, Object, Reflect};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;

use mistake_core::format_rupiah;

#[cfg(target_arch = "wasm32")]
fn intl_format(options: &Object, value: f64) -> Option<String> {
    with_bundle(|bundle| {
        let locales = js_sys::Array::of1(&JsValue::from_str(intl_tag(&bundle.lang)));
        let nf = Intl::NumberFormat::new(&locales, options);
        let format_fn: Function = nf.format();
        format_fn
            .call1(&nf, &JsValue::from_f64(value))
            .ok()
            .and_then(|v| v.as_string())
    })
}

/// Format a whole-Rupiah amount as IDR, e.g. `Rp 1.250.000`.
///
/// Uses `Intl.NumberFormat` with zero fraction digits in the browser and the
/// core formatter elsewhere.
#[must_use]
pub fn fmt_currency(amount: u64) -> String {
    #[cfg(target_arch = "wasm32")]
    {
        let opts = Object::new();
        for (key, value) in [("style", "currency"), ("currency", "IDR")] {
            let _ = Reflect::set(&opts, &JsValue::from_str(key), &JsValue::from_str(value));
        }
        let _ = Reflect::set(
            &opts,
            &JsValue::from_str("maximumFractionDigits"),
            &JsValue::from_f64(0.0),
        );
        let as_float = mistake_core::numbers::u64_to_f64(amount);
        intl_format(&opts, as_float).unwrap_or_else(|| format_rupiah(amount))
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        format_rupiah(amount)
    }
}

/// Scores always show two decimals.
#[must_use]
pub fn fmt_score(score: f64) -> String {
    format!("{score:.2}")
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[test]
    fn currency_formatter_uses_rupiah_fallback() {
        assert_eq!(fmt_currency(0), "Rp 0");
        assert_eq!(fmt_currency(3_550_000), "Rp 3.550.000");
    }

    #[test]
    fn scores_have_two_decimals() {
        assert_eq!(fmt_score(0.5), "0.50");
        assert_eq!(fmt_score(0.71), "0.71");
    }
}
