//! Centralized scoring constants for the mistake deduction engine.
//!
//! Band thresholds, weightings, and caps live here so a policy change is a
//! single reviewed edit rather than a hunt through call sites.

// Persistence ---------------------------------------------------------------
pub const STORAGE_KEY: &str = "mistake_dashboard_data";
pub const PRESET_STORAGE_KEY: &str = "mistake_dashboard.preset";
pub const SNAPSHOT_VERSION: u32 = 1;
pub(crate) const SNAPSHOT_HASH_SEED: u64 = 0x4d49_5354_414b_4531;

// Score scale ---------------------------------------------------------------
pub const SCORE_NONE: f64 = 0.0;
pub const SCORE_LOW: f64 = 0.3;
pub const SCORE_MEDIUM: f64 = 0.5;
pub const SCORE_HIGH: f64 = 0.8;
pub const SCORE_FULL: f64 = 1.0;

// Mistake count bands (inclusive upper bounds) ------------------------------
pub(crate) const COUNT_BAND_MIN: u64 = 1;
pub(crate) const COUNT_BAND_LOW_MAX: u64 = 2;
pub(crate) const COUNT_BAND_MEDIUM_MAX: u64 = 5;
pub(crate) const COUNT_BAND_HIGH_MAX: u64 = 7;

// Mistake amount bands, whole Rupiah ----------------------------------------
pub(crate) const AMOUNT_BAND_MIN: u64 = 100_000;
pub(crate) const AMOUNT_BAND_LOW_MAX: u64 = 200_000;
pub(crate) const AMOUNT_BAND_MEDIUM_MAX: u64 = 500_000;
pub(crate) const AMOUNT_BAND_HIGH_MAX: u64 = 2_000_000;

// Weightings (count, amount) ------------------------------------------------
pub(crate) const WEIGHT_COUNT_LED: (f64, f64) = (0.6, 0.4);
pub(crate) const WEIGHT_AMOUNT_LED: (f64, f64) = (0.3, 0.7);
pub(crate) const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

// Deduction caps ------------------------------------------------------------
pub(crate) const DEDUCTION_CAP_STANDARD: u64 = 5_000_000;
pub(crate) const DEDUCTION_CAP_REDUCED: u64 = 1_000_000;

// Display -------------------------------------------------------------------
pub const UNNAMED_STAFF_LABEL: &str = "Unnamed Staff";
pub const EXPORT_FILE_STEM: &str = "mistake_dashboard_export";
pub(crate) const SCORE_DECIMALS: i32 = 2;
