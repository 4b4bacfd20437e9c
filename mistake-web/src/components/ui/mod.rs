pub mod decision_table;
pub mod staff_table;
pub mod summary_panel;
pub mod toolbar;

/// Edit emitted by a table cell: record id, field, raw value.
pub type FieldEdit = (u64, mistake_core::RecordField, String);

/// DOM id of a record's name input.
#[must_use]
pub fn name_input_id(record_id: u64) -> String {
    format!("name-input-{record_id}")
}
