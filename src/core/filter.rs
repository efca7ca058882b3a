use tracing::debug;

use crate::core::record::CredentialTable;

/// Drops every record with an empty value.
///
/// With `require_all_columns` every column counts, otherwise only `url`,
/// `username` and `password` are checked. Returns the filtered table and the
/// number of rows removed.
pub fn remove_incomplete(table: CredentialTable, require_all_columns: bool) -> (CredentialTable, usize) {
    let CredentialTable { schema, records } = table;
    let before = records.len();

    let records: Vec<_> = records
        .into_iter()
        .filter(|record| {
            if require_all_columns {
                !record.has_empty_field()
            } else {
                !record.has_empty_credential()
            }
        })
        .collect();

    let removed = before - records.len();
    if removed > 0 {
        debug!("Removed {} incomplete records", removed);
    }

    (CredentialTable::new(schema, records), removed)
}
