use cardscan_core::COLUMNS;
use thiserror::Error;

use crate::db::StoredContact;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),
    #[error("CSV buffer error: {0}")]
    Buffer(String),
    #[error("CSV output was not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Render the stored contacts as a CSV sheet: the fixed header row followed
/// by one row per scan, columns in [`COLUMNS`] order.
pub fn contacts_to_csv(contacts: &[StoredContact]) -> Result<String, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(COLUMNS)?;
    for contact in contacts {
        writer.write_record(contact.record.to_row())?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Buffer(e.to_string()))?;
    Ok(String::from_utf8(bytes)?)
}
