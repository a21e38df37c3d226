pub mod db;
pub mod export;

pub use db::{
    check_scan_duplicate, create_db, get_all_contacts, get_contact_by_id, insert_contact,
    DbPool, StoredContact,
};
pub use export::{contacts_to_csv, ExportError};
