pub mod contact;

pub use contact::{ContactRecord, SideRecord, COLUMNS};
