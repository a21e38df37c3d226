use serde::{Deserialize, Serialize};

/// Spreadsheet column order for exported contact rows: one row per scan,
/// one column per field, in this fixed order.
pub const COLUMNS: [&str; 9] = [
    "Name",
    "Company",
    "Position",
    "Email",
    "Phone",
    "Website",
    "Address",
    "Additional Info",
    "Scanned At",
];

/// Everything extracted from a single card face.
///
/// `name`/`company`/`position` are either empty or hold exactly one
/// classified line. The list fields are deduplicated in first-seen order;
/// use the `push_*` methods to keep that invariant.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SideRecord {
    pub name: String,
    pub company: String,
    pub position: String,
    pub emails: Vec<String>,
    pub phones: Vec<String>,
    pub websites: Vec<String>,
    pub addresses: Vec<String>,
    pub additional_info: Vec<String>,
    pub raw_text: String,
}

impl SideRecord {
    pub fn new(raw_text: &str) -> Self {
        SideRecord {
            raw_text: raw_text.to_string(),
            ..SideRecord::default()
        }
    }

    pub fn push_email(&mut self, value: &str) {
        push_unique(&mut self.emails, value);
    }

    pub fn push_phone(&mut self, value: &str) {
        push_unique(&mut self.phones, value);
    }

    pub fn push_website(&mut self, value: &str) {
        push_unique(&mut self.websites, value);
    }

    pub fn push_address(&mut self, value: &str) {
        push_unique(&mut self.addresses, value);
    }

    pub fn push_additional_info(&mut self, value: &str) {
        push_unique(&mut self.additional_info, value);
    }
}

fn push_unique(list: &mut Vec<String>, value: &str) {
    if !list.iter().any(|v| v == value) {
        list.push(value.to_string());
    }
}

/// The merged, final contact record for one scan: multi-value fields joined
/// into comma-separated strings, additional info joined with `" | "`, and a
/// capture timestamp attached.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ContactRecord {
    pub name: String,
    pub company: String,
    pub position: String,
    pub email: String,
    pub phone: String,
    pub website: String,
    pub address: String,
    pub additional_info: String,
    /// ISO-8601 capture time, stamped at merge.
    pub scanned_at: String,
}

impl ContactRecord {
    /// Render as a spreadsheet row matching [`COLUMNS`].
    pub fn to_row(&self) -> [String; 9] {
        [
            self.name.clone(),
            self.company.clone(),
            self.position.clone(),
            self.email.clone(),
            self.phone.clone(),
            self.website.clone(),
            self.address.clone(),
            self.additional_info.clone(),
            self.scanned_at.clone(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_methods_deduplicate() {
        let mut side = SideRecord::new("raw");
        side.push_email("a@b.com");
        side.push_email("a@b.com");
        side.push_email("c@d.com");
        assert_eq!(side.emails, vec!["a@b.com", "c@d.com"]);

        side.push_phone("+1 555 000 1234");
        side.push_phone("+1 555 000 1234");
        assert_eq!(side.phones.len(), 1);
    }

    #[test]
    fn push_preserves_first_seen_order() {
        let mut side = SideRecord::default();
        for w in ["www.z.com", "www.a.com", "www.z.com", "www.m.com"] {
            side.push_website(w);
        }
        assert_eq!(side.websites, vec!["www.z.com", "www.a.com", "www.m.com"]);
    }

    #[test]
    fn contact_record_serializes_with_camel_case_keys() {
        let record = ContactRecord {
            name: "John Smith".into(),
            company: "ACME CORP".into(),
            position: "Director".into(),
            email: "john@acme.com".into(),
            phone: "+1 415 555 0100".into(),
            website: "www.acme.com".into(),
            address: String::new(),
            additional_info: String::new(),
            scanned_at: "2024-01-15T10:00:00.000Z".into(),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["additionalInfo"], "");
        assert_eq!(json["scannedAt"], "2024-01-15T10:00:00.000Z");
        assert_eq!(json["name"], "John Smith");
    }

    #[test]
    fn row_follows_column_order() {
        let record = ContactRecord {
            name: "n".into(),
            company: "c".into(),
            position: "p".into(),
            email: "e".into(),
            phone: "ph".into(),
            website: "w".into(),
            address: "a".into(),
            additional_info: "i".into(),
            scanned_at: "t".into(),
        };
        let row = record.to_row();
        assert_eq!(row.len(), COLUMNS.len());
        assert_eq!(row[0], "n");
        assert_eq!(row[7], "i");
        assert_eq!(row[8], "t");
    }
}
