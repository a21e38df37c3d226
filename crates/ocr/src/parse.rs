use cardscan_core::SideRecord;

use crate::classify::{classify_lines, collect_additional_info, name_from_email};
use crate::extract::extract_patterns;

/// Process one card face's raw OCR text into a [`SideRecord`].
///
/// Total over any string input: empty or garbled text produces a record
/// with empty fields, never an error.
pub fn parse_side(raw_text: &str) -> SideRecord {
    let lines: Vec<String> = raw_text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect();

    let full_text = lines.join(" ");
    let patterns = extract_patterns(&full_text);

    let mut assignments = classify_lines(&lines);
    if assignments.name.is_empty() {
        if let Some(email) = patterns.emails.first() {
            assignments.name = name_from_email(email);
        }
    }

    let additional_info = collect_additional_info(&lines, &assignments, &patterns);

    SideRecord {
        name: assignments.name,
        company: assignments.company,
        position: assignments.position,
        emails: patterns.emails,
        phones: patterns.phones,
        websites: patterns.websites,
        addresses: patterns.addresses,
        additional_info,
        raw_text: raw_text.to_string(),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
