use std::sync::OnceLock;

use regex::Regex;

use crate::normalize::collapse_whitespace;

// ── Compiled regex cache ─────────────────────────────────────────────────────

macro_rules! re {
    ($name:ident, $pat:expr) => {
        fn $name() -> &'static Regex {
            static R: OnceLock<Regex> = OnceLock::new();
            R.get_or_init(|| Regex::new($pat).expect("invalid regex"))
        }
    };
}

re!(re_email, r"[a-zA-Z0-9._-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,6}");
re!(re_phone,
    r"(?:\+?\d{1,4}[-.\s]?)?\(?\d{2,4}\)?[-.\s]?\d{2,4}[-.\s]?\d{2,4}[-.\s]?\d{0,4}");
re!(re_website,
    r"(?:https?://)?(?:www\.)?[a-zA-Z0-9-]+\.[a-zA-Z]{2,}(?:\.[a-zA-Z]{2,})?(?:/\S*)?");
re!(re_address,
    r"(?i)\b\d+[^\n]*(?:street|st|road|rd|avenue|ave|lane|ln|drive|dr|boulevard|blvd|way|court|ct|circle|plaza|square|floor|nagar|sadan)\b");

/// Minimum digit characters for a phone candidate to be accepted. The sole
/// validity gate; no checksum, no region validation.
pub const MIN_PHONE_DIGITS: usize = 10;

/// Minimum cleaned length for an address to be kept.
const MIN_ADDRESS_CHARS: usize = 6;

/// The structured patterns found on one card face, each list deduplicated
/// in first-occurrence order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedPatterns {
    pub emails: Vec<String>,
    pub phones: Vec<String>,
    pub websites: Vec<String>,
    pub addresses: Vec<String>,
}

/// Scan the full text of one face (lines joined with a single space) for
/// emails, phones, websites and street addresses.
///
/// Addresses are scanned last and "unmixed": a phone candidate embedded in
/// an address match is promoted to the phones list and stripped from the
/// address text, so a digit run never counts as both.
pub fn extract_patterns(full_text: &str) -> ExtractedPatterns {
    let mut out = ExtractedPatterns::default();

    let email_spans: Vec<(usize, usize)> = re_email()
        .find_iter(full_text)
        .map(|m| {
            push_unique(&mut out.emails, m.as_str());
            (m.start(), m.end())
        })
        .collect();

    for m in re_phone().find_iter(full_text) {
        let cleaned = m.as_str().trim();
        if digit_count(cleaned) >= MIN_PHONE_DIGITS {
            push_unique(&mut out.phones, cleaned);
        }
    }

    for m in re_website().find_iter(full_text) {
        // A candidate with "@" is part of an email, as is a bare domain
        // whose characters sit inside an email match (e.g. the "acme.com"
        // of "john@acme.com").
        if m.as_str().contains('@') {
            continue;
        }
        if email_spans.iter().any(|&(s, e)| m.start() < e && m.end() > s) {
            continue;
        }
        push_unique(&mut out.websites, m.as_str());
    }

    for m in re_address().find_iter(full_text) {
        let mut address = m.as_str().to_string();
        for pm in re_phone().find_iter(m.as_str()) {
            if digit_count(pm.as_str()) >= MIN_PHONE_DIGITS {
                push_unique(&mut out.phones, pm.as_str().trim());
                address = address.replacen(pm.as_str(), "", 1);
            }
        }
        let address = collapse_whitespace(&address);
        if address.chars().count() >= MIN_ADDRESS_CHARS {
            push_unique(&mut out.addresses, &address);
        }
    }

    out
}

fn digit_count(s: &str) -> usize {
    s.chars().filter(|c| c.is_ascii_digit()).count()
}

fn push_unique(list: &mut Vec<String>, value: &str) {
    if !list.iter().any(|v| v == value) {
        list.push(value.to_string());
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
