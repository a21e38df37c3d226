use std::sync::OnceLock;

use regex::Regex;

use crate::extract::ExtractedPatterns;
use crate::normalize::clean_line;

/// Job-title keywords; a cleaned line containing one becomes the position.
const POSITION_KEYWORDS: &[&str] = &[
    "ceo", "cto", "cfo", "manager", "director", "president", "vice president",
    "vp", "founder", "co-founder", "engineer", "developer", "designer",
    "consultant", "specialist", "executive", "officer", "head", "lead",
    "senior", "junior", "associate", "assistant",
];

/// Place names that disqualify a line from name/company/position.
const LOCATION_NAMES: &[&str] = &[
    "mumbai", "delhi", "bangalore", "chennai", "kolkata", "hyderabad",
    "pune", "ahmedabad", "jaipur", "india", "usa", "uk", "london", "new york",
];

/// Alphabetic-character ratio a name line must exceed.
const NAME_ALPHA_RATIO: f32 = 0.7;

fn re_name_caps() -> &'static Regex {
    static R: OnceLock<Regex> = OnceLock::new();
    R.get_or_init(|| Regex::new(r"^[A-Z][A-Z\s.-]+$").expect("invalid regex"))
}

fn re_name_title_case() -> &'static Regex {
    static R: OnceLock<Regex> = OnceLock::new();
    R.get_or_init(|| Regex::new(r"^[A-Z][a-z]+(?:\s+[A-Z][a-z]+)+$").expect("invalid regex"))
}

fn re_company_charset() -> &'static Regex {
    static R: OnceLock<Regex> = OnceLock::new();
    R.get_or_init(|| Regex::new(r"^[A-Z0-9\s&.,'-]+$").expect("invalid regex"))
}

fn re_labeled_field() -> &'static Regex {
    static R: OnceLock<Regex> = OnceLock::new();
    R.get_or_init(|| Regex::new(r"(?i)contact:|email:|phone:|website:").expect("invalid regex"))
}

/// The at-most-one-line-each assignments produced by the classifier pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assignments {
    pub name: String,
    pub company: String,
    pub position: String,
}

/// Walk the face's lines once, left to right, assigning at most one line to
/// each of position, name and company. First match wins per field; a line is
/// consumed by the first field it satisfies.
///
/// Implemented as a fold over an immutable accumulator: each step either
/// returns the accumulator untouched or a copy with exactly one new field.
pub fn classify_lines(lines: &[String]) -> Assignments {
    lines
        .iter()
        .fold(Assignments::default(), |acc, line| classify_step(acc, line))
}

fn classify_step(acc: Assignments, line: &str) -> Assignments {
    let cleaned = clean_line(line);
    if should_skip(line, &cleaned) {
        return acc;
    }
    let lower = cleaned.to_lowercase();

    // Position first; title lines often look like Title Case names.
    if acc.position.is_empty() && POSITION_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
        return Assignments { position: cleaned, ..acc };
    }

    let word_count = cleaned.split_whitespace().count();

    if acc.name.is_empty() && (2..=4).contains(&word_count) && is_mostly_alphabetic(&cleaned) {
        // All-caps lines only read as a person's name when initials-style
        // punctuation is present; bare all-caps lines are company material.
        let caps_name = re_name_caps().is_match(&cleaned)
            && cleaned.contains(['.', '-']);
        if caps_name || re_name_title_case().is_match(&cleaned) {
            return Assignments { name: cleaned, ..acc };
        }
    }

    if acc.company.is_empty() && cleaned.chars().count() > 3 {
        let is_all_caps = cleaned == cleaned.to_uppercase() && re_company_charset().is_match(&cleaned);
        if is_all_caps && (cleaned.chars().count() > 5 || word_count >= 2) {
            return Assignments { company: cleaned, ..acc };
        }
        // Mixed alphanumeric names like "360 BRIGHT MEDIA".
        let has_digit = cleaned.chars().any(|c| c.is_ascii_digit());
        let has_upper = cleaned.chars().any(|c| c.is_ascii_uppercase());
        if has_digit && has_upper && word_count >= 2 {
            return Assignments { company: cleaned, ..acc };
        }
    }

    acc
}

/// Whether a line is excluded from the name/company/position pass. Skipped
/// lines are still visible to the additional-info pass.
fn should_skip(line: &str, cleaned: &str) -> bool {
    if line.contains('@') {
        return true;
    }
    if starts_with_number(line) {
        return true;
    }
    if line.to_lowercase().contains("www.") {
        return true;
    }
    if re_labeled_field().is_match(line) {
        return true;
    }
    if cleaned.chars().count() < 3 {
        return true;
    }
    if cleaned.chars().all(|c| !c.is_ascii_alphanumeric()) {
        return true;
    }
    let lower = cleaned.to_lowercase();
    LOCATION_NAMES.iter().any(|loc| lower.contains(loc))
}

fn starts_with_number(line: &str) -> bool {
    let rest = line.strip_prefix('+').unwrap_or(line);
    rest.chars().next().is_some_and(|c| c.is_ascii_digit())
}

fn is_mostly_alphabetic(cleaned: &str) -> bool {
    let total = cleaned.chars().count();
    if total == 0 {
        return false;
    }
    let alpha = cleaned.chars().filter(|c| c.is_ascii_alphabetic()).count();
    alpha as f32 / total as f32 > NAME_ALPHA_RATIO
}

/// Second pass: every line that was not claimed by a field and is not part
/// of an extracted contact pattern becomes additional info (deduplicated,
/// original order).
pub fn collect_additional_info(
    lines: &[String],
    assignments: &Assignments,
    patterns: &ExtractedPatterns,
) -> Vec<String> {
    let mut info: Vec<String> = Vec::new();
    for line in lines {
        let cleaned = clean_line(line);
        if cleaned == assignments.name
            || cleaned == assignments.company
            || cleaned == assignments.position
        {
            continue;
        }
        let in_patterns = patterns.emails.iter().any(|v| line.contains(v.as_str()))
            || patterns.phones.iter().any(|v| line.contains(v.as_str()))
            || patterns.websites.iter().any(|v| line.contains(v.as_str()));
        if in_patterns {
            continue;
        }
        if cleaned.chars().count() > 2 && !info.iter().any(|v| *v == cleaned) {
            info.push(cleaned);
        }
    }
    info
}

/// Derive a display name from an email's local part:
/// `ashutosh.pandey@x.com` → `Ashutosh Pandey`.
pub fn name_from_email(email: &str) -> String {
    let local = email.split('@').next().unwrap_or("");
    local
        .split(['.', '_', '-'])
        .filter(|part| !part.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(part: &str) -> String {
    let mut chars = part.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(input: &[&str]) -> Vec<String> {
        input.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn classifies_position_before_name() {
        // "Managing Director" is Title Case but the keyword check runs first.
        let a = classify_lines(&lines(&["Managing Director", "John Smith"]));
        assert_eq!(a.position, "Managing Director");
        assert_eq!(a.name, "John Smith");
    }

    #[test]
    fn name_title_case() {
        let a = classify_lines(&lines(&["John Smith"]));
        assert_eq!(a.name, "John Smith");
    }

    #[test]
    fn name_all_caps_with_punctuation() {
        let a = classify_lines(&lines(&["JOHN A. SMITH"]));
        assert_eq!(a.name, "JOHN A. SMITH");
    }

    #[test]
    fn single_word_is_not_a_name() {
        let a = classify_lines(&lines(&["Johnathan"]));
        assert_eq!(a.name, "");
    }

    #[test]
    fn first_matching_name_wins() {
        let a = classify_lines(&lines(&["Alice Smith", "Bob Jones"]));
        assert_eq!(a.name, "Alice Smith");
    }

    #[test]
    fn company_all_caps() {
        let a = classify_lines(&lines(&["ACME CORP", "John Smith"]));
        assert_eq!(a.company, "ACME CORP");
        assert_eq!(a.name, "John Smith");
    }

    #[test]
    fn company_mixed_alphanumeric() {
        // Not Title Case (digits), not all caps; the mixed branch catches it.
        let a = classify_lines(&lines(&["Bright 360 Media"]));
        assert_eq!(a.company, "Bright 360 Media");
    }

    #[test]
    fn leading_digit_line_is_skipped_entirely() {
        // Digit-led lines look like phone numbers to the skip filter.
        let a = classify_lines(&lines(&["360 BRIGHT MEDIA"]));
        assert_eq!(a, Assignments::default());
    }

    #[test]
    fn skips_contact_like_lines() {
        let a = classify_lines(&lines(&[
            "john@acme.com",
            "+1 415 555 0100",
            "www.acme.com",
            "Email: Jane Doe",
        ]));
        assert_eq!(a, Assignments::default());
    }

    #[test]
    fn skips_location_lines() {
        let a = classify_lines(&lines(&["Mumbai Office", "New York"]));
        assert_eq!(a, Assignments::default());
    }

    #[test]
    fn skips_short_and_symbol_only_lines() {
        let a = classify_lines(&lines(&["--- * ---", "ab"]));
        assert_eq!(a, Assignments::default());
    }

    #[test]
    fn additional_info_excludes_assigned_and_pattern_lines() {
        let all = lines(&[
            "ACME CORP",
            "John Smith",
            "Director",
            "john@acme.com",
            "+1 415 555 0100",
            "www.acme.com",
            "Serving you since 1985",
        ]);
        let assignments = classify_lines(&all);
        let patterns = ExtractedPatterns {
            emails: vec!["john@acme.com".into()],
            phones: vec!["+1 415 555 0100".into()],
            websites: vec!["www.acme.com".into()],
            addresses: vec![],
        };
        let info = collect_additional_info(&all, &assignments, &patterns);
        assert_eq!(info, vec!["Serving you since 1985"]);
    }

    #[test]
    fn labeled_email_line_never_reaches_additional_info() {
        let all = lines(&["Email: jane@acme.com"]);
        let assignments = classify_lines(&all);
        let patterns = ExtractedPatterns {
            emails: vec!["jane@acme.com".into()],
            ..ExtractedPatterns::default()
        };
        let info = collect_additional_info(&all, &assignments, &patterns);
        assert!(info.is_empty());
    }

    #[test]
    fn additional_info_dedups_repeated_lines() {
        let all = lines(&["Registered Office", "Registered Office"]);
        let info = collect_additional_info(&all, &Assignments::default(), &ExtractedPatterns::default());
        assert_eq!(info, vec!["Registered Office"]);
    }

    #[test]
    fn name_from_email_variants() {
        assert_eq!(name_from_email("john.doe@example.com"), "John Doe");
        assert_eq!(name_from_email("ashutosh@x.in"), "Ashutosh");
        assert_eq!(name_from_email("mary_jane-watson@x.com"), "Mary Jane Watson");
        assert_eq!(name_from_email(""), "");
    }
}
