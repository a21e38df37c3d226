//! Line-level cleanup of OCR artifacts.
//!
//! Tesseract output on glossy card stock picks up stray trademark glyphs and
//! short nonsense tokens at line edges. `clean_line` removes the known ones;
//! worst case it returns the trimmed input unchanged.

/// Symbols that are never card content: logo marks misread as text.
const STRIP_SYMBOLS: [char; 3] = ['®', '©', '™'];

/// Tokens the engine treats as garbage when they open a line.
const GARBAGE_LEADING: [&str; 5] = ["le", "ee", "fes", "da", "ad"];

/// Tokens the engine treats as garbage when they close a line.
const GARBAGE_TRAILING: [&str; 3] = ["ie", "oe", "ae"];

/// Clean one OCR line: strip mark symbols, collapse whitespace, and drop
/// known garbage tokens from either end. Pure and total.
pub fn clean_line(line: &str) -> String {
    let stripped: String = line
        .chars()
        .filter(|c| !STRIP_SYMBOLS.contains(c))
        .collect();
    let mut cleaned = collapse_whitespace(&stripped);

    if let Some((first, rest)) = cleaned.split_once(' ') {
        if GARBAGE_LEADING.iter().any(|g| first.eq_ignore_ascii_case(g)) {
            cleaned = rest.trim_start().to_string();
        }
    }

    if let Some((rest, last)) = cleaned.rsplit_once(' ') {
        if GARBAGE_TRAILING.iter().any(|g| last.eq_ignore_ascii_case(g)) {
            cleaned = rest.trim_end().to_string();
        }
    }

    cleaned
}

/// Collapse runs of whitespace to single spaces and trim the ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_mark_symbols() {
        assert_eq!(clean_line("ACME® Corp™"), "ACME Corp");
        assert_eq!(clean_line("© 2024 ACME"), "2024 ACME");
    }

    #[test]
    fn collapses_whitespace_runs() {
        assert_eq!(clean_line("  John   Smith \t Jr  "), "John Smith Jr");
    }

    #[test]
    fn drops_leading_garbage_token() {
        assert_eq!(clean_line("Le John Smith"), "John Smith");
        assert_eq!(clean_line("ee ACME CORP"), "ACME CORP");
        assert_eq!(clean_line("Fes Director"), "Director");
    }

    #[test]
    fn drops_trailing_garbage_token() {
        assert_eq!(clean_line("John Smith ie"), "John Smith");
        assert_eq!(clean_line("ACME CORP oe"), "ACME CORP");
    }

    #[test]
    fn garbage_token_must_be_whole_word() {
        // "Lee" starts with "le" but is a real word.
        assert_eq!(clean_line("Lee Enterprises"), "Lee Enterprises");
        // "pie" ends with "ie" but is part of the last word.
        assert_eq!(clean_line("Apple pie"), "Apple pie");
    }

    #[test]
    fn lone_garbage_token_is_kept() {
        // No following/preceding word, so the whole-word-plus-space rule
        // does not apply.
        assert_eq!(clean_line("ie"), "ie");
    }

    #[test]
    fn empty_and_symbol_only_input() {
        assert_eq!(clean_line(""), "");
        assert_eq!(clean_line("®©™"), "");
        assert_eq!(clean_line("   "), "");
    }
}
