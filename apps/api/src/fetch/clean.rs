//! Text normalization for fetched pages.
//!
//! Raw page text goes through here exactly once before prompting.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref HTML_TAG: Regex = Regex::new(r"<[^>]*?>").unwrap();
    static ref URL: Regex = Regex::new(r"(?:https?://|www\.)\S+").unwrap();
    static ref NON_ALNUM: Regex = Regex::new(r"[^A-Za-z0-9 ]").unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// Normalizes raw page text into a canonical string for prompting.
///
/// Pure and deterministic: strips HTML tags, URLs, and non-alphanumeric
/// characters, then collapses whitespace runs and trims. Idempotent — a
/// cleaned string passes through unchanged. Empty input yields empty output.
pub fn clean_text(raw: &str) -> String {
    let text = HTML_TAG.replace_all(raw, " ");
    let text = URL.replace_all(&text, " ");
    let text = NON_ALNUM.replace_all(&text, " ");
    let text = WHITESPACE.replace_all(&text, " ");
    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_strips_html_tags() {
        let cleaned = clean_text("<div class=\"job\">Backend Engineer</div>");
        assert_eq!(cleaned, "Backend Engineer");
    }

    #[test]
    fn test_clean_strips_urls() {
        let cleaned = clean_text("Apply at https://example.com/careers?id=1 today");
        assert_eq!(cleaned, "Apply at today");
    }

    #[test]
    fn test_clean_strips_bare_www_urls() {
        let cleaned = clean_text("See www.example.com/jobs for details");
        assert_eq!(cleaned, "See for details");
    }

    #[test]
    fn test_clean_collapses_whitespace() {
        let cleaned = clean_text("Senior   Rust\n\n\tEngineer");
        assert_eq!(cleaned, "Senior Rust Engineer");
    }

    #[test]
    fn test_clean_strips_punctuation_clusters() {
        let cleaned = clean_text("Requirements::: 5+ years — Rust!!!");
        assert_eq!(cleaned, "Requirements 5 years Rust");
    }

    #[test]
    fn test_clean_empty_input_gives_empty_output() {
        assert_eq!(clean_text(""), "");
        assert_eq!(clean_text("   \n\t  "), "");
    }

    #[test]
    fn test_clean_is_idempotent() {
        let inputs = [
            "<p>Senior Engineer</p> at https://jobs.example.com (remote!)",
            "plain text already",
            "  spaced   out  ",
            "",
        ];
        for input in inputs {
            let once = clean_text(input);
            let twice = clean_text(&once);
            assert_eq!(once, twice, "clean_text not idempotent for {input:?}");
        }
    }
}
