use regex::Regex;
use std::sync::OnceLock;

fn horizontal_ws() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[ \t]+").expect("valid regex"))
}

fn blank_lines() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\n\s*\n+").expect("valid regex"))
}

/// Clean up whitespace left behind by text extraction
///
/// Runs of spaces/tabs become one space, runs of blank lines become a single
/// blank line, and the result is trimmed.
pub fn normalize(raw: &str) -> String {
    let text = horizontal_ws().replace_all(raw, " ");
    let text = blank_lines().replace_all(&text, "\n\n");
    text.trim().to_string()
}
