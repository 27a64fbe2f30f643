//! Response sanitizer for plain-text display surfaces.
//!
//! Generated answers arrive as markdown; the chat surface renders plain
//! text. [`sanitize`] strips the formatting artifacts — headings, rules,
//! bold markers, tables — and normalizes whitespace.

use std::sync::LazyLock;

use regex::Regex;

static TABLE_ROW: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\|([^|\n]+)\|([^|\n]+)\|").expect("table row pattern")
});

static TABLE_SEPARATOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\|[-|\s]+\|").expect("table separator pattern")
});

static HORIZONTAL_RUNS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[ \t]+").expect("horizontal whitespace pattern")
});

static EXCESS_NEWLINES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\n{3,}").expect("newline run pattern")
});

/// Strip markdown formatting artifacts from generated text.
///
/// Pure and idempotent: `sanitize(sanitize(x)) == sanitize(x)`. Empty input
/// is returned unchanged.
///
/// Applied transformations, in order:
///
/// - heading markers (`### `, `## `, `# `) removed
/// - horizontal rules (`---`, `***`) removed
/// - bold bullets (`- **`) become a `• ` glyph; remaining `**` removed
/// - two-column table rows (`| key | value |`) become `• key: value` lines;
///   leftover separator rows removed
/// - remaining `*` markers removed
/// - runs of spaces/tabs collapse to one space; three or more consecutive
///   newlines collapse to exactly two; leading/trailing whitespace trimmed
pub fn sanitize(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let cleaned = text
        .replace("### ", "")
        .replace("## ", "")
        .replace("# ", "")
        .replace("---", "")
        .replace("***", "")
        .replace("- **", "• ")
        .replace("**", "");

    let cleaned = TABLE_ROW.replace_all(&cleaned, |caps: &regex::Captures<'_>| {
        let key = caps[1].trim().to_string();
        let value = caps[2].trim().to_string();
        format!("• {key}: {value}")
    });
    let cleaned = TABLE_SEPARATOR.replace_all(&cleaned, "");

    let cleaned = cleaned.replace('*', "");

    let cleaned = HORIZONTAL_RUNS.replace_all(&cleaned, " ");
    let cleaned = EXCESS_NEWLINES.replace_all(&cleaned, "\n\n");

    cleaned.trim().to_string()
}
