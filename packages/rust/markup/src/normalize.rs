//! Text normalization for titles, paragraphs, and citation text.
//!
//! [`normalize`] is a fixed, order-sensitive pipeline of string passes.
//! It is total (never fails) and idempotent on its own output.

use std::sync::LazyLock;

use regex::Regex;

/// Inline citation markers: `[1]`, `[12; 13, 14]`, `[d]`, `[citation needed]`.
///
/// Matched literally so meaningful bracketed text survives.
static CITATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\[\s*(?:citation needed|\d+(?:\s*[;,]\s*\d+)*|[a-zA-Z])\s*\]")
        .expect("valid regex")
});

/// Backslash-escaped quote sequences (`\"`, `\'`).
static ESCAPED_QUOTE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\\(["'])"#).expect("valid regex"));

/// Any run of whitespace, including newlines and tabs.
static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Normalize a raw text span extracted from article markup.
///
/// Passes run in a fixed order:
/// 1. Unescape HTML/XML character entities (entities may produce the literal
///    characters later passes match on, so this runs first).
/// 2. Replace backslash-escaped quotes with plain quotes.
/// 3. Remove inline citation markers.
/// 4. Collapse whitespace runs to a single space.
/// 5. Trim.
pub fn normalize(text: &str) -> String {
    let text = unescape_entities(text);
    let text = ESCAPED_QUOTE_RE.replace_all(&text, "$1");
    let text = CITATION_RE.replace_all(&text, "");
    let text = WHITESPACE_RE.replace_all(&text, " ");
    text.trim().to_string()
}

// ---------------------------------------------------------------------------
// Entity unescaping
// ---------------------------------------------------------------------------

/// Decode character entities in a single left-to-right pass.
///
/// Unknown entities pass through literally. Non-breaking spaces become plain
/// spaces so the whitespace pass sees them.
fn unescape_entities(input: &str) -> String {
    if !input.contains('&') {
        return input.replace('\u{a0}', " ");
    }

    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        match decode_entity(tail) {
            Some((decoded, consumed)) => {
                out.push_str(&decoded);
                rest = &tail[consumed..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);

    out.replace('\u{a0}', " ")
}

/// Decode one entity at the start of `s` (which begins with `&`).
/// Returns the decoded string and the number of bytes consumed.
fn decode_entity(s: &str) -> Option<(String, usize)> {
    let semi = s[1..].find(';')?;
    let name = &s[1..1 + semi];
    if name.is_empty() || name.len() > 32 {
        return None;
    }

    let decoded = if let Some(num) = name.strip_prefix('#') {
        let code_point =
            if let Some(hex) = num.strip_prefix('x').or_else(|| num.strip_prefix('X')) {
                u32::from_str_radix(hex, 16).ok()?
            } else {
                num.parse::<u32>().ok()?
            };
        char::from_u32(code_point)?.to_string()
    } else {
        named_entity(name)?.to_string()
    };

    Some((decoded, semi + 2))
}

/// Named entities seen in encyclopedia markup.
fn named_entity(name: &str) -> Option<&'static str> {
    let decoded = match name {
        "nbsp" => "\u{a0}",
        "amp" => "&",
        "lt" => "<",
        "gt" => ">",
        "quot" => "\"",
        "apos" => "'",
        "ndash" => "\u{2013}",
        "mdash" => "\u{2014}",
        "hellip" => "\u{2026}",
        "lsquo" => "\u{2018}",
        "rsquo" => "\u{2019}",
        "ldquo" => "\u{201c}",
        "rdquo" => "\u{201d}",
        _ => return None,
    };
    Some(decoded)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entities_citations_and_whitespace() {
        let input = "He said &quot;hi&quot; [1] [citation needed]";
        assert_eq!(normalize(input), "He said \"hi\"");
    }

    #[test]
    fn numeric_entities_decoded() {
        assert_eq!(normalize("it&#39;s here"), "it's here");
        assert_eq!(normalize("it&#x27;s here"), "it's here");
    }

    #[test]
    fn nbsp_becomes_plain_space() {
        assert_eq!(normalize("born in&nbsp;1950"), "born in 1950");
        assert_eq!(normalize("born in\u{a0}1950"), "born in 1950");
    }

    #[test]
    fn unknown_entity_passes_through() {
        assert_eq!(normalize("&bogus; stays"), "&bogus; stays");
        assert_eq!(normalize("AT&T"), "AT&T");
    }

    #[test]
    fn escaped_quotes_unescaped() {
        assert_eq!(
            normalize(r#"He said \"hi\" to her"#),
            r#"He said "hi" to her"#
        );
        assert_eq!(normalize(r"it\'s fine"), "it's fine");
    }

    #[test]
    fn citation_marker_variants_removed() {
        assert_eq!(normalize("fact[247] here"), "fact here");
        assert_eq!(normalize("fact[d] here"), "fact here");
        assert_eq!(normalize("fact[12; 13, 14] here"), "fact here");
        assert_eq!(normalize("fact [ 1 ] here"), "fact here");
        assert_eq!(normalize("fact[Citation Needed] here"), "fact here");
    }

    #[test]
    fn meaningful_brackets_survive() {
        assert_eq!(normalize("the [sic] transcript"), "the [sic] transcript");
        assert_eq!(normalize("[note 3] remains"), "[note 3] remains");
    }

    #[test]
    fn whitespace_collapsed_and_trimmed() {
        assert_eq!(normalize("  a\t\tb\n\nc  "), "a b c");
    }

    #[test]
    fn empty_and_clean_inputs_unchanged() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("already clean text"), "already clean text");
    }

    #[test]
    fn idempotent_on_own_output() {
        let inputs = [
            "He said &quot;hi&quot; [1] [citation needed]",
            "born in&nbsp;1950.[2]",
            r#"quoted \"text\" with [a] markers"#,
            "",
            "plain sentence",
        ];
        for input in inputs {
            let once = normalize(input);
            assert_eq!(normalize(&once), once, "not idempotent for {input:?}");
        }
    }
}
