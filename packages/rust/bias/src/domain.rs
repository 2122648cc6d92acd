//! URL → canonical domain-root normalization.
//!
//! [`normalize_domain`] produces the join key used against the bias table.
//! It is total (malformed input yields a best-effort or empty string, never
//! an error) and idempotent on its own output.

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

/// Runs of two or more dots.
static MULTI_DOT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.{2,}").expect("valid regex"));

/// Extract and canonicalize the domain root of a URL.
///
/// `https://www.theguardian.com/us-news/2023/article` → `theguardian.com`.
///
/// The network location is taken from the parsed URL when possible; inputs
/// the parser rejects fall back to a manual netloc slice, and scheme-less
/// inputs are treated as bare host candidates so the function is a fixpoint
/// on its own output. Absence of any host yields an empty string — the
/// classifier handles domain-level absence, not this function.
pub fn normalize_domain(url: &str) -> String {
    let netloc = extract_netloc(url.trim());

    let mut host = netloc.to_lowercase();
    host = MULTI_DOT_RE.replace_all(&host, ".").into_owned();
    host = host.trim_matches('.').to_string();

    // Label-boundary strips: one leading `www.`, then one leading `news.`.
    // Prefix-with-dot matching leaves domains like `newsweek.com` intact.
    if let Some(rest) = host.strip_prefix("www.") {
        host = rest.to_string();
    }
    if let Some(rest) = host.strip_prefix("news.") {
        host = rest.to_string();
    }

    host
}

// ---------------------------------------------------------------------------
// Netloc extraction
// ---------------------------------------------------------------------------

fn extract_netloc(raw: &str) -> String {
    match Url::parse(raw) {
        // `mailto:` and friends parse but carry no host.
        Ok(parsed) => parsed.host_str().unwrap_or("").to_string(),
        Err(_) if raw.contains("://") => manual_netloc(raw),
        // No scheme: treat the input itself as a host candidate.
        Err(_) => {
            let end = raw
                .find(['/', '?', '#'])
                .unwrap_or(raw.len());
            raw[..end].to_string()
        }
    }
}

/// Slice the netloc out of a URL the parser rejected (e.g. hosts with
/// unusual labels): drop the scheme, userinfo, port, and everything from
/// the first path/query/fragment delimiter on.
fn manual_netloc(raw: &str) -> String {
    let after_scheme = match raw.split_once("://") {
        Some((_, rest)) => rest,
        None => return String::new(),
    };

    let end = after_scheme
        .find(['/', '?', '#'])
        .unwrap_or(after_scheme.len());
    let authority = &after_scheme[..end];

    let host = authority.rsplit('@').next().unwrap_or(authority);
    host.split(':').next().unwrap_or(host).to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_domain_root_from_article_url() {
        assert_eq!(
            normalize_domain("https://www.theguardian.com/us-news/2023/article"),
            "theguardian.com"
        );
    }

    #[test]
    fn doubled_dots_and_stacked_labels_collapse() {
        assert_eq!(
            normalize_domain("https://www..news.theguardian.com/article/page"),
            "theguardian.com"
        );
    }

    #[test]
    fn news_label_stripped_once_at_boundary() {
        assert_eq!(normalize_domain("https://news.bbc.co.uk/story"), "bbc.co.uk");
        // Not a label boundary: `newsweek.com` keeps its name.
        assert_eq!(normalize_domain("https://www.newsweek.com/a"), "newsweek.com");
    }

    #[test]
    fn host_case_and_port_normalized() {
        assert_eq!(normalize_domain("https://WWW.CNN.com:8080/x"), "cnn.com");
    }

    #[test]
    fn never_fails_on_malformed_input() {
        assert_eq!(normalize_domain(""), "");
        assert_eq!(normalize_domain("mailto:someone@example.com"), "");
        assert_eq!(normalize_domain("/wiki/Relative_Link"), "");
        assert_eq!(normalize_domain("#cite_note-4"), "");
    }

    #[test]
    fn bare_host_input_passes_through() {
        assert_eq!(normalize_domain("theguardian.com"), "theguardian.com");
        assert_eq!(normalize_domain("www.cnn.com"), "cnn.com");
    }

    #[test]
    fn idempotent_on_own_output() {
        let inputs = [
            "https://www..news.theguardian.com/article/page",
            "https://www.cnn.com/2020/story",
            "not a url",
            "",
            "ftp://files.example.org/pub",
        ];
        for input in inputs {
            let once = normalize_domain(input);
            assert_eq!(
                normalize_domain(&once),
                once,
                "not idempotent for {input:?}"
            );
        }
    }
}
