//! # tubelinks Links
//!
//! Pulls http(s) URLs out of free text.
//!
//! Candidates are found with a permissive pattern and then each one is run
//! through a real URL parser. Anything that does not parse to an `http` or
//! `https` URL with a host is silently dropped.
//!
//! ## Example
//!
//! ```rust
//! use tubelinks_links::extract_links;
//!
//! let links = extract_links("visit http://a.com/x and http://a.com/x");
//! assert_eq!(links.len(), 1);
//! assert!(links.contains("http://a.com/x"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;
use url::Url;

/// Scheme, then host characters (word chars, `-`, `.` or `%XX`), then an
/// optional path/query/fragment tail.
static URL_CANDIDATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"https?://(?:[-\w.]|%[0-9a-fA-F]{2})+(?:[/\w\-?&=%.#~]*)?")
        .expect("URL candidate pattern is valid")
});

/// Returns every distinct http(s) URL found in `text`.
///
/// Links are returned exactly as written in the text. Never fails; text with
/// no usable URL yields an empty set.
pub fn extract_links(text: &str) -> BTreeSet<String> {
    URL_CANDIDATE
        .find_iter(text)
        .map(|m| m.as_str())
        .filter(|candidate| is_web_url(candidate))
        .map(str::to_owned)
        .collect()
}

/// True if `candidate` parses as an http(s) URL with a non-empty host.
fn is_web_url(candidate: &str) -> bool {
    match Url::parse(candidate) {
        Ok(url) => {
            matches!(url.scheme(), "http" | "https")
                && url.host_str().is_some_and(|h| !h.is_empty())
        }
        Err(_) => false,
    }
}
