/// Syntactic validators for email addresses and download links
use regex::Regex;
use std::sync::OnceLock;

fn email_regex() -> &'static Regex {
    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    EMAIL_REGEX.get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap())
}

// scheme, host with a dotted tld, then optional port, path segments, query and fragment
fn url_regex() -> &'static Regex {
    static URL_REGEX: OnceLock<Regex> = OnceLock::new();
    URL_REGEX.get_or_init(|| {
        Regex::new(
            r"^https?://([a-zA-Z0-9.-]+)(\.[a-zA-Z]{2,})(:\d+)?(/[\w.~-]*)*(\?[;&a-zA-Z0-9.=_~%-]*)?(#[a-zA-Z0-9_-]*)?$",
        )
        .unwrap()
    })
}

/// Returns true when `email` is shaped like `local@domain.tld`.
///
/// The check runs on the trimmed, lower-cased input, so surrounding whitespace
/// and upper-case letters never cause a rejection on their own.
pub fn is_email(email: &str) -> bool {
    let email = email.trim().to_lowercase();
    !email.is_empty() && email_regex().is_match(&email)
}

/// Returns true when `url` is an `http(s)://host.tld[:port][/path][?query][#fragment]` link.
pub fn is_url(url: &str) -> bool {
    let url = url.trim();
    !url.is_empty() && url_regex().is_match(url)
}
