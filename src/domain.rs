//! Grouping-key extraction from tab URLs.

use url::Url;

/// Sentinel bucket for URLs that have no usable host.
pub const OTHER_DOMAIN: &str = "other";

/// Extract the grouping key for a tab: the host component of its URL.
///
/// URLs that fail to parse, and URLs that parse but carry no host
/// (`about:blank`, `data:` URIs, `chrome://` oddities), all land in the
/// `"other"` bucket. Never fails.
pub fn domain_of(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|parsed| parsed.host_str().map(str::to_string))
        .unwrap_or_else(|| OTHER_DOMAIN.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_of_basic() {
        assert_eq!(domain_of("https://www.google.com"), "www.google.com");
        assert_eq!(domain_of("https://google.com"), "google.com");
        assert_eq!(domain_of("http://google.com"), "google.com");
    }

    #[test]
    fn test_domain_of_keeps_subdomain() {
        // The grouping key is the full host, not the registrable domain:
        // docs.rs and mail.google.com are distinct buckets.
        assert_eq!(domain_of("https://ai.microsoft.com"), "ai.microsoft.com");
        assert_eq!(domain_of("https://mail.google.com/mail/u/0"), "mail.google.com");
    }

    #[test]
    fn test_domain_of_ignores_path_query_port() {
        assert_eq!(domain_of("https://www.google.com/search?q=rust"), "www.google.com");
        assert_eq!(domain_of("https://github.com/rust-lang/rust"), "github.com");
        assert_eq!(domain_of("http://localhost:3000/app"), "localhost");
        assert_eq!(domain_of("http://127.0.0.1:8080"), "127.0.0.1");
    }

    #[test]
    fn test_domain_of_normalizes_case() {
        assert_eq!(domain_of("https://WWW.Example.COM/Path"), "www.example.com");
    }

    #[test]
    fn test_domain_of_malformed_is_other() {
        assert_eq!(domain_of(""), OTHER_DOMAIN);
        assert_eq!(domain_of("not a url"), OTHER_DOMAIN);
        assert_eq!(domain_of("https://"), OTHER_DOMAIN);
    }

    #[test]
    fn test_domain_of_hostless_is_other() {
        assert_eq!(domain_of("about:blank"), OTHER_DOMAIN);
        assert_eq!(domain_of("data:text/plain,hello"), OTHER_DOMAIN);
    }

    #[test]
    fn test_domain_of_deterministic() {
        let url = "https://news.ycombinator.com/item?id=1";
        assert_eq!(domain_of(url), domain_of(url));
    }
}
