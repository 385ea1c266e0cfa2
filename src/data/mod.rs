use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;
use thiserror::Error;
use unicode_width::UnicodeWidthChar;
use url::Url;

/// How many characters of a URL are shown in the list view.
pub const URL_DISPLAY_WIDTH: usize = 50;

/// Opaque service-assigned link identifier.
///
/// The wire value may be a JSON number or string; it is held verbatim and
/// compared only for equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct LinkId(pub String);

impl<'de> Deserialize<'de> for LinkId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Num(i64),
            Str(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Num(n) => LinkId(n.to_string()),
            Raw::Str(s) => LinkId(s),
        })
    }
}

impl std::fmt::Display for LinkId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A saved link as returned by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub id: LinkId,
    pub title: String,
    pub url: String,
}

/// Create-request payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewLink {
    pub title: String,
    pub url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Title and URL are both required")]
    MissingField,
    #[error("Enter a valid URL (must start with http:// or https://)")]
    InvalidUrl,
}

/// Validate user input for a new link before any request is issued.
///
/// Both fields must be non-empty after trimming, and the URL must parse as an
/// absolute http/https URI.
pub fn validate_new_link(title: &str, url: &str) -> Result<NewLink, ValidationError> {
    let title = title.trim();
    let url = url.trim();

    if title.is_empty() || url.is_empty() {
        return Err(ValidationError::MissingField);
    }

    match Url::parse(url) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Ok(NewLink {
            title: title.to_string(),
            url: url.to_string(),
        }),
        _ => Err(ValidationError::InvalidUrl),
    }
}

/// Case-insensitive substring filter over title OR url.
///
/// Returns indices into `links`; an empty query matches everything. Never
/// mutates or reorders the underlying collection.
pub fn filter_links(links: &[Link], query: &str) -> Vec<usize> {
    if query.is_empty() {
        return (0..links.len()).collect();
    }

    let needle = query.to_lowercase();
    links
        .iter()
        .enumerate()
        .filter(|(_, link)| {
            link.title.to_lowercase().contains(&needle)
                || link.url.to_lowercase().contains(&needle)
        })
        .map(|(idx, _)| idx)
        .collect()
}

/// Derived collection statistics shown in the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LinkStats {
    pub total: usize,
    pub domains: usize,
}

impl LinkStats {
    pub fn compute(links: &[Link]) -> Self {
        let hostnames: HashSet<String> = links
            .iter()
            .map(|link| hostname_of(&link.url))
            .collect();

        Self {
            total: links.len(),
            domains: hostnames.len(),
        }
    }
}

/// Hostname of a URL, or the "unknown" bucket when it does not parse as an
/// absolute URL with a host.
pub fn hostname_of(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.to_string()))
        .unwrap_or_else(|| "unknown".to_string())
}

/// Truncate a URL for display, appending an ellipsis when it exceeds
/// `URL_DISPLAY_WIDTH` columns. The stored URL is never truncated.
pub fn truncate_url(url: &str) -> String {
    truncate_to_width(url, URL_DISPLAY_WIDTH)
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    let mut width = 0;
    for (pos, c) in s.char_indices() {
        let w = c.width().unwrap_or(0);
        if width + w > max_width {
            let mut out = s[..pos].to_string();
            out.push('…');
            return out;
        }
        width += w;
    }
    s.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn link(id: &str, title: &str, url: &str) -> Link {
        Link {
            id: LinkId(id.to_string()),
            title: title.to_string(),
            url: url.to_string(),
        }
    }

    #[test]
    fn link_id_accepts_numbers_and_strings() {
        let numeric: Link = serde_json::from_str(
            r#"{"id": 7, "title": "Docs", "url": "https://docs.rs"}"#,
        )
        .unwrap();
        assert_eq!(numeric.id, LinkId("7".to_string()));

        let textual: Link = serde_json::from_str(
            r#"{"id": "abc-123", "title": "Docs", "url": "https://docs.rs"}"#,
        )
        .unwrap();
        assert_eq!(textual.id, LinkId("abc-123".to_string()));
    }

    #[test]
    fn validate_rejects_empty_fields() {
        assert_eq!(
            validate_new_link("", "http://x.com"),
            Err(ValidationError::MissingField)
        );
        assert_eq!(
            validate_new_link("   ", "http://x.com"),
            Err(ValidationError::MissingField)
        );
        assert_eq!(
            validate_new_link("Title", ""),
            Err(ValidationError::MissingField)
        );
    }

    #[test]
    fn validate_rejects_non_absolute_or_non_http_urls() {
        assert_eq!(
            validate_new_link("T", "not-a-url"),
            Err(ValidationError::InvalidUrl)
        );
        assert_eq!(
            validate_new_link("T", "/relative/path"),
            Err(ValidationError::InvalidUrl)
        );
        assert_eq!(
            validate_new_link("T", "ftp://files.example.com"),
            Err(ValidationError::InvalidUrl)
        );
    }

    #[test]
    fn validate_trims_and_accepts_http_and_https() {
        let new = validate_new_link("  Rust Book  ", " https://doc.rust-lang.org/book/ ").unwrap();
        assert_eq!(new.title, "Rust Book");
        assert_eq!(new.url, "https://doc.rust-lang.org/book/");

        assert!(validate_new_link("T", "http://x.com").is_ok());
    }

    #[test]
    fn filter_matches_title_or_url_case_insensitively() {
        let links = vec![
            link("1", "Rust Book", "https://doc.rust-lang.org/book/"),
            link("2", "HN", "https://news.ycombinator.com"),
            link("3", "crates", "https://CRATES.io"),
        ];

        assert_eq!(filter_links(&links, "rust"), vec![0]);
        assert_eq!(filter_links(&links, "RUST"), vec![0]);
        assert_eq!(filter_links(&links, "crates.io"), vec![2]);
        assert_eq!(filter_links(&links, "ycombinator"), vec![1]);
        assert_eq!(filter_links(&links, "zzz"), Vec::<usize>::new());
    }

    #[test]
    fn empty_query_matches_everything() {
        let links = vec![
            link("1", "a", "http://a.com"),
            link("2", "b", "http://b.com"),
        ];
        assert_eq!(filter_links(&links, ""), vec![0, 1]);
    }

    #[test]
    fn stats_count_distinct_hostnames() {
        let links = vec![
            link("1", "x", "http://a.com/x"),
            link("2", "y", "http://a.com/y"),
            link("3", "b", "http://b.com"),
        ];
        let stats = LinkStats::compute(&links);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.domains, 2);
    }

    #[test]
    fn unparsable_urls_share_one_unknown_bucket() {
        let links = vec![
            link("1", "bad", "not a url"),
            link("2", "worse", "also-not-a-url"),
            link("3", "ok", "http://a.com"),
        ];
        let stats = LinkStats::compute(&links);
        assert_eq!(stats.domains, 2); // "unknown" + "a.com"
        assert_eq!(hostname_of("not a url"), "unknown");
    }

    #[test]
    fn truncates_long_urls_for_display_only() {
        let url: String = "http://example.com/".to_string() + &"a".repeat(41); // 60 chars
        assert_eq!(url.len(), 60);

        let shown = truncate_url(&url);
        assert_eq!(shown.chars().count(), URL_DISPLAY_WIDTH + 1);
        assert!(shown.ends_with('…'));
        assert_eq!(&shown[..URL_DISPLAY_WIDTH], &url[..URL_DISPLAY_WIDTH]);
    }

    #[test]
    fn short_urls_render_unchanged() {
        assert_eq!(truncate_url("http://a.com"), "http://a.com");
    }
}
