//! Limit/offset pagination
//!
//! Parses the `limit` and `offset` query parameters and builds the
//! `next`/`previous` links of a listing page.

use url::form_urlencoded;

/// Page size used when `limit` is missing or unusable
pub const DEFAULT_LIMIT: usize = 10;
/// Upper bound applied to any requested `limit`
pub const MAX_LIMIT: usize = 100;

// == Pagination ==
/// Limit/offset policy shared by every listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub default_limit: usize,
    pub max_limit: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_LIMIT,
            max_limit: MAX_LIMIT,
        }
    }
}

/// The slice of results one request asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub limit: usize,
    pub offset: usize,
}

impl Pagination {
    /// Resolves raw query values into a page request.
    ///
    /// A `limit` that is missing, not an integer, or not positive falls back
    /// to the default; larger values are clamped to the maximum. A bad
    /// `offset` becomes 0.
    pub fn resolve(&self, limit: Option<&str>, offset: Option<&str>) -> PageRequest {
        let limit = limit
            .and_then(|raw| raw.trim().parse::<i64>().ok())
            .filter(|&n| n > 0)
            .map(|n| usize::try_from(n).unwrap_or(usize::MAX).min(self.max_limit))
            .unwrap_or(self.default_limit);

        let offset = offset
            .and_then(|raw| raw.trim().parse::<i64>().ok())
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or(0);

        PageRequest { limit, offset }
    }
}

impl PageRequest {
    /// Link to the following page, if results remain past this one.
    pub fn next_link(&self, path: &str, query: Option<&str>, count: usize) -> Option<String> {
        if self.offset.saturating_add(self.limit) >= count {
            return None;
        }
        let offset = self.offset + self.limit;
        Some(with_params(
            path,
            query,
            &[("limit", self.limit), ("offset", offset)],
            &[],
        ))
    }

    /// Link to the preceding page, if this page does not start at 0.
    pub fn previous_link(&self, path: &str, query: Option<&str>) -> Option<String> {
        if self.offset == 0 {
            return None;
        }
        if self.offset <= self.limit {
            return Some(with_params(path, query, &[("limit", self.limit)], &["offset"]));
        }
        let offset = self.offset - self.limit;
        Some(with_params(
            path,
            query,
            &[("limit", self.limit), ("offset", offset)],
            &[],
        ))
    }
}

/// Rebuilds `path?query` with `set` parameters replaced and `remove` dropped.
///
/// Keys are compared after percent-decoding, so `off%73et` is treated as
/// `offset`. Untouched pairs keep their order and are re-encoded.
fn with_params(path: &str, query: Option<&str>, set: &[(&str, usize)], remove: &[&str]) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in form_urlencoded::parse(query.unwrap_or_default().as_bytes()) {
        let key = key.as_ref();
        if set.iter().any(|(name, _)| *name == key) || remove.contains(&key) {
            continue;
        }
        serializer.append_pair(key, &value);
    }
    for (name, value) in set {
        serializer.append_pair(name, &value.to_string());
    }

    let query = serializer.finish();
    if query.is_empty() {
        path.to_string()
    } else {
        format!("{}?{}", path, query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_defaults() {
        let page = Pagination::default().resolve(None, None);
        assert_eq!(page, PageRequest { limit: 10, offset: 0 });
    }

    #[test]
    fn test_limit_clamped_to_max() {
        let page = Pagination::default().resolve(Some("200"), None);
        assert_eq!(page.limit, 100);
    }

    #[test]
    fn test_unusable_values_fall_back() {
        let pagination = Pagination::default();
        assert_eq!(pagination.resolve(Some("0"), None).limit, 10);
        assert_eq!(pagination.resolve(Some("-3"), None).limit, 10);
        assert_eq!(pagination.resolve(Some("ten"), None).limit, 10);
        assert_eq!(pagination.resolve(None, Some("-1")).offset, 0);
        assert_eq!(pagination.resolve(None, Some("x")).offset, 0);
        assert_eq!(pagination.resolve(Some(" 5 "), Some("15")), PageRequest { limit: 5, offset: 15 });
    }

    #[test]
    fn test_next_link() {
        let page = PageRequest { limit: 10, offset: 0 };
        assert_eq!(
            page.next_link("/products", Some("search=oak"), 25).as_deref(),
            Some("/products?search=oak&limit=10&offset=10")
        );
        assert!(page.next_link("/products", None, 10).is_none());
    }

    #[test]
    fn test_next_link_replaces_existing_params() {
        let page = PageRequest { limit: 5, offset: 5 };
        assert_eq!(
            page.next_link("/products", Some("limit=5&offset=5&on_sale=true"), 20).as_deref(),
            Some("/products?on_sale=true&limit=5&offset=10")
        );
    }

    #[test]
    fn test_previous_link() {
        let first = PageRequest { limit: 10, offset: 0 };
        assert!(first.previous_link("/products", None).is_none());

        let second = PageRequest { limit: 10, offset: 10 };
        assert_eq!(
            second.previous_link("/products", Some("limit=10&offset=10")).as_deref(),
            Some("/products?limit=10")
        );

        let third = PageRequest { limit: 10, offset: 25 };
        assert_eq!(
            third.previous_link("/products", Some("offset=25")).as_deref(),
            Some("/products?limit=10&offset=15")
        );
    }

    #[test]
    fn test_links_match_encoded_keys() {
        let page = PageRequest { limit: 5, offset: 5 };
        assert_eq!(
            page.next_link("/products", Some("off%73et=5&%6Cimit=5"), 20).as_deref(),
            Some("/products?limit=5&offset=10")
        );
        assert_eq!(
            page.previous_link("/products", Some("off%73et=5")).as_deref(),
            Some("/products?limit=5")
        );
    }

    #[test]
    fn test_links_reencode_kept_params() {
        let page = PageRequest { limit: 10, offset: 0 };
        assert_eq!(
            page.next_link("/products", Some("search=oak%20table&on_sale=true"), 30).as_deref(),
            Some("/products?search=oak+table&on_sale=true&limit=10&offset=10")
        );
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        // Any integer limit resolves into 1..=max.
        #[test]
        fn prop_limit_always_in_range(raw in any::<i64>()) {
            let page = Pagination::default().resolve(Some(&raw.to_string()), None);
            prop_assert!(page.limit >= 1 && page.limit <= MAX_LIMIT);
        }

        // Walking `next` links visits every item exactly once.
        #[test]
        fn prop_next_links_cover_all(count in 0usize..500, limit in 1usize..=MAX_LIMIT) {
            let mut page = PageRequest { limit, offset: 0 };
            let mut seen = page.limit.min(count);
            while page.next_link("/p", None, count).is_some() {
                page.offset += page.limit;
                seen += page.limit.min(count - page.offset);
            }
            prop_assert_eq!(seen, count);
        }
    }
}
