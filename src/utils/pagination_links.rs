//! Navigation links for paginated listings.
//!
//! Links are derived from the request URI itself so that every other query
//! parameter (filters, ordering, ...) survives navigation untouched.

use serde::Serialize;
use url::{Url, form_urlencoded};

/// Query parameter carrying the 1-based page number.
pub const PAGE_QUERY_PARAM: &str = "page";
/// Query parameter carrying the page size.
pub const SIZE_QUERY_PARAM: &str = "size";

/// `self`/`first`/`prev`/`next`/`last` links of a paginated listing.
///
/// Absent links are omitted from the JSON output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaginationLinks {
    #[serde(rename = "self", skip_serializing_if = "Option::is_none")]
    pub self_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last: Option<String>,
}

impl PaginationLinks {
    /// Computes the navigation links for `page` of a listing of `total_items`
    /// split in pages of `size`.
    ///
    /// Returns `None` when there is nothing to navigate: no items, an
    /// unbounded (`-1`) or non-positive size, a single page, or a `page`
    /// outside `1..=last_page`. Callers decide whether an out-of-range page is
    /// an error; this function never panics.
    ///
    /// - `self` is the request URI as received.
    /// - `page` is rewritten in place, or appended when the request had none.
    /// - `size` is rewritten only if the request carried it.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let uri = Url::parse("http://portal/api/apis?page=3&size=15")?;
    /// let links = PaginationLinks::compute(3, 15, 120, &uri).unwrap();
    /// assert_eq!(links.last.as_deref(), Some("http://portal/api/apis?page=8&size=15"));
    /// ```
    pub fn compute(page: i64, size: i64, total_items: i64, request_uri: &Url) -> Option<Self> {
        if total_items <= 0 || size <= 0 || page < 1 {
            return None;
        }

        let last_page = (total_items - 1) / size + 1;
        if last_page <= 1 || page > last_page {
            return None;
        }

        let template = LinkTemplate::parse(request_uri);

        Some(Self {
            self_link: Some(request_uri.to_string()),
            first: Some(template.render(1, size)),
            prev: (page > 1).then(|| template.render(page - 1, size)),
            next: (page < last_page).then(|| template.render(page + 1, size)),
            last: Some(template.render(last_page, size)),
        })
    }
}

enum Segment<'a> {
    Raw(&'a str),
    Page,
    Size,
}

/// Request URI with its query split into raw segments, the first `page` and
/// the first `size` marked for substitution. Repeated keys stay untouched.
struct LinkTemplate<'a> {
    base: &'a Url,
    segments: Vec<Segment<'a>>,
}

impl<'a> LinkTemplate<'a> {
    fn parse(base: &'a Url) -> Self {
        let (mut has_page, mut has_size) = (false, false);
        let mut segments: Vec<Segment<'a>> = base
            .query()
            .unwrap_or_default()
            .split('&')
            .filter(|raw| !raw.is_empty())
            .map(|raw| {
                let key = form_urlencoded::parse(raw.as_bytes()).next().map(|(k, _)| k);
                match key.as_deref() {
                    Some(PAGE_QUERY_PARAM) if !has_page => {
                        has_page = true;
                        Segment::Page
                    }
                    Some(SIZE_QUERY_PARAM) if !has_size => {
                        has_size = true;
                        Segment::Size
                    }
                    _ => Segment::Raw(raw),
                }
            })
            .collect();

        if !has_page {
            segments.push(Segment::Page);
        }

        Self { base, segments }
    }

    fn render(&self, page: i64, size: i64) -> String {
        let query = self
            .segments
            .iter()
            .map(|segment| match segment {
                Segment::Raw(raw) => (*raw).to_string(),
                Segment::Page => format!("{PAGE_QUERY_PARAM}={page}"),
                Segment::Size => format!("{SIZE_QUERY_PARAM}={size}"),
            })
            .collect::<Vec<_>>()
            .join("&");

        let mut url = self.base.clone();
        url.set_query(Some(&query));
        url.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "http://localhost:3000/api/apis";

    fn uri(query: &str) -> Url {
        if query.is_empty() {
            Url::parse(BASE).unwrap()
        } else {
            Url::parse(&format!("{BASE}?{query}")).unwrap()
        }
    }

    fn link(query: &str) -> Option<String> {
        Some(format!("{BASE}?{query}"))
    }

    fn page_and_size(link: &str) -> (i64, Option<i64>) {
        let url = Url::parse(link).unwrap();
        let mut page = 1;
        let mut size = None;
        for (k, v) in url.query_pairs() {
            match k.as_ref() {
                PAGE_QUERY_PARAM => page = v.parse().unwrap(),
                SIZE_QUERY_PARAM => size = Some(v.parse().unwrap()),
                _ => {}
            }
        }
        (page, size)
    }

    #[test]
    fn test_middle_page_with_explicit_size() {
        let links = PaginationLinks::compute(3, 15, 120, &uri("page=3&size=15")).unwrap();

        assert_eq!(links.self_link, link("page=3&size=15"));
        assert_eq!(links.first, link("page=1&size=15"));
        assert_eq!(links.prev, link("page=2&size=15"));
        assert_eq!(links.next, link("page=4&size=15"));
        assert_eq!(links.last, link("page=8&size=15"));
    }

    #[test]
    fn test_single_page_has_no_links() {
        assert_eq!(PaginationLinks::compute(1, 15, 3, &uri("page=1&size=15")), None);
        assert_eq!(PaginationLinks::compute(1, 10, 10, &uri("")), None);
    }

    #[test]
    fn test_page_out_of_range_has_no_links() {
        assert_eq!(PaginationLinks::compute(20, 10, 100, &uri("page=20")), None);
        assert_eq!(PaginationLinks::compute(0, 10, 100, &uri("page=0")), None);
        assert_eq!(PaginationLinks::compute(-4, 10, 100, &uri("page=-4")), None);
    }

    #[test]
    fn test_unbounded_or_empty_has_no_links() {
        assert_eq!(PaginationLinks::compute(1, -1, 500, &uri("size=-1")), None);
        assert_eq!(PaginationLinks::compute(1, 10, 0, &uri("")), None);
        assert_eq!(PaginationLinks::compute(1, 0, 30, &uri("size=0")), None);
    }

    #[test]
    fn test_first_page_has_no_prev() {
        let links = PaginationLinks::compute(1, 10, 25, &uri("page=1")).unwrap();

        assert_eq!(links.prev, None);
        assert_eq!(links.first, link("page=1"));
        assert_eq!(links.next, link("page=2"));
        assert_eq!(links.last, link("page=3"));
    }

    #[test]
    fn test_last_page_has_no_next() {
        let links = PaginationLinks::compute(3, 10, 25, &uri("page=3")).unwrap();

        assert_eq!(links.next, None);
        assert_eq!(links.prev, link("page=2"));
        assert_eq!(links.last, link("page=3"));
    }

    #[test]
    fn test_default_page_default_size_appends_page_only() {
        let links = PaginationLinks::compute(1, 10, 25, &uri("")).unwrap();

        assert_eq!(links.self_link, Some(BASE.to_string()));
        assert_eq!(links.first, link("page=1"));
        assert_eq!(links.next, link("page=2"));
        assert_eq!(links.last, link("page=3"));
    }

    #[test]
    fn test_default_page_specific_size() {
        let links = PaginationLinks::compute(1, 5, 12, &uri("size=5")).unwrap();

        assert_eq!(links.first, link("size=5&page=1"));
        assert_eq!(links.next, link("size=5&page=2"));
        assert_eq!(links.last, link("size=5&page=3"));
    }

    #[test]
    fn test_specific_page_default_size_does_not_inject_size() {
        let links = PaginationLinks::compute(2, 10, 35, &uri("page=2")).unwrap();

        assert_eq!(links.first, link("page=1"));
        assert_eq!(links.prev, link("page=1"));
        assert_eq!(links.next, link("page=3"));
        assert_eq!(links.last, link("page=4"));
    }

    #[test]
    fn test_other_parameters_keep_value_and_position() {
        let links =
            PaginationLinks::compute(2, 10, 35, &uri("q=pet%20store&page=2&order=-name")).unwrap();

        assert_eq!(links.first, link("q=pet%20store&page=1&order=-name"));
        assert_eq!(links.next, link("q=pet%20store&page=3&order=-name"));
        assert_eq!(links.last, link("q=pet%20store&page=4&order=-name"));
    }

    #[test]
    fn test_parameter_with_page_prefix_is_not_rewritten() {
        let links = PaginationLinks::compute(1, 10, 25, &uri("pages=7&homepage=x")).unwrap();

        assert_eq!(links.next, link("pages=7&homepage=x&page=2"));
    }

    #[test]
    fn test_repeated_keys_rewrite_first_occurrence_only() {
        let links =
            PaginationLinks::compute(2, 10, 35, &uri("page=2&size=10&page=2&size=10")).unwrap();

        assert_eq!(links.next, link("page=3&size=10&page=2&size=10"));
        assert_eq!(links.first, link("page=1&size=10&page=2&size=10"));
    }

    #[test]
    fn test_self_link_is_reproducible() {
        let links = PaginationLinks::compute(2, 10, 95, &uri("size=10&q=x")).unwrap();
        let next = links.next.unwrap();
        let (page, size) = page_and_size(&next);

        let again = PaginationLinks::compute(
            page,
            size.unwrap_or(10),
            95,
            &Url::parse(&next).unwrap(),
        )
        .unwrap();

        assert_eq!(again.self_link, Some(next));
    }

    #[test]
    fn test_extreme_values_do_not_panic() {
        let links = PaginationLinks::compute(i64::MAX, 1, i64::MAX, &uri("")).unwrap();
        assert_eq!(links.next, None);
        assert_eq!(PaginationLinks::compute(i64::MAX, i64::MAX, i64::MAX, &uri("")), None);
        assert_eq!(PaginationLinks::compute(i64::MIN, i64::MIN, i64::MIN, &uri("")), None);
    }

    #[test]
    fn test_serialization_omits_absent_links() {
        let links = PaginationLinks::compute(1, 10, 25, &uri("page=1")).unwrap();
        let json = serde_json::to_value(&links).unwrap();

        assert!(json.get("prev").is_none());
        assert_eq!(json["self"], format!("{BASE}?page=1"));
        assert_eq!(json["next"], format!("{BASE}?page=2"));
    }
}
