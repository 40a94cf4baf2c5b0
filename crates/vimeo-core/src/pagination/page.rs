//! Page and query types.

use serde::{Deserialize, Serialize};

/// Continuation references returned alongside a page.
///
/// Each reference is the query-string portion of the server's paging link,
/// kept verbatim. It is never parsed back into structured parameters, so
/// filters and sort order set on the first request survive navigation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cursor {
    pub next: Option<String>,
    pub previous: Option<String>,
    pub first: Option<String>,
    pub last: Option<String>,
}

impl Cursor {
    /// Build a cursor from server paging links (`/path?query` or bare queries).
    pub fn from_links(
        next: Option<&str>,
        previous: Option<&str>,
        first: Option<&str>,
        last: Option<&str>,
    ) -> Self {
        Self {
            next: next.and_then(continuation_of),
            previous: previous.and_then(continuation_of),
            first: first.and_then(continuation_of),
            last: last.and_then(continuation_of),
        }
    }
}

/// Extracts the query portion of a paging link.
///
/// `/users/1/videos?page=2&per_page=10` becomes `page=2&per_page=10`; a link
/// without `?` is taken to be a query already. Blank links count as absent.
pub fn continuation_of(link: &str) -> Option<String> {
    let query = match link.split_once('?') {
        Some((_, query)) => query,
        None => link,
    };
    let query = query.trim();
    (!query.is_empty()).then(|| query.to_string())
}

/// One fetched page of a listable resource.
///
/// Plain data: navigating produces a new `Page` through a
/// [`Paginator`](super::Paginator), never by mutating this one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Item count across all pages.
    pub total: u64,
    /// 1-based index of this page.
    pub page: u32,
    pub per_page: u32,
    pub cursor: Cursor,
}

impl<T> Page<T> {
    /// True when the whole result set fits on this page.
    pub fn is_single_page(&self) -> bool {
        self.cursor.first == self.cursor.last
    }

    pub fn has_next(&self) -> bool {
        self.cursor.next.is_some()
    }

    pub fn has_previous(&self) -> bool {
        self.cursor.previous.is_some()
    }

    /// Number of pages implied by `total` and `per_page`.
    pub fn page_count(&self) -> u64 {
        if self.per_page == 0 {
            return 0;
        }
        self.total.div_ceil(u64::from(self.per_page))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Transform the items, keeping the paging metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
            cursor: self.cursor,
        }
    }
}

/// Sort direction for list calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Asc,
    Desc,
}

/// Structured parameters of a first list request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,
    /// Free text search.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
}

impl ListParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = Some(per_page);
        self
    }

    pub fn filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    pub fn sort(mut self, sort: impl Into<String>, direction: Option<Direction>) -> Self {
        self.sort = Some(sort.into());
        self.direction = direction;
        self
    }

    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }
}

/// What a list call is asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListQuery {
    /// A first request built from parameters.
    Params(ListParams),
    /// An opaque query string from a [`Cursor`], sent unmodified as the
    /// entire query of the next request.
    Continuation(String),
}

impl From<ListParams> for ListQuery {
    fn from(params: ListParams) -> Self {
        ListQuery::Params(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(total: u64, cursor: Cursor) -> Page<u32> {
        Page {
            items: vec![],
            total,
            page: 1,
            per_page: 2,
            cursor,
        }
    }

    #[test]
    fn continuation_keeps_query_verbatim() {
        assert_eq!(
            continuation_of("/me/videos?sort=date&direction=desc&page=2&per_page=2").as_deref(),
            Some("sort=date&direction=desc&page=2&per_page=2")
        );
        assert_eq!(continuation_of("page=3").as_deref(), Some("page=3"));
        assert_eq!(continuation_of("/me/videos?"), None);
        assert_eq!(continuation_of(""), None);
    }

    #[test]
    fn empty_result_is_single_page() {
        let empty = page(0, Cursor::from_links(None, None, None, None));
        assert!(empty.is_single_page());
        assert_eq!(empty.cursor, Cursor::default());
        assert!(!empty.has_next());
        assert!(!empty.has_previous());
        assert_eq!(empty.page_count(), 0);
    }

    #[test]
    fn one_of_one_is_single_page() {
        let only = page(
            2,
            Cursor::from_links(None, None, Some("/c?page=1"), Some("/c?page=1")),
        );
        assert!(only.is_single_page());
        assert_eq!(only.page_count(), 1);
    }

    #[test]
    fn multi_page_is_not_single_page() {
        let first = page(
            5,
            Cursor::from_links(Some("/c?page=2"), None, Some("/c?page=1"), Some("/c?page=3")),
        );
        assert!(!first.is_single_page());
        assert_eq!(first.page_count(), 3);
        assert_eq!(first.cursor.next.as_deref(), Some("page=2"));
    }

    #[test]
    fn params_serialize_only_set_fields() {
        let params = ListParams::new()
            .per_page(2)
            .sort("date", Some(Direction::Desc));
        let value = serde_json::to_value(&params).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "per_page": 2, "sort": "date", "direction": "desc" })
        );
    }

    #[test]
    fn map_keeps_metadata() {
        let page = Page {
            items: vec![1, 2],
            total: 5,
            page: 1,
            per_page: 2,
            cursor: Cursor::from_links(Some("page=2"), None, None, None),
        };
        let mapped = page.map(|n| n * 10);
        assert_eq!(mapped.items, vec![10, 20]);
        assert_eq!(mapped.cursor.next.as_deref(), Some("page=2"));
    }
}
