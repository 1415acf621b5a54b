// Request-shaping types: list options for query strings and the JSON body of
// the `/query/ap` search endpoint.

use serde::{Deserialize, Serialize};

/// Page size the controller uses when `listSize` is omitted.
pub const DEFAULT_LIST_SIZE: u32 = 100;

/// Optional paging and scoping parameters accepted by every list endpoint.
///
/// Mapped onto the query string by [`query_pairs`](Self::query_pairs), which
/// is a pure function of the options: the same options always produce the
/// same pairs in the same order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOptions {
    /// Index of the first entry to retrieve. Controller default: 0.
    pub index: Option<u64>,
    /// Maximum number of entries per page. Controller default: 100.
    pub list_size: Option<u32>,
    /// Domain to scope the listing to. Controller default: the caller's domain.
    pub domain_id: Option<String>,
}

impl ListOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_index(mut self, index: u64) -> Self {
        self.index = Some(index);
        self
    }

    pub fn with_list_size(mut self, list_size: u32) -> Self {
        self.list_size = Some(list_size);
        self
    }

    pub fn with_domain_id(mut self, domain_id: impl Into<String>) -> Self {
        self.domain_id = Some(domain_id.into());
        self
    }

    /// Query-string pairs for these options, in fixed order.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(3);
        if let Some(index) = self.index {
            pairs.push(("index", index.to_string()));
        }
        if let Some(size) = self.list_size {
            pairs.push(("listSize", size.to_string()));
        }
        if let Some(domain) = self.domain_id.as_deref().filter(|d| !d.is_empty()) {
            pairs.push(("domainId", domain.to_owned()));
        }
        pairs
    }

    /// Page size used to advance the cursor.
    pub(crate) fn page_size(&self) -> u32 {
        self.list_size.unwrap_or(DEFAULT_LIST_SIZE).max(1)
    }

    /// Same scope, explicit cursor.
    pub(crate) fn at(&self, index: u64) -> Self {
        Self {
            index: Some(index),
            list_size: Some(self.page_size()),
            domain_id: self.domain_id.clone(),
        }
    }
}

// ── /query/ap body ───────────────────────────────────────────────────

/// Filter/sort body for `POST /query/ap`.
///
/// The default asks for every attribute of every AP, sorted by MAC.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApQuery {
    pub filters: Vec<QueryFilter>,
    pub full_text_search: QueryFilter,
    pub attributes: Vec<String>,
    pub sort_info: SortInfo,
    pub page: u32,
    pub limit: u32,
}

impl Default for ApQuery {
    fn default() -> Self {
        Self {
            filters: Vec::new(),
            full_text_search: QueryFilter::new("AND", ""),
            attributes: vec!["*".into()],
            sort_info: SortInfo {
                sort_column: "apMac".into(),
                dir: SortDirection::Asc,
            },
            page: 1,
            limit: 10_000,
        }
    }
}

impl ApQuery {
    /// Restrict results, e.g. `with_filter("ZONE", zone_id)`.
    pub fn with_filter(mut self, kind: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.push(QueryFilter::new(kind, value));
        self
    }

    pub fn with_search(mut self, text: impl Into<String>) -> Self {
        self.full_text_search.value = text.into();
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryFilter {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<String>,
}

impl QueryFilter {
    pub fn new(kind: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            value: value.into(),
            operator: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortInfo {
    pub sort_column: String,
    pub dir: SortDirection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortDirection {
    Asc,
    Desc,
}
