//! Lazily-evaluated, cached search pagination.
//!
//! A [`Search`] issues no network traffic until a page is requested, caches
//! every page it resolves, and folds transport failures into "no more
//! results". Iteration is exposed through explicit cursor methods rather
//! than a blanket collection trait so the possibility of network calls stays
//! visible at the call site.


use log::warn;
use serde::Deserialize;
use std::collections::{HashMap, VecDeque};
use std::str::FromStr;

use crate::client::ApiClient;
use crate::error::{Result, RinthError};
use crate::facet::FacetGroup;
use crate::models::search_result::SearchResult;

pub const MIN_PAGE_SIZE: usize = 1;
pub const MAX_PAGE_SIZE: usize = 100;
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Server-side result ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortIndex {
    #[default]
    Relevance,
    Downloads,
    Follows,
    Newest,
    Updated,
}

impl SortIndex {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortIndex::Relevance => "relevance",
            SortIndex::Downloads => "downloads",
            SortIndex::Follows => "follows",
            SortIndex::Newest => "newest",
            SortIndex::Updated => "updated",
        }
    }
}

impl FromStr for SortIndex {
    type Err = RinthError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "relevance" => Ok(SortIndex::Relevance),
            "downloads" => Ok(SortIndex::Downloads),
            "follows" => Ok(SortIndex::Follows),
            "newest" => Ok(SortIndex::Newest),
            "updated" => Ok(SortIndex::Updated),
            _ => Err(RinthError::InvalidArgument(format!(
                "Unknown sort index: {s}"
            ))),
        }
    }
}

impl std::fmt::Display for SortIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Resolved state of one page. `End` is the exhausted sentinel: there are no
/// results at or past this index.
#[derive(Debug, Clone, PartialEq)]
pub enum Page {
    Results(Vec<SearchResult>),
    End,
}

impl Page {
    pub fn is_end(&self) -> bool {
        matches!(self, Page::End)
    }

    pub fn results(&self) -> Option<&[SearchResult]> {
        match self {
            Page::Results(results) => Some(results),
            Page::End => None,
        }
    }
}

/// Wire shape of a search response.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SearchResponse {
    pub hits: Vec<SearchResult>,
    pub offset: u64,
    pub limit: u64,
    pub total_hits: u64,
}

/// Stateful paginated query. Construction is free; the first network call
/// happens when a page is requested. Pages resolve at most once each and the
/// cache is shared by every iterator created from this cursor.
///
/// The `&mut self` receivers serialize all cache access, so the
/// at-most-one-fetch-per-page guarantee holds without any locking.
pub struct Search<'a> {
    client: &'a ApiClient,
    query: Option<String>,
    page_size: usize,
    sort: SortIndex,
    facets: FacetGroup,
    filters: Option<String>,
    total_hits: Option<u64>,
    exhausted_at: Option<usize>,
    pages: HashMap<usize, Page>,
}

impl<'a> Search<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self {
            client,
            query: None,
            page_size: DEFAULT_PAGE_SIZE,
            sort: SortIndex::default(),
            facets: FacetGroup::new(),
            filters: None,
            total_hits: None,
            exhausted_at: None,
            pages: HashMap::new(),
        }
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self.reset();
        self
    }

    /// Requested page size, clamped to [1, 100]. The server may still clamp
    /// further; its reported limit overwrites this after the first fetch.
    pub fn with_page_size(mut self, size: usize) -> Self {
        self.page_size = size.clamp(MIN_PAGE_SIZE, MAX_PAGE_SIZE);
        self.reset();
        self
    }

    pub fn with_sort(mut self, sort: SortIndex) -> Self {
        self.sort = sort;
        self.reset();
        self
    }

    pub fn with_facets(mut self, facets: FacetGroup) -> Self {
        self.facets = facets;
        self.reset();
        self
    }

    /// Raw filter expression, the slower free-form alternative to facets.
    pub fn with_filters(mut self, expression: impl Into<String>) -> Self {
        self.filters = Some(expression.into());
        self.reset();
        self
    }

    // Cached pages describe one exact set of wire parameters; changing any
    // of them invalidates everything resolved so far.
    fn reset(&mut self) {
        self.total_hits = None;
        self.exhausted_at = None;
        self.pages.clear();
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn sort(&self) -> SortIndex {
        self.sort
    }

    /// Total number of hits the server reported, or `None` before the first
    /// successful fetch.
    pub fn total_hits(&self) -> Option<u64> {
        self.total_hits
    }

    /// Resolve one page, fetching it if this cursor has never seen it.
    ///
    /// Repeated calls for the same index return the cached state and are
    /// free; a cursor issues at most one request per page index over its
    /// lifetime. Transport failures and non-success responses are not errors
    /// here: the page resolves to [`Page::End`] and stays that way.
    pub fn page(&mut self, index: usize) -> &Page {
        if self.pages.contains_key(&index) {
            return &self.pages[&index];
        }

        if let Some(done) = self.exhausted_at {
            if index >= done {
                return self.pages.entry(index).or_insert(Page::End);
            }
        }

        let offset = index as u64 * self.page_size as u64;
        let page = if self.total_hits.is_some_and(|total| offset > total) {
            // Defined absent: no point asking the server past the end.
            Page::End
        } else {
            match self.fetch(offset) {
                Ok(response) => {
                    self.total_hits = Some(response.total_hits);
                    self.page_size =
                        (response.limit as usize).clamp(MIN_PAGE_SIZE, MAX_PAGE_SIZE);
                    Page::Results(response.hits)
                }
                Err(e) => {
                    warn!("search page {index} failed, treating as end of results: {e}");
                    Page::End
                }
            }
        };

        if page.is_end() {
            self.exhausted_at = Some(self.exhausted_at.map_or(index, |done| done.min(index)));
        }
        self.pages.entry(index).or_insert(page)
    }

    fn fetch(&self, offset: u64) -> Result<SearchResponse> {
        self.client.search_page(
            self.query.as_deref(),
            &self.facets,
            self.sort,
            offset,
            self.page_size,
            self.filters.as_deref(),
        )
    }

    /// Lazy sequence of result pages, walking from page 0 until the first
    /// exhausted page. Every call starts a fresh walk, but all walks share
    /// this cursor's cache: a second full traversal issues no network calls.
    pub fn pages(&mut self) -> Pages<'_, 'a> {
        Pages {
            search: self,
            index: 0,
        }
    }

    /// Lazy sequence of individual results, [`Search::pages`] flattened in
    /// order.
    pub fn results(&mut self) -> Results<'_, 'a> {
        Results {
            search: self,
            index: 0,
            buffer: VecDeque::new(),
        }
    }
}

impl std::fmt::Debug for Search<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Search")
            .field("query", &self.query)
            .field("page_size", &self.page_size)
            .field("sort", &self.sort)
            .field("total_hits", &self.total_hits)
            .field("cached_pages", &self.pages.len())
            .finish()
    }
}

/// Iterator over resolved pages. May trigger one network call per step.
pub struct Pages<'s, 'a> {
    search: &'s mut Search<'a>,
    index: usize,
}

impl Iterator for Pages<'_, '_> {
    type Item = Vec<SearchResult>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.search.page(self.index) {
            Page::End => None,
            Page::Results(results) => {
                self.index += 1;
                Some(results.clone())
            }
        }
    }
}

/// Iterator over individual results. May trigger one network call per page
/// boundary.
pub struct Results<'s, 'a> {
    search: &'s mut Search<'a>,
    index: usize,
    buffer: VecDeque<SearchResult>,
}

impl Iterator for Results<'_, '_> {
    type Item = SearchResult;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(result) = self.buffer.pop_front() {
                return Some(result);
            }
            match self.search.page(self.index) {
                Page::End => return None,
                Page::Results(results) => {
                    self.index += 1;
                    self.buffer.extend(results.iter().cloned());
                }
            }
        }
    }
}
