mod rate_limit;
mod tags;

pub use rate_limit::RateLimit;

use attohttpc::Session;
use attohttpc::header::HeaderMap;
use log::{debug, trace, warn};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::cell::{Cell, RefCell};
use std::time::Duration;

use crate::config::ClientConfig;
use crate::error::{Result, RinthError};
use crate::facet::FacetGroup;
use crate::models::project::Project;
use crate::models::tag::{Category, DonationPlatform, GameVersion, LicenseTag, Loader};
use crate::models::user::{TeamMember, User};
use crate::models::version::Version;
use crate::search::{Search, SearchResponse, SortIndex};
use crate::user_agent;
use tags::TagCache;

/// Synchronous client for the platform API. One instance owns its HTTP
/// session, the latest rate-limit counters, and the memoized tag lists.
///
/// The client is single-threaded by design: rate-limit and tag state live in
/// `Cell`/`RefCell`, so share it across threads behind your own lock if you
/// must.
#[derive(Debug, Clone)]
pub struct ApiClient {
    session: Session,
    base_url: String,
    rate_limit: Cell<Option<RateLimit>>,
    tags: RefCell<TagCache>,
}

impl ApiClient {
    pub fn new() -> Self {
        Self::with_config(ClientConfig::default())
    }

    /// Build a client from a loaded configuration. The bearer token, when
    /// present, is attached to every request as the `Authorization` header.
    pub fn with_config(config: ClientConfig) -> Self {
        let mut session = Session::new();
        session.header("User-Agent", user_agent::api_client());
        session.timeout(Duration::from_secs(config.timeout_secs));
        if let Some(token) = &config.token {
            session.header("Authorization", token.clone());
        }

        Self {
            session,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            rate_limit: Cell::new(None),
            tags: RefCell::new(TagCache::default()),
        }
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.session.timeout(timeout);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The rate-limit counters from the most recent API response, if any
    /// response carried them yet.
    pub fn rate_limit(&self) -> Option<RateLimit> {
        self.rate_limit.get()
    }

    fn record_rate_limit(&self, headers: &HeaderMap) {
        if let Some(rate_limit) = RateLimit::from_headers(headers) {
            trace!("rate limit: {rate_limit:?}");
            self.rate_limit.set(Some(rate_limit));
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    /// GET an endpoint and decode the JSON body. Non-success responses are an
    /// error here; use `get_optional` for endpoints where absence is expected.
    pub fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path);
        debug!("GET {url}");
        let response = self.session.get(&url).send()?;
        self.record_rate_limit(response.headers());
        if !response.is_success() {
            return Err(self.request_failed(path, response));
        }
        let body = response.text()?;
        decode_body(&body)
    }

    /// POST a JSON body to an endpoint and decode the JSON response.
    pub fn post<T: DeserializeOwned, B: serde::Serialize>(&self, path: &str, body: &B) -> Result<T> {
        let url = self.url(path);
        debug!("POST {url}");
        let response = self.session.post(&url).json(body)?.send()?;
        self.record_rate_limit(response.headers());
        if !response.is_success() {
            return Err(self.request_failed(path, response));
        }
        let body = response.text()?;
        decode_body(&body)
    }

    /// GET an endpoint where the resource may simply not exist. Transport
    /// failures and non-success statuses map to `None`; only a body that
    /// fails to decode is an error.
    fn get_optional<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>> {
        let url = self.url(path);
        debug!("GET {url}");
        let response = match self.session.get(&url).send() {
            Ok(response) => response,
            Err(e) => {
                warn!("GET {path} failed: {e}");
                return Ok(None);
            }
        };
        self.record_rate_limit(response.headers());
        if !response.is_success() {
            debug!("GET {path} returned HTTP {}", response.status());
            return Ok(None);
        }
        let body = match response.text() {
            Ok(body) => body,
            Err(e) => {
                warn!("GET {path} body read failed: {e}");
                return Ok(None);
            }
        };
        decode_body(&body).map(Some)
    }

    fn request_failed(&self, path: &str, response: attohttpc::Response) -> RinthError {
        let status = response.status();
        let api_error = response
            .text()
            .ok()
            .and_then(|body| serde_json::from_str::<ApiErrorResponse>(&body).ok());
        match api_error {
            Some(err) => RinthError::RequestFailed(format!(
                "HTTP {} for {path}: {} ({})",
                status.as_u16(),
                err.description,
                err.error
            )),
            None => RinthError::RequestFailed(format!(
                "HTTP {} for {path}: {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("unknown error")
            )),
        }
    }

    /// Fetch a project by id or slug. `None` when it does not exist or the
    /// transport fails.
    pub fn project(&self, id_or_slug: &str) -> Result<Option<Project>> {
        self.get_optional(&format!("project/{id_or_slug}"))
    }

    /// Fetch a user by id or username.
    pub fn user(&self, id_or_username: &str) -> Result<Option<User>> {
        self.get_optional(&format!("user/{id_or_username}"))
    }

    /// Fetch the member list of a team.
    pub fn team_members(&self, team_id: &str) -> Result<Option<Vec<TeamMember>>> {
        self.get_optional(&format!("team/{team_id}/members"))
    }

    /// Fetch a single version by id.
    pub fn version(&self, version_id: &str) -> Result<Option<Version>> {
        self.get_optional(&format!("version/{version_id}"))
    }

    /// Fetch every version of a project, newest first.
    pub fn project_versions(&self, id_or_slug: &str) -> Result<Vec<Version>> {
        self.get(&format!("project/{id_or_slug}/version"))
    }

    /// Start building a search cursor over this client.
    pub fn search(&self) -> Search<'_> {
        Search::new(self)
    }

    pub(crate) fn search_page(
        &self,
        query: Option<&str>,
        facets: &FacetGroup,
        sort: SortIndex,
        offset: u64,
        limit: usize,
        filters: Option<&str>,
    ) -> Result<SearchResponse> {
        let url = self.url("search");
        let mut request = self.session.get(&url);
        if let Some(query) = query {
            request = request.param("query", query);
        }
        if !facets.is_empty() {
            request = request.param("facets", facets.to_query_value());
        }
        request = request
            .param("index", sort.as_str())
            .param("offset", offset.to_string())
            .param("limit", limit.to_string());
        if let Some(filters) = filters {
            request = request.param("filters", filters);
        }
        debug!("GET {url} index={} offset={offset} limit={limit}", sort.as_str());

        let response = request.send()?;
        self.record_rate_limit(response.headers());
        if !response.is_success() {
            return Err(self.request_failed("search", response));
        }
        let body = response.text()?;
        let decoded: SearchResponse = decode_body(&body)?;
        trace!(
            "search response: offset={} limit={} total_hits={}",
            decoded.offset, decoded.limit, decoded.total_hits
        );
        Ok(decoded)
    }

    /// Fetch raw bytes from an absolute URL, typically a CDN file link.
    pub(crate) fn get_bytes(&self, url: &str) -> Result<Vec<u8>> {
        debug!("GET {url}");
        let response = self.session.get(url).follow_redirects(true).send()?;
        self.record_rate_limit(response.headers());
        if !response.is_success() {
            return Err(RinthError::RequestFailed(format!(
                "HTTP {} for {url}",
                response.status().as_u16()
            )));
        }
        Ok(response.bytes()?)
    }

    /// Drop every memoized tag list; the next accessor call refetches.
    pub fn invalidate_tags(&self) {
        self.tags.borrow_mut().clear();
    }

    pub fn categories(&self) -> Result<Vec<Category>> {
        self.tag_list(
            "tag/category",
            |cache| cache.categories.clone(),
            |cache, list| cache.categories = Some(list),
        )
    }

    pub fn loaders(&self) -> Result<Vec<Loader>> {
        self.tag_list(
            "tag/loader",
            |cache| cache.loaders.clone(),
            |cache, list| cache.loaders = Some(list),
        )
    }

    pub fn game_versions(&self) -> Result<Vec<GameVersion>> {
        self.tag_list(
            "tag/game_version",
            |cache| cache.game_versions.clone(),
            |cache, list| cache.game_versions = Some(list),
        )
    }

    pub fn licenses(&self) -> Result<Vec<LicenseTag>> {
        self.tag_list(
            "tag/license",
            |cache| cache.licenses.clone(),
            |cache, list| cache.licenses = Some(list),
        )
    }

    pub fn donation_platforms(&self) -> Result<Vec<DonationPlatform>> {
        self.tag_list(
            "tag/donation_platform",
            |cache| cache.donation_platforms.clone(),
            |cache, list| cache.donation_platforms = Some(list),
        )
    }

    fn tag_list<T: Clone + DeserializeOwned>(
        &self,
        path: &str,
        read: impl Fn(&TagCache) -> Option<Vec<T>>,
        write: impl Fn(&mut TagCache, Vec<T>),
    ) -> Result<Vec<T>> {
        if let Some(cached) = read(&self.tags.borrow()) {
            trace!("tag cache hit for {path}");
            return Ok(cached);
        }
        let fetched: Vec<T> = self.get(path)?;
        write(&mut self.tags.borrow_mut(), fetched.clone());
        Ok(fetched)
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

fn decode_body<T: DeserializeOwned>(body: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|e| {
        trace!("undecodable body: {body}");
        RinthError::InvalidFormat(e.to_string())
    })
}

/// Error body shape the API uses for non-success responses.
#[derive(Debug, Clone, Deserialize)]
struct ApiErrorResponse {
    error: String,
    description: String,
}
