use attohttpc::header::HeaderMap;

const LIMIT_HEADER: &str = "X-Ratelimit-Limit";
const REMAINING_HEADER: &str = "X-Ratelimit-Remaining";
const RESET_HEADER: &str = "X-Ratelimit-Reset";

/// Rate-limit counters reported by the API on every response. Bookkeeping
/// only: the client records the latest values and exposes them read-only,
/// it never throttles or retries on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimit {
    /// Maximum number of requests per window.
    pub limit: u32,
    /// Requests left in the current window.
    pub remaining: u32,
    /// Seconds until the window resets.
    pub reset_secs: u32,
}

impl RateLimit {
    /// Extract the counters from response headers. Returns `None` unless all
    /// three headers are present and numeric (CDN responses carry none).
    pub(crate) fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let value = |name: &str| -> Option<u32> {
            headers.get(name)?.to_str().ok()?.trim().parse().ok()
        };
        Some(Self {
            limit: value(LIMIT_HEADER)?,
            remaining: value(REMAINING_HEADER)?,
            reset_secs: value(RESET_HEADER)?,
        })
    }
}
