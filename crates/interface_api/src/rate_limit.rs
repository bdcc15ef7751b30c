//! Sliding-window rate limiting backed by Redis
//!
//! The counter lives in an external store so every handler instance (and
//! every process) shares the same window. Each client identity maps to a
//! sorted set of request timestamps; a check trims entries older than the
//! window, counts what remains, and records the request only when it is
//! allowed. Rejected requests leave no trace in the store. Trim, count,
//! and record run as one server-side script, so concurrent checks against
//! the same identity serialize and the limit holds exactly.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::Request,
    middleware::Next,
    response::Response,
};
use redis::aio::MultiplexedConnection;
use thiserror::Error;
use tracing::{info, warn};

use crate::error::ApiError;
use crate::AppState;

/// Disambiguates requests that land on the same millisecond
static REQUEST_SEQ: AtomicU64 = AtomicU64::new(0);

/// Atomic trim-count-record over one identity's sorted set.
///
/// KEYS[1] = set key; ARGV = window start (ms), allowed count, member,
/// score (ms), key TTL (s). Returns 1 when the request is over the limit,
/// 0 when it was admitted and recorded.
const SLIDING_WINDOW_LUA: &str = r"
redis.call('ZREMRANGEBYSCORE', KEYS[1], 0, ARGV[1])
if redis.call('ZCARD', KEYS[1]) >= tonumber(ARGV[2]) then
    return 1
end
redis.call('ZADD', KEYS[1], ARGV[4], ARGV[3])
redis.call('EXPIRE', KEYS[1], ARGV[5])
return 0
";

fn sliding_window_script() -> &'static redis::Script {
    static SCRIPT: OnceLock<redis::Script> = OnceLock::new();
    SCRIPT.get_or_init(|| redis::Script::new(SLIDING_WINDOW_LUA))
}

/// Startup-time token that keeps members from colliding across processes
/// sharing the same counter store
fn process_token() -> &'static str {
    static TOKEN: OnceLock<String> = OnceLock::new();
    TOKEN.get_or_init(|| {
        let boot_nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        format!("{}-{boot_nanos:x}", std::process::id())
    })
}

/// Sorted-set member for one request: unique per process, per call
fn request_member(now_ms: i64) -> String {
    let seq = REQUEST_SEQ.fetch_add(1, Ordering::Relaxed);
    format!("{now_ms}-{}-{seq}", process_token())
}

/// Errors from the rate-limit counter store
#[derive(Debug, Error)]
pub enum RateLimitError {
    #[error("Counter store unavailable: {0}")]
    Store(#[from] redis::RedisError),
}

/// Outcome of a rate-limit check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateDecision {
    Allowed,
    Limited,
}

/// Shared sliding-window rate limiter handle
///
/// Holds a multiplexed Redis connection, so clones are cheap and all
/// handlers share one underlying connection. Constructed once at startup
/// and torn down when the server shuts down.
#[derive(Clone)]
pub struct RateLimiter {
    connection: MultiplexedConnection,
    times: u32,
    window: Duration,
}

impl RateLimiter {
    /// Connects to the counter store
    ///
    /// # Arguments
    ///
    /// * `redis_url` - Counter store URL, e.g. `redis://redis:6379`
    /// * `times` - Requests allowed per window
    /// * `window` - Window length
    pub async fn connect(
        redis_url: &str,
        times: u32,
        window: Duration,
    ) -> Result<Self, RateLimitError> {
        let client = redis::Client::open(redis_url)?;
        let connection = client.get_multiplexed_async_connection().await?;
        info!(%times, window_secs = window.as_secs(), "Rate limiter connected");
        Ok(Self {
            connection,
            times,
            window,
        })
    }

    /// Checks and records one request for the given client identity
    pub async fn check(&self, identity: &str) -> Result<RateDecision, RateLimitError> {
        let key = format!("rate:{identity}");
        let now_ms = unix_millis();
        let window_start = now_ms - self.window.as_millis() as i64;
        let ttl_secs = self.window.as_secs().max(1) as i64;
        let mut conn = self.connection.clone();

        let limited: i64 = sliding_window_script()
            .key(&key)
            .arg(window_start)
            .arg(self.times)
            .arg(request_member(now_ms))
            .arg(now_ms)
            .arg(ttl_secs)
            .invoke_async(&mut conn)
            .await?;

        if limited == 1 {
            Ok(RateDecision::Limited)
        } else {
            Ok(RateDecision::Allowed)
        }
    }
}

fn unix_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as i64
}

/// Rate-limiting middleware
///
/// Rejects with 429 before the handler body runs; a store outage surfaces
/// as a 500 rather than silently disabling the limit.
pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let identity = client_identity(&request);

    match state.rate_limiter.check(&identity).await {
        Ok(RateDecision::Allowed) => Ok(next.run(request).await),
        Ok(RateDecision::Limited) => {
            warn!(%identity, "Rate limit exceeded");
            Err(ApiError::RateLimited)
        }
        Err(err) => Err(ApiError::Internal(err.to_string())),
    }
}

/// Client identity for rate-limit keying: first `X-Forwarded-For` hop if
/// present, otherwise the peer address
fn client_identity(request: &Request<Body>) -> String {
    request
        .headers()
        .get("x-forwarded-for")
        .and_then(|header| header.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(|hop| hop.trim().to_string())
        .filter(|hop| !hop.is_empty())
        .or_else(|| {
            request
                .extensions()
                .get::<ConnectInfo<SocketAddr>>()
                .map(|info| info.0.ip().to_string())
        })
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::HeaderValue;

    fn request() -> Request<Body> {
        Request::builder().body(Body::empty()).unwrap()
    }

    #[test]
    fn forwarded_header_takes_first_hop() {
        let mut req = request();
        req.headers_mut().insert(
            "x-forwarded-for",
            HeaderValue::from_static("203.0.113.9, 10.0.0.1"),
        );
        assert_eq!(client_identity(&req), "203.0.113.9");
    }

    #[test]
    fn falls_back_to_peer_address() {
        let mut req = request();
        let addr: SocketAddr = "192.0.2.1:5000".parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        assert_eq!(client_identity(&req), "192.0.2.1");
    }

    #[test]
    fn unknown_when_no_identity_is_available() {
        assert_eq!(client_identity(&request()), "unknown");
    }

    #[test]
    fn members_never_collide_within_one_millisecond() {
        let now_ms = unix_millis();
        let members: std::collections::HashSet<_> =
            (0..64).map(|_| request_member(now_ms)).collect();
        assert_eq!(members.len(), 64);
    }

    #[test]
    fn members_carry_the_process_token() {
        // A member must identify its process so two servers sharing the
        // store never overwrite each other's entries
        let member = request_member(unix_millis());
        assert!(member.contains(process_token()));
    }
}
