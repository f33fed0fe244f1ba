use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use axum::body::Body;
use axum::extract::{ConnectInfo, State};
use axum::http::{Request, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::middleware::session::FreshSession;
use crate::models::session::SessionId;

/// Who a request is counted against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RateKey {
    Session(SessionId),
    /// Cookieless clients get a new session on every request, so they are
    /// counted by address instead.
    Peer(IpAddr),
    Anonymous,
}

impl RateKey {
    pub fn for_request(req: &Request<Body>) -> Self {
        let extensions = req.extensions();
        let peer = || {
            extensions
                .get::<ConnectInfo<SocketAddr>>()
                .map(|ConnectInfo(addr)| RateKey::Peer(addr.ip()))
                .unwrap_or(RateKey::Anonymous)
        };
        match extensions.get::<SessionId>() {
            Some(_) if extensions.get::<FreshSession>().is_some() => peer(),
            Some(id) => RateKey::Session(*id),
            None => peer(),
        }
    }
}

#[derive(Debug)]
struct WindowState {
    start: Instant,
    count: u32,
}

/// Fixed-window limiter with one window per [`RateKey`].
#[derive(Clone, Debug)]
pub struct RateLimiter {
    limit: u32,
    period: Duration,
    windows: Arc<Mutex<HashMap<RateKey, WindowState>>>,
}

impl RateLimiter {
    pub fn new(limit: u32, period: Duration) -> Self {
        Self {
            limit: limit.max(1),
            period,
            windows: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn per_minute(limit: u32) -> Self {
        Self::new(limit, Duration::from_secs(60))
    }

    pub fn allow(&self, key: RateKey) -> bool {
        let mut windows = self.windows.lock().unwrap_or_else(PoisonError::into_inner);
        let now = Instant::now();
        let window = windows.entry(key).or_insert(WindowState { start: now, count: 0 });
        if now.duration_since(window.start) >= self.period {
            window.start = now;
            window.count = 0;
        }
        if window.count < self.limit {
            window.count += 1;
            true
        } else {
            false
        }
    }

    /// Drops windows that have already run out.
    pub fn prune(&self) -> usize {
        let mut windows = self.windows.lock().unwrap_or_else(PoisonError::into_inner);
        let now = Instant::now();
        let before = windows.len();
        windows.retain(|_, w| now.duration_since(w.start) < self.period);
        before - windows.len()
    }
}

pub async fn session_rate_limit(
    State(limiter): State<RateLimiter>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let key = RateKey::for_request(&req);
    if !limiter.allow(key) {
        tracing::warn!(key = ?key, "Generation rate limit exceeded");
        return (StatusCode::TOO_MANY_REQUESTS, "rate_limit_exceeded").into_response();
    }
    next.run(req).await
}
