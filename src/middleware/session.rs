use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::{header, HeaderMap, HeaderValue, Request};
use axum::middleware::Next;
use axum::response::Response;
use uuid::Uuid;

use crate::models::session::SessionId;
use crate::utils::crypto::{sign_value, verify_signed_value};

pub const SESSION_COOKIE: &str = "sid";

/// Marks a request whose session was created by this very request.
#[derive(Debug, Clone, Copy)]
pub struct FreshSession;

#[derive(Clone)]
pub struct SessionKey {
    secret: Arc<[u8]>,
}

impl SessionKey {
    pub fn new(secret: &str) -> Self {
        Self {
            secret: Arc::from(secret.as_bytes()),
        }
    }

    pub fn sign(&self, id: SessionId) -> Option<String> {
        sign_value(&id.to_string(), &self.secret)
    }

    pub fn verify(&self, cookie_value: &str) -> Option<SessionId> {
        let raw = verify_signed_value(cookie_value, &self.secret)?;
        Uuid::parse_str(raw).ok().map(SessionId)
    }
}

/// Raw value of the `sid` cookie, if the request carries one.
pub fn extract_session_cookie(headers: &HeaderMap) -> Option<&str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find_map(|(name, value)| (name == SESSION_COOKIE).then_some(value))
}

/// Attaches a `SessionId` to every request. Missing or tampered cookies get a
/// fresh session, announced through `Set-Cookie` on the response.
pub async fn session_middleware(
    State(key): State<SessionKey>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let existing = extract_session_cookie(req.headers()).and_then(|v| key.verify(v));
    let (id, is_new) = match existing {
        Some(id) => (id, false),
        None => (SessionId::new(), true),
    };
    req.extensions_mut().insert(id);
    if is_new {
        req.extensions_mut().insert(FreshSession);
    }

    let mut response = next.run(req).await;

    if is_new {
        tracing::debug!(session = %id, "Issuing new session cookie");
        let cookie = key
            .sign(id)
            .map(|signed| format!("{}={}; Path=/; HttpOnly; SameSite=Lax", SESSION_COOKIE, signed))
            .and_then(|c| HeaderValue::from_str(&c).ok());
        match cookie {
            Some(value) => {
                response.headers_mut().append(header::SET_COOKIE, value);
            }
            None => tracing::error!("Could not sign session cookie"),
        }
    }
    response
}
