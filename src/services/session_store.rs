use crate::models::session::{QuizSession, SessionId};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

/// In-memory quiz sessions keyed by the cookie's session id.
///
/// The lock is only held for the duration of a closure; callers must never
/// await while inside `read` or `update`.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<Mutex<HashMap<SessionId, QuizSession>>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(HashMap::new())),
            ttl,
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<SessionId, QuizSession>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Unknown ids read as a fresh idle session without being stored.
    pub fn read<T>(&self, id: SessionId, f: impl FnOnce(&QuizSession) -> T) -> T {
        let mut sessions = self.lock();
        match sessions.get_mut(&id) {
            Some(session) => {
                session.touch();
                f(session)
            }
            None => f(&QuizSession::default()),
        }
    }

    pub fn update<T>(&self, id: SessionId, f: impl FnOnce(&mut QuizSession) -> T) -> T {
        let mut sessions = self.lock();
        let session = sessions.entry(id).or_default();
        session.touch();
        f(session)
    }

    pub fn reset(&self, id: SessionId) {
        if let Some(session) = self.lock().get_mut(&id) {
            session.reset();
            session.touch();
        }
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes sessions idle for longer than the ttl. Returns how many went.
    pub fn evict_expired(&self) -> usize {
        self.evict_idle_since(Instant::now())
    }

    fn evict_idle_since(&self, now: Instant) -> usize {
        let mut sessions = self.lock();
        let before = sessions.len();
        sessions.retain(|_, s| now.saturating_duration_since(s.touched_at()) <= self.ttl);
        before - sessions.len()
    }
}
