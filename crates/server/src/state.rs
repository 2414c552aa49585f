use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::middleware::SESSION_MAX_AGE_SECS;
use chrono::{DateTime, TimeDelta, Utc};
use dashmap::DashMap;
use lostfound::seed::demo_chats;
use lostfound::{ChatBook, IdentityIssuer, ItemCatalog, LostFoundConfig, User, UuidIssuer};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// A signed-in user and when the session was opened.
#[derive(Debug, Clone)]
pub struct Session {
    pub user: User,
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// Sessions live as long as the cookie that carries them.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now - self.created_at >= TimeDelta::seconds(SESSION_MAX_AGE_SECS as i64)
    }
}

/// Shared application state
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Arc<ServerConfig>,

    /// Item reports (shared across requests)
    pub catalog: Arc<ItemCatalog>,

    /// Session token -> session
    pub sessions: Arc<DashMap<String, Session>>,

    /// User id -> that user's chat threads
    pub chats: Arc<DashMap<String, ChatBook>>,

    /// Rate limit tracking: session token -> (count, window_start)
    pub rate_limiter: Arc<DashMap<String, (u32, Instant)>>,

    /// Issues user ids for new accounts
    pub issuer: Arc<dyn IdentityIssuer>,

    /// Prometheus render handle, when a recorder was installed
    pub metrics_handle: Option<PrometheusHandle>,
}

impl ServerState {
    /// Create new server state, loading the core configuration file if one is set
    pub fn new(config: ServerConfig) -> ServerResult<Self> {
        let core = config
            .core_config()
            .map_err(|e| ServerError::Config(e.to_string()))?;
        Ok(Self::with_core_config(config, &core))
    }

    /// Create server state from an already-loaded core configuration
    pub fn with_core_config(config: ServerConfig, core: &LostFoundConfig) -> Self {
        Self {
            config: Arc::new(config),
            catalog: Arc::new(ItemCatalog::from_config(core)),
            sessions: Arc::new(DashMap::new()),
            chats: Arc::new(DashMap::new()),
            rate_limiter: Arc::new(DashMap::new()),
            issuer: Arc::new(UuidIssuer),
            metrics_handle: None,
        }
    }

    /// Attach the Prometheus handle used by `/metrics`
    pub fn with_metrics_handle(mut self, handle: PrometheusHandle) -> Self {
        self.metrics_handle = Some(handle);
        self
    }

    /// Replace the identity issuer
    pub fn with_issuer(mut self, issuer: Arc<dyn IdentityIssuer>) -> Self {
        self.issuer = issuer;
        self
    }

    /// Open a session for `user` and return its token
    ///
    /// Expired sessions are pruned first.
    pub fn open_session(&self, user: User) -> String {
        self.prune_expired_sessions();

        let token = uuid::Uuid::new_v4().simple().to_string();
        tracing::info!(user_id = %user.id, "session_opened");
        self.sessions.insert(
            token.clone(),
            Session {
                user,
                created_at: Utc::now(),
            },
        );
        token
    }

    /// Look up the user behind a session token
    ///
    /// An expired session is removed and treated as absent.
    pub fn session_user(&self, token: &str) -> Option<User> {
        let now = Utc::now();
        match self.sessions.get(token) {
            None => return None,
            Some(session) if !session.is_expired(now) => return Some(session.user.clone()),
            Some(_) => {}
        }

        self.sessions.remove_if(token, |_, session| session.is_expired(now));
        self.rate_limiter.remove(token);
        tracing::debug!("session_expired");
        None
    }

    /// Remove every expired session; returns how many were dropped
    pub fn prune_expired_sessions(&self) -> usize {
        let now = Utc::now();
        let before = self.sessions.len();
        self.sessions.retain(|token, session| {
            let keep = !session.is_expired(now);
            if !keep {
                self.rate_limiter.remove(token);
            }
            keep
        });
        before.saturating_sub(self.sessions.len())
    }

    /// Drop a session; returns whether it existed
    pub fn close_session(&self, token: &str) -> bool {
        self.rate_limiter.remove(token);
        self.sessions.remove(token).is_some()
    }

    /// Check rate limit for a session token
    pub fn check_rate_limit(&self, key: &str) -> bool {
        let now = Instant::now();
        let window = Duration::from_secs(60);
        let limit = self.config.rate_limit_per_minute;

        let mut entry = self.rate_limiter.entry(key.to_string()).or_insert((0, now));
        let (count, window_start) = entry.value_mut();

        // Reset if window has passed
        if now.duration_since(*window_start) > window {
            *count = 0;
            *window_start = now;
        }

        if *count >= limit {
            return false;
        }

        *count += 1;
        true
    }

    /// Run `f` against a user's chat book, seeding it on first use
    pub fn with_chats<R>(&self, user_id: &str, f: impl FnOnce(&mut ChatBook) -> R) -> R {
        let mut book = self
            .chats
            .entry(user_id.to_string())
            .or_insert_with(demo_chats);
        f(book.value_mut())
    }
}

/// Server metadata for health checks
#[derive(Debug, serde::Serialize)]
pub struct ServerMetadata {
    pub version: String,
    pub uptime_seconds: u64,
    pub items: usize,
    pub active_sessions: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            id: "user_1".into(),
            name: "ada".into(),
            email: "ada@example.com".into(),
            provider: None,
        }
    }

    #[test]
    fn sessions_open_and_close() {
        let state = ServerState::new(ServerConfig::default()).unwrap();
        let token = state.open_session(user());
        assert_eq!(state.session_user(&token).unwrap().id, "user_1");
        assert!(state.close_session(&token));
        assert!(state.session_user(&token).is_none());
        assert!(!state.close_session(&token));
    }

    fn backdate(state: &ServerState, token: &str, days: i64) {
        if let Some(mut session) = state.sessions.get_mut(token) {
            session.created_at -= TimeDelta::days(days);
        }
    }

    #[test]
    fn expired_session_is_rejected_and_removed() {
        let state = ServerState::new(ServerConfig::default()).unwrap();
        let token = state.open_session(user());
        assert!(state.check_rate_limit(&token));

        backdate(&state, &token, 30);
        assert!(state.session_user(&token).is_none());
        assert!(!state.sessions.contains_key(&token));
        assert!(!state.rate_limiter.contains_key(&token));
    }

    #[test]
    fn session_is_valid_until_max_age() {
        let state = ServerState::new(ServerConfig::default()).unwrap();
        let token = state.open_session(user());
        backdate(&state, &token, 6);
        assert!(state.session_user(&token).is_some());
        backdate(&state, &token, 1);
        assert!(state.session_user(&token).is_none());
    }

    #[test]
    fn opening_a_session_prunes_expired_ones() {
        let state = ServerState::new(ServerConfig::default()).unwrap();
        let stale: Vec<String> = (0..50).map(|_| state.open_session(user())).collect();
        for token in &stale {
            backdate(&state, token, 8);
        }
        assert_eq!(state.sessions.len(), 50);

        let fresh = state.open_session(user());
        assert_eq!(state.sessions.len(), 1);
        assert!(state.session_user(&fresh).is_some());
        assert_eq!(state.prune_expired_sessions(), 0);
    }

    #[test]
    fn rate_limit_blocks_after_limit() {
        let config = ServerConfig {
            rate_limit_per_minute: 3,
            ..ServerConfig::default()
        };
        let state = ServerState::new(config).unwrap();
        for _ in 0..3 {
            assert!(state.check_rate_limit("token"));
        }
        assert!(!state.check_rate_limit("token"));
        assert!(state.check_rate_limit("other-token"));
    }

    #[test]
    fn chat_books_are_seeded_per_user() {
        let state = ServerState::new(ServerConfig::default()).unwrap();
        state
            .with_chats("a", |book| book.send(1, "hello", "9:00 AM"))
            .unwrap();
        let a_len = state.with_chats("a", |book| book.thread(1).unwrap().messages.len());
        let b_len = state.with_chats("b", |book| book.thread(1).unwrap().messages.len());
        assert_eq!(a_len, b_len + 1);
    }

    #[test]
    fn core_config_drives_seeding_and_threshold() {
        let core = LostFoundConfig::from_yaml(
            "version: \"1.0\"\nseed_demo_data: false\npolicy:\n  high_match_threshold: 50\n",
        )
        .unwrap();
        let state = ServerState::with_core_config(ServerConfig::default(), &core);
        assert!(state.catalog.is_empty());
        assert_eq!(state.catalog.policy().high_match_threshold, 50);

        let seeded = ServerState::new(ServerConfig::default()).unwrap();
        assert_eq!(seeded.catalog.len(), 6);
    }

    #[test]
    fn unreadable_core_config_is_a_config_error() {
        let config = ServerConfig {
            catalog_config: Some("/nonexistent/lostfound.yaml".into()),
            ..ServerConfig::default()
        };
        let err = ServerState::new(config).err().unwrap();
        assert_eq!(err.error_code(), "CONFIG_ERROR");
    }
}
