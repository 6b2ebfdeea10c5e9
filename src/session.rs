use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::{Duration, Instant};

use axum::http::HeaderMap;
use base64ct::Encoding;
use rand::RngCore;

use crate::access::types::PermissionSet;
use crate::access::{Identity, Resolution};
use crate::settings::Settings;

pub const SESSION_COOKIE_NAME: &str = "eventpass_session";

#[derive(Clone, Debug)]
pub struct SessionCookie {
    pub session_id: String,
}

impl SessionCookie {
    pub fn new(session_id: String) -> Self {
        Self { session_id }
    }

    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let cookie_header = headers.get(axum::http::header::COOKIE)?.to_str().ok()?;

        for cookie in cookie_header.split(';') {
            let cookie = cookie.trim();
            if let Some(value) = cookie
                .strip_prefix(SESSION_COOKIE_NAME)
                .and_then(|s| s.strip_prefix('='))
            {
                return Some(Self {
                    session_id: value.to_string(),
                });
            }
        }
        None
    }

    pub fn to_cookie_header(&self, settings: &Settings) -> String {
        let secure = settings.public_url().starts_with("https://");

        format!(
            "{}={}; HttpOnly; {}SameSite=Lax; Path=/; Max-Age={}",
            SESSION_COOKIE_NAME,
            self.session_id,
            if secure { "Secure; " } else { "" },
            settings.session.ttl_secs
        )
    }

    pub fn delete_cookie_header() -> String {
        format!(
            "{}=; HttpOnly; SameSite=Lax; Path=/; Max-Age=0",
            SESSION_COOKIE_NAME
        )
    }
}

fn random_id() -> String {
    let mut bytes = [0u8; 24];
    rand::thread_rng().fill_bytes(&mut bytes);
    base64ct::Base64UrlUnpadded::encode_string(&bytes)
}

#[derive(Debug, Clone)]
struct CachedPermissions {
    identity: Identity,
    permissions: Arc<PermissionSet>,
    refreshed_at: Instant,
}

/// Per-session permission sets. Each set is resolved once and reused until the
/// identity behind the session changes, the session ends, or the TTL elapses.
///
/// The TTL counts from establishment or the last `refresh`. Reads through
/// `get` do not extend it, so a session expires `ttl` after the identity was
/// last pushed no matter how often its permissions are read.
#[derive(Debug, Clone)]
pub struct PermissionCache {
    entries: Arc<RwLock<HashMap<String, CachedPermissions>>>,
    ttl: Duration,
}

impl PermissionCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(Duration::from_secs(settings.session.ttl_secs))
    }

    /// Start a session for `identity` and return its id with the resolved set.
    pub fn establish(&self, identity: Identity) -> (String, Arc<PermissionSet>) {
        let session_id = random_id();
        let permissions = Arc::new(Resolution::for_identity(&identity).permissions);
        let entry = CachedPermissions {
            identity,
            permissions: permissions.clone(),
            refreshed_at: Instant::now(),
        };

        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        self.purge_expired(&mut entries);
        entries.insert(session_id.clone(), entry);
        tracing::debug!(sessions = entries.len(), "Session established");

        (session_id, permissions)
    }

    pub fn get(&self, session_id: &str) -> Option<Arc<PermissionSet>> {
        self.get_entry(session_id).map(|e| e.permissions)
    }

    pub fn identity(&self, session_id: &str) -> Option<Identity> {
        self.get_entry(session_id).map(|e| e.identity)
    }

    fn get_entry(&self, session_id: &str) -> Option<CachedPermissions> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries
            .get(session_id)
            .filter(|e| e.refreshed_at.elapsed() < self.ttl)
            .cloned()
    }

    /// Re-derive the set after the identity changed (role change, new pass,
    /// new venue). Returns `None` for unknown or expired sessions, otherwise
    /// whether the identity differed and the current permissions.
    pub fn refresh(&self, session_id: &str, identity: Identity) -> Option<(bool, Arc<PermissionSet>)> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let ttl = self.ttl;
        let entry = entries
            .get_mut(session_id)
            .filter(|e| e.refreshed_at.elapsed() < ttl)?;

        entry.refreshed_at = Instant::now();
        if entry.identity == identity {
            return Some((false, entry.permissions.clone()));
        }

        tracing::info!(
            from = entry.identity.role.as_str(),
            to = identity.role.as_str(),
            "Identity changed, re-deriving permissions"
        );
        entry.permissions = Arc::new(Resolution::for_identity(&identity).permissions);
        entry.identity = identity;
        Some((true, entry.permissions.clone()))
    }

    pub fn end(&self, session_id: &str) -> bool {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.remove(session_id).is_some()
    }

    pub fn len(&self) -> usize {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries
            .values()
            .filter(|e| e.refreshed_at.elapsed() < self.ttl)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn purge_expired(&self, entries: &mut HashMap<String, CachedPermissions>) {
        let before = entries.len();
        entries.retain(|_, e| e.refreshed_at.elapsed() < self.ttl);
        let purged = before - entries.len();
        if purged > 0 {
            tracing::debug!(purged, "Purged expired sessions");
        }
    }
}
