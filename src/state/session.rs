//! Admin sessions handed out by `/admin/login` and checked by the gate.

use crate::auth::Auth;
use crate::blog::{SessionID, SESSION_ID_BYTES, SESSION_TTL};
use std::collections::HashMap;
use std::time::Instant;
use tokio::sync::RwLock;

#[derive(Debug, Clone)]
struct AdminSession {
    email: String,
    expires_at: Instant,
}

/// Live admin tokens. Expired ones are swept whenever a new one is issued.
#[derive(Debug, Default)]
pub struct AdminSessions {
    live: RwLock<HashMap<SessionID, AdminSession>>,
}

impl AdminSessions {
    pub fn new() -> AdminSessions {
        AdminSessions::default()
    }

    /// Email of the admin `token` was issued to, unless it has expired.
    pub async fn admin_for(&self, token: &str) -> Option<String> {
        self.admin_at(token, Instant::now()).await
    }

    async fn admin_at(&self, token: &str, now: Instant) -> Option<String> {
        let live = self.live.read().await;
        let session = live.get(token)?;

        (now < session.expires_at).then(|| session.email.clone())
    }

    /// Needs an [`Auth`], so only a checked login can get a token.
    pub async fn issue(&self, email: String, _auth: Auth) -> SessionID {
        self.insert(email, Instant::now() + SESSION_TTL).await
    }

    async fn insert(&self, email: String, expires_at: Instant) -> SessionID {
        let token: SessionID = crate::blog::get_random_hex_string::<SESSION_ID_BYTES>();
        let now = Instant::now();

        let mut live = self.live.write().await;
        live.retain(|_, session| now < session.expires_at);
        live.insert(token.clone(), AdminSession { email, expires_at });

        token
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn tokens_name_their_admin() {
        let sessions = AdminSessions::new();
        let token = sessions
            .insert("admin@example.com".into(), Instant::now() + SESSION_TTL)
            .await;

        assert_eq!(token.len(), SESSION_ID_BYTES * 2);
        assert_eq!(
            sessions.admin_for(&token).await.as_deref(),
            Some("admin@example.com")
        );
        assert_eq!(sessions.admin_for("not-a-token").await, None);
    }

    #[tokio::test]
    async fn expired_tokens_are_refused_and_swept() {
        let sessions = AdminSessions::new();
        let issued_at = Instant::now();
        let stale = sessions.insert("admin@example.com".into(), issued_at).await;

        assert_eq!(sessions.admin_at(&stale, issued_at).await, None);

        sessions
            .insert("admin@example.com".into(), Instant::now() + SESSION_TTL)
            .await;
        assert!(!sessions.live.read().await.contains_key(&stale));
    }
}
