//! Session Entity
//!
//! Server-side session row. The cookie only carries the signed session id;
//! everything else lives here.

use chrono::{DateTime, Duration, Utc};
use kernel::id::UserId;
use uuid::Uuid;

/// Server-side auth session
#[derive(Debug, Clone)]
pub struct Session {
    pub session_id: Uuid,
    pub user_id: UserId,
    /// Identity snapshot so middleware does not need a user lookup
    pub email: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub last_activity_at: DateTime<Utc>,
}

impl Session {
    /// Create a new session expiring after `ttl`
    pub fn new(user_id: UserId, email: String, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            session_id: Uuid::new_v4(),
            user_id,
            email,
            expires_at: now + ttl,
            created_at: now,
            last_activity_at: now,
        }
    }

    /// Check if the session has expired
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }

    /// Record activity
    pub fn touch(&mut self) {
        self.last_activity_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_live() {
        let session = Session::new(UserId::from_i64(1), "a@x.com".into(), Duration::hours(12));
        assert!(!session.is_expired());
        assert!(session.expires_at > session.created_at);
    }

    #[test]
    fn test_zero_ttl_expires_immediately() {
        let session = Session::new(UserId::from_i64(1), "a@x.com".into(), Duration::zero());
        assert!(session.is_expired());
    }
}
