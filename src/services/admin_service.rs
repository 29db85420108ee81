use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::models::session::{Role, Session};
use crate::services::candidate_service::INVALID_CREDENTIALS_MESSAGE;
use crate::services::session_service::SessionService;
use crate::utils::crypto::constant_time_eq;
use crate::utils::sanitize::{sanitize_email, sanitize_password};

/// Checks the single configured admin credential pair.
#[derive(Clone)]
pub struct AdminService {
    sessions: SessionService,
    email: String,
    password: String,
}

impl AdminService {
    pub fn new(sessions: SessionService, email: &str, password: &str) -> Self {
        Self {
            sessions,
            email: sanitize_email(email),
            password: password.to_string(),
        }
    }

    pub fn login(&self, email: &str, password: &str) -> Result<Session> {
        let email_ok = constant_time_eq(&sanitize_email(email), &self.email);
        let password_ok = constant_time_eq(&sanitize_password(password), &self.password);
        if !(email_ok & password_ok) {
            warn!("Admin login failed");
            return Err(Error::Unauthorized(INVALID_CREDENTIALS_MESSAGE.to_string()));
        }

        let session = self.sessions.issue(Role::Admin, None)?;
        info!("Admin logged in");
        Ok(session)
    }

    pub fn logout(&self, token: &str) -> Result<bool> {
        Ok(self.sessions.revoke(token)?.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_configured_pair_logs_in() {
        let sessions = SessionService::new(32);
        let admin = AdminService::new(sessions.clone(), "admin@example.com", "adminPass");

        assert!(matches!(admin.login("admin@example.com", "adminpass"), Err(Error::Unauthorized(_))));
        assert!(matches!(admin.login("root@example.com", "adminPass"), Err(Error::Unauthorized(_))));

        let session = admin.login(" Admin@Example.com ", "adminPass").unwrap();
        assert_eq!(session.role, Role::Admin);
        assert!(sessions.get(&session.token).unwrap().is_some());

        assert!(admin.logout(&session.token).unwrap());
        assert!(!admin.logout(&session.token).unwrap());
    }
}
