use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use uuid::Uuid;

use crate::error::Result;
use crate::models::session::{Role, Session};
use crate::utils::{time, token::generate_access_token};

/// Live bearer tokens for both candidates and admins.
#[derive(Clone)]
pub struct SessionService {
    sessions: Arc<RwLock<HashMap<String, Session>>>,
    token_length: usize,
}

impl SessionService {
    pub fn new(token_length: usize) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            token_length: token_length.max(16),
        }
    }

    pub fn issue(&self, role: Role, candidate_id: Option<Uuid>) -> Result<Session> {
        let session = Session {
            token: generate_access_token(self.token_length),
            role,
            candidate_id,
            created_at: time::now(),
        };
        self.sessions
            .write()?
            .insert(session.token.clone(), session.clone());
        Ok(session)
    }

    pub fn get(&self, token: &str) -> Result<Option<Session>> {
        Ok(self.sessions.read()?.get(token).cloned())
    }

    pub fn revoke(&self, token: &str) -> Result<Option<Session>> {
        Ok(self.sessions.write()?.remove(token))
    }
}
