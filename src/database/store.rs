use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::candidate::CandidateRecord;

pub const DUPLICATE_EMAIL_MESSAGE: &str = "A candidate with this email address already exists.";

/// Where candidate records live for the lifetime of the process.
///
/// `session` is the opaque token of a logged-in candidate; "current" always
/// means the record bound to that token.
#[cfg_attr(test, mockall::automock)]
pub trait CandidateStore: Send + Sync {
    fn load_current(&self, session: &str) -> Result<Option<CandidateRecord>>;

    /// Inserts or replaces the record (matched by id) and binds it to `session`.
    /// Fails with `Error::Conflict` when another record already holds the email.
    fn save_current(&self, session: &str, record: CandidateRecord) -> Result<()>;

    /// Every record in insertion order.
    fn load_all(&self) -> Result<Vec<CandidateRecord>>;

    fn find_by_email(&self, email: &str) -> Result<Option<CandidateRecord>>;

    fn bind_session(&self, session: &str, id: Uuid) -> Result<()>;

    fn clear_session(&self, session: &str) -> Result<()>;
}

#[derive(Default)]
pub struct MemoryStore {
    records: RwLock<Vec<CandidateRecord>>,
    sessions: RwLock<HashMap<String, Uuid>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<CandidateRecord>) -> Self {
        Self {
            records: RwLock::new(records),
            sessions: RwLock::new(HashMap::new()),
        }
    }
}

impl CandidateStore for MemoryStore {
    fn load_current(&self, session: &str) -> Result<Option<CandidateRecord>> {
        let Some(id) = self.sessions.read()?.get(session).copied() else {
            return Ok(None);
        };
        let records = self.records.read()?;
        Ok(records.iter().find(|r| r.id == id).cloned())
    }

    fn save_current(&self, session: &str, record: CandidateRecord) -> Result<()> {
        let id = record.id;
        {
            let mut records = self.records.write()?;
            if records
                .iter()
                .any(|r| r.id != id && r.email.eq_ignore_ascii_case(&record.email))
            {
                return Err(Error::Conflict(DUPLICATE_EMAIL_MESSAGE.to_string()));
            }
            match records.iter_mut().find(|r| r.id == id) {
                Some(existing) => *existing = record,
                None => records.push(record),
            }
        }
        self.bind_session(session, id)
    }

    fn load_all(&self) -> Result<Vec<CandidateRecord>> {
        Ok(self.records.read()?.clone())
    }

    fn find_by_email(&self, email: &str) -> Result<Option<CandidateRecord>> {
        let email = email.to_lowercase();
        let records = self.records.read()?;
        Ok(records.iter().find(|r| r.email == email).cloned())
    }

    fn bind_session(&self, session: &str, id: Uuid) -> Result<()> {
        if !self.records.read()?.iter().any(|r| r.id == id) {
            return Err(Error::NotFound(format!("Candidate {} not found", id)));
        }
        self.sessions.write()?.insert(session.to_string(), id);
        Ok(())
    }

    fn clear_session(&self, session: &str) -> Result<()> {
        self.sessions.write()?.remove(session);
        Ok(())
    }
}

pub fn create_store() -> Arc<dyn CandidateStore> {
    tracing::info!("Using in-memory candidate store");
    Arc::new(MemoryStore::new())
}
