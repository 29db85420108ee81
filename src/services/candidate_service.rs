use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

pub use crate::database::store::DUPLICATE_EMAIL_MESSAGE;

use crate::database::store::CandidateStore;
use crate::dto::candidate_dto::{CandidateForm, CandidateSubmission};
use crate::error::{Error, Result};
use crate::models::candidate::{CandidateRecord, Document, ID_PROOF_EXTENSIONS, RESUME_EXTENSIONS};
use crate::models::session::{Role, Session};
use crate::services::session_service::SessionService;
use crate::utils::crypto::{hash_password, verify_password};
use crate::utils::sanitize::{dangerous_fields, sanitize_email, sanitize_form_data, sanitize_password};
use crate::utils::time;
use crate::utils::validation::{validate, DocumentRule, FieldErrors};

pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid email or password. Please try again.";
pub const NO_PROFILE_MESSAGE: &str = "No profile data found. Please register first.";

const MIN_LOGIN_PASSWORD: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FormKind {
    Registration,
    Profile,
}

#[derive(Debug, Clone)]
pub struct Registration {
    pub candidate: CandidateRecord,
    pub session: Session,
}

#[derive(Clone)]
pub struct CandidateService {
    store: Arc<dyn CandidateStore>,
    sessions: SessionService,
    max_upload_bytes: usize,
}

impl CandidateService {
    pub fn new(store: Arc<dyn CandidateStore>, sessions: SessionService, max_upload_bytes: usize) -> Self {
        Self {
            store,
            sessions,
            max_upload_bytes,
        }
    }

    /// Raw fields are screened before anything is cleaned, so a payload that
    /// sanitizes into something harmless is still refused.
    fn screen(form: CandidateForm) -> Result<CandidateForm> {
        let flagged = dangerous_fields(&form);
        if !flagged.is_empty() {
            warn!(fields = ?flagged, "Rejected candidate form with dangerous content");
            return Err(Error::DangerousContent(flagged));
        }
        Ok(sanitize_form_data(form))
    }

    fn check(&self, form: &CandidateForm, kind: FormKind) -> Result<CandidateSubmission> {
        let submission = CandidateSubmission::from(form);
        let mut errors = validate(&submission).err().unwrap_or_default();

        if kind == FormKind::Registration && submission.password.is_none() {
            errors
                .entry("password".to_string())
                .or_insert_with(|| "Password must be at least 8 characters.".to_string());
        }

        let required = kind == FormKind::Registration;
        self.document_rule("resume", RESUME_EXTENSIONS, required)
            .check(form.resume.as_ref(), &mut errors);
        self.document_rule("id_proof", ID_PROOF_EXTENSIONS, required)
            .check(form.id_proof.as_ref(), &mut errors);

        if errors.is_empty() {
            Ok(submission)
        } else {
            Err(Error::Validation(errors))
        }
    }

    fn document_rule<'a>(&self, field: &'a str, extensions: &'a [&'a str], required: bool) -> DocumentRule<'a> {
        DocumentRule {
            field,
            required,
            extensions,
            max_bytes: self.max_upload_bytes,
        }
    }

    fn ensure_email_free(&self, email: &str, owner: Option<Uuid>) -> Result<()> {
        match self.store.find_by_email(email)? {
            Some(existing) if Some(existing.id) != owner => {
                Err(Error::Conflict(DUPLICATE_EMAIL_MESSAGE.to_string()))
            }
            _ => Ok(()),
        }
    }

    /// A store that fails to load is treated as holding no record.
    fn load_existing(&self, session: &str) -> Option<CandidateRecord> {
        match self.store.load_current(session) {
            Ok(record) => record,
            Err(e) => {
                warn!(error = %e, "Could not load current candidate, treating as absent");
                None
            }
        }
    }

    pub fn register(&self, form: CandidateForm) -> Result<Registration> {
        let form = Self::screen(form)?;
        let submission = self.check(&form, FormKind::Registration)?;
        self.ensure_email_free(&submission.email, None)?;

        let password_hash = hash_password(submission.password.as_deref().unwrap_or_default())?;
        let candidate = CandidateRecord {
            id: Uuid::new_v4(),
            age: parse_age(&submission.age)?,
            name: submission.name,
            email: submission.email,
            mobile: submission.mobile,
            qualification: submission.qualification,
            location: submission.location,
            occupation_status: submission.occupation_status,
            resume: form.resume,
            id_proof: form.id_proof,
            registration_date: time::today(),
            updated_at: None,
            password_hash,
        };

        let session = self.sessions.issue(Role::Candidate, Some(candidate.id))?;
        if let Err(e) = self.store.save_current(&session.token, candidate.clone()) {
            self.sessions.revoke(&session.token)?;
            return Err(e);
        }

        info!(candidate_id = %candidate.id, "Candidate registered");
        Ok(Registration { candidate, session })
    }

    pub fn login(&self, email: &str, password: &str) -> Result<Session> {
        let email = sanitize_email(email);
        let password = sanitize_password(password);
        if !email.contains('@') {
            return Err(Error::BadRequest("Invalid email format".to_string()));
        }
        if password.chars().count() < MIN_LOGIN_PASSWORD {
            return Err(Error::BadRequest(format!(
                "Password must be at least {} characters",
                MIN_LOGIN_PASSWORD
            )));
        }

        let candidate = self
            .store
            .find_by_email(&email)?
            .filter(|c| verify_password(&password, &c.password_hash));
        let Some(candidate) = candidate else {
            warn!("Candidate login failed");
            return Err(Error::Unauthorized(INVALID_CREDENTIALS_MESSAGE.to_string()));
        };

        let session = self.sessions.issue(Role::Candidate, Some(candidate.id))?;
        self.store.bind_session(&session.token, candidate.id)?;
        info!(candidate_id = %candidate.id, "Candidate logged in");
        Ok(session)
    }

    pub fn profile(&self, session: &str) -> Result<CandidateRecord> {
        self.load_existing(session)
            .ok_or_else(|| Error::NotFound(NO_PROFILE_MESSAGE.to_string()))
    }

    /// Full replace of the editable fields. Documents not re-uploaded and the
    /// password, when left blank, keep their stored values.
    pub fn update_profile(&self, session: &str, form: CandidateForm) -> Result<CandidateRecord> {
        let existing = self.profile(session)?;
        let form = Self::screen(form)?;
        let submission = self.check(&form, FormKind::Profile)?;
        self.ensure_email_free(&submission.email, Some(existing.id))?;

        let password_hash = match submission.password.as_deref() {
            Some(password) => hash_password(password)?,
            None => existing.password_hash,
        };
        let updated = CandidateRecord {
            id: existing.id,
            age: parse_age(&submission.age)?,
            name: submission.name,
            email: submission.email,
            mobile: submission.mobile,
            qualification: submission.qualification,
            location: submission.location,
            occupation_status: submission.occupation_status,
            resume: keep_document(form.resume, existing.resume),
            id_proof: keep_document(form.id_proof, existing.id_proof),
            registration_date: existing.registration_date,
            updated_at: Some(time::now()),
            password_hash,
        };

        self.store.save_current(session, updated.clone())?;
        info!(candidate_id = %updated.id, "Candidate profile updated");
        Ok(updated)
    }

    pub fn logout(&self, session: &str) -> Result<()> {
        self.sessions.revoke(session)?;
        self.store.clear_session(session)?;
        Ok(())
    }
}

fn keep_document(uploaded: Option<Document>, stored: Option<Document>) -> Option<Document> {
    uploaded.or(stored)
}

fn parse_age(age: &str) -> Result<u32> {
    age.trim().parse().map_err(|_| {
        let mut errors = FieldErrors::new();
        errors.insert("age".to_string(), "Please enter a valid age (18-99).".to_string());
        Error::Validation(errors)
    })
}
