//! Training repository contract and JSON file implementation.
//!
//! # Responsibility
//! - Provide add/list/schedule/enroll/report/import APIs over one store file.
//! - Keep lookup and canonicalization rules in one place.
//!
//! # Invariants
//! - Identifier lookups are case-insensitive and use the first match in stored order.
//! - `enrolled.len() <= capacity` holds after every successful enrollment.
//! - The file is read once at construction and never re-read afterwards.
//!
//! # Known limitations
//! - Single writer only. Two processes sharing a store file race and the last
//!   writer wins without detection.

use crate::model::course::Course;
use crate::model::participant::Participant;
use crate::model::session::{canonical_roster, Session};
use crate::model::{ids_match, normalize_id, Record};
use crate::store::{load_document, save_document, DocumentError, StoreError, TrainingDocument};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub type RepoResult<T> = Result<T, RepoError>;

/// Record kind named in repository errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Course,
    Participant,
    Session,
}

impl EntityKind {
    fn as_str(self) -> &'static str {
        match self {
            Self::Course => "course",
            Self::Participant => "participant",
            Self::Session => "session",
        }
    }
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors surfaced by training repository operations.
#[derive(Debug)]
pub enum RepoError {
    /// An entity with the same identifier already exists.
    Conflict { kind: EntityKind, id: String },
    /// A referenced entity does not exist.
    NotFound { kind: EntityKind, id: String },
    /// The session roster already holds `capacity` participants.
    CapacityExceeded { session_id: String, capacity: u32 },
    /// The store file exists but is not a valid training document.
    Deserialization {
        path: PathBuf,
        source: DocumentError,
    },
    /// The store file could not be read or written.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl RepoError {
    /// Stable machine-readable code used in log lines.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Conflict { .. } => "conflict",
            Self::NotFound { .. } => "not_found",
            Self::CapacityExceeded { .. } => "capacity_exceeded",
            Self::Deserialization { .. } => "deserialization",
            Self::Io { .. } => "io",
        }
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Conflict { kind, id } => write!(f, "{kind} `{id}` already exists"),
            Self::NotFound { kind, id } => write!(f, "{kind} `{id}` not found"),
            Self::CapacityExceeded {
                session_id,
                capacity,
            } => write!(f, "session `{session_id}` is at capacity ({capacity})"),
            Self::Deserialization { path, source } => {
                write!(f, "store at `{}` is malformed: {source}", path.display())
            }
            Self::Io { path, source } => {
                write!(f, "store i/o failed at `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Deserialization { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<StoreError> for RepoError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::Io { path, source } => Self::Io { path, source },
            StoreError::Deserialization { path, source } => {
                Self::Deserialization { path, source }
            }
        }
    }
}

/// One line of the utilization report. All values are display text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    pub session_id: String,
    /// `"<course_code> - <course title>"`, title blank when the course is gone.
    pub course: String,
    pub start_date: String,
    pub location: String,
    pub instructor: String,
    pub capacity: String,
    pub enrolled_count: String,
    /// Display names joined by `", "` in roster order.
    pub participants: String,
}

/// Repository interface for catalog, roster and session operations.
pub trait TrainingRepository {
    fn list_courses(&self) -> RepoResult<Vec<Course>>;
    fn get_course(&self, code: &str) -> RepoResult<Option<Course>>;
    fn add_course(&mut self, course: &Course) -> RepoResult<Course>;

    fn list_participants(&self) -> RepoResult<Vec<Participant>>;
    fn get_participant(&self, employee_id: &str) -> RepoResult<Option<Participant>>;
    fn add_participant(&mut self, participant: &Participant) -> RepoResult<Participant>;

    fn list_sessions(&self) -> RepoResult<Vec<Session>>;
    fn get_session(&self, session_id: &str) -> RepoResult<Option<Session>>;
    fn schedule_session(&mut self, session: &Session) -> RepoResult<Session>;
    fn enroll_participant(&mut self, session_id: &str, employee_id: &str)
        -> RepoResult<Session>;

    fn generate_report(&self) -> RepoResult<Vec<ReportRow>>;

    /// Replaces all three collections without cross-checks.
    fn import_seed_data(
        &mut self,
        courses: Vec<Course>,
        participants: Vec<Participant>,
        sessions: Vec<Session>,
    ) -> RepoResult<()>;
}

/// JSON-file-backed training repository.
///
/// Owns a snapshot loaded at construction. Each mutation builds the next
/// snapshot, writes it to disk, and only then replaces the in-memory copy.
#[derive(Debug)]
pub struct JsonTrainingRepository {
    path: PathBuf,
    document: TrainingDocument,
}

impl JsonTrainingRepository {
    /// Opens the store at `path`, starting empty when the file is absent.
    ///
    /// # Errors
    /// - `RepoError::Io` when the file exists but cannot be read.
    /// - `RepoError::Deserialization` when the file is malformed.
    pub fn open(path: impl Into<PathBuf>) -> RepoResult<Self> {
        let path = path.into();
        let document = load_document(&path)?.unwrap_or_default();
        info!(
            "event=repo_open module=repo status=ok path={} courses={} participants={} sessions={}",
            path.display(),
            document.courses.len(),
            document.participants.len(),
            document.sessions.len()
        );
        Ok(Self { path, document })
    }

    /// Returns the backing store path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn commit(&mut self, next: TrainingDocument) -> RepoResult<()> {
        save_document(&self.path, &next)?;
        self.document = next;
        Ok(())
    }

    fn find_course(&self, code: &str) -> Option<&Course> {
        self.document
            .courses
            .iter()
            .find(|course| ids_match(&course.code, code))
    }

    fn find_participant(&self, employee_id: &str) -> Option<&Participant> {
        self.document
            .participants
            .iter()
            .find(|participant| ids_match(&participant.employee_id, employee_id))
    }

    fn position_session(&self, session_id: &str) -> Option<usize> {
        self.document
            .sessions
            .iter()
            .position(|session| ids_match(&session.session_id, session_id))
    }

    fn report_row(&self, session: &Session) -> ReportRow {
        let title = self
            .find_course(&session.course_code)
            .map(|course| course.title.as_str())
            .unwrap_or_default();
        let names = session
            .enrolled
            .iter()
            .filter_map(|id| self.find_participant(id))
            .map(|participant| participant.name.as_str())
            .collect::<Vec<_>>();

        ReportRow {
            session_id: session.session_id.clone(),
            course: format!("{} - {}", session.course_code, title),
            start_date: session.start_date.clone(),
            location: session.location.clone(),
            instructor: session.instructor.clone(),
            capacity: session.capacity.to_string(),
            enrolled_count: session.enrolled.len().to_string(),
            participants: names.join(", "),
        }
    }
}

fn rejected(event: &str, err: RepoError) -> RepoError {
    warn!(
        "event={event} module=repo status=rejected error_code={} error={}",
        err.code(),
        err
    );
    err
}

impl TrainingRepository for JsonTrainingRepository {
    fn list_courses(&self) -> RepoResult<Vec<Course>> {
        Ok(self.document.courses.clone())
    }

    fn get_course(&self, code: &str) -> RepoResult<Option<Course>> {
        Ok(self.find_course(code).cloned())
    }

    fn add_course(&mut self, course: &Course) -> RepoResult<Course> {
        let course = course.canonicalized();
        if self.find_course(&course.code).is_some() {
            return Err(rejected(
                "course_add",
                RepoError::Conflict {
                    kind: EntityKind::Course,
                    id: course.code,
                },
            ));
        }

        let mut next = self.document.clone();
        next.courses.push(course.clone());
        self.commit(next)?;

        info!("event=course_add module=repo status=ok code={}", course.code);
        Ok(course)
    }

    fn list_participants(&self) -> RepoResult<Vec<Participant>> {
        Ok(self.document.participants.clone())
    }

    fn get_participant(&self, employee_id: &str) -> RepoResult<Option<Participant>> {
        Ok(self.find_participant(employee_id).cloned())
    }

    fn add_participant(&mut self, participant: &Participant) -> RepoResult<Participant> {
        let participant = participant.canonicalized();
        if self.find_participant(&participant.employee_id).is_some() {
            return Err(rejected(
                "participant_add",
                RepoError::Conflict {
                    kind: EntityKind::Participant,
                    id: participant.employee_id,
                },
            ));
        }

        let mut next = self.document.clone();
        next.participants.push(participant.clone());
        self.commit(next)?;

        info!(
            "event=participant_add module=repo status=ok employee_id={}",
            participant.employee_id
        );
        Ok(participant)
    }

    fn list_sessions(&self) -> RepoResult<Vec<Session>> {
        Ok(self.document.sessions.clone())
    }

    fn get_session(&self, session_id: &str) -> RepoResult<Option<Session>> {
        Ok(self
            .position_session(session_id)
            .map(|index| self.document.sessions[index].clone()))
    }

    fn schedule_session(&mut self, session: &Session) -> RepoResult<Session> {
        let session = session.canonicalized();
        if self.find_course(&session.course_code).is_none() {
            return Err(rejected(
                "session_schedule",
                RepoError::NotFound {
                    kind: EntityKind::Course,
                    id: session.course_code,
                },
            ));
        }
        if self.position_session(&session.session_id).is_some() {
            return Err(rejected(
                "session_schedule",
                RepoError::Conflict {
                    kind: EntityKind::Session,
                    id: session.session_id,
                },
            ));
        }

        let mut next = self.document.clone();
        next.sessions.push(session.clone());
        self.commit(next)?;

        info!(
            "event=session_schedule module=repo status=ok session_id={} course_code={} capacity={}",
            session.session_id, session.course_code, session.capacity
        );
        Ok(session)
    }

    fn enroll_participant(
        &mut self,
        session_id: &str,
        employee_id: &str,
    ) -> RepoResult<Session> {
        let Some(index) = self.position_session(session_id) else {
            return Err(rejected(
                "enroll",
                RepoError::NotFound {
                    kind: EntityKind::Session,
                    id: normalize_id(session_id),
                },
            ));
        };
        let Some(participant_id) = self
            .find_participant(employee_id)
            .map(|participant| participant.employee_id.clone())
        else {
            return Err(rejected(
                "enroll",
                RepoError::NotFound {
                    kind: EntityKind::Participant,
                    id: normalize_id(employee_id),
                },
            ));
        };

        let session = &self.document.sessions[index];
        if session.is_enrolled(&participant_id) {
            info!(
                "event=enroll module=repo status=ok changed=false session_id={} employee_id={}",
                session.session_id, participant_id
            );
            return Ok(session.clone());
        }
        if session.is_full() {
            return Err(rejected(
                "enroll",
                RepoError::CapacityExceeded {
                    session_id: session.session_id.clone(),
                    capacity: session.capacity,
                },
            ));
        }

        let mut next = self.document.clone();
        let target = &mut next.sessions[index];
        target.enrolled.push(participant_id.clone());
        target.enrolled = canonical_roster(&target.enrolled);
        let updated = target.clone();
        self.commit(next)?;

        info!(
            "event=enroll module=repo status=ok changed=true session_id={} employee_id={} enrolled={}",
            updated.session_id,
            participant_id,
            updated.enrolled.len()
        );
        Ok(updated)
    }

    fn generate_report(&self) -> RepoResult<Vec<ReportRow>> {
        Ok(self
            .document
            .sessions
            .iter()
            .map(|session| self.report_row(session))
            .collect())
    }

    fn import_seed_data(
        &mut self,
        courses: Vec<Course>,
        participants: Vec<Participant>,
        sessions: Vec<Session>,
    ) -> RepoResult<()> {
        let next = TrainingDocument {
            courses: courses.iter().map(Record::canonicalized).collect(),
            participants: participants.iter().map(Record::canonicalized).collect(),
            sessions: sessions.iter().map(Record::canonicalized).collect(),
        };
        self.commit(next)?;

        info!(
            "event=seed_import module=repo status=ok courses={} participants={} sessions={}",
            self.document.courses.len(),
            self.document.participants.len(),
            self.document.sessions.len()
        );
        Ok(())
    }
}
