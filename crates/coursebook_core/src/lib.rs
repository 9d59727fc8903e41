//! Core record keeping for training administration.
//! Courses, participants and scheduled sessions live in one JSON store file;
//! this crate owns every invariant over them.

pub mod logging;
pub mod model;
pub mod repo;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::course::Course;
pub use model::participant::Participant;
pub use model::session::Session;
pub use model::{ids_match, normalize_id, Record, RecordError};
pub use repo::training_repo::{
    EntityKind, JsonTrainingRepository, RepoError, RepoResult, ReportRow, TrainingRepository,
};
pub use store::{DocumentError, StoreError, TrainingDocument};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
