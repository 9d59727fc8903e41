//! Repository layer over the persisted training document.
//!
//! # Responsibility
//! - Define the use-case oriented repository contract.
//! - Enforce identifier uniqueness, course references and session capacity.
//!
//! # Invariants
//! - Every successful mutation is followed by a full rewrite of the store.
//! - A failed operation leaves both the file and the snapshot untouched.

pub mod training_repo;
