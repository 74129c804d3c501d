//! PostgreSQL repository implementations.
//!
//! Concrete implementations of the domain repository traits using SQLx.
//!
//! # Repositories
//!
//! - [`PgLinkRepository`] - Link storage, lookup, and atomic visit counting
//! - [`PgVisitRepository`] - Visit event log

pub mod pg_link_repository;
pub mod pg_visit_repository;

pub use pg_link_repository::PgLinkRepository;
pub use pg_visit_repository::PgVisitRepository;
