//! Domain layer containing business entities and contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`visit_event`] - Visit tracking event model
//! - [`visit_worker`] - Asynchronous visit persistence worker
//!
//! The domain layer has no dependency on infrastructure or presentation
//! layers; repository traits define contracts implemented in
//! `crate::infrastructure`.

pub mod entities;
pub mod repositories;
pub mod visit_event;
pub mod visit_worker;
