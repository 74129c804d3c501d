//! Core domain entities.
//!
//! Plain data structures without business logic. Creation inputs use
//! separate `New*` structs; partial updates use `LinkPatch`.

pub mod link;
pub mod visit;

pub use link::{Link, LinkPatch, NewLink};
pub use visit::{NewVisit, Visit};
