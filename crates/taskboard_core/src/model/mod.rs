//! Board domain model.
//!
//! # Responsibility
//! - Define the project record rendered by both board lists.
//! - Keep identity and descriptive fields immutable after creation.
//!
//! # Invariants
//! - Every project is identified by a `ProjectId` unique for the process.
//! - Projects are never removed; only their status is reassigned.

pub mod project;
