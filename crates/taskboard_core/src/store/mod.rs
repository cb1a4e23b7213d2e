//! In-memory state ownership and change notification.
//!
//! # Responsibility
//! - Own the project collection exclusively.
//! - Fan out every applied mutation to registered listeners.
//!
//! # Invariants
//! - Listeners only ever receive copies of the collection.
//! - Notification happens after the mutation is fully applied.

pub mod project_store;
