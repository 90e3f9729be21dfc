//! Local persistence contracts and implementations.
//!
//! # Responsibility
//! - Define the injected key/value storage interface.
//! - Isolate SQLite details from the selection and picker services.
//!
//! # Invariants
//! - Storage is constructed once at startup and passed to its consumers;
//!   there is no process-global store.

pub mod kv_store;
