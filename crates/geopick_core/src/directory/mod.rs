//! Read-only client for the external people directory.
//!
//! # Responsibility
//! - List all directory records and fetch one record by id.
//! - Report every failure to the log before returning it.
//!
//! # Invariants
//! - Each call is a fresh round trip: no caching, retry or pagination.

pub mod client;
