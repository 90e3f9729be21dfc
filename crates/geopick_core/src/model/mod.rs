//! Domain model for directory records and their derived location display.
//!
//! # Responsibility
//! - Define the record shape returned by the upstream directory.
//! - Classify record coordinates into a display quadrant.
//!
//! # Invariants
//! - Records are immutable snapshots of upstream data.
//! - Unknown upstream fields survive decode/encode unchanged.

pub mod quadrant;
pub mod record;
