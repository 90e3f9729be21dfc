//! Use-case services behind the picker screen.
//!
//! # Responsibility
//! - Orchestrate directory reads, selection persistence and classification.
//! - Keep UI/FFI layers decoupled from HTTP and storage details.

pub mod picker_service;
pub mod picker_view;
pub mod selection_store;
