//! Flutter-facing bindings for geopick.

pub mod api;
