//! Flutter-facing bindings for the dayplanner core.

pub mod api;
