//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate validation, storage and search into shell-level APIs.
//! - Keep the presentation shell decoupled from store details.

pub mod calendar_service;
