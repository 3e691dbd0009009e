//! Core types shared across the outline diff facilities
//!
//! This crate provides the canonical field keys and event names used by both
//! the error facility and the structured logging macros, so that every crate
//! in the workspace emits the same event schema.

pub mod schema;
