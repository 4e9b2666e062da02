//! Core types and trait definitions for the lockin tracker.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! Storage backends implement [`store::TrackerStore`]; the API layer depends
//! only on that abstraction.

pub mod event;
pub mod profile;
pub mod stats;
pub mod store;
