//! Rivalry - compare your competitive-programming profile against a competitor's.
//!
//! # Overview
//!
//! Rivalry fetches two users' profile statistics and contest history from
//! public read-only APIs, derives comparable metrics, and renders a table of
//! differences together with a short piece of advice.
//!
//! # Modules
//!
//! - [`model`]: Raw payloads and derived records
//! - [`metrics`]: Acceptance rate and average daily submissions
//! - [`comparison`]: Pairing, advice text, and the fetch-then-compare service
//! - [`data_sources`]: Profile and contest API clients
//! - [`storage`]: SQLite key-value settings store
//! - [`render`]: HTML presentation
//! - [`api`]: HTTP API handlers
//! - [`error`]: The comparison error taxonomy

pub mod api;
pub mod comparison;
pub mod data_sources;
pub mod error;
pub mod metrics;
pub mod model;
pub mod render;
pub mod storage;
