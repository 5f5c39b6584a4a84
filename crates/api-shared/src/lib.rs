//! # API Shared
//!
//! Shared definitions for the Orchard Lite front ends.
//!
//! Contains:
//! - `HealthService` and its `HealthRes` payload
//!
//! Used by `api-rest` and the `orchard` CLI so both report health identically.

pub mod health;

pub use health::{HealthRes, HealthService};
