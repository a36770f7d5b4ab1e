//! Domain layer for Campaign Manager backend.
//!
//! This crate contains:
//! - Domain models (User, Campaign, Character, Map, Location)
//! - Business logic services (access decisions, read-access memoization)
//! - Domain error types

pub mod models;
pub mod services;
