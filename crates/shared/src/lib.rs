//! Shared utilities and common types for Campaign Manager backend.
//!
//! This crate provides common functionality used across all other crates:
//! - Cryptographic utilities (token hashing)
//! - Password hashing with Argon2id
//! - JWT access/refresh token handling
//! - Common validation logic

pub mod crypto;
pub mod jwt;
pub mod password;
pub mod validation;
