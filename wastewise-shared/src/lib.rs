//! # WasteWise Shared Library
//!
//! This crate contains shared types, utilities, and business logic used across
//! the WasteWise client and the development API server.
//!
//! ## Module Organization
//!
//! - `models`: Users, schedule entries, invoices and their request payloads
//! - `db`: In-memory collections seeded with development fixtures
//! - `auth`: Mock credentials, id generation, and JWT helpers
//! - `validation`: Conversion of `validator` failures into field errors

pub mod auth;
pub mod db;
pub mod models;
pub mod validation;

/// Current version of the WasteWise shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
