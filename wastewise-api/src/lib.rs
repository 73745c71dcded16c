//! # WasteWise API Server Library
//!
//! Development REST API for WasteWise Connect, serving the same in-memory
//! data the client's mock backend uses, behind real bearer authentication.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `middleware`: Bearer token authentication
//! - `routes`: API route handlers

pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
