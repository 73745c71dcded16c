//! # WasteWise Client Library
//!
//! Session handling and data access for WasteWise Connect front ends.
//!
//! ## Modules
//!
//! - `backend`: the data-access trait with mock and HTTP implementations
//! - `session`: session store, durable storage and navigation hook
//! - `services`: role-aware schedule, invoice and user operations
//! - `config`: environment-based configuration
//! - `app`: composition of all of the above
//!
//! ## Example
//!
//! ```no_run
//! use wastewise_client::app::ClientContext;
//! use wastewise_client::config::ClientConfig;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = ClientContext::from_config(&ClientConfig::from_env()?)?;
//! client.session.login("alice@example.com", "password").await?;
//!
//! for invoice in client.invoices.list().await? {
//!     println!("{} {}", invoice.id, invoice.status);
//! }
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod backend;
pub mod config;
pub mod error;
pub mod services;
pub mod session;
