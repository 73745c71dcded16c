/// API route handlers
///
/// - `health`: liveness check
/// - `auth`: login, registration and the current user
/// - `users`: account administration
/// - `schedule`: collection schedule
/// - `invoices`: invoices and payments

pub mod auth;
pub mod health;
pub mod invoices;
pub mod schedule;
pub mod users;
