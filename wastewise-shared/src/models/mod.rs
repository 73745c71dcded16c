/// Domain models for WasteWise
///
/// This module contains the records exchanged between the client, the mock
/// backend, and the API server, together with their request payloads.
///
/// # Models
///
/// - `user`: Residents, collectors and administrators, plus auth payloads
/// - `schedule`: Collection schedule entries
/// - `invoice`: Invoices and the payment status lifecycle
///
/// All records serialize with camelCase field names and omit absent optional
/// fields, so they match the JSON the web client has always exchanged.
///
/// # Example
///
/// ```
/// use wastewise_shared::models::user::{LoginPayload, Role};
///
/// let payload = LoginPayload {
///     email: "alice@example.com".to_string(),
///     password_hash: "password".to_string(),
/// };
/// let json = serde_json::to_value(&payload).unwrap();
/// assert_eq!(json["passwordHash"], "password");
/// assert_eq!(Role::Admin.to_string(), "admin");
/// ```

pub mod invoice;
pub mod schedule;
pub mod user;

pub use invoice::{CreateInvoice, Invoice, InvoiceStatus, UpdateInvoice};
pub use schedule::{ScheduleEntry, ScheduleStatus, UpdateScheduleStatus};
pub use user::{AuthResponse, CreateUser, LoginPayload, RegisterUser, Role, UpdateUser, User};
