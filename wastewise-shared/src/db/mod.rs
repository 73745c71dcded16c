/// In-memory data layer for WasteWise
///
/// This module holds the users, schedule entries and invoices that both the
/// mock backend and the development API server read and mutate. Nothing is
/// persisted; every process starts from the seed fixtures (or empty).
///
/// # Modules
///
/// - `memory`: Shared collections and their operations
/// - `seed`: Development fixtures
///
/// # Example
///
/// ```
/// use wastewise_shared::db::MemoryDb;
///
/// # async fn example() {
/// let db = MemoryDb::seeded();
/// let users = db.list_users().await;
/// assert_eq!(users.len(), 3);
/// # }
/// ```

pub mod memory;
pub mod seed;

pub use memory::{DbError, DbResult, MemoryDb};
