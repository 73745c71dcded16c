/// Shared in-memory collections
///
/// [`MemoryDb`] is a cheap-to-clone handle over one set of collections. All
/// clones see the same data, so a mutation made through the mock backend is
/// visible to every later call in the process.
///
/// Each operation takes the lock once and never awaits while holding it, so
/// mutations are atomic with respect to other tasks.
///
/// # Example
///
/// ```
/// use wastewise_shared::db::MemoryDb;
/// use wastewise_shared::models::ScheduleStatus;
///
/// # async fn example() -> Result<(), wastewise_shared::db::DbError> {
/// let db = MemoryDb::seeded();
/// let entry = db.update_schedule_status("sch-001", ScheduleStatus::Collected).await?;
/// assert_eq!(entry.status, ScheduleStatus::Collected);
/// # Ok(())
/// # }
/// ```

use crate::auth::{credentials, ids};
use crate::db::seed;
use crate::models::{
    invoice::InvalidTransition, CreateInvoice, CreateUser, Invoice, LoginPayload, RegisterUser,
    ScheduleEntry, ScheduleStatus, UpdateInvoice, UpdateUser, User,
};
use crate::validation::{validate_payload, FieldError};
use chrono::{NaiveDate, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Data layer error types
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DbError {
    /// Unknown email or wrong password
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Unique constraint violation (e.g. duplicate email)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// No record with the given id
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    /// Forbidden invoice status change
    #[error(transparent)]
    InvalidTransition(#[from] InvalidTransition),

    /// Payload failed validation
    #[error("Validation failed: {} errors", .0.len())]
    Validation(Vec<FieldError>),
}

impl DbError {
    fn not_found(kind: &'static str, id: &str) -> Self {
        DbError::NotFound {
            kind,
            id: id.to_string(),
        }
    }
}

/// Data layer result type alias
pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug, Default)]
struct Collections {
    users: Vec<User>,
    schedule: Vec<ScheduleEntry>,
    invoices: Vec<Invoice>,
}

impl Collections {
    fn email_taken(&self, email: &str, except_id: Option<&str>) -> bool {
        self.users
            .iter()
            .filter(|u| Some(u.id.as_str()) != except_id)
            .any(|u| u.email.eq_ignore_ascii_case(email))
    }

    fn insert_user(&mut self, user: User) -> DbResult<User> {
        if self.email_taken(&user.email, None) {
            return Err(DbError::Conflict(format!(
                "User with email {} already exists",
                user.email
            )));
        }
        self.users.push(user.clone());
        Ok(user)
    }
}

/// Handle to the shared collections
#[derive(Debug, Clone, Default)]
pub struct MemoryDb {
    inner: Arc<RwLock<Collections>>,
}

impl MemoryDb {
    /// Creates an empty database
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a database holding the development fixtures
    pub fn seeded() -> Self {
        Self::from_parts(seed::users(), seed::schedule(), seed::invoices())
    }

    /// Creates a database holding the given records
    pub fn from_parts(users: Vec<User>, schedule: Vec<ScheduleEntry>, invoices: Vec<Invoice>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Collections {
                users,
                schedule,
                invoices,
            })),
        }
    }

    fn today() -> NaiveDate {
        Utc::now().date_naive()
    }

    // --- Authentication ---

    /// Checks a login attempt
    ///
    /// Succeeds only when the email exactly matches a known user and the
    /// password hash equals the development sentinel.
    pub async fn authenticate(&self, payload: &LoginPayload) -> DbResult<User> {
        let collections = self.inner.read().await;

        collections
            .users
            .iter()
            .find(|u| u.email == payload.email)
            .filter(|_| credentials::verify_mock_password(&payload.password_hash))
            .cloned()
            .ok_or(DbError::InvalidCredentials)
    }

    /// Creates an account from a self-registration
    pub async fn register(&self, data: RegisterUser) -> DbResult<User> {
        validate_payload(&data).map_err(DbError::Validation)?;

        let user = User {
            id: ids::generate_id(ids::USER_PREFIX),
            first_name: data.first_name,
            last_name: data.last_name,
            email: data.email,
            role: data.role,
            address: data.address,
            household_id: data.household_id,
        };

        let user = self.inner.write().await.insert_user(user)?;
        tracing::debug!(user_id = %user.id, "Registered user");
        Ok(user)
    }

    // --- Users ---

    pub async fn list_users(&self) -> Vec<User> {
        self.inner.read().await.users.clone()
    }

    pub async fn find_user(&self, id: &str) -> DbResult<User> {
        self.inner
            .read()
            .await
            .users
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .ok_or_else(|| DbError::not_found("User", id))
    }

    /// Creates an account on behalf of an administrator
    pub async fn create_user(&self, data: CreateUser) -> DbResult<User> {
        validate_payload(&data).map_err(DbError::Validation)?;

        let user = User {
            id: ids::generate_id(ids::USER_PREFIX),
            first_name: data.first_name,
            last_name: data.last_name,
            email: data.email,
            role: data.role,
            address: data.address,
            household_id: data.household_id,
        };

        let user = self.inner.write().await.insert_user(user)?;
        tracing::debug!(user_id = %user.id, role = %user.role, "Created user");
        Ok(user)
    }

    /// Applies a partial update; the role never changes
    pub async fn update_user(&self, id: &str, update: UpdateUser) -> DbResult<User> {
        validate_payload(&update).map_err(DbError::Validation)?;

        let mut collections = self.inner.write().await;

        if let Some(email) = &update.email {
            if collections.email_taken(email, Some(id)) {
                return Err(DbError::Conflict(format!(
                    "User with email {} already exists",
                    email
                )));
            }
        }

        let user = collections
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| DbError::not_found("User", id))?;
        user.apply(update);

        Ok(user.clone())
    }

    pub async fn delete_user(&self, id: &str) -> DbResult<()> {
        let mut collections = self.inner.write().await;
        let before = collections.users.len();
        collections.users.retain(|u| u.id != id);

        if collections.users.len() == before {
            return Err(DbError::not_found("User", id));
        }
        tracing::debug!(user_id = %id, "Deleted user");
        Ok(())
    }

    // --- Schedule ---

    pub async fn list_schedule(&self) -> Vec<ScheduleEntry> {
        self.inner.read().await.schedule.clone()
    }

    pub async fn find_schedule(&self, id: &str) -> DbResult<ScheduleEntry> {
        self.inner
            .read()
            .await
            .schedule
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or_else(|| DbError::not_found("Schedule entry", id))
    }

    /// Sets the status of one entry; any status may follow any other
    pub async fn update_schedule_status(&self, id: &str, status: ScheduleStatus) -> DbResult<ScheduleEntry> {
        let mut collections = self.inner.write().await;
        let entry = collections
            .schedule
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| DbError::not_found("Schedule entry", id))?;

        entry.status = status;
        Ok(entry.clone())
    }

    // --- Invoices ---

    /// Lists invoices, optionally only those owned by `user_id`
    pub async fn list_invoices(&self, user_id: Option<&str>) -> Vec<Invoice> {
        self.inner
            .read()
            .await
            .invoices
            .iter()
            .filter(|inv| user_id.map_or(true, |uid| inv.user_id == uid))
            .cloned()
            .collect()
    }

    pub async fn find_invoice(&self, id: &str) -> DbResult<Invoice> {
        self.inner
            .read()
            .await
            .invoices
            .iter()
            .find(|inv| inv.id == id)
            .cloned()
            .ok_or_else(|| DbError::not_found("Invoice", id))
    }

    /// Issues a pending invoice dated today
    pub async fn create_invoice(&self, data: CreateInvoice) -> DbResult<Invoice> {
        validate_payload(&data).map_err(DbError::Validation)?;

        let invoice = Invoice::issue(ids::generate_id(ids::INVOICE_PREFIX), data, Self::today());
        self.inner.write().await.invoices.push(invoice.clone());

        tracing::debug!(invoice_id = %invoice.id, user_id = %invoice.user_id, "Issued invoice");
        Ok(invoice)
    }

    pub async fn update_invoice(&self, id: &str, update: UpdateInvoice) -> DbResult<Invoice> {
        let mut collections = self.inner.write().await;
        let invoice = collections
            .invoices
            .iter_mut()
            .find(|inv| inv.id == id)
            .ok_or_else(|| DbError::not_found("Invoice", id))?;

        invoice.apply(update, Self::today())?;
        Ok(invoice.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{InvoiceStatus, Role};

    fn login(email: &str, password: &str) -> LoginPayload {
        LoginPayload {
            email: email.to_string(),
            password_hash: password.to_string(),
        }
    }

    fn registration(email: &str) -> RegisterUser {
        RegisterUser {
            first_name: "Dana".to_string(),
            last_name: "Lee".to_string(),
            email: email.to_string(),
            password: "secret1".to_string(),
            role: Role::Resident,
            address: None,
            household_id: None,
        }
    }

    #[tokio::test]
    async fn test_authenticate_seeded_users() {
        let db = MemoryDb::seeded();

        for user in seed::users() {
            let found = db.authenticate(&login(&user.email, "password")).await.unwrap();
            assert_eq!(found, user);
        }
    }

    #[tokio::test]
    async fn test_authenticate_rejects_wrong_password_and_unknown_email() {
        let db = MemoryDb::seeded();

        assert_eq!(
            db.authenticate(&login("alice@example.com", "wrong")).await,
            Err(DbError::InvalidCredentials)
        );
        assert_eq!(
            db.authenticate(&login("nobody@example.com", "password")).await,
            Err(DbError::InvalidCredentials)
        );
    }

    #[tokio::test]
    async fn test_authenticate_requires_exact_email() {
        let db = MemoryDb::seeded();

        assert_eq!(
            db.authenticate(&login("ALICE@EXAMPLE.COM", "password")).await,
            Err(DbError::InvalidCredentials)
        );
        assert_eq!(
            db.authenticate(&login("Alice@example.com", "password")).await,
            Err(DbError::InvalidCredentials)
        );
    }

    #[tokio::test]
    async fn test_register_conflicts_on_existing_email() {
        let db = MemoryDb::seeded();

        let err = db.register(registration("ALICE@example.com")).await.unwrap_err();
        assert!(matches!(err, DbError::Conflict(_)));
        assert_eq!(db.list_users().await.len(), 3);
    }

    #[tokio::test]
    async fn test_registered_user_can_log_in() {
        let db = MemoryDb::seeded();
        let user = db.register(registration("dana@example.com")).await.unwrap();

        assert!(user.id.starts_with("usr-"));
        let found = db.authenticate(&login("dana@example.com", "password")).await.unwrap();
        assert_eq!(found.id, user.id);
    }

    #[tokio::test]
    async fn test_register_validates_payload() {
        let db = MemoryDb::empty();
        let mut data = registration("dana@example.com");
        data.password = "123".to_string();

        assert!(matches!(db.register(data).await, Err(DbError::Validation(_))));
    }

    #[tokio::test]
    async fn test_update_user_email_conflict() {
        let db = MemoryDb::seeded();
        let update = UpdateUser {
            email: Some("bob@example.com".to_string()),
            ..Default::default()
        };

        let err = db.update_user("usr-001", update).await.unwrap_err();
        assert!(matches!(err, DbError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_delete_user() {
        let db = MemoryDb::seeded();

        db.delete_user("usr-002").await.unwrap();
        assert!(matches!(db.find_user("usr-002").await, Err(DbError::NotFound { .. })));
        assert!(matches!(db.delete_user("usr-002").await, Err(DbError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_update_schedule_status_only_touches_target() {
        let db = MemoryDb::seeded();

        db.update_schedule_status("sch-001", ScheduleStatus::Cancelled)
            .await
            .unwrap();

        let entries = db.list_schedule().await;
        assert_eq!(entries[0].status, ScheduleStatus::Cancelled);
        assert_eq!(entries[1].status, ScheduleStatus::Collected);
    }

    #[tokio::test]
    async fn test_create_invoice_defaults() {
        let db = MemoryDb::seeded();
        let invoice = db
            .create_invoice(CreateInvoice {
                user_id: "usr-001".to_string(),
                due_date: NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(),
                amount: 30.5,
                services: vec!["Recycling".to_string()],
            })
            .await
            .unwrap();

        assert!(invoice.id.starts_with("inv-"));
        assert_eq!(invoice.status, InvoiceStatus::Pending);
        assert_eq!(invoice.issue_date, Utc::now().date_naive());
        assert_eq!(db.list_invoices(Some("usr-001")).await.len(), 3);
        assert!(db.list_invoices(Some("usr-002")).await.is_empty());
    }

    #[tokio::test]
    async fn test_update_invoice_rejects_unpaying() {
        let db = MemoryDb::seeded();
        let update = UpdateInvoice {
            status: Some(InvoiceStatus::Pending),
            payment_date: None,
        };

        let err = db.update_invoice("inv-002", update).await.unwrap_err();
        assert!(matches!(err, DbError::InvalidTransition(_)));
        assert!(db.find_invoice("inv-002").await.unwrap().is_paid());
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let db = MemoryDb::seeded();
        let other = db.clone();

        other.delete_user("usr-003").await.unwrap();
        assert_eq!(db.list_users().await.len(), 2);
    }
}
