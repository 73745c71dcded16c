/// User model and authentication payloads
///
/// Users are residents, collectors, or administrators. A user's role is fixed
/// at creation time: [`UpdateUser`] has no role field, so a role sent in an
/// update body is dropped during deserialization.
///
/// # JSON shape
///
/// ```json
/// {
///   "id": "usr-001",
///   "firstName": "Alice",
///   "lastName": "Smith",
///   "email": "alice@example.com",
///   "role": "resident",
///   "address": "123 Main St",
///   "householdId": "h001"
/// }
/// ```

use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

/// Role of a user account
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Household resident (default for self-registration)
    #[default]
    Resident,

    /// Waste collector
    Collector,

    /// Municipal administrator
    Admin,
}

impl Role {
    /// Whether this role may change the status of schedule entries
    pub fn can_edit_schedule(&self) -> bool {
        matches!(self, Role::Collector | Role::Admin)
    }

    /// Whether this role may see every user's invoices
    pub fn can_view_all_invoices(&self) -> bool {
        matches!(self, Role::Collector | Role::Admin)
    }

    /// Whether this role may manage user accounts and issue invoices
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }

    /// Gets role as string
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Resident => "resident",
            Role::Collector => "collector",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Identifier, `usr-` prefixed
    pub id: String,

    pub first_name: String,

    pub last_name: String,

    /// Email address, unique across users
    pub email: String,

    pub role: Role,

    /// Street address (residents)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    /// Household the resident belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub household_id: Option<String>,
}

impl User {
    /// Returns "First Last"
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Applies a partial update in place
    ///
    /// Only fields present in `update` are changed. The role is never
    /// touched.
    pub fn apply(&mut self, update: UpdateUser) {
        if let Some(first_name) = update.first_name {
            self.first_name = first_name;
        }
        if let Some(last_name) = update.last_name {
            self.last_name = last_name;
        }
        if let Some(email) = update.email {
            self.email = email;
        }
        if let Some(address) = update.address {
            self.address = Some(address);
        }
        if let Some(household_id) = update.household_id {
            self.household_id = Some(household_id);
        }
    }
}

/// Login request body
///
/// `passwordHash` carries whatever the login form produced; the mock backend
/// compares it against a fixed development sentinel.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginPayload {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password_hash: String,
}

/// Successful login or registration response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    /// The authenticated user
    pub user: User,

    /// Opaque bearer token
    pub token: String,
}

/// Self-registration request body
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUser {
    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: String,

    #[validate(length(min = 1, message = "Last name is required"))]
    pub last_name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,

    #[serde(default)]
    pub role: Role,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub household_id: Option<String>,
}

/// Administrator request body for creating an account
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUser {
    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: String,

    #[validate(length(min = 1, message = "Last name is required"))]
    pub last_name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    pub role: Role,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password_hash: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub household_id: Option<String>,
}

/// Partial update of a user account
///
/// All fields are optional. Only non-None fields will be updated.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUser {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "First name must not be empty"))]
    pub first_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "Last name must not be empty"))]
    pub last_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub household_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> User {
        User {
            id: "usr-001".to_string(),
            first_name: "Alice".to_string(),
            last_name: "Smith".to_string(),
            email: "alice@example.com".to_string(),
            role: Role::Resident,
            address: Some("123 Main St".to_string()),
            household_id: Some("h001".to_string()),
        }
    }

    #[test]
    fn test_role_permissions() {
        assert!(!Role::Resident.can_edit_schedule());
        assert!(Role::Collector.can_edit_schedule());
        assert!(Role::Admin.can_edit_schedule());

        assert!(!Role::Collector.is_admin());
        assert!(Role::Admin.is_admin());
    }

    #[test]
    fn test_user_serializes_camel_case() {
        let json = serde_json::to_value(alice()).unwrap();
        assert_eq!(json["firstName"], "Alice");
        assert_eq!(json["householdId"], "h001");
        assert_eq!(json["role"], "resident");
    }

    #[test]
    fn test_user_omits_absent_optionals() {
        let mut user = alice();
        user.address = None;
        user.household_id = None;

        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("address"));
        assert!(!json.contains("householdId"));
    }

    #[test]
    fn test_update_ignores_role() {
        let update: UpdateUser = serde_json::from_value(serde_json::json!({
            "firstName": "Alicia",
            "role": "admin"
        }))
        .unwrap();

        let mut user = alice();
        user.apply(update);

        assert_eq!(user.first_name, "Alicia");
        assert_eq!(user.last_name, "Smith");
        assert_eq!(user.role, Role::Resident);
    }

    #[test]
    fn test_register_defaults_to_resident() {
        let payload: RegisterUser = serde_json::from_value(serde_json::json!({
            "firstName": "Dana",
            "lastName": "Lee",
            "email": "dana@example.com",
            "password": "secret1"
        }))
        .unwrap();

        assert_eq!(payload.role, Role::Resident);
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn test_register_rejects_short_password() {
        let payload = RegisterUser {
            first_name: "Dana".to_string(),
            last_name: "Lee".to_string(),
            email: "dana@example.com".to_string(),
            password: "12345".to_string(),
            role: Role::Resident,
            address: None,
            household_id: None,
        };

        let errors = payload.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("password"));
    }
}
