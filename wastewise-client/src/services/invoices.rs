/// Invoice service
///
/// Residents only ever see and pay their own invoices; collectors and admins
/// see all of them. Issuing invoices is reserved for admins.
///
/// # Paying
///
/// [`InvoiceService::pay`] checks the card details locally, loads the
/// invoice, refuses invoices that are already paid and then marks it paid
/// with today's date. No payment provider is involved.

use crate::backend::{DataAccessExt, QueryParams};
use crate::error::{ClientError, ClientResult};
use crate::services::require_role;
use crate::session::SessionStore;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::{Validate, ValidationError};
use wastewise_shared::models::{CreateInvoice, Invoice, UpdateInvoice, User};
use wastewise_shared::validation::validate_payload;

/// Card details entered on the payment form
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDetails {
    /// 16 digits, spaces allowed
    #[validate(custom(function = "validate_card_number"))]
    pub card_number: String,

    /// `MM/YY`
    #[validate(custom(function = "validate_expiry"))]
    pub expiry_date: String,

    #[validate(custom(function = "validate_cvv"))]
    pub cvv: String,

    #[validate(length(min = 1, message = "Cardholder name is required"))]
    pub cardholder_name: String,
}

fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message.into());
    error
}

fn validate_card_number(value: &str) -> Result<(), ValidationError> {
    let digits: String = value.chars().filter(|c| !c.is_whitespace()).collect();
    if digits.len() == 16 && digits.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(invalid("card_number", "Card number must be 16 digits"))
    }
}

fn validate_expiry(value: &str) -> Result<(), ValidationError> {
    let valid = match value.split_once('/') {
        Some((month, year)) => {
            month.len() == 2
                && year.len() == 2
                && year.chars().all(|c| c.is_ascii_digit())
                && matches!(month.parse::<u8>(), Ok(1..=12))
        }
        None => false,
    };

    if valid {
        Ok(())
    } else {
        Err(invalid("expiry_date", "Expiry date must be MM/YY"))
    }
}

fn validate_cvv(value: &str) -> Result<(), ValidationError> {
    if (3..=4).contains(&value.len()) && value.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(invalid("cvv", "CVV must be 3 or 4 digits"))
    }
}

#[derive(Debug, Clone)]
pub struct InvoiceService {
    session: Arc<SessionStore>,
}

impl InvoiceService {
    pub fn new(session: Arc<SessionStore>) -> Self {
        InvoiceService { session }
    }

    /// Invoices visible to the logged-in user
    pub async fn list(&self) -> ClientResult<Vec<Invoice>> {
        let user = self.session.require_user()?;

        if user.role.can_view_all_invoices() {
            return self.session.backend().get_as("/invoices", None).await;
        }

        let mut params = QueryParams::new();
        params.insert("userId".to_string(), user.id);
        self.session.backend().get_as("/invoices", Some(&params)).await
    }

    pub async fn get(&self, id: &str) -> ClientResult<Invoice> {
        let user = self.session.require_user()?;
        let invoice: Invoice = self
            .session
            .backend()
            .get_as(&format!("/invoices/{}", id), None)
            .await?;

        check_owner(&user, &invoice)?;
        Ok(invoice)
    }

    /// Issues a new invoice (admin only)
    pub async fn create(&self, data: &CreateInvoice) -> ClientResult<Invoice> {
        require_role(&self.session, |role| role.is_admin(), "issue invoices")?;

        let invoice: Invoice = self.session.backend().post_as("/invoices", data).await?;
        tracing::info!(invoice_id = %invoice.id, user_id = %invoice.user_id, "Invoice issued");
        Ok(invoice)
    }

    /// Pays an invoice with the given card
    pub async fn pay(&self, id: &str, details: &PaymentDetails) -> ClientResult<Invoice> {
        validate_payload(details).map_err(|details| ClientError::BadRequest {
            message: "Invalid payment details".to_string(),
            details,
        })?;

        let invoice = self.get(id).await?;
        if invoice.is_paid() {
            return Err(ClientError::AlreadyPaid(invoice.id));
        }

        let today = Utc::now().date_naive();
        let paid: Invoice = self
            .session
            .backend()
            .put_as(&format!("/invoices/{}", id), &UpdateInvoice::paid_on(today))
            .await?;

        tracing::info!(invoice_id = %paid.id, amount = paid.amount, "Invoice paid");
        Ok(paid)
    }
}

/// Residents may only touch their own invoices
fn check_owner(user: &User, invoice: &Invoice) -> ClientResult<()> {
    if user.role.can_view_all_invoices() || invoice.user_id == user.id {
        Ok(())
    } else {
        Err(ClientError::Forbidden(format!(
            "Invoice {} belongs to another user",
            invoice.id
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{LatencyConfig, MockBackend};
    use crate::session::{LoggingNavigator, MemoryStorage};
    use chrono::NaiveDate;
    use wastewise_shared::models::InvoiceStatus;

    fn card() -> PaymentDetails {
        PaymentDetails {
            card_number: "4242 4242 4242 4242".to_string(),
            expiry_date: "12/29".to_string(),
            cvv: "123".to_string(),
            cardholder_name: "Alice Smith".to_string(),
        }
    }

    fn service() -> (InvoiceService, Arc<SessionStore>) {
        let backend = MockBackend::seeded().with_latency(LatencyConfig::none());
        let session = Arc::new(SessionStore::new(
            Arc::new(backend),
            Arc::new(MemoryStorage::new()),
            Arc::new(LoggingNavigator),
        ));
        (InvoiceService::new(session.clone()), session)
    }

    fn new_invoice(user_id: &str) -> CreateInvoice {
        CreateInvoice {
            user_id: user_id.to_string(),
            due_date: NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
            amount: 40.0,
            services: vec!["Recycling".to_string()],
        }
    }

    #[test]
    fn test_payment_details_validation() {
        assert!(card().validate().is_ok());

        let bad = PaymentDetails {
            card_number: "4242".to_string(),
            expiry_date: "13/29".to_string(),
            cvv: "12a".to_string(),
            cardholder_name: String::new(),
        };
        let fields: Vec<String> = validate_payload(&bad)
            .unwrap_err()
            .into_iter()
            .map(|e| e.field)
            .collect();
        assert_eq!(fields, vec!["card_number", "cardholder_name", "cvv", "expiry_date"]);
    }

    #[test]
    fn test_expiry_format() {
        assert!(validate_expiry("01/25").is_ok());
        assert!(validate_expiry("1/25").is_err());
        assert!(validate_expiry("00/25").is_err());
        assert!(validate_expiry("0125").is_err());
    }

    #[tokio::test]
    async fn test_resident_sees_own_invoices() {
        let (service, session) = service();

        session.login("admin@example.com", "password").await.unwrap();
        service.create(&new_invoice("usr-002")).await.unwrap();
        assert_eq!(service.list().await.unwrap().len(), 3);
        session.logout().unwrap();

        session.login("alice@example.com", "password").await.unwrap();
        let invoices = service.list().await.unwrap();
        assert_eq!(invoices.len(), 2);
        assert!(invoices.iter().all(|i| i.user_id == "usr-001"));
    }

    #[tokio::test]
    async fn test_resident_cannot_create() {
        let (service, session) = service();
        session.login("alice@example.com", "password").await.unwrap();

        let result = service.create(&new_invoice("usr-001")).await;
        assert!(matches!(result, Err(ClientError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_pay_then_pay_again() {
        let (service, session) = service();
        session.login("alice@example.com", "password").await.unwrap();

        let paid = service.pay("inv-001", &card()).await.unwrap();
        assert_eq!(paid.status, InvoiceStatus::Paid);
        assert_eq!(paid.payment_date, Some(Utc::now().date_naive()));

        let again = service.pay("inv-001", &card()).await;
        assert!(matches!(again, Err(ClientError::AlreadyPaid(id)) if id == "inv-001"));
    }

    #[tokio::test]
    async fn test_pay_rejects_bad_card_before_calling_backend() {
        let (service, session) = service();
        session.login("alice@example.com", "password").await.unwrap();

        let mut details = card();
        details.cvv = "1".to_string();

        let result = service.pay("inv-001", &details).await;
        assert!(matches!(result, Err(ClientError::BadRequest { .. })));
        assert_eq!(service.get("inv-001").await.unwrap().status, InvoiceStatus::Pending);
    }
}
