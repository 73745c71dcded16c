/// Invoice model and payment status lifecycle
///
/// # Status transitions
///
/// ```text
/// pending ──> overdue
///    │           │
///    └──> paid <─┘
/// ```
///
/// Moving to `paid` stamps `paymentDate` (today unless the update carries
/// one). Nothing leaves `paid`, and `overdue` never returns to `pending`.
/// Setting the current status again is a no-op.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

/// Payment status of an invoice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Pending,
    Paid,
    Overdue,
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Pending => "pending",
            InvoiceStatus::Paid => "paid",
            InvoiceStatus::Overdue => "overdue",
        }
    }

    /// Whether `self -> next` is an allowed transition
    pub fn can_transition_to(&self, next: InvoiceStatus) -> bool {
        use InvoiceStatus::*;
        matches!(
            (self, next),
            (Pending, Pending)
                | (Overdue, Overdue)
                | (Paid, Paid)
                | (Pending, Overdue)
                | (Pending, Paid)
                | (Overdue, Paid)
        )
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rejected invoice status change
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invoice cannot move from {from} to {to}")]
pub struct InvalidTransition {
    pub from: InvoiceStatus,
    pub to: InvoiceStatus,
}

/// A bill issued to a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    /// Identifier, `inv-` prefixed
    pub id: String,

    /// Owner of the invoice
    pub user_id: String,

    pub issue_date: NaiveDate,

    pub due_date: NaiveDate,

    /// Amount due, in dollars
    pub amount: f64,

    pub status: InvoiceStatus,

    /// Billed services, in billing order
    pub services: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_date: Option<NaiveDate>,
}

impl Invoice {
    /// Builds a new pending invoice issued on `issue_date`
    pub fn issue(id: String, data: CreateInvoice, issue_date: NaiveDate) -> Self {
        Self {
            id,
            user_id: data.user_id,
            issue_date,
            due_date: data.due_date,
            amount: data.amount,
            status: InvoiceStatus::Pending,
            services: data.services,
            payment_date: None,
        }
    }

    pub fn is_paid(&self) -> bool {
        self.status == InvoiceStatus::Paid
    }

    /// Applies a status update
    ///
    /// `today` is used as the payment date when the invoice becomes paid and
    /// the update does not name one.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidTransition`] if the status change is not allowed; the
    /// invoice is left untouched in that case.
    pub fn apply(&mut self, update: UpdateInvoice, today: NaiveDate) -> Result<(), InvalidTransition> {
        let Some(next) = update.status else {
            return Ok(());
        };

        if !self.status.can_transition_to(next) {
            return Err(InvalidTransition {
                from: self.status,
                to: next,
            });
        }

        if next == InvoiceStatus::Paid && self.status != InvoiceStatus::Paid {
            self.payment_date = Some(update.payment_date.unwrap_or(today));
        }
        self.status = next;

        Ok(())
    }
}

/// Request body for issuing an invoice
///
/// The backend assigns `id`, `issueDate` (today) and `status` (pending).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateInvoice {
    #[validate(length(min = 1, message = "User id is required"))]
    pub user_id: String,

    pub due_date: NaiveDate,

    #[validate(range(min = 0.0, message = "Amount must not be negative"))]
    pub amount: f64,

    #[validate(length(min = 1, message = "At least one service is required"))]
    pub services: Vec<String>,
}

/// Request body for updating an invoice
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInvoice {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<InvoiceStatus>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_date: Option<NaiveDate>,
}

impl UpdateInvoice {
    /// Update that marks the invoice paid on `date`
    pub fn paid_on(date: NaiveDate) -> Self {
        Self {
            status: Some(InvoiceStatus::Paid),
            payment_date: Some(date),
        }
    }
}
