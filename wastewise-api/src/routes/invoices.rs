/// Invoice endpoints
///
/// - `GET /api/invoices` - List invoices; `?userId=` filters by owner and
///   `?id=` returns a single invoice
/// - `POST /api/invoices` - Issue an invoice (admin)
/// - `GET /api/invoices/:id` - Get an invoice
/// - `PUT /api/invoices/:id` - Update an invoice's status
///
/// Residents only ever see their own invoices and may only mark them paid.
/// Collectors can read everything but change nothing; admins can do both.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    middleware::auth::AuthUser,
};
use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde::Deserialize;
use wastewise_shared::models::{CreateInvoice, Invoice, InvoiceStatus, UpdateInvoice};

/// Query parameters of `GET /api/invoices`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceQuery {
    pub user_id: Option<String>,
    pub id: Option<String>,
}

fn check_owner(auth: &AuthUser, invoice: &Invoice) -> ApiResult<()> {
    if auth.role.can_view_all_invoices() || invoice.user_id == auth.user_id {
        Ok(())
    } else {
        Err(ApiError::Forbidden(format!(
            "Invoice {} belongs to another user",
            invoice.id
        )))
    }
}

pub async fn list_invoices(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Query(query): Query<InvoiceQuery>,
) -> ApiResult<Response> {
    if let Some(id) = query.id {
        let invoice = state.db.find_invoice(&id).await?;
        check_owner(&auth, &invoice)?;
        return Ok(Json(invoice).into_response());
    }

    let user_id = if auth.role.can_view_all_invoices() {
        query.user_id
    } else {
        match query.user_id {
            Some(requested) if requested != auth.user_id => {
                return Err(ApiError::Forbidden(
                    "Residents may only list their own invoices".to_string(),
                ));
            }
            _ => Some(auth.user_id.clone()),
        }
    };

    let invoices = state.db.list_invoices(user_id.as_deref()).await;
    Ok(Json(invoices).into_response())
}

pub async fn create_invoice(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(req): Json<CreateInvoice>,
) -> ApiResult<Json<Invoice>> {
    auth.require_admin("issue invoices")?;

    let invoice = state.db.create_invoice(req).await?;
    tracing::info!(invoice_id = %invoice.id, user_id = %invoice.user_id, "Invoice issued");
    Ok(Json(invoice))
}

pub async fn get_invoice(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<Json<Invoice>> {
    let invoice = state.db.find_invoice(&id).await?;
    check_owner(&auth, &invoice)?;
    Ok(Json(invoice))
}

/// Updates an invoice's status
///
/// ```text
/// PUT /api/invoices/inv-001
/// { "status": "paid", "paymentDate": "2023-10-01" }
/// ```
///
/// # Errors
///
/// - `403 Forbidden`: Not the owner, or a resident changing anything but payment
/// - `409 Conflict` (`invalid_transition`): Status change not allowed
pub async fn update_invoice(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(req): Json<UpdateInvoice>,
) -> ApiResult<Json<Invoice>> {
    if !auth.role.is_admin() {
        let invoice = state.db.find_invoice(&id).await?;
        if invoice.user_id != auth.user_id {
            return Err(ApiError::Forbidden(format!(
                "Invoice {} belongs to another user",
                invoice.id
            )));
        }
        if req.status.is_some_and(|status| status != InvoiceStatus::Paid) {
            return Err(ApiError::Forbidden(
                "Only payment can be recorded on your own invoices".to_string(),
            ));
        }
    }

    let invoice = state.db.update_invoice(&id, req).await?;
    tracing::info!(user_id = %auth.user_id, invoice_id = %invoice.id, status = %invoice.status, "Invoice updated");
    Ok(Json(invoice))
}
