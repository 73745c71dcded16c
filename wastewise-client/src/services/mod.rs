/// Typed resource services
///
/// Thin wrappers over [`DataAccess`](crate::backend::DataAccess) that check
/// the logged-in user's role before calling the backend and decode the
/// results into shared models.
///
/// | Service | Read | Write |
/// |---|---|---|
/// | [`ScheduleService`] | any user | collector, admin |
/// | [`InvoiceService`] | own invoices (resident), all (collector, admin) | create: admin; pay: owner or admin |
/// | [`UserService`] | admin | admin |

pub mod invoices;
pub mod schedule;
pub mod users;

pub use invoices::{InvoiceService, PaymentDetails};
pub use schedule::ScheduleService;
pub use users::UserService;

use crate::error::{ClientError, ClientResult};
use crate::session::SessionStore;
use wastewise_shared::models::{Role, User};

/// Returns the logged-in user if `allowed` accepts their role
pub(crate) fn require_role(
    session: &SessionStore,
    allowed: impl Fn(&Role) -> bool,
    action: &str,
) -> ClientResult<User> {
    let user = session.require_user()?;
    if !allowed(&user.role) {
        tracing::debug!(user_id = %user.id, role = %user.role, action, "Permission denied");
        return Err(ClientError::Forbidden(format!(
            "Role {} may not {}",
            user.role, action
        )));
    }
    Ok(user)
}
