/// Route table for the mock backend
///
/// Every request the mock backend understands is listed in [`ROUTES`] as a
/// `(method, pattern)` pair. Patterns are `/`-separated literal segments with
/// `{id}` standing for exactly one non-empty segment. Anything that does not
/// resolve is outside the simulation and fails with `UnhandledRoute`.
///
/// # Example
///
/// ```
/// use wastewise_client::backend::routes::{resolve, Method, RouteKind};
///
/// let route = resolve(Method::Put, "/schedule/sch-001").unwrap();
/// assert_eq!(route.kind, RouteKind::UpdateSchedule);
/// assert_eq!(route.id(), "sch-001");
///
/// assert!(resolve(Method::Delete, "/schedule/sch-001").is_none());
/// ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// HTTP method of a data-access call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// What a resolved route does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteKind {
    Login,
    Register,
    ListUsers,
    CreateUser,
    GetUser,
    UpdateUser,
    DeleteUser,
    ListSchedule,
    GetSchedule,
    UpdateSchedule,
    ListInvoices,
    CreateInvoice,
    GetInvoice,
    UpdateInvoice,
}

/// One entry of the route table
#[derive(Debug, Clone, Copy)]
pub struct RouteDef {
    pub method: Method,
    pub pattern: &'static str,
    pub kind: RouteKind,
}

const fn route(method: Method, pattern: &'static str, kind: RouteKind) -> RouteDef {
    RouteDef {
        method,
        pattern,
        kind,
    }
}

/// Every route the mock backend serves
pub const ROUTES: &[RouteDef] = &[
    route(Method::Post, "/auth/login", RouteKind::Login),
    route(Method::Post, "/auth/register", RouteKind::Register),
    route(Method::Get, "/users", RouteKind::ListUsers),
    route(Method::Post, "/users", RouteKind::CreateUser),
    route(Method::Get, "/users/{id}", RouteKind::GetUser),
    route(Method::Put, "/users/{id}", RouteKind::UpdateUser),
    route(Method::Delete, "/users/{id}", RouteKind::DeleteUser),
    route(Method::Get, "/schedule", RouteKind::ListSchedule),
    route(Method::Get, "/schedule/{id}", RouteKind::GetSchedule),
    route(Method::Put, "/schedule/{id}", RouteKind::UpdateSchedule),
    route(Method::Get, "/invoices", RouteKind::ListInvoices),
    route(Method::Post, "/invoices", RouteKind::CreateInvoice),
    route(Method::Get, "/invoices/{id}", RouteKind::GetInvoice),
    route(Method::Put, "/invoices/{id}", RouteKind::UpdateInvoice),
];

const ID_PLACEHOLDER: &str = "{id}";

/// A matched request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub kind: RouteKind,

    /// Captured `{id}` segment, if the pattern has one
    pub id: Option<String>,
}

impl Route {
    /// Captured id, or `""` for collection routes
    pub fn id(&self) -> &str {
        self.id.as_deref().unwrap_or_default()
    }
}

fn segments(path: &str) -> Option<Vec<&str>> {
    let path = path.split('?').next().unwrap_or_default();
    let rest = path.strip_prefix('/')?;
    let rest = rest.strip_suffix('/').unwrap_or(rest);
    Some(rest.split('/').collect())
}

fn match_pattern(pattern: &str, path: &[&str]) -> Option<Option<String>> {
    let pattern = segments(pattern)?;
    if pattern.len() != path.len() {
        return None;
    }

    let mut id = None;
    for (expected, actual) in pattern.iter().zip(path) {
        if *expected == ID_PLACEHOLDER {
            if actual.is_empty() {
                return None;
            }
            id = Some(actual.to_string());
        } else if expected != actual {
            return None;
        }
    }
    Some(id)
}

/// Resolves a method and path against [`ROUTES`]
///
/// A query string and a single trailing slash are ignored. Returns `None`
/// for anything outside the table.
pub fn resolve(method: Method, path: &str) -> Option<Route> {
    let path = segments(path)?;

    ROUTES
        .iter()
        .filter(|def| def.method == method)
        .find_map(|def| {
            match_pattern(def.pattern, &path).map(|id| Route { kind: def.kind, id })
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_table_entry_resolves() {
        for def in ROUTES {
            let path = def.pattern.replace(ID_PLACEHOLDER, "abc-123");
            let route = resolve(def.method, &path)
                .unwrap_or_else(|| panic!("{} {} did not resolve", def.method, path));

            assert_eq!(route.kind, def.kind);
            if def.pattern.contains(ID_PLACEHOLDER) {
                assert_eq!(route.id(), "abc-123");
            } else {
                assert_eq!(route.id, None);
            }
        }
    }

    #[test]
    fn test_collection_and_item_are_distinct() {
        assert_eq!(resolve(Method::Get, "/users").unwrap().kind, RouteKind::ListUsers);
        assert_eq!(resolve(Method::Get, "/users/usr-001").unwrap().kind, RouteKind::GetUser);
    }

    #[test]
    fn test_trailing_slash_and_query_ignored() {
        assert_eq!(resolve(Method::Get, "/invoices/").unwrap().kind, RouteKind::ListInvoices);
        assert_eq!(
            resolve(Method::Get, "/invoices?userId=usr-001").unwrap().kind,
            RouteKind::ListInvoices
        );
    }

    #[test]
    fn test_unknown_routes() {
        assert!(resolve(Method::Get, "/reports").is_none());
        assert!(resolve(Method::Get, "/auth/login").is_none());
        assert!(resolve(Method::Delete, "/invoices/inv-001").is_none());
        assert!(resolve(Method::Get, "/users/usr-001/invoices").is_none());
        assert!(resolve(Method::Get, "users").is_none());
        assert!(resolve(Method::Get, "/users//").is_none());
        // Substring matches are not routes
        assert!(resolve(Method::Get, "/admin/users").is_none());
        assert!(resolve(Method::Put, "/schedules/sch-001").is_none());
    }

    #[test]
    fn test_method_display() {
        assert_eq!(Method::Delete.to_string(), "DELETE");
        assert_eq!(reqwest::Method::from(Method::Put), reqwest::Method::PUT);
    }
}
