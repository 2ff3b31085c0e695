//! Route table and navigation guard.
//!
//! Routes are declared once at startup with per-route metadata: whether the
//! route requires authentication and, optionally, a required role. The guard
//! runs before every transition: unauthenticated or wrong-role visitors are
//! redirected to `/login`, and the root path forwards an authenticated user
//! to the landing page of their role. Loop prevention relies on the login
//! and landing routes themselves not requiring anything further.

use crate::session::{Role, Session};
use tokio::sync::RwLock;
use tracing::debug;

pub const LOGIN_ROUTE: &str = "/login";
pub const PATIENT_HOME: &str = "/patient-requests";
pub const DOCTOR_HOME: &str = "/doctor-requests";

/// Static description of one route. Never mutated after startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteDescriptor {
    pub path: &'static str,
    pub component: &'static str,
    pub requires_auth: bool,
    pub required_role: Option<Role>,
}

/// Outcome of a guarded route transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// The transition is allowed; the named component would render.
    Proceed {
        component: &'static str,
        path: String,
    },
    /// The guard bounced the transition somewhere else.
    Redirect(&'static str),
    /// No route matches the target path.
    NotFound,
}

#[derive(Debug)]
pub struct RouteTable {
    routes: Vec<RouteDescriptor>,
}

impl Default for RouteTable {
    fn default() -> Self {
        Self {
            routes: vec![
                RouteDescriptor {
                    path: LOGIN_ROUTE,
                    component: "Login",
                    requires_auth: false,
                    required_role: None,
                },
                RouteDescriptor {
                    path: "/register",
                    component: "Register",
                    requires_auth: false,
                    required_role: None,
                },
                RouteDescriptor {
                    path: PATIENT_HOME,
                    component: "PatientRequests",
                    requires_auth: true,
                    required_role: Some(Role::Patient),
                },
                RouteDescriptor {
                    path: "/diagnosis_request/:id",
                    component: "RequestDetails",
                    requires_auth: true,
                    required_role: None,
                },
                RouteDescriptor {
                    path: "/request/:id",
                    component: "RequestDetails",
                    requires_auth: true,
                    required_role: None,
                },
                RouteDescriptor {
                    path: DOCTOR_HOME,
                    component: "DoctorRequests",
                    requires_auth: true,
                    required_role: Some(Role::Dermatologist),
                },
                RouteDescriptor {
                    path: "/doctor-request/:id",
                    component: "DoctorRequestDetail",
                    requires_auth: true,
                    required_role: Some(Role::Dermatologist),
                },
            ],
        }
    }
}

impl RouteTable {
    /// Evaluate the guard for a target path against the current session.
    #[must_use]
    pub fn resolve(&self, target: &str, session: &Session) -> Navigation {
        // Root forwards by role; anonymous visitors land on the login page.
        if target == "/" {
            return match session.role {
                Some(Role::Patient) => Navigation::Redirect(PATIENT_HOME),
                Some(Role::Dermatologist) => Navigation::Redirect(DOCTOR_HOME),
                None => Navigation::Redirect(LOGIN_ROUTE),
            };
        }

        let Some(route) = self.find(target) else {
            return Navigation::NotFound;
        };

        if route.requires_auth && !session.is_authenticated() {
            return Navigation::Redirect(LOGIN_ROUTE);
        }

        if let Some(required) = route.required_role {
            if session.role != Some(required) {
                return Navigation::Redirect(LOGIN_ROUTE);
            }
        }

        Navigation::Proceed {
            component: route.component,
            path: target.to_string(),
        }
    }

    fn find(&self, target: &str) -> Option<&RouteDescriptor> {
        self.routes
            .iter()
            .find(|route| path_matches(route.path, target))
    }
}

/// Match a target path against a pattern; `:` segments match any single
/// non-empty segment.
fn path_matches(pattern: &str, target: &str) -> bool {
    let pattern_segments: Vec<&str> = pattern.split('/').filter(|s| !s.is_empty()).collect();
    let target_segments: Vec<&str> = target.split('/').filter(|s| !s.is_empty()).collect();

    if pattern_segments.len() != target_segments.len() {
        return false;
    }

    pattern_segments
        .iter()
        .zip(&target_segments)
        .all(|(pattern, actual)| pattern.starts_with(':') || pattern == actual)
}

/// Current location plus the route table, shared with the HTTP client so a
/// failed token refresh can force the login page.
#[derive(Debug)]
pub struct Navigator {
    table: RouteTable,
    location: RwLock<String>,
}

impl Navigator {
    #[must_use]
    pub fn new(table: RouteTable) -> Self {
        Self {
            table,
            location: RwLock::new("/".to_string()),
        }
    }

    /// Run the guard for a target and record the resulting location.
    pub async fn navigate(&self, target: &str, session: &Session) -> Navigation {
        let outcome = self.table.resolve(target, session);

        let destination = match &outcome {
            Navigation::Proceed { path, .. } => Some(path.clone()),
            Navigation::Redirect(path) => Some((*path).to_string()),
            Navigation::NotFound => None,
        };

        if let Some(destination) = destination {
            debug!("navigating to {destination}");
            *self.location.write().await = destination;
        }

        outcome
    }

    /// Set the location unconditionally, bypassing the guard.
    pub async fn force(&self, path: &str) {
        debug!("forcing navigation to {path}");
        *self.location.write().await = path.to_string();
    }

    pub async fn location(&self) -> String {
        self.location.read().await.clone()
    }
}
