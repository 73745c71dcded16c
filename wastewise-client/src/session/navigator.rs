//! Post-login and post-logout navigation
//!
//! The session store does not render anything. It tells a [`Navigator`]
//! where the user should land and leaves the rest to the front end.

use std::fmt;
use std::sync::Mutex;

/// Where to send the user after a session change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    /// After login or registration
    Dashboard,

    /// After logout
    Login,
}

impl Destination {
    pub fn path(&self) -> &'static str {
        match self {
            Destination::Dashboard => "/dashboard",
            Destination::Login => "/login",
        }
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Navigation hook invoked by the session store
pub trait Navigator: Send + Sync {
    fn navigate(&self, destination: Destination);
}

/// Logs each navigation and does nothing else
///
/// Used by the command-line client, which has no screens to switch.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingNavigator;

impl Navigator for LoggingNavigator {
    fn navigate(&self, destination: Destination) {
        tracing::debug!(%destination, "Navigate");
    }
}

/// Remembers every navigation, in order
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    visited: Mutex<Vec<Destination>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visited(&self) -> Vec<Destination> {
        match self.visited.lock() {
            Ok(visited) => visited.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn last(&self) -> Option<Destination> {
        self.visited().last().copied()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, destination: Destination) {
        match self.visited.lock() {
            Ok(mut visited) => visited.push(destination),
            Err(poisoned) => poisoned.into_inner().push(destination),
        }
    }
}
