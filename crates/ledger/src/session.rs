//! Session state: who is logged in and which screen is active.
//!
//! Pure state, no business logic. Logging out deliberately keeps the display
//! name and leaves the ledger untouched; returning to the login screen hides
//! the data without wiping it.

use crate::LedgerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Dashboard,
}

#[derive(Debug, Clone)]
pub struct Session {
    display_name: String,
    active_screen: Screen,
}

impl Session {
    #[must_use]
    pub fn new() -> Self {
        Self {
            display_name: String::new(),
            active_screen: Screen::Login,
        }
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    #[must_use]
    pub fn active_screen(&self) -> Screen {
        self.active_screen
    }

    /// Stores the trimmed display name and activates the dashboard.
    ///
    /// Blank or whitespace-only names are rejected and nothing changes.
    pub fn login(&mut self, display_name: &str) -> Result<(), LedgerError> {
        let trimmed = display_name.trim();
        if trimmed.is_empty() {
            return Err(LedgerError::EmptyName);
        }
        self.display_name = trimmed.to_string();
        self.active_screen = Screen::Dashboard;
        Ok(())
    }

    /// Returns to the login screen. Does not clear the display name.
    pub fn logout(&mut self) {
        self.active_screen = Screen::Login;
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_rejects_blank_names() {
        let mut session = Session::new();
        assert_eq!(session.login("   "), Err(LedgerError::EmptyName));
        assert_eq!(session.active_screen(), Screen::Login);
    }

    #[test]
    fn login_trims_and_switches_screen() {
        let mut session = Session::new();
        session.login("  Alice ").unwrap();
        assert_eq!(session.display_name(), "Alice");
        assert_eq!(session.active_screen(), Screen::Dashboard);
    }

    #[test]
    fn logout_keeps_the_name() {
        let mut session = Session::new();
        session.login("Alice").unwrap();
        session.logout();
        assert_eq!(session.active_screen(), Screen::Login);
        assert_eq!(session.display_name(), "Alice");
    }
}
