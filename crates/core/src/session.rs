//! Login state held in process memory
//!
//! Nothing is persisted: a restart always starts logged out.

use parking_lot::RwLock;
use salesdesk_domain::constants::INVALID_SESSION_MESSAGE;
use salesdesk_domain::{GroupInfo, Result, SalesDeskError};

/// Either logged out or holding the group info from a successful login.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Session {
    #[default]
    LoggedOut,
    LoggedIn(GroupInfo),
}

impl Session {
    pub const fn is_logged_in(&self) -> bool {
        matches!(self, Self::LoggedIn(_))
    }

    pub const fn group_info(&self) -> Option<&GroupInfo> {
        match self {
            Self::LoggedIn(info) => Some(info),
            Self::LoggedOut => None,
        }
    }
}

/// Thread-safe holder for the current [`Session`].
#[derive(Debug, Default)]
pub struct SessionStore {
    inner: RwLock<Session>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Session {
        self.inner.read().clone()
    }

    pub fn is_logged_in(&self) -> bool {
        self.inner.read().is_logged_in()
    }

    pub fn login(&self, info: GroupInfo) {
        *self.inner.write() = Session::LoggedIn(info);
    }

    pub fn logout(&self) {
        *self.inner.write() = Session::LoggedOut;
    }

    /// Group info of a usable session.
    ///
    /// # Errors
    /// Returns `SalesDeskError::Session` when logged out or when the login
    /// response carried no sales group.
    pub fn require_group(&self) -> Result<GroupInfo> {
        match &*self.inner.read() {
            Session::LoggedIn(info) if info.has_group() => Ok(info.clone()),
            _ => Err(SalesDeskError::Session(INVALID_SESSION_MESSAGE.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_logged_out() {
        let store = SessionStore::new();
        assert!(!store.is_logged_in());
        assert!(matches!(store.require_group(), Err(SalesDeskError::Session(_))));
    }

    #[test]
    fn login_then_logout() {
        let store = SessionStore::new();
        store.login(GroupInfo::new("ENTERPRISE", "Sari Dewi"));
        assert_eq!(store.require_group().unwrap().sales_group, "ENTERPRISE");

        store.logout();
        assert_eq!(store.current(), Session::LoggedOut);
    }

    #[test]
    fn login_without_group_is_invalid() {
        let store = SessionStore::new();
        store.login(GroupInfo { sales_group: "  ".into(), sales_name: Some("Sari Dewi".into()) });
        assert!(store.is_logged_in());
        let err = store.require_group().unwrap_err();
        assert!(err.user_message().starts_with("Login session is invalid"));
    }
}
