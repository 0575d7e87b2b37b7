//! Role-based row visibility
//!
//! Super users see every row of their group; everyone else sees only the
//! rows whose `sales_name` is their own.

use std::collections::HashSet;

use salesdesk_domain::constants::DEFAULT_SUPER_USERS;
use salesdesk_domain::{Opportunity, Record, SolutionLine};

/// Rows that belong to a sales person.
pub trait SalesOwned {
    fn is_owned_by(&self, user: &str) -> bool;
}

impl SalesOwned for Record {
    fn is_owned_by(&self, user: &str) -> bool {
        self.sales_name().as_deref() == Some(user)
    }
}

impl SalesOwned for Opportunity {
    fn is_owned_by(&self, user: &str) -> bool {
        self.sales_name == user
    }
}

impl SalesOwned for SolutionLine {
    fn is_owned_by(&self, user: &str) -> bool {
        self.sales_name == user
    }
}

/// Fixed allow-list of names with unfiltered visibility.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibilityPolicy {
    super_users: HashSet<String>,
}

impl Default for VisibilityPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_SUPER_USERS)
    }
}

impl VisibilityPolicy {
    pub fn new<I, S>(super_users: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { super_users: super_users.into_iter().map(Into::into).collect() }
    }

    pub fn is_super_user(&self, user: &str) -> bool {
        self.super_users.contains(user)
    }

    /// Keep the rows `user` may see, preserving order.
    pub fn filter_for_user<T: SalesOwned>(&self, rows: Vec<T>, user: &str) -> Vec<T> {
        if self.is_super_user(user) {
            return rows;
        }
        rows.into_iter().filter(|row| row.is_owned_by(user)).collect()
    }
}
