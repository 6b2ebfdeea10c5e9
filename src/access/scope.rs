use serde::Serialize;

use crate::access::types::{DaySet, PermissionSet, UserAttributes};

/// Predicate values a record query must add for this user.
/// `None` means no restriction on that column.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataScope {
    pub venue: Option<String>,
    pub edition: Option<i32>,
    pub user_id: Option<String>,
    pub days: DaySet,
}

/// A single `column = value` clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    Text(&'static str, String),
    Int(&'static str, i64),
}

impl DataScope {
    /// Apply the scoping flags of `perms` to the caller's attributes.
    pub fn forward(perms: &PermissionSet, attrs: &UserAttributes) -> Self {
        let venue = if perms.filter_by_venue && !attrs.multi_venue {
            attrs.venue.clone()
        } else {
            None
        };
        let edition = if perms.filter_by_edition {
            attrs.edition
        } else {
            None
        };
        let user_id = if perms.filter_by_user {
            attrs.user_id.clone()
        } else {
            None
        };
        let days = match attrs.days {
            Some(extra) => perms.days_allowed.intersect(extra),
            None => perms.days_allowed,
        };

        Self {
            venue,
            edition,
            user_id,
            days,
        }
    }

    pub fn is_unrestricted(&self) -> bool {
        self.venue.is_none() && self.edition.is_none() && self.user_id.is_none()
    }

    /// Clauses in a fixed order: venue, edition, user_id.
    pub fn predicates(&self) -> Vec<Predicate> {
        let mut out = Vec::new();
        if let Some(venue) = &self.venue {
            out.push(Predicate::Text("venue", venue.clone()));
        }
        if let Some(edition) = self.edition {
            out.push(Predicate::Int("edition", i64::from(edition)));
        }
        if let Some(user_id) = &self.user_id {
            out.push(Predicate::Text("user_id", user_id.clone()));
        }
        out
    }
}
