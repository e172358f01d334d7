//! Dashboard access registry and roles

use super::row::{Row, RowExt};
use serde::{Deserialize, Serialize};

const EMAIL: &[&str] = &["email"];
const NAME: &[&str] = &["name"];
const ACCESS_TYPE: &[&str] = &["accesstype"];
const GROUP_NAME: &[&str] = &["groupname", "group"];

/// One access registry row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessEntry {
    pub email: String,
    pub name: Option<String>,
    pub access_type: Option<String>,
    pub group_name: Option<String>,
}

impl AccessEntry {
    /// Rows with a blank email are ignored
    pub fn from_row(row: &Row) -> Option<Self> {
        Some(Self {
            email: row.field(EMAIL)?,
            name: row.field(NAME),
            access_type: row.field(ACCESS_TYPE),
            group_name: row.field(GROUP_NAME),
        })
    }

    pub fn role(&self) -> Role {
        match self.access_type.as_deref() {
            Some(t) if t.trim().eq_ignore_ascii_case("admin") => Role::Admin,
            _ => Role::Student {
                group: self.group_name.clone(),
            },
        }
    }

    pub fn matches_email(&self, email: &str) -> bool {
        self.email.trim().eq_ignore_ascii_case(email.trim())
    }
}

/// What a dashboard user may see
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Role {
    Admin,
    Student { group: Option<String> },
}

impl Role {
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Admins see every group; students only their own
    pub fn can_see_group(&self, group: &str) -> bool {
        match self {
            Self::Admin => true,
            Self::Student { group: Some(own) } => own == group,
            Self::Student { group: None } => false,
        }
    }
}

/// Role of `email` in the registry, `None` when not registered
pub fn resolve_role(entries: &[AccessEntry], email: &str) -> Option<Role> {
    entries
        .iter()
        .find(|e| e.matches_email(email))
        .map(AccessEntry::role)
}
