//! The current-user record and role-based permissions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Role of an authenticated user.
///
/// Unknown or missing roles are treated as [`Role::Student`], the least
/// privileged one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Role {
    AdminDb,
    Teacher,
    #[default]
    Student,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::AdminDb => "ADMIN_DB",
            Role::Teacher => "TEACHER",
            Role::Student => "STUDENT",
        }
    }

    /// Parse a role name, falling back to [`Role::Student`].
    pub fn parse_lenient(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }

    pub fn is_admin(&self) -> bool {
        *self == Role::AdminDb
    }

    pub fn is_teacher(&self) -> bool {
        *self == Role::Teacher
    }

    pub fn is_student(&self) -> bool {
        *self == Role::Student
    }

    pub fn can_edit_lessons(&self) -> bool {
        self.is_admin() || self.is_teacher()
    }

    pub fn can_manage_users(&self) -> bool {
        self.is_admin()
    }

    pub fn can_edit_all_lessons(&self) -> bool {
        self.is_admin()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ADMIN_DB" => Ok(Role::AdminDb),
            "TEACHER" => Ok(Role::Teacher),
            "STUDENT" => Ok(Role::Student),
            _ => Err(()),
        }
    }
}

/// The record returned by the current-user endpoint.
///
/// Only `username` and `role` are interpreted; every other field is kept
/// verbatim in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentUser {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub username: String,
    #[serde(default, rename = "role")]
    pub raw_role: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CurrentUser {
    /// The user's role, [`Role::Student`] when absent or unknown.
    pub fn role(&self) -> Role {
        self.raw_role
            .as_deref()
            .map(Role::parse_lenient)
            .unwrap_or_default()
    }
}
