// End-user accounts and the bits of identity shared by every entity.
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use strum::EnumIter;

/// Reference to another entity by id, as the server expects in request bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdRef {
    pub id: i64,
}

impl IdRef {
    pub fn new(id: i64) -> Self {
        Self { id }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
}

impl RoleRef {
    pub fn is_admin(&self) -> bool {
        self.name.eq_ignore_ascii_case("ADMIN")
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emergency_contact: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<RoleRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<NaiveDateTime>,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    pub fn is_admin(&self) -> bool {
        self.role.as_ref().is_some_and(RoleRef::is_admin)
    }
}

/// Which account table a login or registration targets (`userType` on the wire).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, EnumIter,
)]
#[serde(rename_all = "lowercase")]
pub enum LoginKind {
    #[default]
    User,
    Therapist,
}

impl LoginKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoginKind::User => "user",
            LoginKind::Therapist => "therapist",
        }
    }

    /// Lenient parse of the persisted/returned `userType` string.
    pub fn from_wire(s: &str) -> Self {
        if s.eq_ignore_ascii_case("therapist") {
            LoginKind::Therapist
        } else {
            LoginKind::User
        }
    }
}

impl fmt::Display for LoginKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoginKind::User => write!(f, "User"),
            LoginKind::Therapist => write!(f, "Therapist"),
        }
    }
}
