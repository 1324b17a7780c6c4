use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse permission tier gating console features.
///
/// `Admin` passes every role requirement; `Hr` and `User` only their own.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Hr,
    Admin,
}

impl Role {
    /// Whether a user holding this role may access a surface that requires
    /// `required`. The administrative role is a superset of every other tier.
    pub fn grants(&self, required: Role) -> bool {
        *self == Role::Admin || *self == required
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Hr => write!(f, "hr"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

/// The `User` struct represents the authenticated operator of the console,
/// as returned by the current-user-profile endpoint.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct User {
    pub id: String,
    pub username: String,
    pub role: Role,
    pub full_name: String,
    #[serde(default)]
    pub email: Option<String>,
}
