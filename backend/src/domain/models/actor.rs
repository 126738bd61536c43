//! The authenticated staff member acting on the workflow.
//!
//! Actors are supplied by the authentication collaborator; the workflow
//! treats them as read-only input and never stores credentials.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Staff role. Authorization for every workflow operation is decided from
/// this role alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    DeputyManager,
    ProgramOfficer,
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::DeputyManager => "deputy_manager",
            Role::ProgramOfficer => "program_officer",
            Role::User => "user",
        }
    }

    /// Parse a role value, case-insensitively.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "admin" => Some(Role::Admin),
            "deputy_manager" => Some(Role::DeputyManager),
            "program_officer" => Some(Role::ProgramOfficer),
            "user" => Some(Role::User),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The authenticated caller: identity plus role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    pub id: String,
    pub name: String,
    pub role: Role,
}

impl Actor {
    pub fn new(id: impl Into<String>, name: impl Into<String>, role: Role) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse() {
        assert_eq!(Role::parse("admin"), Some(Role::Admin));
        assert_eq!(Role::parse("Deputy_Manager"), Some(Role::DeputyManager));
        assert_eq!(Role::parse(" program_officer "), Some(Role::ProgramOfficer));
        assert_eq!(Role::parse("user"), Some(Role::User));
        assert_eq!(Role::parse("superuser"), None);
    }

    #[test]
    fn test_role_display() {
        assert_eq!(Role::DeputyManager.to_string(), "deputy_manager");
    }
}
