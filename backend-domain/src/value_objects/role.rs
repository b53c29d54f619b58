// Account role value object

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Guest,
    Cashier,
    Concierge,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Guest => "guest",
            Role::Cashier => "cashier",
            Role::Concierge => "concierge",
            Role::Admin => "admin",
        }
    }

    pub fn parse(value: &str) -> Option<Role> {
        match value.trim().to_lowercase().as_str() {
            "student" => Some(Role::Student),
            "guest" => Some(Role::Guest),
            "cashier" => Some(Role::Cashier),
            "concierge" => Some(Role::Concierge),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }

    /// Roles that may self-register and spend points.
    pub fn is_patron(&self) -> bool {
        matches!(self, Role::Student | Role::Guest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_known_roles_case_insensitively() {
        assert_eq!(Role::parse("Student"), Some(Role::Student));
        assert_eq!(Role::parse(" concierge "), Some(Role::Concierge));
        assert_eq!(Role::parse("ADMIN"), Some(Role::Admin));
    }

    #[test]
    fn parse_rejects_unknown_roles() {
        assert_eq!(Role::parse("superuser"), None);
        assert_eq!(Role::parse(""), None);
    }
}
