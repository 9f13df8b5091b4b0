//! User profiles and stored accounts.

use crate::entity::LedgerEntity;
use crate::ledger::collections;
use serde::{Deserialize, Serialize};

/// A user's role, controlling which operations the presentation layer
/// offers them.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Regular customer: books appointments, sees their own history.
    User,
    /// Garage staff: confirms/cancels appointments, issues bills, runs
    /// reports.
    Admin,
}

/// Public user profile.
///
/// This is what signs in as `currentUser` and what services hand back to
/// callers. It never carries the password.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: Role,
}

impl User {
    /// True for garage staff.
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Stored record in the `users` collection: the profile plus its plaintext
/// password, flattened so the stored layout is a single object.
///
/// Plaintext credential storage is insecure by construction and kept
/// deliberately; this store is not a security boundary.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct UserAccount {
    #[serde(flatten)]
    pub profile: User,
    pub password: String,
}

impl LedgerEntity for UserAccount {
    const COLLECTION: &'static str = collections::USERS;

    fn record_id(&self) -> &str {
        &self.profile.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account() -> UserAccount {
        UserAccount {
            profile: User {
                id: "u1".to_string(),
                name: "Asha".to_string(),
                email: "asha@example.com".to_string(),
                phone: "9000000000".to_string(),
                role: Role::User,
            },
            password: "secret".to_string(),
        }
    }

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"user\"");
    }

    #[test]
    fn test_account_flattens_profile() {
        let json = serde_json::to_value(account()).unwrap();
        // Profile fields and password sit side by side in one object
        assert_eq!(json["id"], "u1");
        assert_eq!(json["email"], "asha@example.com");
        assert_eq!(json["password"], "secret");
    }

    #[test]
    fn test_account_roundtrip() {
        let account = account();
        let json = serde_json::to_string(&account).unwrap();
        let back: UserAccount = serde_json::from_str(&json).unwrap();
        assert_eq!(account, back);
    }

    #[test]
    fn test_is_admin() {
        let mut account = account();
        assert!(!account.profile.is_admin());
        account.profile.role = Role::Admin;
        assert!(account.profile.is_admin());
    }

    #[test]
    fn test_ledger_entity_impl() {
        assert_eq!(UserAccount::COLLECTION, "users");
        assert_eq!(account().record_id(), "u1");
    }
}
