//! Registration, sign-in, and the session record.
//!
//! Authentication here is a plaintext credential match against the `users`
//! collection - deliberately not a security boundary. Lookup failures are
//! detail-free: callers learn only that the attempt failed, never which
//! check rejected it.

use crate::backend::StorageBackend;
use crate::error::Result;
use crate::ledger::{collections, Ledger};
use crate::model::{Role, User, UserAccount};
use uuid::Uuid;

/// Email of the bootstrap admin account.
pub const ADMIN_EMAIL: &str = "admin@gokulgarage.com";
/// Password of the bootstrap admin account.
pub const ADMIN_PASSWORD: &str = "admin123";
const ADMIN_ID: &str = "admin-1";

/// Registration input.
#[derive(Clone, Debug)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
}

/// User registration and session management over the ledger.
#[derive(Clone)]
pub struct AuthService<B: StorageBackend> {
    ledger: Ledger<B>,
}

impl<B: StorageBackend> AuthService<B> {
    /// Create a new auth service over the given ledger.
    ///
    /// Call [`AuthService::seed_admin`] once at startup so the garage staff
    /// account exists.
    pub fn new(ledger: Ledger<B>) -> Self {
        AuthService { ledger }
    }

    /// Idempotently insert the bootstrap admin account into the `users`
    /// collection.
    ///
    /// The admin signs in through the same credential match as everyone
    /// else - there is no special-cased control flow.
    ///
    /// # Errors
    ///
    /// Returns `Err` when the seeded collection cannot be written.
    pub async fn seed_admin(&self) -> Result<()> {
        let mut accounts = self.ledger.read_all::<UserAccount>().await;
        if accounts.iter().any(|acc| acc.profile.email == ADMIN_EMAIL) {
            return Ok(());
        }

        accounts.push(UserAccount {
            profile: User {
                id: ADMIN_ID.to_string(),
                name: "Admin".to_string(),
                email: ADMIN_EMAIL.to_string(),
                phone: "9370071035".to_string(),
                role: Role::Admin,
            },
            password: ADMIN_PASSWORD.to_string(),
        });
        self.ledger.write_all(&accounts).await?;
        info!("✓ Seeded bootstrap admin account");
        Ok(())
    }

    /// Register a new customer and sign them in.
    ///
    /// Returns `Ok(None)` when the email is already registered - no detail
    /// about the existing account is leaked.
    ///
    /// # Errors
    ///
    /// Returns `Err` only for storage failures, never for rejected input.
    pub async fn register(&self, new_user: NewUser) -> Result<Option<User>> {
        let mut accounts = self.ledger.read_all::<UserAccount>().await;
        if accounts
            .iter()
            .any(|acc| acc.profile.email == new_user.email)
        {
            debug!("Registration declined: email already in use");
            return Ok(None);
        }

        let profile = User {
            id: Uuid::new_v4().to_string(),
            name: new_user.name,
            email: new_user.email,
            phone: new_user.phone,
            role: Role::User,
        };
        accounts.push(UserAccount {
            profile: profile.clone(),
            password: new_user.password,
        });
        self.ledger.write_all(&accounts).await?;
        self.sign_in(&profile).await?;

        info!("✓ Registered user {}", profile.id);
        Ok(Some(profile))
    }

    /// Sign in with an email/password pair.
    ///
    /// Returns `Ok(None)` on any mismatch, without distinguishing an
    /// unknown email from a wrong password.
    ///
    /// # Errors
    ///
    /// Returns `Err` only for storage failures.
    pub async fn login(&self, email: &str, password: &str) -> Result<Option<User>> {
        let accounts = self.ledger.read_all::<UserAccount>().await;
        let matched = accounts
            .iter()
            .find(|acc| acc.profile.email == email && acc.password == password);

        match matched {
            Some(account) => {
                self.sign_in(&account.profile).await?;
                info!("✓ Signed in user {}", account.profile.id);
                Ok(Some(account.profile.clone()))
            }
            None => {
                debug!("Sign-in declined");
                Ok(None)
            }
        }
    }

    /// Sign the current user out.
    ///
    /// # Errors
    ///
    /// Returns `Err` when the session record cannot be removed.
    pub async fn logout(&self) -> Result<()> {
        self.ledger.remove(collections::CURRENT_USER).await
    }

    /// The signed-in user, if any.
    pub async fn current_user(&self) -> Option<User> {
        self.ledger.read(collections::CURRENT_USER, None).await
    }

    async fn sign_in(&self, profile: &User) -> Result<()> {
        self.ledger.write(collections::CURRENT_USER, profile).await
    }
}
