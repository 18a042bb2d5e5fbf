//! Accounts: registration, login, identity resolution and user administration

use super::auth::{hash_password, verify_password};
use super::service::{internal, Service};
use super::validation;
use crate::config::BootstrapAdmin;
use crate::contract::{NewUser, Principal, Role, Session, StoreError, User};
use std::time::Duration;

/// Registration input
#[derive(Debug, Clone, Default)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl Service {
    /// Create a `user` account and issue a token for it
    pub async fn register(&self, registration: Registration) -> Result<Session, StoreError> {
        let (username, email) = validation::validate_registration(
            &registration.username,
            &registration.email,
            &registration.password,
        )?;

        if self
            .repos
            .users
            .username_or_email_taken(&username, &email)
            .await
            .map_err(internal)?
        {
            return Err(StoreError::conflict(
                "a user with this username or email already exists",
            ));
        }

        let user = self
            .repos
            .users
            .create(&NewUser {
                username,
                email,
                password_hash: hash_password(&registration.password)?,
                first_name: registration.first_name.unwrap_or_default(),
                last_name: registration.last_name.unwrap_or_default(),
                role: Role::User,
            })
            .await
            .map_err(internal)?;

        tracing::info!(user_id = user.id, username = %user.username, "User registered");
        let token = self.tokens.issue(user.id, user.role)?;
        Ok(Session { user, token })
    }

    /// Verify credentials; `login` may be a username or an email
    pub async fn login(&self, login: &str, password: &str) -> Result<Session, StoreError> {
        let credentials = self
            .repos
            .users
            .find_credentials(login.trim())
            .await
            .map_err(internal)?;

        let Some(credentials) = credentials else {
            tracing::warn!(login = %login, "Login for unknown user");
            return Err(StoreError::unauthorized("invalid username or password"));
        };

        if !verify_password(password, &credentials.password_hash) {
            tracing::warn!(user_id = credentials.user.id, "Login with wrong password");
            return Err(StoreError::unauthorized("invalid username or password"));
        }

        let user = credentials.user;
        let token = self.tokens.issue(user.id, user.role)?;
        tracing::info!(user_id = user.id, "User logged in");
        Ok(Session { user, token })
    }

    pub fn token_ttl(&self) -> Duration {
        self.tokens.ttl()
    }

    /// Resolve a bearer token to the principal of an existing user
    ///
    /// The role comes from the user row, not from the token claims.
    pub async fn resolve_principal(&self, token: &str) -> Result<Principal, StoreError> {
        let claims = self.tokens.verify(token)?;

        let user = self
            .repos
            .users
            .find(claims.sub)
            .await
            .map_err(internal)?
            .ok_or_else(|| {
                tracing::warn!(user_id = claims.sub, "Token for a deleted user");
                StoreError::unauthorized("user no longer exists")
            })?;

        Ok(Principal {
            user_id: user.id,
            username: user.username,
            role: user.role,
        })
    }

    pub async fn me(&self, principal: &Principal) -> Result<User, StoreError> {
        self.repos
            .users
            .find(principal.user_id)
            .await
            .map_err(internal)?
            .ok_or_else(|| StoreError::unauthorized("user no longer exists"))
    }

    /// Create the configured administrator unless the username or email is taken
    pub async fn ensure_admin(&self, admin: &BootstrapAdmin) -> Result<(), StoreError> {
        let (username, email) =
            validation::validate_registration(&admin.username, &admin.email, &admin.password)?;

        if self
            .repos
            .users
            .username_or_email_taken(&username, &email)
            .await
            .map_err(internal)?
        {
            tracing::debug!(username = %username, "Bootstrap administrator already present");
            return Ok(());
        }

        let user = self
            .repos
            .users
            .create(&NewUser {
                username,
                email,
                password_hash: hash_password(&admin.password)?,
                first_name: "Admin".to_string(),
                last_name: String::new(),
                role: Role::Admin,
            })
            .await
            .map_err(internal)?;

        tracing::info!(user_id = user.id, "Bootstrap administrator created");
        Ok(())
    }

    // ===== User administration =====

    pub async fn list_users(&self, principal: &Principal) -> Result<Vec<User>, StoreError> {
        Self::require_admin(principal)?;
        self.repos.users.list().await.map_err(internal)
    }

    pub async fn change_user_role(
        &self,
        principal: &Principal,
        user_id: i32,
        role: &str,
    ) -> Result<User, StoreError> {
        Self::require_admin(principal)?;

        let role = Role::parse(role).ok_or_else(|| {
            StoreError::validation(format!("role '{}' must be one of user, admin", role))
        })?;

        if user_id == principal.user_id {
            return Err(StoreError::validation("you cannot change your own role"));
        }

        let user = self
            .repos
            .users
            .set_role(user_id, role)
            .await
            .map_err(internal)?
            .ok_or_else(|| StoreError::not_found("user", user_id))?;

        tracing::info!(user_id, role = role.as_str(), "User role changed");
        Ok(user)
    }

    pub async fn delete_user(&self, principal: &Principal, user_id: i32) -> Result<(), StoreError> {
        Self::require_admin(principal)?;

        if user_id == principal.user_id {
            return Err(StoreError::validation("you cannot delete your own account"));
        }

        if self
            .repos
            .users
            .find(user_id)
            .await
            .map_err(internal)?
            .is_none()
        {
            return Err(StoreError::not_found("user", user_id));
        }

        if self.repos.users.has_orders(user_id).await.map_err(internal)? {
            return Err(StoreError::conflict(format!(
                "user {} has orders and cannot be deleted",
                user_id
            )));
        }

        self.repos.users.delete(user_id).await.map_err(internal)?;
        tracing::info!(user_id, "User deleted");
        Ok(())
    }
}
