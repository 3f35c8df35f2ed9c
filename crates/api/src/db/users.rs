//! User repository: accounts, bearer tokens, profile updates.

use sqlx::PgPool;

use ebasi_core::{Email, UserId};

use super::RepositoryError;
use crate::models::User;

/// Columns fetched for a [`User`] row.
const USER_COLUMNS: &str = "id, username, email, first_name, last_name, \
     is_staff, is_superuser, is_active, date_joined";

/// Repository for user database operations.
pub struct UserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a user by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM user_account WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(user)
    }

    /// Get a user by username.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM user_account WHERE username = $1"
        ))
        .bind(username)
        .fetch_optional(self.pool)
        .await?;

        Ok(user)
    }

    /// Get a user by email address.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM user_account WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(self.pool)
        .await?;

        Ok(user)
    }

    /// Resolve a bearer token to its user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_token(&self, token: &str) -> Result<Option<User>, RepositoryError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT u.id, u.username, u.email, u.first_name, u.last_name, \
                    u.is_staff, u.is_superuser, u.is_active, u.date_joined \
             FROM user_account u \
             JOIN auth_token t ON t.user_id = u.id \
             WHERE t.token = $1",
        )
        .bind(token)
        .fetch_optional(self.pool)
        .await?;

        Ok(user)
    }

    /// Create a new user. `password_hash` is `None` for Google-created
    /// accounts, which cannot authenticate with a password afterwards.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the username or email is taken.
    pub async fn create(
        &self,
        username: &str,
        email: &Email,
        password_hash: Option<&str>,
        first_name: &str,
        last_name: &str,
    ) -> Result<User, RepositoryError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO user_account \
                 (username, email, password_hash, first_name, last_name) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {USER_COLUMNS}"
        ))
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .bind(first_name)
        .bind(last_name)
        .fetch_one(self.pool)
        .await
        .map_err(|e| RepositoryError::from_sqlx(e, "username or email already exists"))?;

        Ok(user)
    }

    /// Get a user's stored password hash by username. `Ok(None)` when the
    /// user does not exist; `Ok(Some((user, None)))` when the account has
    /// no password (Google-created).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_password_hash(
        &self,
        username: &str,
    ) -> Result<Option<(User, Option<String>)>, RepositoryError> {
        let row = sqlx::query_as::<_, UserWithHash>(&format!(
            "SELECT {USER_COLUMNS}, password_hash FROM user_account WHERE username = $1"
        ))
        .bind(username)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(|r| (r.user, r.password_hash)))
    }

    /// Store a token for the user unless one exists, then return the stored
    /// token. Tokens are issued once per user and never rotated.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if no token row exists
    /// after the insert (the user was deleted concurrently).
    pub async fn get_or_create_token(
        &self,
        user_id: UserId,
        candidate: &str,
    ) -> Result<String, RepositoryError> {
        sqlx::query("INSERT INTO auth_token (user_id, token) VALUES ($1, $2) ON CONFLICT (user_id) DO NOTHING")
            .bind(user_id)
            .bind(candidate)
            .execute(self.pool)
            .await?;

        let token: Option<String> =
            sqlx::query_scalar("SELECT token FROM auth_token WHERE user_id = $1")
                .bind(user_id)
                .fetch_optional(self.pool)
                .await?;

        token.ok_or_else(|| {
            RepositoryError::DataCorruption(format!("no auth token for user {user_id}"))
        })
    }

    /// Update profile fields. `None` leaves the stored value unchanged.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user doesn't exist.
    /// Returns `RepositoryError::Conflict` if the new email is taken.
    pub async fn update_profile(
        &self,
        id: UserId,
        first_name: Option<&str>,
        last_name: Option<&str>,
        email: Option<&Email>,
    ) -> Result<User, RepositoryError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "UPDATE user_account SET \
                 first_name = COALESCE($2, first_name), \
                 last_name = COALESCE($3, last_name), \
                 email = COALESCE($4, email) \
             WHERE id = $1 \
             RETURNING {USER_COLUMNS}"
        ))
        .bind(id)
        .bind(first_name)
        .bind(last_name)
        .bind(email)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| RepositoryError::from_sqlx(e, "email already exists"))?;

        user.ok_or(RepositoryError::NotFound)
    }

    /// Backfill first/last name on a Google login, only where blank.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn backfill_names(
        &self,
        id: UserId,
        first_name: &str,
        last_name: &str,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            "UPDATE user_account SET \
                 first_name = CASE WHEN first_name = '' THEN $2 ELSE first_name END, \
                 last_name = CASE WHEN last_name = '' THEN $3 ELSE last_name END \
             WHERE id = $1",
        )
        .bind(id)
        .bind(first_name)
        .bind(last_name)
        .execute(self.pool)
        .await?;

        Ok(())
    }

    /// Find a free username starting from `base`, appending a numeric
    /// suffix on collision (`alice`, `alice1`, `alice2`, ...).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a lookup fails.
    pub async fn available_username(&self, base: &str) -> Result<String, RepositoryError> {
        let mut candidate = base.to_owned();
        let mut counter = 1_u32;

        loop {
            let taken: bool = sqlx::query_scalar(
                "SELECT EXISTS(SELECT 1 FROM user_account WHERE username = $1)",
            )
            .bind(&candidate)
            .fetch_one(self.pool)
            .await?;

            if !taken {
                return Ok(candidate);
            }

            candidate = format!("{base}{counter}");
            counter += 1;
        }
    }

    /// List all users, newest first (admin surface).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<User>, RepositoryError> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM user_account ORDER BY date_joined DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(users)
    }

    /// Flip a user's `is_active` flag, returning the new value.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user doesn't exist.
    pub async fn toggle_active(&self, id: UserId) -> Result<bool, RepositoryError> {
        let is_active: Option<bool> = sqlx::query_scalar(
            "UPDATE user_account SET is_active = NOT is_active WHERE id = $1 RETURNING is_active",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        is_active.ok_or(RepositoryError::NotFound)
    }

    /// Total user count (dashboard).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM user_account")
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }
}

/// Internal row for password verification.
#[derive(sqlx::FromRow)]
struct UserWithHash {
    #[sqlx(flatten)]
    user: User,
    password_hash: Option<String>,
}
