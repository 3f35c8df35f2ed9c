//! Google OAuth login.
//!
//! The frontend completes the consent flow and posts the authorization
//! code here; the server exchanges it for an access token, fetches the
//! user's profile, and upserts a local account keyed by email. Google
//! accounts carry no password and authenticate only through this flow.

use secrecy::ExposeSecret;
use serde::Deserialize;
use thiserror::Error;

use ebasi_core::Email;

use crate::db::RepositoryError;
use crate::db::users::UserRepository;
use crate::models::User;
use crate::services::auth;
use crate::state::AppState;

const TOKEN_ENDPOINT: &str = "https://oauth2.googleapis.com/token";
const USERINFO_ENDPOINT: &str = "https://www.googleapis.com/oauth2/v2/userinfo";

/// Errors that can occur during Google login.
#[derive(Debug, Error)]
pub enum GoogleError {
    /// Client ID/secret are not set on the server.
    #[error("Google OAuth is not configured")]
    NotConfigured,

    /// Google rejected the authorization code.
    #[error("code exchange rejected: {0}")]
    ExchangeRejected(String),

    /// Google's profile response carried no email address.
    #[error("no email in Google profile")]
    MissingEmail,

    /// A request to Google failed.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// A database operation failed.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct GoogleProfile {
    email: Option<String>,
    #[serde(default)]
    given_name: String,
    #[serde(default)]
    family_name: String,
    #[serde(default)]
    picture: Option<String>,
}

/// The outcome of a Google login.
pub struct GoogleLogin {
    pub user: User,
    pub token: String,
    /// Whether a new local account was created for this login.
    pub created: bool,
    /// Avatar URL from the Google profile, echoed to the client.
    pub picture: Option<String>,
}

/// Google OAuth login service.
pub struct GoogleService<'a> {
    state: &'a AppState,
}

impl<'a> GoogleService<'a> {
    /// Create a new Google login service.
    #[must_use]
    pub const fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Exchange an authorization code for a local session.
    ///
    /// An account is looked up by the Google-reported email; if none
    /// exists one is created with a username derived from the email's
    /// local part (numeric suffix on collision) and no password. Blank
    /// first/last names on an existing account are backfilled from the
    /// Google profile.
    ///
    /// # Errors
    ///
    /// Returns `GoogleError::NotConfigured` if the server has no client
    /// credentials, `ExchangeRejected` if Google refuses the code, and
    /// `MissingEmail` if the profile has no email.
    pub async fn login(
        &self,
        code: &str,
        redirect_uri: Option<&str>,
    ) -> Result<GoogleLogin, GoogleError> {
        let google = self
            .state
            .config()
            .google
            .as_ref()
            .ok_or(GoogleError::NotConfigured)?;

        let redirect_uri = redirect_uri.unwrap_or(&google.redirect_uri);

        let response = self
            .state
            .http()
            .post(TOKEN_ENDPOINT)
            .form(&[
                ("code", code),
                ("client_id", google.client_id.as_str()),
                ("client_secret", google.client_secret.expose_secret()),
                ("redirect_uri", redirect_uri),
                ("grant_type", "authorization_code"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(GoogleError::ExchangeRejected(detail));
        }

        let token: TokenResponse = response.json().await?;

        let profile: GoogleProfile = self
            .state
            .http()
            .get(USERINFO_ENDPOINT)
            .bearer_auth(&token.access_token)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let email_raw = profile.email.as_deref().ok_or(GoogleError::MissingEmail)?;
        let email = Email::parse(email_raw).map_err(|_| GoogleError::MissingEmail)?;

        self.upsert_account(
            &email,
            &profile.given_name,
            &profile.family_name,
            profile.picture,
        )
        .await
    }

    async fn upsert_account(
        &self,
        email: &Email,
        given_name: &str,
        family_name: &str,
        picture: Option<String>,
    ) -> Result<GoogleLogin, GoogleError> {
        let users = UserRepository::new(self.state.pool());

        let (user, created) = match users.get_by_email(email).await? {
            Some(user) => {
                users.backfill_names(user.id, given_name, family_name).await?;
                // Re-read so the response reflects any backfilled names.
                let user = users
                    .get_by_id(user.id)
                    .await?
                    .ok_or(RepositoryError::NotFound)?;
                (user, false)
            }
            None => {
                let username = users.available_username(email.local_part()).await?;
                let user = users
                    .create(&username, email, None, given_name, family_name)
                    .await?;
                (user, true)
            }
        };

        let candidate = auth::generate_token();
        let token = users.get_or_create_token(user.id, &candidate).await?;

        Ok(GoogleLogin {
            user,
            token,
            created,
            picture,
        })
    }
}
