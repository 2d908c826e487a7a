/// Identity and credential management
///
/// Registers accounts, verifies credentials, and issues session tokens.
/// Inputs are validated at the HTTP boundary before these methods run; this
/// layer owns normalization (emails stored lower-cased), hashing, and the
/// conflict/credential failure semantics.
use sqlx::PgPool;

use crate::config::AuthConfig;
use crate::db::user_repo;
use crate::error::{is_unique_violation, AppError, Result};
use crate::models::{PublicUser, User};
use crate::security::{jwt, password};

pub struct AuthService {
    pool: PgPool,
    auth: AuthConfig,
}

/// Profile projection with activity counts
#[derive(Debug)]
pub struct ProfileSummary {
    pub user: PublicUser,
    pub post_count: i64,
    pub reaction_count: i64,
    pub comment_count: i64,
}

impl AuthService {
    pub fn new(pool: PgPool, auth: AuthConfig) -> Self {
        Self { pool, auth }
    }

    /// Create an account and issue its first session token
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        plain_password: &str,
        profile_picture_url: Option<&str>,
    ) -> Result<(PublicUser, String)> {
        let email = email.to_lowercase();

        if user_repo::email_exists(&self.pool, &email).await? {
            return Err(AppError::Conflict("User already exists".to_string()));
        }

        let password_hash = password::hash_password(plain_password)?;

        // The unique index backs up the existence check: a concurrent signup
        // racing past it surfaces here as a unique violation.
        let user = user_repo::create_user(
            &self.pool,
            name,
            &email,
            &password_hash,
            profile_picture_url,
        )
        .await
        .map_err(|err| {
            if is_unique_violation(&err) {
                AppError::Conflict("User already exists".to_string())
            } else {
                err.into()
            }
        })?;

        let token = self.issue_token(&user)?;
        Ok((user.into(), token))
    }

    /// Verify credentials and issue a fresh session token
    ///
    /// Unknown email and wrong password produce the identical failure; the
    /// response carries no user-enumeration signal.
    pub async fn login(&self, email: &str, plain_password: &str) -> Result<(User, String)> {
        let email = email.to_lowercase();

        let user = user_repo::find_user_by_email(&self.pool, &email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        password::verify_password(plain_password, &user.password_hash)?;

        let token = self.issue_token(&user)?;
        Ok((user, token))
    }

    /// Profile of the resolved caller with activity counts over their posts
    pub async fn profile(&self, user: User) -> Result<ProfileSummary> {
        let (post_count, reaction_count, comment_count) =
            user_repo::profile_counts(&self.pool, user.id).await?;

        Ok(ProfileSummary {
            user: user.into(),
            post_count,
            reaction_count,
            comment_count,
        })
    }

    fn issue_token(&self, user: &User) -> Result<String> {
        jwt::generate_token(&self.auth.jwt_secret, user.id, self.auth.token_expiry_days)
    }
}
