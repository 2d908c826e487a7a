/// Authentication handlers
use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::middleware::CurrentUser;
use crate::models::PublicUser;
use crate::services::AuthService;
use crate::validators::{self, RegistrationInput};

/// Fields are optional at the serde level so that missing input surfaces as
/// the documented field-level validation errors, not a deserialization 400.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub password_confirmation: Option<String>,
    pub profile_picture_url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub user: PublicUser,
    pub token: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub message: String,
}

/// Register a new user
/// POST /api/register
pub async fn register(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    req: web::Json<RegisterRequest>,
) -> Result<HttpResponse> {
    let name = req.name.as_deref().unwrap_or("").trim();
    let email = req.email.as_deref().unwrap_or("").trim();
    let password = req.password.as_deref().unwrap_or("");
    let password_confirmation = req.password_confirmation.as_deref().unwrap_or("");
    let profile_picture_url = req.profile_picture_url.as_deref().map(str::trim);

    let errors = validators::validate_registration(&RegistrationInput {
        name,
        email,
        password,
        password_confirmation,
        profile_picture_url,
    });
    if !errors.is_empty() {
        return Err(AppError::Validation(errors.join(", ")));
    }

    let service = AuthService::new((**pool).clone(), config.auth.clone());
    let (user, token) = service
        .register(
            name,
            email,
            password,
            profile_picture_url.filter(|url| !url.is_empty()),
        )
        .await?;

    Ok(HttpResponse::Created().json(RegisterResponse { user, token }))
}

/// Login a user
/// POST /api/login
pub async fn login(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    req: web::Json<LoginRequest>,
) -> Result<HttpResponse> {
    let email = req.email.as_deref().unwrap_or("").trim();
    let password = req.password.as_deref().unwrap_or("");

    let service = AuthService::new((**pool).clone(), config.auth.clone());
    let (user, token) = service.login(email, password).await?;

    Ok(HttpResponse::Ok().json(LoginResponse {
        id: user.id,
        name: user.name,
        email: user.email,
        token,
    }))
}

/// Logout the current user
/// POST /api/logout
///
/// Tokens are stateless, so there is nothing to revoke server-side; the
/// client discards its copy. The guard has already verified the caller.
pub async fn logout(_user: CurrentUser) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(LogoutResponse {
        message: "Successfully logged out".to_string(),
    }))
}
