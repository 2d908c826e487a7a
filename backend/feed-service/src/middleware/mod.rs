/// Authorization guard for the feed service
///
/// Every owner-scoped or mutating handler takes a `CurrentUser` argument; the
/// extractor verifies the bearer token against the configured secret, loads
/// the subject's user row, and rejects with 401 when the token is absent,
/// malformed, expired, or references a user that no longer exists. Handlers
/// never re-verify the token.
pub mod permissions;

pub use permissions::*;

use actix_web::http::header;
use actix_web::{dev::Payload, web, Error, FromRequest, HttpRequest};
use futures::future::LocalBoxFuture;
use sqlx::PgPool;
use uuid::Uuid;

use crate::config::Config;
use crate::db::user_repo;
use crate::error::AppError;
use crate::models::User;
use crate::security::jwt;

/// Resolved caller identity, attached by the authorization guard
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl CurrentUser {
    pub fn id(&self) -> Uuid {
        self.0.id
    }
}

impl FromRequest for CurrentUser {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let req = req.clone();

        Box::pin(async move {
            let config = req
                .app_data::<web::Data<Config>>()
                .cloned()
                .ok_or_else(|| AppError::Internal("Configuration not attached to app".into()))?;
            let pool = req
                .app_data::<web::Data<PgPool>>()
                .cloned()
                .ok_or_else(|| AppError::Internal("Database pool not attached to app".into()))?;

            let auth_header = req
                .headers()
                .get(header::AUTHORIZATION)
                .and_then(|h| h.to_str().ok())
                .ok_or_else(|| AppError::Unauthorized("Not authorized, no token".into()))?;

            let token = auth_header
                .strip_prefix("Bearer ")
                .ok_or_else(|| AppError::Unauthorized("Not authorized, no token".into()))?;

            let claims = jwt::validate_token(&config.auth.jwt_secret, token)?;
            let user_id = jwt::subject_user_id(&claims)?;

            let user: User = user_repo::find_user_by_id(&pool, user_id)
                .await
                .map_err(AppError::from)?
                .ok_or_else(|| AppError::Unauthorized("Not authorized".into()))?;

            Ok(CurrentUser(user))
        })
    }
}
