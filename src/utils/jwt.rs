// src/utils/jwt.rs

use std::time::{SystemTime, UNIX_EPOCH};

use axum::{
    body::Body,
    extract::State,
    http::{Request, header},
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::{config::Config, error::AppError, models::user::Role};

/// JWT Claims structure.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Claims {
    /// Subject - Stores the User ID (as string).
    pub sub: String,
    pub role: Role,
    /// Expiration time as Unix timestamp.
    pub exp: usize,
}

impl Claims {
    pub fn user_id(&self) -> Result<i64, AppError> {
        self.sub
            .parse::<i64>()
            .map_err(|_| AppError::AuthError("Invalid token".to_string()))
    }

    /// Body and path ids must name the token's own user. Admins may act for anyone.
    pub fn ensure_acting_as(&self, user_id: i64) -> Result<(), AppError> {
        if self.role == Role::Admin || self.user_id()? == user_id {
            return Ok(());
        }
        Err(AppError::Forbidden(
            "You can only act on your own account".to_string(),
        ))
    }
}

/// Signs a new JWT carrying the user's id and role.
pub fn sign_jwt(
    id: i64,
    role: Role,
    secret: &str,
    expiration_seconds: u64,
) -> Result<String, AppError> {
    let expiration = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| AppError::InternalServerError(e.to_string()))?
        .as_secs() as usize
        + expiration_seconds as usize;

    let claims = Claims {
        sub: id.to_string(),
        role,
        exp: expiration,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::InternalServerError(e.to_string()))
}

/// Verifies and decodes a JWT string.
pub fn verify_jwt(token: &str, secret: &str) -> Result<Claims, AppError> {
    let token_data = decode(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| AppError::AuthError("Invalid token".to_string()))?;

    Ok(token_data.claims)
}

/// Axum Middleware: Authentication.
///
/// Validates the 'Authorization: Bearer <token>' header and injects `Claims`
/// into the request extensions for later layers and handlers.
pub async fn auth_middleware(
    State(config): State<Config>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or_else(|| AppError::AuthError("Missing bearer token".to_string()))?;

    let claims = verify_jwt(token, &config.jwt_secret)?;
    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

/// Must run AFTER `auth_middleware`. Admins pass every gate.
fn require_role(req: &Request<Body>, role: Role) -> Result<(), AppError> {
    let claims = req
        .extensions()
        .get::<Claims>()
        .ok_or_else(|| AppError::AuthError("Missing bearer token".to_string()))?;

    if claims.role != role && claims.role != Role::Admin {
        return Err(AppError::Forbidden(format!("This action requires the {} role", role)));
    }
    Ok(())
}

pub async fn student_middleware(req: Request<Body>, next: Next) -> Result<Response, AppError> {
    require_role(&req, Role::Student)?;
    Ok(next.run(req).await)
}

pub async fn teacher_middleware(req: Request<Body>, next: Next) -> Result<Response, AppError> {
    require_role(&req, Role::Teacher)?;
    Ok(next.run(req).await)
}

pub async fn admin_middleware(req: Request<Body>, next: Next) -> Result<Response, AppError> {
    require_role(&req, Role::Admin)?;
    Ok(next.run(req).await)
}
