//! Bearer-token identity for the JSON API.
//!
//! Tokens are HS256 JWTs issued by the external auth service with the shared
//! `secret`. The extractor only verifies them; it never issues tokens for
//! clients.

use std::future::{Ready, ready};

use actix_web::dev::Payload;
use actix_web::error::InternalError;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpRequest, HttpResponse, web};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::envelope::ApiResponse;
use crate::models::config::ServerConfig;
use crate::services::{ServiceError, ServiceResult};

/// Claims carried by the bearer token.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub sub: String,
    pub email: String,
    pub hub_id: i32,
    pub name: String,
    pub roles: Vec<String>,
    pub exp: usize,
}

pub fn encode_token(
    user: &AuthenticatedUser,
    secret: &str,
) -> Result<String, jsonwebtoken::errors::Error> {
    encode(
        &Header::default(),
        user,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

pub fn decode_token(
    token: &str,
    secret: &str,
) -> Result<AuthenticatedUser, jsonwebtoken::errors::Error> {
    decode::<AuthenticatedUser>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
}

pub fn check_role(role: &str, roles: &[String]) -> bool {
    roles.iter().any(|r| r == role)
}

/// Fails with [`ServiceError::Forbidden`] unless `user` holds `role`.
pub fn ensure_role(user: &AuthenticatedUser, role: &str) -> ServiceResult<()> {
    if check_role(role, &user.roles) {
        Ok(())
    } else {
        Err(ServiceError::Forbidden)
    }
}

fn bearer_token(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

fn unauthorized(reason: &'static str) -> actix_web::Error {
    InternalError::from_response(
        reason,
        HttpResponse::Unauthorized().json(ApiResponse::<()>::failure(
            "Phiên đăng nhập không hợp lệ, vui lòng đăng nhập lại",
        )),
    )
    .into()
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedUser, actix_web::Error> {
    let Some(config) = req.app_data::<web::Data<ServerConfig>>() else {
        log::error!("ServerConfig is not registered as app data");
        return Err(actix_web::error::ErrorInternalServerError(
            "server misconfigured",
        ));
    };

    let token = bearer_token(req).ok_or_else(|| unauthorized("missing bearer token"))?;

    decode_token(token, &config.secret).map_err(|err| {
        log::warn!("Rejected bearer token: {err}");
        unauthorized("invalid bearer token")
    })
}

impl FromRequest for AuthenticatedUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}
