use std::sync::Arc;

use axum::{
    extract::State,
    headers::{authorization::Bearer, Authorization},
    http::{Request, StatusCode},
    middleware::Next,
    response::Response,
    TypedHeader,
};
use axum_derive_error::ErrorResponse;
use common::config::{self, Config};
use derive_more::{Display, Error};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Access token claims.
#[derive(Serialize, Deserialize)]
struct Claims {
    /// Identifier of the authenticated student.
    sub: i64,

    /// Issuance timestamp.
    iat: u64,

    /// Expiration timestamp.
    exp: u64,
}

/// Identifier of a student that passed the authentication middleware.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AuthenticatedStudentId(i64);

impl AuthenticatedStudentId {
    /// Get raw student identifier value.
    pub fn id(&self) -> i64 {
        self.0
    }
}

/// Sign a new access token for the provided student.
pub(crate) fn issue_token(
    student_id: i64,
    config: &config::Auth,
) -> Result<String, jsonwebtoken::errors::Error> {
    let iat = jsonwebtoken::get_current_timestamp();

    let claims = Claims {
        sub: student_id,
        iat,
        exp: iat + config.token_lifespan,
    };

    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

#[derive(ErrorResponse, Display, Error)]
pub(super) enum AuthenticationError {
    #[status(StatusCode::UNAUTHORIZED)]
    #[display(fmt = "invalid authentication token was provided")]
    InvalidAuthenticationToken,
}

pub(super) async fn require_authentication<B>(
    State(config): State<Arc<Config>>,
    authorization: Option<TypedHeader<Authorization<Bearer>>>,
    mut req: Request<B>,
    next: Next<B>,
) -> Result<Response, AuthenticationError> {
    let TypedHeader(authorization) =
        authorization.ok_or(AuthenticationError::InvalidAuthenticationToken)?;

    let token_data = jsonwebtoken::decode::<Claims>(
        authorization.token(),
        &DecodingKey::from_secret(config.auth.secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .map_err(|_| AuthenticationError::InvalidAuthenticationToken)?;

    req.extensions_mut()
        .insert(AuthenticatedStudentId(token_data.claims.sub));

    Ok(next.run(req).await)
}
