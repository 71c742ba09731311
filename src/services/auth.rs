use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::http::StatusCode;
use actix_web::{web, FromRequest, HttpRequest, HttpResponse, ResponseError};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::ErrorResponse;

/// Account roles issued by the platform's login service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Mentor,
    Company,
    Student,
}

/// JWT claims carried by every authenticated request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub role: Role,
    pub exp: i64,
}

/// Errors raised while authenticating a request
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Missing bearer token")]
    MissingToken,

    #[error("Invalid token: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),

    #[error("Company account required")]
    NotCompany,

    #[error("Authentication is not configured")]
    NotConfigured,
}

impl ResponseError for AuthError {
    fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MissingToken | AuthError::InvalidToken(_) => StatusCode::UNAUTHORIZED,
            AuthError::NotCompany => StatusCode::FORBIDDEN,
            AuthError::NotConfigured => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        HttpResponse::build(status).json(ErrorResponse {
            error: status.canonical_reason().unwrap_or("Unauthorized").to_string(),
            message: self.to_string(),
            status_code: status.as_u16(),
        })
    }
}

/// HS256 token verifier shared by all workers
pub struct JwtVerifier {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl JwtVerifier {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
        }
    }

    /// Sign a token for `user_id` valid for `ttl`
    pub fn issue(&self, user_id: &str, role: Role, ttl: Duration) -> Result<String, AuthError> {
        let claims = Claims {
            user_id: user_id.to_string(),
            role,
            exp: (Utc::now() + ttl).timestamp(),
        };
        Ok(encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?)
    }

    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        Ok(decode::<Claims>(token, &self.decoding, &self.validation)?.claims)
    }
}

/// Caller identity resolved from the `Authorization` header
#[derive(Debug, Clone, Serialize)]
pub struct AuthenticatedUser {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub role: Role,
}

impl AuthenticatedUser {
    fn from_http(req: &HttpRequest) -> Result<Self, AuthError> {
        let verifier = req
            .app_data::<web::Data<JwtVerifier>>()
            .ok_or(AuthError::NotConfigured)?;

        let token = req
            .headers()
            .get(actix_web::http::header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or(AuthError::MissingToken)?;

        let claims = verifier.verify(token)?;
        Ok(Self {
            user_id: claims.user_id,
            role: claims.role,
        })
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = AuthError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Self::from_http(req))
    }
}

/// Authenticated caller holding the `company` role
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct CompanyUser(pub AuthenticatedUser);

impl CompanyUser {
    pub fn user_id(&self) -> &str {
        &self.0.user_id
    }
}

impl FromRequest for CompanyUser {
    type Error = AuthError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(AuthenticatedUser::from_http(req).and_then(|user| match user.role {
            Role::Company => Ok(CompanyUser(user)),
            _ => Err(AuthError::NotCompany),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_issue_and_verify() {
        let verifier = JwtVerifier::new("secret");
        let token = verifier.issue("user-1", Role::Company, Duration::hours(1)).unwrap();
        let claims = verifier.verify(&token).unwrap();
        assert_eq!(claims.user_id, "user-1");
        assert_eq!(claims.role, Role::Company);
    }

    #[test]
    fn test_rejects_wrong_secret_and_expired() {
        let token = JwtVerifier::new("one").issue("u", Role::Company, Duration::hours(1)).unwrap();
        assert!(JwtVerifier::new("two").verify(&token).is_err());

        let verifier = JwtVerifier::new("secret");
        let expired = verifier.issue("u", Role::Company, Duration::hours(-2)).unwrap();
        assert!(matches!(verifier.verify(&expired), Err(AuthError::InvalidToken(_))));
    }

    #[actix_web::test]
    async fn test_extractor_requires_company_role() {
        let verifier = web::Data::new(JwtVerifier::new("secret"));
        let token = verifier.issue("stu-1", Role::Student, Duration::hours(1)).unwrap();

        let req = TestRequest::default()
            .app_data(verifier.clone())
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_http_request();

        assert!(AuthenticatedUser::from_http(&req).is_ok());
        let company = CompanyUser::from_request(&req, &mut Payload::None).await;
        assert!(matches!(company, Err(AuthError::NotCompany)));

        let anonymous = TestRequest::default().app_data(verifier).to_http_request();
        assert!(matches!(AuthenticatedUser::from_http(&anonymous), Err(AuthError::MissingToken)));
    }
}
