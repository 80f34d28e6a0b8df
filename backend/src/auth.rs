//! Admin identification.
//!
//! Authentication itself belongs to an external identity provider; the backend
//! only asks "is this caller an authenticated admin, and who?". The provider
//! shipped here resolves bearer tokens configured through `ADMIN_TOKENS`.

use crate::error::AppError;
use actix_web::http::header;
use actix_web::HttpRequest;
use std::collections::HashMap;

/// An authenticated admin, as resolved by an [`IdentityProvider`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminIdentity {
    pub email: String,
}

pub trait IdentityProvider: Send + Sync {
    /// Resolves a bearer token to an admin, or `None` when it is not one.
    fn resolve_admin(&self, bearer_token: &str) -> Option<AdminIdentity>;
}

/// Resolves tokens from a fixed `token -> email` table.
pub struct StaticTokenProvider {
    tokens: HashMap<String, String>,
}

impl StaticTokenProvider {
    pub fn new(tokens: HashMap<String, String>) -> Self {
        Self { tokens }
    }
}

impl IdentityProvider for StaticTokenProvider {
    fn resolve_admin(&self, bearer_token: &str) -> Option<AdminIdentity> {
        self.tokens.get(bearer_token).map(|email| AdminIdentity {
            email: email.clone(),
        })
    }
}

/// Authenticates the caller of an admin-only request.
pub fn require_admin(
    provider: &dyn IdentityProvider,
    req: &HttpRequest,
) -> Result<AdminIdentity, AppError> {
    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .and_then(|token| provider.resolve_admin(token))
        .ok_or(AppError::Unauthorized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    fn provider() -> StaticTokenProvider {
        StaticTokenProvider::new(HashMap::from([(
            "secret".to_string(),
            "admin@ieab.org".to_string(),
        )]))
    }

    #[test]
    fn accepts_known_bearer_token() {
        let req = TestRequest::default()
            .insert_header((header::AUTHORIZATION, "Bearer secret"))
            .to_http_request();
        assert_eq!(
            require_admin(&provider(), &req).unwrap().email,
            "admin@ieab.org"
        );
    }

    #[test]
    fn rejects_missing_or_unknown_token() {
        let anonymous = TestRequest::default().to_http_request();
        assert!(matches!(
            require_admin(&provider(), &anonymous),
            Err(AppError::Unauthorized)
        ));

        let wrong = TestRequest::default()
            .insert_header((header::AUTHORIZATION, "Bearer guess"))
            .to_http_request();
        assert!(matches!(
            require_admin(&provider(), &wrong),
            Err(AppError::Unauthorized)
        ));

        let basic = TestRequest::default()
            .insert_header((header::AUTHORIZATION, "Basic secret"))
            .to_http_request();
        assert!(require_admin(&provider(), &basic).is_err());
    }
}
