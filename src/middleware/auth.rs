use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::auth::validate_jwt;
use crate::config::SecurityConfig;
use crate::error::ApiError;
use crate::state::AppState;

/// Admin session capability consumed by the API layer.
///
/// How sessions are issued and verified is up to the implementation; the
/// routes only ask a yes/no question and where to send people to sign in.
pub trait AdminGate: Send + Sync {
    fn is_authenticated(&self, headers: &HeaderMap) -> bool;

    fn login_url(&self) -> &str;
}

/// Admin gate backed by HS256 bearer tokens carrying the `admin` role.
pub struct JwtAdminGate {
    secret: Option<String>,
    login_url: String,
}

impl JwtAdminGate {
    pub fn new(secret: Option<String>, login_url: impl Into<String>) -> Self {
        Self {
            secret: secret.filter(|s| !s.is_empty()),
            login_url: login_url.into(),
        }
    }

    pub fn from_config(security: &SecurityConfig) -> Self {
        if security.admin_jwt_secret.is_none() {
            tracing::warn!("ADMIN_JWT_SECRET is not set; admin routes will reject every request");
        }
        Self::new(
            security.admin_jwt_secret.clone(),
            security.admin_login_url.clone(),
        )
    }

    fn check(&self, headers: &HeaderMap) -> Result<(), String> {
        let secret = self
            .secret
            .as_deref()
            .ok_or_else(|| "JWT secret not configured".to_string())?;
        let token = extract_jwt_from_headers(headers)?;
        let claims = validate_jwt(secret, &token).map_err(|e| e.to_string())?;
        if !claims.is_admin() {
            return Err(format!("Role '{}' is not an admin", claims.role));
        }
        Ok(())
    }
}

impl AdminGate for JwtAdminGate {
    fn is_authenticated(&self, headers: &HeaderMap) -> bool {
        match self.check(headers) {
            Ok(()) => true,
            Err(reason) => {
                tracing::debug!("Admin session rejected: {}", reason);
                false
            }
        }
    }

    fn login_url(&self) -> &str {
        &self.login_url
    }
}

/// Extract JWT token from Authorization header
fn extract_jwt_from_headers(headers: &HeaderMap) -> Result<String, String> {
    let auth_header = headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or_else(|| "Missing Authorization header".to_string())?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "Invalid Authorization header format".to_string())?;

    if let Some(token) = auth_str.strip_prefix("Bearer ") {
        if token.trim().is_empty() {
            return Err("Empty JWT token".to_string());
        }
        Ok(token.trim().to_string())
    } else {
        Err("Authorization header must use Bearer token format".to_string())
    }
}

/// Rejects requests without an admin session before they reach a handler.
pub async fn require_admin(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if !state.gate.is_authenticated(request.headers()) {
        tracing::warn!(
            "Unauthenticated admin request: {} {}",
            request.method(),
            request.uri().path()
        );
        return Err(ApiError::unauthorized("Unauthorized"));
    }

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{generate_jwt, issue_admin_token, Claims};
    use axum::http::HeaderValue;

    fn bearer(token: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            axum::http::header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {token}")).unwrap(),
        );
        headers
    }

    #[test]
    fn accepts_admin_token() {
        let gate = JwtAdminGate::new(Some("secret".into()), "/api/login");
        let token = issue_admin_token("secret", "ops", 1).unwrap();
        assert!(gate.is_authenticated(&bearer(&token)));
    }

    #[test]
    fn rejects_missing_or_malformed_header() {
        let gate = JwtAdminGate::new(Some("secret".into()), "/api/login");
        assert!(!gate.is_authenticated(&HeaderMap::new()));

        let mut headers = HeaderMap::new();
        headers.insert(
            axum::http::header::AUTHORIZATION,
            HeaderValue::from_static("Basic abc"),
        );
        assert!(!gate.is_authenticated(&headers));
        assert!(!gate.is_authenticated(&bearer(" ")));
    }

    #[test]
    fn rejects_non_admin_role() {
        let gate = JwtAdminGate::new(Some("secret".into()), "/api/login");
        let mut claims = Claims::admin("shopper", 1);
        claims.role = "customer".into();
        let token = generate_jwt("secret", &claims).unwrap();
        assert!(!gate.is_authenticated(&bearer(&token)));
    }

    #[test]
    fn unconfigured_gate_rejects_everything() {
        let gate = JwtAdminGate::new(None, "/api/login");
        let token = issue_admin_token("secret", "ops", 1).unwrap();
        assert!(!gate.is_authenticated(&bearer(&token)));
        assert_eq!(gate.login_url(), "/api/login");
    }
}
