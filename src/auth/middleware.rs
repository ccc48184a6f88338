use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::Response,
};
use tracing::{debug, warn};

use crate::api::handlers::AppState;
use crate::auth::jwt;

/// Authenticated principal for the current request, recorded as the owner
/// on registration and compared on every recording.
#[derive(Debug, Clone)]
pub struct AuthenticatedCaller(pub String);

/// Extract Bearer token from Authorization header
fn extract_bearer_token(auth_header: Option<&str>) -> Option<&str> {
    match auth_header {
        Some(header) if header.starts_with("Bearer ") => Some(&header[7..]),
        _ => None,
    }
}

pub async fn require_jwt_auth(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    let auth_header = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok());

    let token = match extract_bearer_token(auth_header) {
        Some(token) => token,
        None => {
            warn!("Missing or invalid Authorization header");
            return Err(StatusCode::UNAUTHORIZED);
        }
    };

    match jwt::validate_token(token, &state.jwt_secret) {
        Ok(claims) => {
            debug!("JWT validated for caller: {}", claims.sub);
            request
                .extensions_mut()
                .insert(AuthenticatedCaller(claims.sub));
            Ok(next.run(request).await)
        }
        Err(e) => {
            warn!("JWT validation failed: {}", e);
            Err(StatusCode::UNAUTHORIZED)
        }
    }
}
