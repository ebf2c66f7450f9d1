//! Bearer-token authentication middleware
//!
//! Validates the Authorization header and makes the decoded [`CurrentUser`]
//! available to handlers as a request extension.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use expedlog_common::{auth::extract_bearer, errors::AppError};

use crate::AppState;

/// Reject requests without a valid bearer token
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized {
            message: "Missing Authorization header".to_string(),
        })?;

    let token = extract_bearer(auth_header).ok_or_else(|| AppError::Unauthorized {
        message: "Authorization header is not a bearer token".to_string(),
    })?;

    let user = state.jwt.current_user(token)?;

    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}
