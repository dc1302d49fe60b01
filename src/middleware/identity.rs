use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::app::AppState;
use crate::error::ApiError;

/// Resolves the caller and injects the `AuthorizedUser` into request extensions
pub async fn identity_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let user = state.identity.resolve(request.headers())?;

    tracing::debug!("Resolved caller {} ({})", user.unique_name, user.display_name);
    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}
