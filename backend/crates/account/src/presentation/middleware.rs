//! Bearer Auth Middleware
//!
//! Rejects the request before the handler runs unless it carries a valid
//! bearer token for an active account. On success the resolved
//! [`CurrentAccount`] is stored in request extensions.

use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;

use crate::application::{AuthenticateUseCase, CurrentAccount};
use crate::domain::repository::AccountDirectory;
use crate::error::AccountError;
use crate::presentation::handlers::AccountAppState;

/// Middleware that requires `Authorization: Bearer <token>`
///
/// Install with `axum::middleware::from_fn_with_state`.
pub async fn require_bearer_auth<R>(
    State(state): State<AccountAppState<R>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AccountError>
where
    R: AccountDirectory + Clone + Send + Sync + 'static,
{
    // Non visible-ASCII header bytes cannot form a valid bearer header
    let authorization = req
        .headers()
        .get(AUTHORIZATION)
        .map(|value| {
            value
                .to_str()
                .map(str::to_owned)
                .map_err(|_| AccountError::MalformedAuthorization)
        })
        .transpose()?;

    let use_case = AuthenticateUseCase::new(state.directory.clone(), state.services.clone());
    let current: CurrentAccount = use_case.execute(authorization.as_deref()).await?;

    tracing::debug!(account_id = %current.id(), "Bearer token accepted");

    req.extensions_mut().insert(current);

    Ok(next.run(req).await)
}
