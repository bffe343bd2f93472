//! Account Routers
//!
//! Paths are relative to the `/api` prefix the binary nests them under.

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::application::AccountServices;
use crate::domain::repository::AccountDirectory;
use crate::presentation::handlers::{self, AccountAppState};
use crate::presentation::middleware::require_bearer_auth;

/// Public routes: `/auth/register`, `/auth/login`
pub fn auth_router<R>(state: AccountAppState<R>) -> Router
where
    R: AccountDirectory + Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/auth/register", post(handlers::register::<R>))
        .route("/auth/login", post(handlers::login::<R>))
        .with_state(state)
}

/// Bearer-protected routes: `/users`, `/users/{id}`
pub fn users_router<R>(state: AccountAppState<R>) -> Router
where
    R: AccountDirectory + Clone + Send + Sync + 'static,
{
    Router::new()
        .route(
            "/users",
            get(handlers::list_users::<R>).post(handlers::create_user::<R>),
        )
        .route(
            "/users/{id}",
            get(handlers::get_user::<R>)
                .put(handlers::update_user::<R>)
                .delete(handlers::delete_user::<R>),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_bearer_auth::<R>,
        ))
        .with_state(state)
}

/// All account routes over any directory implementation
pub fn account_router<R>(directory: R, services: AccountServices) -> Router
where
    R: AccountDirectory + Clone + Send + Sync + 'static,
{
    let state = AccountAppState::new(directory, services);

    auth_router(state.clone()).merge(users_router(state))
}
