//! HTTP Handlers

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use kernel::pagination::PageRequest;
use std::sync::Arc;

use crate::application::{
    AccountServices, CreateAccountInput, CreateAccountUseCase, CurrentAccount,
    DeleteAccountUseCase, GetAccountUseCase, ListAccountsUseCase, LoginInput, LoginUseCase,
    RegisterUseCase, UpdateAccountInput, UpdateAccountUseCase,
};
use crate::domain::repository::AccountDirectory;
use crate::domain::value_object::account_id::parse_account_id;
use crate::error::AccountResult;
use crate::presentation::dto::{
    AuthResponse, JsonBody, ListUsersQuery, LoginRequest, RegisterRequest, UpdateUserRequest,
    UserListResponse, UserResponse, UserView,
};

/// Shared state for account handlers
#[derive(Clone)]
pub struct AccountAppState<R>
where
    R: AccountDirectory + Clone + Send + Sync + 'static,
{
    pub directory: Arc<R>,
    pub services: Arc<AccountServices>,
}

impl<R> AccountAppState<R>
where
    R: AccountDirectory + Clone + Send + Sync + 'static,
{
    pub fn new(directory: R, services: AccountServices) -> Self {
        Self {
            directory: Arc::new(directory),
            services: Arc::new(services),
        }
    }
}

impl From<RegisterRequest> for CreateAccountInput {
    fn from(req: RegisterRequest) -> Self {
        CreateAccountInput {
            name: req.name,
            email: req.email,
            password: req.password,
            age: req.age,
        }
    }
}

// ============================================================================
// Auth
// ============================================================================

/// POST /api/auth/register
pub async fn register<R>(
    State(state): State<AccountAppState<R>>,
    JsonBody(req): JsonBody<RegisterRequest>,
) -> AccountResult<(StatusCode, Json<AuthResponse>)>
where
    R: AccountDirectory + Clone + Send + Sync + 'static,
{
    let use_case = RegisterUseCase::new(state.directory.clone(), state.services.clone());

    let output = use_case.execute(req.into()).await?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            message: "User registered successfully",
            user: UserView::from(&output.account),
            token: output.token,
        }),
    ))
}

/// POST /api/auth/login
pub async fn login<R>(
    State(state): State<AccountAppState<R>>,
    JsonBody(req): JsonBody<LoginRequest>,
) -> AccountResult<Json<AuthResponse>>
where
    R: AccountDirectory + Clone + Send + Sync + 'static,
{
    let use_case = LoginUseCase::new(state.directory.clone(), state.services.clone());

    let output = use_case
        .execute(LoginInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok(Json(AuthResponse {
        message: "Login successful",
        user: UserView::from(&output.account),
        token: output.token,
    }))
}

// ============================================================================
// Users (behind the bearer gate)
// ============================================================================

/// GET /api/users
pub async fn list_users<R>(
    State(state): State<AccountAppState<R>>,
    Query(query): Query<ListUsersQuery>,
) -> AccountResult<Json<UserListResponse>>
where
    R: AccountDirectory + Clone + Send + Sync + 'static,
{
    let page = PageRequest::from_query(query.page.as_deref(), query.limit.as_deref());

    let output = ListAccountsUseCase::new(state.directory.clone())
        .execute(page)
        .await?;

    Ok(Json(UserListResponse {
        data: output.accounts.iter().map(UserView::from).collect(),
        pagination: output.pagination,
    }))
}

/// GET /api/users/{id}
pub async fn get_user<R>(
    State(state): State<AccountAppState<R>>,
    Path(id): Path<String>,
) -> AccountResult<Json<UserView>>
where
    R: AccountDirectory + Clone + Send + Sync + 'static,
{
    let id = parse_account_id(&id)?;

    let account = GetAccountUseCase::new(state.directory.clone())
        .execute(id)
        .await?;

    Ok(Json(UserView::from(&account)))
}

/// POST /api/users
pub async fn create_user<R>(
    State(state): State<AccountAppState<R>>,
    Extension(current): Extension<CurrentAccount>,
    JsonBody(req): JsonBody<RegisterRequest>,
) -> AccountResult<(StatusCode, Json<UserResponse>)>
where
    R: AccountDirectory + Clone + Send + Sync + 'static,
{
    let use_case = CreateAccountUseCase::new(state.directory.clone(), state.services.clone());

    let account = use_case.execute(req.into()).await?;

    tracing::info!(
        account_id = %account.id,
        created_by = %current.id(),
        "Account created through user management"
    );

    Ok((
        StatusCode::CREATED,
        Json(UserResponse {
            message: "User created successfully",
            user: UserView::from(&account),
        }),
    ))
}

/// PUT /api/users/{id}
pub async fn update_user<R>(
    State(state): State<AccountAppState<R>>,
    Extension(current): Extension<CurrentAccount>,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<UpdateUserRequest>,
) -> AccountResult<Json<UserResponse>>
where
    R: AccountDirectory + Clone + Send + Sync + 'static,
{
    let id = parse_account_id(&id)?;

    let account = UpdateAccountUseCase::new(state.directory.clone())
        .execute(
            id,
            UpdateAccountInput {
                name: req.name,
                email: req.email,
                age: req.age,
                is_active: req.is_active,
            },
        )
        .await?;

    tracing::debug!(account_id = %account.id, updated_by = %current.id(), "User updated");

    Ok(Json(UserResponse {
        message: "User updated successfully",
        user: UserView::from(&account),
    }))
}

/// DELETE /api/users/{id}
pub async fn delete_user<R>(
    State(state): State<AccountAppState<R>>,
    Extension(current): Extension<CurrentAccount>,
    Path(id): Path<String>,
) -> AccountResult<Json<UserResponse>>
where
    R: AccountDirectory + Clone + Send + Sync + 'static,
{
    let id = parse_account_id(&id)?;

    let account = DeleteAccountUseCase::new(state.directory.clone())
        .execute(id)
        .await?;

    tracing::info!(account_id = %account.id, deleted_by = %current.id(), "User deleted");

    Ok(Json(UserResponse {
        message: "User deleted successfully",
        user: UserView::from(&account),
    }))
}
