use axum::{
    http::{header, HeaderMap, HeaderValue, StatusCode},
    routing::get,
    extract::State,
    Json, Router,
};
use tracing::{info, instrument};

use crate::{
    auth::{password::hash_password, AuthUser},
    error::ApiError,
    state::AppState,
    validate,
};

use super::dto::{CreateUserRequest, CurrentUserResponse};
use super::repo::{self, NewUser};

pub fn routes() -> Router<AppState> {
    Router::new().route("/users", get(get_current_user).post(create_user))
}

/// GET /api/users - profile of the authenticated identity, read back from the
/// store by id.
#[instrument(skip_all)]
pub async fn get_current_user(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
) -> Result<Json<CurrentUserResponse>, ApiError> {
    let user = repo::find_by_id(&state.db, identity.id)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid credentials".into()))?;
    Ok(Json(CurrentUserResponse {
        name: format!("{} {}", user.first_name, user.last_name),
        email: user.email_address,
    }))
}

/// POST /api/users - open registration; 201 with `Location: /`, empty body.
#[instrument(skip_all)]
pub async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<(StatusCode, HeaderMap), ApiError> {
    let errors = validate::new_user(&payload);
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }

    // Validation passed, so the fields are present.
    let password = payload.password.unwrap_or_default();
    let new = NewUser {
        first_name: payload.first_name.unwrap_or_default(),
        last_name: payload.last_name.unwrap_or_default(),
        email_address: payload.email_address.unwrap_or_default(),
        password_hash: hash_password(&password)?,
    };

    let user = repo::create(&state.db, &new).await?;
    info!(user_id = user.id, email = %user.email_address, "user created");

    let mut headers = HeaderMap::new();
    headers.insert(header::LOCATION, HeaderValue::from_static("/"));
    Ok((StatusCode::CREATED, headers))
}
