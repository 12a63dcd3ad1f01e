use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::db::models::User;
use crate::error::{AppError, AppResult};
use crate::repo::NewUser;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

// -- Request/response types --

#[derive(Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub identifier: String,
    #[serde(default)]
    pub password: String,
}

/// Login confirms identity without issuing a token; the 200 itself is
/// the proof of success.
#[derive(Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
    #[serde(rename = "userId")]
    pub user_id: i64,
    pub username: String,
}

// -- Handlers --

/// POST /register — create an account. The email is checked look-aside
/// first; a concurrent duplicate still lands on the unique constraint,
/// which the repository reports as a conflict.
async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<User>)> {
    if req.username.is_empty() || req.email.is_empty() || req.password.is_empty() {
        return Err(AppError::Validation("All fields are required".into()));
    }

    if state.users.find_by_email(&req.email).await?.is_some() {
        return Err(AppError::Conflict("User already exists".into()));
    }

    let hash = bcrypt::hash(&req.password, bcrypt::DEFAULT_COST)?;

    let user = state
        .users
        .create(NewUser {
            username: req.username,
            email: req.email,
            password: hash,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// POST /login — one-shot credential check against email or username.
async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let user = state
        .users
        .find_by_identifier(&req.identifier)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    if !bcrypt::verify(&req.password, &user.password)? {
        return Err(AppError::InvalidCredentials);
    }

    Ok(Json(LoginResponse {
        success: true,
        message: "Login successful".into(),
        user_id: user.id,
        username: user.username,
    }))
}
