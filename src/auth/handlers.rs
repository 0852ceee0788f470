use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use tracing::instrument;

use crate::{
    auth::{
        cookie::{cleared_cookie, session_cookie},
        dto::{Credential, PublicUser},
        error::AccountError,
        extractors::AuthToken,
        services::AccountService,
    },
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(sign_up))
        .route("/login", post(log_in))
        .route("/logout", post(log_out))
}

pub fn me_routes() -> Router<AppState> {
    Router::new().route("/me", get(get_me))
}

fn cookie_error(e: anyhow::Error) -> AccountError {
    AccountError::Internal(format!("{e:#}"))
}

#[instrument(skip(svc, payload))]
pub async fn sign_up(
    State(svc): State<AccountService>,
    payload: Result<Json<Credential>, JsonRejection>,
) -> Result<(StatusCode, Json<PublicUser>), AccountError> {
    let Json(payload) = payload?;
    let user = svc.sign_up(payload).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

#[instrument(skip(state, svc, payload))]
pub async fn log_in(
    State(state): State<AppState>,
    State(svc): State<AccountService>,
    payload: Result<Json<Credential>, JsonRejection>,
) -> Result<(StatusCode, HeaderMap), AccountError> {
    let Json(payload) = payload?;
    let session = svc.log_in(payload).await?;

    let mut headers = HeaderMap::new();
    headers.insert(
        header::SET_COOKIE,
        session_cookie(&state.config.cookie, &session.token, session.expires_at)
            .map_err(cookie_error)?,
    );
    Ok((StatusCode::OK, headers))
}

#[instrument(skip(state))]
pub async fn log_out(
    State(state): State<AppState>,
) -> Result<(StatusCode, HeaderMap), AccountError> {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::SET_COOKIE,
        cleared_cookie(&state.config.cookie).map_err(cookie_error)?,
    );
    Ok((StatusCode::OK, headers))
}

#[instrument(skip(svc, token))]
pub async fn get_me(
    State(svc): State<AccountService>,
    AuthToken(token): AuthToken,
) -> Result<Json<PublicUser>, AccountError> {
    let user = svc.current_user(&token).await?;
    Ok(Json(user))
}
