//! Authentication handlers.

use axum::{extract::State, http::StatusCode, response::Json, routing::post, Router};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::config::{ACCESS_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE};
use crate::domain::{SignIn, SignUp};
use crate::errors::AppResult;
use crate::types::MessageResponse;

/// Create authentication routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/sign-up", post(sign_up))
        .route("/sign-in", post(sign_in))
}

fn token_cookie(
    name: &'static str,
    value: String,
    ttl: chrono::Duration,
    secure: bool,
) -> Cookie<'static> {
    Cookie::build((name, value))
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::seconds(ttl.num_seconds()))
        .build()
}

/// Register a new user
pub async fn sign_up(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<SignUp>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    state.auth_service.sign_up(payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("User created successfully")),
    ))
}

/// Sign in and receive the access and refresh tokens as cookies
pub async fn sign_in(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(payload): ValidatedJson<SignIn>,
) -> AppResult<(CookieJar, Json<MessageResponse>)> {
    let user = state.auth_service.sign_in(payload).await?;
    let tokens = state.auth_service.issue_tokens(&user)?;

    let jar = jar
        .add(token_cookie(
            ACCESS_TOKEN_COOKIE,
            tokens.access_token,
            tokens.access_ttl,
            state.secure_cookies,
        ))
        .add(token_cookie(
            REFRESH_TOKEN_COOKIE,
            tokens.refresh_token,
            tokens.refresh_ttl,
            state.secure_cookies,
        ));

    tracing::info!(user_id = %user.id, "User signed in");
    Ok((jar, Json(MessageResponse::new("Signed in successfully"))))
}
