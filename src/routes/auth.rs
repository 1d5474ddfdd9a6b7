use crate::{
    auth::{AuthResponse, CurrentUser, LoginRequest, RegisterRequest},
    error::AppError,
    services::account,
    state::AppState,
};
use actix_web::{get, post, web, HttpResponse, Responder};
use serde_json::json;

/// Register a new user
///
/// Creates a new account and returns a bearer token for it.
#[post("/register")]
pub async fn register(
    state: web::Data<AppState>,
    register_data: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    let (principal, token) =
        account::register(state.store.as_ref(), &state.tokens, &register_data).await?;

    log::info!("Account registered: {}", principal.email);

    Ok(HttpResponse::Created().json(AuthResponse {
        token,
        user_id: principal.id,
    }))
}

/// Login user
///
/// Authenticates a user by email and password and returns a bearer token.
#[post("/login")]
pub async fn login(
    state: web::Data<AppState>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    let (principal, token) =
        account::login(state.store.as_ref(), &state.tokens, &login_data).await?;

    Ok(HttpResponse::Ok().json(AuthResponse {
        token,
        user_id: principal.id,
    }))
}

/// Logout
///
/// Pure acknowledgment: tokens are stateless, so the client just discards
/// its copy.
#[post("/logout")]
pub async fn logout() -> impl Responder {
    account::logout();
    HttpResponse::Ok().json(json!({
        "message": "Logout successful"
    }))
}

/// Current session info
///
/// Returns the identity behind the presented bearer token.
#[get("/session")]
pub async fn session(user: CurrentUser) -> Result<impl Responder, AppError> {
    Ok(HttpResponse::Ok().json(json!({
        "user": {
            "id": user.id,
            "email": user.email,
        }
    })))
}
