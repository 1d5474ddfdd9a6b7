use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{web, Error as ActixError, FromRequest, HttpRequest};
use futures::future::LocalBoxFuture;
use std::ops::Deref;

use crate::auth::resolver;
use crate::error::AppError;
use crate::models::Principal;
use crate::state::AppState;

/// Extracts the authenticated principal for a protected route.
///
/// Reads the `Authorization: Bearer <token>` header, runs the identity
/// resolver against application state, and hands the handler a fully loaded
/// `Principal`. Requests without a usable token are rejected with 401 before
/// the handler body runs.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Principal);

impl Deref for CurrentUser {
    type Target = Principal;

    fn deref(&self) -> &Principal {
        &self.0
    }
}

/// Pulls the bearer token out of the `Authorization` header, if present.
pub fn bearer_token(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::to_owned)
}

impl FromRequest for CurrentUser {
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<AppState>>().cloned();
        let token = bearer_token(req);

        Box::pin(async move {
            let state = state.ok_or_else(|| {
                AppError::InternalServerError("Application state not configured".into())
            })?;
            let token =
                token.ok_or_else(|| AppError::Unauthenticated("Missing bearer token".into()))?;

            let principal = resolver::resolve(state.store.as_ref(), &state.tokens, &token).await?;
            Ok(CurrentUser(principal))
        })
    }
}
