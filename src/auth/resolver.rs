use crate::auth::token::TokenCodec;
use crate::error::AppError;
use crate::models::Principal;
use crate::storage::Storage;

/// Resolves a presented bearer token to the authenticated principal.
///
/// Decodes the token, then looks the subject up in storage. A token that
/// fails to decode and a token whose subject no longer exists both surface
/// as the same `Unauthenticated` failure, so a caller cannot distinguish
/// "token invalid" from "user deleted". This is the single dependency every
/// protected operation goes through.
pub async fn resolve(
    store: &dyn Storage,
    codec: &TokenCodec,
    token: &str,
) -> Result<Principal, AppError> {
    let claims = codec
        .decode(token)
        .map_err(|_| AppError::Unauthenticated("Could not validate credentials".into()))?;

    store
        .find_principal_by_id(claims.sub)
        .await?
        .ok_or_else(|| AppError::Unauthenticated("Could not validate credentials".into()))
}
