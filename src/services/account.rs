//! Registration, login and logout.
//!
//! Composes the credential hasher and the token codec over the storage
//! boundary. Login deliberately distinguishes "no such account" from "wrong
//! password"; see the note on [`login`].

use validator::Validate;

use crate::auth::password::{hash_password, verify_password};
use crate::auth::token::TokenCodec;
use crate::auth::{LoginRequest, RegisterRequest};
use crate::error::AppError;
use crate::models::Principal;
use crate::storage::Storage;

/// Creates a new account and issues a first token for it.
///
/// The email is matched case-sensitively against existing accounts; a
/// duplicate fails with `AlreadyExists` before anything is written. The
/// password is hashed before the principal is persisted, so no plaintext
/// ever reaches storage.
pub async fn register(
    store: &dyn Storage,
    codec: &TokenCodec,
    request: &RegisterRequest,
) -> Result<(Principal, String), AppError> {
    request.validate()?;

    if store
        .find_principal_by_email(&request.email)
        .await?
        .is_some()
    {
        return Err(AppError::AlreadyExists("Email already registered".into()));
    }

    let password_hash = hash_password(&request.password)?;
    let principal = store
        .insert_principal(&request.email, &password_hash)
        .await?;
    let token = codec.issue(principal.id)?;

    Ok((principal, token))
}

/// Authenticates by email and password and issues a token.
///
/// An unknown email fails `NotFound` and a wrong password fails
/// `InvalidCredentials`. Keeping the two apart matches the original API
/// contract but is an email-enumeration oracle; collapse both into
/// `InvalidCredentials` here if enumeration resistance is ever required.
pub async fn login(
    store: &dyn Storage,
    codec: &TokenCodec,
    request: &LoginRequest,
) -> Result<(Principal, String), AppError> {
    request.validate()?;

    let principal = store
        .find_principal_by_email(&request.email)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;

    if !verify_password(&request.password, &principal.password_hash)? {
        return Err(AppError::InvalidCredentials);
    }

    let token = codec.issue(principal.id)?;
    Ok((principal, token))
}

/// Acknowledges a logout.
///
/// Tokens are stateless, so there is nothing to invalidate server-side; the
/// client discards its token.
pub fn logout() {}
