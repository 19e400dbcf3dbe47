use axum::extract::FromRef;
use serde_json::Value;
use tracing::{info, warn};

use crate::{
    auth::{
        dto::{LoginResponse, PublicUser},
        jwt::JwtKeys,
        password::{hash_password_async, verify_decoy_async, verify_password_async},
        repo::CreateUserError,
        repo_types::NewUser,
    },
    error::AppError,
    state::AppState,
    validation,
};

const DUPLICATE_EMAIL: &str = "An account with this email already exists";
const BAD_CREDENTIALS: &str = "Invalid email or password";

pub async fn register(st: &AppState, payload: &Value) -> Result<PublicUser, AppError> {
    let input = validation::auth::register(payload)?;

    if st.users.find_by_email(&input.email).await?.is_some() {
        warn!(email = %input.email, "email already registered");
        return Err(AppError::Conflict(DUPLICATE_EMAIL.into()));
    }

    let password_hash = hash_password_async(input.password).await?;

    // the store has the final word: a concurrent registration may have won
    let user = st
        .users
        .create(NewUser {
            name: input.name,
            email: input.email,
            password_hash,
            currency: input.currency.unwrap_or_default(),
        })
        .await
        .map_err(|e| match e {
            CreateUserError::EmailTaken => AppError::Conflict(DUPLICATE_EMAIL.into()),
            CreateUserError::Other(e) => AppError::Internal(e),
        })?;

    info!(user_id = %user.id, email = %user.email, "user registered");
    Ok(PublicUser::from(&user))
}

pub async fn login(st: &AppState, payload: &Value) -> Result<LoginResponse, AppError> {
    let input = validation::auth::login(payload)?;

    let Some(user) = st.users.find_by_email(&input.email).await? else {
        warn!(email = %input.email, "login unknown email");
        verify_decoy_async(input.password).await?;
        return Err(AppError::Unauthorized(BAD_CREDENTIALS.into()));
    };

    if !verify_password_async(input.password, user.password_hash.clone()).await? {
        warn!(user_id = %user.id, "login invalid password");
        return Err(AppError::Unauthorized(BAD_CREDENTIALS.into()));
    }

    let token = JwtKeys::from_ref(st).sign(&user)?;

    info!(user_id = %user.id, "user logged in");
    Ok(LoginResponse {
        token,
        email: user.email,
        name: user.name,
    })
}
