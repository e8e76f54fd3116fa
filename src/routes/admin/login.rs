use crate::blog::SessionID;
use crate::error::BlogError;
use crate::routes::response::{self, Reply};
use crate::state::SharedState;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::Json;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct LoginCredentials {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub(super) struct TokenData {
    token: SessionID,
}

pub(super) async fn post(
    State(state): SharedState,
    body: Result<Json<LoginCredentials>, JsonRejection>,
) -> Reply<TokenData> {
    let Json(login_credentials) = body?;
    let auth = match crate::auth::Auth::validate(
        &state.admin,
        &login_credentials.email,
        login_credentials.password,
    )
    .await
    {
        Ok(Some(it)) => it,
        Ok(None) => {
            tracing::info!("Rejected admin login for {:?}", login_credentials.email);
            return Err(BlogError::InvalidCredentials);
        }
        Err(err) => {
            tracing::error!(
                "Error validating credentials for {:?}: {err}",
                login_credentials.email
            );
            return Err(err.into());
        }
    };

    let token = state.sessions.issue(login_credentials.email, auth).await;
    Ok(response::ok(TokenData { token }))
}
