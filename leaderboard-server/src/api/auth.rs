//! Caller identity
//!
//! The dashboard signs users in upstream and forwards their email in
//! `X-User-Email`; the role comes from the access list of the last
//! republish.

use axum::{extract::FromRequestParts, http::request::Parts};
use shared::models::{Role, resolve_role};

use crate::core::ServerState;
use crate::utils::{AppError, AppResult};

pub const USER_EMAIL_HEADER: &str = "x-user-email";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub email: String,
    pub role: Role,
}

impl CurrentUser {
    pub fn require_admin(&self) -> AppResult<()> {
        if self.role.is_admin() {
            Ok(())
        } else {
            tracing::warn!(email = %self.email, "Admin route denied");
            Err(AppError::admin_required())
        }
    }
}

impl FromRequestParts<ServerState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<CurrentUser>() {
            return Ok(user.clone());
        }

        let email = parts
            .headers
            .get(USER_EMAIL_HEADER)
            .and_then(|h| h.to_str().ok())
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .ok_or_else(AppError::not_authenticated)?
            .to_string();

        let access = state.engine.access();
        let role = resolve_role(&access, &email).ok_or_else(|| {
            tracing::info!(email = %email, "Email not in access list");
            AppError::access_not_granted(email.clone())
        })?;

        let user = CurrentUser { email, role };
        parts.extensions.insert(user.clone());
        Ok(user)
    }
}
