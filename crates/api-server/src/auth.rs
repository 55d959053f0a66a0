use crate::{ApiError, AppState};
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use domain::User;
use tracing::debug;

/// Header carrying the id of the calling user.
pub const USER_ID_HEADER: &str = "X-User-Id";

/// The authenticated principal of a request, if any.
///
/// Resolution never rejects a request on its own: a missing header or an
/// unknown id yields `Caller(None)`, and gated operations turn that into a
/// 401 through their authorization precondition.
#[derive(Debug, Clone)]
pub struct Caller(pub Option<User>);

#[async_trait]
impl FromRequestParts<AppState> for Caller {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user_id = match parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
        {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => return Ok(Caller(None)),
        };

        let user = state.tutorial_app.user_service.find_user(&user_id).await?;
        if user.is_none() {
            debug!(user_id = %user_id, "Unknown caller id, treating request as anonymous");
        }

        Ok(Caller(user))
    }
}
