use super::state::ServerState;
use crate::board_store::User;

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, StatusCode},
    response::IntoResponse,
};
use tracing::debug;

/// The authenticated caller, resolved before any handler logic runs.
#[derive(Debug)]
pub struct Actor {
    pub user: User,
}

impl Actor {
    pub fn id(&self) -> i64 {
        self.user.id
    }
}

pub enum ActorExtractionError {
    Unauthorized,
}

impl IntoResponse for ActorExtractionError {
    fn into_response(self) -> axum::response::Response {
        match self {
            ActorExtractionError::Unauthorized => {
                (StatusCode::UNAUTHORIZED, "Unauthorized").into_response()
            }
        }
    }
}

/// Pulls the token out of the Authorization header, tolerating a
/// case-insensitive `Bearer ` prefix or a bare token.
fn extract_bearer_token(parts: &Parts) -> Option<String> {
    let raw = parts.headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let trimmed = raw.trim();
    let token = match trimmed.get(..7) {
        Some(prefix) if prefix.eq_ignore_ascii_case("bearer ") => trimmed[7..].trim_start(),
        _ => trimmed,
    };
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

fn extract_actor_from_request_parts(parts: &mut Parts, ctx: &ServerState) -> Option<Actor> {
    let token = match extract_bearer_token(parts) {
        None => {
            debug!("No bearer token in request");
            return None;
        }
        Some(x) => x,
    };

    let claims = match ctx.token_signer.verify(&token) {
        Ok(claims) => claims,
        Err(err) => {
            debug!("Token verification failed: {}", err);
            return None;
        }
    };

    match ctx.board_store.find_user_by_id(claims.id) {
        Ok(Some(user)) => Some(Actor { user }),
        Ok(None) => {
            debug!("Token user_id={} no longer exists", claims.id);
            None
        }
        Err(err) => {
            debug!("Failed to load user for token: {}", err);
            None
        }
    }
}

impl FromRequestParts<ServerState> for Actor {
    type Rejection = ActorExtractionError;

    async fn from_request_parts(
        parts: &mut Parts,
        ctx: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        extract_actor_from_request_parts(parts, ctx).ok_or(ActorExtractionError::Unauthorized)
    }
}
