use anyhow::Result;
use base64::Engine;
use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use tracing::debug;

use crate::auth::{BoardHasher, TokenSigner};
use crate::gateway::{ContactInput, GatewayError, ListingInput, MutationGateway};
use tower_http::services::ServeDir;

use axum::{
    extract::{Path, State},
    http::{header::HeaderMap, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::Serialize;

use super::session::Actor;
use super::{log_requests, state::*, ServerConfig};

#[derive(Serialize)]
struct ServerStats {
    pub uptime: String,
    pub hash: String,
}

fn format_uptime(duration: Duration) -> String {
    let total_seconds = duration.as_secs();

    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}d {:02}:{:02}:{:02}", days, hours, minutes, seconds)
}

async fn home(State(state): State<ServerState>) -> impl IntoResponse {
    let stats = ServerStats {
        uptime: format_uptime(state.start_time.elapsed()),
        hash: state.hash.clone(),
    };
    Json(stats)
}

const BAD_CREDENTIALS_BODY: &str = "Incorrect email/password combination";

/// Pulls `email:password` out of an HTTP Basic Authorization header.
fn parse_basic_credentials(headers: &HeaderMap) -> Result<(String, String)> {
    let raw = headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or_else(|| anyhow::anyhow!("Missing Authorization header"))?
        .to_str()?;
    let encoded = match raw.trim().get(..6) {
        Some(prefix) if prefix.eq_ignore_ascii_case("basic ") => raw.trim()[6..].trim_start(),
        _ => anyhow::bail!("Expected Basic authorization"),
    };
    let decoded = base64::engine::general_purpose::STANDARD.decode(encoded)?;
    let decoded = String::from_utf8(decoded)?;
    let (email, password) = decoded
        .split_once(':')
        .ok_or_else(|| anyhow::anyhow!("Malformed Basic credentials"))?;
    Ok((email.to_string(), password.to_string()))
}

/// `Ok(Some(token))` on success, `Ok(None)` for unknown email or wrong
/// password. The two failures are deliberately indistinguishable.
fn check_credentials(
    store: &GuardedBoardStore,
    token_signer: &TokenSigner,
    email: &str,
    password: &str,
) -> Result<Option<String>> {
    let user = match store.find_user_by_email(email)? {
        Some(user) => user,
        None => {
            debug!("Login attempt for unknown email");
            return Ok(None);
        }
    };

    let hasher: BoardHasher = user.hasher.parse()?;
    if !hasher.verify(password, &user.password_hash)? {
        debug!("Password mismatch for user_id={}", user.id);
        return Ok(None);
    }

    let token = token_signer.sign(user.id, &user.email)?;
    Ok(Some(token))
}

async fn login(State(state): State<ServerState>, headers: HeaderMap) -> Response {
    let (email, password) = match parse_basic_credentials(&headers) {
        Ok(x) => x,
        Err(err) => {
            return (
                StatusCode::BAD_REQUEST,
                format!("We encountered an error: {}", err),
            )
                .into_response()
        }
    };

    match check_credentials(&state.board_store, &state.token_signer, &email, &password) {
        Ok(Some(token)) => (StatusCode::OK, token).into_response(),
        Ok(None) => (StatusCode::UNAUTHORIZED, BAD_CREDENTIALS_BODY).into_response(),
        Err(err) => (
            StatusCode::BAD_REQUEST,
            format!("We encountered an error: {}", err),
        )
            .into_response(),
    }
}

fn gateway_response<T: Serialize>(result: Result<T, GatewayError>) -> Response {
    match result {
        Ok(value) => Json(value).into_response(),
        Err(GatewayError::Forbidden) => {
            (StatusCode::FORBIDDEN, GatewayError::Forbidden.to_string()).into_response()
        }
        Err(GatewayError::Storage(err)) => {
            (StatusCode::INTERNAL_SERVER_ERROR, format!("{}", err)).into_response()
        }
    }
}

async fn get_listings(actor: Actor, State(gateway): State<GuardedGateway>) -> Response {
    gateway_response(gateway.listings(actor.id()))
}

async fn post_listing(
    actor: Actor,
    State(gateway): State<GuardedGateway>,
    Json(body): Json<ListingInput>,
) -> Response {
    gateway_response(gateway.create_listing(actor.id(), &body))
}

async fn put_listing(
    actor: Actor,
    State(gateway): State<GuardedGateway>,
    Path(id): Path<i64>,
    Json(body): Json<ListingInput>,
) -> Response {
    gateway_response(gateway.update_listing(actor.id(), id, &body))
}

async fn delete_listing(
    actor: Actor,
    State(gateway): State<GuardedGateway>,
    Path(id): Path<i64>,
) -> Response {
    gateway_response(gateway.delete_listing(actor.id(), id))
}

async fn get_companies(_actor: Actor, State(gateway): State<GuardedGateway>) -> Response {
    gateway_response(gateway.companies())
}

async fn get_contacts(actor: Actor, State(gateway): State<GuardedGateway>) -> Response {
    gateway_response(gateway.contacts(actor.id()))
}

async fn post_contact(
    actor: Actor,
    State(gateway): State<GuardedGateway>,
    Json(body): Json<ContactInput>,
) -> Response {
    gateway_response(gateway.create_contact(actor.id(), &body))
}

async fn delete_listing_contact(
    actor: Actor,
    State(gateway): State<GuardedGateway>,
    Path((listing_id, contact_id)): Path<(i64, i64)>,
) -> Response {
    gateway_response(gateway.remove_contact(actor.id(), listing_id, contact_id))
}

impl ServerState {
    fn new(config: ServerConfig, board_store: GuardedBoardStore) -> ServerState {
        let gateway = Arc::new(MutationGateway::new(board_store.clone()));
        let token_signer = Arc::new(TokenSigner::new(&config.jwt_secret));
        ServerState {
            config,
            start_time: Instant::now(),
            board_store,
            gateway,
            token_signer,
            hash: env!("GIT_HASH").to_owned(),
        }
    }
}

pub fn make_app(config: ServerConfig, board_store: GuardedBoardStore) -> Result<Router> {
    let state = ServerState::new(config.clone(), board_store);

    let auth_routes: Router = Router::new()
        .route("/login", post(login))
        .with_state(state.clone());

    let board_routes: Router = Router::new()
        .route("/listings", get(get_listings))
        .route("/listings", post(post_listing))
        .route("/listings/{id}", put(put_listing))
        .route("/listings/{id}", delete(delete_listing))
        .route(
            "/listings/{listing_id}/contacts/{contact_id}",
            delete(delete_listing_contact),
        )
        .route("/companies", get(get_companies))
        .route("/contacts", get(get_contacts))
        .route("/contacts", post(post_contact))
        .with_state(state.clone());

    let home_router: Router = match config.frontend_dir_path {
        Some(frontend_path) => {
            let static_files_service =
                ServeDir::new(frontend_path).append_index_html_on_directories(true);
            Router::new().fallback_service(static_files_service)
        }
        None => Router::new()
            .route("/", get(home))
            .with_state(state.clone()),
    };

    let mut app: Router = home_router
        .nest("/v1/auth", auth_routes)
        .nest("/v1/board", board_routes);

    #[cfg(feature = "slowdown")]
    {
        app = app.layer(middleware::from_fn(super::slowdown_request));
    }
    app = app.layer(middleware::from_fn_with_state(state.clone(), log_requests));

    Ok(app)
}

pub async fn run_server(
    board_store: GuardedBoardStore,
    requests_logging_level: super::RequestsLoggingLevel,
    port: u16,
    frontend_dir_path: Option<String>,
    jwt_secret: String,
) -> Result<()> {
    let config = ServerConfig {
        port,
        requests_logging_level,
        frontend_dir_path,
        jwt_secret,
    };
    let app = make_app(config, board_store)?;

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    Ok(axum::serve(listener, app).await?)
}
