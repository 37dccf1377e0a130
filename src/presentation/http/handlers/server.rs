//! Server Handlers

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Extension, Path, Query, State,
    },
    http::StatusCode,
    Json,
};

use crate::application::dto::request::{CreateServerRequest, ServerListQueryParams};
use crate::application::dto::response::{shape_server_list, ServerResponse};
use crate::application::services::{
    ServerListParams, ServerListingService, ServerListingServiceImpl, ServerService,
    ServerServiceImpl,
};
use crate::presentation::middleware::AuthUser;
use crate::shared::error::AppError;
use crate::shared::validation::validate;
use crate::startup::AppState;

fn server_service(state: &AppState) -> ServerServiceImpl {
    ServerServiceImpl::new(
        state.servers.clone(),
        state.categories.clone(),
        state.uploads(),
        state.snowflake.clone(),
    )
}

pub(crate) fn parse_server_id(raw: &str) -> Result<i64, AppError> {
    raw.parse()
        .map_err(|_| AppError::BadRequest("Invalid server ID".into()))
}

/// List servers in the directory
///
/// Anonymous callers are rejected by the listing itself, so the
/// error body is the directory's own. A repeated parameter keeps its last value.
pub async fn list_servers(
    State(state): State<AppState>,
    auth: Option<Extension<AuthUser>>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<Vec<ServerResponse>>, AppError> {
    let Query(pairs) = query?;
    let caller = auth.map(|Extension(user)| user.user_id);
    let params = ServerListParams::from(pairs.into_iter().collect::<ServerListQueryParams>());

    let listing_service = ServerListingServiceImpl::new(state.servers.clone(), state.channels.clone());
    let list = listing_service.list_servers(&params, caller).await?;

    Ok(Json(shape_server_list(list)))
}

/// Create a new server
pub async fn create_server(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    body: Result<Json<CreateServerRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ServerResponse>), AppError> {
    let Json(body) = body?;
    validate(&body)?;

    let server = server_service(&state)
        .create_server(auth.user_id, body.into())
        .await?;

    Ok((StatusCode::CREATED, Json(ServerResponse::from_server(server, Vec::new()))))
}

/// Delete a server
pub async fn delete_server(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(server_id): Path<String>,
) -> Result<StatusCode, AppError> {
    let server_id = parse_server_id(&server_id)?;

    server_service(&state)
        .delete_server(server_id, auth.user_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Join a server as the current user
pub async fn join_server(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(server_id): Path<String>,
) -> Result<StatusCode, AppError> {
    let server_id = parse_server_id(&server_id)?;

    server_service(&state)
        .join_server(server_id, auth.user_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Leave a server as the current user
pub async fn leave_server(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(server_id): Path<String>,
) -> Result<StatusCode, AppError> {
    let server_id = parse_server_id(&server_id)?;

    server_service(&state)
        .leave_server(server_id, auth.user_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
