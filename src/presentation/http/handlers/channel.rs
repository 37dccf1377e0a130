//! Channel Handlers

use axum::{
    extract::{multipart::MultipartRejection, Extension, Multipart, Path, State},
    http::StatusCode,
    Json,
};

use super::server::parse_server_id;
use crate::application::dto::request::ChannelForm;
use crate::application::dto::response::ChannelResponse;
use crate::application::services::{ChannelService, ChannelServiceImpl};
use crate::presentation::http::multipart::FormFields;
use crate::presentation::middleware::AuthUser;
use crate::shared::error::AppError;
use crate::shared::validation::validate;
use crate::startup::AppState;

fn channel_service(state: &AppState) -> ChannelServiceImpl {
    ChannelServiceImpl::new(
        state.channels.clone(),
        state.servers.clone(),
        state.uploads(),
        state.snowflake.clone(),
    )
}

fn parse_channel_id(raw: &str) -> Result<i64, AppError> {
    raw.parse()
        .map_err(|_| AppError::BadRequest("Invalid channel ID".into()))
}

async fn read_form(multipart: Result<Multipart, MultipartRejection>) -> Result<ChannelForm, AppError> {
    let mut fields = FormFields::read(multipart?).await?;
    let form = ChannelForm {
        name: fields.text("name"),
        topic: fields.text("topic"),
        banner: fields.file("banner"),
        icon: fields.file("icon"),
    };
    validate(&form)?;
    Ok(form)
}

/// Create a new channel
pub async fn create_channel(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(server_id): Path<String>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<ChannelResponse>), AppError> {
    let server_id = parse_server_id(&server_id)?;
    let request = read_form(multipart).await?.into_create()?;

    let channel = channel_service(&state)
        .create_channel(server_id, auth.user_id, request)
        .await?;

    Ok((StatusCode::CREATED, Json(ChannelResponse::from(channel))))
}

/// Update a channel
pub async fn update_channel(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(channel_id): Path<String>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ChannelResponse>, AppError> {
    let channel_id = parse_channel_id(&channel_id)?;
    let update = read_form(multipart).await?.into_update();

    let channel = channel_service(&state)
        .update_channel(channel_id, auth.user_id, update)
        .await?;

    Ok(Json(ChannelResponse::from(channel)))
}

/// Delete a channel
pub async fn delete_channel(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(channel_id): Path<String>,
) -> Result<StatusCode, AppError> {
    let channel_id = parse_channel_id(&channel_id)?;

    channel_service(&state)
        .delete_channel(channel_id, auth.user_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
