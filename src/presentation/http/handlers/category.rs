//! Category Handlers

use axum::{
    extract::{multipart::MultipartRejection, Multipart, Path, State},
    http::StatusCode,
    Json,
};

use crate::application::dto::request::CategoryForm;
use crate::application::dto::response::CategoryResponse;
use crate::application::services::{CategoryService, CategoryServiceImpl};
use crate::presentation::http::multipart::FormFields;
use crate::shared::error::AppError;
use crate::shared::validation::validate;
use crate::startup::AppState;

fn category_service(state: &AppState) -> CategoryServiceImpl {
    CategoryServiceImpl::new(state.categories.clone(), state.uploads(), state.snowflake.clone())
}

fn parse_category_id(raw: &str) -> Result<i64, AppError> {
    raw.parse()
        .map_err(|_| AppError::BadRequest("Invalid category ID".into()))
}

async fn read_form(multipart: Result<Multipart, MultipartRejection>) -> Result<CategoryForm, AppError> {
    let mut fields = FormFields::read(multipart?).await?;
    let form = CategoryForm {
        name: fields.text("name"),
        description: fields.text("description"),
        icon: fields.file("icon"),
    };
    validate(&form)?;
    Ok(form)
}

/// List all categories
pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<CategoryResponse>>, AppError> {
    let categories = category_service(&state).list_categories().await?;
    Ok(Json(categories.into_iter().map(CategoryResponse::from).collect()))
}

/// Create a new category
pub async fn create_category(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<CategoryResponse>), AppError> {
    let request = read_form(multipart).await?.into_create()?;
    let category = category_service(&state).create_category(request).await?;

    Ok((StatusCode::CREATED, Json(CategoryResponse::from(category))))
}

/// Update a category
pub async fn update_category(
    State(state): State<AppState>,
    Path(category_id): Path<String>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<CategoryResponse>, AppError> {
    let category_id = parse_category_id(&category_id)?;
    let update = read_form(multipart).await?.into_update();

    let category = category_service(&state)
        .update_category(category_id, update)
        .await?;

    Ok(Json(CategoryResponse::from(category)))
}

/// Delete a category
pub async fn delete_category(
    State(state): State<AppState>,
    Path(category_id): Path<String>,
) -> Result<StatusCode, AppError> {
    let category_id = parse_category_id(&category_id)?;
    category_service(&state).delete_category(category_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
