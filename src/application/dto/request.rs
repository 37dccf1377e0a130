//! Request DTOs
//!
//! Data structures for API request bodies and query strings.

use serde::Deserialize;
use validator::Validate;

use crate::application::services::{
    CreateCategoryDto, CreateChannelDto, CreateServerDto, ServerListParams, UpdateCategoryDto,
    UpdateChannelDto,
};
use crate::domain::services::Upload;
use crate::shared::error::AppError;

/// Query parameters for the server listing.
///
/// Values arrive as raw strings; empty values count as absent and the flags
/// are only set by the exact string `"true"`.
#[derive(Debug, Default, Deserialize)]
pub struct ServerListQueryParams {
    pub category: Option<String>,
    pub qty: Option<String>,
    pub by_user: Option<String>,
    pub server_id: Option<String>,
    pub number_of_members: Option<String>,
}

impl FromIterator<(String, String)> for ServerListQueryParams {
    /// Later pairs overwrite earlier ones; unknown keys are ignored.
    fn from_iter<I: IntoIterator<Item = (String, String)>>(pairs: I) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "category" => &mut query.category,
                "qty" => &mut query.qty,
                "by_user" => &mut query.by_user,
                "server_id" => &mut query.server_id,
                "number_of_members" => &mut query.number_of_members,
                _ => continue,
            };
            *slot = Some(value);
        }
        query
    }
}

impl From<ServerListQueryParams> for ServerListParams {
    fn from(query: ServerListQueryParams) -> Self {
        Self {
            category: non_empty(query.category),
            qty: non_empty(query.qty),
            by_user: is_true(query.by_user.as_deref()),
            server_id: non_empty(query.server_id),
            number_of_members: is_true(query.number_of_members.as_deref()),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn is_true(value: Option<&str>) -> bool {
    value == Some("true")
}

/// Create server request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateServerRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    /// Category id
    pub category: i64,

    #[validate(length(max = 250, message = "Description must be at most 250 characters"))]
    pub description: Option<String>,
}

impl From<CreateServerRequest> for CreateServerDto {
    fn from(request: CreateServerRequest) -> Self {
        Self {
            name: request.name,
            category_id: request.category,
            description: request.description,
        }
    }
}

/// Multipart form for creating or updating a category
#[derive(Debug, Default, Validate)]
pub struct CategoryForm {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: Option<String>,

    pub description: Option<String>,

    pub icon: Option<Upload>,
}

impl CategoryForm {
    pub fn into_create(self) -> Result<CreateCategoryDto, AppError> {
        Ok(CreateCategoryDto {
            name: required(self.name, "name")?,
            description: self.description,
            icon: self.icon,
        })
    }

    pub fn into_update(self) -> UpdateCategoryDto {
        UpdateCategoryDto {
            name: self.name,
            description: self.description,
            icon: self.icon,
        }
    }
}

/// Multipart form for creating or updating a channel
#[derive(Debug, Default, Validate)]
pub struct ChannelForm {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: Option<String>,

    #[validate(length(max = 100, message = "Topic must be at most 100 characters"))]
    pub topic: Option<String>,

    pub banner: Option<Upload>,
    pub icon: Option<Upload>,
}

impl ChannelForm {
    pub fn into_create(self) -> Result<CreateChannelDto, AppError> {
        Ok(CreateChannelDto {
            name: required(self.name, "name")?,
            topic: required(self.topic, "topic")?,
            banner: self.banner,
            icon: self.icon,
        })
    }

    pub fn into_update(self) -> UpdateChannelDto {
        UpdateChannelDto {
            name: self.name,
            topic: self.topic,
            banner: self.banner,
            icon: self.icon,
        }
    }
}

fn required(value: Option<String>, field: &str) -> Result<String, AppError> {
    value.ok_or_else(|| AppError::Validation(format!("{}: This field is required.", field)))
}
