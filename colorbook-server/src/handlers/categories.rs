use axum::{
    extract::{Path, Query, State},
    Json,
};

use colorbook_core::catalog::{CreateCategoryRequest, UpdateCategoryRequest};
use colorbook_core::{ApiResponse, Paginated};
use colorbook_model::{Category, ItemId};

use super::{build_spec, ListParams, ADMIN_LIST_LIMIT};
use crate::errors::AppResult;
use crate::AppState;

/// Public category tile as rendered on the home page.
#[derive(Debug, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDto {
    pub id: ItemId,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub color: String,
}

impl From<Category> for CategoryDto {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
            slug: category.slug,
            description: category.description,
            color: category.color,
        }
    }
}

/// List active categories for the public site.
pub async fn list_categories(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<CategoryDto>>>> {
    let categories: Vec<CategoryDto> = state
        .categories
        .list_active()
        .into_iter()
        .map(CategoryDto::from)
        .collect();
    Ok(Json(ApiResponse::success(categories)))
}

/// Admin search over all categories, inactive ones included.
pub async fn admin_list_categories(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<ApiResponse<Paginated<Category>>>> {
    let spec = build_spec(&params, None, ADMIN_LIST_LIMIT)?;
    Ok(Json(ApiResponse::success(state.categories.search(&spec))))
}

pub async fn admin_create_category(
    State(state): State<AppState>,
    Json(request): Json<CreateCategoryRequest>,
) -> AppResult<Json<ApiResponse<Category>>> {
    let category = state.categories.create(request)?;
    Ok(Json(ApiResponse::success(category)))
}

pub async fn admin_update_category(
    State(state): State<AppState>,
    Path(id): Path<ItemId>,
    Json(request): Json<UpdateCategoryRequest>,
) -> AppResult<Json<ApiResponse<Category>>> {
    let category = state.categories.update(id, request)?;
    Ok(Json(ApiResponse::success(category)))
}

pub async fn admin_delete_category(
    State(state): State<AppState>,
    Path(id): Path<ItemId>,
) -> AppResult<Json<ApiResponse<Category>>> {
    let removed = state.categories.delete(id)?;
    Ok(Json(ApiResponse::success(removed)))
}
