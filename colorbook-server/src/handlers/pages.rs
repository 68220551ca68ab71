use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use chrono::{DateTime, Utc};
use tracing::info;

use colorbook_core::catalog::{CreatePageRequest, UpdatePageRequest};
use colorbook_core::query::StatusFilter;
use colorbook_core::{ApiResponse, Paginated};
use colorbook_model::{ColoringPage, Difficulty, ItemId};

use super::{build_spec, ListParams, ADMIN_LIST_LIMIT, PUBLIC_LIST_LIMIT};
use crate::auth::AdminIdentity;
use crate::errors::{AppError, AppResult};
use crate::AppState;

/// Public projection of a coloring page. The category label is normalized
/// here ("Other" for untagged pages); the stored record keeps its empty tag.
#[derive(Debug, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageDto {
    pub id: ItemId,
    pub title: String,
    pub description: String,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub park_slug: Option<String>,
    pub difficulty: Difficulty,
    pub image_url: String,
    pub likes: u64,
    pub downloads: u64,
    pub created_at: DateTime<Utc>,
}

impl From<ColoringPage> for PageDto {
    fn from(page: ColoringPage) -> Self {
        let category = page.category_label().to_string();
        Self {
            id: page.id,
            title: page.title,
            description: page.description,
            category,
            park_slug: page.park_slug,
            difficulty: page.difficulty,
            image_url: page.image_url,
            likes: page.likes,
            downloads: page.downloads,
            created_at: page.created_at,
        }
    }
}

/// Counter snapshot returned by the interaction endpoints.
#[derive(Debug, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageCountersDto {
    pub id: ItemId,
    pub likes: u64,
    pub downloads: u64,
}

impl From<ColoringPage> for PageCountersDto {
    fn from(page: ColoringPage) -> Self {
        Self {
            id: page.id,
            likes: page.likes,
            downloads: page.downloads,
        }
    }
}

/// Public page search, grouped by category. Only active pages are visible.
pub async fn search_pages(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<ApiResponse<Paginated<PageDto>>>> {
    let mut spec = build_spec(&params, params.category.as_deref(), PUBLIC_LIST_LIMIT)?;
    spec.status = StatusFilter::Active;
    let page = state.pages.search(&spec).map(PageDto::from);
    Ok(Json(ApiResponse::success(page)))
}

/// Page detail. Inactive pages are invisible to the public site.
pub async fn get_page(
    State(state): State<AppState>,
    Path(id): Path<ItemId>,
) -> AppResult<Json<ApiResponse<PageDto>>> {
    let page = state.pages.get(id)?;
    if !page.is_active {
        return Err(AppError::not_found("Page not found"));
    }
    Ok(Json(ApiResponse::success(PageDto::from(page))))
}

pub async fn like_page(
    State(state): State<AppState>,
    Path(id): Path<ItemId>,
) -> AppResult<Json<ApiResponse<PageCountersDto>>> {
    let page = state.pages.like(id)?;
    Ok(Json(ApiResponse::success(PageCountersDto::from(page))))
}

pub async fn unlike_page(
    State(state): State<AppState>,
    Path(id): Path<ItemId>,
) -> AppResult<Json<ApiResponse<PageCountersDto>>> {
    let page = state.pages.unlike(id)?;
    Ok(Json(ApiResponse::success(PageCountersDto::from(page))))
}

pub async fn download_page(
    State(state): State<AppState>,
    Path(id): Path<ItemId>,
) -> AppResult<Json<ApiResponse<PageCountersDto>>> {
    let page = state.pages.record_download(id)?;
    Ok(Json(ApiResponse::success(PageCountersDto::from(page))))
}

/// Admin search over all pages, inactive ones included, full records.
pub async fn admin_list_pages(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<ApiResponse<Paginated<ColoringPage>>>> {
    let spec = build_spec(&params, params.category.as_deref(), ADMIN_LIST_LIMIT)?;
    Ok(Json(ApiResponse::success(state.pages.search(&spec))))
}

pub async fn admin_create_page(
    State(state): State<AppState>,
    Json(request): Json<CreatePageRequest>,
) -> AppResult<Json<ApiResponse<ColoringPage>>> {
    let page = state.pages.create(request)?;
    Ok(Json(ApiResponse::success(page)))
}

pub async fn admin_update_page(
    State(state): State<AppState>,
    Path(id): Path<ItemId>,
    Json(request): Json<UpdatePageRequest>,
) -> AppResult<Json<ApiResponse<ColoringPage>>> {
    let page = state.pages.update(id, request)?;
    Ok(Json(ApiResponse::success(page)))
}

pub async fn admin_delete_page(
    State(state): State<AppState>,
    Extension(admin): Extension<AdminIdentity>,
    Path(id): Path<ItemId>,
) -> AppResult<Json<ApiResponse<ColoringPage>>> {
    let removed = state.pages.delete(id)?;
    info!(admin = %admin.subject, page = %removed.title, "page deleted");
    Ok(Json(ApiResponse::success(removed)))
}
