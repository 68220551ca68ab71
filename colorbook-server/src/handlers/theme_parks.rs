use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    Extension, Json,
};
use tracing::info;

use colorbook_core::catalog::{CreateThemeParkRequest, UpdateThemeParkRequest};
use colorbook_core::query::StatusFilter;
use colorbook_core::{ApiResponse, Paginated};
use colorbook_model::{ItemId, ThemePark};

use super::pages::PageDto;
use super::{build_spec, ListParams, ADMIN_LIST_LIMIT, PARK_LIST_LIMIT};
use crate::auth::AdminIdentity;
use crate::errors::AppResult;
use crate::AppState;

/// Public theme-park card.
#[derive(Debug, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeParkDto {
    pub id: ItemId,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub page_count: u32,
}

impl From<ThemePark> for ThemeParkDto {
    fn from(park: ThemePark) -> Self {
        Self {
            id: park.id,
            name: park.name,
            slug: park.slug,
            description: park.description,
            page_count: park.page_count,
        }
    }
}

/// The public theme-parks endpoint has two modes: with no query parameters
/// it lists the parks themselves; with any search parameter it becomes a
/// paginated search over park-associated coloring pages, where `theme`
/// selects a park by slug (`"all"` for every park).
pub async fn theme_parks_index(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<Response> {
    if params.is_bare() {
        let parks: Vec<ThemeParkDto> = state
            .parks
            .list_active()
            .into_iter()
            .map(ThemeParkDto::from)
            .collect();
        return Ok(Json(ApiResponse::success(parks)).into_response());
    }

    let mut spec = build_spec(&params, params.theme.as_deref(), PARK_LIST_LIMIT)?;
    spec.status = StatusFilter::Active;
    let page = state.parks.search_pages(&spec).map(PageDto::from);
    Ok(Json(ApiResponse::success(page)).into_response())
}

/// Admin search over the parks themselves.
pub async fn admin_list_theme_parks(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<ApiResponse<Paginated<ThemePark>>>> {
    let spec = build_spec(&params, params.theme.as_deref(), ADMIN_LIST_LIMIT)?;
    Ok(Json(ApiResponse::success(state.parks.search(&spec))))
}

pub async fn admin_create_theme_park(
    State(state): State<AppState>,
    Json(request): Json<CreateThemeParkRequest>,
) -> AppResult<Json<ApiResponse<ThemePark>>> {
    let park = state.parks.create(request)?;
    Ok(Json(ApiResponse::success(park)))
}

pub async fn admin_update_theme_park(
    State(state): State<AppState>,
    Path(id): Path<ItemId>,
    Json(request): Json<UpdateThemeParkRequest>,
) -> AppResult<Json<ApiResponse<ThemePark>>> {
    let park = state.parks.update(id, request)?;
    Ok(Json(ApiResponse::success(park)))
}

pub async fn admin_delete_theme_park(
    State(state): State<AppState>,
    Extension(admin): Extension<AdminIdentity>,
    Path(id): Path<ItemId>,
) -> AppResult<Json<ApiResponse<ThemePark>>> {
    let removed = state.parks.delete(id)?;
    info!(admin = %admin.subject, park = %removed.slug, "theme park deleted");
    Ok(Json(ApiResponse::success(removed)))
}
