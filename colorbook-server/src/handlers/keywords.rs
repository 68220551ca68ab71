use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use colorbook_core::catalog::{CreateKeywordRequest, UpdateKeywordRequest};
use colorbook_core::{ApiResponse, Paginated};
use colorbook_model::{ItemId, Keyword};

use super::{build_spec, ListParams, ADMIN_LIST_LIMIT};
use crate::errors::AppResult;
use crate::AppState;

/// Public keyword chip: just the text and its popularity.
#[derive(Debug, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordDto {
    pub keyword: String,
    pub click_count: u64,
}

impl From<Keyword> for KeywordDto {
    fn from(keyword: Keyword) -> Self {
        Self {
            keyword: keyword.keyword,
            click_count: keyword.click_count,
        }
    }
}

/// Currently-active keywords in display order, for the home page.
pub async fn list_keywords(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<KeywordDto>>>> {
    let keywords: Vec<KeywordDto> = state
        .keywords
        .list_currently_active()
        .into_iter()
        .map(KeywordDto::from)
        .collect();
    Ok(Json(ApiResponse::success(keywords)))
}

#[derive(Debug, Default, Deserialize)]
pub struct ClickRequest {
    #[serde(default)]
    pub keyword: Option<String>,
}

/// Count a click on a promoted keyword. Always acknowledges success; an
/// unknown or inactive keyword is simply not counted.
pub async fn record_keyword_click(
    State(state): State<AppState>,
    Json(request): Json<ClickRequest>,
) -> Json<ApiResponse<()>> {
    if let Some(keyword) = request.keyword.as_deref() {
        state.keywords.record_click(keyword);
    }
    Json(ApiResponse::ok().with_message("ok"))
}

pub async fn admin_list_keywords(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<ApiResponse<Paginated<Keyword>>>> {
    let spec = build_spec(&params, None, ADMIN_LIST_LIMIT)?;
    Ok(Json(ApiResponse::success(state.keywords.search(&spec))))
}

pub async fn admin_create_keyword(
    State(state): State<AppState>,
    Json(request): Json<CreateKeywordRequest>,
) -> AppResult<Json<ApiResponse<Keyword>>> {
    let keyword = state.keywords.create(request)?;
    Ok(Json(ApiResponse::success(keyword)))
}

pub async fn admin_update_keyword(
    State(state): State<AppState>,
    Path(id): Path<ItemId>,
    Json(request): Json<UpdateKeywordRequest>,
) -> AppResult<Json<ApiResponse<Keyword>>> {
    let keyword = state.keywords.update(id, request)?;
    Ok(Json(ApiResponse::success(keyword)))
}

pub async fn admin_delete_keyword(
    State(state): State<AppState>,
    Path(id): Path<ItemId>,
) -> AppResult<Json<ApiResponse<Keyword>>> {
    let removed = state.keywords.delete(id)?;
    Ok(Json(ApiResponse::success(removed)))
}
