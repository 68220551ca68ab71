use axum::http::StatusCode;
use serde_json::Value;

use colorbook_core::{ApiResponse, Paginated};

use crate::handlers::categories::CategoryDto;
use crate::handlers::keywords::KeywordDto;
use crate::handlers::pages::{PageCountersDto, PageDto};
use crate::handlers::theme_parks::ThemeParkDto;

use super::test_utils::spawn_server;

#[tokio::test]
async fn categories_listing_returns_active_tiles_in_order() {
    let server = spawn_server();
    let response = server.get("/api/v1/categories").await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: ApiResponse<Vec<CategoryDto>> = response.json();
    assert!(body.success);
    let categories = body.data.expect("categories payload");
    assert_eq!(categories.len(), 5);
    assert_eq!(categories[0].name, "Animals");
    assert!(!categories[0].color.is_empty());
}

#[tokio::test]
async fn keywords_listing_excludes_inactive_and_out_of_window() {
    let server = spawn_server();
    let body: ApiResponse<Vec<KeywordDto>> = server.get("/api/v1/keywords").await.json();
    let keywords = body.data.expect("keywords payload");

    let texts: Vec<&str> = keywords.iter().map(|k| k.keyword.as_str()).collect();
    assert!(texts.contains(&"dinosaur"));
    assert!(texts.contains(&"小狗"));
    // Flagged off and window-expired entries stay hidden.
    assert!(!texts.contains(&"汽车"));
    assert!(!texts.contains(&"pumpkin"));
}

#[tokio::test]
async fn keyword_click_accumulates_case_insensitively() {
    let server = spawn_server();

    let before: ApiResponse<Vec<KeywordDto>> = server.get("/api/v1/keywords").await.json();
    let count_of = |body: &ApiResponse<Vec<KeywordDto>>, text: &str| {
        body.data
            .as_ref()
            .and_then(|list| list.iter().find(|k| k.keyword == text))
            .map(|k| k.click_count)
            .expect("keyword present")
    };
    let initial = count_of(&before, "小狗");

    for raw in ["小狗", " 小狗 "] {
        let response = server
            .post("/api/v1/keywords")
            .json(&serde_json::json!({ "keyword": raw }))
            .await;
        assert_eq!(response.status_code(), StatusCode::OK);
        let body: ApiResponse<()> = response.json();
        assert!(body.success);
    }

    let after: ApiResponse<Vec<KeywordDto>> = server.get("/api/v1/keywords").await.json();
    assert_eq!(count_of(&after, "小狗"), initial + 2);
}

#[tokio::test]
async fn keyword_click_on_unknown_keyword_still_succeeds() {
    let server = spawn_server();
    let response = server
        .post("/api/v1/keywords")
        .json(&serde_json::json!({ "keyword": "no-such-keyword" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: ApiResponse<()> = response.json();
    assert!(body.success);

    // Body with no keyword at all is also acknowledged.
    let response = server.post("/api/v1/keywords").json(&serde_json::json!({})).await;
    assert_eq!(response.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn page_search_matches_term_across_parks() {
    let server = spawn_server();
    let response = server
        .get("/api/v1/pages")
        .add_query_param("q", "t-rex")
        .add_query_param("category", "all")
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: ApiResponse<Paginated<PageDto>> = response.json();
    let page = body.data.expect("page payload");
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].title, "Jurassic Park T-Rex");
    assert_eq!(page.pagination.total_count, 1);
}

#[tokio::test]
async fn page_search_filters_by_exact_category() {
    let server = spawn_server();
    let body: ApiResponse<Paginated<PageDto>> = server
        .get("/api/v1/pages")
        .add_query_param("category", "Animals")
        .await
        .json();
    let page = body.data.expect("page payload");
    assert!(!page.items.is_empty());
    assert!(page.items.iter().all(|p| p.category == "Animals"));
}

#[tokio::test]
async fn page_search_sorts_by_difficulty() {
    let server = spawn_server();
    let body: ApiResponse<Paginated<PageDto>> = server
        .get("/api/v1/pages")
        .add_query_param("sort", "difficulty")
        .await
        .json();
    let ranks: Vec<u8> = body
        .data
        .expect("page payload")
        .items
        .iter()
        .map(|p| p.difficulty.rank())
        .collect();
    assert!(ranks.windows(2).all(|w| w[0] <= w[1]));
}

#[tokio::test]
async fn page_search_hides_inactive_pages() {
    let server = spawn_server();
    let body: ApiResponse<Paginated<PageDto>> = server
        .get("/api/v1/pages")
        .add_query_param("q", "Winter Snowflake")
        .await
        .json();
    assert_eq!(body.data.expect("page payload").pagination.total_count, 0);
}

#[tokio::test]
async fn pagination_bounds_are_rejected_with_400() {
    let server = spawn_server();
    for (key, value) in [("limit", "0"), ("limit", "51"), ("page", "0")] {
        let response = server
            .get("/api/v1/pages")
            .add_query_param(key, value)
            .await;
        assert_eq!(
            response.status_code(),
            StatusCode::BAD_REQUEST,
            "{key}={value}"
        );
        let body: ApiResponse<()> = response.json();
        assert!(!body.success);
        assert!(body.error.is_some());
        assert!(body.data.is_none());
    }
}

#[tokio::test]
async fn page_beyond_total_pages_is_empty_with_correct_metadata() {
    let server = spawn_server();
    let response = server
        .get("/api/v1/pages")
        .add_query_param("page", "3")
        .add_query_param("limit", "20")
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let raw: Value = response.json();
    let pagination = &raw["data"]["pagination"];
    assert_eq!(raw["data"]["items"].as_array().map(Vec::len), Some(0));
    assert_eq!(pagination["totalPages"], 1);
    assert_eq!(pagination["currentPage"], 3);
    assert_eq!(pagination["hasNextPage"], false);
    assert_eq!(pagination["hasPrevPage"], true);
    // Seven of the eight seeded pages are active.
    assert_eq!(pagination["totalCount"], 7);
}

#[tokio::test]
async fn envelope_uses_camel_case_pagination_keys() {
    let server = spawn_server();
    let raw: Value = server
        .get("/api/v1/pages")
        .add_query_param("limit", "3")
        .await
        .json();
    assert_eq!(raw["success"], true);
    let pagination = &raw["data"]["pagination"];
    for key in [
        "currentPage",
        "totalPages",
        "totalCount",
        "hasNextPage",
        "hasPrevPage",
        "limit",
    ] {
        assert!(!pagination[key].is_null(), "missing key {key}");
    }
    assert_eq!(pagination["limit"], 3);
    assert_eq!(pagination["hasNextPage"], true);
}

#[tokio::test]
async fn theme_parks_bare_listing_returns_park_cards() {
    let server = spawn_server();
    let response = server.get("/api/v1/theme-parks").await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: ApiResponse<Vec<ThemeParkDto>> = response.json();
    let parks = body.data.expect("parks payload");
    assert_eq!(parks.len(), 3);
    assert_eq!(parks[0].slug, "disney-world");
    assert_eq!(parks[0].page_count, 3);
}

#[tokio::test]
async fn theme_parks_search_mode_groups_pages_by_park() {
    let server = spawn_server();
    let body: ApiResponse<Paginated<PageDto>> = server
        .get("/api/v1/theme-parks")
        .add_query_param("theme", "disney-world")
        .await
        .json();
    let page = body.data.expect("pages payload");
    assert_eq!(page.pagination.total_count, 3);
    assert!(page
        .items
        .iter()
        .all(|p| p.park_slug.as_deref() == Some("disney-world")));
}

#[tokio::test]
async fn page_detail_returns_404_for_inactive_or_missing() {
    let server = spawn_server();

    let ok = server.get("/api/v1/pages/4").await;
    assert_eq!(ok.status_code(), StatusCode::OK);
    let body: ApiResponse<PageDto> = ok.json();
    assert_eq!(body.data.expect("page payload").title, "Jurassic Park T-Rex");

    // Seeded page 8 exists but is inactive.
    let inactive = server.get("/api/v1/pages/8").await;
    assert_eq!(inactive.status_code(), StatusCode::NOT_FOUND);

    let missing = server.get("/api/v1/pages/999").await;
    assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn untagged_page_displays_other_category() {
    let server = spawn_server();
    let body: ApiResponse<PageDto> = server.get("/api/v1/pages/5").await.json();
    assert_eq!(body.data.expect("page payload").category, "Other");
}

#[tokio::test]
async fn like_unlike_and_download_counters_move_as_expected() {
    let server = spawn_server();
    let start: ApiResponse<PageDto> = server.get("/api/v1/pages/1").await.json();
    let start = start.data.expect("page payload");

    let liked: ApiResponse<PageCountersDto> = server.post("/api/v1/pages/1/like").await.json();
    assert_eq!(liked.data.expect("counters").likes, start.likes + 1);

    let unliked: ApiResponse<PageCountersDto> =
        server.post("/api/v1/pages/1/unlike").await.json();
    assert_eq!(unliked.data.expect("counters").likes, start.likes);

    let downloaded: ApiResponse<PageCountersDto> =
        server.post("/api/v1/pages/1/download").await.json();
    assert_eq!(
        downloaded.data.expect("counters").downloads,
        start.downloads + 1
    );

    let missing = server.post("/api/v1/pages/999/like").await;
    assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn identical_queries_return_identical_pages() {
    let server = spawn_server();
    let first: Value = server
        .get("/api/v1/pages")
        .add_query_param("sort", "title")
        .await
        .json();
    let second: Value = server
        .get("/api/v1/pages")
        .add_query_param("sort", "title")
        .await
        .json();
    assert_eq!(first["data"]["items"], second["data"]["items"]);
}
