use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    auth::{self, require_admin},
    handlers::{categories, keywords, pages, proxy, theme_parks},
    AppState,
};

/// Assemble the full application router under `/api/v1`.
pub fn create_router(state: AppState) -> Router {
    let admin_routes = Router::new()
        .route(
            "/admin/categories",
            get(categories::admin_list_categories).post(categories::admin_create_category),
        )
        .route(
            "/admin/categories/{id}",
            put(categories::admin_update_category).delete(categories::admin_delete_category),
        )
        .route(
            "/admin/theme-parks",
            get(theme_parks::admin_list_theme_parks).post(theme_parks::admin_create_theme_park),
        )
        .route(
            "/admin/theme-parks/{id}",
            put(theme_parks::admin_update_theme_park).delete(theme_parks::admin_delete_theme_park),
        )
        .route(
            "/admin/keywords",
            get(keywords::admin_list_keywords).post(keywords::admin_create_keyword),
        )
        .route(
            "/admin/keywords/{id}",
            put(keywords::admin_update_keyword).delete(keywords::admin_delete_keyword),
        )
        .route(
            "/admin/pages",
            get(pages::admin_list_pages).post(pages::admin_create_page),
        )
        .route(
            "/admin/pages/{id}",
            put(pages::admin_update_page).delete(pages::admin_delete_page),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    let api = Router::new()
        // Public catalog endpoints
        .route("/categories", get(categories::list_categories))
        .route(
            "/keywords",
            get(keywords::list_keywords).post(keywords::record_keyword_click),
        )
        .route("/theme-parks", get(theme_parks::theme_parks_index))
        .route("/pages", get(pages::search_pages))
        .route("/pages/{id}", get(pages::get_page))
        .route("/pages/{id}/like", post(pages::like_page))
        .route("/pages/{id}/unlike", post(pages::unlike_page))
        .route("/pages/{id}/download", post(pages::download_page))
        .route("/proxy-image", get(proxy::proxy_image))
        // Admin authentication, then the guarded admin surface
        .route("/admin/login", post(auth::handlers::login))
        .merge(admin_routes);

    Router::new()
        .nest("/api/v1", api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
