use axum::routing::get;
use axum::Router;

use crate::handlers::products;
use crate::state::AppState;

/// Mount the HTML listing pages.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/products/{promotion}", get(products::by_promotion))
        .route("/category/{category}", get(products::by_category))
        .route("/search", get(products::search))
        .route("/filter", get(products::filter))
}
