//! Product listing pages.
//!
//! Every page goes through [`render_listing`]: one filtered query plus the
//! navigation data, rendered into the shared template.

use askama::Template;
use axum::extract::{Path, Query, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use gs25_core::listing::{non_empty, ProductFilter, SortField, SortOrder};
use gs25_db::repositories::{EventProductRepo, EventTypeRepo};
use serde::Deserialize;

use crate::error::AppResult;
use crate::pages::ProductsPage;
use crate::state::AppState;

/// `?keyword=` for `/search`.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub keyword: Option<String>,
}

/// Query string for `/filter`. Blank values mean "no filter".
#[derive(Debug, Default, Deserialize)]
pub struct FilterParams {
    pub promotion_type: Option<String>,
    pub category: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

impl From<FilterParams> for ProductFilter {
    fn from(params: FilterParams) -> Self {
        ProductFilter {
            promotion: params.promotion_type.and_then(non_empty),
            category: params.category.and_then(non_empty),
            keyword: None,
            sort: SortField::parse_or_default(params.sort_by.as_deref()),
            order: SortOrder::parse_or_default(params.sort_order.as_deref()),
        }
    }
}

/// GET /
pub async fn index(State(state): State<AppState>) -> AppResult<Html<String>> {
    render_listing(&state, ProductFilter::all()).await
}

/// GET /products/{promotion}
pub async fn by_promotion(
    State(state): State<AppState>,
    Path(promotion): Path<String>,
) -> AppResult<Html<String>> {
    render_listing(&state, ProductFilter::by_promotion(promotion)).await
}

/// GET /category/{category}
///
/// Matches the event type's display name or its code.
pub async fn by_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> AppResult<Html<String>> {
    render_listing(&state, ProductFilter::by_category(category)).await
}

/// GET /search?keyword=
///
/// A missing or blank keyword redirects to the full listing.
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Response> {
    match params.keyword.and_then(non_empty) {
        Some(keyword) => Ok(render_listing(&state, ProductFilter::by_keyword(keyword))
            .await?
            .into_response()),
        None => Ok(Redirect::to("/").into_response()),
    }
}

/// GET /filter?promotion_type=&category=&sort_by=&sort_order=
pub async fn filter(
    State(state): State<AppState>,
    Query(params): Query<FilterParams>,
) -> AppResult<Html<String>> {
    render_listing(&state, params.into()).await
}

async fn render_listing(state: &AppState, filter: ProductFilter) -> AppResult<Html<String>> {
    let products = EventProductRepo::list(&state.pool, &filter).await?;
    let promotions = EventProductRepo::promotion_types(&state.pool).await?;
    let event_types = EventTypeRepo::list(&state.pool).await?;

    tracing::debug!(
        promotion = ?filter.promotion,
        category = ?filter.category,
        keyword = ?filter.keyword,
        sort = filter.sort.as_str(),
        order = filter.order.as_sql(),
        count = products.len(),
        "Listing products",
    );

    let page = ProductsPage::new(&filter, products, promotions, event_types);
    Ok(Html(page.render()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_filter_values_are_ignored() {
        let filter: ProductFilter = FilterParams {
            promotion_type: Some("".into()),
            category: Some("  ".into()),
            sort_by: Some("price; DROP TABLE event_products".into()),
            sort_order: Some("sideways".into()),
        }
        .into();

        assert_eq!(filter, ProductFilter::all());
    }

    #[test]
    fn filter_params_map_to_filter() {
        let filter: ProductFilter = FilterParams {
            promotion_type: Some("2+1".into()),
            category: Some("TWO_TO_ONE".into()),
            sort_by: Some("price".into()),
            sort_order: Some("asc".into()),
        }
        .into();

        assert_eq!(filter.promotion.as_deref(), Some("2+1"));
        assert_eq!(filter.category.as_deref(), Some("TWO_TO_ONE"));
        assert_eq!(filter.sort, SortField::Price);
        assert_eq!(filter.order, SortOrder::Asc);
    }
}
