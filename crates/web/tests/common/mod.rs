use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use gs25_db::models::event_product::UpsertProduct;
use gs25_db::repositories::{EventProductRepo, EventTypeRepo};
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use gs25_web::config::ServerConfig;
use gs25_web::router::build_app_router;
use gs25_web::state::AppState;

pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        request_timeout_secs: 30,
    }
}

/// The production router over `pool`.
pub fn build_test_app(pool: PgPool) -> Router {
    build_app_router(AppState {
        pool,
        config: Arc::new(test_config()),
    })
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

#[allow(dead_code)]
pub async fn body_string(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[allow(dead_code)]
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Seed event types and four products, inserted in this order:
/// 삼각김밥 (1+1, 1300), 바나나우유 (2+1, 1700), 컵라면 (덤증정, 1200, gift),
/// 100%오렌지 (1+1, 2500).
#[allow(dead_code)]
pub async fn seed_products(pool: &PgPool) {
    EventTypeRepo::seed_defaults(pool).await.unwrap();
    let ids = EventTypeRepo::id_map(pool).await.unwrap();

    let rows = [
        ("삼각김밥", 1300, "1+1", "ONE_TO_ONE", None),
        ("바나나우유", 1700, "2+1", "TWO_TO_ONE", None),
        ("컵라면", 1200, "덤증정", "GIFT", Some("생수 500ml")),
        ("100%오렌지", 2500, "1+1", "ONE_TO_ONE", None),
    ];
    for (name, price, promotion, code, gift) in rows {
        EventProductRepo::upsert(
            pool,
            &UpsertProduct {
                product_name: name.to_string(),
                price,
                image_url: Some(format!("https://image.example/{price}.jpg")),
                promotion_type: promotion.to_string(),
                event_type_id: Some(ids[code]),
                gift_product: gift.map(String::from),
            },
        )
        .await
        .unwrap();
    }
}
