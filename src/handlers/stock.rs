//! 自选股列表增删改查接口
//!
//! - GET /stocks - 获取股票列表
//! - POST /stocks - 添加股票（代码已存在时返回 400）
//! - PUT /stocks/{symbol} - 更新股票（不存在时返回 404）
//! - DELETE /stocks/{symbol} - 删除股票（不存在时返回 404）

use actix_web::{web, HttpResponse, Result};
use crate::models::{ApiResponse, DeleteStatus, Stock};
use crate::services::store::canonical_symbol;
use crate::state::AppState;

pub async fn list_stocks(state: web::Data<AppState>) -> Result<HttpResponse> {
    let stocks = state.stocks.lock().await.snapshot();
    Ok(HttpResponse::Ok().json(ApiResponse::success(stocks)))
}

pub async fn add_stock(
    state: web::Data<AppState>,
    body: web::Json<Stock>,
) -> Result<HttpResponse> {
    let mut stock = body.into_inner();
    stock.symbol = canonical_symbol(&stock.symbol);

    let mut stocks = state.stocks.lock().await;
    if stocks.contains(&stock.symbol) {
        let response = ApiResponse::<Stock>::error("Stock already exists");
        return Ok(HttpResponse::BadRequest().json(response));
    }

    log::info!("添加股票 {}", stock.symbol);
    stocks.upsert(stock.clone());
    Ok(HttpResponse::Ok().json(ApiResponse::success(stock)))
}

pub async fn update_stock(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<Stock>,
) -> Result<HttpResponse> {
    let symbol = canonical_symbol(&path.into_inner());

    let mut stocks = state.stocks.lock().await;
    if !stocks.contains(&symbol) {
        let response = ApiResponse::<Stock>::error("Stock not found");
        return Ok(HttpResponse::NotFound().json(response));
    }

    // 以路径中的代码为准
    let updated = Stock {
        symbol,
        ..body.into_inner()
    };
    log::info!("更新股票 {}", updated.symbol);
    stocks.upsert(updated.clone());
    Ok(HttpResponse::Ok().json(ApiResponse::success(updated)))
}

pub async fn delete_stock(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let symbol = canonical_symbol(&path.into_inner());

    match state.stocks.lock().await.remove(&symbol) {
        Some(_) => {
            log::info!("删除股票 {}", symbol);
            Ok(HttpResponse::Ok().json(ApiResponse::success(DeleteStatus::ok())))
        }
        None => {
            let response = ApiResponse::<DeleteStatus>::error("Stock not found");
            Ok(HttpResponse::NotFound().json(response))
        }
    }
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/stocks")
            .route("", web::get().to(list_stocks))
            .route("", web::post().to(add_stock))
            .route("/{symbol}", web::put().to(update_stock))
            .route("/{symbol}", web::delete().to(delete_stock))
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::test_support::test_state;
    use actix_web::{http::StatusCode, test, App};
    use serde_json::json;

    macro_rules! app {
        ($state:expr) => {
            test::init_service(App::new().app_data($state.clone()).configure(crate::handlers::config)).await
        };
    }

    #[actix_web::test]
    async fn test_add_then_list() {
        let state = test_state();
        let app = app!(state);

        let req = test::TestRequest::post()
            .uri("/api/v1/stocks")
            .set_json(json!({ "symbol": "aapl", "name": "Apple", "price": 195.3 }))
            .to_request();
        let resp: ApiResponse<Stock> = test::call_and_read_body_json(&app, req).await;
        assert!(resp.success);
        assert_eq!(resp.data.map(|s| s.symbol), Some("AAPL".to_string()));

        let req = test::TestRequest::get().uri("/api/v1/stocks").to_request();
        let resp: ApiResponse<Vec<Stock>> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(resp.data, Some(vec![Stock::new("AAPL", "Apple", 195.3)]));
    }

    #[actix_web::test]
    async fn test_add_duplicate_is_rejected() {
        let state = test_state();
        state.stocks.lock().await.upsert(Stock::new("AAPL", "Apple", 195.3));
        let app = app!(state);

        let req = test::TestRequest::post()
            .uri("/api/v1/stocks")
            .set_json(json!({ "symbol": "AAPL", "name": "Other", "price": 1.0 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(state.stocks.lock().await.get("AAPL").map(|s| s.name.clone()), Some("Apple".to_string()));
    }

    #[actix_web::test]
    async fn test_update_uses_path_symbol() {
        let state = test_state();
        state.stocks.lock().await.upsert(Stock::new("MSFT", "Microsoft", 410.0));
        let app = app!(state);

        let req = test::TestRequest::put()
            .uri("/api/v1/stocks/msft")
            .set_json(json!({ "symbol": "XXX", "name": "Microsoft Corp", "price": 415.5, "notes": "cloud" }))
            .to_request();
        let resp: ApiResponse<Stock> = test::call_and_read_body_json(&app, req).await;
        let updated = resp.data.unwrap();
        assert_eq!(updated.symbol, "MSFT");
        assert_eq!(updated.notes.as_deref(), Some("cloud"));
        assert_eq!(state.stocks.lock().await.snapshot(), vec![updated]);

        let req = test::TestRequest::put()
            .uri("/api/v1/stocks/TSLA")
            .set_json(json!({ "symbol": "TSLA", "name": "Tesla", "price": 1.0 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_delete() {
        let state = test_state();
        state.stocks.lock().await.upsert(Stock::new("AAPL", "Apple", 195.3));
        let app = app!(state);

        let req = test::TestRequest::delete().uri("/api/v1/stocks/aapl").to_request();
        let resp: ApiResponse<DeleteStatus> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(resp.data.map(|s| s.status), Some("ok".to_string()));

        let req = test::TestRequest::delete().uri("/api/v1/stocks/aapl").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
