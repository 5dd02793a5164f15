//! 财报日历接口
//!
//! - GET /earnings?symbols=AAPL,MSFT&num=3
//! - POST /earnings，请求体 {"symbols": "AAPL" 或 ["AAPL", "MSFT"], "num": 3}
//!
//! 单只股票查询失败时返回空字段条目，接口本身不报错

use actix_web::{web, HttpResponse, Result};
use crate::models::{ApiResponse, EarningsQuery, EarningsRequest};
use crate::services::earnings::get_earnings_calendar;
use crate::state::AppState;

pub async fn get_earnings(
    state: web::Data<AppState>,
    query: web::Query<EarningsQuery>,
) -> Result<HttpResponse> {
    let query = query.into_inner();
    let symbols: Vec<String> = query.symbols.split(',').map(str::to_string).collect();

    let entries = get_earnings_calendar(state.earnings.as_ref(), symbols, query.num).await;
    Ok(HttpResponse::Ok().json(ApiResponse::success(entries)))
}

pub async fn post_earnings(
    state: web::Data<AppState>,
    body: web::Json<EarningsRequest>,
) -> Result<HttpResponse> {
    let EarningsRequest { symbols, num } = body.into_inner();

    let entries = get_earnings_calendar(state.earnings.as_ref(), symbols, num).await;
    Ok(HttpResponse::Ok().json(ApiResponse::success(entries)))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/earnings")
            .route(web::get().to(get_earnings))
            .route(web::post().to(post_earnings))
    );
}
