use actix_web::{web, HttpResponse, Result};
use serde::Serialize;

use crate::models::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    /// 当前自选股数量
    pub stocks: usize,
}

pub async fn health_check(state: web::Data<AppState>) -> Result<HttpResponse> {
    let stocks = state.stocks.lock().await.len();
    let response = ApiResponse::success_with_message(
        HealthStatus { status: "ok", stocks },
        "Service is healthy",
    );
    Ok(HttpResponse::Ok().json(response))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check));
}

#[cfg(test)]
mod tests {
    use crate::handlers::test_support::test_state;
    use actix_web::{test, App};

    #[actix_web::test]
    async fn test_health_check() {
        let app = test::init_service(
            App::new().app_data(test_state()).configure(crate::handlers::config),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/v1/health").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["status"], "ok");
        assert_eq!(body["data"]["stocks"], 0);
    }
}
