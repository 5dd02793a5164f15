//! 聊天指令接口
//!
//! POST /chat - 解析一条文本指令并作用于自选股列表

use actix_web::{web, HttpResponse, Result};
use crate::models::{ApiResponse, ChatRequest};
use crate::services::chat_service;
use crate::state::AppState;

pub async fn chat(
    state: web::Data<AppState>,
    body: web::Json<ChatRequest>,
) -> Result<HttpResponse> {
    let mut stocks = state.stocks.lock().await;
    let response = chat_service::interpret(&body.message, &mut stocks);
    Ok(HttpResponse::Ok().json(ApiResponse::success(response)))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/chat", web::post().to(chat));
}

#[cfg(test)]
mod tests {
    use crate::handlers::test_support::test_state;
    use crate::models::{ApiResponse, ChatResponse, Stock};
    use actix_web::{test, App};
    use serde_json::json;

    #[actix_web::test]
    async fn test_chat_shares_store_with_crud() {
        let state = test_state();
        let app = test::init_service(
            App::new().app_data(state.clone()).configure(crate::handlers::config),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/v1/chat")
            .set_json(json!({ "message": "add AAPL Apple Inc 195.3" }))
            .to_request();
        let resp: ApiResponse<ChatResponse> = test::call_and_read_body_json(&app, req).await;
        let chat = resp.data.unwrap();
        assert_eq!(chat.reply, "Added AAPL (Apple Inc) at 195.3.");
        assert_eq!(chat.stocks, vec![Stock::new("AAPL", "Apple Inc", 195.3)]);

        let req = test::TestRequest::get().uri("/api/v1/stocks").to_request();
        let resp: ApiResponse<Vec<Stock>> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(resp.data, Some(chat.stocks));
    }

    #[actix_web::test]
    async fn test_chat_unknown_command() {
        let app = test::init_service(
            App::new().app_data(test_state()).configure(crate::handlers::config),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/v1/chat")
            .set_json(json!({ "message": "sell everything" }))
            .to_request();
        let resp: ApiResponse<ChatResponse> = test::call_and_read_body_json(&app, req).await;
        let chat = resp.data.unwrap();
        assert!(chat.reply.starts_with("I support:"));
        assert!(chat.stocks.is_empty());
    }
}
