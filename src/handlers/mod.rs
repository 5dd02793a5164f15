pub mod stock;
pub mod chat;
pub mod earnings;
pub mod health;

use actix_web::web;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(health::config)
            .configure(stock::config)
            .configure(chat::config)
            .configure(earnings::config)
    );
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use actix_web::web;
    use anyhow::{anyhow, Result};
    use async_trait::async_trait;
    use serde_json::json;

    use crate::models::RawEarningsRow;
    use crate::services::earnings::EarningsSource;
    use crate::state::AppState;

    /// 测试用数据源：AAPL 返回固定数据，FAIL 返回错误，其余为空
    pub struct StubSource;

    #[async_trait]
    impl EarningsSource for StubSource {
        async fn query(&self, symbol: &str, _limit: usize) -> Result<Vec<RawEarningsRow>> {
            match symbol {
                "AAPL" => Ok(vec![
                    RawEarningsRow::new("2999-01-30").with_field("EPS Estimate", json!(2.5)),
                    RawEarningsRow::new("2001-01-30")
                        .with_field("EPS Estimate", json!(0.1))
                        .with_field("Reported EPS", json!(0.2))
                        .with_field("Surprise(%)", json!(100.0)),
                ]),
                "FAIL" => Err(anyhow!("模拟数据源故障")),
                _ => Ok(Vec::new()),
            }
        }
    }

    pub fn test_state() -> web::Data<AppState> {
        web::Data::new(AppState::new(Arc::new(StubSource)))
    }
}
