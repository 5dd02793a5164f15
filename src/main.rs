//! Fincat 后端服务
//!
//! 提供自选股列表的 RESTful API、规则型聊天指令以及财报日历查询
//! 财报数据来源：雅虎财经

mod config;     // 配置
mod handlers;   // HTTP 请求处理器
mod models;     // 数据模型定义
mod services;   // 业务逻辑服务
mod state;      // 应用共享状态

use std::sync::Arc;

use actix_web::{web, App, HttpServer, middleware::Logger};
use env_logger::Env;

use crate::config::AppConfig;
use crate::services::earnings::YahooEarningsSource;
use crate::state::AppState;

/// 应用程序入口
///
/// 加载配置后启动 HTTP 服务器，默认监听 0.0.0.0:8080
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let (config, config_source) = AppConfig::load();

    // 初始化日志系统，RUST_LOG 优先于配置文件
    env_logger::init_from_env(Env::default().default_filter_or(config.log.level.as_str()));
    config_source.log();

    let earnings = YahooEarningsSource::new(&config.earnings)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()))?;

    // 股票列表与数据源在进程生命周期内共享
    let state = web::Data::new(AppState::new(Arc::new(earnings)));

    let bind_addr = config.bind_addr();
    log::info!("启动 Fincat 后端服务，监听 {}", bind_addr);

    let mut server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())  // 添加请求日志中间件
            .app_data(state.clone())
            .configure(handlers::config)  // 配置路由
    });
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server.bind(bind_addr)?.run().await
}
