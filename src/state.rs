//! 应用共享状态
//!
//! 进程启动时创建，通过 web::Data 注入到各处理器

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::services::earnings::EarningsSource;
use crate::services::store::StockStore;

pub struct AppState {
    /// 自选股列表
    pub stocks: Mutex<StockStore>,
    /// 财报数据源
    pub earnings: Arc<dyn EarningsSource>,
}

impl AppState {
    pub fn new(earnings: Arc<dyn EarningsSource>) -> Self {
        Self {
            stocks: Mutex::new(StockStore::new()),
            earnings,
        }
    }
}
