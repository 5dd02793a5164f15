//! 财报数据源抽象

use anyhow::Result;
use async_trait::async_trait;

use crate::models::RawEarningsRow;

/// 外部财报数据源
///
/// 返回最多 `limit` 条原始财报行；数据源可能返回空列表或错误，
/// 调用方需要同时容忍两种情况。
#[async_trait]
pub trait EarningsSource: Send + Sync {
    async fn query(&self, symbol: &str, limit: usize) -> Result<Vec<RawEarningsRow>>;
}
