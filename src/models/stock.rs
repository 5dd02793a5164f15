//! 股票数据模型
//!
//! 定义自选股列表相关的数据结构

use serde::{Deserialize, Serialize};

/// 自选股记录
///
/// 以大写股票代码作为唯一标识
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Stock {
    /// 股票代码
    pub symbol: String,
    /// 股票名称
    pub name: String,
    /// 价格
    pub price: f64,
    /// 备注（可选）
    #[serde(default)]
    pub notes: Option<String>,
}

impl Stock {
    pub fn new(symbol: impl Into<String>, name: impl Into<String>, price: f64) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
            price,
            notes: None,
        }
    }
}

/// 删除接口返回的状态
#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteStatus {
    pub status: String,
}

impl DeleteStatus {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}
