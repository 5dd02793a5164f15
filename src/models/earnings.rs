//! 财报日历数据模型
//!
//! 定义财报查询的输入、外部数据源原始行以及归一化后的输出结构

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// 单只股票的财报汇总
///
/// 包含下一次财报日期、预期 EPS 以及最近若干次历史财报
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct EarningsEntry {
    /// 股票代码（大写）
    pub symbol: String,
    /// 下一次财报日期（YYYY-MM-DD）
    pub next_earnings_date: Option<String>,
    /// 下一次财报的 EPS 预期
    pub next_earnings_estimate: Option<f64>,
    /// 历史财报（日期倒序）
    pub past_earnings: Vec<PastEarning>,
}

impl EarningsEntry {
    /// 创建所有字段为空的条目
    pub fn empty(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            next_earnings_date: None,
            next_earnings_estimate: None,
            past_earnings: Vec::new(),
        }
    }
}

/// 历史财报事件
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PastEarning {
    /// 财报日期（YYYY-MM-DD）
    pub date: String,
    /// EPS 预期
    pub eps_estimate: Option<f64>,
    /// 实际 EPS
    pub eps_actual: Option<f64>,
    /// 超预期幅度（百分比）
    pub surprise_percent: Option<f64>,
}

/// 外部数据源返回的原始财报行
///
/// 字段名随数据源版本变化，因此按键值对保存
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawEarningsRow {
    /// 日期类索引（如 "2025-01-30T16:30:00-05:00"）
    pub key: String,
    /// 原始字段
    pub fields: Map<String, Value>,
}

impl RawEarningsRow {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            fields: Map::new(),
        }
    }

    /// 追加一个字段（构建器风格）
    pub fn with_field(mut self, name: &str, value: Value) -> Self {
        self.fields.insert(name.to_string(), value);
        self
    }
}

/// 股票代码输入：单个代码或代码列表
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum SymbolsInput {
    One(String),
    Many(Vec<String>),
}

impl SymbolsInput {
    /// 展开为代码列表（未做归一化）
    pub fn into_vec(self) -> Vec<String> {
        match self {
            SymbolsInput::One(symbol) => vec![symbol],
            SymbolsInput::Many(symbols) => symbols,
        }
    }
}

impl From<&str> for SymbolsInput {
    fn from(symbol: &str) -> Self {
        SymbolsInput::One(symbol.to_string())
    }
}

impl From<String> for SymbolsInput {
    fn from(symbol: String) -> Self {
        SymbolsInput::One(symbol)
    }
}

impl From<Vec<String>> for SymbolsInput {
    fn from(symbols: Vec<String>) -> Self {
        SymbolsInput::Many(symbols)
    }
}

impl From<Vec<&str>> for SymbolsInput {
    fn from(symbols: Vec<&str>) -> Self {
        SymbolsInput::Many(symbols.into_iter().map(str::to_string).collect())
    }
}

fn default_num() -> i64 {
    1
}

/// 财报查询参数（GET，代码以逗号分隔）
#[derive(Debug, Deserialize)]
pub struct EarningsQuery {
    /// 股票代码，如 "AAPL,MSFT"
    pub symbols: String,
    /// 每只股票返回的财报事件数量
    #[serde(default = "default_num")]
    pub num: i64,
}

/// 财报查询请求体（POST）
#[derive(Debug, Deserialize)]
pub struct EarningsRequest {
    pub symbols: SymbolsInput,
    #[serde(default = "default_num")]
    pub num: i64,
}
