//! 财报日历服务
//!
//! ## 组成
//! - source：外部数据源抽象
//! - yahoo：雅虎财经数据源实现
//! - fields：多候选字段名提取
//! - normalizer：过去/未来拆分与归一化

mod fields;
mod normalizer;
mod source;
mod yahoo;

pub use normalizer::get_earnings_calendar;
pub use source::EarningsSource;
pub use yahoo::YahooEarningsSource;
