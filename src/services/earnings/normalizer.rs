//! 财报日历归一化
//!
//! 对每只股票查询外部数据源，容忍缺失或格式错误的行，输出：
//! - 下一次（今天及以后最早的）财报日期和 EPS 预期
//! - 最近 `num - 1` 次历史财报（日期倒序）
//!
//! 单只股票查询失败不会中断整批请求，该股票返回空字段条目。

use chrono::{Local, NaiveDate};

use super::fields::{
    first_f64, EPS_ACTUAL_FIELDS, EPS_ESTIMATE_FIELDS, SURPRISE_PERCENT_FIELDS,
};
use super::source::EarningsSource;
use crate::models::{EarningsEntry, PastEarning, RawEarningsRow, SymbolsInput};

/// 每只股票至少查询的事件数
const MIN_QUERY_LIMIT: usize = 8;
/// 在请求数量之外额外多查的事件数，保证今天前后都有数据
const QUERY_CUSHION: usize = 4;

/// 获取财报日历，以本地日期作为"今天"
pub async fn get_earnings_calendar(
    source: &dyn EarningsSource,
    symbols: impl Into<SymbolsInput>,
    num: i64,
) -> Vec<EarningsEntry> {
    let today = Local::now().date_naive();
    get_earnings_calendar_on(source, symbols, num, today).await
}

/// 以指定日期作为"今天"获取财报日历
///
/// 整批请求使用同一个参考日期
pub async fn get_earnings_calendar_on(
    source: &dyn EarningsSource,
    symbols: impl Into<SymbolsInput>,
    num: i64,
    today: NaiveDate,
) -> Vec<EarningsEntry> {
    let num = normalize_num(num);
    let limit = query_limit(num);
    let symbols = normalize_symbols(symbols.into());

    let mut results = Vec::with_capacity(symbols.len());
    for symbol in symbols {
        let entry = match source.query(&symbol, limit).await {
            Ok(rows) => build_entry(&symbol, rows, num, today),
            Err(e) => {
                log::error!("获取 {} 财报数据失败: {:#}", symbol, e);
                EarningsEntry::empty(symbol)
            }
        };
        results.push(entry);
    }
    results
}

/// num <= 0 按 1 处理
pub fn normalize_num(num: i64) -> usize {
    if num <= 0 { 1 } else { num as usize }
}

fn query_limit(num: usize) -> usize {
    num.saturating_add(QUERY_CUSHION).max(MIN_QUERY_LIMIT)
}

/// 去除空白、丢弃空代码并转为大写，保留重复项和输入顺序
pub fn normalize_symbols(symbols: SymbolsInput) -> Vec<String> {
    symbols
        .into_vec()
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_uppercase)
        .collect()
}

/// 解析行索引中的日期，取前 10 个字符按 YYYY-MM-DD 解析
///
/// 只接受严格的 `DDDD-DD-DD` 形式，带符号、空白或单位数月日的键一律丢弃
pub fn parse_row_date(key: &str) -> Option<NaiveDate> {
    let head = key.get(..10).unwrap_or(key);
    let well_formed = head.len() == 10
        && head.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !well_formed {
        return None;
    }
    NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()
}

/// 由单只股票的原始行构建归一化条目
pub fn build_entry(
    symbol: &str,
    rows: Vec<RawEarningsRow>,
    num: usize,
    today: NaiveDate,
) -> EarningsEntry {
    let mut entry = EarningsEntry::empty(symbol);

    let mut dated: Vec<(NaiveDate, RawEarningsRow)> = rows
        .into_iter()
        .filter_map(|row| parse_row_date(&row.key).map(|date| (date, row)))
        .collect();
    if dated.is_empty() {
        return entry;
    }
    dated.sort_by_key(|(date, _)| *date);

    let split = dated.partition_point(|(date, _)| *date < today);
    let (past, future) = dated.split_at(split);

    if let Some((date, row)) = future.first() {
        entry.next_earnings_date = Some(date.format("%Y-%m-%d").to_string());
        entry.next_earnings_estimate = first_f64(&row.fields, EPS_ESTIMATE_FIELDS);
    }

    let max_past = num.saturating_sub(1);
    entry.past_earnings = past
        .iter()
        .rev()
        .take(max_past)
        .map(|(date, row)| PastEarning {
            date: date.format("%Y-%m-%d").to_string(),
            eps_estimate: first_f64(&row.fields, EPS_ESTIMATE_FIELDS),
            eps_actual: first_f64(&row.fields, EPS_ACTUAL_FIELDS),
            surprise_percent: first_f64(&row.fields, SURPRISE_PERCENT_FIELDS),
        })
        .collect();

    entry
}

// ==================== 测试模块 ====================
