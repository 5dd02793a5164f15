//! 原始财报行字段提取
//!
//! 不同数据源版本对同一字段的命名不同，按候选名称顺序查找，
//! 取第一个存在且可转换为数值的字段。

use serde_json::{Map, Value};

/// EPS 预期候选字段名
pub const EPS_ESTIMATE_FIELDS: &[&str] = &["EPS Estimate", "epsestimate", "Estimate", "estimate"];
/// 实际 EPS 候选字段名
pub const EPS_ACTUAL_FIELDS: &[&str] = &["Reported EPS", "reportedEPS", "epsactual", "actual"];
/// 超预期幅度候选字段名
pub const SURPRISE_PERCENT_FIELDS: &[&str] = &["Surprise(%)", "surprise", "surprise_percent"];

/// 按候选名称顺序提取字段
///
/// 缺失、为 null 或 `convert` 返回 None 的字段会被跳过
pub fn first_field<T>(
    fields: &Map<String, Value>,
    candidates: &[&str],
    convert: impl Fn(&Value) -> Option<T>,
) -> Option<T> {
    candidates
        .iter()
        .filter_map(|name| fields.get(*name))
        .filter(|value| !value.is_null())
        .find_map(convert)
}

/// 数值转换：数字直接取值，字符串尝试解析；非有限值视为缺失
pub fn to_f64(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    number.is_finite().then_some(number)
}

/// 按候选名称提取数值字段
pub fn first_f64(fields: &Map<String, Value>, candidates: &[&str]) -> Option<f64> {
    first_field(fields, candidates, to_f64)
}
