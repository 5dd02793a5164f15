//! 雅虎财经财报数据源
//!
//! 对接 https://query1.finance.yahoo.com/v1/finance/visualization
//! 需要先访问 fc.yahoo.com 获取会话 Cookie，再获取 crumb 令牌

use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use chrono::DateTime;
use chrono_tz::America::New_York;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use tokio::sync::Mutex;
use url::Url;

use super::source::EarningsSource;
use crate::config::EarningsConfig;
use crate::models::RawEarningsRow;

/// 获取会话 Cookie 的地址
const YAHOO_COOKIE_URL: &str = "https://fc.yahoo.com";
const YAHOO_REFERER: &str = "https://finance.yahoo.com/";
const CRUMB_PATH: &str = "v1/test/getcrumb";
const VISUALIZATION_PATH: &str = "v1/finance/visualization";
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// 财报日期列
const DATE_COLUMN: &str = "startdatetime";

/// 原始列名到展示列名的映射
fn display_label(column: &str) -> &str {
    match column {
        "epsestimate" => "EPS Estimate",
        "epsactual" => "Reported EPS",
        "epssurprisepct" => "Surprise(%)",
        "timeZoneShortName" => "Time Zone",
        "eventtype" => "Event Type",
        other => other,
    }
}

/// 雅虎财经财报数据源
pub struct YahooEarningsSource {
    client: Client,
    base_url: Url,
    /// 缓存的 crumb 令牌
    crumb: Mutex<Option<String>>,
}

impl YahooEarningsSource {
    pub fn new(config: &EarningsConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)
            .with_context(|| format!("无效的财报数据源地址: {}", config.base_url))?;

        let client = Client::builder()
            .cookie_store(true)
            .gzip(true)
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url,
            crumb: Mutex::new(None),
        })
    }

    /// 获取缓存的 crumb，不存在时重新获取
    async fn crumb(&self) -> Result<String> {
        let mut cached = self.crumb.lock().await;
        if let Some(crumb) = cached.as_ref() {
            return Ok(crumb.clone());
        }
        let crumb = self.fetch_crumb().await?;
        *cached = Some(crumb.clone());
        Ok(crumb)
    }

    async fn invalidate_crumb(&self) {
        *self.crumb.lock().await = None;
    }

    async fn fetch_crumb(&self) -> Result<String> {
        // 会话 Cookie 由 cookie_store 保存，这里只关心请求能否发出
        if let Err(e) = self
            .client
            .get(YAHOO_COOKIE_URL)
            .header("Referer", YAHOO_REFERER)
            .send()
            .await
        {
            log::warn!("获取雅虎会话 Cookie 失败: {}", e);
        }

        let url = self.base_url.join(CRUMB_PATH)?;
        let response = self
            .client
            .get(url)
            .header("Referer", YAHOO_REFERER)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(anyhow!("获取 crumb 失败: {}", response.status()));
        }

        let body = response.text().await?;
        let crumb = body.trim();
        if crumb.is_empty() || crumb.len() >= 100 || crumb.contains(' ') || crumb.contains('<') {
            return Err(anyhow!("crumb 格式无效"));
        }

        log::debug!("获取雅虎 crumb 成功");
        Ok(crumb.to_string())
    }

    async fn send_query(&self, symbol: &str, limit: usize, crumb: &str) -> Result<reqwest::Response> {
        let url = self.base_url.join(VISUALIZATION_PATH)?;
        log::debug!("请求 {} 财报数据，数量 {}", symbol, limit);

        let response = self
            .client
            .post(url)
            .query(&[("lang", "en-US"), ("region", "US"), ("crumb", crumb)])
            .header("Referer", YAHOO_REFERER)
            .json(&visualization_body(symbol, limit))
            .send()
            .await?;
        Ok(response)
    }
}

#[async_trait]
impl EarningsSource for YahooEarningsSource {
    async fn query(&self, symbol: &str, limit: usize) -> Result<Vec<RawEarningsRow>> {
        let crumb = self.crumb().await?;
        let mut response = self.send_query(symbol, limit, &crumb).await?;

        // crumb 过期时刷新一次后重试
        if matches!(response.status(), StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
            self.invalidate_crumb().await;
            let crumb = self.crumb().await?;
            response = self.send_query(symbol, limit, &crumb).await?;
        }

        if !response.status().is_success() {
            return Err(anyhow!("获取 {} 财报数据失败: {}", symbol, response.status()));
        }

        let body: Value = response.json().await?;
        parse_visualization_response(&body)
    }
}

/// 构建财报查询请求体（eventtype 2 表示财报）
fn visualization_body(symbol: &str, limit: usize) -> Value {
    json!({
        "size": limit,
        "query": {
            "operator": "and",
            "operands": [
                { "operator": "eq", "operands": ["ticker", symbol] },
                { "operator": "eq", "operands": ["eventtype", "2"] }
            ]
        },
        "sortField": DATE_COLUMN,
        "sortType": "DESC",
        "entityIdType": "earnings",
        "includeFields": [
            DATE_COLUMN,
            "timeZoneShortName",
            "epsestimate",
            "epsactual",
            "epssurprisepct",
            "eventtype"
        ]
    })
}

/// 将财报时间转换为交易所（纽约）时间
///
/// 无法解析的值原样保留，由归一化层决定是否丢弃
fn exchange_key(value: &Value) -> String {
    let Some(raw) = value.as_str() else {
        return String::new();
    };
    match DateTime::parse_from_rfc3339(raw) {
        Ok(dt) => dt.with_timezone(&New_York).to_rfc3339(),
        Err(_) => raw.to_string(),
    }
}

/// 解析 visualization 接口响应
///
/// 格式: {"finance": {"result": [{"documents": [{"columns": [{"label": ...}], "rows": [[...]]}]}], "error": null}}
pub fn parse_visualization_response(body: &Value) -> Result<Vec<RawEarningsRow>> {
    let finance = &body["finance"];
    if !finance["error"].is_null() {
        return Err(anyhow!("雅虎接口返回错误: {}", finance["error"]));
    }

    let document = &finance["result"][0]["documents"][0];
    let (Some(columns), Some(rows)) = (document["columns"].as_array(), document["rows"].as_array())
    else {
        return Ok(Vec::new());
    };

    let labels: Vec<&str> = columns
        .iter()
        .map(|c| c["label"].as_str().or_else(|| c["id"].as_str()).unwrap_or(""))
        .collect();
    let date_index = labels.iter().position(|label| *label == DATE_COLUMN);

    let mut result = Vec::with_capacity(rows.len());
    for row in rows {
        let Some(cells) = row.as_array() else {
            continue;
        };

        let key = date_index
            .and_then(|i| cells.get(i))
            .map(exchange_key)
            .unwrap_or_default();

        let raw = labels
            .iter()
            .zip(cells)
            .filter(|(label, _)| **label != DATE_COLUMN && !label.is_empty())
            .fold(RawEarningsRow::new(key), |raw, (label, cell)| {
                raw.with_field(display_label(label), cell.clone())
            });
        result.push(raw);
    }

    Ok(result)
}

// ==================== 测试模块 ====================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_response() -> Value {
        json!({
            "finance": {
                "result": [{
                    "documents": [{
                        "columns": [
                            { "label": "startdatetime", "type": "STRING" },
                            { "label": "timeZoneShortName", "type": "STRING" },
                            { "label": "epsestimate", "type": "NUMBER" },
                            { "label": "epsactual", "type": "NUMBER" },
                            { "label": "epssurprisepct", "type": "NUMBER" },
                            { "label": "eventtype", "type": "STRING" }
                        ],
                        "rows": [
                            ["2025-10-30T20:30:00.000Z", "EDT", 1.77, null, null, "2"],
                            ["2025-01-31T02:30:00Z", "EST", 2.35, 2.40, 2.13, "2"],
                            "not a row"
                        ]
                    }]
                }],
                "error": null
            }
        })
    }

    /// 测试解析财报响应
    #[test]
    fn test_parse_visualization_response() {
        println!("\n========== 测试解析雅虎财报响应 ==========");
        let rows = parse_visualization_response(&sample_response()).unwrap();

        for row in &rows {
            println!("  {} -> {:?}", row.key, row.fields);
        }
        assert_eq!(rows.len(), 2);

        assert_eq!(rows[0].key, "2025-10-30T16:30:00-04:00");
        assert_eq!(rows[0].fields["EPS Estimate"], json!(1.77));
        assert!(rows[0].fields["Reported EPS"].is_null());
        assert!(!rows[0].fields.contains_key(DATE_COLUMN));

        // UTC 凌晨的财报在纽约时间仍属于前一天
        assert_eq!(rows[1].key, "2025-01-30T21:30:00-05:00");
        assert_eq!(rows[1].fields["Surprise(%)"], json!(2.13));
        println!("✅ 雅虎财报响应解析测试通过！");
    }

    #[test]
    fn test_parse_error_response() {
        let body = json!({
            "finance": { "result": null, "error": { "code": "Unauthorized", "description": "Invalid Crumb" } }
        });
        assert!(parse_visualization_response(&body).is_err());
    }

    #[test]
    fn test_parse_empty_response() {
        let body = json!({ "finance": { "result": [], "error": null } });
        assert!(parse_visualization_response(&body).unwrap().is_empty());

        let body = json!({ "finance": { "result": [{ "documents": [] }], "error": null } });
        assert!(parse_visualization_response(&body).unwrap().is_empty());
    }

    #[test]
    fn test_exchange_key_keeps_unparseable_values() {
        assert_eq!(exchange_key(&json!("2025-01-30")), "2025-01-30");
        assert_eq!(exchange_key(&Value::Null), "");
    }

    #[test]
    fn test_visualization_body() {
        let body = visualization_body("AAPL", 8);
        assert_eq!(body["size"], json!(8));
        assert_eq!(body["query"]["operands"][0]["operands"][1], json!("AAPL"));
        assert_eq!(body["entityIdType"], json!("earnings"));
    }

    #[test]
    fn test_new_rejects_invalid_base_url() {
        let config = EarningsConfig {
            base_url: "not a url".to_string(),
            ..EarningsConfig::default()
        };
        assert!(YahooEarningsSource::new(&config).is_err());
        assert!(YahooEarningsSource::new(&EarningsConfig::default()).is_ok());
    }
}
