//! 规则型聊天指令解析
//!
//! 支持的指令（指令词和代码不区分大小写）：
//! - `list`：查看当前列表
//! - `add SYMBOL NAME PRICE`：添加或覆盖，如 `add AAPL Apple 195.3`
//! - `remove SYMBOL`：删除，如 `remove AAPL`
//! - `update SYMBOL PRICE`：更新价格，如 `update AAPL 200.0`
//!
//! 注意：聊天中的 add 总是覆盖已有记录，与 POST /stocks 的唯一性校验不同。

use crate::models::{ChatResponse, Stock};
use crate::services::store::StockStore;

pub const USAGE_REPLY: &str = "Please type a command like 'add AAPL Apple 195.3' or 'list'.";
pub const HELP_REPLY: &str =
    "I support: 'list', 'add SYMBOL NAME PRICE', 'remove SYMBOL', and 'update SYMBOL PRICE'.";
const ADD_PRICE_ERROR: &str = "Could not parse price. Use something like 'add AAPL Apple 195.3'";
const UPDATE_PRICE_ERROR: &str = "Could not parse price. Use something like 'update AAPL 200.0'";

/// 解析后的指令
#[derive(Debug, Clone, PartialEq)]
pub enum Command<'a> {
    List,
    Empty,
    Add {
        symbol: String,
        name: String,
        price: &'a str,
    },
    Remove {
        symbol: String,
    },
    Update {
        symbol: String,
        price: &'a str,
    },
    Unrecognized,
}

impl<'a> Command<'a> {
    /// 按（指令词，分词数量）分派
    pub fn parse(text: &'a str) -> Self {
        let text = text.trim();
        if text.eq_ignore_ascii_case("list") {
            return Command::List;
        }

        let parts: Vec<&str> = text.split_whitespace().collect();
        let Some(first) = parts.first() else {
            return Command::Empty;
        };

        match (first.to_lowercase().as_str(), parts.len()) {
            ("add", n) if n >= 4 => Command::Add {
                symbol: parts[1].to_uppercase(),
                name: parts[2..n - 1].join(" "),
                price: parts[n - 1],
            },
            ("remove", 2) => Command::Remove {
                symbol: parts[1].to_uppercase(),
            },
            ("update", 3) => Command::Update {
                symbol: parts[1].to_uppercase(),
                price: parts[2],
            },
            _ => Command::Unrecognized,
        }
    }
}

/// 以 Python repr 风格格式化价格
///
/// 十进制指数在 [-4, 16) 内用定点表示，整数值保留一位小数（200.0）；
/// 否则用科学计数法，指数带符号且至少两位（1e+16、1.5e-05）
pub fn format_price(price: f64) -> String {
    if price.is_nan() {
        return "nan".to_string();
    }
    if price.is_infinite() {
        return if price > 0.0 { "inf".to_string() } else { "-inf".to_string() };
    }

    // {:e} 给出最短往返的有效数字，如 "1.953e2"
    let scientific = format!("{:e}", price);
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((scientific.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if (-4..16).contains(&exponent) {
        let fixed = format!("{}", price);
        if fixed.contains('.') { fixed } else { format!("{}.0", fixed) }
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", mantissa, sign, exponent.abs())
    }
}

fn parse_price(text: &str) -> Option<f64> {
    text.parse::<f64>().ok()
}

/// 解释一条指令并作用于股票列表
///
/// 无论成功与否，都返回执行后的完整列表快照
pub fn interpret(text: &str, store: &mut StockStore) -> ChatResponse {
    let reply = match Command::parse(text) {
        Command::List => format!("You currently have {} stock(s).", store.len()),
        Command::Empty => USAGE_REPLY.to_string(),
        Command::Add { symbol, name, price } => match parse_price(price) {
            Some(price) => {
                let reply = format!("Added {} ({}) at {}.", symbol, name, format_price(price));
                log::info!("聊天指令添加股票 {} 价格 {}", symbol, price);
                store.upsert(Stock::new(symbol, name, price));
                reply
            }
            None => ADD_PRICE_ERROR.to_string(),
        },
        Command::Remove { symbol } => match store.remove(&symbol) {
            Some(_) => {
                log::info!("聊天指令删除股票 {}", symbol);
                format!("Removed {}.", symbol)
            }
            None => format!("{} is not in your list.", symbol),
        },
        Command::Update { symbol, price } => match store.get_mut(&symbol) {
            None => format!("{} is not in your list.", symbol),
            Some(existing) => match parse_price(price) {
                Some(price) => {
                    existing.price = price;
                    log::info!("聊天指令更新股票 {} 价格为 {}", symbol, price);
                    format!("Updated {} to {}.", symbol, format_price(price))
                }
                None => UPDATE_PRICE_ERROR.to_string(),
            },
        },
        Command::Unrecognized => HELP_REPLY.to_string(),
    };

    ChatResponse {
        reply,
        stocks: store.snapshot(),
    }
}

// ==================== 测试模块 ====================
