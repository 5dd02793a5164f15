//! 内存股票列表
//!
//! 以大写股票代码为键、按插入顺序保存自选股记录。
//! 进程启动时创建，由 HTTP 层持有并传入各业务函数。

use indexmap::IndexMap;

use crate::models::Stock;

/// 股票代码归一化：去除首尾空白并转为大写
pub fn canonical_symbol(symbol: &str) -> String {
    symbol.trim().to_uppercase()
}

/// 内存股票列表
#[derive(Debug, Default, Clone)]
pub struct StockStore {
    stocks: IndexMap<String, Stock>,
}

impl StockStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.stocks.len()
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.get(symbol).is_some()
    }

    pub fn get(&self, symbol: &str) -> Option<&Stock> {
        self.stocks.get(&canonical_symbol(symbol))
    }

    pub fn get_mut(&mut self, symbol: &str) -> Option<&mut Stock> {
        self.stocks.get_mut(&canonical_symbol(symbol))
    }

    /// 插入或覆盖记录
    ///
    /// 覆盖已有代码时保留其原有位置
    pub fn upsert(&mut self, stock: Stock) {
        self.stocks.insert(canonical_symbol(&stock.symbol), stock);
    }

    /// 删除记录，其余记录保持原有顺序
    pub fn remove(&mut self, symbol: &str) -> Option<Stock> {
        self.stocks.shift_remove(&canonical_symbol(symbol))
    }

    /// 按插入顺序返回全部记录的快照
    pub fn snapshot(&self) -> Vec<Stock> {
        self.stocks.values().cloned().collect()
    }
}
